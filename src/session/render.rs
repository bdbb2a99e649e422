//! Rendering hook.
//!
//! The session tells the UI *that* something changed and roughly what,
//! never *how* to draw it. The UI re-reads whatever state it shows.

/// What kind of state changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Refresh {
    /// Remaining times or the delay countdown moved.
    Clocks,
    /// Seats were added, removed, renamed, knocked, revived or retimed.
    Seats,
    /// The active seat, the running flag or the direction changed.
    Turn,
    /// A setting changed.
    Settings,
    /// Point totals changed.
    Points,
    /// Leaderboard history changed.
    Leaderboard,
}

/// Receives change notifications from a session.
pub trait Renderer {
    /// Called after every externally visible state change.
    fn refresh(&mut self, reason: Refresh);
}

impl<F: FnMut(Refresh)> Renderer for F {
    fn refresh(&mut self, reason: Refresh) {
        self(reason)
    }
}
