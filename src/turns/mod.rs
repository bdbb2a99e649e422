//! Turn engine for the shared table clock.
//!
//! `TurnEngine` decides whose clock runs, applies elapsed time, and
//! handles increments, delays, knockouts, revivals and time-outs.
//! The host drives it with `advance(delta_ms)` and user actions.

pub mod engine;

pub use engine::{KnockToggle, SeatStatus, TickOutcome, TurnEngine};
