//! Seat identification and per-seat clock records.
//!
//! ## SeatId
//!
//! Type-safe seat identifier. Seats are fixed table positions, independent
//! of whoever is sitting there and whatever name they chose.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by `Vec` for O(1) access.
//!
//! ## PlayerState
//!
//! Plain data record for one seat: name, remaining time, knocked flag.
//! Anything presentational (disabled inputs, labels) is derived by the
//! rendering layer.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. Seat indices are 0-based: the first seat is `SeatId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u8);

impl SeatId {
    /// Create a new seat ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Build a seat ID from a raw index.
    ///
    /// Returns `None` for indices that cannot name a seat.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        u8::try_from(index).ok().map(Self)
    }

    /// Get the raw seat index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all seat IDs for a table with `seat_count` seats.
    ///
    /// ```
    /// use table_clock::core::SeatId;
    ///
    /// let seats: Vec<_> = SeatId::all(4).collect();
    /// assert_eq!(seats.len(), 4);
    /// assert_eq!(seats[3], SeatId::new(3));
    /// ```
    pub fn all(seat_count: usize) -> impl Iterator<Item = SeatId> {
        (0..seat_count).filter_map(Self::from_index)
    }
}

impl std::fmt::Display for SeatId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use table_clock::core::{SeatId, SeatMap};
///
/// let mut clocks: SeatMap<u64> = SeatMap::new(4, |_| 300_000);
/// clocks[SeatId::new(1)] = 90_000;
/// assert_eq!(clocks[SeatId::new(0)], 300_000);
/// assert_eq!(clocks.get(SeatId::new(1)), Some(&90_000));
/// assert_eq!(clocks.get(SeatId::new(7)), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a new SeatMap with values from a factory function.
    ///
    /// The factory receives the `SeatId` for each seat.
    pub fn new(seat_count: usize, factory: impl Fn(SeatId) -> T) -> Self {
        Self {
            data: SeatId::all(seat_count).map(factory).collect(),
        }
    }

    /// Wrap already-built per-seat values, in seat order.
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Get the number of seats.
    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a seat's data, if the seat exists.
    #[must_use]
    pub fn get(&self, seat: SeatId) -> Option<&T> {
        self.data.get(seat.index())
    }

    /// Get a mutable reference to a seat's data, if the seat exists.
    pub fn get_mut(&mut self, seat: SeatId) -> Option<&mut T> {
        self.data.get_mut(seat.index())
    }

    /// Check whether a seat exists at this table.
    #[must_use]
    pub fn contains(&self, seat: SeatId) -> bool {
        seat.index() < self.data.len()
    }

    /// Iterate over (SeatId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (SeatId, &T)> {
        SeatId::all(self.data.len()).zip(self.data.iter())
    }

    /// Iterate over mutable values in seat order.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.data.iter_mut()
    }

    /// Iterate over values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<SeatId> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: SeatId) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<SeatId> for SeatMap<T> {
    fn index_mut(&mut self, seat: SeatId) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}

/// Clock record for a single seat.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    /// Display name, also the key for scoring.
    pub name: String,

    /// Remaining time in milliseconds. Never negative.
    pub ms_left: u64,

    /// Eliminated by an explicit knockout, independent of time.
    pub knocked: bool,
}

impl PlayerState {
    /// Create a fresh seat record with the default name.
    #[must_use]
    pub fn new(seat: SeatId, ms_left: u64) -> Self {
        Self {
            name: Self::default_name(seat),
            ms_left,
            knocked: false,
        }
    }

    /// Default name for a seat: `Player 1` for seat 0, and so on.
    #[must_use]
    pub fn default_name(seat: SeatId) -> String {
        format!("Player {}", seat.index() + 1)
    }

    /// Trim a proposed name, falling back to the seat default when blank.
    #[must_use]
    pub fn sanitize_name(seat: SeatId, proposed: &str) -> String {
        let trimmed = proposed.trim();
        if trimmed.is_empty() {
            Self::default_name(seat)
        } else {
            trimmed.to_string()
        }
    }

    /// Out of time without having been knocked out. Such a seat can be revived.
    #[must_use]
    pub fn is_out(&self) -> bool {
        !self.knocked && self.ms_left == 0
    }

    /// Can this seat take the turn?
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        !self.knocked && self.ms_left > 0
    }

    /// Add time, saturating.
    pub fn grant(&mut self, ms: u64) {
        self.ms_left = self.ms_left.saturating_add(ms);
    }

    /// Shift remaining time by a signed delta, clamping at zero.
    pub fn adjust(&mut self, delta_ms: i64) {
        self.ms_left = if delta_ms >= 0 {
            self.ms_left.saturating_add(delta_ms.unsigned_abs())
        } else {
            self.ms_left.saturating_sub(delta_ms.unsigned_abs())
        };
    }
}
