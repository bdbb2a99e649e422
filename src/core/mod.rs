//! Core clock types: seats, player records, configuration, durations, seating.
//!
//! Everything here is plain data or pure functions. The turn engine and
//! the session build on these without reaching back into them.

pub mod player;
pub mod config;
pub mod time;
pub mod seating;

pub use player::{PlayerState, SeatId, SeatMap};
pub use config::{
    clamp_seat_count, ClockConfig, IncrementMode, TurnDirection, DEFAULT_INITIAL_MS,
    DEFAULT_SEATS, MAX_SEATS, MIN_SEATS, OUT_OF_TIME_BONUS_MS, REVIVE_BONUS_MS,
};
pub use seating::{compute_order, next_after, SeatOrder};
