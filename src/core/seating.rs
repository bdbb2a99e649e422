//! Serpentine seating order.
//!
//! Even seats run down one side of the table, odd seats come back up the
//! other. For six seats the forward order is `0 2 4 5 3 1`. Reversing the
//! direction reverses the whole order.

use smallvec::SmallVec;

use super::config::{TurnDirection, MAX_SEATS};
use super::player::SeatId;

/// Turn order for one table. Inline up to `MAX_SEATS` seats.
pub type SeatOrder = SmallVec<[SeatId; MAX_SEATS]>;

/// Compute the turn order for `seat_count` seats.
///
/// ```
/// use table_clock::core::{compute_order, SeatId, TurnDirection};
///
/// let order = compute_order(4, TurnDirection::Forward);
/// let raw: Vec<u8> = order.iter().map(|s| s.0).collect();
/// assert_eq!(raw, vec![0, 2, 3, 1]);
/// ```
#[must_use]
pub fn compute_order(seat_count: usize, direction: TurnDirection) -> SeatOrder {
    let mut order: SeatOrder = (0..seat_count)
        .step_by(2)
        .filter_map(SeatId::from_index)
        .collect();
    order.extend(
        (1..seat_count)
            .step_by(2)
            .rev()
            .filter_map(SeatId::from_index),
    );

    if direction == TurnDirection::Reverse {
        order.reverse();
    }
    order
}

/// Walk `order` starting just after `from`, returning the first seat that
/// satisfies `eligible`. A full lap is made, so `from` itself is the last
/// candidate.
///
/// If `from` is not in the order, the walk starts at the head of the order.
pub fn next_after(
    order: &[SeatId],
    from: SeatId,
    eligible: impl Fn(SeatId) -> bool,
) -> Option<SeatId> {
    let len = order.len();
    if len == 0 {
        return None;
    }
    let start = order
        .iter()
        .position(|&seat| seat == from)
        .unwrap_or(len - 1);

    (1..=len)
        .map(|step| order[(start + step) % len])
        .find(|&seat| eligible(seat))
}
