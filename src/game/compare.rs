//! Comparison of two already-classified plays under the trump rules:
//! rockets over everything, bomb-family over plain shapes, and primary
//! rank within a matching type and size.

use std::cmp::Ordering;

use super::combos::{ComboType, PlayedHand};
use super::errors::GameError;

/// Rank two plays. `Greater` means `a` beats `b`. Plays of different type
/// or size are incomparable unless one side is a rocket or bomb-family
/// shape.
pub fn compare(a: &PlayedHand, b: &PlayedHand) -> Result<Ordering, GameError> {
    let a_rocket = a.combo() == ComboType::Rocket;
    let b_rocket = b.combo() == ComboType::Rocket;
    if a_rocket || b_rocket {
        return Ok(match (a_rocket, b_rocket) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            _ => Ordering::Less,
        });
    }

    match (a.combo().is_bomb_family(), b.combo().is_bomb_family()) {
        (true, false) => Ok(Ordering::Greater),
        (false, true) => Ok(Ordering::Less),
        (true, true) => {
            // Physical bomb size first, bomb rank as the tie-break.
            let by_size = a.bomb_size().unwrap_or(0).cmp(&b.bomb_size().unwrap_or(0));
            Ok(by_size.then_with(|| a.primary_rank().cmp(&b.primary_rank())))
        }
        (false, false) => {
            if a.combo() != b.combo() || a.size() != b.size() {
                return Err(GameError::MismatchedPlay);
            }
            Ok(a.primary_rank().cmp(&b.primary_rank()))
        }
    }
}
