//! Random dissolve, pixels revealed or removed in random order
//!
//! A pixel mask with an 11-column period accumulates one randomly chosen
//! cell per increment. Draws that land on an occupied cell are retried a
//! bounded number of times, then fall back to the first free cell so the
//! effect always makes progress and terminates when the mask saturates.

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone, RAND_CYCLE};
use crate::ROW_SIZE;

/// Collision retry limit per increment.
const RAND_RETRY: u8 = 50;

fn add_random_cell(zone: &mut Zone<'_>) {
    for _ in 0..RAND_RETRY {
        let col = usize::from(zone.rng.next_range(RAND_CYCLE as u8));
        let row = zone.rng.next_range(ROW_SIZE);
        if zone.rand_mask[col] & (1 << row) == 0 {
            zone.rand_mask[col] |= 1 << row;
            return;
        }
    }
    // out of retries: take the first free cell
    for col in 0..RAND_CYCLE {
        if zone.rand_mask[col] != 0xff {
            let row = zone.rand_mask[col].trailing_ones();
            zone.rand_mask[col] |= 1 << row;
            return;
        }
    }
}

pub(super) fn random<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    if matches!(zone.fsm, Initialise | Pause) {
        zone.rand_mask = [0; RAND_CYCLE];
        zone.fsm = PutChar;
    }
    if zone.fsm != PutChar {
        zone.fsm = if moving_in { Pause } else { End };
        return;
    }

    add_random_cell(zone);
    let saturated = zone.rand_mask.iter().all(|&m| m == 0xff);

    common_print(zone, mx);
    for col in zone.first_col()..=zone.last_col() {
        let mask = zone.rand_mask[(col - zone.first_col()) as usize % RAND_CYCLE];
        let mut c = zone.data_bar(zone.get_col(mx, col));
        c &= if moving_in { mask } else { !mask };
        zone.put_col(mx, col, zone.data_bar(c));
    }

    if saturated {
        zone.fsm = if moving_in { Pause } else { End };
    }
}
