//! Grow, text rows revealed from one edge
//!
//! A row mask stored in `next_pos` widens one row per increment. Grow-up
//! reveals from the bottom row upward, grow-down from the top row
//! downward; exit retracts in the same direction.

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

fn apply_mask<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, mask: u8) {
    for col in zone.limit_left..=zone.limit_right {
        let mut c = zone.data_bar(zone.get_col(mx, col));
        c &= mask;
        zone.put_col(mx, col, zone.data_bar(c));
    }
}

pub(super) fn grow<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool, up: bool) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            // hidden-row mask, full at the start
            zone.next_pos = if up { 0xff } else { 0x01 };
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            let mask = zone.next_pos as u8;
            let done = if up { mask == 0x00 } else { mask == 0xff };
            if done {
                zone.fsm = Pause;
                return;
            }
            apply_mask(zone, mx, if up { !mask } else { mask });
            zone.next_pos = i16::from(if up { mask >> 1 } else { (mask << 1) | 0x01 });
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.next_pos = if up { 0x01 } else { 0xff };
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            common_print(zone, mx);
            let mask = zone.next_pos as u8;
            apply_mask(zone, mx, if up { !mask } else { mask });
            let done = if up { mask == 0xff } else { mask == 0x00 };
            if done {
                zone.fsm = End;
            } else {
                zone.next_pos = i16::from(if up { (mask << 1) | 0x01 } else { mask >> 1 });
            }
        }
    }
}
