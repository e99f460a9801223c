//! Vertical scroll
//!
//! The entry sequence redraws the text each increment, displaced by a
//! shrinking row offset toward the entry edge. The exit sequence shifts
//! the live buffer one row per increment until the zone is clear.

use super::{common_print, row_shift_down, row_shift_up};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};
use crate::ROW_SIZE;

pub(super) fn scroll<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool, up: bool) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            zone.set_wraparound(mx, false);
            zone.next_pos = i16::from(ROW_SIZE) - 1;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            // scrolling up enters from the bottom, so the text starts
            // displaced downward (and vice versa)
            for col in zone.first_col()..=zone.last_col() {
                let mut c = zone.get_col(mx, col);
                for _ in 0..zone.next_pos {
                    c = if up {
                        row_shift_down(c, zone.invert)
                    } else {
                        row_shift_up(c, zone.invert)
                    };
                }
                zone.put_col(mx, col, c);
            }
            if zone.next_pos == 0 {
                zone.fsm = Pause;
            } else {
                zone.next_pos -= 1;
            }
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.set_wraparound(mx, false);
            zone.next_pos = 0;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            for col in zone.first_col()..=zone.last_col() {
                let c = zone.get_col(mx, col);
                let c = if up {
                    row_shift_up(c, zone.invert)
                } else {
                    row_shift_down(c, zone.invert)
                };
                zone.put_col(mx, col, c);
            }
            if zone.next_pos == i16::from(ROW_SIZE) - 1 {
                zone.fsm = End;
            } else {
                zone.next_pos += 1;
            }
        }
    }
}
