//! Diagonal scroll, the four up/down x left/right combinations
//!
//! Entry redraws the text each increment displaced along both axes by a
//! shrinking offset; exit moves the live buffer one row and one column
//! per increment until it has left the zone.

use super::{common_print, row_shift_down, row_shift_up};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};
use crate::ROW_SIZE;

pub(super) fn scroll<S: PixelSurface>(
    zone: &mut Zone<'_>,
    mx: &mut S,
    moving_in: bool,
    up: bool,
    left: bool,
) {
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
            let offset = zone.next_pos;
            let vshift = |mut c: u8| {
                for _ in 0..offset {
                    c = if up {
                        row_shift_down(c, zone.invert)
                    } else {
                        row_shift_up(c, zone.invert)
                    };
                }
                c
            };
            if left {
                // moving up-left or down-left: start displaced right
                for col in (zone.first_col()..=zone.last_col() - offset).rev() {
                    let c = vshift(zone.get_col(mx, col));
                    zone.put_col(mx, col + offset, c);
                }
                for col in zone.first_col()..zone.first_col() + offset {
                    zone.put_col(mx, col, zone.data_bar(0));
                }
            } else {
                for col in zone.first_col() + offset..=zone.last_col() {
                    let c = vshift(zone.get_col(mx, col));
                    zone.put_col(mx, col - offset, c);
                }
                for col in zone.last_col() - offset + 1..=zone.last_col() {
                    zone.put_col(mx, col, zone.data_bar(0));
                }
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
            let vshift = |c: u8| {
                if up {
                    row_shift_up(c, zone.invert)
                } else {
                    row_shift_down(c, zone.invert)
                }
            };
            if left {
                for col in zone.first_col() + 1..=zone.last_col() {
                    let c = vshift(zone.get_col(mx, col));
                    zone.put_col(mx, col - 1, c);
                }
                zone.put_col(mx, zone.last_col(), zone.data_bar(0));
            } else {
                for col in (zone.first_col()..zone.last_col()).rev() {
                    let c = vshift(zone.get_col(mx, col));
                    zone.put_col(mx, col + 1, c);
                }
                zone.put_col(mx, zone.first_col(), zone.data_bar(0));
            }
            // eight row shifts empty the zone regardless of width
            if zone.next_pos == i16::from(ROW_SIZE) - 1 {
                zone.fsm = End;
            } else {
                zone.next_pos += 1;
            }
        }
    }
}
