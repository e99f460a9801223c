//! Mesh, alternate columns slide in from opposite edges

use super::{common_print, row_shift_down, row_shift_up};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};
use crate::ROW_SIZE;

pub(super) fn mesh<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    let rows = i16::from(ROW_SIZE);

    if moving_in {
        if zone.fsm == Initialise {
            zone.next_pos = 0;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            let offset = rows - 1 - zone.next_pos;
            for col in zone.first_col()..=zone.last_col() {
                let from_top = (col - zone.first_col()) & 1 == 0;
                let mut c = zone.get_col(mx, col);
                for _ in 0..offset {
                    c = if from_top {
                        row_shift_up(c, zone.invert)
                    } else {
                        row_shift_down(c, zone.invert)
                    };
                }
                zone.put_col(mx, col, c);
            }
            zone.next_pos += 1;
            if zone.next_pos == rows {
                zone.fsm = Pause;
            }
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.next_pos = 0;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            // columns leave the way they came in
            for col in zone.first_col()..=zone.last_col() {
                let from_top = (col - zone.first_col()) & 1 == 0;
                let c = zone.get_col(mx, col);
                let c = if from_top {
                    row_shift_up(c, zone.invert)
                } else {
                    row_shift_down(c, zone.invert)
                };
                zone.put_col(mx, col, c);
            }
            zone.next_pos += 1;
            if zone.next_pos == rows {
                zone.fsm = End;
            }
        }
    }
}
