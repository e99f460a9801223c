//! Slice, single columns fly across the zone one pixel per increment

use super::next_visible_char;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

pub(super) fn slice<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            zone.clear_zone(mx);
            if !zone.get_first_char() {
                zone.fsm = End;
                return;
            }
            zone.count_cols = 0;
            // flying column position and its landing target
            zone.next_pos = zone.last_col() + 1;
            zone.end_pos = zone.limit_left;
            zone.fsm = PutChar;
            if zone.cbuf.is_empty() && !next_visible_char(zone) {
                zone.fsm = Pause;
                return;
            }
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            let data = zone.data_bar(zone.cbuf[zone.count_cols]);
            if zone.cbuf[zone.count_cols] == 0 {
                // blank columns land instantly
                zone.next_pos = zone.end_pos;
            } else if zone.next_pos > zone.end_pos {
                if zone.next_pos <= zone.last_col() {
                    zone.put_col(mx, zone.next_pos, zone.data_bar(0));
                }
                zone.next_pos -= 1;
                zone.put_col(mx, zone.next_pos, data);
            }
            if zone.next_pos <= zone.end_pos {
                // landed, line up the next column
                zone.count_cols += 1;
                zone.end_pos += 1;
                zone.next_pos = zone.last_col() + 1;
                if zone.count_cols == zone.cbuf.len() && !next_visible_char(zone) {
                    zone.fsm = Pause;
                }
            }
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            // pos_offset doubles as the "column in flight" flag
            zone.end_pos = zone.limit_right;
            zone.pos_offset = 0;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            let empty = zone.data_bar(0);
            if zone.pos_offset == 0 {
                // pick the rightmost remaining column
                let mut sel = zone.end_pos;
                while sel >= zone.limit_left && zone.get_col(mx, sel) == empty {
                    sel -= 1;
                }
                if sel < zone.limit_left {
                    zone.fsm = End;
                    return;
                }
                zone.end_pos = sel;
                zone.next_pos = sel;
                zone.pos_offset = 1;
            }
            let data = zone.get_col(mx, zone.next_pos);
            zone.put_col(mx, zone.next_pos, empty);
            if zone.next_pos < zone.last_col() {
                zone.next_pos += 1;
                zone.put_col(mx, zone.next_pos, data);
            } else {
                // flew off the right edge
                zone.pos_offset = 0;
                zone.end_pos -= 1;
            }
        }
    }
}
