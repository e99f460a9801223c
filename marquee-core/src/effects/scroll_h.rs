//! Horizontal scroll
//!
//! Text enters column by column from one side of the zone and marches
//! across until it reaches its layout position; on exit it keeps moving
//! until the zone (or the configured scroll spacing) is clear.

use super::next_visible_char;
use crate::traits::{PixelSurface, Transform};
use crate::zone::{FsmState, Zone};

fn shift<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, left: bool) {
    let op = if left {
        Transform::ShiftLeft
    } else {
        Transform::ShiftRight
    };
    mx.transform(zone.first_col() as u16, zone.last_col() as u16, op);
}

/// Column where new data enters the zone.
fn entry_col(zone: &Zone<'_>, left: bool) -> i16 {
    if left {
        zone.last_col()
    } else {
        zone.first_col()
    }
}

pub(super) fn scroll<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool, left: bool) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            zone.set_wraparound(mx, false);
            if !zone.get_first_char() {
                zone.fsm = End;
                return;
            }
            zone.count_cols = 0;
            // filler shifts still needed after the last column enters
            zone.next_pos = 0;
            zone.end_pos = if left {
                zone.last_col() - zone.limit_right
            } else {
                zone.limit_left - zone.first_col()
            };
            zone.fsm = if zone.cbuf.is_empty() { GetNextChar } else { PutChar };
        }

        if zone.fsm == GetNextChar {
            if !next_visible_char(zone) {
                zone.fsm = if zone.end_pos > 0 { PutFiller } else { Pause };
            } else {
                zone.fsm = PutChar;
            }
        }

        match zone.fsm {
            PutChar => {
                shift(zone, mx, left);
                let data = zone.data_bar(zone.cbuf[zone.count_cols]);
                zone.put_col(mx, entry_col(zone, left), data);
                zone.count_cols += 1;
                if zone.count_cols == zone.cbuf.len() {
                    zone.fsm = GetNextChar;
                }
            }
            PutFiller => {
                shift(zone, mx, left);
                zone.put_col(mx, entry_col(zone, left), zone.data_bar(0));
                zone.next_pos += 1;
                if zone.next_pos == zone.end_pos {
                    zone.fsm = Pause;
                }
            }
            Pause => {}
            _ => zone.fsm = Pause,
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.set_wraparound(mx, false);
            zone.fsm = PutFiller;
        }
        if zone.fsm != PutFiller {
            zone.fsm = End;
        } else {
            shift(zone, mx, left);
            let empty = zone.data_bar(0);
            zone.put_col(mx, entry_col(zone, left), empty);

            // run of clear columns behind the departing text
            let mut run: u16 = 0;
            let mut col = entry_col(zone, left);
            while col >= zone.first_col()
                && col <= zone.last_col()
                && zone.get_col(mx, col) == empty
            {
                run += 1;
                col += if left { -1 } else { 1 };
            }
            let max = if zone.scroll_spacing > 0 {
                zone.scroll_spacing.min(zone.width_cols())
            } else {
                zone.width_cols()
            };
            if run >= max {
                zone.fsm = End;
            }
        }
    }
}
