//! Horizontal and vertical scan
//!
//! A scan line traverses the text area. The plain variants show the text
//! only where the scan line sits; the X variants show the whole text
//! with the scan line blanked out.

use super::{common_print, set_initial_effect_conditions};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};
use crate::ROW_SIZE;

pub(super) fn horizontal<S: PixelSurface>(
    zone: &mut Zone<'_>,
    mx: &mut S,
    moving_in: bool,
    blank_line: bool,
) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            set_initial_effect_conditions(zone, true);
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            if zone.next_pos == zone.end_pos + zone.pos_offset {
                zone.fsm = Pause;
                return;
            }
            blank_cols(zone, mx, blank_line);
            zone.next_pos += zone.pos_offset;
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            set_initial_effect_conditions(zone, false);
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            common_print(zone, mx);
            blank_cols(zone, mx, blank_line);
            if zone.next_pos == zone.end_pos + zone.pos_offset {
                zone.clear_zone(mx);
                zone.fsm = End;
            } else {
                zone.next_pos += zone.pos_offset;
            }
        }
    }
}

fn blank_cols<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, blank_line: bool) {
    let mut col = zone.start_pos;
    loop {
        let hide = if blank_line {
            col == zone.next_pos
        } else {
            col != zone.next_pos
        };
        if hide {
            zone.put_col(mx, col, zone.data_bar(0));
        }
        if col == zone.end_pos {
            break;
        }
        col += zone.pos_offset;
    }
}

pub(super) fn vertical<S: PixelSurface>(
    zone: &mut Zone<'_>,
    mx: &mut S,
    moving_in: bool,
    blank_line: bool,
) {
    use FsmState::*;

    if moving_in {
        if zone.fsm == Initialise {
            zone.next_pos = 0;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            if zone.next_pos == i16::from(ROW_SIZE) {
                zone.fsm = Pause;
                return;
            }
            mask_rows(zone, mx, blank_line);
            zone.next_pos += 1;
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.next_pos = i16::from(ROW_SIZE) - 1;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            common_print(zone, mx);
            mask_rows(zone, mx, blank_line);
            zone.next_pos -= 1;
            if zone.next_pos < 0 {
                zone.clear_zone(mx);
                zone.fsm = End;
            }
        }
    }
}

fn mask_rows<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, blank_line: bool) {
    let mask = 1u8 << (zone.next_pos as u8);
    for col in zone.limit_left..=zone.limit_right {
        let mut c = zone.data_bar(zone.get_col(mx, col));
        c &= if blank_line { !mask } else { mask };
        zone.put_col(mx, col, zone.data_bar(c));
    }
}
