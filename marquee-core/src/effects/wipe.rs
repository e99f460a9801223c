//! Wipe, with optional leading light bar

use super::{common_print, set_initial_effect_conditions, LIGHT_BAR};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

pub(super) fn wipe<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool, bar: bool) {
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
            // blank the not yet revealed region
            let mut col = zone.next_pos;
            loop {
                zone.put_col(mx, col, zone.data_bar(0));
                if col == zone.end_pos {
                    break;
                }
                col += zone.pos_offset;
            }
            if bar {
                zone.put_col(mx, zone.next_pos, zone.data_bar(LIGHT_BAR));
            }
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
            let mut col = zone.start_pos;
            loop {
                zone.put_col(mx, col, zone.data_bar(0));
                if col == zone.next_pos {
                    break;
                }
                col += zone.pos_offset;
            }
            if zone.next_pos == zone.end_pos {
                zone.fsm = End;
            } else {
                if bar {
                    zone.put_col(mx, zone.next_pos, zone.data_bar(LIGHT_BAR));
                }
                zone.next_pos += zone.pos_offset;
            }
        }
    }
}
