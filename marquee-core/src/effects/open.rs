//! Opening, text revealed from the center outward

use super::{common_print, LIGHT_BAR};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

fn bars<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, offset: i16) {
    zone.put_col(mx, zone.limit_left + offset, zone.data_bar(LIGHT_BAR));
    zone.put_col(mx, zone.limit_right - offset, zone.data_bar(LIGHT_BAR));
}

pub(super) fn opening<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool, bar: bool) {
    use FsmState::*;

    let half = (zone.limit_right - zone.limit_left) / 2;

    if moving_in {
        if zone.fsm == Initialise {
            zone.next_pos = half + 1;
            zone.clear_zone(mx);
            if bar {
                bars(zone, mx, zone.next_pos);
            }
            zone.fsm = PutChar;
            return;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            if zone.next_pos < 0 {
                zone.fsm = Pause;
                return;
            }
            common_print(zone, mx);
            // blank the outer, not yet revealed portions
            for i in 0..zone.next_pos {
                zone.put_col(mx, zone.limit_left + i, zone.data_bar(0));
                zone.put_col(mx, zone.limit_right - i, zone.data_bar(0));
            }
            zone.next_pos -= 1;
            if bar && zone.next_pos >= 0 {
                bars(zone, mx, zone.next_pos);
            }
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            common_print(zone, mx);
            zone.next_pos = 0;
            if bar {
                bars(zone, mx, zone.next_pos);
            }
            zone.fsm = PutChar;
            return;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            if zone.next_pos > half {
                zone.clear_zone(mx);
                zone.fsm = End;
                return;
            }
            zone.put_col(mx, zone.limit_left + zone.next_pos, zone.data_bar(0));
            zone.put_col(mx, zone.limit_right - zone.next_pos, zone.data_bar(0));
            zone.next_pos += 1;
            if bar && zone.next_pos <= half {
                bars(zone, mx, zone.next_pos);
            }
        }
    }
}
