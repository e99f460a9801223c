//! Dissolve, old frame melts into the new through a checkerboard

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

fn overlay<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, odd_pattern: bool) {
    for col in zone.first_col()..=zone.last_col() {
        let odd = (col - zone.first_col()) & 1 == 1;
        let pattern = if odd == odd_pattern { 0x55 } else { 0xaa };
        let mut c = zone.data_bar(zone.get_col(mx, col));
        c |= pattern;
        zone.put_col(mx, col, zone.data_bar(c));
    }
}

pub(super) fn dissolve<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    match zone.fsm {
        Initialise | Pause => {
            // first mask over whatever is currently displayed
            overlay(zone, mx, false);
            zone.fsm = GetFirstChar;
        }
        GetFirstChar => {
            // inverse mask over the target frame
            if moving_in {
                common_print(zone, mx);
            } else {
                zone.clear_zone(mx);
            }
            overlay(zone, mx, true);
            zone.fsm = GetNextChar;
        }
        GetNextChar => {
            if moving_in {
                common_print(zone, mx);
            } else {
                zone.clear_zone(mx);
            }
            zone.fsm = if moving_in { Pause } else { End };
        }
        _ => zone.fsm = if moving_in { Pause } else { End },
    }
}
