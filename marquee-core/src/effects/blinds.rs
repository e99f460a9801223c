//! Blinds, venetian shutter over the frame change

use super::{common_print, LIGHT_BAR};
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

/// Columns per blind slat.
const BLINDS_SIZE: i16 = 4;

fn draw_blinds<S: PixelSurface>(zone: &Zone<'_>, mx: &mut S, width: i16) {
    for col in zone.first_col()..=zone.last_col() {
        if (col - zone.first_col()) % BLINDS_SIZE < width {
            zone.put_col(mx, col, zone.data_bar(LIGHT_BAR));
        }
    }
}

pub(super) fn blinds<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    if matches!(zone.fsm, Initialise | Pause) {
        zone.next_pos = 0;
        zone.fsm = GetFirstChar;
    }

    match zone.fsm {
        GetFirstChar => {
            // blinds close over whatever is currently displayed
            zone.next_pos += 1;
            draw_blinds(zone, mx, zone.next_pos);
            if zone.next_pos == BLINDS_SIZE {
                zone.fsm = GetNextChar;
            }
        }
        GetNextChar => {
            // blinds open over the target frame
            if moving_in {
                common_print(zone, mx);
            } else {
                zone.clear_zone(mx);
            }
            zone.next_pos -= 1;
            draw_blinds(zone, mx, zone.next_pos);
            if zone.next_pos == 0 {
                zone.fsm = PutChar;
            }
        }
        PutChar => {
            if moving_in {
                common_print(zone, mx);
                zone.fsm = Pause;
            } else {
                zone.clear_zone(mx);
                zone.fsm = End;
            }
        }
        _ => zone.fsm = if moving_in { Pause } else { End },
    }
}
