//! Fade, brightness ramp in and out

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

pub(super) fn fade<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    if moving_in {
        match zone.fsm {
            Initialise => {
                zone.next_pos = 0;
                zone.end_pos = i16::from(zone.intensity);
                zone.set_surface_intensity(mx, 0);
                zone.clear_zone(mx);
                zone.fsm = GetFirstChar;
            }
            GetFirstChar => {
                zone.set_surface_intensity(mx, zone.next_pos as u8);
                zone.next_pos += 1;
                common_print(zone, mx);
                zone.fsm = PutChar;
            }
            PutChar => {
                if zone.next_pos > zone.end_pos {
                    zone.fsm = Pause;
                } else {
                    zone.set_surface_intensity(mx, zone.next_pos as u8);
                    zone.next_pos += 1;
                }
            }
            _ => zone.fsm = Pause,
        }
    } else {
        if matches!(zone.fsm, Initialise | Pause) {
            zone.end_pos = i16::from(zone.intensity);
            zone.next_pos = i16::from(zone.intensity);
            common_print(zone, mx);
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            zone.set_surface_intensity(mx, zone.next_pos as u8);
            if zone.next_pos == 0 {
                // restore the configured intensity once the zone is dark
                zone.clear_zone(mx);
                zone.set_surface_intensity(mx, zone.end_pos as u8);
                zone.fsm = End;
            } else {
                zone.next_pos -= 1;
            }
        }
    }
}
