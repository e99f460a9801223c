//! Sprite, an animated figure walks the zone revealing or removing text

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

pub(super) fn sprite<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    use FsmState::*;

    if moving_in {
        let Some(sp) = zone.sprite_in else {
            // nothing to walk with, skip the whole cycle
            zone.fsm = End;
            return;
        };
        let width = i16::from(sp.width());

        if zone.fsm == Initialise {
            zone.sprite_frame = 0;
            // leading edge of the sprite, entering from the left
            zone.next_pos = zone.first_col() - 1;
            zone.end_pos = zone.limit_right;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = Pause;
        } else {
            common_print(zone, mx);
            zone.next_pos += 1;

            // text ahead of the sprite is not yet revealed
            for col in zone.next_pos + 1..=zone.end_pos {
                zone.put_col(mx, col, zone.data_bar(0));
            }
            let frame = sp.frame(zone.sprite_frame);
            for (i, &c) in frame.iter().enumerate() {
                zone.put_col(mx, zone.next_pos - i as i16, zone.data_bar(c));
            }
            zone.sprite_frame = (zone.sprite_frame + 1) % sp.frames();

            if zone.next_pos == zone.last_col() + width {
                zone.fsm = Pause;
            }
        }
    } else {
        let Some(sp) = zone.sprite_out else {
            zone.fsm = End;
            return;
        };
        let width = i16::from(sp.width());

        if matches!(zone.fsm, Initialise | Pause) {
            zone.sprite_frame = 0;
            // entering from the right, consuming text as it goes
            zone.next_pos = zone.last_col() + 1;
            zone.end_pos = zone.limit_right;
            zone.fsm = PutChar;
        }
        if zone.fsm != PutChar {
            zone.fsm = End;
        } else {
            common_print(zone, mx);
            zone.next_pos -= 1;

            // text behind the sprite has been eaten
            for col in zone.next_pos + width..=zone.end_pos {
                zone.put_col(mx, col, zone.data_bar(0));
            }
            let frame = sp.frame(zone.sprite_frame);
            for (i, &c) in frame.iter().enumerate() {
                zone.put_col(mx, zone.next_pos + i as i16, zone.data_bar(c));
            }
            zone.sprite_frame = (zone.sprite_frame + 1) % sp.frames();

            if zone.next_pos == zone.first_col() - width {
                zone.clear_zone(mx);
                zone.fsm = End;
            }
        }
    }
}
