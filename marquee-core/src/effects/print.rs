//! Immediate print, the degenerate transition

use super::common_print;
use crate::traits::PixelSurface;
use crate::zone::{FsmState, Zone};

pub(super) fn print<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    if moving_in {
        common_print(zone, mx);
        zone.fsm = FsmState::Pause;
    } else {
        zone.clear_zone(mx);
        zone.fsm = FsmState::End;
    }
}

/// No-transition selector. Entering behaves as an immediate print; as an
/// exit it ends the cycle with the text left on display.
pub(super) fn no_effect<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S, moving_in: bool) {
    if moving_in {
        common_print(zone, mx);
        zone.fsm = FsmState::Pause;
    } else {
        zone.fsm = FsmState::End;
    }
}
