//! Transition effects
//!
//! Each effect is a pair of animation sequences, one for text entry and
//! one for exit, advanced one bounded increment per call. Effects share
//! the zone's sweep registers (`start_pos`, `end_pos`, `next_pos`,
//! `pos_offset`) and the column buffer fed by the character pipeline.

mod blinds;
mod close;
mod diag;
mod dissolve;
mod fade;
mod grow;
mod mesh;
mod open;
mod print;
mod random;
mod scan;
mod scroll_h;
mod scroll_v;
mod slice;
mod sprite;
mod wipe;

use crate::traits::PixelSurface;
use crate::zone::{TextEffect, Zone};

/// All-on column used for effect cursors and bars.
pub(crate) const LIGHT_BAR: u8 = 0xff;

/// Run one increment of `effect` on `zone`.
pub(crate) fn dispatch<S: PixelSurface>(
    zone: &mut Zone<'_>,
    mx: &mut S,
    effect: TextEffect,
    moving_in: bool,
) {
    use TextEffect::*;

    #[cfg(feature = "defmt")]
    defmt::trace!(
        "dispatch {} entering={=bool} state {}",
        effect,
        moving_in,
        zone.fsm
    );

    match effect {
        NoEffect => print::no_effect(zone, mx, moving_in),
        Print => print::print(zone, mx, moving_in),
        ScrollUp => scroll_v::scroll(zone, mx, moving_in, true),
        ScrollDown => scroll_v::scroll(zone, mx, moving_in, false),
        ScrollLeft => scroll_h::scroll(zone, mx, moving_in, true),
        ScrollRight => scroll_h::scroll(zone, mx, moving_in, false),
        Slice => slice::slice(zone, mx, moving_in),
        Mesh => mesh::mesh(zone, mx, moving_in),
        Fade => fade::fade(zone, mx, moving_in),
        Dissolve => dissolve::dissolve(zone, mx, moving_in),
        Blinds => blinds::blinds(zone, mx, moving_in),
        Random => random::random(zone, mx, moving_in),
        Wipe => wipe::wipe(zone, mx, moving_in, false),
        WipeCursor => wipe::wipe(zone, mx, moving_in, true),
        ScanHoriz => scan::horizontal(zone, mx, moving_in, false),
        ScanHorizX => scan::horizontal(zone, mx, moving_in, true),
        ScanVert => scan::vertical(zone, mx, moving_in, false),
        ScanVertX => scan::vertical(zone, mx, moving_in, true),
        Opening => open::opening(zone, mx, moving_in, false),
        OpeningCursor => open::opening(zone, mx, moving_in, true),
        Closing => close::closing(zone, mx, moving_in, false),
        ClosingCursor => close::closing(zone, mx, moving_in, true),
        ScrollUpLeft => diag::scroll(zone, mx, moving_in, true, true),
        ScrollUpRight => diag::scroll(zone, mx, moving_in, true, false),
        ScrollDownLeft => diag::scroll(zone, mx, moving_in, false, true),
        ScrollDownRight => diag::scroll(zone, mx, moving_in, false, false),
        GrowUp => grow::grow(zone, mx, moving_in, true),
        GrowDown => grow::grow(zone, mx, moving_in, false),
        Sprite => sprite::sprite(zone, mx, moving_in),
    }
}

/// Redraw the zone's text in its resting position.
///
/// Clears the zone, rewinds the character pipeline and lays the columns
/// out left to right from the left layout limit. Spacing after the last
/// character is suppressed by the pipeline so the text ends exactly on
/// the right limit.
pub(crate) fn common_print<S: PixelSurface>(zone: &mut Zone<'_>, mx: &mut S) {
    zone.clear_zone(mx);
    if !zone.get_first_char() {
        return;
    }
    let mut pos = zone.limit_left;
    let mut col = 0usize;
    loop {
        if col == zone.cbuf.len() {
            if !zone.get_next_char() {
                break;
            }
            col = 0;
            continue;
        }
        let data = zone.data_bar(zone.cbuf[col]);
        zone.put_col(mx, pos, data);
        pos += 1;
        col += 1;
    }
}

/// Load the sweep registers for a limit-to-limit traversal.
///
/// Entry sweeps lead with the rightmost text column, exit sweeps with
/// the leftmost, so `for i = start; i != end + offset; i += offset`
/// visits every text column once in effect order.
pub(crate) fn set_initial_effect_conditions(zone: &mut Zone<'_>, moving_in: bool) {
    if moving_in {
        zone.start_pos = zone.limit_right;
        zone.next_pos = zone.limit_right;
        zone.end_pos = zone.limit_left;
        zone.pos_offset = -1;
    } else {
        zone.start_pos = zone.limit_left;
        zone.next_pos = zone.limit_left;
        zone.end_pos = zone.limit_right;
        zone.pos_offset = 1;
    }
}

/// Fetch characters until one with visible columns is loaded. `false`
/// once the text is exhausted.
pub(crate) fn next_visible_char(zone: &mut Zone<'_>) -> bool {
    loop {
        if !zone.get_next_char() {
            return false;
        }
        if !zone.cbuf.is_empty() {
            zone.count_cols = 0;
            return true;
        }
    }
}

/// Shift a column byte one pixel row down, filling the vacated top row
/// with background.
pub(crate) fn row_shift_down(col: u8, invert: bool) -> u8 {
    (col << 1) | if invert { 0x01 } else { 0x00 }
}

/// Shift a column byte one pixel row up, filling the vacated bottom row
/// with background.
pub(crate) fn row_shift_up(col: u8, invert: bool) -> u8 {
    (col >> 1) | if invert { 0x80 } else { 0x00 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fixed5x7;
    use crate::framebuffer::FrameBuffer;
    use crate::zone::{FsmState, Sprite, TextAlign, ZoneFlags};

    static FONT: Fixed5x7 = Fixed5x7;
    static WALKER: [u8; 6] = [0x7e, 0x18, 0x7e, 0x3c, 0x18, 0x3c];

    fn zone(text: &'static str) -> Zone<'static> {
        let mut z = Zone::new(0, 1, &FONT);
        z.set_text(text);
        z.set_speed(0);
        z.set_pause(0);
        z
    }

    /// Run a full entry/exit cycle, returning the number of increments.
    fn run_cycle(z: &mut Zone<'static>, fb: &mut FrameBuffer<16>, max: u32) -> u32 {
        z.restart();
        for t in 0..max {
            if z.animate(fb, t) {
                return t;
            }
        }
        panic!("cycle did not finish within {max} increments");
    }

    /// Run until the zone pauses, returning the number of increments.
    fn run_to_pause(z: &mut Zone<'static>, fb: &mut FrameBuffer<16>, max: u32) -> u32 {
        z.restart();
        for t in 0..max {
            z.animate(fb, t);
            if z.status() == FsmState::Pause {
                return t + 1;
            }
        }
        panic!("entry did not pause within {max} increments");
    }

    /// Frame contents of a plain print of `text`.
    fn reference(text: &'static str, align: TextAlign) -> [u8; 16] {
        let mut z = zone(text);
        z.set_text_alignment(align);
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        *fb.columns_raw()
    }

    #[test]
    fn test_every_effect_completes() {
        use TextEffect::*;
        let effects = [
            Print, ScrollUp, ScrollDown, ScrollLeft, ScrollRight, Slice, Mesh, Fade, Dissolve,
            Blinds, Random, Wipe, WipeCursor, ScanHoriz, ScanHorizX, ScanVert, ScanVertX, Opening,
            OpeningCursor, Closing, ClosingCursor, ScrollUpLeft, ScrollUpRight, ScrollDownLeft,
            ScrollDownRight, GrowUp, GrowDown, TextEffect::Sprite,
        ];
        for effect in effects {
            let mut z = zone("HI");
            z.set_text_effect(effect, effect);
            z.set_sprite_data(
                crate::zone::Sprite::new(&WALKER, 3, 2),
                crate::zone::Sprite::new(&WALKER, 3, 2),
            );
            let mut fb = FrameBuffer::<16>::new();
            run_cycle(&mut z, &mut fb, 5000);
            assert!(z.is_complete(), "{effect:?} did not complete");
        }
    }

    #[test]
    fn test_common_print_layout() {
        let expected: [u8; 16] = [
            0x7f, 0x08, 0x08, 0x08, 0x7f, 0x00, 0x41, 0x7f, 0x41, 0, 0, 0, 0, 0, 0, 0,
        ];
        assert_eq!(reference("HI", TextAlign::Left), expected);
    }

    #[test]
    fn test_print_exit_clears_zone() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        run_cycle(&mut z, &mut fb, 10);
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
    }

    #[test]
    fn test_no_effect_exit_keeps_frame() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Print, TextEffect::NoEffect);
        let mut fb = FrameBuffer::<16>::new();
        run_cycle(&mut z, &mut fb, 10);
        assert_eq!(*fb.columns_raw(), reference("HI", TextAlign::Left));
    }

    #[test]
    fn test_scroll_gap_preserved_across_restart() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::ScrollLeft, TextEffect::ScrollLeft);
        z.set_scroll_spacing(3);
        let mut fb = FrameBuffer::<16>::new();
        let t = run_cycle(&mut z, &mut fb, 1000);
        // the exit stops once the gap behind the text is wide enough,
        // leaving the tail of the message in the zone
        let tail = *fb.columns_raw();
        assert_eq!(
            &tail[0..8],
            &[0x08, 0x08, 0x08, 0x7f, 0x00, 0x41, 0x7f, 0x41]
        );
        z.restart();
        let _ = z.animate(&mut fb, t + 1);
        // the next message scrolls in behind the old tail, not into a
        // freshly wiped zone
        let mut expected = [0u8; 16];
        expected[..15].copy_from_slice(&tail[1..]);
        expected[15] = 0x7f;
        assert_eq!(*fb.columns_raw(), expected);
    }

    #[test]
    fn test_dissolve_masks_displayed_frame() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        let t = run_to_pause(&mut z, &mut fb, 10);
        z.set_text_effect(TextEffect::Dissolve, TextEffect::Dissolve);
        z.restart();
        let _ = z.animate(&mut fb, t);
        // the first increment lays the checkerboard over the frame the
        // previous cycle left on display
        for col in 0..16usize {
            let pattern = if col % 2 == 0 { 0x55 } else { 0xaa };
            assert_eq!(fb.get_column(col as u16), reference[col] | pattern);
        }
    }

    #[test]
    fn test_sprite_without_data_ends_immediately() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Sprite, TextEffect::Sprite);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        assert!(z.animate(&mut fb, 0));
        assert!(z.is_complete());
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
    }

    #[test]
    fn test_scroll_left_rests_at_layout_position() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::ScrollLeft, TextEffect::ScrollLeft);
        let mut fb = FrameBuffer::<16>::new();
        // 9 text columns plus 7 filler shifts to reach the left limit
        assert_eq!(run_to_pause(&mut z, &mut fb, 1000), 16);
        assert_eq!(*fb.columns_raw(), reference("HI", TextAlign::Left));
    }

    #[test]
    fn test_scroll_exit_clears_zone() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::ScrollLeft, TextEffect::ScrollLeft);
        let mut fb = FrameBuffer::<16>::new();
        run_cycle(&mut z, &mut fb, 1000);
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
    }

    #[test]
    fn test_scroll_spacing_shortens_exit() {
        let mut long = zone("HI");
        long.set_text_effect(TextEffect::ScrollLeft, TextEffect::ScrollLeft);
        let mut short = zone("HI");
        short.set_text_effect(TextEffect::ScrollLeft, TextEffect::ScrollLeft);
        short.set_scroll_spacing(3);
        let mut fb = FrameBuffer::<16>::new();
        let full = run_cycle(&mut long, &mut fb, 1000);
        let spaced = run_cycle(&mut short, &mut fb, 1000);
        assert!(spaced < full);
    }

    #[test]
    fn test_scroll_up_enters_in_eight_ticks() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::ScrollUp, TextEffect::ScrollUp);
        let mut fb = FrameBuffer::<16>::new();
        assert_eq!(run_to_pause(&mut z, &mut fb, 100), 8);
        assert_eq!(*fb.columns_raw(), reference("HI", TextAlign::Left));
    }

    #[test]
    fn test_wipe_reveals_right_to_left() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Wipe, TextEffect::Wipe);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
        let _ = z.animate(&mut fb, 1);
        // rightmost text column revealed first
        assert_eq!(fb.get_column(8), reference[8]);
        assert_eq!(&fb.columns_raw()[0..8], &[0u8; 8]);
    }

    #[test]
    fn test_wipe_cursor_leads_the_sweep() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::WipeCursor, TextEffect::WipeCursor);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        // the light bar sits on the sweep column
        assert_eq!(fb.get_column(8), LIGHT_BAR);
    }

    #[test]
    fn test_grow_up_reveals_bottom_rows_first() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::GrowUp, TextEffect::GrowUp);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        for t in 0..3 {
            let _ = z.animate(&mut fb, t);
        }
        for col in 0..16 {
            assert_eq!(fb.get_column(col), reference[col as usize] & 0xc0);
        }
    }

    #[test]
    fn test_fade_out_steps_through_intensity() {
        let mut z = zone("HI");
        z.set_intensity(10);
        z.set_text_effect(TextEffect::Print, TextEffect::Fade);
        let mut fb = FrameBuffer::<16>::new();
        let mut t = run_to_pause(&mut z, &mut fb, 100);
        let mut steps = 0u32;
        loop {
            steps += 1;
            assert!(steps < 100);
            if z.animate(&mut fb, t) {
                break;
            }
            t += 1;
        }
        // 10 down to 0 inclusive
        assert_eq!(steps, 11);
        assert_eq!(fb.intensity(), 10);
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
    }

    #[test]
    fn test_random_saturates_and_clears() {
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Random, TextEffect::Random);
        let mut fb = FrameBuffer::<16>::new();
        // one pixel of the 11x8 mask per increment, entry plus exit
        let ticks = run_cycle(&mut z, &mut fb, 1000);
        assert!(ticks >= 170, "saturated after only {ticks} increments");
        assert_eq!(*fb.columns_raw(), [0u8; 16]);
    }

    #[test]
    fn test_invert_renders_reversed_video() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_invert(true);
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        for col in 0..16usize {
            assert_eq!(fb.get_column(col as u16), !reference[col]);
        }
    }

    #[test]
    fn test_flip_lr_mirrors_zone() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_zone_effect(ZoneFlags::FLIP_LR);
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        for col in 0..16usize {
            assert_eq!(fb.get_column(col as u16), reference[15 - col]);
        }
    }

    #[test]
    fn test_flip_ud_mirrors_rows() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_zone_effect(ZoneFlags::FLIP_UD);
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        let _ = z.animate(&mut fb, 0);
        for col in 0..16usize {
            assert_eq!(fb.get_column(col as u16), reference[col].reverse_bits());
        }
    }

    #[test]
    fn test_tick_gating_and_clock_wrap() {
        let mut z = zone("HI");
        z.set_speed(100);
        z.set_text_effect(TextEffect::Print, TextEffect::Print);
        let mut fb = FrameBuffer::<16>::new();
        z.restart();
        z.set_synch_time(0);
        let _ = z.animate(&mut fb, 50);
        assert!(!z.animation_advanced());
        let _ = z.animate(&mut fb, 100);
        assert!(z.animation_advanced());
        assert_eq!(z.status(), FsmState::Pause);
        // the dwell is gated by the pause interval
        z.set_pause(1000);
        let _ = z.animate(&mut fb, 500);
        assert!(!z.animation_advanced());
        let _ = z.animate(&mut fb, 1100);
        assert!(z.animation_advanced());
        assert!(z.is_complete());

        // elapsed time is computed modulo the clock width
        let mut z = zone("HI");
        z.set_speed(100);
        z.restart();
        z.set_synch_time(u32::MAX - 20);
        let _ = z.animate(&mut fb, 79);
        assert!(z.animation_advanced());
    }

    #[test]
    fn test_sprite_reveals_behind_walker() {
        let reference = reference("HI", TextAlign::Left);
        let mut z = zone("HI");
        z.set_text_effect(TextEffect::Sprite, TextEffect::Print);
        z.set_sprite_data(Sprite::new(&WALKER, 3, 2), None);
        let mut fb = FrameBuffer::<16>::new();
        assert_eq!(run_to_pause(&mut z, &mut fb, 100), 19);
        assert_eq!(*fb.columns_raw(), reference);
    }
}

