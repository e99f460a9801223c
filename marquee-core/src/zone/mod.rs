//! Zones and the per-zone animation state machine
//!
//! A [`Zone`] animates one contiguous run of modules independently of all
//! other zones:
//!
//! - Holds the zone's text, font, layout and effect configuration
//! - Runs the entry/exit finite state machine one bounded increment per
//!   elapsed tick interval
//! - Owns its own random state so concurrent zones never interact

mod layout;
mod pipeline;

use bitflags::bitflags;

use crate::effects;
use crate::rng::Lcg;
use crate::traits::{Control, Font, PixelSurface, Transform};
use crate::{zone_end_col, zone_start_col};

/// Columns the character buffer can hold (glyph plus inter-character
/// spacing).
pub(crate) const CHAR_BUF_SIZE: usize = 16;

/// Column period of the random-dissolve pixel mask.
pub(crate) const RAND_CYCLE: usize = 11;

/// Substituted character codes a zone can carry.
const MAX_USER_CHARS: usize = 8;

/// Animation state of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FsmState {
    /// Effect and layout initialisation on the next animation increment
    Initialise,
    /// Fetch the first displayable character
    GetFirstChar,
    /// Fetch the next displayable character
    GetNextChar,
    /// Display the current character
    PutChar,
    /// Display inter-text filler columns
    PutFiller,
    /// Text fully entered, waiting out the pause interval
    Pause,
    /// Animation cycle finished
    End,
}

/// Horizontal placement of text inside its zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Text entry/exit transition effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextEffect {
    /// Entering, behaves as [`TextEffect::Print`]; exiting, ends the
    /// cycle with the text left on display
    #[default]
    NoEffect,
    /// Text appears at once; the exit phase clears the zone
    Print,
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    /// Columns slide in/out one at a time
    Slice,
    /// Columns alternately slide down and up into place
    Mesh,
    /// Brightness ramp in/out
    Fade,
    /// Checkerboard dissolve
    Dissolve,
    /// Venetian-blinds shutter
    Blinds,
    /// Pixels appear/disappear in random order
    Random,
    Wipe,
    /// Wipe with a leading light bar
    WipeCursor,
    ScanHoriz,
    /// Horizontal scan lighting only the scan column
    ScanHorizX,
    ScanVert,
    /// Vertical scan lighting only the scan row
    ScanVertX,
    Opening,
    /// Opening with light bars at the moving edges
    OpeningCursor,
    Closing,
    /// Closing with light bars at the moving edges
    ClosingCursor,
    ScrollUpLeft,
    ScrollUpRight,
    ScrollDownLeft,
    ScrollDownRight,
    GrowUp,
    GrowDown,
    /// User sprite walks across the zone revealing/consuming the text
    Sprite,
}

bitflags! {
    /// Whole-zone pixel transforms applied to every rendered frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ZoneFlags: u8 {
        /// Mirror the zone top to bottom
        const FLIP_UD = 1 << 0;
        /// Mirror the zone left to right
        const FLIP_LR = 1 << 1;
    }
}

/// One animation frame sequence for the [`TextEffect::Sprite`] effect.
///
/// `data` holds `frames` consecutive column groups of `width` bytes,
/// leftmost column first, bit 0 on top.
#[derive(Debug, Clone, Copy)]
pub struct Sprite<'a> {
    data: &'a [u8],
    width: u8,
    frames: u8,
}

impl<'a> Sprite<'a> {
    /// `None` unless `data` holds exactly `width * frames` columns with
    /// both dimensions non-zero.
    pub fn new(data: &'a [u8], width: u8, frames: u8) -> Option<Self> {
        if width == 0 || frames == 0 || data.len() != usize::from(width) * usize::from(frames) {
            return None;
        }
        Some(Self { data, width, frames })
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn frames(&self) -> u8 {
        self.frames
    }

    pub(crate) fn frame(&self, idx: u8) -> &'a [u8] {
        let w = usize::from(self.width);
        let start = usize::from(idx % self.frames) * w;
        &self.data[start..start + w]
    }
}

/// An independently animated run of display modules.
pub struct Zone<'a> {
    // geometry
    module_start: u8,
    module_end: u8,

    // configuration
    pub(crate) font: &'a dyn Font,
    flags: ZoneFlags,
    pub(crate) invert: bool,
    pub(crate) intensity: u8,
    speed_in: u16,
    speed_out: u16,
    pause_time: u16,
    pub(crate) char_spacing: u8,
    pub(crate) scroll_spacing: u16,
    align: TextAlign,
    pub(crate) effect_in: TextEffect,
    pub(crate) effect_out: TextEffect,
    suspend: bool,

    // state machine
    pub(crate) fsm: FsmState,
    pub(crate) move_in: bool,
    last_run_ms: u32,
    advanced: bool,

    // text and character pipeline
    text: &'a str,
    pub(crate) cursor: usize,
    pub(crate) end_of_text: bool,
    pub(crate) cbuf: heapless::Vec<u8, CHAR_BUF_SIZE>,
    pub(crate) count_cols: usize,
    user_chars: heapless::LinearMap<u16, &'a [u8], MAX_USER_CHARS>,

    // layout and effect sweep
    pub(crate) limit_left: i16,
    pub(crate) limit_right: i16,
    pub(crate) limit_overflow: bool,
    pub(crate) start_pos: i16,
    pub(crate) end_pos: i16,
    pub(crate) next_pos: i16,
    pub(crate) pos_offset: i16,

    // sprite effect
    pub(crate) sprite_in: Option<Sprite<'a>>,
    pub(crate) sprite_out: Option<Sprite<'a>>,
    pub(crate) sprite_frame: u8,

    // random effect
    pub(crate) rand_mask: [u8; RAND_CYCLE],
    pub(crate) rng: Lcg,
}

impl<'a> Zone<'a> {
    /// A zone spanning modules `module_start..=module_end`.
    ///
    /// The range is validated where the zone joins a display, see
    /// [`crate::Marquee::set_zone`].
    pub fn new(module_start: u8, module_end: u8, font: &'a dyn Font) -> Self {
        let seed = (u64::from(module_start) << 8 | u64::from(module_end)) ^ 0x9e37_79b9_7f4a_7c15;
        Self {
            module_start,
            module_end,
            font,
            flags: ZoneFlags::empty(),
            invert: false,
            intensity: 7,
            speed_in: 10,
            speed_out: 10,
            pause_time: 100,
            char_spacing: 1,
            scroll_spacing: 0,
            align: TextAlign::Left,
            effect_in: TextEffect::Print,
            effect_out: TextEffect::Print,
            suspend: false,
            fsm: FsmState::End,
            move_in: true,
            last_run_ms: 0,
            advanced: false,
            text: "",
            cursor: 0,
            end_of_text: true,
            cbuf: heapless::Vec::new(),
            count_cols: 0,
            user_chars: heapless::LinearMap::new(),
            limit_left: 0,
            limit_right: 0,
            limit_overflow: false,
            start_pos: 0,
            end_pos: 0,
            next_pos: 0,
            pos_offset: 0,
            sprite_in: None,
            sprite_out: None,
            sprite_frame: 0,
            rand_mask: [0; RAND_CYCLE],
            rng: Lcg::new(seed),
        }
    }

    // --- geometry ---

    pub fn module_start(&self) -> u8 {
        self.module_start
    }

    pub fn module_end(&self) -> u8 {
        self.module_end
    }

    pub(crate) fn set_module_range(&mut self, module_start: u8, module_end: u8) {
        self.module_start = module_start;
        self.module_end = module_end;
    }

    /// Leftmost pixel column of the zone.
    pub fn first_col(&self) -> i16 {
        zone_start_col(self.module_start)
    }

    /// Rightmost pixel column of the zone.
    pub fn last_col(&self) -> i16 {
        zone_end_col(self.module_end)
    }

    /// Zone width in pixel columns.
    pub fn width_cols(&self) -> u16 {
        (self.last_col() - self.first_col() + 1) as u16
    }

    // --- configuration ---

    pub fn set_text(&mut self, text: &'a str) {
        self.text = text;
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn set_font(&mut self, font: &'a dyn Font) {
        self.font = font;
    }

    /// Entry and exit effects. An entering [`TextEffect::NoEffect`] is
    /// stored as [`TextEffect::Print`]; as an exit it ends the cycle with
    /// the text left on display.
    pub fn set_text_effect(&mut self, effect_in: TextEffect, effect_out: TextEffect) {
        self.effect_in = normalize(effect_in);
        self.effect_out = effect_out;
    }

    pub fn effects(&self) -> (TextEffect, TextEffect) {
        (self.effect_in, self.effect_out)
    }

    /// Same tick interval, in milliseconds, for entry and exit.
    pub fn set_speed(&mut self, speed: u16) {
        self.set_speed_in_out(speed, speed);
    }

    pub fn set_speed_in_out(&mut self, speed_in: u16, speed_out: u16) {
        self.speed_in = speed_in;
        self.speed_out = speed_out;
    }

    pub fn speed(&self) -> u16 {
        self.speed_in
    }

    pub fn speed_out(&self) -> u16 {
        self.speed_out
    }

    /// Dwell time, in milliseconds, between entry and exit.
    pub fn set_pause(&mut self, pause_ms: u16) {
        self.pause_time = pause_ms;
    }

    pub fn pause(&self) -> u16 {
        self.pause_time
    }

    pub fn set_text_alignment(&mut self, align: TextAlign) {
        self.align = align;
    }

    pub fn text_alignment(&self) -> TextAlign {
        self.align
    }

    /// Blank columns inserted between characters.
    pub fn set_char_spacing(&mut self, spacing: u8) {
        self.char_spacing = spacing;
    }

    pub fn char_spacing(&self) -> u8 {
        self.char_spacing
    }

    /// Blank columns between repeats for the horizontal scroll effects;
    /// 0 means a full zone width of separation.
    pub fn set_scroll_spacing(&mut self, spacing: u16) {
        self.scroll_spacing = spacing;
    }

    pub fn scroll_spacing(&self) -> u16 {
        self.scroll_spacing
    }

    pub fn set_invert(&mut self, invert: bool) {
        self.invert = invert;
    }

    pub fn invert(&self) -> bool {
        self.invert
    }

    /// Display brightness, clamped to 0..=15.
    pub fn set_intensity(&mut self, intensity: u8) {
        self.intensity = intensity.min(15);
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn set_zone_effect(&mut self, flags: ZoneFlags) {
        self.flags = flags;
    }

    pub fn zone_effect(&self) -> ZoneFlags {
        self.flags
    }

    pub fn set_sprite_data(&mut self, entry: Option<Sprite<'a>>, exit: Option<Sprite<'a>>) {
        self.sprite_in = entry;
        self.sprite_out = exit;
    }

    /// Reseed the random-dissolve pixel sequence.
    pub fn seed_random(&mut self, seed: u64) {
        self.rng.reseed(seed);
    }

    /// Substitute `data` (glyph columns) for character `code`. Code 0 is
    /// reserved.
    pub fn add_char(&mut self, code: u16, data: &'a [u8]) -> Result<(), crate::Error> {
        if code == 0 {
            return Err(crate::Error::ReservedCharCode);
        }
        self.user_chars
            .insert(code, data)
            .map(|_| ())
            .map_err(|_| crate::Error::CapacityExceeded)
    }

    /// Remove a substitution; `true` when one was present.
    pub fn del_char(&mut self, code: u16) -> bool {
        self.user_chars.remove(&code).is_some()
    }

    pub(crate) fn user_char(&self, code: u16) -> Option<&'a [u8]> {
        self.user_chars.get(&code).copied()
    }

    // --- control ---

    /// Restart the animation cycle from text entry.
    pub fn restart(&mut self) {
        self.fsm = FsmState::Initialise;
    }

    /// Stop or resume animation without losing state.
    pub fn set_suspend(&mut self, suspend: bool) {
        self.suspend = suspend;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspend
    }

    pub fn status(&self) -> FsmState {
        self.fsm
    }

    pub fn is_complete(&self) -> bool {
        self.fsm == FsmState::End
    }

    /// Whether the last [`Zone::animate`] call advanced the animation.
    pub fn animation_advanced(&self) -> bool {
        self.advanced
    }

    /// Timestamp of the last animation increment.
    pub fn synch_time(&self) -> u32 {
        self.last_run_ms
    }

    /// Align this zone's tick phase with another zone's.
    pub fn set_synch_time(&mut self, time_ms: u32) {
        self.last_run_ms = time_ms;
    }

    // --- animation ---

    /// Advance the zone by at most one animation increment.
    ///
    /// Returns `true` when the current cycle has ended. Never blocks;
    /// when the tick interval has not yet elapsed this only reads the
    /// clock value passed in.
    pub fn animate<S: PixelSurface>(&mut self, mx: &mut S, now_ms: u32) -> bool {
        self.advanced = false;
        if self.suspend {
            return false;
        }
        if self.fsm == FsmState::End {
            return true;
        }

        let interval = if self.fsm == FsmState::Pause {
            u32::from(self.pause_time)
        } else if self.move_in {
            u32::from(self.speed_in)
        } else {
            u32::from(self.speed_out)
        };
        if now_ms.wrapping_sub(self.last_run_ms) < interval {
            return false;
        }
        self.last_run_ms = now_ms;

        if self.fsm == FsmState::Initialise {
            self.move_in = true;
            self.sprite_frame = 0;
            self.set_initial_conditions();
            // Effects paint their own first frame; the previous cycle's
            // frame stays on display until they do, so overlay effects
            // and back-to-back scrolls work over it.
            if self.text.is_empty() {
                self.clear_zone(mx);
                self.advanced = true;
                self.fsm = FsmState::End;
                return true;
            }
        }

        self.advanced = true;
        let moving_in = self.move_in;
        let effect = if moving_in {
            self.effect_in
        } else {
            self.effect_out
        };

        // Effects always operate on upright content; the flip transforms
        // are peeled off before the increment and reapplied after.
        self.apply_flips(mx);
        effects::dispatch(self, mx, effect, moving_in);
        self.apply_flips(mx);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "zone {=u8}..{=u8} -> {}",
            self.module_start,
            self.module_end,
            self.fsm
        );

        self.move_in = self.move_in && self.fsm != FsmState::Pause;
        self.fsm == FsmState::End
    }

    fn apply_flips<S: PixelSurface>(&self, mx: &mut S) {
        if self.flags.is_empty() {
            return;
        }
        let (s, e) = (self.first_col() as u16, self.last_col() as u16);
        if self.flags.contains(ZoneFlags::FLIP_LR) {
            mx.transform(s, e, Transform::FlipLr);
        }
        if self.flags.contains(ZoneFlags::FLIP_UD) {
            mx.transform(s, e, Transform::FlipUd);
        }
    }

    // --- surface helpers shared by the effects ---

    /// Apply the zone inversion setting to column data.
    pub(crate) fn data_bar(&self, data: u8) -> u8 {
        if self.invert {
            !data
        } else {
            data
        }
    }

    /// Blank the whole zone, honouring inversion.
    pub(crate) fn clear_zone<S: PixelSurface>(&self, mx: &mut S) {
        let (s, e) = (self.first_col() as u16, self.last_col() as u16);
        mx.clear(s, e);
        if self.invert {
            mx.transform(s, e, Transform::Invert);
        }
    }

    /// Write a column, ignoring positions outside the zone.
    pub(crate) fn put_col<S: PixelSurface>(&self, mx: &mut S, col: i16, data: u8) {
        if col >= self.first_col() && col <= self.last_col() {
            mx.set_column(col as u16, data);
        }
    }

    /// Read a column, 0 outside the zone.
    pub(crate) fn get_col<S: PixelSurface>(&self, mx: &S, col: i16) -> u8 {
        if col >= self.first_col() && col <= self.last_col() {
            mx.get_column(col as u16)
        } else {
            0
        }
    }

    pub(crate) fn set_surface_intensity<S: PixelSurface>(&self, mx: &mut S, level: u8) {
        mx.control(
            self.first_col() as u16,
            self.last_col() as u16,
            Control::Intensity(level),
        );
    }

    pub(crate) fn set_wraparound<S: PixelSurface>(&self, mx: &mut S, on: bool) {
        mx.control(
            self.first_col() as u16,
            self.last_col() as u16,
            Control::Wraparound(on),
        );
    }
}

fn normalize(effect: TextEffect) -> TextEffect {
    if effect == TextEffect::NoEffect {
        TextEffect::Print
    } else {
        effect
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fixed5x7;

    #[test]
    fn test_geometry() {
        let f = Fixed5x7;
        let z = Zone::new(1, 2, &f);
        assert_eq!(z.first_col(), 8);
        assert_eq!(z.last_col(), 23);
        assert_eq!(z.width_cols(), 16);
    }

    #[test]
    fn test_no_effect_normalized() {
        let f = Fixed5x7;
        let mut z = Zone::new(0, 0, &f);
        z.set_text_effect(TextEffect::NoEffect, TextEffect::NoEffect);
        // only the entering side is normalized
        assert_eq!(z.effects(), (TextEffect::Print, TextEffect::NoEffect));
    }

    #[test]
    fn test_reserved_char_code() {
        let f = Fixed5x7;
        let mut z = Zone::new(0, 0, &f);
        assert_eq!(z.add_char(0, &[0x7f]), Err(crate::Error::ReservedCharCode));
        assert!(z.add_char(b'$'.into(), &[0x7f]).is_ok());
        assert!(z.del_char(b'$'.into()));
        assert!(!z.del_char(b'$'.into()));
    }

    #[test]
    fn test_intensity_clamped() {
        let f = Fixed5x7;
        let mut z = Zone::new(0, 0, &f);
        z.set_intensity(99);
        assert_eq!(z.intensity(), 15);
    }

    #[test]
    fn test_sprite_dimension_check() {
        assert!(Sprite::new(&[1, 2, 3, 4], 2, 2).is_some());
        assert!(Sprite::new(&[1, 2, 3], 2, 2).is_none());
        assert!(Sprite::new(&[], 0, 0).is_none());
    }
}
