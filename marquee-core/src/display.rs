//! Multi-zone display aggregator
//!
//! [`Marquee`] ties a pixel surface, a clock source and up to
//! [`MAX_ZONES`] zones together and drives them through a single
//! non-blocking [`Marquee::animate`] call. Batched updates: the surface
//! auto-update is disabled around the zone pass and the frame is
//! committed once, only when at least one zone actually advanced.

use crate::traits::{Clock, Font, PixelSurface};
use crate::zone::{FsmState, TextAlign, TextEffect, Zone};
use crate::Error;

/// Zones a display can be split into.
pub const MAX_ZONES: usize = 4;

/// A zoned text display bound to a surface and a clock.
pub struct Marquee<'a, S, C> {
    mx: S,
    clock: C,
    modules: u8,
    zones: heapless::Vec<Zone<'a>, MAX_ZONES>,
}

impl<'a, S, C> Marquee<'a, S, C>
where
    S: PixelSurface,
    C: Clock,
{
    /// A display of `modules` 8x8 modules with a single zone spanning
    /// all of them.
    pub fn new(mx: S, clock: C, modules: u8, font: &'a dyn Font) -> Self {
        let mut zones = heapless::Vec::new();
        if modules > 0 {
            // capacity is at least one
            let _ = zones.push(Zone::new(0, modules - 1, font));
        }
        Self {
            mx,
            clock,
            modules,
            zones,
        }
    }

    /// Re-split the display into `count` zones, each initially spanning
    /// all modules. Zone boundaries are then assigned with
    /// [`Marquee::set_zone`]. All previous zone configuration is lost.
    pub fn begin(&mut self, count: u8, font: &'a dyn Font) -> Result<(), Error> {
        if count == 0 || usize::from(count) > MAX_ZONES || self.modules == 0 {
            return Err(Error::CapacityExceeded);
        }
        self.zones.clear();
        for _ in 0..count {
            let _ = self.zones.push(Zone::new(0, self.modules - 1, font));
        }
        Ok(())
    }

    /// Assign the module range of a zone. Rejected, with no state
    /// change, unless `start <= end < modules`.
    pub fn set_zone(&mut self, zone: usize, start: u8, end: u8) -> Result<(), Error> {
        if start > end || end >= self.modules {
            return Err(Error::InvalidModuleRange);
        }
        let z = self.zones.get_mut(zone).ok_or(Error::InvalidZone)?;
        z.set_module_range(start, end);
        Ok(())
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn zone(&self, zone: usize) -> Option<&Zone<'a>> {
        self.zones.get(zone)
    }

    pub fn zone_mut(&mut self, zone: usize) -> Option<&mut Zone<'a>> {
        self.zones.get_mut(zone)
    }

    pub fn surface(&self) -> &S {
        &self.mx
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.mx
    }

    // --- whole-display configuration ---

    pub fn set_speed(&mut self, speed: u16) {
        for z in &mut self.zones {
            z.set_speed(speed);
        }
    }

    pub fn set_pause(&mut self, pause_ms: u16) {
        for z in &mut self.zones {
            z.set_pause(pause_ms);
        }
    }

    pub fn set_text_alignment(&mut self, align: TextAlign) {
        for z in &mut self.zones {
            z.set_text_alignment(align);
        }
    }

    pub fn set_invert(&mut self, invert: bool) {
        for z in &mut self.zones {
            z.set_invert(invert);
        }
    }

    pub fn set_intensity(&mut self, intensity: u8) {
        for z in &mut self.zones {
            z.set_intensity(intensity);
        }
    }

    pub fn set_font(&mut self, font: &'a dyn Font) {
        for z in &mut self.zones {
            z.set_font(font);
        }
    }

    // --- animation ---

    /// Advance every zone that is due and push the frame out when
    /// anything changed.
    ///
    /// Returns `true` only when every zone has finished its cycle, the
    /// same condition [`Marquee::is_animation_complete`] reports; poll
    /// [`Marquee::zone_status`] to observe a single zone finishing.
    pub fn animate(&mut self) -> Result<bool, S::Error> {
        let now = self.clock.now_ms();
        self.animate_at(now)
    }

    /// [`Marquee::animate`] with an explicit timestamp.
    pub fn animate_at(&mut self, now_ms: u32) -> Result<bool, S::Error> {
        self.mx.set_update(false);
        let mut all_done = true;
        let mut changed = false;
        for z in &mut self.zones {
            all_done &= z.animate(&mut self.mx, now_ms);
            changed |= z.animation_advanced();
        }
        self.mx.set_update(true);
        if changed {
            self.mx.commit()?;
        }
        Ok(all_done)
    }

    pub fn is_animation_complete(&self) -> bool {
        self.zones.iter().all(Zone::is_complete)
    }

    pub fn zone_status(&self, zone: usize) -> Option<FsmState> {
        self.zones.get(zone).map(Zone::status)
    }

    /// Restart every zone's animation cycle.
    pub fn display_reset(&mut self) {
        let now = self.clock.now_ms();
        for z in &mut self.zones {
            z.restart();
            z.set_synch_time(now);
        }
    }

    /// Suspend or resume every zone.
    pub fn display_suspend(&mut self, suspend: bool) {
        for z in &mut self.zones {
            z.set_suspend(suspend);
        }
    }

    /// Power the whole display surface down or back up.
    pub fn display_shutdown(&mut self, shutdown: bool) -> Result<(), S::Error> {
        let last = self.mx.columns().saturating_sub(1);
        self.mx
            .control(0, last, crate::traits::Control::Shutdown(shutdown));
        self.mx.commit()
    }

    /// Blocking write: show `text` immediately on zone 0 and run the
    /// print cycle to completion. The text stays on display.
    pub fn print(&mut self, text: &'a str) -> Result<(), S::Error> {
        self.display_text(
            text,
            TextAlign::Left,
            0,
            0,
            TextEffect::Print,
            TextEffect::NoEffect,
        );
        while self.zone_status(0) == Some(FsmState::Pause)
            || self.zone_status(0) == Some(FsmState::Initialise)
        {
            self.animate()?;
        }
        Ok(())
    }

    /// Blank every zone and push the frame out.
    pub fn display_clear(&mut self) -> Result<(), S::Error> {
        self.mx.set_update(false);
        for z in &self.zones {
            z.clear_zone(&mut self.mx);
        }
        self.mx.set_update(true);
        self.mx.commit()
    }

    // --- convenience front ends ---

    /// Configure zone 0 with text, alignment, speed, pause and effects, then restart
    /// it.
    pub fn display_text(
        &mut self,
        text: &'a str,
        align: TextAlign,
        speed: u16,
        pause_ms: u16,
        effect_in: TextEffect,
        effect_out: TextEffect,
    ) {
        let _ = self.display_zone_text(0, text, align, speed, pause_ms, effect_in, effect_out);
    }

    pub fn display_zone_text(
        &mut self,
        zone: usize,
        text: &'a str,
        align: TextAlign,
        speed: u16,
        pause_ms: u16,
        effect_in: TextEffect,
        effect_out: TextEffect,
    ) -> Result<(), Error> {
        let now = self.clock.now_ms();
        let z = self.zones.get_mut(zone).ok_or(Error::InvalidZone)?;
        z.set_text(text);
        z.set_text_alignment(align);
        z.set_speed(speed);
        z.set_pause(pause_ms);
        z.set_text_effect(effect_in, effect_out);
        z.restart();
        z.set_synch_time(now);
        Ok(())
    }

    /// Continuous scroll setup on zone 0: same effect in and out, no
    /// dwell between them.
    pub fn display_scroll(
        &mut self,
        text: &'a str,
        align: TextAlign,
        effect: TextEffect,
        speed: u16,
    ) {
        self.display_text(text, align, speed, 0, effect, effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fixed5x7;
    use crate::framebuffer::FrameBuffer;

    struct TestClock(core::cell::Cell<u32>);

    impl Clock for TestClock {
        fn now_ms(&self) -> u32 {
            self.0.get()
        }
    }

    static FONT: Fixed5x7 = Fixed5x7;

    fn display() -> Marquee<'static, FrameBuffer<32>, TestClock> {
        Marquee::new(
            FrameBuffer::new(),
            TestClock(core::cell::Cell::new(0)),
            4,
            &FONT,
        )
    }

    #[test]
    fn test_single_zone_by_default() {
        let d = display();
        assert_eq!(d.zone_count(), 1);
        let z = d.zone(0).unwrap();
        assert_eq!((z.module_start(), z.module_end()), (0, 3));
    }

    #[test]
    fn test_set_zone_validation() {
        let mut d = display();
        d.begin(2, &FONT).unwrap();
        assert_eq!(d.set_zone(0, 0, 1), Ok(()));
        assert_eq!(d.set_zone(1, 2, 3), Ok(()));
        assert_eq!(d.set_zone(2, 0, 0), Err(Error::InvalidZone));
        assert_eq!(d.set_zone(0, 2, 1), Err(Error::InvalidModuleRange));
        assert_eq!(d.set_zone(0, 0, 4), Err(Error::InvalidModuleRange));
        // failed calls left the earlier assignment in place
        let z = d.zone(0).unwrap();
        assert_eq!((z.module_start(), z.module_end()), (0, 1));
    }

    #[test]
    fn test_begin_rejects_bad_counts() {
        let mut d = display();
        assert!(d.begin(0, &FONT).is_err());
        assert!(d.begin(MAX_ZONES as u8 + 1, &FONT).is_err());
        assert!(d.begin(4, &FONT).is_ok());
        assert_eq!(d.zone_count(), 4);
    }

    #[test]
    fn test_print_cycle_left_aligned() {
        let mut d = display();
        d.display_text(
            "HI",
            TextAlign::Left,
            0,
            0,
            TextEffect::Print,
            TextEffect::Print,
        );
        // print-in, then the zero-length pause and print-out
        assert!(!d.animate().unwrap());
        // 'H' at columns 0..=4, spacing, 'I' at 6..=8
        let cols = d.surface().columns_raw();
        assert_eq!(&cols[0..9], &[0x7f, 0x08, 0x08, 0x08, 0x7f, 0x00, 0x41, 0x7f, 0x41]);
        assert_eq!(&cols[9..32], &[0u8; 23]);
        assert!(d.animate().unwrap());
        assert!(d.is_animation_complete());
        // the print exit wiped the zone
        assert_eq!(d.surface().columns_raw(), &[0u8; 32]);
        // terminal state is stable
        assert!(d.animate().unwrap());
    }

    #[test]
    fn test_zones_animate_independently() {
        let mut d = display();
        d.begin(2, &FONT).unwrap();
        d.set_zone(0, 0, 1).unwrap();
        d.set_zone(1, 2, 3).unwrap();
        d.display_zone_text(0, "A", TextAlign::Left, 0, 0, TextEffect::Print, TextEffect::Print)
            .unwrap();
        d.display_zone_text(1, "B", TextAlign::Right, 0, 0, TextEffect::Print, TextEffect::Print)
            .unwrap();
        assert!(!d.animate().unwrap());
        let cols = d.surface().columns_raw();
        // zone 0 text at its left edge, zone 1 text at its right edge
        assert_eq!(&cols[0..5], &[0x7e, 0x11, 0x11, 0x11, 0x7e]);
        assert_eq!(&cols[27..32], &[0x7f, 0x49, 0x49, 0x49, 0x36]);
    }

    #[test]
    fn test_suspend_blocks_animation() {
        let mut d = display();
        d.display_text(
            "X",
            TextAlign::Left,
            0,
            0,
            TextEffect::Print,
            TextEffect::Print,
        );
        d.display_suspend(true);
        assert!(!d.animate().unwrap());
        assert_eq!(d.surface().columns_raw(), &[0u8; 32]);
        d.display_suspend(false);
        assert!(!d.animate().unwrap());
        assert_ne!(d.surface().columns_raw(), &[0u8; 32]);
    }

    #[test]
    fn test_blocking_print() {
        let mut d = display();
        d.print("OK").unwrap();
        assert!(d.is_animation_complete());
        assert_ne!(d.surface().columns_raw(), &[0u8; 32]);
    }

    #[test]
    fn test_empty_text_ends_immediately() {
        let mut d = display();
        d.display_text(
            "",
            TextAlign::Left,
            0,
            0,
            TextEffect::Print,
            TextEffect::Print,
        );
        assert!(d.animate().unwrap());
    }
}
