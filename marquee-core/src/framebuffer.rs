//! In-memory pixel surface
//!
//! A column-major frame buffer usable on its own for host-side tests and
//! simulations, or as the staging buffer behind a hardware driver. Layout
//! follows the crate convention:
//!
//! - column 0 is the leftmost column of the chain
//! - bit 0 of a column byte is the top row, bit 7 the bottom

use core::convert::Infallible;

use crate::traits::{Control, PixelSurface, Transform};

/// Fixed-capacity frame buffer backed by a `[u8; COLS]` array.
#[derive(Debug, Clone)]
pub struct FrameBuffer<const COLS: usize> {
    cols: [u8; COLS],
    wraparound: bool,
    update: bool,
    intensity: u8,
    shutdown: bool,
}

impl<const COLS: usize> FrameBuffer<COLS> {
    pub const fn new() -> Self {
        Self {
            cols: [0; COLS],
            wraparound: false,
            update: true,
            intensity: 7,
            shutdown: false,
        }
    }

    /// Raw column data, leftmost first.
    pub fn columns_raw(&self) -> &[u8; COLS] {
        &self.cols
    }

    /// Last state written through [`PixelSurface::set_update`].
    pub fn update_enabled(&self) -> bool {
        self.update
    }

    /// Last intensity written through [`Control::Intensity`].
    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    /// Last shutdown state written through [`Control::Shutdown`].
    pub fn is_shutdown(&self) -> bool {
        self.shutdown
    }

    fn shift_left(&mut self, start: usize, end: usize) {
        let saved = self.cols[start];
        for i in start..end {
            self.cols[i] = self.cols[i + 1];
        }
        self.cols[end] = if self.wraparound { saved } else { 0 };
    }

    fn shift_right(&mut self, start: usize, end: usize) {
        let saved = self.cols[end];
        for i in (start + 1..=end).rev() {
            self.cols[i] = self.cols[i - 1];
        }
        self.cols[start] = if self.wraparound { saved } else { 0 };
    }

    /// Clamp an inclusive range to the buffer, `None` when it is empty
    /// or entirely out of bounds.
    fn clamp(&self, start: u16, end: u16) -> Option<(usize, usize)> {
        if start > end || usize::from(start) >= COLS {
            return None;
        }
        Some((usize::from(start), usize::from(end).min(COLS - 1)))
    }
}

impl<const COLS: usize> Default for FrameBuffer<COLS> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const COLS: usize> PixelSurface for FrameBuffer<COLS> {
    type Error = Infallible;

    fn columns(&self) -> u16 {
        COLS as u16
    }

    fn get_column(&self, col: u16) -> u8 {
        self.cols.get(usize::from(col)).copied().unwrap_or(0)
    }

    fn set_column(&mut self, col: u16, data: u8) {
        if let Some(c) = self.cols.get_mut(usize::from(col)) {
            *c = data;
        }
    }

    fn clear(&mut self, start: u16, end: u16) {
        if let Some((s, e)) = self.clamp(start, end) {
            for c in &mut self.cols[s..=e] {
                *c = 0;
            }
        }
    }

    fn transform(&mut self, start: u16, end: u16, op: Transform) {
        let Some((s, e)) = self.clamp(start, end) else {
            return;
        };
        match op {
            Transform::ShiftLeft => self.shift_left(s, e),
            Transform::ShiftRight => self.shift_right(s, e),
            Transform::Invert => {
                for c in &mut self.cols[s..=e] {
                    *c = !*c;
                }
            }
            Transform::FlipUd => {
                for c in &mut self.cols[s..=e] {
                    *c = c.reverse_bits();
                }
            }
            Transform::FlipLr => self.cols[s..=e].reverse(),
        }
    }

    fn control(&mut self, _start: u16, _end: u16, ctl: Control) {
        match ctl {
            Control::Intensity(v) => self.intensity = v.min(15),
            Control::Shutdown(on) => self.shutdown = on,
            Control::Wraparound(on) => self.wraparound = on,
        }
    }

    fn set_update(&mut self, enabled: bool) {
        self.update = enabled;
    }

    fn commit(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let mut fb = FrameBuffer::<8>::new();
        fb.set_column(3, 0xa5);
        assert_eq!(fb.get_column(3), 0xa5);
        assert_eq!(fb.get_column(4), 0);
    }

    #[test]
    fn test_out_of_range_is_inert() {
        let mut fb = FrameBuffer::<8>::new();
        fb.set_column(8, 0xff);
        assert_eq!(fb.get_column(8), 0);
        fb.clear(10, 20);
        fb.transform(10, 20, Transform::Invert);
        assert_eq!(*fb.columns_raw(), [0; 8]);
    }

    #[test]
    fn test_shift_left_no_wrap() {
        let mut fb = FrameBuffer::<4>::new();
        for (i, v) in [1u8, 2, 3, 4].iter().enumerate() {
            fb.set_column(i as u16, *v);
        }
        fb.transform(0, 3, Transform::ShiftLeft);
        assert_eq!(*fb.columns_raw(), [2, 3, 4, 0]);
    }

    #[test]
    fn test_shift_right_wraps() {
        let mut fb = FrameBuffer::<4>::new();
        for (i, v) in [1u8, 2, 3, 4].iter().enumerate() {
            fb.set_column(i as u16, *v);
        }
        fb.control(0, 3, Control::Wraparound(true));
        fb.transform(0, 3, Transform::ShiftRight);
        assert_eq!(*fb.columns_raw(), [4, 1, 2, 3]);
    }

    #[test]
    fn test_invert_and_flip() {
        let mut fb = FrameBuffer::<3>::new();
        fb.set_column(0, 0x0f);
        fb.set_column(2, 0x01);
        fb.transform(0, 2, Transform::Invert);
        assert_eq!(*fb.columns_raw(), [0xf0, 0xff, 0xfe]);
        fb.transform(0, 2, Transform::FlipLr);
        assert_eq!(*fb.columns_raw(), [0xfe, 0xff, 0xf0]);
        fb.transform(0, 2, Transform::FlipUd);
        assert_eq!(*fb.columns_raw(), [0x7f, 0xff, 0x0f]);
    }

    #[test]
    fn test_intensity_clamped() {
        let mut fb = FrameBuffer::<4>::new();
        fb.control(0, 3, Control::Intensity(200));
        assert_eq!(fb.intensity(), 15);
    }
}
