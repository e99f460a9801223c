//! Text layout
//!
//! Maps the zone's text, font and alignment to the inclusive column
//! limits the effects animate between. Text wider than the zone is
//! clamped to the zone bounds and flagged as overflowing.

use super::{TextAlign, Zone};

impl<'a> Zone<'a> {
    /// Rendered width of `text` in columns, including inter-character
    /// spacing, measured with this zone's font and substitutions.
    pub fn text_width(&self, text: &str) -> u16 {
        let mut width = 0u16;
        let mut first = true;
        for ch in text.chars() {
            let code = if (ch as u32) <= u32::from(u16::MAX) {
                ch as u16
            } else {
                0
            };
            let w = self.char_width(code);
            if w == 0 {
                continue;
            }
            if !first {
                width = width.saturating_add(u16::from(self.char_spacing));
            }
            width = width.saturating_add(w);
            first = false;
        }
        width
    }

    /// Current layout limits `(leftmost, rightmost)`, valid after the
    /// animation cycle has initialised.
    pub fn text_limits(&self) -> (i16, i16) {
        (self.limit_left, self.limit_right)
    }

    /// `true` when the current text does not fit the zone.
    pub fn text_overflows(&self) -> bool {
        self.limit_overflow
    }

    pub(crate) fn calc_text_limits(&mut self, text_cols: u16) {
        let zs = self.first_col();
        let ze = self.last_col();
        let len = text_cols as i16;
        self.limit_overflow = false;

        if len == 0 {
            self.limit_left = zs;
            self.limit_right = ze;
            return;
        }

        match self.text_alignment() {
            TextAlign::Left => {
                self.limit_left = zs;
                self.limit_right = zs + len - 1;
                if self.limit_right > ze {
                    self.limit_right = ze;
                    self.limit_overflow = true;
                }
            }
            TextAlign::Right => {
                self.limit_right = ze;
                self.limit_left = ze - len + 1;
                if self.limit_left < zs {
                    self.limit_left = zs;
                    self.limit_overflow = true;
                }
            }
            TextAlign::Center => {
                if len > self.width_cols() as i16 {
                    self.limit_left = zs;
                    self.limit_right = ze;
                    self.limit_overflow = true;
                } else {
                    self.limit_left = zs + (self.width_cols() as i16 - len) / 2;
                    self.limit_right = self.limit_left + len - 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::Fixed5x7;

    fn zone<'a>(font: &'a Fixed5x7, modules: u8) -> Zone<'a> {
        Zone::new(0, modules - 1, font)
    }

    #[test]
    fn test_text_width() {
        let f = Fixed5x7;
        let z = zone(&f, 1);
        // 'H' 5 + spacing 1 + 'i' 3
        assert_eq!(z.text_width("Hi"), 9);
        assert_eq!(z.text_width(""), 0);
        assert_eq!(z.text_width("|"), 1);
    }

    #[test]
    fn test_left_alignment() {
        let f = Fixed5x7;
        let mut z = zone(&f, 2);
        z.calc_text_limits(9);
        assert_eq!(z.text_limits(), (0, 8));
        assert!(!z.text_overflows());
    }

    #[test]
    fn test_right_alignment() {
        let f = Fixed5x7;
        let mut z = zone(&f, 2);
        z.set_text_alignment(TextAlign::Right);
        z.calc_text_limits(9);
        assert_eq!(z.text_limits(), (7, 15));
    }

    #[test]
    fn test_center_alignment() {
        let f = Fixed5x7;
        let mut z = zone(&f, 2);
        z.set_text_alignment(TextAlign::Center);
        z.calc_text_limits(10);
        assert_eq!(z.text_limits(), (3, 12));
    }

    #[test]
    fn test_overflow_clamps_to_zone() {
        let f = Fixed5x7;
        for align in [TextAlign::Left, TextAlign::Center, TextAlign::Right] {
            let mut z = zone(&f, 1);
            z.set_text_alignment(align);
            z.calc_text_limits(40);
            assert!(z.text_overflows());
            let (l, r) = z.text_limits();
            assert!(l >= 0 && r <= 7 && l <= r);
        }
    }

    #[test]
    fn test_second_module_zone_offsets() {
        let f = Fixed5x7;
        let mut z = Zone::new(2, 3, &f);
        z.calc_text_limits(5);
        assert_eq!(z.text_limits(), (16, 20));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_center_margins_balanced(len in 1u16..=16) {
                let f = Fixed5x7;
                let mut z = Zone::new(0, 1, &f);
                z.set_text_alignment(TextAlign::Center);
                z.calc_text_limits(len);
                let (l, r) = z.text_limits();
                prop_assert!(((l - 0) - (15 - r)).abs() <= 1);
            }

            #[test]
            fn test_limits_stay_inside_zone(
                len in 0u16..200,
                align in prop_oneof![
                    Just(TextAlign::Left),
                    Just(TextAlign::Center),
                    Just(TextAlign::Right),
                ],
            ) {
                let f = Fixed5x7;
                let mut z = Zone::new(1, 2, &f);
                z.set_text_alignment(align);
                z.calc_text_limits(len);
                let (l, r) = z.text_limits();
                prop_assert!(8 <= l && l <= r && r <= 23);
            }
        }
    }
}
