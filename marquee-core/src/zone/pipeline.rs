//! Character pipeline
//!
//! Feeds the effects one character at a time as column data. Each fetched
//! character lands in the zone's column buffer as glyph columns followed
//! by the configured inter-character spacing. Lookup order is user
//! substitutions first, then the zone font; characters with no glyph
//! resolve to zero width and are skipped by the state machine.

use super::Zone;

impl<'a> Zone<'a> {
    /// Displayed width in columns of a single character, excluding
    /// spacing. 0 when no glyph exists.
    pub(crate) fn char_width(&self, code: u16) -> u16 {
        let cols = match self.user_char(code) {
            Some(d) => d.len(),
            None => self.font.glyph(code).map_or(0, <[u8]>::len),
        };
        cols as u16
    }

    /// Load `code` into the column buffer. Inter-character spacing
    /// travels with the glyph so it flows through the same PUT_CHAR path
    /// as the character itself; the last character of the text carries
    /// none so the text ends exactly on its layout limit.
    fn make_char(&mut self, code: u16, add_spacing: bool) {
        self.cbuf.clear();
        let font = self.font;
        let cols = self
            .user_char(code)
            .or_else(|| font.glyph(code))
            .unwrap_or(&[]);
        for &c in cols {
            if self.cbuf.push(c).is_err() {
                break;
            }
        }
        if add_spacing && !cols.is_empty() {
            for _ in 0..self.char_spacing {
                if self.cbuf.push(0).is_err() {
                    break;
                }
            }
        }
    }

    fn current_code(&self) -> u16 {
        match self.text().get(self.cursor..).and_then(|s| s.chars().next()) {
            Some(ch) if (ch as u32) <= u32::from(u16::MAX) => ch as u16,
            _ => 0,
        }
    }

    fn move_text_pointer(&mut self) {
        let step = self
            .text()
            .get(self.cursor..)
            .and_then(|s| s.chars().next())
            .map_or(0, char::len_utf8);
        self.cursor += step;
        self.end_of_text = self.cursor >= self.text().len();
    }

    /// Rewind to the start of the text and fetch the first character.
    /// `false` when the text is empty.
    pub(crate) fn get_first_char(&mut self) -> bool {
        self.cursor = 0;
        self.end_of_text = self.text().is_empty();
        if self.end_of_text {
            self.cbuf.clear();
            return false;
        }
        let code = self.current_code();
        self.move_text_pointer();
        self.make_char(code, !self.end_of_text);
        true
    }

    /// Fetch the character after the current one. `false` once the text
    /// is exhausted.
    pub(crate) fn get_next_char(&mut self) -> bool {
        if self.end_of_text {
            self.cbuf.clear();
            return false;
        }
        let code = self.current_code();
        self.move_text_pointer();
        self.make_char(code, !self.end_of_text);
        true
    }

    /// Reset the text pointer and recompute the layout limits for the
    /// current text and alignment.
    pub(crate) fn set_initial_conditions(&mut self) {
        self.cursor = 0;
        self.end_of_text = self.text().is_empty();
        let width = self.text_width(self.text());
        self.calc_text_limits(width);
    }
}
