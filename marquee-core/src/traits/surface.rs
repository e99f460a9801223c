//! Pixel surface trait
//!
//! The surface is the shared column-addressable pixel buffer that all
//! zones of a display draw into. Implementations keep a shadow buffer and
//! push it to the hardware on [`PixelSurface::commit`]; everything else is
//! memory-only and therefore infallible.

/// Whole-buffer transform operations over a column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Transform {
    /// Move every column one position towards column 0
    ShiftLeft,
    /// Move every column one position away from column 0
    ShiftRight,
    /// Invert every pixel
    Invert,
    /// Mirror each column byte top-to-bottom
    FlipUd,
    /// Reverse the column order of the range
    FlipLr,
}

/// Hardware control attributes over a column range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Control {
    /// Display brightness, 0-15
    Intensity(u8),
    /// Low-power blanking; the buffer keeps animating while shut down
    Shutdown(bool),
    /// Whether shift transforms wrap the outgoing column to the other end
    Wraparound(bool),
}

/// Column-addressable pixel surface shared by all zones of a display.
///
/// Column indices start at 0 on the left edge of the display. Bit 0 of a
/// column byte is the top pixel row. Out-of-range reads return 0 and
/// out-of-range writes are ignored, so effects can sweep positions past
/// the physical edges without guarding every access.
pub trait PixelSurface {
    /// Error produced when flushing to the hardware
    type Error;

    /// Total number of addressable columns
    fn columns(&self) -> u16;

    /// Read one column
    fn get_column(&self, col: u16) -> u8;

    /// Write one column
    fn set_column(&mut self, col: u16, data: u8);

    /// Blank the inclusive column range
    fn clear(&mut self, col_start: u16, col_end: u16);

    /// Apply a buffer transform to the inclusive column range
    fn transform(&mut self, col_start: u16, col_end: u16, op: Transform);

    /// Apply a hardware control attribute to the inclusive column range
    fn control(&mut self, col_start: u16, col_end: u16, ctl: Control);

    /// Enable or suspend automatic flushing of buffer writes.
    ///
    /// While updates are disabled, writes accumulate in the shadow buffer
    /// only. The display aggregator brackets each multi-zone frame with
    /// `set_update(false)` .. `set_update(true)` + [`commit`] so a frame
    /// becomes visible all at once.
    ///
    /// [`commit`]: PixelSurface::commit
    fn set_update(&mut self, enabled: bool);

    /// Flush the shadow buffer to the physical display
    fn commit(&mut self) -> Result<(), Self::Error>;
}
