//! Board-agnostic animation engine for segmented LED matrix text displays
//!
//! This crate contains all the logic needed to animate text on a chain of
//! fixed-size pixel modules (8x8 LED matrices), independent of any
//! particular display hardware:
//!
//! - Abstraction traits (pixel surface, font provider, clock source)
//! - Per-zone finite state machine driving text entry/exit transitions
//! - The full family of transition effects (scroll, wipe, scan, grow, ...)
//! - Character pipeline and text layout
//! - Multi-zone display aggregator
//!
//! # Model
//!
//! The display is a run of 8x8 **modules**; column 0 is the leftmost column
//! and indices increase to the right. In a column byte, bit 0 is the top
//! pixel row. A **zone** is a contiguous run of modules animated as one
//! independent text region.
//!
//! Everything is cooperative and non-blocking: the host calls
//! [`Marquee::animate`] as often as it likes and each zone advances one
//! animation increment only when its tick interval has elapsed.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

mod rng;

mod effects;

pub mod display;
pub mod fonts;
pub mod framebuffer;
pub mod traits;
pub mod zone;

pub use display::Marquee;
pub use framebuffer::FrameBuffer;
pub use traits::{Clock, Control, Font, PixelSurface, Transform};
pub use zone::{FsmState, Sprite, TextAlign, TextEffect, Zone, ZoneFlags};

/// Columns per display module.
pub const COL_SIZE: u16 = 8;

/// Pixel rows per display module (bits per column byte).
pub const ROW_SIZE: u8 = 8;

/// First pixel column of a module.
#[inline]
pub const fn zone_start_col(module: u8) -> i16 {
    module as i16 * COL_SIZE as i16
}

/// Last pixel column of a module.
#[inline]
pub const fn zone_end_col(module: u8) -> i16 {
    (module as i16 + 1) * COL_SIZE as i16 - 1
}

/// Configuration errors reported by the engine.
///
/// All failures are rejected at the boundary with no partial mutation;
/// there is no error propagation out of the animation path itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Zone index is outside the configured zone count
    InvalidZone,
    /// Module range violates `start <= end < module count`
    InvalidModuleRange,
    /// Character code 0 is reserved and cannot be substituted
    ReservedCharCode,
    /// A bounded collection is full
    CapacityExceeded,
}
