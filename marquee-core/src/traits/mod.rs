//! Hardware abstraction traits
//!
//! These traits define the interface between the animation engine and
//! hardware-specific implementations: the pixel surface being drawn on,
//! the font glyphs are looked up in, and the time source that paces the
//! animation ticks.

pub mod clock;
pub mod font;
pub mod surface;

pub use clock::Clock;
pub use font::Font;
pub use surface::{Control, PixelSurface, Transform};
