//! Hardware display drivers for the marquee engine
//!
//! Drivers implement [`marquee_core::PixelSurface`] on top of
//! `embedded-hal` bus traits so the animation engine stays hardware
//! agnostic. Currently:
//!
//! - [`max7219::Max7219`]: daisy-chained MAX7219/MAX7221 8x8 LED matrix
//!   modules over SPI

#![no_std]
#![deny(unsafe_code)]

pub mod max7219;

pub use max7219::Max7219;
