//! MAX7219/MAX7221 daisy-chain driver
//!
//! Pixel data is staged in an in-memory frame buffer; [`Max7219::commit`]
//! serialises the buffer row by row and clocks one register word per
//! device through the chain in a single transaction, furthest device
//! first.
//!
//! Module mapping: device 0 drives the leftmost module, digit registers
//! 1..=8 are the pixel rows top to bottom, and data bit 7 is the leftmost
//! column of a module.

use embedded_hal::spi::SpiDevice;
use marquee_core::{Control, FrameBuffer, PixelSurface, Transform, COL_SIZE, ROW_SIZE};

/// Devices a single chain can hold.
pub const MAX_DEVICES: usize = 8;

// MAX7219 register addresses
const REG_DIGIT0: u8 = 0x01;
const REG_DECODE_MODE: u8 = 0x09;
const REG_INTENSITY: u8 = 0x0a;
const REG_SCAN_LIMIT: u8 = 0x0b;
const REG_SHUTDOWN: u8 = 0x0c;
const REG_DISPLAY_TEST: u8 = 0x0f;

/// A chain of `COLS / 8` MAX7219 modules behind one SPI device.
///
/// `COLS` is the total column count of the chain and must be a multiple
/// of 8, at most `8 * MAX_DEVICES`.
pub struct Max7219<SPI, const COLS: usize> {
    spi: SPI,
    fb: FrameBuffer<COLS>,
    intensity: [u8; MAX_DEVICES],
    intensity_dirty: bool,
    shutdown: bool,
    shutdown_dirty: bool,
}

impl<SPI, const COLS: usize> Max7219<SPI, COLS>
where
    SPI: SpiDevice,
{
    pub fn new(spi: SPI) -> Self {
        Self {
            spi,
            fb: FrameBuffer::new(),
            intensity: [7; MAX_DEVICES],
            intensity_dirty: true,
            shutdown: false,
            shutdown_dirty: true,
        }
    }

    fn devices(&self) -> usize {
        COLS / COL_SIZE as usize
    }

    /// Broadcast one register write to every device in the chain.
    fn write_all(&mut self, reg: u8, data: u8) -> Result<(), SPI::Error> {
        let mut buf = heapless::Vec::<u8, { 2 * MAX_DEVICES }>::new();
        for _ in 0..self.devices() {
            let _ = buf.push(reg);
            let _ = buf.push(data);
        }
        self.spi.write(&buf)
    }

    /// Wake the chain up into a known state: display test off, no BCD
    /// decode, all rows scanned, blank frame.
    pub fn init(&mut self) -> Result<(), SPI::Error> {
        self.write_all(REG_DISPLAY_TEST, 0)?;
        self.write_all(REG_DECODE_MODE, 0)?;
        self.write_all(REG_SCAN_LIMIT, 7)?;
        self.fb.clear(0, COLS as u16 - 1);
        self.intensity_dirty = true;
        self.shutdown = false;
        self.shutdown_dirty = true;
        self.commit()
    }

    pub fn release(self) -> SPI {
        self.spi
    }

    /// Row byte for `device` and pixel row `row`, bit 7 leftmost.
    fn row_byte(&self, device: usize, row: u8) -> u8 {
        let base = device as u16 * COL_SIZE;
        let mut data = 0u8;
        for c in 0..COL_SIZE {
            if self.fb.get_column(base + c) & (1 << row) != 0 {
                data |= 0x80 >> c;
            }
        }
        data
    }

    fn flush_row(&mut self, row: u8) -> Result<(), SPI::Error> {
        let mut buf = heapless::Vec::<u8, { 2 * MAX_DEVICES }>::new();
        // furthest device is shifted in first
        for device in (0..self.devices()).rev() {
            let _ = buf.push(REG_DIGIT0 + row);
            let _ = buf.push(self.row_byte(device, row));
        }
        self.spi.write(&buf)
    }

    fn flush_intensity(&mut self) -> Result<(), SPI::Error> {
        let mut buf = heapless::Vec::<u8, { 2 * MAX_DEVICES }>::new();
        for device in (0..self.devices()).rev() {
            let _ = buf.push(REG_INTENSITY);
            let _ = buf.push(self.intensity[device] & 0x0f);
        }
        self.spi.write(&buf)
    }
}

impl<SPI, const COLS: usize> PixelSurface for Max7219<SPI, COLS>
where
    SPI: SpiDevice,
{
    type Error = SPI::Error;

    fn columns(&self) -> u16 {
        COLS as u16
    }

    fn get_column(&self, col: u16) -> u8 {
        self.fb.get_column(col)
    }

    fn set_column(&mut self, col: u16, data: u8) {
        self.fb.set_column(col, data);
    }

    fn clear(&mut self, start: u16, end: u16) {
        self.fb.clear(start, end);
    }

    fn transform(&mut self, start: u16, end: u16, op: Transform) {
        self.fb.transform(start, end, op);
    }

    fn control(&mut self, start: u16, end: u16, ctl: Control) {
        match ctl {
            Control::Intensity(level) => {
                let first = usize::from(start / COL_SIZE);
                let last = usize::from(end / COL_SIZE).min(self.devices().saturating_sub(1));
                for device in first..=last {
                    if device < MAX_DEVICES {
                        self.intensity[device] = level.min(15);
                    }
                }
                self.intensity_dirty = true;
            }
            Control::Shutdown(on) => {
                self.shutdown = on;
                self.shutdown_dirty = true;
            }
            Control::Wraparound(_) => self.fb.control(start, end, ctl),
        }
    }

    fn set_update(&mut self, enabled: bool) {
        self.fb.set_update(enabled);
    }

    /// Push the staged frame and any pending control changes out on the
    /// bus.
    fn commit(&mut self) -> Result<(), Self::Error> {
        for row in 0..ROW_SIZE {
            self.flush_row(row)?;
        }
        if self.intensity_dirty {
            self.flush_intensity()?;
            self.intensity_dirty = false;
        }
        if self.shutdown_dirty {
            // shutdown register: 1 = normal operation
            let data = u8::from(!self.shutdown);
            self.write_all(REG_SHUTDOWN, data)?;
            self.shutdown_dirty = false;
        }
        Ok(())
    }
}
