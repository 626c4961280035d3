//! ST7789 TFT panel driven over SPI from an in-RAM framebuffer.
//!
//! Gauges draw into a [`Framebuffer`] (an `embedded-graphics` draw target),
//! then [`St7789::flush`] streams the whole frame to the controller. The
//! 240x320 RGB565 frame takes 150 KiB of the RP2040's 264 KiB of RAM, so its
//! storage is a `static` handed over at startup.
//!
//! # Pins
//!
//! | Signal | GPIO |
//! |--------|------|
//! | SPI0 SCK  | 18 |
//! | SPI0 MOSI | 19 |
//! | CS        | 17 |
//! | DC        | 16 |
//! | RST       | 20 |
//! | Backlight | 21 |

use embassy_time::Timer;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::spi::SpiDevice;

use crate::config::{DISPLAY_HEIGHT, DISPLAY_WIDTH};

const WIDTH: usize = DISPLAY_WIDTH as usize;
const HEIGHT: usize = DISPLAY_HEIGHT as usize;

/// Pixels per SPI transfer when flushing.
const CHUNK_PIXELS: usize = 256;

/// ST7789 command codes.
#[repr(u8)]
#[derive(Debug, Clone, Copy)]
enum Command {
    SoftReset = 0x01,
    SleepOut = 0x11,
    NormalMode = 0x13,
    InversionOn = 0x21,
    DisplayOn = 0x29,
    ColumnAddress = 0x2A,
    RowAddress = 0x2B,
    WriteMemory = 0x2C,
    MemoryAccess = 0x36,
    PixelFormat = 0x3A,
}

/// MADCTL RGB/BGR order bit.
#[cfg(not(feature = "display-bgr"))]
const MADCTL: u8 = 0x00;
#[cfg(feature = "display-bgr")]
const MADCTL: u8 = 0x08;

/// 16 bits per pixel, 65K colors.
const COLMOD_RGB565: u8 = 0x55;

/// Display error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum DisplayError {
    /// SPI transfer failed.
    Communication,
    /// DC or RST pin failed.
    Gpio,
}

/// Pixel count of one frame.
pub const FRAME_PIXELS: usize = WIDTH * HEIGHT;

/// Full-screen RGB565 frame over `'static` storage.
pub struct Framebuffer {
    pixels: &'static mut [u16; FRAME_PIXELS],
}

impl Framebuffer {
    #[must_use]
    pub fn new(pixels: &'static mut [u16; FRAME_PIXELS]) -> Self {
        Self { pixels }
    }

    /// Raw pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[u16] {
        &self.pixels[..]
    }
}

impl DrawTarget for Framebuffer {
    type Color = Rgb565;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= WIDTH as i32 || point.y >= HEIGHT as i32 {
                continue;
            }
            let index = point.y as usize * WIDTH + point.x as usize;
            self.pixels[index] = RawU16::from(color).into_inner();
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(RawU16::from(color).into_inner());
        Ok(())
    }
}

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(DISPLAY_WIDTH, DISPLAY_HEIGHT)
    }
}

/// ST7789 controller.
///
/// `SPI` is an async [`SpiDevice`] that owns chip select.
pub struct St7789<SPI, DC, RST> {
    spi: SPI,
    dc: DC,
    rst: RST,
}

impl<SPI, DC, RST> St7789<SPI, DC, RST>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RST) -> Self {
        Self { spi, dc, rst }
    }

    async fn command(&mut self, cmd: Command, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::Gpio)?;
        self.spi
            .write(&[cmd as u8])
            .await
            .map_err(|_| DisplayError::Communication)?;

        if !data.is_empty() {
            self.dc.set_high().map_err(|_| DisplayError::Gpio)?;
            self.spi
                .write(data)
                .await
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }

    async fn hardware_reset(&mut self) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        Timer::after_millis(5).await;
        self.rst.set_low().map_err(|_| DisplayError::Gpio)?;
        Timer::after_millis(10).await;
        self.rst.set_high().map_err(|_| DisplayError::Gpio)?;
        Timer::after_millis(120).await;
        Ok(())
    }

    /// Reset and configure for RGB565, full-screen window.
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        self.hardware_reset().await?;

        self.command(Command::SoftReset, &[]).await?;
        Timer::after_millis(150).await;
        self.command(Command::SleepOut, &[]).await?;
        Timer::after_millis(10).await;

        self.command(Command::PixelFormat, &[COLMOD_RGB565]).await?;
        self.command(Command::MemoryAccess, &[MADCTL]).await?;
        self.command(Command::InversionOn, &[]).await?;
        self.command(Command::NormalMode, &[]).await?;
        self.command(Command::DisplayOn, &[]).await?;
        Timer::after_millis(10).await;
        Ok(())
    }

    async fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), DisplayError> {
        let [xs_hi, xs_lo] = x0.to_be_bytes();
        let [xe_hi, xe_lo] = x1.to_be_bytes();
        let [ys_hi, ys_lo] = y0.to_be_bytes();
        let [ye_hi, ye_lo] = y1.to_be_bytes();
        self.command(Command::ColumnAddress, &[xs_hi, xs_lo, xe_hi, xe_lo])
            .await?;
        self.command(Command::RowAddress, &[ys_hi, ys_lo, ye_hi, ye_lo])
            .await
    }

    /// Stream the whole frame to display RAM.
    pub async fn flush(&mut self, frame: &Framebuffer) -> Result<(), DisplayError> {
        self.set_window(0, 0, (WIDTH - 1) as u16, (HEIGHT - 1) as u16)
            .await?;
        self.command(Command::WriteMemory, &[]).await?;
        self.dc.set_high().map_err(|_| DisplayError::Gpio)?;

        // Controller expects big-endian pixels
        let mut buf = [0u8; CHUNK_PIXELS * 2];
        for chunk in frame.pixels().chunks(CHUNK_PIXELS) {
            for (dst, px) in buf.chunks_exact_mut(2).zip(chunk) {
                dst.copy_from_slice(&px.to_be_bytes());
            }
            self.spi
                .write(&buf[..chunk.len() * 2])
                .await
                .map_err(|_| DisplayError::Communication)?;
        }
        Ok(())
    }
}
