//! Angle-of-attack EFIS display for RP2040.
//!
//! # Overview
//!
//! The firmware runs on a Raspberry Pi Pico (RP2040) and:
//! 1. Receives fixed-length telemetry frames over UART (115200 baud, 8N1)
//! 2. Decodes and smooths them into a [`FlightState`]
//! 3. Draws an AOA dial, airspeed tape, G meter and slip ball on a 240x320
//!    ST7789 panel
//!
//! # Hardware Configuration
//!
//! | Function | GPIO | Description |
//! |----------|------|-------------|
//! | UART1 RX | 9    | Telemetry input |
//! | SPI0 SCK | 18   | Display clock |
//! | SPI0 TX  | 19   | Display data |
//! | CS       | 17   | Display chip select |
//! | DC       | 16   | Display data/command |
//! | RST      | 20   | Display reset |
//! | BL       | 21   | Backlight |
//! | LED      | 25   | On-board LED (link error indicator) |
//!
//! # Architecture
//!
//! Two Embassy tasks share the latest decoded frame through a
//! [`Signal`](embassy_sync::signal::Signal), so the display always draws the
//! newest state and never queues behind the link:
//!
//! - **Input Task**: Reads UART bytes, decodes frames, signals each new state
//! - **Display Task**: Redraws on every new state or refresh tick, and blanks
//!   the pointers when data goes stale
//!
//! # Modules
//!
//! - [`config`]: Baud rate, timing and gauge geometry
//! - [`uart_input`]: UART byte source ([`UartByteSource`])
//! - [`display`]: Framebuffer and ST7789 driver ([`Framebuffer`], [`St7789`])
//! - [`panel`]: Gauge layout and readouts ([`Panel`])
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`whole-frame-checksum`**: Sum the `#1` header into the frame checksum
//! - **`display-bgr`**: Panel with blue-green-red subpixel order

#![no_std]

#[cfg(all(feature = "dev-panic", feature = "prod-panic"))]
compile_error!("Cannot enable both `dev-panic` and `prod-panic` features - they install conflicting panic handlers");

pub use gauge_core::{Canvas, Gauge, GaugeError, Surface};
pub use telemetry_proto::{
    ByteSource, DecodeError, DecoderStats, FlightState, LinkError, Telemetry, TelemetryLink,
};

pub mod config;
pub mod display;
pub mod panel;
pub mod uart_input;

pub use display::{DisplayError, Framebuffer, St7789, FRAME_PIXELS};
pub use panel::Panel;
pub use uart_input::UartByteSource;
