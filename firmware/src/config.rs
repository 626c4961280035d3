//! Compile-time configuration: link parameters, display timing and the
//! instrument panel geometry.

use embassy_time::Duration;
use embedded_graphics::prelude::Point;
use gauge_core::{ArcLayout, LinearLayout};
use telemetry_proto::{ChecksumSpan, DecoderConfig, ProcessingConfig};

/// Telemetry UART baud rate (8N1).
pub const UART_BAUD: u32 = 115_200;

/// ST7789 SPI clock.
pub const SPI_FREQUENCY: u32 = 62_500_000;

pub const DISPLAY_WIDTH: u32 = 240;
pub const DISPLAY_HEIGHT: u32 = 320;

/// Redraw period when no new frame arrives.
pub const REFRESH_PERIOD: Duration = Duration::from_millis(100);

/// Data older than this is shown as stale.
pub const STALE_AFTER: Duration = Duration::from_millis(500);

/// Log decoder statistics every this many frames.
pub const STATS_EVERY: u32 = 100;

#[cfg(not(feature = "whole-frame-checksum"))]
const CHECKSUM_SPAN: ChecksumSpan = ChecksumSpan::Payload;
#[cfg(feature = "whole-frame-checksum")]
const CHECKSUM_SPAN: ChecksumSpan = ChecksumSpan::WholeFrame;

#[must_use]
pub fn decoder_config() -> DecoderConfig {
    DecoderConfig {
        checksum_span: CHECKSUM_SPAN,
    }
}

#[must_use]
pub fn processing_config() -> ProcessingConfig {
    ProcessingConfig::default()
}

/// AOA dial: tenths of a degree, 0 to 20 degrees over a 240 degree sweep.
pub const AOA_ARC: ArcLayout = ArcLayout {
    center: Point::new(120, 110),
    size: 100,
    width: 22,
    max: 200,
    min: 0,
    start_deg: 150,
    sweep_deg: 240,
    clockwise: true,
    grad_marks: 10,
};

/// Airspeed tape in knots.
pub const IAS_TAPE: LinearLayout = LinearLayout {
    origin: Point::new(12, 310),
    size: 80,
    width: 18,
    max: 160,
    min: 0,
    grad_marks: 8,
};

/// Vertical G in tenths, -2 G to +4 G.
pub const G_METER: LinearLayout = LinearLayout {
    origin: Point::new(210, 310),
    size: 80,
    width: 18,
    max: 40,
    min: -20,
    grad_marks: -6,
};

/// Slip ball, full scale at +-99.
pub const SLIP_BAR: LinearLayout = LinearLayout {
    origin: Point::new(60, 236),
    size: 120,
    width: 16,
    max: 99,
    min: -99,
    grad_marks: 0,
};
