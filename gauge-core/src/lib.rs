//! Platform-agnostic analog gauge rendering for small TFT displays.
//!
//! This crate draws the instruments of an angle-of-attack display: bar and
//! arc gauges with colored ranges, graduation marks and pointer markers,
//! plus stroked numerals for readouts. It has no display driver; everything
//! is drawn through the [`Surface`] trait, which [`Canvas`] implements for any
//! `embedded-graphics` draw target.
//!
//! # Overview
//!
//! - [`primitives`]: Wide lines, polygons, arcs and graduation marks
//! - [`scale`]: Fixed-point bar scaling ([`LinearScale`]) and radian arc scaling ([`ArcScale`])
//! - [`gauge`]: Pointer and range slots and the three gauge layouts ([`Gauge`])
//! - [`marker`]: Marker shapes per orientation ([`MarkerKind`])
//! - [`numeral`]: Rotatable vector numerals ([`draw_numerals`])
//! - [`color`]: RGB565 palette and alpha blending
//! - [`surface`]: The [`Surface`] trait and the [`Canvas`] adapter
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::mock_display::MockDisplay;
//! use embedded_graphics::pixelcolor::Rgb565;
//! use embedded_graphics::prelude::Point;
//! use gauge_core::{color, Canvas, Gauge, LinearLayout, MarkerKind};
//!
//! let mut display: MockDisplay<Rgb565> = MockDisplay::new();
//! display.set_allow_overdraw(true);
//! display.set_allow_out_of_bounds_drawing(true);
//! let mut canvas = Canvas::new(display);
//!
//! let mut ias = Gauge::new();
//! ias.set_range(0, true, 60, 20, color::GREEN).unwrap();
//! ias.set_pointer(0, 45, MarkerKind::ArrowFar, color::WHITE, Some('I')).unwrap();
//!
//! let layout = LinearLayout {
//!     origin: Point::new(10, 60),
//!     size: 50,
//!     width: 12,
//!     max: 80,
//!     min: 0,
//!     grad_marks: 4,
//! };
//! ias.draw_vertical(&mut canvas, &layout).unwrap();
//! assert_eq!(ias.bottom_datum(), Point::new(16, 60));
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)
//!
//! # No-std Support
//!
//! This crate is `#![no_std]` and allocation free. Trigonometry goes through
//! `libm`.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod color;
pub mod gauge;
pub mod marker;
pub mod numeral;
pub mod primitives;
pub mod scale;
pub mod surface;

pub use gauge::{
    ArcLayout, Gauge, GaugeError, LinearLayout, Pointer, Range, NUM_POINTERS, NUM_RANGES,
};
pub use marker::{Dial, MarkerKind};
pub use numeral::{
    advance, draw_numerals, draw_readout, Datum, NumeralStyle, READOUT_LEN, READOUT_OVERFLOW,
};
pub use primitives::{ArcSpan, GradStyle, LineEnd, MarkStyle, Stroke};
pub use scale::{ArcScale, GradMarks, LinearScale};
pub use surface::{Canvas, Surface};
