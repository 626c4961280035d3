//! EFIS telemetry frame decoding and post-processing.
//!
//! The sender emits one fixed-length ASCII frame per sample:
//!
//! ```text
//! #1<pitch><roll><ias>...<data mark><checksum>\n
//! ```
//!
//! The crate is organized into:
//!
//! - [`frame`]: Wire layout, field table, checksum and field codecs
//! - [`record`]: [`TelemetryRecord`] decode and frame encoding
//! - [`decoder`]: Byte-at-a-time [`FrameDecoder`] state machine
//! - [`process`]: Smoothing, slip and deceleration ([`PostProcessor`], [`FlightState`])
//! - [`link`]: Async [`ByteSource`] trait and the [`TelemetryLink`] pipeline
//!
//! # Example
//!
//! ```rust
//! use telemetry_proto::{ChecksumSpan, Telemetry, TelemetryRecord};
//!
//! let record = TelemetryRecord { pitch: 5.0, ias: 100.0, ..Default::default() };
//! let frame = record.encode_frame(ChecksumSpan::Payload);
//!
//! let mut telemetry = Telemetry::default();
//! let mut updated = false;
//! for &byte in frame.iter() {
//!     updated |= telemetry.push_byte(byte).unwrap();
//! }
//! assert!(updated);
//! assert_eq!(telemetry.state().record().ias, 100.0);
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod decoder;
pub mod error;
pub mod frame;
pub mod link;
pub mod process;
pub mod record;

pub use decoder::{DecoderConfig, DecoderState, DecoderStats, FrameDecoder};
pub use error::{DecodeError, LinkError};
pub use frame::{ChecksumSpan, FRAME_LEN};
pub use link::{ByteSource, Telemetry, TelemetryLink};
pub use process::{FlightState, PostProcessor, ProcessingConfig};
pub use record::TelemetryRecord;
