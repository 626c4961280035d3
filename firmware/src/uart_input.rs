//! UART byte source for the telemetry link.
//!
//! The sender streams fixed-length `#1...` frames at 115200 baud, 8N1.
//! Bytes are handed to the decoder one at a time; framing is entirely the
//! decoder's job.
//!
//! # Pins
//!
//! Uses UART1:
//! - GPIO 8: TX (unused)
//! - GPIO 9: RX

use embassy_rp::uart::{Async, Error as UartError, UartRx};
use telemetry_proto::{ByteSource, LinkError};

/// Convert UART errors to [`LinkError`].
///
/// A free function rather than a `From` impl: both types are foreign here.
#[inline]
fn uart_error_to_link_error(e: UartError) -> LinkError {
    match e {
        UartError::Framing => LinkError::Framing,
        UartError::Overrun => LinkError::Overrun,
        _ => LinkError::Io,
    }
}

/// UART receiver as a [`ByteSource`].
pub struct UartByteSource<'d> {
    rx: UartRx<'d, Async>,
}

impl<'d> UartByteSource<'d> {
    #[must_use]
    pub fn new(rx: UartRx<'d, Async>) -> Self {
        Self { rx }
    }
}

impl ByteSource for UartByteSource<'_> {
    async fn read_byte(&mut self) -> Result<u8, LinkError> {
        let mut byte = [0u8; 1];
        self.rx
            .read(&mut byte)
            .await
            .map_err(uart_error_to_link_error)?;
        Ok(byte[0])
    }
}
