//! Error types.

/// Frame decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecodeError {
    /// More than a frame's worth of bytes arrived without a terminator.
    Overflow,
    /// Checksum mismatch or unreadable checksum digits.
    Checksum,
    /// A payload field is not a number.
    Field,
}

/// Error type for byte link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// UART/communication I/O error.
    Io,
    /// UART framing error.
    Framing,
    /// Receive overrun, bytes were lost.
    Overrun,
    /// A complete frame failed to decode.
    Decode(DecodeError),
}

impl From<DecodeError> for LinkError {
    fn from(err: DecodeError) -> Self {
        LinkError::Decode(err)
    }
}
