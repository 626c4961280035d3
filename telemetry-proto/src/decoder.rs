//! Byte-at-a-time frame decoder.
//!
//! The decoder never blocks and holds at most one frame. A start marker in
//! any state discards whatever was buffered and begins a new frame, so the
//! stream resynchronizes on its own after line noise.

use heapless::Vec;

use crate::error::DecodeError;
use crate::frame::{
    self, ChecksumSpan, CHECKSUM_OFFSET, FRAME_LEN, PROTOCOL_ID, START_MARKER, TERMINATOR,
};
use crate::record::TelemetryRecord;

/// Decoder configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderConfig {
    /// Bytes covered by the checksum.
    pub checksum_span: ChecksumSpan,
}

/// Decoder state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DecoderState {
    /// Waiting for a start marker.
    Idle,
    /// Collecting bytes of a frame.
    Accumulating,
}

/// Running counters. All wrap on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DecoderStats {
    pub frames: u32,
    pub checksum_errors: u32,
    pub overflows: u32,
    pub field_errors: u32,
}

/// Telemetry frame decoder.
pub struct FrameDecoder {
    buffer: Vec<u8, FRAME_LEN>,
    state: DecoderState,
    config: DecoderConfig,
    stats: DecoderStats,
}

impl Default for FrameDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder {
    /// Create a decoder with the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(DecoderConfig {
            checksum_span: ChecksumSpan::Payload,
        })
    }

    #[must_use]
    pub const fn with_config(config: DecoderConfig) -> Self {
        Self {
            buffer: Vec::new(),
            state: DecoderState::Idle,
            config,
            stats: DecoderStats {
                frames: 0,
                checksum_errors: 0,
                overflows: 0,
                field_errors: 0,
            },
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> DecoderState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> DecoderStats {
        self.stats
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> DecoderConfig {
        self.config
    }

    /// Drop any partial frame and wait for the next start marker.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.state = DecoderState::Idle;
    }

    /// Feed one byte.
    ///
    /// Returns `Ok(Some(record))` when the byte completes a valid frame. On
    /// any error the partial frame is dropped and the decoder goes idle.
    pub fn push_byte(&mut self, byte: u8) -> Result<Option<TelemetryRecord>, DecodeError> {
        if byte == START_MARKER {
            self.buffer.clear();
            // Buffer was just cleared, capacity is never exceeded here
            let _ = self.buffer.push(byte);
            self.state = DecoderState::Accumulating;
            return Ok(None);
        }

        if self.state == DecoderState::Idle {
            return Ok(None);
        }

        if self.buffer.push(byte).is_err() {
            self.reset();
            self.stats.overflows = self.stats.overflows.wrapping_add(1);
            return Err(DecodeError::Overflow);
        }

        if self.buffer.len() == FRAME_LEN && self.buffer[1] == PROTOCOL_ID && byte == TERMINATOR
        {
            let result = self.validate();
            self.reset();
            return match result {
                Ok(record) => {
                    self.stats.frames = self.stats.frames.wrapping_add(1);
                    Ok(Some(record))
                }
                Err(err) => {
                    match err {
                        DecodeError::Checksum => {
                            self.stats.checksum_errors = self.stats.checksum_errors.wrapping_add(1)
                        }
                        DecodeError::Field => {
                            self.stats.field_errors = self.stats.field_errors.wrapping_add(1)
                        }
                        DecodeError::Overflow => {}
                    }
                    Err(err)
                }
            };
        }

        Ok(None)
    }

    /// Feed a slice of bytes, returning the last record decoded.
    ///
    /// Stops at the first error.
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<Option<TelemetryRecord>, DecodeError> {
        let mut last = None;
        for &byte in bytes {
            if let Some(record) = self.push_byte(byte)? {
                last = Some(record);
            }
        }
        Ok(last)
    }

    fn validate(&self) -> Result<TelemetryRecord, DecodeError> {
        let frame = &self.buffer[..];
        let expected = frame::parse_hex_u8(&frame[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2])
            .ok_or(DecodeError::Checksum)?;
        let actual = frame::checksum(&frame[self.config.checksum_span.range()]);
        if expected != actual {
            return Err(DecodeError::Checksum);
        }

        TelemetryRecord::decode(frame)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;
    use std::vec::Vec;

    use super::*;

    const PAYLOAD: &str =
        "0050-0125100000450000030002010450082005001500210200150012000800070002500";

    fn payload() -> std::string::String {
        // 72 characters above plus a two-digit data mark
        format!("{}07", PAYLOAD)
    }

    fn frame_with_sum(payload: &str, sum: u8) -> Vec<u8> {
        format!("#1{}{:02X}\n", payload, sum).into_bytes()
    }

    fn good_frame() -> Vec<u8> {
        let p = payload();
        let sum = frame::checksum(p.as_bytes());
        frame_with_sum(&p, sum)
    }

    fn feed(
        decoder: &mut FrameDecoder,
        bytes: &[u8],
    ) -> Vec<Result<Option<TelemetryRecord>, DecodeError>> {
        bytes.iter().map(|&b| decoder.push_byte(b)).collect()
    }

    #[test]
    fn test_fixture_length() {
        assert_eq!(payload().len(), 74);
        assert_eq!(good_frame().len(), FRAME_LEN);
    }

    #[test]
    fn test_decode_valid_frame() {
        let mut decoder = FrameDecoder::new();
        let record = decoder.push_bytes(&good_frame()).unwrap().unwrap();
        assert_eq!(record.pitch, 5.0);
        assert_eq!(record.ias, 100.0);
        assert_eq!(decoder.state(), DecoderState::Idle);
        assert_eq!(decoder.stats().frames, 1);
    }

    #[test]
    fn test_only_last_byte_yields_record() {
        let mut decoder = FrameDecoder::new();
        let results = feed(&mut decoder, &good_frame());
        let (last, rest) = results.split_last().unwrap();
        assert!(rest.iter().all(|r| matches!(r, Ok(None))));
        assert!(matches!(last, Ok(Some(_))));
    }

    #[test]
    fn test_idle_ignores_noise() {
        let mut decoder = FrameDecoder::new();
        for r in feed(&mut decoder, b"garbage\n1234") {
            assert_eq!(r, Ok(None));
        }
        assert_eq!(decoder.state(), DecoderState::Idle);
    }

    #[test]
    fn test_noise_before_frame() {
        let mut decoder = FrameDecoder::new();
        let mut bytes = b"xx\n#1partial".to_vec();
        bytes.extend_from_slice(&good_frame());
        let record = decoder.push_bytes(&bytes).unwrap();
        assert!(record.is_some());
    }

    #[test]
    fn test_checksum_mismatch() {
        let p = payload();
        let sum = frame::checksum(p.as_bytes());
        let bytes = frame_with_sum(&p, sum.wrapping_add(1));

        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push_bytes(&bytes), Err(DecodeError::Checksum));
        assert_eq!(decoder.state(), DecoderState::Idle);
        assert_eq!(decoder.stats().checksum_errors, 1);
    }

    #[test]
    fn test_flipped_payload_bit_rejected() {
        let mut bytes = good_frame();
        // '5' (0x35) -> '4' (0x34): still a digit, so only the checksum can catch it
        bytes[4] ^= 0x01;

        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push_bytes(&bytes), Err(DecodeError::Checksum));
    }

    #[test]
    fn test_lowercase_checksum_accepted() {
        let p = payload();
        let sum = frame::checksum(p.as_bytes());
        let bytes = format!("#1{}{:02x}\n", p, sum).into_bytes();

        let mut decoder = FrameDecoder::new();
        assert!(decoder.push_bytes(&bytes).unwrap().is_some());
    }

    #[test]
    fn test_invalid_checksum_digits() {
        let bytes = format!("#1{}ZZ\n", payload()).into_bytes();
        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push_bytes(&bytes), Err(DecodeError::Checksum));
    }

    #[test]
    fn test_whole_frame_checksum() {
        let p = payload();
        let header_sum = frame::checksum(b"#1");
        let sum = frame::checksum(p.as_bytes()).wrapping_add(header_sum);
        let bytes = frame_with_sum(&p, sum);

        let mut payload_only = FrameDecoder::new();
        assert_eq!(payload_only.push_bytes(&bytes), Err(DecodeError::Checksum));

        let mut whole = FrameDecoder::with_config(DecoderConfig {
            checksum_span: ChecksumSpan::WholeFrame,
        });
        assert!(whole.push_bytes(&bytes).unwrap().is_some());
    }

    #[test]
    fn test_field_error() {
        let mut p = payload();
        p.replace_range(0..4, "00A0");
        let sum = frame::checksum(p.as_bytes());
        let bytes = frame_with_sum(&p, sum);

        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push_bytes(&bytes), Err(DecodeError::Field));
        assert_eq!(decoder.stats().field_errors, 1);
    }

    #[test]
    fn test_overflow_resets_to_idle() {
        let mut decoder = FrameDecoder::new();
        decoder.push_byte(b'#').unwrap();
        for _ in 0..FRAME_LEN - 1 {
            assert_eq!(decoder.push_byte(b'0'), Ok(None));
        }
        assert_eq!(decoder.push_byte(b'0'), Err(DecodeError::Overflow));
        assert_eq!(decoder.state(), DecoderState::Idle);
        assert_eq!(decoder.stats().overflows, 1);

        // Next frame decodes normally
        assert!(decoder.push_bytes(&good_frame()).unwrap().is_some());
    }

    #[test]
    fn test_wrong_protocol_id_never_completes() {
        let mut bytes = good_frame();
        bytes[1] = b'2';

        let mut decoder = FrameDecoder::new();
        assert_eq!(decoder.push_bytes(&bytes), Ok(None));
        assert_eq!(decoder.state(), DecoderState::Accumulating);
        // One more byte overflows the buffer
        assert_eq!(decoder.push_byte(b'0'), Err(DecodeError::Overflow));
    }

    #[test]
    fn test_start_marker_resyncs_mid_frame() {
        let mut decoder = FrameDecoder::new();
        let frame = good_frame();
        decoder.push_bytes(&frame[..40]).unwrap();
        assert!(decoder.push_bytes(&frame).unwrap().is_some());
    }

    proptest::proptest! {
        #[test]
        fn test_noise_never_blocks_next_frame(noise in proptest::collection::vec(proptest::num::u8::ANY, 0..300)) {
            let mut decoder = FrameDecoder::new();
            for &b in &noise {
                let _ = decoder.push_byte(b);
            }
            let record = decoder.push_bytes(&good_frame()).unwrap();
            proptest::prop_assert!(record.is_some());
        }
    }

    #[test]
    fn test_reset() {
        let mut decoder = FrameDecoder::new();
        decoder.push_bytes(b"#1234").unwrap();
        assert_eq!(decoder.state(), DecoderState::Accumulating);
        decoder.reset();
        assert_eq!(decoder.state(), DecoderState::Idle);
    }
}
