//! Byte source abstraction and the decode-and-process pipeline.

use core::future::Future;

use crate::decoder::{DecoderConfig, DecoderStats, FrameDecoder};
use crate::error::{DecodeError, LinkError};
use crate::process::{FlightState, PostProcessor, ProcessingConfig};

/// Async trait for serial byte sources.
///
/// Implementations wrap a UART or any other byte stream. They must be
/// `no_std` compatible and allocation free.
pub trait ByteSource {
    /// Wait for and return the next byte.
    fn read_byte(&mut self) -> impl Future<Output = Result<u8, LinkError>>;
}

/// Decoder plus post-processor plus the flight state they maintain.
///
/// This is the single writer of [`FlightState`].
pub struct Telemetry {
    decoder: FrameDecoder,
    processor: PostProcessor,
    state: FlightState,
}

impl Default for Telemetry {
    fn default() -> Self {
        Self::new(DecoderConfig::default(), ProcessingConfig::default())
    }
}

impl Telemetry {
    #[must_use]
    pub fn new(decoder: DecoderConfig, processing: ProcessingConfig) -> Self {
        Self {
            decoder: FrameDecoder::with_config(decoder),
            processor: PostProcessor::new(processing),
            state: FlightState::default(),
        }
    }

    /// Feed one byte. Returns `Ok(true)` when it completed a frame and the
    /// state was updated.
    ///
    /// A failed frame leaves the state untouched.
    pub fn push_byte(&mut self, byte: u8) -> Result<bool, DecodeError> {
        match self.decoder.push_byte(byte)? {
            Some(record) => {
                self.processor.apply(&mut self.state, record);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &FlightState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> DecoderStats {
        self.decoder.stats()
    }
}

/// Pulls bytes from a [`ByteSource`] until a frame completes.
pub struct TelemetryLink<S: ByteSource> {
    source: S,
    telemetry: Telemetry,
}

impl<S: ByteSource> TelemetryLink<S> {
    pub fn new(source: S, telemetry: Telemetry) -> Self {
        Self { source, telemetry }
    }

    /// Read until the next valid frame and return the updated state.
    ///
    /// Decode and source errors are returned as they happen; the partial
    /// frame is dropped and the next call starts fresh.
    pub async fn next_frame(&mut self) -> Result<FlightState, LinkError> {
        loop {
            let byte = self.source.read_byte().await?;
            if self.telemetry.push_byte(byte)? {
                return Ok(*self.telemetry.state());
            }
        }
    }

    #[inline]
    pub fn telemetry(&self) -> &Telemetry {
        &self.telemetry
    }

    /// Get a mutable reference to the byte source.
    #[inline]
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::frame::ChecksumSpan;
    use crate::record::TelemetryRecord;
    use core::future::Future;
    use core::pin::Pin;
    use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
    use std::collections::VecDeque;
    use std::vec::Vec;

    // Scripted byte source
    struct MockSource {
        bytes: VecDeque<Result<u8, LinkError>>,
    }

    impl MockSource {
        fn new(frames: &[&[u8]]) -> Self {
            let bytes = frames.iter().flat_map(|f| f.iter().map(|&b| Ok(b))).collect();
            Self { bytes }
        }

        fn push_error(&mut self, err: LinkError) {
            self.bytes.push_back(Err(err));
        }
    }

    impl ByteSource for MockSource {
        async fn read_byte(&mut self) -> Result<u8, LinkError> {
            self.bytes.pop_front().unwrap_or(Err(LinkError::Io))
        }
    }

    fn block_on<F: Future>(mut f: F) -> F::Output {
        fn noop_raw_waker() -> RawWaker {
            fn noop(_: *const ()) {}
            fn clone(_: *const ()) -> RawWaker {
                noop_raw_waker()
            }
            static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
            RawWaker::new(core::ptr::null(), &VTABLE)
        }

        let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
        let mut cx = Context::from_waker(&waker);

        // SAFETY: We don't move f after pinning
        let mut f = unsafe { Pin::new_unchecked(&mut f) };

        loop {
            match f.as_mut().poll(&mut cx) {
                Poll::Ready(result) => return result,
                Poll::Pending => {
                    panic!("Mock future returned Pending unexpectedly");
                }
            }
        }
    }

    fn frame(pitch: f32, ias: f32) -> [u8; 80] {
        TelemetryRecord {
            pitch,
            ias,
            ..TelemetryRecord::default()
        }
        .encode_frame(ChecksumSpan::Payload)
    }

    #[test]
    fn test_end_to_end_frame() {
        let f = frame(5.0, 100.0);
        let mut link = TelemetryLink::new(MockSource::new(&[b"noise", &f]), Telemetry::default());

        let state = block_on(link.next_frame()).unwrap();
        assert_eq!(state.record().pitch, 5.0);
        assert_eq!(state.record().ias, 100.0);
        assert_eq!(link.telemetry().stats().frames, 1);
    }

    #[test]
    fn test_frame_bytes_match_wire_text() {
        let f = frame(5.0, 100.0);
        assert_eq!(&f[2..6], b"0050");
        assert_eq!(&f[11..15], b"1000");
    }

    #[test]
    fn test_corrupt_checksum_leaves_state() {
        let good = frame(5.0, 100.0);
        let mut bad: Vec<u8> = frame(7.0, 120.0).to_vec();
        // Swap checksum digits for something that cannot match
        bad[76] = if bad[76] == b'0' { b'1' } else { b'0' };

        let mut link = TelemetryLink::new(MockSource::new(&[&good, &bad]), Telemetry::default());

        let first = block_on(link.next_frame()).unwrap();
        let second = block_on(link.next_frame());
        assert_eq!(second, Err(LinkError::Decode(DecodeError::Checksum)));
        assert_eq!(link.telemetry().state(), &first);
        assert_eq!(link.telemetry().state().record().pitch, 5.0);
    }

    #[test]
    fn test_source_error_propagates() {
        let mut source = MockSource::new(&[b"#1"]);
        source.push_error(LinkError::Framing);
        let mut link = TelemetryLink::new(source, Telemetry::default());

        assert_eq!(block_on(link.next_frame()), Err(LinkError::Framing));
    }

    #[test]
    fn test_recovers_after_error() {
        let mut source = MockSource::new(&[b"#1"]);
        source.push_error(LinkError::Overrun);
        for &b in frame(2.5, 80.0).iter() {
            source.bytes.push_back(Ok(b));
        }
        let mut link = TelemetryLink::new(source, Telemetry::default());

        assert_eq!(block_on(link.next_frame()), Err(LinkError::Overrun));
        let state = block_on(link.next_frame()).unwrap();
        assert_eq!(state.record().pitch, 2.5);
        assert_eq!(state.record().ias, 80.0);
    }

    #[test]
    fn test_sync_push_byte() {
        let mut telemetry = Telemetry::default();
        let f = frame(-3.0, 65.0);
        let updates = f.iter().filter(|&&b| telemetry.push_byte(b) == Ok(true)).count();
        assert_eq!(updates, 1);
        assert_eq!(telemetry.state().record().pitch, -3.0);
    }
}
