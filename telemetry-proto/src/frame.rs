//! Wire layout of the telemetry frame.
//!
//! ```text
//! #1<74 fixed-width ASCII numeric bytes><2 hex checksum>\n
//! ```
//!
//! Every frame is exactly [`FRAME_LEN`] bytes. Fields sit at fixed offsets
//! inside the payload and are decoded independently (see [`FieldSpec`]).

use core::ops::Range;

/// Total frame length, including the start marker and the line feed.
pub const FRAME_LEN: usize = 80;

/// Frame start marker. Seeing it anywhere resynchronizes the decoder.
pub const START_MARKER: u8 = b'#';

/// Protocol identifier that must follow the start marker.
pub const PROTOCOL_ID: u8 = b'1';

/// Frame terminator (last byte).
pub const TERMINATOR: u8 = b'\n';

/// Offset of the two hex checksum characters.
pub const CHECKSUM_OFFSET: usize = 76;

/// First byte of the numeric payload.
pub const PAYLOAD_OFFSET: usize = 2;

/// Which bytes are summed into the frame checksum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChecksumSpan {
    /// Payload bytes 2..=75.
    #[default]
    Payload,
    /// Bytes 0..=75, including the `#1` header.
    WholeFrame,
}

impl ChecksumSpan {
    /// Byte range covered by the checksum.
    #[inline]
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        match self {
            ChecksumSpan::Payload => PAYLOAD_OFFSET..CHECKSUM_OFFSET,
            ChecksumSpan::WholeFrame => 0..CHECKSUM_OFFSET,
        }
    }
}

/// How a field's ASCII integer maps to engineering units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scaling {
    /// Value is the integer divided by the factor.
    Divide(f32),
    /// Value is the integer multiplied by the factor.
    Multiply(f32),
    /// Value is the integer itself.
    Unit,
}

impl Scaling {
    /// Apply the scaling to a raw field integer.
    #[inline]
    #[must_use]
    pub fn apply(self, raw: i32) -> f32 {
        match self {
            Scaling::Divide(d) => raw as f32 / d,
            Scaling::Multiply(m) => raw as f32 * m,
            Scaling::Unit => raw as f32,
        }
    }

    /// Inverse of [`Scaling::apply`], rounded to the nearest integer.
    #[inline]
    #[must_use]
    pub fn raw(self, value: f32) -> i32 {
        let raw = match self {
            Scaling::Divide(d) => value * d,
            Scaling::Multiply(m) => value / m,
            Scaling::Unit => value,
        };
        round_to_i32(raw)
    }
}

/// Location and scaling of one field inside the frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    /// Byte offset of the first character.
    pub offset: usize,
    /// Number of characters.
    pub width: usize,
    /// Conversion to engineering units.
    pub scaling: Scaling,
}

impl FieldSpec {
    const fn new(offset: usize, width: usize, scaling: Scaling) -> Self {
        Self {
            offset,
            width,
            scaling,
        }
    }

    /// Byte range of the field.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.width
    }
}

pub const PITCH: FieldSpec = FieldSpec::new(2, 4, Scaling::Divide(10.0));
pub const ROLL: FieldSpec = FieldSpec::new(6, 5, Scaling::Divide(10.0));
pub const IAS: FieldSpec = FieldSpec::new(11, 4, Scaling::Divide(10.0));
pub const PRESSURE_ALTITUDE: FieldSpec = FieldSpec::new(15, 6, Scaling::Unit);
pub const TURN_RATE: FieldSpec = FieldSpec::new(21, 5, Scaling::Divide(10.0));
pub const LATERAL_G: FieldSpec = FieldSpec::new(26, 3, Scaling::Divide(100.0));
pub const VERTICAL_G: FieldSpec = FieldSpec::new(29, 3, Scaling::Divide(10.0));
pub const PERCENT_LIFT: FieldSpec = FieldSpec::new(32, 2, Scaling::Unit);
pub const AOA: FieldSpec = FieldSpec::new(34, 4, Scaling::Divide(10.0));
pub const VERTICAL_SPEED: FieldSpec = FieldSpec::new(38, 4, Scaling::Multiply(10.0));
pub const OAT: FieldSpec = FieldSpec::new(42, 3, Scaling::Unit);
pub const FLIGHT_PATH: FieldSpec = FieldSpec::new(45, 4, Scaling::Divide(10.0));
pub const FLAP_POSITION: FieldSpec = FieldSpec::new(49, 3, Scaling::Unit);
pub const STALL_WARN_AOA: FieldSpec = FieldSpec::new(52, 4, Scaling::Divide(10.0));
pub const SLOW_AOA: FieldSpec = FieldSpec::new(56, 4, Scaling::Divide(10.0));
pub const FAST_AOA: FieldSpec = FieldSpec::new(60, 4, Scaling::Divide(10.0));
pub const TONES_ON_AOA: FieldSpec = FieldSpec::new(64, 4, Scaling::Divide(10.0));
pub const G_ONSET_RATE: FieldSpec = FieldSpec::new(68, 4, Scaling::Divide(100.0));
pub const SPIN_RECOVERY_CUE: FieldSpec = FieldSpec::new(72, 2, Scaling::Unit);
pub const DATA_MARK: FieldSpec = FieldSpec::new(74, 2, Scaling::Unit);

/// All fields in wire order. Together they tile bytes 2..76 exactly.
pub const FIELDS: [FieldSpec; 20] = [
    PITCH,
    ROLL,
    IAS,
    PRESSURE_ALTITUDE,
    TURN_RATE,
    LATERAL_G,
    VERTICAL_G,
    PERCENT_LIFT,
    AOA,
    VERTICAL_SPEED,
    OAT,
    FLIGHT_PATH,
    FLAP_POSITION,
    STALL_WARN_AOA,
    SLOW_AOA,
    FAST_AOA,
    TONES_ON_AOA,
    G_ONSET_RATE,
    SPIN_RECOVERY_CUE,
    DATA_MARK,
];

/// Sum of the bytes, modulo 256.
#[inline]
#[must_use]
pub fn checksum(data: &[u8]) -> u8 {
    data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b))
}

/// Hex digits lookup table.
const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Write a u8 as 2 uppercase hex digits.
#[inline]
pub fn write_hex_u8(buf: &mut [u8; 2], value: u8) {
    buf[0] = HEX_DIGITS[(value >> 4) as usize];
    buf[1] = HEX_DIGITS[(value & 0xF) as usize];
}

/// Parse a 2-character hex string as u8.
#[inline]
pub fn parse_hex_u8(s: &[u8]) -> Option<u8> {
    match s {
        [high, low] => Some((hex_digit(*high)? << 4) | hex_digit(*low)?),
        _ => None,
    }
}

#[inline]
fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'A'..=b'F' => Some(b - b'A' + 10),
        b'a'..=b'f' => Some(b - b'a' + 10),
        _ => None,
    }
}

/// Parse a fixed-width decimal field.
///
/// Leading spaces and a single `+`/`-` sign are accepted. Every remaining
/// character must be a digit.
pub fn parse_field(s: &[u8]) -> Option<i32> {
    let start = s.iter().position(|&b| b != b' ')?;
    let s = &s[start..];

    let (negative, digits) = match s.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, s),
    };

    if digits.is_empty() {
        return None;
    }

    let mut value: i32 = 0;
    for &b in digits {
        if !b.is_ascii_digit() {
            return None;
        }
        value = value.checked_mul(10)?.checked_add((b - b'0') as i32)?;
    }

    Some(if negative { -value } else { value })
}

/// Write `value` into `buf` as a zero-padded decimal filling the whole slice.
///
/// Negative values take a leading `-`. Values that do not fit are clamped to
/// the largest magnitude the width can hold.
pub fn write_field(buf: &mut [u8], value: i32) {
    let width = buf.len();
    if width == 0 {
        return;
    }

    let negative = value < 0;
    let digits = if negative { width - 1 } else { width };
    let limit = 10u32.saturating_pow(digits as u32).saturating_sub(1);
    let mut n = value.unsigned_abs().min(limit);

    for slot in buf.iter_mut().rev() {
        *slot = b'0' + (n % 10) as u8;
        n /= 10;
    }

    if negative {
        buf[0] = b'-';
    }
}

/// Round half away from zero, saturating at the `i32` bounds.
#[inline]
fn round_to_i32(v: f32) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}
