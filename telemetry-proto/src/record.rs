//! Decoded telemetry record and its frame codec.

use crate::error::DecodeError;
use crate::frame::{
    self, ChecksumSpan, FieldSpec, AOA, CHECKSUM_OFFSET, DATA_MARK, FAST_AOA, FLAP_POSITION,
    FLIGHT_PATH, FRAME_LEN, G_ONSET_RATE, IAS, LATERAL_G, OAT, PERCENT_LIFT, PITCH,
    PRESSURE_ALTITUDE, PROTOCOL_ID, ROLL, SLOW_AOA, SPIN_RECOVERY_CUE, STALL_WARN_AOA,
    START_MARKER, TERMINATOR, TONES_ON_AOA, TURN_RATE, VERTICAL_G, VERTICAL_SPEED,
};

/// One decoded telemetry frame, in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TelemetryRecord {
    /// Pitch, degrees.
    pub pitch: f32,
    /// Roll, degrees.
    pub roll: f32,
    /// Indicated airspeed, knots.
    pub ias: f32,
    /// Pressure altitude, feet.
    pub pressure_altitude: f32,
    /// Turn rate, degrees per second.
    pub turn_rate: f32,
    /// Lateral acceleration, g.
    pub lateral_g: f32,
    /// Vertical acceleration, g.
    pub vertical_g: f32,
    /// Percent of maximum lift.
    pub percent_lift: i16,
    /// Angle of attack, degrees. `-100` means unavailable.
    pub aoa: f32,
    /// Instantaneous vertical speed, feet per minute.
    pub vertical_speed: f32,
    /// Outside air temperature, degrees Celsius.
    pub oat: i16,
    /// Flight path angle, degrees.
    pub flight_path: f32,
    /// Flap position, degrees.
    pub flap_position: i16,
    pub stall_warn_aoa: f32,
    pub slow_aoa: f32,
    pub fast_aoa: f32,
    pub tones_on_aoa: f32,
    /// Load factor onset rate, g per second.
    pub g_onset_rate: f32,
    pub spin_recovery_cue: i16,
    pub data_mark: i16,
}

impl TelemetryRecord {
    /// Decode the fields of a complete frame.
    ///
    /// Only the payload is inspected; framing and checksum are the decoder's
    /// job. Fails with [`DecodeError::Field`] if any field is not numeric.
    pub fn decode(frame: &[u8]) -> Result<Self, DecodeError> {
        if frame.len() < CHECKSUM_OFFSET {
            return Err(DecodeError::Field);
        }

        let real = |spec: FieldSpec| -> Result<f32, DecodeError> {
            let raw = frame::parse_field(&frame[spec.range()]).ok_or(DecodeError::Field)?;
            Ok(spec.scaling.apply(raw))
        };
        let int = |spec: FieldSpec| -> Result<i16, DecodeError> {
            let raw = frame::parse_field(&frame[spec.range()]).ok_or(DecodeError::Field)?;
            i16::try_from(raw).map_err(|_| DecodeError::Field)
        };

        Ok(Self {
            pitch: real(PITCH)?,
            roll: real(ROLL)?,
            ias: real(IAS)?,
            pressure_altitude: real(PRESSURE_ALTITUDE)?,
            turn_rate: real(TURN_RATE)?,
            lateral_g: real(LATERAL_G)?,
            vertical_g: real(VERTICAL_G)?,
            percent_lift: int(PERCENT_LIFT)?,
            aoa: real(AOA)?,
            vertical_speed: real(VERTICAL_SPEED)?,
            oat: int(OAT)?,
            flight_path: real(FLIGHT_PATH)?,
            flap_position: int(FLAP_POSITION)?,
            stall_warn_aoa: real(STALL_WARN_AOA)?,
            slow_aoa: real(SLOW_AOA)?,
            fast_aoa: real(FAST_AOA)?,
            tones_on_aoa: real(TONES_ON_AOA)?,
            g_onset_rate: real(G_ONSET_RATE)?,
            spin_recovery_cue: int(SPIN_RECOVERY_CUE)?,
            data_mark: int(DATA_MARK)?,
        })
    }

    /// Encode the record as a complete frame with checksum and terminator.
    ///
    /// Values are rounded to the field resolution and clamped to the field
    /// width.
    #[must_use]
    pub fn encode_frame(&self, span: ChecksumSpan) -> [u8; FRAME_LEN] {
        let mut buf = [b'0'; FRAME_LEN];
        buf[0] = START_MARKER;
        buf[1] = PROTOCOL_ID;

        let mut put_real = |spec: FieldSpec, value: f32| {
            frame::write_field(&mut buf[spec.range()], spec.scaling.raw(value));
        };
        put_real(PITCH, self.pitch);
        put_real(ROLL, self.roll);
        put_real(IAS, self.ias);
        put_real(PRESSURE_ALTITUDE, self.pressure_altitude);
        put_real(TURN_RATE, self.turn_rate);
        put_real(LATERAL_G, self.lateral_g);
        put_real(VERTICAL_G, self.vertical_g);
        put_real(AOA, self.aoa);
        put_real(VERTICAL_SPEED, self.vertical_speed);
        put_real(FLIGHT_PATH, self.flight_path);
        put_real(STALL_WARN_AOA, self.stall_warn_aoa);
        put_real(SLOW_AOA, self.slow_aoa);
        put_real(FAST_AOA, self.fast_aoa);
        put_real(TONES_ON_AOA, self.tones_on_aoa);
        put_real(G_ONSET_RATE, self.g_onset_rate);

        for (spec, value) in [
            (PERCENT_LIFT, self.percent_lift),
            (OAT, self.oat),
            (FLAP_POSITION, self.flap_position),
            (SPIN_RECOVERY_CUE, self.spin_recovery_cue),
            (DATA_MARK, self.data_mark),
        ] {
            frame::write_field(&mut buf[spec.range()], i32::from(value));
        }

        let sum = frame::checksum(&buf[span.range()]);
        let mut hex = [0u8; 2];
        frame::write_hex_u8(&mut hex, sum);
        buf[CHECKSUM_OFFSET..CHECKSUM_OFFSET + 2].copy_from_slice(&hex);
        buf[FRAME_LEN - 1] = TERMINATOR;

        buf
    }
}
