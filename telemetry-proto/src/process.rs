//! Per-frame post-processing: smoothing, slip and deceleration.

use heapless::Deque;

use crate::record::TelemetryRecord;

/// AOA value a sender uses for "not available".
pub const AOA_UNAVAILABLE: f32 = -100.0;

/// Savitzky–Golay window length for the IAS derivative.
pub const DERIVATIVE_WINDOW: usize = 15;

/// Lateral g that deflects the slip indicator by one full ball.
const SLIP_FULL_SCALE_G: f32 = 0.04;
const SLIP_PIXELS_PER_BALL: f32 = 34.0;
const SLIP_LIMIT: i32 = 99;

/// Smoothing and sampling parameters.
///
/// Alphas are in `0..=1`: `1` holds the old value forever, `0` passes the raw
/// value through.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProcessingConfig {
    pub aoa_alpha: f32,
    pub slip_alpha: f32,
    pub decel_alpha: f32,
    /// Frame rate of the sender, Hz.
    pub sample_rate_hz: f32,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            aoa_alpha: 0.7,
            slip_alpha: 0.7,
            decel_alpha: 0.5,
            sample_rate_hz: 10.0,
        }
    }
}

/// Latest decoded record plus derived values.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlightState {
    record: TelemetryRecord,
    smoothed_aoa: f32,
    smoothed_lateral_g: f32,
    slip: i16,
    decel_rate: f32,
    smoothed_decel_rate: f32,
}

impl FlightState {
    /// Most recent record, with an unavailable AOA replaced by 0.
    #[inline]
    #[must_use]
    pub fn record(&self) -> &TelemetryRecord {
        &self.record
    }

    #[inline]
    #[must_use]
    pub fn smoothed_aoa(&self) -> f32 {
        self.smoothed_aoa
    }

    #[inline]
    #[must_use]
    pub fn smoothed_lateral_g(&self) -> f32 {
        self.smoothed_lateral_g
    }

    /// Slip indicator deflection, pixels, within ±99.
    #[inline]
    #[must_use]
    pub fn slip(&self) -> i16 {
        self.slip
    }

    /// IAS deceleration, knots per second. Positive when slowing.
    #[inline]
    #[must_use]
    pub fn decel_rate(&self) -> f32 {
        self.decel_rate
    }

    #[inline]
    #[must_use]
    pub fn smoothed_decel_rate(&self) -> f32 {
        self.smoothed_decel_rate
    }
}

/// Stateful post-processor. Owns the IAS history.
#[derive(Debug, Clone)]
pub struct PostProcessor {
    config: ProcessingConfig,
    ias_history: Deque<f32, DERIVATIVE_WINDOW>,
}

impl Default for PostProcessor {
    fn default() -> Self {
        Self::new(ProcessingConfig::default())
    }
}

impl PostProcessor {
    #[must_use]
    pub fn new(config: ProcessingConfig) -> Self {
        Self {
            config,
            ias_history: Deque::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Fold a freshly decoded record into `state`.
    pub fn apply(&mut self, state: &mut FlightState, mut record: TelemetryRecord) {
        let cfg = self.config;

        if record.aoa == AOA_UNAVAILABLE {
            record.aoa = 0.0;
        }

        state.smoothed_lateral_g =
            state.smoothed_lateral_g * cfg.slip_alpha + (1.0 - cfg.slip_alpha) * record.lateral_g;
        let slip = (state.smoothed_lateral_g * SLIP_PIXELS_PER_BALL / SLIP_FULL_SCALE_G) as i32;
        state.slip = slip.clamp(-SLIP_LIMIT, SLIP_LIMIT) as i16;

        state.smoothed_aoa =
            state.smoothed_aoa * cfg.aoa_alpha + (1.0 - cfg.aoa_alpha) * record.aoa;

        let derivative = self.ias_derivative(record.ias);
        state.decel_rate = -derivative / cfg.sample_rate_hz;
        state.smoothed_decel_rate = state.decel_rate * cfg.decel_alpha
            + state.smoothed_decel_rate * (1.0 - cfg.decel_alpha);

        state.record = record;
    }

    /// Push a sample and return the first derivative per sample.
    ///
    /// Zero until the window is full.
    fn ias_derivative(&mut self, ias: f32) -> f32 {
        if self.ias_history.is_full() {
            self.ias_history.pop_front();
        }
        // Room was made above
        let _ = self.ias_history.push_back(ias);

        if !self.ias_history.is_full() {
            return 0.0;
        }

        let half = (DERIVATIVE_WINDOW / 2) as f32;
        let norm: f32 = (0..DERIVATIVE_WINDOW)
            .map(|k| {
                let c = k as f32 - half;
                c * c
            })
            .sum();

        self.ias_history
            .iter()
            .enumerate()
            .map(|(k, &y)| (k as f32 - half) * y)
            .sum::<f32>()
            / norm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(ias: f32, aoa: f32, lateral_g: f32) -> TelemetryRecord {
        TelemetryRecord {
            ias,
            aoa,
            lateral_g,
            ..TelemetryRecord::default()
        }
    }

    fn approx(a: f32, b: f32) -> bool {
        let d = a - b;
        d > -1e-3 && d < 1e-3
    }

    #[test]
    fn test_unavailable_aoa_zeroed() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        pp.apply(&mut state, record(100.0, -100.0, 0.0));
        assert_eq!(state.record().aoa, 0.0);
        assert_eq!(state.smoothed_aoa(), 0.0);
    }

    #[test]
    fn test_aoa_smoothing() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        pp.apply(&mut state, record(100.0, 10.0, 0.0));
        assert!(approx(state.smoothed_aoa(), 3.0));
        pp.apply(&mut state, record(100.0, 10.0, 0.0));
        assert!(approx(state.smoothed_aoa(), 5.1));
    }

    #[test]
    fn test_slip_scaled_and_clamped() {
        let mut pp = PostProcessor::new(ProcessingConfig {
            slip_alpha: 0.0,
            ..ProcessingConfig::default()
        });
        let mut state = FlightState::default();

        pp.apply(&mut state, record(100.0, 0.0, 0.02));
        assert_eq!(state.slip(), 17);

        pp.apply(&mut state, record(100.0, 0.0, -0.5));
        assert_eq!(state.slip(), -99);

        pp.apply(&mut state, record(100.0, 0.0, 0.5));
        assert_eq!(state.slip(), 99);
    }

    #[test]
    fn test_derivative_zero_until_window_full() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        for i in 0..DERIVATIVE_WINDOW - 1 {
            pp.apply(&mut state, record(100.0 - i as f32, 0.0, 0.0));
            assert_eq!(state.decel_rate(), 0.0);
        }
    }

    #[test]
    fn test_constant_deceleration() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        // IAS drops 1 kt per frame at 10 Hz
        for i in 0..DERIVATIVE_WINDOW + 5 {
            pp.apply(&mut state, record(120.0 - i as f32, 0.0, 0.0));
        }
        assert!(approx(state.decel_rate(), 0.1));
    }

    #[test]
    fn test_steady_airspeed_has_no_decel() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        for _ in 0..DERIVATIVE_WINDOW * 2 {
            pp.apply(&mut state, record(95.0, 0.0, 0.0));
        }
        assert!(approx(state.decel_rate(), 0.0));
        assert!(approx(state.smoothed_decel_rate(), 0.0));
    }

    #[test]
    fn test_decel_smoothing() {
        let mut pp = PostProcessor::default();
        let mut state = FlightState::default();
        for i in 0..DERIVATIVE_WINDOW {
            pp.apply(&mut state, record(120.0 - i as f32, 0.0, 0.0));
        }
        // First non-zero derivative, smoothed from 0 with alpha 0.5
        assert!(approx(state.decel_rate(), 0.1));
        assert!(approx(state.smoothed_decel_rate(), 0.05));
    }
}
