//! Instrument panel: AOA dial, airspeed tape, G meter and slip ball.
//!
//! [`Panel::update`] moves the pointers and AOA bands from the latest
//! [`FlightState`]; [`Panel::render`] draws everything through any
//! [`Surface`].

use defmt::warn;
use embedded_graphics::prelude::Point;
use gauge_core::color::{BLACK, CYAN, GREEN, LIGHT_GREY, RED, WHITE, YELLOW};
use gauge_core::{
    draw_numerals, draw_readout, Datum, Gauge, GaugeError, LineEnd, MarkStyle, MarkerKind,
    NumeralStyle, Stroke, Surface, READOUT_LEN, READOUT_OVERFLOW,
};
use libm::roundf;
use telemetry_proto::FlightState;

use crate::config::{AOA_ARC, G_METER, IAS_TAPE, SLIP_BAR};

/// Slip bar half-width of one ball, in slip units.
const BALL_HALF_WIDTH: i16 = 17;

const READOUT: NumeralStyle = NumeralStyle {
    cell_width: 10,
    cell_height: 18,
    roll: 0,
    datum: Datum::MiddleCenter,
    stroke: Stroke::new(WHITE, 2, LineEnd::Round),
};

const SMALL_READOUT: NumeralStyle = NumeralStyle {
    cell_width: 6,
    cell_height: 10,
    roll: 0,
    datum: Datum::BottomCenter,
    stroke: Stroke::hairline(WHITE),
};

/// Value in tenths, saturating at the `i16` range.
#[inline]
fn tenths(value: f32) -> i16 {
    roundf(value * 10.0) as i16
}

/// Latest numbers shown under the gauges.
#[derive(Debug, Clone, Copy)]
struct Readouts {
    aoa: f32,
    ias: f32,
    vertical_g: f32,
    decel: f32,
}

pub struct Panel {
    aoa: Gauge,
    ias: Gauge,
    g_meter: Gauge,
    slip: Gauge,
    readouts: Option<Readouts>,
}

impl Panel {
    /// Build the panel with its fixed ranges and graduation styles.
    pub fn new() -> Result<Self, GaugeError> {
        let mut g_meter = Gauge::new();
        g_meter.set_grad_style(
            MarkStyle {
                color: WHITE,
                length: 14,
                width: 2,
            },
            MarkStyle {
                color: LIGHT_GREY,
                length: 6,
                width: 1,
            },
            LineEnd::None,
        );
        g_meter.set_range(0, true, G_METER.max, 38, RED)?;
        g_meter.set_range(1, true, 0, G_METER.min, YELLOW)?;

        let mut slip = Gauge::new();
        slip.set_range(0, true, BALL_HALF_WIDTH, -BALL_HALF_WIDTH, LIGHT_GREY)?;

        Ok(Self {
            aoa: Gauge::new(),
            ias: Gauge::new(),
            g_meter,
            slip,
            readouts: None,
        })
    }

    /// Move pointers and the AOA bands to `state`.
    pub fn update(&mut self, state: &FlightState) -> Result<(), GaugeError> {
        let rec = state.record();
        let tones = tenths(rec.tones_on_aoa);
        let fast = tenths(rec.fast_aoa);
        let slow = tenths(rec.slow_aoa);
        let stall = tenths(rec.stall_warn_aoa);

        // Bands only make sense while the setpoints are ordered
        self.aoa.set_range(0, fast > tones, fast, tones, CYAN)?;
        self.aoa.set_range(1, slow > fast, slow, fast, GREEN)?;
        self.aoa.set_range(2, stall > slow, stall, slow, YELLOW)?;
        self.aoa.set_range(3, AOA_ARC.max > stall, AOA_ARC.max, stall, RED)?;

        self.aoa
            .set_pointer(0, tenths(state.smoothed_aoa()), MarkerKind::Needle, WHITE, None)?;
        self.ias
            .set_pointer(0, roundf(rec.ias) as i16, MarkerKind::ArrowFar, WHITE, None)?;
        self.g_meter
            .set_pointer(0, tenths(rec.vertical_g), MarkerKind::LongBar, WHITE, None)?;
        self.slip
            .set_pointer(0, state.slip(), MarkerKind::Dot, WHITE, None)?;

        self.readouts = Some(Readouts {
            aoa: state.smoothed_aoa(),
            ias: rec.ias,
            vertical_g: rec.vertical_g,
            decel: state.smoothed_decel_rate(),
        });
        Ok(())
    }

    /// Drop all pointers and readouts until the next update.
    pub fn mark_stale(&mut self) {
        self.aoa.clear_pointers();
        self.ias.clear_pointers();
        self.g_meter.clear_pointers();
        self.slip.clear_pointers();
        self.readouts = None;
    }

    /// Draw the whole panel. The caller clears the surface first.
    pub fn render<S: Surface>(&mut self, s: &mut S) -> Result<(), S::Error> {
        self.aoa.draw_arc(s, &AOA_ARC)?;
        self.ias.draw_vertical(s, &IAS_TAPE)?;
        self.g_meter.draw_vertical(s, &G_METER)?;
        self.slip.draw_horizontal(s, &SLIP_BAR)?;

        let aoa_at = AOA_ARC.center + Point::new(0, 62);
        let decel_at = AOA_ARC.center + Point::new(0, 96);
        let ias_at = self.ias.top_datum() - Point::new(0, 6);
        let g_at = self.g_meter.top_datum() - Point::new(0, 6);

        match self.readouts {
            Some(r) => {
                let fits = draw_readout(s, format_args!("{:.1}", r.aoa), aoa_at, &READOUT)?
                    & draw_readout(s, format_args!("{:.1}", r.decel), decel_at, &SMALL_READOUT)?
                    & draw_readout(s, format_args!("{}", roundf(r.ias) as i32), ias_at, &SMALL_READOUT)?
                    & draw_readout(s, format_args!("{:.1}", r.vertical_g), g_at, &SMALL_READOUT)?;
                if !fits {
                    warn!("Readout too long for {} characters", READOUT_LEN);
                }
            }
            None => {
                let stale = NumeralStyle {
                    stroke: Stroke::new(RED, 2, LineEnd::Round),
                    ..READOUT
                };
                draw_numerals(s, READOUT_OVERFLOW, aoa_at, &stale)?;
            }
        }

        // Hub over the needle base
        s.fill_circle(AOA_ARC.center, 6, LIGHT_GREY)?;
        s.draw_circle(AOA_ARC.center, 6, BLACK)
    }
}
