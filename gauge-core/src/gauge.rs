//! Bar and arc gauges.
//!
//! A [`Gauge`] owns its pointer and range slots and its graduation style.
//! The application fills the slots between refreshes, then calls one of
//! [`Gauge::draw_vertical`], [`Gauge::draw_horizontal`] or
//! [`Gauge::draw_arc`]. Drawing never fails on bad values: out-of-range
//! pointers and ranges are pinned to the axis ends.

use core::f32::consts::PI;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;

use crate::color::{self, BLACK, DARK_GREY, LIGHT_GREY, WHITE};
use crate::marker::{self, Dial, MarkerKind};
use crate::primitives::{self, fill_line, polar, ArcSpan, GradStyle, LineEnd, MarkStyle, Stroke};
use crate::scale::{ArcScale, GradMarks, LinearScale};
use crate::surface::Surface;

/// Pointer slots per gauge.
pub const NUM_POINTERS: usize = 8;
/// Range slots per gauge.
pub const NUM_RANGES: usize = 5;

const DEG_TO_RAD: f32 = PI / 180.0;

/// Stroke of automatic graduation marks.
const AUTO_MARK: Stroke = Stroke::new(WHITE, 4, LineEnd::None);

/// Gauge configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GaugeError {
    /// Slot index past the end of the slot array.
    SlotOutOfRange,
}

/// One value indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pointer {
    pub value: i16,
    pub kind: MarkerKind,
    pub color: Rgb565,
    pub tag: Option<char>,
}

impl Pointer {
    pub const EMPTY: Pointer = Pointer {
        value: 0,
        kind: MarkerKind::None,
        color: BLACK,
        tag: None,
    };
}

impl Default for Pointer {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A colored band over part of the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub valid: bool,
    pub top: i16,
    pub bottom: i16,
    pub color: Rgb565,
}

impl Range {
    pub const EMPTY: Range = Range {
        valid: false,
        top: 0,
        bottom: 0,
        color: BLACK,
    };
}

impl Default for Range {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Placement of a vertical or horizontal bar gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearLayout {
    /// Bottom-left corner for a vertical gauge, top-left for a horizontal one.
    pub origin: Point,
    /// Length of the axis in pixels.
    pub size: i32,
    /// Thickness of the bar in pixels.
    pub width: i32,
    pub max: i16,
    pub min: i16,
    /// Signed graduation count, see [`GradMarks`].
    pub grad_marks: i16,
}

/// Placement of an arc gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArcLayout {
    pub center: Point,
    /// Outer radius.
    pub size: i32,
    /// Radial thickness of the band.
    pub width: i32,
    pub max: i16,
    pub min: i16,
    /// Angle of the axis minimum, in degrees, measured clockwise from +x.
    pub start_deg: i16,
    /// Arc length in degrees. Only the magnitude is used.
    pub sweep_deg: i16,
    /// Values grow clockwise when set; otherwise the dial is mirrored.
    pub clockwise: bool,
    pub grad_marks: i16,
}

/// Pointer, range and graduation state for one gauge widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gauge {
    pointers: [Pointer; NUM_POINTERS],
    ranges: [Range; NUM_RANGES],
    grad_marks: i16,
    grad_style: GradStyle,
    top_datum: Point,
    bottom_datum: Point,
}

impl Default for Gauge {
    fn default() -> Self {
        Self::new()
    }
}

impl Gauge {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            pointers: [Pointer::EMPTY; NUM_POINTERS],
            ranges: [Range::EMPTY; NUM_RANGES],
            grad_marks: 0,
            grad_style: GradStyle::NONE,
            top_datum: Point::new(0, 0),
            bottom_datum: Point::new(0, 0),
        }
    }

    /// Configure pointer `slot` (0-based).
    pub fn set_pointer(
        &mut self,
        slot: usize,
        value: i16,
        kind: MarkerKind,
        color: Rgb565,
        tag: Option<char>,
    ) -> Result<(), GaugeError> {
        let p = self.pointers.get_mut(slot).ok_or(GaugeError::SlotOutOfRange)?;
        *p = Pointer {
            value,
            kind,
            color,
            tag,
        };
        Ok(())
    }

    pub fn clear_pointers(&mut self) {
        self.pointers = [Pointer::EMPTY; NUM_POINTERS];
    }

    /// Configure range `slot` (0-based).
    pub fn set_range(
        &mut self,
        slot: usize,
        valid: bool,
        top: i16,
        bottom: i16,
        color: Rgb565,
    ) -> Result<(), GaugeError> {
        let r = self.ranges.get_mut(slot).ok_or(GaugeError::SlotOutOfRange)?;
        *r = Range {
            valid,
            top,
            bottom,
            color,
        };
        Ok(())
    }

    pub fn clear_ranges(&mut self) {
        self.ranges = [Range::EMPTY; NUM_RANGES];
    }

    #[inline]
    #[must_use]
    pub fn pointers(&self) -> &[Pointer; NUM_POINTERS] {
        &self.pointers
    }

    #[inline]
    #[must_use]
    pub fn ranges(&self) -> &[Range; NUM_RANGES] {
        &self.ranges
    }

    /// Style used by explicit (`grad_marks < -1`) graduations.
    pub fn set_grad_style(&mut self, major: MarkStyle, minor: MarkStyle, end: LineEnd) {
        self.grad_style = GradStyle { major, minor, end };
    }

    /// Mark count used by [`Gauge::grad_mark_rectangle`] and [`Gauge::grad_mark_arc`].
    pub fn set_grad_marks(&mut self, marks: i16) {
        self.grad_marks = marks;
    }

    pub fn clear_grad_marks(&mut self) {
        self.grad_marks = 0;
        self.grad_style = GradStyle::NONE;
    }

    #[inline]
    #[must_use]
    pub fn grad_style(&self) -> &GradStyle {
        &self.grad_style
    }

    /// Anchor at the axis maximum, recorded by the last draw.
    #[inline]
    #[must_use]
    pub fn top_datum(&self) -> Point {
        self.top_datum
    }

    /// Anchor at the axis minimum, recorded by the last draw.
    #[inline]
    #[must_use]
    pub fn bottom_datum(&self) -> Point {
        self.bottom_datum
    }

    /// Free-standing graduations across a rectangle, using the stored count
    /// and style.
    pub fn grad_mark_rectangle<S: Surface>(
        &self,
        s: &mut S,
        origin: Point,
        width: i32,
        height: i32,
    ) -> Result<(), S::Error> {
        primitives::grad_mark_rectangle(s, origin, width, height, self.grad_marks, &self.grad_style)
    }

    /// Free-standing graduations along an arc, using the stored count and style.
    pub fn grad_mark_arc<S: Surface>(&self, s: &mut S, arc: ArcSpan) -> Result<(), S::Error> {
        primitives::grad_mark_arc(s, arc, self.grad_marks, &self.grad_style)
    }

    fn auto_mark_edge() -> Stroke {
        Stroke::hairline(color::alpha_blend(96, BLACK, LIGHT_GREY))
    }

    fn explicit_mark(&self, kind: &MarkStyle) -> Option<Stroke> {
        (kind.length != 0).then(|| Stroke::new(kind.color, kind.width, self.grad_style.end))
    }

    /// Draw a vertical bar gauge growing upward from `layout.origin`.
    pub fn draw_vertical<S: Surface>(
        &mut self,
        s: &mut S,
        layout: &LinearLayout,
    ) -> Result<(), S::Error> {
        let scale = LinearScale::new(layout.size, layout.max, layout.min);
        let (min_px, max_px) = (scale.min_px(), scale.max_px());
        let w = layout.width;
        let x0 = layout.origin.x;
        // Shift so the axis minimum lands on the origin
        let y0 = layout.origin.y + min_px;

        let mut any_range = false;
        for r in self.ranges.iter().filter(|r| r.valid) {
            let top = scale.scale(r.top).min(max_px);
            let bottom = scale.scale(r.bottom).max(min_px);
            let corner = Point::new(x0, y0 - top);
            s.fill_rect(corner, w, top - bottom, r.color)?;
            s.draw_rect(corner, w, top - bottom, BLACK)?;
            any_range = true;
        }
        if any_range {
            s.draw_rect(Point::new(x0, y0 - max_px), w, max_px - min_px, DARK_GREY)?;
        }

        let across = |s: &mut S, y: i32, from: i32, to: i32, line: Stroke, edge: Stroke| {
            fill_line(s, Point::new(from, y0 - y), Point::new(to, y0 - y), line, edge)
        };

        match GradMarks::from_count(layout.grad_marks) {
            GradMarks::Off => {}
            GradMarks::Auto(n) => {
                let edge = Self::auto_mark_edge();
                for y in scale.major_ticks(n) {
                    across(s, y, x0, x0 + w - 1, AUTO_MARK, edge)?;
                }
                for y in scale.minor_ticks(n) {
                    across(s, y, x0 + w / 4, x0 + 3 * w / 4 - 1, AUTO_MARK, edge)?;
                }
            }
            GradMarks::Explicit(n) => {
                let edge = Stroke::hairline(DARK_GREY);
                let style = self.grad_style;
                if let Some(line) = self.explicit_mark(&style.major) {
                    let len = i32::from(style.major.length);
                    for y in scale.major_ticks(n) {
                        across(s, y, x0 + (w - len) / 2, x0 + (w + len) / 2, line, edge)?;
                    }
                }
                if let Some(line) = self.explicit_mark(&style.minor) {
                    let len = i32::from(style.minor.length);
                    for y in scale.minor_ticks(n) {
                        across(s, y, x0 + (w - len) / 2, x0 + (w + len) / 2, line, edge)?;
                    }
                }
            }
        }

        let origin = Point::new(x0, y0);
        for p in &self.pointers {
            let px = scale.clamp(scale.scale(p.value));
            marker::draw_vertical(s, p.kind, origin, w, px, p.tag, p.color)?;
        }

        self.top_datum = Point::new(x0 + w / 2, y0 - min_px - layout.size);
        self.bottom_datum = Point::new(x0 + w / 2, y0 - min_px);
        Ok(())
    }

    /// Draw a horizontal bar gauge growing rightward from `layout.origin`.
    pub fn draw_horizontal<S: Surface>(
        &mut self,
        s: &mut S,
        layout: &LinearLayout,
    ) -> Result<(), S::Error> {
        let scale = LinearScale::new(layout.size, layout.max, layout.min);
        let (min_px, max_px) = (scale.min_px(), scale.max_px());
        let w = layout.width;
        let x0 = layout.origin.x - min_px;
        let y0 = layout.origin.y;

        let mut any_range = false;
        for r in self.ranges.iter().filter(|r| r.valid) {
            let top = scale.scale(r.top).min(max_px);
            let bottom = scale.scale(r.bottom).max(min_px);
            let corner = Point::new(x0 + bottom, y0);
            s.fill_rect(corner, top - bottom, w, r.color)?;
            s.draw_rect(corner, top - bottom, w, BLACK)?;
            any_range = true;
        }
        if any_range {
            s.draw_rect(Point::new(x0 + min_px, y0), max_px - min_px, w, DARK_GREY)?;
        }

        let down = |s: &mut S, x: i32, from: i32, to: i32, line: Stroke, edge: Stroke| {
            fill_line(s, Point::new(x0 + x, from), Point::new(x0 + x, to), line, edge)
        };

        match GradMarks::from_count(layout.grad_marks) {
            GradMarks::Off => {}
            GradMarks::Auto(n) => {
                let edge = Self::auto_mark_edge();
                for x in scale.major_ticks(n) {
                    down(s, x, y0, y0 + w - 1, AUTO_MARK, edge)?;
                }
                for x in scale.minor_ticks(n) {
                    down(s, x, y0 + w / 4, y0 + 3 * w / 4 - 1, AUTO_MARK, edge)?;
                }
            }
            GradMarks::Explicit(n) => {
                let edge = Stroke::hairline(DARK_GREY);
                let style = self.grad_style;
                if let Some(line) = self.explicit_mark(&style.major) {
                    let len = i32::from(style.major.length);
                    for x in scale.major_ticks(n) {
                        down(s, x, y0 + (w - len) / 2, y0 + (w + len) / 2, line, edge)?;
                    }
                }
                if let Some(line) = self.explicit_mark(&style.minor) {
                    let len = i32::from(style.minor.length);
                    for x in scale.minor_ticks(n) {
                        down(s, x, y0 + (w - len) / 2, y0 + (w + len) / 2, line, edge)?;
                    }
                }
            }
        }

        let origin = Point::new(x0, y0);
        for p in &self.pointers {
            let px = scale.clamp(scale.scale(p.value));
            marker::draw_horizontal(s, p.kind, origin, w, px, p.tag, p.color)?;
        }

        self.top_datum = Point::new(x0 - min_px + layout.size, y0 + w / 2);
        self.bottom_datum = Point::new(x0 + min_px, y0 + w / 2);
        Ok(())
    }

    /// Draw an arc gauge.
    ///
    /// Counter-clockwise dials are the clockwise dial mirrored about the
    /// vertical axis through the center: every angle `a` becomes `PI - a`.
    pub fn draw_arc<S: Surface>(&mut self, s: &mut S, layout: &ArcLayout) -> Result<(), S::Error> {
        let start = f32::from(layout.start_deg) * DEG_TO_RAD;
        let sweep = f32::from(layout.sweep_deg.unsigned_abs()) * DEG_TO_RAD;
        let scale = ArcScale::new(sweep, layout.max, layout.min);
        let theta = start - scale.min_rad();
        let size = layout.size as f32;
        let w = layout.width as f32;
        let mid_radius = layout.size - layout.width / 2;
        let clockwise = layout.clockwise;
        let dial_angle = |a: f32| if clockwise { a } else { PI - a };

        // A clockwise span [a, a + len] mirrors to [PI - a - len, PI - a]
        let band = |from: f32, len: f32| ArcSpan {
            center: layout.center,
            radius: mid_radius,
            start: if clockwise { from } else { PI - from - len },
            sweep: len,
        };
        let band_width = u16::try_from(layout.width.max(0)).unwrap_or(u16::MAX);

        let mut any_range = false;
        for r in self.ranges.iter().filter(|r| r.valid) {
            let (a, b) = (scale.scale(r.top), scale.scale(r.bottom));
            let hi = a.max(b).min(scale.max_rad());
            let lo = a.min(b).max(scale.min_rad());
            let len = (hi - lo).max(0.0);
            primitives::fill_arc(
                s,
                band(theta + lo, len),
                Some(r.color),
                band_width,
                Stroke::hairline(color::alpha_blend(96, BLACK, r.color)),
            )?;
            any_range = true;
        }
        if any_range {
            primitives::fill_arc(s, band(start, sweep), None, band_width, Stroke::hairline(DARK_GREY))?;
        }

        let radial = |s: &mut S, a: f32, inner: f32, line: Stroke, edge: Stroke| {
            let angle = dial_angle(start + a);
            fill_line(
                s,
                polar(layout.center, inner, angle),
                polar(layout.center, size, angle),
                line,
                edge,
            )
        };

        match GradMarks::from_count(layout.grad_marks) {
            GradMarks::Off => {}
            GradMarks::Auto(n) => {
                let edge = Self::auto_mark_edge();
                for a in scale.major_ticks(n) {
                    radial(s, a, size - 1.25 * w, AUTO_MARK, edge)?;
                }
                for a in scale.minor_ticks(n) {
                    radial(s, a, size - 0.75 * w, AUTO_MARK, edge)?;
                }
            }
            GradMarks::Explicit(n) => {
                let edge = Stroke::hairline(DARK_GREY);
                let style = self.grad_style;
                if let Some(line) = self.explicit_mark(&style.major) {
                    let inner = size - f32::from(style.major.length);
                    for a in scale.major_ticks(n) {
                        radial(s, a, inner, line, edge)?;
                    }
                }
                if let Some(line) = self.explicit_mark(&style.minor) {
                    let inner = size - f32::from(style.minor.length);
                    for a in scale.minor_ticks(n) {
                        radial(s, a, inner, line, edge)?;
                    }
                }
            }
        }

        let dial = Dial {
            center: layout.center,
            size,
            width: w,
        };
        for p in &self.pointers {
            let rad = scale.clamp(scale.scale(p.value));
            marker::draw_arc(s, p.kind, &dial, dial_angle(rad + theta), p.tag, p.color)?;
        }

        let mid = mid_radius as f32;
        self.top_datum = polar(layout.center, mid, dial_angle(start + sweep));
        self.bottom_datum = polar(layout.center, mid, dial_angle(start));
        Ok(())
    }
}
