//! Stroked lines, polygons, arcs and graduation marks.
//!
//! Everything here is built from the handful of primitives on [`Surface`].
//! Wide lines are filled quadrilaterals; arcs are 1° quad strips.
//! Float coordinates truncate toward zero when converted to pixels.

use core::f32::consts::TAU;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use libm::{atan2f, cosf, fabsf, sinf};

use crate::color::{self, BLACK};
use crate::surface::Surface;

/// Angular step used to subdivide arcs (1°).
pub const ARC_STEP: f32 = 0.017_453_292_52;

/// Line end cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEnd {
    /// Squared ends.
    #[default]
    None,
    /// Triangular extension of half the width.
    Sharp,
    /// Discs at both ends.
    Round,
}

/// Color, width and end cap of a stroke.
///
/// Width 0 draws nothing, width 1 is a plain surface line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub color: Rgb565,
    pub width: u16,
    pub end: LineEnd,
}

impl Stroke {
    /// Invisible stroke.
    pub const NONE: Stroke = Stroke::new(BLACK, 0, LineEnd::None);

    #[inline]
    #[must_use]
    pub const fn new(color: Rgb565, width: u16, end: LineEnd) -> Self {
        Self { color, width, end }
    }

    /// One pixel wide stroke with squared ends.
    #[inline]
    #[must_use]
    pub const fn hairline(color: Rgb565) -> Self {
        Self::new(color, 1, LineEnd::None)
    }

    #[inline]
    fn is_visible(&self) -> bool {
        self.width > 0
    }
}

/// Appearance of one kind of graduation mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkStyle {
    pub color: Rgb565,
    pub length: u16,
    pub width: u16,
}

impl MarkStyle {
    pub const NONE: MarkStyle = MarkStyle {
        color: BLACK,
        length: 0,
        width: 0,
    };
}

/// Major and minor graduation mark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradStyle {
    pub major: MarkStyle,
    pub minor: MarkStyle,
    pub end: LineEnd,
}

impl GradStyle {
    pub const NONE: GradStyle = GradStyle {
        major: MarkStyle::NONE,
        minor: MarkStyle::NONE,
        end: LineEnd::None,
    };
}

impl Default for GradStyle {
    fn default() -> Self {
        Self::NONE
    }
}

/// Circular arc: center, radius, start angle and signed sweep in radians.
///
/// A negative sweep runs counter-clockwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpan {
    pub center: Point,
    pub radius: i32,
    pub start: f32,
    pub sweep: f32,
}

#[inline]
pub(crate) fn pt(x: f32, y: f32) -> Point {
    Point::new(x as i32, y as i32)
}

#[inline]
pub(crate) fn polar(center: Point, radius: f32, angle: f32) -> Point {
    pt(
        center.x as f32 + radius * cosf(angle),
        center.y as f32 + radius * sinf(angle),
    )
}

/// Corner points of a `width` wide band along `a`→`b`.
///
/// Returns `(p3, p4, p5, p6)`: p3/p4 on one side, p5/p6 on the other, and the
/// half-width direction components used for end caps.
fn band(a: Point, b: Point, width: u16) -> ([Point; 4], f32, f32) {
    let half = (width / 2) as f32;
    let angle = atan2f((b.y - a.y) as f32, (b.x - a.x) as f32);
    let sin_a = half * sinf(angle);
    let cos_a = half * cosf(angle);
    let (ax, ay, bx, by) = (a.x as f32, a.y as f32, b.x as f32, b.y as f32);

    (
        [
            pt(ax + sin_a, ay - cos_a),
            pt(bx + sin_a, by - cos_a),
            pt(ax - sin_a, ay + cos_a),
            pt(bx - sin_a, by + cos_a),
        ],
        sin_a,
        cos_a,
    )
}

/// Tips of the triangular caps at `a` and `b`.
fn sharp_tips(a: Point, b: Point, sin_a: f32, cos_a: f32) -> (Point, Point) {
    (
        pt(a.x as f32 - cos_a, a.y as f32 - sin_a),
        pt(b.x as f32 + cos_a, b.y as f32 + sin_a),
    )
}

/// Solid stroke with no outline.
pub fn draw_edge<S: Surface>(s: &mut S, a: Point, b: Point, edge: Stroke) -> Result<(), S::Error> {
    match edge.width {
        0 => Ok(()),
        1 => s.draw_line(a, b, edge.color),
        w => {
            let ([p3, p4, p5, p6], sin_a, cos_a) = band(a, b, w);
            s.fill_triangle(p5, p4, p3, edge.color)?;
            s.fill_triangle(p4, p5, p6, edge.color)?;

            match edge.end {
                LineEnd::None => {}
                LineEnd::Sharp => {
                    let (p7, p8) = sharp_tips(a, b, sin_a, cos_a);
                    s.fill_triangle(p3, p7, p5, edge.color)?;
                    s.fill_triangle(p4, p8, p6, edge.color)?;
                }
                LineEnd::Round => {
                    let r = i32::from(w / 2);
                    s.fill_circle(a, r, edge.color)?;
                    s.fill_circle(b, r, edge.color)?;
                }
            }
            Ok(())
        }
    }
}

/// Stroke `a`→`b` with `line`, outlined by `edge`.
pub fn fill_line<S: Surface>(
    s: &mut S,
    a: Point,
    b: Point,
    line: Stroke,
    edge: Stroke,
) -> Result<(), S::Error> {
    if line.width == 1 {
        return s.draw_line(a, b, line.color);
    }
    if line.width == 0 {
        return Ok(());
    }

    let ([p3, p4, p5, p6], sin_a, cos_a) = band(a, b, line.width);

    draw_edge(s, a, b, line)?;

    if edge.is_visible() {
        draw_edge(s, p3, p4, edge)?;
        draw_edge(s, p5, p6, edge)?;
    }

    match line.end {
        LineEnd::None => {
            draw_edge(s, p3, p5, edge)?;
            draw_edge(s, p4, p6, edge)?;
        }
        LineEnd::Sharp => {
            let (p7, p8) = sharp_tips(a, b, sin_a, cos_a);
            s.fill_triangle(p3, p7, p5, line.color)?;
            s.fill_triangle(p4, p8, p6, line.color)?;

            if edge.is_visible() {
                draw_edge(s, p3, p7, edge)?;
                draw_edge(s, p7, p5, edge)?;
                draw_edge(s, p4, p8, edge)?;
                draw_edge(s, p8, p6, edge)?;
            }
        }
        LineEnd::Round => {
            let (lw, ew) = (i32::from(line.width), i32::from(edge.width));
            let outer = (lw + ew) / 2 - 1;
            let inner = (lw - ew) / 2 - 1;

            s.fill_circle(a, outer, edge.color)?;
            s.fill_circle(b, outer, edge.color)?;
            s.fill_circle(a, inner, line.color)?;
            s.fill_circle(b, inner, line.color)?;

            let core = Stroke::new(line.color, line.width.saturating_sub(edge.width), LineEnd::None);
            draw_edge(s, a, b, core)?;
        }
    }
    Ok(())
}

/// Stroke `a`→`b` without an outline.
#[inline]
pub fn draw_line<S: Surface>(s: &mut S, a: Point, b: Point, line: Stroke) -> Result<(), S::Error> {
    fill_line(s, a, b, line, Stroke::NONE)
}

/// Triangle outline.
pub fn draw_triangle<S: Surface>(s: &mut S, pts: [Point; 3], edge: Stroke) -> Result<(), S::Error> {
    fill_triangle(s, pts, None, edge)
}

/// Triangle with optional fill, outlined by `edge`.
pub fn fill_triangle<S: Surface>(
    s: &mut S,
    [p1, p2, p3]: [Point; 3],
    fill: Option<Rgb565>,
    edge: Stroke,
) -> Result<(), S::Error> {
    if let Some(color) = fill {
        s.fill_triangle(p1, p2, p3, color)?;
    }
    draw_line(s, p1, p2, edge)?;
    draw_line(s, p2, p3, edge)?;
    draw_line(s, p3, p1, edge)
}

pub fn draw_quadrangle<S: Surface>(
    s: &mut S,
    pts: [Point; 4],
    edge: Stroke,
) -> Result<(), S::Error> {
    fill_quadrangle(s, pts, None, edge)
}

/// Quadrangle with optional fill. Points go around the perimeter.
pub fn fill_quadrangle<S: Surface>(
    s: &mut S,
    [p1, p2, p3, p4]: [Point; 4],
    fill: Option<Rgb565>,
    edge: Stroke,
) -> Result<(), S::Error> {
    if let Some(color) = fill {
        s.fill_triangle(p1, p2, p3, color)?;
        s.fill_triangle(p3, p4, p1, color)?;
    }
    draw_edge(s, p1, p2, edge)?;
    draw_edge(s, p2, p3, edge)?;
    draw_edge(s, p3, p4, edge)?;
    draw_edge(s, p4, p1, edge)
}

fn rect_corners(origin: Point, width: i32, height: i32) -> [Point; 4] {
    [
        origin,
        Point::new(origin.x + width, origin.y),
        Point::new(origin.x + width, origin.y + height),
        Point::new(origin.x, origin.y + height),
    ]
}

pub fn draw_rectangle<S: Surface>(
    s: &mut S,
    origin: Point,
    width: i32,
    height: i32,
    edge: Stroke,
) -> Result<(), S::Error> {
    fill_quadrangle(s, rect_corners(origin, width, height), None, edge)
}

pub fn fill_rectangle<S: Surface>(
    s: &mut S,
    origin: Point,
    width: i32,
    height: i32,
    fill: Option<Rgb565>,
    edge: Stroke,
) -> Result<(), S::Error> {
    fill_quadrangle(s, rect_corners(origin, width, height), fill, edge)
}

/// Graduation marks across a rectangle, spaced along its longer side.
///
/// `marks` intervals give `|marks| + 1` majors and `|marks|` minors midway
/// between them. Zero draws nothing.
pub fn grad_mark_rectangle<S: Surface>(
    s: &mut S,
    origin: Point,
    width: i32,
    height: i32,
    marks: i16,
    style: &GradStyle,
) -> Result<(), S::Error> {
    if marks == 0 {
        return Ok(());
    }
    let n = i32::from(marks.unsigned_abs());
    let step_v = height / n;
    let step_h = width / n;
    let vertical_run = height.abs() >= width.abs();

    let mark = |s: &mut S, offset: i32, kind: &MarkStyle| {
        let len = i32::from(kind.length);
        let (a, b) = if vertical_run {
            (
                Point::new(origin.x + (width - len) / 2, origin.y + offset),
                Point::new(origin.x + (width + len) / 2, origin.y + offset),
            )
        } else {
            (
                Point::new(origin.x + offset, origin.y + (height - len) / 2),
                Point::new(origin.x + offset, origin.y + (height + len) / 2),
            )
        };
        let line = Stroke::new(kind.color, kind.width, style.end);
        let edge = Stroke::hairline(color::alpha_blend(96, kind.color, BLACK));
        fill_line(s, a, b, line, edge)
    };

    let step = if vertical_run { step_v } else { step_h };
    for j in 0..=n {
        mark(s, j * step, &style.major)?;
    }
    for j in 0..n {
        mark(s, j * step + step / 2, &style.minor)?;
    }
    Ok(())
}

/// Arc band of `line_width` centred on the radius, with optional fill.
///
/// When `edge` is visible the inner and outer rims are stroked, and the two
/// ends are closed unless the arc is a full circle.
pub fn fill_arc<S: Surface>(
    s: &mut S,
    arc: ArcSpan,
    fill: Option<Rgb565>,
    line_width: u16,
    edge: Stroke,
) -> Result<(), S::Error> {
    let lw2 = f32::from(line_width / 2);
    let outer = arc.radius as f32 + lw2;
    let inner = arc.radius as f32 - lw2;
    let (cx, cy) = (arc.center.x as f32, arc.center.y as f32);
    let ccw = arc.sweep < 0.0;
    let sweep = fabsf(arc.sweep);

    let mut first: Option<(Point, Point)> = None;
    let mut last: Option<(Point, Point)> = None;

    let mut j = 0.0f32;
    while j < sweep {
        let theta = arc.start + j;
        let (cos_a, sin_a, cos_b, sin_b) = if ccw {
            (
                -cosf(theta),
                sinf(theta),
                -cosf(theta - ARC_STEP),
                sinf(theta - ARC_STEP),
            )
        } else {
            (
                cosf(theta),
                sinf(theta),
                cosf(theta + ARC_STEP),
                sinf(theta + ARC_STEP),
            )
        };

        let p1 = pt(cx + outer * cos_a, cy + outer * sin_a);
        let p2 = pt(cx + inner * cos_a, cy + inner * sin_a);
        let p3 = pt(cx + outer * cos_b, cy + outer * sin_b);
        let p4 = pt(cx + inner * cos_b, cy + inner * sin_b);

        if let Some(color) = fill {
            s.fill_triangle(p1, p2, p3, color)?;
            s.fill_triangle(p3, p2, p4, color)?;
        }

        if edge.is_visible() {
            draw_edge(s, p1, p3, edge)?;
            draw_edge(s, p2, p4, edge)?;
        }

        first.get_or_insert((p1, p2));
        last = Some((p3, p4));
        j += ARC_STEP;
    }

    if sweep < TAU && edge.is_visible() {
        if let (Some((f1, f2)), Some((l3, l4))) = (first, last) {
            draw_edge(s, f1, f2, edge)?;
            draw_edge(s, l3, l4, edge)?;
        }
    }
    Ok(())
}

/// Solid arc band without rims.
#[inline]
pub fn draw_arc<S: Surface>(
    s: &mut S,
    arc: ArcSpan,
    color: Rgb565,
    line_width: u16,
) -> Result<(), S::Error> {
    fill_arc(s, arc, Some(color), line_width, Stroke::NONE)
}

/// Radial graduation marks centred on the arc radius.
pub fn grad_mark_arc<S: Surface>(
    s: &mut S,
    arc: ArcSpan,
    marks: i16,
    style: &GradStyle,
) -> Result<(), S::Error> {
    if marks == 0 {
        return Ok(());
    }
    let step = arc.sweep / f32::from(marks);
    let n = marks.unsigned_abs();
    let r = arc.radius as f32;

    let mark = |s: &mut S, angle: f32, kind: &MarkStyle| {
        let half = 0.5 * f32::from(kind.length);
        fill_line(
            s,
            polar(arc.center, r - half, angle),
            polar(arc.center, r + half, angle),
            Stroke::new(kind.color, kind.width, style.end),
            Stroke::hairline(BLACK),
        )
    };

    for j in 0..=n {
        mark(s, f32::from(j) * step + arc.start, &style.major)?;
    }
    for j in 0..n {
        mark(s, f32::from(j) * step + arc.start + 0.5 * step, &style.minor)?;
    }
    Ok(())
}
