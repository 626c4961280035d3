//! Pointer marker shapes.
//!
//! One table per gauge orientation maps a [`MarkerKind`] to its shape. The
//! same kind reads naturally on every orientation: "near" markers sit left of
//! a vertical bar, above a horizontal bar, or outside an arc.

use core::f32::consts::FRAC_PI_2;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::Point;
use libm::{cosf, sinf};

use crate::color::{self, BLACK, WHITE};
use crate::primitives::{self, polar, pt, LineEnd, Stroke};
use crate::surface::Surface;

/// Marker shape for a pointer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MarkerKind {
    /// Draws nothing.
    #[default]
    None = 0,
    /// Arrow on the left/top/outside, pointing at the scale.
    ArrowNear = 1,
    /// Arrow on the right/bottom/inside.
    ArrowFar = 2,
    /// Bar spanning the gauge width.
    LongBar = 3,
    /// Bar across the middle of the gauge width.
    ShortBar = 4,
    /// Notched bug on the left/top/outside.
    BugNear = 5,
    /// Notched bug on the right/bottom/inside.
    BugFar = 6,
    Dot = 7,
    /// Wedge from the dial center. Arc gauges only.
    Needle = 8,
    /// Radial bar with pointed ends. Arc gauges only.
    Index = 9,
}

impl MarkerKind {
    /// Map a numeric marker code. Unknown codes map to [`MarkerKind::None`].
    #[must_use]
    pub const fn from_u8(code: u8) -> Self {
        match code {
            1 => MarkerKind::ArrowNear,
            2 => MarkerKind::ArrowFar,
            3 => MarkerKind::LongBar,
            4 => MarkerKind::ShortBar,
            5 => MarkerKind::BugNear,
            6 => MarkerKind::BugFar,
            7 => MarkerKind::Dot,
            8 => MarkerKind::Needle,
            9 => MarkerKind::Index,
            _ => MarkerKind::None,
        }
    }
}

impl From<u8> for MarkerKind {
    fn from(code: u8) -> Self {
        Self::from_u8(code)
    }
}

/// Tag character with a two-pixel shadow underneath.
fn label<S: Surface>(
    s: &mut S,
    tag: Option<char>,
    at: Point,
    shadow: Rgb565,
    fill: Rgb565,
) -> Result<(), S::Error> {
    if let Some(ch) = tag {
        s.draw_glyph(ch, at - Point::new(1, 1), shadow)?;
        s.draw_glyph(ch, at + Point::new(1, 1), shadow)?;
        s.draw_glyph(ch, at, fill)?;
    }
    Ok(())
}

/// Outlined disc with the tag drawn on top in black.
fn dot<S: Surface>(
    s: &mut S,
    center: Point,
    radius: i32,
    tag: Option<char>,
    color: Rgb565,
) -> Result<(), S::Error> {
    s.fill_circle(center, radius, color)?;
    s.draw_circle(center, radius, BLACK)?;
    if let Some(ch) = tag {
        s.draw_glyph(ch, center, BLACK)?;
    }
    Ok(())
}

/// Filled rectangle with a black border.
fn bar<S: Surface>(
    s: &mut S,
    top_left: Point,
    width: i32,
    height: i32,
    color: Rgb565,
) -> Result<(), S::Error> {
    s.fill_rect(top_left, width, height, color)?;
    s.draw_rect(top_left, width, height, BLACK)
}

/// Square bug `p1 p2 p3 p4` with a black notch `p7 p8 p9` cut into the
/// `p3`-`p4` side.
fn bug<S: Surface>(s: &mut S, p: [Point; 9], color: Rgb565) -> Result<(), S::Error> {
    let [p1, p2, p3, p4, _, _, p7, p8, p9] = p;
    s.fill_triangle(p1, p3, p4, color)?;
    s.fill_triangle(p2, p4, p1, color)?;
    s.fill_triangle(p8, p9, p7, BLACK)?;
    s.draw_line(p1, p2, BLACK)
}

fn arrow<S: Surface>(s: &mut S, tip: [Point; 3], color: Rgb565) -> Result<(), S::Error> {
    primitives::fill_triangle(s, tip, Some(color), Stroke::new(BLACK, 2, LineEnd::Sharp))
}

/// Draw a marker on a vertical bar gauge.
///
/// `origin` is the gauge's left edge at logical zero and `pointer` the
/// clamped pixel offset above it.
pub fn draw_vertical<S: Surface>(
    s: &mut S,
    kind: MarkerKind,
    origin: Point,
    width: i32,
    pointer: i32,
    tag: Option<char>,
    color: Rgb565,
) -> Result<(), S::Error> {
    let (x0, w) = (origin.x, width);
    let y = origin.y - pointer;

    match kind {
        MarkerKind::ArrowNear => {
            arrow(
                s,
                [
                    Point::new(x0 + w / 2, y),
                    Point::new(x0 - w / 2, y - w / 3),
                    Point::new(x0 - w / 2, y + w / 3),
                ],
                color,
            )?;
            label(s, tag, Point::new(x0 - w, y), BLACK, color)
        }
        MarkerKind::ArrowFar => {
            arrow(
                s,
                [
                    Point::new(x0 + w / 2, y),
                    Point::new(x0 + 3 * w / 2, y - w / 3),
                    Point::new(x0 + 3 * w / 2, y + w / 3),
                ],
                color,
            )?;
            label(s, tag, Point::new(x0 + 2 * w, y), BLACK, color)
        }
        MarkerKind::LongBar => {
            bar(s, Point::new(x0 - w / 4, y - w / 8), 3 * w / 2, w / 4, color)?;
            label(s, tag, Point::new(x0 + w / 2, y), WHITE, BLACK)
        }
        MarkerKind::ShortBar => {
            bar(s, Point::new(x0 + w / 8, y - w / 8), 3 * w / 4, w / 4, color)?;
            label(s, tag, Point::new(x0 + w / 2, y), WHITE, BLACK)
        }
        MarkerKind::BugNear => {
            bug(s, side_bug(x0, y, -w / 2, w), color)?;
            label(s, tag, Point::new(x0 - w, y), BLACK, color)
        }
        MarkerKind::BugFar => {
            bug(s, side_bug(x0 + w, y, w / 2, w), color)?;
            label(s, tag, Point::new(x0 + 2 * w, y), BLACK, color)
        }
        MarkerKind::Dot => dot(s, Point::new(x0 + w / 2, y), w / 5, tag, color),
        MarkerKind::None | MarkerKind::Needle | MarkerKind::Index => Ok(()),
    }
}

/// Bug standing on a vertical line at `x5`, extending by `depth` in x.
fn side_bug(x5: i32, y5: i32, depth: i32, w: i32) -> [Point; 9] {
    let x6 = x5 + depth;
    [
        Point::new(x5, y5 - w / 2),
        Point::new(x5, y5 + w / 2),
        Point::new(x6, y5 - w / 2),
        Point::new(x6, y5 + w / 2),
        Point::new(x5, y5),
        Point::new(x6, y5),
        Point::new(x5 + depth / 2, y5),
        Point::new(x6, y5 - w / 4),
        Point::new(x6, y5 + w / 4),
    ]
}

/// Bug standing on a horizontal line at `y5`, extending by `depth` in y.
fn end_bug(x5: i32, y5: i32, depth: i32, w: i32) -> [Point; 9] {
    let y6 = y5 + depth;
    [
        Point::new(x5 - w / 2, y5),
        Point::new(x5 + w / 2, y5),
        Point::new(x5 - w / 2, y6),
        Point::new(x5 + w / 2, y6),
        Point::new(x5, y5),
        Point::new(x5, y6),
        Point::new(x5, y5 + depth / 2),
        Point::new(x5 - w / 4, y6),
        Point::new(x5 + w / 4, y6),
    ]
}

/// Draw a marker on a horizontal bar gauge.
///
/// `origin` is the gauge's top edge at logical zero and `pointer` the
/// clamped pixel offset to the right of it.
pub fn draw_horizontal<S: Surface>(
    s: &mut S,
    kind: MarkerKind,
    origin: Point,
    width: i32,
    pointer: i32,
    tag: Option<char>,
    color: Rgb565,
) -> Result<(), S::Error> {
    let (y0, w) = (origin.y, width);
    let x = origin.x + pointer;

    match kind {
        MarkerKind::ArrowNear => {
            arrow(
                s,
                [
                    Point::new(x, y0 + w / 2),
                    Point::new(x - w / 3, y0 - w / 2),
                    Point::new(x + w / 3, y0 - w / 2),
                ],
                color,
            )?;
            label(s, tag, Point::new(x, y0 - w), BLACK, color)
        }
        MarkerKind::ArrowFar => {
            arrow(
                s,
                [
                    Point::new(x, y0 + w / 2),
                    Point::new(x - w / 3, y0 + 3 * w / 2),
                    Point::new(x + w / 3, y0 + 3 * w / 2),
                ],
                color,
            )?;
            label(s, tag, Point::new(x, y0 + 2 * w), BLACK, color)
        }
        MarkerKind::LongBar => {
            bar(s, Point::new(x - w / 8, y0 - w / 4), w / 4, 3 * w / 2, color)?;
            label(s, tag, Point::new(x, y0 + w / 2), WHITE, BLACK)
        }
        MarkerKind::ShortBar => {
            bar(s, Point::new(x - w / 8, y0 + w / 8), w / 4, 3 * w / 4, color)?;
            label(s, tag, Point::new(x, y0 + w / 2), WHITE, BLACK)
        }
        MarkerKind::BugNear => {
            bug(s, end_bug(x, y0, -w / 2, w), color)?;
            label(s, tag, Point::new(x, y0 - w), BLACK, color)
        }
        MarkerKind::BugFar => {
            bug(s, end_bug(x, y0 + w, w / 2, w), color)?;
            label(s, tag, Point::new(x, y0 + 2 * w), BLACK, color)
        }
        MarkerKind::Dot => dot(s, Point::new(x, y0 + w / 2), w / 5, tag, color),
        MarkerKind::None | MarkerKind::Needle | MarkerKind::Index => Ok(()),
    }
}

/// Dial geometry shared by arc markers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dial {
    pub center: Point,
    /// Outer radius of the scale band.
    pub size: f32,
    /// Radial width of the scale band.
    pub width: f32,
}

impl Dial {
    /// Label anchor at `radius` along `angle`, offset truncated to whole pixels.
    fn anchor(&self, radius: f32, angle: f32) -> Point {
        self.center + Point::new((radius * cosf(angle)) as i32, (radius * sinf(angle)) as i32)
    }
}

/// Point `d` along the tangent at `base`. Positive `d` turns counter-clockwise.
#[inline]
fn tangent(base: (f32, f32), d: f32, sin_a: f32, cos_a: f32) -> (f32, f32) {
    (base.0 + d * sin_a, base.1 - d * cos_a)
}

#[inline]
fn radial(dial: &Dial, r: f32, sin_a: f32, cos_a: f32) -> (f32, f32) {
    (dial.center.x as f32 + r * cos_a, dial.center.y as f32 + r * sin_a)
}

#[inline]
fn px(p: (f32, f32)) -> Point {
    pt(p.0, p.1)
}

/// Arrow whose base is centred at radius `base` and whose tip is at `tip`.
fn radial_arrow<S: Surface>(
    s: &mut S,
    dial: &Dial,
    base: f32,
    tip: f32,
    angle: f32,
    color: Rgb565,
) -> Result<(), S::Error> {
    let (sin_a, cos_a) = (sinf(angle), cosf(angle));
    let half = 0.33 * dial.width;
    let p1 = radial(dial, base, sin_a, cos_a);
    let p4 = px(radial(dial, tip, sin_a, cos_a));
    let p2 = px(tangent(p1, half, sin_a, cos_a));
    let p3 = px(tangent(p1, -half, sin_a, cos_a));

    s.fill_triangle(p4, p3, p2, color)?;
    s.draw_triangle(p4, p3, p2, BLACK)
}

/// Radial bug: flat side at `flat`, notched side at `notched`.
fn radial_bug<S: Surface>(
    s: &mut S,
    dial: &Dial,
    flat: f32,
    notched: f32,
    angle: f32,
    color: Rgb565,
) -> Result<(), S::Error> {
    let (sin_a, cos_a) = (sinf(angle), cosf(angle));
    let (half, quarter) = (0.5 * dial.width, 0.25 * dial.width);
    let c5 = radial(dial, flat, sin_a, cos_a);
    let c6 = radial(dial, notched, sin_a, cos_a);

    let p1 = px(tangent(c5, half, sin_a, cos_a));
    let p2 = px(tangent(c5, -half, sin_a, cos_a));
    let p3 = px(tangent(c6, half, sin_a, cos_a));
    let p4 = px(tangent(c6, -half, sin_a, cos_a));
    let p8 = px(tangent(c6, quarter, sin_a, cos_a));
    let p9 = px(tangent(c6, -quarter, sin_a, cos_a));
    let p5 = px(c5);

    s.fill_triangle(p3, p8, p1, color)?;
    s.fill_triangle(p1, p8, p5, color)?;
    s.fill_triangle(p4, p9, p2, color)?;
    s.fill_triangle(p2, p9, p5, color)?;

    for (a, b) in [(p1, p2), (p2, p4), (p4, p9), (p9, p5), (p5, p8), (p8, p3), (p3, p1)] {
        s.draw_line(a, b, BLACK)?;
    }
    Ok(())
}

/// Radial bar from radius `from` to `to`, outlined in a darker shade.
fn radial_bar<S: Surface>(
    s: &mut S,
    dial: &Dial,
    from: f32,
    to: f32,
    thickness: f32,
    angle: f32,
    color: Rgb565,
) -> Result<(), S::Error> {
    primitives::fill_line(
        s,
        polar(dial.center, from, angle),
        polar(dial.center, to, angle),
        Stroke::new(color, thickness as u16, LineEnd::None),
        Stroke::hairline(color::alpha_blend(96, BLACK, color)),
    )
}

/// Draw a marker on an arc gauge at absolute `angle` (radians).
pub fn draw_arc<S: Surface>(
    s: &mut S,
    kind: MarkerKind,
    dial: &Dial,
    angle: f32,
    tag: Option<char>,
    color: Rgb565,
) -> Result<(), S::Error> {
    let (size, w) = (dial.size, dial.width);

    match kind {
        MarkerKind::ArrowNear => {
            radial_arrow(s, dial, size + 0.5 * w, size - 0.5 * w, angle, color)?;
            label(s, tag, dial.anchor(size + w, angle), BLACK, color)
        }
        MarkerKind::ArrowFar => {
            radial_arrow(s, dial, size - 1.5 * w, size - 0.5 * w, angle, color)?;
            label(s, tag, dial.anchor(size - 2.0 * w, angle), BLACK, color)
        }
        MarkerKind::LongBar => {
            radial_bar(s, dial, size + 0.25 * w, size - 1.25 * w, 0.25 * w, angle, color)?;
            label(s, tag, dial.anchor(size - 0.5 * w, angle), WHITE, BLACK)
        }
        MarkerKind::ShortBar => {
            radial_bar(s, dial, size - 0.875 * w, size - 0.125 * w, 0.24 * w, angle, color)?;
            label(s, tag, dial.anchor(size - 0.5 * w, angle), WHITE, BLACK)
        }
        MarkerKind::BugNear => {
            radial_bug(s, dial, size - 0.5 * w, size, angle, color)?;
            label(s, tag, dial.anchor(size + w, angle), BLACK, color)
        }
        MarkerKind::BugFar => {
            radial_bug(s, dial, size - 0.5 * w, size - w, angle, color)?;
            label(s, tag, dial.anchor(size - 2.0 * w, angle), BLACK, color)
        }
        MarkerKind::Dot => {
            let center = polar(dial.center, size - 0.5 * w, angle);
            dot(s, center, (0.25 * w) as i32, tag, color)
        }
        MarkerKind::Needle => {
            let p1 = polar(dial.center, 0.4 * w, angle - FRAC_PI_2);
            let p2 = polar(dial.center, 0.4 * w, angle + FRAC_PI_2);
            let p3 = polar(dial.center, size - 0.5 * w, angle);
            s.fill_triangle(p1, p2, p3, color)?;
            s.draw_line(p1, p2, BLACK)?;
            s.draw_line(p2, p3, BLACK)?;
            s.draw_line(p3, p1, BLACK)?;
            label(s, tag, dial.center, BLACK, color)
        }
        MarkerKind::Index => {
            let p1 = polar(dial.center, 0.5 * size, angle);
            let p2 = polar(dial.center, size - 0.25 * w, angle);
            primitives::fill_line(
                s,
                p1,
                p2,
                Stroke::new(color, 6, LineEnd::Sharp),
                Stroke::new(BLACK, 1, LineEnd::Sharp),
            )?;
            label(s, tag, p1, BLACK, color)
        }
        MarkerKind::None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{GREEN, RED};
    use crate::surface::testing::{Op, Recorder};

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_from_u8() {
        assert_eq!(MarkerKind::from_u8(0), MarkerKind::None);
        assert_eq!(MarkerKind::from_u8(3), MarkerKind::LongBar);
        assert_eq!(MarkerKind::from(9), MarkerKind::Index);
        assert_eq!(MarkerKind::from_u8(10), MarkerKind::None);
        assert_eq!(MarkerKind::from_u8(255), MarkerKind::None);
        assert_eq!(MarkerKind::Dot as u8, 7);
    }

    #[test]
    fn test_linear_noops() {
        let mut r = Recorder::new();
        for kind in [MarkerKind::None, MarkerKind::Needle, MarkerKind::Index] {
            draw_vertical(&mut r, kind, p(100, 200), 20, 50, Some('X'), RED).unwrap();
            draw_horizontal(&mut r, kind, p(100, 200), 20, 50, Some('X'), RED).unwrap();
        }
        assert!(r.ops.is_empty());
    }

    #[test]
    fn test_vertical_long_bar() {
        let mut r = Recorder::new();
        draw_vertical(&mut r, MarkerKind::LongBar, p(100, 200), 40, 50, None, GREEN).unwrap();
        assert_eq!(
            r.ops,
            [
                Op::FillRect(p(90, 145), 60, 10, GREEN),
                Op::DrawRect(p(90, 145), 60, 10, BLACK),
            ]
        );
    }

    #[test]
    fn test_vertical_arrow_tip_on_pointer() {
        let mut r = Recorder::new();
        draw_vertical(&mut r, MarkerKind::ArrowNear, p(100, 200), 30, 20, None, RED).unwrap();
        assert_eq!(r.ops[0], Op::FillTriangle(p(115, 180), p(85, 170), p(85, 190), RED));
    }

    #[test]
    fn test_vertical_bug_sides() {
        let mut r = Recorder::new();
        draw_vertical(&mut r, MarkerKind::BugNear, p(100, 200), 20, 0, None, RED).unwrap();
        assert_eq!(r.ops[0], Op::FillTriangle(p(100, 190), p(90, 190), p(90, 210), RED));
        assert_eq!(r.ops[2], Op::FillTriangle(p(90, 195), p(90, 205), p(95, 200), BLACK));
        assert_eq!(r.ops[3], Op::Line(p(100, 190), p(100, 210), BLACK));

        r.clear();
        draw_vertical(&mut r, MarkerKind::BugFar, p(100, 200), 20, 0, None, RED).unwrap();
        assert_eq!(r.ops[0], Op::FillTriangle(p(120, 190), p(130, 190), p(130, 210), RED));
        assert_eq!(r.ops[2], Op::FillTriangle(p(130, 195), p(130, 205), p(125, 200), BLACK));
    }

    #[test]
    fn test_horizontal_bug_sides() {
        let mut r = Recorder::new();
        draw_horizontal(&mut r, MarkerKind::BugNear, p(100, 200), 20, 10, None, RED).unwrap();
        assert_eq!(r.ops[0], Op::FillTriangle(p(100, 200), p(100, 190), p(120, 190), RED));
        assert_eq!(r.ops[2], Op::FillTriangle(p(105, 190), p(115, 190), p(110, 195), BLACK));

        r.clear();
        draw_horizontal(&mut r, MarkerKind::BugFar, p(100, 200), 20, 10, None, RED).unwrap();
        assert_eq!(r.ops[3], Op::Line(p(100, 220), p(120, 220), BLACK));
        assert_eq!(r.ops[2], Op::FillTriangle(p(105, 230), p(115, 230), p(110, 225), BLACK));
    }

    #[test]
    fn test_dot_with_tag() {
        let mut r = Recorder::new();
        draw_horizontal(&mut r, MarkerKind::Dot, p(0, 100), 20, 30, Some('S'), RED).unwrap();
        assert_eq!(
            r.ops,
            [
                Op::FillCircle(p(30, 110), 4, RED),
                Op::DrawCircle(p(30, 110), 4, BLACK),
                Op::Glyph('S', p(30, 110), BLACK),
            ]
        );
    }

    #[test]
    fn test_label_shadow() {
        let mut r = Recorder::new();
        draw_vertical(&mut r, MarkerKind::ArrowFar, p(100, 200), 20, 0, Some('A'), RED).unwrap();
        assert_eq!(
            r.glyphs(),
            [
                ('A', p(139, 199), BLACK),
                ('A', p(141, 201), BLACK),
                ('A', p(140, 200), RED),
            ]
        );
    }

    #[test]
    fn test_bar_label_colors() {
        let mut r = Recorder::new();
        draw_horizontal(&mut r, MarkerKind::ShortBar, p(0, 100), 20, 30, Some('B'), RED).unwrap();
        let glyphs = r.glyphs();
        assert_eq!(glyphs[0].2, WHITE);
        assert_eq!(glyphs[2], ('B', p(30, 110), BLACK));
    }

    #[test]
    fn test_no_tag_no_glyphs() {
        let mut r = Recorder::new();
        draw_vertical(&mut r, MarkerKind::BugFar, p(100, 200), 20, 0, None, RED).unwrap();
        assert!(r.glyphs().is_empty());
    }

    fn dial() -> Dial {
        Dial {
            center: p(120, 120),
            size: 100.0,
            width: 20.0,
        }
    }

    #[test]
    fn test_arc_near_arrow_points_inward() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::ArrowNear, &dial(), 0.0, None, RED).unwrap();
        // Tip at 90 px, base at 110 px, base half-width 6.6 px
        assert_eq!(r.ops[0], Op::FillTriangle(p(210, 120), p(230, 126), p(230, 113), RED));
        assert!(matches!(r.ops[1], Op::DrawTriangle(_, _, _, c) if c == BLACK));
    }

    #[test]
    fn test_arc_needle() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::Needle, &dial(), 0.0, Some('N'), RED).unwrap();
        match r.ops[0] {
            Op::FillTriangle(_, _, tip, c) => {
                assert_eq!(tip, p(210, 120));
                assert_eq!(c, RED);
            }
            other => panic!("unexpected op {:?}", other),
        }
        assert_eq!(r.lines(), 3);
        assert_eq!(r.glyphs()[2], ('N', p(120, 120), RED));
    }

    #[test]
    fn test_arc_bug_outline() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::BugFar, &dial(), 1.0, None, RED).unwrap();
        assert_eq!(r.fill_triangles(), 4);
        assert_eq!(r.lines(), 7);
    }

    #[test]
    fn test_arc_dot_position() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::Dot, &dial(), 0.0, None, RED).unwrap();
        assert_eq!(r.ops[0], Op::FillCircle(p(210, 120), 5, RED));
    }

    #[test]
    fn test_arc_index() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::Index, &dial(), 0.0, Some('I'), RED).unwrap();
        assert!(r.fill_triangles() > 0);
        assert_eq!(r.glyphs()[2], ('I', p(170, 120), RED));
    }

    #[test]
    fn test_arc_label_radius() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::BugNear, &dial(), 0.0, Some('B'), RED).unwrap();
        assert_eq!(r.glyphs()[2], ('B', p(240, 120), RED));

        r.clear();
        draw_arc(&mut r, MarkerKind::ArrowFar, &dial(), 0.0, Some('A'), RED).unwrap();
        assert_eq!(r.glyphs()[2], ('A', p(180, 120), RED));
    }

    #[test]
    fn test_arc_none_is_noop() {
        let mut r = Recorder::new();
        draw_arc(&mut r, MarkerKind::None, &dial(), 0.0, Some('X'), RED).unwrap();
        assert!(r.ops.is_empty());
    }
}
