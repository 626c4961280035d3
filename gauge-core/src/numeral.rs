//! Stroked, rotatable numerals for readouts.
//!
//! Each character cell is a seven-point skeleton:
//!
//! ```text
//! p3----p4
//! |      |
//! p1-p7-p2
//! |      |
//! p5----p6
//! ```
//!
//! Glyphs are segments between those points, plus small circles for dots.
//! The cell advances by one and a half cell widths per character.

use core::fmt::{self, Write};

use embedded_graphics::prelude::Point;
use heapless::String;
use libm::{cosf, sinf};

use crate::primitives::{self, pt, Stroke};
use crate::surface::Surface;

const DEG_TO_RAD: f32 = core::f32::consts::PI / 180.0;

/// Anchor of the string relative to the origin point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Datum {
    TopLeft,
    #[default]
    MiddleLeft,
    BottomLeft,
    TopCenter,
    MiddleCenter,
    BottomCenter,
    TopRight,
    MiddleRight,
    BottomRight,
}

/// Cell size, rotation and stroke for [`draw_numerals`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumeralStyle {
    pub cell_width: i32,
    pub cell_height: i32,
    /// Rotation in degrees, clockwise on screen.
    pub roll: i16,
    pub datum: Datum,
    pub stroke: Stroke,
}

struct Glyph {
    lines: &'static [(usize, usize)],
    dots: &'static [usize],
}

const fn lines(lines: &'static [(usize, usize)]) -> Glyph {
    Glyph { lines, dots: &[] }
}

// Point numbers are 1-based, matching the cell diagram.
fn glyph(ch: char) -> Option<Glyph> {
    let g = match ch {
        '0' => lines(&[(3, 4), (5, 6), (3, 5), (4, 6), (4, 5)]),
        '1' => lines(&[(2, 4), (2, 6)]),
        '2' => lines(&[(1, 2), (3, 4), (5, 6), (1, 5), (2, 4)]),
        '3' => lines(&[(1, 2), (3, 4), (5, 6), (2, 4), (2, 6)]),
        '4' => lines(&[(1, 2), (1, 4), (2, 4), (2, 6)]),
        '5' => lines(&[(4, 3), (3, 1), (1, 2), (2, 6), (6, 5)]),
        '6' => lines(&[(1, 2), (5, 6), (1, 5), (2, 6), (1, 4)]),
        '7' => lines(&[(3, 4), (4, 5)]),
        '8' => lines(&[(1, 2), (3, 4), (5, 6), (3, 5), (4, 6)]),
        '9' => lines(&[(1, 2), (3, 4), (2, 4), (1, 3), (2, 5)]),
        '-' => lines(&[(1, 2)]),
        '.' => Glyph {
            lines: &[],
            dots: &[6],
        },
        'o' => Glyph {
            lines: &[],
            dots: &[3],
        },
        '%' => Glyph {
            lines: &[(4, 5)],
            dots: &[3, 6],
        },
        ':' => Glyph {
            lines: &[],
            dots: &[3, 5],
        },
        '[' => lines(&[(3, 4), (5, 6), (3, 5)]),
        ']' => lines(&[(3, 4), (4, 6), (5, 6)]),
        '\\' => lines(&[(3, 6)]),
        '/' => lines(&[(4, 5)]),
        '*' => lines(&[(1, 2), (3, 6), (4, 5)]),
        '=' => lines(&[(1, 2), (5, 6)]),
        '>' => lines(&[(3, 2), (2, 5)]),
        '<' => lines(&[(1, 4), (1, 6)]),
        '$' => lines(&[(1, 2), (3, 4), (5, 6), (1, 3), (2, 6), (4, 5)]),
        '+' => lines(&[(1, 2), (5, 4)]),
        '^' => lines(&[(1, 4), (2, 4)]),
        '(' => lines(&[(4, 7), (7, 6)]),
        ')' => lines(&[(3, 7), (7, 5)]),
        '&' => lines(&[(4, 1), (1, 2), (1, 6)]),
        _ => return None,
    };
    Some(g)
}

/// Advance width of `text` in pixels.
#[must_use]
pub fn advance(text: &str, cell_width: i32) -> i32 {
    text.chars().count() as i32 * 3 * cell_width / 2
}

/// Draw `text` with stroked numerals and return its advance width.
///
/// `'\n'` starts a new row below the first character. Characters outside
/// the glyph set draw nothing but still advance.
pub fn draw_numerals<S: Surface>(
    s: &mut S,
    text: &str,
    origin: Point,
    style: &NumeralStyle,
) -> Result<i32, S::Error> {
    let roll = f32::from(style.roll) * DEG_TO_RAD;
    let (sin_r, cos_r) = (sinf(roll), cosf(roll));
    let half_h = style.cell_height as f32 * 0.5;
    let half_w = style.cell_width as f32 * 0.5;

    // Half-height and half-width vectors rotated by the roll angle
    let (hx, hy) = (half_h * sin_r, half_h * cos_r);
    let (wx, wy) = (half_w * cos_r, half_w * sin_r);

    let len = text.chars().count() as f32;
    let (mut x, mut y) = (origin.x as f32, origin.y as f32);

    let span = match style.datum {
        Datum::TopLeft | Datum::MiddleLeft | Datum::BottomLeft => 0.0,
        Datum::TopCenter | Datum::MiddleCenter | Datum::BottomCenter => 1.5,
        Datum::TopRight | Datum::MiddleRight | Datum::BottomRight => 3.0,
    };
    x -= (len - 1.0) * span * wx;
    y += (len - 1.0) * span * wy;

    match style.datum {
        Datum::TopLeft | Datum::TopCenter | Datum::TopRight => {
            x += hx;
            y += hy;
        }
        Datum::BottomLeft | Datum::BottomCenter | Datum::BottomRight => {
            x -= hx;
            y -= hy;
        }
        _ => {}
    }

    for (i, ch) in text.chars().enumerate() {
        if ch == '\n' {
            x -= 3.0 * half_w * (i + 1) as f32;
            y += 3.0 * half_h;
        } else if let Some(g) = glyph(ch) {
            let (x1, y1) = (x - wx, y + wy);
            let (x2, y2) = (x + wx, y - wy);
            let cell = [
                pt(x1, y1),
                pt(x2, y2),
                pt(x1 - hx, y1 - hy),
                pt(x2 - hx, y2 - hy),
                pt(x1 + hx, y1 + hy),
                pt(x2 + hx, y2 + hy),
                pt(x, y),
            ];

            for &(a, b) in g.lines {
                primitives::draw_line(s, cell[a - 1], cell[b - 1], style.stroke)?;
            }
            for &d in g.dots {
                s.draw_circle(cell[d - 1], (0.5 * half_w) as i32, style.stroke.color)?;
            }
        }

        x += 3.0 * wx;
        y -= 3.0 * wy;
    }

    Ok(advance(text, style.cell_width))
}

/// Longest text [`draw_readout`] will format.
pub const READOUT_LEN: usize = 12;

/// Drawn in place of a readout that does not fit in [`READOUT_LEN`].
pub const READOUT_OVERFLOW: &str = "---";

/// Format `args` and draw it with [`draw_numerals`].
///
/// Returns `Ok(false)` when the text does not fit; [`READOUT_OVERFLOW`] is
/// drawn instead of a truncated value.
pub fn draw_readout<S: Surface>(
    s: &mut S,
    args: fmt::Arguments<'_>,
    origin: Point,
    style: &NumeralStyle,
) -> Result<bool, S::Error> {
    let mut text: String<READOUT_LEN> = String::new();
    if text.write_fmt(args).is_ok() {
        draw_numerals(s, &text, origin, style)?;
        Ok(true)
    } else {
        draw_numerals(s, READOUT_OVERFLOW, origin, style)?;
        Ok(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::{RED, WHITE};
    use crate::primitives::LineEnd;
    use crate::surface::testing::{Op, Recorder};

    fn style(datum: Datum) -> NumeralStyle {
        NumeralStyle {
            cell_width: 10,
            cell_height: 20,
            roll: 0,
            datum,
            stroke: Stroke::hairline(WHITE),
        }
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_readout_formats_value() {
        let mut expected = Recorder::new();
        draw_numerals(&mut expected, "12.5", p(40, 40), &style(Datum::MiddleCenter)).unwrap();

        let mut r = Recorder::new();
        let fits =
            draw_readout(&mut r, format_args!("{:.1}", 12.54f32), p(40, 40), &style(Datum::MiddleCenter))
                .unwrap();
        assert!(fits);
        assert_eq!(r.ops, expected.ops);
    }

    #[test]
    fn test_readout_overflow_draws_placeholder() {
        let mut expected = Recorder::new();
        draw_numerals(&mut expected, READOUT_OVERFLOW, p(40, 40), &style(Datum::MiddleCenter))
            .unwrap();

        let mut r = Recorder::new();
        let fits =
            draw_readout(&mut r, format_args!("{:.1}", 1.0e20f32), p(40, 40), &style(Datum::MiddleCenter))
                .unwrap();
        assert!(!fits);
        assert_eq!(r.ops, expected.ops);
    }

    #[test]
    fn test_advance_two_digits() {
        let mut r = Recorder::new();
        let w = draw_numerals(&mut r, "12", p(0, 0), &style(Datum::MiddleLeft)).unwrap();
        assert_eq!(w, 30);
        assert_eq!(advance("12", 7), 21);
    }

    #[test]
    fn test_digit_one_segments() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, "1", p(50, 50), &style(Datum::MiddleLeft)).unwrap();
        // Right leg: p2 -> p4 and p2 -> p6
        assert_eq!(
            r.ops,
            [
                Op::Line(p(55, 50), p(55, 40), WHITE),
                Op::Line(p(55, 50), p(55, 60), WHITE),
            ]
        );
    }

    #[test]
    fn test_cells_advance() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, "--", p(0, 50), &style(Datum::MiddleLeft)).unwrap();
        assert_eq!(
            r.ops,
            [
                Op::Line(p(-5, 50), p(5, 50), WHITE),
                Op::Line(p(10, 50), p(20, 50), WHITE),
            ]
        );
    }

    #[test]
    fn test_top_left_datum() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, "-", p(0, 0), &style(Datum::TopLeft)).unwrap();
        assert_eq!(r.ops, [Op::Line(p(-5, 10), p(5, 10), WHITE)]);
    }

    #[test]
    fn test_right_datum() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, "--", p(100, 50), &style(Datum::MiddleRight)).unwrap();
        // The last cell is centred on the origin
        assert_eq!(r.ops[1], Op::Line(p(95, 50), p(105, 50), WHITE));
    }

    #[test]
    fn test_dots() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, ":", p(0, 0), &style(Datum::MiddleLeft)).unwrap();
        assert_eq!(
            r.ops,
            [
                Op::DrawCircle(p(-5, -10), 2, WHITE),
                Op::DrawCircle(p(-5, 10), 2, WHITE),
            ]
        );
    }

    #[test]
    fn test_unknown_chars_advance() {
        let mut r = Recorder::new();
        let w = draw_numerals(&mut r, "AB-", p(0, 0), &style(Datum::MiddleLeft)).unwrap();
        assert_eq!(w, 45);
        assert_eq!(r.ops, [Op::Line(p(25, 0), p(35, 0), WHITE)]);
    }

    #[test]
    fn test_newline() {
        let mut r = Recorder::new();
        draw_numerals(&mut r, "-\n-", p(0, 0), &style(Datum::MiddleLeft)).unwrap();
        // Newline at index 1 rewinds 3 * 5 * 2 px, then the cell advance adds 15 px
        assert_eq!(r.ops[1], Op::Line(p(-5, 30), p(5, 30), WHITE));
    }

    #[test]
    fn test_roll_quarter_turn() {
        let mut r = Recorder::new();
        let mut st = style(Datum::MiddleLeft);
        st.roll = 90;
        draw_numerals(&mut r, "-", p(0, 0), &st).unwrap();
        match r.ops[0] {
            Op::Line(a, b, _) => {
                assert_eq!(a.x, 0);
                assert_eq!(b.x, 0);
                assert_eq!((a.y - b.y).abs(), 10);
            }
            other => panic!("unexpected op {:?}", other),
        }
    }

    #[test]
    fn test_wide_stroke() {
        let mut r = Recorder::new();
        let mut st = style(Datum::MiddleLeft);
        st.stroke = Stroke::new(RED, 3, LineEnd::Round);
        draw_numerals(&mut r, "7", p(50, 50), &st).unwrap();
        assert!(r.fill_triangles() >= 4);
        assert!(r.circles() >= 4);
    }
}
