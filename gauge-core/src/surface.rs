//! Pixel surface abstraction.
//!
//! Gauge drawing is written against [`Surface`], which exposes only the
//! primitives a TFT sprite library provides. [`Canvas`] implements it for any
//! `embedded-graphics` [`DrawTarget`] with `Rgb565` pixels.

use embedded_graphics::mono_font::ascii::FONT_10X20;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment, Triangle,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};

use crate::color;

/// Drawing surface in absolute pixel coordinates.
///
/// Rectangles with a non-positive width or height and circles with a
/// negative radius draw nothing.
pub trait Surface {
    /// Error type returned by the underlying display.
    type Error;

    fn draw_pixel(&mut self, p: Point, color: Rgb565) -> Result<(), Self::Error>;

    /// One pixel wide line, both ends inclusive.
    fn draw_line(&mut self, a: Point, b: Point, color: Rgb565) -> Result<(), Self::Error>;

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn draw_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn fill_rect(
        &mut self,
        top_left: Point,
        width: i32,
        height: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn draw_rect(
        &mut self,
        top_left: Point,
        width: i32,
        height: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    /// Disc of the given radius; the diameter is `2 * radius + 1`.
    fn fill_circle(&mut self, center: Point, radius: i32, color: Rgb565)
        -> Result<(), Self::Error>;

    fn draw_circle(&mut self, center: Point, radius: i32, color: Rgb565)
        -> Result<(), Self::Error>;

    /// Draw a single tag character centred on `center`.
    fn draw_glyph(&mut self, ch: char, center: Point, color: Rgb565) -> Result<(), Self::Error>;

    /// Blend `fg` over `bg`.
    fn alpha_blend(&self, alpha: u8, fg: Rgb565, bg: Rgb565) -> Rgb565 {
        color::alpha_blend(alpha, fg, bg)
    }
}

/// [`Surface`] over an `embedded-graphics` draw target.
pub struct Canvas<D> {
    target: D,
}

impl<D> Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: D) -> Self {
        Self { target }
    }

    #[inline]
    pub fn target(&self) -> &D {
        &self.target
    }

    #[inline]
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn outline(color: Rgb565) -> PrimitiveStyle<Rgb565> {
        PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(1)
            .stroke_alignment(StrokeAlignment::Inside)
            .build()
    }
}

impl<D> Surface for Canvas<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn draw_pixel(&mut self, p: Point, color: Rgb565) -> Result<(), Self::Error> {
        Pixel(p, color).draw(&mut self.target)
    }

    fn draw_line(&mut self, a: Point, b: Point, color: Rgb565) -> Result<(), Self::Error> {
        Line::new(a, b)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    fn fill_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn draw_triangle(
        &mut self,
        a: Point,
        b: Point,
        c: Point,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        Triangle::new(a, b, c)
            .into_styled(PrimitiveStyle::with_stroke(color, 1))
            .draw(&mut self.target)
    }

    fn fill_rect(
        &mut self,
        top_left: Point,
        width: i32,
        height: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        Rectangle::new(top_left, Size::new(width as u32, height as u32))
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn draw_rect(
        &mut self,
        top_left: Point,
        width: i32,
        height: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        Rectangle::new(top_left, Size::new(width as u32, height as u32))
            .into_styled(Self::outline(color))
            .draw(&mut self.target)
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        if radius < 0 {
            return Ok(());
        }
        Circle::with_center(center, (2 * radius + 1) as u32)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(&mut self.target)
    }

    fn draw_circle(
        &mut self,
        center: Point,
        radius: i32,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        if radius < 0 {
            return Ok(());
        }
        Circle::with_center(center, (2 * radius + 1) as u32)
            .into_styled(Self::outline(color))
            .draw(&mut self.target)
    }

    fn draw_glyph(&mut self, ch: char, center: Point, color: Rgb565) -> Result<(), Self::Error> {
        let mut buf = [0u8; 4];
        let text = ch.encode_utf8(&mut buf);
        let style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();

        Text::with_text_style(text, center, MonoTextStyle::new(&FONT_10X20, color), style)
            .draw(&mut self.target)?;
        Ok(())
    }
}

/// Recording surface for drawing tests.
#[cfg(test)]
pub(crate) mod testing {
    extern crate std;

    use core::convert::Infallible;
    use std::vec::Vec;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Op {
        Pixel(Point, Rgb565),
        Line(Point, Point, Rgb565),
        FillTriangle(Point, Point, Point, Rgb565),
        DrawTriangle(Point, Point, Point, Rgb565),
        FillRect(Point, i32, i32, Rgb565),
        DrawRect(Point, i32, i32, Rgb565),
        FillCircle(Point, i32, Rgb565),
        DrawCircle(Point, i32, Rgb565),
        Glyph(char, Point, Rgb565),
    }

    #[derive(Debug, Default)]
    pub struct Recorder {
        pub ops: Vec<Op>,
    }

    impl Recorder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn lines(&self) -> usize {
            self.count(|op| matches!(op, Op::Line(..)))
        }

        pub fn fill_triangles(&self) -> usize {
            self.count(|op| matches!(op, Op::FillTriangle(..)))
        }

        pub fn circles(&self) -> usize {
            self.count(|op| matches!(op, Op::FillCircle(..) | Op::DrawCircle(..)))
        }

        pub fn glyphs(&self) -> Vec<(char, Point, Rgb565)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::Glyph(ch, p, c) => Some((ch, p, c)),
                    _ => None,
                })
                .collect()
        }

        pub fn fill_rects(&self) -> Vec<(Point, i32, i32, Rgb565)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::FillRect(p, w, h, c) => Some((p, w, h, c)),
                    _ => None,
                })
                .collect()
        }

        pub fn draw_rects(&self) -> Vec<(Point, i32, i32, Rgb565)> {
            self.ops
                .iter()
                .filter_map(|op| match *op {
                    Op::DrawRect(p, w, h, c) => Some((p, w, h, c)),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, f: impl Fn(&Op) -> bool) -> usize {
            self.ops.iter().filter(|op| f(op)).count()
        }

        pub fn clear(&mut self) {
            self.ops.clear();
        }
    }

    impl Surface for Recorder {
        type Error = Infallible;

        fn draw_pixel(&mut self, p: Point, color: Rgb565) -> Result<(), Infallible> {
            self.ops.push(Op::Pixel(p, color));
            Ok(())
        }

        fn draw_line(&mut self, a: Point, b: Point, color: Rgb565) -> Result<(), Infallible> {
            self.ops.push(Op::Line(a, b, color));
            Ok(())
        }

        fn fill_triangle(
            &mut self,
            a: Point,
            b: Point,
            c: Point,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::FillTriangle(a, b, c, color));
            Ok(())
        }

        fn draw_triangle(
            &mut self,
            a: Point,
            b: Point,
            c: Point,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            self.ops.push(Op::DrawTriangle(a, b, c, color));
            Ok(())
        }

        fn fill_rect(
            &mut self,
            top_left: Point,
            width: i32,
            height: i32,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            if width > 0 && height > 0 {
                self.ops.push(Op::FillRect(top_left, width, height, color));
            }
            Ok(())
        }

        fn draw_rect(
            &mut self,
            top_left: Point,
            width: i32,
            height: i32,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            if width > 0 && height > 0 {
                self.ops.push(Op::DrawRect(top_left, width, height, color));
            }
            Ok(())
        }

        fn fill_circle(
            &mut self,
            center: Point,
            radius: i32,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            if radius >= 0 {
                self.ops.push(Op::FillCircle(center, radius, color));
            }
            Ok(())
        }

        fn draw_circle(
            &mut self,
            center: Point,
            radius: i32,
            color: Rgb565,
        ) -> Result<(), Infallible> {
            if radius >= 0 {
                self.ops.push(Op::DrawCircle(center, radius, color));
            }
            Ok(())
        }

        fn draw_glyph(&mut self, ch: char, center: Point, color: Rgb565) -> Result<(), Infallible> {
            self.ops.push(Op::Glyph(ch, center, color));
            Ok(())
        }
    }
}
