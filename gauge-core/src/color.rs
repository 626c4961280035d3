//! RGB565 palette and blending.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};

pub const BLACK: Rgb565 = Rgb565::new(0, 0, 0);
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);
/// `0x7BEF`
pub const DARK_GREY: Rgb565 = Rgb565::new(15, 31, 15);
/// `0xD69A`
pub const LIGHT_GREY: Rgb565 = Rgb565::new(26, 52, 26);
pub const RED: Rgb565 = Rgb565::new(31, 0, 0);
pub const GREEN: Rgb565 = Rgb565::new(0, 63, 0);
pub const BLUE: Rgb565 = Rgb565::new(0, 0, 31);
pub const YELLOW: Rgb565 = Rgb565::new(31, 63, 0);
/// `0xFDA0`
pub const ORANGE: Rgb565 = Rgb565::new(31, 45, 0);
pub const CYAN: Rgb565 = Rgb565::new(0, 63, 31);
pub const MAGENTA: Rgb565 = Rgb565::new(31, 0, 31);

/// Blend `fg` over `bg`. `alpha` 0 yields `bg`, 255 is (almost) `fg`.
///
/// Red and blue blend at 6-bit alpha precision, green at 8-bit, matching
/// the usual packed RGB565 blend.
#[must_use]
pub fn alpha_blend(alpha: u8, fg: Rgb565, bg: Rgb565) -> Rgb565 {
    let a6 = i32::from(alpha >> 2);
    let a8 = i32::from(alpha);

    let mix = |f: u8, b: u8, a: i32, shift: u32| -> u8 {
        let (f, b) = (i32::from(f), i32::from(b));
        (b + (((f - b) * a) >> shift)) as u8
    };

    Rgb565::new(
        mix(fg.r(), bg.r(), a6, 6),
        mix(fg.g(), bg.g(), a8, 8),
        mix(fg.b(), bg.b(), a6, 6),
    )
}
