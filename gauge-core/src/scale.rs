//! Logical-to-physical axis scaling.
//!
//! Bar gauges scale with a 20.12 fixed-point factor so pixel positions are
//! exact for small instrument values. Arc gauges scale in radians with `f32`.

use fixed::types::I20F12;

/// Pixel scale for a bar gauge axis.
///
/// The factor is `floor(4096 * size / span) - 1` in 1/4096 pixel units, and
/// every scaled value rounds toward negative infinity. A zero-length axis
/// falls back to one pixel per unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearScale {
    norm: I20F12,
    min_px: i32,
    max_px: i32,
}

impl LinearScale {
    #[must_use]
    pub fn new(size: i32, max: i16, min: i16) -> Self {
        let span = i32::from(max) - i32::from(min);
        let norm = if span != 0 {
            // Widened so long axes cannot overflow the shift
            let bits = (i64::from(size) << I20F12::FRAC_NBITS) / i64::from(span) - 1;
            i32::try_from(bits).map_or(I20F12::ONE, I20F12::from_bits)
        } else {
            I20F12::ONE
        };

        let mut scale = Self {
            norm,
            min_px: 0,
            max_px: 0,
        };
        scale.min_px = scale.scale(min);
        scale.max_px = scale.scale(max);
        scale
    }

    /// Scale factor in pixels per logical unit.
    #[inline]
    #[must_use]
    pub fn factor(&self) -> I20F12 {
        self.norm
    }

    /// Pixel offset of a logical value, relative to logical zero.
    #[inline]
    #[must_use]
    pub fn scale(&self, value: i16) -> i32 {
        self.norm.saturating_mul_int(value.into()).to_num()
    }

    #[inline]
    #[must_use]
    pub fn min_px(&self) -> i32 {
        self.min_px
    }

    #[inline]
    #[must_use]
    pub fn max_px(&self) -> i32 {
        self.max_px
    }

    /// Pin a scaled value into `[min_px, max_px]`.
    #[inline]
    #[must_use]
    pub fn clamp(&self, px: i32) -> i32 {
        px.max(self.min_px).min(self.max_px)
    }

    /// Major mark offsets: `n + 1` evenly spaced from `min_px`.
    pub fn major_ticks(&self, n: u16) -> impl Iterator<Item = i32> {
        let (min, delta) = (self.min_px, self.tick_delta(n));
        (0..=i32::from(n)).map(move |j| min + j * delta)
    }

    /// Minor mark offsets: `n`, midway between the majors.
    pub fn minor_ticks(&self, n: u16) -> impl Iterator<Item = i32> {
        let delta = self.tick_delta(n);
        let min = self.min_px + delta / 2;
        (0..i32::from(n)).map(move |j| min + j * delta)
    }

    fn tick_delta(&self, n: u16) -> i32 {
        if n == 0 {
            0
        } else {
            (self.max_px - self.min_px) / i32::from(n)
        }
    }
}

/// Radian scale for an arc gauge axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcScale {
    norm: f32,
    min_rad: f32,
    max_rad: f32,
    sweep: f32,
}

impl ArcScale {
    /// `sweep` is the unsigned arc length in radians.
    #[must_use]
    pub fn new(sweep: f32, max: i16, min: i16) -> Self {
        let span = i32::from(max) - i32::from(min);
        let norm = if span != 0 { sweep / span as f32 } else { 1.0 };

        Self {
            norm,
            min_rad: norm * f32::from(min),
            max_rad: norm * f32::from(max),
            sweep,
        }
    }

    #[inline]
    #[must_use]
    pub fn factor(&self) -> f32 {
        self.norm
    }

    #[inline]
    #[must_use]
    pub fn scale(&self, value: i16) -> f32 {
        self.norm * f32::from(value)
    }

    #[inline]
    #[must_use]
    pub fn min_rad(&self) -> f32 {
        self.min_rad
    }

    #[inline]
    #[must_use]
    pub fn max_rad(&self) -> f32 {
        self.max_rad
    }

    #[inline]
    #[must_use]
    pub fn clamp(&self, rad: f32) -> f32 {
        rad.max(self.min_rad).min(self.max_rad)
    }

    /// Major mark angles from the start of the arc.
    pub fn major_ticks(&self, n: u16) -> impl Iterator<Item = f32> {
        let delta = self.tick_delta(n);
        (0..=n).map(move |j| f32::from(j) * delta)
    }

    pub fn minor_ticks(&self, n: u16) -> impl Iterator<Item = f32> {
        let delta = self.tick_delta(n);
        (0..n).map(move |j| f32::from(j) * delta + 0.5 * delta)
    }

    fn tick_delta(&self, n: u16) -> f32 {
        if n == 0 {
            0.0
        } else {
            self.sweep / f32::from(n)
        }
    }
}

/// Graduation mode decoded from a signed mark count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GradMarks {
    /// `-1..=1`: no marks.
    Off,
    /// `n > 1`: fixed white marks.
    Auto(u16),
    /// `n < -1`: marks styled by the gauge's [`GradStyle`](crate::GradStyle).
    Explicit(u16),
}

impl GradMarks {
    #[must_use]
    pub const fn from_count(count: i16) -> Self {
        if count > 1 {
            GradMarks::Auto(count as u16)
        } else if count < -1 {
            GradMarks::Explicit(count.unsigned_abs())
        } else {
            GradMarks::Off
        }
    }
}
