//! Wave colours and the colour-bucket keys that route them to sound voices.

use crate::constants::{CHANNEL_MAX, UNIQUE_CHANNEL_MIN, UNIQUE_COLOR_ATTEMPTS};
use rand::Rng;
use std::fmt;

/// RGB colour with channels in the 0..=255 range.
///
/// Channels are kept as floats so averaged colours from a merge are not
/// truncated; the voice bucket is chosen from the rounded channels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn key(&self) -> ColorKey {
        ColorKey::from(*self)
    }

    /// Same colour with an alpha in the 0..=255 range.
    pub fn with_alpha(&self, alpha: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a: alpha.clamp(0.0, CHANNEL_MAX),
        }
    }

    /// Channel-wise arithmetic mean; `None` for an empty input.
    pub fn average<'a>(colors: impl IntoIterator<Item = &'a Color>) -> Option<Color> {
        let mut sum = [0.0_f32; 3];
        let mut n = 0usize;
        for c in colors {
            sum[0] += c.r;
            sum[1] += c.g;
            sum[2] += c.b;
            n += 1;
        }
        (n > 0).then(|| {
            let n = n as f32;
            Color::new(sum[0] / n, sum[1] / n, sum[2] / n)
        })
    }

    fn random_in<R: Rng + ?Sized>(rng: &mut R, min: f32) -> Color {
        Color::new(
            rng.gen_range(min..CHANNEL_MAX),
            rng.gen_range(min..CHANNEL_MAX),
            rng.gen_range(min..CHANNEL_MAX),
        )
    }
}

impl From<[f32; 3]> for Color {
    fn from(c: [f32; 3]) -> Self {
        Color::new(c[0], c[1], c[2])
    }
}

/// Colour plus alpha, all channels 0..=255. Handed to the drawing surface.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Normalised `[r, g, b, a]` in 0..=1, as GPU pipelines want it.
    pub fn to_unit(&self) -> [f32; 4] {
        [
            self.r / CHANNEL_MAX,
            self.g / CHANNEL_MAX,
            self.b / CHANNEL_MAX,
            self.a / CHANNEL_MAX,
        ]
    }

    /// CSS `rgba()` string for canvas style properties.
    pub fn to_css(&self) -> String {
        format!(
            "rgba({},{},{},{:.3})",
            self.r.round().clamp(0.0, CHANNEL_MAX) as u8,
            self.g.round().clamp(0.0, CHANNEL_MAX) as u8,
            self.b.round().clamp(0.0, CHANNEL_MAX) as u8,
            (self.a / CHANNEL_MAX).clamp(0.0, 1.0)
        )
    }
}

/// Voice bucket: the rounded integer channels of a colour.
///
/// Two colours that round to the same triple deliberately share a voice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ColorKey([u8; 3]);

impl ColorKey {
    pub fn channels(&self) -> [u8; 3] {
        self.0
    }
}

impl From<Color> for ColorKey {
    fn from(c: Color) -> Self {
        let q = |v: f32| v.round().clamp(0.0, CHANNEL_MAX) as u8;
        ColorKey([q(c.r), q(c.g), q(c.b)])
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.0[0], self.0[1], self.0[2])
    }
}

/// Random colour not exactly equal to any of `taken`.
///
/// Best effort: after `UNIQUE_COLOR_ATTEMPTS` misses it returns one
/// unconstrained colour without checking it.
pub fn unique_color<'a, R, I>(rng: &mut R, taken: I) -> Color
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = &'a Color>,
    I::IntoIter: Clone,
{
    let taken = taken.into_iter();
    for _ in 0..UNIQUE_COLOR_ATTEMPTS {
        let candidate = Color::random_in(rng, UNIQUE_CHANNEL_MIN);
        if !taken.clone().any(|c| *c == candidate) {
            return candidate;
        }
    }
    log::warn!("[field] no unique colour after {UNIQUE_COLOR_ATTEMPTS} attempts");
    Color::random_in(rng, 0.0)
}
