use mandelview_core::ColorScheme;
use tracing::debug;

use crate::error::RenderError;

/// Number of entries in every palette.
pub const PALETTE_SIZE: usize = 256;

// ---------------------------------------------------------------------------
// Rgb
// ---------------------------------------------------------------------------

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);
    pub const RED: Self = Self::new(255, 0, 0);
    pub const GREEN: Self = Self::new(0, 255, 0);
    pub const BLUE: Self = Self::new(0, 0, 255);
    pub const ORANGE: Self = Self::new(255, 165, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

// ---------------------------------------------------------------------------
// Palette
// ---------------------------------------------------------------------------

/// A 256-entry color table indexed by `(iteration * color_multiple) mod 256`.
///
/// Palettes are built wholesale and never edited in place; switching scheme
/// means building a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    name: &'static str,
    colors: [Rgb; PALETTE_SIZE],
}

impl std::fmt::Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").field("name", &self.name).finish_non_exhaustive()
    }
}

impl Palette {
    /// Build the table for a color scheme.
    pub fn build(scheme: ColorScheme) -> Self {
        debug!(%scheme, "Building palette");
        match scheme {
            ColorScheme::Polynomial => Self::polynomial(),
            ColorScheme::Scheme1 => preset(
                "scheme1",
                &[Rgb::BLACK, Rgb::BLUE, Rgb::WHITE, Rgb::ORANGE, Rgb::BLACK],
                &[0, 64, 144, 196, 256],
            ),
            ColorScheme::Scheme2 => preset(
                "scheme2",
                &[Rgb::BLACK, Rgb::GREEN, Rgb::BLUE, Rgb::BLACK],
                &[0, 85, 170, 256],
            ),
            ColorScheme::Scheme3 => preset(
                "scheme3",
                &[Rgb::BLACK, Rgb::RED, Rgb::BLACK],
                &[0, 200, 256],
            ),
        }
    }

    /// Continuous gradient from three cubic polynomials, one per channel.
    pub fn polynomial() -> Self {
        let mut colors = [Rgb::BLACK; PALETTE_SIZE];
        for (i, color) in colors.iter_mut().enumerate() {
            let x = i as f64;
            let (x2, x3) = (x * x, x * x * x);
            *color = Rgb::new(
                clamp_channel(23.45 - 1.880 * x + 0.0461 * x2 - 0.000152 * x3),
                clamp_channel(17.30 - 0.417 * x + 0.0273 * x2 - 0.000101 * x3),
                clamp_channel(25.22 + 7.902 * x - 0.0681 * x2 + 0.000145 * x3),
            );
        }
        Self {
            name: "polynomial",
            colors,
        }
    }

    /// Piecewise-linear blend between anchor colors.
    ///
    /// `anchors[k]` sits at index `boundaries[k]`; entries in
    /// `[boundaries[k], boundaries[k + 1])` blend from `anchors[k]` towards
    /// `anchors[k + 1]`. Boundaries must start at 0, end at 256 and be
    /// strictly increasing.
    pub fn from_anchors(
        name: &'static str,
        anchors: &[Rgb],
        boundaries: &[usize],
    ) -> crate::Result<Self> {
        validate_anchors(anchors, boundaries)?;
        Ok(Self {
            name,
            colors: blend_anchors(anchors, boundaries),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Raw table entry. Panics if `index >= 256`.
    #[inline]
    pub fn entry(&self, index: usize) -> Rgb {
        self.colors[index]
    }

    pub fn colors(&self) -> &[Rgb; PALETTE_SIZE] {
        &self.colors
    }

    /// Color for an escape count.
    ///
    /// Points that reached the cap are always black, whatever the scheme.
    #[inline]
    pub fn lookup(&self, iteration: u32, max_iterations: u32, color_multiple: u32) -> Rgb {
        if iteration >= max_iterations {
            return Rgb::BLACK;
        }
        let index = (iteration as u64 * color_multiple as u64) % PALETTE_SIZE as u64;
        self.colors[index as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::build(ColorScheme::default())
    }
}

/// Truncate toward zero, then bound to a channel value.
fn clamp_channel(value: f64) -> u8 {
    (value as i32).clamp(0, 255) as u8
}

/// Fill `[min, max)` with a linear blend from `c1` towards `c2`.
fn smoosh(colors: &mut [Rgb; PALETTE_SIZE], c1: Rgb, c2: Rgb, min: usize, max: usize) {
    let range = (max - min) as f64;
    let blend = |a: u8, b: u8, offset: f64| -> u8 {
        clamp_channel(a as f64 + offset * (b as f64 - a as f64) / range)
    };
    for (offset, color) in colors[min..max].iter_mut().enumerate() {
        let t = offset as f64;
        *color = Rgb::new(blend(c1.r, c2.r, t), blend(c1.g, c2.g, t), blend(c1.b, c2.b, t));
    }
}

fn validate_anchors(anchors: &[Rgb], boundaries: &[usize]) -> crate::Result<()> {
    let fail = |reason: String| Err(RenderError::InvalidAnchors { reason });
    if anchors.len() < 2 {
        return fail(format!("need at least 2 anchors, got {}", anchors.len()));
    }
    if anchors.len() != boundaries.len() {
        return fail(format!(
            "{} anchors but {} boundaries",
            anchors.len(),
            boundaries.len()
        ));
    }
    if boundaries.first() != Some(&0) || boundaries.last() != Some(&PALETTE_SIZE) {
        return fail(format!("boundaries must span 0..{PALETTE_SIZE}, got {boundaries:?}"));
    }
    if boundaries.windows(2).any(|w| w[0] >= w[1]) {
        return fail(format!("boundaries must be strictly increasing, got {boundaries:?}"));
    }
    Ok(())
}

/// Smoosh every consecutive anchor pair into its span.
fn blend_anchors(anchors: &[Rgb], boundaries: &[usize]) -> [Rgb; PALETTE_SIZE] {
    let mut colors = [Rgb::BLACK; PALETTE_SIZE];
    for (pair, span) in anchors.windows(2).zip(boundaries.windows(2)) {
        smoosh(&mut colors, pair[0], pair[1], span[0], span[1]);
    }
    colors
}

/// Presets are compile-time constants known to satisfy [`validate_anchors`].
fn preset(name: &'static str, anchors: &[Rgb], boundaries: &[usize]) -> Palette {
    debug_assert!(validate_anchors(anchors, boundaries).is_ok());
    Palette {
        name,
        colors: blend_anchors(anchors, boundaries),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
