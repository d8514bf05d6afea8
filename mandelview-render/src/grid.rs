use mandelview_core::ComplexRegion;

use crate::error::RenderError;
use crate::palette::Rgb;

/// Square per-pixel output of a generation pass.
///
/// Holds the raw escape counts next to the colors derived from them, so the
/// color plane can be rebuilt from `iterations` without re-running the
/// escape test. Both planes are row-major with `resolution²` entries.
///
/// The grid also records what its planes show: the region and cap of the
/// pass that filled `iterations`, and the palette and color multiple that
/// last filled `colors`.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelGrid {
    resolution: u32,
    region: ComplexRegion,
    max_iterations: u32,
    palette_name: &'static str,
    color_multiple: u32,
    iterations: Vec<u32>,
    colors: Vec<Rgb>,
}

/// Mutable view of one row of both planes.
pub struct RowMut<'a> {
    pub iterations: &'a mut [u32],
    pub colors: &'a mut [Rgb],
}

impl PixelGrid {
    /// A black grid whose every cell reads as "did not escape" for a cap of 0.
    pub fn new(resolution: u32) -> crate::Result<Self> {
        if resolution == 0 {
            return Err(RenderError::InvalidResolution(resolution));
        }
        let len = resolution as usize * resolution as usize;
        Ok(Self {
            resolution,
            region: ComplexRegion::CANONICAL,
            max_iterations: 0,
            palette_name: "",
            color_multiple: 1,
            iterations: vec![0; len],
            colors: vec![Rgb::BLACK; len],
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Region the current `iterations` plane was generated for.
    pub fn region(&self) -> ComplexRegion {
        self.region
    }

    /// Iteration cap the current `iterations` plane was generated with.
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Name of the palette that produced the current `colors` plane. Empty
    /// until the grid is first filled.
    pub fn palette_name(&self) -> &'static str {
        self.palette_name
    }

    pub fn color_multiple(&self) -> u32 {
        self.color_multiple
    }

    pub(crate) fn record_pass(&mut self, region: ComplexRegion, max_iterations: u32) {
        self.region = region;
        self.max_iterations = max_iterations;
    }

    pub(crate) fn record_colors(&mut self, palette_name: &'static str, color_multiple: u32) {
        self.palette_name = palette_name;
        self.color_multiple = color_multiple;
    }

    #[inline]
    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.resolution && col < self.resolution);
        row as usize * self.resolution as usize + col as usize
    }

    pub fn iteration(&self, row: u32, col: u32) -> u32 {
        self.iterations[self.index(row, col)]
    }

    pub fn color(&self, row: u32, col: u32) -> Rgb {
        self.colors[self.index(row, col)]
    }

    pub fn iterations(&self) -> &[u32] {
        &self.iterations
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Both planes at once: iterations read-only, colors writable.
    pub(crate) fn planes_mut(&mut self) -> (&[u32], &mut [Rgb]) {
        (&self.iterations, &mut self.colors)
    }

    /// Disjoint mutable rows, top to bottom.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = RowMut<'_>> {
        let width = self.resolution as usize;
        self.iterations
            .chunks_exact_mut(width)
            .zip(self.colors.chunks_exact_mut(width))
            .map(|(iterations, colors)| RowMut { iterations, colors })
    }

    /// The color plane as packed RGB bytes, 3 per pixel.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        self.colors.iter().flat_map(|c| c.to_array()).collect()
    }
}
