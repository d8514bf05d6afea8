use tracing::debug;

use mandelview_core::{
    zoom_frames, ColorScheme, Complex, ComplexRegion, RenderConfig, Viewport, ZoomFrame,
};

use crate::generator::{GenerationStats, WorkerPool};
use crate::grid::PixelGrid;
use crate::palette::Palette;
use crate::recolor::recolor;

/// Frames shown while an animated zoom generates the new region.
pub const ZOOM_ANIMATION_FRAMES: u32 = 30;

/// Zoom factor for one step in.
pub const ZOOM_IN_FACTOR: f64 = 0.5;

/// Zoom factor for one step out.
pub const ZOOM_OUT_FACTOR: f64 = 2.0;

/// Owns everything a renderer needs between passes: the viewport, the
/// render configuration, the palette built from it, a worker pool, and two
/// pixel grids.
///
/// Passes render into the back grid and swap it to the front when the last
/// worker finishes, so [`grid`](Self::grid) always shows a complete pass.
#[derive(Debug)]
pub struct MandelbrotEngine {
    viewport: Viewport,
    config: RenderConfig,
    palette: Palette,
    pool: WorkerPool,
    front: PixelGrid,
    back: PixelGrid,
    last_stats: Option<GenerationStats>,
}

impl MandelbrotEngine {
    /// An engine with one worker per hardware thread.
    pub fn new(resolution: u32, config: RenderConfig) -> crate::Result<Self> {
        Self::with_pool(resolution, config, WorkerPool::with_available_parallelism)
    }

    pub fn with_workers(resolution: u32, config: RenderConfig, workers: usize) -> crate::Result<Self> {
        Self::with_pool(resolution, config, || WorkerPool::new(workers))
    }

    fn with_pool(
        resolution: u32,
        config: RenderConfig,
        pool: impl FnOnce() -> crate::Result<WorkerPool>,
    ) -> crate::Result<Self> {
        let front = PixelGrid::new(resolution)?;
        let back = front.clone();
        let config = config.validated()?;
        Ok(Self {
            viewport: Viewport::new(resolution)?,
            palette: Palette::build(config.scheme),
            config,
            pool: pool()?,
            front,
            back,
            last_stats: None,
        })
    }

    // -- Accessors --

    /// The most recently completed pass.
    pub fn grid(&self) -> &PixelGrid {
        &self.front
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn region(&self) -> ComplexRegion {
        self.viewport.region()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn resolution(&self) -> u32 {
        self.viewport.resolution()
    }

    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    pub fn last_stats(&self) -> Option<GenerationStats> {
        self.last_stats
    }

    // -- Passes --

    /// Run a full generation pass for the current viewport and config.
    pub fn generate(&mut self) -> GenerationStats {
        let stats = self
            .pool
            .generate(&self.viewport, &self.config, &self.palette, &mut self.back);
        self.publish(stats)
    }

    /// Remap the current grid with the current palette and color multiple.
    pub fn recolor(&mut self) {
        recolor(&mut self.front, &self.palette, self.config.color_multiple);
    }

    /// Zoom by `factor` around `center` while animating the previous grid.
    ///
    /// `on_frame` runs on a separate thread and receives `frames` frames in
    /// the old grid's pixel space, together with that grid. Meanwhile the
    /// new region is generated into the back grid. Both tasks are joined
    /// before the new grid is published.
    pub fn zoom_animated<F>(
        &mut self,
        center: Complex,
        factor: f64,
        frames: u32,
        mut on_frame: F,
    ) -> GenerationStats
    where
        F: FnMut(ZoomFrame, &PixelGrid) + Send,
    {
        let half = self.resolution() as f64 / 2.0;
        let target = self.viewport.complex_to_pixel(center);
        self.viewport.zoom_relative(center, factor);
        debug!(frames, factor, "Starting animated zoom");

        let shown = &self.front;
        let stats = std::thread::scope(|s| {
            let animation = s.spawn(move || {
                for frame in zoom_frames((half, half), target, factor, frames) {
                    on_frame(frame, shown);
                }
            });
            let stats = self
                .pool
                .generate(&self.viewport, &self.config, &self.palette, &mut self.back);
            if let Err(panic) = animation.join() {
                std::panic::resume_unwind(panic);
            }
            stats
        });

        self.publish(stats)
    }

    fn publish(&mut self, stats: GenerationStats) -> GenerationStats {
        std::mem::swap(&mut self.front, &mut self.back);
        self.last_stats = Some(stats);
        stats
    }

    // -- Configuration --

    pub fn set_max_iterations(&mut self, max_iterations: u32) -> crate::Result<()> {
        self.config = self.config.with_max_iterations(max_iterations)?;
        Ok(())
    }

    pub fn set_color_multiple(&mut self, color_multiple: u32) -> crate::Result<()> {
        self.config = self.config.with_color_multiple(color_multiple)?;
        Ok(())
    }

    /// Switch scheme and rebuild the palette. Call [`recolor`](Self::recolor)
    /// to apply it to the current grid.
    pub fn set_scheme(&mut self, scheme: ColorScheme) {
        self.config = self.config.with_scheme(scheme);
        self.palette = Palette::build(scheme);
    }

    /// Use a custom palette until the next [`set_scheme`](Self::set_scheme).
    pub fn set_palette(&mut self, palette: Palette) {
        debug!(name = palette.name(), "Installing custom palette");
        self.palette = palette;
    }

    // -- Navigation --

    pub fn zoom_relative(&mut self, center: Complex, factor: f64) {
        self.viewport.zoom_relative(center, factor);
    }

    pub fn zoom_at_pixel(&mut self, px: f64, py: f64, factor: f64) {
        self.viewport.zoom_at_pixel(px, py, factor);
    }

    pub fn zoom_in(&mut self, px: f64, py: f64) {
        self.zoom_at_pixel(px, py, ZOOM_IN_FACTOR);
    }

    pub fn zoom_out(&mut self, px: f64, py: f64) {
        self.zoom_at_pixel(px, py, ZOOM_OUT_FACTOR);
    }

    pub fn recenter(&mut self, center: Complex) {
        self.viewport.recenter(center);
    }

    pub fn drag(&mut self, dx: f64, dy: f64) {
        self.viewport.drag(dx, dy);
    }

    /// Back to the canonical region with default iteration cap and color
    /// multiple. The scheme is kept.
    pub fn reset(&mut self) {
        self.viewport.reset();
        self.config = RenderConfig {
            max_iterations: RenderConfig::DEFAULT_MAX_ITERATIONS,
            color_multiple: 1,
            ..self.config
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn engine(resolution: u32) -> MandelbrotEngine {
        MandelbrotEngine::with_workers(resolution, RenderConfig::default(), 3).unwrap()
    }

    #[test]
    fn rejects_zero_resolution() {
        assert!(matches!(
            MandelbrotEngine::new(0, RenderConfig::default()),
            Err(RenderError::InvalidResolution(0))
        ));
    }

    #[test]
    fn default_engine_uses_every_hardware_thread() {
        let e = MandelbrotEngine::new(8, RenderConfig::default()).unwrap();
        assert_eq!(e.workers(), crate::generator::default_workers());
    }

    #[test]
    fn rejects_invalid_config() {
        let config = RenderConfig {
            max_iterations: 0,
            ..RenderConfig::default()
        };
        assert!(matches!(
            MandelbrotEngine::new(16, config),
            Err(RenderError::Core(_))
        ));
    }

    #[test]
    fn generate_publishes_full_grid() {
        let mut e = engine(50);
        assert!(e.last_stats().is_none());
        let stats = e.generate();
        assert_eq!(stats.rows, 50);
        assert_eq!(e.grid().max_iterations(), 100);
        assert_eq!(e.last_stats(), Some(stats));
        // c = -1.5 - i escapes on its second iterate.
        assert_eq!(e.grid().iteration(0, 0), 1);
    }

    #[test]
    fn recolor_after_scheme_change_matches_regeneration() {
        let mut e = engine(40);
        e.generate();
        e.set_scheme(ColorScheme::Scheme2);
        e.set_color_multiple(3).unwrap();
        e.recolor();
        let recolored = e.grid().clone();

        e.generate();
        assert_eq!(&recolored, e.grid());
    }

    #[test]
    fn setters_validate() {
        let mut e = engine(8);
        assert!(e.set_max_iterations(0).is_err());
        assert!(e.set_color_multiple(0).is_err());
        e.set_max_iterations(250).unwrap();
        assert_eq!(e.config().max_iterations, 250);
    }

    #[test]
    fn reset_keeps_scheme() {
        let mut e = engine(8);
        e.set_scheme(ColorScheme::Scheme3);
        e.set_max_iterations(999).unwrap();
        e.set_color_multiple(4).unwrap();
        e.zoom_in(1.0, 1.0);
        e.reset();
        assert_eq!(e.region(), ComplexRegion::CANONICAL);
        assert_eq!(e.config().max_iterations, 100);
        assert_eq!(e.config().color_multiple, 1);
        assert_eq!(e.config().scheme, ColorScheme::Scheme3);
    }

    #[test]
    fn zoom_in_then_out_restores_extent() {
        let mut e = engine(64);
        e.zoom_in(16.0, 48.0);
        assert!((e.region().width - 1.0).abs() < 1e-12);
        e.zoom_out(32.0, 32.0);
        assert!((e.region().width - 2.0).abs() < 1e-12);
    }

    #[test]
    fn animated_zoom_shows_previous_grid_and_publishes_new_one() {
        let mut e = engine(32);
        e.generate();
        let before = e.grid().clone();
        let frames_seen = AtomicU32::new(0);

        let stats = e.zoom_animated(Complex::new(-0.75, 0.1), ZOOM_IN_FACTOR, 12, |frame, grid| {
            assert_eq!(grid, &before);
            assert_eq!(frame.index, frames_seen.load(Ordering::Relaxed));
            frames_seen.fetch_add(1, Ordering::Relaxed);
        });

        assert_eq!(frames_seen.load(Ordering::Relaxed), 12);
        assert_eq!(stats.rows, 32);
        assert!((e.region().width - 1.0).abs() < 1e-12);
        assert_ne!(e.grid(), &before);

        let mut fresh = engine(32);
        fresh.zoom_relative(Complex::new(-0.75, 0.1), ZOOM_IN_FACTOR);
        fresh.generate();
        assert_eq!(fresh.grid(), e.grid());
    }

    #[test]
    fn custom_palette_is_used_by_recolor() {
        let mut e = engine(16);
        e.generate();
        let gray = Palette::from_anchors(
            "gray",
            &[crate::palette::Rgb::WHITE, crate::palette::Rgb::WHITE],
            &[0, 256],
        )
        .unwrap();
        e.set_palette(gray);
        e.recolor();
        for (&n, &c) in e.grid().iterations().iter().zip(e.grid().colors()) {
            if n < 100 {
                assert_eq!(c, crate::palette::Rgb::WHITE);
            }
        }
    }
}
