use crate::grid::PixelGrid;
use crate::palette::Palette;

/// Rebuild the color plane from the stored escape counts.
///
/// The cheap path for palette or color-multiple changes: no escape test is
/// re-run, and the output matches what a full pass would have written for
/// the same iteration data. The region and cap recorded in the grid are
/// left untouched.
pub fn recolor(grid: &mut PixelGrid, palette: &Palette, color_multiple: u32) {
    let max_iter = grid.max_iterations();
    let (iterations, colors) = grid.planes_mut();
    for (color, &n) in colors.iter_mut().zip(iterations) {
        *color = palette.lookup(n, max_iter, color_multiple);
    }
    grid.record_colors(palette.name(), color_multiple);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::WorkerPool;
    use mandelview_core::{ColorScheme, RenderConfig, Viewport};

    fn generated(config: &RenderConfig) -> PixelGrid {
        let pool = WorkerPool::new(2).unwrap();
        let viewport = Viewport::new(48).unwrap();
        let mut grid = PixelGrid::new(48).unwrap();
        pool.generate(&viewport, config, &Palette::build(config.scheme), &mut grid);
        grid
    }

    #[test]
    fn recolor_matches_full_generation() {
        let before = RenderConfig::new(80, 1, ColorScheme::Scheme1).unwrap();
        let after = RenderConfig::new(80, 7, ColorScheme::Scheme3).unwrap();

        let mut grid = generated(&before);
        recolor(&mut grid, &Palette::build(after.scheme), after.color_multiple);

        assert_eq!(grid, generated(&after));
    }

    #[test]
    fn recolor_is_idempotent() {
        let config = RenderConfig::new(80, 3, ColorScheme::Polynomial).unwrap();
        let palette = Palette::build(ColorScheme::Scheme2);
        let mut once = generated(&config);
        recolor(&mut once, &palette, 4);
        let mut twice = once.clone();
        recolor(&mut twice, &palette, 4);
        assert_eq!(once, twice);
    }

    #[test]
    fn recolor_records_new_palette_but_keeps_region() {
        let config = RenderConfig::default();
        let mut grid = generated(&config);
        let region = grid.region();
        recolor(&mut grid, &Palette::build(ColorScheme::Scheme2), 6);
        assert_eq!(grid.palette_name(), "scheme2");
        assert_eq!(grid.color_multiple(), 6);
        assert_eq!(grid.region(), region);
        assert_eq!(grid.max_iterations(), config.max_iterations);
    }

    #[test]
    fn capped_cells_stay_black() {
        let config = RenderConfig::default();
        let mut grid = generated(&config);
        recolor(&mut grid, &Palette::build(ColorScheme::Scheme3), 9);
        for (&n, &c) in grid.iterations().iter().zip(grid.colors()) {
            if n >= config.max_iterations {
                assert_eq!(c, crate::palette::Rgb::BLACK);
            }
        }
    }
}
