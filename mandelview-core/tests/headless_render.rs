use mandelview_core::{escape_point, Complex, Viewport};

/// Evaluate every pixel of a viewport serially into a flat row-major Vec.
fn render_grid(viewport: &Viewport, max_iter: u32) -> Vec<u32> {
    let res = viewport.resolution();
    let mut results = Vec::with_capacity((res * res) as usize);
    for py in 0..res {
        for px in 0..res {
            let c = viewport.pixel_to_complex(px as f64, py as f64);
            results.push(escape_point(c, max_iter));
        }
    }
    results
}

#[test]
fn canonical_view_has_interior_and_exterior() {
    let viewport = Viewport::new(100).unwrap();
    let results = render_grid(&viewport, 100);

    assert_eq!(results.len(), 100 * 100);
    let interior = results.iter().filter(|&&n| n == 100).count();
    assert!(interior > 0, "should have some interior points");
    assert!(interior < 10_000, "should have some escaped points");
}

#[test]
fn reference_pixels_at_resolution_100() {
    let viewport = Viewport::new(100).unwrap();
    let results = render_grid(&viewport, 100);

    // (0, 0) is c = -1.5 - 1.0i, which leaves the radius on its second iterate.
    assert_eq!(results[0], 1);
    // (50, 50) is c ≈ -0.5, inside the main cardioid.
    assert_eq!(results[50 * 100 + 50], 100);
}

#[test]
fn canonical_view_is_symmetric_about_real_axis() {
    // Row 50 is the real axis; rows 50 ± k mirror each other.
    let viewport = Viewport::new(100).unwrap();
    let results = render_grid(&viewport, 64);
    for k in [1usize, 10, 30, 49] {
        let above = &results[(50 - k) * 100..(50 - k) * 100 + 100];
        let below = &results[(50 + k) * 100..(50 + k) * 100 + 100];
        let mismatches = above.iter().zip(below).filter(|(a, b)| a != b).count();
        // Rounding in the pixel → complex map can nudge a handful of boundary pixels.
        assert!(mismatches <= 3, "row offset {k}: {mismatches} mismatches");
    }
}

#[test]
fn zooming_in_preserves_the_center_pixel() {
    let mut viewport = Viewport::new(64).unwrap();
    let target = Complex::new(-0.743_643_887, 0.131_825_904);
    viewport.zoom_relative(target, 0.001);

    let center = viewport.pixel_to_complex(32.0, 32.0);
    assert!((center.re - target.re).abs() < 1e-12);
    assert!((center.im - target.im).abs() < 1e-12);
}

#[test]
fn headless_render_is_deterministic() {
    let mut viewport = Viewport::new(80).unwrap();
    viewport.zoom_relative(Complex::new(-0.75, 0.1), 0.05);

    let run1 = render_grid(&viewport, 500);
    let run2 = render_grid(&viewport, 500);

    assert_eq!(run1, run2, "two identical renders must produce identical results");
}
