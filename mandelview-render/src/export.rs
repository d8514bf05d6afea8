//! PNG export of the color plane with embedded metadata (tEXt chunks).

use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDateTime;
use tracing::debug;

use mandelview_core::ComplexRegion;

use crate::engine::MandelbrotEngine;
use crate::error::RenderError;
use crate::grid::PixelGrid;

/// Render parameters to embed in an exported PNG.
#[derive(Debug, Clone)]
pub struct ExportMetadata {
    pub region: ComplexRegion,
    pub max_iterations: u32,
    pub color_multiple: u32,
    pub palette_name: String,
    pub resolution: u32,
}

impl ExportMetadata {
    /// Describe what the grid's pixels show.
    pub fn from_grid(grid: &PixelGrid) -> Self {
        Self {
            region: grid.region(),
            max_iterations: grid.max_iterations(),
            color_multiple: grid.color_multiple(),
            palette_name: grid.palette_name().to_string(),
            resolution: grid.resolution(),
        }
    }

    /// Describe the engine's published grid. Pending viewport or palette
    /// changes are not included until the next pass or recolor.
    pub fn from_engine(engine: &MandelbrotEngine) -> Self {
        Self::from_grid(engine.grid())
    }
}

/// Default file name for a save made at `now`: `YYYY-MM-DD.HH-MM-SS.png`.
pub fn timestamped_filename(now: NaiveDateTime) -> String {
    format!("{}.png", now.format("%Y-%m-%d.%H-%M-%S"))
}

/// Write the grid's color plane as an 8-bit RGB PNG.
pub fn export_png(grid: &PixelGrid, path: &Path, metadata: &ExportMetadata) -> crate::Result<()> {
    let fail = |what: &str, e: &dyn std::fmt::Display| RenderError::Export(format!("{what}: {e}"));

    let file = std::fs::File::create(path).map_err(|e| fail("failed to create file", &e))?;
    let writer = BufWriter::new(file);

    let side = grid.resolution();
    let mut encoder = png::Encoder::new(writer, side, side);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::Default);

    encoder
        .add_text_chunk("Software".to_string(), "Mandelview".to_string())
        .map_err(|e| fail("failed to add text chunk", &e))?;
    encoder
        .add_text_chunk("Description".to_string(), build_description(metadata))
        .map_err(|e| fail("failed to add text chunk", &e))?;
    for (key, value) in build_metadata_pairs(metadata) {
        encoder
            .add_text_chunk(key, value)
            .map_err(|e| fail("failed to add text chunk", &e))?;
    }

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| fail("failed to write PNG header", &e))?;
    png_writer
        .write_image_data(&grid.to_rgb_bytes())
        .map_err(|e| fail("failed to write PNG image data", &e))?;

    debug!("Exported PNG {side}x{side} to {}", path.display());
    Ok(())
}

fn build_description(meta: &ExportMetadata) -> String {
    let center = meta.region.center();
    format!(
        "Mandelbrot - Center: {center}, Width: {}, Iterations: {}",
        meta.region.width, meta.max_iterations,
    )
}

fn build_metadata_pairs(meta: &ExportMetadata) -> Vec<(String, String)> {
    vec![
        ("Mandelview.Left".into(), meta.region.left.to_string()),
        ("Mandelview.Top".into(), meta.region.top.to_string()),
        ("Mandelview.Width".into(), meta.region.width.to_string()),
        ("Mandelview.Height".into(), meta.region.height.to_string()),
        ("Mandelview.MaxIterations".into(), meta.max_iterations.to_string()),
        ("Mandelview.ColorMultiple".into(), meta.color_multiple.to_string()),
        ("Mandelview.Palette".into(), meta.palette_name.clone()),
        (
            "Mandelview.Resolution".into(),
            format!("{0}x{0}", meta.resolution),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Rgb;
    use chrono::NaiveDate;
    use std::io::Read;

    fn metadata(resolution: u32) -> ExportMetadata {
        ExportMetadata {
            region: ComplexRegion::CANONICAL,
            max_iterations: 100,
            color_multiple: 1,
            palette_name: "scheme1".into(),
            resolution,
        }
    }

    #[test]
    fn filename_uses_timestamp() {
        let t = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap();
        assert_eq!(timestamped_filename(t), "2024-03-09.07-05-42.png");
    }

    #[test]
    fn export_creates_valid_png() {
        let grid = PixelGrid::new(4).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");
        export_png(&grid, &path, &metadata(4)).expect("export should succeed");

        let mut file = std::fs::File::open(&path).expect("file should exist");
        let mut header = [0u8; 8];
        file.read_exact(&mut header).expect("should read header");
        assert_eq!(&header, b"\x89PNG\r\n\x1a\n", "valid PNG signature");
    }

    #[test]
    fn export_round_trips_pixels_and_text() {
        let mut grid = PixelGrid::new(2).unwrap();
        if let Some(row) = grid.rows_mut().next() {
            row.colors[1] = Rgb::new(10, 20, 30);
        }
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("meta.png");
        export_png(&grid, &path, &metadata(2)).unwrap();

        let decoder = png::Decoder::new(std::fs::File::open(&path).unwrap());
        let mut reader = decoder.read_info().expect("should read info");
        {
            let texts = &reader.info().uncompressed_latin1_text;
            assert!(texts
                .iter()
                .any(|t| t.keyword == "Software" && t.text == "Mandelview"));
            assert!(texts
                .iter()
                .any(|t| t.keyword == "Mandelview.MaxIterations" && t.text == "100"));
            assert!(texts
                .iter()
                .any(|t| t.keyword == "Mandelview.Resolution" && t.text == "2x2"));
        }
        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).expect("should decode frame");
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(&buf[..info.buffer_size()], grid.to_rgb_bytes().as_slice());
    }

    #[test]
    fn metadata_describes_published_grid_not_pending_changes() {
        use mandelview_core::{ColorScheme, Complex, RenderConfig};

        let mut engine = MandelbrotEngine::with_workers(16, RenderConfig::default(), 2).unwrap();
        engine.generate();
        engine.zoom_relative(Complex::new(0.3, 0.3), 0.01);
        engine.set_scheme(ColorScheme::Scheme3);
        engine.set_color_multiple(7).unwrap();

        let meta = ExportMetadata::from_engine(&engine);
        assert_eq!(meta.region, ComplexRegion::CANONICAL);
        assert_eq!(meta.palette_name, "scheme1");
        assert_eq!(meta.color_multiple, 1);
        assert_eq!(meta.max_iterations, 100);
        assert_eq!(meta.resolution, 16);

        engine.recolor();
        let meta = ExportMetadata::from_engine(&engine);
        assert_eq!(meta.region, ComplexRegion::CANONICAL);
        assert_eq!(meta.palette_name, "scheme3");
        assert_eq!(meta.color_multiple, 7);

        engine.generate();
        let meta = ExportMetadata::from_engine(&engine);
        assert!((meta.region.width - 0.02).abs() < 1e-12);
        assert!((meta.region.center().re - 0.3).abs() < 1e-12);
    }

    #[test]
    fn export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/out.png");
        let err = export_png(&PixelGrid::new(2).unwrap(), &path, &metadata(2)).unwrap_err();
        assert!(matches!(err, RenderError::Export(_)));
    }
}
