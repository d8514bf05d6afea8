use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use mandelview_core::{escape_point, RenderConfig, Viewport};

use crate::grid::{PixelGrid, RowMut};
use crate::palette::Palette;
use crate::scheduler::{RowClaim, RowScheduler};

/// Worker count used when the platform cannot report its parallelism.
const FALLBACK_WORKERS: usize = 4;

/// Summary of one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationStats {
    pub elapsed: Duration,
    pub rows: u32,
    pub workers: usize,
    pub escaped: u64,
    pub interior: u64,
}

/// Number of hardware threads, or a small fixed count if unknown.
pub fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_WORKERS)
}

// ---------------------------------------------------------------------------
// Worker pool
// ---------------------------------------------------------------------------

/// A fixed set of OS threads reused across generation passes.
///
/// Each pass runs one row-claiming loop per worker inside a pool scope; the
/// scope returns only after every loop has seen [`RowClaim::Done`].
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    pub fn new(workers: usize) -> crate::Result<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("grid-worker-{i}"))
            .build()?;
        debug!(workers, "Worker pool started");
        Ok(Self { pool, workers })
    }

    /// One worker per available hardware thread.
    pub fn with_available_parallelism() -> crate::Result<Self> {
        Self::new(default_workers())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fill every cell of `grid` for `viewport` under `config`.
    ///
    /// Rows are claimed in increasing order and finished in any order;
    /// columns within a row go left to right. Each worker writes only the
    /// rows it claimed, so the output needs no lock.
    pub fn generate(
        &self,
        viewport: &Viewport,
        config: &RenderConfig,
        palette: &Palette,
        grid: &mut PixelGrid,
    ) -> GenerationStats {
        debug_assert_eq!(viewport.resolution(), grid.resolution());
        let start = Instant::now();
        let resolution = grid.resolution();
        let region = viewport.region();
        debug!(
            resolution,
            left = region.left,
            top = region.top,
            width = region.width,
            max_iter = config.max_iterations,
            "Starting generation pass"
        );

        grid.record_pass(region, config.max_iterations);
        grid.record_colors(palette.name(), config.color_multiple);
        let scheduler = RowScheduler::with_rows(grid.rows_mut().collect());
        let interior = AtomicU64::new(0);

        self.pool.scope(|scope| {
            for _ in 0..self.workers {
                scope.spawn(|_| {
                    let n = run_worker(&scheduler, viewport, config, palette);
                    interior.fetch_add(n, Ordering::Relaxed);
                });
            }
        });

        let rows = scheduler.claimed();
        let interior = interior.into_inner();
        let escaped = resolution as u64 * resolution as u64 - interior;
        let elapsed = start.elapsed();
        info!(
            elapsed_ms = elapsed.as_millis(),
            rows,
            workers = self.workers,
            escaped,
            interior,
            "Generation complete"
        );

        GenerationStats {
            elapsed,
            rows,
            workers: self.workers,
            escaped,
            interior,
        }
    }
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool").field("workers", &self.workers).finish()
    }
}

// ---------------------------------------------------------------------------
// Per-row work
// ---------------------------------------------------------------------------

/// Claim and fill rows until the scheduler runs dry. Returns the number of
/// cells that reached the iteration cap.
fn run_worker(
    scheduler: &RowScheduler<RowMut<'_>>,
    viewport: &Viewport,
    config: &RenderConfig,
    palette: &Palette,
) -> u64 {
    let mut interior = 0;
    while let RowClaim::Row { index, payload } = scheduler.claim() {
        interior += fill_row(index, payload, viewport, config, palette);
    }
    interior
}

fn fill_row(
    row: u32,
    out: RowMut<'_>,
    viewport: &Viewport,
    config: &RenderConfig,
    palette: &Palette,
) -> u64 {
    let py = row as f64;
    let max_iter = config.max_iterations;
    let mut interior = 0;
    let cells = out.iterations.iter_mut().zip(out.colors.iter_mut());
    for (col, (iteration, color)) in cells.enumerate() {
        let n = escape_point(viewport.pixel_to_complex(col as f64, py), max_iter);
        if n >= max_iter {
            interior += 1;
        }
        *iteration = n;
        *color = palette.lookup(n, max_iter, config.color_multiple);
    }
    interior
}
