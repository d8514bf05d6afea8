use crate::complex::Complex;

/// Squared bailout radius. Once `|z|² > 4` the orbit is certain to diverge.
pub const BAILOUT_SQ: f64 = 4.0;

/// Escape time of `c = c_re + c_im·i` under `z ← z² + c`, starting at `z = 0`.
///
/// Returns the index of the first iterate with `|z|² > 4`, or `max_iter` if
/// the orbit stays bounded for `max_iter` steps or revisits a checkpoint.
///
/// Periodicity is checked against a single saved point per window. Window
/// ends double (4, 8, 16, …, capped at `max_iter`), so a bounded periodic
/// orbit is caught after a logarithmic number of checkpoints instead of
/// being iterated to the cap. The comparison is exact float equality.
pub fn escape(c_re: f64, c_im: f64, max_iter: u32) -> u32 {
    let (mut x, mut y) = (0.0_f64, 0.0_f64);
    let (mut x2, mut y2) = (0.0_f64, 0.0_f64);
    let mut iter: u32 = 0;
    let mut period: u32 = 2;

    while iter < max_iter {
        let (x_check, y_check) = (x, y);
        period = period.saturating_mul(2).min(max_iter);

        while iter < period {
            // Three multiplications per step: 2xy reuses the cached squares.
            y = x * y;
            y += y;
            y += c_im;
            x = x2 - y2 + c_re;
            x2 = x * x;
            y2 = y * y;

            if x2 + y2 > BAILOUT_SQ {
                return iter;
            }
            if x == x_check && y == y_check {
                return max_iter;
            }
            iter += 1;
        }
    }

    max_iter
}

/// [`escape`] for a [`Complex`] point.
#[inline]
pub fn escape_point(c: Complex, max_iter: u32) -> u32 {
    escape(c.re, c.im, max_iter)
}
