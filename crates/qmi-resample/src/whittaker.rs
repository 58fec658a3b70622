//! Shannon-Whittaker (sinc) interpolation of uniformly sampled signals.

use ndarray::Array2;

use crate::error::{ResampleError, validate_spacing};
use crate::translate::PixelSpacing;

/// Unnormalized sinc: `sin(x)/x`, with `sinc(0) = 1` exactly.
#[must_use]
pub fn sinc(x: f64) -> f64 {
    if x == 0.0 { 1.0 } else { x.sin() / x }
}

/// Evaluate `y(q) = Σ_n samples[n]·sinc(π(q - n·dt)/dt)` at every query.
///
/// `samples[n]` is the signal at `n·dt`.
pub fn whittaker_interpolate(
    queries: &[f64],
    samples: &[f64],
    dt: f64,
) -> Result<Vec<f64>, ResampleError> {
    validate_spacing(dt)?;
    Ok(queries
        .iter()
        .map(|&q| {
            samples
                .iter()
                .enumerate()
                .map(|(n, &value)| value * kernel(q, n, dt))
                .sum()
        })
        .collect())
}

/// Separable 2D interpolation on the grid `query_y × query_x`.
///
/// `samples[[r, c]]` is the image at `(c·dx, r·dy)`; the result has shape
/// `(query_y.len(), query_x.len())`.
pub fn whittaker_interpolate_2d(
    query_x: &[f64],
    query_y: &[f64],
    samples: &Array2<f64>,
    spacing: PixelSpacing,
) -> Result<Array2<f64>, ResampleError> {
    spacing.validate()?;
    let (rows, cols) = samples.dim();
    let kernel_x = Array2::from_shape_fn((query_x.len(), cols), |(i, c)| {
        kernel(query_x[i], c, spacing.dx)
    });
    let kernel_y = Array2::from_shape_fn((query_y.len(), rows), |(i, r)| {
        kernel(query_y[i], r, spacing.dy)
    });
    Ok(kernel_y.dot(samples).dot(&kernel_x.t()))
}

fn kernel(query: f64, index: usize, dt: f64) -> f64 {
    sinc(std::f64::consts::PI * (query - index as f64 * dt) / dt)
}
