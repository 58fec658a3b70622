//! Pixel replication: each pixel becomes a `factor_y × factor_x` block.
//!
//! In frequency space this is a tiling of the spectrum multiplied by the
//! geometric sum `Σ_l exp(-2πi·k·l/(mN))` along each axis. Unlike
//! [`crate::expand`], the result is not band-limited: the blocks have sharp
//! edges.

use std::f64::consts::PI;
use std::time::Instant;

use ndarray::Array2;
use qmi_fft::{
    Complex64, FftOptions, Origin, fftshift_1d, fftshift_2d, ifftshift_1d, ifftshift_2d,
    validate_finite,
};
use qmi_runtime::OperationTrace;

use crate::error::{ResampleError, validate_factor, validate_nonempty};

/// Geometric-sum factor for edge-layout bin `k` of a length-`len` axis
/// replicated `factor` times.
///
/// Equals `factor` at `k = 0` and vanishes at every other multiple of `len`.
/// Returns zero if `len` or `factor` is zero.
#[must_use]
pub fn replication_factor(k: usize, len: usize, factor: usize) -> Complex64 {
    let expanded_len = len * factor;
    if expanded_len == 0 {
        return Complex64::new(0.0, 0.0);
    }
    let k = k % expanded_len;
    if k == 0 {
        return Complex64::new(factor as f64, 0.0);
    }
    let numerator = 1.0 - Complex64::from_polar(1.0, -2.0 * PI * (k % len) as f64 / len as f64);
    let denominator = 1.0 - Complex64::from_polar(1.0, -2.0 * PI * k as f64 / expanded_len as f64);
    numerator / denominator
}

/// Frequency-domain replication of a single lane.
pub fn replicate_pixels_freq_1d(
    lane: &[Complex64],
    factor: usize,
    origin: Origin,
    options: &FftOptions,
) -> Result<Vec<Complex64>, ResampleError> {
    validate_factor("x", factor)?;
    if lane.is_empty() {
        return Err(ResampleError::InvalidArgument {
            detail: "spectrum must not be empty",
        });
    }
    validate_finite(lane, options)?;

    let started = Instant::now();
    let edge = match origin {
        Origin::Edge => lane.to_vec(),
        Origin::Centered => ifftshift_1d(lane),
    };
    let len = edge.len();
    let tiled = (0..len * factor)
        .map(|k| replication_factor(k, len, factor) * edge[k % len])
        .collect::<Vec<_>>();
    let replicated = match origin {
        Origin::Edge => tiled,
        Origin::Centered => fftshift_1d(&tiled),
    };

    options.record(|| {
        OperationTrace::new("resample", "replicate_pixels_freq_1d", options.mode)
            .with_input_shape(&[len])
            .with_output_shape(&[replicated.len()])
            .with_detail(format!("factor={factor} origin={origin:?}"))
            .finished(started)
    });
    Ok(replicated)
}

/// Frequency-domain equivalent of [`replicate_pixels`].
///
/// `fft2(replicate_pixels(img, mx, my))` equals
/// `replicate_pixels_freq(fft2(img), mx, my, Origin::Edge, ..)`.
pub fn replicate_pixels_freq(
    spectrum: &Array2<Complex64>,
    factor_x: usize,
    factor_y: usize,
    origin: Origin,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    validate_factor("x", factor_x)?;
    validate_factor("y", factor_y)?;
    validate_nonempty(spectrum.dim())?;
    validate_finite(spectrum.iter(), options)?;

    let started = Instant::now();
    let edge = match origin {
        Origin::Edge => spectrum.to_owned(),
        Origin::Centered => ifftshift_2d(spectrum),
    };
    let (rows, cols) = edge.dim();
    let weights_x = (0..cols * factor_x)
        .map(|k| replication_factor(k, cols, factor_x))
        .collect::<Vec<_>>();
    let weights_y = (0..rows * factor_y)
        .map(|k| replication_factor(k, rows, factor_y))
        .collect::<Vec<_>>();
    let tiled = Array2::from_shape_fn((rows * factor_y, cols * factor_x), |(r, c)| {
        weights_y[r] * weights_x[c] * edge[[r % rows, c % cols]]
    });
    let replicated = match origin {
        Origin::Edge => tiled,
        Origin::Centered => fftshift_2d(&tiled),
    };

    options.record(|| {
        OperationTrace::new("resample", "replicate_pixels_freq", options.mode)
            .with_input_shape(&[rows, cols])
            .with_output_shape(&[replicated.nrows(), replicated.ncols()])
            .with_detail(format!("factors=({factor_x},{factor_y}) origin={origin:?}"))
            .finished(started)
    });
    Ok(replicated)
}

/// Real-space replication: the Kronecker product of `image` with an
/// all-ones `factor_y × factor_x` block.
pub fn replicate_pixels<T: Clone>(
    image: &Array2<T>,
    factor_x: usize,
    factor_y: usize,
) -> Result<Array2<T>, ResampleError> {
    validate_factor("x", factor_x)?;
    validate_factor("y", factor_y)?;
    let (rows, cols) = image.dim();
    Ok(Array2::from_shape_fn(
        (rows * factor_y, cols * factor_x),
        |(r, c)| image[[r / factor_y, c / factor_x]].clone(),
    ))
}
