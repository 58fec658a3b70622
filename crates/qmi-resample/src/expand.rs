//! Band-limited expansion: resample an image onto a finer grid without
//! changing its continuous-frequency content.
//!
//! The old spectrum is placed, bin for bin, in the middle of a zeroed
//! spectrum `m` times longer and scaled by `m` so that the backward-normalized
//! inverse transform keeps the original amplitudes. For even lengths the
//! unmatched Nyquist bin has no partner on the longer axis, so its value is
//! split evenly between the bins at `-n/2` and `+n/2`.
//!
//! In 2D the split happens once per axis, so the four corner entries where
//! both Nyquist bins intersect have been halved twice. By default they are
//! then doubled, leaving half the original value in each; see
//! [`NyquistCorners`] for the alternative.

use std::time::Instant;

use ndarray::{Array2, Axis};
use qmi_fft::{
    Complex64, FftOptions, Normalization, Origin, fft2_real, fftshift_1d, fftshift_2d, ifft2,
    ifftshift_1d, ifftshift_2d, map_lanes, validate_finite, zero_index,
};
use qmi_runtime::OperationTrace;

use crate::error::{ResampleError, validate_factor, validate_nonempty};

/// Weighting of the four entries where both split Nyquist bins intersect,
/// used when both dimensions are even.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NyquistCorners {
    /// Each entry doubled after both splits, half the original value each.
    /// The `(-1)^(x+y)` component of the image comes back with twice its
    /// amplitude on the original sample grid.
    #[default]
    Doubled,
    /// No correction: a quarter of the original value each. The expanded
    /// image passes through every original sample.
    Quarter,
}

/// Expand one spectrum lane by `factor`.
pub fn expand_spectrum_1d(
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
    let expanded = if factor == 1 {
        lane.to_vec()
    } else {
        match origin {
            Origin::Centered => expand_centered_lane(lane, factor),
            Origin::Edge => ifftshift_1d(&expand_centered_lane(&fftshift_1d(lane), factor)),
        }
    };

    options.record(|| {
        OperationTrace::new("resample", "expand_spectrum_1d", options.mode)
            .with_input_shape(&[lane.len()])
            .with_output_shape(&[expanded.len()])
            .with_detail(format!("factor={factor} origin={origin:?}"))
            .finished(started)
    });
    Ok(expanded)
}

/// Expand a 2D spectrum by `factor_x` along columns and `factor_y` along rows.
///
/// The result has shape `(factor_y·ny, factor_x·nx)` and the same layout
/// (`origin`) as the input.
pub fn expand_spectrum(
    spectrum: &Array2<Complex64>,
    factor_x: usize,
    factor_y: usize,
    origin: Origin,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    expand_spectrum_with(
        spectrum,
        factor_x,
        factor_y,
        origin,
        NyquistCorners::default(),
        options,
    )
}

/// [`expand_spectrum`] with an explicit Nyquist-corner weighting.
pub fn expand_spectrum_with(
    spectrum: &Array2<Complex64>,
    factor_x: usize,
    factor_y: usize,
    origin: Origin,
    corners: NyquistCorners,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    validate_factor("x", factor_x)?;
    validate_factor("y", factor_y)?;
    validate_nonempty(spectrum.dim())?;
    validate_finite(spectrum.iter(), options)?;

    let started = Instant::now();
    let expanded = match origin {
        Origin::Centered => expand_centered(spectrum, factor_x, factor_y, corners),
        Origin::Edge => ifftshift_2d(&expand_centered(
            &fftshift_2d(spectrum),
            factor_x,
            factor_y,
            corners,
        )),
    };

    let (rows, cols) = spectrum.dim();
    options.record(|| {
        OperationTrace::new("resample", "expand_spectrum", options.mode)
            .with_input_shape(&[rows, cols])
            .with_output_shape(&[expanded.nrows(), expanded.ncols()])
            .with_detail(format!(
                "factors=({factor_x},{factor_y}) origin={origin:?} corners={corners:?}"
            ))
            .finished(started)
    });
    Ok(expanded)
}

/// Real-space expansion: `ifft2(expand_spectrum(fft2(image)))`.
///
/// Both transforms run with backward normalization whatever `options` asks
/// for, since the spectrum changes size between them.
pub fn expand_image(
    image: &Array2<f64>,
    factor_x: usize,
    factor_y: usize,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    expand_image_with(
        image,
        factor_x,
        factor_y,
        NyquistCorners::default(),
        options,
    )
}

/// [`expand_image`] with an explicit Nyquist-corner weighting.
pub fn expand_image_with(
    image: &Array2<f64>,
    factor_x: usize,
    factor_y: usize,
    corners: NyquistCorners,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    validate_factor("x", factor_x)?;
    validate_factor("y", factor_y)?;
    validate_nonempty(image.dim())?;

    let options = options.clone().with_normalization(Normalization::Backward);
    let spectrum = fft2_real(image, &options)?;
    let expanded = expand_spectrum_with(
        &spectrum,
        factor_x,
        factor_y,
        Origin::Edge,
        corners,
        &options,
    )?;
    Ok(ifft2(&expanded, &options)?)
}

fn expand_centered(
    spectrum: &Array2<Complex64>,
    factor_x: usize,
    factor_y: usize,
    corners: NyquistCorners,
) -> Array2<Complex64> {
    let (rows, cols) = spectrum.dim();
    let mut expanded = spectrum.to_owned();
    if factor_x > 1 {
        let cols = expanded.ncols() * factor_x;
        expanded = map_lanes(&expanded, Axis(1), cols, |lane| {
            expand_centered_lane(lane, factor_x)
        });
    }
    if factor_y > 1 {
        let rows = expanded.nrows() * factor_y;
        expanded = map_lanes(&expanded, Axis(0), rows, |lane| {
            expand_centered_lane(lane, factor_y)
        });
    }
    if corners == NyquistCorners::Doubled
        && factor_x > 1
        && factor_y > 1
        && rows.is_multiple_of(2)
        && cols.is_multiple_of(2)
    {
        for r in nyquist_pair(rows, factor_y) {
            for c in nyquist_pair(cols, factor_x) {
                expanded[[r, c]] *= 2.0;
            }
        }
    }
    expanded
}

/// Indices of the split Nyquist bins in a centered lane of length `len·factor`.
fn nyquist_pair(len: usize, factor: usize) -> [usize; 2] {
    let center = zero_index(len * factor, Origin::Centered);
    [center - len / 2, center + len / 2]
}

/// Centered lane of length `n` to centered lane of length `factor·n`.
///
/// Both axes share the bin spacing `1/n`, so matching the old zero bin to the
/// new zero bin places every other bin as well.
fn expand_centered_lane(lane: &[Complex64], factor: usize) -> Vec<Complex64> {
    let len = lane.len();
    let expanded_len = len * factor;
    let center = zero_index(expanded_len, Origin::Centered);
    let start = center - zero_index(len, Origin::Centered);
    let scale = factor as f64;

    let mut expanded = vec![Complex64::new(0.0, 0.0); expanded_len];
    for (slot, &value) in expanded[start..start + len].iter_mut().zip(lane) {
        *slot = value * scale;
    }

    if factor > 1 && len.is_multiple_of(2) {
        let [low, high] = nyquist_pair(len, factor);
        let half = expanded[low] * 0.5;
        expanded[low] = half;
        expanded[high] = half;
    }
    expanded
}
