//! Translation of images and spectra by arbitrary (sub-pixel) offsets.
//!
//! All three operations share one sign convention: translating `img` by
//! `(xo, yo)` yields `img(x + xo, y + yo)`, i.e. content moves toward
//! smaller coordinates.

use std::f64::consts::PI;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Instant;

use ndarray::{Array2, Axis, Slice};
use qmi_fft::{
    AxisConvention, Complex64, FftOptions, fft2, fft2_real, fftshift_2d, frequency_axis, ifft2,
    ifftshift_2d, position_axis, roll_2d, validate_finite,
};
use qmi_runtime::OperationTrace;

use crate::error::{ResampleError, validate_nonempty, validate_spacing};

/// A pair of offsets along x (columns) and y (rows), in caller units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset2 {
    pub x: f64,
    pub y: f64,
}

impl Offset2 {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Physical size of one pixel along x and y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpacing {
    pub dx: f64,
    pub dy: f64,
}

impl PixelSpacing {
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub const fn uniform(d: f64) -> Self {
        Self { dx: d, dy: d }
    }

    pub fn validate(self) -> Result<(), ResampleError> {
        validate_spacing(self.dx)?;
        validate_spacing(self.dy)
    }
}

impl Default for PixelSpacing {
    fn default() -> Self {
        Self::uniform(1.0)
    }
}

/// What fills the pixels uncovered by an integer-pixel translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BoundaryMode {
    /// Pixels leaving one edge re-enter at the opposite edge.
    #[default]
    Wrap,
    /// Uncovered rows and columns are set to the pad value.
    NoWrap,
}

impl BoundaryMode {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wrap => "wrap",
            Self::NoWrap => "no-wrap",
        }
    }
}

impl Display for BoundaryMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BoundaryMode {
    type Err = ResampleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "wrap" => Ok(Self::Wrap),
            "no-wrap" => Ok(Self::NoWrap),
            other => Err(ResampleError::InvalidBoundary {
                value: other.to_owned(),
            }),
        }
    }
}

/// Result of [`translate_pix`].
#[derive(Debug, Clone, PartialEq)]
pub struct PixelTranslation<T> {
    pub image: Array2<T>,
    /// Realized shift along x, in whole pixels.
    pub pixels_x: i64,
    /// Realized shift along y, in whole pixels.
    pub pixels_y: i64,
}

/// Shift a centered spectrum in frequency: returns `S'(f) = S(f + shift)`.
///
/// `spacing` is the real-space pixel size of the image the spectrum came
/// from. `apodization`, if given, must match the spectrum's shape; the same
/// array multiplies the spectrum before the inverse transform and the
/// modulated edge-layout image before the forward transform.
pub fn translate_spectrum(
    spectrum: &Array2<Complex64>,
    shift: Offset2,
    spacing: PixelSpacing,
    apodization: Option<&Array2<f64>>,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    validate_nonempty(spectrum.dim())?;
    spacing.validate()?;
    validate_shift(shift)?;
    if let Some(apod) = apodization
        && apod.dim() != spectrum.dim()
    {
        return Err(ResampleError::ShapeMismatch {
            expected: spectrum.dim(),
            actual: apod.dim(),
        });
    }
    validate_finite(spectrum.iter(), options)?;

    let started = Instant::now();
    let (rows, cols) = spectrum.dim();
    let weighted = match apodization {
        Some(apod) => spectrum * &apod.mapv(|w| Complex64::new(w, 0.0)),
        None => spectrum.to_owned(),
    };
    let mut image = ifft2(&ifftshift_2d(&weighted), options)?;

    let x = position_axis(cols, spacing.dx, AxisConvention::EDGE_SYMMETRIC)?;
    let y = position_axis(rows, spacing.dy, AxisConvention::EDGE_SYMMETRIC)?;
    let ramp_x = phase_ramp(&x, -shift.x);
    let ramp_y = phase_ramp(&y, -shift.y);
    for ((r, c), value) in image.indexed_iter_mut() {
        *value *= ramp_y[r] * ramp_x[c];
    }
    if let Some(apod) = apodization {
        image.zip_mut_with(apod, |value, &w| *value *= w);
    }

    let shifted = fftshift_2d(&fft2(&image, options)?);
    options.record(|| {
        OperationTrace::new("resample", "translate_spectrum", options.mode)
            .with_input_shape(&[rows, cols])
            .with_output_shape(&[rows, cols])
            .with_detail(format!(
                "shift=({},{}) apodized={}",
                shift.x,
                shift.y,
                apodization.is_some()
            ))
            .finished(started)
    });
    Ok(shifted)
}

/// Translate a real image by a sub-pixel offset via the Fourier shift
/// theorem; returns `img(x + shift.x, y + shift.y)` (periodic).
pub fn translate_image(
    image: &Array2<f64>,
    shift: Offset2,
    spacing: PixelSpacing,
    options: &FftOptions,
) -> Result<Array2<Complex64>, ResampleError> {
    validate_nonempty(image.dim())?;
    spacing.validate()?;
    validate_shift(shift)?;

    let started = Instant::now();
    let (rows, cols) = image.dim();
    let mut spectrum = fft2_real(image, options)?;
    let fx = frequency_axis(cols, spacing.dx, AxisConvention::EDGE_SYMMETRIC)?;
    let fy = frequency_axis(rows, spacing.dy, AxisConvention::EDGE_SYMMETRIC)?;
    let ramp_x = phase_ramp(&fx, shift.x);
    let ramp_y = phase_ramp(&fy, shift.y);
    for ((r, c), value) in spectrum.indexed_iter_mut() {
        *value *= ramp_y[r] * ramp_x[c];
    }
    let translated = ifft2(&spectrum, options)?;

    options.record(|| {
        OperationTrace::new("resample", "translate_image", options.mode)
            .with_input_shape(&[rows, cols])
            .with_output_shape(&[rows, cols])
            .with_detail(format!("shift=({},{})", shift.x, shift.y))
            .finished(started)
    });
    Ok(translated)
}

/// Translate by the whole number of pixels nearest to `shift / spacing`
/// (ties to even).
///
/// With [`BoundaryMode::NoWrap`], rows and columns that would have wrapped
/// around are set to `pad`; a shift at least as large as the image pads
/// everything.
pub fn translate_pix<T: Clone>(
    image: &Array2<T>,
    shift: Offset2,
    spacing: PixelSpacing,
    boundary: BoundaryMode,
    pad: T,
) -> Result<PixelTranslation<T>, ResampleError> {
    spacing.validate()?;
    validate_shift(shift)?;
    let pixels_x = whole_pixels(shift.x / spacing.dx)?;
    let pixels_y = whole_pixels(shift.y / spacing.dy)?;
    let (rows, cols) = image.dim();

    let mut moved = roll_2d(image, wrap_shift(-pixels_y, rows), wrap_shift(-pixels_x, cols));
    if boundary == BoundaryMode::NoWrap {
        let (start, end) = vacated_range(-pixels_x, cols);
        moved
            .slice_axis_mut(Axis(1), Slice::from(start..end))
            .fill(pad.clone());
        let (start, end) = vacated_range(-pixels_y, rows);
        moved
            .slice_axis_mut(Axis(0), Slice::from(start..end))
            .fill(pad);
    }

    Ok(PixelTranslation {
        image: moved,
        pixels_x,
        pixels_y,
    })
}

fn validate_shift(shift: Offset2) -> Result<(), ResampleError> {
    if !shift.is_finite() {
        return Err(ResampleError::InvalidArgument {
            detail: "shift must be finite",
        });
    }
    Ok(())
}

/// `exp(2πi·axis[i]·scale)` for every entry of `axis`.
fn phase_ramp(axis: &[f64], scale: f64) -> Vec<Complex64> {
    axis.iter()
        .map(|&value| Complex64::from_polar(1.0, 2.0 * PI * value * scale))
        .collect()
}

fn whole_pixels(pixels: f64) -> Result<i64, ResampleError> {
    let rounded = pixels.round_ties_even();
    if !rounded.is_finite() || rounded.abs() >= i64::MAX as f64 {
        return Err(ResampleError::InvalidArgument {
            detail: "pixel shift does not fit in an i64",
        });
    }
    Ok(rounded as i64)
}

/// Roll amount reduced modulo `len`, so it always fits an `isize`.
fn wrap_shift(roll: i64, len: usize) -> isize {
    if len == 0 {
        return 0;
    }
    roll.rem_euclid(len as i64) as isize
}

/// Index range uncovered by rolling `len` entries by `roll`.
fn vacated_range(roll: i64, len: usize) -> (usize, usize) {
    let extent = roll.unsigned_abs().min(len as u64) as usize;
    if roll >= 0 { (0, extent) } else { (len - extent, len) }
}
