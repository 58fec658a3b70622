use std::f64::consts::PI;
use std::sync::Arc;
use std::time::Instant;

use ndarray::{Array2, Axis};
use num_complex::Complex64;
use qmi_runtime::{OperationTrace, RuntimeMode, record_trace};
use rustfft::{Fft, FftPlanner};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Normalization, TransformKind};

/// Backends that can serve DFT requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BackendKind {
    /// O(n²) direct summation; slow, used as a reference.
    NaiveDft,
    #[default]
    RustFft,
}

impl BackendKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NaiveDft => "naive_dft",
            Self::RustFft => "rustfft",
        }
    }
}

/// Unscaled 1D transform kernel; normalization is applied by the caller.
pub trait FftBackend: Sync {
    fn kind(&self) -> BackendKind;

    fn transform_1d_unscaled(&self, data: &mut [Complex64], inverse: bool);

    /// Transform every lane of `data` running along `axis`.
    fn transform_axis_unscaled(&self, data: &mut Array2<Complex64>, axis: Axis, inverse: bool) {
        for mut lane in data.lanes_mut(axis) {
            let mut scratch = lane.to_vec();
            self.transform_1d_unscaled(&mut scratch, inverse);
            for (slot, value) in lane.iter_mut().zip(scratch) {
                *slot = value;
            }
        }
    }
}

#[derive(Debug, Default)]
pub struct NaiveDftBackend;

impl FftBackend for NaiveDftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::NaiveDft
    }

    fn transform_1d_unscaled(&self, data: &mut [Complex64], inverse: bool) {
        let n = data.len();
        if n == 0 {
            return;
        }

        let sign = if inverse { 1.0 } else { -1.0 };
        let input = data.to_vec();
        for (k, out) in data.iter_mut().enumerate() {
            let mut acc = Complex64::new(0.0, 0.0);
            for (t, &value) in input.iter().enumerate() {
                // k·t mod n keeps the twiddle angle inside one turn.
                let turns = ((k * t) % n) as f64 / n as f64;
                acc += value * Complex64::from_polar(1.0, sign * 2.0 * PI * turns);
            }
            *out = acc;
        }
    }
}

#[derive(Debug, Default)]
pub struct RustFftBackend;

impl RustFftBackend {
    fn plan(len: usize, inverse: bool) -> Arc<dyn Fft<f64>> {
        let mut planner = FftPlanner::new();
        if inverse {
            planner.plan_fft_inverse(len)
        } else {
            planner.plan_fft_forward(len)
        }
    }
}

impl FftBackend for RustFftBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::RustFft
    }

    fn transform_1d_unscaled(&self, data: &mut [Complex64], inverse: bool) {
        if data.is_empty() {
            return;
        }
        Self::plan(data.len(), inverse).process(data);
    }

    fn transform_axis_unscaled(&self, data: &mut Array2<Complex64>, axis: Axis, inverse: bool) {
        let len = data.len_of(axis);
        if len == 0 {
            return;
        }
        let plan = Self::plan(len, inverse);
        let mut scratch = vec![Complex64::new(0.0, 0.0); len];
        for mut lane in data.lanes_mut(axis) {
            for (slot, value) in scratch.iter_mut().zip(lane.iter()) {
                *slot = *value;
            }
            plan.process(&mut scratch);
            for (slot, value) in lane.iter_mut().zip(&scratch) {
                *slot = *value;
            }
        }
    }
}

static NAIVE_BACKEND: NaiveDftBackend = NaiveDftBackend;
static RUSTFFT_BACKEND: RustFftBackend = RustFftBackend;

/// Options shared by every transform and resampling entrypoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FftOptions {
    pub mode: RuntimeMode,
    pub normalization: Normalization,
    pub backend: BackendKind,
    pub check_finite: bool,
    /// Record an [`OperationTrace`] per call. Recording takes the shared
    /// trace log's lock, so parallel callers serialize briefly there.
    pub trace: bool,
}

impl Default for FftOptions {
    fn default() -> Self {
        Self {
            mode: RuntimeMode::Strict,
            normalization: Normalization::Backward,
            backend: BackendKind::RustFft,
            check_finite: false,
            trace: true,
        }
    }
}

impl FftOptions {
    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_normalization(mut self, normalization: Normalization) -> Self {
        self.normalization = normalization;
        self
    }

    #[must_use]
    pub fn with_backend(mut self, backend: BackendKind) -> Self {
        self.backend = backend;
        self
    }

    #[must_use]
    pub fn with_check_finite(mut self, check_finite: bool) -> Self {
        self.check_finite = check_finite;
        self
    }

    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Record the trace built by `build`, unless tracing is switched off.
    pub fn record(&self, build: impl FnOnce() -> OperationTrace) {
        if self.trace {
            record_trace(build());
        }
    }

    /// Whether sample values must be checked for NaN/inf before use.
    #[must_use]
    pub fn should_check_finite(&self) -> bool {
        self.check_finite || self.mode.rejects_non_finite()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FftError {
    #[error("invalid length: {detail}")]
    InvalidLength { detail: &'static str },
    #[error("invalid shape: {detail}")]
    InvalidShape { detail: &'static str },
    #[error("sample spacing must be finite and greater than zero")]
    NonPositiveSampleSpacing,
    #[error("unknown frequency sign convention '{value}', expected 'symmetric' or 'positive'")]
    UnknownConvention { value: String },
    #[error("non-finite input rejected by finite check")]
    NonFiniteInput,
}

/// 1D forward complex DFT.
pub fn fft(input: &[Complex64], options: &FftOptions) -> Result<Vec<Complex64>, FftError> {
    run_complex_1d(TransformKind::Fft, input, options, false)
}

/// 1D inverse complex DFT.
pub fn ifft(input: &[Complex64], options: &FftOptions) -> Result<Vec<Complex64>, FftError> {
    run_complex_1d(TransformKind::Ifft, input, options, true)
}

/// 2D forward complex DFT via row/column decomposition.
pub fn fft2(
    input: &Array2<Complex64>,
    options: &FftOptions,
) -> Result<Array2<Complex64>, FftError> {
    run_complex_2d(TransformKind::Fft2, input, options, false)
}

/// 2D inverse complex DFT via row/column decomposition.
pub fn ifft2(
    input: &Array2<Complex64>,
    options: &FftOptions,
) -> Result<Array2<Complex64>, FftError> {
    run_complex_2d(TransformKind::Ifft2, input, options, true)
}

/// 2D forward DFT of a real image.
pub fn fft2_real(input: &Array2<f64>, options: &FftOptions) -> Result<Array2<Complex64>, FftError> {
    fft2(&input.mapv(|value| Complex64::new(value, 0.0)), options)
}

/// Reject non-finite values when the options demand it.
pub fn validate_finite<'a>(
    values: impl IntoIterator<Item = &'a Complex64>,
    options: &FftOptions,
) -> Result<(), FftError> {
    if options.should_check_finite() && values.into_iter().any(|value| !value.is_finite()) {
        return Err(FftError::NonFiniteInput);
    }
    Ok(())
}

fn run_complex_1d(
    kind: TransformKind,
    input: &[Complex64],
    options: &FftOptions,
    inverse: bool,
) -> Result<Vec<Complex64>, FftError> {
    if input.is_empty() {
        return Err(FftError::InvalidLength {
            detail: "input length must be greater than zero",
        });
    }
    validate_finite(input, options)?;

    let backend = resolve_backend(options.backend);
    let started = Instant::now();
    let mut output = input.to_vec();
    backend.transform_1d_unscaled(&mut output, inverse);
    apply_normalization(output.iter_mut(), options.normalization, input.len(), inverse);

    options.record(|| {
        OperationTrace::new("fft", kind.name(), options.mode)
            .with_input_shape(&[input.len()])
            .with_output_shape(&[output.len()])
            .with_detail(backend.kind().name())
            .finished(started)
    });

    Ok(output)
}

fn run_complex_2d(
    kind: TransformKind,
    input: &Array2<Complex64>,
    options: &FftOptions,
    inverse: bool,
) -> Result<Array2<Complex64>, FftError> {
    let (rows, cols) = input.dim();
    if rows == 0 || cols == 0 {
        return Err(FftError::InvalidShape {
            detail: "2d shape dimensions must be greater than zero",
        });
    }
    validate_finite(input.iter(), options)?;

    let backend = resolve_backend(options.backend);
    let started = Instant::now();
    let mut output = input.to_owned();
    backend.transform_axis_unscaled(&mut output, Axis(1), inverse);
    backend.transform_axis_unscaled(&mut output, Axis(0), inverse);
    apply_normalization(output.iter_mut(), options.normalization, rows * cols, inverse);

    options.record(|| {
        OperationTrace::new("fft", kind.name(), options.mode)
            .with_input_shape(&[rows, cols])
            .with_output_shape(&[rows, cols])
            .with_detail(backend.kind().name())
            .finished(started)
    });

    Ok(output)
}

fn resolve_backend(kind: BackendKind) -> &'static dyn FftBackend {
    match kind {
        BackendKind::NaiveDft => &NAIVE_BACKEND,
        BackendKind::RustFft => &RUSTFFT_BACKEND,
    }
}

fn normalization_scale(normalization: Normalization, n: usize, inverse: bool) -> f64 {
    if n == 0 {
        return 1.0;
    }
    let n_as_f64 = n as f64;
    match normalization {
        Normalization::Backward => {
            if inverse {
                1.0 / n_as_f64
            } else {
                1.0
            }
        }
        Normalization::Forward => {
            if inverse {
                1.0
            } else {
                1.0 / n_as_f64
            }
        }
        Normalization::Ortho => 1.0 / n_as_f64.sqrt(),
    }
}

fn apply_normalization<'a>(
    data: impl Iterator<Item = &'a mut Complex64>,
    normalization: Normalization,
    n: usize,
    inverse: bool,
) {
    let scale = normalization_scale(normalization, n, inverse);
    if (scale - 1.0).abs() <= f64::EPSILON {
        return;
    }
    for value in data {
        *value *= scale;
    }
}
