use qmi_fft::FftError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResampleError {
    #[error("resampling factor along {axis} must be at least 1, got {factor}")]
    InvalidFactor { axis: &'static str, factor: usize },
    #[error("pixel spacing must be finite and greater than zero")]
    InvalidSpacing,
    #[error("invalid argument: {detail}")]
    InvalidArgument { detail: &'static str },
    #[error("invalid shape: {detail}")]
    InvalidShape { detail: &'static str },
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("unknown boundary mode '{value}', expected 'wrap' or 'no-wrap'")]
    InvalidBoundary { value: String },
    #[error(transparent)]
    Fft(#[from] FftError),
}

pub(crate) fn validate_factor(axis: &'static str, factor: usize) -> Result<(), ResampleError> {
    if factor == 0 {
        return Err(ResampleError::InvalidFactor { axis, factor });
    }
    Ok(())
}

pub(crate) fn validate_nonempty(shape: (usize, usize)) -> Result<(), ResampleError> {
    if shape.0 == 0 || shape.1 == 0 {
        return Err(ResampleError::InvalidShape {
            detail: "2d shape dimensions must be greater than zero",
        });
    }
    Ok(())
}

pub(crate) fn validate_spacing(spacing: f64) -> Result<(), ResampleError> {
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(ResampleError::InvalidSpacing);
    }
    Ok(())
}
