#![forbid(unsafe_code)]

//! Discrete Fourier transforms and sampling-axis conventions for 1D and 2D grids.
//!
//! - `transforms`: forward/inverse DFTs over slices and `Array2`, with a
//!   pluggable backend (rustfft, or a naive reference summation)
//! - `helpers`: fftshift/ifftshift, cyclic rolls, `fftfreq`, lane mapping
//! - `axes`: frequency and position axes under every origin/sign convention

pub mod axes;
pub mod helpers;
pub mod transforms;

pub use axes::{
    AxisConvention, FrequencySign, Origin, frequency_axis, frequency_spacing, position_axis,
    zero_index,
};
pub use helpers::{fftfreq, fftshift_1d, fftshift_2d, ifftshift_1d, ifftshift_2d, map_lanes, roll_2d};
pub use num_complex::Complex64;
pub use transforms::{
    BackendKind, FftBackend, FftError, FftOptions, NaiveDftBackend, RustFftBackend, fft, fft2,
    fft2_real, ifft, ifft2, validate_finite,
};

use serde::{Deserialize, Serialize};

/// DFT normalization modes, named after where the `1/n` factor goes.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum Normalization {
    Forward,
    #[default]
    Backward,
    Ortho,
}

/// Transform entrypoints, as recorded in operation traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TransformKind {
    Fft,
    Ifft,
    Fft2,
    Ifft2,
}

impl TransformKind {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fft => "fft",
            Self::Ifft => "ifft",
            Self::Fft2 => "fft2",
            Self::Ifft2 => "ifft2",
        }
    }
}
