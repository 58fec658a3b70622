#![forbid(unsafe_code)]

//! Resampling and translation of sampled images in real and Fourier space.
//!
//! Arrays are row-major: axis 0 is y (rows), axis 1 is x (columns). Spectra
//! come either straight out of a DFT ([`Origin::Edge`]) or fftshifted
//! ([`Origin::Centered`]); every spectral operation takes the layout
//! explicitly and returns its result in the same layout.
//!
//! | Module      | Operations                                                  |
//! |-------------|-------------------------------------------------------------|
//! | `expand`    | band-limited expansion onto an `m`-times finer grid         |
//! | `replicate` | pixel replication, in real space and via the spectrum       |
//! | `translate` | Fourier shift of spectra and images, whole-pixel shifts     |
//! | `whittaker` | sinc interpolation at arbitrary points                      |
//! | `edges`     | mirror blending of borders before a transform               |

pub mod edges;
pub mod error;
pub mod expand;
pub mod replicate;
pub mod translate;
pub mod whittaker;

pub use edges::{CubicSpline, cubic_hermite_spline, mix_edges};
pub use error::ResampleError;
pub use expand::{
    NyquistCorners, expand_image, expand_image_with, expand_spectrum, expand_spectrum_1d,
    expand_spectrum_with,
};
pub use qmi_fft::{Complex64, FftOptions, Origin};
pub use replicate::{
    replicate_pixels, replicate_pixels_freq, replicate_pixels_freq_1d, replication_factor,
};
pub use translate::{
    BoundaryMode, Offset2, PixelSpacing, PixelTranslation, translate_image, translate_pix,
    translate_spectrum,
};
pub use whittaker::{sinc, whittaker_interpolate, whittaker_interpolate_2d};
