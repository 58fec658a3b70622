//! Frequency and position axes under the four sampling conventions.
//!
//! An axis of length `L` is labelled by the integer bins
//! `-⌊L/2⌋ ..= ⌈L/2⌉ - 1`. For even `L` this is one more negative bin than
//! positive bins: the unmatched Nyquist bin. Every convention is a relabeling
//! of that same set:
//!
//! - [`Origin::Centered`] lists the bins in ascending order, so bin 0 sits at
//!   index `⌊L/2⌋`; [`Origin::Edge`] rotates the list so bin 0 is at index 0.
//! - [`FrequencySign::Symmetric`] keeps negative bins negative;
//!   [`FrequencySign::Positive`] adds one full sampling extent (`L` bins) to
//!   each of them in place, without re-sorting.
//!
//! Frequency axes scale bins by `1 / (L·dt)`, position axes by `dt`.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::helpers::validate_frequency_args;
use crate::transforms::FftError;

/// Where the zero bin lives in an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Origin {
    /// Zero at index 0; the raw layout produced by a DFT.
    Edge,
    /// Zero at index `len / 2`; the layout after an fftshift.
    Centered,
}

impl Origin {
    #[must_use]
    pub const fn from_centered(centered: bool) -> Self {
        if centered { Self::Centered } else { Self::Edge }
    }

    #[must_use]
    pub const fn is_centered(self) -> bool {
        matches!(self, Self::Centered)
    }
}

/// How bins above the half-way point are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FrequencySign {
    Symmetric,
    Positive,
}

impl FrequencySign {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Symmetric => "symmetric",
            Self::Positive => "positive",
        }
    }
}

impl Display for FrequencySign {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FrequencySign {
    type Err = FftError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "symmetric" => Ok(Self::Symmetric),
            "positive" => Ok(Self::Positive),
            other => Err(FftError::UnknownConvention {
                value: other.to_owned(),
            }),
        }
    }
}

/// Origin and sign convention of an axis, validated once at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AxisConvention {
    pub origin: Origin,
    pub sign: FrequencySign,
}

impl AxisConvention {
    pub const EDGE_SYMMETRIC: Self = Self::new(Origin::Edge, FrequencySign::Symmetric);
    pub const EDGE_POSITIVE: Self = Self::new(Origin::Edge, FrequencySign::Positive);
    pub const CENTERED_SYMMETRIC: Self = Self::new(Origin::Centered, FrequencySign::Symmetric);
    pub const CENTERED_POSITIVE: Self = Self::new(Origin::Centered, FrequencySign::Positive);

    #[must_use]
    pub const fn new(origin: Origin, sign: FrequencySign) -> Self {
        Self { origin, sign }
    }

    /// Parse the `(centered, mode)` flag pair used by older call sites.
    pub fn from_flags(centered: bool, mode: &str) -> Result<Self, FftError> {
        Ok(Self::new(Origin::from_centered(centered), mode.parse()?))
    }
}

impl Default for AxisConvention {
    fn default() -> Self {
        Self::CENTERED_SYMMETRIC
    }
}

/// Frequency values for a length-`length` DFT with sample spacing `dt`.
pub fn frequency_axis(
    length: usize,
    dt: f64,
    convention: AxisConvention,
) -> Result<Vec<f64>, FftError> {
    validate_frequency_args(length, dt)?;
    let scale = 1.0 / (length as f64 * dt);
    let wrap = 1.0 / dt;
    Ok(ordered_bins(length, convention.origin)
        .into_iter()
        .map(|bin| {
            let frequency = bin as f64 * scale;
            match convention.sign {
                FrequencySign::Positive if bin < 0 => frequency + wrap,
                _ => frequency,
            }
        })
        .collect())
}

/// Sample positions for a length-`length` grid with spacing `dt`.
pub fn position_axis(
    length: usize,
    dt: f64,
    convention: AxisConvention,
) -> Result<Vec<f64>, FftError> {
    validate_frequency_args(length, dt)?;
    let extent = length as i64;
    Ok(ordered_bins(length, convention.origin)
        .into_iter()
        .map(|bin| {
            let bin = match convention.sign {
                FrequencySign::Positive if bin < 0 => bin + extent,
                _ => bin,
            };
            bin as f64 * dt
        })
        .collect())
}

/// Spacing between adjacent frequency bins, `1 / (length·dt)`.
pub fn frequency_spacing(length: usize, dt: f64) -> Result<f64, FftError> {
    validate_frequency_args(length, dt)?;
    Ok(1.0 / (length as f64 * dt))
}

/// Index holding bin 0 under `origin`.
#[must_use]
pub const fn zero_index(length: usize, origin: Origin) -> usize {
    match origin {
        Origin::Edge => 0,
        Origin::Centered => length / 2,
    }
}

fn ordered_bins(length: usize, origin: Origin) -> Vec<i64> {
    let lowest = -((length / 2) as i64);
    let centered = (0..length as i64).map(|offset| lowest + offset);
    match origin {
        Origin::Centered => centered.collect(),
        Origin::Edge => {
            let mut bins = centered.collect::<Vec<_>>();
            bins.rotate_left(length / 2);
            bins
        }
    }
}
