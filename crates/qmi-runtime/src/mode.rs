#![forbid(unsafe_code)]

//! Runtime mode definitions for Strict and Hardened operation.

use serde::{Deserialize, Serialize};

/// Operational mode governing how much input validation a call performs.
///
/// - **Strict**: Validate shapes, lengths and conventions; pass sample values
///   through untouched, including NaN and infinities.
/// - **Hardened**: Everything Strict does, plus rejection of non-finite
///   samples before any transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RuntimeMode {
    #[default]
    Strict,
    Hardened,
}

impl RuntimeMode {
    /// Whether non-finite samples must be rejected in this mode.
    #[must_use]
    pub const fn rejects_non_finite(self) -> bool {
        matches!(self, Self::Hardened)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strict => "Strict",
            Self::Hardened => "Hardened",
        }
    }
}
