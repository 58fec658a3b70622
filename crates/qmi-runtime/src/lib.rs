#![forbid(unsafe_code)]

//! Runtime support shared by the qmi Fourier crates.
//!
//! ## Module layout
//!
//! | Module  | Contents                                                       |
//! |---------|----------------------------------------------------------------|
//! | `mode`  | [`RuntimeMode`] enum (Strict / Hardened)                       |
//! | `trace` | [`OperationTrace`], [`TraceLog`], shared bounded trace log     |
//!
//! The crate root also carries the structured test-log entry and tolerance
//! assertions used by every crate's test suite.

pub mod mode;
pub mod trace;

pub use mode::RuntimeMode;
pub use trace::{DEFAULT_TRACE_CAPACITY, OperationTrace, TraceLog, record_trace, take_traces};

use std::time::{SystemTime, UNIX_EPOCH};

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
#[must_use]
pub fn now_unix_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Structured test log entry for comparison across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestLogEntry {
    pub test_id: String,
    pub timestamp_ms: u64,
    pub level: TestLogLevel,
    pub module: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<RuntimeMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_error: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TestResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestLogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestResult {
    Pass,
    Fail,
    Skip,
}

impl TestResult {
    #[must_use]
    pub const fn from_pass(pass: bool) -> Self {
        if pass { Self::Pass } else { Self::Fail }
    }
}

impl TestLogEntry {
    #[must_use]
    pub fn new(
        test_id: impl Into<String>,
        module: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            test_id: test_id.into(),
            timestamp_ms: now_unix_ms(),
            level: TestLogLevel::Info,
            module: module.into(),
            message: message.into(),
            seed: None,
            shape: None,
            mode: None,
            max_error: None,
            result: None,
        }
    }

    #[must_use]
    pub fn with_result(mut self, result: TestResult) -> Self {
        self.result = Some(result);
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: RuntimeMode) -> Self {
        self.mode = Some(mode);
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: &[usize]) -> Self {
        self.shape = Some(shape.to_vec());
        self
    }

    #[must_use]
    pub fn with_max_error(mut self, max_error: f64) -> Self {
        self.max_error = Some(max_error);
        self
    }

    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }

    /// Write the JSON line to stderr, where `cargo test` keeps it per test.
    pub fn emit(&self) {
        eprintln!("{}", self.to_json_line());
    }
}

/// Assert `|actual - expected| <= atol + rtol * |expected|`.
///
/// The usual mixed absolute/relative `allclose` criterion.
pub fn assert_close(actual: f64, expected: f64, atol: f64, rtol: f64) {
    let tol = atol + rtol * expected.abs();
    assert!(
        (actual - expected).abs() <= tol,
        "assert_close failed: actual={actual} expected={expected} diff={} tol={tol} (atol={atol}, rtol={rtol})",
        (actual - expected).abs()
    );
}

/// Element-wise [`assert_close`] over two slices of equal length.
pub fn assert_close_slice(actual: &[f64], expected: &[f64], atol: f64, rtol: f64) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "assert_close_slice: length mismatch: actual={} expected={}",
        actual.len(),
        expected.len()
    );
    for (idx, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        let tol = atol + rtol * e.abs();
        assert!(
            (a - e).abs() <= tol,
            "assert_close_slice[{idx}]: actual={a} expected={e} diff={} tol={tol} (atol={atol}, rtol={rtol})",
            (a - e).abs()
        );
    }
}

/// Largest absolute element-wise difference; `f64::INFINITY` on length mismatch.
#[must_use]
pub fn max_abs_diff(actual: &[f64], expected: &[f64]) -> f64 {
    if actual.len() != expected.len() {
        return f64::INFINITY;
    }
    actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e).abs())
        .fold(0.0, f64::max)
}

/// Assert `|actual - expected| <= atol` in the complex plane.
pub fn assert_close_complex(actual: Complex64, expected: Complex64, atol: f64) {
    let diff = (actual - expected).norm();
    assert!(
        diff <= atol,
        "assert_close_complex failed: actual={actual} expected={expected} diff={diff} atol={atol}"
    );
}

/// Largest element-wise modulus of the difference; `f64::INFINITY` on length mismatch.
#[must_use]
pub fn max_abs_diff_complex<'a>(
    actual: impl IntoIterator<Item = &'a Complex64>,
    expected: impl IntoIterator<Item = &'a Complex64>,
) -> f64 {
    let mut actual = actual.into_iter();
    let mut expected = expected.into_iter();
    let mut worst = 0.0_f64;
    loop {
        match (actual.next(), expected.next()) {
            (Some(a), Some(e)) => worst = worst.max((a - e).norm()),
            (None, None) => return worst,
            _ => return f64::INFINITY,
        }
    }
}

#[must_use]
pub fn within_tolerance(actual: f64, expected: f64, atol: f64, rtol: f64) -> bool {
    let tol = atol + rtol * expected.abs();
    (actual - expected).abs() <= tol
}
