#![forbid(unsafe_code)]

//! Structured operation traces.
//!
//! Every public transform and resampling entrypoint records one
//! [`OperationTrace`] into a process-wide, bounded FIFO log, unless the
//! caller switched tracing off. The log is a diagnostic side channel only:
//! numerical code never reads it back.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::mode::RuntimeMode;

/// Default number of traces retained by the shared log.
pub const DEFAULT_TRACE_CAPACITY: usize = 4096;

/// One completed operation, suitable for JSON-lines output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationTrace {
    pub operation_id: String,
    pub component: String,
    pub operation: String,
    pub input_shape: Vec<usize>,
    pub output_shape: Vec<usize>,
    pub mode: RuntimeMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub timing_ns: u64,
}

impl OperationTrace {
    /// Start a trace for `component::operation`; the id is allocated here.
    #[must_use]
    pub fn new(component: &str, operation: &str, mode: RuntimeMode) -> Self {
        Self {
            operation_id: next_operation_id(component),
            component: component.to_owned(),
            operation: operation.to_owned(),
            input_shape: Vec::new(),
            output_shape: Vec::new(),
            mode,
            detail: None,
            timing_ns: 0,
        }
    }

    #[must_use]
    pub fn with_input_shape(mut self, shape: &[usize]) -> Self {
        self.input_shape = shape.to_vec();
        self
    }

    #[must_use]
    pub fn with_output_shape(mut self, shape: &[usize]) -> Self {
        self.output_shape = shape.to_vec();
        self
    }

    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Stamp the elapsed time since `started`.
    #[must_use]
    pub fn finished(mut self, started: Instant) -> Self {
        self.timing_ns = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        self
    }

    #[must_use]
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// Bounded FIFO buffer of traces.
///
/// Capacity is enforced via `capacity.max(1)`. When full, the oldest entry is
/// evicted before a new one is appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLog {
    capacity: usize,
    entries: VecDeque<OperationTrace>,
}

impl TraceLog {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: VecDeque::new(),
        }
    }

    pub fn record(&mut self, trace: OperationTrace) {
        if self.entries.len() == self.capacity {
            let _ = self.entries.pop_front();
        }
        self.entries.push_back(trace);
    }

    /// Remove and return every retained trace, oldest first.
    pub fn drain(&mut self) -> Vec<OperationTrace> {
        self.entries.drain(..).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn latest(&self) -> Option<&OperationTrace> {
        self.entries.back()
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Serialize all retained traces as newline-separated JSON.
    #[must_use]
    pub fn to_jsonl(&self) -> String {
        self.entries
            .iter()
            .map(OperationTrace::to_json_line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

static SHARED_TRACE_LOG: OnceLock<Mutex<TraceLog>> = OnceLock::new();
static OPERATION_COUNTER: AtomicU64 = AtomicU64::new(1);

fn shared_log() -> &'static Mutex<TraceLog> {
    SHARED_TRACE_LOG.get_or_init(|| Mutex::new(TraceLog::new(DEFAULT_TRACE_CAPACITY)))
}

fn next_operation_id(component: &str) -> String {
    let next = OPERATION_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{component}-op-{next:016x}")
}

/// Append a trace to the shared log. A poisoned lock drops the trace.
///
/// Concurrent callers contend on one mutex here.
pub fn record_trace(trace: OperationTrace) {
    if let Ok(mut log) = shared_log().lock() {
        log.record(trace);
    }
}

/// Drain the shared log.
#[must_use]
pub fn take_traces() -> Vec<OperationTrace> {
    shared_log()
        .lock()
        .map_or_else(|_| Vec::new(), |mut log| log.drain())
}
