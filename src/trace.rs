//! Recorded browser traces
//!
//! A [`Trace`] is the raw event list captured for one pass. Its [`TraceId`] is a
//! content hash so computed metrics can be memoized per trace.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Content-derived identity of a trace (hex SHA-256 over its events)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TraceId(String);

impl TraceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn of_events(events: &[TraceEvent]) -> Self {
        let mut hasher = Sha256::new();
        for event in events {
            hasher.update(event.name.as_bytes());
            hasher.update([0u8]);
            hasher.update(event.ph.as_bytes());
            hasher.update(event.ts.to_bits().to_le_bytes());
            hasher.update(event.pid.to_le_bytes());
            hasher.update(event.tid.to_le_bytes());
            hasher.update(event.args.to_string().as_bytes());
            hasher.update([0xffu8]);
        }
        TraceId(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell traces apart in logs
        write!(f, "{}", &self.0[..self.0.len().min(12)])
    }
}

/// A single Chrome trace event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEvent {
    pub name: String,
    #[serde(default)]
    pub cat: String,
    #[serde(default)]
    pub ph: String,
    /// Timestamp in microseconds
    #[serde(default)]
    pub ts: f64,
    #[serde(default)]
    pub pid: i64,
    #[serde(default)]
    pub tid: i64,
    #[serde(default)]
    pub args: serde_json::Value,
}

impl TraceEvent {
    /// `args.data`, if the event carries one
    pub fn data(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        self.args.get("data").and_then(|d| d.as_object())
    }
}

#[derive(Deserialize)]
struct TraceFile {
    #[serde(rename = "traceEvents")]
    trace_events: Vec<TraceEvent>,
}

/// Recorded trace for one pass
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "TraceFile")]
pub struct Trace {
    #[serde(rename = "traceEvents")]
    trace_events: Vec<TraceEvent>,
    #[serde(skip_serializing)]
    id: TraceId,
}

impl Trace {
    pub fn new(trace_events: Vec<TraceEvent>) -> Self {
        let id = TraceId::of_events(&trace_events);
        Self { trace_events, id }
    }

    pub fn id(&self) -> &TraceId {
        &self.id
    }

    pub fn events(&self) -> &[TraceEvent] {
        &self.trace_events
    }

    pub fn is_empty(&self) -> bool {
        self.trace_events.is_empty()
    }
}

impl From<TraceFile> for Trace {
    fn from(file: TraceFile) -> Self {
        Trace::new(file.trace_events)
    }
}
