//! Typed artifact boundary
//!
//! Gatherers hand over a loosely-typed JSON bag. It is validated once here, so
//! audits only ever see [`Artifacts`] with every required field present.

use crate::error::ArtifactError;
use crate::trace::Trace;
use crate::trace_elements::TraceElementRecord;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Pass name under which the primary navigation trace is recorded
pub const DEFAULT_PASS: &str = "defaultPass";

/// Raw artifact bag as produced by the gatherers
pub type ArtifactBag = serde_json::Map<String, serde_json::Value>;

/// Artifacts an audit may declare as required
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequiredArtifact {
    #[serde(rename = "traces")]
    Traces,
    #[serde(rename = "TraceElements")]
    TraceElements,
}

impl RequiredArtifact {
    /// Key of this artifact in the raw bag
    pub fn key(self) -> &'static str {
        match self {
            RequiredArtifact::Traces => "traces",
            RequiredArtifact::TraceElements => "TraceElements",
        }
    }
}

impl fmt::Display for RequiredArtifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Validated artifacts
#[derive(Debug, Clone, Default)]
pub struct Artifacts {
    /// Recorded traces keyed by pass name
    pub traces: HashMap<String, Arc<Trace>>,
    /// Element records in gatherer order
    pub trace_elements: Vec<TraceElementRecord>,
}

impl Artifacts {
    pub fn new(traces: HashMap<String, Arc<Trace>>, trace_elements: Vec<TraceElementRecord>) -> Self {
        Self {
            traces,
            trace_elements,
        }
    }

    /// Build artifacts from a raw bag, checking every `required` key first
    ///
    /// Missing keys are reported before any parsing so the error names the
    /// gatherer that did not run.
    pub fn from_bag(bag: &ArtifactBag, required: &[RequiredArtifact]) -> Result<Self, ArtifactError> {
        for artifact in required {
            if bag.get(artifact.key()).map_or(true, |v| v.is_null()) {
                return Err(ArtifactError::Missing(*artifact));
            }
        }

        let traces: HashMap<String, Trace> = parse_or_default(bag, RequiredArtifact::Traces)?;
        let trace_elements: Vec<TraceElementRecord> =
            parse_or_default(bag, RequiredArtifact::TraceElements)?;

        tracing::debug!(
            traces = traces.len(),
            trace_elements = trace_elements.len(),
            "validated artifact bag"
        );

        Ok(Self {
            traces: traces.into_iter().map(|(k, v)| (k, Arc::new(v))).collect(),
            trace_elements,
        })
    }

    /// Trace recorded for `pass`, if any
    pub fn trace(&self, pass: &str) -> Option<&Arc<Trace>> {
        self.traces.get(pass)
    }
}

/// Read a raw JSON artifact bag from disk
pub fn read_bag(path: &Path) -> anyhow::Result<ArtifactBag> {
    let content = std::fs::read_to_string(path)?;
    let bag: ArtifactBag = serde_json::from_str(&content)?;
    Ok(bag)
}

fn parse_or_default<T>(bag: &ArtifactBag, artifact: RequiredArtifact) -> Result<T, ArtifactError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match bag.get(artifact.key()) {
        None | Some(serde_json::Value::Null) => Ok(T::default()),
        Some(value) => T::deserialize(value)
            .map_err(|source| ArtifactError::Malformed { artifact, source }),
    }
}
