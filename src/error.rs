//! Error types for artifact loading, metric computation and audits

use crate::artifacts::RequiredArtifact;
use thiserror::Error;

/// Errors raised while validating the raw artifact bag
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Required {0} gatherer did not run")]
    Missing(RequiredArtifact),

    #[error("Malformed {artifact} artifact: {source}")]
    Malformed {
        artifact: RequiredArtifact,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by the computed-metric collaborator
///
/// `Clone` so a failed computation can be memoized alongside successful ones.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MetricError {
    #[error("Trace contains no events")]
    EmptyTrace,

    #[error("CLS missing weighted_score_delta (LayoutShift event at ts={ts})")]
    MissingWeightedScore { ts: f64 },
}

/// Errors that fail a whole audit
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("No trace recorded for pass '{0}'")]
    MissingTrace(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(transparent)]
    Metric(#[from] MetricError),
}

/// Errors raised while loading an [`AuditConfig`](crate::config::AuditConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_error_propagates_transparently() {
        let err: AuditError = MetricError::EmptyTrace.into();
        assert_eq!(err.to_string(), "Trace contains no events");
    }

    #[test]
    fn test_missing_artifact_message() {
        let err = ArtifactError::Missing(RequiredArtifact::TraceElements);
        assert_eq!(err.to_string(), "Required TraceElements gatherer did not run");
    }
}
