//! Audits over gathered artifacts
//!
//! An [`Audit`] declares static [`AuditMeta`] (including the artifacts it needs)
//! and turns validated [`Artifacts`] into a [`DiagnosticReport`]. The runner in
//! [`run_audit`] validates the raw bag, runs the audit and normalizes the
//! outcome into an [`AuditResult`].

mod layout_shift_elements;
mod result;
mod runner;

pub use layout_shift_elements::{
    select_contributors, to_contributor_row, ContributorRow, LayoutShiftElements,
    CONTRIBUTION_GRANULARITY, INFORMATIVE_SCORE,
};
pub use result::AuditResult;
pub use runner::run_audit;

use crate::artifacts::{Artifacts, RequiredArtifact, DEFAULT_PASS};
use crate::details::TableDetails;
use crate::error::AuditError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// How an audit's score should be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreDisplayMode {
    Numeric,
    Binary,
    MetricSavings,
    Manual,
    /// Diagnostic only, never a pass/fail judgment
    Informative,
    NotApplicable,
    Error,
}

impl ScoreDisplayMode {
    /// Whether results in this mode carry a numeric score
    pub fn is_scored(self) -> bool {
        matches!(
            self,
            ScoreDisplayMode::Numeric | ScoreDisplayMode::Binary | ScoreDisplayMode::MetricSavings
        )
    }
}

/// Static audit metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditMeta {
    pub id: String,
    pub title: String,
    pub description: String,
    pub score_display_mode: ScoreDisplayMode,
    pub guidance_level: u8,
    pub required_artifacts: Vec<RequiredArtifact>,
}

/// Per-run context shared by every audit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    /// Pass whose trace is the primary recording
    pub default_pass: String,
}

impl Default for AuditContext {
    fn default() -> Self {
        Self {
            default_pass: DEFAULT_PASS.to_string(),
        }
    }
}

impl AuditContext {
    pub fn with_pass(pass: impl Into<String>) -> Self {
        Self {
            default_pass: pass.into(),
        }
    }
}

/// Metric improvements attributable to fixing the audit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricSavings {
    #[serde(rename = "CLS")]
    pub cls: f64,
}

/// Product of one audit run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    pub score: f64,
    pub metric_savings: MetricSavings,
    pub not_applicable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    pub details: TableDetails<ContributorRow>,
}

#[async_trait]
pub trait Audit: Send + Sync {
    fn meta(&self) -> AuditMeta;

    async fn audit(
        &self,
        artifacts: &Artifacts,
        ctx: &AuditContext,
    ) -> Result<DiagnosticReport, AuditError>;
}
