//! Normalized audit results

use super::{AuditMeta, ContributorRow, DiagnosticReport, MetricSavings, ScoreDisplayMode};
use crate::details::{format_numeric, TableDetails};
use crate::error::AuditError;
use serde::{Deserialize, Serialize};

/// Audit outcome as written to reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    pub id: String,
    pub title: String,
    pub description: String,
    /// `None` unless the display mode carries a score
    pub score: Option<f64>,
    pub score_display_mode: ScoreDisplayMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<TableDetails<ContributorRow>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_savings: Option<MetricSavings>,
    pub guidance_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AuditResult {
    /// Normalize a successful audit product
    pub fn from_report(meta: &AuditMeta, report: DiagnosticReport) -> Self {
        let score_display_mode = if report.not_applicable {
            ScoreDisplayMode::NotApplicable
        } else {
            meta.score_display_mode
        };
        let score = score_display_mode
            .is_scored()
            .then(|| report.score.clamp(0.0, 1.0));

        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            score,
            score_display_mode,
            display_value: report.display_value,
            details: Some(report.details),
            metric_savings: Some(report.metric_savings),
            guidance_level: meta.guidance_level,
            error_message: None,
        }
    }

    /// Result for an audit that could not run
    pub fn from_error(meta: &AuditMeta, err: &AuditError) -> Self {
        Self {
            id: meta.id.clone(),
            title: meta.title.clone(),
            description: meta.description.clone(),
            score: None,
            score_display_mode: ScoreDisplayMode::Error,
            display_value: None,
            details: None,
            metric_savings: None,
            guidance_level: meta.guidance_level,
            error_message: Some(err.to_string()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.score_display_mode == ScoreDisplayMode::Error
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match self.score_display_mode {
            ScoreDisplayMode::Error => report.push_str("❌ "),
            ScoreDisplayMode::NotApplicable => report.push_str("➖ "),
            _ => report.push_str("ℹ️  "),
        }
        report.push_str(&format!("{} ({})\n", self.title, self.id));

        if let Some(message) = &self.error_message {
            report.push_str(&format!("Error: {}\n", message));
            return report;
        }

        if let Some(display_value) = &self.display_value {
            report.push_str(&format!("{}\n", display_value));
        }
        if let Some(savings) = &self.metric_savings {
            report.push_str(&format!("CLS: {}\n", format_numeric(savings.cls, Some(0.001))));
        }

        match &self.details {
            Some(details) if !details.items.is_empty() => {
                report.push('\n');
                report.push_str(&details.to_text());
            }
            _ => report.push_str("\nNo layout-shift contributors found.\n"),
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::RequiredArtifact;
    use crate::details::{make_table_details, NodeItem};
    use crate::error::MetricError;

    fn meta() -> AuditMeta {
        AuditMeta {
            id: "layout-shift-elements".to_string(),
            title: "Avoid large layout shifts".to_string(),
            description: "These DOM elements contribute most to the CLS of the page.".to_string(),
            score_display_mode: ScoreDisplayMode::Informative,
            guidance_level: 2,
            required_artifacts: vec![RequiredArtifact::Traces, RequiredArtifact::TraceElements],
        }
    }

    fn report(rows: Vec<ContributorRow>) -> DiagnosticReport {
        DiagnosticReport {
            score: 1.0,
            metric_savings: MetricSavings { cls: 0.25 },
            not_applicable: rows.is_empty(),
            display_value: (!rows.is_empty()).then(|| format!("{} elements found", rows.len())),
            details: make_table_details(vec![], rows),
        }
    }

    fn row(label: &str, score: f64) -> ContributorRow {
        ContributorRow {
            node: NodeItem {
                item_type: "node".to_string(),
                lh_id: None,
                path: None,
                selector: None,
                bounding_rect: None,
                snippet: None,
                node_label: Some(label.to_string()),
            },
            score,
        }
    }

    #[test]
    fn test_informative_result_has_no_score() {
        let result = AuditResult::from_report(&meta(), report(vec![row("Hero", 0.2)]));

        assert_eq!(result.score_display_mode, ScoreDisplayMode::Informative);
        assert_eq!(result.score, None);
        assert_eq!(result.metric_savings, Some(MetricSavings { cls: 0.25 }));
        assert!(!result.is_error());
    }

    #[test]
    fn test_not_applicable_result() {
        let result = AuditResult::from_report(&meta(), report(vec![]));

        assert_eq!(result.score_display_mode, ScoreDisplayMode::NotApplicable);
        assert_eq!(result.display_value, None);
        assert!(result.to_report_string().contains("No layout-shift contributors found"));
    }

    #[test]
    fn test_error_result() {
        let err = AuditError::Metric(MetricError::EmptyTrace);
        let result = AuditResult::from_error(&meta(), &err);

        assert!(result.is_error());
        assert_eq!(result.error_message.as_deref(), Some("Trace contains no events"));
        assert!(result.details.is_none());

        let json = result.to_json().unwrap();
        assert!(json.contains("\"scoreDisplayMode\": \"error\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_report_string_lists_contributors() {
        let result = AuditResult::from_report(&meta(), report(vec![row("Hero image", 0.123456)]));
        let text = result.to_report_string();

        assert!(text.contains("Avoid large layout shifts"));
        assert!(text.contains("1 elements found"));
        assert!(text.contains("CLS: 0.250"));
    }
}
