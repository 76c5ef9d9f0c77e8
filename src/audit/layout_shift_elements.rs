//! `layout-shift-elements`: DOM elements contributing to CLS
//!
//! Lists every element the trace-element gatherer tagged as a layout-shift
//! contributor, in gatherer order, next to the page's aggregate CLS. The
//! audit does not rank or truncate: whatever the gatherer surfaced is shown.

use super::{Audit, AuditContext, AuditMeta, DiagnosticReport, MetricSavings, ScoreDisplayMode};
use crate::artifacts::{Artifacts, RequiredArtifact};
use crate::details::{
    make_node_item, make_table_details, NodeItem, TableHeading, TableItem, TableValue, ValueType,
};
use crate::error::AuditError;
use crate::i18n::UiStrings;
use crate::metrics::{CumulativeLayoutShift, LayoutShiftMetric};
use crate::trace_elements::TraceElementRecord;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const AUDIT_ID: &str = "layout-shift-elements";

/// Score reported by this audit; it is informative, not a judgment
pub const INFORMATIVE_SCORE: f64 = 1.0;

/// Display rounding step of the contribution column
pub const CONTRIBUTION_GRANULARITY: f64 = 0.001;

const GUIDANCE_LEVEL: u8 = 2;

/// One table row: an element and its share of CLS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContributorRow {
    pub node: NodeItem,
    pub score: f64,
}

impl TableItem for ContributorRow {
    fn cell(&self, key: &str) -> Option<TableValue<'_>> {
        match key {
            "node" => Some(TableValue::Node(&self.node)),
            "score" => Some(TableValue::Numeric(self.score)),
            _ => None,
        }
    }
}

/// Records tagged as layout-shift contributors, in input order
pub fn select_contributors(elements: &[TraceElementRecord]) -> Vec<&TraceElementRecord> {
    elements.iter().filter(|e| e.is_layout_shift()).collect()
}

pub fn to_contributor_row(record: &TraceElementRecord) -> ContributorRow {
    ContributorRow {
        node: make_node_item(&record.node),
        score: record.score,
    }
}

pub struct LayoutShiftElements {
    strings: UiStrings,
    metric: Arc<dyn LayoutShiftMetric>,
}

impl LayoutShiftElements {
    pub fn new(strings: UiStrings, metric: Arc<dyn LayoutShiftMetric>) -> Self {
        Self { strings, metric }
    }

    /// Audit backed by the trace-derived CLS computation
    pub fn with_trace_metric(strings: UiStrings) -> Self {
        Self::new(strings, Arc::new(CumulativeLayoutShift::new()))
    }

    pub fn headings(&self) -> Vec<TableHeading> {
        vec![
            TableHeading::new("node", ValueType::Node, self.strings.column_element.text()),
            TableHeading::new(
                "score",
                ValueType::Numeric,
                self.strings.column_contribution.text(),
            )
            .with_granularity(CONTRIBUTION_GRANULARITY),
        ]
    }

    /// "N elements found", or nothing when there are no rows
    pub fn display_value(&self, row_count: usize) -> Option<String> {
        (row_count > 0).then(|| self.strings.display_value_elements_found.format(row_count))
    }

    /// Assemble the report from finished rows and the aggregate CLS value
    pub fn assemble(&self, rows: Vec<ContributorRow>, cls: f64) -> DiagnosticReport {
        let display_value = self.display_value(rows.len());
        let details = make_table_details(self.headings(), rows);

        DiagnosticReport {
            score: INFORMATIVE_SCORE,
            metric_savings: MetricSavings { cls },
            not_applicable: details.items.is_empty(),
            display_value,
            details,
        }
    }
}

#[async_trait]
impl Audit for LayoutShiftElements {
    fn meta(&self) -> AuditMeta {
        AuditMeta {
            id: AUDIT_ID.to_string(),
            title: self.strings.title.text().to_string(),
            description: self.strings.description.text().to_string(),
            score_display_mode: ScoreDisplayMode::Informative,
            guidance_level: GUIDANCE_LEVEL,
            required_artifacts: vec![RequiredArtifact::Traces, RequiredArtifact::TraceElements],
        }
    }

    async fn audit(
        &self,
        artifacts: &Artifacts,
        ctx: &AuditContext,
    ) -> Result<DiagnosticReport, AuditError> {
        let trace = artifacts
            .trace(&ctx.default_pass)
            .ok_or_else(|| AuditError::MissingTrace(ctx.default_pass.clone()))?;

        // Independent of the rows; polled once they are built
        let cls_request = self.metric.request(trace, ctx);

        let rows: Vec<ContributorRow> = select_contributors(&artifacts.trace_elements)
            .into_iter()
            .map(to_contributor_row)
            .collect();

        let cls = cls_request.await?;

        tracing::debug!(
            contributors = rows.len(),
            cls = cls.cumulative_layout_shift,
            "assembled layout-shift-elements report"
        );

        Ok(self.assemble(rows, cls.cumulative_layout_shift))
    }
}
