// Computed metrics derived from recorded traces
//
// Audits never compute trace metrics themselves: they request them from a
// collaborator implementing `LayoutShiftMetric`. The reference collaborator,
// `CumulativeLayoutShift`, parses LayoutShift events, groups them into
// session windows and memoizes the result per trace identity.

mod cache;
mod cls;

pub use cache::MemoCache;
pub use cls::{
    compute_cls, layout_shift_events, session_window_score, LayoutShiftEvent,
    SESSION_GAP_US, SESSION_LIMIT_US,
};

use crate::audit::AuditContext;
use crate::error::MetricError;
use crate::trace::{Trace, TraceId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Aggregate layout-shift values for one trace
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClsMetric {
    pub cumulative_layout_shift: f64,
    pub cumulative_layout_shift_main_frame: f64,
}

/// Source of the aggregate CLS value for a trace
#[async_trait]
pub trait LayoutShiftMetric: Send + Sync {
    async fn request(&self, trace: &Trace, ctx: &AuditContext) -> Result<ClsMetric, MetricError>;
}

/// Reference collaborator: computes CLS from the trace, once per trace
#[derive(Debug, Default)]
pub struct CumulativeLayoutShift {
    cache: MemoCache<TraceId, Result<ClsMetric, MetricError>>,
}

impl CumulativeLayoutShift {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of traces computed so far
    pub async fn cached_traces(&self) -> usize {
        self.cache.len().await
    }
}

#[async_trait]
impl LayoutShiftMetric for CumulativeLayoutShift {
    async fn request(&self, trace: &Trace, ctx: &AuditContext) -> Result<ClsMetric, MetricError> {
        let trace_id = trace.id().clone();
        self.cache
            .get_or_compute(trace_id, move || async move {
                tracing::debug!(
                    trace = %trace.id(),
                    pass = %ctx.default_pass,
                    events = trace.events().len(),
                    "computing cumulative layout shift"
                );
                compute_cls(trace)
            })
            .await
    }
}
