//! Trace-derived element records
//!
//! Produced upstream by the trace-element gatherer: one record per DOM element
//! that a trace event (LCP, layout shift, animation, interaction) points at.

use serde::{Deserialize, Serialize};

/// Kind of trace event that surfaced an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceEventType {
    LargestContentfulPaint,
    LayoutShift,
    Animation,
    Responsiveness,
    /// Any tag this crate does not know about
    #[serde(other)]
    Other,
}

/// Element bounding box in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRect {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
    pub width: f64,
    pub height: f64,
}

/// DOM element descriptor as captured by the gatherer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lh_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devtools_node_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_rect: Option<BoundingRect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub node_label: Option<String>,
}

/// One element record from the `TraceElements` artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TraceElementRecord {
    pub trace_event_type: TraceEventType,
    pub node: NodeDetails,
    /// Contribution to the aggregate metric, in [0, 1]
    #[serde(default)]
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_id: Option<i64>,
}

impl TraceElementRecord {
    pub fn new(trace_event_type: TraceEventType, node: NodeDetails, score: f64) -> Self {
        Self {
            trace_event_type,
            node,
            score,
            node_id: None,
        }
    }

    pub fn is_layout_shift(&self) -> bool {
        self.trace_event_type == TraceEventType::LayoutShift
    }
}
