// Cumulative layout shift from trace events
//
// CLS is the largest "session window" sum of layout-shift scores. A session
// window ends when the next shift comes more than 1s after the previous one,
// or when the window would span more than 5s.

use super::ClsMetric;
use crate::error::MetricError;
use crate::trace::Trace;

/// Maximum gap between shifts in one session window (microseconds)
pub const SESSION_GAP_US: f64 = 1_000_000.0;

/// Maximum duration of one session window (microseconds)
pub const SESSION_LIMIT_US: f64 = 5_000_000.0;

/// A layout shift that counts towards CLS
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutShiftEvent {
    pub ts: f64,
    pub weighted_score: f64,
    pub is_main_frame: bool,
}

/// Extract counted layout shifts from a trace, ordered by timestamp
///
/// Shifts flagged `had_recent_input` are user-initiated and dropped. A shift
/// without a finite `weighted_score_delta` makes the whole trace unusable.
pub fn layout_shift_events(trace: &Trace) -> Result<Vec<LayoutShiftEvent>, MetricError> {
    if trace.is_empty() {
        return Err(MetricError::EmptyTrace);
    }

    let mut shifts = Vec::new();
    for event in trace.events().iter().filter(|e| e.name == "LayoutShift") {
        let Some(data) = event.data() else {
            continue;
        };

        let weighted_score = data
            .get("weighted_score_delta")
            .and_then(|v| v.as_f64())
            .filter(|v| v.is_finite())
            .ok_or(MetricError::MissingWeightedScore { ts: event.ts })?;

        let had_recent_input = data
            .get("had_recent_input")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        if had_recent_input {
            continue;
        }

        shifts.push(LayoutShiftEvent {
            ts: event.ts,
            weighted_score,
            is_main_frame: data
                .get("is_main_frame")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        });
    }

    shifts.sort_by(|a, b| a.ts.total_cmp(&b.ts));
    Ok(shifts)
}

/// Largest session-window sum over `shifts` (which must be ts-ordered)
pub fn session_window_score<'a>(shifts: impl IntoIterator<Item = &'a LayoutShiftEvent>) -> f64 {
    let mut max_score = 0.0_f64;
    let mut window_score = 0.0;
    let mut window_start = f64::NEG_INFINITY;
    let mut prev_ts = f64::NEG_INFINITY;

    for shift in shifts {
        if shift.ts - window_start > SESSION_LIMIT_US || shift.ts - prev_ts > SESSION_GAP_US {
            window_start = shift.ts;
            window_score = 0.0;
        }
        prev_ts = shift.ts;
        window_score += shift.weighted_score;
        max_score = max_score.max(window_score);
    }

    max_score
}

/// Compute CLS for the whole page and for the main frame only
pub fn compute_cls(trace: &Trace) -> Result<ClsMetric, MetricError> {
    let shifts = layout_shift_events(trace)?;

    let metric = ClsMetric {
        cumulative_layout_shift: session_window_score(&shifts),
        cumulative_layout_shift_main_frame: session_window_score(
            shifts.iter().filter(|s| s.is_main_frame),
        ),
    };

    tracing::debug!(
        shifts = shifts.len(),
        cls = metric.cumulative_layout_shift,
        cls_main_frame = metric.cumulative_layout_shift_main_frame,
        "computed layout shift session windows"
    );

    Ok(metric)
}
