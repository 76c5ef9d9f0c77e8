//! Shiftaudit - layout-shift contributor diagnostics for page-performance traces
//!
//! This library turns gathered trace artifacts into the `layout-shift-elements`
//! diagnostic: the DOM elements that moved during load, each with its share of
//! cumulative layout shift, next to the page's aggregate CLS value.

pub mod artifacts;
pub mod audit;
pub mod cli;
pub mod config;
pub mod details;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod trace;
pub mod trace_elements;
