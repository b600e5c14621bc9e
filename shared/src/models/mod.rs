//! Data models for fdbstat.
//!
//! This module contains the metric line emitted for every numeric leaf of a
//! status document, and the tag set attached to it.

pub mod metric;

pub use metric::{MetricLine, TagSet, VALUE_PRECISION};
