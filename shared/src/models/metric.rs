//! Metric line data model.
//!
//! Defines the `MetricLine` structure emitted by the flattener and the
//! insertion-ordered `TagSet` attached to it.

use std::fmt;

/// Number of decimal places used when rendering field values.
pub const VALUE_PRECISION: usize = 9;

/// An insertion-ordered set of tags.
///
/// Re-inserting an existing key overwrites its value in place, keeping the
/// original position.
///
/// # Example
///
/// ```
/// use shared::models::TagSet;
///
/// let mut tags = TagSet::new();
/// tags.insert("address", "1.2.3.4:4500");
/// tags.insert("machine_id", "m1");
/// tags.insert("address", "1.2.3.4");
///
/// assert_eq!(tags.to_string(), ",address=1.2.3.4,machine_id=m1");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<(String, String)>);

impl TagSet {
    /// Creates an empty tag set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a tag, overwriting the value of an existing key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Adds a tag and returns the set.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value of a tag.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the number of tags.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no tags.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over tags in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Renders the tag suffix: empty for no tags, otherwise `,k=v,...`.
impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (key, value) in &self.0 {
            write!(f, ",{key}={value}")?;
        }
        Ok(())
    }
}

/// A single metric line: one numeric field within a tagged measurement.
///
/// # Example
///
/// ```
/// use shared::models::{MetricLine, TagSet};
///
/// let line = MetricLine::new(
///     "cluster.processes.4500.cpu",
///     TagSet::new().with("address", "1.2.3.4"),
///     "usage_cores",
///     0.5,
/// );
///
/// assert_eq!(
///     line.to_string(),
///     "cluster.processes.4500.cpu,address=1.2.3.4 usage_cores=0.500000000"
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLine {
    /// Dotted measurement path.
    pub path: String,

    /// Tags applying to this line.
    pub tags: TagSet,

    /// Field key.
    pub field: String,

    /// Finite numeric value.
    pub value: f64,
}

impl MetricLine {
    /// Creates a new metric line.
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        tags: TagSet,
        field: impl Into<String>,
        value: f64,
    ) -> Self {
        Self {
            path: path.into(),
            tags,
            field: field.into(),
            value,
        }
    }
}

impl fmt::Display for MetricLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {}={:.prec$}",
            self.path,
            self.tags,
            self.field,
            self.value,
            prec = VALUE_PRECISION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_set_empty_renders_nothing() {
        let tags = TagSet::new();
        assert!(tags.is_empty());
        assert_eq!(tags.to_string(), "");
    }

    #[test]
    fn test_tag_set_insertion_order() {
        let tags = TagSet::new()
            .with("address", "10.0.0.1")
            .with("machine_id", "m1")
            .with("excluded", "False")
            .with("process_id", "abc");

        let keys: Vec<&str> = tags.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["address", "machine_id", "excluded", "process_id"]);
    }

    #[test]
    fn test_tag_set_overwrite_keeps_position() {
        let tags = TagSet::new()
            .with("address", "10.0.0.1:4500")
            .with("machine_id", "m1")
            .with("address", "10.0.0.1");

        assert_eq!(tags.len(), 2);
        assert_eq!(tags.get("address"), Some("10.0.0.1"));
        assert_eq!(tags.to_string(), ",address=10.0.0.1,machine_id=m1");
    }

    #[test]
    fn test_metric_line_without_tags() {
        let line = MetricLine::new("client.coordinators", TagSet::new(), "total", 3.0);
        assert_eq!(line.to_string(), "client.coordinators total=3.000000000");
    }

    #[test]
    fn test_metric_line_precision() {
        let line = MetricLine::new("cluster.qos", TagSet::new(), "ratio", 1.0 / 3.0);
        assert_eq!(line.to_string(), "cluster.qos ratio=0.333333333");

        let line = MetricLine::new("cluster.qos", TagSet::new(), "lag", -12.5);
        assert_eq!(line.to_string(), "cluster.qos lag=-12.500000000");
    }

    #[test]
    fn test_metric_line_large_value_is_not_exponential() {
        let line = MetricLine::new("cluster.data", TagSet::new(), "total_kv_size_bytes", 1e12);
        assert_eq!(
            line.to_string(),
            "cluster.data total_kv_size_bytes=1000000000000.000000000"
        );
    }
}
