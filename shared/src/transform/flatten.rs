//! Status document flattening.
//!
//! Walks a preprocessed status document depth-first and emits one
//! [`MetricLine`] per numeric leaf. Object keys extend the measurement path;
//! the process and machine records under `cluster` become tagged subtrees.
//! Any other array is not expanded.

use crate::config::TransformConfig;
use crate::models::{MetricLine, TagSet};
use serde_json::{Map, Value};

const SEPARATOR: char = '.';

/// Record keys moved into tags for both processes and machines.
const RECORD_TAG_KEYS: [&str; 3] = ["address", "machine_id", "excluded"];

/// Process record key holding the process id, tagged as `process_id`.
const PROCESS_KEY: &str = "process";

/// Flattens a preprocessed status document into metric lines.
///
/// The walk is a pure function of `document`: calling it twice yields the
/// same lines in the same order.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shared::config::TransformConfig;
/// use shared::transform::flatten;
///
/// let lines = flatten(
///     &json!({"cluster": {"qos": {"released_transactions_per_second": "12.5", "name": "x"}}}),
///     &TransformConfig::default(),
/// );
///
/// assert_eq!(lines.len(), 1);
/// assert_eq!(
///     lines[0].to_string(),
///     "cluster.qos released_transactions_per_second=12.500000000"
/// );
/// ```
#[must_use]
pub fn flatten(document: &Value, config: &TransformConfig) -> Vec<MetricLine> {
    let mut flattener = Flattener {
        config,
        lines: Vec::new(),
    };
    if let Value::Object(map) = document {
        flattener.walk(map, &[], &TagSet::new());
    }
    flattener.lines
}

struct Flattener<'a> {
    config: &'a TransformConfig,
    lines: Vec<MetricLine>,
}

impl Flattener<'_> {
    fn walk(&mut self, map: &Map<String, Value>, path: &[String], tags: &TagSet) {
        for (key, value) in map {
            let key = key.trim();
            match value {
                Value::Object(child) => {
                    self.walk(child, &extend(path, key), tags);
                }
                Value::Array(items) => {
                    if render_path(path) == "cluster" && is_record_list(key) {
                        for item in items {
                            if let Value::Object(record) = item {
                                self.walk_record(record, path, key);
                            }
                        }
                    }
                }
                scalar => self.emit(path, tags, key, scalar),
            }
        }
    }

    fn walk_record(&mut self, record: &Map<String, Value>, path: &[String], key: &str) {
        let is_process = key == "processes";
        let mut tags = TagSet::new();

        for tag_key in RECORD_TAG_KEYS {
            if let Some(value) = record.get(tag_key).and_then(tag_value) {
                tags.insert(tag_key, value);
            }
        }

        let mut record_path = extend(path, key);
        if is_process {
            if let Some(process_id) = record.get(PROCESS_KEY).and_then(tag_value) {
                tags.insert("process_id", process_id);
            }
            if let Some(Value::String(address)) = record.get("address") {
                let (host, port) = split_address(address);
                tags.insert("address", host);
                if let Some(port) = port {
                    record_path.push(port.to_string());
                }
            }
        }

        let reduced: Map<String, Value> = record
            .iter()
            .filter(|(k, _)| {
                !RECORD_TAG_KEYS.contains(&k.as_str()) && !(is_process && *k == PROCESS_KEY)
            })
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        self.walk(&reduced, &record_path, &tags);
    }

    fn emit(&mut self, path: &[String], tags: &TagSet, key: &str, value: &Value) {
        let Some(number) = coerce(value, self.config.booleans_as_fields) else {
            return;
        };
        self.lines.push(MetricLine::new(
            self.config.measurement(&render_path(path)),
            tags.clone(),
            key,
            number,
        ));
    }
}

fn is_record_list(key: &str) -> bool {
    key == "processes" || key == "machines"
}

fn extend(path: &[String], key: &str) -> Vec<String> {
    let mut next = Vec::with_capacity(path.len() + 1);
    next.extend_from_slice(path);
    next.push(key.to_string());
    next
}

/// Joins path segments with `.`, dropping a single leading separator.
fn render_path(path: &[String]) -> String {
    let joined = path.join(".");
    match joined.strip_prefix(SEPARATOR) {
        Some(stripped) => stripped.to_string(),
        None => joined,
    }
}

/// Coerces a scalar leaf to a finite number.
///
/// Numbers pass through, strings are parsed after trimming, booleans map to
/// 1/0 only when `booleans_as_fields` is set. Anything else, and any
/// non-finite result, yields `None`.
fn coerce(value: &Value, booleans_as_fields: bool) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        Value::Bool(b) if booleans_as_fields => f64::from(u8::from(*b)),
        _ => return None,
    };
    number.is_finite().then_some(number)
}

/// Renders a record value as a tag value; `null` yields no tag.
fn tag_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("True".to_string()),
        Value::Bool(false) => Some("False".to_string()),
        other => Some(other.to_string()),
    }
}

/// Splits a process address into its host and port.
///
/// Accepts `host:port`, `host:port:tls` and `[ipv6]:port`. An address
/// without a port yields the whole string as host.
fn split_address(address: &str) -> (&str, Option<&str>) {
    if let Some(rest) = address.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.split(':').next())
                .filter(|p| !p.is_empty());
            return (host, port);
        }
    }

    match address.split_once(':') {
        Some((host, rest)) => {
            let port = rest.split(':').next().filter(|p| !p.is_empty());
            (host, port)
        }
        None => (address, None),
    }
}
