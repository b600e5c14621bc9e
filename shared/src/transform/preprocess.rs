//! Status document preprocessing.
//!
//! Rebuilds the decoded status document so the flattener's generic rules can
//! tag it:
//! - `client.coordinators` becomes a `{total, reachable, quorum_reachable}` summary
//! - `cluster.processes` becomes an array of process records carrying their id
//! - `cluster.machines` becomes an array of machine records
//!
//! The input is consumed and a new document is built; no keys are removed
//! from a shared structure.

use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised when the status document does not have the expected shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    /// A value that must be an object is something else.
    #[error("Expected '{path}' to be an object, found {found}")]
    NotAnObject {
        /// Location of the offending value.
        path: String,
        /// JSON type found instead.
        found: &'static str,
    },

    /// A value that must be an array is something else.
    #[error("Expected '{path}' to be an array, found {found}")]
    NotAnArray {
        /// Location of the offending value.
        path: String,
        /// JSON type found instead.
        found: &'static str,
    },
}

/// Health summary of the coordinator list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CoordinatorSummary {
    /// Number of coordinators listed.
    pub total: u64,
    /// Number of coordinators reporting `reachable: true`.
    pub reachable: u64,
    /// Whether a quorum of coordinators is reachable.
    pub quorum_reachable: bool,
}

impl CoordinatorSummary {
    /// Summarizes a `client.coordinators` object.
    ///
    /// A missing object or a missing `coordinators` list yields zeros.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `coordinators` is not an array
    /// - an entry of `coordinators` is not an object
    pub fn from_status(coordinators: Option<&Map<String, Value>>) -> Result<Self, ShapeError> {
        let Some(coordinators) = coordinators else {
            return Ok(Self::default());
        };

        let quorum_reachable = coordinators
            .get("quorum_reachable")
            .and_then(Value::as_bool)
            .unwrap_or(false);

        let entries = match coordinators.get("coordinators") {
            None => {
                return Ok(Self {
                    quorum_reachable,
                    ..Self::default()
                })
            }
            Some(Value::Array(entries)) => entries,
            Some(other) => {
                return Err(ShapeError::NotAnArray {
                    path: "client.coordinators.coordinators".to_string(),
                    found: type_name(other),
                })
            }
        };

        let mut reachable = 0;
        for (index, entry) in entries.iter().enumerate() {
            let entry = as_object(entry, || {
                format!("client.coordinators.coordinators[{index}]")
            })?;
            if entry.get("reachable").and_then(Value::as_bool) == Some(true) {
                reachable += 1;
            }
        }

        Ok(Self {
            total: entries.len() as u64,
            reachable,
            quorum_reachable,
        })
    }

    /// Renders the summary as the object that replaces `client.coordinators`.
    #[must_use]
    pub fn to_value(&self) -> Value {
        let mut map = Map::new();
        map.insert("total".to_string(), Value::from(self.total));
        map.insert("reachable".to_string(), Value::from(self.reachable));
        map.insert(
            "quorum_reachable".to_string(),
            Value::from(u64::from(self.quorum_reachable)),
        );
        Value::Object(map)
    }
}

/// Preprocesses a decoded status document.
///
/// Must run exactly once per document: a second pass finds `processes` and
/// `machines` already turned into arrays and fails.
///
/// # Errors
///
/// Returns a `ShapeError` if the document root, `client`,
/// `client.coordinators`, `cluster`, `cluster.processes`, `cluster.machines`,
/// a coordinator entry or a process record has an unexpected type, or if a
/// process's `messages` is not an array.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use shared::transform::preprocess;
///
/// let status = preprocess(json!({
///     "cluster": {"processes": {"p1": {"messages": [{}, {}]}}}
/// }))
/// .unwrap();
///
/// assert_eq!(status["client"]["coordinators"]["total"], 0);
/// assert_eq!(status["cluster"]["processes"][0]["messages"], 2);
/// assert_eq!(status["cluster"]["processes"][0]["process"], "p1");
/// ```
pub fn preprocess(document: Value) -> Result<Value, ShapeError> {
    let root = into_object(document, "document")?;
    let mut out = Map::new();
    let mut client = None;

    for (key, value) in root {
        match key.as_str() {
            "client" => {
                out.insert(key, Value::Null);
                client = Some(value);
            }
            "cluster" => {
                out.insert(key, preprocess_cluster(value)?);
            }
            _ => {
                out.insert(key, value);
            }
        }
    }

    out.insert("client".to_string(), preprocess_client(client)?);
    Ok(Value::Object(out))
}

fn preprocess_client(client: Option<Value>) -> Result<Value, ShapeError> {
    let client = match client {
        Some(value) => into_object(value, "client")?,
        None => Map::new(),
    };

    let summary = match client.get("coordinators") {
        Some(value) => {
            CoordinatorSummary::from_status(Some(as_object(value, || {
                "client.coordinators".to_string()
            })?))?
        }
        None => CoordinatorSummary::default(),
    };

    let mut out = Map::new();
    let mut replaced = false;
    for (key, value) in client {
        if key == "coordinators" {
            out.insert(key, summary.to_value());
            replaced = true;
        } else {
            out.insert(key, value);
        }
    }
    if !replaced {
        out.insert("coordinators".to_string(), summary.to_value());
    }

    Ok(Value::Object(out))
}

fn preprocess_cluster(cluster: Value) -> Result<Value, ShapeError> {
    let cluster = into_object(cluster, "cluster")?;
    let mut out = Map::new();
    let mut processes = Vec::new();
    let mut machines = Vec::new();

    for (key, value) in cluster {
        match key.as_str() {
            "processes" => processes = process_records(value)?,
            "machines" => machines = machine_records(value)?,
            _ => {
                out.insert(key, value);
            }
        }
    }

    out.insert("processes".to_string(), Value::Array(processes));
    out.insert("machines".to_string(), Value::Array(machines));
    Ok(Value::Object(out))
}

fn process_records(processes: Value) -> Result<Vec<Value>, ShapeError> {
    let processes = into_object(processes, "cluster.processes")?;
    let mut records = Vec::with_capacity(processes.len());

    for (id, process) in processes {
        let path = || format!("cluster.processes.{id}");
        let process = into_object(process, &path())?;
        let mut record = Map::new();

        for (key, value) in process {
            if key == "messages" {
                let count = match &value {
                    Value::Array(messages) => messages.len(),
                    other => {
                        return Err(ShapeError::NotAnArray {
                            path: format!("{}.messages", path()),
                            found: type_name(other),
                        })
                    }
                };
                record.insert(key, Value::from(count));
            } else {
                record.insert(key, value);
            }
        }

        record.insert("process".to_string(), Value::String(id));
        records.push(Value::Object(record));
    }

    Ok(records)
}

fn machine_records(machines: Value) -> Result<Vec<Value>, ShapeError> {
    let machines = into_object(machines, "cluster.machines")?;
    Ok(machines.into_iter().map(|(_, machine)| machine).collect())
}

fn into_object(value: Value, path: &str) -> Result<Map<String, Value>, ShapeError> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(ShapeError::NotAnObject {
            path: path.to_string(),
            found: type_name(&other),
        }),
    }
}

fn as_object(
    value: &Value,
    path: impl FnOnce() -> String,
) -> Result<&Map<String, Value>, ShapeError> {
    value.as_object().ok_or_else(|| ShapeError::NotAnObject {
        path: path(),
        found: type_name(value),
    })
}

/// Returns the JSON type name of a value, for diagnostics.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
