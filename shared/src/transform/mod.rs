//! Status document transform pipeline.
//!
//! `decode → preprocess → flatten`. The pipeline either returns every metric
//! line of the document or an error, never a partial batch.

pub mod flatten;
pub mod preprocess;

pub use flatten::flatten;
pub use preprocess::{preprocess, CoordinatorSummary, ShapeError};

use crate::config::TransformConfig;
use crate::models::MetricLine;
use serde_json::Value;
use thiserror::Error;

/// Errors that abort the transform of a single document.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The raw status output is not valid JSON.
    #[error("Invalid status JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The decoded document does not have the expected shape.
    #[error("Unexpected status document shape: {0}")]
    Shape(#[from] ShapeError),
}

/// Decodes raw status output into a JSON document.
///
/// # Errors
///
/// Returns `TransformError::Decode` if the bytes are not valid JSON.
pub fn decode(raw: &[u8]) -> Result<Value, TransformError> {
    Ok(serde_json::from_slice(raw)?)
}

/// Preprocesses and flattens a decoded status document.
///
/// # Errors
///
/// Returns `TransformError::Shape` if preprocessing rejects the document.
pub fn transform(
    document: Value,
    config: &TransformConfig,
) -> Result<Vec<MetricLine>, TransformError> {
    let document = preprocess(document)?;
    let lines = flatten(&document, config);
    tracing::debug!(lines = lines.len(), "Flattened status document");
    Ok(lines)
}

/// Runs the full pipeline over raw status output.
///
/// # Errors
///
/// Returns an error if:
/// - The output is not valid JSON
/// - The document does not have the expected shape
///
/// # Examples
///
/// ```
/// use shared::config::TransformConfig;
/// use shared::transform::status_to_lines;
///
/// let lines = status_to_lines(br#"{"client": {}}"#, &TransformConfig::default()).unwrap();
/// let rendered: Vec<String> = lines.iter().map(ToString::to_string).collect();
///
/// assert_eq!(
///     rendered,
///     vec![
///         "client.coordinators total=0.000000000",
///         "client.coordinators reachable=0.000000000",
///         "client.coordinators quorum_reachable=0.000000000",
///     ]
/// );
/// ```
pub fn status_to_lines(
    raw: &[u8],
    config: &TransformConfig,
) -> Result<Vec<MetricLine>, TransformError> {
    transform(decode(raw)?, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_json_is_decode_error() {
        let result = status_to_lines(
            b"ERROR: Unable to communicate with the cluster",
            &TransformConfig::default(),
        );
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_out_of_range_number_still_decodes() {
        let document = decode(br#"{"cluster": {"huge": 1e400}}"#).unwrap();
        assert!(document["cluster"]["huge"].is_number());
    }

    #[test]
    fn test_empty_output_is_decode_error() {
        let result = status_to_lines(b"", &TransformConfig::default());
        assert!(matches!(result, Err(TransformError::Decode(_))));
    }

    #[test]
    fn test_shape_error_yields_no_lines() {
        let result = status_to_lines(
            br#"{"cluster": {"qos": {"limit": 1}}, "client": {"coordinators": {"coordinators": 3}}}"#,
            &TransformConfig::default(),
        );
        assert!(matches!(result, Err(TransformError::Shape(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = TransformError::from(ShapeError::NotAnObject {
            path: "cluster".to_string(),
            found: "string",
        });
        assert_eq!(
            err.to_string(),
            "Unexpected status document shape: Expected 'cluster' to be an object, found string"
        );
    }
}
