//! fdbstat Shared Library
//!
//! This crate turns a cluster status document (the output of
//! `fdbcli --exec "status json"`) into metric lines of the form
//! `path[,tag=value,...] field=value`.
//!
//! # Modules
//!
//! - [`models`] - Metric line and tag set types
//! - [`config`] - Transform options
//! - [`transform`] - Preprocessing and flattening of status documents
//! - [`provider`] - Sources of raw status output
//!
//! # Example
//!
//! ```
//! use shared::config::TransformConfig;
//! use shared::transform::status_to_lines;
//!
//! let raw = br#"{
//!     "client": {"coordinators": {"coordinators": [{"reachable": true}], "quorum_reachable": true}},
//!     "cluster": {"machines": {"m1": {"machine_id": "m1", "contributing_workers": 2}}}
//! }"#;
//!
//! let lines = status_to_lines(raw, &TransformConfig::default()).unwrap();
//!
//! assert_eq!(lines[0].to_string(), "client.coordinators total=1.000000000");
//! assert_eq!(
//!     lines[3].to_string(),
//!     "cluster.machines,machine_id=m1 contributing_workers=2.000000000"
//! );
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod models;
pub mod provider;
pub mod transform;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;
