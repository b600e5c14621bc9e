//! Status providers.
//!
//! A `StatusProvider` produces the raw bytes of one status document. The
//! `FdbcliProvider` runs `fdbcli` against a cluster file; the `FileProvider`
//! reads a saved document from a file or stdin.

pub mod fdbcli;
pub mod file;

pub use fdbcli::FdbcliProvider;
pub use file::FileProvider;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching the raw status output.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The status command could not be started or waited on.
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Program that was executed.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The saved status document could not be read.
    #[error("Failed to read status from '{path}': {source}", path = .path.display())]
    Read {
        /// Path that was read (`-` for stdin).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Source of one raw status document per invocation.
pub trait StatusProvider {
    /// Fetches the complete raw status output.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be produced.
    fn fetch(&self) -> Result<Vec<u8>, ProviderError>;
}
