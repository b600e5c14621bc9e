//! File status provider.

use super::{ProviderError, StatusProvider};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Reads a saved status document from a file, or from stdin when the path is `-`.
#[derive(Debug, Clone)]
pub struct FileProvider {
    path: PathBuf,
}

impl FileProvider {
    /// Creates a provider reading `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns true if this provider reads stdin.
    #[must_use]
    pub fn is_stdin(&self) -> bool {
        self.path == Path::new("-")
    }
}

impl StatusProvider for FileProvider {
    fn fetch(&self) -> Result<Vec<u8>, ProviderError> {
        let read_err = |source| ProviderError::Read {
            path: self.path.clone(),
            source,
        };

        if self.is_stdin() {
            let mut buf = Vec::new();
            std::io::stdin().lock().read_to_end(&mut buf).map_err(read_err)?;
            return Ok(buf);
        }

        std::fs::read(&self.path).map_err(read_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_is_stdin() {
        assert!(FileProvider::new("-").is_stdin());
        assert!(!FileProvider::new("status.json").is_stdin());
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let provider = FileProvider::new("/nonexistent/fdbstat/status.json");

        let err = provider.fetch().unwrap_err();

        assert!(matches!(err, ProviderError::Read { .. }));
        assert!(err
            .to_string()
            .starts_with("Failed to read status from '/nonexistent/fdbstat/status.json'"));
    }

    #[test]
    fn test_reads_file_contents() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"client": {}}"#).unwrap();

        let output = FileProvider::new(file.path()).fetch().unwrap();

        assert_eq!(output, br#"{"client": {}}"#);
    }
}
