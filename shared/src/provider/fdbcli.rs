//! `fdbcli` status provider.

use super::{ProviderError, StatusProvider};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Default program used to fetch cluster status.
pub const DEFAULT_FDBCLI: &str = "fdbcli";

/// Runs `fdbcli -C <cluster_file> --exec "status json"` and captures stdout.
#[derive(Debug, Clone)]
pub struct FdbcliProvider {
    program: PathBuf,
    cluster_file: PathBuf,
}

impl FdbcliProvider {
    /// Creates a provider using the `fdbcli` found on `PATH`.
    #[must_use]
    pub fn new(cluster_file: impl Into<PathBuf>) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_FDBCLI),
            cluster_file: cluster_file.into(),
        }
    }

    /// Overrides the program executed.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Returns the cluster file passed to the program.
    #[must_use]
    pub fn cluster_file(&self) -> &Path {
        &self.cluster_file
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("-C")
            .arg(&self.cluster_file)
            .arg("--exec")
            .arg("status json")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit());
        command
    }
}

impl StatusProvider for FdbcliProvider {
    fn fetch(&self) -> Result<Vec<u8>, ProviderError> {
        // `output` drains stdout to EOF and reaps the child.
        let output = self
            .command()
            .output()
            .map_err(|source| ProviderError::Spawn {
                program: self.program.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            tracing::warn!(
                status = %output.status,
                cluster_file = %self.cluster_file.display(),
                "fdbcli exited unsuccessfully"
            );
        }

        tracing::debug!(bytes = output.stdout.len(), "Fetched status output");
        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_arguments() {
        let provider = FdbcliProvider::new("/etc/foundationdb/fdb.cluster");
        let command = provider.command();

        assert_eq!(command.get_program(), "fdbcli");
        let args: Vec<_> = command.get_args().collect();
        assert_eq!(
            args,
            vec!["-C", "/etc/foundationdb/fdb.cluster", "--exec", "status json"]
        );
    }

    #[test]
    fn test_program_override() {
        let provider = FdbcliProvider::new("fdb.cluster").with_program("/opt/fdb/bin/fdbcli");
        assert_eq!(provider.command().get_program(), "/opt/fdb/bin/fdbcli");
        assert_eq!(provider.cluster_file(), Path::new("fdb.cluster"));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let provider =
            FdbcliProvider::new("fdb.cluster").with_program("/nonexistent/fdbstat-test-fdbcli");

        let result = provider.fetch();

        assert!(matches!(result, Err(ProviderError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn test_fetch_captures_stdout() {
        // `echo` prints its arguments, standing in for fdbcli.
        let provider = FdbcliProvider::new("fdb.cluster").with_program("echo");

        let output = provider.fetch().unwrap();

        assert_eq!(output, b"-C fdb.cluster --exec status json\n");
    }
}
