use crate::error::{Result, SeedError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// External extraction tool invoked as `<tool> x <archive> -o<dir>` (7-Zip syntax).
pub struct FallbackExtractor {
    tool: String,
}

impl FallbackExtractor {
    pub fn new<S: Into<String>>(tool: S) -> Self {
        Self { tool: tool.into() }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn command(&self, archive_path: &Path, destination: &Path) -> Command {
        let mut output_flag = std::ffi::OsString::from("-o");
        output_flag.push(destination);

        let mut command = Command::new(&self.tool);
        command.arg("x").arg(archive_path).arg(output_flag);
        command
    }

    pub fn extract(&self, archive_path: &Path, destination: &Path) -> Result<()> {
        tracing::debug!(
            "running {} x {} -o{}",
            self.tool,
            archive_path.display(),
            destination.display()
        );

        let output = self
            .command(archive_path, destination)
            .output()
            .map_err(|source| SeedError::FallbackUnavailable {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(SeedError::FallbackFailed {
                tool: self.tool.clone(),
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(())
    }

    /// Resolves the tool on `PATH` (or accepts a direct path to it).
    pub fn locate(&self) -> Option<PathBuf> {
        which::which(&self.tool).ok()
    }
}
