use crate::error::{Result, SeedError};
use crate::utils::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    CopiedDirectory(String),
    CopiedFile(String),
    /// A file already existed at the destination and was left alone.
    Skipped(String),
}

impl std::fmt::Display for CopyOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CopyOutcome::CopiedDirectory(name) => write!(f, "Copied directory: {name}"),
            CopyOutcome::CopiedFile(name) => write!(f, "Copied file: {name}"),
            CopyOutcome::Skipped(name) => write!(f, "Skipped existing file: {name}"),
        }
    }
}

/// Copies each top-level entry of `project_dir` into `target_dir`.
///
/// Directories always replace whatever directory is already there; files
/// are only copied when nothing exists at the destination.
///
/// Symlinks are followed. A link that loops back into its own tree is not
/// detected up front; the copy recurses until the OS refuses the path
/// (`ELOOP` or `ENAMETOOLONG`) and that I/O error is returned.
pub fn copy_project_contents(project_dir: &Path, target_dir: &Path) -> Result<Vec<CopyOutcome>> {
    let mut entries: Vec<_> = std::fs::read_dir(project_dir)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut outcomes = Vec::with_capacity(entries.len());
    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let src_path = entry.path();
        let dst_path = target_dir.join(entry.file_name());

        let outcome = if src_path.is_dir() {
            if dst_path.is_dir() {
                fs::remove_dir_recursive(&dst_path)?;
            } else if dst_path.exists() || dst_path.is_symlink() {
                return Err(SeedError::DestinationConflict { path: dst_path });
            }
            fs::copy_dir_recursive(&src_path, &dst_path)?;
            CopyOutcome::CopiedDirectory(name)
        } else if dst_path.exists() {
            CopyOutcome::Skipped(name)
        } else {
            fs::copy_file_preserving(&src_path, &dst_path)?;
            CopyOutcome::CopiedFile(name)
        };

        println!("{outcome}");
        tracing::debug!("{outcome} ({} -> {})", src_path.display(), dst_path.display());
        outcomes.push(outcome);
    }

    Ok(outcomes)
}

/// Marks `target_dir/<script>` executable if it exists. Returns whether it did.
pub fn mark_wrapper_executable(target_dir: &Path, script: &str) -> Result<bool> {
    let path = target_dir.join(script);
    if !path.is_file() {
        tracing::debug!("no wrapper script at {}", path.display());
        return Ok(false);
    }
    fs::make_executable(&path)?;
    Ok(true)
}
