//! Inspection of an extracted archive: the printed tree and project-root detection.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Renders `root` as an indented listing.
///
/// Each level indents four spaces; a directory line ends in `/` and its files
/// come before its subdirectories. Names are sorted.
pub fn render_tree(root: &Path) -> Result<String> {
    let mut out = String::new();
    let name = root
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string());
    render_dir(root, &name, 0, &mut out)?;
    Ok(out)
}

fn render_dir(dir: &Path, name: &str, level: usize, out: &mut String) -> Result<()> {
    out.push_str(&" ".repeat(4 * level));
    out.push_str(name);
    out.push_str("/\n");

    let (subdirs, files) = sorted_entries(dir)?;
    let indent = " ".repeat(4 * (level + 1));
    for file in &files {
        out.push_str(&indent);
        out.push_str(file);
        out.push('\n');
    }
    for subdir in &subdirs {
        render_dir(&dir.join(subdir), subdir, level + 1, out)?;
    }
    Ok(())
}

/// Splits a directory's entries into (directories, files), each sorted by name.
/// Symlinked directories are listed as files so the walk cannot loop.
fn sorted_entries(dir: &Path) -> Result<(Vec<String>, Vec<String>)> {
    let mut subdirs = Vec::new();
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type()?.is_dir() {
            subdirs.push(name);
        } else {
            files.push(name);
        }
    }
    subdirs.sort();
    files.sort();
    Ok((subdirs, files))
}

/// Matching rule for the project root: an immediate subdirectory that
/// contains any of the marker names.
#[derive(Debug, Clone)]
pub struct ProjectMarkers {
    markers: Vec<String>,
}

impl ProjectMarkers {
    pub fn new(markers: Vec<String>) -> Self {
        Self { markers }
    }

    pub fn matches(&self, dir: &Path) -> bool {
        self.markers.iter().any(|m| dir.join(m).exists())
    }

    /// First subdirectory of `extract_dir` (by name) that carries a marker.
    pub fn find_project_dir(&self, extract_dir: &Path) -> Result<Option<PathBuf>> {
        let mut candidates: Vec<PathBuf> = std::fs::read_dir(extract_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_dir())
            .collect();
        candidates.sort();

        Ok(candidates.into_iter().find(|dir| {
            let found = self.matches(dir);
            tracing::debug!("checked {} for project markers: {found}", dir.display());
            found
        }))
    }

    pub fn describe(&self) -> String {
        self.markers.join(", ")
    }
}
