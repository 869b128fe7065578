use crate::error::{Result, SeedError};
use std::fs::File;
use std::path::Path;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| SeedError::from_io(e, path))?;
    }
    Ok(())
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| SeedError::from_io(e, path))?;
    }
    Ok(())
}

/// Removes `path` if present and recreates it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    remove_dir_recursive(path)?;
    std::fs::create_dir_all(path).map_err(|e| SeedError::from_io(e, path))?;
    Ok(())
}

/// Copies a file along with its permission bits and modification time.
pub fn copy_file_preserving(from: &Path, to: &Path) -> Result<()> {
    if let Some(parent) = to.parent() {
        ensure_dir_exists(parent)?;
    }

    let metadata = std::fs::metadata(from).map_err(|e| SeedError::from_io(e, from))?;
    let mut reader = File::open(from).map_err(|e| SeedError::from_io(e, from))?;
    let mut writer = File::create(to).map_err(|e| SeedError::from_io(e, to))?;
    std::io::copy(&mut reader, &mut writer)?;

    // Times go on while the handle is writable; permissions last so
    // read-only sources still copy.
    let times = std::fs::FileTimes::new()
        .set_accessed(metadata.accessed()?)
        .set_modified(metadata.modified()?);
    writer.set_times(times)?;
    drop(writer);

    std::fs::set_permissions(to, metadata.permissions())
        .map_err(|e| SeedError::from_io(e, to))?;

    Ok(())
}

pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    ensure_dir_exists(dst)?;

    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            copy_file_preserving(&src_path, &dst_path)?;
        }
    }

    Ok(())
}

/// Sets the mode to exactly `rwxr-xr-x`.
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .map_err(|e| SeedError::from_io(e, path))?;
    }

    // Windows has no mode bits; scripts run through their interpreter
    #[cfg(windows)]
    {
        let _ = path;
    }

    Ok(())
}
