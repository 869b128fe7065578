use crate::error::{Result, SeedError};
use crate::utils::fs;
use flate2::read::GzDecoder;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs::File;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use tar::Archive;
use zip::ZipArchive;

const USER_AGENT: &str = concat!("seedkit/", env!("CARGO_PKG_VERSION"));

pub struct Downloader {
    client: reqwest::blocking::Client,
}

impl Downloader {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| SeedError::config_error(format!("HTTP client setup failed: {e}")))?;
        Ok(Self { client })
    }

    /// Streams `url` to `destination`, replacing any existing file.
    ///
    /// The body lands in `<destination>.part` first and is renamed into place
    /// only after the whole transfer succeeded.
    pub fn download_file(&self, url: &str, destination: &Path) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                fs::ensure_dir_exists(parent)?;
            }
        }

        let download_error = |source| SeedError::Download {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(download_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SeedError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let progress = progress_bar(response.content_length());
        let partial = partial_path(destination);
        let mut file = File::create(&partial).map_err(|e| SeedError::from_io(e, &partial))?;
        let copied = std::io::copy(&mut progress.wrap_read(response), &mut file);
        progress.finish_and_clear();

        let written = match copied {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                let _ = std::fs::remove_file(&partial);
                return Err(e.into());
            }
        };
        file.sync_all()?;
        drop(file);

        std::fs::rename(&partial, destination).map_err(|e| SeedError::from_io(e, destination))?;
        tracing::debug!("wrote {written} bytes to {}", destination.display());
        Ok(written)
    }
}

fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

fn progress_bar(length: Option<u64>) -> ProgressBar {
    match length {
        Some(len) => {
            let bar = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::with_template(
                "{bar:40.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
            ) {
                bar.set_style(style.progress_chars("=> "));
            }
            bar
        }
        None => ProgressBar::new_spinner(),
    }
}

/// Archive formats the in-process reader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Rar,
    Zip,
    TarGz,
}

impl ArchiveFormat {
    pub fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".rar") {
            Some(ArchiveFormat::Rar)
        } else if name.ends_with(".zip") {
            Some(ArchiveFormat::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveFormat::TarGz)
        } else {
            None
        }
    }
}

/// Extracts `archive_path` into `destination` without external tools.
pub fn extract_archive(archive_path: &Path, destination: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(destination)?;

    let format = ArchiveFormat::detect(archive_path).ok_or_else(|| {
        anyhow::anyhow!("Unsupported archive format: {}", archive_path.display())
    })?;
    tracing::debug!("extracting {} as {format:?}", archive_path.display());

    match format {
        ArchiveFormat::Rar => extract_rar(archive_path, destination),
        ArchiveFormat::Zip => extract_zip(archive_path, destination),
        ArchiveFormat::TarGz => extract_tar_gz(archive_path, destination),
    }
}

fn extract_rar(archive_path: &Path, destination: &Path) -> anyhow::Result<()> {
    let mut archive = unrar::Archive::new(archive_path).open_for_processing()?;

    while let Some(header) = archive.read_header()? {
        let entry = header.entry();
        archive = if entry.is_directory() {
            let relative = enclosed(&entry.filename)
                .ok_or_else(|| anyhow::anyhow!("Unsafe path in archive: {:?}", entry.filename))?;
            std::fs::create_dir_all(destination.join(relative))?;
            header.skip()?
        } else {
            if enclosed(&entry.filename).is_none() {
                anyhow::bail!("Unsafe path in archive: {:?}", entry.filename);
            }
            header.extract_with_base(destination)?
        };
    }
    Ok(())
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> anyhow::Result<()> {
    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);
    archive.unpack(destination)?;
    Ok(())
}

fn extract_zip(archive_path: &Path, destination: &Path) -> anyhow::Result<()> {
    let file = File::open(archive_path)?;
    let mut archive = ZipArchive::new(file)?;

    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => destination.join(path),
            None => continue,
        };

        if file.is_dir() {
            std::fs::create_dir_all(&outpath)?;
        } else {
            if let Some(p) = outpath.parent() {
                std::fs::create_dir_all(p)?;
            }
            let mut outfile = File::create(&outpath)?;
            std::io::copy(&mut file, &mut outfile)?;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                std::fs::set_permissions(&outpath, std::fs::Permissions::from_mode(mode))?;
            }
        }
    }
    Ok(())
}

/// Returns the path if it stays below the extraction root.
fn enclosed(path: &Path) -> Option<&Path> {
    let safe = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    safe.then_some(path)
}
