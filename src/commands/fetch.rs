use crate::core::config::FetchConfig;
use crate::core::download::Downloader;
use crate::error::Result;
use std::path::PathBuf;

/// Downloads the configured artifact, overwriting the destination. Returns its path.
pub fn fetch_artifact(config: &FetchConfig) -> Result<PathBuf> {
    let file_name = config
        .destination
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| config.url.clone());

    println!("Downloading {file_name}...");
    tracing::debug!("fetching {} into {}", config.url, config.destination.display());

    let downloader = Downloader::new()?;
    let bytes = downloader.download_file(&config.url, &config.destination)?;

    println!("Download complete! ({bytes} bytes written to {})", config.destination.display());
    Ok(config.destination.clone())
}
