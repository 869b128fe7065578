use crate::core::config::{Config, ConfigSource};
use crate::core::fallback::FallbackExtractor;
use crate::error::Result;

/// Prints what `fetch` and `unpack` would run against and returns the issue count.
pub fn check_environment(config: &Config, source: &ConfigSource) -> Result<usize> {
    println!("🔍 seedkit - Environment Check");
    println!();

    let mut issues_found = 0;

    println!("⚙️  Configuration:");
    println!("  source: {source}");
    println!("  wrapper url: {}", config.fetch.url);
    println!("  wrapper destination: {:?}", config.fetch.destination);
    if config.fetch.destination.exists() {
        println!("    ✅ already downloaded");
    } else {
        println!("    ⚠️  not downloaded yet");
    }

    println!();

    println!("📦 Archive:");
    let unpack = &config.unpack;
    println!("  archive: {:?}", unpack.archive);
    if unpack.archive.is_file() {
        println!("    ✅ exists");
    } else {
        println!("    ❌ missing");
        issues_found += 1;
    }

    println!("  extraction directory: {:?}", unpack.extract_dir);
    if unpack.extract_dir.exists() {
        println!("    ⚠️  exists and will be replaced");
    } else {
        println!("    ✅ free");
    }
    println!("  project markers: {}", unpack.project_markers.join(", "));

    println!();

    println!("🧰 Fallback Extractor:");
    let fallback = FallbackExtractor::new(unpack.fallback_tool.clone());
    match fallback.locate() {
        Some(path) => println!("  ✅ '{}' found at {:?}", fallback.tool(), path),
        None => {
            println!("  ❌ '{}' not found on PATH", fallback.tool());
            issues_found += 1;
        }
    }

    println!();

    if issues_found == 0 {
        println!("🎉 Environment looks good! No issues found.");
    } else {
        println!("⚠️  Found {issues_found} issue(s) that need attention.");
        println!();
        println!("💡 To fix issues:");
        println!("  - Place the archive at the configured path or pass --archive");
        println!("  - Install p7zip (provides '7z') or set unpack.fallback_tool in seedkit.toml");
    }

    Ok(issues_found)
}
