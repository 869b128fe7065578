use crate::core::config::UnpackConfig;
use crate::core::download::extract_archive;
use crate::core::fallback::FallbackExtractor;
use crate::core::install::{self, CopyOutcome};
use crate::core::layout::{self, ProjectMarkers};
use crate::error::{Result, SeedError};
use crate::utils::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMethod {
    InProcess,
    Fallback,
}

#[derive(Debug)]
pub struct UnpackReport {
    pub method: ExtractionMethod,
    pub project_dir: PathBuf,
    pub outcomes: Vec<CopyOutcome>,
    pub wrapper_marked: bool,
}

pub fn unpack_project(config: &UnpackConfig) -> Result<UnpackReport> {
    let archive = &config.archive;
    let extract_dir = &config.extract_dir;

    if !archive.is_file() {
        return Err(SeedError::ArchiveNotFound {
            path: archive.clone(),
        });
    }

    fs::reset_dir(extract_dir)?;

    println!(
        "Extracting {} to {}...",
        archive.display(),
        extract_dir.display()
    );
    let method = match extract_archive(archive, extract_dir) {
        Ok(()) => {
            println!("Extraction completed successfully.");
            ExtractionMethod::InProcess
        }
        Err(e) => {
            let fallback = FallbackExtractor::new(config.fallback_tool.clone());
            println!("In-process extraction failed: {e:#}");
            println!("Falling back to {} extraction...", fallback.tool());
            tracing::warn!("in-process extraction of {} failed: {e:#}", archive.display());

            fs::reset_dir(extract_dir)?;
            fallback.extract(archive, extract_dir)?;
            println!("Extraction completed successfully with {}.", fallback.tool());
            ExtractionMethod::Fallback
        }
    };

    println!();
    println!("Contents:");
    print!("{}", layout::render_tree(extract_dir)?);

    println!();
    println!("Copying extracted content to {}...", config.target_dir.display());
    let markers = ProjectMarkers::new(config.project_markers.clone());
    let project_dir = markers
        .find_project_dir(extract_dir)?
        .ok_or_else(|| SeedError::ProjectNotFound {
            dir: extract_dir.clone(),
            markers: markers.describe(),
        })?;
    println!("Found main project directory: {}", project_dir.display());

    fs::ensure_dir_exists(&config.target_dir)?;
    let outcomes = install::copy_project_contents(&project_dir, &config.target_dir)?;

    let wrapper_marked = match &config.wrapper_script {
        Some(script) => {
            let marked = install::mark_wrapper_executable(&config.target_dir, script)?;
            if marked {
                println!("Made {script} executable");
            }
            marked
        }
        None => false,
    };

    Ok(UnpackReport {
        method,
        project_dir,
        outcomes,
        wrapper_marked,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::download::tests::{write_zip, ANDROID_PROJECT_RAR};
    use tempfile::TempDir;

    fn config_in(temp: &TempDir, archive: &str) -> UnpackConfig {
        UnpackConfig {
            archive: temp.path().join(archive),
            extract_dir: temp.path().join("extracted_project"),
            target_dir: temp.path().join("work"),
            fallback_tool: "seedkit-no-such-extractor-tool".to_string(),
            ..UnpackConfig::default()
        }
    }

    #[test]
    fn test_unpack_zip_end_to_end() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp, "project.zip");
        write_zip(
            &config.archive,
            &[
                ("Demo-main/app/src/Main.kt", "fun main() {}"),
                ("Demo-main/build.gradle", "plugins {}"),
                ("Demo-main/gradlew", "#!/bin/sh\n"),
            ],
        );
        std::fs::create_dir_all(&config.target_dir).unwrap();
        std::fs::write(config.target_dir.join("build.gradle"), "keep me").unwrap();

        // Stale scratch output must not survive.
        std::fs::create_dir_all(config.extract_dir.join("leftover")).unwrap();

        let report = unpack_project(&config).unwrap();

        assert_eq!(report.method, ExtractionMethod::InProcess);
        assert_eq!(report.project_dir, config.extract_dir.join("Demo-main"));
        assert!(!config.extract_dir.join("leftover").exists());
        assert!(config.target_dir.join("app/src/Main.kt").is_file());
        assert_eq!(
            std::fs::read_to_string(config.target_dir.join("build.gradle")).unwrap(),
            "keep me"
        );
        assert!(report.wrapper_marked);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(config.target_dir.join("gradlew"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o755);
        }
    }

    #[test]
    fn test_unpack_rar_in_process() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp, "Demo-main.rar");
        std::fs::write(&config.archive, ANDROID_PROJECT_RAR).unwrap();

        let report = unpack_project(&config).unwrap();

        assert_eq!(report.method, ExtractionMethod::InProcess);
        assert_eq!(report.project_dir, config.extract_dir.join("Demo-main"));
        assert_eq!(
            report.outcomes,
            vec![
                CopyOutcome::CopiedDirectory("app".to_string()),
                CopyOutcome::CopiedFile("build.gradle".to_string()),
                CopyOutcome::CopiedFile("gradlew".to_string()),
            ]
        );
        assert_eq!(
            std::fs::read_to_string(config.target_dir.join("app/build.gradle")).unwrap(),
            "android {}\n"
        );
        assert!(report.wrapper_marked);
    }

    #[test]
    fn test_unpack_without_project_copies_nothing() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp, "docs.zip");
        write_zip(
            &config.archive,
            &[("Docs/readme.txt", "no project here"), ("notes.txt", "x")],
        );

        let err = unpack_project(&config).unwrap_err();

        assert!(matches!(err, SeedError::ProjectNotFound { .. }));
        assert!(!config.target_dir.exists());
        assert!(config.extract_dir.join("Docs/readme.txt").is_file());
    }

    #[test]
    fn test_unpack_missing_archive() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp, "absent.rar");

        let err = unpack_project(&config).unwrap_err();
        assert!(matches!(err, SeedError::ArchiveNotFound { .. }));
        assert!(!config.extract_dir.exists());
    }

    #[test]
    fn test_unpack_fallback_unavailable_is_error() {
        let temp = TempDir::new().unwrap();
        let config = config_in(&temp, "broken.rar");
        std::fs::write(&config.archive, "not a rar").unwrap();

        let err = unpack_project(&config).unwrap_err();
        assert!(matches!(err, SeedError::FallbackUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_uses_fallback_tool() {
        use crate::core::fallback::tests::fake_tool;

        let temp = TempDir::new().unwrap();
        let mut config = config_in(&temp, "app.rar");
        std::fs::write(&config.archive, "not a rar").unwrap();

        let tool = fake_tool(
            temp.path(),
            "dir=\"${3#-o}\"\nmkdir -p \"$dir/Demo/app\"\necho 'plugins {}' > \"$dir/Demo/build.gradle\"",
        );
        config.fallback_tool = tool.to_string_lossy().into_owned();

        let report = unpack_project(&config).unwrap();

        assert_eq!(report.method, ExtractionMethod::Fallback);
        let logged = std::fs::read_to_string(temp.path().join("fake-7z.args")).unwrap();
        assert_eq!(
            logged,
            format!(
                "x\n{}\n-o{}\n",
                config.archive.display(),
                config.extract_dir.display()
            )
        );
        assert!(config.target_dir.join("app").is_dir());
        assert!(config.target_dir.join("build.gradle").is_file());
        assert!(!report.wrapper_marked);
    }

    #[cfg(unix)]
    #[test]
    fn test_unpack_fallback_failure_stops_before_copy() {
        use crate::core::fallback::tests::fake_tool;

        let temp = TempDir::new().unwrap();
        let mut config = config_in(&temp, "app.rar");
        std::fs::write(&config.archive, "not a rar").unwrap();
        config.fallback_tool = fake_tool(temp.path(), "exit 2")
            .to_string_lossy()
            .into_owned();

        let err = unpack_project(&config).unwrap_err();
        assert!(matches!(err, SeedError::FallbackFailed { code: Some(2), .. }));
        assert!(!config.target_dir.exists());
    }
}
