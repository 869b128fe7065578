use crate::error::{Result, SeedError};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_WRAPPER_URL: &str =
    "https://github.com/gradle/gradle/raw/v7.5.0/gradle/wrapper/gradle-wrapper.jar";
pub const PROJECT_CONFIG_FILE: &str = "seedkit.toml";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub unpack: UnpackConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct FetchConfig {
    pub url: String,
    pub destination: PathBuf,
}

impl Default for FetchConfig {
    fn default() -> Self {
        FetchConfig {
            url: DEFAULT_WRAPPER_URL.to_string(),
            destination: PathBuf::from("gradle/wrapper/gradle-wrapper.jar"),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UnpackConfig {
    pub archive: PathBuf,
    pub extract_dir: PathBuf,
    /// Where the project's top-level entries are copied.
    pub target_dir: PathBuf,
    pub fallback_tool: String,
    /// Names that mark a subdirectory as the project root (file or directory).
    pub project_markers: Vec<String>,
    pub wrapper_script: Option<String>,
}

impl Default for UnpackConfig {
    fn default() -> Self {
        UnpackConfig {
            archive: PathBuf::from("attached_assets/Drowsiness-Detection-Android-App-main.rar"),
            extract_dir: PathBuf::from("extracted_project"),
            target_dir: PathBuf::from("."),
            fallback_tool: "7z".to_string(),
            project_markers: vec!["app".to_string(), "build.gradle".to_string()],
            wrapper_script: Some("gradlew".to_string()),
        }
    }
}

/// Where the active configuration came from.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    File(PathBuf),
    Defaults,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::File(path) => write!(f, "{}", path.display()),
            ConfigSource::Defaults => write!(f, "built-in defaults"),
        }
    }
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads an explicit file, or the first of `./seedkit.toml` and the
    /// user config file that exists, or the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, ConfigSource)> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(SeedError::ConfigNotFound {
                    path: path.to_path_buf(),
                });
            }
            return Ok((Self::load_file(path)?, ConfigSource::File(path.to_path_buf())));
        }

        let candidates = std::iter::once(PathBuf::from(PROJECT_CONFIG_FILE)).chain(user_config_path());
        for candidate in candidates {
            if candidate.is_file() {
                tracing::debug!("loading configuration from {}", candidate.display());
                let config = Self::load_file(&candidate)?;
                return Ok((config, ConfigSource::File(candidate)));
            }
        }

        tracing::debug!("no configuration file found, using defaults");
        Ok((Config::default(), ConfigSource::Defaults))
    }

    fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| SeedError::from_io(e, path))?;
        Self::parse(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fetch.url.trim().is_empty() {
            return Err(SeedError::config_error("fetch.url must not be empty"));
        }
        if self.fetch.destination.as_os_str().is_empty() {
            return Err(SeedError::config_error("fetch.destination must not be empty"));
        }
        if self.unpack.extract_dir.as_os_str().is_empty() {
            return Err(SeedError::config_error("unpack.extract_dir must not be empty"));
        }
        if self.unpack.fallback_tool.trim().is_empty() {
            return Err(SeedError::config_error("unpack.fallback_tool must not be empty"));
        }
        if self.unpack.project_markers.is_empty() {
            return Err(SeedError::config_error(
                "unpack.project_markers needs at least one entry",
            ));
        }
        Ok(())
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("seedkit").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_known_layout() {
        let config = Config::default();
        assert_eq!(config.fetch.url, DEFAULT_WRAPPER_URL);
        assert_eq!(
            config.fetch.destination,
            PathBuf::from("gradle/wrapper/gradle-wrapper.jar")
        );
        assert_eq!(config.unpack.fallback_tool, "7z");
        assert_eq!(config.unpack.project_markers, vec!["app", "build.gradle"]);
        assert_eq!(config.unpack.wrapper_script.as_deref(), Some("gradlew"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let content = r#"
[unpack]
archive = "assets/project.zip"
project_markers = ["settings.gradle.kts"]
"#;

        let config = Config::parse(content).unwrap();
        assert_eq!(config.unpack.archive, PathBuf::from("assets/project.zip"));
        assert_eq!(config.unpack.project_markers, vec!["settings.gradle.kts"]);
        assert_eq!(config.unpack.extract_dir, PathBuf::from("extracted_project"));
        assert_eq!(config.fetch, FetchConfig::default());
    }

    #[test]
    fn test_parse_rejects_empty_markers() {
        let content = r#"
[unpack]
project_markers = []
"#;
        let err = Config::parse(content).unwrap_err();
        assert!(matches!(err, SeedError::ConfigError { .. }));
    }

    #[test]
    fn test_parse_rejects_bad_toml() {
        let err = Config::parse("[fetch\nurl = 3").unwrap_err();
        assert!(matches!(err, SeedError::ConfigParse(_)));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[fetch]\nurl = \"http://localhost/x.jar\"\n").unwrap();

        let (config, source) = Config::load(Some(&path)).unwrap();
        assert_eq!(config.fetch.url, "http://localhost/x.jar");
        assert_eq!(source, ConfigSource::File(path));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent.toml");
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, SeedError::ConfigNotFound { .. }));
    }
}
