mod init;
mod schema;

pub use init::write_default_config;
pub use schema::{Config, ThemeSetting};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// Get the config directory path (~/.config/ntc-underwriter/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("ntc-underwriter"))
}

/// Get the default config file path (~/.config/ntc-underwriter/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path and
///   falls back to built-in defaults when no file exists there.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed or contains unknown fields
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(explicit) => {
            if !explicit.exists() {
                anyhow::bail!("Config file not found at {}", explicit.display());
            }
            explicit
        }
        None => {
            let default_path = get_config_path()?;
            if !default_path.exists() {
                debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!(path = %config_path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{CollegeTier, Major};
    use std::env;

    #[test]
    fn test_explicit_missing_path_is_error() {
        let path = env::temp_dir().join("ntc_underwriter_test_missing.yaml");
        let _ = fs::remove_file(&path);

        let result = load_config(Some(path));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("not found"));
    }

    #[test]
    fn test_load_full_config() {
        let path = env::temp_dir().join("ntc_underwriter_test_full.yaml");
        fs::write(
            &path,
            r#"
log_level: debug
theme: light
scoring:
  base_score: 250
  bands:
    elite: 700
applicant:
  college_tier: tier2
  major: medical
  gpa: 9.1
  internships: 3
  active_backlog: true
"#,
        )
        .unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.theme, ThemeSetting::Light);
        assert_eq!(config.scoring.base_score, 250);
        assert_eq!(config.scoring.bands.elite, 700);
        assert_eq!(config.scoring.bands.standard, 600);
        assert_eq!(config.applicant.college_tier, CollegeTier::Tier2);
        assert_eq!(config.applicant.major, Major::Medical);
        assert_eq!(config.applicant.internships, 3);
        assert!(config.applicant.active_backlog);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_empty_config_is_all_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unknown_top_level_field_rejected() {
        let yaml = "queries:\n  - query: \"is:pr\"\n";
        let result: Result<Config, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let path = env::temp_dir().join("ntc_underwriter_test_invalid.yaml");
        fs::write(&path, "scoring: [not, a, map]\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("invalid YAML"));

        let _ = fs::remove_file(&path);
    }
}
