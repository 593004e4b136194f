use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use super::{get_config_path, Config};

const HEADER: &str = "\
# ntc-underwriter configuration
# Every section is optional; omitted values fall back to the reference model.
# Remove a line to go back to its default.
";

/// Write the default configuration to `path` (or the default location).
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic, so an interrupted run never leaves a half-written config behind.
pub fn write_default_config(path: Option<PathBuf>, force: bool) -> Result<PathBuf> {
    let config_path = match path {
        Some(p) => p,
        None => get_config_path()?,
    };

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at {} (use --force to overwrite)",
            config_path.display()
        );
    }

    ensure_parent_dir(&config_path)?;

    let yaml = serde_saphyr::to_string(&Config::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize default config: {}", e))?;

    let mut file = AtomicWriteFile::open(&config_path)
        .with_context(|| format!("Failed to open atomic write file at {}", config_path.display()))?;
    file.write_all(HEADER.as_bytes()).context("Failed to write config")?;
    file.write_all(yaml.as_bytes()).context("Failed to write config")?;
    file.commit().context("Failed to save config")?;

    info!(path = %config_path.display(), "default config written");
    Ok(config_path)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create config directory at {}", dir.display()))?;
        }
    }
    Ok(())
}
