use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ThemepatchConfig {
    pub database: Option<String>,
    pub assets_root: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("themepatch.toml")
}

pub fn default_database_path_in(base: &Path) -> PathBuf {
    base.join(".themepatch").join("themepatch.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ThemepatchConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ThemepatchConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ThemepatchConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// Database path resolution: CLI flag wins, then config, then the
/// default under the current directory.
pub fn resolve_database(cli: Option<PathBuf>, config: Option<&ThemepatchConfig>) -> PathBuf {
    cli.or_else(|| {
        config
            .and_then(|c| c.database.as_ref())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| default_database_path_in(Path::new(".")))
}

/// Assets root resolution: CLI flag wins, then config, then `.`.
pub fn resolve_assets_root(cli: Option<PathBuf>, config: Option<&ThemepatchConfig>) -> PathBuf {
    cli.or_else(|| {
        config
            .and_then(|c| c.assets_root.as_ref())
            .map(PathBuf::from)
    })
    .unwrap_or_else(|| PathBuf::from("."))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
