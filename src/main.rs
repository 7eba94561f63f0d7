//! Themepatch CLI - manage deployment-local color overrides

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use themepatch::cache::NoopCache;
use themepatch::config::{self, ThemepatchConfig};
use themepatch::source::AssetSources;
use themepatch::{ColorRole, OverrideStore, SqliteStore, ThemeMode, ThemeSettings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "themepatch")]
#[command(version = "0.1.0")]
#[command(about = "Theme color overrides for web asset bundles")]
#[command(long_about = r#"
Themepatch customizes SCSS color variables of a deployment without
touching the shipped asset sources:
  • Reads effective values (override if present, else the original file)
  • Persists changes as an attachment + replace-directive pair in SQLite
  • Resets back to the shipped colors by dropping the pair

Example usage:
  themepatch init --assets-root ./static
  themepatch show --mode light
  themepatch set --mode light --brand '#ABCDEF'
  themepatch reset --mode light
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a themepatch.toml config file
    Init {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Root directory of the static asset sources
        #[arg(short, long)]
        assets_root: Option<PathBuf>,

        /// Overwrite an existing config file
        #[arg(short, long)]
        force: bool,
    },

    /// Show current effective color values for a theme mode
    Show {
        /// Theme mode (light, dark)
        #[arg(short, long, default_value = "light")]
        mode: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Root directory of the static asset sources
        #[arg(short, long)]
        assets_root: Option<PathBuf>,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Set color values for a theme mode
    Set {
        /// Theme mode (light, dark)
        #[arg(short, long, default_value = "light")]
        mode: String,

        /// Brand color
        #[arg(long)]
        brand: Option<String>,

        /// Primary color
        #[arg(long)]
        primary: Option<String>,

        /// Success color
        #[arg(long)]
        success: Option<String>,

        /// Info color
        #[arg(long)]
        info: Option<String>,

        /// Warning color
        #[arg(long)]
        warning: Option<String>,

        /// Danger color
        #[arg(long)]
        danger: Option<String>,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Root directory of the static asset sources
        #[arg(short, long)]
        assets_root: Option<PathBuf>,
    },

    /// Remove the override for a theme mode
    Reset {
        /// Theme mode (light, dark)
        #[arg(short, long, default_value = "light")]
        mode: String,

        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,

        /// Root directory of the static asset sources
        #[arg(short, long)]
        assets_root: Option<PathBuf>,
    },

    /// Show statistics about the override database
    Stats {
        /// Path to the database file
        #[arg(short, long)]
        database: Option<PathBuf>,
    },
}

fn open_settings(
    loaded: Option<&ThemepatchConfig>,
    database: Option<PathBuf>,
    assets_root: Option<PathBuf>,
) -> anyhow::Result<ThemeSettings> {
    let db_path = config::resolve_database(database, loaded);
    let root = config::resolve_assets_root(assets_root, loaded);
    config::ensure_db_dir(&db_path)?;

    let store = SqliteStore::open(&db_path)?;
    let sources = AssetSources::new(root);
    Ok(ThemeSettings::new(OverrideStore::new(
        sources,
        store,
        Box::new(NoopCache),
    )))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let loaded = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Init { database, assets_root, force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            let new_config = ThemepatchConfig {
                database: database.map(|p| p.display().to_string()),
                assets_root: assets_root.map(|p| p.display().to_string()),
            };
            config::write_config(&path, &new_config, force)?;
            println!("✅ Wrote config to {:?}", path);
        }

        Commands::Show { mode, database, assets_root, format } => {
            let mode: ThemeMode = mode.parse()?;
            let settings = open_settings(loaded.as_ref(), database, assets_root)?;
            let values = settings.values(mode)?;

            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                let customized = settings.is_customized(mode)?;
                let origin = if customized { "override" } else { "original" };
                println!("🎨 {} colors ({})", mode, origin);
                for role in ColorRole::all() {
                    match values.get(role).cloned().flatten() {
                        Some(value) => println!("  {:<14} {}", role.to_string(), value),
                        None => println!("  {:<14} (not set)", role.to_string()),
                    }
                }
            }
        }

        Commands::Set { mode, brand, primary, success, info, warning, danger, database, assets_root } => {
            let mode: ThemeMode = mode.parse()?;
            let flags = [
                (ColorRole::Brand, brand),
                (ColorRole::Primary, primary),
                (ColorRole::Success, success),
                (ColorRole::Info, info),
                (ColorRole::Warning, warning),
                (ColorRole::Danger, danger),
            ];
            let updates: Vec<(ColorRole, String)> = flags
                .into_iter()
                .filter_map(|(role, value)| value.map(|v| (role, v)))
                .collect();

            if updates.is_empty() {
                anyhow::bail!("no color flags given (try --brand '#ABCDEF')");
            }

            let mut settings = open_settings(loaded.as_ref(), database, assets_root)?;
            if settings.apply(mode, &updates)? {
                println!("✅ Updated {} color(s) for {} mode", updates.len(), mode);
            } else {
                println!("∅ Values unchanged, nothing written");
            }
        }

        Commands::Reset { mode, database, assets_root } => {
            let mode: ThemeMode = mode.parse()?;
            let mut settings = open_settings(loaded.as_ref(), database, assets_root)?;
            let had_override = settings.is_customized(mode)?;
            settings.reset(mode)?;
            if had_override {
                println!("✅ Reset {} colors to the shipped values", mode);
            } else {
                println!("∅ No {} override to reset", mode);
            }
        }

        Commands::Stats { database } => {
            let db_path = config::resolve_database(database, loaded.as_ref());
            let store = SqliteStore::open(&db_path)?;
            let stats = store.stats()?;

            println!("📊 Themepatch Statistics ({:?})", db_path);
            println!("------------------------------------");
            println!("{}", stats);
        }
    }

    Ok(())
}
