//! # Storefront Library
//!
//! Configures and runs the interactive storefront.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── shell.rs        ◄─── Line → Action → command → text
//! ├── render.rs       ◄─── Text view of command responses
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── config.rs   ◄─── Configuration state
//! │   ├── catalog.rs  ◄─── Loaded catalog or "unavailable"
//! │   ├── browse.rs   ◄─── Criteria + pagination
//! │   ├── cart.rs     ◄─── Cart state and response DTOs
//! │   └── db.rs       ◄─── Database state wrapper
//! ├── commands/
//! │   ├── product.rs  ◄─── Grid and criteria commands
//! │   ├── cart.rs     ◄─── Cart commands (persisted)
//! │   └── modal.rs    ◄─── Preview/zoom commands
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod shell;
pub mod state;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Args;
use shell::Shell;
use state::{AppState, CatalogState, ConfigState, DbState};
use storefront_db::{Database, DbConfig};

/// Default log filter when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug,sqlx=warn";

/// Runs the storefront until `quit` or end of input.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Resolve configuration: defaults ◄ env ◄ flags                       │
/// │  2. Determine database path (flag/env or platform data directory)       │
/// │  3. Connect to database, run pending migrations                         │
/// │  4. Read the catalog file (failure → "catalog unavailable")             │
/// │  5. Restore the saved cart (unreadable → empty)                         │
/// │  6. Build AppState, hand it to the shell, read stdin                    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(args: Args) -> Result<()> {
    info!("Starting storefront");

    let config = ConfigState::from_env()
        .with_overrides(args.catalog, args.db, args.page_size)
        .context("invalid configuration")?;

    let db_path = database_path(&config)?;
    info!(db_path = %db_path.display(), "Database path determined");

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("could not open database at {}", db_path.display()))?;
    info!("Database connected and migrations applied");

    let catalog = CatalogState::load(&config.catalog_path).await;
    let cart = db.carts().load().await.context("could not read the saved cart")?;

    let state = AppState::new(config, catalog, cart, DbState::new(db.clone()));
    info!("State initialized");

    let mut shell = Shell::new(state);
    shell
        .run(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await
        .context("terminal I/O failed")?;

    db.close().await;
    info!("Storefront closed");
    Ok(())
}

/// Initializes the tracing subscriber. Logs go to stderr so they never mix
/// with the storefront output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=storefront_db=trace` - Trace the persistence layer only
/// - Default: [`DEFAULT_LOG_FILTER`]
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Determines the database file path.
///
/// ## Platform-Specific Defaults
/// - **macOS**: `~/Library/Application Support/com.storefront.storefront/storefront.db`
/// - **Windows**: `%APPDATA%\storefront\storefront\data\storefront.db`
/// - **Linux**: `~/.local/share/storefront/storefront.db`
///
/// `--db` or `STOREFRONT_DB_PATH` replaces the default.
fn database_path(config: &ConfigState) -> Result<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("com", "storefront", "storefront")
        .context("could not determine app data directory")?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("could not create {}", data_dir.display()))?;

    Ok(data_dir.join("storefront.db"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_database_path_wins() {
        let config = ConfigState {
            database_path: Some(PathBuf::from("/tmp/explicit.db")),
            ..ConfigState::default()
        };
        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/tmp/explicit.db"));
    }

    #[test]
    fn test_default_filter_parses() {
        assert!(DEFAULT_LOG_FILTER.parse::<EnvFilter>().is_ok());
    }
}
