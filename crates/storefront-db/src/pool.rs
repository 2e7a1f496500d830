//! # Database Handle
//!
//! Opens the storefront's SQLite file and brings its schema up to date.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbConfig::new(path) / DbConfig::in_memory()                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::new(config).await ── WAL file, embedded migrations          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.storage() / db.carts()   ── repositories share the pool            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  db.close().await            ── end of session                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One interactive session issues one query at a time, so the pool stays
//! small: a single connection for in-memory databases (each connection
//! would otherwise see its own empty database), two for files.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::cart::CartRepository;
use crate::repository::storage::StorageRepository;

// =============================================================================
// Configuration
// =============================================================================

/// Where the storefront keeps its data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    /// A database file, created on first connect.
    File(PathBuf),
    /// A private in-memory database that disappears on close.
    Memory,
}

/// Database configuration.
///
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("/path/to/storefront.db")).await?;
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub location: DbLocation,
    pub max_connections: u32,
    /// How long a query waits for a free connection.
    pub acquire_timeout: Duration,
}

impl DbConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            location: DbLocation::File(path.into()),
            max_connections: 2,
            acquire_timeout: Duration::from_secs(10),
        }
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Self {
        DbConfig {
            location: DbLocation::Memory,
            max_connections: 1,
            acquire_timeout: Duration::from_secs(5),
        }
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        match &self.location {
            DbLocation::File(path) => Ok(SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal)
                // NORMAL: a crash may lose the last write, never corrupts the file
                .synchronous(SqliteSynchronous::Normal)),
            DbLocation::Memory => SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::ConnectionFailed(e.to_string())),
        }
    }
}

// =============================================================================
// Database
// =============================================================================

/// Handle to the open database. Cloning shares the pool.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connects and applies pending migrations.
    ///
    /// ## Errors
    /// - `DbError::ConnectionFailed` when the file cannot be opened or created
    /// - `DbError::MigrationFailed` when the schema cannot be brought up to date
    pub async fn new(config: DbConfig) -> DbResult<Self> {
        info!(location = ?config.location, "Opening database");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout);

        if config.location == DbLocation::Memory {
            // The in-memory database lives only as long as its connection.
            pool_options = pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        }

        let pool = pool_options
            .connect_with(config.connect_options()?)
            .await
            .map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

        migrations::run_migrations(&pool).await?;

        Ok(Database { pool })
    }

    /// Key/value storage over the `local_storage` table.
    pub fn storage(&self) -> StorageRepository {
        StorageRepository::new(self.pool.clone())
    }

    /// The saved cart.
    ///
    /// ```rust,ignore
    /// let cart = db.carts().load().await?;
    /// ```
    pub fn carts(&self) -> CartRepository {
        CartRepository::new(self.storage())
    }

    /// Closes every connection. Repository calls fail afterwards with
    /// `DbError::ConnectionFailed`.
    pub async fn close(&self) {
        info!("Closing database");
        self.pool.close().await;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
