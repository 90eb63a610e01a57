//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions
//! - The SQLite schema migration
//! - [`RecordRepository`], the database-backed record store of the engine
//! - Repositories for the competence catalog and class selections

pub mod entities;
pub mod migration;
pub mod repositories;

pub use repositories::{
    Catalog, CatalogRepository, ImportSummary, RecordRepository, SelectionCommand,
    SelectionError, SelectionRepository, SetCompetenceSelection, SetTopicSelection,
};

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};

/// Establishes a connection pool to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url);
    options
        .max_connections(max_connections.max(1))
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    Database::connect(options).await
}
