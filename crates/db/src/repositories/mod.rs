//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Each one holds the caller's `DatabaseConnection`; there is no global handle.

pub mod catalog;
pub mod record;
pub mod selection;

pub use catalog::{
    Catalog, CatalogBlock, CatalogRepository, CatalogSubject, CatalogTopic, ImportSummary,
};
pub use record::RecordRepository;
pub use selection::{
    SelectionCommand, SelectionError, SelectionRepository, SetCompetenceSelection,
    SetTopicSelection,
};
