// ==========================================
// Cycle Radar - data source layer
// ==========================================
// Rule: data sources carry no business logic
// ==========================================
// Read-only access to the production dataset.
// All SQL is parameterized.
// ==========================================

pub mod csv_source;
pub mod error;
pub mod source;
pub mod sqlite_source;

pub use csv_source::CsvProductionSource;
pub use error::{RepositoryError, RepositoryResult};
pub use source::{CycleQuery, ProductionDataSource};
pub use sqlite_source::SqliteProductionSource;
