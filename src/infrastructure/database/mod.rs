//! SQLite persistence for watermarks.

pub mod connection;
pub mod watermark_repo;

pub use connection::DatabaseConnection;
pub use watermark_repo::SqliteWatermarkStore;
