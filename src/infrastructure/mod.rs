//! External concerns: database, in-memory store, crypto

pub mod crypto;
pub mod database;
pub mod memory;

pub use database::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};
