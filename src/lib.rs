//! # Brightstay HMS
//!
//! Hotel management back office: rooms, bookings, customers, staff,
//! payments, ancillary services and analytics behind a REST API.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, the availability engine and
//!   repository traits
//! - **application**: Use cases (booking lifecycle, reporting)
//! - **infrastructure**: External concerns (SeaORM database, in-memory
//!   store, crypto)
//! - **interfaces**: REST API with Swagger documentation
//! - **shared**: Graceful shutdown coordination

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::create_api_router;
