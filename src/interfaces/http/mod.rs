//! HTTP REST API interfaces
//!
//! - `common`: response envelope and validated JSON extractor
//! - `middleware`: JWT authentication and capability checks
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
