//! SeaORM repository implementations

pub mod booking_repository;
pub mod customer_repository;
pub mod payment_repository;
pub mod repository_provider;
pub mod room_repository;
pub mod service_repository;
pub mod staff_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
