//! Service catalog and booking-service-line repository interfaces

use async_trait::async_trait;

use super::model::{BookingService, Service};
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceRepository: Send + Sync {
    /// Insert a new catalog entry; the store assigns the id.
    async fn save(&self, service: Service) -> DomainResult<Service>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>>;

    /// Catalog ordered by name.
    async fn find_all(&self) -> DomainResult<Vec<Service>>;

    async fn update(&self, service: Service) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}

#[async_trait]
pub trait BookingServiceRepository: Send + Sync {
    /// Insert a new line; the store assigns the id.
    async fn save(&self, line: BookingService) -> DomainResult<BookingService>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BookingService>>;

    /// All lines, newest first.
    async fn find_all(&self) -> DomainResult<Vec<BookingService>>;

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<BookingService>>;

    async fn find_for_service(&self, service_id: i32) -> DomainResult<Vec<BookingService>>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
