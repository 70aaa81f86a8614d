//! Repository traits for the domain layer
//!
//! `RepositoryProvider` gives unified access to all per-aggregate
//! repositories; consumers request only the repository they need:
//!
//! ```ignore
//! async fn handle(repos: &dyn RepositoryProvider) {
//!     let room = repos.rooms().find_by_id(12).await?;
//!     let stays = repos.bookings().find_for_customer(7).await?;
//! }
//! ```

use super::booking::BookingRepository;
use super::customer::CustomerRepository;
use super::payment::PaymentRepository;
use super::room::RoomRepository;
use super::service::{BookingServiceRepository, ServiceRepository};
use super::staff::StaffRepository;

/// Provides access to all domain repositories.
pub trait RepositoryProvider: Send + Sync {
    fn rooms(&self) -> &dyn RoomRepository;
    fn bookings(&self) -> &dyn BookingRepository;
    fn customers(&self) -> &dyn CustomerRepository;
    fn staff(&self) -> &dyn StaffRepository;
    fn payments(&self) -> &dyn PaymentRepository;
    fn services(&self) -> &dyn ServiceRepository;
    fn booking_services(&self) -> &dyn BookingServiceRepository;
}
