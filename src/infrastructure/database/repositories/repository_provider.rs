//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::booking::BookingRepository;
use crate::domain::customer::CustomerRepository;
use crate::domain::payment::PaymentRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::RoomRepository;
use crate::domain::service::{BookingServiceRepository, ServiceRepository};
use crate::domain::staff::StaffRepository;

use super::booking_repository::SeaOrmBookingRepository;
use super::customer_repository::SeaOrmCustomerRepository;
use super::payment_repository::SeaOrmPaymentRepository;
use super::room_repository::SeaOrmRoomRepository;
use super::service_repository::{SeaOrmBookingServiceRepository, SeaOrmServiceRepository};
use super::staff_repository::SeaOrmStaffRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository
/// accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let room = repos.rooms().find_by_id(12).await?;
/// let stays = repos.bookings().find_for_customer(7).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    rooms: SeaOrmRoomRepository,
    bookings: SeaOrmBookingRepository,
    customers: SeaOrmCustomerRepository,
    staff: SeaOrmStaffRepository,
    payments: SeaOrmPaymentRepository,
    services: SeaOrmServiceRepository,
    booking_services: SeaOrmBookingServiceRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            rooms: SeaOrmRoomRepository::new(db.clone()),
            bookings: SeaOrmBookingRepository::new(db.clone()),
            customers: SeaOrmCustomerRepository::new(db.clone()),
            staff: SeaOrmStaffRepository::new(db.clone()),
            payments: SeaOrmPaymentRepository::new(db.clone()),
            services: SeaOrmServiceRepository::new(db.clone()),
            booking_services: SeaOrmBookingServiceRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn rooms(&self) -> &dyn RoomRepository {
        &self.rooms
    }

    fn bookings(&self) -> &dyn BookingRepository {
        &self.bookings
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }

    fn staff(&self) -> &dyn StaffRepository {
        &self.staff
    }

    fn payments(&self) -> &dyn PaymentRepository {
        &self.payments
    }

    fn services(&self) -> &dyn ServiceRepository {
        &self.services
    }

    fn booking_services(&self) -> &dyn BookingServiceRepository {
        &self.booking_services
    }
}
