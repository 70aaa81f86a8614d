//! In-memory repository provider for development and testing
//!
//! Admission operations take a provider-wide lock so the availability
//! check and the write behave as one atomic unit, mirroring the
//! transactional guarantee of the SeaORM implementation.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::domain::availability::conflicts_with;
use crate::domain::booking::{Booking, BookingRepository, BookingStatus, NewBooking};
use crate::domain::customer::{Customer, CustomerRepository};
use crate::domain::payment::{Payment, PaymentRepository};
use crate::domain::room::{Room, RoomRepository, RoomStatus};
use crate::domain::service::{
    BookingService, BookingServiceRepository, Service, ServiceRepository,
};
use crate::domain::staff::{Staff, StaffRepository};
use crate::domain::{DomainError, DomainResult, RepositoryProvider, StayInterval};

/// In-memory implementation of every repository trait.
pub struct InMemoryRepositories {
    rooms: DashMap<i32, Room>,
    bookings: DashMap<i32, Booking>,
    customers: DashMap<i32, Customer>,
    staff: DashMap<i32, Staff>,
    payments: DashMap<i32, Payment>,
    services: DashMap<i32, Service>,
    booking_services: DashMap<i32, BookingService>,
    room_counter: AtomicI32,
    booking_counter: AtomicI32,
    customer_counter: AtomicI32,
    staff_counter: AtomicI32,
    payment_counter: AtomicI32,
    service_counter: AtomicI32,
    booking_service_counter: AtomicI32,
    /// Serializes admission check + write
    admission: Mutex<()>,
}

impl InMemoryRepositories {
    pub fn new() -> Self {
        Self {
            rooms: DashMap::new(),
            bookings: DashMap::new(),
            customers: DashMap::new(),
            staff: DashMap::new(),
            payments: DashMap::new(),
            services: DashMap::new(),
            booking_services: DashMap::new(),
            room_counter: AtomicI32::new(1),
            booking_counter: AtomicI32::new(1),
            customer_counter: AtomicI32::new(1),
            staff_counter: AtomicI32::new(1),
            payment_counter: AtomicI32::new(1),
            service_counter: AtomicI32::new(1),
            booking_service_counter: AtomicI32::new(1),
            admission: Mutex::new(()),
        }
    }

    fn occupying_snapshot(
        &self,
        room_id: i32,
        statuses: &[BookingStatus],
        exclude_id: Option<i32>,
    ) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|e| {
                let b = e.value();
                b.room_id == room_id
                    && statuses.contains(&b.status)
                    && Some(b.id) != exclude_id
            })
            .map(|e| e.value().clone())
            .collect()
    }
}

impl Default for InMemoryRepositories {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(entity: &'static str, id: i32) -> DomainError {
    DomainError::NotFound {
        entity,
        field: "id",
        value: id.to_string(),
    }
}

// ── RoomRepository ─────────────────────────────────────────────

#[async_trait]
impl RoomRepository for InMemoryRepositories {
    async fn save(&self, mut room: Room) -> DomainResult<Room> {
        room.id = self.room_counter.fetch_add(1, Ordering::SeqCst);
        self.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        Ok(self.rooms.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>> {
        Ok(self
            .rooms
            .iter()
            .find(|e| e.value().room_number == room_number)
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self.rooms.iter().map(|e| e.value().clone()).collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    async fn find_all_excluding(&self, exclude_statuses: &[RoomStatus]) -> DomainResult<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .rooms
            .iter()
            .filter(|e| !exclude_statuses.contains(&e.value().status))
            .map(|e| e.value().clone())
            .collect();
        rooms.sort_by(|a, b| a.room_number.cmp(&b.room_number));
        Ok(rooms)
    }

    async fn update(&self, room: Room) -> DomainResult<()> {
        if !self.rooms.contains_key(&room.id) {
            return Err(not_found("Room", room.id));
        }
        self.rooms.insert(room.id, room);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.rooms.remove(&id).ok_or_else(|| not_found("Room", id))?;
        Ok(())
    }
}

// ── BookingRepository ──────────────────────────────────────────

#[async_trait]
impl BookingRepository for InMemoryRepositories {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self.bookings.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn find_for_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        let mut all: Vec<Booking> = self
            .bookings
            .iter()
            .filter(|e| e.value().customer_id == customer_id)
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn find_occupying_for_room(
        &self,
        room_id: i32,
        statuses: &[BookingStatus],
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<Booking>> {
        Ok(self.occupying_snapshot(room_id, statuses, exclude_id))
    }

    async fn admit(&self, booking: NewBooking) -> DomainResult<Booking> {
        let _guard = self.admission.lock().await;

        let existing =
            self.occupying_snapshot(booking.room_id, crate::domain::OCCUPYING_STATUSES, None);
        if conflicts_with(&booking.interval, &existing) {
            return Err(DomainError::RoomUnavailable {
                room_id: booking.room_id,
                check_in: booking.interval.check_in(),
                check_out: booking.interval.check_out(),
            });
        }

        let id = self.booking_counter.fetch_add(1, Ordering::SeqCst);
        let stored = Booking {
            id,
            room_id: booking.room_id,
            customer_id: booking.customer_id,
            interval: booking.interval,
            guests: booking.guests,
            special_requests: booking.special_requests,
            status: booking.status,
            total_amount: booking.total_amount,
            created_at: chrono::Utc::now(),
        };
        self.bookings.insert(id, stored.clone());
        Ok(stored)
    }

    async fn confirm(&self, id: i32) -> DomainResult<Booking> {
        let _guard = self.admission.lock().await;

        let booking = self
            .bookings
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| not_found("Booking", id))?;

        if booking.status != BookingStatus::Pending {
            return Err(DomainError::Validation(format!(
                "Booking {} is not pending (status: {})",
                id, booking.status
            )));
        }

        let existing =
            self.occupying_snapshot(booking.room_id, crate::domain::OCCUPYING_STATUSES, Some(id));
        if conflicts_with(&booking.interval, &existing) {
            return Err(DomainError::RoomUnavailable {
                room_id: booking.room_id,
                check_in: booking.interval.check_in(),
                check_out: booking.interval.check_out(),
            });
        }

        let mut updated = booking;
        updated.status = BookingStatus::Confirmed;
        self.bookings.insert(id, updated.clone());
        Ok(updated)
    }

    async fn reschedule(
        &self,
        id: i32,
        room_id: i32,
        interval: StayInterval,
        total_amount: Decimal,
    ) -> DomainResult<Booking> {
        let _guard = self.admission.lock().await;

        let booking = self
            .bookings
            .get(&id)
            .map(|e| e.value().clone())
            .ok_or_else(|| not_found("Booking", id))?;

        let existing =
            self.occupying_snapshot(room_id, crate::domain::OCCUPYING_STATUSES, Some(id));
        if conflicts_with(&interval, &existing) {
            return Err(DomainError::RoomUnavailable {
                room_id,
                check_in: interval.check_in(),
                check_out: interval.check_out(),
            });
        }

        let mut updated = booking;
        updated.room_id = room_id;
        updated.interval = interval;
        updated.total_amount = total_amount;
        self.bookings.insert(id, updated.clone());
        Ok(updated)
    }

    async fn update(&self, booking: Booking) -> DomainResult<()> {
        if !self.bookings.contains_key(&booking.id) {
            return Err(not_found("Booking", booking.id));
        }
        self.bookings.insert(booking.id, booking);
        Ok(())
    }

    async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()> {
        let mut entry = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| not_found("Booking", id))?;
        entry.value_mut().status = status;
        Ok(())
    }

    async fn adjust_total(&self, id: i32, delta: Decimal) -> DomainResult<()> {
        let mut entry = self
            .bookings
            .get_mut(&id)
            .ok_or_else(|| not_found("Booking", id))?;
        entry.value_mut().total_amount += delta;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.bookings
            .remove(&id)
            .ok_or_else(|| not_found("Booking", id))?;
        Ok(())
    }
}

// ── CustomerRepository ─────────────────────────────────────────

#[async_trait]
impl CustomerRepository for InMemoryRepositories {
    async fn save(&self, mut customer: Customer) -> DomainResult<Customer> {
        customer.id = self.customer_counter.fetch_add(1, Ordering::SeqCst);
        self.customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        Ok(self
            .customers
            .iter()
            .find(|e| e.value().email == email)
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let mut all: Vec<Customer> = self.customers.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn update(&self, customer: Customer) -> DomainResult<()> {
        if !self.customers.contains_key(&customer.id) {
            return Err(not_found("Customer", customer.id));
        }
        self.customers.insert(customer.id, customer);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.customers
            .remove(&id)
            .ok_or_else(|| not_found("Customer", id))?;
        Ok(())
    }
}

// ── StaffRepository ────────────────────────────────────────────

#[async_trait]
impl StaffRepository for InMemoryRepositories {
    async fn save(&self, mut staff: Staff) -> DomainResult<Staff> {
        staff.id = self.staff_counter.fetch_add(1, Ordering::SeqCst);
        self.staff.insert(staff.id, staff.clone());
        Ok(staff)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Staff>> {
        Ok(self.staff.get(&id).map(|e| e.value().clone()))
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<Staff>> {
        Ok(self
            .staff
            .iter()
            .find(|e| e.value().username == username)
            .map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Staff>> {
        let mut all: Vec<Staff> = self.staff.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn update(&self, staff: Staff) -> DomainResult<()> {
        if !self.staff.contains_key(&staff.id) {
            return Err(not_found("Staff", staff.id));
        }
        self.staff.insert(staff.id, staff);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.staff.remove(&id).ok_or_else(|| not_found("Staff", id))?;
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.staff.len() as u64)
    }
}

// ── PaymentRepository ──────────────────────────────────────────

#[async_trait]
impl PaymentRepository for InMemoryRepositories {
    async fn save(&self, mut payment: Payment) -> DomainResult<Payment> {
        payment.id = self.payment_counter.fetch_add(1, Ordering::SeqCst);
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        Ok(self.payments.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Payment>> {
        let mut all: Vec<Payment> = self.payments.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<Payment>> {
        let mut all: Vec<Payment> = self
            .payments
            .iter()
            .filter(|e| e.value().booking_id == booking_id)
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn update(&self, payment: Payment) -> DomainResult<()> {
        if !self.payments.contains_key(&payment.id) {
            return Err(not_found("Payment", payment.id));
        }
        self.payments.insert(payment.id, payment);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.payments
            .remove(&id)
            .ok_or_else(|| not_found("Payment", id))?;
        Ok(())
    }
}

// ── ServiceRepository ──────────────────────────────────────────

#[async_trait]
impl ServiceRepository for InMemoryRepositories {
    async fn save(&self, mut service: Service) -> DomainResult<Service> {
        service.id = self.service_counter.fetch_add(1, Ordering::SeqCst);
        self.services.insert(service.id, service.clone());
        Ok(service)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>> {
        Ok(self.services.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<Service>> {
        let mut all: Vec<Service> = self.services.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }

    async fn update(&self, service: Service) -> DomainResult<()> {
        if !self.services.contains_key(&service.id) {
            return Err(not_found("Service", service.id));
        }
        self.services.insert(service.id, service);
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.services
            .remove(&id)
            .ok_or_else(|| not_found("Service", id))?;
        Ok(())
    }
}

// ── BookingServiceRepository ───────────────────────────────────

#[async_trait]
impl BookingServiceRepository for InMemoryRepositories {
    async fn save(&self, mut line: BookingService) -> DomainResult<BookingService> {
        line.id = self.booking_service_counter.fetch_add(1, Ordering::SeqCst);
        self.booking_services.insert(line.id, line.clone());
        Ok(line)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BookingService>> {
        Ok(self.booking_services.get(&id).map(|e| e.value().clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<BookingService>> {
        let mut all: Vec<BookingService> = self
            .booking_services
            .iter()
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<BookingService>> {
        let mut all: Vec<BookingService> = self
            .booking_services
            .iter()
            .filter(|e| e.value().booking_id == booking_id)
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn find_for_service(&self, service_id: i32) -> DomainResult<Vec<BookingService>> {
        let mut all: Vec<BookingService> = self
            .booking_services
            .iter()
            .filter(|e| e.value().service_id == service_id)
            .map(|e| e.value().clone())
            .collect();
        all.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(all)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.booking_services
            .remove(&id)
            .ok_or_else(|| not_found("BookingService", id))?;
        Ok(())
    }
}

// ── RepositoryProvider ─────────────────────────────────────────

impl RepositoryProvider for InMemoryRepositories {
    fn rooms(&self) -> &dyn RoomRepository {
        self
    }

    fn bookings(&self) -> &dyn BookingRepository {
        self
    }

    fn customers(&self) -> &dyn CustomerRepository {
        self
    }

    fn staff(&self) -> &dyn StaffRepository {
        self
    }

    fn payments(&self) -> &dyn PaymentRepository {
        self
    }

    fn services(&self) -> &dyn ServiceRepository {
        self
    }

    fn booking_services(&self) -> &dyn BookingServiceRepository {
        self
    }
}
