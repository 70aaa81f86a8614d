//! Booking use cases
//!
//! Central enforcement point for the booking lifecycle: interval
//! validation, availability admission, status transitions, deletion
//! gates and service-line totals. HTTP handlers and any other entry
//! point call into this service instead of re-implementing the rules.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::domain::availability::AvailabilityEngine;
use crate::domain::booking::{Booking, BookingStatus, NewBooking};
use crate::domain::service::BookingService as BookingServiceLine;
use crate::domain::{DomainError, DomainResult, RepositoryProvider, RoomStatus, StayInterval};

/// Input for creating a booking.
#[derive(Debug, Clone)]
pub struct CreateBooking {
    pub customer_id: i32,
    pub room_id: i32,
    pub interval: StayInterval,
    pub guests: i32,
    pub special_requests: Option<String>,
    /// `Pending` or `Confirmed`; anything else is rejected.
    pub status: BookingStatus,
}

/// Booking lifecycle orchestration over the repository provider.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    engine: AvailabilityEngine,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let engine = AvailabilityEngine::new(repos.clone());
        Self { repos, engine }
    }

    pub fn engine(&self) -> &AvailabilityEngine {
        &self.engine
    }

    /// Create a booking: validate, price, and atomically admit.
    pub async fn create(&self, req: CreateBooking) -> DomainResult<Booking> {
        if !matches!(req.status, BookingStatus::Pending | BookingStatus::Confirmed) {
            return Err(DomainError::Validation(format!(
                "New bookings must be Pending or Confirmed, not {}",
                req.status
            )));
        }

        let room = self
            .repos
            .rooms()
            .find_by_id(req.room_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: req.room_id.to_string(),
            })?;

        if room.status == RoomStatus::Maintenance {
            return Err(DomainError::Validation(format!(
                "Room {} is under maintenance",
                room.room_number
            )));
        }

        if req.guests < 1 || req.guests > room.max_occupancy {
            return Err(DomainError::Validation(format!(
                "Guest count {} outside room capacity 1-{}",
                req.guests, room.max_occupancy
            )));
        }

        self.repos
            .customers()
            .find_by_id(req.customer_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: req.customer_id.to_string(),
            })?;

        let total_amount = room.price_per_night * Decimal::from(req.interval.nights());

        let admitted = self
            .repos
            .bookings()
            .admit(NewBooking {
                room_id: req.room_id,
                customer_id: req.customer_id,
                interval: req.interval,
                guests: req.guests,
                special_requests: req.special_requests,
                status: req.status,
                total_amount,
            })
            .await;

        match &admitted {
            Ok(b) => {
                info!(
                    booking_id = b.id,
                    room_id = b.room_id,
                    "Booking admitted for {}",
                    b.interval
                );
                metrics::counter!("bookings_admitted_total").increment(1);
            }
            Err(e) => {
                debug!(room_id = req.room_id, "Booking admission rejected: {e}");
                metrics::counter!("bookings_rejected_total").increment(1);
            }
        }
        admitted
    }

    /// Move a booking to different dates and/or a different room.
    ///
    /// Equivalent to: validate the new interval, re-run the
    /// availability check excluding this booking, and only then apply.
    /// The stored booking is unchanged when the check fails.
    pub async fn reschedule(
        &self,
        id: i32,
        new_room_id: Option<i32>,
        interval: StayInterval,
    ) -> DomainResult<Booking> {
        let booking = self.get(id).await?;

        if booking.status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "Booking {} is {} and can no longer be moved",
                id, booking.status
            )));
        }

        let room_id = new_room_id.unwrap_or(booking.room_id);
        let room = self
            .repos
            .rooms()
            .find_by_id(room_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: room_id.to_string(),
            })?;

        if room.status == RoomStatus::Maintenance {
            return Err(DomainError::Validation(format!(
                "Room {} is under maintenance",
                room.room_number
            )));
        }

        // Re-price the room portion; service lines carry over.
        let service_total: Decimal = self
            .repos
            .booking_services()
            .find_for_booking(id)
            .await?
            .iter()
            .map(|l| l.total_price)
            .sum();
        let total_amount =
            room.price_per_night * Decimal::from(interval.nights()) + service_total;

        self.repos
            .bookings()
            .reschedule(id, room_id, interval, total_amount)
            .await
    }

    /// Update fields that do not affect availability.
    pub async fn update_details(
        &self,
        id: i32,
        guests: Option<i32>,
        special_requests: Option<Option<String>>,
    ) -> DomainResult<Booking> {
        let mut booking = self.get(id).await?;

        if let Some(guests) = guests {
            let room = self
                .repos
                .rooms()
                .find_by_id(booking.room_id)
                .await?
                .ok_or(DomainError::NotFound {
                    entity: "Room",
                    field: "id",
                    value: booking.room_id.to_string(),
                })?;
            if guests < 1 || guests > room.max_occupancy {
                return Err(DomainError::Validation(format!(
                    "Guest count {} outside room capacity 1-{}",
                    guests, room.max_occupancy
                )));
            }
            booking.guests = guests;
        }
        if let Some(requests) = special_requests {
            booking.special_requests = requests;
        }

        self.repos.bookings().update(booking.clone()).await?;
        Ok(booking)
    }

    /// Apply a status transition, re-running admission when the
    /// booking enters the occupying set.
    pub async fn transition(&self, id: i32, to: BookingStatus) -> DomainResult<Booking> {
        let booking = self.get(id).await?;

        if !booking.status.can_transition_to(to) {
            return Err(DomainError::Validation(format!(
                "Illegal status transition {} -> {}",
                booking.status, to
            )));
        }

        if booking.status.transition_needs_admission(to) {
            // Other bookings may have been confirmed since this one was
            // accepted as Pending; the store re-checks atomically.
            return self.repos.bookings().confirm(id).await;
        }

        self.repos.bookings().set_status(id, to).await?;
        info!(booking_id = id, "Booking {} -> {}", booking.status, to);
        self.get(id).await
    }

    /// Delete a booking. Refused while payments reference it or the
    /// guest is checked in; service lines are removed with it.
    pub async fn delete(&self, id: i32) -> DomainResult<()> {
        let booking = self.get(id).await?;

        if booking.status == BookingStatus::CheckedIn {
            return Err(DomainError::Validation(
                "Cannot delete a checked-in booking; check out first".into(),
            ));
        }

        let payments = self.repos.payments().find_for_booking(id).await?;
        if !payments.is_empty() {
            let ids: Vec<String> = payments.iter().map(|p| p.id.to_string()).collect();
            return Err(DomainError::Conflict(format!(
                "Booking {} has payments on file (payment ids: {})",
                id,
                ids.join(", ")
            )));
        }

        for line in self.repos.booking_services().find_for_booking(id).await? {
            self.repos.booking_services().delete(line.id).await?;
        }
        self.repos.bookings().delete(id).await
    }

    /// Charge a catalog service to a booking and grow its total.
    pub async fn add_service_line(
        &self,
        booking_id: i32,
        service_id: i32,
        quantity: i32,
        service_date: Option<NaiveDate>,
    ) -> DomainResult<BookingServiceLine> {
        if quantity < 1 {
            return Err(DomainError::Validation("Quantity must be at least 1".into()));
        }

        let booking = self.get(booking_id).await?;
        if booking.status.is_terminal() {
            return Err(DomainError::Validation(format!(
                "Booking {} is {}; services can no longer be added",
                booking_id, booking.status
            )));
        }

        let service = self
            .repos
            .services()
            .find_by_id(service_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Service",
                field: "id",
                value: service_id.to_string(),
            })?;

        let total_price = service.price * Decimal::from(quantity);
        let line = self
            .repos
            .booking_services()
            .save(BookingServiceLine {
                id: 0,
                booking_id,
                service_id,
                quantity,
                total_price,
                service_date,
                created_at: Utc::now(),
            })
            .await?;

        self.repos
            .bookings()
            .adjust_total(booking_id, total_price)
            .await?;
        Ok(line)
    }

    /// Remove a service line and shrink the booking total back.
    pub async fn remove_service_line(&self, line_id: i32) -> DomainResult<()> {
        let line = self
            .repos
            .booking_services()
            .find_by_id(line_id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "BookingService",
                field: "id",
                value: line_id.to_string(),
            })?;

        self.repos.booking_services().delete(line_id).await?;
        self.repos
            .bookings()
            .adjust_total(line.booking_id, -line.total_price)
            .await
    }

    async fn get(&self, id: i32) -> DomainResult<Booking> {
        self.repos
            .bookings()
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::room::{Room, RoomType};
    use crate::domain::service::Service;
    use crate::domain::Customer;
    use crate::infrastructure::memory::InMemoryRepositories;

    fn interval(check_in: &str, check_out: &str) -> StayInterval {
        StayInterval::parse(check_in, check_out).unwrap()
    }

    async fn fixture() -> (BookingService, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        repos
            .rooms()
            .save(Room {
                id: 0,
                room_number: "101".into(),
                room_type: RoomType::Double,
                price_per_night: Decimal::new(100, 0),
                max_occupancy: 2,
                floor: Some(1),
                description: None,
                amenities: None,
                status: RoomStatus::Available,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        repos
            .rooms()
            .save(Room {
                id: 0,
                room_number: "102".into(),
                room_type: RoomType::Double,
                price_per_night: Decimal::new(120, 0),
                max_occupancy: 3,
                floor: Some(1),
                description: None,
                amenities: None,
                status: RoomStatus::Available,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        repos
            .customers()
            .save(Customer {
                id: 0,
                first_name: "Asha".into(),
                last_name: "Rao".into(),
                email: "asha@example.com".into(),
                phone: None,
                address: None,
                id_proof_type: None,
                id_proof_number: None,
                date_of_birth: None,
                created_at: Utc::now(),
            })
            .await
            .unwrap();
        let provider: Arc<dyn RepositoryProvider> = repos.clone();
        (BookingService::new(provider), repos)
    }

    fn create_req(room_id: i32, check_in: &str, check_out: &str) -> CreateBooking {
        CreateBooking {
            customer_id: 1,
            room_id,
            interval: interval(check_in, check_out),
            guests: 2,
            special_requests: None,
            status: BookingStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn create_prices_room_nights() {
        let (svc, _) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();
        assert_eq!(booking.status, BookingStatus::Confirmed);
        // 3 nights at 100
        assert_eq!(booking.total_amount, Decimal::new(300, 0));
    }

    #[tokio::test]
    async fn create_rejects_conflicting_interval() {
        let (svc, _) = fixture().await;
        svc.create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        let err = svc
            .create(create_req(1, "2025-12-27", "2025-12-29"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { room_id: 1, .. }));

        // Same-day turnover is admitted
        svc.create(create_req(1, "2025-12-28", "2025-12-30"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn create_rejects_over_capacity_and_maintenance() {
        let (svc, repos) = fixture().await;

        let mut req = create_req(1, "2025-12-25", "2025-12-28");
        req.guests = 5;
        assert!(matches!(
            svc.create(req).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        let mut room = repos.rooms().find_by_id(1).await.unwrap().unwrap();
        room.status = RoomStatus::Maintenance;
        repos.rooms().update(room).await.unwrap();
        assert!(matches!(
            svc.create(create_req(1, "2025-12-25", "2025-12-28"))
                .await
                .unwrap_err(),
            DomainError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn conflicting_edit_leaves_booking_unchanged() {
        let (svc, repos) = fixture().await;
        let first = svc
            .create(create_req(1, "2025-12-20", "2025-12-23"))
            .await
            .unwrap();
        let second = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        // Move the second on top of the first
        let err = svc
            .reschedule(second.id, None, interval("2025-12-21", "2025-12-24"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));

        let stored = repos
            .bookings()
            .find_by_id(second.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.interval, second.interval);
        assert_eq!(stored.total_amount, second.total_amount);
        drop(first);
    }

    #[tokio::test]
    async fn reschedule_to_other_room_reprices() {
        let (svc, _) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        let moved = svc
            .reschedule(booking.id, Some(2), interval("2025-12-25", "2025-12-27"))
            .await
            .unwrap();
        assert_eq!(moved.room_id, 2);
        // 2 nights at 120
        assert_eq!(moved.total_amount, Decimal::new(240, 0));
    }

    #[tokio::test]
    async fn pending_confirmation_rechecks_availability() {
        let (svc, _) = fixture().await;
        let mut req = create_req(1, "2025-12-25", "2025-12-28");
        req.status = BookingStatus::Pending;
        let pending = svc.create(req).await.unwrap();

        // A second booking is confirmed while the first is pending
        svc.create(create_req(1, "2025-12-26", "2025-12-27"))
            .await
            .unwrap();

        let err = svc
            .transition(pending.id, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::RoomUnavailable { .. }));
    }

    #[tokio::test]
    async fn lifecycle_transitions() {
        let (svc, _) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        let checked_in = svc
            .transition(booking.id, BookingStatus::CheckedIn)
            .await
            .unwrap();
        assert_eq!(checked_in.status, BookingStatus::CheckedIn);

        let checked_out = svc
            .transition(booking.id, BookingStatus::CheckedOut)
            .await
            .unwrap();
        assert_eq!(checked_out.status, BookingStatus::CheckedOut);

        // Terminal: nothing further
        let err = svc
            .transition(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn illegal_transition_rejected() {
        let (svc, _) = fixture().await;
        let mut req = create_req(1, "2025-12-25", "2025-12-28");
        req.status = BookingStatus::Pending;
        let pending = svc.create(req).await.unwrap();

        let err = svc
            .transition(pending.id, BookingStatus::CheckedIn)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn cancel_frees_room_for_rebooking() {
        let (svc, _) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        svc.transition(booking.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        // Identical interval admits now
        svc.create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn delete_gated_on_payments_and_checkin() {
        let (svc, repos) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        repos
            .payments()
            .save(crate::domain::Payment {
                id: 0,
                booking_id: booking.id,
                amount: Decimal::new(300, 0),
                method: crate::domain::PaymentMethod::Cash,
                status: crate::domain::PaymentStatus::Completed,
                transaction_ref: None,
                paid_at: Utc::now(),
            })
            .await
            .unwrap();

        assert!(matches!(
            svc.delete(booking.id).await.unwrap_err(),
            DomainError::Conflict(_)
        ));

        repos.payments().delete(1).await.unwrap();
        svc.transition(booking.id, BookingStatus::CheckedIn)
            .await
            .unwrap();
        assert!(matches!(
            svc.delete(booking.id).await.unwrap_err(),
            DomainError::Validation(_)
        ));

        svc.transition(booking.id, BookingStatus::CheckedOut)
            .await
            .unwrap();
        svc.delete(booking.id).await.unwrap();
        assert!(repos
            .bookings()
            .find_by_id(booking.id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn service_lines_adjust_booking_total() {
        let (svc, repos) = fixture().await;
        let booking = svc
            .create(create_req(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        repos
            .services()
            .save(Service {
                id: 0,
                name: "Spa".into(),
                description: None,
                price: Decimal::new(50, 0),
                category: "Wellness".into(),
                availability: crate::domain::ServiceAvailability::Available,
                created_at: Utc::now(),
            })
            .await
            .unwrap();

        let line = svc
            .add_service_line(booking.id, 1, 2, None)
            .await
            .unwrap();
        assert_eq!(line.total_price, Decimal::new(100, 0));

        let stored = repos
            .bookings()
            .find_by_id(booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_amount, Decimal::new(400, 0));

        svc.remove_service_line(line.id).await.unwrap();
        let stored = repos
            .bookings()
            .find_by_id(booking.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.total_amount, Decimal::new(300, 0));
    }

    #[tokio::test]
    async fn concurrent_admissions_admit_exactly_one() {
        let (svc, repos) = fixture().await;
        let svc = Arc::new(svc);

        let a = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create(create_req(1, "2025-12-25", "2025-12-28")).await })
        };
        let b = {
            let svc = svc.clone();
            tokio::spawn(async move { svc.create(create_req(1, "2025-12-26", "2025-12-29")).await })
        };

        let (a, b) = (a.await.unwrap(), b.await.unwrap());
        assert!(
            a.is_ok() ^ b.is_ok(),
            "exactly one of the racing admissions must win"
        );
        let loser = if a.is_ok() { b } else { a };
        assert!(matches!(
            loser.unwrap_err(),
            DomainError::RoomUnavailable { .. } | DomainError::ConcurrentModification { .. }
        ));

        // Post-hoc invariant: occupying bookings of the room are
        // pairwise non-overlapping.
        let occupying = repos
            .bookings()
            .find_occupying_for_room(1, crate::domain::OCCUPYING_STATUSES, None)
            .await
            .unwrap();
        assert_eq!(occupying.len(), 1);
        for (i, x) in occupying.iter().enumerate() {
            for y in occupying.iter().skip(i + 1) {
                assert!(!x.interval.overlaps(&y.interval));
            }
        }
    }
}
