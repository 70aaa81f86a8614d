//! Availability engine
//!
//! The single decision point for "can this room be booked over this
//! interval". Every layer that cares about occupancy (booking
//! admission, the availability listing, occupancy reporting) goes
//! through [`StayInterval::overlaps`] via this module; there is no
//! second predicate to drift from.

use std::sync::Arc;

use chrono::NaiveDate;

use super::StayInterval;
use crate::domain::booking::{Booking, BookingStatus, OCCUPYING_STATUSES};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::room::{Room, RoomStatus, RoomType};
use crate::domain::DomainResult;

/// Whether any booking in `existing` overlaps `candidate`.
///
/// Store implementations reuse this inside their admission transaction
/// so the check and the engine agree by construction.
pub fn conflicts_with(candidate: &StayInterval, existing: &[Booking]) -> bool {
    existing.iter().any(|b| b.interval.overlaps(candidate))
}

/// Read-only availability queries over the booking history.
///
/// Pure decision functions over a snapshot of the store; never mutates
/// state. The race between "observe available" and "commit booking" is
/// closed by the store's atomic admission, not here.
pub struct AvailabilityEngine {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityEngine {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Whether `room_id` is free over `interval`, judged against the
    /// default occupying set {Confirmed, Checked-in}.
    pub async fn is_room_available(
        &self,
        room_id: i32,
        interval: &StayInterval,
        exclude_booking_id: Option<i32>,
    ) -> DomainResult<bool> {
        self.is_room_available_with(room_id, interval, OCCUPYING_STATUSES, exclude_booking_id)
            .await
    }

    /// Same check against a caller-chosen occupying set.
    pub async fn is_room_available_with(
        &self,
        room_id: i32,
        interval: &StayInterval,
        occupying_statuses: &[BookingStatus],
        exclude_booking_id: Option<i32>,
    ) -> DomainResult<bool> {
        let existing = self
            .repos
            .bookings()
            .find_occupying_for_room(room_id, occupying_statuses, exclude_booking_id)
            .await?;
        Ok(!conflicts_with(interval, &existing))
    }

    /// Rooms free over `interval`, optionally restricted to one room
    /// type. Rooms under maintenance are withheld regardless of their
    /// booking state. Ordered ascending by price, ties by room id.
    pub async fn list_available_rooms(
        &self,
        interval: &StayInterval,
        room_type: Option<RoomType>,
    ) -> DomainResult<Vec<Room>> {
        let rooms = self
            .repos
            .rooms()
            .find_all_excluding(&[RoomStatus::Maintenance])
            .await?;

        let mut free = Vec::new();
        for room in rooms {
            if let Some(wanted) = room_type {
                if room.room_type != wanted {
                    continue;
                }
            }
            if self.is_room_available(room.id, interval, None).await? {
                free.push(room);
            }
        }

        free.sort_by(|a, b| {
            a.price_per_night
                .cmp(&b.price_per_night)
                .then(a.id.cmp(&b.id))
        });
        Ok(free)
    }

    /// Recompute the display status of a room from its booking state.
    ///
    /// Staff-set operational holds (Maintenance, Cleaning) stick; other
    /// stored values are ignored in favour of what the bookings say
    /// about tonight.
    pub async fn derived_room_status(
        &self,
        room: &Room,
        today: NaiveDate,
    ) -> DomainResult<RoomStatus> {
        if room.status.is_operational_hold() {
            return Ok(room.status);
        }

        let occupying = self
            .repos
            .bookings()
            .find_occupying_for_room(room.id, OCCUPYING_STATUSES, None)
            .await?;

        let tonight = occupying
            .iter()
            .find(|b| b.interval.contains_night(today));

        Ok(match tonight.map(|b| b.status) {
            Some(BookingStatus::CheckedIn) => RoomStatus::Occupied,
            Some(_) => RoomStatus::Reserved,
            None => RoomStatus::Available,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    use crate::domain::booking::NewBooking;
    use crate::infrastructure::memory::InMemoryRepositories;

    fn interval(check_in: &str, check_out: &str) -> StayInterval {
        StayInterval::parse(check_in, check_out).unwrap()
    }

    fn room(id_hint: &str, room_type: RoomType, price: i64, status: RoomStatus) -> Room {
        Room {
            id: 0,
            room_number: id_hint.to_string(),
            room_type,
            price_per_night: Decimal::new(price, 0),
            max_occupancy: 2,
            floor: Some(1),
            description: None,
            amenities: None,
            status,
            created_at: Utc::now(),
        }
    }

    fn new_booking(room_id: i32, check_in: &str, check_out: &str) -> NewBooking {
        NewBooking {
            room_id,
            customer_id: 1,
            interval: interval(check_in, check_out),
            guests: 2,
            special_requests: None,
            status: BookingStatus::Confirmed,
            total_amount: Decimal::ZERO,
        }
    }

    async fn engine_with_rooms(rooms: Vec<Room>) -> (AvailabilityEngine, Arc<InMemoryRepositories>) {
        let repos = Arc::new(InMemoryRepositories::new());
        for r in rooms {
            repos.rooms().save(r).await.unwrap();
        }
        let provider: Arc<dyn RepositoryProvider> = repos.clone();
        (AvailabilityEngine::new(provider), repos)
    }

    #[tokio::test]
    async fn empty_booking_history_is_available() {
        let (engine, _repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        assert!(engine
            .is_room_available(1, &interval("2025-12-25", "2025-12-28"), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn overlap_blocks_and_turnover_does_not() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        repos
            .bookings()
            .admit(new_booking(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        // Back-to-back checkout/check-in is fine
        assert!(engine
            .is_room_available(1, &interval("2025-12-28", "2025-12-30"), None)
            .await
            .unwrap());
        // Overlapping the last night conflicts
        assert!(!engine
            .is_room_available(1, &interval("2025-12-27", "2025-12-29"), None)
            .await
            .unwrap());
        // Overlapping the first night conflicts
        assert!(!engine
            .is_room_available(1, &interval("2025-12-20", "2025-12-26"), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn cancelling_frees_the_interval() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        let stay = interval("2025-12-25", "2025-12-28");
        let booked = repos
            .bookings()
            .admit(new_booking(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        assert!(!engine.is_room_available(1, &stay, None).await.unwrap());

        repos
            .bookings()
            .set_status(booked.id, BookingStatus::Cancelled)
            .await
            .unwrap();

        assert!(engine.is_room_available(1, &stay, None).await.unwrap());
    }

    #[tokio::test]
    async fn pending_bookings_do_not_block() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        let mut pending = new_booking(1, "2025-12-25", "2025-12-28");
        pending.status = BookingStatus::Pending;
        repos.bookings().admit(pending).await.unwrap();

        assert!(engine
            .is_room_available(1, &interval("2025-12-25", "2025-12-28"), None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn excluding_own_id_ignores_self_overlap() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        let booked = repos
            .bookings()
            .admit(new_booking(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        // Shifting the same booking by one day conflicts only with itself
        assert!(engine
            .is_room_available(1, &interval("2025-12-26", "2025-12-29"), Some(booked.id))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn maintenance_rooms_never_listed() {
        let (engine, _repos) = engine_with_rooms(vec![
            room("101", RoomType::Double, 120, RoomStatus::Available),
            room("102", RoomType::Double, 90, RoomStatus::Maintenance),
        ])
        .await;

        let free = engine
            .list_available_rooms(&interval("2025-12-25", "2025-12-28"), None)
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "101");
    }

    #[tokio::test]
    async fn listing_sorts_by_price_then_id() {
        let (engine, _repos) = engine_with_rooms(vec![
            room("301", RoomType::Suite, 300, RoomStatus::Available),
            room("102", RoomType::Double, 90, RoomStatus::Available),
            room("103", RoomType::Double, 90, RoomStatus::Cleaning),
        ])
        .await;

        let free = engine
            .list_available_rooms(&interval("2025-12-25", "2025-12-28"), None)
            .await
            .unwrap();
        let numbers: Vec<&str> = free.iter().map(|r| r.room_number.as_str()).collect();
        // Same price: room id breaks the tie (102 saved before 103)
        assert_eq!(numbers, vec!["102", "103", "301"]);
    }

    #[tokio::test]
    async fn listing_filters_by_room_type() {
        let (engine, _repos) = engine_with_rooms(vec![
            room("101", RoomType::Double, 120, RoomStatus::Available),
            room("301", RoomType::Suite, 300, RoomStatus::Available),
        ])
        .await;

        let free = engine
            .list_available_rooms(&interval("2025-12-25", "2025-12-28"), Some(RoomType::Suite))
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "301");
    }

    #[tokio::test]
    async fn listing_drops_booked_rooms() {
        let (engine, repos) = engine_with_rooms(vec![
            room("101", RoomType::Double, 120, RoomStatus::Available),
            room("102", RoomType::Double, 90, RoomStatus::Available),
        ])
        .await;
        repos
            .bookings()
            .admit(new_booking(2, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();

        let free = engine
            .list_available_rooms(&interval("2025-12-26", "2025-12-27"), None)
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "101");
    }

    #[tokio::test]
    async fn derived_status_reflects_tonight() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Available)])
                .await;
        let today: NaiveDate = "2025-12-26".parse().unwrap();

        let stored = repos.rooms().find_by_id(1).await.unwrap().unwrap();
        assert_eq!(
            engine.derived_room_status(&stored, today).await.unwrap(),
            RoomStatus::Available
        );

        let booked = repos
            .bookings()
            .admit(new_booking(1, "2025-12-25", "2025-12-28"))
            .await
            .unwrap();
        assert_eq!(
            engine.derived_room_status(&stored, today).await.unwrap(),
            RoomStatus::Reserved
        );

        repos
            .bookings()
            .set_status(booked.id, BookingStatus::CheckedIn)
            .await
            .unwrap();
        assert_eq!(
            engine.derived_room_status(&stored, today).await.unwrap(),
            RoomStatus::Occupied
        );

        // Checkout day: the room is free again that night
        let checkout_day: NaiveDate = "2025-12-28".parse().unwrap();
        assert_eq!(
            engine
                .derived_room_status(&stored, checkout_day)
                .await
                .unwrap(),
            RoomStatus::Available
        );
    }

    #[tokio::test]
    async fn derived_status_keeps_operational_holds() {
        let (engine, repos) =
            engine_with_rooms(vec![room("101", RoomType::Double, 120, RoomStatus::Maintenance)])
                .await;
        let today: NaiveDate = "2025-12-26".parse().unwrap();
        let stored = repos.rooms().find_by_id(1).await.unwrap().unwrap();
        assert_eq!(
            engine.derived_room_status(&stored, today).await.unwrap(),
            RoomStatus::Maintenance
        );
    }
}
