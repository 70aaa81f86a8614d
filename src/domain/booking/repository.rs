//! Booking repository interface
//!
//! The admission operations (`admit`, `confirm`, `reschedule`) are the
//! store-side half of the availability engine: each one re-runs the
//! overlap check against the occupying bookings of the target room and
//! applies the write in the same atomic unit, so two racing admissions
//! cannot both observe a free room and both commit.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::model::{Booking, BookingStatus, NewBooking};
use crate::domain::availability::StayInterval;
use crate::domain::DomainResult;

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>>;

    /// All bookings, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Booking>>;

    async fn find_for_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>>;

    /// Bookings of `room_id` whose status is in `statuses`, optionally
    /// excluding one booking id (used when re-validating an edit).
    async fn find_occupying_for_room(
        &self,
        room_id: i32,
        statuses: &[BookingStatus],
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<Booking>>;

    /// Atomically check availability and insert the booking.
    ///
    /// Fails with `RoomUnavailable` when an occupying booking overlaps
    /// the candidate interval, or `ConcurrentModification` when a
    /// concurrent admission wins the write race.
    async fn admit(&self, booking: NewBooking) -> DomainResult<Booking>;

    /// Atomically re-check availability (excluding the booking itself)
    /// and move a Pending booking into `Confirmed`.
    async fn confirm(&self, id: i32) -> DomainResult<Booking>;

    /// Atomically re-check availability for the new room/interval
    /// (excluding the booking itself) and apply the change. On failure
    /// the stored booking is untouched.
    async fn reschedule(
        &self,
        id: i32,
        room_id: i32,
        interval: StayInterval,
        total_amount: Decimal,
    ) -> DomainResult<Booking>;

    /// Update non-interval fields (guests, requests, totals).
    async fn update(&self, booking: Booking) -> DomainResult<()>;

    /// Set the status without an availability check. Callers must only
    /// use this for transitions that do not enter the occupying set.
    async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()>;

    /// Add `delta` (possibly negative) to the booking's total amount.
    async fn adjust_total(&self, id: i32, delta: Decimal) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
