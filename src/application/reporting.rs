//! Reporting and analytics aggregates
//!
//! Occupancy shares the interval model with booking admission
//! ([`StayInterval::overlap_nights`]); "how occupied was this room"
//! and "can I book this room" can never disagree about what a night is.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::booking::BookingStatus;
use crate::domain::{DomainResult, PaymentStatus, RepositoryProvider, StayInterval};

/// Statuses that count toward revenue and occupancy history.
const REVENUE_STATUSES: &[BookingStatus] = &[
    BookingStatus::Confirmed,
    BookingStatus::CheckedIn,
    BookingStatus::CheckedOut,
];

/// Occupancy of one room type over a queried range.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomTypeOccupancy {
    pub room_type: String,
    pub rooms_of_type: u64,
    pub bookings: u64,
    pub nights_booked: i64,
    /// `nights_booked / (rooms_of_type * nights_in_range)`, percent.
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone)]
pub struct RoomTypeRevenue {
    pub room_type: String,
    pub total_bookings: u64,
    pub total_revenue: Decimal,
    pub avg_revenue_per_booking: Decimal,
}

#[derive(Debug, Clone)]
pub struct MonthlyRevenue {
    /// `YYYY-MM`
    pub month: String,
    pub revenue: Decimal,
    pub bookings: u64,
}

#[derive(Debug, Clone)]
pub struct TopCustomer {
    pub customer_id: i32,
    pub full_name: String,
    pub email: String,
    pub total_bookings: u64,
    pub total_spent: Decimal,
    pub last_check_in: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct ServicePopularity {
    pub service_id: i32,
    pub service_name: String,
    pub category: String,
    pub times_booked: u64,
    pub total_quantity: i64,
    pub total_revenue: Decimal,
}

#[derive(Debug, Clone)]
pub struct DashboardSummary {
    pub total_rooms: u64,
    pub total_customers: u64,
    pub total_bookings: u64,
    pub active_bookings: u64,
    pub rooms_occupied_tonight: u64,
    pub completed_payment_total: Decimal,
}

/// Read-only aggregates for the analytics endpoints.
pub struct ReportingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl ReportingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Per-room-type occupancy over `[start, end)`.
    ///
    /// Each booking contributes only the nights that fall inside the
    /// range; a stay straddling the boundary is clamped.
    pub async fn occupancy(&self, range: StayInterval) -> DomainResult<Vec<RoomTypeOccupancy>> {
        let rooms = self.repos.rooms().find_all().await?;
        let bookings = self.repos.bookings().find_all().await?;
        let range_nights = range.nights();

        let mut per_type: BTreeMap<String, RoomTypeOccupancy> = BTreeMap::new();
        for room in &rooms {
            per_type
                .entry(room.room_type.as_str().to_string())
                .or_insert_with(|| RoomTypeOccupancy {
                    room_type: room.room_type.as_str().to_string(),
                    rooms_of_type: 0,
                    bookings: 0,
                    nights_booked: 0,
                    occupancy_rate: 0.0,
                })
                .rooms_of_type += 1;
        }

        for booking in &bookings {
            if !REVENUE_STATUSES.contains(&booking.status) {
                continue;
            }
            let nights = booking.interval.overlap_nights(&range);
            if nights == 0 {
                continue;
            }
            let Some(room) = rooms.iter().find(|r| r.id == booking.room_id) else {
                continue;
            };
            if let Some(entry) = per_type.get_mut(room.room_type.as_str()) {
                entry.bookings += 1;
                entry.nights_booked += nights;
            }
        }

        let mut result: Vec<RoomTypeOccupancy> = per_type.into_values().collect();
        for entry in &mut result {
            let capacity = entry.rooms_of_type as i64 * range_nights;
            if capacity > 0 {
                let rate = entry.nights_booked as f64 * 100.0 / capacity as f64;
                entry.occupancy_rate = (rate * 100.0).round() / 100.0;
            }
        }
        Ok(result)
    }

    /// Revenue per room type from completed stays.
    pub async fn revenue_by_room_type(&self) -> DomainResult<Vec<RoomTypeRevenue>> {
        let rooms = self.repos.rooms().find_all().await?;
        let bookings = self.repos.bookings().find_all().await?;

        let mut per_type: BTreeMap<String, (u64, Decimal)> = BTreeMap::new();
        for room in &rooms {
            per_type
                .entry(room.room_type.as_str().to_string())
                .or_insert((0, Decimal::ZERO));
        }
        for booking in &bookings {
            if booking.status != BookingStatus::CheckedOut {
                continue;
            }
            let Some(room) = rooms.iter().find(|r| r.id == booking.room_id) else {
                continue;
            };
            if let Some(entry) = per_type.get_mut(room.room_type.as_str()) {
                entry.0 += 1;
                entry.1 += booking.total_amount;
            }
        }

        Ok(per_type
            .into_iter()
            .map(|(room_type, (count, revenue))| RoomTypeRevenue {
                room_type,
                total_bookings: count,
                total_revenue: revenue,
                avg_revenue_per_booking: if count > 0 {
                    revenue / Decimal::from(count)
                } else {
                    Decimal::ZERO
                },
            })
            .collect())
    }

    /// Revenue of completed stays bucketed by check-in month, newest
    /// first, capped at `months` buckets.
    pub async fn monthly_revenue(&self, months: usize) -> DomainResult<Vec<MonthlyRevenue>> {
        let bookings = self.repos.bookings().find_all().await?;

        let mut buckets: BTreeMap<String, (Decimal, u64)> = BTreeMap::new();
        for booking in &bookings {
            if booking.status != BookingStatus::CheckedOut {
                continue;
            }
            let key = booking.interval.check_in().format("%Y-%m").to_string();
            let entry = buckets.entry(key).or_insert((Decimal::ZERO, 0));
            entry.0 += booking.total_amount;
            entry.1 += 1;
        }

        Ok(buckets
            .into_iter()
            .rev()
            .take(months)
            .map(|(month, (revenue, count))| MonthlyRevenue {
                month,
                revenue,
                bookings: count,
            })
            .collect())
    }

    /// Customers ranked by total spend across their booking history.
    pub async fn top_customers(&self, limit: usize) -> DomainResult<Vec<TopCustomer>> {
        let customers = self.repos.customers().find_all().await?;
        let bookings = self.repos.bookings().find_all().await?;

        let mut ranked: Vec<TopCustomer> = customers
            .iter()
            .filter_map(|c| {
                let theirs: Vec<_> = bookings
                    .iter()
                    .filter(|b| {
                        b.customer_id == c.id && REVENUE_STATUSES.contains(&b.status)
                    })
                    .collect();
                if theirs.is_empty() {
                    return None;
                }
                Some(TopCustomer {
                    customer_id: c.id,
                    full_name: c.full_name(),
                    email: c.email.clone(),
                    total_bookings: theirs.len() as u64,
                    total_spent: theirs.iter().map(|b| b.total_amount).sum(),
                    last_check_in: theirs.iter().map(|b| b.interval.check_in()).max(),
                })
            })
            .collect();

        ranked.sort_by(|a, b| b.total_spent.cmp(&a.total_spent));
        ranked.truncate(limit);
        Ok(ranked)
    }

    /// Catalog services ranked by how often they were booked.
    pub async fn popular_services(&self) -> DomainResult<Vec<ServicePopularity>> {
        let services = self.repos.services().find_all().await?;
        let lines = self.repos.booking_services().find_all().await?;

        let mut ranked: Vec<ServicePopularity> = services
            .iter()
            .map(|s| {
                let theirs: Vec<_> = lines.iter().filter(|l| l.service_id == s.id).collect();
                ServicePopularity {
                    service_id: s.id,
                    service_name: s.name.clone(),
                    category: s.category.clone(),
                    times_booked: theirs.len() as u64,
                    total_quantity: theirs.iter().map(|l| l.quantity as i64).sum(),
                    total_revenue: theirs.iter().map(|l| l.total_price).sum(),
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.times_booked.cmp(&a.times_booked));
        Ok(ranked)
    }

    /// Headline dashboard counters.
    pub async fn summary(&self, today: NaiveDate) -> DomainResult<DashboardSummary> {
        let rooms = self.repos.rooms().find_all().await?;
        let customers = self.repos.customers().find_all().await?;
        let bookings = self.repos.bookings().find_all().await?;
        let payments = self.repos.payments().find_all().await?;

        let active_bookings = bookings.iter().filter(|b| b.is_occupying()).count() as u64;
        let rooms_occupied_tonight = bookings
            .iter()
            .filter(|b| {
                b.status == BookingStatus::CheckedIn && b.interval.contains_night(today)
            })
            .count() as u64;
        let completed_payment_total = payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Completed)
            .map(|p| p.amount)
            .sum();

        Ok(DashboardSummary {
            total_rooms: rooms.len() as u64,
            total_customers: customers.len() as u64,
            total_bookings: bookings.len() as u64,
            active_bookings,
            rooms_occupied_tonight,
            completed_payment_total,
        })
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::domain::booking::NewBooking;
    use crate::domain::room::{Room, RoomStatus, RoomType};
    use crate::infrastructure::memory::InMemoryRepositories;

    fn interval(check_in: &str, check_out: &str) -> StayInterval {
        StayInterval::parse(check_in, check_out).unwrap()
    }

    async fn seed_room(repos: &InMemoryRepositories, number: &str, room_type: RoomType) -> i32 {
        repos
            .rooms()
            .save(Room {
                id: 0,
                room_number: number.into(),
                room_type,
                price_per_night: Decimal::new(100, 0),
                max_occupancy: 2,
                floor: None,
                description: None,
                amenities: None,
                status: RoomStatus::Available,
                created_at: Utc::now(),
            })
            .await
            .unwrap()
            .id
    }

    async fn seed_booking(
        repos: &InMemoryRepositories,
        room_id: i32,
        check_in: &str,
        check_out: &str,
        status: BookingStatus,
        amount: i64,
    ) {
        let b = repos
            .bookings()
            .admit(NewBooking {
                room_id,
                customer_id: 1,
                interval: interval(check_in, check_out),
                guests: 2,
                special_requests: None,
                status: BookingStatus::Confirmed,
                total_amount: Decimal::new(amount, 0),
            })
            .await
            .unwrap();
        if status != BookingStatus::Confirmed {
            repos.bookings().set_status(b.id, status).await.unwrap();
        }
    }

    #[tokio::test]
    async fn occupancy_clamps_to_range() {
        let repos = Arc::new(InMemoryRepositories::new());
        let room = seed_room(&repos, "101", RoomType::Double).await;
        // 4 of the 7 nights fall inside December
        seed_booking(
            &repos,
            room,
            "2025-12-28",
            "2026-01-04",
            BookingStatus::CheckedOut,
            700,
        )
        .await;

        let svc = ReportingService::new(repos.clone());
        let report = svc
            .occupancy(interval("2025-12-01", "2026-01-01"))
            .await
            .unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report[0].room_type, "Double");
        assert_eq!(report[0].rooms_of_type, 1);
        assert_eq!(report[0].nights_booked, 4);
        // 4 booked of 31 possible nights
        assert!((report[0].occupancy_rate - 12.9).abs() < 0.2);
    }

    #[tokio::test]
    async fn occupancy_ignores_cancelled() {
        let repos = Arc::new(InMemoryRepositories::new());
        let room = seed_room(&repos, "101", RoomType::Double).await;
        seed_booking(
            &repos,
            room,
            "2025-12-10",
            "2025-12-12",
            BookingStatus::Cancelled,
            200,
        )
        .await;

        let svc = ReportingService::new(repos.clone());
        let report = svc
            .occupancy(interval("2025-12-01", "2026-01-01"))
            .await
            .unwrap();
        assert_eq!(report[0].nights_booked, 0);
        assert_eq!(report[0].occupancy_rate, 0.0);
    }

    #[tokio::test]
    async fn revenue_by_room_type_counts_checked_out_only() {
        let repos = Arc::new(InMemoryRepositories::new());
        let double = seed_room(&repos, "101", RoomType::Double).await;
        let suite = seed_room(&repos, "301", RoomType::Suite).await;
        seed_booking(
            &repos,
            double,
            "2025-12-01",
            "2025-12-04",
            BookingStatus::CheckedOut,
            300,
        )
        .await;
        seed_booking(
            &repos,
            double,
            "2025-12-10",
            "2025-12-12",
            BookingStatus::CheckedOut,
            200,
        )
        .await;
        seed_booking(
            &repos,
            suite,
            "2025-12-01",
            "2025-12-04",
            BookingStatus::Confirmed,
            900,
        )
        .await;

        let svc = ReportingService::new(repos.clone());
        let report = svc.revenue_by_room_type().await.unwrap();

        let double_row = report.iter().find(|r| r.room_type == "Double").unwrap();
        assert_eq!(double_row.total_bookings, 2);
        assert_eq!(double_row.total_revenue, Decimal::new(500, 0));
        assert_eq!(double_row.avg_revenue_per_booking, Decimal::new(250, 0));

        // Suite booking is not checked out yet
        let suite_row = report.iter().find(|r| r.room_type == "Suite").unwrap();
        assert_eq!(suite_row.total_bookings, 0);
        assert_eq!(suite_row.total_revenue, Decimal::ZERO);
    }

    #[tokio::test]
    async fn monthly_revenue_buckets_newest_first() {
        let repos = Arc::new(InMemoryRepositories::new());
        let room = seed_room(&repos, "101", RoomType::Double).await;
        seed_booking(
            &repos,
            room,
            "2025-11-10",
            "2025-11-12",
            BookingStatus::CheckedOut,
            200,
        )
        .await;
        seed_booking(
            &repos,
            room,
            "2025-12-10",
            "2025-12-12",
            BookingStatus::CheckedOut,
            220,
        )
        .await;

        let svc = ReportingService::new(repos.clone());
        let report = svc.monthly_revenue(12).await.unwrap();
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].month, "2025-12");
        assert_eq!(report[0].revenue, Decimal::new(220, 0));
        assert_eq!(report[1].month, "2025-11");
    }
}
