//! Analytics DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::reporting::{
    DashboardSummary, MonthlyRevenue, RoomTypeOccupancy, RoomTypeRevenue, ServicePopularity,
    TopCustomer,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct SummaryDto {
    pub total_rooms: u64,
    pub total_customers: u64,
    pub total_bookings: u64,
    pub active_bookings: u64,
    pub rooms_occupied_tonight: u64,
    #[schema(value_type = String)]
    pub completed_payment_total: Decimal,
}

impl From<DashboardSummary> for SummaryDto {
    fn from(s: DashboardSummary) -> Self {
        Self {
            total_rooms: s.total_rooms,
            total_customers: s.total_customers,
            total_bookings: s.total_bookings,
            active_bookings: s.active_bookings,
            rooms_occupied_tonight: s.rooms_occupied_tonight,
            completed_payment_total: s.completed_payment_total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OccupancyDto {
    pub room_type: String,
    pub rooms_of_type: u64,
    pub bookings: u64,
    pub nights_booked: i64,
    pub occupancy_rate: f64,
}

impl From<RoomTypeOccupancy> for OccupancyDto {
    fn from(o: RoomTypeOccupancy) -> Self {
        Self {
            room_type: o.room_type,
            rooms_of_type: o.rooms_of_type,
            bookings: o.bookings,
            nights_booked: o.nights_booked,
            occupancy_rate: o.occupancy_rate,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RoomTypeRevenueDto {
    pub room_type: String,
    pub total_bookings: u64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
    #[schema(value_type = String)]
    pub avg_revenue_per_booking: Decimal,
}

impl From<RoomTypeRevenue> for RoomTypeRevenueDto {
    fn from(r: RoomTypeRevenue) -> Self {
        Self {
            room_type: r.room_type,
            total_bookings: r.total_bookings,
            total_revenue: r.total_revenue,
            avg_revenue_per_booking: r.avg_revenue_per_booking,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MonthlyRevenueDto {
    pub month: String,
    #[schema(value_type = String)]
    pub revenue: Decimal,
    pub bookings: u64,
}

impl From<MonthlyRevenue> for MonthlyRevenueDto {
    fn from(m: MonthlyRevenue) -> Self {
        Self {
            month: m.month,
            revenue: m.revenue,
            bookings: m.bookings,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopCustomerDto {
    pub customer_id: i32,
    pub full_name: String,
    pub email: String,
    pub total_bookings: u64,
    #[schema(value_type = String)]
    pub total_spent: Decimal,
    pub last_check_in: Option<NaiveDate>,
}

impl From<TopCustomer> for TopCustomerDto {
    fn from(c: TopCustomer) -> Self {
        Self {
            customer_id: c.customer_id,
            full_name: c.full_name,
            email: c.email,
            total_bookings: c.total_bookings,
            total_spent: c.total_spent,
            last_check_in: c.last_check_in,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ServicePopularityDto {
    pub service_id: i32,
    pub service_name: String,
    pub category: String,
    pub times_booked: u64,
    pub total_quantity: i64,
    #[schema(value_type = String)]
    pub total_revenue: Decimal,
}

impl From<ServicePopularity> for ServicePopularityDto {
    fn from(s: ServicePopularity) -> Self {
        Self {
            service_id: s.service_id,
            service_name: s.service_name,
            category: s.category,
            times_booked: s.times_booked,
            total_quantity: s.total_quantity,
            total_revenue: s.total_revenue,
        }
    }
}

/// Date range for the occupancy report
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OccupancyParams {
    /// Range start (YYYY-MM-DD)
    pub start_date: String,
    /// Range end (YYYY-MM-DD, exclusive)
    pub end_date: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TopCustomersParams {
    /// Maximum rows to return (default 10)
    pub limit: Option<usize>,
}
