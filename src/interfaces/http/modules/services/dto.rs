//! Service catalog and booking-service-line DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{BookingService, Service};

#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    pub category: String,
    pub availability: String,
    pub created_at: String,
}

impl From<Service> for ServiceDto {
    fn from(s: Service) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.description,
            price: s.price,
            category: s.category,
            availability: s.availability.as_str().to_string(),
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = String)]
    pub price: Decimal,
    #[validate(length(min = 1, max = 50))]
    pub category: String,
    /// Available or Unavailable; defaults to Available
    pub availability: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[schema(value_type = Option<String>)]
    pub price: Option<Decimal>,
    #[validate(length(min = 1, max = 50))]
    pub category: Option<String>,
    pub availability: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BookingServiceDto {
    pub id: i32,
    pub booking_id: i32,
    pub service_id: i32,
    pub quantity: i32,
    #[schema(value_type = String)]
    pub total_price: Decimal,
    pub service_date: Option<NaiveDate>,
    pub created_at: String,
    /// Catalog summary for listings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl BookingServiceDto {
    pub fn from_line(line: &BookingService) -> Self {
        Self {
            id: line.id,
            booking_id: line.booking_id,
            service_id: line.service_id,
            quantity: line.quantity,
            total_price: line.total_price,
            service_date: line.service_date,
            created_at: line.created_at.to_rfc3339(),
            service_name: None,
            category: None,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBookingServiceRequest {
    pub booking_id: i32,
    pub service_id: i32,
    #[validate(range(min = 1, max = 100))]
    pub quantity: i32,
    pub service_date: Option<NaiveDate>,
}
