//! Staff DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Staff;

/// Staff details in API responses. The password hash never leaves the
/// server.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffDto {
    pub id: i32,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub role: String,
    #[schema(value_type = Option<String>)]
    pub salary: Option<Decimal>,
    pub hire_date: NaiveDate,
    pub status: String,
    pub created_at: String,
}

impl From<Staff> for StaffDto {
    fn from(s: Staff) -> Self {
        Self {
            id: s.id,
            username: s.username,
            full_name: s.full_name,
            email: s.email,
            phone: s.phone,
            role: s.role.as_str().to_string(),
            salary: s.salary,
            hire_date: s.hire_date,
            status: s.status.as_str().to_string(),
            created_at: s.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStaffRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    /// admin, manager, receptionist or housekeeping
    pub role: String,
    #[schema(value_type = Option<String>)]
    pub salary: Option<Decimal>,
    /// Defaults to today
    pub hire_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateStaffRequest {
    #[validate(length(min = 1, max = 100))]
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[schema(value_type = Option<String>)]
    pub salary: Option<Decimal>,
    /// Active or Inactive
    pub status: Option<String>,
}
