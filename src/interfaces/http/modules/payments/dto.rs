//! Payment DTOs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Payment;

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub booking_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub method: String,
    pub status: String,
    pub transaction_ref: Option<String>,
    pub paid_at: String,
}

impl From<Payment> for PaymentDto {
    fn from(p: Payment) -> Self {
        Self {
            id: p.id,
            booking_id: p.booking_id,
            amount: p.amount,
            method: p.method.as_str().to_string(),
            status: p.status.as_str().to_string(),
            transaction_ref: p.transaction_ref,
            paid_at: p.paid_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentRequest {
    pub booking_id: i32,
    #[schema(value_type = String)]
    pub amount: Decimal,
    /// Cash, Credit Card, Debit Card, UPI or Bank Transfer
    pub method: String,
    pub transaction_ref: Option<String>,
    /// Defaults to Completed
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentRequest {
    #[schema(value_type = Option<String>)]
    pub amount: Option<Decimal>,
    pub method: Option<String>,
    pub status: Option<String>,
    pub transaction_ref: Option<String>,
}
