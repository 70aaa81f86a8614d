//! Payment repository interface

use async_trait::async_trait;

use super::model::Payment;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Insert a new payment; the store assigns the id.
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>>;

    /// All payments, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Payment>>;

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<Payment>>;

    async fn update(&self, payment: Payment) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
