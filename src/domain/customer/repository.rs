//! Customer repository interface

use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a new customer; the store assigns the id.
    async fn save(&self, customer: Customer) -> DomainResult<Customer>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>>;

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>>;

    /// All customers, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Customer>>;

    async fn update(&self, customer: Customer) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
