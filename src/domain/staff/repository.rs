//! Staff repository interface

use async_trait::async_trait;

use super::model::Staff;
use crate::domain::DomainResult;

#[async_trait]
pub trait StaffRepository: Send + Sync {
    /// Insert a new staff member; the store assigns the id.
    async fn save(&self, staff: Staff) -> DomainResult<Staff>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Staff>>;

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<Staff>>;

    /// All staff, newest first.
    async fn find_all(&self) -> DomainResult<Vec<Staff>>;

    async fn update(&self, staff: Staff) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;

    /// Total number of staff records (used for first-run admin seeding).
    async fn count(&self) -> DomainResult<u64>;
}
