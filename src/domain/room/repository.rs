//! Room repository interface

use async_trait::async_trait;

use super::model::{Room, RoomStatus};
use crate::domain::DomainResult;

#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Insert a new room; the store assigns the id.
    async fn save(&self, room: Room) -> DomainResult<Room>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>>;

    /// Find by the human-facing room number.
    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>>;

    /// All rooms, ordered by room number.
    async fn find_all(&self) -> DomainResult<Vec<Room>>;

    /// All rooms whose stored status is not in `exclude_statuses`.
    async fn find_all_excluding(&self, exclude_statuses: &[RoomStatus]) -> DomainResult<Vec<Room>>;

    async fn update(&self, room: Room) -> DomainResult<()>;

    async fn delete(&self, id: i32) -> DomainResult<()>;
}
