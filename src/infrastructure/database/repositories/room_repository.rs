//! SeaORM implementation of RoomRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::room::{Room, RoomRepository, RoomStatus, RoomType};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::room;

pub struct SeaOrmRoomRepository {
    db: DatabaseConnection,
}

impl SeaOrmRoomRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: room::Model) -> DomainResult<Room> {
    let room_type = RoomType::from_str(&m.room_type)
        .ok_or_else(|| DomainError::Store(format!("Room {} has unknown type {}", m.id, m.room_type)))?;
    let status = RoomStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Store(format!("Room {} has unknown status {}", m.id, m.status)))?;
    Ok(Room {
        id: m.id,
        room_number: m.room_number,
        room_type,
        price_per_night: m.price_per_night,
        max_occupancy: m.max_occupancy,
        floor: m.floor,
        description: m.description,
        amenities: m.amenities,
        status,
        created_at: m.created_at,
    })
}

fn domain_to_active(r: &Room) -> room::ActiveModel {
    room::ActiveModel {
        id: if r.id == 0 { NotSet } else { Set(r.id) },
        room_number: Set(r.room_number.clone()),
        room_type: Set(r.room_type.as_str().to_string()),
        price_per_night: Set(r.price_per_night),
        max_occupancy: Set(r.max_occupancy),
        floor: Set(r.floor),
        description: Set(r.description.clone()),
        amenities: Set(r.amenities.clone()),
        status: Set(r.status.as_str().to_string()),
        created_at: Set(r.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

// ── RoomRepository impl ─────────────────────────────────────────

#[async_trait]
impl RoomRepository for SeaOrmRoomRepository {
    async fn save(&self, r: Room) -> DomainResult<Room> {
        debug!("Saving room {}", r.room_number);
        let model = domain_to_active(&r).insert(&self.db).await.map_err(db_err)?;
        model_to_domain(model)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Room>> {
        let model = room::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_number(&self, room_number: &str) -> DomainResult<Option<Room>> {
        let model = room::Entity::find()
            .filter(room::Column::RoomNumber.eq(room_number))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Room>> {
        let models = room::Entity::find()
            .order_by_asc(room::Column::RoomNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_all_excluding(&self, exclude_statuses: &[RoomStatus]) -> DomainResult<Vec<Room>> {
        let excluded: Vec<&str> = exclude_statuses.iter().map(|s| s.as_str()).collect();
        let models = room::Entity::find()
            .filter(room::Column::Status.is_not_in(excluded))
            .order_by_asc(room::Column::RoomNumber)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, r: Room) -> DomainResult<()> {
        debug!("Updating room {}", r.id);

        let existing = room::Entity::find_by_id(r.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: r.id.to_string(),
            });
        }

        domain_to_active(&r).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = room::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Room",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
