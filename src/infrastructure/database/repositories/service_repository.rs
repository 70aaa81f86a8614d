//! SeaORM implementations of ServiceRepository and
//! BookingServiceRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::service::{
    BookingService, BookingServiceRepository, Service, ServiceAvailability, ServiceRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{booking_service, service};

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

// ── Service catalog ────────────────────────────────────────────

pub struct SeaOrmServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn service_to_domain(m: service::Model) -> DomainResult<Service> {
    let availability = ServiceAvailability::from_str(&m.availability).ok_or_else(|| {
        DomainError::Store(format!(
            "Service {} has unknown availability {}",
            m.id, m.availability
        ))
    })?;
    Ok(Service {
        id: m.id,
        name: m.name,
        description: m.description,
        price: m.price,
        category: m.category,
        availability,
        created_at: m.created_at,
    })
}

fn service_to_active(s: &Service) -> service::ActiveModel {
    service::ActiveModel {
        id: if s.id == 0 { NotSet } else { Set(s.id) },
        name: Set(s.name.clone()),
        description: Set(s.description.clone()),
        price: Set(s.price),
        category: Set(s.category.clone()),
        availability: Set(s.availability.as_str().to_string()),
        created_at: Set(s.created_at),
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmServiceRepository {
    async fn save(&self, s: Service) -> DomainResult<Service> {
        debug!("Saving service {}", s.name);
        let model = service_to_active(&s).insert(&self.db).await.map_err(db_err)?;
        service_to_domain(model)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Service>> {
        let model = service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(service_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Service>> {
        let models = service::Entity::find()
            .order_by_asc(service::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(service_to_domain).collect()
    }

    async fn update(&self, s: Service) -> DomainResult<()> {
        debug!("Updating service {}", s.id);

        let existing = service::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Service",
                field: "id",
                value: s.id.to_string(),
            });
        }

        service_to_active(&s).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = service::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Service",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}

// ── Booking service lines ──────────────────────────────────────

pub struct SeaOrmBookingServiceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingServiceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn line_to_domain(m: booking_service::Model) -> BookingService {
    BookingService {
        id: m.id,
        booking_id: m.booking_id,
        service_id: m.service_id,
        quantity: m.quantity,
        total_price: m.total_price,
        service_date: m.service_date,
        created_at: m.created_at,
    }
}

#[async_trait]
impl BookingServiceRepository for SeaOrmBookingServiceRepository {
    async fn save(&self, line: BookingService) -> DomainResult<BookingService> {
        debug!(
            "Saving service line: booking {} service {}",
            line.booking_id, line.service_id
        );

        let model = booking_service::ActiveModel {
            id: NotSet,
            booking_id: Set(line.booking_id),
            service_id: Set(line.service_id),
            quantity: Set(line.quantity),
            total_price: Set(line.total_price),
            service_date: Set(line.service_date),
            created_at: Set(line.created_at),
        };
        let model = model.insert(&self.db).await.map_err(db_err)?;
        Ok(line_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<BookingService>> {
        let model = booking_service::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(line_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<BookingService>> {
        let models = booking_service::Entity::find()
            .order_by_desc(booking_service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(line_to_domain).collect())
    }

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<BookingService>> {
        let models = booking_service::Entity::find()
            .filter(booking_service::Column::BookingId.eq(booking_id))
            .order_by_desc(booking_service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(line_to_domain).collect())
    }

    async fn find_for_service(&self, service_id: i32) -> DomainResult<Vec<BookingService>> {
        let models = booking_service::Entity::find()
            .filter(booking_service::Column::ServiceId.eq(service_id))
            .order_by_desc(booking_service::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(line_to_domain).collect())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = booking_service::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "BookingService",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
