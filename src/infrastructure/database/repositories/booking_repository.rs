//! SeaORM implementation of BookingRepository
//!
//! The admission operations run their availability check and their
//! write inside one database transaction, so "check availability" and
//! "commit booking" are never observably separated: of two racing
//! admissions for overlapping intervals, the loser either sees the
//! winner's row (RoomUnavailable) or loses the commit
//! (ConcurrentModification).

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::domain::availability::conflicts_with;
use crate::domain::booking::{
    Booking, BookingRepository, BookingStatus, NewBooking, OCCUPYING_STATUSES,
};
use crate::domain::{DomainError, DomainResult, StayInterval};
use crate::infrastructure::database::entities::booking;

pub struct SeaOrmBookingRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: booking::Model) -> DomainResult<Booking> {
    let interval = StayInterval::new(m.check_in, m.check_out).map_err(|e| {
        DomainError::Store(format!("Booking {} has an invalid stored interval: {}", m.id, e))
    })?;
    let status = BookingStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Store(format!("Booking {} has unknown status {}", m.id, m.status)))?;
    Ok(Booking {
        id: m.id,
        room_id: m.room_id,
        customer_id: m.customer_id,
        interval,
        guests: m.guests,
        special_requests: m.special_requests,
        status,
        total_amount: m.total_amount,
        created_at: m.created_at,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

/// Write failures inside an admission transaction mean another writer
/// got there first (SQLite holds a single write lock).
fn admission_write_err(room_id: i32, e: sea_orm::DbErr) -> DomainError {
    let msg = e.to_string();
    if msg.contains("locked") || msg.contains("busy") {
        DomainError::ConcurrentModification { room_id }
    } else {
        db_err(e)
    }
}

fn unwrap_txn_err(e: sea_orm::TransactionError<DomainError>) -> DomainError {
    match e {
        sea_orm::TransactionError::Connection(e) => db_err(e),
        sea_orm::TransactionError::Transaction(e) => e,
    }
}

async fn occupying_on<C: ConnectionTrait>(
    conn: &C,
    room_id: i32,
    statuses: &[BookingStatus],
    exclude_id: Option<i32>,
) -> DomainResult<Vec<Booking>> {
    let status_strs: Vec<&str> = statuses.iter().map(|s| s.as_str()).collect();
    let mut query = booking::Entity::find()
        .filter(booking::Column::RoomId.eq(room_id))
        .filter(booking::Column::Status.is_in(status_strs));
    if let Some(exclude) = exclude_id {
        query = query.filter(booking::Column::Id.ne(exclude));
    }
    let models = query.all(conn).await.map_err(db_err)?;
    models.into_iter().map(model_to_domain).collect()
}

// ── BookingRepository impl ──────────────────────────────────────

#[async_trait]
impl BookingRepository for SeaOrmBookingRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Booking>> {
        let model = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .order_by_desc(booking::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_customer(&self, customer_id: i32) -> DomainResult<Vec<Booking>> {
        let models = booking::Entity::find()
            .filter(booking::Column::CustomerId.eq(customer_id))
            .order_by_desc(booking::Column::CheckIn)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_occupying_for_room(
        &self,
        room_id: i32,
        statuses: &[BookingStatus],
        exclude_id: Option<i32>,
    ) -> DomainResult<Vec<Booking>> {
        occupying_on(&self.db, room_id, statuses, exclude_id).await
    }

    async fn admit(&self, new: NewBooking) -> DomainResult<Booking> {
        debug!(
            "Admitting booking for room {} over {}",
            new.room_id, new.interval
        );

        let stored = self
            .db
            .transaction::<_, booking::Model, DomainError>(|txn| {
                Box::pin(async move {
                    let existing =
                        occupying_on(txn, new.room_id, OCCUPYING_STATUSES, None).await?;
                    if conflicts_with(&new.interval, &existing) {
                        return Err(DomainError::RoomUnavailable {
                            room_id: new.room_id,
                            check_in: new.interval.check_in(),
                            check_out: new.interval.check_out(),
                        });
                    }

                    let model = booking::ActiveModel {
                        id: NotSet,
                        room_id: Set(new.room_id),
                        customer_id: Set(new.customer_id),
                        check_in: Set(new.interval.check_in()),
                        check_out: Set(new.interval.check_out()),
                        guests: Set(new.guests),
                        special_requests: Set(new.special_requests),
                        status: Set(new.status.as_str().to_string()),
                        total_amount: Set(new.total_amount),
                        created_at: Set(chrono::Utc::now()),
                    };
                    model
                        .insert(txn)
                        .await
                        .map_err(|e| admission_write_err(new.room_id, e))
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        model_to_domain(stored)
    }

    async fn confirm(&self, id: i32) -> DomainResult<Booking> {
        debug!("Confirming booking {}", id);

        let stored = self
            .db
            .transaction::<_, booking::Model, DomainError>(move |txn| {
                Box::pin(async move {
                    let row = booking::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(db_err)?
                        .ok_or(DomainError::NotFound {
                            entity: "Booking",
                            field: "id",
                            value: id.to_string(),
                        })?;
                    let current = model_to_domain(row.clone())?;

                    if current.status != BookingStatus::Pending {
                        return Err(DomainError::Validation(format!(
                            "Booking {} is not pending (status: {})",
                            id, current.status
                        )));
                    }

                    let existing =
                        occupying_on(txn, current.room_id, OCCUPYING_STATUSES, Some(id)).await?;
                    if conflicts_with(&current.interval, &existing) {
                        return Err(DomainError::RoomUnavailable {
                            room_id: current.room_id,
                            check_in: current.interval.check_in(),
                            check_out: current.interval.check_out(),
                        });
                    }

                    let mut active: booking::ActiveModel = row.into();
                    active.status = Set(BookingStatus::Confirmed.as_str().to_string());
                    active
                        .update(txn)
                        .await
                        .map_err(|e| admission_write_err(current.room_id, e))
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        model_to_domain(stored)
    }

    async fn reschedule(
        &self,
        id: i32,
        room_id: i32,
        interval: StayInterval,
        total_amount: Decimal,
    ) -> DomainResult<Booking> {
        debug!("Rescheduling booking {} to room {} over {}", id, room_id, interval);

        let stored = self
            .db
            .transaction::<_, booking::Model, DomainError>(move |txn| {
                Box::pin(async move {
                    let current = booking::Entity::find_by_id(id)
                        .one(txn)
                        .await
                        .map_err(db_err)?
                        .ok_or(DomainError::NotFound {
                            entity: "Booking",
                            field: "id",
                            value: id.to_string(),
                        })?;

                    let existing =
                        occupying_on(txn, room_id, OCCUPYING_STATUSES, Some(id)).await?;
                    if conflicts_with(&interval, &existing) {
                        return Err(DomainError::RoomUnavailable {
                            room_id,
                            check_in: interval.check_in(),
                            check_out: interval.check_out(),
                        });
                    }

                    let mut active: booking::ActiveModel = current.into();
                    active.room_id = Set(room_id);
                    active.check_in = Set(interval.check_in());
                    active.check_out = Set(interval.check_out());
                    active.total_amount = Set(total_amount);
                    active
                        .update(txn)
                        .await
                        .map_err(|e| admission_write_err(room_id, e))
                })
            })
            .await
            .map_err(unwrap_txn_err)?;

        model_to_domain(stored)
    }

    async fn update(&self, b: Booking) -> DomainResult<()> {
        debug!("Updating booking {}", b.id);

        let existing = booking::Entity::find_by_id(b.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: b.id.to_string(),
            });
        }

        let model = booking::ActiveModel {
            id: Set(b.id),
            room_id: Set(b.room_id),
            customer_id: Set(b.customer_id),
            check_in: Set(b.interval.check_in()),
            check_out: Set(b.interval.check_out()),
            guests: Set(b.guests),
            special_requests: Set(b.special_requests),
            status: Set(b.status.as_str().to_string()),
            total_amount: Set(b.total_amount),
            created_at: Set(b.created_at),
        };
        model.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn set_status(&self, id: i32, status: BookingStatus) -> DomainResult<()> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };

        let mut active: booking::ActiveModel = existing.into();
        active.status = Set(status.as_str().to_string());
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn adjust_total(&self, id: i32, delta: Decimal) -> DomainResult<()> {
        let existing = booking::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some(existing) = existing else {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        };

        let new_total = existing.total_amount + delta;
        let mut active: booking::ActiveModel = existing.into();
        active.total_amount = Set(new_total);
        active.update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = booking::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Booking",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
