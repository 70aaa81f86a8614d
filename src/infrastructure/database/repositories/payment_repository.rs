//! SeaORM implementation of PaymentRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::payment::{Payment, PaymentMethod, PaymentRepository, PaymentStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::payment;

pub struct SeaOrmPaymentRepository {
    db: DatabaseConnection,
}

impl SeaOrmPaymentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: payment::Model) -> DomainResult<Payment> {
    let method = PaymentMethod::from_str(&m.method).ok_or_else(|| {
        DomainError::Store(format!("Payment {} has unknown method {}", m.id, m.method))
    })?;
    let status = PaymentStatus::from_str(&m.status).ok_or_else(|| {
        DomainError::Store(format!("Payment {} has unknown status {}", m.id, m.status))
    })?;
    Ok(Payment {
        id: m.id,
        booking_id: m.booking_id,
        amount: m.amount,
        method,
        status,
        transaction_ref: m.transaction_ref,
        paid_at: m.paid_at,
    })
}

fn domain_to_active(p: &Payment) -> payment::ActiveModel {
    payment::ActiveModel {
        id: if p.id == 0 { NotSet } else { Set(p.id) },
        booking_id: Set(p.booking_id),
        amount: Set(p.amount),
        method: Set(p.method.as_str().to_string()),
        status: Set(p.status.as_str().to_string()),
        transaction_ref: Set(p.transaction_ref.clone()),
        paid_at: Set(p.paid_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

// ── PaymentRepository impl ──────────────────────────────────────

#[async_trait]
impl PaymentRepository for SeaOrmPaymentRepository {
    async fn save(&self, p: Payment) -> DomainResult<Payment> {
        debug!("Saving payment for booking {}", p.booking_id);
        let model = domain_to_active(&p).insert(&self.db).await.map_err(db_err)?;
        model_to_domain(model)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Payment>> {
        let model = payment::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .order_by_desc(payment::Column::PaidAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn find_for_booking(&self, booking_id: i32) -> DomainResult<Vec<Payment>> {
        let models = payment::Entity::find()
            .filter(payment::Column::BookingId.eq(booking_id))
            .order_by_desc(payment::Column::PaidAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, p: Payment) -> DomainResult<()> {
        debug!("Updating payment {}", p.id);

        let existing = payment::Entity::find_by_id(p.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: p.id.to_string(),
            });
        }

        domain_to_active(&p).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = payment::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Payment",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
