//! SeaORM implementation of CustomerRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::customer::{Customer, CustomerRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::customer;

pub struct SeaOrmCustomerRepository {
    db: DatabaseConnection,
}

impl SeaOrmCustomerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: customer::Model) -> Customer {
    Customer {
        id: m.id,
        first_name: m.first_name,
        last_name: m.last_name,
        email: m.email,
        phone: m.phone,
        address: m.address,
        id_proof_type: m.id_proof_type,
        id_proof_number: m.id_proof_number,
        date_of_birth: m.date_of_birth,
        created_at: m.created_at,
    }
}

fn domain_to_active(c: &Customer) -> customer::ActiveModel {
    customer::ActiveModel {
        id: if c.id == 0 { NotSet } else { Set(c.id) },
        first_name: Set(c.first_name.clone()),
        last_name: Set(c.last_name.clone()),
        email: Set(c.email.clone()),
        phone: Set(c.phone.clone()),
        address: Set(c.address.clone()),
        id_proof_type: Set(c.id_proof_type.clone()),
        id_proof_number: Set(c.id_proof_number.clone()),
        date_of_birth: Set(c.date_of_birth),
        created_at: Set(c.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

// ── CustomerRepository impl ─────────────────────────────────────

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn save(&self, c: Customer) -> DomainResult<Customer> {
        debug!("Saving customer {}", c.email);
        let model = domain_to_active(&c).insert(&self.db).await.map_err(db_err)?;
        Ok(model_to_domain(model))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<Customer>> {
        let model = customer::Entity::find()
            .filter(customer::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(model_to_domain))
    }

    async fn find_all(&self) -> DomainResult<Vec<Customer>> {
        let models = customer::Entity::find()
            .order_by_desc(customer::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, c: Customer) -> DomainResult<()> {
        debug!("Updating customer {}", c.id);

        let existing = customer::Entity::find_by_id(c.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: c.id.to_string(),
            });
        }

        domain_to_active(&c).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = customer::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Customer",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }
}
