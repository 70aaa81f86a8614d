//! SeaORM implementation of StaffRepository

use async_trait::async_trait;
use log::debug;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::domain::staff::{Staff, StaffRepository, StaffRole, StaffStatus};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::staff;

pub struct SeaOrmStaffRepository {
    db: DatabaseConnection,
}

impl SeaOrmStaffRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: staff::Model) -> DomainResult<Staff> {
    let role = StaffRole::from_str(&m.role)
        .ok_or_else(|| DomainError::Store(format!("Staff {} has unknown role {}", m.id, m.role)))?;
    let status = StaffStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Store(format!("Staff {} has unknown status {}", m.id, m.status)))?;
    Ok(Staff {
        id: m.id,
        username: m.username,
        password_hash: m.password_hash,
        full_name: m.full_name,
        email: m.email,
        phone: m.phone,
        role,
        salary: m.salary,
        hire_date: m.hire_date,
        status,
        created_at: m.created_at,
    })
}

fn domain_to_active(s: &Staff) -> staff::ActiveModel {
    staff::ActiveModel {
        id: if s.id == 0 { NotSet } else { Set(s.id) },
        username: Set(s.username.clone()),
        password_hash: Set(s.password_hash.clone()),
        full_name: Set(s.full_name.clone()),
        email: Set(s.email.clone()),
        phone: Set(s.phone.clone()),
        role: Set(s.role.as_str().to_string()),
        salary: Set(s.salary),
        hire_date: Set(s.hire_date),
        status: Set(s.status.as_str().to_string()),
        created_at: Set(s.created_at),
    }
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Store(format!("Database error: {}", e))
}

// ── StaffRepository impl ────────────────────────────────────────

#[async_trait]
impl StaffRepository for SeaOrmStaffRepository {
    async fn save(&self, s: Staff) -> DomainResult<Staff> {
        debug!("Saving staff {}", s.username);
        let model = domain_to_active(&s).insert(&self.db).await.map_err(db_err)?;
        model_to_domain(model)
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Staff>> {
        let model = staff::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<Staff>> {
        let model = staff::Entity::find()
            .filter(staff::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<Staff>> {
        let models = staff::Entity::find()
            .order_by_desc(staff::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn update(&self, s: Staff) -> DomainResult<()> {
        debug!("Updating staff {}", s.id);

        let existing = staff::Entity::find_by_id(s.id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        if existing.is_none() {
            return Err(DomainError::NotFound {
                entity: "Staff",
                field: "id",
                value: s.id.to_string(),
            });
        }

        domain_to_active(&s).update(&self.db).await.map_err(db_err)?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = staff::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected == 0 {
            return Err(DomainError::NotFound {
                entity: "Staff",
                field: "id",
                value: id.to_string(),
            });
        }
        Ok(())
    }

    async fn count(&self) -> DomainResult<u64> {
        staff::Entity::find().count(&self.db).await.map_err(db_err)
    }
}
