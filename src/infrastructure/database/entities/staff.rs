//! Staff entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "staff")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(unique)]
    pub username: String,

    /// bcrypt hash, never the clear-text password
    pub password_hash: String,

    pub full_name: String,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(nullable)]
    pub phone: Option<String>,

    /// Role: admin, manager, receptionist, housekeeping
    pub role: String,

    #[sea_orm(nullable)]
    pub salary: Option<Decimal>,

    pub hire_date: Date,

    /// Status: Active, Inactive
    pub status: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
