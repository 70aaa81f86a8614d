//! Service catalog entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,

    pub price: Decimal,

    pub category: String,

    /// Availability: Available, Unavailable
    pub availability: String,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::booking_service::Entity")]
    BookingServices,
}

impl Related<super::booking_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingServices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
