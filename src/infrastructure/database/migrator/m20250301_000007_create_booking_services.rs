//! Create booking_services line-item table

use sea_orm_migration::prelude::*;

use super::m20250301_000004_create_bookings::Bookings;
use super::m20250301_000006_create_services::Services;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(BookingServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BookingServices::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(BookingServices::BookingId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingServices::ServiceId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(BookingServices::Quantity)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(BookingServices::TotalPrice)
                            .decimal_len(10, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(BookingServices::ServiceDate).date())
                    .col(
                        ColumnDef::new(BookingServices::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_services_booking")
                            .from(BookingServices::Table, BookingServices::BookingId)
                            .to(Bookings::Table, Bookings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_services_service")
                            .from(BookingServices::Table, BookingServices::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_services_booking")
                    .table(BookingServices::Table)
                    .col(BookingServices::BookingId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_services_service")
                    .table(BookingServices::Table)
                    .col(BookingServices::ServiceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingServices::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum BookingServices {
    Table,
    Id,
    BookingId,
    ServiceId,
    Quantity,
    TotalPrice,
    ServiceDate,
    CreatedAt,
}
