//! Create staff table
//!
//! Staff are also the authentication principals; passwords are stored
//! as bcrypt hashes only.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Staff::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Staff::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Staff::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::PasswordHash).string().not_null())
                    .col(ColumnDef::new(Staff::FullName).string().not_null())
                    .col(
                        ColumnDef::new(Staff::Email)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Staff::Phone).string())
                    .col(ColumnDef::new(Staff::Role).string().not_null())
                    .col(ColumnDef::new(Staff::Salary).decimal_len(10, 2))
                    .col(ColumnDef::new(Staff::HireDate).date().not_null())
                    .col(
                        ColumnDef::new(Staff::Status)
                            .string()
                            .not_null()
                            .default("Active"),
                    )
                    .col(
                        ColumnDef::new(Staff::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_staff_role")
                    .table(Staff::Table)
                    .col(Staff::Role)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Staff::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Staff {
    Table,
    Id,
    Username,
    PasswordHash,
    FullName,
    Email,
    Phone,
    Role,
    Salary,
    HireDate,
    Status,
    CreatedAt,
}
