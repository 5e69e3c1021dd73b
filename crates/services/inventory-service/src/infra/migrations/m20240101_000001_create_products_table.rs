//! Migration: Create products table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Products::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Products::Name).string().not_null().unique_key())
                    .col(ColumnDef::new(Products::Description).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Category).string().not_null().default(""))
                    .col(ColumnDef::new(Products::Supplier).string().not_null().default(""))
                    .col(
                        ColumnDef::new(Products::Quantity)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Products::Price).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Products::ReorderLevel)
                            .big_integer()
                            .not_null()
                            .default(5),
                    )
                    .col(
                        ColumnDef::new(Products::AddedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Low-stock scans compare quantity against reorder_level
        manager
            .create_index(
                Index::create()
                    .name("idx_products_quantity")
                    .table(Products::Table)
                    .col(Products::Quantity)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Products::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    Category,
    Supplier,
    Quantity,
    Price,
    ReorderLevel,
    AddedAt,
}
