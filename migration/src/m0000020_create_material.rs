use sea_orm_migration::prelude::*;

use crate::m0000010_create_supplier::Supplier;
use crate::{Now, UuidV4};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Material::Table)
                    .col(
                        ColumnDef::new(Material::Id)
                            .uuid()
                            .not_null()
                            .default(Func::cust(UuidV4))
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Material::Name)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(nutrition(Material::Energy))
                    .col(nutrition(Material::Protein))
                    .col(nutrition(Material::TotalFat))
                    .col(nutrition(Material::SaturatedFat))
                    .col(nutrition(Material::TransFat))
                    .col(nutrition(Material::Cholesterol))
                    .col(nutrition(Material::Carbohydrate))
                    .col(nutrition(Material::Sugars))
                    .col(nutrition(Material::DietaryFibre))
                    .col(nutrition(Material::Sodium))
                    .col(ColumnDef::new(Material::SupplierId).uuid().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(Material::SupplierId)
                            .to(Supplier::Table, Supplier::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .col(
                        ColumnDef::new(Material::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .col(
                        ColumnDef::new(Material::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Func::cust(Now)),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Material::Table).to_owned())
            .await
    }
}

fn nutrition(column: Material) -> ColumnDef {
    ColumnDef::new(column)
        .decimal_len(16, 4)
        .not_null()
        .default("0")
        .take()
}

#[derive(DeriveIden)]
pub enum Material {
    Table,
    Id,
    Name,
    Energy,
    Protein,
    TotalFat,
    SaturatedFat,
    TransFat,
    Cholesterol,
    Carbohydrate,
    Sugars,
    DietaryFibre,
    Sodium,
    SupplierId,
    CreatedAt,
    UpdatedAt,
}
