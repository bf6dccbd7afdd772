use sea_orm_migration::prelude::*;

use crate::m0000020_create_material::Material;
use crate::m0000030_create_product::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MaterialComposition::Table)
                    .col(
                        ColumnDef::new(MaterialComposition::ProductId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaterialComposition::MaterialId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MaterialComposition::Quantity)
                            .decimal_len(16, 4)
                            .not_null()
                            .default("0"),
                    )
                    .primary_key(
                        Index::create()
                            .col(MaterialComposition::ProductId)
                            .col(MaterialComposition::MaterialId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(MaterialComposition::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(MaterialComposition::MaterialId)
                            .to(Material::Table, Material::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MaterialComposition::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MaterialComposition {
    Table,
    ProductId,
    MaterialId,
    Quantity,
}
