use sea_orm_migration::prelude::*;

use crate::m0000030_create_product::Product;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProductComposition::Table)
                    .col(
                        ColumnDef::new(ProductComposition::ParentId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductComposition::ChildId)
                            .uuid()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProductComposition::Quantity)
                            .decimal_len(16, 4)
                            .not_null()
                            .default("0"),
                    )
                    .primary_key(
                        Index::create()
                            .col(ProductComposition::ParentId)
                            .col(ProductComposition::ChildId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(ProductComposition::ParentId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from_col(ProductComposition::ChildId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ProductComposition::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum ProductComposition {
    Table,
    ParentId,
    ChildId,
    Quantity,
}
