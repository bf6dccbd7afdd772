use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

use crate::supplier;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "material")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique, indexed)]
    pub name: String,

    // nutrition profile, per unit of this material
    pub energy: Decimal,
    pub protein: Decimal,
    pub total_fat: Decimal,
    pub saturated_fat: Decimal,
    pub trans_fat: Decimal,
    pub cholesterol: Decimal,
    pub carbohydrate: Decimal,
    pub sugars: Decimal,
    pub dietary_fibre: Decimal,
    pub sodium: Decimal,

    pub supplier_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::supplier::Entity",
        from = "Column::SupplierId",
        to = "super::supplier::Column::Id"
    )]
    Supplier,
    #[sea_orm(has_many = "super::material_composition::Entity")]
    MaterialComposition,
}

impl Related<supplier::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Supplier.def()
    }
}

impl Related<super::material_composition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialComposition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
