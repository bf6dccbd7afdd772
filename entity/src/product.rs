use sea_orm::entity::prelude::*;
use time::OffsetDateTime;

use crate::serving_unit::ServingUnit;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: Uuid,
    #[sea_orm(unique, indexed)]
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::material_composition::Entity")]
    MaterialComposition,
}

impl Related<super::material_composition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MaterialComposition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
