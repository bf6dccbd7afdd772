use sea_orm::entity::prelude::*;
use sea_orm::LinkDef;

use crate::{material, product};

/// A weighted edge tagging a material onto a product.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "material_composition")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub product_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub material_id: Uuid,
    pub quantity: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::material::Entity",
        from = "Column::MaterialId",
        to = "super::material::Column::Id"
    )]
    Material,
}

impl Related<product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<material::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Material.def()
    }
}

pub struct ToMaterial;

impl Linked for ToMaterial {
    type FromEntity = product::Entity;
    type ToEntity = material::Entity;

    fn link(&self) -> Vec<LinkDef> {
        vec![Relation::Product.def().rev(), Relation::Material.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}
