use sea_orm::entity::prelude::*;
use sea_orm::LinkDef;

use crate::product;

/// A weighted edge from a parent product to a child product. The edge set
/// over all products forms the composition DAG.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product_composition")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub parent_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub child_id: Uuid,
    pub quantity: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ParentId",
        to = "super::product::Column::Id"
    )]
    Parent,
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ChildId",
        to = "super::product::Column::Id"
    )]
    Child,
}

pub struct ToParent;
pub struct ToChild;

impl Linked for ToParent {
    type FromEntity = product::Entity;
    type ToEntity = product::Entity;

    fn link(&self) -> Vec<LinkDef> {
        vec![Relation::Child.def().rev(), Relation::Parent.def()]
    }
}

impl Linked for ToChild {
    type FromEntity = product::Entity;
    type ToEntity = product::Entity;

    fn link(&self) -> Vec<LinkDef> {
        vec![Relation::Parent.def().rev(), Relation::Child.def()]
    }
}

impl ActiveModelBehavior for ActiveModel {}
