pub mod graph;

mod nip;
mod nutrition;

pub use nip::*;
pub use nutrition::*;

use nutrify_entity::serving_unit::ServingUnit;
use rust_decimal::Decimal;
use uuid::Uuid;

/// A product with both kinds of composition edges resolved, the shape the
/// engine walks. Children are referenced by id and resolved on demand, so a
/// diamond-shaped graph never nests the same product twice.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProduct {
    pub id: Uuid,
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
    pub materials: Vec<MaterialEdge>,
    pub sub_products: Vec<SubProductEdge>,
}

/// A material tagged onto a product, carrying the material's nutrition
/// profile and the edge's quantity multiplier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialEdge {
    pub material_id: Uuid,
    pub nutrition: Nutrition,
    pub quantity: Decimal,
}

/// A child product tagged onto a parent, weighted by quantity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubProductEdge {
    pub child_id: Uuid,
    pub quantity: Decimal,
}
