use nutrify_entity::{product, serving_unit::ServingUnit};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// One material tag: the referenced id plus the quantity multiplier applied
/// to the material's nutrition profile.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MaterialIdAndQuantity {
    pub material_id: Uuid,
    pub quantity: Decimal,
}

/// One sub-product tag: the referenced id plus the quantity multiplier
/// applied to the child's aggregated totals.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct ProductIdAndQuantity {
    pub product_id: Uuid,
    pub quantity: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CreateProduct {
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
    /// Materials to tag. An absent key is the same as an empty list here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id_and_quantity: Option<Vec<MaterialIdAndQuantity>>,
    /// Sub-products to tag. An absent key is the same as an empty list here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_product_id_and_quantity: Option<Vec<ProductIdAndQuantity>>,
}

/// Partial update. For the two composition keys, presence is load-bearing:
/// an absent key leaves the existing edges untouched, while an explicit
/// empty list clears them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UpdateProduct {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_size: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_unit: Option<ServingUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serving_per_package: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material_id_and_quantity: Option<Vec<MaterialIdAndQuantity>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_product_id_and_quantity: Option<Vec<ProductIdAndQuantity>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// A product with its composition edges, one level deep. Children appear as
/// id-and-quantity pairs, never as nested products.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductDetails {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub material_id_and_quantity: Vec<MaterialIdAndQuantity>,
    pub sub_product_id_and_quantity: Vec<ProductIdAndQuantity>,
}

impl From<product::Model> for ProductSummary {
    fn from(value: product::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            serving_size: value.serving_size,
            serving_unit: value.serving_unit,
            serving_per_package: value.serving_per_package,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
