use super::NutritionView;
use nutrify_entity::serving_unit::ServingUnit;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

/// The computed Nutrition Information Panel of a product: aggregated totals
/// per serving and normalized to a 100-unit basis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct NutritionPanel {
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
    pub per_serving: NutritionView,
    pub per_hundred: NutritionView,
}
