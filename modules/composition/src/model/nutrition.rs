use nutrify_common::decimal;
use nutrify_entity::{material, serving_unit::ServingUnit};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Aggregated nutrition totals, one exact-decimal field per tracked
/// nutrient. Starts out all-zero.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Nutrition {
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
}

impl Nutrition {
    /// Add `other`, scaled by `quantity`, onto this total.
    pub fn add_scaled(&mut self, other: &Nutrition, quantity: Decimal) -> &mut Self {
        self.energy = decimal::add(self.energy, decimal::multiply(other.energy, quantity));
        self.protein = decimal::add(self.protein, decimal::multiply(other.protein, quantity));
        self.total_fat = decimal::add(self.total_fat, decimal::multiply(other.total_fat, quantity));
        self.saturated_fat = decimal::add(
            self.saturated_fat,
            decimal::multiply(other.saturated_fat, quantity),
        );
        self.trans_fat = decimal::add(self.trans_fat, decimal::multiply(other.trans_fat, quantity));
        self.cholesterol = decimal::add(
            self.cholesterol,
            decimal::multiply(other.cholesterol, quantity),
        );
        self.carbohydrate = decimal::add(
            self.carbohydrate,
            decimal::multiply(other.carbohydrate, quantity),
        );
        self.sugars = decimal::add(self.sugars, decimal::multiply(other.sugars, quantity));
        self.dietary_fibre = decimal::add(
            self.dietary_fibre,
            decimal::multiply(other.dietary_fibre, quantity),
        );
        self.sodium = decimal::add(self.sodium, decimal::multiply(other.sodium, quantity));
        self
    }

    /// Totals normalized to a 100-unit basis of the product's serving unit.
    pub fn per_hundred(&self, serving_size: Decimal) -> Nutrition {
        let normalize = |value| decimal::multiply(decimal::divide(value, serving_size), HUNDRED);

        Self {
            energy: normalize(self.energy),
            protein: normalize(self.protein),
            total_fat: normalize(self.total_fat),
            saturated_fat: normalize(self.saturated_fat),
            trans_fat: normalize(self.trans_fat),
            cholesterol: normalize(self.cholesterol),
            carbohydrate: normalize(self.carbohydrate),
            sugars: normalize(self.sugars),
            dietary_fibre: normalize(self.dietary_fibre),
            sodium: normalize(self.sodium),
        }
    }

    /// Render with each field's display precision and unit suffix.
    pub fn render(&self) -> NutritionView {
        NutritionView {
            energy: quantity(self.energy, 0, ServingUnit::Kcal),
            protein: quantity(self.protein, 1, ServingUnit::G),
            total_fat: quantity(self.total_fat, 1, ServingUnit::G),
            saturated_fat: quantity(self.saturated_fat, 1, ServingUnit::G),
            trans_fat: quantity(self.trans_fat, 1, ServingUnit::G),
            cholesterol: quantity(self.cholesterol, 0, ServingUnit::Mg),
            carbohydrate: quantity(self.carbohydrate, 1, ServingUnit::G),
            sugars: quantity(self.sugars, 1, ServingUnit::G),
            dietary_fibre: quantity(self.dietary_fibre, 1, ServingUnit::G),
            sodium: quantity(self.sodium, 0, ServingUnit::Mg),
        }
    }
}

impl From<&material::Model> for Nutrition {
    fn from(value: &material::Model) -> Self {
        Self {
            energy: value.energy,
            protein: value.protein,
            total_fat: value.total_fat,
            saturated_fat: value.saturated_fat,
            trans_fat: value.trans_fat,
            cholesterol: value.cholesterol,
            carbohydrate: value.carbohydrate,
            sugars: value.sugars,
            dietary_fibre: value.dietary_fibre,
            sodium: value.sodium,
        }
    }
}

fn quantity(value: Decimal, dp: u32, unit: ServingUnit) -> String {
    format!("{}{}", decimal::to_fixed(value, dp), unit)
}

/// Display form of a [`Nutrition`] vector: fixed decimals, unit suffix
/// appended per field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct NutritionView {
    pub energy: String,
    pub protein: String,
    pub total_fat: String,
    pub saturated_fat: String,
    pub trans_fat: String,
    pub cholesterol: String,
    pub carbohydrate: String,
    pub sugars: String,
    pub dietary_fibre: String,
    pub sodium: String,
}
