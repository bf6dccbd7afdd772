use nutrify_entity::material;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct CreateMaterial {
    pub name: String,
    pub supplier_id: Uuid,
    #[serde(default)]
    pub energy: Decimal,
    #[serde(default)]
    pub protein: Decimal,
    #[serde(default)]
    pub total_fat: Decimal,
    #[serde(default)]
    pub saturated_fat: Decimal,
    #[serde(default)]
    pub trans_fat: Decimal,
    #[serde(default)]
    pub cholesterol: Decimal,
    #[serde(default)]
    pub carbohydrate: Decimal,
    #[serde(default)]
    pub sugars: Decimal,
    #[serde(default)]
    pub dietary_fibre: Decimal,
    #[serde(default)]
    pub sodium: Decimal,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct UpdateMaterial {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protein: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_fat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trans_fat: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sugars: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dietary_fibre: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sodium: Option<Decimal>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct MaterialSummary {
    pub id: Uuid,
    pub name: String,
    pub supplier_id: Uuid,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct MaterialDetails {
    #[serde(flatten)]
    pub summary: MaterialSummary,
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

impl From<material::Model> for MaterialSummary {
    fn from(value: material::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            supplier_id: value.supplier_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl From<material::Model> for MaterialDetails {
    fn from(value: material::Model) -> Self {
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
            summary: value.into(),
        }
    }
}
