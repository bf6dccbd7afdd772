use sea_orm::entity::prelude::*;
use std::fmt;

#[derive(
    Debug,
    Copy,
    Clone,
    Hash,
    PartialEq,
    Eq,
    EnumIter,
    DeriveActiveEnum,
    strum::VariantArray,
    strum::EnumString,
    serde::Serialize,
    serde::Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(4))")]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServingUnit {
    #[sea_orm(string_value = "g")]
    G,
    #[sea_orm(string_value = "ml")]
    Ml,
    #[sea_orm(string_value = "mg")]
    Mg,
    #[sea_orm(string_value = "kcal")]
    Kcal,
}

impl fmt::Display for ServingUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = match self {
            Self::G => "g",
            Self::Ml => "ml",
            Self::Mg => "mg",
            Self::Kcal => "kcal",
        };
        write!(f, "{unit}")
    }
}
