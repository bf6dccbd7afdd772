pub mod material;
pub mod material_composition;
pub mod product;
pub mod product_composition;
pub mod serving_unit;
pub mod supplier;
