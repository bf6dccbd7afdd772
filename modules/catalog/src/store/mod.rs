//! The narrow persistence contracts the services run against.
//!
//! Everything the guard and the engine read or write goes through these
//! traits; no other path touches the composition edge tables.

mod db;

pub use db::DatabaseCatalog;

use crate::{
    material::model::{MaterialDetails, MaterialSummary},
    product::model::{MaterialIdAndQuantity, ProductDetails, ProductIdAndQuantity, ProductSummary},
    supplier::model::SupplierSummary,
    Error,
};
use nutrify_entity::serving_unit::ServingUnit;
use nutrify_module_composition::service::CompositionSource;
use rust_decimal::Decimal;
use std::future::Future;
use uuid::Uuid;

/// Scalar columns of a product row, the shape inserts and updates carry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductFields {
    pub name: String,
    pub serving_size: Decimal,
    pub serving_unit: ServingUnit,
    pub serving_per_package: i32,
}

/// Scalar columns of a material row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MaterialFields {
    pub name: String,
    pub supplier_id: Uuid,
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

/// Scalar columns of a supplier row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupplierFields {
    pub name: String,
}

/// Resolve material ids to their rows, nutrition profile included.
pub trait MaterialLookup {
    fn find_material(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<MaterialDetails>, Error>>;
}

/// Persistence for the catalog: products with their composition edges,
/// materials, and suppliers.
///
/// Implementations are expected to be transactionally composable: a store
/// constructed over one transaction makes every call here part of it, so the
/// guard's check-then-commit sequence is atomic.
pub trait CatalogStore: MaterialLookup + CompositionSource {
    // product reads

    fn find_product(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<ProductDetails>, Error>>;

    fn find_product_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<ProductSummary>, Error>>;

    /// Every product whose sub-product set includes `child_id`.
    fn find_products_referencing(
        &self,
        child_id: Uuid,
    ) -> impl Future<Output = Result<Vec<ProductSummary>, Error>>;

    fn list_products(&self) -> impl Future<Output = Result<Vec<ProductDetails>, Error>>;

    // product writes

    /// Take the per-product mutation lock. Held until the surrounding
    /// transaction ends; concurrent mutations of the same subtree serialize
    /// behind it.
    fn lock_product(&self, id: Uuid) -> impl Future<Output = Result<(), Error>>;

    fn insert_product(
        &self,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<ProductSummary, Error>>;

    fn update_product(
        &self,
        id: Uuid,
        fields: &ProductFields,
    ) -> impl Future<Output = Result<ProductSummary, Error>>;

    fn delete_product(&self, id: Uuid) -> impl Future<Output = Result<(), Error>>;

    fn save_material_edges(
        &self,
        product_id: Uuid,
        edges: &[MaterialIdAndQuantity],
    ) -> impl Future<Output = Result<(), Error>>;

    fn remove_material_edges(&self, product_id: Uuid) -> impl Future<Output = Result<(), Error>>;

    fn save_sub_product_edges(
        &self,
        product_id: Uuid,
        edges: &[ProductIdAndQuantity],
    ) -> impl Future<Output = Result<(), Error>>;

    fn remove_sub_product_edges(&self, product_id: Uuid)
        -> impl Future<Output = Result<(), Error>>;

    // materials

    fn find_material_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<MaterialSummary>, Error>>;

    fn list_materials(&self) -> impl Future<Output = Result<Vec<MaterialDetails>, Error>>;

    fn insert_material(
        &self,
        fields: &MaterialFields,
    ) -> impl Future<Output = Result<MaterialDetails, Error>>;

    fn update_material(
        &self,
        id: Uuid,
        fields: &MaterialFields,
    ) -> impl Future<Output = Result<MaterialDetails, Error>>;

    fn delete_material(&self, id: Uuid) -> impl Future<Output = Result<(), Error>>;

    // suppliers

    fn find_supplier(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<SupplierSummary>, Error>>;

    fn find_supplier_by_name(
        &self,
        name: &str,
    ) -> impl Future<Output = Result<Option<SupplierSummary>, Error>>;

    fn list_suppliers(&self) -> impl Future<Output = Result<Vec<SupplierSummary>, Error>>;

    fn insert_supplier(
        &self,
        fields: &SupplierFields,
    ) -> impl Future<Output = Result<SupplierSummary, Error>>;

    fn update_supplier(
        &self,
        id: Uuid,
        fields: &SupplierFields,
    ) -> impl Future<Output = Result<SupplierSummary, Error>>;

    /// Mark a supplier deleted. Soft: the row stays for referential history,
    /// lookups stop returning it.
    fn soft_delete_supplier(&self, id: Uuid) -> impl Future<Output = Result<(), Error>>;

    /// How many materials still reference the supplier; backs the
    /// dependency-conflict delete guard.
    fn count_materials_for_supplier(
        &self,
        supplier_id: Uuid,
    ) -> impl Future<Output = Result<u64, Error>>;
}
