//! In-memory implementation of the store contracts, the test double for the
//! external persistence collaborator.

use crate::{
    material::model::{MaterialDetails, MaterialSummary},
    product::model::{MaterialIdAndQuantity, ProductDetails, ProductIdAndQuantity, ProductSummary},
    store::{CatalogStore, MaterialFields, MaterialLookup, ProductFields, SupplierFields},
    supplier::model::SupplierSummary,
    Error,
};
use anyhow::anyhow;
use nutrify_module_composition as composition;
use nutrify_module_composition::{
    model::{MaterialEdge, Nutrition, ResolvedProduct, SubProductEdge},
    service::CompositionSource,
};
use std::collections::HashMap;
use std::sync::Mutex;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Default)]
pub struct MemoryCatalog {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    suppliers: Vec<SupplierRecord>,
    materials: Vec<MaterialDetails>,
    products: Vec<ProductSummary>,
    material_edges: HashMap<Uuid, Vec<MaterialIdAndQuantity>>,
    sub_product_edges: HashMap<Uuid, Vec<ProductIdAndQuantity>>,
}

struct SupplierRecord {
    summary: SupplierSummary,
    deleted: bool,
}

fn nutrition(material: &MaterialDetails) -> Nutrition {
    Nutrition {
        energy: material.energy,
        protein: material.protein,
        total_fat: material.total_fat,
        saturated_fat: material.saturated_fat,
        trans_fat: material.trans_fat,
        cholesterol: material.cholesterol,
        carbohydrate: material.carbohydrate,
        sugars: material.sugars,
        dietary_fibre: material.dietary_fibre,
        sodium: material.sodium,
    }
}

impl MaterialLookup for MemoryCatalog {
    async fn find_material(&self, id: Uuid) -> Result<Option<MaterialDetails>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .materials
            .iter()
            .find(|material| material.summary.id == id)
            .cloned())
    }
}

impl CompositionSource for MemoryCatalog {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<ResolvedProduct>, composition::Error> {
        let state = self.state.lock().unwrap();
        let Some(product) = state.products.iter().find(|product| product.id == id) else {
            return Ok(None);
        };

        let materials = state
            .material_edges
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|edge| {
                state
                    .materials
                    .iter()
                    .find(|material| material.summary.id == edge.material_id)
                    .map(|material| MaterialEdge {
                        material_id: edge.material_id,
                        nutrition: nutrition(material),
                        quantity: edge.quantity,
                    })
            })
            .collect();

        let sub_products = state
            .sub_product_edges
            .get(&id)
            .into_iter()
            .flatten()
            .map(|edge| SubProductEdge {
                child_id: edge.product_id,
                quantity: edge.quantity,
            })
            .collect();

        Ok(Some(ResolvedProduct {
            id: product.id,
            name: product.name.clone(),
            serving_size: product.serving_size,
            serving_unit: product.serving_unit,
            serving_per_package: product.serving_per_package,
            materials,
            sub_products,
        }))
    }
}

impl CatalogStore for MemoryCatalog {
    async fn find_product(&self, id: Uuid) -> Result<Option<ProductDetails>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .find(|product| product.id == id)
            .map(|product| ProductDetails {
                summary: product.clone(),
                material_id_and_quantity: state
                    .material_edges
                    .get(&id)
                    .cloned()
                    .unwrap_or_default(),
                sub_product_id_and_quantity: state
                    .sub_product_edges
                    .get(&id)
                    .cloned()
                    .unwrap_or_default(),
            }))
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<ProductSummary>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .find(|product| product.name == name)
            .cloned())
    }

    async fn find_products_referencing(
        &self,
        child_id: Uuid,
    ) -> Result<Vec<ProductSummary>, Error> {
        let state = self.state.lock().unwrap();
        let parents: Vec<Uuid> = state
            .sub_product_edges
            .iter()
            .filter(|(_, edges)| edges.iter().any(|edge| edge.product_id == child_id))
            .map(|(parent, _)| *parent)
            .collect();

        Ok(state
            .products
            .iter()
            .filter(|product| parents.contains(&product.id))
            .cloned()
            .collect())
    }

    async fn list_products(&self) -> Result<Vec<ProductDetails>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .map(|product| ProductDetails {
                summary: product.clone(),
                material_id_and_quantity: state
                    .material_edges
                    .get(&product.id)
                    .cloned()
                    .unwrap_or_default(),
                sub_product_id_and_quantity: state
                    .sub_product_edges
                    .get(&product.id)
                    .cloned()
                    .unwrap_or_default(),
            })
            .collect())
    }

    async fn lock_product(&self, _id: Uuid) -> Result<(), Error> {
        // single-threaded tests, nothing to serialize against
        Ok(())
    }

    async fn insert_product(&self, fields: &ProductFields) -> Result<ProductSummary, Error> {
        let mut state = self.state.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let summary = ProductSummary {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            serving_size: fields.serving_size,
            serving_unit: fields.serving_unit,
            serving_per_package: fields.serving_per_package,
            created_at: now,
            updated_at: now,
        };
        state.products.push(summary.clone());
        Ok(summary)
    }

    async fn update_product(&self, id: Uuid, fields: &ProductFields) -> Result<ProductSummary, Error> {
        let mut state = self.state.lock().unwrap();
        let product = state
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or_else(|| Error::Database(anyhow!("update of unknown product {id}")))?;

        product.name = fields.name.clone();
        product.serving_size = fields.serving_size;
        product.serving_unit = fields.serving_unit;
        product.serving_per_package = fields.serving_per_package;
        product.updated_at = OffsetDateTime::now_utc();
        Ok(product.clone())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.products.retain(|product| product.id != id);
        state.material_edges.remove(&id);
        state.sub_product_edges.remove(&id);
        Ok(())
    }

    async fn save_material_edges(
        &self,
        product_id: Uuid,
        edges: &[MaterialIdAndQuantity],
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state
            .material_edges
            .entry(product_id)
            .or_default()
            .extend_from_slice(edges);
        Ok(())
    }

    async fn remove_material_edges(&self, product_id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.material_edges.remove(&product_id);
        Ok(())
    }

    async fn save_sub_product_edges(
        &self,
        product_id: Uuid,
        edges: &[ProductIdAndQuantity],
    ) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state
            .sub_product_edges
            .entry(product_id)
            .or_default()
            .extend_from_slice(edges);
        Ok(())
    }

    async fn remove_sub_product_edges(&self, product_id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.sub_product_edges.remove(&product_id);
        Ok(())
    }

    async fn find_material_by_name(&self, name: &str) -> Result<Option<MaterialSummary>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .materials
            .iter()
            .find(|material| material.summary.name == name)
            .map(|material| material.summary.clone()))
    }

    async fn list_materials(&self) -> Result<Vec<MaterialDetails>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state.materials.clone())
    }

    async fn insert_material(&self, fields: &MaterialFields) -> Result<MaterialDetails, Error> {
        let mut state = self.state.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let details = MaterialDetails {
            summary: MaterialSummary {
                id: Uuid::new_v4(),
                name: fields.name.clone(),
                supplier_id: fields.supplier_id,
                created_at: now,
                updated_at: now,
            },
            energy: fields.energy,
            protein: fields.protein,
            total_fat: fields.total_fat,
            saturated_fat: fields.saturated_fat,
            trans_fat: fields.trans_fat,
            cholesterol: fields.cholesterol,
            carbohydrate: fields.carbohydrate,
            sugars: fields.sugars,
            dietary_fibre: fields.dietary_fibre,
            sodium: fields.sodium,
        };
        state.materials.push(details.clone());
        Ok(details)
    }

    async fn update_material(&self, id: Uuid, fields: &MaterialFields) -> Result<MaterialDetails, Error> {
        let mut state = self.state.lock().unwrap();
        let material = state
            .materials
            .iter_mut()
            .find(|material| material.summary.id == id)
            .ok_or_else(|| Error::Database(anyhow!("update of unknown material {id}")))?;

        material.summary.name = fields.name.clone();
        material.summary.supplier_id = fields.supplier_id;
        material.summary.updated_at = OffsetDateTime::now_utc();
        material.energy = fields.energy;
        material.protein = fields.protein;
        material.total_fat = fields.total_fat;
        material.saturated_fat = fields.saturated_fat;
        material.trans_fat = fields.trans_fat;
        material.cholesterol = fields.cholesterol;
        material.carbohydrate = fields.carbohydrate;
        material.sugars = fields.sugars;
        material.dietary_fibre = fields.dietary_fibre;
        material.sodium = fields.sodium;
        Ok(material.clone())
    }

    async fn delete_material(&self, id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        state.materials.retain(|material| material.summary.id != id);
        Ok(())
    }

    async fn find_supplier(&self, id: Uuid) -> Result<Option<SupplierSummary>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .suppliers
            .iter()
            .find(|supplier| supplier.summary.id == id && !supplier.deleted)
            .map(|supplier| supplier.summary.clone()))
    }

    async fn find_supplier_by_name(&self, name: &str) -> Result<Option<SupplierSummary>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .suppliers
            .iter()
            .find(|supplier| supplier.summary.name == name && !supplier.deleted)
            .map(|supplier| supplier.summary.clone()))
    }

    async fn list_suppliers(&self) -> Result<Vec<SupplierSummary>, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .suppliers
            .iter()
            .filter(|supplier| !supplier.deleted)
            .map(|supplier| supplier.summary.clone())
            .collect())
    }

    async fn insert_supplier(&self, fields: &SupplierFields) -> Result<SupplierSummary, Error> {
        let mut state = self.state.lock().unwrap();
        let now = OffsetDateTime::now_utc();
        let summary = SupplierSummary {
            id: Uuid::new_v4(),
            name: fields.name.clone(),
            created_at: now,
            updated_at: now,
        };
        state.suppliers.push(SupplierRecord {
            summary: summary.clone(),
            deleted: false,
        });
        Ok(summary)
    }

    async fn update_supplier(&self, id: Uuid, fields: &SupplierFields) -> Result<SupplierSummary, Error> {
        let mut state = self.state.lock().unwrap();
        let supplier = state
            .suppliers
            .iter_mut()
            .find(|supplier| supplier.summary.id == id && !supplier.deleted)
            .ok_or_else(|| Error::Database(anyhow!("update of unknown supplier {id}")))?;

        supplier.summary.name = fields.name.clone();
        supplier.summary.updated_at = OffsetDateTime::now_utc();
        Ok(supplier.summary.clone())
    }

    async fn soft_delete_supplier(&self, id: Uuid) -> Result<(), Error> {
        let mut state = self.state.lock().unwrap();
        if let Some(supplier) = state
            .suppliers
            .iter_mut()
            .find(|supplier| supplier.summary.id == id)
        {
            supplier.deleted = true;
        }
        Ok(())
    }

    async fn count_materials_for_supplier(&self, supplier_id: Uuid) -> Result<u64, Error> {
        let state = self.state.lock().unwrap();
        Ok(state
            .materials
            .iter()
            .filter(|material| material.summary.supplier_id == supplier_id)
            .count() as u64)
    }
}
