
use crate::{
    product::model::{
        CreateProduct, MaterialIdAndQuantity, ProductDetails, ProductIdAndQuantity,
        ProductSummary, UpdateProduct,
    },
    store::{CatalogStore, ProductFields},
    Error,
};
use futures::{future::try_join_all, try_join};
use nutrify_module_composition::{model::NutritionPanel, service::CompositionService};
use rust_decimal::Decimal;
use std::collections::HashSet;
use tracing::instrument;
use uuid::Uuid;

/// Orchestrates product mutations so nothing is persisted past a missing
/// reference, a name collision, a duplicate tag, or a cycle.
///
/// The check sequence is strict: name → references → cycles → commit. Run
/// against a store scoped to one transaction, the whole pass is atomic and
/// the per-product lock keeps concurrent edge writes from racing the cycle
/// check.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProductService;

impl ProductService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, store), err)]
    pub async fn create<S: CatalogStore>(
        &self,
        request: CreateProduct,
        store: &S,
    ) -> Result<ProductDetails, Error> {
        validate_serving(request.serving_size, request.serving_per_package)?;
        self.ensure_name_available(&request.name, None, store)
            .await?;

        let materials = request.material_id_and_quantity.unwrap_or_default();
        let sub_products = request.sub_product_id_and_quantity.unwrap_or_default();
        validate_quantities(&materials, &sub_products)?;
        reject_duplicates(&materials, &sub_products)?;
        resolve_references(&materials, &sub_products, store).await?;

        // a product that does not exist yet cannot be anyone's descendant,
        // so its proposed children cannot close a cycle

        let summary = store
            .insert_product(&ProductFields {
                name: request.name,
                serving_size: request.serving_size,
                serving_unit: request.serving_unit,
                serving_per_package: request.serving_per_package,
            })
            .await?;

        store.save_material_edges(summary.id, &materials).await?;
        store
            .save_sub_product_edges(summary.id, &sub_products)
            .await?;

        Ok(ProductDetails {
            summary,
            material_id_and_quantity: materials,
            sub_product_id_and_quantity: sub_products,
        })
    }

    pub async fn fetch<S: CatalogStore>(
        &self,
        id: Uuid,
        store: &S,
    ) -> Result<Option<ProductDetails>, Error> {
        store.find_product(id).await
    }

    pub async fn fetch_by_name<S: CatalogStore>(
        &self,
        name: &str,
        store: &S,
    ) -> Result<Option<ProductSummary>, Error> {
        store.find_product_by_name(name).await
    }

    pub async fn fetch_all<S: CatalogStore>(&self, store: &S) -> Result<Vec<ProductDetails>, Error> {
        store.list_products().await
    }

    #[instrument(skip(self, store), err)]
    pub async fn update<S: CatalogStore>(
        &self,
        id: Uuid,
        request: UpdateProduct,
        store: &S,
    ) -> Result<ProductDetails, Error> {
        store.lock_product(id).await?;
        let current = store
            .find_product(id)
            .await?
            .ok_or(Error::NotFound("Product"))?;

        if let Some(name) = &request.name {
            self.ensure_name_available(name, Some(id), store).await?;
        }
        validate_serving(
            request.serving_size.unwrap_or(current.summary.serving_size),
            request
                .serving_per_package
                .unwrap_or(current.summary.serving_per_package),
        )?;

        let materials = request.material_id_and_quantity;
        let sub_products = request.sub_product_id_and_quantity;
        validate_quantities(
            materials.as_deref().unwrap_or_default(),
            sub_products.as_deref().unwrap_or_default(),
        )?;
        reject_duplicates(
            materials.as_deref().unwrap_or_default(),
            sub_products.as_deref().unwrap_or_default(),
        )?;
        resolve_references(
            materials.as_deref().unwrap_or_default(),
            sub_products.as_deref().unwrap_or_default(),
            store,
        )
        .await?;

        if let Some(sub_products) = &sub_products {
            let proposed: Vec<Uuid> = sub_products.iter().map(|edge| edge.product_id).collect();
            let cycles = CompositionService::new()
                .check_cycles(id, &proposed, store)
                .await?;
            if !cycles.is_empty() {
                return Err(Error::CyclicComposition { cycles });
            }
        }

        let summary = store
            .update_product(
                id,
                &ProductFields {
                    name: request.name.unwrap_or(current.summary.name),
                    serving_size: request.serving_size.unwrap_or(current.summary.serving_size),
                    serving_unit: request.serving_unit.unwrap_or(current.summary.serving_unit),
                    serving_per_package: request
                        .serving_per_package
                        .unwrap_or(current.summary.serving_per_package),
                },
            )
            .await?;

        // only keys present in the payload replace their edge set
        let material_id_and_quantity = match materials {
            Some(edges) => {
                store.remove_material_edges(id).await?;
                store.save_material_edges(id, &edges).await?;
                edges
            }
            None => current.material_id_and_quantity,
        };

        let sub_product_id_and_quantity = match sub_products {
            Some(edges) => {
                store.remove_sub_product_edges(id).await?;
                store.save_sub_product_edges(id, &edges).await?;
                edges
            }
            None => current.sub_product_id_and_quantity,
        };

        Ok(ProductDetails {
            summary,
            material_id_and_quantity,
            sub_product_id_and_quantity,
        })
    }

    /// Delete a product, unless other products still reference it as a
    /// child.
    #[instrument(skip(self, store), err)]
    pub async fn delete<S: CatalogStore>(&self, id: Uuid, store: &S) -> Result<(), Error> {
        store.lock_product(id).await?;
        store
            .find_product(id)
            .await?
            .ok_or(Error::NotFound("Product"))?;

        let parents = store.find_products_referencing(id).await?;
        if !parents.is_empty() {
            return Err(Error::HasParentReference {
                ids: parents.into_iter().map(|parent| parent.id).collect(),
            });
        }

        store.delete_product(id).await
    }

    /// The computed Nutrition Information Panel for a product.
    #[instrument(skip(self, store), err)]
    pub async fn nutrition_panel<S: CatalogStore>(
        &self,
        id: Uuid,
        store: &S,
    ) -> Result<NutritionPanel, Error> {
        Ok(CompositionService::new().nutrition_panel(id, store).await?)
    }

    async fn ensure_name_available<S: CatalogStore>(
        &self,
        name: &str,
        exclude: Option<Uuid>,
        store: &S,
    ) -> Result<(), Error> {
        if let Some(existing) = store.find_product_by_name(name).await? {
            if Some(existing.id) != exclude {
                return Err(Error::NameConflict {
                    kind: "Product",
                    id: existing.id,
                });
            }
        }
        Ok(())
    }
}

/// Resolve every referenced id, materials and sub-products concurrently.
/// Results mirror input order, so a missing entry maps back to the id the
/// caller sent.
async fn resolve_references<S: CatalogStore>(
    materials: &[MaterialIdAndQuantity],
    sub_products: &[ProductIdAndQuantity],
    store: &S,
) -> Result<(), Error> {
    let resolved_materials = try_join_all(
        materials
            .iter()
            .map(|edge| store.find_material(edge.material_id)),
    );
    let resolved_products = try_join_all(
        sub_products
            .iter()
            .map(|edge| store.find_product(edge.product_id)),
    );
    let (resolved_materials, resolved_products) = try_join!(resolved_materials, resolved_products)?;

    let missing_materials: Vec<Uuid> = resolved_materials
        .iter()
        .zip(materials)
        .filter(|(found, _)| found.is_none())
        .map(|(_, edge)| edge.material_id)
        .collect();
    let missing_products: Vec<Uuid> = resolved_products
        .iter()
        .zip(sub_products)
        .filter(|(found, _)| found.is_none())
        .map(|(_, edge)| edge.product_id)
        .collect();

    if !missing_materials.is_empty() || !missing_products.is_empty() {
        return Err(Error::MissingReference {
            materials: missing_materials,
            products: missing_products,
        });
    }

    Ok(())
}

fn validate_serving(serving_size: Decimal, serving_per_package: i32) -> Result<(), Error> {
    if serving_size <= Decimal::ZERO {
        return Err(Error::BadRequest {
            msg: "serving_size must be positive".to_string(),
        });
    }
    if serving_per_package <= 0 {
        return Err(Error::BadRequest {
            msg: "serving_per_package must be positive".to_string(),
        });
    }
    Ok(())
}

fn validate_quantities(
    materials: &[MaterialIdAndQuantity],
    sub_products: &[ProductIdAndQuantity],
) -> Result<(), Error> {
    let negative = materials.iter().any(|edge| edge.quantity < Decimal::ZERO)
        || sub_products.iter().any(|edge| edge.quantity < Decimal::ZERO);

    if negative {
        return Err(Error::BadRequest {
            msg: "composition quantities must be non-negative".to_string(),
        });
    }

    Ok(())
}

/// Tagging the same material or sub-product twice in one payload is a
/// conflict, not a merge.
fn reject_duplicates(
    materials: &[MaterialIdAndQuantity],
    sub_products: &[ProductIdAndQuantity],
) -> Result<(), Error> {
    let mut seen = HashSet::new();
    let duplicate_materials: Vec<Uuid> = materials
        .iter()
        .filter(|edge| !seen.insert(edge.material_id))
        .map(|edge| edge.material_id)
        .collect();

    let mut seen = HashSet::new();
    let duplicate_products: Vec<Uuid> = sub_products
        .iter()
        .filter(|edge| !seen.insert(edge.product_id))
        .map(|edge| edge.product_id)
        .collect();

    if !duplicate_materials.is_empty() || !duplicate_products.is_empty() {
        return Err(Error::DuplicateComposition {
            materials: duplicate_materials,
            products: duplicate_products,
        });
    }

    Ok(())
}
