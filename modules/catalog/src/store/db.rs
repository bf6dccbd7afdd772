use super::{CatalogStore, MaterialFields, MaterialLookup, ProductFields, SupplierFields};
use crate::{
    material::model::{MaterialDetails, MaterialSummary},
    product::model::{MaterialIdAndQuantity, ProductDetails, ProductIdAndQuantity, ProductSummary},
    supplier::model::SupplierSummary,
    Error,
};
use nutrify_entity::{material, material_composition, product, product_composition, supplier};
use nutrify_module_composition as composition;
use nutrify_module_composition::{
    model::{MaterialEdge, Nutrition, ResolvedProduct, SubProductEdge},
    service::CompositionSource,
};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set, Unchanged},
    ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter, QuerySelect,
};
use std::collections::HashMap;
use time::OffsetDateTime;
use uuid::Uuid;

/// The sea-orm implementation of the catalog contracts.
///
/// Construct it over a [`sea_orm::DatabaseTransaction`] to make a whole
/// guard pass (checks, lock, and edge writes) one atomic unit.
#[derive(Clone, Copy, Debug)]
pub struct DatabaseCatalog<'db, C: ConnectionTrait> {
    connection: &'db C,
}

impl<'db, C: ConnectionTrait> DatabaseCatalog<'db, C> {
    pub fn new(connection: &'db C) -> Self {
        Self { connection }
    }

    async fn material_edges(&self, product_id: Uuid) -> Result<Vec<MaterialIdAndQuantity>, Error> {
        Ok(material_composition::Entity::find()
            .filter(material_composition::Column::ProductId.eq(product_id))
            .all(self.connection)
            .await?
            .into_iter()
            .map(|edge| MaterialIdAndQuantity {
                material_id: edge.material_id,
                quantity: edge.quantity,
            })
            .collect())
    }

    async fn sub_product_edges(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductIdAndQuantity>, Error> {
        Ok(product_composition::Entity::find()
            .filter(product_composition::Column::ParentId.eq(product_id))
            .all(self.connection)
            .await?
            .into_iter()
            .map(|edge| ProductIdAndQuantity {
                product_id: edge.child_id,
                quantity: edge.quantity,
            })
            .collect())
    }
}

impl<C: ConnectionTrait> MaterialLookup for DatabaseCatalog<'_, C> {
    async fn find_material(&self, id: Uuid) -> Result<Option<MaterialDetails>, Error> {
        Ok(material::Entity::find_by_id(id)
            .one(self.connection)
            .await?
            .map(MaterialDetails::from))
    }
}

impl<C: ConnectionTrait> CompositionSource for DatabaseCatalog<'_, C> {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<ResolvedProduct>, composition::Error> {
        let Some(row) = product::Entity::find_by_id(id).one(self.connection).await? else {
            return Ok(None);
        };

        let materials = material_composition::Entity::find()
            .filter(material_composition::Column::ProductId.eq(id))
            .find_also_related(material::Entity)
            .all(self.connection)
            .await?
            .into_iter()
            .filter_map(|(edge, material)| {
                material.map(|material| MaterialEdge {
                    material_id: edge.material_id,
                    nutrition: Nutrition::from(&material),
                    quantity: edge.quantity,
                })
            })
            .collect();

        let sub_products = product_composition::Entity::find()
            .filter(product_composition::Column::ParentId.eq(id))
            .all(self.connection)
            .await?
            .into_iter()
            .map(|edge| SubProductEdge {
                child_id: edge.child_id,
                quantity: edge.quantity,
            })
            .collect();

        Ok(Some(ResolvedProduct {
            id: row.id,
            name: row.name,
            serving_size: row.serving_size,
            serving_unit: row.serving_unit,
            serving_per_package: row.serving_per_package,
            materials,
            sub_products,
        }))
    }
}

impl<C: ConnectionTrait> CatalogStore for DatabaseCatalog<'_, C> {
    async fn find_product(&self, id: Uuid) -> Result<Option<ProductDetails>, Error> {
        let Some(row) = product::Entity::find_by_id(id).one(self.connection).await? else {
            return Ok(None);
        };

        Ok(Some(ProductDetails {
            summary: row.into(),
            material_id_and_quantity: self.material_edges(id).await?,
            sub_product_id_and_quantity: self.sub_product_edges(id).await?,
        }))
    }

    async fn find_product_by_name(&self, name: &str) -> Result<Option<ProductSummary>, Error> {
        Ok(product::Entity::find()
            .filter(product::Column::Name.eq(name))
            .one(self.connection)
            .await?
            .map(ProductSummary::from))
    }

    async fn find_products_referencing(
        &self,
        child_id: Uuid,
    ) -> Result<Vec<ProductSummary>, Error> {
        let parent_ids: Vec<Uuid> = product_composition::Entity::find()
            .filter(product_composition::Column::ChildId.eq(child_id))
            .all(self.connection)
            .await?
            .into_iter()
            .map(|edge| edge.parent_id)
            .collect();

        if parent_ids.is_empty() {
            return Ok(vec![]);
        }

        Ok(product::Entity::find()
            .filter(product::Column::Id.is_in(parent_ids))
            .all(self.connection)
            .await?
            .into_iter()
            .map(ProductSummary::from)
            .collect())
    }

    async fn list_products(&self) -> Result<Vec<ProductDetails>, Error> {
        let rows = product::Entity::find().all(self.connection).await?;

        let mut material_edges: HashMap<Uuid, Vec<MaterialIdAndQuantity>> = HashMap::new();
        for edge in material_composition::Entity::find()
            .all(self.connection)
            .await?
        {
            material_edges
                .entry(edge.product_id)
                .or_default()
                .push(MaterialIdAndQuantity {
                    material_id: edge.material_id,
                    quantity: edge.quantity,
                });
        }

        let mut sub_product_edges: HashMap<Uuid, Vec<ProductIdAndQuantity>> = HashMap::new();
        for edge in product_composition::Entity::find()
            .all(self.connection)
            .await?
        {
            sub_product_edges
                .entry(edge.parent_id)
                .or_default()
                .push(ProductIdAndQuantity {
                    product_id: edge.child_id,
                    quantity: edge.quantity,
                });
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.id;
                ProductDetails {
                    summary: row.into(),
                    material_id_and_quantity: material_edges.remove(&id).unwrap_or_default(),
                    sub_product_id_and_quantity: sub_product_edges.remove(&id).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn lock_product(&self, id: Uuid) -> Result<(), Error> {
        product::Entity::find_by_id(id)
            .lock_exclusive()
            .one(self.connection)
            .await?;
        Ok(())
    }

    async fn insert_product(&self, fields: &ProductFields) -> Result<ProductSummary, Error> {
        let row = product::ActiveModel {
            id: NotSet,
            name: Set(fields.name.clone()),
            serving_size: Set(fields.serving_size),
            serving_unit: Set(fields.serving_unit),
            serving_per_package: Set(fields.serving_per_package),
            ..Default::default()
        }
        .insert(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn update_product(&self, id: Uuid, fields: &ProductFields) -> Result<ProductSummary, Error> {
        let row = product::ActiveModel {
            id: Unchanged(id),
            name: Set(fields.name.clone()),
            serving_size: Set(fields.serving_size),
            serving_unit: Set(fields.serving_unit),
            serving_per_package: Set(fields.serving_per_package),
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .update(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn delete_product(&self, id: Uuid) -> Result<(), Error> {
        product::Entity::delete_by_id(id)
            .exec(self.connection)
            .await?;
        Ok(())
    }

    async fn save_material_edges(
        &self,
        product_id: Uuid,
        edges: &[MaterialIdAndQuantity],
    ) -> Result<(), Error> {
        if edges.is_empty() {
            return Ok(());
        }

        material_composition::Entity::insert_many(edges.iter().map(|edge| {
            material_composition::ActiveModel {
                product_id: Set(product_id),
                material_id: Set(edge.material_id),
                quantity: Set(edge.quantity),
            }
        }))
        .exec(self.connection)
        .await?;

        Ok(())
    }

    async fn remove_material_edges(&self, product_id: Uuid) -> Result<(), Error> {
        material_composition::Entity::delete_many()
            .filter(material_composition::Column::ProductId.eq(product_id))
            .exec(self.connection)
            .await?;
        Ok(())
    }

    async fn save_sub_product_edges(
        &self,
        product_id: Uuid,
        edges: &[ProductIdAndQuantity],
    ) -> Result<(), Error> {
        if edges.is_empty() {
            return Ok(());
        }

        product_composition::Entity::insert_many(edges.iter().map(|edge| {
            product_composition::ActiveModel {
                parent_id: Set(product_id),
                child_id: Set(edge.product_id),
                quantity: Set(edge.quantity),
            }
        }))
        .exec(self.connection)
        .await?;

        Ok(())
    }

    async fn remove_sub_product_edges(&self, product_id: Uuid) -> Result<(), Error> {
        product_composition::Entity::delete_many()
            .filter(product_composition::Column::ParentId.eq(product_id))
            .exec(self.connection)
            .await?;
        Ok(())
    }

    async fn find_material_by_name(&self, name: &str) -> Result<Option<MaterialSummary>, Error> {
        Ok(material::Entity::find()
            .filter(material::Column::Name.eq(name))
            .one(self.connection)
            .await?
            .map(MaterialSummary::from))
    }

    async fn list_materials(&self) -> Result<Vec<MaterialDetails>, Error> {
        Ok(material::Entity::find()
            .all(self.connection)
            .await?
            .into_iter()
            .map(MaterialDetails::from)
            .collect())
    }

    async fn insert_material(&self, fields: &MaterialFields) -> Result<MaterialDetails, Error> {
        let row = material::ActiveModel {
            id: NotSet,
            name: Set(fields.name.clone()),
            supplier_id: Set(fields.supplier_id),
            energy: Set(fields.energy),
            protein: Set(fields.protein),
            total_fat: Set(fields.total_fat),
            saturated_fat: Set(fields.saturated_fat),
            trans_fat: Set(fields.trans_fat),
            cholesterol: Set(fields.cholesterol),
            carbohydrate: Set(fields.carbohydrate),
            sugars: Set(fields.sugars),
            dietary_fibre: Set(fields.dietary_fibre),
            sodium: Set(fields.sodium),
            ..Default::default()
        }
        .insert(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn update_material(&self, id: Uuid, fields: &MaterialFields) -> Result<MaterialDetails, Error> {
        let row = material::ActiveModel {
            id: Unchanged(id),
            name: Set(fields.name.clone()),
            supplier_id: Set(fields.supplier_id),
            energy: Set(fields.energy),
            protein: Set(fields.protein),
            total_fat: Set(fields.total_fat),
            saturated_fat: Set(fields.saturated_fat),
            trans_fat: Set(fields.trans_fat),
            cholesterol: Set(fields.cholesterol),
            carbohydrate: Set(fields.carbohydrate),
            sugars: Set(fields.sugars),
            dietary_fibre: Set(fields.dietary_fibre),
            sodium: Set(fields.sodium),
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .update(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn delete_material(&self, id: Uuid) -> Result<(), Error> {
        material::Entity::delete_by_id(id)
            .exec(self.connection)
            .await?;
        Ok(())
    }

    async fn find_supplier(&self, id: Uuid) -> Result<Option<SupplierSummary>, Error> {
        Ok(supplier::Entity::find_by_id(id)
            .filter(supplier::Column::DeletedAt.is_null())
            .one(self.connection)
            .await?
            .map(SupplierSummary::from))
    }

    async fn find_supplier_by_name(&self, name: &str) -> Result<Option<SupplierSummary>, Error> {
        Ok(supplier::Entity::find()
            .filter(supplier::Column::Name.eq(name))
            .filter(supplier::Column::DeletedAt.is_null())
            .one(self.connection)
            .await?
            .map(SupplierSummary::from))
    }

    async fn list_suppliers(&self) -> Result<Vec<SupplierSummary>, Error> {
        Ok(supplier::Entity::find()
            .filter(supplier::Column::DeletedAt.is_null())
            .all(self.connection)
            .await?
            .into_iter()
            .map(SupplierSummary::from)
            .collect())
    }

    async fn insert_supplier(&self, fields: &SupplierFields) -> Result<SupplierSummary, Error> {
        let row = supplier::ActiveModel {
            id: NotSet,
            name: Set(fields.name.clone()),
            ..Default::default()
        }
        .insert(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn update_supplier(&self, id: Uuid, fields: &SupplierFields) -> Result<SupplierSummary, Error> {
        let row = supplier::ActiveModel {
            id: Unchanged(id),
            name: Set(fields.name.clone()),
            updated_at: Set(OffsetDateTime::now_utc()),
            ..Default::default()
        }
        .update(self.connection)
        .await?;

        Ok(row.into())
    }

    async fn soft_delete_supplier(&self, id: Uuid) -> Result<(), Error> {
        supplier::ActiveModel {
            id: Unchanged(id),
            deleted_at: Set(Some(OffsetDateTime::now_utc())),
            ..Default::default()
        }
        .update(self.connection)
        .await?;
        Ok(())
    }

    async fn count_materials_for_supplier(&self, supplier_id: Uuid) -> Result<u64, Error> {
        Ok(material::Entity::find()
            .filter(material::Column::SupplierId.eq(supplier_id))
            .count(self.connection)
            .await?)
    }
}
