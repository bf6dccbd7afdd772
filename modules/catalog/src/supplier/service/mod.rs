
use crate::{
    store::{CatalogStore, SupplierFields},
    supplier::model::{CreateSupplier, SupplierSummary, UpdateSupplier},
    Error,
};
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default)]
pub struct SupplierService;

impl SupplierService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, store), err)]
    pub async fn create<S: CatalogStore>(
        &self,
        request: CreateSupplier,
        store: &S,
    ) -> Result<SupplierSummary, Error> {
        self.ensure_name_available(&request.name, None, store)
            .await?;

        store
            .insert_supplier(&SupplierFields { name: request.name })
            .await
    }

    pub async fn fetch<S: CatalogStore>(
        &self,
        id: Uuid,
        store: &S,
    ) -> Result<Option<SupplierSummary>, Error> {
        store.find_supplier(id).await
    }

    pub async fn fetch_by_name<S: CatalogStore>(
        &self,
        name: &str,
        store: &S,
    ) -> Result<Option<SupplierSummary>, Error> {
        store.find_supplier_by_name(name).await
    }

    pub async fn fetch_all<S: CatalogStore>(
        &self,
        store: &S,
    ) -> Result<Vec<SupplierSummary>, Error> {
        store.list_suppliers().await
    }

    #[instrument(skip(self, store), err)]
    pub async fn update<S: CatalogStore>(
        &self,
        id: Uuid,
        request: UpdateSupplier,
        store: &S,
    ) -> Result<SupplierSummary, Error> {
        let current = store
            .find_supplier(id)
            .await?
            .ok_or(Error::NotFound("Supplier"))?;

        if let Some(name) = &request.name {
            self.ensure_name_available(name, Some(id), store).await?;
        }

        store
            .update_supplier(
                id,
                &SupplierFields {
                    name: request.name.unwrap_or(current.name),
                },
            )
            .await
    }

    /// Delete a supplier, unless materials still reference it.
    #[instrument(skip(self, store), err)]
    pub async fn delete<S: CatalogStore>(&self, id: Uuid, store: &S) -> Result<(), Error> {
        store
            .find_supplier(id)
            .await?
            .ok_or(Error::NotFound("Supplier"))?;

        let count = store.count_materials_for_supplier(id).await?;
        if count > 0 {
            return Err(Error::DependencyConflict { count });
        }

        store.soft_delete_supplier(id).await
    }

    async fn ensure_name_available<S: CatalogStore>(
        &self,
        name: &str,
        exclude: Option<Uuid>,
        store: &S,
    ) -> Result<(), Error> {
        if let Some(existing) = store.find_supplier_by_name(name).await? {
            if Some(existing.id) != exclude {
                return Err(Error::NameConflict {
                    kind: "Supplier",
                    id: existing.id,
                });
            }
        }
        Ok(())
    }
}
