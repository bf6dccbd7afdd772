
use crate::{
    material::model::{CreateMaterial, MaterialDetails, MaterialSummary, UpdateMaterial},
    store::{CatalogStore, MaterialFields},
    Error,
};
use rust_decimal::Decimal;
use tracing::instrument;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default)]
pub struct MaterialService;

impl MaterialService {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, store), err)]
    pub async fn create<S: CatalogStore>(
        &self,
        request: CreateMaterial,
        store: &S,
    ) -> Result<MaterialDetails, Error> {
        store
            .find_supplier(request.supplier_id)
            .await?
            .ok_or(Error::NotFound("Supplier"))?;

        self.ensure_name_available(&request.name, None, store)
            .await?;

        let fields = MaterialFields {
            name: request.name,
            supplier_id: request.supplier_id,
            energy: request.energy,
            protein: request.protein,
            total_fat: request.total_fat,
            saturated_fat: request.saturated_fat,
            trans_fat: request.trans_fat,
            cholesterol: request.cholesterol,
            carbohydrate: request.carbohydrate,
            sugars: request.sugars,
            dietary_fibre: request.dietary_fibre,
            sodium: request.sodium,
        };
        validate_profile(&fields)?;

        store.insert_material(&fields).await
    }

    pub async fn fetch<S: CatalogStore>(
        &self,
        id: Uuid,
        store: &S,
    ) -> Result<Option<MaterialDetails>, Error> {
        store.find_material(id).await
    }

    pub async fn fetch_by_name<S: CatalogStore>(
        &self,
        name: &str,
        store: &S,
    ) -> Result<Option<MaterialSummary>, Error> {
        store.find_material_by_name(name).await
    }

    pub async fn fetch_all<S: CatalogStore>(
        &self,
        store: &S,
    ) -> Result<Vec<MaterialDetails>, Error> {
        store.list_materials().await
    }

    #[instrument(skip(self, store), err)]
    pub async fn update<S: CatalogStore>(
        &self,
        id: Uuid,
        request: UpdateMaterial,
        store: &S,
    ) -> Result<MaterialDetails, Error> {
        let current = store
            .find_material(id)
            .await?
            .ok_or(Error::NotFound("Material"))?;

        if let Some(supplier_id) = request.supplier_id {
            store
                .find_supplier(supplier_id)
                .await?
                .ok_or(Error::NotFound("Supplier"))?;
        }

        if let Some(name) = &request.name {
            self.ensure_name_available(name, Some(id), store).await?;
        }

        let fields = MaterialFields {
            name: request.name.unwrap_or(current.summary.name),
            supplier_id: request.supplier_id.unwrap_or(current.summary.supplier_id),
            energy: request.energy.unwrap_or(current.energy),
            protein: request.protein.unwrap_or(current.protein),
            total_fat: request.total_fat.unwrap_or(current.total_fat),
            saturated_fat: request.saturated_fat.unwrap_or(current.saturated_fat),
            trans_fat: request.trans_fat.unwrap_or(current.trans_fat),
            cholesterol: request.cholesterol.unwrap_or(current.cholesterol),
            carbohydrate: request.carbohydrate.unwrap_or(current.carbohydrate),
            sugars: request.sugars.unwrap_or(current.sugars),
            dietary_fibre: request.dietary_fibre.unwrap_or(current.dietary_fibre),
            sodium: request.sodium.unwrap_or(current.sodium),
        };
        validate_profile(&fields)?;

        store.update_material(id, &fields).await
    }

    #[instrument(skip(self, store), err)]
    pub async fn delete<S: CatalogStore>(&self, id: Uuid, store: &S) -> Result<(), Error> {
        store
            .find_material(id)
            .await?
            .ok_or(Error::NotFound("Material"))?;

        store.delete_material(id).await
    }

    async fn ensure_name_available<S: CatalogStore>(
        &self,
        name: &str,
        exclude: Option<Uuid>,
        store: &S,
    ) -> Result<(), Error> {
        if let Some(existing) = store.find_material_by_name(name).await? {
            if Some(existing.id) != exclude {
                return Err(Error::NameConflict {
                    kind: "Material",
                    id: existing.id,
                });
            }
        }
        Ok(())
    }
}

fn validate_profile(fields: &MaterialFields) -> Result<(), Error> {
    let values = [
        fields.energy,
        fields.protein,
        fields.total_fat,
        fields.saturated_fat,
        fields.trans_fat,
        fields.cholesterol,
        fields.carbohydrate,
        fields.sugars,
        fields.dietary_fibre,
        fields.sodium,
    ];

    if values.iter().any(|value| *value < Decimal::ZERO) {
        return Err(Error::BadRequest {
            msg: "nutrition values must be non-negative".to_string(),
        });
    }

    Ok(())
}
