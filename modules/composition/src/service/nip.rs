use super::{CompositionService, CompositionSource};
use crate::{
    model::{graph::Edge, Nutrition, NutritionPanel, ResolvedProduct},
    Error,
};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::pin::Pin;
use tracing::instrument;
use uuid::Uuid;

impl CompositionService {
    /// Compute the Nutrition Information Panel for a product.
    ///
    /// Per-serving totals are the product's own tagged materials plus every
    /// sub-product's aggregated totals, each weighted by its edge quantity
    /// and computed as if the sub-product were queried standalone. The
    /// per-hundred view divides by serving size and scales to 100.
    #[instrument(skip(self, source), err)]
    pub async fn nutrition_panel<S: CompositionSource>(
        &self,
        id: Uuid,
        source: &S,
    ) -> Result<NutritionPanel, Error> {
        let product = source.resolve_product(id).await?.ok_or(Error::NotFound)?;

        let mut state = Aggregation::default();
        let per_serving = aggregate(source, product.clone(), &mut state).await?;
        let per_hundred = per_serving.per_hundred(product.serving_size);

        Ok(NutritionPanel {
            name: product.name,
            serving_size: product.serving_size,
            serving_unit: product.serving_unit,
            serving_per_package: product.serving_per_package,
            per_serving: per_serving.render(),
            per_hundred: per_hundred.render(),
        })
    }
}

/// Per-request aggregation state: completed totals keyed by product id, plus
/// the ids on the current recursion path.
#[derive(Default)]
struct Aggregation {
    cache: HashMap<Uuid, Nutrition>,
    trail: HashSet<Uuid>,
}

/// Sum a product's composition tree bottom-up.
///
/// A product appearing under several parents is aggregated once and served
/// from the cache afterwards, keeping the walk linear in distinct nodes and
/// edges even for deeply shared (diamond) subtrees.
fn aggregate<'a, S: CompositionSource>(
    source: &'a S,
    product: ResolvedProduct,
    state: &'a mut Aggregation,
) -> Pin<Box<dyn Future<Output = Result<Nutrition, Error>> + 'a>> {
    Box::pin(async move {
        if let Some(memoized) = state.cache.get(&product.id) {
            return Ok(memoized.clone());
        }

        state.trail.insert(product.id);

        let mut total = Nutrition::default();
        for edge in &product.materials {
            total.add_scaled(&edge.nutrition, edge.quantity);
        }

        for edge in &product.sub_products {
            // persisted data is vetted acyclic, but never recurse into an
            // ancestor
            if state.trail.contains(&edge.child_id) {
                return Err(Error::Cyclic(vec![Edge {
                    from: product.id,
                    to: edge.child_id,
                }]));
            }

            let child = source
                .resolve_product(edge.child_id)
                .await?
                .ok_or(Error::NotFound)?;
            let child_total = aggregate(source, child, state).await?;
            total.add_scaled(&child_total, edge.quantity);
        }

        state.trail.remove(&product.id);
        state.cache.insert(product.id, total.clone());

        Ok(total)
    })
}
