mod cycle;
mod nip;

#[cfg(test)]
mod test;

use crate::{model::ResolvedProduct, Error};
use std::future::Future;
use uuid::Uuid;

/// Read contract the composition engine runs against.
///
/// Implementations resolve a product with its composition edges: materials
/// carrying full nutrition profiles, children carrying quantities. The
/// engine never reads anything else.
pub trait CompositionSource {
    fn resolve_product(
        &self,
        id: Uuid,
    ) -> impl Future<Output = Result<Option<ResolvedProduct>, Error>>;
}

/// The composition graph engine: cycle vetting for proposed sub-product
/// edges and nutrition panel aggregation over the composition DAG.
#[derive(Clone, Copy, Debug, Default)]
pub struct CompositionService;

impl CompositionService {
    pub fn new() -> Self {
        Self
    }
}
