use super::{CompositionService, CompositionSource};
use crate::{
    model::graph::{DirectedGraph, Edge},
    Error,
};
use std::collections::{HashSet, VecDeque};
use tracing::instrument;
use uuid::Uuid;

impl CompositionService {
    /// Determine whether replacing `target`'s sub-product set with
    /// `proposed` introduces a cycle anywhere in the composition DAG.
    ///
    /// Returns every violating `(from, to)` edge; an empty list clears the
    /// mutation. The graph is built from the proposed edges for `target`
    /// and the existing edges of everything reachable from them. Nodes are
    /// expanded at most once, so products referenced from multiple parents
    /// contribute their subgraph a single time.
    #[instrument(skip(self, source))]
    pub async fn check_cycles<S: CompositionSource>(
        &self,
        target: Uuid,
        proposed: &[Uuid],
        source: &S,
    ) -> Result<Vec<Edge<Uuid>>, Error> {
        // a product listing itself needs no traversal at all
        if proposed.contains(&target) {
            return Ok(vec![Edge {
                from: target,
                to: target,
            }]);
        }

        let mut graph = DirectedGraph::new();
        for &child in proposed {
            graph.add_edge(target, child);
        }

        // `target` itself must not be expanded: its stored edges are the
        // ones being replaced
        let mut expanded = HashSet::from([target]);
        let mut queue: VecDeque<Uuid> = proposed.iter().copied().collect();

        while let Some(id) = queue.pop_front() {
            if !expanded.insert(id) {
                continue;
            }

            let Some(product) = source.resolve_product(id).await? else {
                // dangling reference, checked elsewhere
                continue;
            };

            let mut subgraph = DirectedGraph::new();
            for edge in &product.sub_products {
                subgraph.add_edge(id, edge.child_id);
                queue.push_back(edge.child_id);
            }

            graph = graph.merge(&subgraph);
        }

        let cycles = graph.get_cycles();
        if !cycles.is_empty() {
            log::debug!("proposed edges for {target} close a cycle: {cycles:?}");
        }

        Ok(cycles)
    }
}
