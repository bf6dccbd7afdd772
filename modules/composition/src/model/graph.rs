use petgraph::graphmap::{DiGraphMap, NodeTrait};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// A directed edge between two keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Edge<N> {
    pub from: N,
    pub to: N,
}

impl<N: fmt::Display> fmt::Display for Edge<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(From: {}, To: {})", self.from, self.to)
    }
}

/// A directed graph over an arbitrary comparable key type.
///
/// Parallel edges collapse into one; self loops are valid edges.
#[derive(Clone, Debug, Default)]
pub struct DirectedGraph<N: NodeTrait> {
    edges: DiGraphMap<N, ()>,
}

impl<N: NodeTrait> DirectedGraph<N> {
    pub fn new() -> Self {
        Self {
            edges: DiGraphMap::new(),
        }
    }

    /// Append `to` to the out-set of `from`. Idempotent.
    pub fn add_edge(&mut self, from: N, to: N) -> &mut Self {
        self.edges.add_edge(from, to, ());
        self
    }

    /// Union with `other`, per-key out-sets combined.
    ///
    /// Consumes `self`, so no graph shared with another owner is ever
    /// mutated; `other` is left untouched.
    pub fn merge(mut self, other: &Self) -> Self {
        for (from, to, _) in other.edges.all_edges() {
            self.edges.add_edge(from, to, ());
        }
        for node in other.edges.nodes() {
            self.edges.add_node(node);
        }
        self
    }

    pub fn node_count(&self) -> usize {
        self.edges.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.edge_count()
    }

    /// Find back edges via depth-first traversal from every undiscovered
    /// node.
    ///
    /// A node keeps a `discovered` mark while it is on the current traversal
    /// path and a `finished` mark once fully explored. Reaching a discovered
    /// neighbor records one back edge for the current node and stops
    /// exploring its remaining neighbors. A self loop `(u, u)` is a
    /// one-element cycle.
    ///
    /// The traversal is iterative, so a node with thousands of out-edges
    /// cannot overflow the stack, and each node and edge is handled once.
    pub fn get_cycles(&self) -> Vec<Edge<N>> {
        let mut discovered = HashSet::new();
        let mut finished = HashSet::new();
        let mut cycles = Vec::new();

        for start in self.edges.nodes() {
            if discovered.contains(&start) || finished.contains(&start) {
                continue;
            }

            discovered.insert(start);
            let mut stack = vec![(start, self.out_edges(start), 0usize)];

            while let Some(top) = stack.len().checked_sub(1) {
                let node = stack[top].0;
                let cursor = stack[top].2;
                if cursor < stack[top].1.len() {
                    let next = stack[top].1[cursor];
                    stack[top].2 += 1;
                    if discovered.contains(&next) {
                        cycles.push(Edge {
                            from: node,
                            to: next,
                        });
                        // first back edge only, skip the rest of this
                        // node's neighbors
                        stack[top].2 = stack[top].1.len();
                    } else if !finished.contains(&next) {
                        discovered.insert(next);
                        stack.push((next, self.out_edges(next), 0));
                    }
                } else {
                    discovered.remove(&node);
                    finished.insert(node);
                    stack.pop();
                }
            }
        }

        cycles
    }

    fn out_edges(&self, node: N) -> Vec<N> {
        self.edges.neighbors(node).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detects_no_cycles() {
        let mut graph = DirectedGraph::new();
        graph.add_edge(1, 2).add_edge(1, 3);

        assert_eq!(graph.get_cycles(), vec![]);
    }

    #[test]
    fn detects_a_self_cycle() {
        let mut graph = DirectedGraph::new();
        graph.add_edge(1, 1);

        assert_eq!(graph.get_cycles(), vec![Edge { from: 1, to: 1 }]);
    }

    #[test]
    fn detects_a_trivial_cycle() {
        let mut graph = DirectedGraph::new();
        graph.add_edge(1, 2).add_edge(2, 3).add_edge(3, 1);

        assert_eq!(graph.get_cycles(), vec![Edge { from: 3, to: 1 }]);
    }

    #[test]
    fn detects_no_cycle_in_a_diamond() {
        let mut graph = DirectedGraph::new();
        graph
            .add_edge(1, 2)
            .add_edge(1, 3)
            .add_edge(2, 4)
            .add_edge(3, 4);

        assert_eq!(graph.get_cycles(), vec![]);
    }

    #[test]
    fn detects_a_non_trivial_cycle() {
        let mut graph = DirectedGraph::new();
        graph
            .add_edge(1, 2)
            .add_edge(2, 3)
            .add_edge(3, 4)
            .add_edge(4, 1);

        assert_eq!(graph.get_cycles(), vec![Edge { from: 4, to: 1 }]);
    }

    #[test]
    fn detects_a_cycle_from_a_wide_base() {
        let mut graph = DirectedGraph::new();

        // very wide base here
        for child in 2..10_000 {
            graph.add_edge(1, child);
        }
        graph.add_edge(2, -11);
        graph.add_edge(2, -12);
        graph.add_edge(2, -13);
        graph.add_edge(-13, 1);

        assert_eq!(graph.get_cycles(), vec![Edge { from: -13, to: 1 }]);
    }

    #[test]
    fn parallel_edges_collapse() {
        let mut graph = DirectedGraph::new();
        graph.add_edge(1, 2).add_edge(1, 2);

        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn merge_unions_distinct_keys() {
        let mut left = DirectedGraph::new();
        left.add_edge(1, 2);
        let mut right = DirectedGraph::new();
        right.add_edge(2, 3);

        let merged = left.merge(&right);
        assert_eq!(merged.edge_count(), 2);
        assert_eq!(merged.get_cycles(), vec![]);
    }

    #[test]
    fn merge_unions_colliding_keys() {
        let mut left = DirectedGraph::new();
        left.add_edge(1, 2);
        let mut right = DirectedGraph::new();
        right.add_edge(1, 3);

        let merged = left.merge(&right);
        assert_eq!(merged.node_count(), 3);
        assert_eq!(merged.edge_count(), 2);
    }

    #[test]
    fn merge_leaves_the_other_operand_untouched() {
        let mut left = DirectedGraph::new();
        left.add_edge(1, 2);
        let mut right = DirectedGraph::new();
        right.add_edge(3, 4);

        let merged = left.merge(&right);
        assert_eq!(merged.edge_count(), 2);
        assert_eq!(right.edge_count(), 1);
        assert_eq!(right.node_count(), 2);
    }
}
