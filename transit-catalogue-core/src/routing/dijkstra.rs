//! Single-pair shortest path over the routing graph.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::{DiGraph, EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap). All edge
// weights are finite and non-negative, so total_cmp is a plain ordering.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other.cost.total_cmp(&self.cost)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Dijkstra's algorithm from `start` to `target`, tracking the predecessor
/// *edge* of every improved node. The routing graph carries parallel edges
/// between the same vertex pair (one per bus span), so node predecessors
/// alone could not reconstruct which edge a path actually took.
///
/// Returns the total weight and the edge sequence from `start` to `target`,
/// or `None` when `target` is unreachable. `start == target` is an empty
/// path of weight zero.
pub(crate) fn shortest_path(
    graph: &DiGraph<(), f64>,
    start: NodeIndex,
    target: NodeIndex,
) -> Option<(f64, Vec<EdgeIndex>)> {
    if start == target {
        return Some((0.0, Vec::new()));
    }

    let mut distances: HashMap<NodeIndex, f64> = HashMap::new();
    let mut predecessors: HashMap<NodeIndex, EdgeIndex> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == target {
            break;
        }

        // Stale heap entry, a better path was already settled
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for edge in graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + *edge.weight();

            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    predecessors.insert(next, edge.id());
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        predecessors.insert(next, edge.id());
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                    }
                }
            }
        }
    }

    let total = *distances.get(&target)?;

    // Walk predecessor edges backward from target to start
    let mut edges = Vec::new();
    let mut current = target;
    while current != start {
        let edge = *predecessors.get(&current)?;
        edges.push(edge);
        let (from, _) = graph.edge_endpoints(edge)?;
        current = from;
    }
    edges.reverse();

    Some((total, edges))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use petgraph::graph::{DiGraph, NodeIndex};

    use super::shortest_path;

    #[test]
    fn picks_the_cheaper_of_two_branches() {
        let mut graph = DiGraph::<(), f64>::new();
        let n: Vec<NodeIndex> = (0..4).map(|_| graph.add_node(())).collect();
        graph.add_edge(n[0], n[1], 1.0);
        graph.add_edge(n[1], n[3], 1.0);
        graph.add_edge(n[0], n[3], 5.0);
        graph.add_edge(n[0], n[2], 0.5);

        let (total, edges) = shortest_path(&graph, n[0], n[3]).unwrap();
        assert_relative_eq!(total, 2.0);
        assert_eq!(edges.len(), 2);
    }

    #[test]
    fn resolves_parallel_edges_to_the_lighter_one() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let heavy = graph.add_edge(a, b, 9.0);
        let light = graph.add_edge(a, b, 2.0);

        let (total, edges) = shortest_path(&graph, a, b).unwrap();
        assert_relative_eq!(total, 2.0);
        assert_eq!(edges, vec![light]);
        assert_ne!(edges, vec![heavy]);
    }

    #[test]
    fn unreachable_target_is_none() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 1.0);

        assert_eq!(shortest_path(&graph, a, c), None);
        // edges are directed
        assert_eq!(shortest_path(&graph, b, a), None);
    }

    #[test]
    fn same_node_is_an_empty_path() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        assert_eq!(shortest_path(&graph, a, a), Some((0.0, Vec::new())));
    }

    #[test]
    fn zero_weight_edges_are_traversed() {
        let mut graph = DiGraph::<(), f64>::new();
        let a = graph.add_node(());
        let b = graph.add_node(());
        let c = graph.add_node(());
        graph.add_edge(a, b, 0.0);
        graph.add_edge(b, c, 0.0);

        let (total, edges) = shortest_path(&graph, a, c).unwrap();
        assert_relative_eq!(total, 0.0);
        assert_eq!(edges.len(), 2);
    }
}
