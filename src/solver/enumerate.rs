//! Common spanning tree enumeration.
//!
//! Finds every edge selection that is a spanning tree of the current graph
//! and of the voltage graph at once and contains every forced edge. The
//! search decides edges in index order, trying inclusion before exclusion:
//!
//! - Inclusion is allowed only when the edge closes no cycle in either graph.
//! - Exclusion deletes the edge, then requires both graphs to stay connected
//!   over the undeleted edges. Every bridge of the undeleted view must be in
//!   the tree, so bridges are included on the spot.
//!
//! A selection is complete when `|V| - 1` edges are in. Every change is
//! undone on the way back, so each common tree is reported exactly once.

use tracing::debug;

use super::traversal::{has_cycle, traverse};
use crate::circuit::{check_graph_pair, EdgeIndex, Graph};

/// Counters collected during one enumeration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    /// Common trees reported
    pub trees: u64,
    /// Cycle probes run
    pub probes: u64,
    /// Branches cut by the connectivity gate or a cyclic bridge
    pub pruned: u64,
}

/// Report every common spanning tree of `current` and `voltage` to `visit`.
///
/// `forced` marks edges every tree must contain. `visit` receives the tree
/// as an in-tree flag per edge. An inconsistent graph pair or a cyclic
/// forced set yields no trees.
pub fn enumerate_trees(
    current: &Graph,
    voltage: &Graph,
    forced: &[bool],
    visit: impl FnMut(&[bool]),
) -> EnumerationStats {
    if let Err(defect) = check_graph_pair(current, voltage, forced.len()) {
        debug!(%defect, "graph pair rejected, no trees");
        return EnumerationStats::default();
    }

    let mut search = Search {
        graphs: [current, voltage],
        in_tree: forced.to_vec(),
        deleted: vec![false; forced.len()],
        needed: 0,
        stats: EnumerationStats::default(),
        visit,
    };

    let forced_count = forced.iter().filter(|&&f| f).count();
    let Some(needed) = (current.vertex_count().saturating_sub(1)).checked_sub(forced_count) else {
        debug!(forced = forced_count, "more forced edges than tree edges, no trees");
        return search.stats;
    };
    search.needed = needed;

    if search.graphs.iter().any(|g| has_cycle(g, |e| forced[e.0])) {
        debug!("forced edges form a cycle, no trees");
        return search.stats;
    }

    match search.consequences() {
        Some(_) => search.descend(0),
        None => search.stats.pruned += 1,
    }

    debug!(
        trees = search.stats.trees,
        probes = search.stats.probes,
        pruned = search.stats.pruned,
        "enumeration finished"
    );
    search.stats
}

struct Search<'g, F> {
    graphs: [&'g Graph; 2],
    in_tree: Vec<bool>,
    deleted: Vec<bool>,
    /// Edges still missing from a complete tree
    needed: usize,
    stats: EnumerationStats,
    visit: F,
}

impl<F: FnMut(&[bool])> Search<'_, F> {
    fn descend(&mut self, next: usize) {
        if self.needed == 0 {
            self.stats.trees += 1;
            (self.visit)(&self.in_tree);
            return;
        }

        let Some(e) = (next..self.in_tree.len()).find(|&e| !self.in_tree[e] && !self.deleted[e]) else {
            self.stats.pruned += 1;
            return;
        };

        if self.can_include(e) {
            self.in_tree[e] = true;
            self.needed -= 1;
            self.descend(e + 1);
            self.in_tree[e] = false;
            self.needed += 1;
        }

        self.deleted[e] = true;
        match self.consequences() {
            Some(included) => {
                self.descend(e + 1);
                self.undo(&included);
            }
            None => self.stats.pruned += 1,
        }
        self.deleted[e] = false;
    }

    /// Whether adding `e` keeps the selection acyclic in both graphs.
    fn can_include(&mut self, e: usize) -> bool {
        self.stats.probes += 1;
        let in_tree = &self.in_tree;
        !self
            .graphs
            .iter()
            .any(|g| has_cycle(g, |f| f.0 == e || in_tree[f.0]))
    }

    /// Apply what the current deletions imply.
    ///
    /// Returns the edges it included, or `None` (with nothing changed) when
    /// the deletions leave no tree possible.
    fn consequences(&mut self) -> Option<Vec<usize>> {
        let mut bridges = Vec::new();
        for graph in self.graphs {
            let deleted = &self.deleted;
            let view = traverse(graph, |f| !deleted[f.0]);
            if !view.is_connected() {
                return None;
            }
            bridges.extend(view.bridges.iter().map(|b: &EdgeIndex| b.0));
        }
        bridges.sort_unstable();
        bridges.dedup();

        let mut included = Vec::new();
        for b in bridges {
            if self.in_tree[b] {
                continue;
            }
            if self.needed == 0 || !self.can_include(b) {
                self.undo(&included);
                return None;
            }
            self.in_tree[b] = true;
            self.needed -= 1;
            included.push(b);
        }
        Some(included)
    }

    fn undo(&mut self, included: &[usize]) {
        for &b in included {
            self.in_tree[b] = false;
            self.needed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::{Circuit, EdgeData, VertexId};

    /// A circuit from `(current, voltage)` endpoint pairs.
    fn dual(vertices: usize, edges: &[((usize, usize), (usize, usize))]) -> Circuit {
        let mut circuit = Circuit::new();
        for _ in 1..vertices {
            circuit.add_vertex();
        }
        for &((a, b), (c, d)) in edges {
            circuit.push_edge(
                EdgeData::unit(),
                (VertexId(a), VertexId(b)),
                (VertexId(c), VertexId(d)),
            );
        }
        circuit
    }

    fn collect(circuit: &Circuit, forced: &[bool]) -> (Vec<Vec<bool>>, EnumerationStats) {
        let mut trees = Vec::new();
        let stats = enumerate_trees(
            circuit.current_graph(),
            circuit.voltage_graph(),
            forced,
            |t| trees.push(t.to_vec()),
        );
        (trees, stats)
    }

    fn is_spanning_tree(graph: &Graph, tree: &[bool]) -> bool {
        let edges = tree.iter().filter(|&&t| t).count();
        let view = traverse(graph, |e| tree[e.0]);
        edges + 1 == graph.vertex_count() && view.is_connected() && !view.has_cycle
    }

    /// Every subset of the right size that spans both graphs.
    fn brute_force(circuit: &Circuit, forced: &[bool]) -> Vec<Vec<bool>> {
        let m = circuit.edge_count();
        let mut out = Vec::new();
        for mask in 0u32..(1 << m) {
            let tree: Vec<bool> = (0..m).map(|i| mask & (1 << i) != 0).collect();
            if forced.iter().zip(&tree).any(|(&f, &t)| f && !t) {
                continue;
            }
            if is_spanning_tree(circuit.current_graph(), &tree)
                && is_spanning_tree(circuit.voltage_graph(), &tree)
            {
                out.push(tree);
            }
        }
        out
    }

    fn assert_matches_brute_force(circuit: &Circuit, forced: &[bool]) {
        let (mut found, stats) = collect(circuit, forced);
        let mut expected = brute_force(circuit, forced);
        assert_eq!(stats.trees as usize, found.len());
        found.sort();
        expected.sort();
        let unique = {
            let mut u = found.clone();
            u.dedup();
            u.len()
        };
        assert_eq!(unique, found.len(), "duplicate trees reported");
        assert_eq!(found, expected);
    }

    #[test]
    fn test_triangle_has_three_trees() {
        let e = |a, b| ((a, b), (a, b));
        let circuit = dual(3, &[e(0, 1), e(1, 2), e(2, 0)]);
        let (trees, stats) = collect(&circuit, &[false; 3]);
        assert_eq!(trees.len(), 3);
        assert_eq!(stats.trees, 3);
        for tree in &trees {
            assert!(is_spanning_tree(circuit.current_graph(), tree));
        }
    }

    #[test]
    fn test_distinct_graphs_share_fewer_trees() {
        // current: triangle; voltage: two parallel edges plus a loop-free third
        let circuit = dual(
            3,
            &[((0, 1), (0, 1)), ((1, 2), (0, 1)), ((2, 0), (1, 2))],
        );
        assert_matches_brute_force(&circuit, &[false; 3]);
        let (trees, _) = collect(&circuit, &[false; 3]);
        assert_eq!(trees.len(), 2);
    }

    #[test]
    fn test_forced_edge_in_every_tree() {
        let e = |a, b| ((a, b), (a, b));
        let circuit = dual(4, &[e(0, 1), e(1, 2), e(2, 3), e(3, 0), e(0, 2)]);
        let forced = [false, false, false, false, true];
        let (trees, _) = collect(&circuit, &forced);
        assert!(!trees.is_empty());
        assert!(trees.iter().all(|t| t[4]));
        assert_matches_brute_force(&circuit, &forced);
    }

    #[test]
    fn test_forced_cycle_yields_nothing() {
        let e = |a, b| ((a, b), (a, b));
        let circuit = dual(2, &[e(0, 1), e(1, 0)]);
        let (trees, _) = collect(&circuit, &[true, true]);
        assert!(trees.is_empty());
    }

    #[test]
    fn test_precondition_mismatch_yields_nothing() {
        let e = |a, b| ((a, b), (a, b));
        let circuit = dual(2, &[e(0, 1)]);
        // forced vector of the wrong length
        let (trees, stats) = collect(&circuit, &[false, false]);
        assert!(trees.is_empty());
        assert_eq!(stats, EnumerationStats::default());

        let mut circuit = dual(2, &[e(0, 1)]);
        let (current, _) = circuit.graphs_mut();
        current.add_unpaired_vertex();
        let (trees, _) = collect(&circuit, &[false]);
        assert!(trees.is_empty());
    }

    #[test]
    fn test_disconnected_graph_yields_nothing() {
        let e = |a, b| ((a, b), (a, b));
        let circuit = dual(3, &[e(0, 1), e(0, 1)]);
        let (trees, stats) = collect(&circuit, &[false, false]);
        assert!(trees.is_empty());
        assert_eq!(stats.pruned, 1);
    }

    #[test]
    fn test_single_vertex_yields_empty_tree() {
        let circuit = Circuit::new();
        let (trees, _) = collect(&circuit, &[]);
        assert_eq!(trees, vec![Vec::<bool>::new()]);
    }

    #[test]
    fn test_fat_tree_is_not_cut_short() {
        // Many parallel edges and crossed voltage endpoints: a search that
        // stops once the remaining edge count equals the edges still needed
        // loses trees here. Forced edges shift the count further.
        let circuit = dual(
            5,
            &[
                ((0, 1), (0, 1)),
                ((0, 1), (1, 2)),
                ((1, 2), (0, 2)),
                ((1, 2), (2, 3)),
                ((2, 3), (0, 3)),
                ((2, 3), (3, 4)),
                ((3, 4), (0, 4)),
                ((3, 4), (1, 4)),
                ((4, 0), (2, 4)),
                ((0, 2), (0, 1)),
            ],
        );
        let mut forced = [false; 10];
        assert_matches_brute_force(&circuit, &forced);
        forced[9] = true;
        assert_matches_brute_force(&circuit, &forced);
        forced[3] = true;
        assert_matches_brute_force(&circuit, &forced);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn arb_dual() -> impl Strategy<Value = (usize, Vec<((usize, usize), (usize, usize))>, Vec<bool>)> {
            (2usize..=5).prop_flat_map(|n| {
                let end = (0..n, 0..n);
                (
                    Just(n),
                    prop::collection::vec((end.clone(), end), 1..=9),
                    prop::collection::vec(prop::bool::weighted(0.15), 9),
                )
            })
        }

        proptest! {
            #[test]
            fn enumeration_matches_brute_force((n, edges, forced) in arb_dual()) {
                let circuit = dual(n, &edges);
                let forced = &forced[..edges.len()];
                let (mut found, _) = collect(&circuit, forced);
                for tree in &found {
                    prop_assert!(is_spanning_tree(circuit.current_graph(), tree));
                    prop_assert!(is_spanning_tree(circuit.voltage_graph(), tree));
                    prop_assert!(forced.iter().zip(tree).all(|(&f, &t)| !f || t));
                }
                let mut expected = brute_force(&circuit, forced);
                found.sort();
                expected.sort();
                prop_assert_eq!(found, expected);
            }
        }
    }
}
