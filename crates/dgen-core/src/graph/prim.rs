//! Minimum spanning tree (Prim) and loop-edge selection

use hashbrown::HashSet;

use crate::rng::DungeonRng;

use super::Edge;

/// Result of Prim's algorithm
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpanningTree {
    /// Tree edges in the order they were chosen
    pub edges: Vec<Edge>,
    /// Vertices the tree could not reach, ascending
    pub unreached: Vec<usize>,
}

impl SpanningTree {
    /// True when every vertex was connected
    pub fn is_complete(&self) -> bool {
        self.unreached.is_empty()
    }
}

/// Build a minimum spanning tree over `vertex_count` vertices from `start`
///
/// Each round scans every edge for the lightest one with exactly one
/// endpoint already in the tree. Among equal weights the first edge in
/// `edges` wins. If no such edge exists before every vertex is reached, the
/// graph is disconnected: the partial tree is returned and the missing
/// vertices are listed in `unreached`.
pub fn minimum_spanning_tree(vertex_count: usize, edges: &[Edge], start: usize) -> SpanningTree {
    if start >= vertex_count {
        return SpanningTree {
            edges: Vec::new(),
            unreached: (0..vertex_count).collect(),
        };
    }

    let mut closed = vec![false; vertex_count];
    closed[start] = true;
    let mut open_count = vertex_count - 1;
    let mut result = Vec::with_capacity(open_count);

    while open_count > 0 {
        let mut chosen: Option<&Edge> = None;
        for edge in edges {
            let (u, v) = edge.endpoints();
            if closed[u] == closed[v] {
                continue;
            }
            if chosen.is_none_or(|best| edge.distance() < best.distance()) {
                chosen = Some(edge);
            }
        }

        let Some(edge) = chosen else {
            log::debug!("spanning tree stopped with {open_count} vertices unreached");
            break;
        };

        let (u, v) = edge.endpoints();
        let newcomer = if closed[u] { v } else { u };
        closed[newcomer] = true;
        open_count -= 1;
        result.push(*edge);
    }

    SpanningTree {
        edges: result,
        unreached: (0..vertex_count).filter(|&i| !closed[i]).collect(),
    }
}

/// Tree edges plus every other edge of `all` admitted with probability `loop_rate`
///
/// Tree edges come first, then admitted loop edges in the order of `all`.
/// One RNG draw is made per non-tree edge, in order.
pub fn select_edges(
    all: &[Edge],
    tree: &[Edge],
    loop_rate: f64,
    rng: &mut DungeonRng,
) -> Vec<Edge> {
    let in_tree: HashSet<Edge> = tree.iter().copied().collect();
    let mut selected = tree.to_vec();
    for edge in all.iter().filter(|e| !in_tree.contains(*e)) {
        if rng.chance(loop_rate) {
            selected.push(*edge);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(a: usize, b: usize, w: f64) -> Edge {
        Edge::new(a, b, w)
    }

    #[test]
    fn test_square_with_diagonal() {
        //  0 --1-- 1
        //  |     / |
        //  4   2   1
        //  | /     |
        //  3 --3-- 2
        let edges = [
            e(0, 1, 1.0),
            e(1, 2, 1.0),
            e(2, 3, 3.0),
            e(3, 0, 4.0),
            e(1, 3, 2.0),
        ];
        let tree = minimum_spanning_tree(4, &edges, 0);
        assert!(tree.is_complete());
        assert_eq!(tree.edges, vec![e(0, 1, 1.0), e(1, 2, 1.0), e(1, 3, 2.0)]);
        let weight: f64 = tree.edges.iter().map(Edge::distance).sum();
        assert_eq!(weight, 4.0);
    }

    #[test]
    fn test_tie_break_first_edge_wins() {
        let edges = [e(0, 2, 1.0), e(0, 1, 1.0), e(1, 2, 1.0)];
        let tree = minimum_spanning_tree(3, &edges, 0);
        assert_eq!(tree.edges[0], e(0, 2, 1.0));
        assert_eq!(tree.edges[1], e(0, 1, 1.0));
    }

    #[test]
    fn test_connected_tree_has_n_minus_one_edges() {
        let edges: Vec<Edge> = (0..6)
            .flat_map(|a| (a + 1..6).map(move |b| e(a, b, (a * 7 + b * 3) as f64 % 5.0)))
            .collect();
        let tree = minimum_spanning_tree(6, &edges, 2);
        assert_eq!(tree.edges.len(), 5);
        assert!(tree.is_complete());
    }

    #[test]
    fn test_disconnected_graph_reports_unreached() {
        let edges = [e(0, 1, 1.0), e(2, 3, 1.0)];
        let tree = minimum_spanning_tree(5, &edges, 0);
        assert_eq!(tree.edges, vec![e(0, 1, 1.0)]);
        assert_eq!(tree.unreached, vec![2, 3, 4]);
        assert!(!tree.is_complete());
    }

    #[test]
    fn test_single_vertex() {
        let tree = minimum_spanning_tree(1, &[], 0);
        assert!(tree.edges.is_empty());
        assert!(tree.is_complete());
    }

    #[test]
    fn test_start_out_of_range() {
        let tree = minimum_spanning_tree(2, &[e(0, 1, 1.0)], 9);
        assert!(tree.edges.is_empty());
        assert_eq!(tree.unreached, vec![0, 1]);
    }

    #[test]
    fn test_select_edges_rates() {
        let all = [e(0, 1, 1.0), e(1, 2, 1.0), e(0, 2, 1.5), e(2, 3, 1.0), e(1, 3, 1.2)];
        let tree = minimum_spanning_tree(4, &all, 0);
        let mut rng = DungeonRng::new(3);

        let none = select_edges(&all, &tree.edges, 0.0, &mut rng);
        assert_eq!(none, tree.edges);

        let every = select_edges(&all, &tree.edges, 1.0, &mut rng);
        assert_eq!(every.len(), all.len());
        assert_eq!(&every[..tree.edges.len()], &tree.edges[..]);
        assert_eq!(&every[tree.edges.len()..], &[e(0, 2, 1.5), e(1, 3, 1.2)]);
    }

    #[test]
    fn test_select_edges_is_reproducible() {
        let all: Vec<Edge> = (0..10)
            .map(|i| e(i, i + 1, 1.0))
            .chain((0..9).map(|i| e(i, i + 2, 2.0)))
            .collect();
        let tree = minimum_spanning_tree(11, &all, 0);
        let a = select_edges(&all, &tree.edges, 0.5, &mut DungeonRng::new(8));
        let b = select_edges(&all, &tree.edges, 0.5, &mut DungeonRng::new(8));
        assert_eq!(a, b);
    }
}
