use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use serde::Serialize;

use super::Vertex;

/// Undirected, weighted edge between two vertex indices
///
/// Endpoints are stored lowest first. Equality, hashing and ordering only
/// look at the endpoint pair, never at the weight.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Edge {
    u: usize,
    v: usize,
    distance: f64,
}

impl Edge {
    pub fn new(a: usize, b: usize, distance: f64) -> Self {
        let (u, v) = if a <= b { (a, b) } else { (b, a) };
        Self { u, v, distance }
    }

    /// Edge between two vertices of `vertices`, weighted by their distance
    pub fn between<T, const N: usize>(vertices: &[Vertex<T, N>], a: usize, b: usize) -> Self {
        Self::new(a, b, vertices[a].distance(&vertices[b]))
    }

    pub fn u(&self) -> usize {
        self.u
    }

    pub fn v(&self) -> usize {
        self.v
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.u, self.v)
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn contains(&self, vertex: usize) -> bool {
        self.u == vertex || self.v == vertex
    }

    /// The endpoint that is not `vertex`
    pub fn other(&self, vertex: usize) -> Option<usize> {
        if self.u == vertex {
            Some(self.v)
        } else if self.v == vertex {
            Some(self.u)
        } else {
            None
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.endpoints() == other.endpoints()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.endpoints().hash(state);
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        self.endpoints().cmp(&other.endpoints())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_edge_is_undirected() {
        let a = Edge::new(3, 7, 1.5);
        let b = Edge::new(7, 3, 1.5);
        assert_eq!(a, b);
        assert_eq!(a.endpoints(), (3, 7));
        assert_eq!(b.endpoints(), (3, 7));
    }

    #[test]
    fn test_equality_ignores_weight() {
        assert_eq!(Edge::new(1, 2, 1.0), Edge::new(2, 1, 9.0));
        assert_ne!(Edge::new(1, 2, 1.0), Edge::new(1, 3, 1.0));
    }

    #[test]
    fn test_set_difference() {
        let all: HashSet<Edge> = [Edge::new(0, 1, 1.0), Edge::new(1, 2, 1.0), Edge::new(0, 2, 2.0)]
            .into_iter()
            .collect();
        let tree: HashSet<Edge> = [Edge::new(1, 0, 1.0), Edge::new(2, 1, 1.0)]
            .into_iter()
            .collect();
        let rest: Vec<_> = all.difference(&tree).copied().collect();
        assert_eq!(rest, vec![Edge::new(0, 2, 2.0)]);
    }

    #[test]
    fn test_between_uses_distance() {
        let vertices = [Vertex::new([0.0, 0.0], ()), Vertex::new([3.0, 4.0], ())];
        let edge = Edge::between(&vertices, 1, 0);
        assert_eq!(edge.distance(), 5.0);
        assert_eq!(edge.other(0), Some(1));
        assert_eq!(edge.other(5), None);
    }
}
