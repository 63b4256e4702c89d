/// A point in space with an attached payload
#[derive(Debug, Clone, PartialEq)]
pub struct Vertex<T, const N: usize> {
    pub position: [f64; N],
    pub item: T,
}

impl<T, const N: usize> Vertex<T, N> {
    pub fn new(position: [f64; N], item: T) -> Self {
        Self { position, item }
    }

    /// Euclidean distance between two vertex positions
    pub fn distance<U>(&self, other: &Vertex<U, N>) -> f64 {
        self.position
            .iter()
            .zip(other.position.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum::<f64>()
            .sqrt()
    }
}
