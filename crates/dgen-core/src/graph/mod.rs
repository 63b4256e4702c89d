//! Connectivity graph over room centers
//!
//! Vertices carry a payload (the pipeline uses room indices); edges refer to
//! vertices by index and compare as unordered pairs.

mod delaunay;
mod edge;
mod prim;
mod vertex;

pub use delaunay::{triangulate_2d, triangulate_3d, Triangulation};
pub use edge::Edge;
pub use prim::{minimum_spanning_tree, select_edges, SpanningTree};
pub use vertex::Vertex;
