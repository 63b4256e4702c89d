//! Delaunay triangulation (2D) and tetrahedralization (3D)
//!
//! Bowyer–Watson incremental insertion: start from a super-simplex that
//! encloses every point, insert points one at a time, delete every simplex
//! whose circumscribed circle/sphere contains the new point, and re-fill the
//! cavity by joining its boundary to the point. Simplices touching the
//! super-simplex are dropped at the end.
//!
//! Input that cannot span a simplex is handled without failing:
//! - fewer than two points: no edges
//! - collinear points: a chain linking neighbors along the line
//! - coplanar points in 3D: the 2D triangulation of their plane

use std::collections::BTreeSet;

use hashbrown::HashMap;

use super::{Edge, Vertex};

const EPSILON: f64 = 1e-9;

/// Simplices (`K` = 3 for triangles, 4 for tetrahedra) and their edges
#[derive(Debug, Clone, Default)]
pub struct Triangulation<const K: usize> {
    pub simplices: Vec<[usize; K]>,
    /// Deduplicated, ascending by endpoint pair
    pub edges: Vec<Edge>,
    degenerate: bool,
}

impl<const K: usize> Triangulation<K> {
    /// True when the input could not span a single `K`-simplex
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    fn from_simplices<T, const N: usize>(
        vertices: &[Vertex<T, N>],
        simplices: Vec<[usize; K]>,
    ) -> Self {
        let edges = edges_of(vertices, simplices.iter().flat_map(|s| simplex_pairs(s)));
        Self {
            simplices,
            edges,
            degenerate: false,
        }
    }

    fn degenerate<T, const N: usize>(
        vertices: &[Vertex<T, N>],
        pairs: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        Self {
            simplices: Vec::new(),
            edges: edges_of(vertices, pairs),
            degenerate: true,
        }
    }
}

fn simplex_pairs<const K: usize>(simplex: &[usize; K]) -> Vec<(usize, usize)> {
    let mut pairs = Vec::with_capacity(K * (K - 1) / 2);
    for i in 0..K {
        for j in i + 1..K {
            pairs.push((simplex[i], simplex[j]));
        }
    }
    pairs
}

fn edges_of<T, const N: usize>(
    vertices: &[Vertex<T, N>],
    pairs: impl IntoIterator<Item = (usize, usize)>,
) -> Vec<Edge> {
    let unique: BTreeSet<(usize, usize)> = pairs
        .into_iter()
        .map(|(a, b)| if a <= b { (a, b) } else { (b, a) })
        .filter(|(a, b)| a != b)
        .collect();
    unique
        .into_iter()
        .map(|(a, b)| Edge::between(vertices, a, b))
        .collect()
}

/// Triangulate 2D vertices
pub fn triangulate_2d<T>(vertices: &[Vertex<T, 2>]) -> Triangulation<3> {
    let points: Vec<[f64; 2]> = vertices.iter().map(|v| v.position).collect();
    match plane_simplices(&points) {
        Simplices::Full(triangles) => Triangulation::from_simplices(vertices, triangles),
        Simplices::Degenerate(pairs) => Triangulation::degenerate(vertices, pairs),
    }
}

/// Tetrahedralize 3D vertices
pub fn triangulate_3d<T>(vertices: &[Vertex<T, 3>]) -> Triangulation<4> {
    let points: Vec<[f64; 3]> = vertices.iter().map(|v| v.position).collect();
    if points.len() < 3 || is_collinear(&points) {
        return Triangulation::degenerate(vertices, chain(&points));
    }

    if let Some(plane) = Plane::through(&points) {
        let projected: Vec<[f64; 2]> = points.iter().map(|p| plane.project(p)).collect();
        let pairs = match plane_simplices(&projected) {
            Simplices::Full(triangles) => triangles.iter().flat_map(|t| simplex_pairs(t)).collect(),
            Simplices::Degenerate(pairs) => pairs,
        };
        return Triangulation::degenerate(vertices, pairs);
    }

    let tetrahedra = bowyer_watson_3d(&points);
    if tetrahedra.is_empty() {
        return Triangulation::degenerate(vertices, chain(&points));
    }
    Triangulation::from_simplices(vertices, tetrahedra)
}

enum Simplices<const K: usize> {
    Full(Vec<[usize; K]>),
    Degenerate(Vec<(usize, usize)>),
}

fn plane_simplices(points: &[[f64; 2]]) -> Simplices<3> {
    if points.len() < 3 || is_collinear(points) {
        return Simplices::Degenerate(chain(points));
    }
    let triangles = bowyer_watson_2d(points);
    if triangles.is_empty() {
        Simplices::Degenerate(chain(points))
    } else {
        Simplices::Full(triangles)
    }
}

/// Consecutive pairs after sorting points lexicographically
fn chain<const N: usize>(points: &[[f64; N]]) -> Vec<(usize, usize)> {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by(|&a, &b| {
        points[a]
            .iter()
            .zip(points[b].iter())
            .map(|(x, y)| x.total_cmp(y))
            .find(|o| o.is_ne())
            .unwrap_or(core::cmp::Ordering::Equal)
    });
    order.windows(2).map(|w| (w[0], w[1])).collect()
}

fn sub<const N: usize>(a: &[f64; N], b: &[f64; N]) -> [f64; N] {
    let mut out = [0.0; N];
    for i in 0..N {
        out[i] = a[i] - b[i];
    }
    out
}

fn dot<const N: usize>(a: &[f64; N], b: &[f64; N]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn length<const N: usize>(a: &[f64; N]) -> f64 {
    dot(a, a).sqrt()
}

fn scale<const N: usize>(a: &[f64; N], k: f64) -> [f64; N] {
    a.map(|c| c * k)
}

fn cross(a: &[f64; 3], b: &[f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn is_collinear<const N: usize>(points: &[[f64; N]]) -> bool {
    let Some(origin) = points.first() else {
        return true;
    };
    let Some(direction) = points
        .iter()
        .map(|p| sub(p, origin))
        .find(|d| length(d) > EPSILON)
    else {
        return true;
    };
    let unit = scale(&direction, 1.0 / length(&direction));
    points.iter().all(|p| {
        let offset = sub(p, origin);
        let along = scale(&unit, dot(&offset, &unit));
        length(&sub(&offset, &along)) <= EPSILON * length(&offset).max(1.0)
    })
}

/// Orthonormal 2D frame of a plane containing every point
struct Plane {
    origin: [f64; 3],
    u: [f64; 3],
    w: [f64; 3],
}

impl Plane {
    /// The common plane of `points`, if they have one
    ///
    /// Expects at least three points that are not all collinear.
    fn through(points: &[[f64; 3]]) -> Option<Self> {
        let origin = points[0];
        let first = points
            .iter()
            .map(|p| sub(p, &origin))
            .find(|d| length(d) > EPSILON)?;
        let normal = points.iter().map(|p| cross(&first, &sub(p, &origin))).find(|n| {
            length(n) > EPSILON * length(&first)
        })?;
        let normal = scale(&normal, 1.0 / length(&normal));

        let flat = points.iter().all(|p| {
            let offset = sub(p, &origin);
            dot(&offset, &normal).abs() <= EPSILON * length(&offset).max(1.0)
        });
        if !flat {
            return None;
        }

        let u = scale(&first, 1.0 / length(&first));
        let w = cross(&normal, &u);
        Some(Self { origin, u, w })
    }

    fn project(&self, p: &[f64; 3]) -> [f64; 2] {
        let offset = sub(p, &self.origin);
        [dot(&offset, &self.u), dot(&offset, &self.w)]
    }
}

/// Circumscribed circle or sphere; `None` when the simplex is flat
#[derive(Debug, Clone, Copy)]
struct Ball<const N: usize> {
    center: [f64; N],
    radius_sq: f64,
}

fn ball_contains<const N: usize>(ball: &Option<Ball<N>>, p: &[f64; N]) -> bool {
    match ball {
        // A flat simplex has no finite circumball; always replace it
        None => true,
        Some(ball) => {
            let d = sub(p, &ball.center);
            dot(&d, &d) <= ball.radius_sq * (1.0 + EPSILON)
        }
    }
}

fn circumcircle(a: &[f64; 2], b: &[f64; 2], c: &[f64; 2]) -> Option<Ball<2>> {
    let ba = sub(b, a);
    let ca = sub(c, a);
    let det = 2.0 * (ba[0] * ca[1] - ba[1] * ca[0]);
    if det.abs() < EPSILON {
        return None;
    }
    let b2 = dot(&ba, &ba);
    let c2 = dot(&ca, &ca);
    let rel = [
        (ca[1] * b2 - ba[1] * c2) / det,
        (ba[0] * c2 - ca[0] * b2) / det,
    ];
    Some(Ball {
        center: [a[0] + rel[0], a[1] + rel[1]],
        radius_sq: dot(&rel, &rel),
    })
}

fn circumsphere(a: &[f64; 3], b: &[f64; 3], c: &[f64; 3], d: &[f64; 3]) -> Option<Ball<3>> {
    let ba = sub(b, a);
    let ca = sub(c, a);
    let da = sub(d, a);
    let det = 2.0 * dot(&ba, &cross(&ca, &da));
    if det.abs() < EPSILON {
        return None;
    }
    let t1 = scale(&cross(&ca, &da), dot(&ba, &ba));
    let t2 = scale(&cross(&da, &ba), dot(&ca, &ca));
    let t3 = scale(&cross(&ba, &ca), dot(&da, &da));
    let rel = [
        (t1[0] + t2[0] + t3[0]) / det,
        (t1[1] + t2[1] + t3[1]) / det,
        (t1[2] + t2[2] + t3[2]) / det,
    ];
    Some(Ball {
        center: [a[0] + rel[0], a[1] + rel[1], a[2] + rel[2]],
        radius_sq: dot(&rel, &rel),
    })
}

fn bounds<const N: usize>(points: &[[f64; N]]) -> ([f64; N], f64) {
    let mut lo = [f64::INFINITY; N];
    let mut hi = [f64::NEG_INFINITY; N];
    for p in points {
        for i in 0..N {
            lo[i] = lo[i].min(p[i]);
            hi[i] = hi[i].max(p[i]);
        }
    }
    let mut mid = [0.0; N];
    let mut extent: f64 = 1.0;
    for i in 0..N {
        mid[i] = (lo[i] + hi[i]) / 2.0;
        extent = extent.max(hi[i] - lo[i]);
    }
    (mid, extent)
}

/// Faces of the cavity left by `bad`: faces owned by exactly one bad simplex
fn cavity_boundary<const F: usize>(faces: impl Iterator<Item = [usize; F]>) -> Vec<[usize; F]> {
    let faces: Vec<[usize; F]> = faces.collect();
    let mut counts: HashMap<[usize; F], usize> = HashMap::new();
    for face in &faces {
        *counts.entry(*face).or_default() += 1;
    }
    faces.into_iter().filter(|f| counts[f] == 1).collect()
}

fn sorted<const F: usize>(mut face: [usize; F]) -> [usize; F] {
    face.sort_unstable();
    face
}

struct Triangle {
    v: [usize; 3],
    circle: Option<Ball<2>>,
}

impl Triangle {
    fn new(points: &[[f64; 2]], v: [usize; 3]) -> Self {
        let circle = circumcircle(&points[v[0]], &points[v[1]], &points[v[2]]);
        Self { v, circle }
    }

    fn edges(&self) -> [[usize; 2]; 3] {
        let [a, b, c] = self.v;
        [sorted([a, b]), sorted([b, c]), sorted([a, c])]
    }
}

fn bowyer_watson_2d(input: &[[f64; 2]]) -> Vec<[usize; 3]> {
    let n = input.len();
    let (mid, extent) = bounds(input);

    let mut points = input.to_vec();
    points.push([mid[0] - 20.0 * extent, mid[1] - extent]);
    points.push([mid[0], mid[1] + 20.0 * extent]);
    points.push([mid[0] + 20.0 * extent, mid[1] - extent]);

    let mut triangles = vec![Triangle::new(&points, [n, n + 1, n + 2])];

    for i in 0..n {
        let p = points[i];
        let (bad, keep): (Vec<_>, Vec<_>) = core::mem::take(&mut triangles)
            .into_iter()
            .partition(|t| ball_contains(&t.circle, &p));
        triangles = keep;

        for [a, b] in cavity_boundary(bad.iter().flat_map(Triangle::edges)) {
            triangles.push(Triangle::new(&points, [a, b, i]));
        }
    }

    triangles
        .into_iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .map(|t| t.v)
        .collect()
}

struct Tetrahedron {
    v: [usize; 4],
    sphere: Option<Ball<3>>,
}

impl Tetrahedron {
    fn new(points: &[[f64; 3]], v: [usize; 4]) -> Self {
        let sphere = circumsphere(&points[v[0]], &points[v[1]], &points[v[2]], &points[v[3]]);
        Self { v, sphere }
    }

    fn faces(&self) -> [[usize; 3]; 4] {
        let [a, b, c, d] = self.v;
        [
            sorted([a, b, c]),
            sorted([a, b, d]),
            sorted([a, c, d]),
            sorted([b, c, d]),
        ]
    }
}

fn bowyer_watson_3d(input: &[[f64; 3]]) -> Vec<[usize; 4]> {
    let n = input.len();
    let (mid, extent) = bounds(input);
    let s = 100.0 * extent;

    let mut points = input.to_vec();
    for corner in [[1.0, 1.0, 1.0], [1.0, -1.0, -1.0], [-1.0, 1.0, -1.0], [-1.0, -1.0, 1.0]] {
        points.push([
            mid[0] + s * corner[0],
            mid[1] + s * corner[1],
            mid[2] + s * corner[2],
        ]);
    }

    let mut tetrahedra = vec![Tetrahedron::new(&points, [n, n + 1, n + 2, n + 3])];

    for i in 0..n {
        let p = points[i];
        let (bad, keep): (Vec<_>, Vec<_>) = core::mem::take(&mut tetrahedra)
            .into_iter()
            .partition(|t| ball_contains(&t.sphere, &p));
        tetrahedra = keep;

        for [a, b, c] in cavity_boundary(bad.iter().flat_map(Tetrahedron::faces)) {
            tetrahedra.push(Tetrahedron::new(&points, [a, b, c, i]));
        }
    }

    tetrahedra
        .into_iter()
        .filter(|t| t.v.iter().all(|&v| v < n))
        .map(|t| t.v)
        .collect()
}
