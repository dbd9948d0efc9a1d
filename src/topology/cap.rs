use std::collections::{BTreeSet, HashMap};
use std::fmt;

use tracing::debug;

use crate::math::{Point3, Vector3};

use super::polyhedron::Polyhedron;
use super::vertex::{VertexList, VertexRing};

/// Shape of a cap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CapKind {
    /// Triangles fanned around one apex over a 3-, 4- or 5-gon.
    Pyramid,
    /// Triangular prism lying on a square: a ridge between two squares.
    Fastigium,
    /// Top polygon ringed by alternating squares and triangles.
    Cupola,
    /// Pentagonal rotunda: top pentagon, then triangles and pentagons.
    Rotunda,
}

impl fmt::Display for CapKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pyramid => "pyramid",
            Self::Fastigium => "fastigium",
            Self::Cupola => "cupola",
            Self::Rotunda => "rotunda",
        };
        f.write_str(name)
    }
}

/// A pyramid, fastigium, cupola or rotunda found on a polyhedron.
///
/// Caps are plain index sets into the polyhedron they were detected on and
/// are only meaningful for that snapshot.
///
/// The boundary ring is ordered like the cap faces' own winding: every
/// directed edge `b[k] → b[k + 1]` belongs to a cap face. A face listing the
/// ring in this order therefore closes the hole left by removing the cap,
/// with its normal pointing toward the cap.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cap {
    kind: CapKind,
    inner: Vec<usize>,
    faces: Vec<usize>,
    boundary: Vec<usize>,
}

impl Cap {
    /// Every cap of `polyhedron` that is not the whole solid on top of a
    /// single base face.
    #[must_use]
    pub fn get_all(polyhedron: &Polyhedron) -> Vec<Cap> {
        Self::get_all_with_base(polyhedron)
            .into_iter()
            .filter(|cap| !cap.is_whole_solid(polyhedron))
            .collect()
    }

    /// Every cap of `polyhedron`, including caps that make up the whole solid
    /// apart from their base face (a lone pyramid, cupola or rotunda).
    #[must_use]
    pub fn get_all_with_base(polyhedron: &Polyhedron) -> Vec<Cap> {
        let mut caps = Vec::new();
        for v in 0..polyhedron.num_vertices() {
            caps.extend(pyramid_at(polyhedron, v));
        }
        for edge in polyhedron.edges() {
            caps.extend(fastigium_at(polyhedron, edge.v1(), edge.v2()));
        }
        for f in 0..polyhedron.num_faces() {
            caps.extend(cupola_at(polyhedron, f));
            caps.extend(rotunda_at(polyhedron, f));
        }
        debug!(count = caps.len(), "detected caps");
        caps
    }

    /// Cap under a pick point: among the caps containing the face under the
    /// point, the one whose top is nearest.
    #[must_use]
    pub fn find(polyhedron: &Polyhedron, point: &Point3) -> Option<Cap> {
        let face = polyhedron.hit_face(point)?.index();
        Self::get_all(polyhedron)
            .into_iter()
            .filter(|cap| cap.faces.contains(&face))
            .min_by(|a, b| {
                let da = (a.top_point(polyhedron) - point).norm();
                let db = (b.top_point(polyhedron) - point).norm();
                da.total_cmp(&db)
            })
    }

    #[must_use]
    pub fn kind(&self) -> CapKind {
        self.kind
    }

    /// Vertices not on the boundary: the apex, the ridge, or the top ring(s).
    #[must_use]
    pub fn inner_vertices(&self) -> &[usize] {
        &self.inner
    }

    /// Faces of the cap, ascending.
    #[must_use]
    pub fn faces(&self) -> &[usize] {
        &self.faces
    }

    #[must_use]
    pub fn boundary_indices(&self) -> &[usize] {
        &self.boundary
    }

    /// The boundary ring as a polygon over `polyhedron`.
    #[must_use]
    pub fn boundary<'a>(&self, polyhedron: &'a Polyhedron) -> VertexRing<'a> {
        VertexRing::new(polyhedron, self.boundary.clone())
    }

    /// Number of sides of the base polygon.
    #[must_use]
    pub fn num_sides(&self) -> usize {
        self.boundary.len()
    }

    /// Inner and boundary vertices together.
    #[must_use]
    pub fn all_vertices(&self) -> Vec<usize> {
        let set: BTreeSet<usize> = self.inner.iter().chain(&self.boundary).copied().collect();
        set.into_iter().collect()
    }

    /// Apex of a pyramid, ridge midpoint of a fastigium, or centre of the
    /// top face of a cupola or rotunda.
    #[must_use]
    pub fn top_point(&self, polyhedron: &Polyhedron) -> Point3 {
        let top = match self.kind {
            CapKind::Pyramid | CapKind::Fastigium => &self.inner[..],
            CapKind::Cupola | CapKind::Rotunda => {
                let n = self.top_size();
                &self.inner[..n]
            }
        };
        VertexRing::new(polyhedron, top.to_vec()).centroid()
    }

    /// Unit axis from the base toward the top.
    #[must_use]
    pub fn normal(&self, polyhedron: &Polyhedron) -> Vector3 {
        self.boundary(polyhedron).normal()
    }

    /// Number of vertices of the top face (1 for a pyramid, 2 for a ridge).
    #[must_use]
    pub fn top_size(&self) -> usize {
        match self.kind {
            CapKind::Pyramid => 1,
            CapKind::Fastigium => 2,
            CapKind::Cupola => self.inner.len(),
            CapKind::Rotunda => 5,
        }
    }

    /// Whether the faces outside the cap are just its base.
    #[must_use]
    pub fn is_whole_solid(&self, polyhedron: &Polyhedron) -> bool {
        polyhedron.num_faces() == self.faces.len() + 1
    }

    fn from_inner(polyhedron: &Polyhedron, kind: CapKind, inner: Vec<usize>) -> Option<Cap> {
        let faces: BTreeSet<usize> = inner
            .iter()
            .flat_map(|&v| polyhedron.faces_at(v).iter().copied())
            .collect();
        let faces: Vec<usize> = faces.into_iter().collect();
        let boundary = boundary_ring(polyhedron, &faces)?;
        if boundary.iter().any(|v| inner.contains(v)) {
            return None;
        }
        let ring = VertexRing::new(polyhedron, boundary.clone());
        if !ring.is_regular_polygon(polyhedron.edge_length()) {
            return None;
        }
        Some(Cap {
            kind,
            inner,
            faces,
            boundary,
        })
    }
}

/// Orders the edges of `faces` whose twin lies outside the set into a single
/// ring. `None` when the outside edges do not form exactly one cycle.
fn boundary_ring(polyhedron: &Polyhedron, faces: &[usize]) -> Option<Vec<usize>> {
    let mut next = HashMap::new();
    for &f in faces {
        for edge in polyhedron.face(f).edges() {
            let inside = edge
                .twin_face()
                .is_some_and(|twin| faces.contains(&twin.index()));
            if !inside && next.insert(edge.v1(), edge.v2()).is_some() {
                return None;
            }
        }
    }
    let start = *next.keys().min()?;
    let mut ring = vec![start];
    let mut current = *next.get(&start)?;
    while current != start {
        if ring.len() >= next.len() {
            return None;
        }
        ring.push(current);
        current = *next.get(&current)?;
    }
    (ring.len() == next.len()).then_some(ring)
}

fn arity(polyhedron: &Polyhedron, face: usize) -> usize {
    polyhedron.face_vertices(face).len()
}

fn pyramid_at(polyhedron: &Polyhedron, apex: usize) -> Option<Cap> {
    let faces = polyhedron.faces_at(apex);
    if !(3..=5).contains(&faces.len()) || faces.iter().any(|&f| arity(polyhedron, f) != 3) {
        return None;
    }
    Cap::from_inner(polyhedron, CapKind::Pyramid, vec![apex])
}

fn fastigium_at(polyhedron: &Polyhedron, a: usize, b: usize) -> Option<Cap> {
    let left = polyhedron.edge_face(a, b)?;
    let right = polyhedron.edge_face(b, a)?;
    if arity(polyhedron, left) != 4 || arity(polyhedron, right) != 4 {
        return None;
    }
    let end_ok = |v: usize| {
        let faces = polyhedron.faces_at(v);
        faces.len() == 3
            && faces
                .iter()
                .filter(|&&f| f != left && f != right)
                .all(|&f| arity(polyhedron, f) == 3)
    };
    if !end_ok(a) || !end_ok(b) {
        return None;
    }
    Cap::from_inner(polyhedron, CapKind::Fastigium, vec![a, b])
}

fn cupola_at(polyhedron: &Polyhedron, top: usize) -> Option<Cap> {
    let face = polyhedron.face(top);
    if !(3..=5).contains(&face.num_sides()) {
        return None;
    }
    let sides_ok = face
        .adjacent_faces()
        .iter()
        .all(|f| f.num_sides() == 4);
    let corners_ok = face.vertex_indices().iter().all(|&v| {
        let others: Vec<usize> = polyhedron
            .faces_at(v)
            .iter()
            .copied()
            .filter(|&f| f != top)
            .collect();
        others.len() == 3
            && others.iter().filter(|&&f| arity(polyhedron, f) == 3).count() == 1
            && others.iter().filter(|&&f| arity(polyhedron, f) == 4).count() == 2
    });
    if !sides_ok || !corners_ok || face.adjacent_faces().len() != face.num_sides() {
        return None;
    }
    Cap::from_inner(polyhedron, CapKind::Cupola, face.vertex_indices().to_vec())
}

fn rotunda_at(polyhedron: &Polyhedron, top: usize) -> Option<Cap> {
    let face = polyhedron.face(top);
    if face.num_sides() != 5 {
        return None;
    }
    let mut inner = face.vertex_indices().to_vec();
    for edge in face.edges() {
        let twin = edge.twin_face()?;
        if twin.num_sides() != 3 {
            return None;
        }
        inner.push(twin.next_vertex(edge.v1()));
    }
    let corners_ok = face.vertex_indices().iter().all(|&v| {
        let faces = polyhedron.faces_at(v);
        faces.len() == 4
            && faces.iter().filter(|&&f| arity(polyhedron, f) == 5).count() == 2
            && faces.iter().filter(|&&f| arity(polyhedron, f) == 3).count() == 2
    });
    let distinct: BTreeSet<usize> = inner.iter().copied().collect();
    if !corners_ok || distinct.len() != 10 {
        return None;
    }
    let cap = Cap::from_inner(polyhedron, CapKind::Rotunda, inner)?;
    (cap.faces.len() == 16).then_some(cap)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::{PolygonGeom, TOLERANCE};
    use crate::topology::polyhedron::tests::{cube, tetrahedron};

    /// Square pyramid with unit edges, apex up.
    fn square_pyramid() -> Polyhedron {
        let geom = PolygonGeom::new(4, 1.0);
        let mut vertices: Vec<Point3> = (0..4).map(|i| geom.point(i, 0.0)).collect();
        vertices.push(Point3::new(0.0, 0.0, 0.5_f64.sqrt()));
        let faces = vec![
            vec![3, 2, 1, 0],
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
        ];
        Polyhedron::new(vertices, faces).unwrap()
    }

    /// Regular octahedron with unit edges.
    fn octahedron() -> Polyhedron {
        let r = 0.5_f64.sqrt();
        let vertices = vec![
            Point3::new(r, 0.0, 0.0),
            Point3::new(0.0, r, 0.0),
            Point3::new(-r, 0.0, 0.0),
            Point3::new(0.0, -r, 0.0),
            Point3::new(0.0, 0.0, r),
            Point3::new(0.0, 0.0, -r),
        ];
        let faces = vec![
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
            vec![1, 0, 5],
            vec![2, 1, 5],
            vec![3, 2, 5],
            vec![0, 3, 5],
        ];
        Polyhedron::new(vertices, faces).unwrap()
    }

    #[test]
    fn tetrahedron_has_no_caps() {
        let tet = tetrahedron();
        assert!(Cap::get_all(&tet).is_empty());
        assert_eq!(Cap::get_all_with_base(&tet).len(), 4);
    }

    #[test]
    fn cube_has_no_caps() {
        assert!(Cap::get_all_with_base(&cube()).is_empty());
    }

    #[test]
    fn lone_pyramid_is_whole_solid() {
        let pyramid = square_pyramid();
        assert!(Cap::get_all(&pyramid).is_empty());
        let caps = Cap::get_all_with_base(&pyramid);
        assert_eq!(caps.len(), 1);
        assert_eq!(caps[0].kind(), CapKind::Pyramid);
        assert_eq!(caps[0].inner_vertices(), &[4]);
        assert!(caps[0].is_whole_solid(&pyramid));
    }

    #[test]
    fn octahedron_has_six_square_pyramids() {
        let octahedron = octahedron();
        let caps = Cap::get_all(&octahedron);
        assert_eq!(caps.len(), 6);
        for cap in &caps {
            assert_eq!(cap.kind(), CapKind::Pyramid);
            assert_eq!(cap.num_sides(), 4);
            assert_eq!(cap.faces().len(), 4);
        }
    }

    #[test]
    fn boundary_normal_points_toward_cap() {
        let octahedron = octahedron();
        let cap = Cap::get_all(&octahedron)
            .into_iter()
            .find(|cap| cap.inner_vertices() == [4])
            .unwrap();
        let normal = cap.normal(&octahedron);
        assert!((normal.z - 1.0).abs() < TOLERANCE);
        let top = cap.top_point(&octahedron);
        assert!((top.z - 0.5_f64.sqrt()).abs() < TOLERANCE);
    }

    #[test]
    fn boundary_edges_belong_to_cap_faces() {
        let octahedron = octahedron();
        for cap in Cap::get_all(&octahedron) {
            let ring = cap.boundary_indices();
            for k in 0..ring.len() {
                let face = octahedron.edge_face(ring[k], ring[(k + 1) % ring.len()]).unwrap();
                assert!(cap.faces().contains(&face));
            }
        }
    }

    #[test]
    fn find_picks_cap_under_point() {
        let octahedron = octahedron();
        let r = 0.5_f64.sqrt();
        // Centre of face [0, 1, 4].
        let point = Point3::new(r / 3.0, r / 3.0, r / 3.0);
        let cap = Cap::find(&octahedron, &point).unwrap();
        assert!(cap.faces().contains(&0));
        assert!(Cap::find(&octahedron, &Point3::new(9.0, 9.0, 9.0)).is_none());
    }
}
