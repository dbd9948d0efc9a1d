use crate::error::Result;
use crate::geometry::Plane;
use crate::math::polygon_3d::newell_normal;
use crate::math::{mean_point, Point3, PolygonGeom, Vector3, GEOMETRY_TOLERANCE};

use super::face::Face;
use super::polyhedron::Polyhedron;

/// View of one vertex of a [`Polyhedron`].
#[derive(Debug, Clone, Copy)]
pub struct Vertex<'a> {
    polyhedron: &'a Polyhedron,
    index: usize,
}

impl<'a> Vertex<'a> {
    pub(crate) fn new(polyhedron: &'a Polyhedron, index: usize) -> Self {
        assert!(
            index < polyhedron.num_vertices(),
            "vertex index {index} out of range ({} vertices)",
            polyhedron.num_vertices()
        );
        Self { polyhedron, index }
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn position(&self) -> &'a Point3 {
        self.polyhedron.position(self.index)
    }

    /// Faces around this vertex, counter-clockwise seen from outside.
    ///
    /// From a face where the vertex is entered by `u → v`, the next face is
    /// the one owning the twin `v → u`.
    #[must_use]
    pub fn adjacent_faces(&self) -> Vec<Face<'a>> {
        let v = self.index;
        let Some(&first) = self.polyhedron.faces_at(v).first() else {
            return Vec::new();
        };
        let mut ring = Vec::new();
        let mut current = first;
        loop {
            ring.push(Face::new(self.polyhedron, current));
            let face = self.polyhedron.face_vertices(current);
            let at = face.iter().position(|&x| x == v).unwrap_or(0);
            let previous = face[(at + face.len() - 1) % face.len()];
            match self.polyhedron.edge_face(v, previous) {
                Some(next) if next != first && ring.len() <= face_limit(self.polyhedron, v) => {
                    current = next;
                }
                _ => break,
            }
        }
        ring
    }

    /// Neighbouring vertices, in the same rotational order as
    /// [`Vertex::adjacent_faces`]: each face contributes the vertex that
    /// follows this one in its winding.
    #[must_use]
    pub fn adjacent_vertices(&self) -> Vec<usize> {
        self.adjacent_faces()
            .iter()
            .map(|face| face.next_vertex(self.index))
            .collect()
    }

    /// Number of faces (equivalently edges) meeting here.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.polyhedron.faces_at(self.index).len()
    }

    /// Whether this vertex is one of `set`.
    #[must_use]
    pub fn in_set(&self, set: &[usize]) -> bool {
        set.contains(&self.index)
    }
}

fn face_limit(polyhedron: &Polyhedron, v: usize) -> usize {
    polyhedron.faces_at(v).len()
}

/// An ordered subset of a polyhedron's vertices treated as a polygon:
/// faces, cap boundaries and other rings.
pub trait VertexList {
    fn polyhedron(&self) -> &Polyhedron;

    fn vertex_indices(&self) -> &[usize];

    fn num_sides(&self) -> usize {
        self.vertex_indices().len()
    }

    fn positions(&self) -> Vec<Point3> {
        self.vertex_indices()
            .iter()
            .map(|&v| *self.polyhedron().position(v))
            .collect()
    }

    fn centroid(&self) -> Point3 {
        mean_point(&self.positions())
    }

    /// Unit normal by winding; zero for degenerate polygons.
    fn normal(&self) -> Vector3 {
        let normal = newell_normal(&self.positions());
        let len = normal.norm();
        if len < f64::EPSILON {
            Vector3::zeros()
        } else {
            normal / len
        }
    }

    /// Plane through the centroid, oriented by winding.
    ///
    /// # Errors
    ///
    /// Returns an error for degenerate polygons.
    fn plane(&self) -> Result<Plane> {
        Plane::from_normal(self.centroid(), newell_normal(&self.positions()))
    }

    /// Mean distance from the centroid to the vertices.
    #[allow(clippy::cast_precision_loss)]
    fn radius(&self) -> f64 {
        let center = self.centroid();
        let positions = self.positions();
        positions.iter().map(|p| (p - center).norm()).sum::<f64>() / positions.len() as f64
    }

    /// Mean side length.
    #[allow(clippy::cast_precision_loss)]
    fn side_length(&self) -> f64 {
        let positions = self.positions();
        let n = positions.len();
        (0..n)
            .map(|i| (positions[(i + 1) % n] - positions[i]).norm())
            .sum::<f64>()
            / n as f64
    }

    fn is_planar(&self) -> bool {
        let Ok(plane) = self.plane() else {
            return false;
        };
        let tolerance = GEOMETRY_TOLERANCE * self.side_length().max(GEOMETRY_TOLERANCE);
        self.positions()
            .iter()
            .all(|p| plane.signed_distance(p).abs() < tolerance)
    }

    /// Planar polygon whose sides all equal `side` and whose vertices all
    /// lie on the circumcircle of the regular polygon with that side.
    fn is_regular_polygon(&self, side: f64) -> bool {
        let positions = self.positions();
        let n = positions.len();
        if n < 3 || !self.is_planar() {
            return false;
        }
        let tolerance = GEOMETRY_TOLERANCE * side.max(GEOMETRY_TOLERANCE);
        let radius = PolygonGeom::new(n, side).out_radius;
        let center = mean_point(&positions);
        (0..n).all(|i| {
            ((positions[(i + 1) % n] - positions[i]).norm() - side).abs() < tolerance
                && ((positions[i] - center).norm() - radius).abs() < tolerance
        })
    }
}

/// A named ring of vertex indices over a polyhedron.
#[derive(Debug, Clone)]
pub struct VertexRing<'a> {
    polyhedron: &'a Polyhedron,
    indices: Vec<usize>,
}

impl<'a> VertexRing<'a> {
    #[must_use]
    pub fn new(polyhedron: &'a Polyhedron, indices: Vec<usize>) -> Self {
        Self {
            polyhedron,
            indices,
        }
    }
}

impl VertexList for VertexRing<'_> {
    fn polyhedron(&self) -> &Polyhedron {
        self.polyhedron
    }

    fn vertex_indices(&self) -> &[usize] {
        &self.indices
    }
}
