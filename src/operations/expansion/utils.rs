use std::collections::HashMap;

use crate::math::{rotate_about, Point3, Vector3};
use crate::topology::{Face, Polyhedron, VertexList};

/// How the gap along each old edge is filled after the faces are pulled
/// apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Bridge {
    /// One square per edge.
    Square,
    /// Two triangles split along the diagonal from the start of the edge
    /// on its own face.
    Rising,
    /// Two triangles split along the other diagonal.
    Falling,
}

/// One vertex per face corner: every face gets its own copy of each of its
/// vertices, so faces can move apart independently.
#[derive(Debug, Clone)]
pub(super) struct FaceCorners {
    slots: HashMap<(usize, usize), usize>,
    owners: Vec<(usize, usize)>,
}

impl FaceCorners {
    pub(super) fn new(polyhedron: &Polyhedron) -> Self {
        let mut slots = HashMap::new();
        let mut owners = Vec::new();
        for face in polyhedron.faces() {
            for &v in face.vertex_indices() {
                slots.insert((face.index(), v), owners.len());
                owners.push((face.index(), v));
            }
        }
        Self { slots, owners }
    }

    /// The copy of vertex `v` on face `f`.
    ///
    /// # Panics
    ///
    /// Panics if `v` is not a vertex of `f`.
    pub(super) fn at(&self, f: usize, v: usize) -> usize {
        match self.slots.get(&(f, v)) {
            Some(&slot) => slot,
            None => panic!("vertex {v} is not on face {f}"),
        }
    }

    /// `(face, vertex)` of every corner, by corner index.
    #[cfg(test)]
    pub(super) fn owners(&self) -> &[(usize, usize)] {
        &self.owners
    }

    /// Faces of the pulled-apart solid: the face copies in their original
    /// order, then one face per old vertex, then the bridges along the old
    /// edges.
    pub(super) fn faces(&self, polyhedron: &Polyhedron, bridge: Bridge) -> Vec<Vec<usize>> {
        let mut faces: Vec<Vec<usize>> = polyhedron
            .faces()
            .map(|face| {
                face.vertex_indices()
                    .iter()
                    .map(|&v| self.at(face.index(), v))
                    .collect()
            })
            .collect();
        faces.extend(polyhedron.vertices().map(|vertex| {
            vertex
                .adjacent_faces()
                .iter()
                .map(|face| self.at(face.index(), vertex.index()))
                .collect::<Vec<_>>()
        }));
        for edge in polyhedron.edges() {
            let (a, b) = (edge.v1(), edge.v2());
            let (Some(f), Some(g)) = (polyhedron.edge_face(a, b), polyhedron.edge_face(b, a)) else {
                continue;
            };
            let (fa, fb, ga, gb) = (self.at(f, a), self.at(f, b), self.at(g, a), self.at(g, b));
            match bridge {
                Bridge::Square => faces.push(vec![fb, fa, ga, gb]),
                Bridge::Rising => {
                    faces.push(vec![fb, fa, gb]);
                    faces.push(vec![fa, ga, gb]);
                }
                Bridge::Falling => {
                    faces.push(vec![fb, fa, ga]);
                    faces.push(vec![fb, ga, gb]);
                }
            }
        }
        faces
    }

    /// Corner positions with every face pushed out along its normal by
    /// `offset` and turned about it by `angle`.
    pub(super) fn positions(&self, polyhedron: &Polyhedron, offset: f64, angle: f64) -> Vec<Point3> {
        let frames: Vec<(Point3, Vector3)> = polyhedron
            .faces()
            .map(|face| (face.centroid(), face.normal()))
            .collect();
        self.owners
            .iter()
            .map(|&(f, v)| {
                let (center, normal) = frames[f];
                rotate_about(polyhedron.position(v), &center, &normal, angle) + normal * offset
            })
            .collect()
    }

    /// Every corner sitting on its original vertex.
    pub(super) fn collapsed(&self, polyhedron: &Polyhedron) -> Vec<Point3> {
        self.owners
            .iter()
            .map(|&(_, v)| *polyhedron.position(v))
            .collect()
    }
}

/// Distance faces move out so that the gap across an edge between faces
/// `f` and `g` is one edge length.
pub(super) fn expansion_offset(polyhedron: &Polyhedron, f: &Face<'_>, g: &Face<'_>) -> f64 {
    polyhedron.edge_length() / (f.normal() - g.normal()).norm()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::fixtures::tetrahedron;

    #[test]
    fn corners_cover_every_face_vertex() {
        let tet = tetrahedron();
        let corners = FaceCorners::new(&tet);
        assert_eq!(corners.owners().len(), 12);
        let f = 0;
        let v = tet.face_vertices(f)[1];
        assert_eq!(corners.owners()[corners.at(f, v)], (f, v));
    }

    #[test]
    fn square_bridges_close_the_solid() {
        let tet = tetrahedron();
        let corners = FaceCorners::new(&tet);
        let faces = corners.faces(&tet, Bridge::Square);
        assert_eq!(faces.len(), 4 + 4 + 6);
        let solid = Polyhedron::new(corners.collapsed(&tet), faces).unwrap();
        assert!(solid.is_closed());
    }

    #[test]
    fn triangle_bridges_close_the_solid() {
        let tet = tetrahedron();
        let corners = FaceCorners::new(&tet);
        for bridge in [Bridge::Rising, Bridge::Falling] {
            let faces = corners.faces(&tet, bridge);
            assert_eq!(faces.len(), 4 + 4 + 12);
            let solid = Polyhedron::new(corners.collapsed(&tet), faces).unwrap();
            assert!(solid.is_closed());
        }
    }
}
