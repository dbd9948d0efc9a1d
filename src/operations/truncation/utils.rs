use itertools::Itertools;

use crate::topology::Polyhedron;

use super::super::utils::dedupe_cyclic;

/// Faces of a solid with every vertex cut off: each old face shrunk to its
/// cut corners, then one face per old vertex.
///
/// `cut(v, w)` is the new vertex on the edge from `v` toward `w`. Cuts that
/// meet in the middle of an edge may share an index; repeated corners are
/// then dropped.
pub(super) fn cut_faces(polyhedron: &Polyhedron, cut: impl Fn(usize, usize) -> usize) -> Vec<Vec<usize>> {
    let mut faces: Vec<Vec<usize>> = polyhedron
        .faces()
        .map(|face| {
            let corners = polyhedron
                .face_vertices(face.index())
                .iter()
                .copied()
                .circular_tuple_windows()
                .flat_map(|(previous, v, next)| [cut(v, previous), cut(v, next)])
                .collect();
            dedupe_cyclic(corners)
        })
        .collect();
    faces.extend(polyhedron.vertices().map(|vertex| {
        vertex
            .adjacent_vertices()
            .into_iter()
            .map(|w| cut(vertex.index(), w))
            .collect::<Vec<_>>()
    }));
    faces
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use crate::topology::fixtures::tetrahedron;

    #[test]
    fn directed_cuts_give_truncated_topology() {
        let tet = tetrahedron();
        let mut slots = HashMap::new();
        for face in tet.faces() {
            for edge in face.edges() {
                let next = slots.len();
                slots.entry((edge.v1(), edge.v2())).or_insert(next);
                let next = slots.len();
                slots.entry((edge.v2(), edge.v1())).or_insert(next);
            }
        }
        let faces = cut_faces(&tet, |v, w| slots[&(v, w)]);
        assert_eq!(faces.len(), 8);
        assert_eq!(faces.iter().filter(|f| f.len() == 6).count(), 4);
        let solid = Polyhedron::new(vec![crate::math::Point3::origin(); 12], faces).unwrap();
        assert!(solid.is_closed());
    }
}
