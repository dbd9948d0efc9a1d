use crate::topology::Polyhedron;

/// Combinatorial fingerprint of a polyhedron, equal for two solids exactly
/// when their vertex/face structures are isomorphic (mirror images
/// included).
///
/// The code is the smallest breadth-first labelling of the vertex graph
/// over every starting directed edge and both senses of rotation, reading
/// each vertex's neighbours in their cyclic order around it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    vertices: usize,
    faces: usize,
    code: Vec<usize>,
}

impl Signature {
    #[must_use]
    pub fn of(polyhedron: &Polyhedron) -> Signature {
        let rotations: Vec<Vec<usize>> = polyhedron
            .vertices()
            .map(|vertex| vertex.adjacent_vertices())
            .collect();
        let mirrored: Vec<Vec<usize>> = rotations
            .iter()
            .map(|ring| ring.iter().rev().copied().collect())
            .collect();

        let mut best: Option<Vec<usize>> = None;
        for rotation in [&rotations, &mirrored] {
            for (root, ring) in rotation.iter().enumerate() {
                for &first in ring {
                    let code = traverse(rotation, root, first);
                    if best.as_ref().map_or(true, |b| code < *b) {
                        best = Some(code);
                    }
                }
            }
        }
        Signature {
            vertices: polyhedron.num_vertices(),
            faces: polyhedron.num_faces(),
            code: best.unwrap_or_default(),
        }
    }
}

/// Labels vertices in discovery order starting from `root`, whose
/// neighbours are read starting at `first`; every later vertex reads its
/// neighbours starting at the vertex it was discovered from.
fn traverse(rotation: &[Vec<usize>], root: usize, first: usize) -> Vec<usize> {
    const UNSEEN: usize = usize::MAX;
    let mut label = vec![UNSEEN; rotation.len()];
    let mut entry = vec![first; rotation.len()];
    let mut order = vec![root];
    label[root] = 0;
    let mut code = Vec::with_capacity(rotation.len() * 4);

    let mut next = 0;
    while let Some(&v) = order.get(next) {
        next += 1;
        let ring = &rotation[v];
        let start = ring.iter().position(|&w| w == entry[v]).unwrap_or(0);
        code.push(ring.len());
        for step in 0..ring.len() {
            let w = ring[(start + step) % ring.len()];
            if label[w] == UNSEEN {
                label[w] = order.len();
                entry[w] = v;
                order.push(w);
            }
            code.push(label[w]);
        }
    }
    code
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::topology::fixtures::{cube, tetrahedron};

    #[test]
    fn relabelled_copies_match() {
        let cube = cube();
        // Reverse the vertex numbering and move the solid.
        let n = cube.num_vertices();
        let vertices = (0..n)
            .map(|i| cube.position(n - 1 - i) + crate::math::Vector3::new(3.0, -1.0, 2.0))
            .collect();
        let faces = (0..cube.num_faces())
            .map(|f| cube.face_vertices(f).iter().map(|&v| n - 1 - v).collect())
            .collect();
        let moved = Polyhedron::new(vertices, faces).unwrap();
        assert_eq!(Signature::of(&cube), Signature::of(&moved));
    }

    #[test]
    fn mirror_images_match() {
        let tet = tetrahedron();
        let vertices = tet
            .positions()
            .iter()
            .map(|p| Point3::new(-p.x, p.y, p.z))
            .collect();
        let faces = (0..tet.num_faces())
            .map(|f| tet.face_vertices(f).iter().rev().copied().collect())
            .collect();
        let mirrored = Polyhedron::new(vertices, faces).unwrap();
        assert_eq!(Signature::of(&tet), Signature::of(&mirrored));
    }

    #[test]
    fn different_solids_differ() {
        assert_ne!(Signature::of(&cube()), Signature::of(&tetrahedron()));
    }
}
