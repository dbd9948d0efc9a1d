use std::collections::BTreeSet;

use crate::math::Point3;

use super::polyhedron::Polyhedron;

/// A face being edited, remembering which face of the source polyhedron it
/// came from (`None` for faces added by the edit).
#[derive(Debug, Clone)]
pub struct FaceDraft {
    source: Option<usize>,
    vertices: Vec<usize>,
}

impl FaceDraft {
    /// Index of the face in the source polyhedron, if it came from there.
    #[must_use]
    pub fn source(&self) -> Option<usize> {
        self.source
    }

    #[must_use]
    pub fn vertices(&self) -> &[usize] {
        &self.vertices
    }
}

/// Builder for a new [`Polyhedron`] snapshot.
///
/// Edits apply in call order to a private draft; [`SolidBuilder::build`]
/// commits the draft as a fresh arena. Vertices added by
/// [`SolidBuilder::add_vertices`] take the next indices in order, so callers
/// can compute their indices from [`SolidBuilder::num_vertices`] beforehand.
#[derive(Debug, Clone, Default)]
pub struct SolidBuilder {
    vertices: Vec<Point3>,
    faces: Vec<FaceDraft>,
}

impl SolidBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a builder with a copy of `polyhedron`.
    #[must_use]
    pub fn from_polyhedron(polyhedron: &Polyhedron) -> Self {
        Self {
            vertices: polyhedron.positions().to_vec(),
            faces: (0..polyhedron.num_faces())
                .map(|i| FaceDraft {
                    source: Some(i),
                    vertices: polyhedron.face_vertices(i).to_vec(),
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Appends vertices; they take the next free indices in order.
    #[must_use]
    pub fn add_vertices(mut self, positions: impl IntoIterator<Item = Point3>) -> Self {
        self.vertices.extend(positions);
        self
    }

    /// Removes the faces that came from the given source face indices.
    #[must_use]
    pub fn without_faces(mut self, faces: impl IntoIterator<Item = usize>) -> Self {
        let removed: BTreeSet<usize> = faces.into_iter().collect();
        self.faces
            .retain(|face| face.source.is_none_or(|s| !removed.contains(&s)));
        self
    }

    /// Appends faces given as vertex index sequences.
    #[must_use]
    pub fn add_faces<F: Into<Vec<usize>>>(mut self, faces: impl IntoIterator<Item = F>) -> Self {
        self.faces.extend(faces.into_iter().map(|f| FaceDraft {
            source: None,
            vertices: f.into(),
        }));
        self
    }

    /// Rewrites every face's vertex sequence.
    #[must_use]
    pub fn map_faces(mut self, mut f: impl FnMut(&FaceDraft) -> Vec<usize>) -> Self {
        for face in &mut self.faces {
            face.vertices = f(face);
        }
        self
    }

    /// Moves every vertex.
    #[must_use]
    pub fn map_vertices(mut self, mut f: impl FnMut(usize, &Point3) -> Point3) -> Self {
        for (i, p) in self.vertices.iter_mut().enumerate() {
            *p = f(i, p);
        }
        self
    }

    /// Drops vertices that no face references, renumbering the rest in order.
    #[must_use]
    pub fn remove_extraneous_vertices(mut self) -> Self {
        let mut used = vec![false; self.vertices.len()];
        for face in &self.faces {
            for &v in &face.vertices {
                used[v] = true;
            }
        }
        let mut remap = vec![usize::MAX; self.vertices.len()];
        let mut kept = Vec::new();
        for (i, p) in self.vertices.iter().enumerate() {
            if used[i] {
                remap[i] = kept.len();
                kept.push(*p);
            }
        }
        for face in &mut self.faces {
            for v in &mut face.vertices {
                *v = remap[*v];
            }
        }
        self.vertices = kept;
        self
    }

    /// Commits the draft as a new polyhedron.
    #[must_use]
    pub fn build(self) -> Polyhedron {
        Polyhedron::from_raw(
            self.vertices,
            self.faces.into_iter().map(|f| f.vertices).collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::polyhedron::tests::{cube, tetrahedron};

    #[test]
    fn edits_leave_source_untouched() {
        let tet = tetrahedron();
        let changed = tet.with_changes(|b| b.without_faces([0]));
        assert_eq!(tet.num_faces(), 4);
        assert_eq!(changed.num_faces(), 3);
    }

    #[test]
    fn added_vertices_take_next_indices() {
        let tet = tetrahedron();
        let apex = Point3::new(0.0, 0.0, 5.0);
        let changed = tet.with_changes(|b| {
            let index = b.num_vertices();
            b.add_vertices([apex])
                .without_faces([0])
                .add_faces([vec![0, 1, index], vec![1, 2, index], vec![2, 0, index]])
        });
        assert_eq!(changed.num_vertices(), 5);
        assert_eq!(changed.num_faces(), 6);
        assert!(changed.is_valid());
    }

    #[test]
    fn map_faces_sees_source_indices() {
        let cube = cube();
        let changed = cube.with_changes(|b| {
            b.without_faces([0]).map_faces(|face| {
                assert_ne!(face.source(), Some(0));
                face.vertices().to_vec()
            })
        });
        assert_eq!(changed.num_faces(), 5);
    }

    #[test]
    fn extraneous_vertices_are_dropped() {
        let tet = tetrahedron();
        let changed = tet
            .with_changes(|b| b.add_vertices([Point3::new(9.0, 9.0, 9.0)]))
            .without_extraneous_vertices();
        assert_eq!(changed.num_vertices(), 4);
        assert!(changed.is_valid());
    }
}
