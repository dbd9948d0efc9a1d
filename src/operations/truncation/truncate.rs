use std::collections::HashMap;
use std::f64::consts::PI;

use crate::error::Result;
use crate::topology::Polyhedron;

use super::super::option_set::NoOptions;
use super::super::utils::require_regular;
use super::super::{AnimationData, Operation, OperationResult};
use super::utils::cut_faces;

/// Cuts every vertex of a regular solid so that the old faces become
/// regular polygons with twice the sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct Truncate;

/// Fraction of each edge cut away at either end so an `n`-gon becomes a
/// regular `2n`-gon.
#[allow(clippy::cast_precision_loss)]
fn cut_fraction(n: usize) -> f64 {
    1.0 / (2.0 + 2.0 * (PI / n as f64).cos())
}

fn truncated(polyhedron: &Polyhedron) -> Result<AnimationData> {
    require_regular(polyhedron, "truncate")?;
    let t = cut_fraction(polyhedron.face_vertices(0).len());

    let mut slots: HashMap<(usize, usize), usize> = HashMap::new();
    let mut start = Vec::new();
    let mut end_vertices = Vec::new();
    for edge in polyhedron.edges() {
        for (v, w) in [(edge.v1(), edge.v2()), (edge.v2(), edge.v1())] {
            let (from, to) = (polyhedron.position(v), polyhedron.position(w));
            slots.insert((v, w), start.len());
            start.push(*from);
            end_vertices.push(from + (to - from) * t);
        }
    }
    let faces = cut_faces(polyhedron, |v, w| slots[&(v, w)]);
    Ok(AnimationData {
        start: Polyhedron::from_raw(start, faces),
        end_vertices,
    })
}

impl Operation for Truncate {
    type Options = NoOptions;

    fn apply(&self, polyhedron: &Polyhedron, _: &NoOptions) -> Result<OperationResult> {
        truncated(polyhedron).map(OperationResult::Animated)
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<NoOptions> {
        if polyhedron.is_regular() {
            vec![NoOptions]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::fixtures::{cube, tetrahedron};
    use approx::assert_relative_eq;

    #[test]
    fn truncated_tetrahedron() {
        let tet = tetrahedron();
        let end = Truncate.apply(&tet, &NoOptions).unwrap().into_end_state();
        assert_eq!(end.num_vertices(), 12);
        assert_eq!(end.count_faces_with_sides(3), 4);
        assert_eq!(end.count_faces_with_sides(6), 4);
        assert!(end.is_convex());
        assert!(end.is_regular_faced());
        assert_relative_eq!(end.edge_length(), tet.edge_length() / 3.0, epsilon = 1e-9);
    }

    #[test]
    fn truncated_cube_has_regular_octagons() {
        let end = Truncate.apply(&cube(), &NoOptions).unwrap().into_end_state();
        assert_eq!(end.count_faces_with_sides(8), 6);
        assert_eq!(end.count_faces_with_sides(3), 8);
        assert!(end.is_regular_faced());
    }

    #[test]
    fn only_regular_solids_truncate() {
        let truncated = Truncate.apply(&tetrahedron(), &NoOptions).unwrap().into_end_state();
        assert!(Truncate.all_options(&truncated).is_empty());
        assert!(Truncate.apply(&truncated, &NoOptions).is_err());
    }
}
