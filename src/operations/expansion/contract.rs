use std::collections::{HashMap, VecDeque};

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Polyhedron, VertexList};

use super::super::option_set::FaceTypeOptions;
use super::super::utils::is_legal;
use super::super::{Operation, OperationResult, SelectState};

/// Collapses the squares of a rhombic solid, shrinking the faces of one
/// arity back onto each other. The converse of [`Expand`](super::Expand).
#[derive(Debug, Clone, Copy, Default)]
pub struct Contract;

/// The faces of an expanded solid that are not bridges, split into the two
/// families that meet at every vertex.
#[derive(Debug, Clone)]
struct Families {
    classes: [Vec<usize>; 2],
    /// The two non-bridge faces at each vertex.
    at_vertex: Vec<[usize; 2]>,
}

impl Families {
    fn find(polyhedron: &Polyhedron) -> Option<Families> {
        if polyhedron.vertices().any(|vertex| vertex.degree() != 4) {
            return None;
        }
        let is_core: Vec<bool> = polyhedron
            .faces()
            .map(|face| face.adjacent_faces().iter().all(|g| g.num_sides() == 4))
            .collect();
        if polyhedron
            .faces()
            .any(|face| !is_core[face.index()] && face.num_sides() != 4)
        {
            return None;
        }

        let mut at_vertex = Vec::with_capacity(polyhedron.num_vertices());
        let mut links: HashMap<usize, Vec<usize>> = HashMap::new();
        for vertex in polyhedron.vertices() {
            let core: Vec<usize> = polyhedron
                .faces_at(vertex.index())
                .iter()
                .copied()
                .filter(|&f| is_core[f])
                .collect();
            let [f, g] = core[..] else {
                return None;
            };
            links.entry(f).or_default().push(g);
            links.entry(g).or_default().push(f);
            at_vertex.push([f, g]);
        }

        let mut side: HashMap<usize, usize> = HashMap::new();
        for start in (0..polyhedron.num_faces()).filter(|&f| is_core[f]) {
            if side.contains_key(&start) {
                continue;
            }
            side.insert(start, 0);
            let mut queue = VecDeque::from([start]);
            while let Some(f) = queue.pop_front() {
                let here = side[&f];
                for &g in links.get(&f).into_iter().flatten() {
                    match side.get(&g) {
                        Some(&s) if s == here => return None,
                        Some(_) => {}
                        None => {
                            side.insert(g, 1 - here);
                            queue.push_back(g);
                        }
                    }
                }
            }
        }

        let mut classes = [Vec::new(), Vec::new()];
        for f in 0..polyhedron.num_faces() {
            if let Some(&s) = side.get(&f) {
                classes[s].push(f);
            }
        }
        Some(Families { classes, at_vertex })
    }

    /// Index of the family made entirely of `face_type`-gons, preferring
    /// the one holding the lowest face index when both are.
    fn kept(&self, polyhedron: &Polyhedron, face_type: usize) -> Option<usize> {
        (0..2).find(|&s| {
            !self.classes[s].is_empty()
                && self.classes[s]
                    .iter()
                    .all(|&f| polyhedron.face(f).num_sides() == face_type)
        })
    }
}

/// Contracted solid keeping the `face_type`-gons.
fn contracted(polyhedron: &Polyhedron, face_type: usize) -> Result<Polyhedron> {
    let not_rhombic = || OperationError::NotApplicable("solid is not an expanded polyhedron".into());
    let families = Families::find(polyhedron).ok_or_else(not_rhombic)?;
    let kept = families.kept(polyhedron, face_type).ok_or_else(|| {
        OperationError::NotApplicable(format!("no family of {face_type}-gons to contract"))
    })?;
    let corners = &families.classes[1 - kept];

    let slot: HashMap<usize, usize> = corners.iter().enumerate().map(|(i, &f)| (f, i)).collect();
    let corner_of = |v: usize| {
        let [f, g] = families.at_vertex[v];
        slot.get(&f).or_else(|| slot.get(&g)).copied()
    };
    let faces = families.classes[kept]
        .iter()
        .map(|&f| {
            polyhedron
                .face_vertices(f)
                .iter()
                .map(|&v| corner_of(v))
                .collect::<Option<Vec<_>>>()
        })
        .collect::<Option<Vec<_>>>()
        .ok_or_else(not_rhombic)?;

    let center = polyhedron.centroid();
    let directions: Vec<_> = corners
        .iter()
        .map(|&f| (polyhedron.face(f).centroid() - center).normalize())
        .collect();
    let unit_edge = faces
        .first()
        .map(|face| (directions[face[1]] - directions[face[0]]).norm())
        .ok_or_else(not_rhombic)?;
    let scale = polyhedron.edge_length() / unit_edge;
    let vertices: Vec<Point3> = directions.iter().map(|d| center + d * scale).collect();

    let result = Polyhedron::new(vertices, faces)?;
    if !is_legal(&result) || !result.is_regular_faced() {
        return Err(OperationError::NotApplicable("contracted solid is not convex and regular-faced".into()).into());
    }
    Ok(result)
}

/// Face types the solid can be contracted onto, ascending.
pub(super) fn face_types(polyhedron: &Polyhedron) -> Vec<usize> {
    let Some(families) = Families::find(polyhedron) else {
        return Vec::new();
    };
    let mut types: Vec<usize> = families
        .classes
        .iter()
        .filter_map(|class| class.first())
        .map(|&f| polyhedron.face(f).num_sides())
        .collect();
    types.sort_unstable();
    types.dedup();
    types.retain(|&t| contracted(polyhedron, t).is_ok());
    types
}

pub(super) fn contract(polyhedron: &Polyhedron, options: &FaceTypeOptions) -> Result<Polyhedron> {
    let face_type = options
        .face_type
        .ok_or(OperationError::MissingOption("face_type"))?;
    contracted(polyhedron, face_type)
}

impl Operation for Contract {
    type Options = FaceTypeOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &FaceTypeOptions) -> Result<OperationResult> {
        contract(polyhedron, options).map(OperationResult::Solid)
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<FaceTypeOptions> {
        face_types(polyhedron)
            .into_iter()
            .map(|t| FaceTypeOptions { face_type: Some(t) })
            .collect()
    }

    fn hit_option(&self, polyhedron: &Polyhedron, point: &Point3) -> Option<FaceTypeOptions> {
        let sides = polyhedron.hit_face(point)?.num_sides();
        face_types(polyhedron).contains(&sides).then_some(FaceTypeOptions {
            face_type: Some(sides),
        })
    }

    fn select_state(&self, polyhedron: &Polyhedron, options: &FaceTypeOptions) -> Vec<Option<SelectState>> {
        let mut states = vec![None; polyhedron.num_faces()];
        let Some(families) = Families::find(polyhedron) else {
            return states;
        };
        let types = face_types(polyhedron);
        let chosen = options
            .face_type
            .and_then(|t| families.kept(polyhedron, t).map(|kept| (t, kept)));
        for (s, class) in families.classes.iter().enumerate() {
            for &f in class {
                let sides = polyhedron.face(f).num_sides();
                states[f] = match chosen {
                    Some((t, kept)) if t == sides && kept == s => Some(SelectState::Selected),
                    _ if types.contains(&sides) => Some(SelectState::Selectable),
                    _ => None,
                };
            }
        }
        states
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::{Expand, NoOptions};
    use crate::topology::fixtures::{cube, tetrahedron};
    use approx::assert_relative_eq;

    fn expanded(polyhedron: &Polyhedron) -> Polyhedron {
        Expand.apply(polyhedron, &NoOptions).unwrap().into_end_state()
    }

    #[test]
    fn cuboctahedron_contracts_to_tetrahedron() {
        let cuboctahedron = expanded(&tetrahedron());
        assert_eq!(
            Contract.all_options(&cuboctahedron),
            vec![FaceTypeOptions { face_type: Some(3) }]
        );
        let result = Contract
            .apply(&cuboctahedron, &FaceTypeOptions { face_type: Some(3) })
            .unwrap()
            .into_end_state();
        assert_eq!(result.num_vertices(), 4);
        assert!(result.is_regular());
        assert_relative_eq!(result.edge_length(), cuboctahedron.edge_length(), epsilon = 1e-9);
    }

    #[test]
    fn rhombicuboctahedron_contracts_either_way() {
        let rhombic = expanded(&cube());
        assert_eq!(Contract.all_options(&rhombic).len(), 2);
        let to_cube = Contract
            .apply(&rhombic, &FaceTypeOptions { face_type: Some(4) })
            .unwrap()
            .into_end_state();
        assert_eq!((to_cube.num_vertices(), to_cube.num_faces()), (8, 6));
        let to_octahedron = Contract
            .apply(&rhombic, &FaceTypeOptions { face_type: Some(3) })
            .unwrap()
            .into_end_state();
        assert_eq!((to_octahedron.num_vertices(), to_octahedron.num_faces()), (6, 8));
        assert!(to_octahedron.is_regular());
    }

    #[test]
    fn missing_face_type_is_an_error() {
        let rhombic = expanded(&cube());
        assert!(Contract.apply(&rhombic, &FaceTypeOptions::default()).is_err());
    }

    #[test]
    fn platonic_solids_do_not_contract() {
        assert!(Contract.all_options(&cube()).is_empty());
        assert!(Contract.all_options(&tetrahedron()).is_empty());
    }

    #[test]
    fn select_state_marks_chosen_family() {
        let rhombic = expanded(&cube());
        let states = Contract.select_state(&rhombic, &FaceTypeOptions { face_type: Some(3) });
        let selected = states.iter().filter(|s| **s == Some(SelectState::Selected)).count();
        let selectable = states.iter().filter(|s| **s == Some(SelectState::Selectable)).count();
        assert_eq!(selected, 8);
        // The six squares facing the cube's faces; bridges stay untagged.
        assert_eq!(selectable, 6);
    }

    #[test]
    fn hit_picks_face_type() {
        let rhombic = expanded(&cube());
        let triangle = rhombic.faces().find(|f| f.num_sides() == 3).unwrap();
        let option = Contract.hit_option(&rhombic, &triangle.centroid()).unwrap();
        assert_eq!(option.face_type, Some(3));
    }
}
