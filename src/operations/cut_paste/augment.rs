use std::collections::BTreeSet;

use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Cap, Polyhedron, VertexList};

use super::super::option_set::AugmentOptions;
use super::super::options::{Gyration, SearchOptions, Using};
use super::super::utils::is_legal;
use super::super::{Operation, OperationResult, SelectState};
use super::templates::CapTemplate;
use super::utils::{alignment, attach_cap, cap_with_inner, get_cupola_gyrate};

/// Builds a pyramid, fastigium, cupola or rotunda onto a face.
#[derive(Debug, Clone, Copy, Default)]
pub struct Augment;

/// One legal placement of a cap on a face.
struct Placement {
    result: Polyhedron,
    gyrate: Option<Gyration>,
}

fn placements(polyhedron: &Polyhedron, face: usize, using: Using) -> Vec<Placement> {
    let Ok(template) = CapTemplate::new(using) else {
        return Vec::new();
    };
    let offset = polyhedron.num_vertices();
    let mut found: Vec<Placement> = (0..template.period())
        .filter_map(|rotation| attach_cap(polyhedron, face, &template, rotation).ok())
        .filter(is_legal)
        .map(|result| {
            let inner: BTreeSet<usize> = (offset..result.num_vertices()).collect();
            let gyrate = cap_with_inner(&result, &inner).map(|cap| get_cupola_gyrate(&result, &cap));
            Placement { result, gyrate }
        })
        .collect();
    // Ortho placements first: they are the default when both are legal.
    found.sort_by_key(|placement| placement.gyrate != Some(Gyration::Ortho));
    found
}

/// Legal option sets for one face: one per gyration when the face can take
/// the cap both ways, otherwise one with the gyration left open.
fn face_options(polyhedron: &Polyhedron, face: usize) -> Vec<AugmentOptions> {
    let sides = polyhedron.face(face).num_sides();
    let mut options = Vec::new();
    for using in Using::for_face(sides) {
        let found = placements(polyhedron, face, using);
        let gyrations: BTreeSet<Gyration> = found.iter().filter_map(|p| p.gyrate).collect();
        if gyrations.len() > 1 {
            options.extend(gyrations.into_iter().map(|gyrate| AugmentOptions {
                face: Some(face),
                using: Some(using),
                gyrate: Some(gyrate),
            }));
        } else if !found.is_empty() {
            options.push(AugmentOptions {
                face: Some(face),
                using: Some(using),
                gyrate: None,
            });
        }
    }
    options
}

impl Augment {
    fn choose(polyhedron: &Polyhedron, options: &AugmentOptions) -> Result<(Using, Placement)> {
        let face = options.face.ok_or(OperationError::MissingOption("face"))?;
        if face >= polyhedron.num_faces() {
            return Err(OperationError::InvalidInput(format!("no face {face}")).into());
        }
        let sides = polyhedron.face(face).num_sides();
        let usings = match options.using {
            Some(using) => vec![using],
            None => Using::for_face(sides),
        };
        for using in usings {
            let chosen = placements(polyhedron, face, using)
                .into_iter()
                .find(|p| options.gyrate.is_none() || p.gyrate == options.gyrate);
            if let Some(placement) = chosen {
                return Ok((using, placement));
            }
        }
        Err(OperationError::NotApplicable(format!("face {face} cannot be augmented that way")).into())
    }
}

impl Operation for Augment {
    type Options = AugmentOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &AugmentOptions) -> Result<OperationResult> {
        let (_, placement) = Self::choose(polyhedron, options)?;
        Ok(OperationResult::Solid(placement.result))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<AugmentOptions> {
        (0..polyhedron.num_faces())
            .flat_map(|face| face_options(polyhedron, face))
            .collect()
    }

    fn describe(&self, polyhedron: &Polyhedron, options: &AugmentOptions) -> Result<SearchOptions> {
        let (using, placement) = Self::choose(polyhedron, options)?;
        let face = polyhedron.face(options.face.ok_or(OperationError::MissingOption("face"))?);
        let caps: Vec<Cap> = Cap::get_all(polyhedron)
            .into_iter()
            .filter(|cap| cap.num_sides() == face.num_sides())
            .collect();
        Ok(SearchOptions {
            using: Some(using),
            gyrate: placement.gyrate,
            align: Some(alignment(polyhedron, &face.normal(), usize::MAX, &caps)),
            ..SearchOptions::default()
        })
    }

    fn hit_option(&self, polyhedron: &Polyhedron, point: &Point3) -> Option<AugmentOptions> {
        let face = polyhedron.hit_face(point)?.index();
        (!face_options(polyhedron, face).is_empty()).then_some(AugmentOptions {
            face: Some(face),
            ..AugmentOptions::default()
        })
    }

    fn select_state(&self, polyhedron: &Polyhedron, options: &AugmentOptions) -> Vec<Option<SelectState>> {
        (0..polyhedron.num_faces())
            .map(|face| {
                if options.face == Some(face) {
                    Some(SelectState::Selected)
                } else if !face_options(polyhedron, face).is_empty() {
                    Some(SelectState::Selectable)
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::fixtures::{cube, tetrahedron};

    #[test]
    fn tetrahedron_faces_take_pyramids() {
        let tet = tetrahedron();
        let options = Augment.all_options(&tet);
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(|o| o.using == Some(Using::Y3) && o.gyrate.is_none()));
    }

    #[test]
    fn augmenting_tetrahedron_gives_bipyramid() {
        let tet = tetrahedron();
        let result = Augment
            .apply(
                &tet,
                &AugmentOptions {
                    face: Some(0),
                    ..AugmentOptions::default()
                },
            )
            .unwrap()
            .into_end_state();
        assert_eq!(result.num_vertices(), 5);
        assert_eq!(result.num_faces(), 6);
        assert!(result.is_regular_faced());
        assert_eq!(Cap::get_all(&result).len(), 2);
    }

    #[test]
    fn missing_face_is_an_error() {
        let tet = tetrahedron();
        assert!(Augment.apply(&tet, &AugmentOptions::default()).is_err());
    }

    #[test]
    fn cube_faces_take_pyramids_only() {
        let cube = cube();
        let options = Augment.all_options(&cube);
        assert_eq!(options.len(), 6);
        assert!(options.iter().all(|o| o.using == Some(Using::Y4)));
        let fastigium = AugmentOptions {
            face: Some(0),
            using: Some(Using::U2),
            gyrate: None,
        };
        assert!(Augment.apply(&cube, &fastigium).is_err());
    }

    #[test]
    fn select_state_marks_chosen_face() {
        let tet = tetrahedron();
        let options = AugmentOptions {
            face: Some(2),
            ..AugmentOptions::default()
        };
        let states = Augment.select_state(&tet, &options);
        assert_eq!(states[2], Some(SelectState::Selected));
        assert_eq!(states[0], Some(SelectState::Selectable));
    }

    #[test]
    fn hit_resolves_face_under_point() {
        let tet = tetrahedron();
        let center = tet.face(1).centroid();
        let hit = Augment.hit_option(&tet, &center).unwrap();
        assert_eq!(hit.face, Some(1));
    }
}
