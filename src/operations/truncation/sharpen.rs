use std::collections::HashMap;

use crate::error::{OperationError, Result};
use crate::math::{Point3, GEOMETRY_TOLERANCE};
use crate::topology::{Face, Polyhedron, VertexList};

use super::super::option_set::FaceTypeOptions;
use super::super::utils::{dedupe_cyclic, is_legal};
use super::super::{Operation, OperationResult, SelectState};

/// Grows the faces around every face of one arity until that face shrinks
/// to a point. The converse of [`Truncate`](super::Truncate) and
/// [`Rectify`](super::Rectify).
#[derive(Debug, Clone, Copy, Default)]
pub struct Sharpen;

/// Point above `face` where the planes of its neighbours meet.
#[allow(clippy::cast_precision_loss)]
fn apex(face: &Face<'_>) -> Option<Point3> {
    let center = face.centroid();
    let normal = face.normal();
    let heights: Vec<f64> = face
        .adjacent_faces()
        .iter()
        .map(|neighbour| {
            let n = neighbour.normal();
            let slope = normal.dot(&n);
            (slope.abs() > GEOMETRY_TOLERANCE)
                .then(|| (neighbour.centroid() - center).dot(&n) / slope)
        })
        .collect::<Option<_>>()?;
    if heights.is_empty() {
        return None;
    }
    let height = heights.iter().sum::<f64>() / heights.len() as f64;
    (height > 0.0).then(|| center + normal * height)
}

fn sharpened(polyhedron: &Polyhedron, face_type: usize) -> Result<Polyhedron> {
    let not_applicable = |reason: &str| -> crate::error::PolyhedraError {
        OperationError::NotApplicable(format!("cannot sharpen {face_type}-gons: {reason}")).into()
    };
    let targets: Vec<usize> = polyhedron
        .faces()
        .filter(|face| face.num_sides() == face_type)
        .map(|face| face.index())
        .collect();
    if targets.is_empty() {
        return Err(not_applicable("no such faces"));
    }
    let is_target = |f: usize| polyhedron.face(f).num_sides() == face_type;
    if targets
        .iter()
        .any(|&f| polyhedron.face(f).adjacent_faces().iter().any(|g| is_target(g.index())))
    {
        return Err(not_applicable("faces touch along an edge"));
    }
    if polyhedron
        .vertices()
        .any(|vertex| !polyhedron.faces_at(vertex.index()).iter().any(|&f| is_target(f)))
    {
        return Err(not_applicable("a vertex lies on none of them"));
    }

    let slot: HashMap<usize, usize> = targets.iter().enumerate().map(|(i, &f)| (f, i)).collect();
    let vertices = targets
        .iter()
        .map(|&f| apex(&polyhedron.face(f)))
        .collect::<Option<Vec<_>>>()
        .ok_or_else(|| not_applicable("neighbouring planes do not meet above the face"))?;
    let faces = polyhedron
        .faces()
        .filter(|face| !is_target(face.index()))
        .map(|face| {
            let ring = face
                .adjacent_faces()
                .iter()
                .filter_map(|g| slot.get(&g.index()).copied())
                .collect();
            dedupe_cyclic(ring)
        })
        .collect();

    let result = Polyhedron::new(vertices, faces)?;
    if !is_legal(&result) || (polyhedron.is_regular_faced() && !result.is_regular_faced()) {
        return Err(not_applicable("result is not a regular convex solid"));
    }
    Ok(result)
}

/// Arities whose faces can be sharpened away, ascending.
fn face_types(polyhedron: &Polyhedron) -> Vec<usize> {
    polyhedron
        .face_arities()
        .into_keys()
        .filter(|&t| sharpened(polyhedron, t).is_ok())
        .collect()
}

impl Operation for Sharpen {
    type Options = FaceTypeOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &FaceTypeOptions) -> Result<OperationResult> {
        let face_type = options
            .face_type
            .ok_or(OperationError::MissingOption("face_type"))?;
        sharpened(polyhedron, face_type).map(OperationResult::Solid)
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
        let types = face_types(polyhedron);
        polyhedron
            .faces()
            .map(|face| {
                let sides = face.num_sides();
                if options.face_type == Some(sides) {
                    Some(SelectState::Selected)
                } else {
                    types.contains(&sides).then_some(SelectState::Selectable)
                }
            })
            .collect()
    }
}
