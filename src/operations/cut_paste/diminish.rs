use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Cap, CapKind, Polyhedron};

use super::super::option_set::CapOptions;
use super::super::options::{SearchOptions, Using};
use super::super::{Operation, OperationResult, SelectState};
use super::utils::{get_cap_alignment, get_cupola_gyrate, remove_cap};

/// Removes a cap, closing the hole with its base polygon.
#[derive(Debug, Clone, Copy, Default)]
pub struct Diminish;

/// The cap an option set targets, checked against `polyhedron`.
pub(super) fn target_cap<'a>(polyhedron: &Polyhedron, options: &'a CapOptions, operation: &str) -> Result<&'a Cap> {
    let cap = options
        .cap
        .as_ref()
        .ok_or_else(|| OperationError::InvalidInput(format!("{operation} needs a cap")))?;
    if !Cap::get_all(polyhedron).contains(cap) {
        return Err(OperationError::NotApplicable(format!(
            "the {} is not a cap of this solid",
            cap.kind()
        ))
        .into());
    }
    Ok(cap)
}

/// Selected faces of the chosen cap, selectable faces of every other cap.
pub(super) fn cap_select_state(
    polyhedron: &Polyhedron,
    caps: &[Cap],
    chosen: Option<&Cap>,
) -> Vec<Option<SelectState>> {
    let mut states = vec![None; polyhedron.num_faces()];
    for cap in caps {
        for &face in cap.faces() {
            states[face] = Some(SelectState::Selectable);
        }
    }
    if let Some(cap) = chosen {
        for &face in cap.faces() {
            states[face] = Some(SelectState::Selected);
        }
    }
    states
}

impl Operation for Diminish {
    type Options = CapOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Result<OperationResult> {
        let cap = target_cap(polyhedron, options, "diminish")?;
        Ok(OperationResult::Solid(remove_cap(polyhedron, cap)))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<CapOptions> {
        Cap::get_all(polyhedron)
            .into_iter()
            .map(|cap| CapOptions { cap: Some(cap) })
            .collect()
    }

    fn describe(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Result<SearchOptions> {
        let cap = options
            .cap
            .as_ref()
            .ok_or_else(|| OperationError::InvalidInput("diminish needs a cap".into()))?;
        let gyrate = matches!(cap.kind(), CapKind::Cupola | CapKind::Rotunda)
            .then(|| get_cupola_gyrate(polyhedron, cap));
        Ok(SearchOptions {
            using: Some(Using::for_cap(cap)),
            gyrate,
            align: Some(get_cap_alignment(polyhedron, cap)),
            ..SearchOptions::default()
        })
    }

    fn hit_option(&self, polyhedron: &Polyhedron, point: &Point3) -> Option<CapOptions> {
        Cap::find(polyhedron, point).map(|cap| CapOptions { cap: Some(cap) })
    }

    fn select_state(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Vec<Option<SelectState>> {
        cap_select_state(polyhedron, &Cap::get_all(polyhedron), options.cap.as_ref())
    }
}
