use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Cap, CapKind, Polyhedron};

use super::super::option_set::CapOptions;
use super::super::options::{SearchOptions, Using};
use super::super::utils::is_legal;
use super::super::{Operation, OperationResult, SelectState};
use super::diminish::{cap_select_state, target_cap};
use super::templates::CapTemplate;
use super::utils::{attach_cap, get_cap_alignment, get_cupola_gyrate, remove_cap, same_top};

/// Turns a cupola or rotunda by one base step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gyrate;

fn is_rotatable(cap: &Cap) -> bool {
    matches!(cap.kind(), CapKind::Cupola | CapKind::Rotunda)
}

/// The solid with `cap` rebuilt in its other orientation, if that is convex.
fn gyrated(polyhedron: &Polyhedron, cap: &Cap) -> Option<Polyhedron> {
    let template = CapTemplate::new(Using::for_cap(cap)).ok()?;
    let removed = remove_cap(polyhedron, cap);
    let base = removed.num_faces().checked_sub(1)?;
    let offset = removed.num_vertices();
    let top = &cap.inner_vertices()[..cap.top_size()];
    (0..template.period())
        .filter_map(|rotation| attach_cap(&removed, base, &template, rotation).ok())
        .find(|result| {
            let added: Vec<usize> = (offset..result.num_vertices()).collect();
            !same_top(result, &added[added.len().saturating_sub(top.len())..], polyhedron, top)
        })
        .filter(is_legal)
}

fn rotatable_caps(polyhedron: &Polyhedron) -> Vec<Cap> {
    Cap::get_all(polyhedron)
        .into_iter()
        .filter(|cap| is_rotatable(cap) && gyrated(polyhedron, cap).is_some())
        .collect()
}

impl Operation for Gyrate {
    type Options = CapOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Result<OperationResult> {
        let cap = target_cap(polyhedron, options, "gyrate")?;
        if !is_rotatable(cap) {
            return Err(OperationError::NotApplicable(format!("a {} cannot be gyrated", cap.kind())).into());
        }
        let result = gyrated(polyhedron, cap)
            .ok_or_else(|| OperationError::NotApplicable("gyrating this cap breaks convexity".into()))?;
        Ok(OperationResult::Solid(result))
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<CapOptions> {
        rotatable_caps(polyhedron)
            .into_iter()
            .map(|cap| CapOptions { cap: Some(cap) })
            .collect()
    }

    fn describe(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Result<SearchOptions> {
        let cap = options
            .cap
            .as_ref()
            .ok_or_else(|| OperationError::InvalidInput("gyrate needs a cap".into()))?;
        Ok(SearchOptions {
            gyrate: Some(get_cupola_gyrate(polyhedron, cap)),
            align: Some(get_cap_alignment(polyhedron, cap)),
            ..SearchOptions::default()
        })
    }

    fn hit_option(&self, polyhedron: &Polyhedron, point: &Point3) -> Option<CapOptions> {
        Cap::find(polyhedron, point)
            .filter(is_rotatable)
            .map(|cap| CapOptions { cap: Some(cap) })
    }

    fn select_state(&self, polyhedron: &Polyhedron, options: &CapOptions) -> Vec<Option<SelectState>> {
        cap_select_state(polyhedron, &rotatable_caps(polyhedron), options.cap.as_ref())
    }
}
