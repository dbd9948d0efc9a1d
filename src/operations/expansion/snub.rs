use std::f64::consts::FRAC_PI_2;

use crate::error::{OperationError, Result};
use crate::math::rotate_about;
use crate::topology::{Polyhedron, VertexList};

use super::super::option_set::TwistOptions;
use super::super::options::{SearchOptions, TwistDirection};
use super::super::utils::{is_legal, require_regular};
use super::super::{AnimationData, Operation, OperationResult};
use super::utils::{Bridge, FaceCorners};

/// Pulls the faces of a regular solid apart while turning each about its
/// normal, filling the gaps with triangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct Snub;

const SCAN_STEPS: usize = 180;
const BISECTIONS: usize = 60;

/// Distances across one old edge `a → b` between faces `f` and `g` after
/// pushing every face out by `offset` and turning it by `angle`.
struct Gap {
    side: f64,
    rising: f64,
    falling: f64,
}

struct EdgeProbe<'a> {
    polyhedron: &'a Polyhedron,
    a: usize,
    b: usize,
    f: usize,
    g: usize,
}

impl EdgeProbe<'_> {
    fn gap(&self, offset: f64, angle: f64) -> Gap {
        let place = |face: usize, v: usize| {
            let face = self.polyhedron.face(face);
            let normal = face.normal();
            rotate_about(self.polyhedron.position(v), &face.centroid(), &normal, angle) + normal * offset
        };
        let (fa, fb) = (place(self.f, self.a), place(self.f, self.b));
        let (ga, gb) = (place(self.g, self.a), place(self.g, self.b));
        Gap {
            side: (fa - ga).norm(),
            rising: (fa - gb).norm(),
            falling: (fb - ga).norm(),
        }
    }

    /// Offset at which the corners of one vertex are one edge apart.
    fn offset_for(&self, angle: f64, edge: f64) -> f64 {
        let (mut low, mut high) = (0.0, 4.0 * edge);
        for _ in 0..BISECTIONS {
            let mid = (low + high) / 2.0;
            if self.gap(mid, angle).side < edge {
                low = mid;
            } else {
                high = mid;
            }
        }
        (low + high) / 2.0
    }
}

/// Offset, signed turning angle and bridge diagonal that make every edge
/// of the snub equal to the current edge length.
#[allow(clippy::cast_precision_loss)]
fn solve(polyhedron: &Polyhedron, twist: TwistDirection) -> Option<(f64, f64, Bridge)> {
    let edge = polyhedron.edges().into_iter().next()?;
    let probe = EdgeProbe {
        polyhedron,
        a: edge.v1(),
        b: edge.v2(),
        f: edge.face().index(),
        g: edge.twin().face().index(),
    };
    let length = polyhedron.edge_length();
    let sign = twist.sign();

    // The diagonal that shortens as the faces turn is the one to keep.
    let nudge = sign * 0.01;
    let probe_gap = probe.gap(probe.offset_for(nudge, length), nudge);
    let bridge = if probe_gap.rising < probe_gap.falling {
        Bridge::Rising
    } else {
        Bridge::Falling
    };
    let diagonal = |turn: f64| {
        let angle = sign * turn;
        let gap = probe.gap(probe.offset_for(angle, length), angle);
        let value = match bridge {
            Bridge::Rising => gap.rising,
            _ => gap.falling,
        };
        value - length
    };

    let step = FRAC_PI_2 / SCAN_STEPS as f64;
    let mut low = 0.0;
    let mut high = None;
    for i in 1..=SCAN_STEPS {
        let turn = step * i as f64;
        if diagonal(turn) <= 0.0 {
            high = Some(turn);
            break;
        }
        low = turn;
    }
    let mut high = high?;
    for _ in 0..BISECTIONS {
        let mid = (low + high) / 2.0;
        if diagonal(mid) > 0.0 {
            low = mid;
        } else {
            high = mid;
        }
    }
    let angle = sign * (low + high) / 2.0;
    Some((probe.offset_for(angle, length), angle, bridge))
}

pub(super) fn snubbed(polyhedron: &Polyhedron, twist: TwistDirection) -> Result<AnimationData> {
    require_regular(polyhedron, "snub")?;
    let (offset, angle, bridge) = solve(polyhedron, twist)
        .ok_or_else(|| OperationError::NotApplicable("no snub turning angle found".into()))?;
    let corners = FaceCorners::new(polyhedron);
    let data = AnimationData {
        start: Polyhedron::from_raw(corners.collapsed(polyhedron), corners.faces(polyhedron, bridge)),
        end_vertices: corners.positions(polyhedron, offset, angle),
    };
    let end = data.end_state();
    if !is_legal(&end) || !end.is_regular_faced() {
        return Err(OperationError::NotApplicable("snub result is not a regular-faced convex solid".into()).into());
    }
    Ok(data)
}

/// Twist choices for snubbing `polyhedron`. Both senses of the tetrahedron
/// give the same icosahedron, so it offers only one.
pub(super) fn twist_options(polyhedron: &Polyhedron) -> Vec<TwistOptions> {
    if !polyhedron.is_regular() {
        return Vec::new();
    }
    if polyhedron.num_faces() == 4 {
        return snubbed(polyhedron, TwistDirection::Left)
            .map(|_| TwistOptions::default())
            .into_iter()
            .collect();
    }
    [TwistDirection::Left, TwistDirection::Right]
        .into_iter()
        .filter(|&twist| snubbed(polyhedron, twist).is_ok())
        .map(|twist| TwistOptions { twist: Some(twist) })
        .collect()
}

impl Operation for Snub {
    type Options = TwistOptions;

    fn apply(&self, polyhedron: &Polyhedron, options: &TwistOptions) -> Result<OperationResult> {
        let twist = options.twist.unwrap_or(TwistDirection::Left);
        snubbed(polyhedron, twist).map(OperationResult::Animated)
    }

    fn all_options(&self, polyhedron: &Polyhedron) -> Vec<TwistOptions> {
        twist_options(polyhedron)
    }

    fn describe(&self, _: &Polyhedron, options: &TwistOptions) -> Result<SearchOptions> {
        Ok(SearchOptions {
            twist: options.twist,
            ..SearchOptions::default()
        })
    }
}
