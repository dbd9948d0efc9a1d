use std::collections::{BTreeSet, HashMap};
use std::f64::consts::PI;

use crate::math::{antiprism_height, rotate_about, Point3, Vector3};
use crate::topology::{Cap, Polyhedron, VertexList, VertexRing};

use super::super::options::TwistDirection;
use super::super::utils::{is_legal, is_parallel};
use super::super::AnimationData;

/// A solid that is one cap on its base face, or two caps sharing one
/// boundary. Elongation stretches it away from `cap`.
#[derive(Debug, Clone)]
pub(crate) struct Capstone {
    pub(crate) cap: Cap,
}

impl Capstone {
    pub(crate) fn find(polyhedron: &Polyhedron) -> Option<Capstone> {
        let caps = Cap::get_all_with_base(polyhedron);
        if let Some(whole) = caps.iter().find(|cap| cap.is_whole_solid(polyhedron)) {
            return Some(Capstone { cap: whole.clone() });
        }
        caps.iter().find_map(|cap| {
            let ring: BTreeSet<usize> = cap.boundary_indices().iter().copied().collect();
            caps.iter()
                .any(|other| {
                    other != cap
                        && other.faces().len() + cap.faces().len() == polyhedron.num_faces()
                        && other.boundary_indices().iter().copied().collect::<BTreeSet<_>>() == ring
                })
                .then(|| Capstone { cap: cap.clone() })
        })
    }
}

/// Inserts a band of faces under `cap`, pushing the cap out along its axis.
///
/// The boundary ring is duplicated; faces outside the cap move to the
/// copy. Without a twist the band is squares and the cap moves one edge
/// length. With a twist the band is triangles, the cap turns half a base
/// step in the twist's sense and moves by the antiprism height.
pub(crate) fn elongate_at(
    polyhedron: &Polyhedron,
    cap: &Cap,
    twist: Option<TwistDirection>,
) -> AnimationData {
    let ring = cap.boundary_indices();
    let n = ring.len();
    let offset = polyhedron.num_vertices();
    let copies: HashMap<usize, usize> = ring.iter().enumerate().map(|(k, &b)| (b, offset + k)).collect();
    let cap_faces: BTreeSet<usize> = cap.faces().iter().copied().collect();
    let d = |k: usize| offset + k % n;
    let b = |k: usize| ring[k % n];
    let band: Vec<Vec<usize>> = match twist {
        None => (0..n).map(|k| vec![b(k), d(k), d(k + 1), b(k + 1)]).collect(),
        Some(TwistDirection::Left) => (0..n)
            .flat_map(|k| [vec![b(k), d(k), d(k + 1)], vec![b(k), d(k + 1), b(k + 1)]])
            .collect(),
        Some(TwistDirection::Right) => (0..n)
            .flat_map(|k| [vec![b(k + 1), d(k), d(k + 1)], vec![b(k), d(k), b(k + 1)]])
            .collect(),
    };
    let copied_positions: Vec<Point3> = ring.iter().map(|&v| *polyhedron.position(v)).collect();
    let start = polyhedron.with_changes(|solid| {
        solid
            .add_vertices(copied_positions)
            .map_faces(|face| {
                if face.source().is_some_and(|f| cap_faces.contains(&f)) {
                    face.vertices().to_vec()
                } else {
                    face.vertices()
                        .iter()
                        .map(|v| copies.get(v).copied().unwrap_or(*v))
                        .collect()
                }
            })
            .add_faces(band)
    });

    let axis = cap.normal(polyhedron);
    let center = cap.boundary(polyhedron).centroid();
    let edge = polyhedron.edge_length();
    #[allow(clippy::cast_precision_loss)]
    let (angle, height) = match twist {
        None => (0.0, edge),
        Some(direction) => (direction.sign() * PI / n as f64, edge * antiprism_height(n)),
    };
    let moved: BTreeSet<usize> = cap.all_vertices().into_iter().collect();
    let end_vertices = start
        .positions()
        .iter()
        .enumerate()
        .map(|(i, p)| {
            if moved.contains(&i) {
                rotate_about(p, &center, &axis, angle) + axis * height
            } else {
                *p
            }
        })
        .collect();
    AnimationData { start, end_vertices }
}

/// Kind of band between a cap and the rest of the solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BandKind {
    Prism,
    Antiprism,
}

/// A prism or antiprism band directly under a cap.
#[derive(Debug, Clone)]
pub(crate) struct Band {
    pub(crate) kind: BandKind,
    /// Vertex each cap boundary vertex lands on once the band is removed,
    /// by boundary position.
    pub(crate) targets: Vec<usize>,
    pub(crate) faces: Vec<usize>,
}

/// The band across `cap`'s boundary, if the faces there form one whose
/// far ring is congruent with the boundary.
pub(crate) fn band_under(polyhedron: &Polyhedron, cap: &Cap) -> Option<Band> {
    let ring = cap.boundary_indices();
    let n = ring.len();
    let outer: Vec<usize> = (0..n)
        .map(|k| polyhedron.edge_face(ring[(k + 1) % n], ring[k]))
        .collect::<Option<_>>()?;
    let arities: BTreeSet<usize> = outer.iter().map(|&f| polyhedron.face(f).num_sides()).collect();
    let inner: BTreeSet<usize> = cap.all_vertices().into_iter().collect();
    let (kind, targets, faces) = match arities.into_iter().collect::<Vec<_>>().as_slice() {
        [4] => {
            let targets: Vec<usize> = (0..n)
                .map(|k| polyhedron.face(outer[k]).next_vertex(ring[k]))
                .collect();
            (BandKind::Prism, targets, outer)
        }
        [3] => {
            // Apex of the triangle under side k - 1 sits below boundary vertex k.
            let apexes: Vec<usize> = (0..n)
                .map(|k| polyhedron.face(outer[k]).next_vertex(ring[k]))
                .collect();
            let targets: Vec<usize> = (0..n).map(|k| apexes[(k + n - 1) % n]).collect();
            let mut faces = outer;
            for k in 0..n {
                faces.push(polyhedron.edge_face(ring[k], targets[k])?);
            }
            (BandKind::Antiprism, targets, faces)
        }
        _ => return None,
    };
    let distinct: BTreeSet<usize> = targets.iter().copied().collect();
    if distinct.len() != n || targets.iter().any(|v| inner.contains(v)) {
        return None;
    }
    let far = VertexRing::new(polyhedron, targets.clone());
    let aligned = is_parallel(&far.normal(), &cap.normal(polyhedron));
    if !aligned || !far.is_regular_polygon(polyhedron.edge_length()) {
        return None;
    }
    let faces: BTreeSet<usize> = faces.into_iter().collect();
    (faces.len() == if kind == BandKind::Prism { n } else { 2 * n }).then(|| Band {
        kind,
        targets,
        faces: faces.into_iter().collect(),
    })
}

/// Removes `band`, setting `cap` down on the band's far ring.
pub(crate) fn remove_band(polyhedron: &Polyhedron, cap: &Cap, band: &Band) -> Polyhedron {
    let ring = cap.boundary_indices();
    let axis = cap.normal(polyhedron);
    let from = cap.boundary(polyhedron).centroid();
    let to = VertexRing::new(polyhedron, band.targets.clone()).centroid();
    let shift = to - from;
    let u = project(&(polyhedron.position(ring[0]) - from), &axis);
    let v = project(&(polyhedron.position(band.targets[0]) - to), &axis);
    let angle = axis.dot(&u.cross(&v)).atan2(u.dot(&v));

    let landing: HashMap<usize, usize> = ring.iter().copied().zip(band.targets.iter().copied()).collect();
    let cap_faces: BTreeSet<usize> = cap.faces().iter().copied().collect();
    let inner: BTreeSet<usize> = cap.inner_vertices().iter().copied().collect();
    polyhedron
        .with_changes(|solid| {
            solid
                .without_faces(band.faces.iter().copied())
                .map_faces(|face| {
                    if face.source().is_some_and(|f| cap_faces.contains(&f)) {
                        face.vertices()
                            .iter()
                            .map(|v| landing.get(v).copied().unwrap_or(*v))
                            .collect()
                    } else {
                        face.vertices().to_vec()
                    }
                })
                .map_vertices(|i, p| {
                    if inner.contains(&i) {
                        rotate_about(&(p + shift), &to, &axis, angle)
                    } else {
                        *p
                    }
                })
        })
        .without_extraneous_vertices()
}

fn project(d: &Vector3, axis: &Vector3) -> Vector3 {
    d - axis * d.dot(axis)
}

/// Caps with a band under them that can be removed legally, with the band.
pub(crate) fn shortenable(polyhedron: &Polyhedron) -> Vec<(Cap, Band)> {
    Cap::get_all(polyhedron)
        .into_iter()
        .filter_map(|cap| {
            let band = band_under(polyhedron, &cap)?;
            is_legal(&remove_band(polyhedron, &cap, &band)).then_some((cap, band))
        })
        .collect()
}
