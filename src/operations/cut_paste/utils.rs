use std::collections::BTreeSet;

use crate::error::{OperationError, Result};
use crate::math::{Vector3, GEOMETRY_TOLERANCE};
use crate::topology::{Cap, CapKind, Polyhedron, VertexList};

use super::super::options::{Align, Gyration};
use super::super::utils::{is_opposite, Frame};
use super::templates::CapTemplate;

/// Removes `cap`, closing the hole with a face on its boundary ring. The
/// new face is the last face of the result.
pub(crate) fn remove_cap(polyhedron: &Polyhedron, cap: &Cap) -> Polyhedron {
    polyhedron
        .with_changes(|solid| {
            solid
                .without_faces(cap.faces().iter().copied())
                .add_faces([cap.boundary_indices().to_vec()])
        })
        .without_extraneous_vertices()
}

/// Builds `template` onto `face`, with template base vertex `k` on the
/// face's vertex `k + rotation`. The new vertices are appended in template
/// order.
///
/// # Errors
///
/// Returns an error if the face does not have the template's base polygon.
pub(crate) fn attach_cap(
    polyhedron: &Polyhedron,
    face: usize,
    template: &CapTemplate,
    rotation: usize,
) -> Result<Polyhedron> {
    let base = polyhedron.face(face);
    let n = base.num_sides();
    if n != template.base_sides() || !base.is_regular() {
        return Err(OperationError::InvalidInput(format!(
            "face {face} does not fit a cap with {} sides",
            template.base_sides()
        ))
        .into());
    }
    let frame = Frame::on_face(&base, rotation)?;
    let scale = base.side_length();
    let corners = base.vertex_indices().to_vec();
    let offset = polyhedron.num_vertices();
    let index_of = |i: usize| {
        if i < n {
            corners[(i + rotation) % n]
        } else {
            offset + i - n
        }
    };
    let tops: Vec<_> = template.points()[n..]
        .iter()
        .map(|p| frame.place(p, scale))
        .collect();
    let faces: Vec<Vec<usize>> = template
        .faces()
        .iter()
        .map(|f| f.iter().map(|&i| index_of(i)).collect())
        .collect();
    Ok(polyhedron.with_changes(|solid| {
        solid
            .add_vertices(tops)
            .without_faces([face])
            .add_faces(faces)
    }))
}

/// The cap of `polyhedron` whose inner vertices are exactly `inner`.
pub(crate) fn cap_with_inner(polyhedron: &Polyhedron, inner: &BTreeSet<usize>) -> Option<Cap> {
    Cap::get_all_with_base(polyhedron).into_iter().find(|cap| {
        let set: BTreeSet<usize> = cap.inner_vertices().iter().copied().collect();
        &set == inner
    })
}

/// Whether a cap is aligned with the faces across its base.
///
/// Across a band of uniform faces (a prism or antiprism), the cap is
/// compared with the cap at the other end instead: ortho when their tops
/// line up. Otherwise it is ortho when triangles meet triangles across the
/// boundary, which also covers a rotunda meeting a cupola or a rotunda.
#[must_use]
pub fn get_cupola_gyrate(polyhedron: &Polyhedron, cap: &Cap) -> Gyration {
    let ring = cap.boundary_indices();
    let n = ring.len();
    let sides: Vec<(usize, usize)> = (0..n)
        .filter_map(|k| {
            let (a, b) = (ring[k], ring[(k + 1) % n]);
            let inner = polyhedron.edge_face(a, b)?;
            let outer = polyhedron.edge_face(b, a)?;
            Some((
                polyhedron.face(inner).num_sides(),
                polyhedron.face(outer).num_sides(),
            ))
        })
        .collect();
    let uniform = sides.windows(2).all(|w| w[0].1 == w[1].1);
    if uniform {
        if let Some(gyrate) = band_gyrate(polyhedron, cap) {
            return gyrate;
        }
    }
    let ortho = sides.iter().all(|&(inner, outer)| (inner == 3) == (outer == 3));
    if ortho {
        Gyration::Ortho
    } else {
        Gyration::Gyro
    }
}

fn band_gyrate(polyhedron: &Polyhedron, cap: &Cap) -> Option<Gyration> {
    if !matches!(cap.kind(), CapKind::Cupola | CapKind::Rotunda) {
        return None;
    }
    let axis = cap.normal(polyhedron);
    let center = cap.boundary(polyhedron).centroid();
    let directions = |c: &Cap| -> Vec<Vector3> {
        c.inner_vertices()[..c.top_size()]
            .iter()
            .map(|&v| {
                let d = polyhedron.position(v) - center;
                (d - axis * d.dot(&axis)).normalize()
            })
            .collect()
    };
    let other = Cap::get_all(polyhedron).into_iter().find(|other| {
        other != cap
            && other.kind() == cap.kind()
            && other.num_sides() == cap.num_sides()
            && is_opposite(&other.normal(polyhedron), &axis)
    })?;
    let own = directions(cap);
    let theirs = directions(&other);
    let aligned = own
        .iter()
        .all(|d| theirs.iter().any(|t| d.dot(t) > 1.0 - GEOMETRY_TOLERANCE));
    Some(if aligned {
        Gyration::Ortho
    } else {
        Gyration::Gyro
    })
}

/// Whether a modification with outward `axis` sits opposite another
/// modified site of the solid.
///
/// Sites are the faces with `base_sides` sides (where caps were removed)
/// plus the given caps.
pub(crate) fn alignment(
    polyhedron: &Polyhedron,
    axis: &Vector3,
    base_sides: usize,
    caps: &[Cap],
) -> Align {
    let faces = polyhedron
        .faces()
        .filter(|face| face.num_sides() == base_sides)
        .map(|face| face.normal());
    let caps = caps.iter().map(|cap| cap.normal(polyhedron));
    if faces.chain(caps).any(|site| is_opposite(&site, axis)) {
        Align::Para
    } else {
        Align::Meta
    }
}

/// Alignment of an existing cap relative to the solid's other modified
/// sites: removed caps, and cupolae or rotundae turned ortho.
#[must_use]
pub fn get_cap_alignment(polyhedron: &Polyhedron, cap: &Cap) -> Align {
    let turned: Vec<Cap> = if matches!(cap.kind(), CapKind::Cupola | CapKind::Rotunda) {
        Cap::get_all(polyhedron)
            .into_iter()
            .filter(|other| other != cap && get_cupola_gyrate(polyhedron, other) == Gyration::Ortho)
            .collect()
    } else {
        Vec::new()
    };
    alignment(
        polyhedron,
        &cap.normal(polyhedron),
        cap.num_sides(),
        &turned,
    )
}

/// Whether every vertex `a` of `polyhedron` has a vertex `b` of `other` at
/// the same position.
pub(crate) fn same_top(polyhedron: &Polyhedron, a: &[usize], other: &Polyhedron, b: &[usize]) -> bool {
    let tolerance = GEOMETRY_TOLERANCE * polyhedron.edge_length().max(GEOMETRY_TOLERANCE);
    a.iter().all(|&v| {
        b.iter()
            .any(|&w| (polyhedron.position(v) - other.position(w)).norm() < tolerance)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::options::Using;
    use crate::topology::fixtures::{cube, tetrahedron};

    #[test]
    fn pyramid_on_tetrahedron_face() {
        let tet = tetrahedron();
        let template = CapTemplate::new(Using::Y3).unwrap();
        let bipyramid = attach_cap(&tet, 0, &template, 0).unwrap();
        assert_eq!(bipyramid.num_vertices(), 5);
        assert_eq!(bipyramid.num_faces(), 6);
        assert!(bipyramid.is_valid());
        assert!(bipyramid.is_convex());
        assert!(bipyramid.is_regular_faced());
    }

    #[test]
    fn removing_attached_cap_restores_counts() {
        let tet = tetrahedron();
        let template = CapTemplate::new(Using::Y3).unwrap();
        let bipyramid = attach_cap(&tet, 0, &template, 0).unwrap();
        let cap = cap_with_inner(&bipyramid, &BTreeSet::from([4])).unwrap();
        let back = remove_cap(&bipyramid, &cap);
        assert_eq!(back.num_vertices(), 4);
        assert_eq!(back.num_faces(), 4);
        assert!(back.is_valid());
    }

    #[test]
    fn roof_on_cube_is_not_strictly_convex() {
        let cube = cube();
        let template = CapTemplate::new(Using::Y4).unwrap();
        let result = attach_cap(&cube, 1, &template, 0).unwrap();
        assert!(result.is_valid());
        assert!(result.is_convex());
        let fastigium = CapTemplate::new(Using::U2).unwrap();
        let roofed = attach_cap(&cube, 1, &fastigium, 0).unwrap();
        // Triangle ends are coplanar with the cube's sides.
        assert!(roofed.is_valid());
        assert!(!roofed.is_convex());
    }

    fn cap_gyrations(name: &str) -> Vec<Gyration> {
        let solid = crate::Catalog::builtin().get(name).unwrap();
        Cap::get_all(solid)
            .iter()
            .map(|cap| get_cupola_gyrate(solid, cap))
            .collect()
    }

    #[test]
    fn rotundae_meeting_rotundae() {
        let icosidodecahedron = cap_gyrations("icosidodecahedron");
        assert!(!icosidodecahedron.is_empty());
        assert!(icosidodecahedron.iter().all(|g| *g == Gyration::Gyro));
        assert!(cap_gyrations("pentagonal-orthobirotunda").contains(&Gyration::Ortho));
    }

    #[test]
    fn cupola_on_rotunda_takes_both_gyrations() {
        assert!(cap_gyrations("pentagonal-orthocupolarotunda").contains(&Gyration::Ortho));
        assert!(!cap_gyrations("pentagonal-gyrocupolarotunda").contains(&Gyration::Ortho));
    }

    #[test]
    fn mismatched_face_is_rejected() {
        let cube = cube();
        let template = CapTemplate::new(Using::Y3).unwrap();
        assert!(attach_cap(&cube, 0, &template, 0).is_err());
    }
}
