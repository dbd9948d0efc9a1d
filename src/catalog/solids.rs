//! Closed-form coordinates of the solids the rest of the catalog is derived
//! from.

use crate::error::Result;
use crate::geometry::convex_hull;
use crate::math::{antiprism_height, Point3, PolygonGeom, Vector3, GEOMETRY_TOLERANCE};
use crate::topology::Polyhedron;

/// The golden ratio.
const PHI: f64 = 1.618_033_988_749_895;

/// Name prefix of the regular `n`-gon.
pub(super) fn polygon_prefix(n: usize) -> Option<&'static str> {
    Some(match n {
        3 => "triangular",
        4 => "square",
        5 => "pentagonal",
        6 => "hexagonal",
        7 => "heptagonal",
        8 => "octagonal",
        9 => "enneagonal",
        10 => "decagonal",
        _ => return None,
    })
}

/// Convex hull of `points`, scaled to unit edge length about its centroid.
pub(super) fn hull_solid(points: Vec<Point3>) -> Result<Polyhedron> {
    let faces = convex_hull(&points)?;
    let solid = Polyhedron::new(points, faces)?;
    let center = solid.centroid();
    let scale = 1.0 / solid.edge_length();
    Ok(solid.with_vertex_positions(
        solid
            .positions()
            .iter()
            .map(|p| Point3::from((p - center) * scale))
            .collect(),
    ))
}

/// Every sign combination of the nonzero coordinates of `base`.
fn signed(base: [f64; 3]) -> Vec<[f64; 3]> {
    let mut points = vec![base];
    for axis in 0..3 {
        if base[axis].abs() < GEOMETRY_TOLERANCE {
            continue;
        }
        let flipped: Vec<[f64; 3]> = points
            .iter()
            .map(|p| {
                let mut q = *p;
                q[axis] = -q[axis];
                q
            })
            .collect();
        points.extend(flipped);
    }
    points
}

/// Cyclic permutations (the even permutations of three coordinates).
fn cyclic(points: &[[f64; 3]]) -> Vec<Point3> {
    points
        .iter()
        .flat_map(|&[x, y, z]| {
            [
                Point3::new(x, y, z),
                Point3::new(y, z, x),
                Point3::new(z, x, y),
            ]
        })
        .collect()
}

/// All permutations of three coordinates, without repeated points.
fn permuted(points: &[[f64; 3]]) -> Vec<Point3> {
    let mut all = cyclic(points);
    all.extend(cyclic(
        &points.iter().map(|&[x, y, z]| [y, x, z]).collect::<Vec<_>>(),
    ));
    dedupe(all)
}

fn dedupe(points: Vec<Point3>) -> Vec<Point3> {
    let mut unique: Vec<Point3> = Vec::with_capacity(points.len());
    for p in points {
        if !unique.iter().any(|q| (p - q).norm() < GEOMETRY_TOLERANCE) {
            unique.push(p);
        }
    }
    unique
}

pub(super) fn tetrahedron() -> Vec<Point3> {
    vec![
        Point3::new(1.0, 1.0, 1.0),
        Point3::new(1.0, -1.0, -1.0),
        Point3::new(-1.0, 1.0, -1.0),
        Point3::new(-1.0, -1.0, 1.0),
    ]
}

pub(super) fn cube() -> Vec<Point3> {
    signed([1.0, 1.0, 1.0]).into_iter().map(Point3::from).collect()
}

pub(super) fn octahedron() -> Vec<Point3> {
    permuted(&signed([1.0, 0.0, 0.0]))
}

pub(super) fn dodecahedron() -> Vec<Point3> {
    let mut points = cube();
    points.extend(cyclic(&signed([0.0, 1.0 / PHI, PHI])));
    points
}

pub(super) fn icosahedron() -> Vec<Point3> {
    cyclic(&signed([0.0, 1.0, PHI]))
}

pub(super) fn truncated_cuboctahedron() -> Vec<Point3> {
    let root2 = std::f64::consts::SQRT_2;
    permuted(&signed([1.0, 1.0 + root2, 1.0 + 2.0 * root2]))
}

pub(super) fn truncated_icosidodecahedron() -> Vec<Point3> {
    let bases = [
        [1.0 / PHI, 1.0 / PHI, 3.0 + PHI],
        [2.0 / PHI, PHI, 1.0 + 2.0 * PHI],
        [1.0 / PHI, PHI * PHI, 3.0 * PHI - 1.0],
        [2.0 * PHI - 1.0, 2.0, 2.0 + PHI],
        [PHI, 3.0, 2.0 * PHI],
    ];
    cyclic(&bases.into_iter().flat_map(signed).collect::<Vec<_>>())
}

fn icosidodecahedron() -> Vec<Point3> {
    let mut points = cyclic(&signed([0.0, 0.0, PHI]));
    points.extend(cyclic(&signed([0.5, PHI / 2.0, PHI * PHI / 2.0])));
    dedupe(points)
}

/// The half of an icosidodecahedron on one side of a decagonal equator.
pub(super) fn pentagonal_rotunda() -> Vec<Point3> {
    let axis = Vector3::new(1.0, 0.0, PHI);
    icosidodecahedron()
        .into_iter()
        .filter(|p| p.coords.dot(&axis) > -GEOMETRY_TOLERANCE)
        .collect()
}

fn ring(geom: &PolygonGeom, offset: f64, z: f64) -> impl Iterator<Item = Point3> + '_ {
    (0..geom.sides).map(move |i| {
        let p = geom.point(i, offset);
        Point3::new(p.x, p.y, z)
    })
}

pub(super) fn prism(n: usize) -> Vec<Point3> {
    let geom = PolygonGeom::new(n, 1.0);
    ring(&geom, 0.0, 0.5).chain(ring(&geom, 0.0, -0.5)).collect()
}

pub(super) fn antiprism(n: usize) -> Vec<Point3> {
    let geom = PolygonGeom::new(n, 1.0);
    let h = antiprism_height(n) / 2.0;
    ring(&geom, 0.0, h).chain(ring(&geom, 0.5, -h)).collect()
}

pub(super) fn pyramid(n: usize) -> Vec<Point3> {
    let geom = PolygonGeom::new(n, 1.0);
    let apex = (1.0 - geom.out_radius * geom.out_radius).sqrt();
    ring(&geom, 0.0, 0.0)
        .chain(std::iter::once(Point3::new(0.0, 0.0, apex)))
        .collect()
}

/// An `n`-gon over a `2n`-gon, joined by alternating squares and triangles.
pub(super) fn cupola(n: usize) -> Vec<Point3> {
    let top = PolygonGeom::new(n, 1.0);
    let base = PolygonGeom::new(2 * n, 1.0);
    let run = top.point(0, 0.0) - base.point(0, 0.5);
    let height = (1.0 - run.norm_squared()).sqrt();
    ring(&top, 0.0, height).chain(ring(&base, 0.5, 0.0)).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn check(points: Vec<Point3>, vertices: usize, faces: usize) -> Polyhedron {
        let solid = hull_solid(points).unwrap();
        assert_eq!((solid.num_vertices(), solid.num_faces()), (vertices, faces));
        assert!(solid.is_valid());
        assert!(solid.is_convex());
        assert!(solid.is_regular_faced());
        assert_relative_eq!(solid.edge_length(), 1.0, epsilon = 1e-12);
        solid
    }

    #[test]
    fn platonic_solids() {
        assert!(check(tetrahedron(), 4, 4).is_regular());
        assert!(check(cube(), 8, 6).is_regular());
        assert!(check(octahedron(), 6, 8).is_regular());
        assert!(check(dodecahedron(), 20, 12).is_regular());
        assert!(check(icosahedron(), 12, 20).is_regular());
    }

    #[test]
    fn prisms_and_antiprisms() {
        check(prism(5), 10, 7);
        check(antiprism(7), 14, 16);
    }

    #[test]
    fn caps() {
        check(pyramid(4), 5, 5);
        check(pyramid(5), 6, 6);
        check(cupola(3), 9, 8);
        check(cupola(5), 15, 12);
        check(pentagonal_rotunda(), 20, 17);
    }

    #[test]
    fn truncated_cuboctahedron_is_great_rhombicuboctahedron() {
        let solid = check(truncated_cuboctahedron(), 48, 26);
        assert_eq!(solid.count_faces_with_sides(8), 6);
    }

    #[test]
    fn prefixes() {
        assert_eq!(polygon_prefix(9), Some("enneagonal"));
        assert_eq!(polygon_prefix(11), None);
    }
}
