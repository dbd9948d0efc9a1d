use crate::geometry::Plane;

use super::{Point3, Vector3, TOLERANCE};

/// Whether the projection of `point` onto `plane` lies inside or on the
/// convex polygon `polygon`, wound counter-clockwise about the plane normal.
#[must_use]
pub fn point_in_convex_polygon(point: &Point3, polygon: &[Point3], plane: &Plane) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    let projected = plane.project(point);
    let normal = plane.normal();
    polygon
        .iter()
        .zip(polygon.iter().cycle().skip(1))
        .all(|(a, b)| {
            let edge = b - a;
            let side = edge.cross(&(projected - a)).dot(normal);
            side >= -TOLERANCE * edge.norm().max(1.0)
        })
}

/// Unnormalized polygon normal by Newell's method.
///
/// Its length is twice the polygon's area, so degenerate polygons
/// produce a (near) zero vector.
#[must_use]
pub fn newell_normal(points: &[Point3]) -> Vector3 {
    points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .fold(Vector3::zeros(), |normal, (a, b)| {
            normal
                + Vector3::new(
                    (a.y - b.y) * (a.z + b.z),
                    (a.z - b.z) * (a.x + b.x),
                    (a.x - b.x) * (a.y + b.y),
                )
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    fn xy_plane() -> Plane {
        Plane::from_normal(p(0.0, 0.0, 0.0), Vector3::z()).unwrap()
    }

    fn unit_square() -> Vec<Point3> {
        vec![
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn point_inside_square() {
        assert!(point_in_convex_polygon(&p(0.5, 0.5, 0.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn point_above_square_projects_inside() {
        assert!(point_in_convex_polygon(&p(0.5, 0.5, 3.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn point_on_square_edge() {
        assert!(point_in_convex_polygon(&p(1.0, 0.5, 0.0), &unit_square(), &xy_plane()));
    }

    #[test]
    fn point_outside_polygons() {
        assert!(!point_in_convex_polygon(&p(2.0, 0.5, 0.0), &unit_square(), &xy_plane()));
        let tri = vec![p(0.0, 0.0, 0.0), p(4.0, 0.0, 0.0), p(2.0, 3.0, 0.0)];
        assert!(!point_in_convex_polygon(&p(5.0, 5.0, 0.0), &tri, &xy_plane()));
    }

    #[test]
    fn newell_normal_follows_winding() {
        let normal = newell_normal(&unit_square());
        assert!((normal - Vector3::new(0.0, 0.0, 2.0)).norm() < TOLERANCE);
        let mut reversed = unit_square();
        reversed.reverse();
        assert!((newell_normal(&reversed) + normal).norm() < TOLERANCE);
    }
}
