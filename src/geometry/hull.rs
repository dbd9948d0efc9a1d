use std::collections::HashSet;

use crate::error::{GeometryError, Result};
use crate::math::{mean_point, Point3, GEOMETRY_TOLERANCE};

/// Faces of the convex hull of `points`, as index lists wound
/// counter-clockwise seen from outside.
///
/// Coplanar hull points are merged into one polygonal face. Every point is
/// expected to be a hull vertex; interior points are left out of all faces.
/// The search tries every plane through three points, which is plenty for
/// solids with up to a few hundred vertices.
///
/// # Errors
///
/// Returns an error if the points do not span a solid.
pub fn convex_hull(points: &[Point3]) -> Result<Vec<Vec<usize>>> {
    let center = mean_point(points);
    let scale = points
        .iter()
        .map(|p| (p - center).norm())
        .fold(0.0, f64::max);
    if scale < GEOMETRY_TOLERANCE {
        return Err(GeometryError::Degenerate("hull of coincident points".into()).into());
    }
    let tolerance = GEOMETRY_TOLERANCE * scale;

    let n = points.len();
    let mut seen = HashSet::new();
    let mut faces = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let normal = (points[j] - points[i]).cross(&(points[k] - points[i]));
                let len = normal.norm();
                if len < tolerance * scale {
                    continue;
                }
                let normal = normal / len;
                let distances: Vec<f64> = points
                    .iter()
                    .map(|p| (p - points[i]).dot(&normal))
                    .collect();
                let normal = if distances.iter().all(|&d| d <= tolerance) {
                    normal
                } else if distances.iter().all(|&d| d >= -tolerance) {
                    -normal
                } else {
                    continue;
                };
                let on_plane: Vec<usize> = (0..n).filter(|&v| distances[v].abs() <= tolerance).collect();
                if !seen.insert(on_plane.clone()) {
                    continue;
                }
                let face_points: Vec<Point3> = on_plane.iter().map(|&v| points[v]).collect();
                let face_center = mean_point(&face_points);
                let u = (points[on_plane[0]] - face_center).normalize();
                let w = normal.cross(&u);
                let mut ordered: Vec<(f64, usize)> = on_plane
                    .iter()
                    .map(|&v| {
                        let d = points[v] - face_center;
                        (d.dot(&w).atan2(d.dot(&u)), v)
                    })
                    .collect();
                ordered.sort_by(|a, b| a.0.total_cmp(&b.0));
                faces.push(ordered.into_iter().map(|(_, v)| v).collect());
            }
        }
    }
    if faces.len() < 4 {
        return Err(GeometryError::Degenerate("points do not span a solid".into()).into());
    }
    Ok(faces)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::Polyhedron;

    fn cube_points() -> Vec<Point3> {
        let mut points = Vec::new();
        for x in [-1.0, 1.0] {
            for y in [-1.0, 1.0] {
                for z in [-1.0, 1.0] {
                    points.push(Point3::new(x, y, z));
                }
            }
        }
        points
    }

    #[test]
    fn cube_hull_has_square_faces() {
        let faces = convex_hull(&cube_points()).unwrap();
        assert_eq!(faces.len(), 6);
        assert!(faces.iter().all(|f| f.len() == 4));
    }

    #[test]
    fn hull_faces_are_outward() {
        let faces = convex_hull(&cube_points()).unwrap();
        let cube = Polyhedron::new(cube_points(), faces).unwrap();
        assert!(cube.is_valid());
        assert!(cube.is_convex());
    }

    #[test]
    fn flat_points_are_rejected() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        assert!(convex_hull(&points).is_err());
    }
}
