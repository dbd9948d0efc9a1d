pub mod polygon_3d;

use std::f64::consts::PI;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 3D rotation type.
pub type Rotation3 = nalgebra::Rotation3<f64>;

/// Global geometric tolerance for floating-point comparisons.
pub const TOLERANCE: f64 = 1e-10;

/// Tolerance for comparing measured quantities of floating-point solids
/// (edge lengths, planarity, regularity), relative to unit edge length.
pub const GEOMETRY_TOLERANCE: f64 = 1e-6;

/// Measurements of a regular polygon with a given side length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolygonGeom {
    /// Number of sides.
    pub sides: usize,
    /// Central angle subtended by one side.
    pub angle: f64,
    /// Distance from the center to the midpoint of a side.
    pub in_radius: f64,
    /// Distance from the center to a vertex.
    pub out_radius: f64,
}

impl PolygonGeom {
    /// Regular `sides`-gon with the given side length.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn new(sides: usize, side_length: f64) -> Self {
        let angle = 2.0 * PI / sides as f64;
        Self {
            sides,
            angle,
            in_radius: side_length / (2.0 * (angle / 2.0).tan()),
            out_radius: side_length / (2.0 * (angle / 2.0).sin()),
        }
    }

    /// Position of vertex `i` in the XY plane, rotated by `offset` sides.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn point(&self, i: usize, offset: f64) -> Point3 {
        let a = self.angle * (i as f64 + offset);
        Point3::new(self.out_radius * a.cos(), self.out_radius * a.sin(), 0.0)
    }
}

/// Height of an `n`-gonal antiprism with unit edge length.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn antiprism_height(n: usize) -> f64 {
    let c = (PI / (2.0 * n as f64)).cos();
    (1.0 - 1.0 / (4.0 * c * c)).sqrt()
}

/// Rotates `point` about the axis through `center` along `axis` (unit) by `angle`.
#[must_use]
pub fn rotate_about(point: &Point3, center: &Point3, axis: &Vector3, angle: f64) -> Point3 {
    let unit = nalgebra::Unit::new_normalize(*axis);
    let rotation = Rotation3::from_axis_angle(&unit, angle);
    center + rotation * (point - center)
}

/// Mean of a set of points. Returns the origin for an empty slice.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean_point(points: &[Point3]) -> Point3 {
    if points.is_empty() {
        return Point3::origin();
    }
    let sum = points
        .iter()
        .fold(Vector3::zeros(), |acc, p| acc + p.coords);
    Point3::from(sum / points.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn square_radii() {
        let geom = PolygonGeom::new(4, 2.0);
        assert_relative_eq!(geom.in_radius, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(geom.out_radius, 2.0_f64.sqrt(), epsilon = TOLERANCE);
    }

    #[test]
    fn polygon_points_have_unit_sides() {
        let geom = PolygonGeom::new(5, 1.0);
        let a = geom.point(0, 0.0);
        let b = geom.point(1, 0.0);
        assert_relative_eq!((b - a).norm(), 1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn triangular_antiprism_is_octahedron() {
        // Octahedron: distance between opposite faces with unit edge is sqrt(2/3).
        assert_relative_eq!(antiprism_height(3), (2.0_f64 / 3.0).sqrt(), epsilon = TOLERANCE);
    }

    #[test]
    fn rotation_keeps_axis_points_fixed() {
        let center = Point3::new(0.0, 0.0, 1.0);
        let axis = Vector3::z();
        let moved = rotate_about(&Point3::new(1.0, 0.0, 1.0), &center, &axis, PI / 2.0);
        assert_relative_eq!(moved.x, 0.0, epsilon = TOLERANCE);
        assert_relative_eq!(moved.y, 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(moved.z, 1.0, epsilon = TOLERANCE);
    }
}
