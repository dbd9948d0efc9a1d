use crate::error::{GeometryError, Result};
use crate::math::{Point3, Vector3, TOLERANCE};

/// An oriented plane: a point on it and a unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    origin: Point3,
    normal: Vector3,
}

impl Plane {
    /// Creates a plane through `origin`, normalizing `normal`.
    ///
    /// # Errors
    ///
    /// Returns an error if the normal vector is zero-length.
    pub fn from_normal(origin: Point3, normal: Vector3) -> Result<Self> {
        let len = normal.norm();
        if len < TOLERANCE {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(Self {
            origin,
            normal: normal / len,
        })
    }

    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the unit normal vector of the plane.
    #[must_use]
    pub fn normal(&self) -> &Vector3 {
        &self.normal
    }

    /// Signed distance of `point` from the plane, positive on the normal side.
    #[must_use]
    pub fn signed_distance(&self, point: &Point3) -> f64 {
        (point - self.origin).dot(&self.normal)
    }

    /// Orthogonal projection of `point` onto the plane.
    #[must_use]
    pub fn project(&self, point: &Point3) -> Point3 {
        point - self.normal * self.signed_distance(point)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn signed_distance_follows_normal() {
        let plane = Plane::from_normal(Point3::origin(), Vector3::z()).unwrap();
        assert_relative_eq!(plane.signed_distance(&Point3::new(3.0, 1.0, 2.0)), 2.0);
        assert_relative_eq!(plane.signed_distance(&Point3::new(0.0, 0.0, -1.5)), -1.5);
    }

    #[test]
    fn normal_is_unit_length() {
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 1.0), Vector3::new(0.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(plane.normal().norm(), 1.0, epsilon = TOLERANCE);
        assert_relative_eq!(plane.signed_distance(&Point3::origin()), -1.0, epsilon = TOLERANCE);
    }

    #[test]
    fn zero_normal_is_rejected() {
        assert!(Plane::from_normal(Point3::origin(), Vector3::zeros()).is_err());
    }

    #[test]
    fn projection_lands_on_plane() {
        let plane = Plane::from_normal(Point3::new(0.0, 0.0, 2.0), Vector3::z()).unwrap();
        let projected = plane.project(&Point3::new(1.0, -1.0, 7.0));
        assert_relative_eq!(projected.z, 2.0, epsilon = TOLERANCE);
        assert_relative_eq!(projected.x, 1.0, epsilon = TOLERANCE);
    }
}
