use std::f64::consts::PI;

use crate::error::Result;
use crate::geometry::convex_hull;
use crate::math::{Point3, PolygonGeom};
use crate::topology::CapKind;

use super::super::options::Using;

/// A cap with unit edges standing on the XY plane.
///
/// The first `base_sides` points are the base polygon, vertex `k` at angle
/// `2πk / n`; the remaining points lie above it. `faces` are the cap's own
/// faces (the base excluded), wound counter-clockwise seen from outside.
#[derive(Debug, Clone)]
pub(crate) struct CapTemplate {
    using: Using,
    points: Vec<Point3>,
    faces: Vec<Vec<usize>>,
}

impl CapTemplate {
    pub(crate) fn new(using: Using) -> Result<Self> {
        let n = using.base_sides();
        let base = PolygonGeom::new(n, 1.0);
        let mut points: Vec<Point3> = (0..n).map(|k| base.point(k, 0.0)).collect();
        points.extend(top_points(using, &base));
        let base_set: Vec<usize> = (0..n).collect();
        let faces = convex_hull(&points)?
            .into_iter()
            .filter(|face| {
                let mut sorted = face.clone();
                sorted.sort_unstable();
                sorted != base_set
            })
            .collect();
        Ok(Self {
            using,
            points,
            faces,
        })
    }

    pub(crate) fn base_sides(&self) -> usize {
        self.using.base_sides()
    }

    pub(crate) fn points(&self) -> &[Point3] {
        &self.points
    }

    pub(crate) fn faces(&self) -> &[Vec<usize>] {
        &self.faces
    }

    /// Number of base rotations giving distinct placements.
    pub(crate) fn period(&self) -> usize {
        match self.using.cap_kind() {
            CapKind::Pyramid => 1,
            CapKind::Fastigium | CapKind::Cupola | CapKind::Rotunda => 2,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn top_points(using: Using, base: &PolygonGeom) -> Vec<Point3> {
    match using {
        Using::Y3 | Using::Y4 | Using::Y5 => {
            let height = (1.0 - base.out_radius * base.out_radius).sqrt();
            vec![Point3::new(0.0, 0.0, height)]
        }
        Using::U2 => {
            // Ridge over the midpoints of sides 1-2 and 3-0.
            let half = base.out_radius / 2.0;
            let height = 3.0_f64.sqrt() / 2.0;
            vec![
                Point3::new(-half, half, height),
                Point3::new(half, -half, height),
            ]
        }
        Using::U3 | Using::U4 | Using::U5 => {
            let m = base.sides / 2;
            let top = PolygonGeom::new(m, 1.0);
            let run = base.in_radius - top.in_radius;
            let height = (1.0 - run * run).sqrt();
            // Each top edge is parallel to base side 2j -> 2j+1.
            (0..m)
                .map(|j| {
                    let angle = -PI / (2.0 * m as f64) + top.angle * j as f64;
                    Point3::new(
                        top.out_radius * angle.cos(),
                        top.out_radius * angle.sin(),
                        height,
                    )
                })
                .collect()
        }
        Using::R5 => rotunda_top(base.out_radius),
    }
}

/// Middle ring and top pentagon of a pentagonal rotunda, all on the sphere
/// through the base decagon.
fn rotunda_top(radius: f64) -> Vec<Point3> {
    let pentagon = PolygonGeom::new(5, 1.0);
    let tenth = PI / 10.0;
    let ring_radius = (2.0 * radius * radius - 1.0) / (2.0 * radius * tenth.cos());
    let ring_height = (radius * radius - ring_radius * ring_radius).sqrt();
    let top_height = (radius * radius - pentagon.out_radius * pentagon.out_radius).sqrt();
    let mut points = Vec::with_capacity(10);
    for j in 0..5_u32 {
        let angle = tenth + pentagon.angle * f64::from(j);
        points.push(Point3::new(
            ring_radius * angle.cos(),
            ring_radius * angle.sin(),
            ring_height,
        ));
    }
    for j in 0..5_u32 {
        let angle = -tenth + pentagon.angle * f64::from(j);
        points.push(Point3::new(
            pentagon.out_radius * angle.cos(),
            pentagon.out_radius * angle.sin(),
            top_height,
        ));
    }
    points
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::topology::Polyhedron;

    fn edges_are_unit(template: &CapTemplate) {
        let points = template.points();
        for face in template.faces() {
            for i in 0..face.len() {
                let a = points[face[i]];
                let b = points[face[(i + 1) % face.len()]];
                assert!(((b - a).norm() - 1.0).abs() < 1e-9, "{:?} edge {a} {b}", template.using);
            }
        }
    }

    #[test]
    fn templates_have_unit_edges() {
        for using in Using::ALL {
            edges_are_unit(&CapTemplate::new(using).unwrap());
        }
    }

    #[test]
    fn template_face_counts() {
        let count = |using| CapTemplate::new(using).unwrap().faces().len();
        assert_eq!(count(Using::Y4), 4);
        assert_eq!(count(Using::U2), 4);
        assert_eq!(count(Using::U3), 7);
        assert_eq!(count(Using::U5), 11);
        assert_eq!(count(Using::R5), 16);
    }

    #[test]
    fn closing_the_base_gives_a_solid() {
        for using in Using::ALL {
            let template = CapTemplate::new(using).unwrap();
            let n = template.base_sides();
            let mut faces = template.faces().to_vec();
            faces.push((0..n).rev().collect());
            let solid = Polyhedron::new(template.points().to_vec(), faces).unwrap();
            assert!(solid.is_valid(), "{using}");
            assert!(solid.is_convex(), "{using}");
        }
    }
}
