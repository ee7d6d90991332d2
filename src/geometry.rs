use std::f64::consts::PI;

use float_cmp::approx_eq;
use nalgebra::{Point2, Rotation3, Vector3};

pub fn vector(p: [f32; 3]) -> Vector3<f64> {
    Vector3::new(p[0] as f64, p[1] as f64, p[2] as f64)
}

pub fn is_degenerate(v: &Vector3<f64>) -> bool {
    approx_eq!(f64, v.norm_squared(), 0.0, ulps = 4)
}

/// Unnormalized normal of the triangle `abc` under counter-clockwise winding.
pub fn triangle_normal(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Vector3<f64> {
    (b - a).cross(&(c - a))
}

/// Use Newell's method to determine a polygon normal so that concave and
/// slightly non-planar polygons are correctly handled.
pub fn newell_normal(points: &[Vector3<f64>]) -> Vector3<f64> {
    let mut normal = Vector3::zeros();
    let mut point_a = match points.last() {
        Some(last) => last,
        None => return normal,
    };
    for point_b in points {
        normal.x += (point_a.y - point_b.y) * (point_a.z + point_b.z);
        normal.y += (point_a.z - point_b.z) * (point_a.x + point_b.x);
        normal.z += (point_a.x - point_b.x) * (point_a.y + point_b.y);
        point_a = point_b;
    }
    normal
}

/// Projects 3D points onto the plane perpendicular to a normal, by rotating
/// the normal onto +Z and dropping the Z coordinate.
pub struct OrthonormalBasis2D {
    rotation: Rotation3<f64>,
}

impl OrthonormalBasis2D {
    pub fn from_normal(normal: &Vector3<f64>) -> Self {
        let rotation = Rotation3::rotation_between(normal, &Vector3::z())
            // Only fails for a normal pointing straight down -Z.
            .unwrap_or_else(|| Rotation3::from_axis_angle(&Vector3::x_axis(), PI));
        Self { rotation }
    }

    pub fn transform(&self, point: &Vector3<f64>) -> Point2<f64> {
        let rotated = self.rotation * point;
        Point2::new(rotated.x, rotated.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!(approx_eq!(f64, a, b, epsilon = 1e-9), "{} != {}", a, b);
    }

    #[test]
    fn newell_matches_cross_product_for_triangles() {
        let points = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
        ];
        let newell = newell_normal(&points);
        let cross = triangle_normal(&points[0], &points[1], &points[2]);
        assert_close(newell.normalize().dot(&cross.normalize()), 1.0);
        assert_close(cross.z, 1.0);
    }

    #[test]
    fn newell_handles_concave_polygons() {
        // An L shape whose first three points are collinear.
        let points = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(2.0, 0.0, 0.0),
            Vector3::new(2.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(1.0, 2.0, 0.0),
            Vector3::new(0.0, 2.0, 0.0),
        ];
        assert!(is_degenerate(&triangle_normal(&points[0], &points[1], &points[2])));
        let normal = newell_normal(&points).normalize();
        assert_close(normal.z, 1.0);
    }

    #[test]
    fn basis_flattens_tilted_plane() {
        let normal = Vector3::new(1.0, 0.0, 0.0);
        let basis = OrthonormalBasis2D::from_normal(&normal);
        let a = basis.transform(&Vector3::new(3.0, 0.0, 0.0));
        let b = basis.transform(&Vector3::new(3.0, 1.0, 1.0));
        assert_close((b - a).norm(), 2f64.sqrt());
    }

    #[test]
    fn basis_handles_opposite_normal() {
        let basis = OrthonormalBasis2D::from_normal(&Vector3::new(0.0, 0.0, -1.0));
        let p = basis.transform(&Vector3::new(1.0, 2.0, 5.0));
        assert_close(p.x, 1.0);
        assert_close(p.y, -2.0);
    }
}
