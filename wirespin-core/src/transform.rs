/// Per-axis rotation of points and models
use nalgebra::Point3;
use std::f64::consts::TAU;

/// Rotation angles around the three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RotationState {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Same angle on every axis
    pub fn uniform(angle: f64) -> Self {
        Self::new(angle, angle, angle)
    }

    /// Rotate by delta amounts (in radians), keeping each angle in `[0, 2π)`
    pub fn rotate(&mut self, dx: f64, dy: f64, dz: f64) {
        self.x = (self.x + dx).rem_euclid(TAU);
        self.y = (self.y + dy).rem_euclid(TAU);
        self.z = (self.z + dz).rem_euclid(TAU);
    }

    /// Accumulate another rotation state as a step
    pub fn advance(&mut self, step: &RotationState) {
        self.rotate(step.x, step.y, step.z);
    }

    pub fn reset(&mut self) {
        *self = Self::zero();
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Rotate about the X axis in place
pub fn rotate_x(point: &mut Point3<f64>, theta: f64) {
    let (sin, cos) = theta.sin_cos();
    let (y, z) = (point.y, point.z);
    point.y = y * cos - z * sin;
    point.z = z * cos + y * sin;
}

/// Rotate about the Y axis in place
pub fn rotate_y(point: &mut Point3<f64>, theta: f64) {
    let (sin, cos) = theta.sin_cos();
    let (x, z) = (point.x, point.z);
    point.x = x * cos + z * sin;
    point.z = z * cos - x * sin;
}

/// Rotate about the Z axis in place
pub fn rotate_z(point: &mut Point3<f64>, theta: f64) {
    let (sin, cos) = theta.sin_cos();
    let (x, y) = (point.x, point.y);
    point.x = x * cos - y * sin;
    point.y = y * cos + x * sin;
}

/// Rotate a point about X, then Y, then Z
///
/// The order is fixed; swapping it produces a different pose.
pub fn rotate_point(point: &mut Point3<f64>, angles: &RotationState) {
    rotate_x(point, angles.x);
    rotate_y(point, angles.y);
    rotate_z(point, angles.z);
}

/// Rotate every vertex of a slice in place
pub fn rotate_model(vertices: &mut [Point3<f64>], angles: &RotationState) {
    for vertex in vertices {
        rotate_point(vertex, angles);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::{Rotation3, Vector3};

    fn assert_close(a: &Point3<f64>, b: &Point3<f64>) {
        assert!((a - b).norm() < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_rotation_state() {
        let mut state = RotationState::zero();
        assert_eq!(state.x, 0.0);
        assert_eq!(state.y, 0.0);
        assert_eq!(state.z, 0.0);

        state.rotate(0.1, 0.2, 0.3);
        assert!((state.x - 0.1).abs() < 1e-9);
        assert!((state.y - 0.2).abs() < 1e-9);
        assert!((state.z - 0.3).abs() < 1e-9);

        state.reset();
        assert_eq!(state, RotationState::zero());
    }

    #[test]
    fn test_rotation_state_wraps() {
        let mut state = RotationState::zero();
        for _ in 0..100 {
            state.advance(&RotationState::uniform(0.1));
        }
        assert!(state.x >= 0.0 && state.x < TAU);
        assert!((state.x - (10.0f64).rem_euclid(TAU)).abs() < 1e-9);

        state.rotate(-1.0, 0.0, 0.0);
        assert!(state.x >= 0.0);
    }

    #[test]
    fn test_identity_rotation() {
        let original = Point3::new(1.5, -2.0, 3.25);
        let mut point = original;
        rotate_point(&mut point, &RotationState::zero());
        assert_eq!(point, original);
    }

    #[test]
    fn test_z_rotation_inverse() {
        let original = Point3::new(3.0, 4.0, -1.0);
        let mut point = original;
        rotate_z(&mut point, 0.7);
        rotate_z(&mut point, -0.7);
        assert_close(&point, &original);
    }

    #[test]
    fn test_quarter_turns() {
        let mut p = Point3::new(1.0, 0.0, 0.0);
        rotate_z(&mut p, std::f64::consts::FRAC_PI_2);
        assert_close(&p, &Point3::new(0.0, 1.0, 0.0));

        let mut p = Point3::new(0.0, 1.0, 0.0);
        rotate_x(&mut p, std::f64::consts::FRAC_PI_2);
        assert_close(&p, &Point3::new(0.0, 0.0, 1.0));

        let mut p = Point3::new(0.0, 0.0, 1.0);
        rotate_y(&mut p, std::f64::consts::FRAC_PI_2);
        assert_close(&p, &Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_matches_composed_matrix() {
        let angles = RotationState::new(0.3, -1.1, 2.0);
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), angles.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), angles.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), angles.z);

        let original = Point3::new(0.5, 2.0, -3.0);
        let mut point = original;
        rotate_point(&mut point, &angles);
        assert_close(&point, &(rz * ry * rx * original));
    }

    #[test]
    fn test_axis_order_matters() {
        let original = Point3::new(1.0, 2.0, 3.0);
        let mut xyz = original;
        rotate_point(&mut xyz, &RotationState::new(0.5, 0.5, 0.0));

        let mut yx = original;
        rotate_y(&mut yx, 0.5);
        rotate_x(&mut yx, 0.5);
        assert!((xyz - yx).norm() > 1e-3);
    }

    #[test]
    fn test_rotate_model() {
        let mut vertices = vec![Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        rotate_model(&mut vertices, &RotationState::new(0.0, 0.0, std::f64::consts::PI));
        assert_close(&vertices[0], &Point3::new(-1.0, 0.0, 0.0));
        assert_close(&vertices[1], &Point3::new(0.0, -1.0, 0.0));
    }
}
