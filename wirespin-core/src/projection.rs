/// Pinhole camera projection onto the character grid
use nalgebra::{Point2, Point3};

pub const DEFAULT_FOV: f64 = 1200.0;
pub const DEFAULT_CAMERA_DISTANCE: f64 = 200.0;
pub const DEFAULT_NEAR_PLANE: f64 = 1.0;

/// Camera configuration for wireframe projection
///
/// The camera looks down +Z from `camera_distance` units in front of the
/// model origin. A point's depth is `z + camera_distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub fov: f64,
    pub camera_distance: f64,
    /// Minimum depth a vertex needs to be projected
    pub near_plane: f64,
}

impl Camera {
    pub fn new(fov: f64, camera_distance: f64) -> Self {
        Self {
            fov,
            camera_distance,
            near_plane: DEFAULT_NEAR_PLANE,
        }
    }

    pub fn with_near_plane(mut self, near_plane: f64) -> Self {
        self.near_plane = near_plane;
        self
    }

    pub fn depth(&self, point: &Point3<f64>) -> f64 {
        point.z + self.camera_distance
    }

    /// Project a 3D point to screen space with no depth check
    ///
    /// A depth of zero yields infinite coordinates and a negative depth
    /// mirrors the point through the screen centre.
    pub fn project_unclipped(&self, point: &Point3<f64>, width: f64, height: f64) -> Point2<f64> {
        let scale = self.fov / self.depth(point);
        Point2::new(
            point.x * scale + width / 2.0,
            point.y * scale + height / 2.0,
        )
    }

    /// Project a 3D point to screen space
    ///
    /// Returns `None` when the point sits closer than the near plane or
    /// behind the camera.
    pub fn project(&self, point: &Point3<f64>, width: f64, height: f64) -> Option<Point2<f64>> {
        let depth = self.depth(point);
        if depth.is_nan() || depth < self.near_plane {
            return None;
        }
        Some(self.project_unclipped(point, width, height))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_FOV, DEFAULT_CAMERA_DISTANCE)
    }
}
