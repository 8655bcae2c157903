//! Render configuration
//!
//! Every tunable of the pipeline and loop, with the documented defaults.

use std::time::Duration;

use crate::canvas::Glyphs;
use crate::projection::{Camera, DEFAULT_CAMERA_DISTANCE, DEFAULT_FOV, DEFAULT_NEAR_PLANE};
use crate::transform::RotationState;

pub const DEFAULT_ROTATION_STEP: f64 = 0.1;
pub const DEFAULT_FRAME_DELAY_MS: u64 = 100;

/// Configuration for the render pipeline and loop
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Angle added per frame on each axis (radians)
    pub rotation_step: RotationState,
    pub fov: f64,
    pub camera_distance: f64,
    pub near_plane: f64,
    /// Sleep at the end of every frame
    pub frame_delay: Duration,
    /// Uniform scale applied to the model once at load
    pub scale: f64,
    pub glyphs: Glyphs,
}

impl RenderConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(self.fov, self.camera_distance).with_near_plane(self.near_plane)
    }

    pub fn with_rotation_step(mut self, step: RotationState) -> Self {
        self.rotation_step = step;
        self
    }

    pub fn with_frame_delay(mut self, delay: Duration) -> Self {
        self.frame_delay = delay;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            rotation_step: RotationState::uniform(DEFAULT_ROTATION_STEP),
            fov: DEFAULT_FOV,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            near_plane: DEFAULT_NEAR_PLANE,
            frame_delay: Duration::from_millis(DEFAULT_FRAME_DELAY_MS),
            scale: 1.0,
            glyphs: Glyphs::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.rotation_step, RotationState::new(0.1, 0.1, 0.1));
        assert_eq!(config.frame_delay, Duration::from_millis(100));
        assert_eq!(config.scale, 1.0);

        let camera = config.camera();
        assert_eq!(camera.fov, 1200.0);
        assert_eq!(camera.camera_distance, 200.0);
        assert_eq!(camera.near_plane, 1.0);
    }
}
