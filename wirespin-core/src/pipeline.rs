/// Per-frame rotate → project → rasterize pipeline
use nalgebra::Point3;
use tracing::trace;

use crate::canvas::Canvas;
use crate::config::RenderConfig;
use crate::geometry::{triangles_of, Model};
use crate::projection::Camera;
use crate::raster::draw_triangle;
use crate::transform::{rotate_model, RotationState};

/// Counts from a single rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub drawn: usize,
    pub skipped: usize,
}

/// Rendering state for one model
///
/// The base model is never modified. Each frame copies it, rotates the copy
/// by the accumulated angles and rasterizes the result, so the pose after
/// N frames depends only on N and not on rounding from earlier frames.
pub struct Pipeline {
    base: Model,
    rotation: RotationState,
    step: RotationState,
    camera: Camera,
    posed: Vec<Point3<f64>>,
}

impl Pipeline {
    pub fn new(model: Model, config: &RenderConfig) -> Self {
        let posed = Vec::with_capacity(model.vertices().len());
        Self {
            base: model,
            rotation: RotationState::zero(),
            step: config.rotation_step,
            camera: config.camera(),
            posed,
        }
    }

    pub fn model(&self) -> &Model {
        &self.base
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: RotationState) {
        self.rotation = rotation;
    }

    /// Return to the base pose
    pub fn reset(&mut self) {
        self.rotation.reset();
    }

    /// Add one frame's rotation step
    pub fn advance(&mut self) {
        self.rotation.advance(&self.step);
    }

    /// Vertices of the base model rotated to the current pose
    pub fn posed_vertices(&mut self) -> &[Point3<f64>] {
        self.posed.clear();
        self.posed.extend_from_slice(self.base.vertices());
        rotate_model(&mut self.posed, &self.rotation);
        &self.posed
    }

    /// Clear the canvas and draw the model at the current pose
    pub fn render(&mut self, canvas: &mut Canvas) -> FrameStats {
        canvas.clear();
        self.posed_vertices();

        let mut stats = FrameStats::default();
        for triangle in triangles_of(&self.posed) {
            if draw_triangle(canvas, &self.camera, &triangle) {
                stats.drawn += 1;
            } else {
                stats.skipped += 1;
            }
        }

        trace!(drawn = stats.drawn, skipped = stats.skipped, "frame rasterized");
        stats
    }

    /// Advance the rotation, then render
    pub fn step(&mut self, canvas: &mut Canvas) -> FrameStats {
        self.advance();
        self.render(canvas)
    }
}
