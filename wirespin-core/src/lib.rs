/// wirespin Core Library - Wireframe geometry, rotation, projection and rasterization
///
/// This library provides the terminal-independent rendering pipeline:
/// STL loading, per-axis rotation, pinhole projection and Bresenham
/// rasterization onto a character canvas.

pub mod canvas;
pub mod config;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod stl;
pub mod transform;

// Re-export commonly used types
pub use canvas::{Canvas, Glyphs};
pub use config::RenderConfig;
pub use error::{Error, Result};
pub use geometry::{Model, Triangle};
pub use pipeline::{FrameStats, Pipeline};
pub use projection::Camera;
pub use transform::RotationState;
