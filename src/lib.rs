pub mod axes;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod frame;
pub mod input;
pub mod projection;
pub mod renderer;
pub mod types;
pub mod window;

pub use camera::{CameraCommand, CameraController, CameraPose, OrbitState, RotateDirection, ZoomDirection};
pub use config::ViewerConfig;
pub use projection::{build_projection, build_view, ProjectionParams, ViewProjection};
