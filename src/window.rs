use std::sync::Arc;
use winit::window::Window as WinitWindow;

use crate::camera::CameraController;
use crate::core::DisplayContext;
use crate::projection::{ProjectionParams, ViewProjection};
use crate::renderer::AxisRenderer;

/// Wrapper around winit Window with imperative draw API
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    /// Draw a frame from the camera's current pose. Matrices are rebuilt
    /// here every call.
    pub fn draw(
        &self,
        renderer: &mut AxisRenderer,
        camera: &CameraController,
        projection: &ProjectionParams,
    ) -> Result<(), wgpu::SurfaceError> {
        let pose = camera.current_pose();
        let frame = ViewProjection::for_frame(&pose, projection);
        renderer.render(&frame)
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    pub fn dimensions(&self) -> DisplayContext {
        self.inner.inner_size().into()
    }
}
