use glam::Mat4;

use crate::projection::ViewProjection;

/// Transform uniform block for the axis shader (`Model`, `View`, `Perspective`)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TransformUniform {
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub perspective: [[f32; 4]; 4],
}

impl TransformUniform {
    /// Column-major matrices for one frame; the axes never move so the model
    /// matrix is identity
    pub fn new(frame: &ViewProjection) -> Self {
        Self {
            model: Mat4::IDENTITY.to_cols_array_2d(),
            view: frame.view.to_cols_array_2d(),
            perspective: frame.projection.to_cols_array_2d(),
        }
    }
}

/// Per-draw `currentColor` uniform (RGBA)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColorUniform {
    pub current_color: [f32; 4],
}

impl ColorUniform {
    pub const fn new(current_color: [f32; 4]) -> Self {
        Self { current_color }
    }
}

/// Line endpoint for the axis vertex buffer
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct AxisVertex {
    pub position: [f32; 3],
}

impl AxisVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];

    pub const fn new(position: [f32; 3]) -> Self {
        Self { position }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<AxisVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
