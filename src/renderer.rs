use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::axes::{axis_vertices, Axis, AXIS_HALF_LENGTH};
use crate::core::{DisplayContext, GpuContext};
use crate::projection::ViewProjection;
use crate::types::{AxisVertex, ColorUniform, TransformUniform};

pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color::BLACK;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Draws the three reference axes as coloured lines with depth testing
pub struct AxisRenderer {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: DisplayContext,
    depth_view: wgpu::TextureView,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    transform_buffer: wgpu::Buffer,
    transform_bind_group: wgpu::BindGroup,
    color_bind_group: wgpu::BindGroup,
    color_stride: u32,
}

impl AxisRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self> {
        let size = DisplayContext::from(window.inner_size()).non_empty();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;
        let gpu = GpuContext::new_with_surface(&instance, &surface).await?;
        let device = gpu.device();

        let surface_config = Self::create_surface_config(&surface, gpu.adapter(), size)?;
        surface.configure(device, &surface_config);

        let depth_view = Self::create_depth_view(device, size);

        let vertices = axis_vertices(AXIS_HALF_LENGTH);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Vertices"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let transform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Transform Buffer"),
            size: std::mem::size_of::<TransformUniform>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let color_stride = align_to(
            std::mem::size_of::<ColorUniform>() as u32,
            gpu.uniform_offset_alignment(),
        );
        let color_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Axis Colors"),
            contents: &pack_axis_colors(color_stride),
            usage: wgpu::BufferUsages::UNIFORM,
        });

        let transform_layout = Self::create_transform_layout(device);
        let color_layout = Self::create_color_layout(device);

        let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &transform_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: transform_buffer.as_entire_binding(),
            }],
            label: Some("transform_bind_group"),
        });

        let color_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &color_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                    buffer: &color_buffer,
                    offset: 0,
                    size: wgpu::BufferSize::new(std::mem::size_of::<ColorUniform>() as u64),
                }),
            }],
            label: Some("color_bind_group"),
        });

        let pipeline = Self::create_render_pipeline(
            device,
            &transform_layout,
            &color_layout,
            surface_config.format,
        );

        log::info!(
            "Axis renderer initialized: {}x{}, surface format {:?}",
            size.width,
            size.height,
            surface_config.format
        );

        Ok(Self {
            gpu,
            surface,
            surface_config,
            size,
            depth_view,
            pipeline,
            vertex_buffer,
            transform_buffer,
            transform_bind_group,
            color_bind_group,
            color_stride,
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: DisplayContext,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or("Surface reports no supported formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_depth_view(device: &wgpu::Device, size: DisplayContext) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });

        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn create_transform_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                // Binding 0: Model / View / Perspective
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<TransformUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
            label: Some("transform_bind_group_layout"),
        })
    }

    fn create_color_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                // Binding 0: currentColor, one slot per axis
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: true,
                        min_binding_size: wgpu::BufferSize::new(
                            std::mem::size_of::<ColorUniform>() as u64,
                        ),
                    },
                    count: None,
                },
            ],
            label: Some("color_bind_group_layout"),
        })
    }

    fn create_render_pipeline(
        device: &wgpu::Device,
        transform_layout: &wgpu::BindGroupLayout,
        color_layout: &wgpu::BindGroupLayout,
        surface_format: wgpu::TextureFormat,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Axis Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/axes.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Axis Pipeline Layout"),
            bind_group_layouts: &[transform_layout, color_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Axis Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[AxisVertex::layout()],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }

    /// Upload this frame's transforms and draw the axes
    pub fn render(&mut self, frame: &ViewProjection) -> std::result::Result<(), wgpu::SurfaceError> {
        let transforms = TransformUniform::new(frame);
        self.gpu.queue().write_buffer(
            &self.transform_buffer,
            0,
            bytemuck::cast_slice(&[transforms]),
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Axis Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Axis Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Discard,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.transform_bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            for axis in Axis::ALL {
                render_pass.set_bind_group(
                    1,
                    &self.color_bind_group,
                    &[axis.index() * self.color_stride],
                );
                render_pass.draw(axis.vertex_range(), 0..1);
            }
        }

        self.gpu.queue().submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    /// Reconfigure for a new framebuffer size. Zero-sized (minimised)
    /// framebuffers are skipped and return false.
    pub fn resize(&mut self, size: DisplayContext) -> bool {
        if size.is_empty() {
            return false;
        }

        self.size = size;
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        self.reconfigure();
        self.depth_view = Self::create_depth_view(self.gpu.device(), size);
        true
    }

    /// Reapply the current surface configuration after the surface was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(self.gpu.device(), &self.surface_config);
    }

    pub fn size(&self) -> DisplayContext {
        self.size
    }
}

/// Round `value` up to a multiple of `alignment`
pub fn align_to(value: u32, alignment: u32) -> u32 {
    value.div_ceil(alignment) * alignment
}

/// One `ColorUniform` per axis, each starting on a `stride` boundary so it
/// can be selected with a dynamic offset
pub fn pack_axis_colors(stride: u32) -> Vec<u8> {
    let color_size = std::mem::size_of::<ColorUniform>();
    let mut contents = vec![0u8; stride as usize * Axis::ALL.len()];

    for axis in Axis::ALL {
        let offset = (axis.index() * stride) as usize;
        contents[offset..offset + color_size].copy_from_slice(bytemuck::bytes_of(&axis.color()));
    }

    contents
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn align_to_rounds_up() {
        assert_eq!(align_to(16, 256), 256);
        assert_eq!(align_to(256, 256), 256);
        assert_eq!(align_to(257, 256), 512);
        assert_eq!(align_to(16, 16), 16);
    }

    #[test]
    fn packed_colors_sit_on_stride_boundaries() {
        let stride = 256;
        let contents = pack_axis_colors(stride);
        assert_eq!(contents.len(), 3 * stride as usize);

        for axis in Axis::ALL {
            let offset = (axis.index() * stride) as usize;
            let color: ColorUniform = bytemuck::pod_read_unaligned(&contents[offset..offset + 16]);
            assert_eq!(color, axis.color());
        }
    }

    #[test]
    fn padding_between_colors_is_zeroed() {
        let contents = pack_axis_colors(64);
        assert!(contents[16..64].iter().all(|&b| b == 0));
    }
}
