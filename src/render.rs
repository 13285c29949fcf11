use std::borrow::Cow;

use glam::Vec2;
use wgpu::util::DeviceExt;

use crate::particle::RenderPoint;

/// World-space view the shader maps onto the surface, stretched to fill
/// the window.
pub const VIEW_CENTER: Vec2 = Vec2::splat(15.0);
pub const VIEW_EXTENT: Vec2 = Vec2::splat(30.0);

/// Anything exposing a flat run of colored points for the point pipeline.
pub trait Renderable {
    fn points(&self) -> &[RenderPoint];
}

pub struct PointRenderer {
    view_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    capacity: usize,

    bind_group: wgpu::BindGroup,
    pipeline: wgpu::RenderPipeline,
}

impl PointRenderer {
    pub fn new(device: &wgpu::Device, swapchain_format: wgpu::TextureFormat, capacity: usize) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: None,
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(include_str!("render.wgsl"))),
        });

        let view_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("View Buffer"),
            contents: bytemuck::bytes_of(&[
                VIEW_CENTER.x,
                VIEW_CENTER.y,
                VIEW_EXTENT.x,
                VIEW_EXTENT.y,
            ]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Buffer"),
            size: (std::mem::size_of::<RenderPoint>() * capacity) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: None,
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: None,
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_buffer.as_entire_binding(),
            }],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("points"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: None,
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vertex",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<RenderPoint>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Unorm8x4],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fragment",
                targets: &[Some(wgpu::ColorTargetState {
                    format: swapchain_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::PointList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        Self {
            view_buffer,
            vertex_buffer,
            capacity,

            bind_group,
            pipeline,
        }
    }

    /// Upload the frame's flattened points in one write.
    pub fn write_points(&self, queue: &wgpu::Queue, points: &[RenderPoint]) {
        debug_assert!(points.len() <= self.capacity);
        queue.write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(points));
    }

    pub fn begin_pass<'a>(
        &'a self,
        encoder: &'a mut wgpu::CommandEncoder,
        view: &'a wgpu::TextureView,
        num_points: u32,
    ) -> wgpu::RenderPass<'a> {
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: None,
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        rpass.set_pipeline(&self.pipeline);
        rpass.set_bind_group(0, &self.bind_group, &[]);
        rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        rpass.draw(0..num_points, 0..1);

        rpass
    }

    pub fn update_view(&self, queue: &wgpu::Queue, center: Vec2, extent: Vec2) {
        queue.write_buffer(
            &self.view_buffer,
            0,
            bytemuck::bytes_of(&[center.x, center.y, extent.x, extent.y]),
        );
    }
}
