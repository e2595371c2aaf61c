//! Instanced draw passes pulling per-instance data from a storage buffer.
//!
//! Every pass follows the same pattern: one storage buffer, one bind group,
//! one pipeline, and a `draw(0..6, 0..instance_count)` call. The shaders
//! expand each instance into a quad themselves, so no vertex buffers are
//! bound.

use bytemuck::{Pod, Zeroable};

use crate::gpu::dynamic_buffer::TypedBuffer;

/// Color target format of the offscreen frame.
pub(crate) const COLOR_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;
/// Depth buffer format.
pub(crate) const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Vertices emitted per instance (two triangles).
const VERTICES_PER_INSTANCE: u32 = 6;

/// Shader identity: label + WGSL source, always passed together.
pub(crate) struct ShaderDef<'a> {
    pub(crate) label: &'a str,
    pub(crate) source: &'a str,
}

/// A single instanced draw pass: pipeline + typed storage buffer + bind
/// group.
///
/// Bind group layout convention:
/// - group(0): storage buffer (instances)
/// - group(1): camera and lighting uniforms
pub(crate) struct InstancedPass<T: Pod + Zeroable> {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: TypedBuffer<T>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    label: String,
}

impl<T: Pod + Zeroable> InstancedPass<T> {
    /// Create a pass drawing with `shader`. `depth_write` is off for passes
    /// that should not occlude one another.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        shader: &ShaderDef<'_>,
        scene_layout: &wgpu::BindGroupLayout,
        depth_write: bool,
    ) -> Self {
        let label = shader.label;
        let instance_buffer = TypedBuffer::with_capacity(
            device,
            &format!("{label} Buffer"),
            1024,
            wgpu::BufferUsages::STORAGE,
        );

        let bind_group_layout = Self::create_bind_group_layout(device, label);
        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &instance_buffer,
            label,
        );
        let pipeline = Self::create_pipeline(
            device,
            shader,
            &bind_group_layout,
            scene_layout,
            depth_write,
        );

        Self {
            pipeline,
            instance_buffer,
            bind_group_layout,
            bind_group,
            label: label.to_owned(),
        }
    }

    fn create_bind_group_layout(
        device: &wgpu::Device,
        label: &str,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("{label} Layout")),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX
                    | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        })
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        buffer: &TypedBuffer<T>,
        label: &str,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buffer.buffer().as_entire_binding(),
            }],
            label: Some(&format!("{label} Bind Group")),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        shader_def: &ShaderDef<'_>,
        bind_group_layout: &wgpu::BindGroupLayout,
        scene_layout: &wgpu::BindGroupLayout,
        depth_write: bool,
    ) -> wgpu::RenderPipeline {
        let label = shader_def.label;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{label} Shader")),
            source: wgpu::ShaderSource::Wgsl(shader_def.source.into()),
        });

        let pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label} Pipeline Layout")),
                bind_group_layouts: &[bind_group_layout, scene_layout],
                push_constant_ranges: &[],
            });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{label} Pipeline")),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: COLOR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: depth_write,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        })
    }

    /// Write typed instances to the GPU buffer. Recreates the bind group if
    /// the buffer was reallocated.
    pub fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        instances: &[T],
    ) {
        if self.instance_buffer.write(device, queue, instances) {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.instance_buffer,
                &self.label,
            );
        }
    }

    /// Issue the draw call for this pass.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        scene_bind_group: &'a wgpu::BindGroup,
    ) {
        if self.instance_buffer.is_empty() {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_bind_group(1, scene_bind_group, &[]);
        render_pass.draw(
            0..VERTICES_PER_INSTANCE,
            0..self.instance_buffer.count() as u32,
        );
    }
}
