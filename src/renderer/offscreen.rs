use std::sync::mpsc;

use wgpu::util::DeviceExt;

use super::pass::{InstancedPass, ShaderDef, COLOR_FORMAT, DEPTH_FORMAT};
use super::readback::{padded_bytes_per_row, strip_row_padding};
use super::{CapturedFrame, RenderTarget};
use crate::camera::core::CameraUniform;
use crate::error::VizError;
use crate::gpu::render_context::RenderContext;
use crate::options::RenderOptions;
use crate::scene::instancer::AtomInstance;
use crate::scene::lighting::LightingUniform;
use crate::scene::segment::LineInstance;
use crate::scene::SceneFrame;

const ATOM_SHADER: &str = concat!(
    include_str!("../../assets/shaders/common.wgsl"),
    include_str!("../../assets/shaders/atoms.wgsl"),
);
const LINE_SHADER: &str = concat!(
    include_str!("../../assets/shaders/common.wgsl"),
    include_str!("../../assets/shaders/lines.wgsl"),
);

/// Draws scene frames into an offscreen RGBA8 texture and reads them back.
pub struct OffscreenRenderer {
    context: RenderContext,
    render: RenderOptions,

    color_texture: wgpu::Texture,
    color_view: wgpu::TextureView,
    depth_view: wgpu::TextureView,

    camera_uniform: CameraUniform,
    camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,

    atom_pass: InstancedPass<AtomInstance>,
    line_pass: InstancedPass<LineInstance>,

    has_frame: bool,
}

impl OffscreenRenderer {
    /// Build all GPU resources for a `context`-sized target.
    #[must_use]
    pub fn new(context: RenderContext, render: RenderOptions) -> Self {
        let device = &context.device;
        let (width, height) = (context.width(), context.height());

        let (color_texture, color_view) = create_target(
            device,
            "Offscreen Color",
            width,
            height,
            COLOR_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        );
        let (_, depth_view) = create_target(
            device,
            "Offscreen Depth",
            width,
            height,
            DEPTH_FORMAT,
            wgpu::TextureUsages::RENDER_ATTACHMENT,
        );

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.set_viewport(width, height);
        let camera_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[camera_uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let lighting_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Lighting Buffer"),
                contents: bytemuck::cast_slice(&[LightingUniform::new(
                    &crate::scene::LightRig::default(),
                    &render,
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        let scene_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Scene Bind Group Layout"),
                entries: &[uniform_entry(0), uniform_entry(1)],
            });
        let scene_bind_group =
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &scene_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: camera_buffer.as_entire_binding(),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: lighting_buffer.as_entire_binding(),
                    },
                ],
                label: Some("Scene Bind Group"),
            });

        let atom_pass = InstancedPass::new(
            device,
            &ShaderDef {
                label: "Atom Impostor",
                source: ATOM_SHADER,
            },
            &scene_layout,
            true,
        );
        let line_pass = InstancedPass::new(
            device,
            &ShaderDef {
                label: "Line",
                source: LINE_SHADER,
            },
            &scene_layout,
            false,
        );

        Self {
            context,
            render,
            color_texture,
            color_view,
            depth_view,
            camera_uniform,
            camera_buffer,
            lighting_buffer,
            scene_bind_group,
            atom_pass,
            line_pass,
            has_frame: false,
        }
    }

    /// Create a headless renderer sized by `render`.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Gpu`] if no adapter or device is available.
    pub fn headless(render: RenderOptions) -> Result<Self, VizError> {
        let context =
            pollster::block_on(RenderContext::headless(render.width, render.height))?;
        Ok(Self::new(context, render))
    }

    fn upload(&mut self, frame: &SceneFrame<'_>) {
        let device = &self.context.device;
        let queue = &self.context.queue;

        let mut camera = frame.camera.clone();
        camera.aspect = self.context.width() as f32 / self.context.height() as f32;
        self.camera_uniform.update_view_proj(&camera, frame.offset);
        queue.write_buffer(
            &self.camera_buffer,
            0,
            bytemuck::cast_slice(&[self.camera_uniform]),
        );
        queue.write_buffer(
            &self.lighting_buffer,
            0,
            bytemuck::cast_slice(&[LightingUniform::new(&frame.lights, &self.render)]),
        );

        self.atom_pass.write_instances(device, queue, frame.atoms);
        self.line_pass
            .write_instances(device, queue, &frame.line_instances());
    }
}

impl RenderTarget for OffscreenRenderer {
    fn render(&mut self, frame: &SceneFrame<'_>) -> Result<(), VizError> {
        self.upload(frame);

        let bg = frame.background;
        let mut encoder = self.context.create_encoder();
        {
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Render Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &self.color_view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(bg.r),
                                    g: f64::from(bg.g),
                                    b: f64::from(bg.b),
                                    a: f64::from(bg.a),
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            // Spheres first so lines depth-test against them.
            if !frame.is_blank() {
                self.atom_pass.draw(&mut render_pass, &self.scene_bind_group);
                self.line_pass.draw(&mut render_pass, &self.scene_bind_group);
            }
        }
        self.context.submit(encoder);
        self.has_frame = true;
        Ok(())
    }

    fn capture(&mut self) -> Result<CapturedFrame, VizError> {
        if !self.has_frame {
            return Err(VizError::Capture("no frame has been rendered".into()));
        }
        let (width, height) = self.size();
        let device = &self.context.device;
        let padded = padded_bytes_per_row(width);

        let output_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Capture Buffer"),
            size: u64::from(padded) * u64::from(height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self.context.create_encoder();
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.color_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &output_buffer,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.context.submit(encoder);

        let buffer_slice = output_buffer.slice(..);
        let (sender, receiver) = mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        // Poll until the map callback reports back.
        let mapped = loop {
            let _ = device.poll(wgpu::PollType::Poll);
            match receiver.try_recv() {
                Ok(result) => break result,
                Err(mpsc::TryRecvError::Empty) => std::thread::yield_now(),
                Err(mpsc::TryRecvError::Disconnected) => {
                    return Err(VizError::Capture(
                        "readback callback dropped".into(),
                    ));
                }
            }
        };
        mapped.map_err(|e| VizError::Capture(format!("buffer map failed: {e}")))?;

        let data = buffer_slice.get_mapped_range();
        let pixels = strip_row_padding(&data, width, height);
        drop(data);
        output_buffer.unmap();

        CapturedFrame::new(width, height, pixels)
    }

    fn size(&self) -> (u32, u32) {
        (self.context.width(), self.context.height())
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_target(
    device: &wgpu::Device,
    label: &str,
    width: u32,
    height: u32,
    format: wgpu::TextureFormat,
    usage: wgpu::TextureUsages,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}
