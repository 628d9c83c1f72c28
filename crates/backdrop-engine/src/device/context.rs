use anyhow::{Context, Result};
use wgpu::util::DeviceExt;

use crate::config::BackdropConfig;
use crate::geometry::Geometry;
use crate::render::{self, DrawCall, FramePlan, FrameRenderer, FrameStatus, UNIFORM_BUFFER_SIZE};
use crate::surface::SurfaceSize;

use super::surface::{self, SurfaceErrorAction};
use super::Acquired;

/// Render-pass settings reused every frame.
///
/// Only the color attachment view changes between frames; it is taken from the
/// freshly acquired surface texture.
#[derive(Debug, Copy, Clone)]
pub struct PassTemplate {
    pub label: &'static str,
    pub clear: wgpu::Color,
}

impl PassTemplate {
    pub fn new(clear_color: [f64; 4]) -> Self {
        let [r, g, b, a] = clear_color;
        Self {
            label: "backdrop mesh pass",
            clear: wgpu::Color { r, g, b, a },
        }
    }

    fn color_attachment<'v>(&self, view: &'v wgpu::TextureView) -> wgpu::RenderPassColorAttachment<'v> {
        wgpu::RenderPassColorAttachment {
            view,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(self.clear),
                store: wgpu::StoreOp::Store,
            },
            depth_slice: None,
        }
    }
}

/// Every GPU handle the backdrop draws with.
///
/// Built once by [`RenderContext::new`] and then owned by the frame driver. The
/// handles themselves never change; only the surface configuration follows the
/// layout.
pub struct RenderContext {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,

    /// Active surface configuration.
    config: wgpu::SurfaceConfiguration,

    /// False while the layout is zero-sized; wgpu cannot configure 0x0.
    configured: bool,

    size: SurfaceSize,

    /// Largest surface edge the device accepts.
    max_dimension: u32,

    pipeline: wgpu::RenderPipeline,
    bind_group: wgpu::BindGroup,
    uniform_buffer: wgpu::Buffer,
    vertex_buffer: wgpu::Buffer,
    index_buffer: Option<wgpu::Buffer>,

    pass: PassTemplate,
}

impl RenderContext {
    /// Configures the surface and creates buffers, pipeline and bind group.
    pub fn new(
        acquired: Acquired,
        geometry: &Geometry<'_>,
        config: &BackdropConfig,
        size: SurfaceSize,
    ) -> Result<Self> {
        let Acquired {
            surface,
            adapter,
            device,
            queue,
        } = acquired;

        let init = &config.device;
        let max_dimension = device.limits().max_texture_dimension_2d;
        let size = size.clamped(max_dimension);

        let caps = surface.get_capabilities(&adapter);
        let format = surface::choose_surface_format(&caps, init.prefer_srgb)
            .context("surface reports no supported formats")?;
        let alpha_mode = surface::choose_alpha_mode(&caps, init.alpha_mode);

        if Some(alpha_mode) != init.alpha_mode {
            log::warn!("requested alpha mode {:?} unsupported; using {alpha_mode:?}", init.alpha_mode);
        }

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: init.present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: init.desired_maximum_frame_latency,
        };

        let configured = !size.is_empty();
        if configured {
            surface.configure(&device, &surface_config);
        }

        // `create_buffer_init` maps at creation, copies, then unmaps.
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("backdrop mesh vertices"),
            contents: geometry.vertex_bytes(),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let index_buffer = geometry.index_bytes().map(|indices| {
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("backdrop mesh indices"),
                contents: indices,
                usage: wgpu::BufferUsages::INDEX,
            })
        });

        let pipeline = render::build_pipeline(&device, &config.shaders, geometry.layout(), format);

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("backdrop uniforms"),
            size: UNIFORM_BUFFER_SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("backdrop uniform bind group"),
            layout: &pipeline.get_bind_group_layout(0),
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        log::debug!(
            "backdrop context ready: {}x{} {format:?}, {} bytes of vertices, indexed: {}",
            size.width,
            size.height,
            geometry.byte_length(),
            geometry.is_indexed(),
        );

        Ok(Self {
            surface,
            device,
            queue,
            config: surface_config,
            configured,
            size,
            max_dimension,
            pipeline,
            bind_group,
            uniform_buffer,
            vertex_buffer,
            index_buffer,
            pass: PassTemplate::new(config.clear_color),
        })
    }

    fn reconfigure(&mut self) {
        if !self.size.is_empty() {
            self.surface.configure(&self.device, &self.config);
            self.configured = true;
        }
    }

    fn handle_surface_error(&mut self, err: wgpu::SurfaceError) -> FrameStatus {
        match surface::map_surface_error(&err) {
            SurfaceErrorAction::Reconfigured => {
                log::debug!("surface {err}; reconfiguring");
                self.reconfigure();
                FrameStatus::Skipped
            }
            SurfaceErrorAction::SkipFrame => FrameStatus::Skipped,
            SurfaceErrorAction::Fatal => {
                log::error!("surface error is unrecoverable: {err}");
                FrameStatus::Lost
            }
        }
    }
}

impl FrameRenderer for RenderContext {
    fn resize(&mut self, size: SurfaceSize) {
        let size = size.clamped(self.max_dimension);
        let changed = !self.size.same_pixels(&size);
        self.size = size;

        if size.is_empty() || (self.configured && !changed) {
            return;
        }

        log::debug!("surface resized to {}x{}", size.width, size.height);
        self.config.width = size.width;
        self.config.height = size.height;
        self.reconfigure();
    }

    fn render(&mut self, plan: &FramePlan) -> FrameStatus {
        if !self.configured || plan.size.is_empty() {
            return FrameStatus::Skipped;
        }

        for write in plan.uniforms.writes() {
            self.queue.write_buffer(&self.uniform_buffer, write.offset, write.bytes);
        }

        let surface_texture = match self.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(err) => return self.handle_surface_error(err),
        };
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("backdrop frame encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some(self.pass.label),
                color_attachments: &[Some(self.pass.color_attachment(&view))],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            rpass.set_pipeline(&self.pipeline);
            rpass.set_bind_group(0, &self.bind_group, &[]);
            rpass.set_vertex_buffer(0, self.vertex_buffer.slice(..));

            match (plan.draw, self.index_buffer.as_ref()) {
                (DrawCall::Indexed { index_count }, Some(index_buffer)) => {
                    rpass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                    rpass.draw_indexed(0..index_count, 0, 0..1);
                }
                (DrawCall::NonIndexed { vertex_count }, _) => {
                    rpass.draw(0..vertex_count, 0..1);
                }
                (DrawCall::Indexed { .. }, None) => {
                    log::error!("indexed draw requested but the mesh has no index buffer");
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();

        FrameStatus::Presented
    }
}
