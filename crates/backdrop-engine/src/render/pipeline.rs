use crate::config::ShaderSet;
use crate::geometry::VertexLayout;

// ── blend ─────────────────────────────────────────────────────────────────

/// Color blends source-over on premultiplied input; alpha keeps the maximum
/// seen so self-overlapping translucent geometry never drops coverage.
pub fn mesh_blend() -> wgpu::BlendState {
    wgpu::BlendState {
        color: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
            operation: wgpu::BlendOperation::Add,
        },
        alpha: wgpu::BlendComponent {
            src_factor: wgpu::BlendFactor::One,
            dst_factor: wgpu::BlendFactor::One,
            operation: wgpu::BlendOperation::Max,
        },
    }
}

// ── vertex layout ─────────────────────────────────────────────────────────

/// Position (location 0) and UV (location 1) at the geometry's offsets.
pub fn vertex_attributes(layout: VertexLayout) -> [wgpu::VertexAttribute; 2] {
    [
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x4,
            offset: layout.position_offset,
            shader_location: 0,
        },
        wgpu::VertexAttribute {
            format: wgpu::VertexFormat::Float32x2,
            offset: layout.uv_offset,
            shader_location: 1,
        },
    ]
}

// ── primitive ─────────────────────────────────────────────────────────────

/// Triangle list with back faces culled; the mesh is treated as solid.
pub fn mesh_primitive() -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        strip_index_format: None,
        front_face: wgpu::FrontFace::Ccw,
        cull_mode: Some(wgpu::Face::Back),
        polygon_mode: wgpu::PolygonMode::Fill,
        unclipped_depth: false,
        conservative: false,
    }
}

// ── pipeline ──────────────────────────────────────────────────────────────

/// Builds the mesh pipeline with an auto-derived layout.
///
/// Bind group 0 of the result is the uniform block; fetch it with
/// `pipeline.get_bind_group_layout(0)`.
pub fn build_pipeline(
    device: &wgpu::Device,
    shaders: &ShaderSet,
    layout: VertexLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let vertex_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("backdrop mesh vertex shader"),
        source: wgpu::ShaderSource::Wgsl(shaders.vertex.clone()),
    });
    let fragment_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("backdrop mesh fragment shader"),
        source: wgpu::ShaderSource::Wgsl(shaders.fragment.clone()),
    });

    let attributes = vertex_attributes(layout);
    let buffers = [wgpu::VertexBufferLayout {
        array_stride: layout.stride,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &attributes,
    }];

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("backdrop mesh pipeline"),
        layout: None,

        vertex: wgpu::VertexState {
            module: &vertex_module,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &buffers,
        },

        fragment: Some(wgpu::FragmentState {
            module: &fragment_module,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(mesh_blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),

        primitive: mesh_primitive(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    })
}
