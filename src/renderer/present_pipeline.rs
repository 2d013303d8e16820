use wgpu::util::DeviceExt;

use super::utils::LetterboxUniform;

pub struct PresentPipeline {
    pub pipeline:     wgpu::RenderPipeline,
    pub frame_bgl:    wgpu::BindGroupLayout, // group 0: frame texture + sampler
    pub uniforms_bgl: wgpu::BindGroupLayout, // group 1: letterbox uniform
}

/// Uploads the CPU frame into a texture and draws it as one letterboxed quad.
pub struct PresentPass {
    pub pipeline:            PresentPipeline,
    pub frame_texture:       wgpu::Texture,
    pub frame_size:          wgpu::Extent3d,
    pub frame_bind_group:    wgpu::BindGroup,
    pub uniforms_buffer:     wgpu::Buffer,
    pub uniforms_bind_group: wgpu::BindGroup,
}

fn make_pipeline(
    device: &wgpu::Device,
    output_format: wgpu::TextureFormat,
) -> PresentPipeline {
    let shader = device.create_shader_module(wgpu::include_wgsl!("shaders/present.wgsl"));

    let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("present_frame_bgl"),
        entries: &[
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            },
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                count: None,
            },
        ],
    });

    let uniforms_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("present_uniforms_bgl"),
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

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("present_pipeline_layout"),
        bind_group_layouts: &[&frame_bgl, &uniforms_bgl],
        ..Default::default()
    });

    let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("present_pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[], // quad corners come from vertex_index
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: output_format,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview_mask: None,
        cache: None,
    });

    PresentPipeline { pipeline, frame_bgl, uniforms_bgl }
}

/// Create a `PresentPass` for a `width × height` frame.
pub fn create_present_pass(
    device: &wgpu::Device,
    output_format: wgpu::TextureFormat,
    width: u32,
    height: u32,
    letterbox: LetterboxUniform,
) -> PresentPass {
    let pipeline = make_pipeline(device, output_format);

    let frame_size = wgpu::Extent3d {
        width: width.max(1),
        height: height.max(1),
        depth_or_array_layers: 1,
    };
    let frame_texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("present_frame"),
        size: frame_size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let frame_view = frame_texture.create_view(&wgpu::TextureViewDescriptor::default());

    // Pixel art: never smooth when scaling up.
    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("present_sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Nearest,
        min_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("present_frame_bg"),
        layout: &pipeline.frame_bgl,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&frame_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    let uniforms_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("present_uniforms"),
        contents: bytemuck::cast_slice(&[letterbox]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let uniforms_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("present_uniforms_bg"),
        layout: &pipeline.uniforms_bgl,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniforms_buffer.as_entire_binding(),
        }],
    });

    PresentPass {
        pipeline,
        frame_texture,
        frame_size,
        frame_bind_group,
        uniforms_buffer,
        uniforms_bind_group,
    }
}

impl PresentPass {
    /// Copy a tightly packed RGBA8 frame into the texture. Frames of the
    /// wrong size are skipped.
    pub fn upload(&self, queue: &wgpu::Queue, rgba: &[u8]) {
        let size = self.frame_size;
        let expected = (size.width * size.height * 4) as usize;
        if rgba.len() != expected {
            log::warn!("[renderer] frame is {} bytes, expected {expected}; skipped", rgba.len());
            return;
        }
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.frame_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            rgba,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * size.width),
                rows_per_image: Some(size.height),
            },
            size,
        );
    }

    pub fn set_letterbox(&self, queue: &wgpu::Queue, letterbox: LetterboxUniform) {
        queue.write_buffer(&self.uniforms_buffer, 0, bytemuck::cast_slice(&[letterbox]));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline.pipeline);
        pass.set_bind_group(0, &self.frame_bind_group, &[]);
        pass.set_bind_group(1, &self.uniforms_bind_group, &[]);
        pass.draw(0..6, 0..1);
    }
}
