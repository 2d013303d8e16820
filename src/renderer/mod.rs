pub mod present_pipeline;
pub mod utils;

use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::window::Window;

use present_pipeline::{PresentPass, create_present_pass};
use utils::{LetterboxUniform, letterbox_viewport};

use crate::surface::Surface;
use crate::window::{WindowConfig, WindowMode};

#[derive(thiserror::Error, Debug)]
pub enum RenderError {
    #[error("could not create a drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no suitable GPU adapter found: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported formats")]
    NoFormat,
}

pub struct Renderer {
    pub window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    present: PresentPass,
    /// Logical frame size against the current window size, for letterboxing.
    layout: WindowConfig,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, logical_width: u32, logical_height: u32) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(Arc::clone(&window))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                ..Default::default()
            })
            .await?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor::default())
            .await?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(wgpu::TextureFormat::is_srgb)
            .or_else(|| caps.formats.first().copied())
            .ok_or(RenderError::NoFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let layout = WindowConfig {
            physical_width: config.width,
            physical_height: config.height,
            logical_width,
            logical_height,
            mode: WindowMode::Windowed,
        };
        let letterbox = LetterboxUniform::from_viewport(
            &letterbox_viewport(&layout),
            config.width,
            config.height,
        );
        let present = create_present_pass(&device, format, logical_width, logical_height, letterbox);

        log::info!(
            "[renderer] {}x{} frame in a {}x{} window ({format:?})",
            logical_width,
            logical_height,
            config.width,
            config.height
        );

        Ok(Self { window, surface, device, queue, config, present, layout })
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);

        self.layout.physical_width = new_size.width;
        self.layout.physical_height = new_size.height;
        let letterbox = LetterboxUniform::from_viewport(
            &letterbox_viewport(&self.layout),
            new_size.width,
            new_size.height,
        );
        self.present.set_letterbox(&self.queue, letterbox);
    }

    /// Upload `frame` and draw it letterboxed, black bars around it.
    pub fn present(&mut self, frame: &Surface) -> Result<(), wgpu::SurfaceError> {
        self.present.upload(&self.queue, frame.as_bytes());

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("present_encoder") });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("present_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            self.present.draw(&mut pass);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}
