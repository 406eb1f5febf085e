//! Application context owning every GPU resource and the frame loop.
//!
//! [`Engine`] is the explicit home for state that would otherwise end up in
//! module-level globals: device, surface, camera, and renderer all live in
//! one struct the caller creates, drives, and tears down. The windowing
//! shell (native viewer or web entry) only translates events and calls in.

use crate::camera::{CameraUniform, OrbitController};
use crate::error::TeaviewError;
use crate::gpu::{CameraBinding, DepthTexture, GpuContext};
use crate::input::InputEvent;
use crate::options::Options;
use crate::renderer::TeapotRenderer;
use crate::util::FrameTiming;

/// Background color of the forward pass.
const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.013,
    g: 0.016,
    b: 0.022,
    a: 1.0,
};

/// Owns the GPU context, camera controller, and teapot renderer.
///
/// # Frame loop
///
/// Call [`render`](Self::render) once per frame and [`resize`](Self::resize)
/// when the surface size changes. Input arrives through
/// [`handle_input`](Self::handle_input) as platform-agnostic events.
///
/// # Camera data flow
///
/// The [`OrbitController`] pushes its uniform block through a sink closure
/// on every change; the engine wires that sink to a `write_buffer` into the
/// camera uniform buffer, so render passes always see the latest pose
/// without any per-frame camera work.
pub struct Engine {
    context: GpuContext,
    camera_binding: CameraBinding,
    camera: OrbitController,
    renderer: TeapotRenderer,
    depth: DepthTexture,
    frame_timing: FrameTiming,
    options: Options,
}

impl Engine {
    /// Initializes the GPU context and all render resources for `window`.
    ///
    /// The camera controller emits its first uniform block during
    /// construction, so the buffer is populated before the first frame.
    ///
    /// # Errors
    ///
    /// Returns [`TeaviewError::Gpu`] if surface, adapter, or device setup
    /// fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, TeaviewError> {
        let context = GpuContext::new(window, size).await?;
        let camera_binding = CameraBinding::new(&context.device);

        // The sink is the only place camera state crosses into GPU land.
        // Queue and buffer handles are internally refcounted, so the
        // closure keeps them alive independently of the binding.
        let queue = context.queue.clone();
        let buffer = camera_binding.buffer().clone();
        let sink = Box::new(move |uniform: &CameraUniform| {
            queue.write_buffer(&buffer, 0, bytemuck::bytes_of(uniform));
        });
        let camera =
            OrbitController::new(&options.camera, context.aspect_ratio(), sink);

        let renderer = TeapotRenderer::new(
            &context.device,
            context.format(),
            camera_binding.layout(),
        );
        let (width, height) = context.size();
        let depth = DepthTexture::new(&context.device, width, height);

        Ok(Self {
            context,
            camera_binding,
            camera,
            renderer,
            depth,
            frame_timing: FrameTiming::new(),
            options,
        })
    }

    /// Resizes the surface, depth attachment, and camera projection.
    ///
    /// Zero-sized updates (a minimized window) are ignored, which keeps the
    /// aspect ratio handed to the camera strictly positive.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.depth = DepthTexture::new(&self.context.device, width, height);
        self.camera.set_aspect(self.context.aspect_ratio());
    }

    /// Forwards a translated window event to the camera controller.
    ///
    /// Returns whether the event was consumed; always `false` once the
    /// camera has been disposed.
    pub fn handle_input(&mut self, event: InputEvent) -> bool {
        self.camera.handle_event(event)
    }

    /// Snaps the camera back to the framing configured in the options.
    pub fn reset_view(&mut self) {
        let position = self.options.camera.position_point();
        let target = self.options.camera.target_point();
        self.camera.retarget(position, target);
    }

    /// Draws one frame and presents it.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the swapchain texture cannot be
    /// acquired; the caller decides whether to reconfigure and retry.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.current_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let mut pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Forward Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                                store: wgpu::StoreOp::Store,
                            },
                            depth_slice: None,
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth.view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    ..Default::default()
                });
            self.renderer
                .draw(&mut pass, self.camera_binding.bind_group());
        }
        self.context.submit(encoder);
        frame.present();
        self.frame_timing.tick();
        Ok(())
    }

    /// Explicit teardown: detaches the camera controller from input.
    ///
    /// GPU resources are released when the engine is dropped; shutting down
    /// first guarantees no late event can mutate camera state while the
    /// window is closing. Safe to call more than once.
    pub fn shutdown(&mut self) {
        self.camera.dispose();
        log::info!("engine shut down");
    }

    /// Runtime options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Orbit camera controller.
    #[must_use]
    pub fn camera(&self) -> &OrbitController {
        &self.camera
    }

    /// Mutable access to the orbit camera controller.
    pub fn camera_mut(&mut self) -> &mut OrbitController {
        &mut self.camera
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }
}
