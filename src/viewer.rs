//! Standalone teapot window backed by winit.
//!
//! The viewer owns the event loop and the window; all rendering state
//! lives in the [`Engine`]. Window events are translated into
//! platform-agnostic [`InputEvent`]s before they reach the camera, so the
//! controller never sees winit types.
//!
//! ```no_run
//! # use teaview::Viewer;
//! Viewer::builder()
//!     .with_title("orbit demo")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

use crate::{error::TeaviewError, options::Options, Engine, InputEvent};

/// Scroll distance represented by one wheel notch, in pixels.
///
/// Mouse wheels report line deltas while trackpads report pixel deltas;
/// this factor puts both on the same scale before the camera's zoom
/// sensitivity applies.
const WHEEL_LINE_SCALE: f32 = 40.0;

#[cfg(all(target_arch = "wasm32", feature = "web"))]
type PendingEngine =
    std::rc::Rc<std::cell::RefCell<Option<Result<Engine, TeaviewError>>>>;

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: Option<String>,
}

impl ViewerBuilder {
    /// Create a builder with default options and the configured title.
    fn new() -> Self {
        Self {
            options: None,
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title, overriding the options value.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        let mut options = self.options.unwrap_or_default();
        if let Some(title) = self.title {
            options.window.title = title;
        }
        Viewer { options }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the orbitable teapot scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop.
    ///
    /// Blocks until the window is closed on native targets. On the web
    /// this spawns the loop and returns immediately; the browser drives
    /// it from then on.
    ///
    /// # Errors
    ///
    /// Returns [`TeaviewError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), TeaviewError> {
        let event_loop =
            EventLoop::new().map_err(|e| TeaviewError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let app = ViewerApp {
            window: None,
            engine: None,
            options: self.options,
            cursor: (0.0, 0.0),
            #[cfg(all(target_arch = "wasm32", feature = "web"))]
            pending_engine: PendingEngine::default(),
        };

        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        {
            use winit::platform::web::EventLoopExtWebSys;
            event_loop.spawn_app(app);
            Ok(())
        }

        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        {
            let mut app = app;
            event_loop
                .run_app(&mut app)
                .map_err(|e| TeaviewError::Viewer(e.to_string()))
        }
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<Engine>,
    options: Options,
    /// Last cursor position; winit reports button presses without
    /// coordinates, so the drag anchor comes from here.
    cursor: (f32, f32),
    /// Engine handed over from the async build on the web.
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    pending_engine: PendingEngine,
}

/// Compute the wgpu surface size — always at least one pixel per axis,
/// since a minimized window reports zero and the swapchain rejects it.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

/// Map a winit scroll delta onto the zoom axis.
///
/// winit reports positive `y` when scrolling up; the camera treats a
/// positive delta as zoom-out, matching the scroll-down-to-back-away
/// convention.
fn wheel_delta(delta: MouseScrollDelta) -> f32 {
    #[allow(clippy::cast_possible_truncation)]
    match delta {
        MouseScrollDelta::LineDelta(_, y) => -y * WHEEL_LINE_SCALE,
        MouseScrollDelta::PixelDelta(pos) => -(pos.y as f32),
    }
}

#[cfg(all(target_arch = "wasm32", feature = "web"))]
impl ViewerApp {
    /// Move a finished async engine build into place.
    fn adopt_pending_engine(&mut self, event_loop: &ActiveEventLoop) {
        if self.engine.is_some() {
            return;
        }
        let Some(result) = self.pending_engine.borrow_mut().take() else {
            return;
        };
        match result {
            Ok(engine) => self.engine = Some(engine),
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.options.window.title)
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.options.window.width,
                self.options.window.height,
            ));
        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        let attrs = {
            use winit::platform::web::WindowAttributesExtWebSys;
            attrs.with_append(true)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        {
            use winit::platform::web::WindowExtWebSys;
            if let Some(canvas) = window.canvas() {
                // Canvases are inline elements; block display avoids the
                // baseline gap and the scrollbar that comes with it.
                let _ = canvas
                    .set_attribute("style", "display: block; margin: 0 auto;");
            }
        }

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        log::info!("window created at {vp_w}x{vp_h}");

        #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
        {
            let built = pollster::block_on(Engine::new(
                window.clone(),
                (vp_w, vp_h),
                self.options.clone(),
            ));
            match built {
                Ok(engine) => self.engine = Some(engine),
                Err(e) => {
                    log::error!("Failed to initialize engine: {e}");
                    event_loop.exit();
                    return;
                }
            }
        }

        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        {
            // Device requests are async-only on the web; park the result
            // in the shared slot and pick it up on the next event.
            let slot = PendingEngine::clone(&self.pending_engine);
            let handle = window.clone();
            let options = self.options.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let engine =
                    Engine::new(handle.clone(), (vp_w, vp_h), options).await;
                *slot.borrow_mut() = Some(engine);
                handle.request_redraw();
            });
        }

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        #[cfg(all(target_arch = "wasm32", feature = "web"))]
        self.adopt_pending_engine(event_loop);

        // Guard: both window and engine must be initialised.
        if self.window.is_none() || self.engine.is_none() {
            return;
        }

        match event {
            WindowEvent::Resized(event_size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(event_size.width, event_size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                let inner = self.window.as_ref().map(|w| w.inner_size());
                if let (Some(engine), Some(inner)) =
                    (&mut self.engine, inner)
                {
                    let (vp_w, vp_h) = viewport_size(inner);
                    engine.resize(vp_w, vp_h);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let (vp_w, vp_h) =
                                    viewport_size(w.inner_size());
                                engine.resize(vp_w, vp_h);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {:?}", e);
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state,
                ..
            } => {
                let input = if state == ElementState::Pressed {
                    InputEvent::PointerPressed {
                        x: self.cursor.0,
                        y: self.cursor.1,
                    }
                } else {
                    InputEvent::PointerReleased
                };
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(input);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                #[allow(clippy::cast_possible_truncation)]
                let (x, y) = (position.x as f32, position.y as f32);
                self.cursor = (x, y);
                if let Some(engine) = &mut self.engine {
                    let _ =
                        engine.handle_input(InputEvent::PointerMoved { x, y });
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::MouseWheel { delta, .. } => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(InputEvent::Scroll {
                        delta: wheel_delta(delta),
                    });
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::Touch(touch) => {
                if let Some(engine) = &mut self.engine {
                    let _ = engine.handle_input(touch.into());
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                use winit::keyboard::{KeyCode, PhysicalKey};
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };

                match code {
                    KeyCode::KeyR => {
                        if let Some(engine) = &mut self.engine {
                            engine.reset_view();
                        }
                    }
                    KeyCode::Escape => event_loop.exit(),
                    _ => (),
                }
            }

            _ => (),
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(engine) = &mut self.engine {
            engine.shutdown();
        }
    }
}
