//=========================================================================
// Platform Subsystem
//
// Drives the lifecycle from Winit on the thread that called `App::run()`.
//
// Architecture:
// ```text
//  Main Thread:
//  ┌───────────────────────────────────────────────────────┐
//  │  Winit Event Loop                                     │
//  │   ↓                                                   │
//  │  WindowEvent ──> InputProcessor ──> EventTranslator   │
//  │   │                                     ↓             │
//  │   │                              Lifecycle (gate)     │
//  │   │                                     ↓             │
//  │   │                                AppHandler::event  │
//  │   ↓                                                   │
//  │  RedrawRequested                                      │
//  │   ├─ flush dropped files                              │
//  │   ├─ Lifecycle::frame (init / frame / pending quit)   │
//  │   ├─ RenderBackend::present                           │
//  │   └─ apply window requests, exit or request redraw    │
//  └───────────────────────────────────────────────────────┘
// ```
//
// Key Design Decisions:
// - **RedrawRequested = frame boundary**: one frame tick per redraw,
//   the next redraw is requested until the lifecycle says Exit
// - **Window created lazily in `resumed()`**: required on mobile targets
// - **Close goes through the quit protocol**: the window only closes once
//   the application did not cancel
// - **Main thread requirement**: Winit mandates main thread on macOS/iOS
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;
#[cfg(not(any(target_os = "android", target_os = "ios")))]
mod system_clipboard;

//=== External Crates =====================================================

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Fullscreen, Window, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::clipboard::ClipboardBackend;
use crate::core::config::AppConfig;
use crate::core::context::PlatformRequest;
use crate::core::error::FatalError;
use crate::core::handler::AppHandler;
use crate::core::input::EventKind;
use crate::core::lifecycle::{Lifecycle, LoopControl};
use crate::core::render::RenderBackend;
use input_processor::InputProcessor;

//=== Clipboard ===========================================================

/// Clipboard backend used when the application installs none: the OS
/// clipboard on desktop, process-local elsewhere.
#[cfg(not(any(target_os = "android", target_os = "ios")))]
pub(crate) fn default_clipboard() -> Box<dyn ClipboardBackend> {
    Box::new(system_clipboard::SystemClipboard::new())
}

#[cfg(any(target_os = "android", target_os = "ios"))]
pub(crate) fn default_clipboard() -> Box<dyn ClipboardBackend> {
    Box::new(crate::core::clipboard::MemoryClipboard::new())
}

//=== Platform ============================================================

/// Winit-driven owner of the window, the renderer and the lifecycle.
///
/// # Lifecycle
///
/// 1. **Construction**: `Platform::new(...)` - no window yet
/// 2. **Execution**: `platform.run()` - runs the event loop to completion
/// 3. **Startup**: `resumed()` creates window + renderer, surface ready
/// 4. **Frames**: every `RedrawRequested` runs one lifecycle frame
/// 5. **Shutdown**: quit protocol → cleanup → event loop exit
///
/// # Thread Safety
///
/// Not Send/Sync - it must remain on the main thread.
pub(crate) struct Platform<H: AppHandler> {
    config: AppConfig,
    lifecycle: Lifecycle<H>,
    renderer: Box<dyn RenderBackend>,
    input: InputProcessor,

    /// OS window handle (None until `resumed()` called).
    window: Option<Window>,
}

impl<H: AppHandler> Platform<H> {
    //--- Construction -----------------------------------------------------

    pub fn new(
        config: AppConfig,
        handler: H,
        renderer: Box<dyn RenderBackend>,
        clipboard: Box<dyn ClipboardBackend>,
    ) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            lifecycle: Lifecycle::new(&config, handler, clipboard),
            input: InputProcessor::new(&config),
            config,
            renderer,
            window: None,
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the event loop until the application quits.
    ///
    /// Invalid configuration and event loop failures are fatal: they reach
    /// the fail hook and the process aborts.
    pub fn run(mut self) {
        if let Err(err) = self.run_event_loop() {
            self.lifecycle.fail(err);
        }
        info!(target: "platform", "Event loop finished");
    }

    fn run_event_loop(&mut self) -> Result<(), FatalError> {
        self.config.validate()?;
        debug!(target: "platform", "Starting Winit event loop");

        let event_loop = EventLoop::new().map_err(|e| FatalError::EventLoop(e.to_string()))?;

        event_loop
            .run_app(self)
            .map_err(|e| FatalError::EventLoop(e.to_string()))
    }

    //--- Window Management ------------------------------------------------

    fn create_window(&mut self, event_loop: &ActiveEventLoop) -> Result<Window, FatalError> {
        let (width, height) = self.config.resolved_size();

        let mut attrs = Window::default_attributes()
            .with_title(self.config.window_title.as_str())
            .with_inner_size(LogicalSize::new(width, height));
        if self.config.fullscreen {
            attrs = attrs.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop
            .create_window(attrs)
            .map_err(|e| FatalError::WindowCreation(e.to_string()))?;

        let size = window.inner_size();
        info!(
            target: "platform",
            "Window created: {}x{} @ {}x DPI",
            size.width,
            size.height,
            window.scale_factor()
        );

        self.lifecycle
            .surface_ready((size.width, size.height), window.scale_factor());

        let ctx = self.lifecycle.context();
        self.renderer.create(
            ctx.framebuffer_size(),
            ctx.sample_count(),
            ctx.swap_interval(),
        )?;

        let (color, depth) = (self.renderer.color_format(), self.renderer.depth_format());
        let ctx = self.lifecycle.context_mut();
        ctx.set_formats(color, depth);
        ctx.set_fullscreen_state(self.config.fullscreen);

        Ok(window)
    }

    /// Applies a new physical size / scale and resizes the renderer.
    fn handle_resize(&mut self, physical: (u32, u32), scale: f64) {
        if self.lifecycle.resize(physical, scale) {
            self.renderer.resize(self.lifecycle.context().framebuffer_size());
        }
    }

    /// Applies window changes requested by user code.
    fn apply_requests(&mut self) {
        let requests = self.lifecycle.context_mut().take_requests();
        let Some(window) = &self.window else {
            return;
        };

        for request in requests {
            trace!(target: "platform", "Applying {:?}", request);
            match request {
                PlatformRequest::SetFullscreen(on) => {
                    window.set_fullscreen(on.then_some(Fullscreen::Borderless(None)));
                }
                PlatformRequest::ShowMouse(shown) => window.set_cursor_visible(shown),
                PlatformRequest::SetTitle(title) => window.set_title(&title),
            }
        }
    }

    /// Physical pixels → framebuffer pixels for the current window.
    fn framebuffer_factor(&self) -> f32 {
        let scale = self.window.as_ref().map_or(1.0, Window::scale_factor);
        self.lifecycle.context().framebuffer_factor(scale)
    }

    //--- Frame ------------------------------------------------------------

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        self.input.flush_dropped_files(&mut self.lifecycle);

        let control = self.lifecycle.frame();
        self.renderer.present();
        self.apply_requests();

        match control {
            LoopControl::Exit => {
                info!(target: "platform", "Lifecycle finished, exiting event loop");
                event_loop.exit();
            }
            LoopControl::Continue => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
        }
    }

    //--- Test Accessors ---------------------------------------------------

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn lifecycle(&self) -> &Lifecycle<H> {
        &self.lifecycle
    }
}

//=== Winit Integration ===================================================

impl<H: AppHandler> ApplicationHandler for Platform<H> {
    /// Called when app becomes active (startup or mobile resume).
    ///
    /// Creates the window on first call; later calls resume frames.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            debug!(target: "platform", "Resumed with existing window");
            self.lifecycle.resume();
            window.request_redraw();
            return;
        }

        match self.create_window(event_loop) {
            Ok(window) => {
                window.request_redraw();
                self.window = Some(window);
            }
            Err(err) => self.lifecycle.fail(err),
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        debug!(target: "platform", "Suspended");
        self.lifecycle.suspend();
    }

    /// Handles per-window events.
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            //--- Window -------------------------------------------------------

            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                if self.lifecycle.close_requested() {
                    event_loop.exit();
                }
            }

            WindowEvent::Resized(size) => {
                let scale = self.window.as_ref().map_or(1.0, Window::scale_factor);
                self.handle_resize((size.width, size.height), scale);
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(size) = self.window.as_ref().map(Window::inner_size) {
                    self.handle_resize((size.width, size.height), scale_factor);
                }
            }

            WindowEvent::Occluded(occluded) => {
                let kind = if occluded { EventKind::Iconified } else { EventKind::Restored };
                self.lifecycle.dispatch(kind);
            }

            WindowEvent::Focused(focused) => {
                let kind = if focused { EventKind::Focused } else { EventKind::Unfocused };
                self.lifecycle.dispatch(kind);
            }

            WindowEvent::DroppedFile(path) => {
                self.input.queue_dropped_file(path);
            }

            WindowEvent::RedrawRequested => self.redraw(event_loop),

            //--- Keyboard -----------------------------------------------------

            WindowEvent::ModifiersChanged(state) => {
                trace!(target: "platform::input", "Modifiers changed: {:?}", state);
                self.input.update_modifiers(state.state());
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let key = self.input.resolve_key(key_event.physical_key);
                let consumed = self.input.process_key(
                    &mut self.lifecycle,
                    key,
                    key_event.state,
                    key_event.repeat,
                    key_event.text.as_deref(),
                );
                if consumed {
                    trace!(target: "platform::input", "{:?} consumed by application", key);
                }
            }

            //--- Mouse --------------------------------------------------------

            WindowEvent::CursorMoved { position, .. } => {
                let factor = self.framebuffer_factor();
                self.input.process_cursor_moved(&mut self.lifecycle, position, factor);
            }

            WindowEvent::CursorEntered { .. } => {
                self.input.process_cursor_entered(&mut self.lifecycle);
            }

            WindowEvent::CursorLeft { .. } => {
                self.input.process_cursor_left(&mut self.lifecycle);
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(&mut self.lifecycle, button, state);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                self.input.process_scroll(&mut self.lifecycle, delta);
            }

            //--- Touch --------------------------------------------------------

            WindowEvent::Touch(touch) => {
                let factor = self.framebuffer_factor();
                self.input.process_touch(
                    &mut self.lifecycle,
                    touch.phase,
                    touch.id,
                    touch.location,
                    factor,
                );
            }

            _ => {}
        }
    }

    /// Last callback before the event loop returns: runs cleanup if no
    /// quit path did, then releases the renderer.
    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.lifecycle.cleanup();
        self.renderer.destroy();
        self.window = None;
        info!(target: "platform", "Platform shut down");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::MemoryClipboard;
    use crate::core::handler::Callbacks;
    use crate::core::render::NullRenderer;

    fn platform(config: AppConfig) -> Platform<Callbacks> {
        Platform::new(
            config,
            Callbacks::new(),
            Box::new(NullRenderer),
            Box::new(MemoryClipboard::new()),
        )
    }

    #[test]
    fn platform_creation_is_lazy() {
        let platform = platform(AppConfig::default());
        assert!(platform.window().is_none(), "Window should be created lazily");
        assert!(!platform.lifecycle().context().is_valid());
    }

    #[test]
    fn framebuffer_factor_without_window_is_identity() {
        let platform = platform(AppConfig::default());
        assert_eq!(platform.framebuffer_factor(), 1.0);
    }

    #[test]
    fn requests_without_window_are_discarded() {
        let mut platform = platform(AppConfig::default());
        platform.lifecycle.context_mut().set_window_title("ignored");
        platform.apply_requests();
        assert!(platform.lifecycle.context_mut().take_requests().is_empty());
    }
}
