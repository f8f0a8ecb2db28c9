//=========================================================================
// Application Context
//=========================================================================
//
// The single application state instance, passed explicitly by reference
// to every lifecycle, dispatch and user callback.
//
// Owned by whichever thread owns the lifecycle (main thread on desktop,
// loop thread with the UI/loop bridge). Mutated only by the lifecycle
// state machine and the event path; user code gets the read-only query
// surface plus a handful of controls (quit negotiation, consumption,
// clipboard, window requests).
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;
use std::time::Duration;

//=== External Dependencies ===============================================

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::clipboard::{Clipboard, ClipboardBackend};
use super::config::AppConfig;
use super::render::PixelFormat;
use super::timing::FrameTimer;

//=== PlatformRequest =====================================================

/// Window changes requested by user code, applied by the platform layer
/// after the current callback returns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PlatformRequest {
    SetFullscreen(bool),
    ShowMouse(bool),
    SetTitle(String),
}

//=== AppContext ==========================================================

/// Process-wide application state and the user-facing query surface.
///
/// # Size Model
///
/// - `window_size`: logical pixels
/// - `framebuffer_size`: physical pixels actually rendered
/// - `dpi_scale == framebuffer / window` (within rounding), always ≥ 1.0
///
/// Without `high_dpi`, the framebuffer matches the window and the scale
/// is 1.0 regardless of the display.
#[derive(Debug)]
pub struct AppContext {
    //--- Surface ----------------------------------------------------------
    pub(crate) valid: bool,
    window_size: (u32, u32),
    framebuffer_size: (u32, u32),
    dpi_scale: f32,
    high_dpi: bool,
    sample_count: u32,
    swap_interval: u32,
    color_format: PixelFormat,
    depth_format: PixelFormat,

    //--- Lifecycle Latches ------------------------------------------------
    pub(crate) frame_count: u64,
    pub(crate) first_frame: bool,
    pub(crate) init_called: bool,
    pub(crate) cleanup_called: bool,

    //--- Quit Protocol ----------------------------------------------------
    pub(crate) quit_requested: bool,
    pub(crate) quit_ordered: bool,

    //--- Dispatch ---------------------------------------------------------
    pub(crate) event_consumed: bool,

    //--- Window State -----------------------------------------------------
    fullscreen: bool,
    mouse_shown: bool,
    requests: Vec<PlatformRequest>,

    //--- Services ---------------------------------------------------------
    clipboard: Clipboard,
    dropped_files: Vec<PathBuf>,
    timer: FrameTimer,
}

impl AppContext {
    //--- Construction -----------------------------------------------------

    /// Creates the initial state from `config`.
    ///
    /// Sizes start at the configured logical size with a scale of 1.0 and
    /// are refined once the platform reports the real surface.
    pub fn new(config: &AppConfig, clipboard: Box<dyn ClipboardBackend>) -> Self {
        let size = config.resolved_size();
        Self {
            valid: false,
            window_size: size,
            framebuffer_size: size,
            dpi_scale: 1.0,
            high_dpi: config.high_dpi,
            sample_count: config.sample_count,
            swap_interval: config.swap_interval,
            color_format: PixelFormat::Rgba8,
            depth_format: PixelFormat::DepthStencil,
            frame_count: 0,
            first_frame: false,
            init_called: false,
            cleanup_called: false,
            quit_requested: false,
            quit_ordered: false,
            event_consumed: false,
            fullscreen: config.fullscreen,
            mouse_shown: true,
            requests: Vec::new(),
            clipboard: Clipboard::new(config.enable_clipboard, config.clipboard_size, clipboard),
            dropped_files: Vec::new(),
            timer: FrameTimer::new(),
        }
    }

    //--- Query Surface ----------------------------------------------------

    /// `true` while a rendering surface exists.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Framebuffer width in pixels.
    pub fn width(&self) -> u32 {
        self.framebuffer_size.0
    }

    /// Framebuffer height in pixels.
    pub fn height(&self) -> u32 {
        self.framebuffer_size.1
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn framebuffer_size(&self) -> (u32, u32) {
        self.framebuffer_size
    }

    pub fn dpi_scale(&self) -> f32 {
        self.dpi_scale
    }

    pub fn high_dpi(&self) -> bool {
        self.high_dpi
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    pub fn swap_interval(&self) -> u32 {
        self.swap_interval
    }

    pub fn color_format(&self) -> PixelFormat {
        self.color_format
    }

    pub fn depth_format(&self) -> PixelFormat {
        self.depth_format
    }

    /// Number of completed frame callbacks.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Averaged duration of recent frames.
    pub fn frame_duration(&self) -> Duration {
        self.timer.frame_duration()
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn mouse_shown(&self) -> bool {
        self.mouse_shown
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn quit_ordered(&self) -> bool {
        self.quit_ordered
    }

    //--- Quit Controls ----------------------------------------------------

    /// Asks the application to quit. A `QuitRequested` event is dispatched
    /// at the next opportunity and the quit can still be cancelled.
    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }

    /// Cancels a pending quit request. Call from the `QuitRequested`
    /// handler to keep the application running.
    pub fn cancel_quit(&mut self) {
        self.quit_requested = false;
    }

    /// Quits unconditionally. No `QuitRequested` event is dispatched.
    pub fn quit(&mut self) {
        self.quit_ordered = true;
    }

    //--- Dispatch Controls ------------------------------------------------

    /// Marks the event currently being handled as consumed, suppressing
    /// the platform's default handling where the platform supports it.
    ///
    /// Only meaningful inside the event callback; scoped to that event.
    pub fn consume_event(&mut self) {
        self.event_consumed = true;
    }

    //--- Clipboard --------------------------------------------------------

    pub fn clipboard_enabled(&self) -> bool {
        self.clipboard.is_enabled()
    }

    /// Copies `text` to the clipboard (truncated to the configured size).
    pub fn set_clipboard_string(&mut self, text: &str) {
        self.clipboard.set(text);
    }

    /// Reads the clipboard. Empty when the clipboard is disabled.
    pub fn clipboard_string(&mut self) -> &str {
        self.clipboard.get()
    }

    //--- Window Controls --------------------------------------------------

    pub fn toggle_fullscreen(&mut self) {
        self.fullscreen = !self.fullscreen;
        self.requests.push(PlatformRequest::SetFullscreen(self.fullscreen));
    }

    pub fn show_mouse(&mut self, shown: bool) {
        if self.mouse_shown != shown {
            self.mouse_shown = shown;
            self.requests.push(PlatformRequest::ShowMouse(shown));
        }
    }

    pub fn set_window_title(&mut self, title: &str) {
        self.requests.push(PlatformRequest::SetTitle(title.to_string()));
    }

    /// Paths from the most recent `FilesDropped` event.
    pub fn dropped_files(&self) -> &[PathBuf] {
        &self.dropped_files
    }

    //--- Internal: Surface ------------------------------------------------

    /// Applies a new physical surface size and native scale factor.
    ///
    /// Zero-sized surfaces (minimized windows) are clamped so that the
    /// window is at least 1x1 and the scale relation still holds.
    ///
    /// Returns `true` if any size changed.
    pub(crate) fn update_dimensions(&mut self, physical: (u32, u32), native_scale: f64) -> bool {
        let scale = effective_scale(native_scale);
        let min_physical = scale.ceil() as u32;
        let physical = (physical.0.max(min_physical), physical.1.max(min_physical));

        let window = (
            (physical.0 as f64 / scale).round() as u32,
            (physical.1 as f64 / scale).round() as u32,
        );
        let (framebuffer, dpi_scale) = if self.high_dpi {
            (physical, scale as f32)
        } else {
            (window, 1.0)
        };

        let changed = window != self.window_size || framebuffer != self.framebuffer_size;
        self.window_size = window;
        self.framebuffer_size = framebuffer;
        self.dpi_scale = dpi_scale;

        if changed {
            debug!(
                target: "lifecycle",
                "Dimensions: window {}x{}, framebuffer {}x{} @ {}x",
                window.0,
                window.1,
                framebuffer.0,
                framebuffer.1,
                dpi_scale
            );
        }
        changed
    }

    /// Factor converting physical surface pixels to framebuffer pixels.
    pub(crate) fn framebuffer_factor(&self, native_scale: f64) -> f32 {
        self.dpi_scale / effective_scale(native_scale) as f32
    }

    pub(crate) fn set_formats(&mut self, color: PixelFormat, depth: PixelFormat) {
        self.color_format = color;
        self.depth_format = depth;
    }

    pub(crate) fn set_fullscreen_state(&mut self, fullscreen: bool) {
        self.fullscreen = fullscreen;
    }

    pub(crate) fn set_dropped_files(&mut self, paths: Vec<PathBuf>) {
        self.dropped_files = paths;
    }

    //--- Internal: Timing & Requests --------------------------------------

    pub(crate) fn tick_timer(&mut self) {
        self.timer.tick();
    }

    pub(crate) fn reset_timer(&mut self) {
        self.timer.reset();
    }

    pub(crate) fn take_requests(&mut self) -> Vec<PlatformRequest> {
        std::mem::take(&mut self.requests)
    }

    //--- Internal: Teardown -----------------------------------------------

    /// Releases owned buffers after cleanup.
    pub(crate) fn teardown(&mut self) {
        self.valid = false;
        self.clipboard.discard();
        self.dropped_files = Vec::new();
        self.requests.clear();
        info!(target: "lifecycle", "Application state torn down");
    }
}

//--- Helpers -------------------------------------------------------------

/// Native scale clamped to at least 1.0; non-finite values count as 1.0.
fn effective_scale(native_scale: f64) -> f64 {
    if native_scale.is_finite() {
        native_scale.max(1.0)
    } else {
        1.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
