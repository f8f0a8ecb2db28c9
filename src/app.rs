//=========================================================================
// Aetheric Shell
//
// Main entry point: configuration, then a blocking run on the calling
// thread.
//
// Architecture:
// ```text
//     AppBuilder  ──build(handler)──>  App<H>  ──run()──>  [Platform]
//         │                                                  │
//         ├─ with_size() / with_title()                      ├─ validates config
//         ├─ with_high_dpi() / with_fullscreen()             ├─ runs Winit loop
//         ├─ with_clipboard() / with_drag_and_drop()         └─ returns after cleanup
//         └─ with_renderer() / with_clipboard_backend()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use log::info;

//=== Internal Dependencies ===============================================

use crate::core::clipboard::ClipboardBackend;
use crate::core::config::AppConfig;
use crate::core::handler::AppHandler;
use crate::core::render::{NullRenderer, RenderBackend};
use crate::platform::{default_clipboard, Platform};

//=== AppBuilder ==========================================================

/// Builder for configuring and constructing an [`App`].
///
/// # Default Values
///
/// - **Size**: 640x480 logical pixels
/// - **High DPI**: off (framebuffer matches the window)
/// - **Clipboard / drag-and-drop / user cursor**: off
/// - **Renderer**: [`NullRenderer`]
/// - **Clipboard backend**: the OS clipboard on desktop, otherwise
///   [`MemoryClipboard`](crate::core::MemoryClipboard)
///
/// # Examples
///
/// ```no_run
/// use aetheric_shell::AppBuilder;
/// use aetheric_shell::core::Callbacks;
///
/// AppBuilder::new()
///     .with_title("Demo")
///     .with_size(1280, 720)
///     .with_high_dpi(true)
///     .build(Callbacks::new().on_frame(|_ctx| {}))
///     .run();
/// ```
pub struct AppBuilder {
    config: AppConfig,
    renderer: Option<Box<dyn RenderBackend>>,
    clipboard: Option<Box<dyn ClipboardBackend>>,
}

impl AppBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            renderer: None,
            clipboard: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the logical window size. Zero falls back to the default.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.window_title = title.into();
        self
    }

    /// Renders at the display's native resolution instead of the logical
    /// window size.
    pub fn with_high_dpi(mut self, high_dpi: bool) -> Self {
        self.config.high_dpi = high_dpi;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.config.fullscreen = fullscreen;
        self
    }

    /// MSAA sample count. Must be a power of two.
    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.config.sample_count = sample_count;
        self
    }

    pub fn with_swap_interval(mut self, swap_interval: u32) -> Self {
        self.config.swap_interval = swap_interval;
        self
    }

    /// Enables the clipboard with room for `size` bytes (terminator
    /// included).
    pub fn with_clipboard(mut self, size: usize) -> Self {
        self.config.enable_clipboard = true;
        self.config.clipboard_size = size;
        self
    }

    /// Enables drag-and-drop with the given limits.
    pub fn with_drag_and_drop(mut self, max_files: usize, max_path_length: usize) -> Self {
        self.config.enable_drag_and_drop = true;
        self.config.max_dropped_files = max_files;
        self.config.max_dropped_file_path_length = max_path_length;
        self
    }

    pub fn with_user_cursor(mut self, user_cursor: bool) -> Self {
        self.config.user_cursor = user_cursor;
        self
    }

    pub fn with_renderer(mut self, renderer: impl RenderBackend + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_clipboard_backend(mut self, backend: impl ClipboardBackend + 'static) -> Self {
        self.clipboard = Some(Box::new(backend));
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Builds the application around `handler`.
    ///
    /// Configuration errors are reported by [`App::run`].
    pub fn build<H: AppHandler>(self, handler: H) -> App<H> {
        info!(
            "Building app ({}x{}, high_dpi: {})",
            self.config.width, self.config.height, self.config.high_dpi
        );

        App {
            config: self.config,
            handler,
            renderer: self.renderer.unwrap_or_else(|| Box::new(NullRenderer)),
            clipboard: self.clipboard.unwrap_or_else(default_clipboard),
        }
    }
}

impl Default for AppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== App =================================================================

/// A configured application ready to run.
pub struct App<H: AppHandler> {
    config: AppConfig,
    handler: H,
    renderer: Box<dyn RenderBackend>,
    clipboard: Box<dyn ClipboardBackend>,
}

impl<H: AppHandler> App<H> {
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    //--- Execution --------------------------------------------------------

    /// Runs the application on the calling thread until it quits.
    ///
    /// # Lifecycle
    ///
    /// 1. Validates the configuration (invalid → fail hook, abort)
    /// 2. Creates the window and renderer once the OS is ready
    /// 3. init on the first frame, then frame / event until quit
    /// 4. cleanup, renderer destroyed, returns
    ///
    /// Must be called on the main thread on macOS/iOS.
    pub fn run(self) {
        info!("Starting app runtime");

        let platform = Platform::new(self.config, self.handler, self.renderer, self.clipboard);
        platform.run();

        info!("App shutdown complete");
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

    //=====================================================================
    // AppBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = AppBuilder::new();
        assert_eq!(builder.config(), &AppConfig::default());
        assert!(builder.renderer.is_none());
        assert!(builder.clipboard.is_none());
    }

    #[test]
    fn builder_with_size_and_title() {
        let builder = AppBuilder::new().with_size(1280, 720).with_title("Demo");
        assert_eq!(builder.config().width, 1280);
        assert_eq!(builder.config().height, 720);
        assert_eq!(builder.config().window_title, "Demo");
    }

    #[test]
    fn builder_with_clipboard_enables_it() {
        let builder = AppBuilder::new().with_clipboard(1024);
        assert!(builder.config().enable_clipboard);
        assert_eq!(builder.config().clipboard_size, 1024);
    }

    #[test]
    fn builder_with_drag_and_drop_sets_limits() {
        let builder = AppBuilder::new().with_drag_and_drop(4, 512);
        let config = builder.config();
        assert!(config.enable_drag_and_drop);
        assert_eq!(config.max_dropped_files, 4);
        assert_eq!(config.max_dropped_file_path_length, 512);
    }

    #[test]
    fn builder_fluent_api_chaining() {
        let app = AppBuilder::new()
            .with_high_dpi(true)
            .with_fullscreen(true)
            .with_sample_count(4)
            .with_swap_interval(2)
            .with_user_cursor(true)
            .with_renderer(NullRenderer)
            .with_clipboard_backend(MemoryClipboard::new())
            .build(Callbacks::new());

        let config = app.config();
        assert!(config.high_dpi);
        assert!(config.fullscreen);
        assert_eq!(config.sample_count, 4);
        assert_eq!(config.swap_interval, 2);
        assert!(config.user_cursor);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn builder_with_config_replaces_everything() {
        let config = AppConfig {
            width: 320,
            height: 200,
            ..AppConfig::default()
        };
        let builder = AppBuilder::new().with_title("lost").with_config(config.clone());
        assert_eq!(builder.config(), &config);
    }

    #[test]
    fn build_keeps_handler() {
        let app = AppBuilder::new().build(Callbacks::new().on_event(|_, _| {}));
        assert!(crate::core::AppHandler::handles_events(app.handler()));
    }
}
