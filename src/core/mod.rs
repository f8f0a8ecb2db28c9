//=========================================================================
// Core
//
// Platform-independent application shell: state, lifecycle, event
// vocabulary and the UI/loop thread bridge.
//
// Responsibilities:
// - Own the application context and the user handler (`Lifecycle`)
// - Gate every event through a single dispatch point
// - Translate normalized native input into canonical events
// - Rendezvous a UI thread with a dedicated loop thread (`platform_bridge`)
//
// Notes:
// Nothing here depends on winit. The desktop backend in `platform` and
// any native host behind `platform_bridge` drive these types through the
// same operations.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod clipboard;
pub mod config;
pub mod context;
pub mod error;
pub mod handler;
pub mod input;
pub mod lifecycle;
pub mod platform_bridge;
pub mod render;
pub mod timing;

//=== Public Re-exports ===================================================

pub use clipboard::{ClipboardBackend, MemoryClipboard};
pub use config::AppConfig;
pub use context::AppContext;
pub use error::FatalError;
pub use handler::{AppHandler, Callbacks};
pub use lifecycle::{EventSink, Lifecycle, LoopControl};
pub use render::{NullRenderer, PixelFormat, RenderBackend};
pub use timing::FrameTimer;
