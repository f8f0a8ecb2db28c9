//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use aetheric_shell::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Application facade
pub use crate::app::{App, AppBuilder};

// Handler and state
pub use crate::core::{AppConfig, AppContext, AppHandler, Callbacks, FatalError};

// Events and input
pub use crate::core::input::{Event, EventKind, KeyCode, Modifiers, MouseButton, TouchPoint};

// Collaborators
pub use crate::core::{ClipboardBackend, PixelFormat, RenderBackend};
