//=========================================================================
// Platform Bridge
//=========================================================================
//
// Two-thread rendezvous for hosts whose OS delivers activity callbacks on a
// UI thread it owns, while rendering must happen on a dedicated thread.
//
// The UI thread never touches the lifecycle or the rendering surface; it
// only sends messages and waits for their acknowledgement. The loop thread
// never sees OS callbacks; it only reacts to messages.
//
// Components:
// - `interface`: messages, acknowledgements and the `NativeHost` contract
// - `ui_thread`: `UiBridge`, the UI-side sender
// - `loop_thread`: message application, handover and the render loop
//
//=========================================================================

//=== Module Declarations =================================================

pub mod interface;
mod loop_thread;
mod ui_thread;

//=== Public API ==========================================================

pub use interface::{BridgeAck, BridgeMessage, NativeHost, NativeInput, SurfaceMetrics};
pub use ui_thread::UiBridge;
