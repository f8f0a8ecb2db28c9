//=========================================================================
// Aetheric Shell — Library Root
//
// Control and event plane of a cross-platform application shell: one
// lifecycle (init → frame × N → cleanup), one canonical event stream and
// one two-phase quit protocol, whatever the native event source.
//
// Responsibilities:
// - Expose the application facade (`AppBuilder`, `App`)
// - Expose the platform-independent core (`core`): context, lifecycle,
//   dispatch gate, event vocabulary, keycode tables, UI/loop bridge
// - Keep the Winit backend (`platform`) internal
//
// Typical usage:
// ```no_run
// use aetheric_shell::AppBuilder;
// use aetheric_shell::core::Callbacks;
//
// fn main() {
//     AppBuilder::new()
//         .with_title("Hello")
//         .build(Callbacks::new().on_frame(|_ctx| {}))
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds everything that does not depend on Winit. Hosts that drive
// the lifecycle themselves (see `core::platform_bridge`) use it directly.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit integration (window, event loop, input
// conversion) and is not part of the public API surface.
//
// `app` defines the main entry point.
//
mod app;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use app::{App, AppBuilder};
