//=========================================================================
// Input
//
// Canonical input vocabulary and the translation from native input into it.
//
// Layout:
// - `keycode`: platform-independent key identifiers and modifier mask
// - `keycode_table`: fixed native-code → `KeyCode` lookup tables
// - `event`: the canonical event envelope delivered to user code
// - `translator`: stateful native input → canonical event conversion
//
//=========================================================================

//=== Submodules ==========================================================

pub mod event;
pub mod keycode;
pub mod keycode_table;
pub mod translator;

//=== Public Re-exports ===================================================

pub use event::{Event, EventKind, MouseButton, TouchPoint, Touches, MAX_TOUCH_POINTS};
pub use keycode::{KeyCode, Modifiers};
pub use keycode_table::{KeycodeTable, KEYCODE_TABLE_SIZE};
pub use translator::{EventTranslator, TouchPhase, TranslatorSettings};
