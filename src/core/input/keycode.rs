//=========================================================================
// Key Codes & Modifiers
//
// Platform-independent identifiers for physical keys and the modifier
// bitmask attached to keyboard, character and mouse events.
//
// Design:
// - `KeyCode` discriminants are stable (GLFW-compatible numbering), so a
//   key code can be stored, compared or sent across a boundary as `u16`
// - `KeyCode::Invalid` (0) is the explicit "no such key" sentinel; no
//   real key ever maps to zero
// - `Modifiers` is a 4-bit mask computed fresh for every native event
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout
/// (QWERTY vs AZERTY). Text input arrives separately as
/// [`EventKind::Char`](crate::core::input::EventKind::Char).
#[repr(u16)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum KeyCode {
    /// Unmapped or unknown key.
    #[default]
    Invalid = 0,

    //--- Printable Keys ---------------------------------------------------

    Space = 32,
    Apostrophe = 39,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Digit0 = 48, Digit1 = 49, Digit2 = 50, Digit3 = 51, Digit4 = 52,
    Digit5 = 53, Digit6 = 54, Digit7 = 55, Digit8 = 56, Digit9 = 57,
    Semicolon = 59,
    Equal = 61,
    KeyA = 65, KeyB = 66, KeyC = 67, KeyD = 68, KeyE = 69, KeyF = 70,
    KeyG = 71, KeyH = 72, KeyI = 73, KeyJ = 74, KeyK = 75, KeyL = 76,
    KeyM = 77, KeyN = 78, KeyO = 79, KeyP = 80, KeyQ = 81, KeyR = 82,
    KeyS = 83, KeyT = 84, KeyU = 85, KeyV = 86, KeyW = 87, KeyX = 88,
    KeyY = 89, KeyZ = 90,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    GraveAccent = 96,
    /// Non-US key #1.
    World1 = 161,
    /// Non-US key #2 (ISO `<>` key).
    World2 = 162,

    //--- Function & Navigation Keys ---------------------------------------

    Escape = 256,
    Enter = 257,
    Tab = 258,
    Backspace = 259,
    Insert = 260,
    Delete = 261,
    ArrowRight = 262,
    ArrowLeft = 263,
    ArrowDown = 264,
    ArrowUp = 265,
    PageUp = 266,
    PageDown = 267,
    Home = 268,
    End = 269,
    CapsLock = 280,
    ScrollLock = 281,
    NumLock = 282,
    PrintScreen = 283,
    Pause = 284,
    F1 = 290, F2 = 291, F3 = 292, F4 = 293, F5 = 294,
    F6 = 295, F7 = 296, F8 = 297, F9 = 298, F10 = 299,
    F11 = 300, F12 = 301, F13 = 302, F14 = 303, F15 = 304,
    F16 = 305, F17 = 306, F18 = 307, F19 = 308, F20 = 309,
    F21 = 310, F22 = 311, F23 = 312, F24 = 313, F25 = 314,

    //--- Keypad -----------------------------------------------------------

    Kp0 = 320, Kp1 = 321, Kp2 = 322, Kp3 = 323, Kp4 = 324,
    Kp5 = 325, Kp6 = 326, Kp7 = 327, Kp8 = 328, Kp9 = 329,
    KpDecimal = 330,
    KpDivide = 331,
    KpMultiply = 332,
    KpSubtract = 333,
    KpAdd = 334,
    KpEnter = 335,
    KpEqual = 336,

    //--- Modifier Keys ----------------------------------------------------

    LeftShift = 340,
    LeftControl = 341,
    LeftAlt = 342,
    LeftSuper = 343,
    RightShift = 344,
    RightControl = 345,
    RightAlt = 346,
    RightSuper = 347,
    Menu = 348,
}

impl KeyCode {
    /// Returns the stable numeric value of this key code.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Returns `true` unless this is the [`KeyCode::Invalid`] sentinel.
    pub fn is_valid(self) -> bool {
        self != KeyCode::Invalid
    }
}

//=== Modifiers ===========================================================

bitflags::bitflags! {
    /// Modifier key state at the time of an event.
    ///
    /// Left/right variants are not distinguished. Computed independently
    /// per platform from that platform's native modifier representation.
    ///
    /// Combine with bitwise OR: `Modifiers::CTRL | Modifiers::SHIFT`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Either Shift key.
        const SHIFT = 1 << 0;
        /// Either Control key.
        const CTRL = 1 << 1;
        /// Either Alt / Option key.
        const ALT = 1 << 2;
        /// Either Super / Windows / Command key.
        const SUPER = 1 << 3;
    }
}

impl Modifiers {
    /// No modifiers held.
    pub const NONE: Self = Self::empty();
}

//=========================================================================
// Unit Tests
//=========================================================================
