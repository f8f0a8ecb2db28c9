//=========================================================================
// Keycode Table
//
// Fixed lookup table from native scan / virtual-key codes to `KeyCode`.
//
// The table is pure data: built once, immutable afterwards, consulted by
// the translator for every native key event. Lookup is total: any code
// outside the table or without an entry yields `KeyCode::Invalid`.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::keycode::KeyCode;

//=== Constants ===========================================================

/// Number of native codes covered by a table.
pub const KEYCODE_TABLE_SIZE: usize = 512;

//=== KeycodeTable ========================================================

/// Native code → [`KeyCode`] lookup table.
#[derive(Clone)]
pub struct KeycodeTable {
    keys: [KeyCode; KEYCODE_TABLE_SIZE],
}

impl KeycodeTable {
    //--- Construction -----------------------------------------------------

    /// Creates a table with every entry set to [`KeyCode::Invalid`].
    pub fn empty() -> Self {
        Self {
            keys: [KeyCode::Invalid; KEYCODE_TABLE_SIZE],
        }
    }

    /// Builds a table from `(native, key)` pairs.
    ///
    /// Pairs whose native code falls outside the table are ignored.
    pub fn from_pairs(pairs: &[(u16, KeyCode)]) -> Self {
        let mut table = Self::empty();
        for &(native, key) in pairs {
            if let Some(slot) = table.keys.get_mut(native as usize) {
                *slot = key;
            }
        }
        table
    }

    /// Windows set-1 scan codes (`0xE0`-prefixed codes folded to `0x1xx`).
    pub fn win32() -> Self {
        Self::from_pairs(WIN32_SCANCODES)
    }

    /// macOS virtual key codes (`kVK_*`).
    pub fn macos() -> Self {
        Self::from_pairs(MACOS_KEYCODES)
    }

    /// X11 / XKB keycodes (Linux evdev code + 8).
    pub fn xkb() -> Self {
        Self::from_pairs(XKB_KEYCODES)
    }

    /// Table matching the native codes of the compilation target.
    pub fn native() -> Self {
        if cfg!(target_os = "windows") {
            Self::win32()
        } else if cfg!(target_os = "macos") {
            Self::macos()
        } else {
            Self::xkb()
        }
    }

    //--- Lookup -----------------------------------------------------------

    /// Translates a native code; unmapped or out-of-range codes yield
    /// [`KeyCode::Invalid`].
    pub fn lookup(&self, native: u32) -> KeyCode {
        usize::try_from(native)
            .ok()
            .and_then(|index| self.keys.get(index))
            .copied()
            .unwrap_or(KeyCode::Invalid)
    }

    /// Number of populated entries.
    pub fn mapped_count(&self) -> usize {
        self.keys.iter().filter(|key| key.is_valid()).count()
    }
}

impl Default for KeycodeTable {
    fn default() -> Self {
        Self::native()
    }
}

impl std::fmt::Debug for KeycodeTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeycodeTable")
            .field("mapped", &self.mapped_count())
            .finish()
    }
}

//=========================================================================
// Table Data
//=========================================================================

//--- Windows --------------------------------------------------------------

const WIN32_SCANCODES: &[(u16, KeyCode)] = &[
    (0x001, KeyCode::Escape),
    (0x002, KeyCode::Digit1), (0x003, KeyCode::Digit2), (0x004, KeyCode::Digit3),
    (0x005, KeyCode::Digit4), (0x006, KeyCode::Digit5), (0x007, KeyCode::Digit6),
    (0x008, KeyCode::Digit7), (0x009, KeyCode::Digit8), (0x00A, KeyCode::Digit9),
    (0x00B, KeyCode::Digit0),
    (0x00C, KeyCode::Minus), (0x00D, KeyCode::Equal),
    (0x00E, KeyCode::Backspace), (0x00F, KeyCode::Tab),
    (0x010, KeyCode::KeyQ), (0x011, KeyCode::KeyW), (0x012, KeyCode::KeyE),
    (0x013, KeyCode::KeyR), (0x014, KeyCode::KeyT), (0x015, KeyCode::KeyY),
    (0x016, KeyCode::KeyU), (0x017, KeyCode::KeyI), (0x018, KeyCode::KeyO),
    (0x019, KeyCode::KeyP),
    (0x01A, KeyCode::LeftBracket), (0x01B, KeyCode::RightBracket),
    (0x01C, KeyCode::Enter), (0x01D, KeyCode::LeftControl),
    (0x01E, KeyCode::KeyA), (0x01F, KeyCode::KeyS), (0x020, KeyCode::KeyD),
    (0x021, KeyCode::KeyF), (0x022, KeyCode::KeyG), (0x023, KeyCode::KeyH),
    (0x024, KeyCode::KeyJ), (0x025, KeyCode::KeyK), (0x026, KeyCode::KeyL),
    (0x027, KeyCode::Semicolon), (0x028, KeyCode::Apostrophe),
    (0x029, KeyCode::GraveAccent), (0x02A, KeyCode::LeftShift),
    (0x02B, KeyCode::Backslash),
    (0x02C, KeyCode::KeyZ), (0x02D, KeyCode::KeyX), (0x02E, KeyCode::KeyC),
    (0x02F, KeyCode::KeyV), (0x030, KeyCode::KeyB), (0x031, KeyCode::KeyN),
    (0x032, KeyCode::KeyM),
    (0x033, KeyCode::Comma), (0x034, KeyCode::Period), (0x035, KeyCode::Slash),
    (0x036, KeyCode::RightShift), (0x037, KeyCode::KpMultiply),
    (0x038, KeyCode::LeftAlt), (0x039, KeyCode::Space), (0x03A, KeyCode::CapsLock),
    (0x03B, KeyCode::F1), (0x03C, KeyCode::F2), (0x03D, KeyCode::F3),
    (0x03E, KeyCode::F4), (0x03F, KeyCode::F5), (0x040, KeyCode::F6),
    (0x041, KeyCode::F7), (0x042, KeyCode::F8), (0x043, KeyCode::F9),
    (0x044, KeyCode::F10),
    (0x045, KeyCode::Pause), (0x046, KeyCode::ScrollLock),
    (0x047, KeyCode::Kp7), (0x048, KeyCode::Kp8), (0x049, KeyCode::Kp9),
    (0x04A, KeyCode::KpSubtract),
    (0x04B, KeyCode::Kp4), (0x04C, KeyCode::Kp5), (0x04D, KeyCode::Kp6),
    (0x04E, KeyCode::KpAdd),
    (0x04F, KeyCode::Kp1), (0x050, KeyCode::Kp2), (0x051, KeyCode::Kp3),
    (0x052, KeyCode::Kp0), (0x053, KeyCode::KpDecimal),
    (0x056, KeyCode::World2),
    (0x057, KeyCode::F11), (0x058, KeyCode::F12),
    (0x064, KeyCode::F13), (0x065, KeyCode::F14), (0x066, KeyCode::F15),
    (0x067, KeyCode::F16), (0x068, KeyCode::F17), (0x069, KeyCode::F18),
    (0x06A, KeyCode::F19), (0x06B, KeyCode::F20), (0x06C, KeyCode::F21),
    (0x06D, KeyCode::F22), (0x06E, KeyCode::F23), (0x076, KeyCode::F24),
    (0x11C, KeyCode::KpEnter), (0x11D, KeyCode::RightControl),
    (0x135, KeyCode::KpDivide), (0x137, KeyCode::PrintScreen),
    (0x138, KeyCode::RightAlt), (0x145, KeyCode::NumLock), (0x146, KeyCode::Pause),
    (0x147, KeyCode::Home), (0x148, KeyCode::ArrowUp), (0x149, KeyCode::PageUp),
    (0x14B, KeyCode::ArrowLeft), (0x14D, KeyCode::ArrowRight),
    (0x14F, KeyCode::End), (0x150, KeyCode::ArrowDown), (0x151, KeyCode::PageDown),
    (0x152, KeyCode::Insert), (0x153, KeyCode::Delete),
    (0x15B, KeyCode::LeftSuper), (0x15C, KeyCode::RightSuper), (0x15D, KeyCode::Menu),
];

//--- macOS ----------------------------------------------------------------

const MACOS_KEYCODES: &[(u16, KeyCode)] = &[
    (0x00, KeyCode::KeyA), (0x01, KeyCode::KeyS), (0x02, KeyCode::KeyD),
    (0x03, KeyCode::KeyF), (0x04, KeyCode::KeyH), (0x05, KeyCode::KeyG),
    (0x06, KeyCode::KeyZ), (0x07, KeyCode::KeyX), (0x08, KeyCode::KeyC),
    (0x09, KeyCode::KeyV), (0x0A, KeyCode::World1), (0x0B, KeyCode::KeyB),
    (0x0C, KeyCode::KeyQ), (0x0D, KeyCode::KeyW), (0x0E, KeyCode::KeyE),
    (0x0F, KeyCode::KeyR), (0x10, KeyCode::KeyY), (0x11, KeyCode::KeyT),
    (0x12, KeyCode::Digit1), (0x13, KeyCode::Digit2), (0x14, KeyCode::Digit3),
    (0x15, KeyCode::Digit4), (0x16, KeyCode::Digit6), (0x17, KeyCode::Digit5),
    (0x18, KeyCode::Equal), (0x19, KeyCode::Digit9), (0x1A, KeyCode::Digit7),
    (0x1B, KeyCode::Minus), (0x1C, KeyCode::Digit8), (0x1D, KeyCode::Digit0),
    (0x1E, KeyCode::RightBracket), (0x1F, KeyCode::KeyO), (0x20, KeyCode::KeyU),
    (0x21, KeyCode::LeftBracket), (0x22, KeyCode::KeyI), (0x23, KeyCode::KeyP),
    (0x24, KeyCode::Enter), (0x25, KeyCode::KeyL), (0x26, KeyCode::KeyJ),
    (0x27, KeyCode::Apostrophe), (0x28, KeyCode::KeyK), (0x29, KeyCode::Semicolon),
    (0x2A, KeyCode::Backslash), (0x2B, KeyCode::Comma), (0x2C, KeyCode::Slash),
    (0x2D, KeyCode::KeyN), (0x2E, KeyCode::KeyM), (0x2F, KeyCode::Period),
    (0x30, KeyCode::Tab), (0x31, KeyCode::Space), (0x32, KeyCode::GraveAccent),
    (0x33, KeyCode::Backspace), (0x35, KeyCode::Escape),
    (0x36, KeyCode::RightSuper), (0x37, KeyCode::LeftSuper),
    (0x38, KeyCode::LeftShift), (0x39, KeyCode::CapsLock),
    (0x3A, KeyCode::LeftAlt), (0x3B, KeyCode::LeftControl),
    (0x3C, KeyCode::RightShift), (0x3D, KeyCode::RightAlt),
    (0x3E, KeyCode::RightControl),
    (0x40, KeyCode::F17), (0x41, KeyCode::KpDecimal), (0x43, KeyCode::KpMultiply),
    (0x45, KeyCode::KpAdd), (0x47, KeyCode::NumLock), (0x4B, KeyCode::KpDivide),
    (0x4C, KeyCode::KpEnter), (0x4E, KeyCode::KpSubtract),
    (0x4F, KeyCode::F18), (0x50, KeyCode::F19), (0x51, KeyCode::KpEqual),
    (0x52, KeyCode::Kp0), (0x53, KeyCode::Kp1), (0x54, KeyCode::Kp2),
    (0x55, KeyCode::Kp3), (0x56, KeyCode::Kp4), (0x57, KeyCode::Kp5),
    (0x58, KeyCode::Kp6), (0x59, KeyCode::Kp7), (0x5A, KeyCode::F20),
    (0x5B, KeyCode::Kp8), (0x5C, KeyCode::Kp9),
    (0x60, KeyCode::F5), (0x61, KeyCode::F6), (0x62, KeyCode::F7),
    (0x63, KeyCode::F3), (0x64, KeyCode::F8), (0x65, KeyCode::F9),
    (0x67, KeyCode::F11), (0x69, KeyCode::F13), (0x6A, KeyCode::F16),
    (0x6B, KeyCode::F14), (0x6D, KeyCode::F10), (0x6E, KeyCode::Menu),
    (0x6F, KeyCode::F12), (0x71, KeyCode::F15), (0x72, KeyCode::Insert),
    (0x73, KeyCode::Home), (0x74, KeyCode::PageUp), (0x75, KeyCode::Delete),
    (0x76, KeyCode::F4), (0x77, KeyCode::End), (0x78, KeyCode::F2),
    (0x79, KeyCode::PageDown), (0x7A, KeyCode::F1),
    (0x7B, KeyCode::ArrowLeft), (0x7C, KeyCode::ArrowRight),
    (0x7D, KeyCode::ArrowDown), (0x7E, KeyCode::ArrowUp),
];

//--- X11 / XKB ------------------------------------------------------------

const XKB_KEYCODES: &[(u16, KeyCode)] = &[
    (9, KeyCode::Escape),
    (10, KeyCode::Digit1), (11, KeyCode::Digit2), (12, KeyCode::Digit3),
    (13, KeyCode::Digit4), (14, KeyCode::Digit5), (15, KeyCode::Digit6),
    (16, KeyCode::Digit7), (17, KeyCode::Digit8), (18, KeyCode::Digit9),
    (19, KeyCode::Digit0),
    (20, KeyCode::Minus), (21, KeyCode::Equal),
    (22, KeyCode::Backspace), (23, KeyCode::Tab),
    (24, KeyCode::KeyQ), (25, KeyCode::KeyW), (26, KeyCode::KeyE),
    (27, KeyCode::KeyR), (28, KeyCode::KeyT), (29, KeyCode::KeyY),
    (30, KeyCode::KeyU), (31, KeyCode::KeyI), (32, KeyCode::KeyO),
    (33, KeyCode::KeyP),
    (34, KeyCode::LeftBracket), (35, KeyCode::RightBracket),
    (36, KeyCode::Enter), (37, KeyCode::LeftControl),
    (38, KeyCode::KeyA), (39, KeyCode::KeyS), (40, KeyCode::KeyD),
    (41, KeyCode::KeyF), (42, KeyCode::KeyG), (43, KeyCode::KeyH),
    (44, KeyCode::KeyJ), (45, KeyCode::KeyK), (46, KeyCode::KeyL),
    (47, KeyCode::Semicolon), (48, KeyCode::Apostrophe),
    (49, KeyCode::GraveAccent), (50, KeyCode::LeftShift),
    (51, KeyCode::Backslash),
    (52, KeyCode::KeyZ), (53, KeyCode::KeyX), (54, KeyCode::KeyC),
    (55, KeyCode::KeyV), (56, KeyCode::KeyB), (57, KeyCode::KeyN),
    (58, KeyCode::KeyM),
    (59, KeyCode::Comma), (60, KeyCode::Period), (61, KeyCode::Slash),
    (62, KeyCode::RightShift), (63, KeyCode::KpMultiply),
    (64, KeyCode::LeftAlt), (65, KeyCode::Space), (66, KeyCode::CapsLock),
    (67, KeyCode::F1), (68, KeyCode::F2), (69, KeyCode::F3),
    (70, KeyCode::F4), (71, KeyCode::F5), (72, KeyCode::F6),
    (73, KeyCode::F7), (74, KeyCode::F8), (75, KeyCode::F9),
    (76, KeyCode::F10),
    (77, KeyCode::NumLock), (78, KeyCode::ScrollLock),
    (79, KeyCode::Kp7), (80, KeyCode::Kp8), (81, KeyCode::Kp9),
    (82, KeyCode::KpSubtract),
    (83, KeyCode::Kp4), (84, KeyCode::Kp5), (85, KeyCode::Kp6),
    (86, KeyCode::KpAdd),
    (87, KeyCode::Kp1), (88, KeyCode::Kp2), (89, KeyCode::Kp3),
    (90, KeyCode::Kp0), (91, KeyCode::KpDecimal),
    (94, KeyCode::World2),
    (95, KeyCode::F11), (96, KeyCode::F12),
    (104, KeyCode::KpEnter), (105, KeyCode::RightControl),
    (106, KeyCode::KpDivide), (107, KeyCode::PrintScreen),
    (108, KeyCode::RightAlt),
    (110, KeyCode::Home), (111, KeyCode::ArrowUp), (112, KeyCode::PageUp),
    (113, KeyCode::ArrowLeft), (114, KeyCode::ArrowRight),
    (115, KeyCode::End), (116, KeyCode::ArrowDown), (117, KeyCode::PageDown),
    (118, KeyCode::Insert), (119, KeyCode::Delete),
    (125, KeyCode::KpEqual), (127, KeyCode::Pause),
    (133, KeyCode::LeftSuper), (134, KeyCode::RightSuper), (135, KeyCode::Menu),
    (191, KeyCode::F13), (192, KeyCode::F14), (193, KeyCode::F15),
    (194, KeyCode::F16), (195, KeyCode::F17), (196, KeyCode::F18),
    (197, KeyCode::F19), (198, KeyCode::F20), (199, KeyCode::F21),
    (200, KeyCode::F22), (201, KeyCode::F23), (202, KeyCode::F24),
];

//=========================================================================
// Unit Tests
//=========================================================================
