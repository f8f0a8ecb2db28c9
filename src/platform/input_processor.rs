//=========================================================================
// Input Processor
//=========================================================================
//
// Converts Winit input into normalized calls on the `EventTranslator`.
//
// Architecture:
//   Winit WindowEvent → InputProcessor → EventTranslator → EventSink
//
// Key resolution: Winit's physical key codes map through `From`; keys
// Winit cannot identify fall back to the native scan-code tables.
// Positions arrive in physical pixels and are scaled to framebuffer pixels
// by the caller-supplied factor. Dropped files are queued per file and
// flushed as one event at the frame boundary.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;

//=== External Dependencies ===============================================

use log::trace;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, TouchPhase as WinitTouchPhase},
    keyboard::{KeyCode as WinitKeyCode, ModifiersState, NativeKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::config::AppConfig;
use crate::core::input::{
    EventTranslator, KeyCode, KeycodeTable, Modifiers, MouseButton, TouchPhase, TranslatorSettings,
};
use crate::core::lifecycle::EventSink;

//=== Constants ===========================================================

/// Scale applied to pixel-precise scroll deltas (trackpads) to match the
/// line-based deltas of wheels.
const PIXEL_SCROLL_SCALE: f64 = 0.1;

//=== InputProcessor ======================================================

/// Stateful Winit → translator adapter.
pub(crate) struct InputProcessor {
    translator: EventTranslator,
    pending_drops: Vec<PathBuf>,
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(config: &AppConfig) -> Self {
        Self {
            translator: EventTranslator::new(
                TranslatorSettings::from_config(config),
                KeycodeTable::native(),
            ),
            pending_drops: Vec::new(),
        }
    }

    //--- Modifier State Management ----------------------------------------

    /// Updates cached modifier state (applied to subsequent events).
    pub(crate) fn update_modifiers(&mut self, state: ModifiersState) {
        self.translator.set_modifiers(Modifiers::from(state));
    }

    pub(crate) fn current_modifiers(&self) -> Modifiers {
        self.translator.modifiers()
    }

    //--- Keyboard ---------------------------------------------------------

    /// Resolves a Winit physical key, falling back to the native tables.
    pub(crate) fn resolve_key(&self, physical: PhysicalKey) -> KeyCode {
        match physical {
            PhysicalKey::Code(code) => KeyCode::from(code),
            PhysicalKey::Unidentified(native) => match native {
                NativeKeyCode::Windows(code) => self.translator.keycode_for_native(u32::from(code)),
                NativeKeyCode::MacOS(code) => self.translator.keycode_for_native(u32::from(code)),
                NativeKeyCode::Xkb(code) => self.translator.keycode_for_native(code),
                NativeKeyCode::Android(_) | NativeKeyCode::Unidentified => KeyCode::Invalid,
            },
        }
    }

    /// Submits a key event followed by its text, if any.
    ///
    /// Returns whether the key event was consumed.
    pub(crate) fn process_key<S: EventSink>(
        &mut self,
        sink: &mut S,
        key: KeyCode,
        state: ElementState,
        repeat: bool,
        text: Option<&str>,
    ) -> bool {
        let pressed = state == ElementState::Pressed;
        let consumed = self.translator.key(sink, key, pressed, repeat);

        if pressed {
            if let Some(text) = text {
                self.translator.text(sink, text, repeat);
            }
        }
        consumed
    }

    //--- Mouse ------------------------------------------------------------

    pub(crate) fn process_mouse_button<S: EventSink>(
        &mut self,
        sink: &mut S,
        button: WinitMouseButton,
        state: ElementState,
    ) -> bool {
        self.translator
            .mouse_button(sink, MouseButton::from(button), state == ElementState::Pressed)
    }

    /// `factor` converts physical pixels to framebuffer pixels.
    pub(crate) fn process_cursor_moved<S: EventSink>(
        &mut self,
        sink: &mut S,
        position: PhysicalPosition<f64>,
        factor: f32,
    ) -> bool {
        let x = position.x as f32 * factor;
        let y = position.y as f32 * factor;
        self.translator.mouse_move(sink, x, y)
    }

    pub(crate) fn process_scroll<S: EventSink>(&mut self, sink: &mut S, delta: MouseScrollDelta) -> bool {
        let (dx, dy) = match delta {
            MouseScrollDelta::LineDelta(x, y) => (x, y),
            MouseScrollDelta::PixelDelta(pos) => (
                (pos.x * PIXEL_SCROLL_SCALE) as f32,
                (pos.y * PIXEL_SCROLL_SCALE) as f32,
            ),
        };
        self.translator.scroll(sink, dx, dy)
    }

    pub(crate) fn process_cursor_entered<S: EventSink>(&mut self, sink: &mut S) -> bool {
        self.translator.mouse_enter(sink)
    }

    pub(crate) fn process_cursor_left<S: EventSink>(&mut self, sink: &mut S) -> bool {
        self.translator.mouse_leave(sink)
    }

    //--- Touch ------------------------------------------------------------

    pub(crate) fn process_touch<S: EventSink>(
        &mut self,
        sink: &mut S,
        phase: WinitTouchPhase,
        id: u64,
        location: PhysicalPosition<f64>,
        factor: f32,
    ) -> bool {
        let x = location.x as f32 * factor;
        let y = location.y as f32 * factor;
        self.translator.touch(sink, TouchPhase::from(phase), id, x, y)
    }

    //--- Drag & Drop ------------------------------------------------------

    /// Queues one dropped path; Winit reports multi-file drops one by one.
    pub(crate) fn queue_dropped_file(&mut self, path: PathBuf) {
        trace!(target: "platform::input", "File dropped: {}", path.display());
        self.pending_drops.push(path);
    }

    /// Submits all queued paths as a single `FilesDropped` event.
    pub(crate) fn flush_dropped_files<S: EventSink>(&mut self, sink: &mut S) -> bool {
        if self.pending_drops.is_empty() {
            return false;
        }
        let paths = std::mem::take(&mut self.pending_drops);
        self.translator.files_dropped(sink, paths)
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit ModifiersState to the modifier mask.
impl From<ModifiersState> for Modifiers {
    fn from(state: ModifiersState) -> Self {
        let mut mods = Modifiers::NONE;
        mods.set(Modifiers::SHIFT, state.shift_key());
        mods.set(Modifiers::CTRL, state.control_key());
        mods.set(Modifiers::ALT, state.alt_key());
        mods.set(Modifiers::SUPER, state.super_key());
        mods
    }
}

/// Converts Winit physical key codes to key codes.
///
/// Keys without a counterpart (media keys, F26+, IME keys) become
/// `KeyCode::Invalid`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Printable ----------------------------------------------------

            Space => KeyCode::Space,
            Quote => KeyCode::Apostrophe,
            Comma => KeyCode::Comma,
            Minus => KeyCode::Minus,
            Period => KeyCode::Period,
            Slash => KeyCode::Slash,
            Semicolon => KeyCode::Semicolon,
            Equal => KeyCode::Equal,
            BracketLeft => KeyCode::LeftBracket,
            Backslash => KeyCode::Backslash,
            BracketRight => KeyCode::RightBracket,
            Backquote => KeyCode::GraveAccent,
            IntlBackslash => KeyCode::World2,

            //--- Digits -------------------------------------------------------

            Digit0 => KeyCode::Digit0,
            Digit1 => KeyCode::Digit1,
            Digit2 => KeyCode::Digit2,
            Digit3 => KeyCode::Digit3,
            Digit4 => KeyCode::Digit4,
            Digit5 => KeyCode::Digit5,
            Digit6 => KeyCode::Digit6,
            Digit7 => KeyCode::Digit7,
            Digit8 => KeyCode::Digit8,
            Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            KeyA => KeyCode::KeyA,
            KeyB => KeyCode::KeyB,
            KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD,
            KeyE => KeyCode::KeyE,
            KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG,
            KeyH => KeyCode::KeyH,
            KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ,
            KeyK => KeyCode::KeyK,
            KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM,
            KeyN => KeyCode::KeyN,
            KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP,
            KeyQ => KeyCode::KeyQ,
            KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS,
            KeyT => KeyCode::KeyT,
            KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV,
            KeyW => KeyCode::KeyW,
            KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY,
            KeyZ => KeyCode::KeyZ,

            //--- Editing / Navigation -----------------------------------------

            Escape => KeyCode::Escape,
            Enter => KeyCode::Enter,
            Tab => KeyCode::Tab,
            Backspace => KeyCode::Backspace,
            Insert => KeyCode::Insert,
            Delete => KeyCode::Delete,
            ArrowRight => KeyCode::ArrowRight,
            ArrowLeft => KeyCode::ArrowLeft,
            ArrowDown => KeyCode::ArrowDown,
            ArrowUp => KeyCode::ArrowUp,
            PageUp => KeyCode::PageUp,
            PageDown => KeyCode::PageDown,
            Home => KeyCode::Home,
            End => KeyCode::End,

            //--- Locks / System -----------------------------------------------

            CapsLock => KeyCode::CapsLock,
            ScrollLock => KeyCode::ScrollLock,
            NumLock => KeyCode::NumLock,
            PrintScreen => KeyCode::PrintScreen,
            Pause => KeyCode::Pause,
            ContextMenu => KeyCode::Menu,

            //--- Function Keys ------------------------------------------------

            F1 => KeyCode::F1,
            F2 => KeyCode::F2,
            F3 => KeyCode::F3,
            F4 => KeyCode::F4,
            F5 => KeyCode::F5,
            F6 => KeyCode::F6,
            F7 => KeyCode::F7,
            F8 => KeyCode::F8,
            F9 => KeyCode::F9,
            F10 => KeyCode::F10,
            F11 => KeyCode::F11,
            F12 => KeyCode::F12,
            F13 => KeyCode::F13,
            F14 => KeyCode::F14,
            F15 => KeyCode::F15,
            F16 => KeyCode::F16,
            F17 => KeyCode::F17,
            F18 => KeyCode::F18,
            F19 => KeyCode::F19,
            F20 => KeyCode::F20,
            F21 => KeyCode::F21,
            F22 => KeyCode::F22,
            F23 => KeyCode::F23,
            F24 => KeyCode::F24,
            F25 => KeyCode::F25,

            //--- Keypad -------------------------------------------------------

            Numpad0 => KeyCode::Kp0,
            Numpad1 => KeyCode::Kp1,
            Numpad2 => KeyCode::Kp2,
            Numpad3 => KeyCode::Kp3,
            Numpad4 => KeyCode::Kp4,
            Numpad5 => KeyCode::Kp5,
            Numpad6 => KeyCode::Kp6,
            Numpad7 => KeyCode::Kp7,
            Numpad8 => KeyCode::Kp8,
            Numpad9 => KeyCode::Kp9,
            NumpadDecimal => KeyCode::KpDecimal,
            NumpadDivide => KeyCode::KpDivide,
            NumpadMultiply => KeyCode::KpMultiply,
            NumpadSubtract => KeyCode::KpSubtract,
            NumpadAdd => KeyCode::KpAdd,
            NumpadEnter => KeyCode::KpEnter,
            NumpadEqual => KeyCode::KpEqual,

            //--- Modifiers ----------------------------------------------------

            ShiftLeft => KeyCode::LeftShift,
            ControlLeft => KeyCode::LeftControl,
            AltLeft => KeyCode::LeftAlt,
            SuperLeft => KeyCode::LeftSuper,
            ShiftRight => KeyCode::RightShift,
            ControlRight => KeyCode::RightControl,
            AltRight => KeyCode::RightAlt,
            SuperRight => KeyCode::RightSuper,

            _ => KeyCode::Invalid,
        }
    }
}

/// Left/Right/Middle mapped directly; Back/Forward/Other → Other.
impl From<WinitMouseButton> for MouseButton {
    fn from(button: WinitMouseButton) -> Self {
        match button {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

impl From<WinitTouchPhase> for TouchPhase {
    fn from(phase: WinitTouchPhase) -> Self {
        match phase {
            WinitTouchPhase::Started => TouchPhase::Began,
            WinitTouchPhase::Moved => TouchPhase::Moved,
            WinitTouchPhase::Ended => TouchPhase::Ended,
            WinitTouchPhase::Cancelled => TouchPhase::Cancelled,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
