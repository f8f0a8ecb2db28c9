//=========================================================================
// Event Translator
//=========================================================================
//
// Turns normalized native input (already stripped of platform types) into
// canonical events and submits them through an `EventSink`, normally the
// dispatch gate.
//
// Architecture:
//   Platform backend → EventTranslator → EventSink (Lifecycle::dispatch)
//
// Stateful tracking: modifier mask, last mouse position (for deltas) and
// the ordered set of active touches. Coordinates passed in are already in
// framebuffer pixels.
//
// Rules:
// - Unmapped native key codes become `KeyCode::Invalid`, never dropped
// - With SUPER held, a key-down is followed by a synthesized key-up on
//   platforms that swallow the native key-up (macOS)
// - Paste shortcut + enabled clipboard → `ClipboardPasted` after the key
// - Control characters never produce `Char`
// - Touch events carry the full active set, flagged by `changed`
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;

//=== External Dependencies ===============================================

use log::{trace, warn};

//=== Internal Dependencies ===============================================

use super::event::{EventKind, MouseButton, TouchPoint, Touches, MAX_TOUCH_POINTS};
use super::keycode::{KeyCode, Modifiers};
use super::keycode_table::KeycodeTable;
use crate::core::config::AppConfig;
use crate::core::lifecycle::EventSink;

//=== TouchPhase ==========================================================

/// Phase of a single native touch contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

//=== TranslatorSettings ==================================================

/// Behaviour switches derived from configuration and target platform.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatorSettings {
    /// Emit a key-up right after a key-down while SUPER is held.
    pub synthesize_super_key_up: bool,

    /// Emit `ClipboardPasted` for the paste shortcut.
    pub clipboard_paste: bool,

    /// Exact modifier mask of the paste shortcut (with `V`).
    pub paste_modifiers: Modifiers,

    /// Emit `UpdateCursor` before every mouse move.
    pub user_cursor: bool,

    pub drag_and_drop: bool,
    pub max_dropped_files: usize,
    pub max_dropped_file_path_length: usize,
}

impl TranslatorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let macos = cfg!(target_os = "macos");
        Self {
            synthesize_super_key_up: macos,
            clipboard_paste: config.enable_clipboard,
            paste_modifiers: if macos { Modifiers::SUPER } else { Modifiers::CTRL },
            user_cursor: config.user_cursor,
            drag_and_drop: config.enable_drag_and_drop,
            max_dropped_files: config.max_dropped_files,
            max_dropped_file_path_length: config.max_dropped_file_path_length,
        }
    }
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

//=== EventTranslator =====================================================

/// Stateful native-input → canonical-event converter.
#[derive(Debug)]
pub struct EventTranslator {
    settings: TranslatorSettings,
    table: KeycodeTable,
    modifiers: Modifiers,
    mouse: Option<(f32, f32)>,
    touches: Vec<(u64, f32, f32)>,
}

impl EventTranslator {
    //--- Construction -----------------------------------------------------

    pub fn new(settings: TranslatorSettings, table: KeycodeTable) -> Self {
        Self {
            settings,
            table,
            modifiers: Modifiers::NONE,
            mouse: None,
            touches: Vec::with_capacity(MAX_TOUCH_POINTS),
        }
    }

    pub fn settings(&self) -> &TranslatorSettings {
        &self.settings
    }

    //--- Modifier State ---------------------------------------------------

    /// Replaces the modifier mask applied to subsequent events.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    //--- Keyboard ---------------------------------------------------------

    /// Translates a native scan / virtual-key code through the table.
    pub fn keycode_for_native(&self, native: u32) -> KeyCode {
        self.table.lookup(native)
    }

    /// Submits a key press or release.
    ///
    /// Returns whether the primary key event was consumed.
    pub fn key<S: EventSink>(&mut self, sink: &mut S, key: KeyCode, pressed: bool, repeat: bool) -> bool {
        let modifiers = self.modifiers;

        if !pressed {
            return sink.submit(EventKind::KeyUp { key, modifiers });
        }

        let consumed = sink.submit(EventKind::KeyDown {
            key,
            repeat,
            modifiers,
        });

        if self.settings.synthesize_super_key_up && modifiers.contains(Modifiers::SUPER) {
            trace!(target: "platform::input", "Synthesizing key-up for {:?}", key);
            sink.submit(EventKind::KeyUp { key, modifiers });
        }

        if self.settings.clipboard_paste
            && !repeat
            && key == KeyCode::KeyV
            && modifiers == self.settings.paste_modifiers
        {
            sink.submit(EventKind::ClipboardPasted);
        }

        consumed
    }

    /// Submits one `Char` per printable character of `text`.
    ///
    /// Returns whether any of them was consumed.
    pub fn text<S: EventSink>(&mut self, sink: &mut S, text: &str, repeat: bool) -> bool {
        let mut consumed = false;
        for ch in text.chars().filter(|ch| is_printable(*ch)) {
            consumed |= sink.submit(EventKind::Char {
                ch,
                repeat,
                modifiers: self.modifiers,
            });
        }
        consumed
    }

    //--- Mouse ------------------------------------------------------------

    /// Submits a cursor move to `(x, y)` in framebuffer pixels.
    pub fn mouse_move<S: EventSink>(&mut self, sink: &mut S, x: f32, y: f32) -> bool {
        if self.settings.user_cursor {
            sink.submit(EventKind::UpdateCursor);
        }

        let (dx, dy) = match self.mouse {
            Some((px, py)) => (x - px, y - py),
            None => (0.0, 0.0),
        };
        self.mouse = Some((x, y));

        sink.submit(EventKind::MouseMove {
            x,
            y,
            dx,
            dy,
            modifiers: self.modifiers,
        })
    }

    /// Submits a button press / release at the last known position.
    pub fn mouse_button<S: EventSink>(&mut self, sink: &mut S, button: MouseButton, pressed: bool) -> bool {
        let (x, y) = self.mouse.unwrap_or((0.0, 0.0));
        let modifiers = self.modifiers;
        let kind = if pressed {
            EventKind::MouseDown { button, x, y, modifiers }
        } else {
            EventKind::MouseUp { button, x, y, modifiers }
        };
        sink.submit(kind)
    }

    /// Submits a scroll, in lines.
    pub fn scroll<S: EventSink>(&mut self, sink: &mut S, dx: f32, dy: f32) -> bool {
        sink.submit(EventKind::MouseScroll {
            dx,
            dy,
            modifiers: self.modifiers,
        })
    }

    pub fn mouse_enter<S: EventSink>(&mut self, sink: &mut S) -> bool {
        sink.submit(EventKind::MouseEnter)
    }

    /// Submits `MouseLeave`; the next move reports zero deltas.
    pub fn mouse_leave<S: EventSink>(&mut self, sink: &mut S) -> bool {
        self.mouse = None;
        sink.submit(EventKind::MouseLeave)
    }

    pub fn mouse_position(&self) -> Option<(f32, f32)> {
        self.mouse
    }

    //--- Touch ------------------------------------------------------------

    /// Updates one touch contact and submits the full active set.
    ///
    /// Contacts beyond [`MAX_TOUCH_POINTS`] and phases for unknown contacts
    /// are ignored.
    pub fn touch<S: EventSink>(&mut self, sink: &mut S, phase: TouchPhase, id: u64, x: f32, y: f32) -> bool {
        let index = self.touches.iter().position(|(tid, _, _)| *tid == id);

        match (phase, index) {
            (_, Some(i)) => {
                self.touches[i].1 = x;
                self.touches[i].2 = y;
            }
            (TouchPhase::Began, None) if self.touches.len() < MAX_TOUCH_POINTS => {
                self.touches.push((id, x, y));
            }
            (TouchPhase::Began, None) => {
                warn!(
                    target: "platform::input",
                    "Ignoring touch {}: {} contacts already active",
                    id,
                    MAX_TOUCH_POINTS
                );
                return false;
            }
            (_, None) => {
                trace!(target: "platform::input", "{:?} for unknown touch {}", phase, id);
                return false;
            }
        }

        let touches: Touches = self
            .touches
            .iter()
            .map(|&(tid, tx, ty)| TouchPoint {
                id: tid,
                x: tx,
                y: ty,
                changed: tid == id,
            })
            .collect();

        let kind = match phase {
            TouchPhase::Began => EventKind::TouchesBegan { touches },
            TouchPhase::Moved => EventKind::TouchesMoved { touches },
            TouchPhase::Ended => EventKind::TouchesEnded { touches },
            TouchPhase::Cancelled => EventKind::TouchesCancelled { touches },
        };

        if matches!(phase, TouchPhase::Ended | TouchPhase::Cancelled) {
            self.touches.retain(|(tid, _, _)| *tid != id);
        }

        sink.submit(kind)
    }

    pub fn active_touches(&self) -> usize {
        self.touches.len()
    }

    //--- Drag & Drop ------------------------------------------------------

    /// Submits `FilesDropped` for the paths that fit the configured limits.
    pub fn files_dropped<S: EventSink>(&mut self, sink: &mut S, paths: Vec<PathBuf>) -> bool {
        if !self.settings.drag_and_drop {
            return false;
        }

        let max_len = self.settings.max_dropped_file_path_length;
        let total = paths.len();
        let accepted: Vec<PathBuf> = paths
            .into_iter()
            .filter(|path| path.as_os_str().len() < max_len)
            .take(self.settings.max_dropped_files)
            .collect();

        if accepted.len() < total {
            warn!(
                target: "platform::input",
                "Dropped {} of {} files (limits: {} files, {} bytes per path)",
                total - accepted.len(),
                total,
                self.settings.max_dropped_files,
                max_len
            );
        }
        if accepted.is_empty() {
            return false;
        }

        sink.submit(EventKind::FilesDropped { paths: accepted })
    }
}

//--- Helpers -------------------------------------------------------------

/// Control characters and the macOS function-key private-use range never
/// produce text events.
fn is_printable(ch: char) -> bool {
    let code = ch as u32;
    !(code < 32 || code == 127 || (0xF700..=0xF7FF).contains(&code))
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    //--- Test Helpers -----------------------------------------------------

    /// Sink recording submissions; consumes events matching `consume`.
    #[derive(Default)]
    struct RecordingSink {
        events: Vec<EventKind>,
        consume_key_down: bool,
    }

    impl EventSink for RecordingSink {
        fn submit(&mut self, kind: EventKind) -> bool {
            let consumed = self.consume_key_down && matches!(kind, EventKind::KeyDown { .. });
            self.events.push(kind);
            consumed
        }
    }

    fn settings() -> TranslatorSettings {
        TranslatorSettings {
            synthesize_super_key_up: false,
            clipboard_paste: false,
            paste_modifiers: Modifiers::CTRL,
            user_cursor: false,
            drag_and_drop: false,
            max_dropped_files: 1,
            max_dropped_file_path_length: 2048,
        }
    }

    fn translator(settings: TranslatorSettings) -> EventTranslator {
        EventTranslator::new(settings, KeycodeTable::win32())
    }

    //=====================================================================
    // Keyboard Tests
    //=====================================================================

    #[test]
    fn key_down_and_up_carry_modifiers() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::SHIFT);

        tr.key(&mut sink, KeyCode::KeyA, true, false);
        tr.key(&mut sink, KeyCode::KeyA, false, false);

        assert_eq!(
            sink.events,
            vec![
                EventKind::KeyDown { key: KeyCode::KeyA, repeat: false, modifiers: Modifiers::SHIFT },
                EventKind::KeyUp { key: KeyCode::KeyA, modifiers: Modifiers::SHIFT },
            ]
        );
    }

    #[test]
    fn native_codes_use_the_table() {
        let tr = translator(settings());
        assert_eq!(tr.keycode_for_native(0x01E), KeyCode::KeyA);
        assert_eq!(tr.keycode_for_native(0x1FF), KeyCode::Invalid);
        assert_eq!(tr.keycode_for_native(100_000), KeyCode::Invalid);
    }

    #[test]
    fn unmapped_keys_are_submitted_as_invalid() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        let key = tr.keycode_for_native(0x1FF);
        tr.key(&mut sink, key, true, false);
        assert!(matches!(sink.events[0], EventKind::KeyDown { key: KeyCode::Invalid, .. }));
    }

    #[test]
    fn super_key_down_synthesizes_key_up() {
        let mut tr = translator(TranslatorSettings {
            synthesize_super_key_up: true,
            ..settings()
        });
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::SUPER);

        tr.key(&mut sink, KeyCode::KeyS, true, false);

        assert_eq!(
            sink.events,
            vec![
                EventKind::KeyDown { key: KeyCode::KeyS, repeat: false, modifiers: Modifiers::SUPER },
                EventKind::KeyUp { key: KeyCode::KeyS, modifiers: Modifiers::SUPER },
            ]
        );
    }

    #[test]
    fn no_synthesized_key_up_without_super() {
        let mut tr = translator(TranslatorSettings {
            synthesize_super_key_up: true,
            ..settings()
        });
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::CTRL);

        tr.key(&mut sink, KeyCode::KeyS, true, false);
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn paste_shortcut_emits_clipboard_pasted() {
        let mut tr = translator(TranslatorSettings {
            clipboard_paste: true,
            ..settings()
        });
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::CTRL);

        tr.key(&mut sink, KeyCode::KeyV, true, false);
        assert_eq!(sink.events.last(), Some(&EventKind::ClipboardPasted));

        sink.events.clear();
        tr.set_modifiers(Modifiers::CTRL | Modifiers::SHIFT);
        tr.key(&mut sink, KeyCode::KeyV, true, false);
        assert!(!sink.events.contains(&EventKind::ClipboardPasted));
    }

    #[test]
    fn paste_shortcut_ignored_when_clipboard_disabled() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::CTRL);
        tr.key(&mut sink, KeyCode::KeyV, true, false);
        assert_eq!(sink.events.len(), 1);
    }

    #[test]
    fn key_reports_consumption_of_primary_event() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink {
            consume_key_down: true,
            ..RecordingSink::default()
        };
        assert!(tr.key(&mut sink, KeyCode::Enter, true, false));
        assert!(!tr.key(&mut sink, KeyCode::Enter, false, false));
    }

    #[test]
    fn text_skips_control_characters() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        tr.text(&mut sink, "a\u{8}\r\u{7f}é\u{f704}", false);

        let chars: Vec<char> = sink
            .events
            .iter()
            .filter_map(|e| match e {
                EventKind::Char { ch, .. } => Some(*ch),
                _ => None,
            })
            .collect();
        assert_eq!(chars, vec!['a', 'é']);
    }

    //=====================================================================
    // Mouse Tests
    //=====================================================================

    #[test]
    fn mouse_move_reports_deltas() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        tr.mouse_move(&mut sink, 10.0, 20.0);
        tr.mouse_move(&mut sink, 15.0, 18.0);

        match (&sink.events[0], &sink.events[1]) {
            (
                EventKind::MouseMove { dx: dx0, dy: dy0, .. },
                EventKind::MouseMove { x, y, dx, dy, .. },
            ) => {
                assert_eq!((*dx0, *dy0), (0.0, 0.0));
                assert_eq!((*x, *y), (15.0, 18.0));
                assert_eq!((*dx, *dy), (5.0, -2.0));
            }
            other => panic!("Expected two MouseMove events, got {:?}", other),
        }
    }

    #[test]
    fn mouse_leave_resets_delta_origin() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        assert_eq!(tr.mouse_position(), None);
        tr.mouse_move(&mut sink, 10.0, 10.0);
        assert_eq!(tr.mouse_position(), Some((10.0, 10.0)));
        tr.mouse_leave(&mut sink);
        assert_eq!(tr.mouse_position(), None);
        tr.mouse_move(&mut sink, 300.0, 300.0);

        assert!(matches!(
            sink.events.last(),
            Some(EventKind::MouseMove { dx, dy, .. }) if *dx == 0.0 && *dy == 0.0
        ));
    }

    #[test]
    fn user_cursor_emits_update_cursor_before_move() {
        let mut tr = translator(TranslatorSettings {
            user_cursor: true,
            ..settings()
        });
        let mut sink = RecordingSink::default();
        tr.mouse_move(&mut sink, 1.0, 1.0);

        assert_eq!(sink.events[0], EventKind::UpdateCursor);
        assert!(matches!(sink.events[1], EventKind::MouseMove { .. }));
    }

    #[test]
    fn mouse_button_uses_last_position() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        tr.set_modifiers(Modifiers::ALT);
        tr.mouse_move(&mut sink, 42.0, 7.0);
        tr.mouse_button(&mut sink, MouseButton::Right, true);

        assert_eq!(
            sink.events.last(),
            Some(&EventKind::MouseDown {
                button: MouseButton::Right,
                x: 42.0,
                y: 7.0,
                modifiers: Modifiers::ALT,
            })
        );
    }

    //=====================================================================
    // Touch Tests
    //=====================================================================

    fn touch_ids(kind: &EventKind) -> Vec<(u64, bool)> {
        kind.touches()
            .map(|t| t.iter().map(|p| (p.id, p.changed)).collect())
            .unwrap_or_default()
    }

    #[test]
    fn touches_report_full_active_set() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        tr.touch(&mut sink, TouchPhase::Began, 1, 0.0, 0.0);
        tr.touch(&mut sink, TouchPhase::Began, 2, 5.0, 5.0);
        tr.touch(&mut sink, TouchPhase::Moved, 1, 1.0, 1.0);

        assert_eq!(touch_ids(&sink.events[0]), vec![(1, true)]);
        assert_eq!(touch_ids(&sink.events[1]), vec![(1, false), (2, true)]);
        assert!(matches!(sink.events[2], EventKind::TouchesMoved { .. }));
        assert_eq!(touch_ids(&sink.events[2]), vec![(1, true), (2, false)]);
    }

    #[test]
    fn ended_touch_is_reported_then_removed() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        tr.touch(&mut sink, TouchPhase::Began, 1, 0.0, 0.0);
        tr.touch(&mut sink, TouchPhase::Began, 2, 0.0, 0.0);
        tr.touch(&mut sink, TouchPhase::Ended, 1, 3.0, 3.0);

        assert!(matches!(sink.events[2], EventKind::TouchesEnded { .. }));
        assert_eq!(touch_ids(&sink.events[2]), vec![(1, true), (2, false)]);
        assert_eq!(tr.active_touches(), 1);
    }

    #[test]
    fn touch_overflow_is_ignored() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();

        for id in 0..MAX_TOUCH_POINTS as u64 {
            tr.touch(&mut sink, TouchPhase::Began, id, 0.0, 0.0);
        }
        tr.touch(&mut sink, TouchPhase::Began, 100, 0.0, 0.0);

        assert_eq!(sink.events.len(), MAX_TOUCH_POINTS);
        assert_eq!(tr.active_touches(), MAX_TOUCH_POINTS);
        assert!(sink
            .events
            .iter()
            .all(|e| e.touches().map_or(true, |t| t.len() <= MAX_TOUCH_POINTS)));
    }

    #[test]
    fn unknown_touch_is_ignored() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        tr.touch(&mut sink, TouchPhase::Moved, 9, 0.0, 0.0);
        tr.touch(&mut sink, TouchPhase::Cancelled, 9, 0.0, 0.0);
        assert!(sink.events.is_empty());
    }

    //=====================================================================
    // Drag & Drop Tests
    //=====================================================================

    #[test]
    fn drops_ignored_when_disabled() {
        let mut tr = translator(settings());
        let mut sink = RecordingSink::default();
        tr.files_dropped(&mut sink, vec![PathBuf::from("/a")]);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn drops_respect_limits() {
        let mut tr = translator(TranslatorSettings {
            drag_and_drop: true,
            max_dropped_files: 2,
            max_dropped_file_path_length: 8,
            ..settings()
        });
        let mut sink = RecordingSink::default();

        tr.files_dropped(
            &mut sink,
            vec![
                PathBuf::from("/a"),
                PathBuf::from("/very/long/path"),
                PathBuf::from("/b"),
                PathBuf::from("/c"),
            ],
        );

        assert_eq!(
            sink.events,
            vec![EventKind::FilesDropped {
                paths: vec![PathBuf::from("/a"), PathBuf::from("/b")],
            }]
        );
    }
}
