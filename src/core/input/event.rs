//=========================================================================
// Canonical Event Types
//
// Platform-independent representation of every input and lifecycle
// occurrence the shell reports to user code.
//
// Event Flow:
// ```text
// Native event (winit / Android input queue / ...)
//         ↓
//    EventTranslator (builds EventKind)
//         ↓
//    Dispatch gate (wraps in Event envelope, invokes user callback)
// ```
//
// Design:
// - `EventKind` is a sum type: every variant carries only its own payload
// - Common fields (frame count, current sizes) live in the `Event`
//   envelope, stamped at dispatch time
// - Events are ephemeral: built fresh per dispatch, never retained by the
//   shell after the callback returns
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::path::PathBuf;

//=== External Dependencies ===============================================

use log::warn;

//=== Internal Dependencies ===============================================

use super::keycode::{KeyCode, Modifiers};

//=== Constants ===========================================================

/// Maximum number of simultaneous touch points carried by one event.
pub const MAX_TOUCH_POINTS: usize = 8;

//=== MouseButton =========================================================

/// Physical mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button (typically left).
    Left,

    /// Secondary button (typically right).
    Right,

    /// Middle button (wheel click).
    Middle,

    /// Any other button (side buttons, thumb buttons).
    Other,
}

//=== TouchPoint ==========================================================

/// One active touch contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    /// Platform identifier, stable for the lifetime of the contact.
    pub id: u64,

    /// Position in framebuffer pixels.
    pub x: f32,
    pub y: f32,

    /// `true` if this contact is part of the native "changed" set for
    /// the event that carries it.
    pub changed: bool,
}

//=== Touches =============================================================

/// Ordered touch point list, capped at [`MAX_TOUCH_POINTS`].
///
/// Carries the full active touch set, not just deltas: points that did
/// not change in this native callback are present with `changed == false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Touches {
    points: Vec<TouchPoint>,
}

impl Touches {
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(MAX_TOUCH_POINTS),
        }
    }

    /// Appends a point. Points beyond the cap are dropped.
    ///
    /// Returns `false` if the point was dropped.
    pub fn push(&mut self, point: TouchPoint) -> bool {
        if self.points.len() >= MAX_TOUCH_POINTS {
            warn!(
                target: "platform::input",
                "Touch list full ({} points), dropping touch {}",
                MAX_TOUCH_POINTS,
                point.id
            );
            return false;
        }
        self.points.push(point);
        true
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TouchPoint> {
        self.points.iter()
    }

    pub fn as_slice(&self) -> &[TouchPoint] {
        &self.points
    }

    /// Iterates only over points flagged as changed.
    pub fn changed(&self) -> impl Iterator<Item = &TouchPoint> {
        self.points.iter().filter(|point| point.changed)
    }
}

impl FromIterator<TouchPoint> for Touches {
    fn from_iter<I: IntoIterator<Item = TouchPoint>>(iter: I) -> Self {
        let mut touches = Touches::new();
        for point in iter {
            touches.push(point);
        }
        touches
    }
}

impl<'a> IntoIterator for &'a Touches {
    type Item = &'a TouchPoint;
    type IntoIter = std::slice::Iter<'a, TouchPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

//=== EventKind ===========================================================

/// Kind-specific payload of a canonical event.
///
/// Mouse and touch coordinates are in framebuffer pixels (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    //--- Keyboard ---------------------------------------------------------

    /// Key pressed. `repeat` is set for OS auto-repeat.
    KeyDown {
        key: KeyCode,
        repeat: bool,
        modifiers: Modifiers,
    },

    /// Key released.
    KeyUp {
        key: KeyCode,
        modifiers: Modifiers,
    },

    /// Text input (one Unicode scalar, control characters excluded).
    Char {
        ch: char,
        repeat: bool,
        modifiers: Modifiers,
    },

    //--- Mouse ------------------------------------------------------------

    MouseDown {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    MouseUp {
        button: MouseButton,
        x: f32,
        y: f32,
        modifiers: Modifiers,
    },

    /// Cursor moved; `dx`/`dy` are relative to the previous position.
    MouseMove {
        x: f32,
        y: f32,
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    },

    /// Wheel or trackpad scroll, in lines.
    MouseScroll {
        dx: f32,
        dy: f32,
        modifiers: Modifiers,
    },

    MouseEnter,
    MouseLeave,

    //--- Touch ------------------------------------------------------------

    TouchesBegan { touches: Touches },
    TouchesMoved { touches: Touches },
    TouchesEnded { touches: Touches },
    TouchesCancelled { touches: Touches },

    //--- Window & Application ---------------------------------------------

    /// Window or framebuffer size changed; new sizes are in the envelope.
    Resized,
    Iconified,
    Restored,
    Focused,
    Unfocused,
    Suspended,
    Resumed,

    /// A close was requested; the handler may call
    /// [`AppContext::cancel_quit`](crate::core::AppContext::cancel_quit).
    QuitRequested,

    /// The paste shortcut was pressed while the clipboard is enabled.
    ClipboardPasted,

    /// The cursor image should be refreshed (user cursor mode only).
    UpdateCursor,

    /// Files were dropped onto the window.
    FilesDropped { paths: Vec<PathBuf> },
}

impl EventKind {
    /// Modifier state carried by this event, if any.
    pub fn modifiers(&self) -> Option<Modifiers> {
        match self {
            Self::KeyDown { modifiers, .. }
            | Self::KeyUp { modifiers, .. }
            | Self::Char { modifiers, .. }
            | Self::MouseDown { modifiers, .. }
            | Self::MouseUp { modifiers, .. }
            | Self::MouseMove { modifiers, .. }
            | Self::MouseScroll { modifiers, .. } => Some(*modifiers),
            _ => None,
        }
    }

    /// Touch points carried by this event, if it is a touch event.
    pub fn touches(&self) -> Option<&Touches> {
        match self {
            Self::TouchesBegan { touches }
            | Self::TouchesMoved { touches }
            | Self::TouchesEnded { touches }
            | Self::TouchesCancelled { touches } => Some(touches),
            _ => None,
        }
    }
}

//=== Event ===============================================================

/// A canonical event as observed by user code.
///
/// Built by the dispatch gate right before the event callback runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    /// What happened.
    pub kind: EventKind,

    /// Number of completed frames at dispatch time.
    pub frame_count: u64,

    /// Logical window size at dispatch time.
    pub window_size: (u32, u32),

    /// Framebuffer (physical pixel) size at dispatch time.
    pub framebuffer_size: (u32, u32),
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn point(id: u64, changed: bool) -> TouchPoint {
        TouchPoint {
            id,
            x: id as f32,
            y: id as f32 * 2.0,
            changed,
        }
    }

    //=====================================================================
    // Touches Tests
    //=====================================================================

    #[test]
    fn touches_preserve_order() {
        let touches: Touches = (0..3).map(|id| point(id, id == 1)).collect();
        let ids: Vec<u64> = touches.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![0, 1, 2]);
    }

    #[test]
    fn touches_are_capped() {
        let mut touches = Touches::new();
        for id in 0..MAX_TOUCH_POINTS as u64 {
            assert!(touches.push(point(id, true)));
        }
        assert!(!touches.push(point(99, true)), "Ninth point should be dropped");
        assert_eq!(touches.len(), MAX_TOUCH_POINTS);
        assert!(touches.iter().all(|p| p.id != 99));
    }

    #[test]
    fn touches_changed_filters_unchanged_points() {
        let touches: Touches = vec![point(1, false), point(2, true), point(3, false)]
            .into_iter()
            .collect();
        let changed: Vec<u64> = touches.changed().map(|p| p.id).collect();
        assert_eq!(changed, vec![2]);
        assert_eq!(touches.len(), 3);
    }

    //=====================================================================
    // EventKind Tests
    //=====================================================================

    #[test]
    fn modifiers_accessor() {
        let event = EventKind::KeyDown {
            key: KeyCode::KeyA,
            repeat: false,
            modifiers: Modifiers::CTRL,
        };
        assert_eq!(event.modifiers(), Some(Modifiers::CTRL));
        assert_eq!(EventKind::Resized.modifiers(), None);
    }

    #[test]
    fn touches_accessor() {
        let event = EventKind::TouchesMoved {
            touches: std::iter::once(point(7, true)).collect(),
        };
        assert_eq!(event.touches().map(Touches::len), Some(1));
        assert!(EventKind::MouseEnter.touches().is_none());
    }
}
