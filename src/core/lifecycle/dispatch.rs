//=========================================================================
// Dispatch Gate
//=========================================================================
//
// The single choke point every canonical event passes through.
//
// Contract:
// - Dropped (no callback) once cleanup has begun, before init has run,
//   or when the handler takes no events
// - Otherwise the event callback runs exactly once, synchronously
// - `event_consumed` is cleared before and after every dispatch; the
//   result is reported to the caller for that single event
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::Lifecycle;
use crate::core::handler::AppHandler;
use crate::core::input::{Event, EventKind};

//=== EventSink ===========================================================

/// Destination for translated events.
///
/// Returns `true` if user code consumed the event.
pub trait EventSink {
    fn submit(&mut self, kind: EventKind) -> bool;
}

//=== Gate ================================================================

impl<H: AppHandler> Lifecycle<H> {
    /// `true` if an event submitted now would reach user code.
    pub fn events_enabled(&self) -> bool {
        self.ctx.init_called && !self.ctx.cleanup_called && self.handler.handles_events()
    }

    /// Passes one event to the user callback if permitted.
    ///
    /// Returns `true` if the callback consumed it.
    pub fn dispatch(&mut self, kind: EventKind) -> bool {
        self.ctx.event_consumed = false;
        if !self.events_enabled() {
            trace!(target: "dispatch", "Dropped {:?}", kind);
            return false;
        }

        let event = Event {
            kind,
            frame_count: self.ctx.frame_count,
            window_size: self.ctx.window_size(),
            framebuffer_size: self.ctx.framebuffer_size(),
        };
        self.handler.event(&mut self.ctx, &event);

        let consumed = std::mem::take(&mut self.ctx.event_consumed);
        if consumed {
            trace!(target: "dispatch", "Consumed {:?}", event.kind);
        }
        consumed
    }
}

impl<H: AppHandler> EventSink for Lifecycle<H> {
    fn submit(&mut self, kind: EventKind) -> bool {
        if let EventKind::FilesDropped { paths } = &kind {
            if self.events_enabled() {
                self.ctx.set_dropped_files(paths.clone());
            }
        }
        self.dispatch(kind)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::handler::Callbacks;
    use crate::core::input::{KeyCode, Modifiers};
    use crate::core::lifecycle::tests::{lifecycle, running, Call, Recorder};
    use crate::core::lifecycle::LoopControl;

    fn key_down(key: KeyCode) -> EventKind {
        EventKind::KeyDown {
            key,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn dropped_before_init() {
        let mut lc = lifecycle(Recorder::default());
        lc.surface_ready((640, 480), 1.0);
        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
        assert!(lc.handler().calls.is_empty());
    }

    #[test]
    fn delivered_after_init() {
        let mut lc = running(Recorder::default());
        lc.dispatch(key_down(KeyCode::KeyA));
        assert_eq!(
            lc.handler().calls.last(),
            Some(&Call::Event(key_down(KeyCode::KeyA)))
        );
    }

    #[test]
    fn dropped_after_cleanup() {
        let mut lc = running(Recorder::default());
        lc.cleanup();
        let before = lc.handler().calls.len();
        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
        assert_eq!(lc.handler().calls.len(), before);
    }

    #[test]
    fn dropped_without_event_callback() {
        let mut lc = crate::core::Lifecycle::new(
            &crate::core::AppConfig::default(),
            Callbacks::new(),
            Box::new(crate::core::MemoryClipboard::new()),
        );
        lc.surface_ready((640, 480), 1.0);
        assert_eq!(lc.frame(), LoopControl::Continue);
        assert!(!lc.events_enabled());
        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
    }

    #[test]
    fn consumption_is_reported_and_cleared() {
        let mut lc = running(Recorder {
            consume_keys: true,
            ..Recorder::default()
        });

        assert!(lc.dispatch(key_down(KeyCode::KeyA)));
        assert!(!lc.context().event_consumed);
        assert!(!lc.dispatch(EventKind::MouseEnter), "consumption leaked");
        assert!(lc.dispatch(key_down(KeyCode::KeyB)));
    }

    #[test]
    fn consumption_outside_event_callback_does_not_leak() {
        let mut lc = crate::core::Lifecycle::new(
            &crate::core::AppConfig::default(),
            Callbacks::new()
                .on_frame(|ctx| ctx.consume_event())
                .on_event(|_, _| {}),
            Box::new(crate::core::MemoryClipboard::new()),
        );
        lc.surface_ready((640, 480), 1.0);
        assert_eq!(lc.frame(), LoopControl::Continue);

        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
    }

    #[test]
    fn dropped_event_clears_stale_consumption() {
        let mut lc = lifecycle(Recorder::default());
        lc.surface_ready((640, 480), 1.0);
        lc.context_mut().consume_event();

        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
        assert!(!lc.context().event_consumed);
    }

    #[test]
    fn envelope_carries_common_fields() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = std::sync::Arc::clone(&seen);
        let mut lc = crate::core::Lifecycle::new(
            &crate::core::AppConfig::default(),
            Callbacks::new().on_event(move |_, event| sink.lock().unwrap().push(event.clone())),
            Box::new(crate::core::MemoryClipboard::new()),
        );
        lc.surface_ready((640, 480), 1.0);
        lc.frame();
        lc.frame();
        lc.dispatch(EventKind::MouseLeave);

        let events = seen.lock().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].frame_count, 2);
        assert_eq!(events[0].window_size, (640, 480));
        assert_eq!(events[0].framebuffer_size, (640, 480));
    }

    #[test]
    fn files_dropped_updates_context() {
        let mut lc = running(Recorder::default());
        let paths = vec![PathBuf::from("/tmp/a.png")];
        lc.submit(EventKind::FilesDropped { paths: paths.clone() });
        assert_eq!(lc.context().dropped_files(), paths.as_slice());
    }
}
