//=========================================================================
// Application Handler
//=========================================================================
//
// The five user callback slots (init, frame, cleanup, event, fail) as one
// capability trait. The implementing type *is* the user data: state the
// callbacks share lives in `self`.
//
// `Callbacks` provides the same slots as optional closures for apps that
// prefer not to define a type.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::error;

//=== Internal Dependencies ===============================================

use super::context::AppContext;
use super::error::FatalError;
use super::input::Event;

//=== AppHandler ==========================================================

/// User callbacks driven by the lifecycle state machine.
///
/// All methods have empty defaults; implement only what you need.
///
/// # Ordering Guarantees
///
/// - `init` runs exactly once, on the first frame tick after the
///   rendering surface became ready, before any `frame` or `event`
/// - `frame` runs once per frame tick until cleanup
/// - `cleanup` runs at most once; nothing runs after it
/// - `fail` runs for a fatal error, right before the process aborts
///
/// # Examples
///
/// ```
/// use aetheric_shell::core::{AppContext, AppHandler};
/// use aetheric_shell::core::input::{Event, EventKind, KeyCode};
///
/// struct Game { frames: u64 }
///
/// impl AppHandler for Game {
///     fn frame(&mut self, _ctx: &mut AppContext) {
///         self.frames += 1;
///     }
///
///     fn event(&mut self, ctx: &mut AppContext, event: &Event) {
///         if let EventKind::KeyDown { key: KeyCode::Escape, .. } = event.kind {
///             ctx.request_quit();
///         }
///     }
/// }
/// ```
pub trait AppHandler {
    fn init(&mut self, _ctx: &mut AppContext) {}

    fn frame(&mut self, _ctx: &mut AppContext) {}

    fn cleanup(&mut self, _ctx: &mut AppContext) {}

    fn event(&mut self, _ctx: &mut AppContext, _event: &Event) {}

    fn fail(&mut self, err: &FatalError) {
        error!(target: "lifecycle", "Fatal error: {}", err);
    }

    /// Whether an event callback is registered. Events are dropped by the
    /// dispatch gate when this returns `false`.
    fn handles_events(&self) -> bool {
        true
    }
}

//=== Callbacks ===========================================================

type ContextFn = Box<dyn FnMut(&mut AppContext) + Send>;
type EventFn = Box<dyn FnMut(&mut AppContext, &Event) + Send>;
type FailFn = Box<dyn FnMut(&FatalError) + Send>;

/// Closure-based [`AppHandler`] with optional slots.
///
/// # Examples
///
/// ```
/// use aetheric_shell::core::Callbacks;
///
/// let callbacks = Callbacks::new()
///     .on_init(|_ctx| println!("init"))
///     .on_frame(|ctx| {
///         if ctx.frame_count() > 600 {
///             ctx.quit();
///         }
///     });
/// ```
#[derive(Default)]
pub struct Callbacks {
    init: Option<ContextFn>,
    frame: Option<ContextFn>,
    cleanup: Option<ContextFn>,
    event: Option<EventFn>,
    fail: Option<FailFn>,
}

impl Callbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_init(mut self, f: impl FnMut(&mut AppContext) + Send + 'static) -> Self {
        self.init = Some(Box::new(f));
        self
    }

    pub fn on_frame(mut self, f: impl FnMut(&mut AppContext) + Send + 'static) -> Self {
        self.frame = Some(Box::new(f));
        self
    }

    pub fn on_cleanup(mut self, f: impl FnMut(&mut AppContext) + Send + 'static) -> Self {
        self.cleanup = Some(Box::new(f));
        self
    }

    pub fn on_event(mut self, f: impl FnMut(&mut AppContext, &Event) + Send + 'static) -> Self {
        self.event = Some(Box::new(f));
        self
    }

    pub fn on_fail(mut self, f: impl FnMut(&FatalError) + Send + 'static) -> Self {
        self.fail = Some(Box::new(f));
        self
    }
}

impl AppHandler for Callbacks {
    fn init(&mut self, ctx: &mut AppContext) {
        if let Some(f) = self.init.as_mut() {
            f(ctx);
        }
    }

    fn frame(&mut self, ctx: &mut AppContext) {
        if let Some(f) = self.frame.as_mut() {
            f(ctx);
        }
    }

    fn cleanup(&mut self, ctx: &mut AppContext) {
        if let Some(f) = self.cleanup.as_mut() {
            f(ctx);
        }
    }

    fn event(&mut self, ctx: &mut AppContext, event: &Event) {
        if let Some(f) = self.event.as_mut() {
            f(ctx, event);
        }
    }

    fn fail(&mut self, err: &FatalError) {
        match self.fail.as_mut() {
            Some(f) => f(err),
            None => error!(target: "lifecycle", "Fatal error: {}", err),
        }
    }

    fn handles_events(&self) -> bool {
        self.event.is_some()
    }
}

impl std::fmt::Debug for Callbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Callbacks")
            .field("init", &self.init.is_some())
            .field("frame", &self.frame.is_some())
            .field("cleanup", &self.cleanup.is_some())
            .field("event", &self.event.is_some())
            .field("fail", &self.fail.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn empty_callbacks_do_not_handle_events() {
        assert!(!Callbacks::new().handles_events());
    }

    #[test]
    fn event_slot_enables_events() {
        let callbacks = Callbacks::new().on_event(|_, _| {});
        assert!(callbacks.handles_events());
    }

    #[test]
    fn fail_slot_receives_error() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let mut callbacks = Callbacks::new().on_fail(move |err| {
            *sink.lock().unwrap() = Some(err.clone());
        });

        callbacks.fail(&FatalError::EventLoop("boom".into()));

        assert_eq!(
            *seen.lock().unwrap(),
            Some(FatalError::EventLoop("boom".into()))
        );
    }

    #[test]
    fn debug_reports_registered_slots() {
        let callbacks = Callbacks::new().on_frame(|_| {});
        let text = format!("{:?}", callbacks);
        assert!(text.contains("frame: true"));
        assert!(text.contains("init: false"));
    }
}
