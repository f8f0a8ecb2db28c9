//=========================================================================
// Lifecycle State Machine
//
// Sequences init → frame × N → cleanup and runs the two-phase quit
// protocol on top of the application context.
//
// States:
// ```text
//  UNINITIALIZED ──surface_ready()──> VALID ──cleanup()──> CLEANED_UP
//                                       │
//                        first frame tick runs init, then frame
//
//  Quit sub-protocol (while VALID):
//    close_requested() / request_quit()
//        │
//        ├─ quit_ordered already set ─────────────────┐
//        │                                            ↓
//        └─ quit_requested = true                  cleanup()
//           dispatch QuitRequested                 loop exits
//           handler may cancel_quit()                 ↑
//           still requested? → quit_ordered = true ───┘
//
//    quit() sets quit_ordered directly (no event, not cancellable)
// ```
//
// Key Design Decisions:
// - **init on first tick, not on surface creation**: platforms may report
//   the surface on a different call stack than the run loop
// - **cleanup is idempotent**: guarded by `cleanup_called`, which is set
//   before the user callback so the dispatch gate is already closed
// - **one negotiation per request**: a soft request pending from user code
//   and an OS close converge on the same negotiation, so a single
//   `QuitRequested` is dispatched
//
//=========================================================================

//=== Submodules ==========================================================

mod dispatch;

//=== External Dependencies ===============================================

use log::{debug, error, info};

//=== Internal Dependencies ===============================================

use super::clipboard::ClipboardBackend;
use super::config::AppConfig;
use super::context::AppContext;
use super::error::FatalError;
use super::handler::AppHandler;
use super::input::EventKind;

//=== Public Re-exports ===================================================

pub use dispatch::EventSink;

//=== LoopControl =========================================================

/// Tells the owning run loop whether to keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

//=== Lifecycle ===========================================================

/// Owner of the application state and the user handler.
///
/// Lives on exactly one thread: the main thread on desktop, the loop
/// thread behind the UI/loop bridge.
pub struct Lifecycle<H: AppHandler> {
    ctx: AppContext,
    handler: H,
}

impl<H: AppHandler> Lifecycle<H> {
    //--- Construction -----------------------------------------------------

    pub fn new(config: &AppConfig, handler: H, clipboard: Box<dyn ClipboardBackend>) -> Self {
        Self {
            ctx: AppContext::new(config, clipboard),
            handler,
        }
    }

    //--- Accessors --------------------------------------------------------

    pub fn context(&self) -> &AppContext {
        &self.ctx
    }

    pub(crate) fn context_mut(&mut self) -> &mut AppContext {
        &mut self.ctx
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    //--- Surface Transitions ----------------------------------------------

    /// Marks the rendering surface as usable.
    ///
    /// The first call arms the init latch; `init` itself runs on the next
    /// frame tick.
    pub fn surface_ready(&mut self, physical: (u32, u32), native_scale: f64) {
        if self.ctx.cleanup_called {
            return;
        }
        self.ctx.update_dimensions(physical, native_scale);
        self.ctx.valid = true;
        if !self.ctx.init_called {
            self.ctx.first_frame = true;
        }
        debug!(
            target: "lifecycle",
            "Surface ready ({}x{} @ {}x)",
            physical.0,
            physical.1,
            native_scale
        );
    }

    /// Marks the rendering surface as gone; frames stop until it returns.
    pub fn surface_lost(&mut self) {
        if self.ctx.valid {
            debug!(target: "lifecycle", "Surface lost");
        }
        self.ctx.valid = false;
    }

    /// Applies a new surface size. Dispatches `Resized` and returns `true`
    /// if the window or framebuffer size changed.
    pub fn resize(&mut self, physical: (u32, u32), native_scale: f64) -> bool {
        let changed = self.ctx.update_dimensions(physical, native_scale);
        if changed {
            self.dispatch(EventKind::Resized);
        }
        changed
    }

    //--- Frame ------------------------------------------------------------

    /// Runs one frame tick: init on the first tick, then the frame
    /// callback, then any pending quit.
    pub fn frame(&mut self) -> LoopControl {
        if self.ctx.cleanup_called {
            return LoopControl::Exit;
        }
        if !self.ctx.valid {
            return self.process_pending_quit();
        }

        self.ctx.tick_timer();

        if self.ctx.first_frame {
            self.ctx.first_frame = false;
            self.ctx.init_called = true;
            info!(target: "lifecycle", "Calling init");
            self.handler.init(&mut self.ctx);
        }

        self.handler.frame(&mut self.ctx);
        self.ctx.frame_count += 1;

        self.process_pending_quit()
    }

    //--- Suspend / Resume -------------------------------------------------

    pub fn suspend(&mut self) {
        self.dispatch(EventKind::Suspended);
    }

    /// Dispatches `Resumed` and restarts frame timing so the pause does not
    /// show up as one huge frame.
    pub fn resume(&mut self) {
        self.ctx.reset_timer();
        self.dispatch(EventKind::Resumed);
    }

    //--- Quit Protocol ----------------------------------------------------

    /// Handles a close request from the OS (close button, Alt+F4, ...).
    ///
    /// Returns `true` if the quit went through and the platform should
    /// close the window / leave its loop. Cleanup has already run then.
    pub fn close_requested(&mut self) -> bool {
        if self.ctx.cleanup_called {
            return true;
        }
        info!(target: "lifecycle", "Close requested");
        self.negotiate_quit()
    }

    /// Acts on quit flags set by user code (`request_quit`, `quit`).
    pub fn process_pending_quit(&mut self) -> LoopControl {
        if self.ctx.cleanup_called {
            return LoopControl::Exit;
        }
        if self.ctx.quit_ordered || self.ctx.quit_requested {
            if self.negotiate_quit() {
                return LoopControl::Exit;
            }
        }
        LoopControl::Continue
    }

    fn negotiate_quit(&mut self) -> bool {
        if !self.ctx.quit_ordered {
            self.ctx.quit_requested = true;
            self.dispatch(EventKind::QuitRequested);
            if self.ctx.quit_requested {
                self.ctx.quit_ordered = true;
            } else {
                info!(target: "lifecycle", "Quit cancelled by application");
            }
        }

        if self.ctx.quit_ordered {
            info!(target: "lifecycle", "Quit ordered");
            self.cleanup();
            return true;
        }
        false
    }

    //--- Teardown ---------------------------------------------------------

    /// Runs the cleanup callback once and tears down the state.
    ///
    /// Safe to call any number of times from any quit path.
    pub fn cleanup(&mut self) {
        if self.ctx.cleanup_called {
            return;
        }
        self.ctx.cleanup_called = true;

        if self.ctx.init_called {
            info!(target: "lifecycle", "Calling cleanup");
            self.handler.cleanup(&mut self.ctx);
        } else {
            debug!(target: "lifecycle", "Cleanup without init, skipping callback");
        }

        self.ctx.teardown();
    }

    /// Reports a fatal error to the fail hook and aborts the process.
    pub fn fail(&mut self, err: FatalError) -> ! {
        error!(target: "lifecycle", "Fatal: {}", err);
        self.handler.fail(&err);
        std::process::abort()
    }

    //--- State Queries ----------------------------------------------------

    pub fn is_cleaned_up(&self) -> bool {
        self.ctx.cleanup_called
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::clipboard::MemoryClipboard;
    use crate::core::input::{Event, KeyCode, Modifiers};

    //--- Test Helpers -----------------------------------------------------

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        Init,
        Frame(u64),
        Cleanup,
        Event(EventKind),
    }

    /// Handler recording every callback, with switchable behaviour.
    #[derive(Default)]
    pub(crate) struct Recorder {
        pub calls: Vec<Call>,
        pub cancel_quit: bool,
        pub consume_keys: bool,
        pub quit_on_frame: Option<u64>,
        pub request_quit_on_frame: Option<u64>,
    }

    impl Recorder {
        pub fn events(&self) -> Vec<EventKind> {
            self.calls
                .iter()
                .filter_map(|call| match call {
                    Call::Event(kind) => Some(kind.clone()),
                    _ => None,
                })
                .collect()
        }

        pub fn count(&self, wanted: &Call) -> usize {
            self.calls.iter().filter(|call| *call == wanted).count()
        }

        pub fn quit_requests(&self) -> usize {
            self.count(&Call::Event(EventKind::QuitRequested))
        }
    }

    impl AppHandler for Recorder {
        fn init(&mut self, _ctx: &mut AppContext) {
            self.calls.push(Call::Init);
        }

        fn frame(&mut self, ctx: &mut AppContext) {
            let n = ctx.frame_count();
            self.calls.push(Call::Frame(n));
            if self.quit_on_frame == Some(n) {
                ctx.quit();
            }
            if self.request_quit_on_frame == Some(n) {
                ctx.request_quit();
            }
        }

        fn cleanup(&mut self, _ctx: &mut AppContext) {
            self.calls.push(Call::Cleanup);
        }

        fn event(&mut self, ctx: &mut AppContext, event: &Event) {
            self.calls.push(Call::Event(event.kind.clone()));
            match event.kind {
                EventKind::QuitRequested if self.cancel_quit => ctx.cancel_quit(),
                EventKind::KeyDown { .. } if self.consume_keys => ctx.consume_event(),
                _ => {}
            }
        }
    }

    pub(crate) fn lifecycle(handler: Recorder) -> Lifecycle<Recorder> {
        Lifecycle::new(&AppConfig::default(), handler, Box::new(MemoryClipboard::new()))
    }

    /// A lifecycle with a surface and one completed frame (init done).
    pub(crate) fn running(handler: Recorder) -> Lifecycle<Recorder> {
        let mut lc = lifecycle(handler);
        lc.surface_ready((640, 480), 1.0);
        assert_eq!(lc.frame(), LoopControl::Continue);
        lc
    }

    fn key_down(key: KeyCode) -> EventKind {
        EventKind::KeyDown {
            key,
            repeat: false,
            modifiers: Modifiers::NONE,
        }
    }

    //=====================================================================
    // Init / Frame Ordering
    //=====================================================================

    #[test]
    fn no_frames_before_surface() {
        let mut lc = lifecycle(Recorder::default());
        assert_eq!(lc.frame(), LoopControl::Continue);
        assert!(lc.handler().calls.is_empty());
    }

    #[test]
    fn init_runs_on_first_tick_not_on_surface_ready() {
        let mut lc = lifecycle(Recorder::default());
        lc.surface_ready((640, 480), 1.0);
        assert!(lc.handler().calls.is_empty(), "init must wait for the first tick");

        lc.frame();
        assert_eq!(lc.handler().calls, vec![Call::Init, Call::Frame(0)]);
    }

    #[test]
    fn init_runs_exactly_once() {
        let mut lc = running(Recorder::default());
        for _ in 0..5 {
            lc.frame();
        }
        lc.surface_lost();
        lc.surface_ready((640, 480), 1.0);
        lc.frame();

        assert_eq!(lc.handler().count(&Call::Init), 1);
        assert_eq!(lc.handler().calls[0], Call::Init);
    }

    #[test]
    fn frame_count_increments_per_frame() {
        let mut lc = running(Recorder::default());
        lc.frame();
        lc.frame();
        assert_eq!(lc.context().frame_count(), 3);
        assert_eq!(
            lc.handler().calls,
            vec![Call::Init, Call::Frame(0), Call::Frame(1), Call::Frame(2)]
        );
    }

    #[test]
    fn frames_pause_while_surface_lost() {
        let mut lc = running(Recorder::default());
        lc.surface_lost();
        lc.frame();
        assert_eq!(lc.context().frame_count(), 1);
    }

    //=====================================================================
    // Cleanup
    //=====================================================================

    #[test]
    fn cleanup_is_idempotent() {
        let mut lc = running(Recorder::default());
        lc.cleanup();
        lc.cleanup();
        lc.close_requested();
        lc.context_mut().quit();
        lc.process_pending_quit();

        assert_eq!(lc.handler().count(&Call::Cleanup), 1);
    }

    #[test]
    fn nothing_runs_after_cleanup() {
        let mut lc = running(Recorder::default());
        lc.cleanup();
        let before = lc.handler().calls.len();

        assert_eq!(lc.frame(), LoopControl::Exit);
        assert!(!lc.dispatch(key_down(KeyCode::KeyA)));
        lc.resize((800, 600), 1.0);
        lc.surface_ready((640, 480), 1.0);
        lc.frame();

        assert_eq!(lc.handler().calls.len(), before);
    }

    #[test]
    fn cleanup_without_init_skips_callback() {
        let mut lc = lifecycle(Recorder::default());
        lc.cleanup();
        assert!(lc.is_cleaned_up());
        assert!(lc.handler().calls.is_empty());
    }

    //=====================================================================
    // Quit Protocol
    //=====================================================================

    #[test]
    fn request_quit_then_cancel_keeps_running() {
        let mut lc = running(Recorder {
            cancel_quit: true,
            ..Recorder::default()
        });

        lc.context_mut().request_quit();
        assert_eq!(lc.process_pending_quit(), LoopControl::Continue);

        assert!(!lc.context().quit_ordered());
        assert!(!lc.context().quit_requested());
        assert_eq!(lc.handler().quit_requests(), 1);
        assert_eq!(lc.frame(), LoopControl::Continue);
    }

    #[test]
    fn request_quit_without_cancel_orders_quit_once() {
        let mut lc = running(Recorder {
            request_quit_on_frame: Some(1),
            ..Recorder::default()
        });

        assert_eq!(lc.frame(), LoopControl::Exit);
        assert!(lc.context().quit_ordered());
        assert_eq!(lc.handler().quit_requests(), 1);
        assert_eq!(lc.handler().count(&Call::Cleanup), 1);

        assert_eq!(lc.frame(), LoopControl::Exit);
        assert_eq!(lc.handler().quit_requests(), 1);
    }

    #[test]
    fn direct_quit_skips_quit_requested_event() {
        let mut lc = running(Recorder {
            quit_on_frame: Some(1),
            ..Recorder::default()
        });

        assert_eq!(lc.frame(), LoopControl::Exit);
        assert!(lc.context().quit_ordered());
        assert_eq!(lc.handler().quit_requests(), 0);
        assert_eq!(lc.handler().count(&Call::Cleanup), 1);
    }

    #[test]
    fn os_close_dispatches_quit_requested() {
        let mut lc = running(Recorder::default());
        assert!(lc.close_requested());
        assert_eq!(lc.handler().quit_requests(), 1);
        assert!(lc.is_cleaned_up());
    }

    #[test]
    fn os_close_can_be_cancelled() {
        let mut lc = running(Recorder {
            cancel_quit: true,
            ..Recorder::default()
        });
        assert!(!lc.close_requested());
        assert!(!lc.is_cleaned_up());
        assert_eq!(lc.frame(), LoopControl::Continue);
    }

    #[test]
    fn handler_can_change_its_mind_between_closes() {
        let mut lc = running(Recorder {
            cancel_quit: true,
            ..Recorder::default()
        });
        assert!(!lc.close_requested());

        lc.handler_mut().cancel_quit = false;
        assert!(lc.close_requested());
        assert_eq!(lc.handler().quit_requests(), 2);
        assert!(lc.is_cleaned_up());
    }

    #[test]
    fn os_close_after_direct_quit_skips_negotiation() {
        let mut lc = running(Recorder {
            cancel_quit: true,
            ..Recorder::default()
        });
        lc.context_mut().quit();
        assert!(lc.close_requested());
        assert_eq!(lc.handler().quit_requests(), 0);
    }

    #[test]
    fn os_close_while_soft_quit_pending_dispatches_once() {
        let mut lc = running(Recorder {
            cancel_quit: true,
            ..Recorder::default()
        });

        lc.context_mut().request_quit();
        assert!(!lc.close_requested());
        assert_eq!(lc.process_pending_quit(), LoopControl::Continue);

        assert_eq!(lc.handler().quit_requests(), 1);
    }

    #[test]
    fn close_before_init_quits_without_event() {
        let mut lc = lifecycle(Recorder::default());
        lc.surface_ready((640, 480), 1.0);

        assert!(lc.close_requested());
        assert!(lc.handler().calls.is_empty());
    }

    //=====================================================================
    // Resize
    //=====================================================================

    #[test]
    fn resize_dispatches_only_on_change() {
        let mut lc = running(Recorder::default());
        assert!(!lc.resize((640, 480), 1.0));
        assert!(lc.resize((1024, 768), 1.0));

        assert_eq!(lc.handler().events(), vec![EventKind::Resized]);
        assert_eq!(lc.context().window_size(), (1024, 768));
    }

    #[test]
    fn suspend_and_resume_dispatch_events() {
        let mut lc = running(Recorder::default());
        lc.suspend();
        lc.resume();
        assert_eq!(
            lc.handler().events(),
            vec![EventKind::Suspended, EventKind::Resumed]
        );
    }
}
