//=========================================================================
// Loop Thread
//=========================================================================
//
// Loop-side half of the UI/loop bridge. Owns the lifecycle, the native
// host and the input translator; applies UI messages and renders.
//
// Architecture:
//   Receiver<BridgeMessage> → apply() → host handover / lifecycle → BridgeAck
//                           ↘ render_frame() while the gate is open
//
// Should-render gate: resumed ∧ focused ∧ surface attached ∧ not cleaned up.
// While closed the thread blocks on the channel; while open it drains
// pending messages without blocking, pumps input, then renders one frame.
//
// Resource handover (window, input queue): the current resource is always
// detached before its replacement is attached, so at most one of each is
// live at any instant.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::interface::{BridgeAck, BridgeMessage, NativeHost, NativeInput};
use crate::core::clipboard::ClipboardBackend;
use crate::core::config::AppConfig;
use crate::core::handler::AppHandler;
use crate::core::input::{EventKind, EventTranslator, KeycodeTable, TranslatorSettings};
use crate::core::lifecycle::{Lifecycle, LoopControl};

//=== Constants ===========================================================

/// Upper bound on input events handled per frame.
const MAX_INPUT_PER_FRAME: usize = 100;

type Message<N> = BridgeMessage<<N as NativeHost>::Window, <N as NativeHost>::InputQueue>;

//=== LoopThread ==========================================================

pub(crate) struct LoopThread<N: NativeHost, H: AppHandler> {
    lifecycle: Lifecycle<H>,
    host: N,
    translator: EventTranslator,

    window: Option<N::Window>,
    input_queue: Option<N::InputQueue>,
    native_scale: f64,

    resumed: bool,
    focused: bool,
    finished: bool,
}

impl<N: NativeHost, H: AppHandler> LoopThread<N, H> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(
        config: &AppConfig,
        handler: H,
        host: N,
        clipboard: Box<dyn ClipboardBackend>,
    ) -> Self {
        Self {
            lifecycle: Lifecycle::new(config, handler, clipboard),
            host,
            translator: EventTranslator::new(
                TranslatorSettings::from_config(config),
                KeycodeTable::empty(),
            ),
            window: None,
            input_queue: None,
            native_scale: 1.0,
            resumed: false,
            focused: false,
            finished: false,
        }
    }

    //--- Run Loop ---------------------------------------------------------

    /// Runs until `Destroy` is applied or the UI side disconnects.
    pub(crate) fn run(mut self, requests: Receiver<Message<N>>, acks: Sender<BridgeAck>) {
        info!(target: "bridge", "Loop thread running");

        loop {
            let control = if self.should_render() {
                let control = self.drain(&requests, &acks);
                if control == LoopControl::Continue {
                    self.pump_input();
                    self.render_frame();
                }
                control
            } else {
                match requests.recv() {
                    Ok(msg) => self.apply(msg, &acks),
                    Err(_) => self.disconnected(),
                }
            };

            if control == LoopControl::Exit {
                break;
            }
        }

        info!(target: "bridge", "Loop thread stopped");
    }

    fn should_render(&self) -> bool {
        self.resumed && self.focused && self.window.is_some() && !self.lifecycle.is_cleaned_up()
    }

    /// Applies every message waiting right now without blocking.
    fn drain(&mut self, requests: &Receiver<Message<N>>, acks: &Sender<BridgeAck>) -> LoopControl {
        loop {
            match requests.try_recv() {
                Ok(msg) => {
                    if self.apply(msg, acks) == LoopControl::Exit {
                        return LoopControl::Exit;
                    }
                }
                Err(TryRecvError::Empty) => return LoopControl::Continue,
                Err(TryRecvError::Disconnected) => return self.disconnected(),
            }
        }
    }

    //--- Message Handling -------------------------------------------------

    /// Applies one message and acknowledges it.
    fn apply(&mut self, msg: Message<N>, acks: &Sender<BridgeAck>) -> LoopControl {
        debug!(target: "bridge", "Applying {}", msg.name());
        let ack = msg.expected_ack();

        let control = match msg {
            BridgeMessage::Create => LoopControl::Continue,
            BridgeMessage::Resume => {
                self.resumed = true;
                self.lifecycle.resume();
                LoopControl::Continue
            }
            BridgeMessage::Pause => {
                self.resumed = false;
                self.lifecycle.suspend();
                LoopControl::Continue
            }
            BridgeMessage::Focus => {
                self.focused = true;
                self.lifecycle.dispatch(EventKind::Focused);
                LoopControl::Continue
            }
            BridgeMessage::NoFocus => {
                self.focused = false;
                self.lifecycle.dispatch(EventKind::Unfocused);
                LoopControl::Continue
            }
            BridgeMessage::SetWindow(window) => {
                self.set_window(window);
                LoopControl::Continue
            }
            BridgeMessage::SetInputQueue(queue) => {
                self.set_input_queue(queue);
                LoopControl::Continue
            }
            BridgeMessage::Destroy => {
                self.shutdown();
                LoopControl::Exit
            }
        };

        if acks.send(ack).is_err() {
            warn!(target: "bridge", "UI thread gone, {:?} not delivered", ack);
        }
        control
    }

    fn disconnected(&mut self) -> LoopControl {
        warn!(target: "bridge", "UI thread disconnected without Destroy, shutting down");
        self.shutdown();
        LoopControl::Exit
    }

    fn shutdown(&mut self) {
        self.lifecycle.cleanup();
        self.set_input_queue(None);
        self.set_window(None);
    }

    //--- Resource Handover ------------------------------------------------

    fn set_window(&mut self, window: Option<N::Window>) {
        if self.window == window {
            trace!(target: "bridge", "Window unchanged");
            return;
        }

        if let Some(old) = self.window.take() {
            debug!(target: "bridge", "Detaching window {:?}", old);
            self.host.detach_window(&old);
            self.lifecycle.surface_lost();
        }

        if let Some(new) = window {
            debug!(target: "bridge", "Attaching window {:?}", new);
            match self.host.attach_window(&new) {
                Ok(metrics) => {
                    self.native_scale = metrics.scale;
                    self.lifecycle.surface_ready(metrics.physical, metrics.scale);
                    self.window = Some(new);
                }
                Err(err) => self.lifecycle.fail(err),
            }
        }
    }

    fn set_input_queue(&mut self, queue: Option<N::InputQueue>) {
        if self.input_queue == queue {
            trace!(target: "bridge", "Input queue unchanged");
            return;
        }

        if let Some(old) = self.input_queue.take() {
            debug!(target: "bridge", "Detaching input queue {:?}", old);
            self.host.detach_input_queue(&old);
        }

        if let Some(new) = queue {
            debug!(target: "bridge", "Attaching input queue {:?}", new);
            self.host.attach_input_queue(&new);
            self.input_queue = Some(new);
        }
    }

    //--- Frame ------------------------------------------------------------

    fn render_frame(&mut self) {
        if let Some(metrics) = self.host.surface_metrics() {
            self.native_scale = metrics.scale;
            self.lifecycle.resize(metrics.physical, metrics.scale);
        }

        let control = self.lifecycle.frame();
        self.host.present();

        if control == LoopControl::Exit && !self.finished {
            self.finished = true;
            info!(target: "bridge", "Quit ordered, finishing activity");
            self.host.finish();
        }
    }

    /// Hands queued input to the translator. Input waits in the host
    /// queue until the first frame has run init.
    fn pump_input(&mut self) {
        if self.input_queue.is_none() || !self.lifecycle.context().init_called {
            return;
        }

        let mut handled = 0;
        while handled < MAX_INPUT_PER_FRAME {
            let Some(input) = self.host.next_input() else {
                break;
            };

            let consumed = match input {
                NativeInput::Touch { phase, id, x, y } => {
                    let (x, y) = self.to_framebuffer(x, y);
                    self.translator.touch(&mut self.lifecycle, phase, id, x, y)
                }
                NativeInput::Key {
                    key,
                    pressed,
                    repeat,
                    modifiers,
                } => {
                    self.translator.set_modifiers(modifiers);
                    self.translator.key(&mut self.lifecycle, key, pressed, repeat)
                }
            };

            self.host.finish_input(consumed);
            handled += 1;
        }

        if handled >= MAX_INPUT_PER_FRAME {
            warn!(target: "bridge", "Input backlog: handled {} events this frame", handled);
        }
    }

    /// Maps physical surface coordinates to framebuffer pixels.
    fn to_framebuffer(&self, x: f32, y: f32) -> (f32, f32) {
        let factor = self.lifecycle.context().framebuffer_factor(self.native_scale);
        (x * factor, y * factor)
    }

    #[cfg(test)]
    fn lifecycle(&self) -> &Lifecycle<H> {
        &self.lifecycle
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
