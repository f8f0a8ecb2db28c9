//=========================================================================
// UI Thread Bridge
//=========================================================================
//
// UI-side half of the UI/loop bridge. The OS delivers activity callbacks on
// its own UI thread; each one is forwarded to the loop thread and the
// caller blocks until the loop thread acknowledges it.
//
// Both directions use zero-capacity channels: a send completes only when
// the other side takes the value, so every notification is a synchronous
// transaction and the next one cannot overtake it.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::thread::{self, JoinHandle};

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{debug, error, info, warn};

//=== Internal Dependencies ===============================================

use super::interface::{BridgeAck, BridgeMessage, NativeHost};
use super::loop_thread::LoopThread;
use crate::core::clipboard::ClipboardBackend;
use crate::core::config::AppConfig;
use crate::core::error::FatalError;
use crate::core::handler::AppHandler;

//=== Constants ===========================================================

const LOOP_THREAD_NAME: &str = "aetheric-loop";

//=== UiBridge ============================================================

/// Handle owned by the UI thread for the lifetime of the activity.
///
/// Dropping the bridge without `on_destroy` still shuts the loop thread
/// down and waits for it.
pub struct UiBridge<N: NativeHost> {
    requests: Sender<BridgeMessage<N::Window, N::InputQueue>>,
    acks: Receiver<BridgeAck>,
    thread: Option<JoinHandle<()>>,
}

impl<N: NativeHost> UiBridge<N> {
    //--- Activity Creation ------------------------------------------------

    /// Spawns the loop thread and blocks until it reports `Started`.
    ///
    /// The lifecycle and the user handler are created on, and never leave,
    /// the loop thread.
    pub fn on_create<H>(
        config: AppConfig,
        handler: H,
        host: N,
        clipboard: Box<dyn ClipboardBackend>,
    ) -> Result<Self, FatalError>
    where
        H: AppHandler + Send + 'static,
    {
        config.validate()?;

        let (requests, loop_requests) = bounded(0);
        let (loop_acks, acks) = bounded(0);

        let thread = thread::Builder::new()
            .name(LOOP_THREAD_NAME.to_string())
            .spawn(move || {
                LoopThread::new(&config, handler, host, clipboard).run(loop_requests, loop_acks);
            })
            .map_err(|e| FatalError::ThreadSpawn(e.to_string()))?;

        let mut bridge = Self {
            requests,
            acks,
            thread: Some(thread),
        };

        if !bridge.transact(BridgeMessage::Create) {
            bridge.join();
            return Err(FatalError::ThreadSpawn(
                "loop thread exited during startup".to_string(),
            ));
        }

        info!(target: "bridge", "Loop thread started");
        Ok(bridge)
    }

    //--- Activity Callbacks -----------------------------------------------

    pub fn on_resume(&mut self) {
        self.transact(BridgeMessage::Resume);
    }

    pub fn on_pause(&mut self) {
        self.transact(BridgeMessage::Pause);
    }

    pub fn on_focus_changed(&mut self, focused: bool) {
        let msg = if focused {
            BridgeMessage::Focus
        } else {
            BridgeMessage::NoFocus
        };
        self.transact(msg);
    }

    pub fn on_native_window_created(&mut self, window: N::Window) {
        self.transact(BridgeMessage::SetWindow(Some(window)));
    }

    /// Returns once the loop thread no longer uses the window.
    pub fn on_native_window_destroyed(&mut self) {
        self.transact(BridgeMessage::SetWindow(None));
    }

    pub fn on_input_queue_created(&mut self, queue: N::InputQueue) {
        self.transact(BridgeMessage::SetInputQueue(Some(queue)));
    }

    /// Returns once the queue is detached from the loop thread.
    pub fn on_input_queue_destroyed(&mut self) {
        self.transact(BridgeMessage::SetInputQueue(None));
    }

    /// Runs cleanup on the loop thread, waits for `Stopped` and joins it.
    pub fn on_destroy(mut self) {
        self.shutdown();
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    //--- Internal ---------------------------------------------------------

    /// Sends one message and blocks until it is acknowledged.
    ///
    /// Returns `false` if the loop thread is gone.
    fn transact(&mut self, msg: BridgeMessage<N::Window, N::InputQueue>) -> bool {
        if self.thread.is_none() {
            warn!(target: "bridge", "{} after loop thread stopped", msg.name());
            return false;
        }

        let name = msg.name();
        let expected = msg.expected_ack();
        debug!(target: "bridge", "Sending {}", name);

        if self.requests.send(msg).is_err() {
            warn!(target: "bridge", "Loop thread gone, {} dropped", name);
            return false;
        }

        match self.acks.recv() {
            Ok(ack) if ack == expected => true,
            Ok(ack) => {
                warn!(target: "bridge", "{} answered with {:?}, expected {:?}", name, ack, expected);
                true
            }
            Err(_) => {
                warn!(target: "bridge", "Loop thread gone before acknowledging {}", name);
                false
            }
        }
    }

    fn shutdown(&mut self) {
        if self.thread.is_none() {
            return;
        }
        self.transact(BridgeMessage::Destroy);
        self.join();
    }

    fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                error!(target: "bridge", "Loop thread panicked");
            }
        }
    }
}

impl<N: NativeHost> Drop for UiBridge<N> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl<N: NativeHost> std::fmt::Debug for UiBridge<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiBridge")
            .field("running", &self.thread.is_some())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
