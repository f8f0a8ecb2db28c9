//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Types crossing the UI thread / loop thread boundary, and the contract a
// native host (window system, input poller, presentation surface) fulfills
// on the loop thread.
//
// Every message is a transaction: the UI thread sends it and blocks until
// the loop thread has applied it and answered with a `BridgeAck`.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use crate::core::error::FatalError;
use crate::core::input::{KeyCode, Modifiers, TouchPhase};

//=== BridgeMessage =======================================================

/// UI thread → loop thread notifications.
///
/// `W` and `Q` are the host's native window and input queue handles.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeMessage<W, Q> {
    Create,
    Resume,
    Pause,
    Focus,
    NoFocus,

    /// New native window, or `None` once it was destroyed.
    SetWindow(Option<W>),

    /// New input queue, or `None` once it was destroyed.
    SetInputQueue(Option<Q>),

    Destroy,
}

impl<W, Q> BridgeMessage<W, Q> {
    /// Acknowledgement the loop thread answers this message with.
    pub fn expected_ack(&self) -> BridgeAck {
        match self {
            Self::Create => BridgeAck::Started,
            Self::Destroy => BridgeAck::Stopped,
            _ => BridgeAck::Applied,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::Create => "Create",
            Self::Resume => "Resume",
            Self::Pause => "Pause",
            Self::Focus => "Focus",
            Self::NoFocus => "NoFocus",
            Self::SetWindow(_) => "SetWindow",
            Self::SetInputQueue(_) => "SetInputQueue",
            Self::Destroy => "Destroy",
        }
    }
}

//=== BridgeAck ===========================================================

/// Loop thread → UI thread acknowledgement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeAck {
    /// The loop thread is up and waiting for messages.
    Started,

    /// The state change carried by the message is in effect.
    Applied,

    /// Cleanup ran; the loop thread is exiting.
    Stopped,
}

//=== SurfaceMetrics ======================================================

/// Size of a native surface in physical pixels plus the display scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    pub physical: (u32, u32),
    pub scale: f64,
}

//=== NativeInput =========================================================

/// Input read from an attached input queue, already normalized by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeInput {
    Touch {
        phase: TouchPhase,
        id: u64,
        x: f32,
        y: f32,
    },
    Key {
        key: KeyCode,
        pressed: bool,
        repeat: bool,
        modifiers: Modifiers,
    },
}

//=== NativeHost ==========================================================

/// Native services owned by the loop thread.
///
/// The loop thread guarantees that at most one window and at most one
/// input queue are attached at any time: the previous one is always
/// detached before a replacement is attached.
pub trait NativeHost: Send + 'static {
    type Window: Send + PartialEq + fmt::Debug + 'static;
    type InputQueue: Send + PartialEq + fmt::Debug + 'static;

    /// Creates the presentation surface for `window`.
    fn attach_window(&mut self, window: &Self::Window) -> Result<SurfaceMetrics, FatalError>;

    /// Destroys the presentation surface for `window`.
    fn detach_window(&mut self, window: &Self::Window);

    fn attach_input_queue(&mut self, queue: &Self::InputQueue);

    fn detach_input_queue(&mut self, queue: &Self::InputQueue);

    /// Current metrics of the attached surface, if any.
    fn surface_metrics(&mut self) -> Option<SurfaceMetrics>;

    /// Next pending input from the attached queue.
    fn next_input(&mut self) -> Option<NativeInput>;

    /// Completes the input returned by the last `next_input` call.
    fn finish_input(&mut self, consumed: bool);

    /// Presents the frame just rendered.
    fn present(&mut self);

    /// Asks the OS to finish the activity after a committed quit.
    fn finish(&mut self);
}
