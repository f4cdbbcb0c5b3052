//! Receive event flag: interrupt-to-task handoff.
//!
//! The UART idle / receive-complete interrupt sets the flag, the console
//! task consumes it. There is no queue and no count of pending events:
//! any number of signals between two polls collapse into one drain pass.
//!
//! ```ignore
//! static RX_EVENT: RxEvent = RxEvent::new();
//!
//! // In ISR / RX pump:
//! RX_EVENT.signal();
//!
//! // In console task:
//! if RX_EVENT.take() {
//!     // drain the ring
//! }
//! ```

use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Sticky single-bit "new bytes available" flag.
///
/// Single writer (interrupt side), single clearer (console task).
pub struct RxEvent {
    /// True while an event is waiting to be consumed.
    pending: AtomicBool,

    /// Total signals since boot (diagnostic only, never cleared).
    signals: AtomicU32,
}

impl RxEvent {
    /// Create a cleared flag.
    pub const fn new() -> Self {
        Self {
            pending: AtomicBool::new(false),
            signals: AtomicU32::new(0),
        }
    }

    /// Raise the flag (ISR-safe, never blocks).
    #[inline]
    pub fn signal(&self) {
        self.signals.fetch_add(1, Ordering::Relaxed);
        self.pending.store(true, Ordering::Release);
    }

    /// Read and clear the flag in one step.
    ///
    /// Returns `true` if an event was pending.
    #[inline]
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::AcqRel)
    }

    /// Peek at the flag without consuming it.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Acquire)
    }

    /// Signals raised since boot, including coalesced ones.
    #[inline]
    pub fn signal_count(&self) -> u32 {
        self.signals.load(Ordering::Relaxed)
    }
}

impl Default for RxEvent {
    fn default() -> Self {
        Self::new()
    }
}
