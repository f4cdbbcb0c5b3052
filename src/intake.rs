//! Circular intake tracker.
//!
//! Turns "the write cursor moved" into the contiguous spans of the receive
//! ring that have not been forwarded yet.
//!
//! ```text
//!            drain            write
//!              │                │
//! forward: [..][##############][....]      one span
//!
//!          write          drain
//!            │              │
//! wrap:    [##][............][######]      tail span, then head span
//! ```
//!
//! Only the position delta is tracked, not a byte count. If the producer
//! laps the ring between two drains the overwritten bytes are lost and the
//! loss is not reported.

use crate::event::RxEvent;
use crate::ring::RxRing;

/// Contiguous run of ring slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    /// Slot indices covered by this span.
    pub fn indices(&self) -> core::ops::Range<usize> {
        self.start..self.start + self.len
    }
}

/// Result of one poll: zero, one or two spans in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Drain {
    spans: [Option<Span>; 2],
    wrapped: bool,
}

impl Drain {
    /// Nothing to forward.
    pub const EMPTY: Self = Self { spans: [None, None], wrapped: false };

    fn forward(span: Span) -> Self {
        Self { spans: [Some(span), None], wrapped: false }
    }

    fn wrap(tail: Span, head: Option<Span>) -> Self {
        Self { spans: [Some(tail), head], wrapped: true }
    }

    /// Spans in emission order.
    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        self.spans.iter().flatten().copied()
    }

    /// Number of spans (0, 1 or 2).
    pub fn span_count(&self) -> usize {
        self.spans().count()
    }

    /// Total bytes covered.
    pub fn total(&self) -> usize {
        self.spans().map(|s| s.len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans[0].is_none()
    }

    /// True if the drain reached the end of the ring.
    pub fn wrapped(&self) -> bool {
        self.wrapped
    }
}

/// Tracks how far the receive ring has been drained.
pub struct IntakeTracker {
    /// Last position already forwarded, in `[0, capacity)`.
    drain_pos: usize,
}

impl IntakeTracker {
    /// Fresh tracker, drain cursor at 0 (matches a freshly started DMA).
    pub const fn new() -> Self {
        Self { drain_pos: 0 }
    }

    /// Tracker resuming at `pos` (e.g. after restarting the receiver).
    ///
    /// `pos` is taken modulo the ring capacity on the next poll.
    pub const fn with_cursor(pos: usize) -> Self {
        Self { drain_pos: pos }
    }

    /// Position up to which bytes have been forwarded.
    #[inline]
    pub fn drain_cursor(&self) -> usize {
        self.drain_pos
    }

    /// Compute the spans written since the last drain.
    ///
    /// Returns [`Drain::EMPTY`] when no event is pending or the cursor has
    /// not moved. The event is consumed before the cursor is read, so a
    /// signal raised while we compute is seen by the next poll.
    pub fn poll<R: RxRing + ?Sized>(&mut self, ring: &R, event: &RxEvent) -> Drain {
        if !event.take() {
            return Drain::EMPTY;
        }

        let cap = ring.capacity();
        let write = ring.write_cursor();
        // A resync cursor may lie outside the ring
        let last = self.drain_pos % cap;

        if write == last {
            return Drain::EMPTY;
        }

        let drain = if write > last {
            Drain::forward(Span { start: last, len: write - last })
        } else {
            // Tail first, then head: arrival order
            let tail = Span { start: last, len: cap - last };
            let head = (write > 0).then_some(Span { start: 0, len: write });
            Drain::wrap(tail, head)
        };

        self.drain_pos = write;
        drain
    }

    /// Poll and hand every new byte to `sink`, in arrival order.
    ///
    /// Returns the [`Drain`] that was forwarded.
    pub fn poll_into<R, F>(&mut self, ring: &R, event: &RxEvent, mut sink: F) -> Drain
    where
        R: RxRing + ?Sized,
        F: FnMut(u8),
    {
        let drain = self.poll(ring, event);
        for span in drain.spans() {
            for idx in span.indices() {
                sink(ring.byte_at(idx));
            }
        }
        drain
    }
}

impl Default for IntakeTracker {
    fn default() -> Self {
        Self::new()
    }
}
