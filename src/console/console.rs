//! Console session: ring, intake tracker and line editor in one owner.
//!
//! Replaces module-level buffers and cursors. Create one at startup, keep
//! it in the driver loop, call [`Console::service`] every iteration.

use core::fmt::Write;

use super::editor::{FeedOutcome, LineEditor, LineHandler};
use crate::config::{ConsoleConfig, LINE_SIZE};
use crate::event::RxEvent;
use crate::intake::{Drain, IntakeTracker};
use crate::logging::LogStream;
use crate::ring::RxRing;
use crate::{rt_debug, rt_trace, rt_warn};

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Counters since the session started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleStats {
    /// Bytes forwarded from the ring to the editor
    pub bytes_in: u32,
    /// Lines dispatched to the handler
    pub lines: u32,
    /// Printable bytes that hit a full line
    pub overflows: u32,
    /// Drains that crossed the end of the ring
    pub wraps: u32,
    /// Events that found no new bytes
    pub spurious: u32,
}

/// Counters wrap instead of faulting on a long-running device.
#[inline]
fn bump(counter: &mut u32) {
    *counter = counter.wrapping_add(1);
}

/// One serial console session.
pub struct Console<'a, R: RxRing + ?Sized, const L: usize = LINE_SIZE> {
    ring: &'a R,
    event: &'a RxEvent,
    log: &'a LogStream,
    intake: IntakeTracker,
    editor: LineEditor<L>,
    config: ConsoleConfig,
    stats: ConsoleStats,
}

impl<'a, R: RxRing + ?Sized, const L: usize> Console<'a, R, L> {
    pub fn new(ring: &'a R, event: &'a RxEvent, log: &'a LogStream, config: ConsoleConfig) -> Self {
        Self {
            ring,
            event,
            log,
            intake: IntakeTracker::new(),
            editor: LineEditor::new(config.editor()),
            config,
            stats: ConsoleStats::default(),
        }
    }

    /// Print banner and first prompt, as configured.
    pub fn start(&self, out: &mut dyn Write) {
        if self.config.banner {
            let _ = write!(out, "\r\n{}\r\nType 'help' for commands.\r\n", VERSION);
        }
        if let Some(prompt) = self.config.prompt {
            let _ = out.write_str(prompt);
        }
    }

    /// One driver-loop step: drain new bytes and run them through the editor.
    ///
    /// Returns what was drained (empty when there was no work).
    pub fn service<H>(&mut self, now_us: i64, out: &mut dyn Write, handler: &mut H) -> Drain
    where
        H: LineHandler + ?Sized,
    {
        let flagged = self.event.is_pending();
        let drain = self.intake.poll(self.ring, self.event);

        if drain.is_empty() {
            if flagged {
                bump(&mut self.stats.spurious);
                rt_trace!(self.log, now_us, "rx event with no data");
            }
            return drain;
        }

        if drain.wrapped() {
            bump(&mut self.stats.wraps);
            rt_trace!(self.log, now_us, "rx wrap: {} bytes", drain.total());
        }

        for span in drain.spans() {
            for idx in span.indices() {
                let byte = self.ring.byte_at(idx);
                match self.editor.feed(byte, out, handler) {
                    FeedOutcome::Dispatched(len) => {
                        bump(&mut self.stats.lines);
                        rt_debug!(self.log, now_us, "line dispatched: {} bytes", len);
                    }
                    FeedOutcome::Overflow(policy) => {
                        bump(&mut self.stats.overflows);
                        rt_warn!(self.log, now_us, "line full, {:?}", policy);
                    }
                    _ => {}
                }
            }
        }

        self.stats.bytes_in = self.stats.bytes_in.wrapping_add(drain.total() as u32);
        drain
    }

    /// Text typed but not yet terminated.
    pub fn pending_line(&self) -> &str {
        self.editor.line()
    }

    /// Ring position up to which bytes have been consumed.
    pub fn drain_cursor(&self) -> usize {
        self.intake.drain_cursor()
    }

    pub fn stats(&self) -> ConsoleStats {
        self.stats
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_counters_wrap() {
        let mut stats = ConsoleStats { overflows: u32::MAX, ..Default::default() };

        bump(&mut stats.overflows);
        bump(&mut stats.lines);

        assert_eq!(stats.overflows, 0);
        assert_eq!(stats.lines, 1);
    }
}
