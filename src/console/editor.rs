//! Line editor: bytes in, edited lines out.
//!
//! One implicit state, "accumulating a line". An empty buffer is just an
//! empty line, so there is no separate idle state.
//!
//! | Byte              | Condition   | Action                              |
//! |-------------------|-------------|-------------------------------------|
//! | CR / LF           | line > 0    | dispatch line, reset, echo newline  |
//! | CR / LF           | line == 0   | newline echo if configured          |
//! | BS (0x08) / DEL   | line > 0    | drop last byte, erase on terminal   |
//! | 0x20..=0x7E       | not full    | append, echo                        |
//! | 0x20..=0x7E       | full        | overflow policy                     |
//! | anything else     |             | ignored                             |
//!
//! Nothing here can fail. Terminal feedback is best effort and write errors
//! are dropped.

use core::fmt::Write;

use super::line_buffer::LineBuffer;
use crate::config::LINE_SIZE;

/// Newline sent back to the terminal.
pub const NEWLINE: &str = "\r\n";

/// Cursor back, blank, cursor back.
pub const ERASE: &str = "\x08 \x08";

/// Backspace
const BS: u8 = 0x08;

/// Delete (sent by most terminals for the backspace key)
const DEL: u8 = 0x7F;

/// What to do with a printable byte that does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowPolicy {
    /// Discard the new byte, keep the line.
    DropByte,
    /// Discard the whole line typed so far.
    DropLine,
}

/// Line editor settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorConfig {
    pub overflow: OverflowPolicy,
    /// Echo a newline for CR/LF even when the line is empty.
    pub newline_on_empty: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::DropByte,
            newline_on_empty: false,
        }
    }
}

/// What a single byte did. Informational only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedOutcome {
    /// No state change.
    Ignored,
    /// Byte appended to the line.
    Inserted,
    /// Last byte removed.
    Erased,
    /// Line of the given length handed to the handler.
    Dispatched(usize),
    /// Line was full; the policy that was applied.
    Overflow(OverflowPolicy),
}

/// Receives completed lines.
///
/// Called synchronously from [`LineEditor::feed`]. The editor stays
/// mutably borrowed for the duration of the call, so a handler cannot feed
/// bytes back into it.
pub trait LineHandler {
    fn on_line(&mut self, line: &str, out: &mut dyn Write);
}

impl<F> LineHandler for F
where
    F: FnMut(&str, &mut dyn Write),
{
    fn on_line(&mut self, line: &str, out: &mut dyn Write) {
        self(line, out)
    }
}

/// Terminal that swallows all feedback.
pub struct NullOutput;

impl Write for NullOutput {
    fn write_str(&mut self, _s: &str) -> core::fmt::Result {
        Ok(())
    }
}

/// Byte-at-a-time line editor.
pub struct LineEditor<const L: usize = LINE_SIZE> {
    line: LineBuffer<L>,
    config: EditorConfig,
}

impl<const L: usize> LineEditor<L> {
    /// Create an editor with an empty line.
    pub const fn new(config: EditorConfig) -> Self {
        Self {
            line: LineBuffer::new(),
            config,
        }
    }

    /// Process one input byte.
    pub fn feed<H>(&mut self, byte: u8, out: &mut dyn Write, handler: &mut H) -> FeedOutcome
    where
        H: LineHandler + ?Sized,
    {
        match byte {
            // Enter
            b'\r' | b'\n' => {
                if self.line.is_empty() {
                    if self.config.newline_on_empty {
                        let _ = out.write_str(NEWLINE);
                    }
                    return FeedOutcome::Ignored;
                }

                let _ = out.write_str(NEWLINE);
                let len = self.line.len();
                handler.on_line(self.line.terminate(), out);
                self.line.clear();
                FeedOutcome::Dispatched(len)
            }

            // Backspace
            BS | DEL => {
                if self.line.backspace() {
                    let _ = out.write_str(ERASE);
                    FeedOutcome::Erased
                } else {
                    FeedOutcome::Ignored
                }
            }

            // Printable character
            0x20..=0x7E => {
                if self.line.push(byte) {
                    let _ = out.write_char(byte as char);
                    return FeedOutcome::Inserted;
                }

                if self.config.overflow == OverflowPolicy::DropLine {
                    self.line.clear();
                }
                FeedOutcome::Overflow(self.config.overflow)
            }

            _ => FeedOutcome::Ignored,
        }
    }

    /// Text typed so far (not yet dispatched).
    pub fn line(&self) -> &str {
        self.line.as_str()
    }

    /// Current line length.
    pub fn len(&self) -> usize {
        self.line.len()
    }

    pub fn is_empty(&self) -> bool {
        self.line.is_empty()
    }

    /// Settings this editor was built with.
    pub fn config(&self) -> EditorConfig {
        self.config
    }
}

impl<const L: usize> Default for LineEditor<L> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discard() -> impl FnMut(&str, &mut dyn Write) {
        |_line: &str, _out: &mut dyn Write| {}
    }

    #[test]
    fn test_enter_on_empty_is_quiet_by_default() {
        let mut ed = LineEditor::<8>::default();
        let mut out = String::new();

        assert_eq!(ed.feed(b'\r', &mut out, &mut discard()), FeedOutcome::Ignored);
        assert!(out.is_empty());
    }

    #[test]
    fn test_enter_on_empty_echoes_when_configured() {
        let mut ed = LineEditor::<8>::new(EditorConfig {
            overflow: OverflowPolicy::DropByte,
            newline_on_empty: true,
        });
        let mut out = String::new();

        ed.feed(b'\n', &mut out, &mut discard());
        assert_eq!(out, NEWLINE);
    }

    #[test]
    fn test_echo_and_erase_feedback() {
        let mut ed = LineEditor::<8>::default();
        let mut out = String::new();
        let mut h = discard();

        ed.feed(b'o', &mut out, &mut h);
        ed.feed(b'k', &mut out, &mut h);
        ed.feed(DEL, &mut out, &mut h);

        assert_eq!(out, "ok\x08 \x08");
        assert_eq!(ed.line(), "o");
    }

    #[test]
    fn test_dispatch_hands_line_and_resets() {
        let mut ed = LineEditor::<8>::default();
        let mut lines: Vec<String> = Vec::new();
        let mut h = |line: &str, _out: &mut dyn Write| lines.push(line.into());

        for &b in b"led" {
            ed.feed(b, &mut NullOutput, &mut h);
        }
        assert_eq!(ed.feed(b'\r', &mut NullOutput, &mut h), FeedOutcome::Dispatched(3));
        assert!(ed.is_empty());

        assert_eq!(lines, ["led"]);
    }

    #[test]
    fn test_control_bytes_ignored() {
        let mut ed = LineEditor::<8>::default();
        let mut out = String::new();

        for b in [0x00, 0x03, 0x1B, b'\t', 0x80, 0xFF] {
            assert_eq!(ed.feed(b, &mut out, &mut discard()), FeedOutcome::Ignored);
        }
        assert!(ed.is_empty());
        assert!(out.is_empty());
    }

    #[test]
    fn test_drop_line_policy_clears() {
        let mut ed = LineEditor::<4>::new(EditorConfig {
            overflow: OverflowPolicy::DropLine,
            newline_on_empty: false,
        });
        let mut h = discard();

        for &b in b"abc" {
            ed.feed(b, &mut NullOutput, &mut h);
        }
        assert_eq!(
            ed.feed(b'd', &mut NullOutput, &mut h),
            FeedOutcome::Overflow(OverflowPolicy::DropLine)
        );
        assert!(ed.is_empty());
    }
}
