//! Line buffer for console input

use crate::config::LINE_SIZE;

/// Line input buffer.
///
/// Holds at most `L - 1` bytes of text; the last slot is kept for the
/// terminator written by [`LineBuffer::terminate`].
pub struct LineBuffer<const L: usize = LINE_SIZE> {
    buf: [u8; L],
    len: usize,
}

impl<const L: usize> LineBuffer<L> {
    /// Create empty buffer
    pub const fn new() -> Self {
        assert!(L >= 2, "Line buffer needs room for text and terminator");

        Self {
            buf: [0u8; L],
            len: 0,
        }
    }

    /// Maximum text length (`L - 1`)
    pub const fn capacity(&self) -> usize {
        L - 1
    }

    /// Append a byte. Returns `false` (and stores nothing) when full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < L - 1 {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove last byte. Returns `false` if the buffer was empty.
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Write the NUL terminator after the text and return the text.
    pub fn terminate(&mut self) -> &str {
        self.buf[self.len] = 0;
        self.as_str()
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Get buffer length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if no more text fits
    pub fn is_full(&self) -> bool {
        self.len == L - 1
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl<const L: usize> Default for LineBuffer<L> {
    fn default() -> Self {
        Self::new()
    }
}
