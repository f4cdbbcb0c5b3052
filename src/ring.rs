//! Receive ring: the circular buffer the UART receiver fills.
//!
//! # Architecture
//!
//! ```text
//! DMA / RX pump            DmaRing               Console task
//! ─────────────            ───────               ────────────
//!
//! write() ──────────▶ [b0][b1]..[bN-1] ──────▶ IntakeTracker::poll()
//! ISR context         write cursor wraps        read-only view
//! ```
//!
//! The console core only ever sees the ring through [`RxRing`]. It never
//! writes, never snapshots, and re-reads the write cursor on every poll.

use core::cell::UnsafeCell;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::RX_RING_SIZE;

/// Scratch size for one [`DmaRing::fill_from`] read.
pub const FILL_CHUNK: usize = 64;

/// Read-only view of a receive ring owned by the transport.
pub trait RxRing {
    /// Ring capacity in bytes.
    fn capacity(&self) -> usize;

    /// Position the producer will write next, always in `[0, capacity)`.
    fn write_cursor(&self) -> usize;

    /// Byte at `index`. Indices are taken modulo the capacity.
    fn byte_at(&self, index: usize) -> u8;
}

/// Fixed-size receive ring written by a single producer.
///
/// Stands in for the hardware DMA buffer: the producer (DMA completion,
/// RX interrupt or the receive pump) calls [`DmaRing::write`], the console
/// reads through [`RxRing`].
///
/// # Safety
///
/// Uses `UnsafeCell` internally. Sound under these rules:
/// - Exactly one producer calls `write`/`push`
/// - Consumers only read slots behind the published write cursor
/// - The cursor is published with `Release` after the bytes land
///
/// A producer that laps the consumer overwrites unread bytes. That loss is
/// not detected here.
pub struct DmaRing<const N: usize = RX_RING_SIZE> {
    slots: UnsafeCell<[u8; N]>,
    write_pos: AtomicU32,
}

// SAFETY: Single producer, readers go through the atomic cursor.
unsafe impl<const N: usize> Sync for DmaRing<N> {}
unsafe impl<const N: usize> Send for DmaRing<N> {}

impl<const N: usize> DmaRing<N> {
    /// Create an empty ring with the write cursor at 0.
    pub const fn new() -> Self {
        assert!(N > 0, "Ring size must be non-zero");
        assert!(N <= u32::MAX as usize, "Ring size must fit the cursor");

        Self {
            slots: UnsafeCell::new([0u8; N]),
            write_pos: AtomicU32::new(0),
        }
    }

    /// Append one byte and advance the cursor (producer side only).
    #[inline]
    pub fn push(&self, byte: u8) {
        let pos = self.write_pos.load(Ordering::Relaxed) as usize;

        // SAFETY: Single producer, slot at `pos` is not published yet
        unsafe {
            (*self.slots.get())[pos] = byte;
        }

        self.write_pos
            .store(((pos + 1) % N) as u32, Ordering::Release);
    }

    /// Append a run of bytes, wrapping at the end of the ring.
    ///
    /// The cursor is published once, after all bytes are stored, the way a
    /// DMA transfer followed by an idle-line interrupt would expose them.
    pub fn write(&self, bytes: &[u8]) {
        let mut pos = self.write_pos.load(Ordering::Relaxed) as usize;

        for &b in bytes {
            // SAFETY: Single producer, slot at `pos` is not published yet
            unsafe {
                (*self.slots.get())[pos] = b;
            }
            pos = (pos + 1) % N;
        }

        self.write_pos.store(pos as u32, Ordering::Release);
    }

    /// Pull bytes from `read` until it runs dry or `N - 1` bytes were moved.
    ///
    /// `read` fills the slice it is given and returns the count, 0 when
    /// nothing is waiting. Stopping one short of a full lap keeps a single
    /// fill distinguishable from "no data" for the intake tracker. An error
    /// is returned only if nothing was moved yet.
    pub fn fill_from<E, F>(&self, mut read: F) -> Result<usize, E>
    where
        F: FnMut(&mut [u8]) -> Result<usize, E>,
    {
        let mut chunk = [0u8; FILL_CHUNK];
        let budget = N - 1;
        let mut moved = 0;

        while moved < budget {
            let want = (budget - moved).min(FILL_CHUNK);
            let n = match read(&mut chunk[..want]) {
                Ok(n) => n,
                Err(e) if moved == 0 => return Err(e),
                Err(_) => break,
            };
            if n == 0 {
                break;
            }

            self.write(&chunk[..n]);
            moved += n;
            if n < want {
                break;
            }
        }

        Ok(moved)
    }
}

impl<const N: usize> Default for DmaRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RxRing for DmaRing<N> {
    #[inline]
    fn capacity(&self) -> usize {
        N
    }

    #[inline]
    fn write_cursor(&self) -> usize {
        self.write_pos.load(Ordering::Acquire) as usize
    }

    #[inline]
    fn byte_at(&self, index: usize) -> u8 {
        // SAFETY: Read-only access, the byte may be concurrently rewritten
        // only if the producer has lapped us (documented loss)
        unsafe { (*self.slots.get())[index % N] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_starts_at_zero() {
        let ring = DmaRing::<8>::new();
        assert_eq!(ring.write_cursor(), 0);
        assert_eq!(ring.capacity(), 8);
    }

    #[test]
    fn test_ring_push_advances_cursor() {
        let ring = DmaRing::<8>::new();
        ring.push(b'a');
        ring.push(b'b');

        assert_eq!(ring.write_cursor(), 2);
        assert_eq!(ring.byte_at(0), b'a');
        assert_eq!(ring.byte_at(1), b'b');
    }

    #[test]
    fn test_ring_write_wraps() {
        let ring = DmaRing::<4>::new();
        ring.write(b"abc");
        ring.write(b"def");

        // a b c d e f over 4 slots: [e f c d], cursor at 2
        assert_eq!(ring.write_cursor(), 2);
        assert_eq!(ring.byte_at(0), b'e');
        assert_eq!(ring.byte_at(1), b'f');
        assert_eq!(ring.byte_at(2), b'c');
        assert_eq!(ring.byte_at(3), b'd');
    }

    #[test]
    fn test_ring_full_lap_returns_cursor() {
        let ring = DmaRing::<4>::new();
        ring.write(b"wxyz");
        assert_eq!(ring.write_cursor(), 0);
    }

    #[test]
    fn test_ring_byte_at_is_modulo() {
        let ring = DmaRing::<4>::new();
        ring.write(b"q");
        assert_eq!(ring.byte_at(4), b'q');
    }

    #[test]
    fn test_ring_cross_thread_publish() {
        use std::sync::Arc;
        use std::thread;

        let ring = Arc::new(DmaRing::<64>::new());
        let producer = {
            let ring = Arc::clone(&ring);
            thread::spawn(move || {
                for i in 0..32u8 {
                    ring.push(i);
                }
            })
        };
        producer.join().unwrap();

        assert_eq!(ring.write_cursor(), 32);
        for i in 0..32usize {
            assert_eq!(ring.byte_at(i), i as u8);
        }
    }

    /// Source handing out `data` in pieces of at most `step` bytes.
    fn source(data: &[u8], step: usize) -> impl FnMut(&mut [u8]) -> Result<usize, ()> + '_ {
        let mut off = 0;
        move |buf: &mut [u8]| {
            let n = buf.len().min(step).min(data.len() - off);
            buf[..n].copy_from_slice(&data[off..off + n]);
            off += n;
            Ok(n)
        }
    }

    #[test]
    fn test_fill_loops_past_one_chunk() {
        let ring = DmaRing::<256>::new();
        let data = [b'x'; 200];

        // Several full chunks in one call
        assert_eq!(ring.fill_from(source(&data, FILL_CHUNK)), Ok(200));
        assert_eq!(ring.write_cursor(), 200);
    }

    #[test]
    fn test_fill_stops_short_of_full_lap() {
        let ring = DmaRing::<8>::new();
        let mut read = source(b"0123456789", 3);

        assert_eq!(ring.fill_from(&mut read), Ok(7));
        assert_eq!(ring.write_cursor(), 7);
        // Remainder stays with the source for the next fill
        assert_eq!(ring.fill_from(&mut read), Ok(3));
        assert_eq!(ring.byte_at(7), b'7');
        assert_eq!(ring.byte_at(0), b'8');
    }

    #[test]
    fn test_fill_error_only_when_nothing_moved() {
        let ring = DmaRing::<128>::new();
        assert_eq!(ring.fill_from(|_: &mut [u8]| Err::<usize, _>("rx")), Err("rx"));

        let mut calls = 0;
        let moved = ring.fill_from(|buf: &mut [u8]| {
            calls += 1;
            if calls > 1 {
                return Err("rx");
            }
            buf.fill(b'a');
            Ok(buf.len())
        });
        // First chunk kept, error on the second swallowed
        assert_eq!(moved, Ok(FILL_CHUNK));
    }
}
