//! Log output on the console UART.
//!
//! Log entries are drained between console polls and written to the same
//! port the user types on, so formatting starts with `\r\n`-style line
//! endings the terminal expects.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream, SliceWriter};

/// Size of the scratch buffer one formatted entry needs.
pub const FORMAT_BUF_LEN: usize = 160;

/// Format log entry to bytes.
///
/// Format: `[timestamp_us] LEVEL: message\r\n`
pub fn format_log_entry(entry: &LogEntry, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter::new(buf);
    let _ = write!(
        writer,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    );
    writer.len()
}

/// Format the "messages were dropped" notice.
pub fn format_dropped(dropped: u32, buf: &mut [u8]) -> usize {
    let mut writer = SliceWriter::new(buf);
    let _ = write!(writer, "[WARN] log dropped: {}\r\n", dropped);
    writer.len()
}

/// Drain every pending entry into `sink`, then report drops once.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize, F>(log: &LogStream<N>, mut sink: F) -> usize
where
    F: FnMut(&[u8]),
{
    let mut buf = [0u8; FORMAT_BUF_LEN];
    let mut count = 0;

    while let Some(entry) = log.drain() {
        let len = format_log_entry(&entry, &mut buf);
        sink(&buf[..len]);
        count += 1;
    }

    let dropped = log.dropped();
    if dropped > 0 {
        let len = format_dropped(dropped, &mut buf);
        sink(&buf[..len]);
        log.reset_dropped();
    }

    count
}

/// Write all pending log entries to the console UART (blocking).
#[cfg(target_os = "espidf")]
pub fn drain_to_uart<const N: usize>(
    log: &LogStream<N>,
    uart: &esp_idf_svc::hal::uart::UartDriver<'_>,
) -> usize {
    drain_to(log, |bytes| crate::hal::uart::write_all(uart, bytes))
}
