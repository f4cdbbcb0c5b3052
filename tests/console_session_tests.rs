//! End-to-end: bytes written to the ring come out as commands.

use core::fmt::Write;

use rust_uart_console::console::{CommandContext, Console, Shell};
use rust_uart_console::{
    ConsoleConfig, DmaRing, LedMode, LedState, LogLevel, LogStream, OverflowPolicy, RxEvent,
};

#[derive(Default)]
struct Lines(Vec<String>);

impl rust_uart_console::LineHandler for Lines {
    fn on_line(&mut self, line: &str, _out: &mut dyn Write) {
        self.0.push(line.to_string());
    }
}

fn arrive<const N: usize>(ring: &DmaRing<N>, event: &RxEvent, bytes: &[u8]) {
    ring.write(bytes);
    event.signal();
}

#[test]
fn test_scenario_small_ring() {
    // R=8, L=6: h i BS i ! CR
    let ring = DmaRing::<8>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let mut console: Console<'_, DmaRing<8>, 6> =
        Console::new(&ring, &event, &log, ConsoleConfig::minimal());
    let mut lines = Lines::default();
    let mut out = String::new();

    arrive(&ring, &event, &[b'h', b'i', 0x08, b'i', b'!', b'\r']);
    let drain = console.service(0, &mut out, &mut lines);

    assert_eq!(drain.total(), 6);
    assert_eq!(lines.0, ["hi!"]);
    assert_eq!(console.pending_line(), "");
    assert_eq!(out, "hi\x08 \x08i!\r\n");
}

#[test]
fn test_line_split_across_wrap() {
    let ring = DmaRing::<8>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let mut console: Console<'_, DmaRing<8>, 16> =
        Console::new(&ring, &event, &log, ConsoleConfig::minimal());
    let mut lines = Lines::default();

    arrive(&ring, &event, b"led ");
    console.service(0, &mut String::new(), &mut lines);
    assert_eq!(console.pending_line(), "led ");

    // 6 more bytes: 4 at the tail, 2 after the wrap
    arrive(&ring, &event, b"slow\r\n");
    let drain = console.service(1, &mut String::new(), &mut lines);

    assert!(drain.wrapped());
    assert_eq!(drain.span_count(), 2);
    assert_eq!(console.drain_cursor(), 2);
    assert_eq!(lines.0, ["led slow"]);
    assert_eq!(console.stats().wraps, 1);
}

#[test]
fn test_no_event_means_no_work() {
    let ring = DmaRing::<8>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let mut console: Console<'_, DmaRing<8>, 16> =
        Console::new(&ring, &event, &log, ConsoleConfig::minimal());
    let mut lines = Lines::default();

    ring.write(b"x\r");
    assert!(console.service(0, &mut String::new(), &mut lines).is_empty());
    assert!(lines.0.is_empty());
}

#[test]
fn test_spurious_event_counted_and_logged() {
    let ring = DmaRing::<8>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    log.set_level(LogLevel::Trace);
    let mut console: Console<'_, DmaRing<8>, 16> =
        Console::new(&ring, &event, &log, ConsoleConfig::minimal());

    event.signal();
    console.service(42, &mut String::new(), &mut Lines::default());

    assert_eq!(console.stats().spurious, 1);
    let entry = log.drain().unwrap();
    assert_eq!(entry.timestamp_us, 42);
    assert_eq!(entry.level, LogLevel::Trace);
}

#[test]
fn test_overflow_logged_as_warning() {
    let ring = DmaRing::<16>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let config = ConsoleConfig {
        overflow: OverflowPolicy::DropLine,
        ..ConsoleConfig::minimal()
    };
    let mut console: Console<'_, DmaRing<16>, 4> = Console::new(&ring, &event, &log, config);

    arrive(&ring, &event, b"abcd");
    console.service(7, &mut String::new(), &mut Lines::default());

    assert_eq!(console.stats().overflows, 1);
    assert_eq!(console.pending_line(), "");
    let entry = log.drain().unwrap();
    assert_eq!(entry.level, LogLevel::Warn);
    assert!(entry.message().contains("DropLine"));
}

#[test]
fn test_shell_session_with_prompt() {
    let ring = DmaRing::<128>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let led = LedState::new();
    let config = ConsoleConfig {
        banner: false,
        ..ConsoleConfig::default()
    };
    let mut console: Console<'_, DmaRing<128>> = Console::new(&ring, &event, &log, config);
    let mut shell = Shell::new(CommandContext { led: &led }, config.prompt);
    let mut out = String::new();

    console.start(&mut out);
    assert_eq!(out, "> ");

    arrive(&ring, &event, b"help\r");
    console.service(0, &mut out, &mut shell);
    assert_eq!(out, "> help\r\nhelp, led off, led slow, led fast\r\n> ");

    out.clear();
    arrive(&ring, &event, b"\r");
    console.service(1, &mut out, &mut shell);
    // Empty line: newline only, no command ran
    assert_eq!(out, "\r\n");
    assert_eq!(shell.executed(), 1);

    out.clear();
    arrive(&ring, &event, b"led fast\r");
    console.service(2, &mut out, &mut shell);
    assert_eq!(led.get(), LedMode::Fast);
    assert!(out.ends_with("led=fast\r\n> "));

    out.clear();
    arrive(&ring, &event, b"reboot\r");
    console.service(3, &mut out, &mut shell);
    assert!(out.contains("E01: unknown command\r\n"));
    assert!(shell.last_error().is_some());
    assert_eq!(console.stats().lines, 3);
}

#[test]
fn test_banner_includes_version() {
    let ring = DmaRing::<8>::new();
    let event = RxEvent::new();
    let log: LogStream = LogStream::new();
    let console: Console<'_, DmaRing<8>> =
        Console::new(&ring, &event, &log, ConsoleConfig::default());
    let mut out = String::new();

    console.start(&mut out);
    assert!(out.contains(rust_uart_console::console::VERSION));
    assert!(out.ends_with("> "));
}
