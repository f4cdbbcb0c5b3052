//! RustUartConsole - firmware entry point
//!
//! On ESP-IDF:
//! 1. Initialize the console UART and status LED
//! 2. Print banner and prompt
//! 3. Loop: pump RX into the ring, service the console, drain logs, blink
//!
//! On the host the same core runs against a scripted byte feed, which is
//! handy for eyeballing terminal feedback without hardware.

use rust_uart_console::{
    console::{CommandContext, Console, Shell},
    ConsoleConfig, DmaRing, LedState, LogStream, RxEvent,
};

// Static allocations: shared between the RX path and the console task
static RX_RING: DmaRing = DmaRing::new();
static RX_EVENT: RxEvent = RxEvent::new();
static CONSOLE_LOG: LogStream = LogStream::new();
static LED_STATE: LedState = LedState::new();

#[cfg(target_os = "espidf")]
fn main() -> Result<(), esp_idf_svc::sys::EspError> {
    use esp_idf_svc::hal::peripherals::Peripherals;
    use rust_uart_console::hal::{init_console_uart, RxPump, StatusLed, UartTerminal};
    use rust_uart_console::{rt_info, uart_logger, UartConfig};

    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();

    let peripherals = Peripherals::take()?;
    let uart = init_console_uart(
        peripherals.uart0,
        peripherals.pins.gpio43,
        peripherals.pins.gpio44,
        &UartConfig::default(),
    )?;
    let mut led = StatusLed::new(peripherals.pins.gpio2, true)?;

    let config = ConsoleConfig::default();
    let pump = RxPump::new(&uart, &RX_RING, &RX_EVENT);
    let mut term = UartTerminal::new(&uart);
    let mut console: Console<'_, DmaRing> = Console::new(&RX_RING, &RX_EVENT, &CONSOLE_LOG, config);
    let mut shell = Shell::new(CommandContext { led: &LED_STATE }, config.prompt);

    console.start(&mut term);
    rt_info!(CONSOLE_LOG, now_us(), "console ready");

    loop {
        let now = now_us();

        if let Err(e) = pump.pump() {
            rust_uart_console::rt_error!(CONSOLE_LOG, now, "uart read: {}", e);
        }
        console.service(now, &mut term, &mut shell);
        uart_logger::drain_to_uart(&CONSOLE_LOG, &uart);
        led.update(&LED_STATE, now)?;

        // Yield to the idle task (1 tick)
        unsafe {
            esp_idf_svc::sys::vTaskDelay(1);
        }
    }
}

#[cfg(target_os = "espidf")]
fn now_us() -> i64 {
    // SAFETY: esp_timer_get_time has no preconditions
    unsafe { esp_idf_svc::sys::esp_timer_get_time() }
}

/// Host build: replay a typing session through the console core.
#[cfg(not(target_os = "espidf"))]
fn main() {
    use rust_uart_console::{uart_logger, LogLevel};

    // "helo" corrected with backspace, an unknown command, then an LED change
    const SCRIPT: &[&[u8]] = &[b"helo\x7f", b"p\r", b"blink\r", b"led fa", b"st\r\n"];

    CONSOLE_LOG.set_level(LogLevel::Debug);

    let config = ConsoleConfig::default();
    let mut console: Console<'_, DmaRing> = Console::new(&RX_RING, &RX_EVENT, &CONSOLE_LOG, config);
    let mut shell = Shell::new(CommandContext { led: &LED_STATE }, config.prompt);
    let mut term = String::new();

    console.start(&mut term);
    for (tick, chunk) in SCRIPT.iter().enumerate() {
        RX_RING.write(chunk);
        RX_EVENT.signal();
        console.service(tick as i64 * 1_000, &mut term, &mut shell);
    }

    print!("{}", term);
    println!();
    uart_logger::drain_to(&CONSOLE_LOG, |bytes| print!("{}", String::from_utf8_lossy(bytes)));
    println!("led mode: {}", LED_STATE.get().as_str());
}
