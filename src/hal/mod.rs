//! Hardware Abstraction Layer for the console firmware.
//!
//! Thin wrappers around ESP-IDF peripherals.
//! Line editing stays in core modules, HAL is just I/O.

pub mod gpio;
pub mod uart;

pub use gpio::StatusLed;
pub use uart::{init_console_uart, RxPump, UartTerminal};
