//! # RustUartConsole
//!
//! Serial console input core: DMA receive ring in, edited command lines out.
//!
//! ## Architecture
//!
//! ```text
//! RX interrupt ──▶ DmaRing + RxEvent ──▶ IntakeTracker ──▶ LineEditor ──▶ LineHandler
//!  (producer)        (shared, atomic)      (spans)          (bytes)        (lines)
//! ```
//!
//! - The producer writes the ring and raises the event, nothing else
//! - The console task reads the ring, never writes it
//! - Everything mutable on the consumer side lives in one [`Console`]

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod event;
pub mod intake;
pub mod led;
pub mod logging;
pub mod ring;
pub mod uart_logger;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use config::{ConsoleConfig, UartConfig, LINE_SIZE, RX_RING_SIZE};
pub use console::{Console, LineEditor, LineHandler, OverflowPolicy, Shell};
pub use event::RxEvent;
pub use intake::{Drain, IntakeTracker, Span};
pub use led::{LedMode, LedState};
pub use logging::{LogLevel, LogStream};
pub use ring::{DmaRing, RxRing};
