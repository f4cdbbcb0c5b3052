//! Module: config
//!
//! Purpose: Build-time sizes and runtime defaults for the console.
//!
//! Sizes are compile-time constants (they dimension static buffers).
//! Behaviour knobs live in [`ConsoleConfig`], fixed once the console is
//! constructed.

use crate::console::editor::{EditorConfig, OverflowPolicy};

/// Receive ring capacity in bytes (DMA buffer size).
pub const RX_RING_SIZE: usize = 128;

/// Line buffer capacity in bytes, one slot reserved for the terminator.
pub const LINE_SIZE: usize = 64;

/// Prompt printed at startup and after every command.
pub const PROMPT: &str = "> ";

/// Console behaviour, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// What to do with a printable byte when the line is full.
    pub overflow: OverflowPolicy,
    /// Echo a newline for CR/LF on an empty line.
    pub newline_on_empty: bool,
    /// Prompt printed by `Console::start`, `None` for a silent console.
    pub prompt: Option<&'static str>,
    /// Print the version banner before the first prompt.
    pub banner: bool,
}

impl ConsoleConfig {
    /// Bare line dispatcher: no prompt, no banner, quiet on empty lines.
    pub const fn minimal() -> Self {
        Self {
            overflow: OverflowPolicy::DropByte,
            newline_on_empty: false,
            prompt: None,
            banner: false,
        }
    }

    /// Line editor settings derived from this config.
    pub const fn editor(&self) -> EditorConfig {
        EditorConfig {
            overflow: self.overflow,
            newline_on_empty: self.newline_on_empty,
        }
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            overflow: OverflowPolicy::DropByte,
            newline_on_empty: true,
            prompt: Some(PROMPT),
            banner: true,
        }
    }
}

/// UART configuration for the console port.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    pub baud_rate: u32,
    pub tx_pin: u8,
    pub rx_pin: u8,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115200,
            tx_pin: 43, // U0TXD on ESP32-S3
            rx_pin: 44, // U0RXD on ESP32-S3
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_prompted_console() {
        let cfg = ConsoleConfig::default();
        assert_eq!(cfg.prompt, Some("> "));
        assert!(cfg.newline_on_empty);
        assert_eq!(cfg.overflow, OverflowPolicy::DropByte);
    }

    #[test]
    fn test_minimal_is_silent() {
        let cfg = ConsoleConfig::minimal();
        assert_eq!(cfg.prompt, None);
        assert!(!cfg.banner);
        assert!(!cfg.editor().newline_on_empty);
    }

    #[test]
    fn test_uart_default_baud() {
        assert_eq!(UartConfig::default().baud_rate, 115200);
    }
}
