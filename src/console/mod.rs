//! Serial console: line editing on top of the receive ring.
//!
//! Lazy polling from the main loop - no dedicated task.
//! Zero heap allocation - all fixed buffers.

pub mod commands;
#[allow(clippy::module_inception)]
pub mod console;
pub mod editor;
pub mod error;
pub mod line_buffer;
pub mod parser;
pub mod shell;

pub use commands::{command_names, execute, CommandContext, COMMANDS};
pub use console::{Console, ConsoleStats, VERSION};
pub use editor::{EditorConfig, FeedOutcome, LineEditor, LineHandler, NullOutput, OverflowPolicy};
pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
pub use parser::{parse_line, ParsedCommand};
pub use shell::Shell;
