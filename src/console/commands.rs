//! Command handlers
//!
//! Fixed command set of the console firmware. Commands get their shared
//! state through [`CommandContext`] instead of globals.

use core::fmt::Write;

use super::parser::ParsedCommand;
use super::ConsoleError;
use crate::led::{LedMode, LedState};

/// State commands may touch
pub struct CommandContext<'a> {
    pub led: &'a LedState,
}

/// Command handler signature
pub type Handler =
    fn(&ParsedCommand<'_>, &CommandContext<'_>, &mut dyn Write) -> Result<(), ConsoleError>;

/// Command descriptor
pub struct CommandDescriptor {
    pub name: &'static str,
    /// Accepted forms, as listed by `help`
    pub usage: &'static [&'static str],
    pub brief: &'static str,
    pub handler: Handler,
}

/// All available commands
pub static COMMANDS: &[CommandDescriptor] = &[
    CommandDescriptor {
        name: "help",
        usage: &["help"],
        brief: "List commands",
        handler: cmd_help,
    },
    CommandDescriptor {
        name: "led",
        usage: &["led off", "led slow", "led fast"],
        brief: "Set status LED blink mode",
        handler: cmd_led,
    },
];

/// Execute a parsed command
pub fn execute(
    cmd: &ParsedCommand<'_>,
    ctx: &CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if cmd.is_empty() {
        return Ok(()); // Empty line, do nothing
    }

    let desc = find(cmd.command).ok_or(ConsoleError::UnknownCommand)?;
    (desc.handler)(cmd, ctx, out)
}

/// Look up a command by name
pub fn find(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Get all command names
pub fn command_names() -> impl Iterator<Item = &'static str> {
    COMMANDS.iter().map(|c| c.name)
}

// --- Command Implementations ---

fn cmd_help(
    cmd: &ParsedCommand<'_>,
    _ctx: &CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    if let Some(name) = cmd.arg(0) {
        let c = find(name).ok_or(ConsoleError::UnknownCommand)?;
        let _ = write!(out, "{}: {}\r\n", c.name, c.brief);
        return Ok(());
    }

    // One line: "help, led off, led slow, led fast"
    let mut first = true;
    for usage in COMMANDS.iter().flat_map(|c| c.usage.iter()) {
        if !first {
            let _ = out.write_str(", ");
        }
        let _ = out.write_str(usage);
        first = false;
    }
    let _ = out.write_str("\r\n");
    Ok(())
}

fn cmd_led(
    cmd: &ParsedCommand<'_>,
    ctx: &CommandContext<'_>,
    out: &mut dyn Write,
) -> Result<(), ConsoleError> {
    let arg = cmd.arg(0).ok_or(ConsoleError::MissingArg)?;
    let mode = LedMode::parse(arg).ok_or(ConsoleError::InvalidValue)?;

    ctx.led.set(mode);
    let _ = write!(out, "led={}\r\n", mode.as_str());
    Ok(())
}
