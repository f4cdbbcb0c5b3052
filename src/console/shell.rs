//! Command shell: the line handler that runs console commands.

use core::fmt::Write;

use super::commands::{execute, CommandContext};
use super::editor::LineHandler;
use super::parser::parse_line;
use super::ConsoleError;

/// Runs each dispatched line as a command, reports errors, reprompts.
pub struct Shell<'a> {
    ctx: CommandContext<'a>,
    prompt: Option<&'static str>,
    executed: u32,
    last_error: Option<ConsoleError>,
}

impl<'a> Shell<'a> {
    pub fn new(ctx: CommandContext<'a>, prompt: Option<&'static str>) -> Self {
        Self {
            ctx,
            prompt,
            executed: 0,
            last_error: None,
        }
    }

    /// Lines handled so far
    pub fn executed(&self) -> u32 {
        self.executed
    }

    /// Error from the most recent line, if it failed
    pub fn last_error(&self) -> Option<ConsoleError> {
        self.last_error
    }
}

impl LineHandler for Shell<'_> {
    fn on_line(&mut self, line: &str, out: &mut dyn Write) {
        let cmd = parse_line(line);
        self.last_error = execute(&cmd, &self.ctx, out).err();
        if let Some(err) = self.last_error {
            let _ = write!(out, "{}\r\n", err);
        }

        self.executed += 1;
        if let Some(prompt) = self.prompt {
            let _ = out.write_str(prompt);
        }
    }
}
