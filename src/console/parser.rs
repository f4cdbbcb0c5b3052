//! Command line parser
//!
//! Split on whitespace: first token is the command, up to 3 arguments follow.

/// Maximum number of arguments kept
pub const MAX_ARGS: usize = 3;

/// Parsed command with up to [`MAX_ARGS`] arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// The command name (first token)
    pub command: &'a str,
    /// Arguments in order, `None` past the last one
    pub args: [Option<&'a str>; MAX_ARGS],
}

impl<'a> ParsedCommand<'a> {
    /// Get argument by index (0-based)
    pub fn arg(&self, idx: usize) -> Option<&'a str> {
        self.args.get(idx).copied().flatten()
    }

    /// Number of arguments present
    pub fn arg_count(&self) -> usize {
        self.args.iter().flatten().count()
    }

    /// True for a blank line
    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

/// Parse a command line into command and arguments.
///
/// Extra arguments beyond [`MAX_ARGS`] are dropped.
pub fn parse_line(line: &str) -> ParsedCommand<'_> {
    let mut parts = line.split_ascii_whitespace();
    let command = parts.next().unwrap_or("");

    let mut args = [None; MAX_ARGS];
    for (slot, arg) in args.iter_mut().zip(parts) {
        *slot = Some(arg);
    }

    ParsedCommand { command, args }
}
