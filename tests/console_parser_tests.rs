//! Parser tests for console command line parsing

use rust_uart_console::console::parser::parse_line;

#[test]
fn test_parse_simple_command() {
    let cmd = parse_line("help");
    assert_eq!(cmd.command, "help");
    assert_eq!(cmd.arg(0), None);
    assert_eq!(cmd.arg_count(), 0);
}

#[test]
fn test_parse_command_with_one_arg() {
    let cmd = parse_line("led slow");
    assert_eq!(cmd.command, "led");
    assert_eq!(cmd.arg(0), Some("slow"));
    assert_eq!(cmd.arg(1), None);
    assert_eq!(cmd.arg_count(), 1);
}

#[test]
fn test_parse_trims_whitespace() {
    let cmd = parse_line("  led   fast  ");
    assert_eq!(cmd.command, "led");
    assert_eq!(cmd.arg(0), Some("fast"));
}

#[test]
fn test_parse_empty_line() {
    let cmd = parse_line("   ");
    assert!(cmd.is_empty());
}

#[test]
fn test_parse_max_args() {
    let cmd = parse_line("led off now please ignored");
    assert_eq!(cmd.command, "led");
    assert_eq!(cmd.args, [Some("off"), Some("now"), Some("please")]);
    assert_eq!(cmd.arg(3), None);
}
