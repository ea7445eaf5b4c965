//! User-facing lines on stdout/stderr, coloured only when stdout is a TTY.

use owo_colors::OwoColorize;

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// `tag` painted with `paint` on a terminal, plain otherwise.
fn tag(tag: &'static str, paint: fn(&'static str) -> String) -> String {
    if is_tty() { paint(tag) } else { tag.to_string() }
}

pub fn print_info(msg: &str) {
    println!("{} {msg}", tag("info:", |t| t.cyan().bold().to_string()));
}

pub fn print_warn(msg: &str) {
    eprintln!("{} {msg}", tag("warn:", |t| t.yellow().bold().to_string()));
}

pub fn print_error(msg: &str) {
    eprintln!("{} {msg}", tag("error:", |t| t.red().bold().to_string()));
}

pub fn print_success(msg: &str) {
    println!("{} {msg}", tag("ok:", |t| t.green().bold().to_string()));
}

/// Unprefixed line for primary output such as "Moved X -> Y", which scripts may parse.
pub fn print_user(msg: &str) {
    println!("{msg}");
}
