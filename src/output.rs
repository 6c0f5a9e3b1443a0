//! User-facing console messages.
//! Colored prefixes when stdout is a TTY, plain text otherwise, so output
//! stays greppable when piped.

use owo_colors::OwoColorize;
use std::path::Path;

#[derive(Clone, Copy)]
enum Tone {
    Info,
    Warn,
    Error,
    Success,
}

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn format_line(tone: Tone, msg: &str, color: bool) -> String {
    let prefix = match tone {
        Tone::Info => "info:",
        Tone::Warn => "warn:",
        Tone::Error => "error:",
        Tone::Success => "ok:",
    };
    if !color {
        return format!("{prefix} {msg}");
    }
    let prefix = match tone {
        Tone::Info => prefix.cyan().bold().to_string(),
        Tone::Warn => prefix.yellow().bold().to_string(),
        Tone::Error => prefix.red().bold().to_string(),
        Tone::Success => prefix.green().bold().to_string(),
    };
    format!("{prefix} {msg}")
}

fn emit(tone: Tone, msg: &str) {
    let line = format_line(tone, msg, is_tty());
    match tone {
        Tone::Info | Tone::Success => println!("{line}"),
        Tone::Warn | Tone::Error => eprintln!("{line}"),
    }
}

pub fn print_info(msg: &str) {
    emit(Tone::Info, msg);
}

pub fn print_warn(msg: &str) {
    emit(Tone::Warn, msg);
}

pub fn print_error(msg: &str) {
    emit(Tone::Error, msg);
}

pub fn print_success(msg: &str) {
    emit(Tone::Success, msg);
}

/// One moved file per line, no prefix, so scripts can consume the stream.
pub fn print_moved(path: &Path) {
    println!("{}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_lines_have_no_escape_codes() {
        assert_eq!(format_line(Tone::Warn, "careful", false), "warn: careful");
        assert_eq!(format_line(Tone::Success, "done", false), "ok: done");
    }

    #[test]
    fn colored_lines_keep_the_message() {
        let line = format_line(Tone::Error, "boom", true);
        assert!(line.contains("error:"));
        assert!(line.ends_with(" boom"));
        assert!(line.contains('\u{1b}'));
    }
}
