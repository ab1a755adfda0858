// src/core/console.rs

use colored::{Color, Colorize};
use std::io::{self, Write};
use std::sync::OnceLock;

static PREFIX: OnceLock<String> = OnceLock::new();

/// The program name used to prefix every engine message, taken from `argv[0]`.
fn prefix() -> &'static str {
    PREFIX.get_or_init(|| {
        std::env::args()
            .next()
            .and_then(|arg0| {
                std::path::Path::new(&arg0)
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
            })
            .unwrap_or_else(|| env!("CARGO_PKG_NAME").to_string())
    })
}

/// Formats an engine line: the colored program name followed by the message.
pub fn format_line(content: &str, color: Color) -> String {
    format!("{} {}", prefix().color(color), content)
}

/// Prints a progress line to stdout.
pub fn info(content: &str) {
    println!("{}", format_line(content, Color::Green));
}

/// Prints an error line to stderr.
pub fn error(content: &str) {
    eprintln!("{}", format_line(content, Color::Red));
}

/// Writes captured process output verbatim, ending with exactly one newline.
pub fn write_output<W: Write>(out: &mut W, content: &str) -> io::Result<()> {
    out.write_all(content.as_bytes())?;
    if !content.ends_with('\n') {
        writeln!(out)?;
    }
    Ok(())
}

/// Writes captured process error output, in red.
pub fn write_error_output<W: Write>(err: &mut W, content: &str) -> io::Result<()> {
    let trimmed = content.strip_suffix('\n').unwrap_or(content);
    writeln!(err, "{}", trimmed.red())
}
