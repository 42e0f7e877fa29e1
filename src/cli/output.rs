//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.
//! Every writer takes its sink explicitly so sessions can print to a buffer.

use std::error::Error;
use std::io::{self, Write};

use colored::Colorize;

/// Width of the dashed separator lines.
pub const SEPARATOR_WIDTH: usize = 65;

/// Print a dashed separator line
pub fn separator(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", "-".repeat(SEPARATOR_WIDTH))
}

/// Print a framed error report, with the technical detail when there is one.
pub fn error_report(
    out: &mut impl Write,
    message: &str,
    detail: Option<&(dyn Error + 'static)>,
) -> io::Result<()> {
    separator(out)?;
    writeln!(out, "{}", message.red().bold())?;
    writeln!(out)?;
    separator(out)?;
    if let Some(err) = detail {
        separator(out)?;
        writeln!(out, "-- Technical Error Message --")?;
        writeln!(out, "{}", err)?;
        let mut source = err.source();
        while let Some(cause) = source {
            writeln!(out, "caused by: {}", cause)?;
            source = cause.source();
        }
        separator(out)?;
    }
    Ok(())
}

/// Print a message between two separators
pub fn framed(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    separator(out)?;
    writeln!(out, "{}", msg)?;
    separator(out)
}

/// Print warning (yellow "Warning:" prefix) between separators
pub fn warning(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    separator(out)?;
    writeln!(out, "{}: {}", "Warning".yellow(), msg)?;
    separator(out)
}

/// Print success status (green)
pub fn success(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg.to_string().green())
}

/// Print plain output (no color, for record lines)
pub fn info(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    writeln!(out, "{}", msg)
}

/// Print prompt without newline (cyan)
pub fn prompt(out: &mut impl Write, msg: &(impl std::fmt::Display + ?Sized)) -> io::Result<()> {
    write!(out, "{} ", msg.to_string().cyan())?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use std::path::PathBuf;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn given_message_only_when_reporting_then_two_framed_lines() {
        let text = render(|out| error_report(out, "Something broke", None));
        let dashes = "-".repeat(SEPARATOR_WIDTH);
        assert_eq!(text, format!("{dashes}\nSomething broke\n\n{dashes}\n"));
    }

    #[test]
    fn given_detail_when_reporting_then_appends_technical_section() {
        let err = ApplicationError::MissingFile(PathBuf::from("Enrollments.json"));
        let text = render(|out| error_report(out, "Missing", Some(&err)));
        assert!(text.contains("-- Technical Error Message --"));
        assert!(text.contains("enrollment file not found: Enrollments.json"));
    }
}
