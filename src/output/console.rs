//! Colored console output for rendered trees

use std::io::{self, Write};

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use super::tree::{READ_ERROR_MARKER, TreeLine};

/// Write rendered lines, coloring directory names, item counts and descriptions.
///
/// The text written is identical to `TreeRenderer::render`; only color
/// escapes are added when the writer supports them.
pub fn write_lines<W: WriteColor>(out: &mut W, lines: &[TreeLine]) -> io::Result<()> {
    for line in lines {
        match line {
            TreeLine::Entry {
                prefix,
                connector,
                name,
                is_dir,
                items,
                description,
            } => {
                write!(out, "{prefix}{connector}")?;
                if *is_dir {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true))?;
                }
                write!(out, "{name}")?;
                out.reset()?;
                if let Some(items) = items {
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Yellow)))?;
                    write!(out, " [{items} items]")?;
                    out.reset()?;
                }
                if let Some(description) = description {
                    write!(out, " - ")?;
                    out.set_color(ColorSpec::new().set_fg(Some(Color::Black)).set_intense(true))?;
                    write!(out, "{description}")?;
                    out.reset()?;
                }
                writeln!(out)?;
            }
            TreeLine::ReadError { prefix } => {
                write!(out, "{prefix}")?;
                out.set_color(ColorSpec::new().set_fg(Some(Color::Red)))?;
                write!(out, "{READ_ERROR_MARKER}")?;
                out.reset()?;
                writeln!(out)?;
            }
        }
    }
    Ok(())
}

/// Print rendered lines to stdout.
pub fn print_lines(lines: &[TreeLine], use_color: bool) -> io::Result<()> {
    let choice = if use_color {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    };
    let mut stdout = StandardStream::stdout(choice);
    write_lines(&mut stdout, lines)?;
    stdout.flush()
}
