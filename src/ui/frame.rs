//! Frame assembly.
//!
//! A whole screen is queued into one byte buffer so the terminal receives
//! it in a single write and never shows a half-drawn frame.

use std::io::{self, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::queue;
use crossterm::style::{Attribute, Print, SetAttribute};
use crossterm::terminal::{Clear, ClearType};

use super::render::DisplayRow;

/// Build the escape sequence stream for one frame.
///
/// `cursor` is the (column, row) to leave the terminal cursor at.
pub fn compose(
    rows: &[DisplayRow],
    status: &str,
    message: &str,
    cursor: (u16, u16),
) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(rows.len() * 64);
    queue!(buf, Hide, MoveTo(0, 0))?;
    for row in rows {
        buf.write_all(row.as_bytes())?;
        queue!(buf, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
    }
    queue!(
        buf,
        SetAttribute(Attribute::Reverse),
        Print(status),
        SetAttribute(Attribute::Reset),
        Clear(ClearType::UntilNewLine),
        Print("\r\n"),
        Print(message),
        Clear(ClearType::UntilNewLine),
        MoveTo(cursor.0, cursor.1),
        Show,
    )?;
    Ok(buf)
}
