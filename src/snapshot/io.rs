//! Line I/O helpers for the snapshot file.
//!
//! Layout: one "key:value\n" line per live entry. The first ':' is the
//! delimiter, so values may contain ':' but keys may not.

use std::io::{self, Write};

use crate::consts::FIELD_SEP;
use crate::util::strip_line_end;

pub(crate) fn write_entry<W: Write>(w: &mut W, key: &str, value: &str) -> io::Result<()> {
    writeln!(w, "{key}{FIELD_SEP}{value}")
}

/// Парсинг строки snapshot'а.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryLine<'a> {
    Entry { key: &'a str, value: &'a str },
    Blank,
    /// Нет ':' — строку пропускаем.
    Malformed,
}

pub fn parse_entry_line(line: &str) -> EntryLine<'_> {
    let line = strip_line_end(line);
    if line.is_empty() {
        return EntryLine::Blank;
    }
    match line.split_once(FIELD_SEP) {
        Some((key, value)) => EntryLine::Entry { key, value },
        None => EntryLine::Malformed,
    }
}
