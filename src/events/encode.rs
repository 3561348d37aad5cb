//! events/encode — кодирование и разбор строк event log.
//!
//! Формат (одна строка на событие):
//! - put:    "P:key:value\n" (value — остаток строки, может содержать ':')
//! - delete: "D:key\n"
//!
//! Разбор толерантен: завершающие '\r'/'\n' срезаются, неизвестные теги
//! возвращаются как EventLine::Unknown (реплей их пропускает).

use std::io::{self, Write};

use crate::consts::{EVENT_TAG_DELETE, EVENT_TAG_PUT, FIELD_SEP};
use crate::util::strip_line_end;

use super::Event;

/// Закодировать событие в строку (с завершающим '\n').
pub fn encode_event(event: &Event<'_>) -> String {
    match *event {
        Event::Put { key, value } => {
            format!("{EVENT_TAG_PUT}{FIELD_SEP}{key}{FIELD_SEP}{value}\n")
        }
        Event::Delete { key } => format!("{EVENT_TAG_DELETE}{FIELD_SEP}{key}\n"),
    }
}

/// Записать одну строку события в текущую позицию writer'а.
pub fn write_event<W: Write>(writer: &mut W, event: &Event<'_>) -> io::Result<()> {
    writer.write_all(encode_event(event).as_bytes())
}

/// Результат разбора одной строки лога.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventLine<'a> {
    Event(Event<'a>),
    /// Пустая строка (например, хвост после последнего '\n').
    Blank,
    /// Тег, отличный от 'P'/'D' — игнорируется.
    Unknown(&'a str),
    /// Известный тег без обязательных полей.
    Malformed,
}

pub fn parse_event_line(line: &str) -> EventLine<'_> {
    let line = strip_line_end(line);
    if line.is_empty() {
        return EventLine::Blank;
    }

    let (tag, rest) = match line.split_once(FIELD_SEP) {
        Some(parts) => parts,
        None => return EventLine::Unknown(line),
    };

    match single_char(tag) {
        Some(EVENT_TAG_PUT) => match rest.split_once(FIELD_SEP) {
            Some((key, value)) if !key.is_empty() => EventLine::Event(Event::Put { key, value }),
            _ => EventLine::Malformed,
        },
        Some(EVENT_TAG_DELETE) if !rest.is_empty() => {
            EventLine::Event(Event::Delete { key: rest })
        }
        Some(EVENT_TAG_DELETE) => EventLine::Malformed,
        _ => EventLine::Unknown(tag),
    }
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
