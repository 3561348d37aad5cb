//! Интерактивная командная оболочка поверх Operation API.
//!
//! Словарь (регистр не важен, по номеру или имени):
//!   (0) GET key | (1) PUT key value | (2) DELETE key | (3) LIST | (4) STATS | (5) QUIT
//!
//! Здесь нет бизнес-логики: результаты и ошибки Store печатаются как есть.

use anyhow::Result;
use std::io::{BufRead, Write};
use thiserror::Error;

use crate::store::Store;
use crate::table::StatsReport;

#[derive(Debug, Clone, Copy)]
pub struct CommandDef {
    pub id: &'static str,
    pub name: &'static str,
    pub usage: &'static str,
}

pub const GET_CMD: CommandDef = CommandDef { id: "0", name: "GET", usage: "GET <key>" };
pub const PUT_CMD: CommandDef = CommandDef { id: "1", name: "PUT", usage: "PUT <key> <value>" };
pub const DEL_CMD: CommandDef = CommandDef { id: "2", name: "DELETE", usage: "DELETE <key>" };
pub const LIST_CMD: CommandDef = CommandDef { id: "3", name: "LIST", usage: "LIST" };
pub const STATS_CMD: CommandDef = CommandDef { id: "4", name: "STATS", usage: "STATS" };
pub const QUIT_CMD: CommandDef = CommandDef { id: "5", name: "QUIT", usage: "QUIT" };

pub const COMMANDS: [CommandDef; 6] = [GET_CMD, PUT_CMD, DEL_CMD, LIST_CMD, STATS_CMD, QUIT_CMD];

impl CommandDef {
    pub fn matches(&self, word: &str) -> bool {
        word.eq_ignore_ascii_case(self.id) || word.eq_ignore_ascii_case(self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Get { key: String },
    Put { key: String, value: String },
    Delete { key: String },
    List,
    Stats,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Usage: {0}")]
    Usage(&'static str),
    #[error("Invalid action")]
    Invalid,
    #[error("empty input")]
    Empty,
}

/// Первое слово и остаток (без ведущих пробелов).
fn next_word(s: &str) -> Option<(&str, &str)> {
    let s = s.trim_start();
    if s.is_empty() {
        return None;
    }
    match s.split_once(char::is_whitespace) {
        Some((w, rest)) => Some((w, rest.trim_start())),
        None => Some((s, "")),
    }
}

impl Command {
    /// Токенизация строки ввода. Значение PUT — остаток строки после ключа.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let (word, rest) = next_word(line).ok_or(ParseError::Empty)?;

        if GET_CMD.matches(word) {
            let (key, _) = next_word(rest).ok_or(ParseError::Usage(GET_CMD.usage))?;
            return Ok(Command::Get { key: key.to_string() });
        }
        if PUT_CMD.matches(word) {
            let (key, value) = next_word(rest).ok_or(ParseError::Usage(PUT_CMD.usage))?;
            let value = value.trim_end();
            if value.is_empty() {
                return Err(ParseError::Usage(PUT_CMD.usage));
            }
            return Ok(Command::Put {
                key: key.to_string(),
                value: value.to_string(),
            });
        }
        if DEL_CMD.matches(word) {
            let (key, _) = next_word(rest).ok_or(ParseError::Usage(DEL_CMD.usage))?;
            return Ok(Command::Delete { key: key.to_string() });
        }
        if LIST_CMD.matches(word) {
            return Ok(Command::List);
        }
        if STATS_CMD.matches(word) {
            return Ok(Command::Stats);
        }
        if QUIT_CMD.matches(word) {
            return Ok(Command::Quit);
        }
        Err(ParseError::Invalid)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub fn print_menu<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out)?;
    for def in COMMANDS.iter() {
        writeln!(out, "({}) {}", def.id, def.usage.replace('<', "").replace('>', ""))?;
    }
    write!(out, "\n> ")?;
    out.flush()?;
    Ok(())
}

pub fn print_listing<W: Write>(store: &Store, out: &mut W) -> Result<()> {
    let listing = store.list();
    writeln!(out, "Stored pairs:\n")?;
    for e in &listing.entries {
        writeln!(out, "{}:{}", e.key, e.value)?;
    }
    writeln!(out, "\nCount: {}", listing.count)?;
    Ok(())
}

pub fn print_stats<W: Write>(report: &StatsReport, out: &mut W) -> Result<()> {
    match report {
        StatsReport::NoOperationsYet => writeln!(out, "No operations yet")?,
        StatsReport::Collected(s) => {
            writeln!(out, "Usage: {:.0}%", s.usage_percent)?;
            writeln!(out, "Average Probes: {:.2}", s.average_probes)?;
            writeln!(out, "Total Operations: {}", s.total_operations)?;
            writeln!(out, "Total Collisions: {}", s.total_collisions)?;
            writeln!(out, "Max Probe Length: {}", s.max_probe_length)?;
        }
    }
    Ok(())
}

/// Выполнить одну команду; ошибки Store печатаются и не прерывают сессию.
pub fn execute<W: Write>(store: &mut Store, cmd: &Command, out: &mut W) -> Result<Flow> {
    match cmd {
        Command::Get { key } => match store.get(key) {
            Some(v) => writeln!(out, "{v}")?,
            None => writeln!(out, "Key not found")?,
        },
        Command::Put { key, value } => match store.put(key, value) {
            Ok(_) => writeln!(out, "Value saved!")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::Delete { key } => match store.delete(key) {
            Ok(()) => writeln!(out, "Value deleted!")?,
            Err(crate::error::StoreError::KeyNotFound { .. }) => writeln!(out, "Key not found")?,
            Err(e) => writeln!(out, "{e}")?,
        },
        Command::List => print_listing(store, out)?,
        Command::Stats => print_stats(&store.stats(), out)?,
        Command::Quit => {
            writeln!(out, "\nGoodbye!")?;
            return Ok(Flow::Quit);
        }
    }
    Ok(Flow::Continue)
}

/// Главный цикл: меню → строка → команда. EOF завершает как QUIT.
pub fn run<R: BufRead, W: Write>(store: &mut Store, mut input: R, out: &mut W) -> Result<()> {
    writeln!(out, "\nWelcome to the Key-Value Store!")?;

    let mut line = String::new();
    loop {
        print_menu(out)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out, "\nGoodbye!")?;
            break;
        }

        let cmd = match Command::parse(&line) {
            Ok(cmd) => cmd,
            Err(ParseError::Empty) => continue,
            Err(e) => {
                writeln!(out, "{e}")?;
                continue;
            }
        };

        if execute(store, &cmd, out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
