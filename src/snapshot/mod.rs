//! Snapshot — полный дамп живых записей таблицы в текстовый файл.
//!
//! - save_snapshot: truncate-write, строка "key:value" на каждый Filled слот
//!   в физическом порядке, flush + sync_all.
//! - load_snapshot: отсутствующий файл — no-op (первый запуск); каждая строка
//!   применяется через put без логирования; битые строки пропускаются.

use log::{debug, info, warn};
use std::fs::OpenOptions;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::events::NoEvents;
use crate::table::Table;
use crate::util::open_if_exists;

pub mod io;

pub use io::{parse_entry_line, EntryLine};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub loaded: usize,
    /// Строки без ':', не-UTF-8 или отклонённые put (лимиты и т.п.).
    pub skipped: usize,
}

/// Записать snapshot; возвращает число записанных пар.
pub fn save_snapshot(table: &Table, path: &Path) -> StoreResult<usize> {
    let f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| StoreError::snapshot(path, e))?;
    let mut w = BufWriter::new(f);

    let mut written = 0usize;
    for (key, value) in table.iter() {
        io::write_entry(&mut w, key, value).map_err(|e| StoreError::snapshot(path, e))?;
        written += 1;
    }

    let f = w
        .into_inner()
        .map_err(|e| StoreError::snapshot(path, e.into_error()))?;
    f.sync_all().map_err(|e| StoreError::snapshot(path, e))?;

    info!("snapshot saved: {} entries -> {}", written, path.display());
    Ok(written)
}

/// Загрузить snapshot в таблицу (put без логирования событий).
pub fn load_snapshot(table: &mut Table, path: &Path) -> StoreResult<LoadReport> {
    let mut report = LoadReport::default();

    let reader = match open_if_exists(path).map_err(|e| StoreError::snapshot(path, e))? {
        Some(r) => r,
        None => {
            debug!("load_snapshot: {} not found, starting empty", path.display());
            return Ok(report);
        }
    };

    for (line_no, chunk) in reader.split(b'\n').enumerate() {
        let bytes = chunk.map_err(|e| StoreError::snapshot(path, e))?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(s) => s,
            Err(_) => {
                warn!("load_snapshot: line {} is not valid UTF-8, skip", line_no + 1);
                report.skipped += 1;
                continue;
            }
        };

        let (key, value) = match parse_entry_line(line) {
            EntryLine::Entry { key, value } => (key, value),
            EntryLine::Blank => continue,
            EntryLine::Malformed => {
                warn!("load_snapshot: line {} has no ':' delimiter, skip", line_no + 1);
                report.skipped += 1;
                continue;
            }
        };

        match table.put(key, value, &mut NoEvents) {
            Ok(_) => report.loaded += 1,
            Err(e @ StoreError::AllocationFailed { .. }) => return Err(e),
            Err(e) => {
                warn!("load_snapshot: line {} rejected: {}", line_no + 1, e);
                report.skipped += 1;
            }
        }
    }

    info!(
        "snapshot loaded: {} entries, skipped {} from {}",
        report.loaded,
        report.skipped,
        path.display()
    );
    Ok(report)
}
