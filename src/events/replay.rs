use log::{debug, info, warn};
use std::io::BufRead;
use std::path::Path;

use crate::error::{StoreError, StoreResult};
use crate::table::Table;
use crate::util::open_if_exists;

use super::encode::{parse_event_line, EventLine};
use super::{Event, NoEvents};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayReport {
    /// Успешно применённые события.
    pub applied: usize,
    /// Применение вернуло ошибку (например, KeyNotFound для D поверх snapshot'а).
    pub failed: usize,
    /// Неизвестные теги, битые строки, не-UTF-8.
    pub skipped: usize,
}

/// Реплей лога поверх текущего состояния таблицы, по порядку строк.
///
/// - Лога нет — no-op (первый запуск / после чистого shutdown).
/// - События применяются без повторного логирования (NoEvents).
/// - Ошибки отдельных событий не прерывают реплей; прерывает только I/O
///   и AllocationFailed.
pub fn replay_events(table: &mut Table, path: &Path) -> StoreResult<ReplayReport> {
    let mut report = ReplayReport::default();

    let reader = match open_if_exists(path).map_err(|e| StoreError::event_log(path, e))? {
        Some(r) => r,
        None => {
            debug!("replay_events: event log not found at {}, nothing to do", path.display());
            return Ok(report);
        }
    };

    for (line_no, chunk) in reader.split(b'\n').enumerate() {
        let bytes = chunk.map_err(|e| StoreError::event_log(path, e))?;
        let line = match std::str::from_utf8(&bytes) {
            Ok(s) => s,
            Err(_) => {
                warn!("replay_events: line {} is not valid UTF-8, skip", line_no + 1);
                report.skipped += 1;
                continue;
            }
        };

        let event = match parse_event_line(line) {
            EventLine::Event(ev) => ev,
            EventLine::Blank => continue,
            EventLine::Unknown(tag) => {
                debug!("replay_events: skip unknown tag '{}' at line {}", tag, line_no + 1);
                report.skipped += 1;
                continue;
            }
            EventLine::Malformed => {
                warn!("replay_events: malformed line {}, skip", line_no + 1);
                report.skipped += 1;
                continue;
            }
        };

        let res = match event {
            Event::Put { key, value } => table.put(key, value, &mut NoEvents).map(|_| ()),
            Event::Delete { key } => table.delete(key, &mut NoEvents),
        };

        match res {
            Ok(()) => report.applied += 1,
            Err(e @ StoreError::AllocationFailed { .. }) => return Err(e),
            Err(e) => {
                warn!("replay_events: line {} not applied: {}", line_no + 1, e);
                report.failed += 1;
            }
        }
    }

    if report.applied > 0 {
        info!(
            "event replay: applied {} event(s), failed {}, skipped {}",
            report.applied, report.failed, report.skipped
        );
    } else {
        debug!("event replay: nothing to apply");
    }
    Ok(report)
}
