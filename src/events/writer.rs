//! events/writer — запись event log.
//!
//! Каждый append открывает файл в режиме append, пишет одну строку, делает
//! flush и закрывает хэндл. Постоянный дескриптор между операциями не держим:
//! строка долговечна к моменту возврата из append.

use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{StoreError, StoreResult};

use super::encode::write_event;
use super::{Event, EventSink};

#[derive(Debug, Clone)]
pub struct EventLog {
    path: PathBuf,
}

impl EventLog {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// open(append) → write → flush → close.
    pub fn append_event(&self, event: &Event<'_>) -> StoreResult<()> {
        let mut f = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StoreError::event_log(&self.path, e))?;
        write_event(&mut f, event).map_err(|e| StoreError::event_log(&self.path, e))?;
        f.flush().map_err(|e| StoreError::event_log(&self.path, e))?;
        Ok(())
    }

    /// Удалить лог после успешного snapshot'а. Отсутствующий файл — не ошибка.
    pub fn clear(&self) -> StoreResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("event log {} removed", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::event_log(&self.path, e)),
        }
    }
}

impl EventSink for EventLog {
    fn append(&mut self, event: Event<'_>) -> StoreResult<()> {
        self.append_event(&event)
    }
}
