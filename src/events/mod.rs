//! Event log (append-only WAL мутаций) — текстовый формат.
//!
//! Разделение:
//! - encode.rs — кодирование/разбор строк "P:key:value" и "D:key".
//! - writer.rs — EventLog: open/append/flush/close на КАЖДЫЙ вызов, очистка лога.
//! - replay.rs — реплей лога поверх загруженного snapshot'а (replay_events).
//!
//! В этом модуле (mod.rs) лежат:
//! - тип события Event и его owned-вариант OwnedEvent,
//! - seam EventSink, через который таблица сообщает о мутациях,
//! - NoEvents — sink для загрузки snapshot'а и реплея (события не пишутся повторно).

use crate::error::StoreResult;

pub mod encode;
pub mod replay;
pub mod writer;

pub use encode::{encode_event, parse_event_line, write_event, EventLine};
pub use replay::{replay_events, ReplayReport};
pub use writer::EventLog;

/// Одна мутирующая операция.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event<'a> {
    Put { key: &'a str, value: &'a str },
    Delete { key: &'a str },
}

impl<'a> Event<'a> {
    pub fn to_owned_event(&self) -> OwnedEvent {
        match *self {
            Event::Put { key, value } => OwnedEvent::Put(key.to_string(), value.to_string()),
            Event::Delete { key } => OwnedEvent::Delete(key.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnedEvent {
    Put(String, String),
    Delete(String),
}

/// Приёмник событий. Ошибка append отменяет операцию до изменения таблицы.
pub trait EventSink {
    fn append(&mut self, event: Event<'_>) -> StoreResult<()>;
}

/// Мутации не логируются (загрузка snapshot'а, реплей).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEvents;

impl EventSink for NoEvents {
    #[inline]
    fn append(&mut self, _event: Event<'_>) -> StoreResult<()> {
        Ok(())
    }
}

/// In-memory sink (тесты, отладка).
impl EventSink for Vec<OwnedEvent> {
    fn append(&mut self, event: Event<'_>) -> StoreResult<()> {
        self.push(event.to_owned_event());
        Ok(())
    }
}
