//! Типизированные ошибки операций хранилища.
//!
//! Все ошибки локальны для одной операции. Фатальна только ошибка
//! аллокации при построении начальной таблицы (Store::initialize).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key length {len} exceeds the max of {max} chars")]
    KeyTooLong { len: usize, max: usize },

    #[error("value length {len} exceeds the max of {max} chars")]
    ValueTooLong { len: usize, max: usize },

    #[error("invalid key: {reason}")]
    InvalidKey { reason: &'static str },

    #[error("invalid value: {reason}")]
    InvalidValue { reason: &'static str },

    /// Вся ёмкость пробирована без совпадения и без свободного слота.
    #[error("store is full")]
    StoreFull,

    #[error("failed to allocate table of capacity {capacity}")]
    AllocationFailed { capacity: usize },

    #[error("key not found: '{key}'")]
    KeyNotFound { key: String },

    #[error("invalid config: {reason}")]
    InvalidConfig { reason: String },

    #[error("event log {}: {source}", path.display())]
    EventLog {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {}: {source}", path.display())]
    Snapshot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn event_log(path: &std::path::Path, source: io::Error) -> Self {
        StoreError::EventLog {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn snapshot(path: &std::path::Path, source: io::Error) -> Self {
        StoreError::Snapshot {
            path: path.to_path_buf(),
            source,
        }
    }
}
