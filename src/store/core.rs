//! store/core — структура Store, initialize() и базовые аксессоры.

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::events::EventLog;
use crate::table::{Table, TableLimits};

/// Единственный владелец таблицы и путей persistence.
#[derive(Debug)]
pub struct Store {
    pub(crate) cfg: StoreConfig,
    pub(crate) table: Table,
    pub(crate) log: EventLog,
}

impl Store {
    /// Пустое хранилище с initial_capacity слотов; файлы не трогаются.
    /// Ошибка аллокации здесь фатальна для процесса (вызывающий решает).
    pub fn initialize(cfg: StoreConfig) -> StoreResult<Self> {
        cfg.validate()?;
        let table = Table::with_capacity(cfg.initial_capacity, TableLimits::from(&cfg))?;
        let log = EventLog::new(cfg.events_path.clone());
        Ok(Self { cfg, table, log })
    }

    pub fn config(&self) -> &StoreConfig {
        &self.cfg
    }

    /// Read-only доступ к таблице (диагностика, тесты).
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.table.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }
}
