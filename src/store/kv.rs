//! store/kv — Operation API: put/get/delete/list/stats.
//!
//! Мутации логируются в event log (append на каждую операцию).

use serde::Serialize;

use crate::error::StoreResult;
use crate::table::{PutOutcome, StatsReport};

use super::core::Store;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Живые пары в физическом порядке слотов + текущий count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Listing<'a> {
    pub entries: Vec<Entry<'a>>,
    pub count: usize,
}

impl Store {
    /// Записать ключ/значение (insert или overwrite; оба пишут событие P).
    pub fn put(&mut self, key: &str, value: &str) -> StoreResult<PutOutcome> {
        self.table.put(key, value, &mut self.log)
    }

    /// Получить значение по ключу.
    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.table.get(key)
    }

    /// Удалить ключ; отсутствующий ключ — KeyNotFound.
    pub fn delete(&mut self, key: &str) -> StoreResult<()> {
        self.table.delete(key, &mut self.log)
    }

    pub fn list(&self) -> Listing<'_> {
        Listing {
            entries: self
                .table
                .iter()
                .map(|(key, value)| Entry { key, value })
                .collect(),
            count: self.table.len(),
        }
    }

    pub fn stats(&self) -> StatsReport {
        self.table.stats()
    }
}
