//! Снимок статистики таблицы.

use serde::Serialize;

use super::Table;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TableStats {
    pub capacity: usize,
    pub count: usize,
    /// count / capacity * 100
    pub usage_percent: f64,
    /// total_collisions / total_operations
    pub average_probes: f64,
    pub total_operations: u64,
    pub total_collisions: u64,
    pub max_probe_length: usize,
}

/// "No operations yet" — отдельное состояние, не ошибка.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum StatsReport {
    NoOperationsYet,
    Collected(TableStats),
}

impl StatsReport {
    pub fn collected(&self) -> Option<TableStats> {
        match self {
            StatsReport::Collected(s) => Some(*s),
            StatsReport::NoOperationsYet => None,
        }
    }
}

impl Table {
    /// Put проходит дальше tombstone'ов до Empty или совпавшего ключа, поэтому на
    /// нагрузке с удалениями total_collisions и max_probe_length выше, чем при
    /// вставке в первый не-Filled слот.
    pub fn stats(&self) -> StatsReport {
        if self.total_operations == 0 {
            return StatsReport::NoOperationsYet;
        }
        let capacity = self.capacity();
        StatsReport::Collected(TableStats {
            capacity,
            count: self.count,
            usage_percent: self.count as f64 * 100.0 / capacity as f64,
            average_probes: self.total_collisions as f64 / self.total_operations as f64,
            total_operations: self.total_operations,
            total_collisions: self.total_collisions,
            max_probe_length: self.max_probe_length,
        })
    }
}
