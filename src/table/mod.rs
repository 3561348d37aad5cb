//! table — хэш-таблица с открытой адресацией (linear probing) и tombstone'ами.
//!
//! Разделение:
//! - slot.rs   — тип Slot (Empty/Filled/Deleted).
//! - ops.rs    — put/get/delete/list, учёт коллизий и длины пробы.
//! - resize.rs — удвоение ёмкости и rehash живых записей (tombstone'ы отбрасываются).
//! - stats.rs  — снимок статистики (usage, average probes, ...).
//!
//! Инварианты:
//! - count <= capacity; count == число Filled слотов.
//! - ключи уникальны (точное, регистрозависимое сравнение).
//! - массив слотов никогда не растёт на месте: ресайз строит новый буфер.

use crate::config::StoreConfig;
use crate::consts::{MAX_CAPACITY, MAX_KEY_LEN, MAX_VALUE_LEN, RESIZE_THRESHOLD_PERCENT};
use crate::error::{StoreError, StoreResult};

pub mod ops;
pub mod resize;
pub mod slot;
pub mod stats;

pub use ops::PutOutcome;
pub use slot::Slot;
pub use stats::{StatsReport, TableStats};

/// Лимиты, которые таблица проверяет на каждой вставке.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLimits {
    pub max_key_len: usize,
    pub max_value_len: usize,
    pub resize_threshold_percent: usize,
    /// Бюджет слотов для with_capacity/resize.
    pub max_capacity: usize,
}

impl Default for TableLimits {
    fn default() -> Self {
        Self {
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
            resize_threshold_percent: RESIZE_THRESHOLD_PERCENT,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl From<&StoreConfig> for TableLimits {
    fn from(cfg: &StoreConfig) -> Self {
        Self {
            max_key_len: cfg.max_key_len,
            max_value_len: cfg.max_value_len,
            resize_threshold_percent: cfg.resize_threshold_percent,
            max_capacity: cfg.max_capacity,
        }
    }
}

#[derive(Debug)]
pub struct Table {
    slots: Vec<Slot>,
    count: usize,
    total_operations: u64,
    total_collisions: u64,
    max_probe_length: usize,
    limits: TableLimits,
}

impl Table {
    /// Пустая таблица заданной ёмкости. Ошибка аллокации — AllocationFailed.
    pub fn with_capacity(capacity: usize, limits: TableLimits) -> StoreResult<Self> {
        if capacity == 0 {
            return Err(StoreError::InvalidConfig {
                reason: "table capacity must be > 0".into(),
            });
        }
        Ok(Self {
            slots: alloc_slots(capacity, limits.max_capacity)?,
            count: 0,
            total_operations: 0,
            total_collisions: 0,
            max_probe_length: 0,
            limits,
        })
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Число живых записей.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Физический массив слотов (для диагностики и тестов).
    #[inline]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Живые пары в физическом порядке слотов.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slots.iter().filter_map(Slot::entry)
    }

    pub fn tombstones(&self) -> usize {
        self.slots.iter().filter(|s| s.is_deleted()).count()
    }
}

/// Выделить all-Empty буфер без паники при нехватке памяти.
/// Запрос сверх бюджета max_capacity — тоже AllocationFailed.
pub(crate) fn alloc_slots(capacity: usize, max_capacity: usize) -> StoreResult<Vec<Slot>> {
    if capacity > max_capacity {
        return Err(StoreError::AllocationFailed { capacity });
    }
    let mut slots: Vec<Slot> = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| StoreError::AllocationFailed { capacity })?;
    slots.resize_with(capacity, Slot::default);
    Ok(slots)
}
