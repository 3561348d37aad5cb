//! Перестроение (rehash) таблицы под удвоенную ёмкость.
//!
//! Требования:
//! - новый буфер выделяется до любых изменений: при AllocationFailed таблица
//!   остаётся в прежнем состоянии;
//! - переносятся только Filled слоты, tombstone'ы отбрасываются;
//! - статистика проб при переносе не учитывается.

use log::info;

use crate::consts::GROWTH_FACTOR;
use crate::error::{StoreError, StoreResult};
use crate::hash::bucket_of_key_default;

use super::slot::Slot;
use super::{alloc_slots, Table};

impl Table {
    /// Проекция usage после вставки ещё одной записи превышает порог?
    /// Целочисленно: (count + 1) * 100 > capacity * threshold.
    #[inline]
    pub(crate) fn needs_resize(&self) -> bool {
        let projected = (self.count + 1).saturating_mul(100);
        projected > self.capacity().saturating_mul(self.limits.resize_threshold_percent)
    }

    pub(crate) fn resize(&mut self) -> StoreResult<()> {
        let old_cap = self.capacity();
        let new_cap = old_cap
            .checked_mul(GROWTH_FACTOR)
            .ok_or(StoreError::AllocationFailed { capacity: usize::MAX })?;

        let fresh = alloc_slots(new_cap, self.limits.max_capacity)?;
        info!("resizing table capacity {} -> {}", old_cap, new_cap);

        let old = std::mem::replace(&mut self.slots, fresh);
        let dropped = old.iter().filter(|s| s.is_deleted()).count();
        self.count = 0;

        for slot in old {
            if let Slot::Filled { key, value } = slot {
                self.place_rehashed(key, value);
            }
        }

        if dropped > 0 {
            info!("resize dropped {} tombstone(s), live={}", dropped, self.count);
        }
        Ok(())
    }

    /// В новом буфере нет tombstone'ов и дубликатов — первый не-Filled слот.
    fn place_rehashed(&mut self, key: String, value: String) {
        let cap = self.capacity();
        let home = bucket_of_key_default(key.as_bytes(), cap);
        for offset in 0..cap {
            let idx = (home + offset) % cap;
            if !self.slots[idx].is_filled() {
                self.slots[idx] = Slot::Filled { key, value };
                self.count += 1;
                return;
            }
        }
    }
}
