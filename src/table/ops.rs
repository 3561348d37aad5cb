//! Операции с KV на таблице: put/get/delete/list и учёт статистики проб.
//!
//! Дисциплина пробирования (общая для всех операций):
//! - старт с home = hash(key) % capacity, шаг +1 с заворотом, не более capacity шагов;
//! - каждое смещение > 0 — коллизия (total_collisions += 1, max_probe_length = max);
//! - Empty останавливает поиск, Deleted — нет (проба идёт дальше tombstone'а).
//!
//! Событие в лог пишется ПОСЛЕ нахождения слота и ДО записи в него: если append
//! упал, содержимое таблицы не меняется.

use crate::error::{StoreError, StoreResult};
use crate::events::{Event, EventSink};
use crate::hash::bucket_of_key_default;

use super::slot::Slot;
use super::Table;

/// Результат успешного put.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutOutcome {
    /// Новый ключ занял Empty/Deleted слот (count + 1).
    Inserted,
    /// Существующий ключ: перезаписано только значение.
    Updated,
}

enum InsertTarget {
    Existing(usize),
    Vacant(usize),
}

impl Table {
    /// Вставка/обновление.
    ///
    /// Порядок: счётчик операций → (возможный) ресайз → проверка длин →
    /// поиск слота → событие → запись. Ошибка ресайза поэтому всплывает
    /// раньше ошибки длины.
    pub fn put(
        &mut self,
        key: &str,
        value: &str,
        events: &mut dyn EventSink,
    ) -> StoreResult<PutOutcome> {
        self.total_operations += 1;

        if self.needs_resize() {
            self.resize()?;
        }

        self.validate_entry(key, value)?;

        let target = self.locate_for_insert(key)?;
        events.append(Event::Put { key, value })?;

        match target {
            InsertTarget::Existing(idx) => {
                if let Slot::Filled { value: slot_value, .. } = &mut self.slots[idx] {
                    slot_value.clear();
                    slot_value.push_str(value);
                }
                Ok(PutOutcome::Updated)
            }
            InsertTarget::Vacant(idx) => {
                self.slots[idx] = Slot::Filled {
                    key: key.to_string(),
                    value: value.to_string(),
                };
                self.count += 1;
                Ok(PutOutcome::Inserted)
            }
        }
    }

    /// Получить значение по ключу (None — обычный "не найдено", не ошибка).
    pub fn get(&mut self, key: &str) -> Option<&str> {
        self.total_operations += 1;
        let idx = self.find_filled(key)?;
        self.slots[idx].entry().map(|(_, v)| v)
    }

    /// Удалить ключ — слот становится tombstone'ом.
    pub fn delete(&mut self, key: &str, events: &mut dyn EventSink) -> StoreResult<()> {
        self.total_operations += 1;

        let idx = self
            .find_filled(key)
            .ok_or_else(|| StoreError::KeyNotFound {
                key: key.to_string(),
            })?;

        events.append(Event::Delete { key })?;

        self.slots[idx] = Slot::Deleted;
        self.count -= 1;
        Ok(())
    }

    /// Все живые пары в физическом порядке слотов.
    pub fn list(&self) -> Vec<(&str, &str)> {
        self.iter().collect()
    }

    // ----------------- приватные помощники -----------------

    fn validate_entry(&self, key: &str, value: &str) -> StoreResult<()> {
        let lim = self.limits;
        if key.len() + 1 > lim.max_key_len {
            return Err(StoreError::KeyTooLong {
                len: key.len(),
                max: lim.max_key_len - 1,
            });
        }
        if value.len() + 1 > lim.max_value_len {
            return Err(StoreError::ValueTooLong {
                len: value.len(),
                max: lim.max_value_len - 1,
            });
        }
        if key.is_empty() {
            return Err(StoreError::InvalidKey { reason: "empty key" });
        }
        if key.contains(crate::consts::FIELD_SEP) {
            return Err(StoreError::InvalidKey {
                reason: "key must not contain ':'",
            });
        }
        if key.contains(['\n', '\r']) {
            return Err(StoreError::InvalidKey {
                reason: "key must not contain line breaks",
            });
        }
        if value.contains(['\n', '\r']) {
            return Err(StoreError::InvalidValue {
                reason: "value must not contain line breaks",
            });
        }
        Ok(())
    }

    /// Учёт одного шага пробы.
    #[inline]
    fn record_probe(&mut self, offset: usize) {
        if offset == 0 {
            return;
        }
        self.total_collisions += 1;
        if offset > self.max_probe_length {
            self.max_probe_length = offset;
        }
    }

    /// Проба для get/delete: Filled с совпавшим ключом или None.
    fn find_filled(&mut self, key: &str) -> Option<usize> {
        let cap = self.capacity();
        let home = bucket_of_key_default(key.as_bytes(), cap);
        for offset in 0..cap {
            self.record_probe(offset);
            let idx = (home + offset) % cap;
            match &self.slots[idx] {
                Slot::Empty => return None,
                s if s.holds_key(key) => return Some(idx),
                _ => {}
            }
        }
        None
    }

    /// Проба для put: совпавший ключ, иначе первый tombstone, иначе Empty.
    /// Проба не останавливается на tombstone'е — иначе тот же ключ дальше
    /// по цепочке получил бы дубликат.
    fn locate_for_insert(&mut self, key: &str) -> StoreResult<InsertTarget> {
        let cap = self.capacity();
        let home = bucket_of_key_default(key.as_bytes(), cap);
        let mut first_tombstone: Option<usize> = None;

        for offset in 0..cap {
            self.record_probe(offset);
            let idx = (home + offset) % cap;
            match &self.slots[idx] {
                Slot::Empty => {
                    return Ok(InsertTarget::Vacant(first_tombstone.unwrap_or(idx)));
                }
                Slot::Deleted => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(idx);
                    }
                }
                s if s.holds_key(key) => return Ok(InsertTarget::Existing(idx)),
                Slot::Filled { .. } => {}
            }
        }

        first_tombstone
            .map(InsertTarget::Vacant)
            .ok_or(StoreError::StoreFull)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{NoEvents, OwnedEvent};
    use crate::table::TableLimits;

    fn table(cap: usize) -> Table {
        Table::with_capacity(cap, TableLimits::default()).unwrap()
    }

    /// Первый ключ вида "{prefix}{n}" с заданным home-бакетом.
    fn key_with_home(prefix: &str, home: usize, cap: usize, skip: &[&str]) -> String {
        (0..10_000)
            .map(|n| format!("{prefix}{n}"))
            .find(|k| bucket_of_key_default(k.as_bytes(), cap) == home && !skip.contains(&k.as_str()))
            .unwrap()
    }

    #[test]
    fn put_get_overwrite_keeps_count() {
        let mut t = table(10);
        let mut log: Vec<OwnedEvent> = Vec::new();
        assert_eq!(t.put("k", "v1", &mut log).unwrap(), PutOutcome::Inserted);
        assert_eq!(t.put("k", "v2", &mut log).unwrap(), PutOutcome::Updated);
        assert_eq!(t.len(), 1);
        assert_eq!(t.get("k"), Some("v2"));
        assert_eq!(
            log,
            vec![
                OwnedEvent::Put("k".into(), "v1".into()),
                OwnedEvent::Put("k".into(), "v2".into()),
            ]
        );
    }

    #[test]
    fn length_limits_exclude_terminator() {
        let mut t = table(10);
        let ok_key = "k".repeat(127);
        let bad_key = "k".repeat(128);
        assert!(t.put(&ok_key, "v", &mut NoEvents).is_ok());
        assert!(matches!(
            t.put(&bad_key, "v", &mut NoEvents),
            Err(StoreError::KeyTooLong { len: 128, max: 127 })
        ));
        let bad_val = "v".repeat(256);
        assert!(matches!(
            t.put("x", &bad_val, &mut NoEvents),
            Err(StoreError::ValueTooLong { len: 256, max: 255 })
        ));
        assert!(t.put("y", &"v".repeat(255), &mut NoEvents).is_ok());
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn rejected_put_does_not_log() {
        let mut t = table(10);
        let mut log: Vec<OwnedEvent> = Vec::new();
        assert!(t.put("a:b", "v", &mut log).is_err());
        assert!(t.put("", "v", &mut log).is_err());
        assert!(t.put("a", "line\nbreak", &mut log).is_err());
        assert!(log.is_empty());
        assert!(t.is_empty());
    }

    #[test]
    fn tombstone_does_not_stop_lookup() {
        let cap = 11;
        let mut t = table(cap);
        let a = key_with_home("a", 3, cap, &[]);
        let b = key_with_home("b", 3, cap, &[]);

        t.put(&a, "1", &mut NoEvents).unwrap();
        t.delete(&a, &mut NoEvents).unwrap();
        t.put(&b, "2", &mut NoEvents).unwrap();

        assert_eq!(t.get(&a), None);
        assert_eq!(t.get(&b), Some("2"));
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn lookup_continues_past_tombstone_to_displaced_key() {
        let cap = 11;
        let mut t = table(cap);
        let a = key_with_home("a", 4, cap, &[]);
        let b = key_with_home("b", 4, cap, &[]);

        t.put(&a, "1", &mut NoEvents).unwrap();
        t.put(&b, "2", &mut NoEvents).unwrap(); // слот 5
        t.delete(&a, &mut NoEvents).unwrap(); // слот 4 -> tombstone

        assert_eq!(t.get(&b), Some("2"));

        // повторный put того же ключа не создаёт дубликат
        assert_eq!(t.put(&b, "3", &mut NoEvents).unwrap(), PutOutcome::Updated);
        assert_eq!(t.len(), 1);
        assert_eq!(t.list(), vec![(b.as_str(), "3")]);
    }

    #[test]
    fn new_key_reuses_first_tombstone() {
        let cap = 11;
        let mut t = table(cap);
        let a = key_with_home("a", 2, cap, &[]);
        let c = key_with_home("c", 2, cap, &[]);

        t.put(&a, "1", &mut NoEvents).unwrap();
        t.delete(&a, &mut NoEvents).unwrap();
        t.put(&c, "3", &mut NoEvents).unwrap();

        assert!(t.slots()[2].holds_key(&c));
        assert_eq!(t.tombstones(), 0);
    }

    #[test]
    fn delete_missing_key_is_error_and_keeps_count() {
        let mut t = table(10);
        t.put("x", "1", &mut NoEvents).unwrap();
        let mut log: Vec<OwnedEvent> = Vec::new();
        let err = t.delete("nope", &mut log).unwrap_err();
        assert!(matches!(err, StoreError::KeyNotFound { .. }));
        assert_eq!(t.len(), 1);
        assert!(log.is_empty());

        t.delete("x", &mut log).unwrap();
        assert!(matches!(
            t.delete("x", &mut log),
            Err(StoreError::KeyNotFound { .. })
        ));
        assert_eq!(t.len(), 0);
        assert_eq!(log, vec![OwnedEvent::Delete("x".into())]);
    }

    #[test]
    fn probe_statistics_track_offsets() {
        let cap = 11;
        let mut t = table(cap);
        let k0 = key_with_home("k", 6, cap, &[]);
        let k1 = key_with_home("k", 6, cap, &[&k0]);
        let k2 = key_with_home("k", 6, cap, &[&k0, &k1]);

        t.put(&k0, "0", &mut NoEvents).unwrap(); // offset 0
        t.put(&k1, "1", &mut NoEvents).unwrap(); // offsets 0,1
        t.put(&k2, "2", &mut NoEvents).unwrap(); // offsets 0,1,2

        let st = t.stats();
        let s = st.collected().unwrap();
        assert_eq!(s.total_operations, 3);
        assert_eq!(s.total_collisions, 3);
        assert_eq!(s.max_probe_length, 2);

        assert_eq!(t.get(&k2), Some("2")); // ещё 2 коллизии
        let s = t.stats();
        let s = s.collected().unwrap();
        assert_eq!(s.total_collisions, 5);
        assert_eq!(s.total_operations, 4);
    }

    #[test]
    fn full_table_without_tombstones_fails_safely() {
        // порог 100% отключает ресайз до (count+1) > capacity
        let limits = TableLimits {
            resize_threshold_percent: 100,
            ..TableLimits::default()
        };
        let mut t = Table::with_capacity(3, limits).unwrap();
        t.put("a", "1", &mut NoEvents).unwrap();
        t.put("b", "2", &mut NoEvents).unwrap();
        t.put("c", "3", &mut NoEvents).unwrap();
        assert_eq!(t.len(), 3);
        assert_eq!(t.capacity(), 3);

        // get/delete на полной таблице обходят все слоты и завершаются
        assert_eq!(t.get("zzz"), None);
        assert!(t.delete("zzz", &mut NoEvents).is_err());

        // проекция (3+1)/3 > 100% -> ресайз до 6 даже для обновления
        t.put("a", "9", &mut NoEvents).unwrap();
        assert_eq!(t.capacity(), 6);
        assert_eq!(t.get("a"), Some("9"));
    }

    #[test]
    fn exhausted_probe_reports_store_full() {
        let mut t = table(4);
        for (i, slot) in t.slots.iter_mut().enumerate() {
            *slot = Slot::Filled {
                key: format!("f{i}"),
                value: String::new(),
            };
        }
        t.count = 4;

        assert!(matches!(
            t.locate_for_insert("new"),
            Err(StoreError::StoreFull)
        ));
        // существующий ключ находится и в полной таблице
        assert!(matches!(
            t.locate_for_insert("f2"),
            Ok(InsertTarget::Existing(2))
        ));
    }

    #[test]
    fn put_on_saturated_table_reports_store_full() {
        let mut t = table(4);
        for (i, slot) in t.slots.iter_mut().enumerate() {
            *slot = Slot::Filled {
                key: format!("f{i}"),
                value: String::new(),
            };
        }
        // count ниже реального заполнения, чтобы put не ушёл в ресайз
        t.count = 1;
        let mut log: Vec<OwnedEvent> = Vec::new();

        assert!(matches!(
            t.put("new", "v", &mut log),
            Err(StoreError::StoreFull)
        ));
        assert!(log.is_empty());
        assert_eq!(t.capacity(), 4);
        assert_eq!(t.count, 1);
        assert!(t.slots().iter().all(|s| !s.holds_key("new")));
        assert_eq!(t.stats().collected().unwrap().total_operations, 1);

        // совпавший ключ в насыщенной таблице обновляется
        assert_eq!(t.put("f2", "x", &mut log).unwrap(), PutOutcome::Updated);
        assert_eq!(t.get("f2"), Some("x"));
    }

    #[test]
    fn list_is_physical_slot_order() {
        let mut t = table(50);
        for k in ["x", "y", "z", "alpha", "beta"] {
            t.put(k, k, &mut NoEvents).unwrap();
        }
        let listed: Vec<&str> = t.list().into_iter().map(|(k, _)| k).collect();
        let physical: Vec<&str> = t
            .slots()
            .iter()
            .filter_map(Slot::entry)
            .map(|(k, _)| k)
            .collect();
        assert_eq!(listed, physical);
        assert_eq!(listed.len(), 5);
    }
}
