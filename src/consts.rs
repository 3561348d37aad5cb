//! Общие константы: лимиты, файлы, формат строк snapshot/event log.

// -------- Limits --------
// Длины указаны с учётом терминатора: полезная длина = MAX_*_LEN - 1.
pub const MAX_KEY_LEN: usize = 128;
pub const MAX_VALUE_LEN: usize = 256;

// -------- Table --------
pub const INITIAL_CAPACITY: usize = 5;
// Ресайз, когда (count + 1) / capacity превышает порог (в процентах).
pub const RESIZE_THRESHOLD_PERCENT: usize = 70;
pub const GROWTH_FACTOR: usize = 2;
// Бюджет слотов: рост сверх него — AllocationFailed. По умолчанию без ограничения.
pub const MAX_CAPACITY: usize = usize::MAX;

// -------- Files --------
pub const STORE_FILE: &str = "store.db";
pub const EVENTS_FILE: &str = "events.log";

// -------- Line format --------
// snapshot: "key:value\n"
// events:   "P:key:value\n" | "D:key\n"
pub const FIELD_SEP: char = ':';
pub const EVENT_TAG_PUT: char = 'P';
pub const EVENT_TAG_DELETE: char = 'D';
