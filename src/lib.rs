#![allow(non_snake_case)]

// Базовые модули
pub mod consts;
pub mod config;
pub mod error;
pub mod hash;

// Ядро: хэш-таблица с открытой адресацией
pub mod table; // src/table/{mod,slot,ops,resize,stats}.rs

// Persistence
pub mod events;   // src/events/{mod,encode,writer,replay}.rs
pub mod snapshot; // src/snapshot/{mod,io}.rs

// Operation API
pub mod store; // src/store/{mod,core,open,kv}.rs

// Текстовая оболочка (внешний потребитель Operation API)
pub mod shell;

// Утилиты (strip_line_end, open_if_exists)
pub mod util;

// Удобные реэкспорты
pub use config::{StoreBuilder, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use events::{Event, EventLog, EventSink, NoEvents};
pub use snapshot::{load_snapshot, save_snapshot};
pub use events::replay_events;
pub use store::{Listing, StartupReport, Store};
pub use table::{PutOutcome, Slot, StatsReport, Table, TableLimits, TableStats};
