//! store — high-level Operation API поверх table + persistence.
//!
//! Разделение по подмодулям:
//! - core.rs — тип Store, initialize(), аксессоры
//! - open.rs — open/startup (snapshot + replay), shutdown (snapshot + очистка лога)
//! - kv.rs   — put/get/delete/list/stats

pub mod core;
pub mod kv;
pub mod open;

pub use core::Store;
pub use kv::{Entry, Listing};
pub use open::StartupReport;
