//! Centralized configuration and builder for LinearDB.
//!
//! Goals:
//! - Single place to collect tunables (paths, limits, resize threshold)
//!   instead of ambient globals.
//! - StoreConfig::from_env() overlays LDB_* env vars on top of defaults.
//! - StoreBuilder returns a StoreConfig, which Store consumes explicitly.
//!
//! Defaults come from crate::consts:
//! - store_path = "store.db", events_path = "events.log"
//! - initial_capacity = 5, resize_threshold_percent = 70
//! - max_key_len = 128, max_value_len = 256 (usable length is one less)
//! - max_capacity = unbounded (growth past it fails with AllocationFailed)

use std::fmt;
use std::path::PathBuf;

use crate::consts::{
    EVENTS_FILE, INITIAL_CAPACITY, MAX_CAPACITY, MAX_KEY_LEN, MAX_VALUE_LEN,
    RESIZE_THRESHOLD_PERCENT, STORE_FILE,
};
use crate::error::{StoreError, StoreResult};
use crate::store::Store;

/// Top-level configuration for a Store.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    /// Snapshot file ("key:value" lines).
    /// Env: LDB_STORE_PATH (default "store.db")
    pub store_path: PathBuf,

    /// Append-only event log ("P:key:value" / "D:key" lines).
    /// Env: LDB_EVENTS_PATH (default "events.log")
    pub events_path: PathBuf,

    /// Slots allocated by initialize().
    /// Env: LDB_INITIAL_CAPACITY (default 5)
    pub initial_capacity: usize,

    /// Key buffer size including the terminator; usable length is max_key_len - 1.
    /// Env: LDB_MAX_KEY_LEN (default 128)
    pub max_key_len: usize,

    /// Value buffer size including the terminator; usable length is max_value_len - 1.
    /// Env: LDB_MAX_VALUE_LEN (default 256)
    pub max_value_len: usize,

    /// Grow when projected usage (count + 1) / capacity exceeds this percentage.
    /// Env: LDB_RESIZE_THRESHOLD_PERCENT (default 70)
    pub resize_threshold_percent: usize,

    /// Upper bound on slots the table may allocate; a resize past it fails.
    /// Env: LDB_MAX_CAPACITY (default: unbounded)
    pub max_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(STORE_FILE),
            events_path: PathBuf::from(EVENTS_FILE),
            initial_capacity: INITIAL_CAPACITY,
            max_key_len: MAX_KEY_LEN,
            max_value_len: MAX_VALUE_LEN,
            resize_threshold_percent: RESIZE_THRESHOLD_PERCENT,
            max_capacity: MAX_CAPACITY,
        }
    }
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

impl StoreConfig {
    /// Load configuration from environment variables on top of defaults.
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Some(p) = env_path("LDB_STORE_PATH") {
            cfg.store_path = p;
        }
        if let Some(p) = env_path("LDB_EVENTS_PATH") {
            cfg.events_path = p;
        }
        if let Some(n) = env_usize("LDB_INITIAL_CAPACITY") {
            cfg.initial_capacity = n;
        }
        if let Some(n) = env_usize("LDB_MAX_KEY_LEN") {
            cfg.max_key_len = n;
        }
        if let Some(n) = env_usize("LDB_MAX_VALUE_LEN") {
            cfg.max_value_len = n;
        }
        if let Some(n) = env_usize("LDB_RESIZE_THRESHOLD_PERCENT") {
            cfg.resize_threshold_percent = n;
        }
        if let Some(n) = env_usize("LDB_MAX_CAPACITY") {
            cfg.max_capacity = n;
        }

        cfg
    }

    /// Store files placed under a common directory (snapshot + event log).
    pub fn in_dir<P: Into<PathBuf>>(root: P) -> Self {
        let root = root.into();
        Self {
            store_path: root.join(STORE_FILE),
            events_path: root.join(EVENTS_FILE),
            ..Self::default()
        }
    }

    pub fn with_store_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.store_path = path.into();
        self
    }

    pub fn with_events_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.events_path = path.into();
        self
    }

    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    pub fn with_max_key_len(mut self, len: usize) -> Self {
        self.max_key_len = len;
        self
    }

    pub fn with_max_value_len(mut self, len: usize) -> Self {
        self.max_value_len = len;
        self
    }

    pub fn with_resize_threshold_percent(mut self, percent: usize) -> Self {
        self.resize_threshold_percent = percent;
        self
    }

    pub fn with_max_capacity(mut self, slots: usize) -> Self {
        self.max_capacity = slots;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> Self {
        self
    }

    pub fn validate(&self) -> StoreResult<()> {
        if self.initial_capacity == 0 {
            return Err(StoreError::InvalidConfig {
                reason: "initial_capacity must be > 0".into(),
            });
        }
        if self.resize_threshold_percent == 0 || self.resize_threshold_percent > 100 {
            return Err(StoreError::InvalidConfig {
                reason: format!(
                    "resize_threshold_percent must be in 1..=100, got {}",
                    self.resize_threshold_percent
                ),
            });
        }
        if self.initial_capacity > self.max_capacity {
            return Err(StoreError::InvalidConfig {
                reason: format!(
                    "initial_capacity {} exceeds max_capacity {}",
                    self.initial_capacity, self.max_capacity
                ),
            });
        }
        if self.max_key_len < 2 || self.max_value_len < 2 {
            return Err(StoreError::InvalidConfig {
                reason: "max_key_len/max_value_len must be >= 2".into(),
            });
        }
        if self.store_path == self.events_path {
            return Err(StoreError::InvalidConfig {
                reason: "store_path and events_path must differ".into(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for StoreConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "StoreConfig {{ \
             store_path: {}, \
             events_path: {}, \
             initial_capacity: {}, \
             max_key_len: {}, \
             max_value_len: {}, \
             resize_threshold_percent: {}, \
             max_capacity: {} \
             }}",
            self.store_path.display(),
            self.events_path.display(),
            self.initial_capacity,
            self.max_key_len,
            self.max_value_len,
            self.resize_threshold_percent,
            self.max_capacity,
        )
    }
}

/// Lightweight builder that produces a StoreConfig.
#[derive(Clone, Debug)]
pub struct StoreBuilder {
    cfg: StoreConfig,
}

impl Default for StoreBuilder {
    fn default() -> Self {
        // Start from env, then allow overrides.
        Self {
            cfg: StoreConfig::from_env(),
        }
    }
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a clean default (without reading env).
    pub fn from_default() -> Self {
        Self {
            cfg: StoreConfig::default(),
        }
    }

    pub fn store_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.store_path = path.into();
        self
    }

    pub fn events_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.cfg.events_path = path.into();
        self
    }

    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.cfg.initial_capacity = capacity;
        self
    }

    pub fn max_key_len(mut self, len: usize) -> Self {
        self.cfg.max_key_len = len;
        self
    }

    pub fn max_value_len(mut self, len: usize) -> Self {
        self.cfg.max_value_len = len;
        self
    }

    pub fn resize_threshold_percent(mut self, percent: usize) -> Self {
        self.cfg.resize_threshold_percent = percent;
        self
    }

    pub fn max_capacity(mut self, slots: usize) -> Self {
        self.cfg.max_capacity = slots;
        self
    }

    /// Finish the builder and obtain the configuration.
    pub fn build(self) -> StoreConfig {
        self.cfg
    }

    /// initialize + startup с полученным конфигом.
    pub fn open(self) -> StoreResult<Store> {
        Store::open(self.cfg)
    }
}
