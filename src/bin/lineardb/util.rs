use anyhow::{Context, Result};

use LinearDB::{Store, StoreBuilder};

use super::cli::Cli;

/// Конфиг: env → флаги CLI, затем initialize + startup.
pub fn open_store(cli: &Cli) -> Result<Store> {
    let mut b = StoreBuilder::new();
    if let Some(p) = &cli.store {
        b = b.store_path(p.clone());
    }
    if let Some(p) = &cli.events {
        b = b.events_path(p.clone());
    }
    if let Some(n) = cli.capacity {
        b = b.initial_capacity(n);
    }
    let cfg = b.build();
    log::debug!("{}", cfg);
    let store = Store::open(cfg.clone())
        .with_context(|| format!("open store {}", cfg.store_path.display()))?;
    Ok(store)
}

/// Выполнить действие и завершить чистым shutdown (snapshot + очистка лога).
pub fn with_store<F>(cli: &Cli, f: F) -> Result<()>
where
    F: FnOnce(&mut Store) -> Result<()>,
{
    let mut store = open_store(cli)?;
    let res = f(&mut store);
    store.shutdown().context("shutdown")?;
    res
}
