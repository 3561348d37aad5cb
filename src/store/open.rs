//! store/open — жизненный цикл: startup (snapshot + replay) и shutdown
//! (snapshot + очистка лога).

use log::info;

use crate::config::StoreConfig;
use crate::error::StoreResult;
use crate::events::{replay_events, ReplayReport};
use crate::snapshot::{load_snapshot, save_snapshot, LoadReport};

use super::core::Store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StartupReport {
    pub snapshot: LoadReport,
    pub replay: ReplayReport,
}

impl Store {
    /// initialize + startup.
    pub fn open(cfg: StoreConfig) -> StoreResult<Self> {
        let mut store = Self::initialize(cfg)?;
        store.startup()?;
        Ok(store)
    }

    /// loadSnapshot(); replayEvents();
    ///
    /// Восстанавливает последнее состояние и после краша: события, записанные
    /// после последнего snapshot'а, применяются поверх него.
    pub fn startup(&mut self) -> StoreResult<StartupReport> {
        let snapshot = load_snapshot(&mut self.table, &self.cfg.store_path)?;
        let replay = replay_events(&mut self.table, &self.cfg.events_path)?;
        info!(
            "store ready: {} live entries, capacity {}",
            self.table.len(),
            self.table.capacity()
        );
        Ok(StartupReport { snapshot, replay })
    }

    /// saveSnapshot(); clear event log.
    ///
    /// Лог удаляется только после успешной записи snapshot'а. Store остаётся
    /// рабочим: последующие мутации снова пишутся в (новый) лог.
    pub fn shutdown(&mut self) -> StoreResult<()> {
        let written = save_snapshot(&self.table, &self.cfg.store_path)?;
        self.log.clear()?;
        info!("store shut down cleanly ({} entries snapshotted)", written);
        Ok(())
    }
}
