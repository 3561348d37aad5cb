use anyhow::Result;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli, key: &str) -> Result<()> {
    with_store(cli, |store| {
        store.delete(key)?;
        println!("OK del: key='{}'", key);
        Ok(())
    })
}
