use anyhow::Result;

use LinearDB::PutOutcome;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli, key: &str, value: &str) -> Result<()> {
    with_store(cli, |store| {
        let outcome = store.put(key, value)?;
        let what = match outcome {
            PutOutcome::Inserted => "inserted",
            PutOutcome::Updated => "updated",
        };
        println!("OK put: key='{}' ({}), value={} B", key, what, value.len());
        Ok(())
    })
}
