use anyhow::Result;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli, key: &str) -> Result<()> {
    with_store(cli, |store| {
        match store.get(key) {
            Some(v) => println!("{}", v),
            None => println!("NOT FOUND '{}'", key),
        }
        Ok(())
    })
}
