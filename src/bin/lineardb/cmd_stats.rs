use anyhow::Result;

use LinearDB::shell::print_stats;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli, json: bool) -> Result<()> {
    with_store(cli, |store| {
        let report = store.stats();
        if json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }
        print_stats(&report, &mut std::io::stdout())
    })
}
