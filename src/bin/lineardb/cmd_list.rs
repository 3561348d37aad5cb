use anyhow::Result;

use LinearDB::shell::print_listing;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli, json: bool) -> Result<()> {
    with_store(cli, |store| {
        if json {
            println!("{}", serde_json::to_string_pretty(&store.list())?);
            return Ok(());
        }
        print_listing(store, &mut std::io::stdout())
    })
}
