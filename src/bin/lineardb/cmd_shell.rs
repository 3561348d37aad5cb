use anyhow::Result;

use LinearDB::shell;

use super::cli::Cli;
use super::util::with_store;

pub fn exec(cli: &Cli) -> Result<()> {
    with_store(cli, |store| {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        shell::run(store, stdin.lock(), &mut stdout)
    })
}
