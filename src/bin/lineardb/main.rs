use anyhow::Result;
use clap::Parser;
use env_logger::{Builder, Env};
use log::error;

mod cli;
mod util;
mod cmd_shell;
mod cmd_put;
mod cmd_get;
mod cmd_del;
mod cmd_list;
mod cmd_stats;

fn init_logger() {
    // Уровень берём из RUST_LOG, иначе дефолт — info.
    // Пример: RUST_LOG=debug ./lineardb shell
    Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();
}

fn main() {
    init_logger();

    if let Err(e) = run() {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = cli::Cli::parse();
    match &cli.cmd {
        None | Some(cli::Cmd::Shell) => cmd_shell::exec(&cli),

        Some(cli::Cmd::Put { key, value }) => cmd_put::exec(&cli, key, value),

        Some(cli::Cmd::Get { key }) => cmd_get::exec(&cli, key),

        Some(cli::Cmd::Del { key }) => cmd_del::exec(&cli, key),

        Some(cli::Cmd::List { json }) => cmd_list::exec(&cli, *json),

        Some(cli::Cmd::Stats { json }) => cmd_stats::exec(&cli, *json),
    }
}
