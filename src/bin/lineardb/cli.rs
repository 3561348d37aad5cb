use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI для LinearDB: интерактивная оболочка или одиночные команды
#[derive(Parser, Debug)]
#[command(name = "lineardb", version, about = "LinearDB CLI")]
pub struct Cli {
    /// Snapshot file (default: $LDB_STORE_PATH or ./store.db)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Event log file (default: $LDB_EVENTS_PATH or ./events.log)
    #[arg(long, global = true)]
    pub events: Option<PathBuf>,

    /// Initial table capacity (default: $LDB_INITIAL_CAPACITY or 5)
    #[arg(long, global = true)]
    pub capacity: Option<usize>,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Interactive command loop (default)
    Shell,
    /// Put key/value
    Put {
        key: String,
        value: String,
    },
    /// Get key
    Get {
        key: String,
    },
    /// Delete key
    Del {
        key: String,
    },
    /// List live pairs in slot order. --json prints a JSON object.
    List {
        #[arg(long)]
        json: bool,
    },
    /// Table statistics. --json prints a JSON object.
    Stats {
        #[arg(long)]
        json: bool,
    },
}
