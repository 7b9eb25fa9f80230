use std::path::PathBuf;

use clap::Parser;

use crate::model::InputMode;

#[derive(Parser, Debug)]
#[command(name = "td", about = concat!("[x] tiered v", env!("CARGO_PKG_VERSION"), " - todos, one level deep"), version)]
pub struct Cli {
    /// Directory holding store.json, config.toml and the log
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Mouse input modality (overrides config and the last session)
    #[arg(long, value_enum)]
    pub input: Option<InputMode>,
}
