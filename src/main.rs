use clap::Parser;
use tiered::cli::commands::Cli;
use tiered::io::config_io::resolve_data_dir;

fn main() {
    let cli = Cli::parse();
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());

    if let Err(e) = tiered::logging::init(&data_dir) {
        // Still usable without a log
        eprintln!("warning: {}", e);
    }

    if let Err(e) = tiered::tui::run(&data_dir, cli.input) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
