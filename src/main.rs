use clap::Parser;
use tracing_subscriber::EnvFilter;

use requires::cli;
use requires::Cli;

fn main() {
    // RUST_LOG overrides the default, e.g. RUST_LOG=requires=debug
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("requires=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    if let Err(err) = cli::run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
