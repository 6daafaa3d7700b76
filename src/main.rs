//! benchutil - command line entry point

use benchutil::{
    app::App,
    cli::Cli,
    logging::{init_logging, LogLevel},
    PKG_NAME, VERSION,
};
use clap::Parser;
use std::process;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(LogLevel::from_flags(cli.verbose, cli.debug));
    tracing::debug!("{} v{}", PKG_NAME, VERSION);

    let debug = cli.debug;
    if let Err(e) = App::new(cli).run().await {
        tracing::debug!(category = e.category(), "command failed");
        if debug {
            eprintln!("{}", e.user_friendly_message());
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(e.exit_code());
    }
}
