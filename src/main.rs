use fractus::cli::{handle_build, CliArgs};
use fractus::util::{init_logging, LoggingConfig};
use fractus::{NAME, VERSION};

use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() {
    let args = CliArgs::parse();
    init_logging(LoggingConfig::resolve(
        args.log_level.as_deref(),
        args.verbose,
        args.silent,
    ));

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = handle_build(&args).await;

    std::process::exit(exit_code);
}
