pub mod commands;
pub mod handlers;
pub mod output;

pub use commands::{CliArgs, OutputFormatArg, SAMPLE_USAGE};
pub use handlers::handle_build;
pub use output::{BuildSummary, CatalogListing, OutputFormat, OutputFormatter};
