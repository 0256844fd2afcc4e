//! fractus - syntax highlighter bundle builder
//!
//! Assembles a JavaScript bundle and a CSS bundle from an asset directory
//! holding the highlighter runtime, per-language syntax modules, themes and
//! optional vendored jQuery and Underscore.js.
//!
//! # Example Usage
//!
//! ```no_run
//! use fractus::bundle::{AssetCatalog, Build, BuildOptions};
//! use fractus::fs::RealFileSystem;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = AssetCatalog::load(Arc::new(RealFileSystem::new()), "assets")?;
//!
//! let mut options = BuildOptions::new(vec!["Ruby".into(), "JSON".into()]);
//! options.theme = Some("Idlefingers".into());
//!
//! let build = Build::new(&catalog, options)?;
//! build.js("fractus.js").await?;
//! build.css("fractus.css").await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Project Structure
//!
//! - [`bundle`]: asset discovery, syntax resolution and bundle writing
//! - [`cli`]: command-line arguments, handlers and report formatting
//! - [`config`]: environment-driven configuration
//! - [`fs`]: filesystem abstraction used for asset discovery

pub mod bundle;
pub mod cli;
pub mod config;
pub mod fs;
pub mod util;

pub use bundle::{
    AssetCatalog, Build, BuildOptions, BundleError, BundleKind, BundleReport, CatalogError,
};
pub use config::{ConfigError, FractusConfig};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
