use super::commands::{CliArgs, SAMPLE_USAGE};
use super::output::{BuildSummary, CatalogListing, OutputFormat, OutputFormatter};
use crate::bundle::{AssetCatalog, Build, BundleError, CatalogError};
use crate::config::FractusConfig;
use crate::fs::{FileSystem, RealFileSystem};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Runs the command line and returns the process exit code
pub async fn handle_build(args: &CliArgs) -> i32 {
    if !args.list && args.languages().is_none() {
        println!("{}", SAMPLE_USAGE);
        return 0;
    }

    let config = args.apply_to(FractusConfig::default());
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        eprintln!("\nPlease check your FRACTUS_* environment variables and command-line arguments.");
        return 1;
    }
    debug!("{}", config);

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem::new());

    if args.list {
        return match list(fs, &config) {
            Ok(listing) => emit(args, |formatter| formatter.format_listing(&listing)),
            Err(e) => fail(e),
        };
    }

    match build(fs, args, &config).await {
        Ok(summary) => {
            if args.silent && OutputFormat::from(args.format) == OutputFormat::Human {
                return 0;
            }
            emit(args, |formatter| formatter.format_summary(&summary))
        }
        Err(e) => fail(e),
    }
}

fn list(fs: Arc<dyn FileSystem>, config: &FractusConfig) -> Result<CatalogListing> {
    let catalog = AssetCatalog::load(fs, &config.assets_dir)
        .with_context(|| format!("Failed to load assets from {}", config.assets_dir.display()))?;
    Ok(CatalogListing::from(&catalog))
}

/// Builds the JavaScript bundle, then the CSS bundle. Stops at the first failure.
pub async fn build(
    fs: Arc<dyn FileSystem>,
    args: &CliArgs,
    config: &FractusConfig,
) -> Result<BuildSummary> {
    let options = args
        .build_options(config)
        .context("No syntaxes given (use -l/--langs)")?;
    info!(
        "Bundling {} from {}",
        options.langs.join(", "),
        config.assets_dir.display()
    );

    let catalog = AssetCatalog::load(fs, &config.assets_dir)
        .with_context(|| format!("Failed to load assets from {}", config.assets_dir.display()))?;
    let build = Build::new(&catalog, options)?;

    let js = build
        .js(&args.js)
        .await
        .context("Failed to build JavaScript bundle")?;
    let css = build
        .css(&args.css)
        .await
        .context("Failed to build CSS bundle")?;

    Ok(BuildSummary::new(&build, vec![js, css]))
}

fn emit(args: &CliArgs, render: impl FnOnce(&OutputFormatter) -> Result<String>) -> i32 {
    let formatter = OutputFormatter::new(args.format.into());
    match render(&formatter) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            0
        }
        Err(e) => fail(e),
    }
}

fn fail(e: anyhow::Error) -> i32 {
    error!("{:#}", e);
    match e.downcast_ref::<BundleError>() {
        Some(BundleError::UnknownSyntax { .. }) | Some(BundleError::UnknownTheme { .. }) => {
            eprintln!("\nRun `fractus --list` to see the available syntaxes and themes.");
        }
        _ => {}
    }
    if let Some(CatalogError::RootNotFound(_)) = e.downcast_ref::<CatalogError>() {
        eprintln!("\nPoint --assets or FRACTUS_ASSETS_DIR at a fractus asset directory.");
    }
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::catalog::{BASE_STYLESHEET, RUNTIME_SCRIPT};
    use crate::fs::MockFileSystem;
    use clap::Parser;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn mock_assets() -> Arc<dyn FileSystem> {
        let fs = MockFileSystem::with_root(PathBuf::from("/assets"));
        fs.add_file(RUNTIME_SCRIPT, "runtime");
        fs.add_file(BASE_STYLESHEET, "base");
        fs.add_file("syntaxes/Ruby.js", "ruby");
        fs.add_file("themes/Twilight.css", "twilight");
        Arc::new(fs)
    }

    fn config() -> FractusConfig {
        FractusConfig {
            assets_dir: PathBuf::from("/assets"),
            banner: false,
            log_level: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_build_writes_both_bundles() {
        let temp = TempDir::new().unwrap();
        let js = temp.path().join("a.js");
        let css = temp.path().join("a.css");
        let args = CliArgs::parse_from([
            "fractus",
            "-l",
            "ruby",
            "-t",
            "twilight",
            "-j",
            js.to_str().unwrap(),
            "-c",
            css.to_str().unwrap(),
        ]);

        let summary = build(mock_assets(), &args, &config()).await.unwrap();

        assert_eq!(summary.syntaxes, vec!["Ruby"]);
        assert_eq!(summary.theme.as_deref(), Some("Twilight"));
        assert_eq!(summary.bundles.len(), 2);
        assert_eq!(std::fs::read_to_string(&js).unwrap(), "runtime\n\nruby\n");
        assert_eq!(std::fs::read_to_string(&css).unwrap(), "base\n\ntwilight\n");
    }

    #[tokio::test]
    async fn test_build_unknown_syntax_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let js = temp.path().join("a.js");
        let args = CliArgs::parse_from(["fractus", "-l", "Cobol", "-j", js.to_str().unwrap()]);

        let err = build(mock_assets(), &args, &config()).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<BundleError>(),
            Some(BundleError::UnknownSyntax { .. })
        ));
        assert!(!js.exists());
    }

    #[test]
    fn test_list() {
        let listing = list(mock_assets(), &config()).unwrap();
        assert_eq!(listing.syntaxes, vec!["Ruby"]);
        assert_eq!(listing.themes, vec!["Twilight"]);
    }

    #[test]
    fn test_list_missing_root() {
        let mut config = config();
        config.assets_dir = PathBuf::from("/missing");

        let err = list(mock_assets(), &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CatalogError>(),
            Some(CatalogError::RootNotFound(_))
        ));
        assert_eq!(fail(err), 1);
    }
}
