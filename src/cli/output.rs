//! Output formatting for build reports and asset listings
//!
//! JSON and YAML are meant for scripts; the human format is a short summary.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::PathBuf;

use crate::bundle::{AssetCatalog, Build, BundleReport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Human,
}

/// Result of a complete build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildSummary {
    pub syntaxes: Vec<String>,
    pub theme: Option<String>,
    pub bundles: Vec<BundleReport>,
}

impl BuildSummary {
    pub fn new(build: &Build, bundles: Vec<BundleReport>) -> Self {
        Self {
            syntaxes: build.syntax_names().to_vec(),
            theme: build.theme_name().map(str::to_string),
            bundles,
        }
    }
}

/// Available syntaxes and themes of an asset root
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogListing {
    pub root: PathBuf,
    pub syntaxes: Vec<String>,
    pub themes: Vec<String>,
}

impl From<&AssetCatalog> for CatalogListing {
    fn from(catalog: &AssetCatalog) -> Self {
        Self {
            root: catalog.root().to_path_buf(),
            syntaxes: catalog.syntax_names().into_iter().map(String::from).collect(),
            themes: catalog.theme_names().into_iter().map(String::from).collect(),
        }
    }
}

pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format_summary(&self, summary: &BuildSummary) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(summary)
                .context("Failed to serialize build summary to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(summary).context("Failed to serialize build summary to YAML")
            }
            OutputFormat::Human => Ok(self.format_summary_human(summary)),
        }
    }

    pub fn format_listing(&self, listing: &CatalogListing) -> Result<String> {
        match self.format {
            OutputFormat::Json => serde_json::to_string_pretty(listing)
                .context("Failed to serialize asset listing to JSON"),
            OutputFormat::Yaml => {
                serde_yaml::to_string(listing).context("Failed to serialize asset listing to YAML")
            }
            OutputFormat::Human => Ok(self.format_listing_human(listing)),
        }
    }

    fn format_summary_human(&self, summary: &BuildSummary) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Built fractus bundles");
        let _ = writeln!(output, "  Syntaxes: {}", summary.syntaxes.join(", "));
        let _ = writeln!(
            output,
            "  Theme:    {}",
            summary.theme.as_deref().unwrap_or("(none)")
        );
        for bundle in &summary.bundles {
            let _ = writeln!(
                output,
                "  {:<11} {} ({} bytes, sha256 {})",
                format!("{}:", bundle.kind),
                bundle.path.display(),
                bundle.bytes,
                short_digest(&bundle.sha256)
            );
        }
        output
    }

    fn format_listing_human(&self, listing: &CatalogListing) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Assets: {}", listing.root.display());
        let _ = writeln!(output);
        let _ = writeln!(output, "Syntaxes:");
        write_names(&mut output, &listing.syntaxes);
        let _ = writeln!(output);
        let _ = writeln!(output, "Themes:");
        write_names(&mut output, &listing.themes);
        output
    }
}

fn write_names(output: &mut String, names: &[String]) {
    if names.is_empty() {
        let _ = writeln!(output, "  (none)");
    }
    for name in names {
        let _ = writeln!(output, "  {}", name);
    }
}

fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}
