//! Bundle assembly: asset discovery, syntax resolution and output writing

pub mod build;
pub mod catalog;
pub mod error;
pub mod requires;

pub use build::{Build, BuildOptions};
pub use catalog::{Asset, AssetCatalog, CatalogError};
pub use error::BundleError;
pub use requires::{parse_requires, SyntaxModule};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BundleKind {
    Js,
    Css,
}

impl fmt::Display for BundleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BundleKind::Js => write!(f, "JavaScript"),
            BundleKind::Css => write!(f, "CSS"),
        }
    }
}

/// Summary of one written bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleReport {
    pub kind: BundleKind,
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
    /// Asset-relative paths of the included files, in bundle order
    pub sections: Vec<String>,
}
