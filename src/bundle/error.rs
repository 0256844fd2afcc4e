use super::catalog::CatalogError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("No syntaxes requested")]
    NoLanguages,

    #[error("Unknown syntax '{name}'. Available syntaxes: {available}")]
    UnknownSyntax { name: String, available: String },

    #[error("Unknown theme '{name}'. Available themes: {available}")]
    UnknownTheme { name: String, available: String },

    #[error("Syntax '{syntax}' requires unknown syntax '{requirement}'")]
    UnknownRequirement { syntax: String, requirement: String },

    #[error("Syntax dependency cycle: {0}")]
    DependencyCycle(String),

    #[error("Failed to write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
}

/// Formats a name list for error messages, `(none)` when empty
pub(crate) fn available_list(names: &[&str]) -> String {
    if names.is_empty() {
        "(none)".to_string()
    } else {
        names.join(", ")
    }
}
