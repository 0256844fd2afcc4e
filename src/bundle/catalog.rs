//! Asset discovery
//!
//! An asset root holds the highlighter runtime, its base stylesheet, optional
//! vendored libraries, one script per syntax and one stylesheet per theme:
//!
//! ```text
//! <root>/core/fractus.js
//! <root>/core/fractus.css
//! <root>/vendor/jquery.js
//! <root>/vendor/underscore.js
//! <root>/syntaxes/<Name>.js
//! <root>/themes/<Name>.css
//! ```

use crate::fs::FileSystem;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

pub const RUNTIME_SCRIPT: &str = "core/fractus.js";
pub const BASE_STYLESHEET: &str = "core/fractus.css";
pub const JQUERY_SCRIPT: &str = "vendor/jquery.js";
pub const UNDERSCORE_SCRIPT: &str = "vendor/underscore.js";
pub const SYNTAX_DIR: &str = "syntaxes";
pub const THEME_DIR: &str = "themes";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Asset root does not exist: {0}")]
    RootNotFound(PathBuf),
    #[error("Asset root is not a directory: {0}")]
    NotADirectory(PathBuf),
    #[error("Asset root {root} is missing required file {file}")]
    MissingCoreFile { root: PathBuf, file: &'static str },
    #[error("Failed to read {path}: {message}")]
    ReadError { path: PathBuf, message: String },
}

/// A single file in the asset root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Asset {
    /// Display name: the file stem for syntaxes and themes, the relative path otherwise
    pub name: String,
    /// Path relative to the asset root, always `/`-separated
    pub relative: String,
    pub path: PathBuf,
}

impl Asset {
    fn new(root: &Path, relative: &str, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            relative: relative.to_string(),
            path: root.join(relative),
        }
    }
}

pub struct AssetCatalog {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
    runtime: Asset,
    base_stylesheet: Asset,
    jquery: Option<Asset>,
    underscore: Option<Asset>,
    syntaxes: BTreeMap<String, Asset>,
    themes: BTreeMap<String, Asset>,
}

impl AssetCatalog {
    pub fn load(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let root = root.into();

        if !fs.exists(&root) {
            return Err(CatalogError::RootNotFound(root));
        }
        if !fs.is_dir(&root) {
            return Err(CatalogError::NotADirectory(root));
        }

        let required = |file: &'static str| -> Result<Asset, CatalogError> {
            let asset = Asset::new(&root, file, file);
            if fs.is_file(&asset.path) {
                Ok(asset)
            } else {
                Err(CatalogError::MissingCoreFile {
                    root: root.clone(),
                    file,
                })
            }
        };
        let runtime = required(RUNTIME_SCRIPT)?;
        let base_stylesheet = required(BASE_STYLESHEET)?;

        let optional = |file: &str| {
            let asset = Asset::new(&root, file, file);
            fs.is_file(&asset.path).then_some(asset)
        };
        let jquery = optional(JQUERY_SCRIPT);
        let underscore = optional(UNDERSCORE_SCRIPT);

        let syntaxes = scan_named(fs.as_ref(), &root, SYNTAX_DIR, "js")?;
        let themes = scan_named(fs.as_ref(), &root, THEME_DIR, "css")?;

        debug!(
            root = %root.display(),
            syntaxes = syntaxes.len(),
            themes = themes.len(),
            jquery = jquery.is_some(),
            underscore = underscore.is_some(),
            "Loaded asset catalog"
        );

        Ok(Self {
            fs,
            root,
            runtime,
            base_stylesheet,
            jquery,
            underscore,
            syntaxes,
            themes,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn runtime(&self) -> &Asset {
        &self.runtime
    }

    pub fn base_stylesheet(&self) -> &Asset {
        &self.base_stylesheet
    }

    pub fn jquery(&self) -> Option<&Asset> {
        self.jquery.as_ref()
    }

    pub fn underscore(&self) -> Option<&Asset> {
        self.underscore.as_ref()
    }

    /// Case-insensitive syntax lookup
    pub fn syntax(&self, name: &str) -> Option<&Asset> {
        self.syntaxes.get(&name.to_lowercase())
    }

    /// Case-insensitive theme lookup
    pub fn theme(&self, name: &str) -> Option<&Asset> {
        self.themes.get(&name.to_lowercase())
    }

    pub fn syntax_names(&self) -> Vec<&str> {
        self.syntaxes.values().map(|a| a.name.as_str()).collect()
    }

    pub fn theme_names(&self) -> Vec<&str> {
        self.themes.values().map(|a| a.name.as_str()).collect()
    }

    pub fn read(&self, asset: &Asset) -> Result<String, CatalogError> {
        self.fs
            .read_to_string(&asset.path)
            .map_err(|e| CatalogError::ReadError {
                path: asset.path.clone(),
                message: format!("{:#}", e),
            })
    }
}

fn scan_named(
    fs: &dyn FileSystem,
    root: &Path,
    dir: &str,
    extension: &str,
) -> Result<BTreeMap<String, Asset>, CatalogError> {
    let dir_path = root.join(dir);
    if !fs.is_dir(&dir_path) {
        debug!("No {} directory under {}", dir, root.display());
        return Ok(BTreeMap::new());
    }

    let mut entries = fs
        .read_dir(&dir_path)
        .map_err(|e| CatalogError::ReadError {
            path: dir_path.clone(),
            message: format!("{:#}", e),
        })?;
    entries.retain(|e| e.is_file() && e.has_extension(extension));
    entries.sort_by(|a, b| a.name.cmp(&b.name));

    let mut assets: BTreeMap<String, Asset> = BTreeMap::new();
    for entry in entries {
        let Some(stem) = entry.stem().filter(|s| !s.is_empty()) else {
            continue;
        };
        let key = stem.to_lowercase();
        if let Some(existing) = assets.get(&key) {
            warn!(
                "Ignoring {}/{}: name clashes with {}",
                dir,
                entry.file_name(),
                existing.relative
            );
            continue;
        }
        let relative = format!("{}/{}", dir, entry.file_name());
        assets.insert(key, Asset::new(root, &relative, stem));
    }

    Ok(assets)
}
