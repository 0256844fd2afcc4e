use super::catalog::{Asset, AssetCatalog};
use super::error::{available_list, BundleError};
use super::requires::{self, SyntaxModule};
use super::{BundleKind, BundleReport};
use crate::VERSION;
use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, info, warn};

/// What to put into the bundles
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub langs: Vec<String>,
    pub theme: Option<String>,
    pub jquery: bool,
    pub underscore: bool,
    /// Emit the header comment and per-file section markers
    pub banner: bool,
}

impl BuildOptions {
    pub fn new(langs: Vec<String>) -> Self {
        Self {
            langs,
            theme: None,
            jquery: true,
            underscore: true,
            banner: true,
        }
    }
}

#[derive(Debug, Clone)]
struct Section {
    label: String,
    content: String,
}

impl Section {
    fn load(catalog: &AssetCatalog, asset: &Asset) -> Result<Self, BundleError> {
        Ok(Self {
            label: asset.relative.clone(),
            content: catalog.read(asset)?,
        })
    }
}

impl From<SyntaxModule> for Section {
    fn from(module: SyntaxModule) -> Self {
        Self {
            label: module.asset.relative,
            content: module.source,
        }
    }
}

/// A fully resolved bundle build.
///
/// Every file is read when the build is created, so unknown names and
/// unreadable assets fail before anything is written.
#[derive(Debug)]
pub struct Build {
    options: BuildOptions,
    syntax_names: Vec<String>,
    theme_name: Option<String>,
    scripts: Vec<Section>,
    stylesheets: Vec<Section>,
}

impl Build {
    pub fn new(catalog: &AssetCatalog, options: BuildOptions) -> Result<Self, BundleError> {
        let modules = requires::resolve(catalog, &options.langs)?;

        let theme = match &options.theme {
            Some(name) => Some(catalog.theme(name).cloned().ok_or_else(|| {
                BundleError::UnknownTheme {
                    name: name.clone(),
                    available: available_list(&catalog.theme_names()),
                }
            })?),
            None => None,
        };

        let mut scripts = Vec::new();
        for (enabled, asset, label) in [
            (options.jquery, catalog.jquery(), "jQuery"),
            (options.underscore, catalog.underscore(), "Underscore.js"),
        ] {
            match (enabled, asset) {
                (true, Some(asset)) => scripts.push(Section::load(catalog, asset)?),
                (true, None) => warn!(
                    "{} requested but not found in {}, skipping",
                    label,
                    catalog.root().display()
                ),
                (false, _) => debug!("{} excluded", label),
            }
        }
        scripts.push(Section::load(catalog, catalog.runtime())?);

        let syntax_names: Vec<String> = modules.iter().map(|m| m.asset.name.clone()).collect();
        scripts.extend(modules.into_iter().map(Section::from));

        let mut stylesheets = vec![Section::load(catalog, catalog.base_stylesheet())?];
        let theme_name = match theme {
            Some(asset) => {
                stylesheets.push(Section::load(catalog, &asset)?);
                Some(asset.name)
            }
            None => None,
        };

        Ok(Self {
            options,
            syntax_names,
            theme_name,
            scripts,
            stylesheets,
        })
    }

    /// Syntax names in bundle order, prerequisites included
    pub fn syntax_names(&self) -> &[String] {
        &self.syntax_names
    }

    pub fn theme_name(&self) -> Option<&str> {
        self.theme_name.as_deref()
    }

    /// Renders the JavaScript bundle without writing it
    pub fn render_js(&self) -> String {
        let header = format!("syntaxes: {}", self.syntax_names.join(", "));
        self.render(&header, &self.scripts)
    }

    /// Renders the CSS bundle without writing it
    pub fn render_css(&self) -> String {
        let header = format!("theme: {}", self.theme_name.as_deref().unwrap_or("none"));
        self.render(&header, &self.stylesheets)
    }

    /// Writes the JavaScript bundle to `path`
    pub async fn js(&self, path: impl AsRef<Path>) -> Result<BundleReport, BundleError> {
        self.write(BundleKind::Js, path.as_ref(), self.render_js(), &self.scripts)
            .await
    }

    /// Writes the CSS bundle to `path`
    pub async fn css(&self, path: impl AsRef<Path>) -> Result<BundleReport, BundleError> {
        self.write(BundleKind::Css, path.as_ref(), self.render_css(), &self.stylesheets)
            .await
    }

    fn render(&self, header: &str, sections: &[Section]) -> String {
        let mut parts = Vec::with_capacity(sections.len() + 1);
        if self.options.banner {
            parts.push(format!("/*!\n * fractus v{}\n * {}\n */\n", VERSION, header));
        }
        for section in sections {
            let mut part = String::with_capacity(section.content.len() + section.label.len() + 16);
            if self.options.banner {
                part.push_str(&format!("/* --- {} --- */\n", section.label));
            }
            part.push_str(&section.content);
            if !part.ends_with('\n') {
                part.push('\n');
            }
            parts.push(part);
        }
        parts.join("\n")
    }

    async fn write(
        &self,
        kind: BundleKind,
        path: &Path,
        contents: String,
        sections: &[Section],
    ) -> Result<BundleReport, BundleError> {
        let write_error = |source| BundleError::WriteError {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(write_error)?;
        }
        tokio::fs::write(path, contents.as_bytes())
            .await
            .map_err(write_error)?;

        let report = BundleReport {
            kind,
            path: path.to_path_buf(),
            bytes: contents.len(),
            sha256: hex::encode(Sha256::digest(contents.as_bytes())),
            sections: sections.iter().map(|s| s.label.clone()).collect(),
        };
        info!(
            "Wrote {} bundle {} ({} bytes, {} sections)",
            kind,
            path.display(),
            report.bytes,
            report.sections.len()
        );
        Ok(report)
    }
}
