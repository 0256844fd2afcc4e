//! Syntax prerequisites
//!
//! A syntax script may name other syntaxes it builds on in its leading comment
//! block:
//!
//! ```text
//! // @requires JavaScript
//! // @requires CSS, HTML
//! ```
//!
//! Only `//` lines before the first code line are considered. `/* ... */`
//! blocks (license headers and the like) are skipped without ending the scan.
//! Prerequisites are bundled before the syntaxes that need them.

use super::catalog::{Asset, AssetCatalog};
use super::error::{available_list, BundleError};
use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;
use tracing::debug;

/// A resolved syntax script and its source
#[derive(Debug, Clone)]
pub struct SyntaxModule {
    pub asset: Asset,
    pub source: String,
    pub requires: Vec<String>,
}

fn requires_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^//\s*@requires\s+(.+)$").expect("valid regex"))
}

fn separator_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[,\s]+").expect("valid regex"))
}

/// Extracts `@requires` names from the leading comment block of a script
pub fn parse_requires(source: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut in_block = false;

    'lines: for line in source.lines() {
        let mut rest = line.trim();
        loop {
            if in_block {
                match rest.find("*/") {
                    Some(end) => {
                        in_block = false;
                        rest = rest[end + 2..].trim();
                    }
                    None => continue 'lines,
                }
            }
            if rest.is_empty() {
                continue 'lines;
            }
            if let Some(inner) = rest.strip_prefix("/*") {
                in_block = true;
                rest = inner;
                continue;
            }
            if rest.starts_with("//") {
                if let Some(caps) = requires_re().captures(rest) {
                    names.extend(
                        separator_re()
                            .split(&caps[1])
                            .filter(|n| !n.is_empty())
                            .map(str::to_string),
                    );
                }
                continue 'lines;
            }
            break 'lines;
        }
    }
    names
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Visiting,
    Done,
}

/// Orders the requested syntaxes so that every script follows its prerequisites.
///
/// Request order is kept where dependencies allow it and repeated names
/// (in any letter case) are bundled once.
pub fn resolve(catalog: &AssetCatalog, requested: &[String]) -> Result<Vec<SyntaxModule>, BundleError> {
    if requested.is_empty() {
        return Err(BundleError::NoLanguages);
    }

    let mut resolver = Resolver {
        catalog,
        marks: HashMap::new(),
        stack: Vec::new(),
        order: Vec::new(),
    };
    for name in requested {
        resolver.visit(name, None)?;
    }

    debug!(
        "Resolved syntaxes: {}",
        resolver
            .order
            .iter()
            .map(|m| m.asset.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    Ok(resolver.order)
}

struct Resolver<'a> {
    catalog: &'a AssetCatalog,
    marks: HashMap<String, Mark>,
    /// (key, display name) of the syntaxes currently being visited
    stack: Vec<(String, String)>,
    order: Vec<SyntaxModule>,
}

impl Resolver<'_> {
    fn visit(&mut self, name: &str, required_by: Option<&str>) -> Result<(), BundleError> {
        let Some(asset) = self.catalog.syntax(name).cloned() else {
            return Err(match required_by {
                Some(parent) => BundleError::UnknownRequirement {
                    syntax: parent.to_string(),
                    requirement: name.to_string(),
                },
                None => BundleError::UnknownSyntax {
                    name: name.to_string(),
                    available: available_list(&self.catalog.syntax_names()),
                },
            });
        };
        let key = asset.name.to_lowercase();

        match self.marks.get(&key) {
            Some(Mark::Done) => return Ok(()),
            Some(Mark::Visiting) => {
                let start = self.stack.iter().position(|(k, _)| *k == key).unwrap_or(0);
                let mut cycle: Vec<&str> = self.stack[start..]
                    .iter()
                    .map(|(_, n)| n.as_str())
                    .collect();
                cycle.push(&asset.name);
                return Err(BundleError::DependencyCycle(cycle.join(" -> ")));
            }
            None => {}
        }

        self.marks.insert(key.clone(), Mark::Visiting);
        self.stack.push((key.clone(), asset.name.clone()));

        let source = self.catalog.read(&asset)?;
        let requires = parse_requires(&source);
        for requirement in &requires {
            self.visit(requirement, Some(&asset.name))?;
        }

        self.stack.pop();
        self.marks.insert(key, Mark::Done);
        self.order.push(SyntaxModule {
            asset,
            source,
            requires,
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundle::catalog::{BASE_STYLESHEET, RUNTIME_SCRIPT};
    use crate::fs::MockFileSystem;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn catalog(syntaxes: &[(&str, &str)]) -> AssetCatalog {
        let fs = MockFileSystem::with_root(PathBuf::from("/assets"));
        fs.add_file(RUNTIME_SCRIPT, "");
        fs.add_file(BASE_STYLESHEET, "");
        for (name, source) in syntaxes {
            fs.add_file(format!("syntaxes/{}.js", name), source);
        }
        AssetCatalog::load(Arc::new(fs), "/assets").unwrap()
    }

    fn names(modules: &[SyntaxModule]) -> Vec<&str> {
        modules.iter().map(|m| m.asset.name.as_str()).collect()
    }

    fn request(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_parse_requires() {
        let source = "// Ruby syntax\n// @requires JavaScript\n//@requires CSS, HTML  XML\n\nvar x = 1;\n// @requires Late\n";
        assert_eq!(parse_requires(source), vec!["JavaScript", "CSS", "HTML", "XML"]);
    }

    #[test]
    fn test_parse_requires_none() {
        assert!(parse_requires("var x = 1;").is_empty());
        assert!(parse_requires("").is_empty());
        assert!(parse_requires("/* @requires Block */\n").is_empty());
    }

    #[test]
    fn test_parse_requires_after_license_block() {
        let source = "/*! License: MIT */\n// @requires JavaScript\nFractus.json = {};\n";
        assert_eq!(parse_requires(source), vec!["JavaScript"]);
    }

    #[test]
    fn test_parse_requires_after_multiline_block() {
        let source = "/*\n * Embedded Ruby\n * (c) 2011\n */\n\n// @requires Ruby\n/* html */ // @requires HTML\nvar erb;\n// @requires Late\n";
        assert_eq!(parse_requires(source), vec!["Ruby", "HTML"]);
    }

    #[test]
    fn test_parse_requires_stops_at_code_after_block() {
        let source = "/* header */ var x = 1;\n// @requires Ruby\n";
        assert!(parse_requires(source).is_empty());
    }

    #[test]
    fn test_keeps_request_order() {
        let catalog = catalog(&[("Ruby", ""), ("JSON", ""), ("JavaScript", "")]);
        let modules = resolve(&catalog, &request(&["Ruby", "JavaScript", "JSON"])).unwrap();
        assert_eq!(names(&modules), vec!["Ruby", "JavaScript", "JSON"]);
    }

    #[test]
    fn test_duplicates_collapse() {
        let catalog = catalog(&[("Ruby", ""), ("JSON", "")]);
        let modules = resolve(&catalog, &request(&["ruby", "JSON", "RUBY"])).unwrap();
        assert_eq!(names(&modules), vec!["Ruby", "JSON"]);
    }

    #[test]
    fn test_prerequisites_come_first() {
        let catalog = catalog(&[
            ("HTML", "// @requires JavaScript, CSS\n"),
            ("JavaScript", ""),
            ("CSS", ""),
            ("Ruby", ""),
        ]);
        let modules = resolve(&catalog, &request(&["Ruby", "HTML", "CSS"])).unwrap();
        assert_eq!(names(&modules), vec!["Ruby", "JavaScript", "CSS", "HTML"]);
        assert_eq!(modules[3].requires, vec!["JavaScript", "CSS"]);
    }

    #[test]
    fn test_empty_request() {
        let catalog = catalog(&[("Ruby", "")]);
        assert!(matches!(resolve(&catalog, &[]), Err(BundleError::NoLanguages)));
    }

    #[test]
    fn test_unknown_syntax_lists_available() {
        let catalog = catalog(&[("Ruby", ""), ("JSON", "")]);
        match resolve(&catalog, &request(&["Cobol"])) {
            Err(BundleError::UnknownSyntax { name, available }) => {
                assert_eq!(name, "Cobol");
                assert_eq!(available, "JSON, Ruby");
            }
            other => panic!("Expected UnknownSyntax, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_requirement() {
        let catalog = catalog(&[("ERB", "// @requires Ruby\n")]);
        match resolve(&catalog, &request(&["ERB"])) {
            Err(BundleError::UnknownRequirement {
                syntax,
                requirement,
            }) => {
                assert_eq!(syntax, "ERB");
                assert_eq!(requirement, "Ruby");
            }
            other => panic!("Expected UnknownRequirement, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_detected() {
        let catalog = catalog(&[
            ("A", "// @requires B\n"),
            ("B", "// @requires C\n"),
            ("C", "// @requires b\n"),
        ]);
        match resolve(&catalog, &request(&["A"])) {
            Err(BundleError::DependencyCycle(path)) => assert_eq!(path, "B -> C -> B"),
            other => panic!("Expected DependencyCycle, got {:?}", other),
        }
    }

    #[test]
    fn test_self_requirement_is_cycle() {
        let catalog = catalog(&[("Ruby", "// @requires Ruby\n")]);
        match resolve(&catalog, &request(&["Ruby"])) {
            Err(BundleError::DependencyCycle(path)) => assert_eq!(path, "Ruby -> Ruby"),
            other => panic!("Expected DependencyCycle, got {:?}", other),
        }
    }
}
