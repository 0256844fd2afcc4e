use crate::bundle::BuildOptions;
use crate::config::{normalize_log_level, FractusConfig};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

pub const DEFAULT_JS_OUTPUT: &str = "fractus.js";
pub const DEFAULT_CSS_OUTPUT: &str = "fractus.css";

/// Printed when no syntaxes are given
pub const SAMPLE_USAGE: &str = "
  Sample usage:

  $ fractus -l Ruby,JavaScript,JSON -j fractus.js -c fractus.css -t Idlefingers
";

/// Syntax highlighter bundle builder
#[derive(Parser, Debug)]
#[command(
    name = "fractus",
    about = "Bundle syntax highlighting modules and a theme into one JavaScript and one CSS file",
    version,
    author,
    long_about = "fractus concatenates the highlighter runtime, the requested syntax modules \
                  and an optional theme from an asset directory into a JavaScript bundle and \
                  a CSS bundle.\n\n\
                  Examples:\n  \
                  fractus -l Ruby,JavaScript,JSON\n  \
                  fractus -l Ruby -j public/fractus.js -c public/fractus.css -t Idlefingers\n  \
                  fractus -l JSON -u -q\n  \
                  fractus --list --format json"
)]
pub struct CliArgs {
    #[arg(
        short = 'l',
        long,
        value_name = "LANGS",
        help = "Bundle the comma-separated syntaxes (required)"
    )]
    pub langs: Option<String>,

    #[arg(
        short = 'j',
        long = "js",
        value_name = "FILE",
        default_value = DEFAULT_JS_OUTPUT,
        help = "The JavaScript output file"
    )]
    pub js: PathBuf,

    #[arg(
        short = 'c',
        long = "css",
        value_name = "FILE",
        default_value = DEFAULT_CSS_OUTPUT,
        help = "The CSS output file"
    )]
    pub css: PathBuf,

    #[arg(short = 't', long, value_name = "THEME", help = "The theme name")]
    pub theme: Option<String>,

    #[arg(
        short = 'u',
        long = "underscore",
        help = "Don't include the Underscore.js source"
    )]
    pub no_underscore: bool,

    #[arg(short = 'q', long = "jquery", help = "Don't include the jQuery source")]
    pub no_jquery: bool,

    #[arg(
        short = 'a',
        long,
        value_name = "DIR",
        help = "Asset directory (overrides FRACTUS_ASSETS_DIR)"
    )]
    pub assets: Option<PathBuf>,

    #[arg(long, help = "List available syntaxes and themes, then exit")]
    pub list: bool,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Format of the build report and listing"
    )]
    pub format: OutputFormatArg,

    #[arg(long, help = "Omit header comments and section markers")]
    pub no_banner: bool,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(long, help = "Enable debug logging")]
    pub verbose: bool,

    #[arg(
        long,
        conflicts_with = "verbose",
        help = "Only log errors and skip the human-readable report"
    )]
    pub silent: bool,
}

impl CliArgs {
    /// Requested syntaxes, split on commas. `None` when `--langs` was not given.
    pub fn languages(&self) -> Option<Vec<String>> {
        self.langs.as_ref().map(|langs| split_languages(langs))
    }

    /// Applies command-line overrides on top of the environment configuration
    pub fn apply_to(&self, config: FractusConfig) -> FractusConfig {
        FractusConfig {
            assets_dir: self.assets.clone().unwrap_or(config.assets_dir),
            banner: config.banner && !self.no_banner,
            log_level: self
                .log_level
                .as_deref()
                .map(normalize_log_level)
                .unwrap_or(config.log_level),
        }
    }

    pub fn build_options(&self, config: &FractusConfig) -> Option<BuildOptions> {
        let langs = self.languages()?;
        Some(BuildOptions {
            langs,
            theme: self.theme.clone(),
            jquery: !self.no_jquery,
            underscore: !self.no_underscore,
            banner: config.banner,
        })
    }
}

fn split_languages(langs: &str) -> Vec<String> {
    langs
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Human,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
            OutputFormatArg::Human => super::output::OutputFormat::Human,
        }
    }
}
