//! Utility modules for fractus

pub mod logging;
#[cfg(test)]
pub(crate) mod test_env;

pub use logging::{init_logging, level_from_str, parse_level, LoggingConfig};
