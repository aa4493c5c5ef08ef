//! # Config — TOML Settings File
//!
//! Optional engine settings read from a TOML file, merged under CLI flags:
//!
//! ```toml
//! [sieve]
//! scheme = "wheel6"        # "odd" | "wheel6"
//! strategy = "auto"        # "auto" | "single-pass" | "segmented"
//! threshold = 10000000     # auto: single-pass below this bound
//! window_span = 262144     # numbers per segmented window
//! ```
//!
//! Every key is optional. Precedence is CLI flag, then file, then the
//! built-in default from [`SieveConfig::default`].

use crate::engine::{SieveConfig, Strategy};
use crate::scheme::SchemeKind;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level layout of the settings file.
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub sieve: SieveSettings,
}

/// Partial engine settings; `None` means "not set at this layer".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SieveSettings {
    pub scheme: Option<SchemeKind>,
    pub strategy: Option<Strategy>,
    pub threshold: Option<u64>,
    pub window_span: Option<u64>,
}

impl SieveSettings {
    /// Layer `over` on top of `self`; keys set in `over` win.
    pub fn merge(self, over: SieveSettings) -> SieveSettings {
        SieveSettings {
            scheme: over.scheme.or(self.scheme),
            strategy: over.strategy.or(self.strategy),
            threshold: over.threshold.or(self.threshold),
            window_span: over.window_span.or(self.window_span),
        }
    }

    /// Fill unset keys with defaults and validate the result.
    pub fn resolve(self) -> Result<SieveConfig> {
        let defaults = SieveConfig::default();
        let config = SieveConfig {
            scheme: self.scheme.unwrap_or(defaults.scheme),
            strategy: self.strategy.unwrap_or(defaults.strategy),
            threshold: self.threshold.unwrap_or(defaults.threshold),
            window_span: self.window_span.unwrap_or(defaults.window_span),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse settings from TOML text.
pub fn parse(content: &str) -> Result<ConfigFile> {
    let file: ConfigFile = toml::from_str(content)?;
    Ok(file)
}

/// Read and parse the settings file at `path`.
pub fn load(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("could not read config file '{}'", path.display()))?;
    parse(&content).with_context(|| format!("invalid config file '{}'", path.display()))
}
