//! Session configuration.
//!
//! Values are layered with `figment`: built-in defaults, then an optional
//! `tally.toml` in the working directory, then `CALC_*` environment
//! variables. Booleans accept the usual spellings (`1/true/yes/y/on`,
//! `0/false/no/n/off`) in any case.

use crate::error::{CalcError, Result};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "CALC_";

/// Optional configuration file, relative to the working directory.
pub const CONFIG_FILE: &str = "tally.toml";

/// Environment variable naming the history file.
pub const HISTORY_PATH_VAR: &str = "CALC_HISTORY_PATH";

/// Default history file.
pub const DEFAULT_HISTORY_PATH: &str = "history.csv";

/// Resolved session configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Where history is saved and loaded.
    pub history_path: PathBuf,

    /// Load history at startup when the file exists.
    pub auto_load: bool,

    /// Save history after every change.
    pub auto_save: bool,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_PATH),
            auto_load: true,
            auto_save: false,
        }
    }
}

impl CalculatorConfig {
    /// The standard provider stack: defaults, `tally.toml`, `CALC_*`.
    pub fn figment() -> Figment {
        let figment = Figment::from(Serialized::defaults(RawConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["history_path"]));

        // `Env` parses `1.50` as a float; paths are taken verbatim.
        match Env::var(HISTORY_PATH_VAR) {
            Some(path) => figment.merge(Serialized::default("history_path", path)),
            None => figment,
        }
    }

    /// Load from the standard provider stack.
    pub fn load() -> Result<Self> {
        Self::from_figment(Self::figment())
    }

    /// Extract and validate a configuration from `figment`.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let raw: RawConfig = figment.extract()?;

        Ok(Self {
            history_path: history_path(&raw.history_path.to_text())?,
            auto_load: raw.auto_load.to_flag("auto_load")?,
            auto_save: raw.auto_save.to_flag("auto_save")?,
        })
    }
}

/// Validate a history path given as text. Surrounding whitespace is
/// dropped; nothing else about the text is changed.
pub fn history_path(text: &str) -> Result<PathBuf> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CalcError::Config("History path cannot be empty.".into()));
    }
    Ok(PathBuf::from(text))
}

/// Parse a boolean flag.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}

/// Configuration as read from providers, before validation.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct RawConfig {
    history_path: RawValue,
    auto_load: RawValue,
    auto_save: RawValue,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            history_path: RawValue::Text(DEFAULT_HISTORY_PATH.to_string()),
            auto_load: RawValue::Bool(true),
            auto_save: RawValue::Bool(false),
        }
    }
}

/// Providers type values on their own (`yes` is a string, `1` a number,
/// `true` a bool), so accept any scalar and interpret it afterwards.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
enum RawValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Empty(Option<()>),
}

impl RawValue {
    fn to_text(&self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Int(n) => n.to_string(),
            RawValue::Float(x) => x.to_string(),
            RawValue::Text(s) => s.clone(),
            RawValue::Empty(_) => String::new(),
        }
    }

    fn to_flag(&self, field: &str) -> Result<bool> {
        if let RawValue::Bool(b) = self {
            return Ok(*b);
        }
        let text = self.to_text();
        parse_bool(&text).ok_or_else(|| {
            CalcError::Config(format!("Invalid boolean value for {}: {:?}", field, text))
        })
    }
}
