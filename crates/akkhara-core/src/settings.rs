//! Global settings loaded from TOML.
//!
//! - `init_custom(toml_content)` sets a custom TOML before first `settings()` call
//! - `settings()` returns `&'static Settings` (lazy-init singleton)
//! - Default values are embedded via `include_str!("default_settings.toml")`

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::script::ScriptTag;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub patterns: PatternSettings,
    #[serde(default)]
    tables: BTreeMap<String, PathBuf>,
    #[serde(skip)]
    wildcard_chars: Vec<char>,
    /// Parsed table overrides, keyed by script.
    #[serde(skip)]
    tables_parsed: Vec<(ScriptTag, PathBuf)>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatternSettings {
    pub wildcards: Vec<String>,
}

impl Settings {
    pub fn wildcards(&self) -> &[char] {
        &self.wildcard_chars
    }

    pub fn table_override(&self, script: ScriptTag) -> Option<&Path> {
        self.tables_parsed
            .iter()
            .find(|(s, _)| *s == script)
            .map(|(_, p)| p.as_path())
    }

    pub fn table_overrides(&self) -> impl Iterator<Item = (ScriptTag, &Path)> {
        self.tables_parsed.iter().map(|(s, p)| (*s, p.as_path()))
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let mut s: Settings =
        toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    s.wildcard_chars = parse_wildcards(&s.patterns.wildcards)?;
    s.tables_parsed = parse_tables(&s.tables)?;
    Ok(s)
}

fn parse_wildcards(raw: &[String]) -> Result<Vec<char>, SettingsError> {
    let mut out = Vec::with_capacity(raw.len());
    for (i, w) in raw.iter().enumerate() {
        let mut chars = w.chars();
        let (Some(ch), None) = (chars.next(), chars.next()) else {
            return Err(SettingsError::InvalidValue {
                field: format!("patterns.wildcards[{i}]"),
                reason: "must be a single character".to_string(),
            });
        };
        if ch.is_alphanumeric() {
            return Err(SettingsError::InvalidValue {
                field: format!("patterns.wildcards[{i}]"),
                reason: format!("{ch:?} is a letter or digit"),
            });
        }
        out.push(ch);
    }
    Ok(out)
}

fn parse_tables(
    raw: &BTreeMap<String, PathBuf>,
) -> Result<Vec<(ScriptTag, PathBuf)>, SettingsError> {
    let mut out = Vec::with_capacity(raw.len());
    for (name, path) in raw {
        let field = || format!("tables.{name}");
        let script: ScriptTag = name.parse().map_err(|_| SettingsError::InvalidValue {
            field: field(),
            reason: "unknown script".to_string(),
        })?;
        if script == ScriptTag::Hub {
            return Err(SettingsError::InvalidValue {
                field: field(),
                reason: "the hub has no table".to_string(),
            });
        }
        if out.iter().any(|(s, _)| *s == script) {
            return Err(SettingsError::InvalidValue {
                field: field(),
                reason: format!("{script} is overridden twice"),
            });
        }
        out.push((script, path.clone()));
    }
    Ok(out)
}
