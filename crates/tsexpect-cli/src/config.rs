use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "tsexpect.json";

/// Accepts `"failFast": true` as well as `"failFast": "yes"`.
fn deserialize_bool_or_string<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        String(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::String(s)) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(Error::custom(format!(
                "invalid boolean value: '{s}'. Expected true, false, 'true', or 'false'"
            ))),
        },
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TsExpectConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub color: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_bool_or_string")]
    pub fail_fast: Option<bool>,
}

pub fn parse_config(source: &str) -> Result<TsExpectConfig> {
    serde_json::from_str(source).context("failed to parse tsexpect.json")
}

pub fn load_config(path: &Path) -> Result<TsExpectConfig> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    parse_config(&source).with_context(|| format!("in {}", path.display()))
}

/// `--config` wins; otherwise a `tsexpect.json` beside the fixture is used if present.
pub fn find_config(explicit: Option<&Path>, fixture: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    let candidate = fixture
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(CONFIG_FILE_NAME);
    candidate.is_file().then_some(candidate)
}

/// Settings after merging the config file with command-line flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOptions {
    pub format: OutputFormat,
    pub color: bool,
    pub fail_fast: bool,
}

/// Flags override the file. Color also requires a terminal and is never
/// used for JSON output.
pub fn resolve_options(
    config: &TsExpectConfig,
    format: Option<OutputFormat>,
    no_color: bool,
    fail_fast: bool,
    is_terminal: bool,
) -> ResolvedOptions {
    let format = format.or(config.format).unwrap_or_default();
    let color = !no_color
        && is_terminal
        && format == OutputFormat::Text
        && config.color.unwrap_or(true);
    ResolvedOptions {
        format,
        color,
        fail_fast: fail_fast || config.fail_fast.unwrap_or(false),
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
