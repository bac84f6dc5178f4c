//! Configuration file loading for attrkit.
//!
//! Discovers and loads `attrkit.toml` from the working directory, or from an explicit path.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use attrkit_domain::WizardStep;
use attrkit_domain::wizard::{PACKAGE_STEP_ID, VERSION_STEP_ID};
use attrkit_types::DEFAULT_PACKAGE_TYPE;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "attrkit.toml";

/// Top-level configuration from attrkit.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AttrkitConfig {
    pub purl: PurlConfig,
    pub wizard: WizardConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PurlConfig {
    /// Package type used when none is given.
    pub default_type: String,
}

impl Default for PurlConfig {
    fn default() -> Self {
        Self {
            default_type: DEFAULT_PACKAGE_TYPE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Ordered wizard steps; the last one offers apply.
    pub steps: Vec<WizardStep>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                WizardStep::new(PACKAGE_STEP_ID, "package"),
                WizardStep::new(VERSION_STEP_ID, "version"),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Discover the attrkit.toml config file in `dir`.
pub fn discover_config(dir: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<AttrkitConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<AttrkitConfig> {
    let config: AttrkitConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// An explicit path must exist; otherwise fall back to discovery in `dir`, then defaults.
pub fn load_or_default(
    dir: &Utf8Path,
    explicit: Option<&Utf8Path>,
) -> anyhow::Result<AttrkitConfig> {
    if let Some(path) = explicit {
        return load_config(path);
    }
    match discover_config(dir) {
        Some(path) => load_config(&path),
        None => Ok(AttrkitConfig::default()),
    }
}

/// Configuration after applying CLI overrides.
#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub default_type: String,
    pub steps: Vec<WizardStep>,
    pub format: OutputFormat,
}

/// Builder for merging config file with CLI arguments.
pub struct ConfigMerger {
    config: AttrkitConfig,
}

impl ConfigMerger {
    pub fn new(config: AttrkitConfig) -> Self {
        Self { config }
    }

    /// CLI values replace file values when given. A blank default type falls back to `generic`.
    pub fn merge(self, cli_format: Option<OutputFormat>) -> MergedConfig {
        let default_type = match self.config.purl.default_type.trim() {
            "" => DEFAULT_PACKAGE_TYPE.to_string(),
            t => t.to_string(),
        };

        MergedConfig {
            default_type,
            steps: self.config.wizard.steps,
            format: cli_format.unwrap_or(self.config.output.format),
        }
    }
}

/// Parse `key=value` qualifier arguments.
pub fn parse_cli_qualifiers(
    qualifiers: &[String],
) -> anyhow::Result<std::collections::BTreeMap<String, String>> {
    let mut out = std::collections::BTreeMap::new();
    for entry in qualifiers {
        let mut parts = entry.splitn(2, '=');
        let key = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid qualifier '{}': missing key", entry))?;
        let value = parts
            .next()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| anyhow::anyhow!("invalid qualifier '{}': missing value", entry))?;
        out.insert(key.to_string(), value.to_string());
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let contents = r#"
[purl]
default_type = "npm"

[[wizard.steps]]
id = "namespace"
label = "namespace"

[[wizard.steps]]
id = "name"
label = "name"

[[wizard.steps]]
id = "version"
label = "version"

[output]
format = "json"
"#;

        let config = parse_config(contents).unwrap();
        assert_eq!(config.purl.default_type, "npm");
        assert_eq!(config.wizard.steps.len(), 3);
        assert_eq!(config.wizard.steps[1].id, "name");
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config("").unwrap();
        assert_eq!(config.purl.default_type, "generic");
        assert_eq!(config.wizard.steps.len(), 2);
        assert_eq!(config.wizard.steps[0].id, PACKAGE_STEP_ID);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(parse_config("[output]\nformat = \"yaml\"\n").is_err());
    }

    #[test]
    fn test_merge_cli_format_overrides() {
        let config = parse_config("[output]\nformat = \"json\"\n").unwrap();
        let merged = ConfigMerger::new(config.clone()).merge(Some(OutputFormat::Text));
        assert_eq!(merged.format, OutputFormat::Text);

        let merged = ConfigMerger::new(config).merge(None);
        assert_eq!(merged.format, OutputFormat::Json);
    }

    #[test]
    fn test_merge_blank_default_type() {
        let config = parse_config("[purl]\ndefault_type = \" \"\n").unwrap();
        let merged = ConfigMerger::new(config).merge(None);
        assert_eq!(merged.default_type, "generic");
    }

    #[test]
    fn test_parse_cli_qualifiers() {
        let parsed =
            parse_cli_qualifiers(&["arch=x86".to_string(), "distro=debian-10".to_string()])
                .expect("parse qualifiers");
        assert_eq!(parsed.get("arch").map(String::as_str), Some("x86"));
        assert_eq!(parsed.len(), 2);

        let err = parse_cli_qualifiers(&["=x".to_string()]).expect_err("missing key");
        assert!(err.to_string().contains("missing key"));
        let err = parse_cli_qualifiers(&["k=".to_string()]).expect_err("missing value");
        assert!(err.to_string().contains("missing value"));
    }

    #[test]
    fn test_discover_and_load() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());
        let cfg = load_or_default(&root, None).expect("default");
        assert_eq!(cfg.purl.default_type, "generic");

        std::fs::write(root.join(CONFIG_FILE_NAME), "[purl]\ndefault_type = \"cargo\"\n")
            .expect("write config");
        assert!(discover_config(&root).is_some());
        let cfg = load_or_default(&root, None).expect("load");
        assert_eq!(cfg.purl.default_type, "cargo");
    }

    #[test]
    fn test_explicit_missing_config_is_an_error() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let missing = root.join("nope.toml");
        assert!(load_or_default(&root, Some(&missing)).is_err());
    }
}
