use anyhow::{bail, Context, Result};
use glob::Pattern;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILENAME: &str = "config.yaml";

/// Hook configuration, loaded from $XDG_CONFIG_HOME/tscheck/config.yaml.
/// Every field is optional; a missing file means all defaults.
#[derive(Debug, Deserialize)]
pub struct HookConfig {
    /// Type-checker invocation (program + arguments)
    #[serde(default = "default_command")]
    pub command: Vec<String>,
    /// Wall-clock bound on the type-checker subprocess
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Glob patterns for edited files that should skip the check
    #[serde(default)]
    pub ignore: Vec<String>,
    /// Override path for the error log file
    #[serde(default)]
    pub error_log: Option<PathBuf>,
}

fn default_command() -> Vec<String> {
    ["bun", "tsc", "--noEmit", "--pretty", "false"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            command: default_command(),
            timeout_secs: default_timeout_secs(),
            ignore: Vec::new(),
            error_log: None,
        }
    }
}

impl HookConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an edited file matches any ignore pattern.
    /// Patterns are tried against the full path and the bare filename.
    pub fn is_ignored(&self, file_path: &str) -> bool {
        self.ignore
            .iter()
            .filter_map(|p| Pattern::new(p).ok())
            .any(|pattern| {
                if pattern.matches(file_path) {
                    return true;
                }
                Path::new(file_path)
                    .file_name()
                    .is_some_and(|name| pattern.matches(name.to_string_lossy().as_ref()))
            })
    }
}

/// Get the config file path under XDG config
fn config_path() -> PathBuf {
    let xdg_config = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });

    xdg_config.join("tscheck").join(CONFIG_FILENAME)
}

/// Load the hook config, falling back to defaults when no file exists.
/// An unreadable or invalid config file is an error, not a silent default.
pub fn load() -> Result<HookConfig> {
    let path = config_path();
    if !path.exists() {
        return Ok(HookConfig::default());
    }
    load_from(&path)
}

fn load_from(path: &Path) -> Result<HookConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;

    let config: HookConfig = serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config: {}", path.display()))?;

    validate(&config, path)?;
    Ok(config)
}

fn validate(config: &HookConfig, config_path: &Path) -> Result<()> {
    if config.command.is_empty() {
        bail!(
            "Invalid config at {}: 'command' must not be empty",
            config_path.display()
        );
    }
    for pattern in &config.ignore {
        if Pattern::new(pattern).is_err() {
            bail!(
                "Invalid config at {}: bad ignore glob '{}'",
                config_path.display(),
                pattern
            );
        }
    }
    Ok(())
}
