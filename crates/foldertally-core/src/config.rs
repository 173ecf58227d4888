/// Scan configuration.
///
/// All tuning knobs live in a single [`ScanConfig`] value handed to the
/// scanner at construction time. Frontends usually call
/// [`ScanConfig::from_env`], which reads a JSON file named by the
/// `FOLDERTALLY_CONFIG` environment variable and falls back to defaults.
///
/// ```json
/// { "progress_emit_every_n_items": 64, "walk_threads": 1 }
/// ```
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "FOLDERTALLY_CONFIG";

/// Where the scanner checks the cancellation token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CancellationGranularity {
    /// Between every enumerated entry and before every size read.
    #[default]
    PerFile,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Emit a `ScanProgress` snapshot after every N files. The final snapshot
    /// of a completed scan is always emitted regardless of N.
    pub progress_emit_every_n_items: u64,

    pub cancellation_check_granularity: CancellationGranularity,

    /// Directory walker threads. `0` = one per CPU, `1` = serial walk.
    pub walk_threads: usize,

    /// Number of values in the cosmetic settle sequence.
    pub settle_steps: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            progress_emit_every_n_items: 1,
            cancellation_check_granularity: CancellationGranularity::PerFile,
            walk_threads: 0,
            settle_steps: 24,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl ScanConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults if unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) if !path.is_empty() => Self::load(Path::new(&path)),
            _ => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.progress_emit_every_n_items == 0 {
            return Err(ConfigError::Invalid(
                "progress_emit_every_n_items must be at least 1".into(),
            ));
        }
        if self.settle_steps == 0 {
            return Err(ConfigError::Invalid("settle_steps must be at least 1".into()));
        }
        Ok(())
    }

    /// Resolved walker parallelism for `jwalk`.
    pub fn walk_parallelism(&self) -> jwalk::Parallelism {
        parallelism_for(self.walk_threads)
    }
}

/// Map a `walk_threads` setting onto a `jwalk` parallelism mode.
pub(crate) fn parallelism_for(walk_threads: usize) -> jwalk::Parallelism {
    match walk_threads {
        1 => jwalk::Parallelism::Serial,
        0 => jwalk::Parallelism::RayonNewPool(num_cpus::get()),
        n => jwalk::Parallelism::RayonNewPool(n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_emit_after_every_file() {
        let config = ScanConfig::default();
        assert_eq!(config.progress_emit_every_n_items, 1);
        assert_eq!(
            config.cancellation_check_granularity,
            CancellationGranularity::PerFile
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = ScanConfig::from_json_str(r#"{ "walk_threads": 1 }"#).unwrap();
        assert_eq!(config.walk_threads, 1);
        assert_eq!(config.progress_emit_every_n_items, 1);
        assert!(matches!(config.walk_parallelism(), jwalk::Parallelism::Serial));
    }

    #[test]
    fn test_granularity_spelling() {
        let config =
            ScanConfig::from_json_str(r#"{ "cancellation_check_granularity": "per-file" }"#)
                .unwrap();
        assert_eq!(
            config.cancellation_check_granularity,
            CancellationGranularity::PerFile
        );
    }

    #[test]
    fn test_zero_emit_interval_rejected() {
        let err = ScanConfig::from_json_str(r#"{ "progress_emit_every_n_items": 0 }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = ScanConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "progress_emit_every_n_items": 50, "settle_steps": 8 }}"#).unwrap();
        let config = ScanConfig::load(file.path()).unwrap();
        assert_eq!(config.progress_emit_every_n_items, 50);
        assert_eq!(config.settle_steps, 8);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScanConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
