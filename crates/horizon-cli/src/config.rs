// crates/horizon-cli/src/config.rs
//
// Runtime configuration for the Horizon CLI.
// Loaded from a TOML file or populated with defaults; command-line flags
// override individual values.

use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

use horizon_core::HorizonError;
use horizon_layout::LayoutConfig;

/// Runtime configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct HorizonConfig {
    /// Directory for field artefacts (phi_matrix.csv, kappa.csv, summary.json).
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    /// Directory holding `timeline/` and `timeline.index.json`.
    #[serde(default = "default_field_dir")]
    pub field_dir: String,

    /// Reference pair metric script.
    #[serde(default = "default_metric_script")]
    pub metric_script: String,

    /// Program that runs the metric script.
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Log level used when `RUST_LOG` is unset: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Layout thresholds; every key is optional.
    #[serde(default)]
    pub layout: LayoutConfig,
}

fn default_out_dir() -> String {
    "tools/out".to_string()
}

fn default_field_dir() -> String {
    "public/field".to_string()
}

fn default_metric_script() -> String {
    "horizon_ref.py".to_string()
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for HorizonConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            field_dir: default_field_dir(),
            metric_script: default_metric_script(),
            interpreter: default_interpreter(),
            log_level: default_log_level(),
            layout: LayoutConfig::default(),
        }
    }
}

impl HorizonConfig {
    /// Load configuration from a TOML file at the given path.
    pub fn load(path: &str) -> Result<Self, HorizonError> {
        let path = expand_tilde(path);
        let contents = fs::read_to_string(&path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                HorizonError::NotFound(format!("config file {}", path))
            } else {
                HorizonError::Io(format!("{}: {}", path, e))
            }
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, HorizonError> {
        let config: HorizonConfig =
            toml::from_str(contents).map_err(|e| HorizonError::Config(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), HorizonError> {
        let l = &self.layout;
        let thresholds = [
            ("snap_epsilon", l.snap_epsilon),
            ("rotation_snap_epsilon", l.rotation_snap_epsilon),
            ("probe_degenerate_norm", l.probe_degenerate_norm),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(HorizonError::Config(format!(
                    "layout.{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }
        if l.decimals > 12 {
            return Err(HorizonError::Config(format!(
                "layout.decimals must be at most 12, got {}",
                l.decimals
            )));
        }
        Ok(())
    }

    pub fn out_dir_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.out_dir))
    }

    pub fn field_dir_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.field_dir))
    }

    pub fn metric_script_path(&self) -> PathBuf {
        PathBuf::from(expand_tilde(&self.metric_script))
    }
}

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return format!("{}/{}", home.display(), rest);
        }
    }
    path.to_string()
}
