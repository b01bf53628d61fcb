//! Layered dashboard settings.
//!
//! Settings come from built-in defaults, then an optional TOML file, then
//! `VITALWATCH_*` environment variables. Command-line flags are applied on
//! top by the binary.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use vitalwatch_types::Tolerance;

use crate::data::duration::parse_duration;
use crate::data::Thresholds;

/// Prefix of the environment variables, e.g. `VITALWATCH_TOLERANCE`.
const ENV_PREFIX: &str = "VITALWATCH";

/// A child registered with the in-process simulator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChildConfig {
    pub name: String,
    pub age_months: f64,
}

impl ChildConfig {
    pub fn new(name: impl Into<String>, age_months: f64) -> Self {
        Self {
            name: name.into(),
            age_months,
        }
    }
}

/// Dashboard settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Heart-rate tolerance in bpm before a reading turns critical.
    pub tolerance: f64,
    /// How often the dashboard polls its source (e.g. "1s").
    pub refresh: String,
    /// How often the in-process simulator emits (e.g. "2s").
    pub interval: String,
    /// Where the `e` key writes its export.
    pub export_path: PathBuf,
    /// Children simulated when no file or stream is given.
    pub children: Vec<ChildConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::HEART_RATE.value(),
            refresh: "1s".to_string(),
            interval: "2s".to_string(),
            export_path: PathBuf::from("vitals_export.json"),
            children: vec![
                ChildConfig::new("Fatima", 8.0),
                ChildConfig::new("Ibrahim", 36.0),
                ChildConfig::new("Chioma", 6.0),
                ChildConfig::new("Mary", 12.0),
                ChildConfig::new("John", 24.0),
                ChildConfig::new("Ruth", 4.0),
                ChildConfig::new("Paul", 18.0),
            ],
        }
    }
}

impl Settings {
    /// Load settings, layering an optional file and the environment.
    ///
    /// A path that was given explicitly must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_layered(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_layered(path: Option<&Path>, env: Environment) -> Result<Self> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(true));
        }
        let config = builder
            .add_source(env)
            .build()
            .context("failed to load settings")?;

        let settings: Settings = config.try_deserialize().context("invalid settings")?;
        tracing::debug!(?settings, "loaded settings");
        Ok(settings)
    }

    /// Status thresholds derived from the tolerance.
    pub fn thresholds(&self) -> Result<Thresholds> {
        let tolerance = Tolerance::new(self.tolerance)?;
        Ok(Thresholds::new(tolerance))
    }

    pub fn refresh_interval(&self) -> Result<Duration> {
        positive_duration(&self.refresh).context("invalid refresh interval")
    }

    pub fn emit_interval(&self) -> Result<Duration> {
        positive_duration(&self.interval).context("invalid emission interval")
    }
}

fn positive_duration(s: &str) -> Result<Duration> {
    let duration = parse_duration(s)?;
    if duration.is_zero() {
        bail!("Duration must be greater than zero: {}", s);
    }
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn toml_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.tolerance, 10.0);
        assert_eq!(settings.children.len(), 7);
        assert_eq!(settings.children[0], ChildConfig::new("Fatima", 8.0));
        assert_eq!(settings.refresh_interval().unwrap(), Duration::from_secs(1));
        assert_eq!(settings.emit_interval().unwrap(), Duration::from_secs(2));
        assert_eq!(settings.thresholds().unwrap(), Thresholds::default());
    }

    #[test]
    fn test_load_from_file() {
        let file = toml_file(
            r#"
tolerance = 5.0
refresh = "500ms"

[[children]]
name = "Ruth"
age_months = 4.5
"#,
        );

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.tolerance, 5.0);
        assert_eq!(
            settings.refresh_interval().unwrap(),
            Duration::from_millis(500)
        );
        // Unset keys keep their defaults
        assert_eq!(settings.interval, "2s");
        assert_eq!(settings.children, vec![ChildConfig::new("Ruth", 4.5)]);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");
        assert!(Settings::load(Some(&path)).is_err());
    }

    #[test]
    fn test_invalid_values() {
        let settings = Settings {
            tolerance: -1.0,
            refresh: "soon".to_string(),
            ..Settings::default()
        };
        assert!(settings.thresholds().is_err());
        assert!(settings.refresh_interval().is_err());
    }

    #[test]
    fn test_zero_intervals_are_rejected() {
        for zero in ["0s", "0ms", "0.0s"] {
            let settings = Settings {
                refresh: zero.to_string(),
                interval: zero.to_string(),
                ..Settings::default()
            };
            assert!(settings.refresh_interval().is_err(), "{}", zero);
            assert!(settings.emit_interval().is_err(), "{}", zero);
        }
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    #[test]
    fn test_environment_overrides_file() {
        let file = toml_file(
            r#"
tolerance = 5.0
refresh = "500ms"
"#,
        );

        let settings = Settings::load_layered(
            Some(file.path()),
            env(&[("VITALWATCH_TOLERANCE", "7.5"), ("VITALWATCH_INTERVAL", "3s")]),
        )
        .unwrap();

        assert_eq!(settings.tolerance, 7.5);
        assert_eq!(settings.emit_interval().unwrap(), Duration::from_secs(3));
        // Not set in the environment, so the file wins
        assert_eq!(settings.refresh, "500ms");
    }

    #[test]
    fn test_environment_without_file() {
        let settings =
            Settings::load_layered(None, env(&[("VITALWATCH_EXPORT_PATH", "out.json")])).unwrap();
        assert_eq!(settings.export_path, PathBuf::from("out.json"));
        assert_eq!(settings.tolerance, 10.0);
    }
}
