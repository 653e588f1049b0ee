//! `tabcheck.toml` settings. Every field is optional in the file; absent
//! fields and a missing file both fall back to the defaults below.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use tabcheck_eval::OraclePolicy;
use tabcheck_generate::SuiteKind;

use super::atomic::write_bytes_atomic;
use super::{WorkspaceError, WorkspaceResult};

pub const DEFAULT_CONFIG_FILE: &str = "tabcheck.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding the shipped suite files.
    pub data_dir: PathBuf,
    /// Parent directory for run artifacts.
    pub runs_dir: PathBuf,
    pub max_examples: usize,
    pub suites: SuitePaths,
    pub policies: PolicySettings,
    pub random: RandomSettings,
    pub pairwise: PairwiseSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            runs_dir: PathBuf::from("runs"),
            max_examples: 20,
            suites: SuitePaths::default(),
            policies: PolicySettings::default(),
            random: RandomSettings::default(),
            pairwise: PairwiseSettings::default(),
        }
    }
}

/// Per-suite file overrides; unset suites live in `data_dir`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitePaths {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairwise: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<PathBuf>,
}

/// Per-suite oracle policy overrides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicySettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pairwise: Option<OraclePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub random: Option<OraclePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub negative: Option<OraclePolicy>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RandomSettings {
    pub count: usize,
    pub seed: u64,
    pub max_attempts: u32,
    pub valid_only: bool,
}

impl Default for RandomSettings {
    fn default() -> Self {
        Self {
            count: 18,
            seed: 0,
            max_attempts: 1000,
            valid_only: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PairwiseSettings {
    pub seed: u64,
}

impl Settings {
    pub fn suite_path(&self, kind: SuiteKind) -> PathBuf {
        let configured = match kind {
            SuiteKind::Pairwise => &self.suites.pairwise,
            SuiteKind::Random => &self.suites.random,
            SuiteKind::Negative => &self.suites.negative,
        };
        configured
            .clone()
            .unwrap_or_else(|| kind.default_path(&self.data_dir))
    }

    pub fn policy(&self, kind: SuiteKind) -> OraclePolicy {
        let configured = match kind {
            SuiteKind::Pairwise => self.policies.pairwise,
            SuiteKind::Random => self.policies.random,
            SuiteKind::Negative => self.policies.negative,
        };
        configured.unwrap_or_else(|| OraclePolicy::for_suite(kind))
    }
}

pub fn load_settings(path: &Path) -> WorkspaceResult<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = std::fs::read_to_string(path)?;
    let settings: Settings = toml::from_str(&content)?;
    Ok(settings)
}

pub fn save_settings(path: &Path, settings: &Settings) -> WorkspaceResult<()> {
    let encoded = toml::to_string_pretty(settings)?;
    write_bytes_atomic(path, encoded.as_bytes()).map_err(WorkspaceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("tabcheck_settings_{}", uuid::Uuid::new_v4()))
            .join(name)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = load_settings(&temp_path("absent.toml")).expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.suite_path(SuiteKind::Pairwise),
            PathBuf::from("data").join("pairwise_tests.txt")
        );
        assert_eq!(settings.policy(SuiteKind::Negative), OraclePolicy::CrashIsExpected);
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let settings: Settings = toml::from_str(
            r#"
            data_dir = "fixtures"

            [policies]
            random = "crash_is_failure"

            [random]
            seed = 7
            "#,
        )
        .expect("parse");

        assert_eq!(settings.random.seed, 7);
        assert_eq!(settings.random.count, 18);
        assert_eq!(settings.policy(SuiteKind::Random), OraclePolicy::CrashIsFailure);
        assert_eq!(settings.policy(SuiteKind::Pairwise), OraclePolicy::CrashIsFailure);
        assert_eq!(
            settings.suite_path(SuiteKind::Negative),
            PathBuf::from("fixtures").join("negative_tests.csv")
        );
    }

    #[test]
    fn saved_settings_load_back() {
        let path = temp_path(DEFAULT_CONFIG_FILE);
        let mut settings = Settings::default();
        settings.pairwise.seed = 3;
        settings.suites.random = Some(PathBuf::from("suites/random.csv"));

        save_settings(&path, &settings).expect("save");
        assert_eq!(load_settings(&path).expect("load"), settings);

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let parsed: Result<Settings, _> = toml::from_str("[policies]\nnegative = \"lenient\"\n");
        assert!(parsed.is_err());
    }
}
