//! Fixture loading and management.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading fixture files.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid fixture JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("case '{case}' has unknown mode '{mode}', expected legacy|strict|both")]
    UnknownMode { case: String, mode: String },
}

/// A single fixture test case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureCase {
    /// Case identifier.
    pub name: String,
    /// Function being tested (`printf`, `snprintf`, `itoa`, `utoa`, `reverse`).
    pub function: String,
    /// Behaviour reference (C standard clause or runtime note).
    #[serde(default)]
    pub reference: String,
    /// Input parameters (serialized).
    pub inputs: serde_json::Value,
    /// Expected output (serialized as string for comparison).
    pub expected_output: String,
    /// Mode the case applies to: `legacy`, `strict` or `both`.
    pub mode: String,
}

/// A collection of fixture cases for a function family.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixtureSet {
    /// Schema version.
    pub version: String,
    /// Function family name.
    pub family: String,
    /// Individual test cases.
    pub cases: Vec<FixtureCase>,
}

impl FixtureSet {
    /// Load fixture set from JSON string.
    ///
    /// Every case's mode is checked so a typo cannot silently drop a case
    /// from both runs.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let set: Self = serde_json::from_str(json)?;
        for case in &set.cases {
            if !matches!(
                case.mode.to_ascii_lowercase().as_str(),
                "legacy" | "strict" | "both"
            ) {
                return Err(FixtureError::UnknownMode {
                    case: case.name.clone(),
                    mode: case.mode.clone(),
                });
            }
        }
        Ok(set)
    }

    /// Serialize fixture set to JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load fixture set from a file path.
    pub fn from_file(path: &Path) -> Result<Self, FixtureError> {
        let content = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Load every `*.json` fixture set in `dir`, sorted by file name.
    pub fn load_dir(
        dir: &Path,
    ) -> Result<Vec<(PathBuf, Result<Self, FixtureError>)>, FixtureError> {
        let entries = std::fs::read_dir(dir).map_err(|source| FixtureError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let mut paths: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| path.extension().and_then(|s| s.to_str()) == Some("json"))
            .collect();
        paths.sort();
        Ok(paths
            .into_iter()
            .map(|path| {
                let set = Self::from_file(&path);
                (path, set)
            })
            .collect())
    }
}
