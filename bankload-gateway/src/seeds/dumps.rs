use super::result::SeedsResult;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum DumpError {
    #[error("Seeds dump {path} is not accessible: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No seeds dumped for scenario {scenario} (expected {path})")]
    NotFound { scenario: String, path: PathBuf },

    #[error("Seeds dump {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Scenario name {0:?} is not a plain file name")]
    InvalidScenario(String),

    #[error("Unable to encode seeds: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Directory of `<scenario>_seeds.json` files.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SeedsDumps {
    dir: PathBuf,
}

impl SeedsDumps {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Dump file of `scenario`, which must be usable as a file stem.
    pub fn path(&self, scenario: &str) -> Result<PathBuf, DumpError> {
        if scenario.is_empty()
            || scenario.starts_with('.')
            || scenario.contains(|c: char| c == '/' || c == '\\' || c == '\0')
        {
            return Err(DumpError::InvalidScenario(scenario.to_string()));
        }
        Ok(self.dir.join(format!("{scenario}_seeds.json")))
    }

    /// Writes `result` for `scenario`, replacing any previous dump.
    pub fn save(&self, result: &SeedsResult, scenario: &str) -> Result<PathBuf, DumpError> {
        let path = self.path(scenario)?;
        let json = serde_json::to_string_pretty(result).map_err(DumpError::Encode)?;

        std::fs::create_dir_all(&self.dir).map_err(|source| DumpError::Io {
            path: self.dir.clone(),
            source,
        })?;
        std::fs::write(&path, json).map_err(|source| DumpError::Io {
            path: path.clone(),
            source,
        })?;

        info!(
            "Saved {} seeded users for {scenario} to {}",
            result.users.len(),
            path.display()
        );
        Ok(path)
    }

    pub fn load(&self, scenario: &str) -> Result<SeedsResult, DumpError> {
        let path = self.path(scenario)?;
        let json = match std::fs::read_to_string(&path) {
            Ok(json) => json,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(DumpError::NotFound {
                    scenario: scenario.to_string(),
                    path,
                })
            }
            Err(source) => return Err(DumpError::Io { path, source }),
        };

        let result: SeedsResult =
            serde_json::from_str(&json).map_err(|source| DumpError::Parse {
                path: path.clone(),
                source,
            })?;
        debug!("Loaded {} seeded users from {}", result.users.len(), path.display());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::result::tests::user;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path().join("nested").join("dumps"));
        let result = SeedsResult::new(vec![user("a"), user("b")]);

        let path = dumps.save(&result, "smoke").unwrap();
        assert!(path.ends_with("smoke_seeds.json"));
        assert_eq!(dumps.load("smoke").unwrap(), result);
    }

    #[test]
    fn save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path());

        dumps
            .save(&SeedsResult::new(vec![user("a"), user("b")]), "smoke")
            .unwrap();
        let second = SeedsResult::new(vec![user("c")]);
        dumps.save(&second, "smoke").unwrap();

        assert_eq!(dumps.load("smoke").unwrap(), second);
    }

    #[test]
    fn empty_result_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path());
        dumps.save(&SeedsResult::default(), "empty").unwrap();
        assert!(dumps.load("empty").unwrap().users.is_empty());
    }

    #[test]
    fn missing_dump_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path());
        let err = dumps.load("absent").unwrap_err();
        assert!(matches!(err, DumpError::NotFound { ref scenario, .. } if scenario == "absent"));
    }

    #[test]
    fn malformed_dump_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path());
        std::fs::write(dumps.path("broken").unwrap(), r#"{"users": [{"user_id": "a"}]}"#).unwrap();
        assert!(matches!(
            dumps.load("broken").unwrap_err(),
            DumpError::Parse { .. }
        ));
    }

    #[test]
    fn scenario_must_stay_in_dumps_dir() {
        let dir = tempfile::tempdir().unwrap();
        let dumps = SeedsDumps::new(dir.path().join("dumps"));

        for scenario in ["../escape", "nested/name", "..", "", "a\\b"] {
            assert!(
                matches!(
                    dumps.save(&SeedsResult::default(), scenario),
                    Err(DumpError::InvalidScenario(_))
                ),
                "{scenario:?}"
            );
            assert!(matches!(dumps.load(scenario), Err(DumpError::InvalidScenario(_))));
        }
        assert!(!dir.path().join("escape_seeds.json").exists());
    }
}
