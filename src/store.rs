//! # Corpus Store — Loading Position and Rule Records
//!
//! The engine only needs an ordered sequence of records; where they come
//! from is behind the [`CorpusSource`] trait.
//!
//! | Source | Use |
//! |--------|-----|
//! | [`JsonFileSource`] | two JSON files, each an array of records |
//! | [`InMemorySource`] | records already materialized by the caller |
//!
//! ## Failure Contract
//!
//! - Missing file → [`StoreError::SourceUnavailable`]; the engine logs a
//!   warning and continues with an empty sequence.
//! - Any record with a missing or mistyped field → the whole file fails
//!   with [`StoreError::MalformedRecord`]. Partial indices are worse than
//!   none, so nothing is skipped record by record.
//!
//! ## File Format
//!
//! ```json
//! [
//!   {"id": 1, "thinker": "Kuczynski", "position": "...", "topic": "causation"}
//! ]
//! ```
//!
//! ```json
//! [
//!   {"id": "r1", "name": "...", "domain": "epistemology",
//!    "antecedent_topics": ["knowledge"], "antecedent_concepts": ["belief"],
//!    "relation_type": "supports", "position_ids": [1, 2], "strength": 0.9}
//! ]
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::core::{PositionRecord, Rule};
use crate::error::StoreError;

/// Anything that can hand the engine its raw records.
pub trait CorpusSource: Send + Sync {
    fn load_positions(&self) -> Result<Vec<PositionRecord>, StoreError>;
    fn load_rules(&self) -> Result<Vec<Rule>, StoreError>;
}

/// Reads positions and rules from two JSON array files.
#[derive(Clone, Debug)]
pub struct JsonFileSource {
    positions_path: PathBuf,
    rules_path: PathBuf,
}

impl JsonFileSource {
    pub fn new(positions_path: impl Into<PathBuf>, rules_path: impl Into<PathBuf>) -> Self {
        Self {
            positions_path: positions_path.into(),
            rules_path: rules_path.into(),
        }
    }
}

impl CorpusSource for JsonFileSource {
    fn load_positions(&self) -> Result<Vec<PositionRecord>, StoreError> {
        let records: Vec<PositionRecord> = read_json_array(&self.positions_path)?;
        ensure_unique_ids(&records)?;
        Ok(records)
    }

    fn load_rules(&self) -> Result<Vec<Rule>, StoreError> {
        read_json_array(&self.rules_path)
    }
}

/// Records supplied directly, e.g. by a caller that reads them from a
/// database.
#[derive(Clone, Debug, Default)]
pub struct InMemorySource {
    positions: Vec<PositionRecord>,
    rules: Vec<Rule>,
}

impl InMemorySource {
    pub fn new(positions: Vec<PositionRecord>, rules: Vec<Rule>) -> Self {
        Self { positions, rules }
    }
}

impl CorpusSource for InMemorySource {
    fn load_positions(&self) -> Result<Vec<PositionRecord>, StoreError> {
        ensure_unique_ids(&self.positions)?;
        Ok(self.positions.clone())
    }

    fn load_rules(&self) -> Result<Vec<Rule>, StoreError> {
        Ok(self.rules.clone())
    }
}

/// Reads a JSON array of `T` from `path`, all-or-nothing.
fn read_json_array<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, StoreError> {
    if !path.exists() {
        return Err(StoreError::SourceUnavailable {
            path: path.to_path_buf(),
        });
    }
    let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| StoreError::MalformedRecord {
        path: path.to_path_buf(),
        source,
    })
}

/// Rejects a record set in which two positions share an id.
fn ensure_unique_ids(records: &[PositionRecord]) -> Result<(), StoreError> {
    let mut seen = HashSet::with_capacity(records.len());
    for r in records {
        if !seen.insert(r.id) {
            return Err(StoreError::DuplicatePosition { id: r.id });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn loads_well_formed_files() {
        let dir = tempfile::tempdir().unwrap();
        let positions = write_file(
            &dir,
            "positions.json",
            r#"[{"id": 1, "thinker": "Hume", "position": "Custom is the guide of life.", "topic": "custom"}]"#,
        );
        let rules = write_file(
            &dir,
            "rules.json",
            r#"[{"id": "r1", "name": "custom", "domain": "epistemology",
                 "antecedent_topics": ["custom"], "antecedent_concepts": ["habit"],
                 "relation_type": "supports", "position_ids": [1], "strength": 0.9}]"#,
        );
        let source = JsonFileSource::new(positions, rules);
        let p = source.load_positions().unwrap();
        assert_eq!(p.len(), 1);
        assert_eq!(p[0].thinker, "Hume");
        let r = source.load_rules().unwrap();
        assert_eq!(r[0].position_ids, vec![1]);
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonFileSource::new(dir.path().join("nope.json"), dir.path().join("nada.json"));
        assert!(matches!(
            source.load_positions(),
            Err(StoreError::SourceUnavailable { .. })
        ));
        assert!(matches!(
            source.load_rules(),
            Err(StoreError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn one_bad_record_fails_the_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let positions = write_file(
            &dir,
            "positions.json",
            r#"[{"id": 1, "thinker": "a", "position": "ok", "topic": "t"},
                {"id": 2, "thinker": "b", "topic": "t"}]"#,
        );
        let source = JsonFileSource::new(positions, dir.path().join("rules.json"));
        assert!(matches!(
            source.load_positions(),
            Err(StoreError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let rec = PositionRecord {
            id: 5,
            thinker: "x".to_string(),
            position: "p".to_string(),
            topic: "t".to_string(),
        };
        let source = InMemorySource::new(vec![rec.clone(), rec], Vec::new());
        assert!(matches!(
            source.load_positions(),
            Err(StoreError::DuplicatePosition { id: 5 })
        ));
    }
}
