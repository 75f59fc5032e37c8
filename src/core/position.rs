//! # Position — A Verbatim Statement by a Thinker
//!
//! A [`Position`] is the atomic unit of the corpus: one statement, attributed
//! to one thinker, filed under a free-text topic. The engine never edits,
//! truncates or synthesizes position text; every query result is a view of
//! stored positions.
//!
//! ## Fields
//!
//! | Field | Source | Notes |
//! |-------|--------|-------|
//! | `id` | record | stable across runs |
//! | `thinker` | record | original casing, for display |
//! | `thinker_key` | derived | lower-cased, for indexing and filters |
//! | `text` | record (`position`) | verbatim |
//! | `topic` | record | may be empty |
//! | `keywords` | derived | [`extract_keywords`] of the text |
//! | `domain` | derived | [`classify_domain`] of topic + text |
//!
//! The derived fields are computed once in [`Position::from_record`] and
//! never change afterwards.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::nlu::{classify_domain, extract_keywords, Domain};

/// Identifier of a [`Position`], assigned by whoever authored the corpus.
pub type PositionId = i64;

/// Raw position record as it appears in the source.
///
/// Every field is required; a record missing one fails the whole load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    pub id: PositionId,
    pub thinker: String,
    pub position: String,
    pub topic: String,
}

/// An immutable philosophical statement plus its derived lexical metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct Position {
    pub id: PositionId,
    /// Author as written in the source.
    pub thinker: String,
    /// Lower-cased author, used by every index and filter.
    pub thinker_key: String,
    /// The statement, verbatim.
    pub text: String,
    pub topic: String,
    /// Lower-cased alphabetic tokens longer than two characters, stopwords removed.
    pub keywords: BTreeSet<String>,
    pub domain: Domain,
}

impl Position {
    /// Wraps a raw record, deriving `keywords` and `domain`.
    pub fn from_record(record: PositionRecord) -> Self {
        let keywords = extract_keywords(&record.position);
        let domain = classify_domain(&record.topic, &record.position);
        Self {
            id: record.id,
            thinker_key: record.thinker.to_lowercase(),
            thinker: record.thinker,
            text: record.position,
            topic: record.topic,
            keywords,
            domain,
        }
    }

    /// Lower-cased topic, the key of the by-topic index.
    pub fn topic_key(&self) -> String {
        self.topic.to_lowercase()
    }

    /// Whether this position belongs to `thinker` (case-insensitive).
    pub fn is_by(&self, thinker: &str) -> bool {
        self.thinker_key == thinker.to_lowercase()
    }

    /// Number of keywords shared with `other`.
    pub fn keyword_overlap(&self, other: &Position) -> usize {
        self.keywords.intersection(&other.keywords).count()
    }
}

impl From<PositionRecord> for Position {
    fn from(record: PositionRecord) -> Self {
        Position::from_record(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: PositionId, thinker: &str, text: &str, topic: &str) -> PositionRecord {
        PositionRecord {
            id,
            thinker: thinker.to_string(),
            position: text.to_string(),
            topic: topic.to_string(),
        }
    }

    #[test]
    fn derives_keywords_and_domain() {
        let p = Position::from_record(record(
            1,
            "Kuczynski",
            "Causation is not reducible to correlation",
            "causation",
        ));
        assert_eq!(p.thinker, "Kuczynski");
        assert_eq!(p.thinker_key, "kuczynski");
        assert_eq!(p.text, "Causation is not reducible to correlation");
        assert!(p.keywords.contains("causation"));
        assert!(p.keywords.contains("reducible"));
        assert!(p.keywords.contains("correlation"));
        assert_eq!(p.domain, Domain::Metaphysics);
    }

    #[test]
    fn derivation_is_repeatable() {
        let r = record(7, "x", "Meaning is use, for example in games.", "meaning");
        assert_eq!(Position::from_record(r.clone()), Position::from_record(r));
    }

    #[test]
    fn thinker_match_ignores_case() {
        let p = Position::from_record(record(2, "Hume", "Custom is the guide of life", ""));
        assert!(p.is_by("HUME"));
        assert!(!p.is_by("kant"));
    }

    #[test]
    fn missing_field_fails_deserialization() {
        let err = serde_json::from_str::<PositionRecord>(r#"{"id": 1, "thinker": "x", "topic": "t"}"#);
        assert!(err.is_err());
        let err = serde_json::from_str::<PositionRecord>(
            r#"{"id": "one", "thinker": "x", "position": "p", "topic": "t"}"#,
        );
        assert!(err.is_err());
    }
}
