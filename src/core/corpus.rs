//! # Corpus — Positions, Rules and Lookup Indices
//!
//! The [`Corpus`] is the in-memory store every query reads from. It is
//! built once from the loaded records and is immutable afterwards.
//!
//! ## Storage
//!
//! - **Positions**: `HashMap<PositionId, Position>` plus `order`, the ids in
//!   source order
//! - **Rules**: `Vec<Rule>` in source order
//!
//! ## Indices
//!
//! | Index | Key | Value |
//! |-------|-----|-------|
//! | `by_thinker` | lower-cased thinker | ids, source order |
//! | `by_topic` | lower-cased topic | ids, source order |
//! | `by_domain` | [`Domain`] | ids, source order |
//! | `keyword_index` | keyword | set of ids |
//!
//! All four are filled in a single pass by [`Corpus::rebuild_index`]. An
//! empty position set gives empty indices.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::position::{Position, PositionId};
use super::rule::Rule;
use crate::nlu::Domain;

/// In-memory corpus with its lookup indices.
#[derive(Debug, Default)]
pub struct Corpus {
    positions: HashMap<PositionId, Position>,
    /// Position ids in source order.
    order: Vec<PositionId>,
    rules: Vec<Rule>,

    pub(crate) by_thinker: BTreeMap<String, Vec<PositionId>>,
    pub(crate) by_topic: BTreeMap<String, Vec<PositionId>>,
    pub(crate) by_domain: BTreeMap<Domain, Vec<PositionId>>,
    pub(crate) keyword_index: BTreeMap<String, BTreeSet<PositionId>>,
}

impl Corpus {
    /// Builds a corpus and its indices.
    ///
    /// Positions keep the order given. Ids are expected to be unique; the
    /// store rejects duplicates before this point, and a later duplicate
    /// would replace the earlier one here.
    pub fn new(positions: Vec<Position>, rules: Vec<Rule>) -> Self {
        let mut corpus = Corpus {
            rules,
            ..Default::default()
        };
        for position in positions {
            let id = position.id;
            if corpus.positions.insert(id, position).is_none() {
                corpus.order.push(id);
            }
        }
        corpus.rebuild_index();
        corpus
    }

    /// Rebuilds the four lookup indices from the stored positions.
    pub fn rebuild_index(&mut self) {
        self.by_thinker.clear();
        self.by_topic.clear();
        self.by_domain.clear();
        self.keyword_index.clear();

        for id in &self.order {
            let Some(pos) = self.positions.get(id) else {
                continue;
            };
            self.by_thinker
                .entry(pos.thinker_key.clone())
                .or_default()
                .push(*id);
            self.by_topic.entry(pos.topic_key()).or_default().push(*id);
            self.by_domain.entry(pos.domain).or_default().push(*id);
            for kw in &pos.keywords {
                self.keyword_index.entry(kw.clone()).or_default().insert(*id);
            }
        }
    }

    pub fn get(&self, id: PositionId) -> Option<&Position> {
        self.positions.get(&id)
    }

    pub fn contains(&self, id: PositionId) -> bool {
        self.positions.contains_key(&id)
    }

    /// Positions in source order.
    pub fn positions(&self) -> impl Iterator<Item = &Position> + '_ {
        self.order.iter().filter_map(|id| self.positions.get(id))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn position_count(&self) -> usize {
        self.order.len()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Ids authored by `thinker` (case-insensitive), source order.
    pub fn ids_by_thinker(&self, thinker: &str) -> &[PositionId] {
        self.by_thinker
            .get(&thinker.to_lowercase())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids classified under `domain`, source order.
    pub fn ids_by_domain(&self, domain: Domain) -> &[PositionId] {
        self.by_domain
            .get(&domain)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Ids whose topic contains `topic` or is contained by it
    /// (case-insensitive), in topic-key order.
    ///
    /// An empty stored topic is contained in every query topic.
    pub fn ids_matching_topic(&self, topic: &str) -> Vec<PositionId> {
        let topic_lower = topic.to_lowercase();
        let mut ids = Vec::new();
        for (indexed, pids) in &self.by_topic {
            if indexed.contains(topic_lower.as_str()) || topic_lower.contains(indexed.as_str()) {
                ids.extend_from_slice(pids);
            }
        }
        ids
    }

    /// Distinct lower-cased topics, sorted.
    pub fn topic_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_topic.keys().map(String::as_str)
    }

    /// Distinct lower-cased thinkers, sorted.
    pub fn thinker_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.by_thinker.keys().map(String::as_str)
    }

    /// Number of positions per lower-cased thinker.
    pub fn thinker_counts(&self) -> BTreeMap<String, usize> {
        self.by_thinker
            .iter()
            .map(|(t, ids)| (t.clone(), ids.len()))
            .collect()
    }

    /// Number of positions per domain.
    pub fn domain_counts(&self) -> BTreeMap<Domain, usize> {
        self.by_domain
            .iter()
            .map(|(d, ids)| (*d, ids.len()))
            .collect()
    }

    /// Keyword-index entries, sorted by keyword.
    pub fn keyword_entries(&self) -> impl Iterator<Item = (&str, &BTreeSet<PositionId>)> + '_ {
        self.keyword_index.iter().map(|(k, ids)| (k.as_str(), ids))
    }

    pub fn ids_with_keyword(&self, keyword: &str) -> Option<&BTreeSet<PositionId>> {
        self.keyword_index.get(keyword)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PositionRecord;

    fn pos(id: PositionId, thinker: &str, text: &str, topic: &str) -> Position {
        Position::from_record(PositionRecord {
            id,
            thinker: thinker.to_string(),
            position: text.to_string(),
            topic: topic.to_string(),
        })
    }

    fn sample() -> Corpus {
        Corpus::new(
            vec![
                pos(3, "Kuczynski", "Knowledge is justified belief.", "Knowledge"),
                pos(1, "Hume", "Causation is constant conjunction.", "causation"),
                pos(2, "kuczynski", "Causation is not constant conjunction.", "Causation"),
                pos(4, "Hume", "Untitled remark.", ""),
            ],
            Vec::new(),
        )
    }

    #[test]
    fn empty_corpus_has_empty_indices() {
        let c = Corpus::new(Vec::new(), Vec::new());
        assert_eq!(c.position_count(), 0);
        assert!(c.by_thinker.is_empty());
        assert!(c.by_topic.is_empty());
        assert!(c.by_domain.is_empty());
        assert!(c.keyword_index.is_empty());
    }

    #[test]
    fn thinker_index_is_case_insensitive_and_ordered() {
        let c = sample();
        assert_eq!(c.ids_by_thinker("KUCZYNSKI"), &[3, 2]);
        assert_eq!(c.ids_by_thinker("hume"), &[1, 4]);
        assert!(c.ids_by_thinker("kant").is_empty());
    }

    #[test]
    fn topic_index_lowercases_keys() {
        let c = sample();
        assert_eq!(c.by_topic.get("causation").unwrap(), &vec![1, 2]);
        assert_eq!(c.by_topic.get("knowledge").unwrap(), &vec![3]);
    }

    #[test]
    fn keyword_index_is_inverted() {
        let c = sample();
        let ids = c.ids_with_keyword("conjunction").unwrap();
        assert_eq!(ids.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn topic_substring_matching_both_ways() {
        let c = sample();
        // the untitled position (topic "") sorts first and matches everything
        assert_eq!(c.ids_matching_topic("caus"), vec![4, 1, 2]);
        assert_eq!(c.ids_matching_topic("theory of causation"), vec![4, 1, 2]);
        assert_eq!(c.ids_matching_topic("").len(), 4);
    }

    #[test]
    fn empty_topic_matches_any_query_topic() {
        let c = sample();
        for topic in ["ethics", "Causation", "philosophy of mind", ""] {
            assert!(c.ids_matching_topic(topic).contains(&4), "{topic}");
        }
    }

    #[test]
    fn source_order_is_preserved() {
        let c = sample();
        let ids: Vec<_> = c.positions().map(|p| p.id).collect();
        assert_eq!(ids, vec![3, 1, 2, 4]);
    }
}
