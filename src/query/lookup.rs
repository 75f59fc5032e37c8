//! Direct index lookups: topic, domain, thinker listings and corpus
//! statistics. No scoring, no graph traversal beyond edge counts.

use std::collections::BTreeSet;

use crate::core::{Domain, PositionId};

use super::results::{PositionView, Statistics};
use super::KnowledgeBase;

impl KnowledgeBase {
    /// Positions whose topic contains, or is contained by, `topic`
    /// (case-insensitive), optionally restricted to one thinker.
    ///
    /// Every position whose topic equals `topic` is always included.
    pub fn get_positions_by_topic(&self, topic: &str, thinker: Option<&str>) -> Vec<PositionView> {
        self.views(self.corpus.ids_matching_topic(topic), thinker, usize::MAX)
    }

    /// Positions classified under `domain`, in source order, at most `max`.
    pub fn get_positions_by_domain(
        &self,
        domain: Domain,
        thinker: Option<&str>,
        max: usize,
    ) -> Vec<PositionView> {
        self.views(self.corpus.ids_by_domain(domain).to_vec(), thinker, max)
    }

    /// Topics sharing a word with `topic`, sorted.
    pub fn get_related_topics(&self, topic: &str) -> Vec<String> {
        self.topics.related_to(topic)
    }

    /// All indexed topics (lower-cased), or the original topic strings of
    /// one thinker's positions. Sorted and distinct either way.
    pub fn get_all_topics(&self, thinker: Option<&str>) -> Vec<String> {
        match thinker {
            Some(thinker) => self
                .corpus
                .ids_by_thinker(thinker)
                .iter()
                .filter_map(|id| self.corpus.get(*id))
                .map(|p| p.topic.clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect(),
            None => self.corpus.topic_keys().map(str::to_string).collect(),
        }
    }

    /// Lower-cased thinker keys, sorted.
    pub fn get_all_thinkers(&self) -> Vec<String> {
        self.corpus.thinker_keys().map(str::to_string).collect()
    }

    pub fn statistics(&self) -> Statistics {
        let thinker_counts = self.corpus.thinker_counts();
        Statistics {
            total_positions: self.corpus.position_count(),
            primary_positions: self.corpus.ids_by_thinker(self.primary_thinker()).len(),
            total_rules: self.corpus.rule_count(),
            total_topics: self.corpus.topic_keys().count(),
            total_thinkers: thinker_counts.len(),
            thinker_counts,
            domain_counts: self.corpus.domain_counts(),
            entailments: self.graphs.entailment_count(),
            contradictions: self.graphs.contradiction_count(),
            specificities: self.graphs.specificity_count(),
        }
    }

    fn views(&self, ids: Vec<PositionId>, thinker: Option<&str>, max: usize) -> Vec<PositionView> {
        let thinker = thinker.map(str::to_lowercase);
        ids.into_iter()
            .filter_map(|id| self.corpus.get(id))
            .filter(|p| thinker.as_deref().map_or(true, |t| p.thinker_key == t))
            .take(max)
            .map(PositionView::from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::query::fixtures::{record, sample};

    #[test]
    fn topic_lookup_includes_exact_matches() {
        let kb = sample();
        for pos in kb.corpus().positions() {
            let found = kb.get_positions_by_topic(&pos.topic, None);
            assert!(found.iter().any(|v| v.id == pos.id), "missing {}", pos.id);
        }
    }

    #[test]
    fn topic_lookup_is_substring_both_ways() {
        let kb = sample();
        let ids: Vec<_> = kb
            .get_positions_by_topic("theory of meaning", None)
            .iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![10, 11, 12]);
        let ids: Vec<_> = kb.get_positions_by_topic("KNOW", Some("Hume")).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn untitled_positions_match_every_topic() {
        let kb = KnowledgeBase::build(
            vec![record(1, "x", "Causation is constant conjunction", "")],
            Vec::new(),
            EngineConfig::default(),
        );
        let found = kb.get_positions_by_topic("causation", None);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);
    }

    #[test]
    fn domain_lookup_filters_and_caps() {
        let kb = sample();
        let all = kb.get_positions_by_domain(Domain::PhilosophyOfLanguage, None, 50);
        assert_eq!(all.iter().map(|v| v.id).collect::<Vec<_>>(), vec![10, 11, 12]);
        assert_eq!(kb.get_positions_by_domain(Domain::PhilosophyOfLanguage, None, 2).len(), 2);
        assert!(kb
            .get_positions_by_domain(Domain::PhilosophyOfLanguage, Some("hume"), 50)
            .is_empty());
    }

    #[test]
    fn listings_are_sorted() {
        let kb = KnowledgeBase::build(
            vec![
                record(1, "Ryle", "Minds are not ghosts", "Philosophy of Mind"),
                record(2, "Ryle", "Knowing how is not knowing that", "knowledge"),
                record(3, "Austin", "Some utterances are acts", "speech acts"),
            ],
            Vec::new(),
            EngineConfig::default(),
        );
        assert_eq!(kb.get_all_thinkers(), vec!["austin", "ryle"]);
        assert_eq!(
            kb.get_all_topics(None),
            vec!["knowledge", "philosophy of mind", "speech acts"]
        );
        assert_eq!(kb.get_all_topics(Some("RYLE")), vec!["Philosophy of Mind", "knowledge"]);
        assert!(kb.get_all_topics(Some("nobody")).is_empty());
    }

    #[test]
    fn related_topics_share_a_word() {
        let kb = KnowledgeBase::build(
            vec![
                record(1, "x", "a", "philosophy of mind"),
                record(2, "x", "b", "mind and body"),
                record(3, "x", "c", "ethics"),
            ],
            Vec::new(),
            EngineConfig::default(),
        );
        assert_eq!(kb.get_related_topics("Mind and Body"), vec!["philosophy of mind"]);
        assert!(kb.get_related_topics("ethics").is_empty());
    }

    #[test]
    fn statistics_counts_pairs_once() {
        let kb = sample();
        let stats = kb.statistics();
        assert_eq!(stats.total_positions, 8);
        assert_eq!(stats.primary_positions, 5);
        assert_eq!(stats.total_rules, 2);
        assert_eq!(stats.total_topics, 4);
        assert_eq!(stats.total_thinkers, 2);
        assert_eq!(stats.thinker_counts["hume"], 3);
        assert_eq!(stats.contradictions, 1);
        let adjacency: usize = kb.corpus().positions().map(|p| kb.graphs().contradicting(p.id).count()).sum();
        assert_eq!(stats.contradictions * 2, adjacency);
        assert_eq!(stats.entailments, kb.graphs().entailment_count());
    }

    #[test]
    fn empty_statistics() {
        let stats = KnowledgeBase::empty(EngineConfig::default()).statistics();
        assert_eq!(stats.total_positions, 0);
        assert_eq!(stats.contradictions, 0);
        assert!(stats.domain_counts.is_empty());
    }
}
