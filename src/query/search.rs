//! # Search — Semantic Query, Rules, Inference and Critique
//!
//! ## Candidate Generation (`query`)
//!
//! ```text
//! for each query keyword k:
//!     exact:  keyword_index[k]
//!     fuzzy:  keyword_index[ik] where k ⊂ ik or ik ⊂ k
//!             (the contained keyword must be ≥ fuzzy_min_keyword_len)
//! ∩ thinker filter, ∩ domain filter
//! ```
//!
//! The fuzzy step lets "causal" find "causation" and "knowledge" find
//! "knowledgeable". The length floor keeps three-letter keywords from
//! matching half the index.
//!
//! ## Ranking
//!
//! Candidates are scored with [`relevance`](super::scoring::relevance) and
//! sorted descending. Ties keep ascending id order.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashSet};

use crate::core::{Domain, PositionId};
use crate::nlu::{extract_query_keywords, normalize};

use super::results::{
    round3, ActivatedRule, Critique, EntailedPosition, InferenceResult, PositionRef,
    PositionView, ScoredPosition,
};
use super::scoring::{relevance, ScoringQuery};
use super::KnowledgeBase;

/// Positions from the head of an `infer` result that seed the entailment hop.
const ENTAILMENT_SEEDS: usize = 10;

/// Cap on entailed positions reported by `infer`.
const MAX_ENTAILED: usize = 10;

/// Language that marks a position as arguing against something.
pub const CRITICAL_MARKERS: &[&str] = &[
    "wrong", "false", "mistaken", "fails", "inadequate", "cannot", "error", "rejects", "denies",
    "critique", "problem", "flaw", "doesn't", "impossible",
];

impl KnowledgeBase {
    /// Ranks stored positions against free text.
    ///
    /// Optional filters restrict candidates to one thinker
    /// (case-insensitive) and/or one domain before scoring.
    pub fn query(
        &self,
        text: &str,
        max_results: usize,
        thinker: Option<&str>,
        domain: Option<Domain>,
    ) -> Vec<ScoredPosition> {
        let keywords = extract_query_keywords(text);
        let mut candidates = self.candidates(&keywords);

        if let Some(thinker) = thinker {
            let allowed: HashSet<PositionId> =
                self.corpus.ids_by_thinker(thinker).iter().copied().collect();
            candidates.retain(|id| allowed.contains(id));
        }
        if let Some(domain) = domain {
            let allowed: HashSet<PositionId> =
                self.corpus.ids_by_domain(domain).iter().copied().collect();
            candidates.retain(|id| allowed.contains(id));
        }

        let scoring = ScoringQuery::new(keywords, text);
        let mut scored: Vec<(PositionView, f64)> = candidates
            .iter()
            .filter_map(|id| self.corpus.get(*id))
            .map(|pos| (PositionView::from(pos), relevance(pos, &scoring)))
            .collect();

        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(max_results);

        tracing::debug!(
            query = %text,
            candidates = candidates.len(),
            returned = scored.len(),
            "query ranked"
        );

        scored
            .into_iter()
            .map(|(position, score)| ScoredPosition {
                position,
                relevance: round3(score),
            })
            .collect()
    }

    /// Keyword-index hits for the query keywords, exact and fuzzy.
    fn candidates(&self, keywords: &BTreeSet<String>) -> BTreeSet<PositionId> {
        let min_len = self.config.fuzzy_min_keyword_len;
        let mut candidates = BTreeSet::new();
        for kw in keywords {
            if let Some(ids) = self.corpus.ids_with_keyword(kw) {
                candidates.extend(ids.iter().copied());
            }
            for (indexed, ids) in self.corpus.keyword_entries() {
                if fuzzy_match(kw, indexed, min_len) {
                    candidates.extend(ids.iter().copied());
                }
            }
        }
        candidates
    }

    /// Fires every rule whose antecedents occur in `query`, strongest first.
    pub fn apply_rules(&self, query: &str) -> Vec<ActivatedRule> {
        let query_lower = normalize(query);

        let mut activated: Vec<(f64, ActivatedRule)> = self
            .corpus
            .rules()
            .iter()
            .filter_map(|rule| {
                let activation = rule.activation(&query_lower)?;
                let positions = rule
                    .position_ids
                    .iter()
                    .filter_map(|id| self.corpus.get(*id))
                    .map(PositionRef::from)
                    .collect();
                Some((
                    activation,
                    ActivatedRule {
                        rule_id: rule.id.clone(),
                        rule_name: rule.name.clone(),
                        domain: rule.domain.clone(),
                        relation_type: rule.relation_type.clone(),
                        activation_strength: round3(activation),
                        positions,
                    },
                ))
            })
            .collect();

        activated.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));
        tracing::debug!(query = %query, fired = activated.len(), "rules applied");
        activated.into_iter().map(|(_, rule)| rule).collect()
    }

    /// Rule hits merged with the primary thinker's semantic hits, plus one
    /// hop along the entailment graph.
    ///
    /// ```text
    /// merged   = rule positions (rule order, deduplicated)
    ///          ∪ query(text, max_positions, primary thinker)
    /// entailed = entailment[p] for p in merged[..10],
    ///            primary thinker only, not already seen, ≤ 10
    /// ```
    pub fn infer(&self, text: &str, max_positions: usize) -> InferenceResult {
        let rules = self.apply_rules(text);

        let mut seen: HashSet<PositionId> = HashSet::new();
        let mut merged: Vec<PositionRef> = Vec::new();
        for rule in &rules {
            for p in &rule.positions {
                if seen.insert(p.id) {
                    merged.push(p.clone());
                }
            }
        }

        let primary = self.primary_thinker();
        for hit in self.query(text, max_positions, Some(primary), None) {
            if seen.insert(hit.position.id) {
                merged.push(PositionRef {
                    id: hit.position.id,
                    position: hit.position.position,
                    topic: hit.position.topic,
                });
            }
        }

        let mut entailed = Vec::new();
        'seeds: for p in merged.iter().take(ENTAILMENT_SEEDS) {
            for target in self.graphs.entailed_by(p.id) {
                if entailed.len() >= MAX_ENTAILED {
                    break 'seeds;
                }
                if seen.contains(&target) {
                    continue;
                }
                let Some(pos) = self.corpus.get(target) else {
                    continue;
                };
                if pos.is_by(primary) {
                    seen.insert(target);
                    entailed.push(EntailedPosition {
                        id: pos.id,
                        position: pos.text.clone(),
                        topic: pos.topic.clone(),
                        entailed_from: p.id,
                    });
                }
            }
        }

        let total_positions = merged.len();
        merged.truncate(max_positions);

        tracing::debug!(
            rules = rules.len(),
            positions = total_positions,
            entailed = entailed.len(),
            "inference complete"
        );

        InferenceResult {
            query: text.to_string(),
            positions: merged,
            entailed_positions: entailed,
            rules_activated: rules.len(),
            total_positions,
        }
    }

    /// Primary-thinker positions that argue against `claim`.
    ///
    /// Ranks a wider pool with `query`, then splits it: positions that use
    /// critical language *and* mention a claim keyword are critiques, the
    /// rest are related positions.
    pub fn critique(&self, claim: &str, max_results: usize) -> Critique {
        let related = self.query(
            claim,
            self.config.critique_pool,
            Some(self.primary_thinker()),
            None,
        );
        let claim_keywords = extract_query_keywords(claim);

        let (mut critiques, mut others): (Vec<_>, Vec<_>) =
            related.into_iter().partition(|hit| {
                let text = normalize(&hit.position.position);
                let critical = CRITICAL_MARKERS.iter().any(|m| text.contains(m));
                let addresses = claim_keywords.iter().any(|kw| text.contains(kw.as_str()));
                critical && addresses
            });
        critiques.truncate(max_results);
        others.truncate(max_results);

        Critique {
            claim: claim.to_string(),
            critiques,
            related_positions: others,
        }
    }
}

/// True when one keyword contains the other and the contained one is long
/// enough. Identical keywords are handled by the exact lookup.
fn fuzzy_match(query_kw: &str, indexed_kw: &str, min_len: usize) -> bool {
    if query_kw == indexed_kw {
        return false;
    }
    (query_kw.len() >= min_len && indexed_kw.contains(query_kw))
        || (indexed_kw.len() >= min_len && query_kw.contains(indexed_kw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::query::fixtures::{record, rule, sample};

    #[test]
    fn query_results_are_sorted_descending() {
        let kb = sample();
        let hits = kb.query("meaning rules sentence communities", 10, None, None);
        assert!(!hits.is_empty());
        for pair in hits.windows(2) {
            assert!(pair[0].relevance >= pair[1].relevance);
        }
        assert_eq!(hits[0].position.id, 10);
    }

    #[test]
    fn query_respects_thinker_filter() {
        let kb = sample();
        let hits = kb.query("causation correlation", 10, Some("HUME"), None);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position.id, 2);
    }

    #[test]
    fn query_respects_domain_filter() {
        let kb = sample();
        let hits = kb.query("causation knowledge", 10, None, Some(Domain::Epistemology));
        assert!(hits.iter().all(|h| h.position.domain == Domain::Epistemology));
        assert!(hits.iter().any(|h| h.position.id == 3));
    }

    #[test]
    fn query_respects_max_results() {
        let kb = sample();
        assert_eq!(kb.query("meaning", 2, None, None).len(), 2);
        assert!(kb.query("meaning", 0, None, None).is_empty());
    }

    #[test]
    fn fuzzy_expansion_matches_morphological_variants() {
        let kb = sample();
        // "causal" is contained in "causation"
        let hits = kb.query("causal", 10, None, None);
        let ids: BTreeSet<_> = hits.iter().map(|h| h.position.id).collect();
        assert!(ids.contains(&1) && ids.contains(&2));
    }

    #[test]
    fn short_keywords_do_not_expand() {
        assert!(fuzzy_match("caus", "causation", 4));
        assert!(!fuzzy_match("use", "user", 4));
        assert!(fuzzy_match("use", "user", 3));
        assert!(!fuzzy_match("mind", "mind", 1));
    }

    #[test]
    fn query_with_no_keywords_is_empty() {
        let kb = sample();
        assert!(kb.query("what is the", 10, None, None).is_empty());
    }

    #[test]
    fn rule_activation_is_point_three_times_strength() {
        let kb = sample();
        let fired = kb.apply_rules("What is the nature of knowledge?");
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].rule_id, "r1");
        assert!((fired[0].activation_strength - 0.3 * 0.9).abs() < 1e-9);
    }

    #[test]
    fn rule_positions_drop_unknown_ids() {
        let kb = sample();
        let fired = kb.apply_rules("knowledge");
        let ids: Vec<_> = fired[0].positions.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn blank_concept_rule_fires_on_any_query() {
        let kb = KnowledgeBase::build(
            vec![record(1, "x", "Causation is constant conjunction", "causation")],
            vec![rule("blank", &[], &[""], &[1], 1.0)],
            EngineConfig::default(),
        );
        let fired = kb.apply_rules("anything");
        assert_eq!(fired.len(), 1);
        assert!((fired[0].activation_strength - 0.3).abs() < 1e-9);
        assert_eq!(fired[0].positions[0].id, 1);
    }

    #[test]
    fn rules_sort_by_activation() {
        let kb = sample();
        // r2: topic "causation" + concept "correlation" = 0.6; r1: 0.27
        let fired = kb.apply_rules("causation, correlation and knowledge");
        let order: Vec<_> = fired.iter().map(|r| r.rule_id.as_str()).collect();
        assert_eq!(order, vec!["r2", "r1"]);
        assert!((fired[0].activation_strength - 0.6).abs() < 1e-9);
    }

    #[test]
    fn infer_merges_rules_then_primary_hits() {
        let kb = sample();
        let result = kb.infer("causation and correlation", 20);
        assert_eq!(result.rules_activated, 1);
        // rule r2 surfaces 1 first; Hume's 2 is not the primary thinker
        assert_eq!(result.positions[0].id, 1);
        assert!(result.positions.iter().all(|p| p.id != 2));
        let ids: HashSet<_> = result.positions.iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), result.positions.len());
    }

    #[test]
    fn infer_follows_one_entailment_hop() {
        let kb = sample();
        let result = kb.infer("communities", 1);
        assert_eq!(result.positions.len(), 1);
        assert_eq!(result.positions[0].id, 10);
        let entailed: Vec<_> = result.entailed_positions.iter().map(|e| e.id).collect();
        assert_eq!(entailed, vec![11, 12]);
        assert!(result.entailed_positions.iter().all(|e| e.entailed_from == 10));
    }

    #[test]
    fn infer_on_empty_corpus_is_empty() {
        let kb = KnowledgeBase::empty(EngineConfig::default());
        let result = kb.infer("anything", 5);
        assert!(result.positions.is_empty());
        assert!(result.entailed_positions.is_empty());
        assert_eq!(result.rules_activated, 0);
        assert_eq!(result.total_positions, 0);
    }

    #[test]
    fn critique_splits_critical_from_related() {
        let kb = sample();
        let c = kb.critique("knowledge is justified true belief", 10);
        let critical: Vec<_> = c.critiques.iter().map(|p| p.position.id).collect();
        assert_eq!(critical, vec![3]);
        assert!(c.related_positions.iter().all(|p| p.position.id != 3));
        // only the primary thinker is consulted
        assert!(c
            .critiques
            .iter()
            .chain(c.related_positions.iter())
            .all(|p| p.position.thinker == "Kuczynski"));
    }

    #[test]
    fn critique_uses_configured_primary_thinker() {
        let kb = KnowledgeBase::build(
            vec![
                record(1, "Ayer", "Metaphysics is meaningless and its claims are false", "metaphysics"),
                record(2, "Kant", "Metaphysics is possible as a science", "metaphysics"),
            ],
            vec![rule("r", &[], &["metaphysics"], &[1], 1.0)],
            EngineConfig::default().with_primary_thinker("Ayer"),
        );
        let c = kb.critique("metaphysics", 5);
        assert_eq!(c.critiques.len(), 1);
        assert_eq!(c.critiques[0].position.id, 1);
    }
}
