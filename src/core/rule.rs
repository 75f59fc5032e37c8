//! # Rule — An Authored Trigger Pointing at Positions
//!
//! A [`Rule`] links query vocabulary to a set of stored positions. It never
//! holds answer text of its own: when it fires, the engine resolves its
//! `position_ids` against the corpus and returns those positions verbatim.
//!
//! ## Activation
//!
//! ```text
//! concept_hits = antecedent_concepts that occur in the query
//! topic_hits   = antecedent_topics that occur in the query,
//!                or any of whose words occurs in the query
//! hits ≥ 1  →  activation = min(1.0, hits × 0.3) × strength
//! ```

use serde::{Deserialize, Serialize};

use super::position::PositionId;

/// Activation gained per matched antecedent.
pub const ACTIVATION_PER_HIT: f64 = 0.3;

/// An inference rule authored outside the engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub id: String,
    pub name: String,
    pub domain: String,
    pub antecedent_topics: Vec<String>,
    pub antecedent_concepts: Vec<String>,
    pub relation_type: String,
    /// Positions surfaced when the rule fires, in authored order.
    pub position_ids: Vec<PositionId>,
    /// Confidence scale in `[0, 1]`.
    pub strength: f64,
}

impl Rule {
    /// Counts antecedents matched by an already lower-cased query.
    ///
    /// Matching is plain substring containment, so an empty concept is
    /// contained in every query.
    pub fn match_count(&self, query_lower: &str) -> usize {
        let concept_hits = self
            .antecedent_concepts
            .iter()
            .filter(|c| query_lower.contains(c.to_lowercase().as_str()))
            .count();

        let topic_hits = self
            .antecedent_topics
            .iter()
            .filter(|t| {
                let t = t.to_lowercase();
                query_lower.contains(t.as_str())
                    || t.split_whitespace().any(|word| query_lower.contains(word))
            })
            .count();

        concept_hits + topic_hits
    }

    /// Activation strength for a query, `None` when nothing matched.
    pub fn activation(&self, query_lower: &str) -> Option<f64> {
        let hits = self.match_count(query_lower);
        if hits == 0 {
            return None;
        }
        Some((hits as f64 * ACTIVATION_PER_HIT).min(1.0) * self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(topics: &[&str], concepts: &[&str], strength: f64) -> Rule {
        Rule {
            id: "r1".to_string(),
            name: "test rule".to_string(),
            domain: "epistemology".to_string(),
            antecedent_topics: topics.iter().map(|s| s.to_string()).collect(),
            antecedent_concepts: concepts.iter().map(|s| s.to_string()).collect(),
            relation_type: "supports".to_string(),
            position_ids: vec![1, 2],
            strength,
        }
    }

    #[test]
    fn single_concept_hit() {
        let r = rule(&[], &["knowledge"], 0.8);
        let a = r.activation("what is the nature of knowledge?").unwrap();
        assert!((a - 0.3 * 0.8).abs() < 1e-9);
    }

    #[test]
    fn no_hit_no_activation() {
        let r = rule(&["ethics"], &["virtue"], 1.0);
        assert_eq!(r.activation("the nature of number"), None);
    }

    #[test]
    fn topic_word_hit_counts_once() {
        let r = rule(&["theory of knowledge"], &[], 1.0);
        assert_eq!(r.match_count("knowledge and doubt"), 1);
    }

    #[test]
    fn activation_saturates_at_one() {
        let r = rule(&["mind", "body"], &["mind", "body", "dualism"], 0.5);
        let a = r.activation("mind body dualism").unwrap();
        assert!((a - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_concept_matches_every_query() {
        let r = rule(&[], &[""], 0.5);
        let a = r.activation("anything at all").unwrap();
        assert!((a - 0.3 * 0.5).abs() < 1e-9);
    }

    #[test]
    fn whitespace_topic_has_no_words_to_match() {
        let r = rule(&["  "], &[], 1.0);
        assert_eq!(r.activation("anything at all"), None);
    }

    #[test]
    fn antecedents_match_case_insensitively() {
        let r = rule(&[], &["Knowledge"], 1.0);
        assert_eq!(r.match_count("knowledge"), 1);
    }
}
