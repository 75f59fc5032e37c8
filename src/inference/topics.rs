//! Topic adjacency: two distinct topics are neighbours when they share a
//! whitespace-delimited word. Independent of the relation graphs.

use std::collections::{BTreeMap, BTreeSet};

use crate::core::Corpus;

/// Symmetric map from lower-cased topic to its neighbouring topics.
#[derive(Debug, Default, Clone)]
pub struct TopicAdjacency {
    related: BTreeMap<String, BTreeSet<String>>,
}

impl TopicAdjacency {
    /// O(t²) over the distinct indexed topics.
    pub fn build(corpus: &Corpus) -> Self {
        let topics: Vec<(&str, BTreeSet<&str>)> = corpus
            .topic_keys()
            .map(|t| (t, t.split_whitespace().collect()))
            .collect();

        let mut related: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (i, (t1, words1)) in topics.iter().enumerate() {
            for (t2, words2) in &topics[i + 1..] {
                if words1.intersection(words2).next().is_some() {
                    related.entry(t1.to_string()).or_default().insert(t2.to_string());
                    related.entry(t2.to_string()).or_default().insert(t1.to_string());
                }
            }
        }

        tracing::debug!(topics = topics.len(), linked = related.len(), "Topic adjacency built");
        Self { related }
    }

    /// Neighbours of `topic` (case-insensitive), sorted.
    pub fn related_to(&self, topic: &str) -> Vec<String> {
        self.related
            .get(&topic.to_lowercase())
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, PositionRecord};

    fn corpus(topics: &[&str]) -> Corpus {
        let positions = topics
            .iter()
            .enumerate()
            .map(|(i, t)| {
                Position::from_record(PositionRecord {
                    id: i as i64,
                    thinker: "x".to_string(),
                    position: "Some statement.".to_string(),
                    topic: t.to_string(),
                })
            })
            .collect();
        Corpus::new(positions, Vec::new())
    }

    #[test]
    fn shared_word_links_topics_both_ways() {
        let adj = TopicAdjacency::build(&corpus(&["Philosophy of Mind", "mind", "ethics"]));
        assert_eq!(adj.related_to("mind"), vec!["philosophy of mind".to_string()]);
        assert_eq!(adj.related_to("PHILOSOPHY OF MIND"), vec!["mind".to_string()]);
        assert!(adj.related_to("ethics").is_empty());
    }

    #[test]
    fn unknown_topic_has_no_neighbours() {
        let adj = TopicAdjacency::build(&corpus(&[]));
        assert!(adj.related_to("anything").is_empty());
    }
}
