//! # Relation Pass — Heuristic Entailment, Contradiction and Specificity
//!
//! One all-pairs sweep over the corpus fills three directed graphs keyed by
//! [`PositionId`]. The tests are lexical and consciously imprecise: they
//! look for opposing vocabulary and keyword containment, not for meaning.
//!
//! ## Tests per pair (A, B)
//!
//! Pairs whose topics are unrelated are skipped entirely (see
//! [`topics_related`]).
//!
//! ### Contradiction (symmetric)
//!
//! ```text
//! |A.keywords ∩ B.keywords| ≥ 2
//! and for some (neg, pos) in NEGATION_PAIRS:
//!     (neg ⊂ A.text and pos ⊂ B.text) or (neg ⊂ B.text and pos ⊂ A.text)
//! ⇒ A ⟷ B
//! ```
//!
//! ### Entailment (directional)
//!
//! ```text
//! lower(A.topic) == lower(B.topic)
//! and A.keywords ⊋ B.keywords and |B.keywords| ≥ 2
//! ⇒ A → B
//! ```
//!
//! ### Specificity (directional)
//!
//! ```text
//! A.text contains a SPECIFICITY_MARKER and A.keywords ⊇ B.keywords
//! ⇒ A → B
//! ```
//!
//! The directional tests are evaluated in both orientations of every pair,
//! so a later position can entail or specify an earlier one. The edge set
//! is therefore a superset of what an earlier-against-later sweep finds.
//!
//! ## Performance
//!
//! O(n²) over positions, cut down by the topic pre-filter. Rows are
//! computed in parallel with rayon and merged in row order afterwards, so
//! the resulting graphs do not depend on scheduling.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;

use crate::core::{Corpus, Position, PositionId};
use crate::nlu::normalize;

/// Opposing vocabulary, `(negative, positive)`.
///
/// Matching is by substring on the lower-cased text, so "is" also hits
/// "this"; the keyword-overlap gate keeps that noise in check.
pub const NEGATION_PAIRS: &[(&str, &str)] = &[
    ("is not", "is"),
    ("cannot", "can"),
    ("never", "always"),
    ("false", "true"),
    ("impossible", "possible"),
    ("rejects", "accepts"),
    ("denies", "affirms"),
    ("mistaken", "correct"),
    ("fails", "succeeds"),
    ("doesn't", "does"),
    ("don't", "do"),
    ("inadequate", "adequate"),
    ("wrong", "right"),
    ("erroneous", "valid"),
];

/// Phrases announcing that a statement instantiates a more general one.
pub const SPECIFICITY_MARKERS: &[&str] = &[
    "specifically",
    "in particular",
    "for example",
    "instance",
    "case of",
    "type of",
    "form of",
];

/// Minimum shared keywords before two positions can contradict.
const CONTRADICTION_MIN_OVERLAP: usize = 2;

/// Minimum keywords of the entailed position.
const ENTAILMENT_MIN_KEYWORDS: usize = 2;

/// Directed adjacency: source id → target ids.
pub type Graph = HashMap<PositionId, BTreeSet<PositionId>>;

/// The three relation graphs derived from a corpus.
#[derive(Debug, Default, Clone)]
pub struct RelationGraphs {
    /// `entailment[a] ∋ b` iff a entails b.
    pub entailment: Graph,
    /// Symmetric: `b ∈ contradiction[a]` iff `a ∈ contradiction[b]`.
    pub contradiction: Graph,
    /// `specificity[a] ∋ b` iff a is a more specific instance of b.
    pub specificity: Graph,
}

/// Edges found for one row of the pair matrix.
#[derive(Default)]
struct RowEdges {
    contradictions: Vec<(PositionId, PositionId)>,
    entailments: Vec<(PositionId, PositionId)>,
    specificities: Vec<(PositionId, PositionId)>,
}

/// Lower-cased text plus a reference to the position, computed once per run.
struct Prepared<'a> {
    pos: &'a Position,
    text: String,
    topic: String,
    specific: bool,
}

impl RelationGraphs {
    /// Runs the all-pairs relation pass over `corpus`.
    pub fn infer(corpus: &Corpus) -> Self {
        let prepared: Vec<Prepared<'_>> = corpus
            .positions()
            .map(|pos| {
                let text = normalize(&pos.text);
                let specific = SPECIFICITY_MARKERS.iter().any(|m| text.contains(m));
                Prepared {
                    pos,
                    topic: pos.topic.to_lowercase(),
                    text,
                    specific,
                }
            })
            .collect();

        let rows: Vec<RowEdges> = (0..prepared.len())
            .into_par_iter()
            .map(|i| compare_row(&prepared, i))
            .collect();

        let mut graphs = RelationGraphs::default();
        for row in rows {
            for (a, b) in row.contradictions {
                graphs.contradiction.entry(a).or_default().insert(b);
                graphs.contradiction.entry(b).or_default().insert(a);
            }
            for (a, b) in row.entailments {
                graphs.entailment.entry(a).or_default().insert(b);
            }
            for (a, b) in row.specificities {
                graphs.specificity.entry(a).or_default().insert(b);
            }
        }

        tracing::info!(
            positions = prepared.len(),
            entailments = graphs.entailment_count(),
            contradictions = graphs.contradiction_count(),
            specificities = graphs.specificity_count(),
            "Relation graphs built"
        );
        graphs
    }

    pub fn entailed_by(&self, id: PositionId) -> impl Iterator<Item = PositionId> + '_ {
        neighbours(&self.entailment, id)
    }

    pub fn contradicting(&self, id: PositionId) -> impl Iterator<Item = PositionId> + '_ {
        neighbours(&self.contradiction, id)
    }

    pub fn generalizations_of(&self, id: PositionId) -> impl Iterator<Item = PositionId> + '_ {
        neighbours(&self.specificity, id)
    }

    pub fn contradicts(&self, a: PositionId, b: PositionId) -> bool {
        self.contradiction.get(&a).is_some_and(|s| s.contains(&b))
    }

    /// Total directed entailment edges.
    pub fn entailment_count(&self) -> usize {
        self.entailment.values().map(BTreeSet::len).sum()
    }

    /// Contradicting pairs, each unordered pair counted once.
    pub fn contradiction_count(&self) -> usize {
        self.contradiction.values().map(BTreeSet::len).sum::<usize>() / 2
    }

    /// Total directed specificity edges.
    pub fn specificity_count(&self) -> usize {
        self.specificity.values().map(BTreeSet::len).sum()
    }
}

fn neighbours(graph: &Graph, id: PositionId) -> impl Iterator<Item = PositionId> + '_ {
    graph.get(&id).into_iter().flatten().copied()
}

/// Compares position `i` with every later position.
fn compare_row(prepared: &[Prepared<'_>], i: usize) -> RowEdges {
    let mut edges = RowEdges::default();
    let a = &prepared[i];

    for b in &prepared[i + 1..] {
        if !topics_related(&a.topic, &b.topic) {
            continue;
        }

        if contradict(a, b) {
            edges.contradictions.push((a.pos.id, b.pos.id));
        }

        if entails(a, b) {
            edges.entailments.push((a.pos.id, b.pos.id));
        } else if entails(b, a) {
            edges.entailments.push((b.pos.id, a.pos.id));
        }

        if specifies(a, b) {
            edges.specificities.push((a.pos.id, b.pos.id));
        }
        if specifies(b, a) {
            edges.specificities.push((b.pos.id, a.pos.id));
        }
    }
    edges
}

/// True iff the topics are equal or share a whitespace-delimited word
/// (case-insensitive).
pub fn topics_related(topic1: &str, topic2: &str) -> bool {
    let t1 = topic1.to_lowercase();
    let t2 = topic2.to_lowercase();
    if t1 == t2 {
        return true;
    }
    let words1: BTreeSet<&str> = t1.split_whitespace().collect();
    t2.split_whitespace().any(|w| words1.contains(w))
}

fn contradict(a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
    if a.pos.keyword_overlap(b.pos) < CONTRADICTION_MIN_OVERLAP {
        return false;
    }
    NEGATION_PAIRS.iter().any(|(neg, pos)| {
        (a.text.contains(neg) && b.text.contains(pos)) || (b.text.contains(neg) && a.text.contains(pos))
    })
}

fn entails(a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
    a.topic == b.topic
        && b.pos.keywords.len() >= ENTAILMENT_MIN_KEYWORDS
        && a.pos.keywords.len() > b.pos.keywords.len()
        && a.pos.keywords.is_superset(&b.pos.keywords)
}

fn specifies(a: &Prepared<'_>, b: &Prepared<'_>) -> bool {
    a.specific && a.pos.keywords.is_superset(&b.pos.keywords)
}
