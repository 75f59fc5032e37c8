//! # Domain Classifier — Bag-of-Substrings over a Marker Table
//!
//! Each position is filed under one coarse philosophical [`Domain`]. The
//! classifier is deliberately simple: no model, no weights, just a table of
//! marker substrings per domain.
//!
//! ## Strategy
//!
//! ```text
//! combined = lower(topic) + " " + lower(text)
//! for domain in table order:
//!     score[domain] = number of markers that occur in `combined`
//! best = highest score, first in table order on ties
//! best score == 0  →  Domain::General
//! ```
//!
//! A marker counts once no matter how often it occurs. Markers are stems
//! ("justif", "empiric") so morphological variants hit the same entry.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::keywords::normalize;

/// Coarse philosophical category of a position.
///
/// Declaration order is the tie-break order of [`classify_domain`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Epistemology,
    Metaphysics,
    PhilosophyOfLanguage,
    PhilosophyOfMind,
    Logic,
    Ethics,
    Psychology,
    SocialTheory,
    /// No marker matched.
    General,
}

/// Marker substrings per domain, in tie-break order.
const DOMAIN_MARKERS: &[(Domain, &[&str])] = &[
    (
        Domain::Epistemology,
        &[
            "knowledge", "belief", "justif", "a priori", "epistemic", "certainty", "doubt",
            "skeptic", "truth", "evidence", "empiric", "rational",
        ],
    ),
    (
        Domain::Metaphysics,
        &[
            "exist", "being", "identity", "property", "essence", "substance", "modal",
            "possible", "necessary", "ontolog", "reality", "nature", "universal", "particular",
            "causation", "cause", "spatiotemporal",
        ],
    ),
    (
        Domain::PhilosophyOfLanguage,
        &[
            "meaning", "reference", "proposition", "semantic", "sense", "denotation",
            "intension", "extension", "sentence", "word", "language", "truth condition",
        ],
    ),
    (
        Domain::PhilosophyOfMind,
        &[
            "mental", "consciousness", "intentional", "thought", "mind", "cognitive",
            "perception", "qualia", "experience", "represent", "belief", "desire",
            "subpersonal", "personal",
        ],
    ),
    (
        Domain::Logic,
        &[
            "valid", "inference", "deduct", "proof", "theorem", "axiom", "contradict",
            "consistent", "complete", "decidable", "recursive", "formal", "logical", "entail",
        ],
    ),
    (
        Domain::Ethics,
        &[
            "moral", "ethical", "virtue", "duty", "good", "right", "wrong", "ought", "value",
            "norm",
        ],
    ),
    (
        Domain::Psychology,
        &[
            "unconscious", "neurosis", "defense", "anxiety", "psycho", "behavior", "motivation",
            "personality", "sociopath", "psychopath",
        ],
    ),
    (
        Domain::SocialTheory,
        &[
            "society", "social", "culture", "institution", "power", "community", "individual",
            "collective",
        ],
    ),
];

impl Domain {
    /// Every domain, [`Domain::General`] last.
    pub const ALL: [Domain; 9] = [
        Domain::Epistemology,
        Domain::Metaphysics,
        Domain::PhilosophyOfLanguage,
        Domain::PhilosophyOfMind,
        Domain::Logic,
        Domain::Ethics,
        Domain::Psychology,
        Domain::SocialTheory,
        Domain::General,
    ];

    /// Snake-case label, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Epistemology => "epistemology",
            Domain::Metaphysics => "metaphysics",
            Domain::PhilosophyOfLanguage => "philosophy_of_language",
            Domain::PhilosophyOfMind => "philosophy_of_mind",
            Domain::Logic => "logic",
            Domain::Ethics => "ethics",
            Domain::Psychology => "psychology",
            Domain::SocialTheory => "social_theory",
            Domain::General => "general",
        }
    }

    /// Parses a label as produced by [`Domain::as_str`] (case-insensitive).
    pub fn parse(label: &str) -> Option<Domain> {
        let label = label.trim().to_lowercase();
        Domain::ALL.into_iter().find(|d| d.as_str() == label)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a position into a [`Domain`] from its topic and text.
///
/// Pure function of its inputs; see the module docs for the scoring rule.
pub fn classify_domain(topic: &str, text: &str) -> Domain {
    let combined = format!("{} {}", normalize(topic), normalize(text));

    let mut best = Domain::General;
    let mut best_score = 0usize;
    for (domain, markers) in DOMAIN_MARKERS {
        let score = markers.iter().filter(|m| combined.contains(*m)).count();
        // strict > keeps the earlier domain on ties
        if score > best_score {
            best = *domain;
            best_score = score;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epistemology_markers_win() {
        let d = classify_domain("knowledge", "Knowledge requires justified belief and evidence.");
        assert_eq!(d, Domain::Epistemology);
    }

    #[test]
    fn no_marker_is_general() {
        assert_eq!(classify_domain("", "Zebras gallop."), Domain::General);
        assert_eq!(classify_domain("", ""), Domain::General);
    }

    #[test]
    fn tie_goes_to_first_declared_domain() {
        // "belief" is a marker of both epistemology and philosophy of mind
        assert_eq!(classify_domain("", "belief"), Domain::Epistemology);
    }

    #[test]
    fn topic_contributes_to_score() {
        let d = classify_domain("psychoanalysis of anxiety", "Zebras gallop.");
        assert_eq!(d, Domain::Psychology);
    }

    #[test]
    fn classification_is_deterministic() {
        let topic = "causation";
        let text = "Causation is not reducible to correlation";
        assert_eq!(classify_domain(topic, text), classify_domain(topic, text));
        assert_eq!(classify_domain(topic, text), Domain::Metaphysics);
    }

    #[test]
    fn labels_round_trip() {
        for d in Domain::ALL {
            assert_eq!(Domain::parse(d.as_str()), Some(d));
            assert_eq!(serde_json::to_value(d).unwrap(), d.as_str());
        }
        assert_eq!(Domain::parse("Philosophy_Of_Mind"), Some(Domain::PhilosophyOfMind));
        assert_eq!(Domain::parse("astrology"), None);
    }
}
