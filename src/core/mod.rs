//! # Core — Domain Types of the Position Corpus
//!
//! - [`Position`] — a verbatim statement with derived keywords and [`Domain`]
//! - [`PositionRecord`] — the raw record a position is built from
//! - [`Rule`] — an authored trigger that surfaces positions by id
//! - [`Corpus`] — positions, rules and the four lookup indices
//!
//! ## Example
//!
//! ```rust
//! use position_inference::core::{Corpus, Position, PositionRecord};
//!
//! let pos = Position::from_record(PositionRecord {
//!     id: 1,
//!     thinker: "Hume".to_string(),
//!     position: "Causation is constant conjunction.".to_string(),
//!     topic: "causation".to_string(),
//! });
//! let corpus = Corpus::new(vec![pos], Vec::new());
//! assert_eq!(corpus.ids_by_thinker("hume"), &[1]);
//! ```

/// [`Position`], [`PositionRecord`] and [`PositionId`].
pub mod position;

/// [`Rule`] and its activation arithmetic.
pub mod rule;

/// [`Corpus`] — storage and indices.
pub mod corpus;

pub use corpus::Corpus;
pub use position::{Position, PositionId, PositionRecord};
pub use rule::Rule;

pub use crate::nlu::Domain;
