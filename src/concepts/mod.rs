//! Concept tagging from company, education and query text.
//!
//! Matching is deliberately fuzzy: a company matches a lexicon term when either string
//! contains the other (case-insensitive). Tags are a pure function of the text.

pub mod lexicon;
pub mod tag;
pub mod tagger;

#[cfg(test)]
mod tests;

pub use lexicon::Lexicons;
pub use tag::{ConceptTag, ConceptTagSet};
pub use tagger::{ConceptTagger, score_concept_match_with};
