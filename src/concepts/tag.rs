use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Coarse boolean label derived from free-text profile fields.
pub enum ConceptTag {
    BigTech,
    Faang,
    Mbb,
    Consulting,
    Finance,
    Unicorn,
    Startup,
    IvyLeague,
    TopMba,
}

impl ConceptTag {
    pub const ALL: [ConceptTag; 9] = [
        ConceptTag::BigTech,
        ConceptTag::Faang,
        ConceptTag::Mbb,
        ConceptTag::Consulting,
        ConceptTag::Finance,
        ConceptTag::Unicorn,
        ConceptTag::Startup,
        ConceptTag::IvyLeague,
        ConceptTag::TopMba,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConceptTag::BigTech => "big_tech",
            ConceptTag::Faang => "faang",
            ConceptTag::Mbb => "mbb",
            ConceptTag::Consulting => "consulting",
            ConceptTag::Finance => "finance",
            ConceptTag::Unicorn => "unicorn",
            ConceptTag::Startup => "startup",
            ConceptTag::IvyLeague => "ivy_league",
            ConceptTag::TopMba => "top_mba",
        }
    }
}

impl std::fmt::Display for ConceptTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Ordered, duplicate-free set of tags.
pub type ConceptTagSet = BTreeSet<ConceptTag>;
