//! Allowed categorical values for profile encoding.
//!
//! Each [`CategorySet`] fixes an ordered list of values; the position of a value is its
//! slot inside the encoder's one-hot or multi-hot segment. Lookups go through
//! [`normalize_key`], so `"Machine Learning"`, `"machine-learning"` and
//! `"machine_learning"` all land on the same slot.

mod defaults;

#[cfg(test)]
mod tests;

use std::collections::HashMap;

/// Normalizes a raw categorical value into its lookup key.
///
/// Trims, lower-cases, and collapses runs of whitespace, `-` and `/` into a single `_`.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_sep = false;

    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '/' || ch == '_' {
            pending_sep = true;
            continue;
        }
        if pending_sep && !key.is_empty() {
            key.push('_');
        }
        pending_sep = false;
        key.extend(ch.to_lowercase());
    }

    key
}

/// Ordered set of allowed values for one categorical field.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySet {
    values: Vec<String>,
    index: HashMap<String, usize>,
}

impl CategorySet {
    /// Builds a set from raw values. Values are normalized; duplicates keep their first slot.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut ordered = Vec::new();
        let mut index = HashMap::new();

        for raw in values {
            let key = normalize_key(raw.as_ref());
            if key.is_empty() || index.contains_key(&key) {
                continue;
            }
            index.insert(key.clone(), ordered.len());
            ordered.push(key);
        }

        Self {
            values: ordered,
            index,
        }
    }

    /// Slot of `raw` in this set, if it is a known value.
    #[inline]
    pub fn position(&self, raw: &str) -> Option<usize> {
        self.index.get(&normalize_key(raw)).copied()
    }

    #[inline]
    pub fn contains(&self, raw: &str) -> bool {
        self.position(raw).is_some()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Normalized values in slot order.
    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// The full vocabulary the encoder is configured with.
///
/// `skills` backs three segments: skills, skills-to-learn and skills-to-teach.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    pub intentions: CategorySet,
    pub experience_levels: CategorySet,
    pub career_stages: CategorySet,
    pub industries: CategorySet,
    pub skills: CategorySet,
    pub hobbies: CategorySet,
    pub values: CategorySet,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            intentions: CategorySet::new(defaults::INTENTIONS),
            experience_levels: CategorySet::new(defaults::EXPERIENCE_LEVELS),
            career_stages: CategorySet::new(defaults::CAREER_STAGES),
            industries: CategorySet::new(defaults::INDUSTRIES),
            skills: CategorySet::new(defaults::SKILLS),
            hobbies: CategorySet::new(defaults::HOBBIES),
            values: CategorySet::new(defaults::VALUES),
        }
    }
}

impl Vocabulary {
    /// Number of categorical slots across all segments (excludes the scalar tail).
    pub fn categorical_len(&self) -> usize {
        self.intentions.len()
            + self.experience_levels.len()
            + self.career_stages.len()
            + self.industries.len()
            + self.skills.len() * 3
            + self.hobbies.len()
            + self.values.len()
    }
}
