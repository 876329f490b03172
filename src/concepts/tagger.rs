use tracing::trace;

use crate::constants::DEFAULT_CONCEPT_BONUS;
use crate::profile::{Education, Profile};
use crate::vocabulary::normalize_key;

use super::lexicon::Lexicons;
use super::tag::{ConceptTag, ConceptTagSet};

/// Inputs shorter than this never match by "lexicon term contains input".
pub const MIN_REVERSE_MATCH_LEN: usize = 3;

/// Keywords this short must match a whole word of the query.
pub const WHOLE_WORD_KEYWORD_LEN: usize = 3;

/// Lexicon terms this short must match whole words of the company or school.
pub const WHOLE_WORD_TERM_LEN: usize = 5;

const STARTUP_CAREER_STAGES: [&str; 2] = ["founder", "early_career"];

/// Derives [`ConceptTag`]s from company and education text and from search queries.
#[derive(Debug, Clone)]
pub struct ConceptTagger {
    lexicons: Lexicons,
    bonus_per_tag: f64,
}

impl Default for ConceptTagger {
    fn default() -> Self {
        Self::new(Lexicons::default(), DEFAULT_CONCEPT_BONUS)
    }
}

impl ConceptTagger {
    pub fn new(lexicons: Lexicons, bonus_per_tag: f64) -> Self {
        Self {
            lexicons,
            bonus_per_tag,
        }
    }

    pub fn with_bonus(mut self, bonus_per_tag: f64) -> Self {
        self.bonus_per_tag = bonus_per_tag;
        self
    }

    pub fn lexicons(&self) -> &Lexicons {
        &self.lexicons
    }

    pub fn bonus_per_tag(&self) -> f64 {
        self.bonus_per_tag
    }

    /// Tags for a profile: company tags, the startup tag, then education tags.
    pub fn generate_tags(&self, profile: &Profile) -> ConceptTagSet {
        let mut tags = ConceptTagSet::new();

        if let Some(company) = profile.current_company.as_deref() {
            self.tag_company(company, &mut tags);
        }

        let startup_stage = profile
            .career_stage
            .as_deref()
            .map(normalize_key)
            .is_some_and(|stage| STARTUP_CAREER_STAGES.contains(&stage.as_str()));
        if startup_stage {
            tags.insert(ConceptTag::Startup);
        }

        for education in &profile.education {
            self.tag_education(education, &mut tags);
        }

        trace!(profile_id = %profile.id, ?tags, "Generated concept tags");
        tags
    }

    /// Company-only tags (also grants `Startup` when the name says so).
    pub fn company_tags(&self, company: &str) -> ConceptTagSet {
        let mut tags = ConceptTagSet::new();
        self.tag_company(company, &mut tags);
        tags
    }

    /// Translates a free-text search query into tags.
    pub fn map_query_to_concepts(&self, query: &str) -> ConceptTagSet {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return ConceptTagSet::new();
        }

        let words: Vec<&str> = query
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut tags = ConceptTagSet::new();
        for (tag, keywords) in &self.lexicons.query_keywords {
            let hit = keywords.iter().any(|kw| {
                if kw.chars().count() <= WHOLE_WORD_KEYWORD_LEN {
                    words.contains(&kw.as_str())
                } else {
                    query.contains(kw.as_str())
                }
            });
            if hit {
                tags.insert(*tag);
            }
        }

        // Firm-level tags imply their broader category.
        if tags.contains(&ConceptTag::Mbb) {
            tags.insert(ConceptTag::Consulting);
        }
        if tags.contains(&ConceptTag::Faang) {
            tags.insert(ConceptTag::BigTech);
        }

        tags
    }

    /// `bonus_per_tag × |profile_tags ∩ query_tags|`.
    pub fn score_concept_match(&self, profile_tags: &ConceptTagSet, query_tags: &ConceptTagSet) -> f64 {
        score_concept_match_with(self.bonus_per_tag, profile_tags, query_tags)
    }

    fn tag_company(&self, company: &str, tags: &mut ConceptTagSet) {
        let company = company.trim().to_lowercase();
        if company.is_empty() {
            return;
        }

        let lex = &self.lexicons;
        let groups: [(&[String], &[ConceptTag]); 6] = [
            (&lex.big_tech, &[ConceptTag::BigTech]),
            (&lex.faang, &[ConceptTag::Faang, ConceptTag::BigTech]),
            (&lex.mbb, &[ConceptTag::Mbb, ConceptTag::Consulting]),
            (&lex.consulting, &[ConceptTag::Consulting]),
            (&lex.finance, &[ConceptTag::Finance]),
            (&lex.unicorn, &[ConceptTag::Unicorn]),
        ];

        for (terms, granted) in groups {
            if matches_any(&company, terms) {
                tags.extend(granted.iter().copied());
            }
        }

        if company.contains("startup") {
            tags.insert(ConceptTag::Startup);
        }
    }

    fn tag_education(&self, education: &Education, tags: &mut ConceptTagSet) {
        let school = education.school.trim().to_lowercase();
        if school.is_empty() {
            return;
        }

        if matches_any(&school, &self.lexicons.ivy_league) {
            tags.insert(ConceptTag::IvyLeague);
        }

        if is_business_degree(education) && matches_any(&school, &self.lexicons.top_mba) {
            tags.insert(ConceptTag::TopMba);
        }
    }
}

/// Flat-bonus set intersection score.
pub fn score_concept_match_with(
    bonus_per_tag: f64,
    profile_tags: &ConceptTagSet,
    query_tags: &ConceptTagSet,
) -> f64 {
    bonus_per_tag * profile_tags.intersection(query_tags).count() as f64
}

/// Bidirectional, case-insensitive containment. `input` must already be lower-cased.
fn matches_any(input: &str, terms: &[String]) -> bool {
    let allow_reverse = input.chars().count() >= MIN_REVERSE_MATCH_LEN;
    terms
        .iter()
        .any(|term| contains_term(input, term) || (allow_reverse && term.contains(input)))
}

/// Short terms need a non-alphanumeric boundary on both sides ("ubs" is not in "hubspot").
fn contains_term(input: &str, term: &str) -> bool {
    if term.chars().count() > WHOLE_WORD_TERM_LEN {
        return input.contains(term);
    }
    input.match_indices(term).any(|(start, found)| {
        let before = input[..start].chars().next_back();
        let after = input[start + found.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

fn is_business_degree(education: &Education) -> bool {
    let degree_is_mba = education.degree.as_deref().is_some_and(|d| {
        let d = d.to_lowercase();
        d.split(|c: char| !c.is_alphanumeric()).any(|w| w == "mba")
            || d.contains("master of business")
    });
    let field_is_business = education
        .field_of_study
        .as_deref()
        .is_some_and(|f| f.to_lowercase().contains("business"));

    degree_is_mba || field_is_business
}
