//! Curated company, school and query lexicons.

use super::tag::ConceptTag;

const BIG_TECH: &[&str] = &[
    "google",
    "alphabet",
    "meta",
    "facebook",
    "amazon",
    "apple",
    "microsoft",
    "netflix",
    "nvidia",
    "oracle",
    "salesforce",
    "ibm",
    "intel",
    "adobe",
    "uber",
    "airbnb",
    "linkedin",
    "tesla",
];

const FAANG: &[&str] = &[
    "facebook", "meta", "apple", "amazon", "netflix", "google", "alphabet",
];

const MBB: &[&str] = &["mckinsey", "bain", "boston consulting group", "bcg"];

const CONSULTING: &[&str] = &[
    "deloitte",
    "accenture",
    "pwc",
    "pricewaterhousecoopers",
    "ernst & young",
    "kpmg",
    "oliver wyman",
    "kearney",
    "booz allen",
    "roland berger",
    "strategy&",
    "lek consulting",
];

const FINANCE: &[&str] = &[
    "goldman sachs",
    "morgan stanley",
    "jp morgan",
    "jpmorgan",
    "blackrock",
    "blackstone",
    "citadel",
    "jane street",
    "two sigma",
    "bridgewater",
    "kkr",
    "carlyle",
    "citigroup",
    "bank of america",
    "barclays",
    "credit suisse",
    "ubs",
    "evercore",
    "lazard",
];

const UNICORN: &[&str] = &[
    "stripe",
    "spacex",
    "openai",
    "databricks",
    "canva",
    "revolut",
    "klarna",
    "plaid",
    "chime",
    "figma",
    "notion",
    "discord",
    "bytedance",
    "shein",
    "rippling",
    "ramp",
    "brex",
];

const IVY_LEAGUE: &[&str] = &[
    "harvard",
    "yale",
    "princeton",
    "columbia",
    "university of pennsylvania",
    "upenn",
    "brown university",
    "dartmouth",
    "cornell",
];

const TOP_MBA: &[&str] = &[
    "harvard",
    "stanford",
    "wharton",
    "university of pennsylvania",
    "chicago booth",
    "booth school",
    "kellogg",
    "northwestern",
    "columbia",
    "mit sloan",
    "massachusetts institute of technology",
];

/// Query keywords per tag. Keywords of three chars or fewer match whole words only.
const QUERY_KEYWORDS: &[(ConceptTag, &[&str])] = &[
    (
        ConceptTag::Faang,
        &["faang", "maang", "facebook", "meta", "apple", "amazon", "netflix", "google"],
    ),
    (
        ConceptTag::BigTech,
        &["big tech", "bigtech", "tech giant", "microsoft", "nvidia"],
    ),
    (
        ConceptTag::Mbb,
        &["mbb", "mckinsey", "bain", "bcg", "boston consulting"],
    ),
    (
        ConceptTag::Consulting,
        &["consulting", "consultant", "big four", "big 4", "deloitte", "accenture"],
    ),
    (
        ConceptTag::Finance,
        &[
            "finance",
            "banking",
            "banker",
            "investment bank",
            "hedge fund",
            "private equity",
            "wall street",
            "goldman",
            "trading",
        ],
    ),
    (
        ConceptTag::Unicorn,
        &["unicorn", "high growth", "hypergrowth", "late stage"],
    ),
    (
        ConceptTag::Startup,
        &["startup", "start-up", "founder", "entrepreneur", "early stage", "cofounder"],
    ),
    (
        ConceptTag::IvyLeague,
        &["ivy", "ivy league", "harvard", "yale", "princeton"],
    ),
    (
        ConceptTag::TopMba,
        &["m7", "top mba", "mba", "business school", "hbs", "gsb", "wharton"],
    ),
];

#[derive(Debug, Clone, PartialEq)]
/// Lexicons used by [`ConceptTagger`](super::ConceptTagger).
///
/// All terms are stored lower-cased.
pub struct Lexicons {
    pub big_tech: Vec<String>,
    pub faang: Vec<String>,
    pub mbb: Vec<String>,
    pub consulting: Vec<String>,
    pub finance: Vec<String>,
    pub unicorn: Vec<String>,
    pub ivy_league: Vec<String>,
    pub top_mba: Vec<String>,
    pub query_keywords: Vec<(ConceptTag, Vec<String>)>,
}

impl Default for Lexicons {
    fn default() -> Self {
        Self {
            big_tech: to_terms(BIG_TECH),
            faang: to_terms(FAANG),
            mbb: to_terms(MBB),
            consulting: to_terms(CONSULTING),
            finance: to_terms(FINANCE),
            unicorn: to_terms(UNICORN),
            ivy_league: to_terms(IVY_LEAGUE),
            top_mba: to_terms(TOP_MBA),
            query_keywords: QUERY_KEYWORDS
                .iter()
                .map(|(tag, words)| (*tag, to_terms(words)))
                .collect(),
        }
    }
}

fn to_terms(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_lowercase()).collect()
}
