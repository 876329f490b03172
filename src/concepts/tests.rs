use super::*;
use crate::profile::{Education, Profile};

fn tags(list: &[ConceptTag]) -> ConceptTagSet {
    list.iter().copied().collect()
}

fn profile_at(company: &str) -> Profile {
    Profile {
        current_company: Some(company.to_string()),
        ..Profile::new("p")
    }
}

#[test]
fn test_faang_company_gets_big_tech_too() {
    let tagger = ConceptTagger::default();
    let result = tagger.generate_tags(&profile_at("Google"));

    assert_eq!(result, tags(&[ConceptTag::BigTech, ConceptTag::Faang]));
}

#[test]
fn test_mbb_company_gets_consulting_too() {
    let tagger = ConceptTagger::default();
    let result = tagger.generate_tags(&profile_at("McKinsey & Company"));

    assert!(result.contains(&ConceptTag::Mbb));
    assert!(result.contains(&ConceptTag::Consulting));
}

#[test]
fn test_bidirectional_containment() {
    let tagger = ConceptTagger::default();

    // Input contains the lexicon term.
    assert!(
        tagger
            .company_tags("Goldman Sachs Asset Management")
            .contains(&ConceptTag::Finance)
    );
    // Lexicon term contains the input.
    assert!(
        tagger
            .company_tags("goldman")
            .contains(&ConceptTag::Finance)
    );
}

#[test]
fn test_short_inputs_do_not_match_everything() {
    let tagger = ConceptTagger::default();

    assert!(tagger.company_tags("a").is_empty());
    assert!(tagger.company_tags("   ").is_empty());
    assert!(tagger.company_tags("").is_empty());
}

#[test]
fn test_short_terms_match_whole_words_only() {
    let tagger = ConceptTagger::default();

    for company in ["HubSpot", "Metal Works", "Intelligent Systems", "Trampoline", "Kubs Bakery"] {
        assert!(tagger.company_tags(company).is_empty(), "{company} was tagged");
    }

    assert_eq!(
        tagger.company_tags("Meta Platforms"),
        tags(&[ConceptTag::BigTech, ConceptTag::Faang])
    );
    assert_eq!(tagger.company_tags("UBS"), tags(&[ConceptTag::Finance]));
    assert_eq!(tagger.company_tags("Ramp (NYC)"), tags(&[ConceptTag::Unicorn]));
    assert!(tagger.company_tags("Intel Corp.").contains(&ConceptTag::BigTech));
}

#[test]
fn test_matching_is_case_insensitive() {
    let tagger = ConceptTagger::default();
    assert_eq!(tagger.company_tags("STRIPE"), tags(&[ConceptTag::Unicorn]));
}

#[test]
fn test_startup_from_company_name_or_career_stage() {
    let tagger = ConceptTagger::default();

    let named = tagger.generate_tags(&profile_at("Stealth Startup Inc"));
    assert!(named.contains(&ConceptTag::Startup));

    let founder = Profile {
        career_stage: Some("Founder".to_string()),
        ..Profile::new("f")
    };
    assert_eq!(tagger.generate_tags(&founder), tags(&[ConceptTag::Startup]));

    let early = Profile {
        career_stage: Some("early career".to_string()),
        ..Profile::new("e")
    };
    assert!(tagger.generate_tags(&early).contains(&ConceptTag::Startup));

    let mid = Profile {
        career_stage: Some("mid_career".to_string()),
        ..Profile::new("m")
    };
    assert!(tagger.generate_tags(&mid).is_empty());
}

#[test]
fn test_ivy_league_education() {
    let tagger = ConceptTagger::default();
    let profile = Profile {
        education: vec![Education::new("Yale University").with_degree("BA")],
        ..Profile::new("p")
    };

    assert_eq!(tagger.generate_tags(&profile), tags(&[ConceptTag::IvyLeague]));
}

#[test]
fn test_top_mba_requires_business_degree() {
    let tagger = ConceptTagger::default();

    let engineer = Profile {
        education: vec![Education::new("Stanford University").with_degree("MS")],
        ..Profile::new("p")
    };
    assert!(tagger.generate_tags(&engineer).is_empty());

    let mba = Profile {
        education: vec![Education::new("Stanford University").with_degree("MBA")],
        ..Profile::new("p")
    };
    assert_eq!(tagger.generate_tags(&mba), tags(&[ConceptTag::TopMba]));

    let business_field = Profile {
        education: vec![
            Education::new("Kellogg School of Management")
                .with_degree("Masters")
                .with_field_of_study("Business Administration"),
        ],
        ..Profile::new("p")
    };
    assert_eq!(
        tagger.generate_tags(&business_field),
        tags(&[ConceptTag::TopMba])
    );
}

#[test]
fn test_harvard_mba_is_both_ivy_and_top_mba() {
    let tagger = ConceptTagger::default();
    let profile = Profile {
        education: vec![Education::new("Harvard Business School").with_degree("M.B.A.")],
        ..Profile::new("p")
    };

    // "M.B.A." does not split into the word "mba".
    assert_eq!(tagger.generate_tags(&profile), tags(&[ConceptTag::IvyLeague]));

    let profile = Profile {
        education: vec![Education::new("Harvard Business School").with_degree("MBA")],
        ..Profile::new("p")
    };
    assert_eq!(
        tagger.generate_tags(&profile),
        tags(&[ConceptTag::IvyLeague, ConceptTag::TopMba])
    );
}

#[test]
fn test_profile_without_company_or_education_has_no_tags() {
    let tagger = ConceptTagger::default();
    assert!(tagger.generate_tags(&Profile::new("blank")).is_empty());
}

#[test]
fn test_tags_are_deterministic() {
    let tagger = ConceptTagger::default();
    let profile = Profile {
        current_company: Some("Bain & Company".to_string()),
        education: vec![Education::new("Wharton").with_degree("MBA")],
        ..Profile::new("p")
    };

    assert_eq!(tagger.generate_tags(&profile), tagger.generate_tags(&profile));
}

#[test]
fn test_map_query_to_concepts() {
    let tagger = ConceptTagger::default();

    assert_eq!(
        tagger.map_query_to_concepts("ex-FAANG engineers"),
        tags(&[ConceptTag::BigTech, ConceptTag::Faang])
    );
    assert_eq!(
        tagger.map_query_to_concepts("Ivy League grads"),
        tags(&[ConceptTag::IvyLeague])
    );
    assert_eq!(
        tagger.map_query_to_concepts("M7 alumni"),
        tags(&[ConceptTag::TopMba])
    );
    assert_eq!(
        tagger.map_query_to_concepts("top consulting"),
        tags(&[ConceptTag::Consulting])
    );
    assert_eq!(
        tagger.map_query_to_concepts("MBB partners"),
        tags(&[ConceptTag::Mbb, ConceptTag::Consulting])
    );
}

#[test]
fn test_short_query_keywords_need_whole_words() {
    let tagger = ConceptTagger::default();

    // "mba" inside "embassy" and "ivy" inside "activity" must not match.
    assert!(tagger.map_query_to_concepts("embassy activity").is_empty());
    assert!(tagger.map_query_to_concepts("").is_empty());
}

#[test]
fn test_score_concept_match() {
    let tagger = ConceptTagger::default();
    let a = tags(&[ConceptTag::Faang, ConceptTag::BigTech, ConceptTag::IvyLeague]);
    let b = tags(&[ConceptTag::Faang, ConceptTag::TopMba]);

    assert_eq!(tagger.score_concept_match(&a, &a), 9.0);
    assert_eq!(tagger.score_concept_match(&a, &b), 3.0);
    assert_eq!(tagger.score_concept_match(&b, &a), 3.0);
    assert_eq!(tagger.score_concept_match(&a, &ConceptTagSet::new()), 0.0);
}

#[test]
fn test_custom_bonus() {
    let tagger = ConceptTagger::default().with_bonus(1.5);
    let a = tags(&[ConceptTag::Finance, ConceptTag::Startup]);

    assert_eq!(tagger.score_concept_match(&a, &a), 3.0);
    assert_eq!(score_concept_match_with(2.0, &a, &a), 4.0);
}

#[test]
fn test_tag_display() {
    assert_eq!(ConceptTag::IvyLeague.to_string(), "ivy_league");
    assert_eq!(ConceptTag::ALL.len(), 9);
}
