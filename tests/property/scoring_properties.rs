use proptest::prelude::*;

use trustrank::concepts::ConceptTagger;
use trustrank::constants::{DEFAULT_DECAY_THRESHOLD_DAYS, is_valid_score};
use trustrank::credibility::{CredibilityCalculator, CredibilityTier, TierTable};
use trustrank::encoder::TwoTowerEncoder;
use trustrank::profile::Profile;

const STAGES: &[&str] = &["student", "early_career", "mid_career", "founder", "unknown_stage"];
const INDUSTRIES: &[&str] = &["technology", "finance", "consulting", "healthcare", "space"];
const SKILLS: &[&str] = &["software_engineering", "data_science", "devops", "product_management", "juggling"];
const COMPANIES: &[&str] = &["Google", "McKinsey", "Stripe", "Acme Widgets", "Goldman Sachs", ""];

fn half_points() -> impl Strategy<Value = f64> {
    (0u32..=10).prop_map(|n| n as f64 * 0.5)
}

fn profile_strategy() -> impl Strategy<Value = Profile> {
    (
        prop::sample::select(STAGES),
        prop::sample::select(INDUSTRIES),
        prop::collection::vec(prop::sample::select(SKILLS), 0..4),
        prop::sample::select(COMPANIES),
        0.0f32..60.0,
        0.0f32..=1.0,
    )
        .prop_map(|(stage, industry, skills, company, years, completion)| Profile {
            career_stage: Some(stage.to_string()),
            industry: Some(industry.to_string()),
            skills: skills.into_iter().map(String::from).collect(),
            current_company: (!company.is_empty()).then(|| company.to_string()),
            years_of_experience: years,
            profile_completion: completion,
            ..Profile::new("p")
        })
}

proptest! {
    #[test]
    fn overall_score_is_a_half_point_in_range(avg in 0.0f64..=5.0, rate in 0.0f64..=100.0) {
        let calculator = CredibilityCalculator::default();
        let score = calculator.calculate_overall_score(avg, rate);
        prop_assert!(is_valid_score(score), "score {} for ({}, {})", score, avg, rate);
    }

    #[test]
    fn decay_never_raises_a_score(score in half_points(), days in 0i64..1000) {
        let calculator = CredibilityCalculator::default();
        let decayed = calculator.apply_decay(score, days);
        prop_assert!(decayed <= score);
        prop_assert!(is_valid_score(decayed));
    }

    #[test]
    fn decay_is_a_no_op_before_threshold(score in half_points(), days in 0i64..DEFAULT_DECAY_THRESHOLD_DAYS) {
        let calculator = CredibilityCalculator::default();
        prop_assert_eq!(calculator.apply_decay(score, days), score);
    }

    #[test]
    fn tier_lookup_is_total_and_monotone(a in 0.0f64..=5.0, b in 0.0f64..=5.0) {
        let table = TierTable::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

        let tier = table.tier_for(lo);
        prop_assert!(table.rule(tier).min_score <= lo);
        prop_assert!(table.tier_for(lo) <= table.tier_for(hi));
    }

    #[test]
    fn out_of_range_scores_fall_back(score in prop_oneof![-100.0f64..-0.001, 5.001f64..100.0]) {
        prop_assert_eq!(TierTable::default().tier_for(score), CredibilityTier::Normal);
    }

    #[test]
    fn encode_length_is_constant(a in profile_strategy(), b in profile_strategy()) {
        let encoder = TwoTowerEncoder::default();
        prop_assert_eq!(encoder.encode(&a).len(), encoder.encode(&b).len());
        prop_assert_eq!(encoder.encode_and_embed(&a).dim(), encoder.embedding_dim());
    }

    #[test]
    fn similarity_is_symmetric_and_bounded(a in profile_strategy(), b in profile_strategy()) {
        let encoder = TwoTowerEncoder::default();
        let ea = encoder.encode_and_embed(&a);
        let eb = encoder.encode_and_embed(&b);

        let ab = encoder.similarity(&ea, &eb);
        let ba = encoder.similarity(&eb, &ea);
        prop_assert!((ab - ba).abs() < 1e-6);
        prop_assert!((0.0..=1.0).contains(&ab));
    }

    #[test]
    fn concept_self_match_scales_with_tag_count(profile in profile_strategy()) {
        let tagger = ConceptTagger::default();
        let tags = tagger.generate_tags(&profile);
        let expected = tagger.bonus_per_tag() * tags.len() as f64;
        prop_assert_eq!(tagger.score_concept_match(&tags, &tags), expected);
    }
}
