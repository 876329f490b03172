use super::*;

#[test]
fn test_normalize_key_collapses_separators() {
    assert_eq!(normalize_key("Machine Learning"), "machine_learning");
    assert_eq!(normalize_key("machine-learning"), "machine_learning");
    assert_eq!(normalize_key("  Early  Career "), "early_career");
    assert_eq!(normalize_key("UX / Research"), "ux_research");
    assert_eq!(normalize_key("__hr__"), "hr");
    assert_eq!(normalize_key(""), "");
}

#[test]
fn test_category_set_positions_follow_input_order() {
    let set = CategorySet::new(["alpha", "beta", "gamma"]);

    assert_eq!(set.len(), 3);
    assert_eq!(set.position("alpha"), Some(0));
    assert_eq!(set.position("Gamma"), Some(2));
    assert_eq!(set.position("delta"), None);
}

#[test]
fn test_category_set_drops_duplicates_and_blanks() {
    let set = CategorySet::new(["Design", "design", " ", "UX Research", "ux-research"]);

    assert_eq!(set.values(), &["design".to_string(), "ux_research".to_string()]);
}

#[test]
fn test_default_vocabulary_is_populated() {
    let vocab = Vocabulary::default();

    assert!(!vocab.intentions.is_empty());
    assert!(vocab.skills.contains("Software Engineering"));
    assert!(vocab.career_stages.contains("founder"));
    assert!(vocab.industries.contains("Real Estate"));
}

#[test]
fn test_categorical_len_counts_skill_segments_three_times() {
    let vocab = Vocabulary::default();
    let expected = vocab.intentions.len()
        + vocab.experience_levels.len()
        + vocab.career_stages.len()
        + vocab.industries.len()
        + 3 * vocab.skills.len()
        + vocab.hobbies.len()
        + vocab.values.len();

    assert_eq!(vocab.categorical_len(), expected);
}
