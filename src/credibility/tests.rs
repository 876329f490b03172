use chrono::{DateTime, Duration, TimeZone, Utc};

use super::*;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
}

fn calc() -> CredibilityCalculator {
    CredibilityCalculator::default()
}

fn verified(meeting: &str, rater: &str, rated: &str, value: f64, at: DateTime<Utc>) -> MeetingRating {
    MeetingRating::new(meeting, rater, rated, value, at)
        .unwrap()
        .with_verification(true, 1800)
}

fn unverified(meeting: &str, rater: &str, rated: &str, value: f64) -> MeetingRating {
    MeetingRating::new(meeting, rater, rated, value, now()).unwrap()
}

fn active_record(user: &str, average: f64, days_since_meeting: i64) -> CredibilityScore {
    CredibilityScore {
        total_meetings: 4,
        average_rating: average,
        last_meeting_date: Some(now() - Duration::days(days_since_meeting)),
        ..CredibilityScore::new(user)
    }
}

// --- overall score ---

#[test]
fn test_overall_score_blends_and_rounds() {
    let c = calc();
    assert_eq!(c.calculate_overall_score(4.8, 100.0), 5.0);
    assert_eq!(c.calculate_overall_score(4.0, 100.0), 4.5);
    assert_eq!(c.calculate_overall_score(3.0, 75.0), 3.0);
    assert_eq!(c.calculate_overall_score(2.0, 20.0), 1.5);
    assert_eq!(c.calculate_overall_score(5.0, 0.0), 3.5);
}

#[test]
fn test_overall_score_stays_in_range() {
    let c = calc();
    assert_eq!(c.calculate_overall_score(f64::NAN, 100.0), 1.5);
    assert_eq!(c.calculate_overall_score(9.0, 100.0), 5.0);
    assert_eq!(c.calculate_overall_score(-3.0, 0.0), 0.0);
}

#[test]
fn test_fulfillment_score_table() {
    let c = calc();
    assert_eq!(c.fulfillment_score(100.0), 5.0);
    assert_eq!(c.fulfillment_score(95.0), 5.0);
    assert_eq!(c.fulfillment_score(94.9), 4.5);
    assert_eq!(c.fulfillment_score(70.0), 3.0);
    assert_eq!(c.fulfillment_score(30.0), 1.0);
    assert_eq!(c.fulfillment_score(29.9), 0.5);
    assert_eq!(c.fulfillment_score(0.0), 0.5);
}

#[test]
fn test_fulfillment_rate() {
    let c = calc();
    assert_eq!(c.calculate_fulfillment_rate(10, 2), 80.0);
    assert_eq!(c.calculate_fulfillment_rate(0, 0), 100.0);
    assert_eq!(c.calculate_fulfillment_rate(4, 4), 0.0);
    assert_eq!(c.calculate_fulfillment_rate(4, 9), 0.0);
}

// --- decay ---

#[test]
fn test_no_decay_before_threshold() {
    let c = calc();
    assert_eq!(c.apply_decay(4.5, 0), 4.5);
    assert_eq!(c.apply_decay(4.5, 14), 4.5);
    assert_eq!(c.apply_decay(4.5, -3), 4.5);
}

#[test]
fn test_decay_by_bracket() {
    let c = calc();
    // 4.5 - 0.08 * 6 = 4.02
    assert_eq!(c.apply_decay(4.5, 20), 4.0);
    // 3.0 - 0.03 * 30 = 2.1
    assert_eq!(c.apply_decay(3.0, 44), 2.0);
    // One overdue day is absorbed by rounding.
    assert_eq!(c.apply_decay(4.5, 15), 4.5);
}

#[test]
fn test_decay_floor() {
    let c = calc();
    assert_eq!(c.apply_decay(1.0, 200), 0.5);
    assert_eq!(c.apply_decay(5.0, 1000), 0.5);
    assert_eq!(c.apply_decay(0.5, 100), 0.5);
    assert_eq!(c.apply_decay(0.0, 100), 0.0);
}

#[test]
fn test_decay_never_raises_score() {
    let c = calc();
    for tenths in 0..=50 {
        let score = tenths as f64 / 10.0;
        for days in [15, 16, 30, 90, 365] {
            assert!(c.apply_decay(score, days) <= score, "score {score} days {days}");
        }
    }
}

#[test]
fn test_custom_decay_threshold() {
    let policy = CredibilityPolicy::default().with_decay_threshold_days(30);
    let c = CredibilityCalculator::new(policy).unwrap();
    assert_eq!(c.apply_decay(4.5, 29), 4.5);
    // 4.5 - 0.08 * 6
    assert_eq!(c.apply_decay(4.5, 35), 4.0);
}

// --- tiers ---

#[test]
fn test_tier_boundaries() {
    let cases = [
        (0.0, CredibilityTier::Banned),
        (0.5, CredibilityTier::Banned),
        (0.6, CredibilityTier::Critical),
        (1.0, CredibilityTier::Critical),
        (1.1, CredibilityTier::LowTrust),
        (1.6, CredibilityTier::Alert),
        (2.1, CredibilityTier::Caution),
        (2.6, CredibilityTier::Normal),
        (3.0, CredibilityTier::Normal),
        (3.6, CredibilityTier::Trusted),
        (4.1, CredibilityTier::WellTrusted),
        (4.599999, CredibilityTier::WellTrusted),
        (4.6, CredibilityTier::HighlyTrusted),
        (5.0, CredibilityTier::HighlyTrusted),
    ];
    for (score, tier) in cases {
        assert_eq!(CredibilityTier::from_score(score), tier, "score {score}");
        assert_eq!(calc().tier_for(score), tier, "score {score}");
    }
}

#[test]
fn test_out_of_range_scores_fall_back_to_normal() {
    assert_eq!(CredibilityTier::from_score(-0.1), CredibilityTier::Normal);
    assert_eq!(CredibilityTier::from_score(5.5), CredibilityTier::Normal);
    assert_eq!(CredibilityTier::from_score(f64::NAN), CredibilityTier::Normal);
}

#[test]
fn test_tier_policy_effects() {
    assert_eq!(CredibilityTier::Banned.matching_weight(), 0.0);
    assert_eq!(CredibilityTier::Critical.matching_weight(), 0.3);
    assert_eq!(CredibilityTier::Normal.matching_weight(), 1.0);
    assert_eq!(CredibilityTier::HighlyTrusted.matching_weight(), 1.6);

    assert_eq!(CredibilityTier::Banned.daily_swipe_limit(), Some(0));
    assert_eq!(CredibilityTier::Alert.daily_swipe_limit(), Some(3));
    assert_eq!(CredibilityTier::Caution.daily_swipe_limit(), None);

    assert_eq!(CredibilityTier::Banned.pro_price_multiplier(), None);
    assert_eq!(CredibilityTier::HighlyTrusted.pro_price_multiplier(), Some(0.7));
}

#[test]
fn test_multipliers_increase_with_tier() {
    let weights: Vec<f64> = CredibilityTier::ALL
        .iter()
        .map(|t| t.matching_weight())
        .collect();
    assert!(weights.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_tier_table_sorts_rules() {
    let mut rules = DEFAULT_TIER_RULES.to_vec();
    rules.reverse();
    let table = TierTable::new(rules);

    assert!(table.is_complete());
    assert_eq!(table.tier_for(3.7), CredibilityTier::Trusted);
    assert_eq!(table.rule(CredibilityTier::Alert).daily_swipe_limit, Some(3));
}

#[test]
fn test_tier_serde_names() {
    let json = serde_json::to_string(&CredibilityTier::WellTrusted).unwrap();
    assert_eq!(json, "\"well_trusted\"");
    assert_eq!(CredibilityTier::LowTrust.display_name(), "Low Trust");
}

// --- recompute / refresh ---

#[test]
fn test_recompute_from_ratings() {
    let c = calc();
    let at = now() - Duration::days(2);
    let ratings: Vec<MeetingRating> = (0..4)
        .map(|i| verified(&format!("m{i}"), "rater", "u", 4.5, at))
        .collect();
    let aggregates = MeetingAggregates::from_ratings(&ratings, 0, &AntiGamingPolicy::default());

    let mut record = CredibilityScore::new("u");
    c.recompute(&mut record, &aggregates, now());

    assert_eq!(record.total_meetings, 4);
    assert_eq!(record.fulfillment_rate, 100.0);
    assert_eq!(record.average_rating, 4.5);
    assert_eq!(record.overall_score, 4.5);
    assert_eq!(record.tier, CredibilityTier::WellTrusted);
    assert_eq!(record.last_meeting_date, Some(at));
    assert!(record.is_consistent());
}

#[test]
fn test_recompute_without_history_keeps_default() {
    let c = calc();
    let mut record = CredibilityScore::new("u");
    c.recompute(&mut record, &MeetingAggregates::default(), now());

    assert_eq!(record.overall_score, 3.0);
    assert_eq!(record.tier, CredibilityTier::Normal);
}

#[test]
fn test_recompute_keeps_banned_at_zero() {
    let c = calc();
    let mut record = CredibilityScore::new("u");
    record.ban("test");

    let ratings = vec![verified("m1", "r", "u", 5.0, now())];
    let aggregates = MeetingAggregates::from_ratings(&ratings, 0, &AntiGamingPolicy::default());
    c.recompute(&mut record, &aggregates, now());

    assert_eq!(record.overall_score, 0.0);
    assert_eq!(record.tier, CredibilityTier::Banned);
    assert!(record.is_consistent());
}

#[test]
fn test_no_shows_lower_the_score() {
    let c = calc();
    let ratings: Vec<MeetingRating> = (0..6)
        .map(|i| verified(&format!("m{i}"), "r", "u", 4.0, now()))
        .collect();
    let aggregates = MeetingAggregates::from_ratings(&ratings, 4, &AntiGamingPolicy::default());
    assert_eq!(aggregates.total_meetings, 10);

    let mut record = CredibilityScore::new("u");
    c.recompute(&mut record, &aggregates, now());

    // 60% attendance -> 2.5; 0.7 * 4.0 + 0.3 * 2.5 = 3.55
    assert_eq!(record.fulfillment_rate, 60.0);
    assert_eq!(record.overall_score, 3.5);
}

#[test]
fn test_unverified_ratings_are_down_weighted() {
    let ratings = vec![
        verified("m1", "a", "u", 5.0, now()),
        unverified("m2", "b", "u", 1.0),
    ];
    let aggregates = MeetingAggregates::from_ratings(&ratings, 0, &AntiGamingPolicy::default());

    let avg = aggregates.average_rating.unwrap();
    assert!((avg - 5.5 / 1.5).abs() < 1e-9);
}

#[test]
fn test_aggregates_without_ratings() {
    let aggregates = MeetingAggregates::from_ratings(&[], 2, &AntiGamingPolicy::default());
    assert_eq!(aggregates.total_meetings, 2);
    assert_eq!(aggregates.average_rating, None);
    assert_eq!(aggregates.last_meeting_date, None);
}

#[test]
fn test_refresh_decay_is_idempotent() {
    let c = calc();
    let mut record = active_record("u", 4.5, 30);
    record.overall_score = 4.5;

    // base 4.5, 4.5 - 0.08 * 16 = 3.22
    assert!(c.refresh_decay(&mut record, now()));
    assert_eq!(record.overall_score, 3.0);
    assert_eq!(record.tier, CredibilityTier::Normal);
    assert_eq!(record.last_decay_date, Some(now()));

    assert!(!c.refresh_decay(&mut record, now()));
    assert_eq!(record.overall_score, 3.0);
}

#[test]
fn test_refresh_decay_skips_inactive_records() {
    let c = calc();

    let mut fresh = CredibilityScore::new("new");
    assert!(!c.refresh_decay(&mut fresh, now()));
    assert_eq!(fresh.overall_score, 3.0);

    let mut banned = active_record("b", 4.5, 90);
    banned.ban("test");
    assert!(!c.refresh_decay(&mut banned, now()));
    assert_eq!(banned.overall_score, 0.0);
}

// --- anti-gaming ---

#[test]
fn test_gps_anomaly_freeze_on_third() {
    let c = calc();
    let mut record = CredibilityScore::new("u");
    let signals = RatingSignals {
        gps_anomaly: true,
        mutual_high_rating: false,
    };

    assert_eq!(c.apply_rating_signals(&mut record, signals, now()), None);
    assert_eq!(c.apply_rating_signals(&mut record, signals, now()), None);
    let until = c.apply_rating_signals(&mut record, signals, now());

    assert_eq!(until, Some(now() + Duration::days(7)));
    assert_eq!(record.gps_anomaly_count, 3);
    assert!(record.is_frozen_at(now()));
    assert!(!record.is_frozen_at(now() + Duration::days(8)));
}

#[test]
fn test_short_or_unverified_meetings_are_anomalies() {
    let c = calc();

    let short = MeetingRating::new("m", "a", "b", 4.0, now())
        .unwrap()
        .with_verification(true, 120);
    assert!(c.assess_rating(&short, None).gps_anomaly);

    let unchecked = unverified("m", "a", "b", 4.0);
    assert!(c.assess_rating(&unchecked, None).gps_anomaly);

    let good = verified("m", "a", "b", 4.0, now());
    assert!(!c.assess_rating(&good, None).gps_anomaly);
}

#[test]
fn test_mutual_high_rating_detection() {
    let c = calc();
    let a_to_b = verified("m1", "a", "b", 5.0, now());
    let b_to_a = verified("m1", "b", "a", 4.5, now());
    let other_meeting = verified("m2", "b", "a", 5.0, now());
    let lukewarm = verified("m1", "b", "a", 4.0, now());

    assert!(c.assess_rating(&a_to_b, Some(&b_to_a)).mutual_high_rating);
    assert!(!c.assess_rating(&a_to_b, Some(&other_meeting)).mutual_high_rating);
    assert!(!c.assess_rating(&a_to_b, Some(&lukewarm)).mutual_high_rating);
    assert!(!c.assess_rating(&a_to_b, None).mutual_high_rating);
}

#[test]
fn test_gaming_flag_caps_average() {
    let c = calc();
    let mut record = active_record("u", 5.0, 0);
    let signals = RatingSignals {
        gps_anomaly: false,
        mutual_high_rating: true,
    };
    for _ in 0..4 {
        c.apply_rating_signals(&mut record, signals, now());
    }
    assert!(!c.is_gaming_suspected(&record));

    c.refresh_decay(&mut record, now());
    assert_eq!(record.overall_score, 5.0);

    c.apply_rating_signals(&mut record, signals, now());
    assert!(c.is_gaming_suspected(&record));

    // Average capped at 4.0: 0.7 * 4.0 + 0.3 * 5.0 = 4.3
    c.refresh_decay(&mut record, now());
    assert_eq!(record.overall_score, 4.5);
}

// --- misconduct ---

fn report(category: MisconductCategory, status_path: &[ReportStatus]) -> MisconductReport {
    let mut report = MisconductReport::new("r1", "m1", "reporter", "u", category, now());
    for status in status_path {
        report.transition(*status, now()).unwrap();
    }
    report
}

const VERIFY: [ReportStatus; 2] = [ReportStatus::UnderInvestigation, ReportStatus::Verified];

#[test]
fn test_severe_misconduct_bans() {
    let c = calc();
    let mut record = active_record("u", 4.5, 1).with_score(4.5);

    let outcome = c
        .apply_verified_misconduct(&mut record, &report(MisconductCategory::SafetyThreat, &VERIFY), now())
        .unwrap();

    assert_eq!(outcome, MisconductOutcome::Banned);
    assert!(record.is_banned);
    assert_eq!(record.overall_score, 0.0);
    assert_eq!(record.tier, CredibilityTier::Banned);
    assert_eq!(c.matching_weight(&record), 0.0);
}

#[test]
fn test_moderate_misconduct_freezes() {
    let c = calc();
    let mut record = CredibilityScore::new("u");

    let outcome = c
        .apply_verified_misconduct(&mut record, &report(MisconductCategory::Harassment, &VERIFY), now())
        .unwrap();
    assert_eq!(
        outcome,
        MisconductOutcome::Frozen {
            until: now() + Duration::days(21)
        }
    );

    let mut spam = CredibilityScore::new("u");
    let outcome = c
        .apply_verified_misconduct(&mut spam, &report(MisconductCategory::Spam, &VERIFY), now())
        .unwrap();
    assert_eq!(
        outcome,
        MisconductOutcome::Frozen {
            until: now() + Duration::days(11)
        }
    );
    assert!(!spam.is_banned);
}

#[test]
fn test_unverified_report_is_ignored() {
    let c = calc();
    let mut record = CredibilityScore::new("u");
    let pending = report(MisconductCategory::SafetyThreat, &[]);

    let outcome = c.apply_verified_misconduct(&mut record, &pending, now()).unwrap();

    assert_eq!(outcome, MisconductOutcome::Ignored);
    assert_eq!(record, CredibilityScore::new("u"));
}

#[test]
fn test_report_for_other_user_is_rejected() {
    let c = calc();
    let mut record = CredibilityScore::new("someone_else");
    let result = c.apply_verified_misconduct(&mut record, &report(MisconductCategory::Spam, &VERIFY), now());

    assert!(matches!(result, Err(CredibilityError::UserMismatch { .. })));
}

#[test]
fn test_report_status_transitions() {
    let mut r = MisconductReport::new("r", "m", "a", "b", MisconductCategory::Other, now());
    assert!(r.transition(ReportStatus::Verified, now()).is_err());

    r.transition(ReportStatus::UnderInvestigation, now()).unwrap();
    assert_eq!(r.resolved_at, None);
    r.transition(ReportStatus::Rejected, now()).unwrap();
    assert_eq!(r.resolved_at, Some(now()));

    let err = r.transition(ReportStatus::Verified, now()).unwrap_err();
    assert_eq!(
        err,
        CredibilityError::InvalidStatusTransition {
            from: ReportStatus::Rejected,
            to: ReportStatus::Verified,
        }
    );

    let mut quick = MisconductReport::new("q", "m", "a", "b", MisconductCategory::Spam, now());
    assert!(quick.transition(ReportStatus::Dismissed, now()).is_ok());
}

// --- ratings ---

#[test]
fn test_rating_value_validation() {
    for valid in [0.5, 1.0, 3.5, 5.0] {
        assert!(is_valid_rating(valid), "{valid}");
    }
    for invalid in [0.0, 5.5, 3.3, -1.0, f64::NAN] {
        assert!(!is_valid_rating(invalid), "{invalid}");
    }

    let err = MeetingRating::new("m", "a", "b", 4.2, now()).unwrap_err();
    assert_eq!(err, CredibilityError::InvalidRating { value: 4.2 });
}

#[test]
fn test_self_rating_rejected() {
    let err = MeetingRating::new("m", "Alice", "alice", 4.0, now()).unwrap_err();
    assert!(matches!(err, CredibilityError::SelfRating { .. }));
}

#[test]
fn test_comment_truncated_on_char_boundary() {
    let long = "é".repeat(600);
    let rating = unverified("m", "a", "b", 4.0).with_comment(long);

    assert_eq!(rating.comment.as_ref().unwrap().chars().count(), 500);
}

#[test]
fn test_rating_tags() {
    let rating = unverified("m", "a", "b", 2.0).with_tags([
        RatingTag::Late,
        RatingTag::Friendly,
        RatingTag::Rude,
    ]);
    assert_eq!(rating.negative_tag_count(), 2);
    assert_eq!(RatingTag::AsDescribed.category(), TagCategory::Neutral);
}

// --- record state ---

#[test]
fn test_freeze_never_shortens() {
    let mut record = CredibilityScore::new("u");
    record.freeze(now() + Duration::days(10));
    record.freeze(now() + Duration::days(3));
    assert_eq!(record.freeze_end_date, Some(now() + Duration::days(10)));

    assert!(!record.lift_expired_freeze(now()));
    assert!(record.lift_expired_freeze(now() + Duration::days(10)));
    assert!(!record.is_frozen);
}

#[test]
fn test_indefinite_freeze() {
    let record = CredibilityScore {
        is_frozen: true,
        ..CredibilityScore::new("u")
    };
    assert!(record.is_frozen_at(now() + Duration::days(3650)));
}

#[test]
fn test_swipe_limits() {
    let c = calc();

    let alert = CredibilityScore::new("a").with_score(2.0);
    assert!(c.can_swipe(&alert, 2, now()));
    assert!(!c.can_swipe(&alert, 3, now()));

    let normal = CredibilityScore::new("n");
    assert!(c.can_swipe(&normal, 500, now()));

    let mut frozen = CredibilityScore::new("f");
    frozen.freeze(now() + Duration::days(1));
    assert!(!c.can_swipe(&frozen, 0, now()));

    let mut banned = CredibilityScore::new("b");
    banned.ban("test");
    assert!(!c.can_swipe(&banned, 0, now()));
    assert_eq!(c.pro_price_multiplier(&banned), None);
}

#[test]
fn test_effective_tier_ignores_stale_stored_tier() {
    let c = calc();
    let record = CredibilityScore {
        overall_score: 0.4,
        ..CredibilityScore::new("u")
    };
    assert_eq!(record.tier, CredibilityTier::Normal);
    assert_eq!(c.effective_tier(&record), CredibilityTier::Banned);
    assert_eq!(c.matching_weight(&record), 0.0);
}

#[test]
fn test_record_serde_defaults() {
    let record: CredibilityScore = serde_json::from_str(r#"{"user_id":"u","overall_score":4.0,"tier":"trusted"}"#).unwrap();
    assert_eq!(record.user_id, "u");
    assert_eq!(record.tier, CredibilityTier::Trusted);
    assert_eq!(record.fulfillment_rate, 100.0);
    assert!(!record.is_banned);
}

// --- policy ---

#[test]
fn test_policy_validation() {
    assert!(CredibilityPolicy::default().validate().is_ok());

    let bad_weights = CredibilityPolicy {
        rating_weight: 0.9,
        ..CredibilityPolicy::default()
    };
    assert!(matches!(
        CredibilityCalculator::new(bad_weights),
        Err(CredibilityError::InvalidPolicy { .. })
    ));

    let bad_threshold = CredibilityPolicy::default().with_decay_threshold_days(0);
    assert!(bad_threshold.validate().is_err());

    let mut rules = DEFAULT_TIER_RULES.to_vec();
    rules.pop();
    let incomplete = CredibilityPolicy::default().with_tiers(TierTable::new(rules));
    assert!(incomplete.validate().is_err());
}

// --- aggregates ---

#[test]
fn test_folding_one_rating_matches_full_rebuild() {
    let policy = AntiGamingPolicy::default();
    let earlier = verified("m1", "x", "u", 4.0, now() - Duration::days(1));
    let latest = unverified("m2", "y", "u", 2.0);

    let folded = MeetingAggregates::from_ratings(std::slice::from_ref(&earlier), 1, &policy)
        .with_rating(&latest, &policy);
    let rebuilt = MeetingAggregates::from_ratings(&[earlier, latest], 1, &policy);

    assert_eq!(folded, rebuilt);
    assert_eq!(folded.total_meetings, 3);
    // (4.0 + 0.5 * 2.0) / 1.5
    assert!((folded.average_rating.unwrap() - 10.0 / 3.0).abs() < 1e-9);
    assert_eq!(folded.last_meeting_date, Some(now()));
}

#[test]
fn test_folding_into_average_only_summary() {
    let policy = AntiGamingPolicy::default();
    let summary = MeetingAggregates {
        total_meetings: 3,
        total_no_shows: 1,
        average_rating: Some(4.0),
        ..MeetingAggregates::default()
    };

    let folded = summary.with_rating(&verified("m9", "x", "u", 5.0, now()), &policy);

    assert_eq!(folded.total_meetings, 4);
    assert_eq!(folded.total_no_shows, 1);
    assert!((folded.average_rating.unwrap() - 13.0 / 3.0).abs() < 1e-9);
}
