//! Profiles, records and a clock pinned to a fixed instant.

use chrono::{DateTime, TimeZone, Utc};

use trustrank::credibility::CredibilityScore;
use trustrank::profile::Profile;
use trustrank::ranking::RankingCandidate;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 1, 9, 30, 0).unwrap()
}

/// A mid-career engineer; the baseline most fixtures are derived from.
pub fn engineer(id: &str) -> Profile {
    Profile {
        intention: Some("networking".to_string()),
        experience_level: Some("senior".to_string()),
        career_stage: Some("mid_career".to_string()),
        industry: Some("technology".to_string()),
        skills: vec!["software_engineering".into(), "data_science".into()],
        hobbies: vec!["running".into(), "hiking".into()],
        values: vec!["curiosity".into()],
        years_of_experience: 9.0,
        profile_completion: 0.8,
        is_verified: true,
        ..Profile::new(id)
    }
}

pub fn founder(id: &str) -> Profile {
    Profile {
        intention: Some("find_cofounder".to_string()),
        experience_level: Some("lead".to_string()),
        career_stage: Some("founder".to_string()),
        industry: Some("finance".to_string()),
        skills: vec!["product_management".into()],
        hobbies: vec!["wine".into()],
        years_of_experience: 12.0,
        profile_completion: 1.0,
        ..Profile::new(id)
    }
}

pub fn googler(id: &str) -> Profile {
    Profile {
        current_company: Some("Google".to_string()),
        ..engineer(id)
    }
}

pub fn record(id: &str, score: f64) -> CredibilityScore {
    CredibilityScore::new(id).with_score(score)
}

pub fn banned(id: &str) -> CredibilityScore {
    let mut record = CredibilityScore::new(id);
    record.ban("fake profile");
    record
}

pub fn candidate(profile: Profile, credibility: Option<CredibilityScore>) -> RankingCandidate {
    let candidate = RankingCandidate::new(profile);
    match credibility {
        Some(record) => candidate.with_credibility(record),
        None => candidate,
    }
}
