use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::{CredibilityError, CredibilityResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MisconductCategory {
    Harassment,
    SafetyThreat,
    NoShowExcuseAbuse,
    InappropriateBehavior,
    FakeProfile,
    Spam,
    Other,
}

impl MisconductCategory {
    /// Severity weight used to size the sanction.
    pub fn severity(&self) -> f64 {
        match self {
            MisconductCategory::Harassment => 3.0,
            MisconductCategory::SafetyThreat => 5.0,
            MisconductCategory::NoShowExcuseAbuse => 1.0,
            MisconductCategory::InappropriateBehavior => 2.0,
            MisconductCategory::FakeProfile => 4.0,
            MisconductCategory::Spam => 1.5,
            MisconductCategory::Other => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Review workflow state of a report.
pub enum ReportStatus {
    Pending,
    UnderInvestigation,
    Verified,
    Rejected,
    Dismissed,
}

impl ReportStatus {
    /// Pending -> UnderInvestigation -> {Verified, Rejected, Dismissed};
    /// Pending may also be dismissed directly.
    pub fn can_transition_to(&self, next: ReportStatus) -> bool {
        matches!(
            (self, next),
            (ReportStatus::Pending, ReportStatus::UnderInvestigation)
                | (ReportStatus::Pending, ReportStatus::Dismissed)
                | (ReportStatus::UnderInvestigation, ReportStatus::Verified)
                | (ReportStatus::UnderInvestigation, ReportStatus::Rejected)
                | (ReportStatus::UnderInvestigation, ReportStatus::Dismissed)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ReportStatus::Verified | ReportStatus::Rejected | ReportStatus::Dismissed
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "pending",
            ReportStatus::UnderInvestigation => "under_investigation",
            ReportStatus::Verified => "verified",
            ReportStatus::Rejected => "rejected",
            ReportStatus::Dismissed => "dismissed",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MisconductReport {
    pub report_id: String,
    pub meeting_id: String,
    pub reporter_id: String,
    pub reported_user_id: String,
    pub category: MisconductCategory,
    #[serde(default)]
    pub description: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}

impl MisconductReport {
    /// New report in [`ReportStatus::Pending`].
    pub fn new(
        report_id: impl Into<String>,
        meeting_id: impl Into<String>,
        reporter_id: impl Into<String>,
        reported_user_id: impl Into<String>,
        category: MisconductCategory,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            report_id: report_id.into(),
            meeting_id: meeting_id.into(),
            reporter_id: reporter_id.into(),
            reported_user_id: reported_user_id.into(),
            category,
            description: String::new(),
            status: ReportStatus::Pending,
            created_at,
            resolved_at: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Moves the report along the review workflow, stamping `resolved_at` on
    /// terminal states.
    pub fn transition(&mut self, next: ReportStatus, at: DateTime<Utc>) -> CredibilityResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CredibilityError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if next.is_terminal() {
            self.resolved_at = Some(at);
        }
        Ok(())
    }

    #[inline]
    pub fn is_verified(&self) -> bool {
        self.status == ReportStatus::Verified
    }

    #[inline]
    pub fn severity(&self) -> f64 {
        self.category.severity()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
/// Sanction applied for a report.
pub enum MisconductOutcome {
    /// Report not verified; nothing changed.
    Ignored,
    Frozen { until: DateTime<Utc> },
    Banned,
}
