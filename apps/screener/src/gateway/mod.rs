//! Notification/Persistence Gateway: acts on a finished screening.
//!
//! | tier          | store record               | invitation            |
//! |---------------|----------------------------|-----------------------|
//! | Recommended   | yes, with interview + link | if an email was found |
//! | Potential     | yes, no interview fields   | no                    |
//! | Not Qualified | no                         | no                    |

pub mod notifier;
pub mod store;

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::gateway::notifier::{InterviewInvitation, Notifier};
use crate::gateway::store::{CandidateStore, NewCandidate};
use crate::screening::pipeline::Screening;
use crate::screening::scoring::Tier;

/// How Recommended candidates are scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewPolicy {
    pub lead: Duration,
    pub meeting_link: String,
}

/// What the gateway will do for a given tier.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayAction {
    ScheduleInterview {
        interview_at: DateTime<Utc>,
        meeting_link: String,
    },
    Record,
    Skip,
}

impl InterviewPolicy {
    pub fn plan(&self, tier: Tier, now: DateTime<Utc>) -> GatewayAction {
        match tier {
            Tier::Recommended => GatewayAction::ScheduleInterview {
                interview_at: now + self.lead,
                meeting_link: self.meeting_link.clone(),
            },
            Tier::Potential => GatewayAction::Record,
            Tier::NotQualified => GatewayAction::Skip,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationStatus {
    Sent,
    Failed,
    /// Recommended, but no email address was extracted.
    Skipped,
    NotApplicable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GatewayOutcome {
    pub record_id: Option<Uuid>,
    pub interview_at: Option<DateTime<Utc>>,
    pub meeting_link: Option<String>,
    pub notification: NotificationStatus,
}

impl GatewayOutcome {
    fn untouched() -> Self {
        Self {
            record_id: None,
            interview_at: None,
            meeting_link: None,
            notification: NotificationStatus::NotApplicable,
        }
    }
}

pub struct Gateway {
    store: Arc<dyn CandidateStore>,
    notifier: Arc<dyn Notifier>,
    policy: InterviewPolicy,
}

impl Gateway {
    pub fn new(
        store: Arc<dyn CandidateStore>,
        notifier: Arc<dyn Notifier>,
        policy: InterviewPolicy,
    ) -> Self {
        Self {
            store,
            notifier,
            policy,
        }
    }

    pub fn store(&self) -> &dyn CandidateStore {
        self.store.as_ref()
    }

    /// Stores and/or notifies for one screening. Performs at most one insert
    /// and at most one send. Only a storage failure is returned as an error.
    pub async fn dispatch(
        &self,
        screening: &Screening,
        role_name: &str,
        now: DateTime<Utc>,
    ) -> Result<GatewayOutcome, AppError> {
        let profile = &screening.profile;
        let tier = screening.result.tier;

        let (interview_at, meeting_link) = match self.policy.plan(tier, now) {
            GatewayAction::Skip => return Ok(GatewayOutcome::untouched()),
            GatewayAction::Record => (None, None),
            GatewayAction::ScheduleInterview {
                interview_at,
                meeting_link,
            } => (Some(interview_at), Some(meeting_link)),
        };

        let row = self
            .store
            .insert(NewCandidate {
                name: profile.name.clone(),
                email: profile.email.clone(),
                phone: profile.phone.clone(),
                status: tier.label().to_string(),
                ats_score: screening.result.total_score,
                interview_at,
                meeting_link: meeting_link.clone(),
            })
            .await?;

        let notification = match (&profile.email, interview_at, &meeting_link) {
            (Some(email), Some(interview_at), Some(link)) => {
                let invitation = InterviewInvitation {
                    to: email.clone(),
                    candidate_name: profile.name.clone(),
                    role_name: role_name.to_string(),
                    interview_at,
                    meeting_link: link.clone(),
                };
                match self.notifier.send(&invitation).await {
                    Ok(()) => NotificationStatus::Sent,
                    Err(e) => {
                        warn!("Failed to send invitation for candidate {}: {e}", row.id);
                        NotificationStatus::Failed
                    }
                }
            }
            (None, Some(_), _) => {
                info!("Candidate {} has no email; invitation skipped", row.id);
                NotificationStatus::Skipped
            }
            _ => NotificationStatus::NotApplicable,
        };

        Ok(GatewayOutcome {
            record_id: Some(row.id),
            interview_at,
            meeting_link,
            notification,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::notifier::recording::RecordingNotifier;
    use crate::gateway::store::memory::MemoryStore;
    use crate::screening::profile::CandidateProfile;
    use crate::screening::scoring::{ScoreComponents, ScoreResult};
    use chrono::TimeZone;

    const ROLE: &str = "Analytics and Modeling Associate";

    fn policy() -> InterviewPolicy {
        InterviewPolicy {
            lead: Duration::days(3),
            meeting_link: "https://meet.example.com/xyz".to_string(),
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 14, 0, 0).unwrap()
    }

    fn screening(tier: Tier, email: Option<&str>) -> Screening {
        let total_score = match tier {
            Tier::Recommended => 90.0,
            Tier::Potential => 65.0,
            Tier::NotQualified => 20.0,
        };
        Screening {
            profile: CandidateProfile {
                name: Some("Tomas Okafor".to_string()),
                email: email.map(String::from),
                phone: Some("555-010-2030".to_string()),
                ..Default::default()
            },
            result: ScoreResult {
                total_score,
                components: ScoreComponents {
                    required_skills: 0.0,
                    academic: 0.0,
                    preferred_skills: 0.0,
                    contact: 0.0,
                },
                breakdown: vec![format!("Recommendation: {tier}")],
                tier,
            },
        }
    }

    fn gateway(store: Arc<MemoryStore>, notifier: Arc<RecordingNotifier>) -> Gateway {
        Gateway::new(store, notifier, policy())
    }

    #[test]
    fn test_plan_per_tier() {
        let p = policy();
        assert_eq!(
            p.plan(Tier::Recommended, now()),
            GatewayAction::ScheduleInterview {
                interview_at: Utc.with_ymd_and_hms(2026, 10, 22, 14, 0, 0).unwrap(),
                meeting_link: "https://meet.example.com/xyz".to_string(),
            }
        );
        assert_eq!(p.plan(Tier::Potential, now()), GatewayAction::Record);
        assert_eq!(p.plan(Tier::NotQualified, now()), GatewayAction::Skip);
    }

    #[tokio::test]
    async fn test_recommended_is_stored_and_invited() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let gw = gateway(store.clone(), notifier.clone());

        let outcome = gw
            .dispatch(&screening(Tier::Recommended, Some("tomas@example.com")), ROLE, now())
            .await
            .unwrap();

        assert_eq!(outcome.notification, NotificationStatus::Sent);
        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(Some(rows[0].id), outcome.record_id);
        assert_eq!(rows[0].status, "Recommended");
        assert_eq!(rows[0].interview_at, Some(now() + Duration::days(3)));
        assert_eq!(rows[0].meeting_link.as_deref(), Some("https://meet.example.com/xyz"));

        let sent = notifier.sent().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "tomas@example.com");
        assert_eq!(sent[0].role_name, ROLE);
    }

    #[tokio::test]
    async fn test_recommended_without_email_is_stored_not_invited() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let gw = gateway(store.clone(), notifier.clone());

        let outcome = gw
            .dispatch(&screening(Tier::Recommended, None), ROLE, now())
            .await
            .unwrap();

        assert_eq!(outcome.notification, NotificationStatus::Skipped);
        assert_eq!(store.rows().await.len(), 1);
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_send_keeps_record() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::failing());
        let gw = gateway(store.clone(), notifier.clone());

        let outcome = gw
            .dispatch(&screening(Tier::Recommended, Some("tomas@example.com")), ROLE, now())
            .await
            .unwrap();

        assert_eq!(outcome.notification, NotificationStatus::Failed);
        assert!(outcome.record_id.is_some());
        assert_eq!(store.rows().await.len(), 1);
        assert_eq!(notifier.sent().await.len(), 1);
    }

    #[tokio::test]
    async fn test_potential_is_stored_without_interview() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let gw = gateway(store.clone(), notifier.clone());

        let outcome = gw
            .dispatch(&screening(Tier::Potential, Some("tomas@example.com")), ROLE, now())
            .await
            .unwrap();

        assert_eq!(outcome.notification, NotificationStatus::NotApplicable);
        assert!(outcome.interview_at.is_none());
        let rows = store.rows().await;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, "Potential");
        assert!(rows[0].interview_at.is_none());
        assert!(rows[0].meeting_link.is_none());
        assert!(notifier.sent().await.is_empty());
    }

    #[tokio::test]
    async fn test_not_qualified_touches_nothing() {
        let store = Arc::new(MemoryStore::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let gw = gateway(store.clone(), notifier.clone());

        let outcome = gw
            .dispatch(&screening(Tier::NotQualified, Some("tomas@example.com")), ROLE, now())
            .await
            .unwrap();

        assert_eq!(outcome, GatewayOutcome::untouched());
        assert!(store.rows().await.is_empty());
        assert!(notifier.sent().await.is_empty());
    }
}
