//! Outbound interview invitations.
//!
//! Sends are attempted exactly once. A failed send is reported to the caller
//! but never undoes the stored candidate record.

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

const REQUEST_TIMEOUT_SECS: u64 = 30;
const FALLBACK_GREETING_NAME: &str = "Candidate";

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("mail relay rejected message (status {status}): {message}")]
    Rejected { status: u16, message: String },
}

/// An interview invitation for a Recommended candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewInvitation {
    pub to: String,
    pub candidate_name: Option<String>,
    pub role_name: String,
    pub interview_at: DateTime<Utc>,
    pub meeting_link: String,
}

impl InterviewInvitation {
    pub fn subject(&self) -> String {
        format!(
            "Congratulations! Interview Scheduled with {}",
            self.role_name
        )
    }

    pub fn body(&self) -> String {
        let name = self
            .candidate_name
            .as_deref()
            .unwrap_or(FALLBACK_GREETING_NAME);
        format!(
            "Dear {name},\n\n\
             Congratulations! Based on your resume analysis, you have been shortlisted as a \
             \"Recommended\" candidate for a position at {role}.\n\n\
             We would like to invite you for an interview. Below are the details:\n\
             - Date and Time : {when} UTC\n\
             - Meeting Link : {link}\n\n\
             Please ensure you are available at the scheduled time. \
             We look forward to speaking with you!\n\n\
             Best regards,\n\
             {role} Recruitment Team\n",
            role = self.role_name,
            when = self.interview_at.format("%Y-%m-%d %H:%M"),
            link = self.meeting_link,
        )
    }
}

/// Delivers invitations. Carried in the gateway as `Arc<dyn Notifier>`.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, invitation: &InterviewInvitation) -> Result<(), NotificationError>;
}

// ────────────────────────────────────────────────────────────────────────────
// WebhookNotifier: posts the rendered message to an HTTP mail relay
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: String,
    body: String,
}

#[derive(Clone)]
pub struct WebhookNotifier {
    client: Client,
    url: String,
    token: Option<String>,
    from: String,
}

impl WebhookNotifier {
    pub fn new(url: String, token: Option<String>, from: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self {
            client,
            url,
            token,
            from,
        })
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn send(&self, invitation: &InterviewInvitation) -> Result<(), NotificationError> {
        let message = RelayMessage {
            from: &self.from,
            to: &invitation.to,
            subject: invitation.subject(),
            body: invitation.body(),
        };

        let mut request = self.client.post(&self.url).json(&message);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotificationError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        info!("Invitation sent to {}", invitation.to);
        Ok(())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// LogNotifier: used when no relay is configured
// ────────────────────────────────────────────────────────────────────────────

pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, invitation: &InterviewInvitation) -> Result<(), NotificationError> {
        info!(
            to = %invitation.to,
            subject = %invitation.subject(),
            interview_at = %invitation.interview_at,
            "No mail relay configured; invitation logged only"
        );
        Ok(())
    }
}
