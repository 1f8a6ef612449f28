//! Assessment form: payload shape, email check and the submit flow.
//!
//! The flow is written against two small traits so it runs the same way in
//! the browser (`wasm::form`) and against mocks on the host.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::config::FormConfig;

pub const FIELD_ERROR_CLASS: &str = "field-error";
pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("relay answered with HTTP {0}")]
    Status(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error("could not encode submission: {0}")]
    Encode(String),
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub company_name: String,
    pub email: String,
    pub claims: Vec<String>,
    pub revenue: String,
    pub timestamp: DateTime<Utc>,
}

/// Body sent to the relay: the submission plus the relay's `_` directives.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RelayPayload {
    #[serde(flatten)]
    pub submission: AssessmentSubmission,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
    #[serde(rename = "_template")]
    pub template: String,
}

impl RelayPayload {
    pub fn new(submission: AssessmentSubmission, config: &FormConfig) -> Self {
        let reply_to = submission.email.clone();
        Self {
            submission,
            subject: config.subject.clone(),
            reply_to,
            template: config.template.clone(),
        }
    }
}

pub fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Outbound POST of a JSON payload. Resolves to the HTTP status.
#[allow(async_fn_in_trait)]
pub trait FormRelay {
    async fn post_json(&self, url: &str, payload: &RelayPayload) -> Result<u16, SubmitError>;
}

/// The parts of the page the submit flow touches.
pub trait SubmissionView {
    /// Disables the submit control and shows `busy_label`. Returns the label it replaced.
    fn begin_busy(&self, busy_label: &str) -> String;
    fn end_busy(&self, original_label: &str);
    fn show_success(&self);
    fn show_error(&self, message: &str);
    fn reset_fields(&self);
}

/// Restores the submit control when dropped, whichever way the flow exits.
pub struct BusyGuard<'a, V: SubmissionView + ?Sized> {
    view: &'a V,
    label: String,
}

impl<'a, V: SubmissionView + ?Sized> BusyGuard<'a, V> {
    pub fn engage(view: &'a V, busy_label: &str) -> Self {
        let label = view.begin_busy(busy_label);
        Self { view, label }
    }
}

impl<V: SubmissionView + ?Sized> Drop for BusyGuard<'_, V> {
    fn drop(&mut self) {
        self.view.end_busy(&self.label);
    }
}

pub async fn submit<V, R>(
    view: &V,
    relay: &R,
    endpoint: &str,
    config: &FormConfig,
    submission: AssessmentSubmission,
) -> Result<(), SubmitError>
where
    V: SubmissionView + ?Sized,
    R: FormRelay + ?Sized,
{
    let payload = RelayPayload::new(submission, config);
    let _busy = BusyGuard::engage(view, &config.busy_label);

    let outcome = match relay.post_json(endpoint, &payload).await {
        Ok(status) if is_success(status) => Ok(()),
        Ok(status) => Err(SubmitError::Status(status)),
        Err(e) => Err(e),
    };

    match &outcome {
        Ok(()) => {
            log::info!("assessment submitted for {}", payload.submission.company_name);
            view.show_success();
            view.reset_fields();
        }
        Err(e) => {
            log::error!("assessment submission failed: {e}");
            view.show_error(&config.error_message);
        }
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("  founder@brand.co.in "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn success_range() {
        assert!(is_success(200));
        assert!(is_success(204));
        assert!(!is_success(199));
        assert!(!is_success(302));
        assert!(!is_success(500));
    }

    #[test]
    fn payload_wire_shape() {
        let submission = AssessmentSubmission {
            company_name: "Acme".into(),
            email: "a@b.com".into(),
            claims: vec!["eco-label".into(), "recyclable".into()],
            revenue: "1M-5M".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        };
        let payload = RelayPayload::new(submission, &FormConfig::default());
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "companyName": "Acme",
                "email": "a@b.com",
                "claims": ["eco-label", "recyclable"],
                "revenue": "1M-5M",
                "timestamp": "2024-05-01T12:00:00Z",
                "_subject": "New Sustainability Assessment Request",
                "_replyto": "a@b.com",
                "_template": "table",
            })
        );
    }
}
