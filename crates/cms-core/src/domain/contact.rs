use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{Violations, is_valid_email};
use crate::error::DomainError;

pub const DEFAULT_SOURCE: &str = "contact-form";
pub const MESSAGE_MIN_CHARS: usize = 10;
pub const NOTE_MAX_CHARS: usize = 2000;

const NAME_MAX_CHARS: usize = 200;
const EMAIL_MAX_CHARS: usize = 200;
const PHONE_MAX_CHARS: usize = 50;
const MESSAGE_MAX_CHARS: usize = 5000;

/// Contact message entity - one inbound contact-form submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub ip: String,
    pub user_agent: String,
    /// Reserved for automated scoring; always 0 today.
    pub spam_score: i32,
    pub handled: bool,
    pub note: Option<String>,
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public contact-form payload.
///
/// `honeypot` is a hidden form field real visitors leave empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub honeypot: String,
}

/// Who sent a submission, captured from the request.
#[derive(Debug, Clone, Default)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
}

impl ContactSubmission {
    pub fn is_spam(&self) -> bool {
        !self.honeypot.trim().is_empty()
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let name = self.name.trim();
        let email = self.email.trim();
        let message = self.message.trim();

        let mut violations = Violations::new();
        violations.require(name, "Name is required");
        violations.check(is_valid_email(email), "A valid email is required");
        violations.check(
            message.chars().count() >= MESSAGE_MIN_CHARS,
            format!("Message must be at least {MESSAGE_MIN_CHARS} characters"),
        );
        violations.max_chars(name, NAME_MAX_CHARS, "Name");
        violations.max_chars(email, EMAIL_MAX_CHARS, "Email");
        violations.max_chars(self.phone.trim(), PHONE_MAX_CHARS, "Phone");
        violations.max_chars(message, MESSAGE_MAX_CHARS, "Message");
        violations.into_result()
    }
}

impl ContactMessage {
    /// Build a stored message from a validated submission.
    pub fn new(submission: ContactSubmission, client: ClientInfo) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: submission.name.trim().to_string(),
            email: submission.email.trim().to_string(),
            phone: submission.phone.trim().to_string(),
            message: submission.message.trim().to_string(),
            ip: client.ip,
            user_agent: client.user_agent,
            spam_score: 0,
            handled: false,
            note: None,
            source: DEFAULT_SOURCE.to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: ContactPatch) {
        if let Some(handled) = patch.handled {
            self.handled = handled;
        }
        if let Some(note) = patch.note {
            self.note = Some(note.chars().take(NOTE_MAX_CHARS).collect());
        }
        self.updated_at = Utc::now();
    }
}

/// Operator update: the only mutable fields of a contact message.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ContactPatch {
    pub handled: Option<bool>,
    pub note: Option<String>,
}

impl ContactPatch {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.handled.is_none() && self.note.is_none() {
            return Err(DomainError::invalid("No updates provided"));
        }
        Ok(())
    }
}

/// Listing filter. Both conditions must hold when both are set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactFilter {
    pub handled: Option<bool>,
    pub query: Option<String>,
}

impl ContactFilter {
    pub fn new(handled: Option<bool>, query: Option<&str>) -> Self {
        let query = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);
        Self { handled, query }
    }

    /// The search text lowercased, matched literally.
    pub fn needle(&self) -> Option<String> {
        self.query.as_deref().map(str::to_lowercase)
    }

    pub fn matches(&self, message: &ContactMessage) -> bool {
        if self.handled.is_some_and(|handled| handled != message.handled) {
            return false;
        }
        match self.needle() {
            Some(needle) => [&message.name, &message.email, &message.message]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle)),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission() -> ContactSubmission {
        ContactSubmission {
            name: "  Jane  ".to_string(),
            email: "jane@example.com ".to_string(),
            phone: String::new(),
            message: "I would like a quote for SEO.".to_string(),
            honeypot: String::new(),
        }
    }

    #[test]
    fn genuine_submission_is_accepted_and_trimmed() {
        let input = submission();
        assert!(!input.is_spam());
        input.validate().unwrap();

        let message = ContactMessage::new(input, ClientInfo::default());

        assert_eq!(message.name, "Jane");
        assert_eq!(message.email, "jane@example.com");
        assert_eq!(message.source, DEFAULT_SOURCE);
        assert_eq!(message.spam_score, 0);
        assert!(!message.handled);
    }

    #[test]
    fn one_error_per_violated_rule() {
        let input = ContactSubmission {
            name: " ".to_string(),
            email: "not-an-email".to_string(),
            message: "too short".to_string(),
            ..Default::default()
        };

        match input.validate().unwrap_err() {
            DomainError::Validation(errors) => assert_eq!(
                errors,
                vec![
                    "Name is required",
                    "A valid email is required",
                    "Message must be at least 10 characters"
                ]
            ),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn whitespace_honeypot_is_not_spam() {
        let mut input = submission();
        input.honeypot = "   ".to_string();
        assert!(!input.is_spam());

        input.honeypot = "http://spam.example".to_string();
        assert!(input.is_spam());
    }

    #[test]
    fn empty_patch_is_rejected() {
        assert!(matches!(
            ContactPatch::default().validate(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn note_is_truncated() {
        let mut message = ContactMessage::new(submission(), ClientInfo::default());
        message.apply(ContactPatch {
            handled: Some(true),
            note: Some("x".repeat(NOTE_MAX_CHARS + 50)),
        });

        assert!(message.handled);
        assert_eq!(message.note.unwrap().chars().count(), NOTE_MAX_CHARS);
    }

    #[test]
    fn filter_combines_handled_and_text() {
        let mut message = ContactMessage::new(submission(), ClientInfo::default());

        assert!(ContactFilter::new(None, Some("JANE")).matches(&message));
        assert!(ContactFilter::new(Some(false), Some("quote")).matches(&message));
        assert!(!ContactFilter::new(Some(true), Some("quote")).matches(&message));
        assert!(!ContactFilter::new(None, Some("bob")).matches(&message));

        message.handled = true;
        assert!(ContactFilter::new(Some(true), None).matches(&message));
    }

    #[test]
    fn blank_query_is_no_filter() {
        assert_eq!(ContactFilter::new(None, Some("   ")).query, None);
    }
}
