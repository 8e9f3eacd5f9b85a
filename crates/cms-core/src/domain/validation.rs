//! Field validation helpers shared by the entity payloads.

use crate::error::DomainError;

/// Collects every rule a payload violates instead of stopping at the first.
#[derive(Debug, Default)]
pub struct Violations(Vec<String>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` when `value` is empty after trimming.
    pub fn require(&mut self, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.0.push(message.to_string());
        }
    }

    /// Record `message` unless `holds` is true.
    pub fn check(&mut self, holds: bool, message: impl Into<String>) {
        if !holds {
            self.0.push(message.into());
        }
    }

    /// Record a violation when `value` is longer than `max` characters.
    pub fn max_chars(&mut self, value: &str, max: usize, field: &str) {
        if value.chars().count() > max {
            self.0.push(format!("{field} must be at most {max} characters"));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

/// Syntactic email check: `local@domain.tld`, no whitespace, sane labels.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || domain.len() > 253 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    const LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";
    if !local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || LOCAL_SPECIALS.contains(c))
    {
        return false;
    }

    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    let tld_ok = labels
        .last()
        .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()));

    labels_ok && tld_ok
}

/// Slugs are lowercase ASCII letters, digits and single inner hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && !slug.contains("--")
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid_email("jane@example.com"));
        assert!(is_valid_email("jane.doe+news@mail.example.co.uk"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "plainaddress",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@@example.com",
            "jane doe@example.com",
            "jane@exa_mple.com",
            ".jane@example.com",
            "jane@example.c",
            "jane@-example.com",
        ] {
            assert!(!is_valid_email(email), "{email} should be rejected");
        }
    }

    #[test]
    fn slug_rules() {
        assert!(is_valid_slug("seo-services"));
        assert!(is_valid_slug("web2"));
        assert!(!is_valid_slug("SEO"));
        assert!(!is_valid_slug("-seo"));
        assert!(!is_valid_slug("seo--audit"));
        assert!(!is_valid_slug("seo audit"));
    }

    #[test]
    fn violations_accumulate() {
        let mut violations = Violations::new();
        violations.require("  ", "Title is required");
        violations.check(false, "Second rule");
        violations.max_chars("abcdef", 3, "Phone");

        match violations.into_result() {
            Err(DomainError::Validation(errors)) => assert_eq!(
                errors,
                vec![
                    "Title is required",
                    "Second rule",
                    "Phone must be at most 3 characters"
                ]
            ),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
