use crate::errors::AppError;
use crate::models::ConfirmationRequest;
use regex::Regex;

/// Validate email address shape.
pub fn is_valid_email(email: &str) -> bool {
    // Basic checks
    if email.len() < 5 || !email.contains('@') || !email.contains('.') {
        return false;
    }

    // RFC 5322 simplified email regex
    // Matches: local@domain.tld
    let email_regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();

    if !email_regex.is_match(email) {
        tracing::warn!("Invalid email format: {}", email);
        return false;
    }

    true
}

/// Validate a confirmation request before any pipeline stage runs.
///
/// Requires a non-empty name, a syntactically valid email and a non-empty
/// industry. Violations block the submission entirely.
pub fn validate_request(req: &ConfirmationRequest) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if !is_valid_email(req.email.trim()) {
        return Err(AppError::Validation(
            "A valid email address is required".to_string(),
        ));
    }
    if req.industry.trim().is_empty() {
        return Err(AppError::Validation("Industry is required".to_string()));
    }
    Ok(())
}

/// Normalized deduplication key for a submission.
///
/// Two rapid submissions with the same email must not run the pipeline twice.
pub fn submission_key(req: &ConfirmationRequest) -> String {
    req.email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, industry: &str) -> ConfirmationRequest {
        ConfirmationRequest {
            name: name.to_string(),
            email: email.to_string(),
            industry: industry.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_emails() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("test.user+tag@subdomain.example.co.uk"));
        assert!(is_valid_email("valid_email-2023@company.org"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!is_valid_email("not_an_email"));
        assert!(!is_valid_email("missing@domain"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn valid_request_passes() {
        let req = request("Jane", "jane@x.com", "finance");
        assert!(validate_request(&req).is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let req = request("   ", "jane@x.com", "finance");
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn bad_email_is_rejected() {
        let req = request("Jane", "jane-at-x", "finance");
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn blank_industry_is_rejected() {
        let req = request("Jane", "jane@x.com", "");
        assert!(matches!(
            validate_request(&req),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn submission_key_is_case_insensitive() {
        let a = request("Jane", "Jane@X.com ", "finance");
        let b = request("Janet", "jane@x.com", "retail");
        assert_eq!(submission_key(&a), submission_key(&b));
    }
}
