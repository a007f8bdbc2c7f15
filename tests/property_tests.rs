/// Property-based tests using proptest
/// Tests invariants that should hold for all inputs
use lead_capture_api::email::html_body;
use lead_capture_api::render::chart_key;
use lead_capture_api::validation::is_valid_email;
use proptest::prelude::*;

// Property: Email validation should never panic
proptest! {
    #[test]
    fn email_validation_never_panics(email in "\\PC*") {
        let _ = is_valid_email(&email);
    }

    #[test]
    fn well_formed_emails_are_accepted(
        local in "[a-z][a-z0-9]{0,9}",
        domain in "[a-z][a-z0-9]{0,9}",
        tld in "[a-z]{2,4}"
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        // Short addresses can fall under the minimum-length guard
        if email.len() >= 5 {
            prop_assert!(is_valid_email(&email));
        }
    }
}

// Property: the rendered email body never leaks raw newlines or placeholder
// artifacts, whatever the generated text looks like
proptest! {
    #[test]
    fn html_body_never_panics(name in "\\PC*", text in "\\PC*") {
        let _ = html_body(&name, &text);
    }

    #[test]
    fn html_body_contains_no_raw_newlines(text in "[a-zA-Z0-9 .,!\n]{0,200}") {
        let body = html_body("Jane", &text);
        prop_assert!(!body.contains('\n'));
    }

    #[test]
    fn html_body_has_one_br_per_newline(text in "[a-zA-Z0-9 .,!\n]{0,200}") {
        let body = html_body("Jane", &text);
        let newlines = text.matches('\n').count();
        prop_assert_eq!(body.matches("<br>").count(), newlines);
    }

    #[test]
    fn html_body_never_contains_undefined(text in "[a-zA-Z0-9 \n]{0,100}") {
        prop_assume!(!text.contains("undefined"));
        let body = html_body("Jane", &text);
        prop_assert!(!body.contains("undefined"));
    }
}

// Property: chart keys are always safe, non-empty DOM ids
proptest! {
    #[test]
    fn chart_key_never_panics(id in "\\PC*") {
        let _ = chart_key("industry", Some(&id));
    }

    #[test]
    fn chart_key_is_never_empty(id in "\\PC*") {
        let key = chart_key("industry", Some(&id));
        prop_assert!(key.starts_with("industry-"));
        prop_assert!(key.len() > "industry-".len());
    }

    #[test]
    fn chart_key_is_dom_safe(id in "\\PC*") {
        let key = chart_key("industry", Some(&id));
        prop_assert!(key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-'));
    }
}
