use super::*;

#[test]
fn validate_credentials_input_trims_email() {
    assert_eq!(
        validate_credentials_input(FormMode::Login, "  a@b.com  ", "pw"),
        Ok(("a@b.com".to_owned(), "pw".to_owned()))
    );
}

#[test]
fn validate_credentials_input_requires_both_fields() {
    assert_eq!(
        validate_credentials_input(FormMode::Login, "   ", "longenough1"),
        Err("Enter both email and password.")
    );
    assert_eq!(
        validate_credentials_input(FormMode::Register, "a@b.com", ""),
        Err("Enter both email and password.")
    );
}

#[test]
fn validate_credentials_input_keeps_password_whitespace() {
    assert_eq!(
        validate_credentials_input(FormMode::Login, "a@b.com", " secret "),
        Ok(("a@b.com".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn register_enforces_minimum_password_length() {
    assert_eq!(
        validate_credentials_input(FormMode::Register, "a@b.com", "short"),
        Err("Password must be at least 8 characters")
    );
    assert!(validate_credentials_input(FormMode::Register, "a@b.com", "12345678").is_ok());
}

#[test]
fn login_does_not_check_password_length() {
    assert!(validate_credentials_input(FormMode::Login, "a@b.com", "short").is_ok());
}
