use super::*;

#[test]
fn validate_login_input_trims_email_keeps_password() {
    assert_eq!(
        validate_login_input("  awa@billettigue.fr ", " secret "),
        Ok(("awa@billettigue.fr".to_owned(), " secret ".to_owned()))
    );
}

#[test]
fn validate_login_input_requires_both_fields() {
    assert_eq!(validate_login_input("   ", "pw"), Err(MISSING_FIELDS));
    assert_eq!(validate_login_input("a@b.fr", ""), Err(MISSING_FIELDS));
}

#[test]
fn validate_login_input_rejects_malformed_email() {
    assert_eq!(validate_login_input("awa", "pw"), Err(INVALID_EMAIL));
    assert_eq!(validate_login_input("@b.fr", "pw"), Err(INVALID_EMAIL));
    assert_eq!(validate_login_input("a@localhost", "pw"), Err(INVALID_EMAIL));
    assert_eq!(validate_login_input("a@b.", "pw"), Err(INVALID_EMAIL));
}

#[test]
fn role_titles_are_distinct() {
    let titles: Vec<&str> = Role::ALL.into_iter().map(role_title).collect();
    assert_eq!(titles, vec!["Espace voyageur", "Espace transporteur", "Administration"]);
}
