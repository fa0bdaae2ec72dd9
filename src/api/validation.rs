use validator::{Validate, ValidationError, ValidationErrors};

use crate::api::users::CreateUser;
use crate::error::{AppError, AppResult};
use crate::model::user::NewUser;

// order in which violations are reported
const FIELD_ORDER: [&str; 3] = ["name", "department", "password"];

const MIN_PASSWORD_LENGTH: usize = 6;

/// Checks a creation payload, reporting every violation at once.
pub fn validate_create_user(payload: CreateUser) -> AppResult<NewUser> {
    let mut errors = payload.validate().err().unwrap_or_default();
    check_password(payload.password.as_deref(), &mut errors);

    if !errors.is_empty() {
        return Err(AppError::Validation(violations(&errors)));
    }

    // every field was checked for presence above
    let (Some(name), Some(department), Some(password)) =
        (payload.name, payload.department, payload.password)
    else {
        return Err(AppError::BadRequest("Incomplete user payload".to_string()));
    };

    Ok(NewUser {
        name,
        department,
        password,
    })
}

// An empty or absent password breaks both rules and reports both.
fn check_password(password: Option<&str>, errors: &mut ValidationErrors) {
    let password = password.unwrap_or_default();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add(
            "password",
            ValidationError::new("length")
                .with_message("password must be longer than or equal to 6 characters".into()),
        );
    }
    if password.is_empty() {
        errors.add(
            "password",
            ValidationError::new("required").with_message("password should not be empty".into()),
        );
    }
}

fn violations(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let field = field.to_string();
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid"),
                })
                .collect();
            (field, messages)
        })
        .collect();

    fields.sort_by_key(|(field, _)| {
        FIELD_ORDER
            .iter()
            .position(|f| *f == field.as_str())
            .unwrap_or(FIELD_ORDER.len())
    });

    fields.into_iter().flat_map(|(_, messages)| messages).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: Option<&str>, department: Option<&str>, password: Option<&str>) -> CreateUser {
        CreateUser {
            name: name.map(str::to_string),
            department: department.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    fn violations_of(payload: CreateUser) -> Vec<String> {
        match validate_create_user(payload) {
            Err(AppError::Validation(messages)) => messages,
            other => panic!("expected a validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_complete_payload() {
        let user = validate_create_user(payload(Some("Alice"), Some("Eng"), Some("secret1"))).unwrap();

        assert_eq!(
            user,
            NewUser {
                name: "Alice".to_string(),
                department: "Eng".to_string(),
                password: "secret1".to_string(),
            }
        );
    }

    #[test]
    fn six_characters_is_long_enough() {
        assert!(validate_create_user(payload(Some("A"), Some("B"), Some("123456"))).is_ok());
    }

    #[test]
    fn rejects_empty_name() {
        assert_eq!(
            violations_of(payload(Some(""), Some("Eng"), Some("secret1"))),
            vec!["name should not be empty"]
        );
    }

    #[test]
    fn rejects_absent_department() {
        assert_eq!(
            violations_of(payload(Some("Alice"), None, Some("secret1"))),
            vec!["department should not be empty"]
        );
    }

    #[test]
    fn rejects_short_password() {
        assert_eq!(
            violations_of(payload(Some("Alice"), Some("Eng"), Some("12345"))),
            vec!["password must be longer than or equal to 6 characters"]
        );
    }

    #[test]
    fn empty_password_breaks_both_rules() {
        assert_eq!(
            violations_of(payload(Some("Alice"), Some("Eng"), Some(""))),
            vec![
                "password must be longer than or equal to 6 characters",
                "password should not be empty",
            ]
        );
    }

    #[test]
    fn collects_every_violation_in_field_order() {
        assert_eq!(
            violations_of(payload(None, Some(""), None)),
            vec![
                "name should not be empty",
                "department should not be empty",
                "password must be longer than or equal to 6 characters",
                "password should not be empty",
            ]
        );
    }
}
