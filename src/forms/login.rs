use super::{check_username, FieldErrors};
use crate::models::Credentials;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();
        check_username(&mut errors, &self.username);
        if self.password.trim().is_empty() {
            errors.add("password", "Password is required");
        } else if self.password.chars().count() < 6 {
            errors.add("password", "Password must be at least 6 characters");
        }
        errors
    }

    /// Validated credentials, username trimmed. The password is sent as typed.
    pub fn submit(&self) -> Result<Credentials, FieldErrors> {
        self.validate()
            .into_result(Credentials::new(self.username.trim(), self.password.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_form_trims_username() {
        let credentials = LoginForm::new("  alice ", "secret1").submit().unwrap();
        assert_eq!(credentials.username, "alice");
        assert_eq!(credentials.password, "secret1");
    }

    #[test]
    fn empty_fields_are_required() {
        let errors = LoginForm::default().validate();
        assert_eq!(errors.get("username"), Some("Username is required"));
        assert_eq!(errors.get("password"), Some("Password is required"));
    }

    #[test]
    fn short_values_are_rejected() {
        let errors = LoginForm::new("al", "12345").validate();
        assert_eq!(
            errors.get("username"),
            Some("Username must be at least 3 characters")
        );
        assert_eq!(
            errors.get("password"),
            Some("Password must be at least 6 characters")
        );
    }
}
