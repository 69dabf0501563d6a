/// Credentials captured by the login form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    show_password: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// `None` while the submit button is disabled.
    pub fn submit(&self) -> Option<LoginCredentials> {
        self.can_submit().then(|| LoginCredentials {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submit_requires_both_fields() {
        let mut f = LoginForm::new();
        assert!(f.submit().is_none());
        f.email = "a@b.c".into();
        assert!(!f.can_submit());
        f.password = "pw".into();
        let creds = f.submit().unwrap();
        assert_eq!(creds.email, "a@b.c");
        assert_eq!(creds.password, "pw");
    }
}
