//! Three-step signup wizard.

use serde::{Deserialize, Serialize};

/// Promises listed on the first step.
pub const PRIVACY_PROMISES: [&str; 5] = [
    "We will never sell your data",
    "No tracking cookies or fingerprinting",
    "You can delete your account anytime",
    "All data is encrypted end-to-end",
    "You own your content, always",
];

/// Steps in the signup wizard.
///
/// 1. Promises - read the privacy promises
/// 2. Credentials - email, username, password
/// 3. Terms - accept the terms and submit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignupStep {
    #[default]
    Promises,
    Credentials,
    Terms,
}

impl SignupStep {
    pub fn all() -> &'static [Self] {
        &[Self::Promises, Self::Credentials, Self::Terms]
    }

    /// Get the next step, or None if at the last step.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Promises => Some(Self::Credentials),
            Self::Credentials => Some(Self::Terms),
            Self::Terms => None,
        }
    }

    pub fn is_last(self) -> bool {
        self == Self::Terms
    }

    /// Get step number (1-indexed for display).
    pub fn number(self) -> u8 {
        match self {
            Self::Promises => 1,
            Self::Credentials => 2,
            Self::Terms => 3,
        }
    }

    pub fn total() -> u8 {
        Self::all().len() as u8
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Promises => "Our Privacy Promises",
            Self::Credentials => "Create Your Account",
            Self::Terms => "Final Step",
        }
    }
}

/// What the wizard hands to its parent on the final step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupSubmission {
    pub email: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Advanced(SignupStep),
    Completed(SignupSubmission),
    /// The primary action is disabled for the current input.
    Blocked,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupWizard {
    step: SignupStep,
    pub email: String,
    pub username: String,
    pub password: String,
    pub agreed_to_terms: bool,
    show_password: bool,
}

impl SignupWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignupStep {
        self.step
    }

    pub fn progress_label(&self) -> String {
        format!("Step {} of {}", self.step.number(), SignupStep::total())
    }

    /// Whether step `n` (1-based) is highlighted in the progress bar.
    pub fn is_step_reached(&self, n: u8) -> bool {
        n <= self.step.number()
    }

    pub fn password_visible(&self) -> bool {
        self.show_password
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Whether the primary button on the current step is enabled.
    pub fn can_continue(&self) -> bool {
        match self.step {
            SignupStep::Promises => true,
            SignupStep::Credentials => {
                !self.email.is_empty() && !self.username.is_empty() && !self.password.is_empty()
            }
            SignupStep::Terms => self.agreed_to_terms,
        }
    }

    /// Advance one step, or complete on the last one. Steps never go back.
    pub fn submit(&mut self) -> SignupOutcome {
        if !self.can_continue() {
            return SignupOutcome::Blocked;
        }
        match self.step.next() {
            Some(next) => {
                self.step = next;
                SignupOutcome::Advanced(next)
            }
            None => SignupOutcome::Completed(SignupSubmission {
                email: self.email.clone(),
                username: self.username.clone(),
                password: self.password.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_step_is_always_enabled() {
        let mut w = SignupWizard::new();
        assert_eq!(w.progress_label(), "Step 1 of 3");
        assert!(w.can_continue());
        assert_eq!(w.submit(), SignupOutcome::Advanced(SignupStep::Credentials));
    }

    #[test]
    fn credentials_require_all_three_fields() {
        let mut w = SignupWizard::new();
        w.submit();
        w.email = "a@b.c".into();
        w.username = "ada".into();
        assert!(!w.can_continue());
        assert_eq!(w.submit(), SignupOutcome::Blocked);
        assert_eq!(w.step(), SignupStep::Credentials);

        w.password = "secret".into();
        assert!(w.can_continue());
        assert_eq!(w.submit(), SignupOutcome::Advanced(SignupStep::Terms));
    }

    #[test]
    fn terms_gate_completion() {
        let mut w = SignupWizard::new();
        w.email = "a@b.c".into();
        w.username = "ada".into();
        w.password = "secret".into();
        w.submit();
        w.submit();
        assert_eq!(w.submit(), SignupOutcome::Blocked);

        w.agreed_to_terms = true;
        match w.submit() {
            SignupOutcome::Completed(s) => {
                assert_eq!(s.username, "ada");
                assert_eq!(s.email, "a@b.c");
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(w.step(), SignupStep::Terms);
    }

    #[test]
    fn progress_marks_reached_steps() {
        let mut w = SignupWizard::new();
        w.submit();
        assert!(w.is_step_reached(1));
        assert!(w.is_step_reached(2));
        assert!(!w.is_step_reached(3));
    }

    #[test]
    fn password_visibility_toggles() {
        let mut w = SignupWizard::new();
        assert!(!w.password_visible());
        w.toggle_password_visibility();
        assert!(w.password_visible());
    }
}
