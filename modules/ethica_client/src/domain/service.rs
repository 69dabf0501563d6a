use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::AuthMode;
use crate::contract::{
    client::{AuthApi, ProfileApi},
    error::ClientError,
    model::{LoginRequest, SignupRequest},
};
use crate::domain::login::LoginForm;
use crate::domain::pages::ContentSources;
use crate::domain::profile_page::ProfilePage;
use crate::domain::router::{reduce, Action, AppState, View};
use crate::domain::shell::Shell;
use crate::domain::signup::{SignupOutcome, SignupSubmission, SignupWizard};

/// Configuration for the application controller
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub auth_mode: AuthMode,
    pub max_image_bytes: u64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::Mock,
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

/// Drives the whole client: routing state plus the component that belongs to
/// the current view.
///
/// Each view owns its component. Entering signup or login starts a fresh
/// form, entering the app starts a fresh shell, and leaving a view drops it.
pub struct AppController {
    state: AppState,
    auth: Arc<dyn AuthApi>,
    profile_api: Arc<dyn ProfileApi>,
    content: ContentSources,
    config: ControllerConfig,
    signup: Option<SignupWizard>,
    login: Option<LoginForm>,
    shell: Option<Shell>,
}

impl AppController {
    pub fn new(
        auth: Arc<dyn AuthApi>,
        profile_api: Arc<dyn ProfileApi>,
        content: ContentSources,
        config: ControllerConfig,
    ) -> Self {
        Self {
            state: AppState::default(),
            auth,
            profile_api,
            content,
            config,
            signup: None,
            login: None,
            shell: None,
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn view(&self) -> View {
        self.state.visible_view()
    }

    pub fn signup_wizard(&mut self) -> Option<&mut SignupWizard> {
        self.signup.as_mut()
    }

    pub fn login_form(&mut self) -> Option<&mut LoginForm> {
        self.login.as_mut()
    }

    pub fn shell(&mut self) -> Option<&mut Shell> {
        self.shell.as_mut()
    }

    pub fn content(&self) -> &ContentSources {
        &self.content
    }

    /// A fresh profile page; `None` outside the app.
    pub fn profile_page(&self) -> Option<ProfilePage> {
        self.state
            .is_authenticated()
            .then(|| ProfilePage::new(self.profile_api.clone(), self.config.max_image_bytes))
    }

    pub fn navigate(&mut self, view: View) {
        self.dispatch(Action::Navigate(view));
    }

    pub fn logout(&mut self) {
        self.dispatch(Action::Logout);
    }

    fn dispatch(&mut self, action: Action) {
        let before = self.state.view();
        self.state = reduce(self.state, action);
        let after = self.state.view();
        if before == after {
            return;
        }
        debug!(from = %before, to = %after, ?action, "view changed");
        self.signup = (after == View::Signup).then(SignupWizard::new);
        self.login = (after == View::Login).then(LoginForm::new);
        self.shell = (after == View::App).then(Shell::new);
    }

    /// Press the wizard's primary button. On the last step this completes
    /// signup and, in remote mode, registers and logs in first; a failed call
    /// leaves the wizard in place.
    #[instrument(name = "ethica.controller.submit_signup", skip(self))]
    pub async fn submit_signup(&mut self) -> Result<SignupOutcome, ClientError> {
        let wizard = self
            .signup
            .as_mut()
            .ok_or_else(|| ClientError::validation("Signup is not open"))?;
        let outcome = wizard.submit();
        if let SignupOutcome::Completed(submission) = &outcome {
            if self.config.auth_mode == AuthMode::Remote {
                self.register(submission).await?;
            }
            info!("signup completed");
            self.dispatch(Action::SignupCompleted);
        }
        Ok(outcome)
    }

    async fn register(&self, submission: &SignupSubmission) -> Result<(), ClientError> {
        self.auth
            .signup(SignupRequest {
                name: submission.username.clone(),
                email: submission.email.clone(),
                password: submission.password.clone(),
            })
            .await?;
        self.auth
            .login(LoginRequest {
                email: submission.email.clone(),
                password: submission.password.clone(),
            })
            .await?;
        Ok(())
    }

    /// Submit the login form. Returns whether the app was entered.
    #[instrument(name = "ethica.controller.submit_login", skip(self))]
    pub async fn submit_login(&mut self) -> Result<bool, ClientError> {
        let form = self
            .login
            .as_ref()
            .ok_or_else(|| ClientError::validation("Login is not open"))?;
        let Some(credentials) = form.submit() else {
            return Ok(false);
        };
        if self.config.auth_mode == AuthMode::Remote {
            self.auth
                .login(LoginRequest {
                    email: credentials.email,
                    password: credentials.password,
                })
                .await?;
        }
        info!("login completed");
        self.dispatch(Action::LoginCompleted);
        Ok(true)
    }
}
