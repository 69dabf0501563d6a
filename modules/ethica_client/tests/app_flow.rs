//! End-to-end controller flows: landing, signup, login, app shell, logout

use std::sync::Arc;

use ethica_client::config::{AuthMode, EthicaClientConfig};
use ethica_client::domain::ports::SessionStore;
use ethica_client::domain::router::View;
use ethica_client::domain::service::AppController;
use ethica_client::domain::shell::Section;
use ethica_client::domain::signup::{SignupOutcome, SignupStep};
use ethica_client::infra::session::MemorySessionStore;
use ethica_client::EthicaClient;
use httpmock::prelude::*;
use serde_json::json;

fn client(base_url: &str, auth_mode: AuthMode) -> (EthicaClient, Arc<MemorySessionStore>) {
    let store = Arc::new(MemorySessionStore::new());
    let cfg = EthicaClientConfig {
        api_base_url: base_url.to_string(),
        auth_mode,
        ..Default::default()
    };
    let client = EthicaClient::with_session(cfg, store.clone()).unwrap();
    (client, store)
}

fn fill_signup(app: &mut AppController) {
    let wizard = app.signup_wizard().unwrap();
    wizard.email = "ada@example.com".into();
    wizard.username = "ada".into();
    wizard.password = "pw".into();
}

async fn walk_signup(app: &mut AppController) -> Result<SignupOutcome, ethica_client::error::ClientError> {
    app.navigate(View::Signup);
    assert_eq!(
        app.submit_signup().await?,
        SignupOutcome::Advanced(SignupStep::Credentials)
    );
    assert_eq!(app.submit_signup().await?, SignupOutcome::Blocked);
    fill_signup(app);
    assert_eq!(
        app.submit_signup().await?,
        SignupOutcome::Advanced(SignupStep::Terms)
    );
    assert_eq!(app.submit_signup().await?, SignupOutcome::Blocked);
    app.signup_wizard().unwrap().agreed_to_terms = true;
    app.submit_signup().await
}

#[tokio::test]
async fn mock_signup_enters_the_app_and_logout_returns_to_landing() {
    let (client, store) = client("http://127.0.0.1:9", AuthMode::Mock);
    let mut app = client.controller();
    assert_eq!(app.view(), View::Landing);
    assert!(app.profile_page().is_none());

    let outcome = walk_signup(&mut app).await.unwrap();
    assert!(matches!(outcome, SignupOutcome::Completed(_)));
    assert_eq!(app.view(), View::App);
    assert!(app.state().is_authenticated());
    assert!(app.signup_wizard().is_none());
    assert_eq!(app.shell().unwrap().active(), Section::Feed);
    // Mock mode never talks to the backend.
    assert_eq!(store.token().unwrap(), None);
    assert!(app.profile_page().is_some());

    app.shell().unwrap().navigate(Section::Privacy);
    assert_eq!(app.shell().unwrap().active(), Section::Privacy);

    // Navigation cannot leave the shell; only logout does.
    app.navigate(View::Login);
    assert_eq!(app.view(), View::App);

    app.logout();
    assert_eq!(app.view(), View::Landing);
    assert!(!app.state().is_authenticated());
    assert!(app.shell().is_none());
}

#[tokio::test]
async fn mock_login_requires_both_fields() {
    let (client, _) = client("http://127.0.0.1:9", AuthMode::Mock);
    let mut app = client.controller();
    app.navigate(View::Login);

    assert_eq!(app.submit_login().await, Ok(false));
    assert_eq!(app.view(), View::Login);

    let form = app.login_form().unwrap();
    form.email = "ada@example.com".into();
    form.password = "pw".into();
    assert_eq!(app.submit_login().await, Ok(true));
    assert_eq!(app.view(), View::App);
}

#[tokio::test]
async fn navigating_to_app_without_auth_lands_on_landing() {
    let (client, _) = client("http://127.0.0.1:9", AuthMode::Mock);
    let mut app = client.controller();
    app.navigate(View::Login);
    app.navigate(View::App);
    assert_eq!(app.view(), View::Landing);
    assert!(app.login_form().is_none());
}

#[tokio::test]
async fn reentering_signup_starts_a_fresh_wizard() {
    let (client, _) = client("http://127.0.0.1:9", AuthMode::Mock);
    let mut app = client.controller();
    app.navigate(View::Signup);
    app.submit_signup().await.unwrap();
    assert_eq!(app.signup_wizard().unwrap().step(), SignupStep::Credentials);

    app.navigate(View::Landing);
    app.navigate(View::Signup);
    assert_eq!(app.signup_wizard().unwrap().step(), SignupStep::Promises);
}

#[tokio::test]
async fn remote_signup_registers_then_logs_in() {
    let server = MockServer::start();
    let signup = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/signup")
            .json_body(json!({ "name": "ada", "email": "ada@example.com", "password": "pw" }));
        then.status(201).json_body(json!({ "message": "ok" }));
    });
    let login = server.mock(|when, then| {
        when.method(POST)
            .path("/api/auth/login")
            .json_body(json!({ "email": "ada@example.com", "password": "pw" }));
        then.status(200)
            .json_body(json!({ "token": "jwt-1", "user": { "_id": "u1", "name": "ada" } }));
    });

    let (client, store) = client(&server.base_url(), AuthMode::Remote);
    let mut app = client.controller();
    let outcome = walk_signup(&mut app).await.unwrap();

    signup.assert();
    login.assert();
    assert!(matches!(outcome, SignupOutcome::Completed(_)));
    assert_eq!(app.view(), View::App);
    assert_eq!(store.token().unwrap().as_deref(), Some("jwt-1"));
}

#[tokio::test]
async fn remote_signup_failure_keeps_the_wizard() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/signup");
        then.status(409).json_body(json!({ "message": "Email already registered" }));
    });

    let (client, store) = client(&server.base_url(), AuthMode::Remote);
    let mut app = client.controller();
    let err = walk_signup(&mut app).await.unwrap_err();

    assert_eq!(err.to_string(), "Email already registered");
    assert_eq!(app.view(), View::Signup);
    assert_eq!(app.signup_wizard().unwrap().step(), SignupStep::Terms);
    assert_eq!(store.token().unwrap(), None);
}

#[tokio::test]
async fn remote_login_failure_stays_on_login() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(401).json_body(json!({ "message": "Invalid credentials" }));
    });

    let (client, _) = client(&server.base_url(), AuthMode::Remote);
    let mut app = client.controller();
    app.navigate(View::Login);
    let form = app.login_form().unwrap();
    form.email = "ada@example.com".into();
    form.password = "nope".into();

    let err = app.submit_login().await.unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
    assert_eq!(app.view(), View::Login);
    assert_eq!(app.login_form().unwrap().email, "ada@example.com");
}

#[tokio::test]
async fn remote_login_then_profile_page_uses_the_stored_token() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/auth/login");
        then.status(200).json_body(json!({ "token": "jwt-9", "user": {} }));
    });
    let profile = server.mock(|when, then| {
        when.method(GET)
            .path("/user/getUserProfile")
            .header("authorization", "Bearer jwt-9");
        then.status(200)
            .json_body(json!([{ "_id": "u9", "fullName": "Grace Hopper" }]));
    });

    let (client, _) = client(&server.base_url(), AuthMode::Remote);
    let mut app = client.controller();
    app.navigate(View::Login);
    let form = app.login_form().unwrap();
    form.email = "grace@example.com".into();
    form.password = "cobol".into();
    assert_eq!(app.submit_login().await, Ok(true));

    let mut page = app.profile_page().unwrap();
    page.load().await;
    profile.assert();
    assert_eq!(page.profile().unwrap().full_name, "Grace Hopper");
}

#[tokio::test]
async fn content_pages_load_from_the_seeded_sources() {
    use ethica_client::domain::pages::{FeedPage, MessagesPage};

    let (client, _) = client("http://127.0.0.1:9", AuthMode::Mock);
    let mut feed = FeedPage::new(client.content());
    feed.load().await.unwrap();
    assert_eq!(feed.posts.items().len(), 3);
    assert!(!feed.posts.has_more());

    let mut messages = MessagesPage::new(client.content());
    messages.load().await.unwrap();
    assert_eq!(messages.conversations.items().len(), 4);
    assert_eq!(messages.messages.items().len(), 5);
}
