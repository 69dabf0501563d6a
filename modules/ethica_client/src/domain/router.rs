//! Top-level view routing.
//!
//! The whole routing state is an [`AppState`] value and every transition goes
//! through [`reduce`]. The authenticated view is only reachable right after a
//! completed signup or login.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Landing,
    Signup,
    Login,
    App,
}

impl View {
    pub fn all() -> &'static [Self] {
        &[Self::Landing, Self::Signup, Self::Login, Self::App]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landing => "landing",
            Self::Signup => "signup",
            Self::Login => "login",
            Self::App => "app",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown view '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Navigate(View),
    SignupCompleted,
    LoginCompleted,
    Logout,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppState {
    view: View,
    authenticated: bool,
}

impl AppState {
    /// `App` without authentication is normalized to `Landing`.
    pub fn new(view: View, authenticated: bool) -> Self {
        let view = if view == View::App && !authenticated {
            View::Landing
        } else {
            view
        };
        Self {
            view,
            authenticated,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// What a renderer should show.
    pub fn visible_view(&self) -> View {
        match self.view {
            View::App if !self.authenticated => View::Landing,
            v => v,
        }
    }
}

pub fn reduce(state: AppState, action: Action) -> AppState {
    use Action::*;
    use View::*;

    match (state.view, action) {
        (App, Navigate(App)) if state.authenticated => state,
        (_, Navigate(App)) => AppState::new(Landing, false),
        // Leaving the shell only happens through logout.
        (App, Navigate(_)) => state,
        (_, Navigate(target)) => AppState::new(target, false),
        (Signup, SignupCompleted) | (Login, LoginCompleted) => AppState::new(App, true),
        (App, Logout) => AppState::new(Landing, false),
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(actions: &[Action]) -> AppState {
        actions
            .iter()
            .fold(AppState::default(), |s, a| reduce(s, *a))
    }

    #[test]
    fn starts_on_landing_unauthenticated() {
        let s = AppState::default();
        assert_eq!(s.view(), View::Landing);
        assert!(!s.is_authenticated());
    }

    #[test]
    fn signup_flow_reaches_app() {
        let s = run(&[Action::Navigate(View::Signup), Action::SignupCompleted]);
        assert_eq!(s.view(), View::App);
        assert!(s.is_authenticated());
    }

    #[test]
    fn login_flow_reaches_app_and_logout_returns_to_landing() {
        let s = run(&[Action::Navigate(View::Login), Action::LoginCompleted]);
        assert_eq!(s.visible_view(), View::App);

        let s = reduce(s, Action::Logout);
        assert_eq!(s.view(), View::Landing);
        assert!(!s.is_authenticated());
    }

    #[test]
    fn app_is_unreachable_without_completion() {
        for start in View::all() {
            let s = reduce(AppState::new(*start, false), Action::Navigate(View::App));
            assert_eq!(s.view(), View::Landing);
            assert!(!s.is_authenticated());
        }
    }

    #[test]
    fn completion_only_counts_from_its_own_view() {
        let s = reduce(AppState::default(), Action::LoginCompleted);
        assert_eq!(s, AppState::default());

        let s = run(&[Action::Navigate(View::Login), Action::SignupCompleted]);
        assert_eq!(s.view(), View::Login);
        assert!(!s.is_authenticated());
    }

    #[test]
    fn navigation_inside_app_is_ignored() {
        let s = run(&[Action::Navigate(View::Login), Action::LoginCompleted]);
        assert_eq!(reduce(s, Action::Navigate(View::Signup)), s);
        assert_eq!(reduce(s, Action::Navigate(View::App)), s);
    }

    #[test]
    fn pre_auth_views_link_to_each_other() {
        let s = run(&[
            Action::Navigate(View::Signup),
            Action::Navigate(View::Login),
            Action::Navigate(View::Landing),
        ]);
        assert_eq!(s.view(), View::Landing);
    }

    #[test]
    fn logout_outside_app_is_a_no_op() {
        let s = reduce(AppState::new(View::Signup, false), Action::Logout);
        assert_eq!(s.view(), View::Signup);
    }

    #[test]
    fn unauthenticated_app_state_is_normalized() {
        let s = AppState::new(View::App, false);
        assert_eq!(s.view(), View::Landing);
        assert_eq!(s.visible_view(), View::Landing);
    }

    #[test]
    fn view_parses_case_insensitively() {
        assert_eq!("Login".parse::<View>().unwrap(), View::Login);
        assert!("nowhere".parse::<View>().is_err());
    }

    #[test]
    fn every_short_action_sequence_keeps_app_gated() {
        let mut actions: Vec<Action> = View::all().iter().map(|v| Action::Navigate(*v)).collect();
        actions.extend([Action::SignupCompleted, Action::LoginCompleted, Action::Logout]);

        let mut frontier = vec![AppState::default()];
        for _ in 0..4 {
            let mut next_frontier = Vec::with_capacity(frontier.len() * actions.len());
            for state in &frontier {
                for action in &actions {
                    let next = reduce(*state, *action);

                    assert!(View::all().contains(&next.view()));
                    assert_eq!(next.visible_view(), next.view());
                    assert_eq!(next.view() == View::App, next.is_authenticated());
                    if next.view() == View::App && state.view() != View::App {
                        assert!(
                            matches!(
                                (state.view(), action),
                                (View::Signup, Action::SignupCompleted)
                                    | (View::Login, Action::LoginCompleted)
                            ),
                            "entered app from {:?} via {:?}",
                            state.view(),
                            action
                        );
                    }
                    next_frontier.push(next);
                }
            }
            frontier = next_frontier;
        }
        assert_eq!(frontier.len(), actions.len().pow(4));
    }
}
