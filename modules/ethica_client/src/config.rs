use serde::{Deserialize, Serialize};

/// How signup/login completion is decided.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// Forms complete locally; no network activity.
    #[default]
    Mock,
    /// Forms complete only after the auth API accepts them.
    Remote,
}

/// Configuration for the ethica_client module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EthicaClientConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default)]
    pub auth_mode: AuthMode,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Relative paths resolve against the client home directory.
    #[serde(default = "default_session_file")]
    pub session_file: String,
}

impl Default for EthicaClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            auth_mode: AuthMode::default(),
            max_image_bytes: default_max_image_bytes(),
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            session_file: default_session_file(),
        }
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}

fn default_page_size() -> u64 {
    20
}

fn default_max_page_size() -> u64 {
    100
}

fn default_session_file() -> String {
    "session.json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_section_uses_defaults() {
        let cfg: EthicaClientConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(cfg.api_base_url, "http://127.0.0.1:8080");
        assert_eq!(cfg.auth_mode, AuthMode::Mock);
        assert_eq!(cfg.max_image_bytes, 5 * 1024 * 1024);
        assert_eq!(cfg.session_file, "session.json");
    }

    #[test]
    fn auth_mode_is_lowercase_on_the_wire() {
        let cfg: EthicaClientConfig =
            serde_json::from_value(serde_json::json!({ "auth_mode": "remote" })).unwrap();
        assert_eq!(cfg.auth_mode, AuthMode::Remote);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let res = serde_json::from_value::<EthicaClientConfig>(serde_json::json!({ "bogus": 1 }));
        assert!(res.is_err());
    }
}
