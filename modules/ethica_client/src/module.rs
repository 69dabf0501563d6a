use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use tracing::{debug, info};
use url::Url;

use crate::config::EthicaClientConfig;
use crate::contract::client::{AuthApi, ProfileApi};
use crate::domain::pages::ContentSources;
use crate::domain::ports::SessionStore;
use crate::domain::profile_page::ProfilePage;
use crate::domain::service::{AppController, ControllerConfig};
use crate::gateways::local::seeded_sources;
use crate::infra::http::{HttpAuthClient, HttpProfileClient};
use crate::infra::session::FileSessionStore;
use modkit::{ConfigProvider, TracedClient};

/// The wired client: configuration, session store, HTTP adapters and content
/// sources, ready to hand out controllers and pages.
#[derive(Clone)]
pub struct EthicaClient {
    config: EthicaClientConfig,
    session: Arc<dyn SessionStore>,
    auth: Arc<dyn AuthApi>,
    profile: Arc<dyn ProfileApi>,
    content: ContentSources,
}

impl EthicaClient {
    pub const NAME: &'static str = "ethica_client";

    /// Build from the `ethica_client` config section, keeping the session
    /// file under `home_dir`.
    pub fn init(provider: &dyn ConfigProvider, home_dir: &Path) -> anyhow::Result<Self> {
        info!("Initializing ethica_client module");

        let cfg: EthicaClientConfig = modkit::module_config_required(provider, Self::NAME)?;
        debug!(
            "Loaded ethica_client config: api_base_url={}, auth_mode={:?}, default_page_size={}",
            cfg.api_base_url, cfg.auth_mode, cfg.default_page_size
        );

        let session_path = resolve_session_path(home_dir, &cfg.session_file);
        debug!(path = %session_path.display(), "using file session store");
        let session: Arc<dyn SessionStore> = Arc::new(FileSessionStore::new(session_path));

        Self::with_session(cfg, session)
    }

    /// Build with an explicit session store.
    pub fn with_session(
        config: EthicaClientConfig,
        session: Arc<dyn SessionStore>,
    ) -> anyhow::Result<Self> {
        let base = Url::parse(&config.api_base_url)
            .with_context(|| format!("invalid api_base_url '{}'", config.api_base_url))?;
        anyhow::ensure!(
            !base.cannot_be_a_base(),
            "api_base_url '{}' cannot carry a path",
            config.api_base_url
        );
        anyhow::ensure!(config.max_page_size > 0, "max_page_size must be at least 1");

        let client = TracedClient::default();
        let auth: Arc<dyn AuthApi> = Arc::new(HttpAuthClient::new(
            client.clone(),
            base.clone(),
            session.clone(),
        ));
        let profile: Arc<dyn ProfileApi> =
            Arc::new(HttpProfileClient::new(client, base, session.clone()));
        let content = seeded_sources(config.default_page_size, config.max_page_size);

        Ok(Self {
            config,
            session,
            auth,
            profile,
            content,
        })
    }

    pub fn config(&self) -> &EthicaClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    pub fn auth(&self) -> &Arc<dyn AuthApi> {
        &self.auth
    }

    pub fn profile(&self) -> &Arc<dyn ProfileApi> {
        &self.profile
    }

    pub fn content(&self) -> &ContentSources {
        &self.content
    }

    /// A controller starting on the landing view. A stored session is not
    /// restored.
    pub fn controller(&self) -> AppController {
        AppController::new(
            self.auth.clone(),
            self.profile.clone(),
            self.content.clone(),
            ControllerConfig {
                auth_mode: self.config.auth_mode,
                max_image_bytes: self.config.max_image_bytes,
            },
        )
    }

    /// A profile page bound to the stored session, outside any controller.
    pub fn profile_page(&self) -> ProfilePage {
        ProfilePage::new(self.profile.clone(), self.config.max_image_bytes)
    }
}

fn resolve_session_path(home_dir: &Path, session_file: &str) -> PathBuf {
    let p = PathBuf::from(session_file);
    if p.is_absolute() {
        p
    } else {
        home_dir.join(p)
    }
}
