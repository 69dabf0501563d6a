//! Profile page: loads the record once, displays it and runs the editor
//! against the profile API.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::contract::{client::ProfileApi, model::Profile};
use crate::domain::editor::ProfileEditor;
use crate::domain::error::DomainError;
use crate::domain::notice::{Notice, Notices};

pub const LOAD_FAILURE_FALLBACK: &str = "Failed to load profile";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileTab {
    #[default]
    Overview,
    Achievements,
    Activity,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileLoad {
    #[default]
    Loading,
    Loaded(Profile),
    Failed {
        message: String,
    },
}

pub struct ProfilePage {
    api: Arc<dyn ProfileApi>,
    load: ProfileLoad,
    editor: ProfileEditor,
    tab: ProfileTab,
    notices: Notices,
}

impl ProfilePage {
    pub fn new(api: Arc<dyn ProfileApi>, max_image_bytes: u64) -> Self {
        Self {
            api,
            load: ProfileLoad::Loading,
            editor: ProfileEditor::new(max_image_bytes),
            tab: ProfileTab::default(),
            notices: Notices::default(),
        }
    }

    pub fn state(&self) -> &ProfileLoad {
        &self.load
    }

    pub fn profile(&self) -> Option<&Profile> {
        match &self.load {
            ProfileLoad::Loaded(p) => Some(p),
            _ => None,
        }
    }

    pub fn editor(&self) -> &ProfileEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ProfileEditor {
        &mut self.editor
    }

    pub fn tab(&self) -> ProfileTab {
        self.tab
    }

    pub fn select_tab(&mut self, tab: ProfileTab) {
        self.tab = tab;
    }

    /// Page notices followed by the editor's.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        let mut all = self.notices.drain();
        all.extend(self.editor.take_notices());
        all
    }

    #[instrument(name = "ethica.profile_page.load", skip(self))]
    pub async fn load(&mut self) {
        self.load = ProfileLoad::Loading;
        let result = self.api.get_profile().await;
        self.load = match result.map(|payload| payload.into_first()) {
            Ok(Some(mut profile)) => {
                profile.normalize_birth_date();
                debug!(profile_id = %profile.id, "profile loaded");
                ProfileLoad::Loaded(profile)
            }
            Ok(None) => {
                warn!("profile payload was empty");
                self.notices.push(Notice::error(LOAD_FAILURE_FALLBACK));
                ProfileLoad::Failed {
                    message: LOAD_FAILURE_FALLBACK.to_string(),
                }
            }
            Err(e) => {
                warn!(error = %e, "profile load failed");
                self.notices.push(Notice::error(LOAD_FAILURE_FALLBACK));
                ProfileLoad::Failed {
                    message: e.to_string(),
                }
            }
        };
    }

    pub async fn retry(&mut self) {
        self.load().await;
    }

    pub fn open_editor(&mut self) -> Result<(), DomainError> {
        let ProfileLoad::Loaded(profile) = &self.load else {
            return Err(DomainError::ProfileMissing);
        };
        self.editor.open(profile);
        Ok(())
    }

    /// Send the draft. Returns whether the displayed profile was replaced.
    #[instrument(name = "ethica.profile_page.save", skip(self))]
    pub async fn save(&mut self) -> Result<bool, DomainError> {
        let id = match &self.load {
            ProfileLoad::Loaded(p) => p.id.clone(),
            _ => return Err(DomainError::ProfileMissing),
        };
        let Some(update) = self.editor.begin_save() else {
            debug!("save ignored: editor closed or already saving");
            return Ok(false);
        };

        let result = self.api.update_profile(&id, &update).await;
        match self.editor.finish_save(result) {
            Some(updated) => {
                info!(profile_id = %id, "profile updated");
                self.load = ProfileLoad::Loaded(updated);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
