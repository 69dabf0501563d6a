//! Profile editor: a draft copy of the displayed profile, staged edits and
//! the save lifecycle.
//!
//! Validation problems (oversized image, duplicate skill) are reported as
//! notices and never leave the editor. The only `Err` is calling an edit
//! operation while the editor is closed.

use std::str::FromStr;

use crate::contract::{error::ClientError, model::Profile, model::ProfileUpdate};
use crate::domain::error::DomainError;
use crate::domain::image::{to_data_url, validate_image, ImageUpload};
use crate::domain::notice::{Notice, Notices};

pub const SAVE_SUCCESS_MESSAGE: &str = "Profile updated successfully!";
pub const SAVE_FAILURE_FALLBACK: &str = "Failed to update profile";

/// Free-text profile fields the editor can set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProfileField {
    FullName,
    Post,
    Location,
    WebsiteUrl,
    AboutMe,
    DateOfBirth,
    University,
    Degree,
    EducationYear,
    Company,
    Position,
    Email,
}

impl ProfileField {
    pub const ALL: [Self; 12] = [
        Self::FullName,
        Self::Post,
        Self::Location,
        Self::WebsiteUrl,
        Self::AboutMe,
        Self::DateOfBirth,
        Self::University,
        Self::Degree,
        Self::EducationYear,
        Self::Company,
        Self::Position,
        Self::Email,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Post => "post",
            Self::Location => "location",
            Self::WebsiteUrl => "websiteUrl",
            Self::AboutMe => "aboutMe",
            Self::DateOfBirth => "dateOfBirth",
            Self::University => "university",
            Self::Degree => "degree",
            Self::EducationYear => "educationYear",
            Self::Company => "company",
            Self::Position => "position",
            Self::Email => "email",
        }
    }

    /// Write `value` into the matching field of `profile`.
    pub fn apply(self, profile: &mut Profile, value: &str) -> Result<(), DomainError> {
        let slot = match self {
            Self::EducationYear => {
                let trimmed = value.trim();
                profile.education_year = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse::<i32>().map_err(|_| {
                        DomainError::InvalidEducationYear {
                            value: value.to_string(),
                        }
                    })?)
                };
                return Ok(());
            }
            Self::FullName => &mut profile.full_name,
            Self::Post => &mut profile.post,
            Self::Location => &mut profile.location,
            Self::WebsiteUrl => &mut profile.website_url,
            Self::AboutMe => &mut profile.about_me,
            Self::DateOfBirth => &mut profile.date_of_birth,
            Self::University => &mut profile.university,
            Self::Degree => &mut profile.degree,
            Self::Company => &mut profile.company,
            Self::Position => &mut profile.position,
            Self::Email => &mut profile.email,
        };
        *slot = value.to_string();
        Ok(())
    }
}

impl FromStr for ProfileField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().replace(['-', '_'], "");
        Self::ALL
            .iter()
            .copied()
            .find(|f| f.key().eq_ignore_ascii_case(&wanted))
            .ok_or_else(|| format!("unknown profile field '{s}'"))
    }
}

/// How the edit dialog was closed without saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissReason {
    Cancel,
    Backdrop,
    Escape,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub draft: Profile,
    pub new_skill: String,
    saving: bool,
    error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditorState {
    #[default]
    Viewing,
    Editing(EditSession),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEditor {
    state: EditorState,
    max_image_bytes: u64,
    notices: Notices,
}

impl ProfileEditor {
    pub fn new(max_image_bytes: u64) -> Self {
        Self {
            state: EditorState::Viewing,
            max_image_bytes,
            notices: Notices::default(),
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, EditorState::Editing(_))
    }

    pub fn is_saving(&self) -> bool {
        matches!(&self.state, EditorState::Editing(s) if s.saving)
    }

    pub fn draft(&self) -> Option<&Profile> {
        match &self.state {
            EditorState::Editing(s) => Some(&s.draft),
            EditorState::Viewing => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing(s) => s.error.as_deref(),
            EditorState::Viewing => None,
        }
    }

    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain()
    }

    /// Start editing a copy of `displayed`.
    pub fn open(&mut self, displayed: &Profile) {
        self.state = EditorState::Editing(EditSession {
            draft: displayed.clone(),
            new_skill: String::new(),
            saving: false,
            error: None,
        });
    }

    /// Close without saving; the draft is discarded.
    pub fn dismiss(&mut self, reason: DismissReason) {
        if self.is_open() {
            tracing::debug!(?reason, "profile editor dismissed");
        }
        self.state = EditorState::Viewing;
    }

    fn session_mut(&mut self) -> Result<&mut EditSession, DomainError> {
        match &mut self.state {
            EditorState::Editing(s) => Ok(s),
            EditorState::Viewing => Err(DomainError::NotEditing),
        }
    }

    pub fn set_field(&mut self, field: ProfileField, value: &str) -> Result<(), DomainError> {
        let session = self.session_mut()?;
        field.apply(&mut session.draft, value)
    }

    /// Returns whether the draft now carries the picture.
    pub fn select_image(&mut self, upload: &ImageUpload) -> Result<bool, DomainError> {
        let max = self.max_image_bytes;
        let session = self.session_mut()?;
        match validate_image(upload, max) {
            Ok(()) => {
                session.draft.profile_image = Some(to_data_url(upload));
                Ok(true)
            }
            Err(rejected) => {
                self.notices.push(Notice::error(rejected.to_string()));
                Ok(false)
            }
        }
    }

    pub fn remove_image(&mut self) -> Result<(), DomainError> {
        self.session_mut()?.draft.profile_image = None;
        Ok(())
    }

    pub fn set_new_skill(&mut self, value: &str) -> Result<(), DomainError> {
        self.session_mut()?.new_skill = value.to_string();
        Ok(())
    }

    /// Append the pending skill input. Returns whether a skill was added.
    pub fn add_skill(&mut self) -> Result<bool, DomainError> {
        let session = self.session_mut()?;
        let trimmed = session.new_skill.trim().to_string();
        if trimmed.is_empty() {
            return Ok(false);
        }
        session.new_skill.clear();
        if session.draft.skills.contains(&trimmed) {
            let rejected = DomainError::duplicate_skill(trimmed);
            self.notices.push(Notice::error(rejected.to_string()));
            return Ok(false);
        }
        session.draft.skills.push(trimmed);
        Ok(true)
    }

    pub fn remove_skill(&mut self, skill: &str) -> Result<(), DomainError> {
        self.session_mut()?.draft.skills.retain(|s| s != skill);
        Ok(())
    }

    /// Mark the session as saving and hand out the payload to send.
    /// `None` when closed or already saving.
    pub fn begin_save(&mut self) -> Option<ProfileUpdate> {
        match &mut self.state {
            EditorState::Editing(s) if !s.saving => {
                s.saving = true;
                s.error = None;
                Some(ProfileUpdate::from(&s.draft))
            }
            _ => None,
        }
    }

    /// Settle an in-flight save. On success the editor closes and the
    /// normalized record to display is returned; on failure the draft stays
    /// open with the error.
    pub fn finish_save(&mut self, result: Result<Profile, ClientError>) -> Option<Profile> {
        let EditorState::Editing(session) = &mut self.state else {
            return None;
        };
        session.saving = false;
        match result {
            Ok(mut updated) => {
                updated.normalize_birth_date();
                self.state = EditorState::Viewing;
                self.notices.push(Notice::success(SAVE_SUCCESS_MESSAGE));
                Some(updated)
            }
            Err(e) => {
                let message = match e.to_string() {
                    m if m.trim().is_empty() => SAVE_FAILURE_FALLBACK.to_string(),
                    m => m,
                };
                session.error = Some(message.clone());
                self.notices.push(Notice::error(message));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notice::NoticeLevel;

    const MAX: u64 = 5 * 1024 * 1024;

    fn displayed() -> Profile {
        Profile {
            id: "u1".into(),
            full_name: "Ada Lovelace".into(),
            skills: vec!["Math".into()],
            ..Default::default()
        }
    }

    fn open_editor() -> ProfileEditor {
        let mut e = ProfileEditor::new(MAX);
        e.open(&displayed());
        e
    }

    #[test]
    fn opening_copies_the_profile() {
        let e = open_editor();
        assert!(e.is_open());
        assert_eq!(e.draft(), Some(&displayed()));
        assert!(!e.is_saving());
    }

    #[test]
    fn edits_require_an_open_editor() {
        let mut e = ProfileEditor::new(MAX);
        assert_eq!(
            e.set_field(ProfileField::Post, "x"),
            Err(DomainError::NotEditing)
        );
        assert_eq!(e.add_skill(), Err(DomainError::NotEditing));
    }

    #[test]
    fn skill_input_is_trimmed_and_deduplicated() {
        let mut e = open_editor();
        e.set_new_skill("  React  ").unwrap();
        assert_eq!(e.add_skill(), Ok(true));
        assert_eq!(e.draft().unwrap().skills, vec!["Math", "React"]);

        e.set_new_skill("React").unwrap();
        assert_eq!(e.add_skill(), Ok(false));
        assert_eq!(e.draft().unwrap().skills, vec!["Math", "React"]);
        assert_eq!(
            e.take_notices(),
            vec![Notice::error("Skill already added")]
        );
        match e.state() {
            EditorState::Editing(s) => assert!(s.new_skill.is_empty()),
            EditorState::Viewing => panic!("editor closed"),
        }
    }

    #[test]
    fn duplicate_check_is_case_sensitive() {
        let mut e = open_editor();
        e.set_new_skill("math").unwrap();
        assert_eq!(e.add_skill(), Ok(true));
    }

    #[test]
    fn blank_skill_is_ignored_silently() {
        let mut e = open_editor();
        e.set_new_skill("   ").unwrap();
        assert_eq!(e.add_skill(), Ok(false));
        assert!(e.notices().pending().is_empty());
    }

    #[test]
    fn remove_skill_filters_exact_matches() {
        let mut e = open_editor();
        e.remove_skill("math").unwrap();
        assert_eq!(e.draft().unwrap().skills, vec!["Math"]);
        e.remove_skill("Math").unwrap();
        assert!(e.draft().unwrap().skills.is_empty());
    }

    #[test]
    fn image_rejections_become_notices() {
        let mut e = open_editor();
        let big = ImageUpload::new("image/png", vec![0; 6 * 1024 * 1024]);
        assert_eq!(e.select_image(&big), Ok(false));
        let doc = ImageUpload::new("application/pdf", vec![1]);
        assert_eq!(e.select_image(&doc), Ok(false));
        let messages: Vec<String> = e.take_notices().into_iter().map(|n| n.message).collect();
        assert_eq!(
            messages,
            vec!["Image size should be less than 5MB", "Please upload an image file"]
        );
        assert!(e.draft().unwrap().profile_image.is_none());

        let ok = ImageUpload::new("image/png", b"abc".to_vec());
        assert_eq!(e.select_image(&ok), Ok(true));
        assert_eq!(
            e.draft().unwrap().profile_image.as_deref(),
            Some("data:image/png;base64,YWJj")
        );
        e.remove_image().unwrap();
        assert!(e.draft().unwrap().profile_image.is_none());
    }

    #[test]
    fn education_year_accepts_numbers_or_blank() {
        let mut e = open_editor();
        e.set_field(ProfileField::EducationYear, "2015").unwrap();
        assert_eq!(e.draft().unwrap().education_year, Some(2015));
        e.set_field(ProfileField::EducationYear, "").unwrap();
        assert_eq!(e.draft().unwrap().education_year, None);
        assert!(matches!(
            e.set_field(ProfileField::EducationYear, "soon"),
            Err(DomainError::InvalidEducationYear { .. })
        ));
    }

    #[test]
    fn dismissal_discards_the_draft() {
        for reason in [DismissReason::Cancel, DismissReason::Backdrop, DismissReason::Escape] {
            let mut e = open_editor();
            e.set_field(ProfileField::FullName, "Someone Else").unwrap();
            e.dismiss(reason);
            assert!(!e.is_open());
            e.open(&displayed());
            assert_eq!(e.draft().unwrap().full_name, "Ada Lovelace");
        }
    }

    #[test]
    fn save_lifecycle_success() {
        let mut e = open_editor();
        let payload = e.begin_save().unwrap();
        assert!(e.is_saving());
        assert!(e.begin_save().is_none());
        assert_eq!(payload.full_name, "Ada Lovelace");

        let mut server = displayed();
        server.date_of_birth = "1815-12-10T00:00:00.000Z".into();
        let shown = e.finish_save(Ok(server)).unwrap();
        assert_eq!(shown.date_of_birth, "1815-12-10");
        assert!(!e.is_open());
        let notices = e.take_notices();
        assert_eq!(notices[0].level, NoticeLevel::Success);
        assert_eq!(notices[0].message, SAVE_SUCCESS_MESSAGE);
    }

    #[test]
    fn save_failure_keeps_the_draft() {
        let mut e = open_editor();
        e.set_field(ProfileField::Company, "Analytical Engines").unwrap();
        e.begin_save().unwrap();
        let shown = e.finish_save(Err(ClientError::rejected(500, "Database unavailable")));
        assert!(shown.is_none());
        assert!(e.is_open());
        assert!(!e.is_saving());
        assert_eq!(e.error(), Some("Database unavailable"));
        assert_eq!(e.draft().unwrap().company, "Analytical Engines");
        assert_eq!(e.take_notices(), vec![Notice::error("Database unavailable")]);
    }

    #[test]
    fn fields_parse_from_keys() {
        assert_eq!(
            "website-url".parse::<ProfileField>().unwrap(),
            ProfileField::WebsiteUrl
        );
        assert_eq!(
            "fullName".parse::<ProfileField>().unwrap(),
            ProfileField::FullName
        );
    }
}
