use thiserror::Error;

const KIB: u64 = 1024;
const MIB: u64 = 1024 * KIB;

// Exact limit in the largest unit that divides it.
fn size_label(bytes: &u64) -> String {
    match *bytes {
        b if b > 0 && b % MIB == 0 => format!("{}MB", b / MIB),
        b if b > 0 && b % KIB == 0 => format!("{}KB", b / KIB),
        b => format!("{b} bytes"),
    }
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Image size should be less than {}", size_label(.max))]
    ImageTooLarge { size: u64, max: u64 },

    #[error("Please upload an image file")]
    NotAnImage { mime: String },

    #[error("Skill already added")]
    DuplicateSkill { skill: String },

    #[error("Education year must be a number: '{value}'")]
    InvalidEducationYear { value: String },

    #[error("Profile editor is not open")]
    NotEditing,

    #[error("Profile is not loaded")]
    ProfileMissing,

    #[error("Session store error: {message}")]
    Session { message: String },
}

impl DomainError {
    pub fn image_too_large(size: u64, max: u64) -> Self {
        Self::ImageTooLarge { size, max }
    }

    pub fn not_an_image(mime: impl Into<String>) -> Self {
        Self::NotAnImage { mime: mime.into() }
    }

    pub fn duplicate_skill(skill: impl Into<String>) -> Self {
        Self::DuplicateSkill {
            skill: skill.into(),
        }
    }

    pub fn session(message: impl Into<String>) -> Self {
        Self::Session {
            message: message.into(),
        }
    }
}
