pub mod client;
pub mod content;
pub mod error;
pub mod model;

pub use client::{AuthApi, CollectionSource, ProfileApi};
pub use error::ClientError;
pub use model::{
    AuthSession, LoginRequest, Profile, ProfilePayload, ProfileUpdate, SignupRequest, UserSnapshot,
};
