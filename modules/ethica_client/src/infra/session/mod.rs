pub mod file_store;
pub mod memory_store;

pub use file_store::FileSessionStore;
pub use memory_store::MemorySessionStore;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Storage key of the serialized user object.
pub const USER_KEY: &str = "user";
