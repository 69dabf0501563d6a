// === PUBLIC CONTRACT ===
// Models, client traits and errors other crates consume
pub mod contract;

pub use contract::{client, error, model};

// === MODULE WIRING ===
pub mod config;
pub mod module;
pub use module::EthicaClient;

// === INTERNAL MODULES ===
// Exposed for the host binary and integration tests; prefer `contract` and
// `EthicaClient` for stable use.
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod gateways;
#[doc(hidden)]
pub mod infra;
