//! HTTP utilities for outgoing client calls.

pub mod client;
pub mod trace_context;
