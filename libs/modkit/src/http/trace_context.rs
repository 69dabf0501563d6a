//! Minimal W3C Trace Context propagation for outgoing requests.
//!
//! Every outgoing request gets a fresh `traceparent`; ids are random and the
//! sampled flag is always set.

use http::{HeaderMap, HeaderName, HeaderValue};

/// W3C Trace Context header name
pub const TRACEPARENT: &str = "traceparent";

/// Parsed `traceparent` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceParent {
    pub trace_id: String,
    pub span_id: String,
    pub flags: String,
}

impl TraceParent {
    pub fn random() -> Self {
        Self {
            trace_id: format!("{:032x}", rand::random::<u128>()),
            span_id: format!("{:016x}", rand::random::<u64>()),
            flags: "01".to_string(),
        }
    }

    pub fn header_value(&self) -> String {
        format!("00-{}-{}-{}", self.trace_id, self.span_id, self.flags)
    }

    /// Accepts version `00` only.
    pub fn parse(raw: &str) -> Option<Self> {
        let parts: Vec<&str> = raw.trim().split('-').collect();
        match parts.as_slice() {
            ["00", trace_id, span_id, flags]
                if trace_id.len() == 32 && span_id.len() == 16 && flags.len() == 2 =>
            {
                Some(Self {
                    trace_id: trace_id.to_string(),
                    span_id: span_id.to_string(),
                    flags: flags.to_string(),
                })
            }
            _ => None,
        }
    }
}

/// Insert a fresh `traceparent` unless the request already carries one.
/// Returns the trace id in effect.
pub fn inject_trace_context(headers: &mut HeaderMap) -> Option<String> {
    if let Some(existing) = headers
        .get(TRACEPARENT)
        .and_then(|v| v.to_str().ok())
        .and_then(TraceParent::parse)
    {
        return Some(existing.trace_id);
    }

    let parent = TraceParent::random();
    let value = HeaderValue::from_str(&parent.header_value()).ok()?;
    headers.insert(HeaderName::from_static(TRACEPARENT), value);
    Some(parent.trace_id)
}
