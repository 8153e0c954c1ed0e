//! The closed error taxonomy shared by every component.

use thiserror::Error;

/// A typed gateway error. Every tool handler returns this (wrapped in the
/// dispatcher envelope) instead of panicking or leaking a raw exception.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Schema violation, unknown network, non-sibling network passed to a
    /// sibling-only tool, malformed address, etc.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unknown transaction hash, no contract at address, no pool for a
    /// (symbol, network) pair.
    #[error("not found: {0}")]
    NotFound(String),

    /// RPC transport / timeout / 5xx / decoding failure.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Arithmetic precondition violated (divide-by-zero guard tripped,
    /// empty sample set). Analytics gathers degrade to zeros instead of
    /// propagating this — see `gateway-analytics`.
    #[error("logic error: {0}")]
    Logic(String),

    /// Operation is specified but intentionally unimplemented in this core
    /// (USD pricing, full-history indexing, signer delegation).
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl GatewayError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(redact(&msg.into()))
    }

    pub fn logic(msg: impl Into<String>) -> Self {
        Self::Logic(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Message shown verbatim to the AI client. `ValidationError` and
    /// `NotFoundError` pass through unchanged; `UpstreamError` is already
    /// redacted at construction time so credentials and bearer tokens never
    /// reach the envelope.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

/// Strips anything that looks like a URL's authority section (and any
/// `token=`/`bearer `/mnemonic-shaped payload) out of an upstream error
/// message before it is allowed into a typed [`GatewayError::Upstream`].
fn redact(msg: &str) -> String {
    let mut out = String::with_capacity(msg.len());
    let mut rest = msg;
    while let Some(scheme_at) = rest.find("://") {
        out.push_str(&rest[..scheme_at + 3]);
        let after_scheme = &rest[scheme_at + 3..];
        let host_end = after_scheme
            .find(|c: char| c == '/' || c.is_whitespace())
            .unwrap_or(after_scheme.len());
        out.push_str("<redacted-host>");
        rest = &after_scheme[host_end..];
    }
    out.push_str(rest);

    for needle in ["Bearer ", "bearer ", "token=", "mnemonic="] {
        if let Some(pos) = out.find(needle) {
            let tail_start = pos + needle.len();
            let tail_end = out[tail_start..]
                .find(|c: char| c.is_whitespace() || c == '&')
                .map(|i| tail_start + i)
                .unwrap_or(out.len());
            out.replace_range(tail_start..tail_end, "<redacted>");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_urls_and_tokens() {
        let e = GatewayError::upstream(
            "request to https://user:pw@rpc.example.com/v1?token=SECRET failed: Bearer abc123",
        );
        let msg = e.user_message();
        assert!(!msg.contains("SECRET"));
        assert!(!msg.contains("abc123"));
        assert!(!msg.contains("rpc.example.com"));
    }

    #[test]
    fn validation_and_not_found_pass_through() {
        let v = GatewayError::validation("unknown network 'xyz'");
        assert_eq!(v.user_message(), "validation error: unknown network 'xyz'");
        let n = GatewayError::not_found("no pool for (USDC, s2)");
        assert_eq!(n.user_message(), "not found: no pool for (USDC, s2)");
    }
}
