//! Optional mTLS material for reaching a guarded upstream RPC endpoint.
//!
//! A plain options struct threaded through the client factory — never a
//! process-wide singleton (§9 "Global SSL config" is explicitly rejected
//! by the design).

use std::path::PathBuf;

/// Paths to client certificate, key, and CA bundle, read from
/// `SSL_CERT_PATH` / `SSL_KEY_PATH` / `SSL_CA_PATH` by the binary and
/// passed down here unopened.
#[derive(Debug, Clone, Default)]
pub struct TlsOptions {
    pub cert_path: Option<PathBuf>,
    pub key_path: Option<PathBuf>,
    pub ca_path: Option<PathBuf>,
}

impl TlsOptions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_configured(&self) -> bool {
        self.cert_path.is_some() || self.key_path.is_some() || self.ca_path.is_some()
    }
}
