//! Environment-only configuration (§6.5), layered under the CLI's process
//! ergonomics: an env var wins whenever both it and the matching CLI flag
//! are given a value.

use std::collections::HashMap;

use gateway_registry::{ChainRegistry, SIBLING_SHORT_NAMES};
use gateway_rpc::TlsOptions;

use crate::cli::Cli;

/// Fully resolved process configuration: CLI defaults overridden by the
/// closed set of environment variables in §6.5.
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub default_network: Option<String>,
    pub node_url_overrides: HashMap<u64, String>,
    pub auth_overrides: HashMap<u64, String>,
    pub tls: TlsOptions,
}

fn sibling_env_prefix(short_name: &str) -> String {
    short_name.to_ascii_uppercase().replace('-', "_")
}

impl Config {
    /// Build the effective configuration from `cli` and the process
    /// environment. Resolution errors (an unknown `DEFAULT_CHAIN_ID`, a
    /// malformed bearer token) are reported as plain strings since this
    /// runs before tracing is initialized.
    pub fn load(cli: &Cli) -> Result<Self, String> {
        let host = std::env::var("HOST").unwrap_or_else(|_| cli.host.clone());
        let port = match std::env::var("PORT") {
            Ok(v) => v.parse::<u16>().map_err(|e| format!("PORT: {e}"))?,
            Err(_) => cli.port,
        };

        let registry = ChainRegistry::new();
        let default_network = match std::env::var("DEFAULT_CHAIN_ID") {
            Ok(v) => {
                let id = v.trim().parse::<u64>().map_err(|e| format!("DEFAULT_CHAIN_ID: {e}"))?;
                let descriptor = registry.resolve_chain_id(id).map_err(|e| format!("DEFAULT_CHAIN_ID: {e}"))?;
                Some(descriptor.short_name.clone())
            }
            Err(_) => None,
        };

        let mut node_url_overrides = HashMap::new();
        let mut auth_overrides = HashMap::new();
        for short_name in SIBLING_SHORT_NAMES {
            let descriptor = registry.resolve(short_name).expect("sibling short names are always registered");
            let prefix = sibling_env_prefix(short_name);
            if let Ok(url) = std::env::var(format!("{prefix}_NODE_URL")) {
                node_url_overrides.insert(descriptor.chain_id, url);
            }
            if let Ok(token) = std::env::var(format!("{prefix}_JWT_TOKEN")) {
                auth_overrides.insert(descriptor.chain_id, token);
            }
            // `<SIBLING>_MNEMONIC` is read by the signer wrapper the
            // binary wires in, not by this core; see main's signer setup.
        }

        let tls = TlsOptions {
            cert_path: std::env::var_os("SSL_CERT_PATH").map(Into::into),
            key_path: std::env::var_os("SSL_KEY_PATH").map(Into::into),
            ca_path: std::env::var_os("SSL_CA_PATH").map(Into::into),
        };

        Ok(Self {
            host,
            port,
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| cli.log_level.clone()),
            default_network,
            node_url_overrides,
            auth_overrides,
            tls,
        })
    }

    /// Mnemonics configured per sibling (`<SIBLING>_MNEMONIC`, §6.5). The
    /// signer these seed is out of scope for this core (§1); callers only
    /// use this to decide whether to warn that writes remain unsupported.
    pub fn configured_mnemonics() -> Vec<String> {
        SIBLING_SHORT_NAMES
            .iter()
            .filter(|short_name| std::env::var(format!("{}_MNEMONIC", sibling_env_prefix(short_name))).is_ok())
            .map(|s| s.to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_env_prefix_replaces_dashes() {
        assert_eq!(sibling_env_prefix("iota-testnet"), "IOTA_TESTNET");
        assert_eq!(sibling_env_prefix("iota"), "IOTA");
    }
}
