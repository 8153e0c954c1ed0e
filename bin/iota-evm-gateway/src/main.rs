//! iota-evm-gateway binary: the only crate allowed to read env vars, parse
//! CLI args, construct the two transport servers, and register the closed
//! tool/resource surface against them (§6.6).

mod cli;
mod config;
mod transport;

use std::sync::Arc;

use clap::Parser;
use gateway_rpc::{RegistryRpcResolver, RpcClientCache, RpcResolver};
use gateway_tools::{register_all, Dispatcher, GatewayContext};
use tokio_util::sync::CancellationToken;

use cli::Cli;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli).map_err(|e| eyre::eyre!("configuration error: {e}"))?;

    init_tracing(&config.log_level)?;

    if cli.config_check {
        tracing::info!(host = %config.host, port = config.port, "configuration check");
        tracing::info!(default_network = ?config.default_network, "default network override");
        for (chain_id, _) in &config.node_url_overrides {
            tracing::info!(chain_id, "node URL override configured");
        }
        for (chain_id, _) in &config.auth_overrides {
            tracing::info!(chain_id, "bearer auth configured");
        }
        tracing::info!(tls_configured = config.tls.is_configured(), "mTLS material");
        for network in Config::configured_mnemonics() {
            tracing::warn!(%network, "mnemonic configured but signing is not implemented in this core");
        }
        tracing::info!("configuration OK");
        return Ok(());
    }

    tracing::info!("====================================");
    tracing::info!("  iota-evm-gateway starting");
    tracing::info!("====================================");

    let cache = RpcClientCache::new(config.tls.clone());
    for (chain_id, url) in &config.node_url_overrides {
        cache.set_url_override(*chain_id, url.clone());
    }
    for (chain_id, token) in &config.auth_overrides {
        cache.set_auth_override(*chain_id, token.clone());
    }

    let registry = gateway_registry::ChainRegistry::new();
    let resolver: Arc<dyn RpcResolver> = Arc::new(RegistryRpcResolver::new(registry, cache));
    let mut ctx = GatewayContext::new(resolver);
    if let Some(network) = config.default_network.clone() {
        ctx = ctx.with_default_network(network);
    }
    let ctx = Arc::new(ctx);

    for network in Config::configured_mnemonics() {
        tracing::warn!(%network, "mnemonic configured but no signer is wired into this build; writes remain unsupported");
    }

    let mut dispatcher = Dispatcher::new();
    register_all(&mut dispatcher, Arc::clone(&ctx));
    let dispatcher = Arc::new(dispatcher);

    tracing::info!(tools = dispatcher.tool_names().len(), "tool/resource surface registered");

    let cancel = CancellationToken::new();

    let stdio_handle = if cli.no_stdio {
        None
    } else {
        let dispatcher = Arc::clone(&dispatcher);
        let cancel = cancel.clone();
        Some(tokio::spawn(async move {
            if let Err(e) = transport::stdio::run(dispatcher, cancel).await {
                tracing::error!(error = %e, "stdio transport exited with an error");
            }
        }))
    };

    let app = transport::http::GatewayApi::new(Arc::clone(&dispatcher)).routes();
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "HTTP transport listening");

    let http_cancel = cancel.clone();
    let server_task = tokio::spawn(async move {
        axum::serve(listener, app).with_graceful_shutdown(async move { http_cancel.cancelled().await }).await
    });

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    cancel.cancel();

    server_task.await??;
    if let Some(handle) = stdio_handle {
        handle.abort();
    }

    tracing::info!("iota-evm-gateway stopped");
    Ok(())
}

fn init_tracing(level: &str) -> eyre::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .map_err(|e| eyre::eyre!("failed to initialize tracing: {e}"))?;

    Ok(())
}
