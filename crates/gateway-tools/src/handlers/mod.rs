//! The closed tool and resource surface (§4.8, §6.3, §6.4) built on top of
//! [`crate::dispatcher::Dispatcher`]. `register_all` is the single entry
//! point the binary calls once per transport (§6.6).

pub mod args;
pub mod arbitrage;
pub mod contracts;
pub mod context;
pub mod gas;
pub mod network;
pub mod resource_reads;
pub mod writes;

use std::sync::Arc;

pub use context::GatewayContext;

use crate::schema::{Field, FieldKind, ToolSchema};
use crate::server::{ResourceServer, ToolServer};

const SPEED_VARIANTS: &[&str] = &["slow", "standard", "fast", "instant"];

fn network_info_schema() -> ToolSchema {
    ToolSchema::new(&[Field::optional("network", FieldKind::Str)])
}

fn balance_schema() -> ToolSchema {
    ToolSchema::new(&[Field::required("address", FieldKind::Str), Field::optional("network", FieldKind::Str)])
}

fn transfer_schema() -> ToolSchema {
    ToolSchema::new(&[
        Field::required("to", FieldKind::Str),
        Field::required("amount", FieldKind::Str),
        Field::optional("network", FieldKind::Str),
    ])
}

fn staking_info_schema() -> ToolSchema {
    ToolSchema::new(&[Field::optional("network", FieldKind::Str)])
}

fn gas_prices_schema() -> ToolSchema {
    ToolSchema::new(&[Field::optional("network", FieldKind::Str)])
}

fn estimate_cost_schema() -> ToolSchema {
    ToolSchema::new(&[
        Field::required("gasLimit", FieldKind::Str),
        Field::optional("gasPrice", FieldKind::Str),
        Field::optional("speed", FieldKind::Enum(SPEED_VARIANTS)),
        Field::optional("network", FieldKind::Str),
    ])
}

fn deploy_schema() -> ToolSchema {
    ToolSchema::new(&[
        Field::required("bytecode", FieldKind::Str),
        Field::optional("constructorArgs", FieldKind::Str),
        Field::optional("network", FieldKind::Str),
    ])
}

fn analyze_contract_schema() -> ToolSchema {
    ToolSchema::new(&[
        Field::required("contractAddress", FieldKind::Str),
        Field::required("abi", FieldKind::JsonArray),
        Field::optional("network", FieldKind::Str),
    ])
}

fn cross_chain_price_schema() -> ToolSchema {
    ToolSchema::new(&[Field::required("token", FieldKind::Str), Field::required("network", FieldKind::Str)])
}

fn find_opportunities_schema() -> ToolSchema {
    ToolSchema::new(&[
        Field::required("token", FieldKind::Str),
        Field::optional("networks", FieldKind::StrArray),
        Field::optional("minProfitPercent", FieldKind::Num),
    ])
}

fn list_tokens_schema() -> ToolSchema {
    ToolSchema::new(&[])
}

/// Register every tool in the closed set (§4.8) and every resource
/// template (§6.4) against `server`, driven by the same `ctx` and the same
/// handler closures. The binary calls this once per transport server so
/// stdio and HTTP clients see an identical surface (§6.6).
pub fn register_all<S: ToolServer + ResourceServer + ?Sized>(server: &mut S, ctx: Arc<GatewayContext>) {
    macro_rules! tool {
        ($name:literal, $description:literal, $schema:expr, $handler:path) => {{
            let ctx = Arc::clone(&ctx);
            server.register_tool(
                $name,
                $description,
                $schema,
                Arc::new(move |args| {
                    let ctx = Arc::clone(&ctx);
                    Box::pin(async move { $handler(ctx, args).await })
                }),
            );
        }};
    }

    tool!("get_iota_network_info", "Registry entry, latest block number, and native token snapshot for a network.", network_info_schema(), network::network_info);
    tool!("get_iota_balance", "Native-token balance of an address, raw and formatted.", balance_schema(), network::balance);
    tool!("transfer_iota", "Submit a native-token transfer (requires a configured signer).", transfer_schema(), writes::transfer);
    tool!("get_iota_staking_info", "Staking inventory for a network (requires a configured DeFi data provider).", staking_info_schema(), writes::staking_info);
    tool!("verify_iota_network_status", "Health, latest block, and finality classification for a network.", network_info_schema(), network::verify_network_status);
    tool!("get_iota_gas_prices", "Tiered gas price quote plus a textual recommendation.", gas_prices_schema(), gas::gas_prices);
    tool!("estimate_iota_transaction_cost", "Total cost of a transaction at a given gas limit and price/speed.", estimate_cost_schema(), gas::estimate_transaction_cost);
    tool!("deploy_iota_smart_contract", "Deploy a contract (requires a configured signer).", deploy_schema(), writes::deploy_smart_contract);
    tool!("analyze_iota_smart_contract", "Interface detection and bytecode security heuristics for a contract.", analyze_contract_schema(), contracts::analyze_smart_contract);
    tool!("get_cross_chain_token_price", "Pool-reserve-derived price quote for a token on one network.", cross_chain_price_schema(), arbitrage::cross_chain_token_price);
    tool!("find_arbitrage_opportunities", "Directed, profitable cross-chain arbitrage opportunities for a token.", find_opportunities_schema(), arbitrage::find_opportunities);
    tool!("list_arbitrage_tokens", "Pool-registry summary: which tokens are quotable on which networks.", list_tokens_schema(), arbitrage::list_tokens);

    macro_rules! resource {
        ($name:literal, $template:literal, $handler:path) => {{
            let ctx = Arc::clone(&ctx);
            server.register_resource(
                $name,
                $template,
                Arc::new(move |bindings| {
                    let ctx = Arc::clone(&ctx);
                    Box::pin(async move { $handler(ctx, bindings).await })
                }),
            );
        }};
    }

    resource!("network-info", "iota://{network}/info", resource_reads::info);
    resource!("network-info-default", "iota://info", resource_reads::info);
    resource!("block-latest", "iota://{network}/block/latest", resource_reads::block_latest);
    resource!("block-latest-default", "iota://block/latest", resource_reads::block_latest);
    resource!("address-balance", "iota://{network}/address/{address}/balance", resource_reads::address_balance);
    resource!("address-balance-default", "iota://address/{address}/balance", resource_reads::address_balance);
    resource!("address-metrics", "iota://{network}/address/{address}/metrics", resource_reads::address_metrics);
    resource!("address-metrics-default", "iota://address/{address}/metrics", resource_reads::address_metrics);
    resource!("tx-lookup", "iota://{network}/tx/{txHash}", resource_reads::tx_lookup);
    resource!("tx-lookup-default", "iota://tx/{txHash}", resource_reads::tx_lookup);
    resource!("network-status", "iota://{network}/status", resource_reads::status);
    resource!("network-status-default", "iota://status", resource_reads::status);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Dispatcher;
    use gateway_primitives::BlockSample;
    use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
    use serde_json::json;

    fn test_ctx() -> Arc<GatewayContext> {
        let rpc = Arc::new(
            MockEvmRpc::new().with_block(BlockSample {
                number: 10,
                timestamp: 1_700_000_000,
                gas_used: 1_000_000,
                gas_limit: 30_000_000,
                base_fee_per_gas: Some(1_000_000_000),
                tx_count: 1,
                txs: None,
            }),
        );
        let resolver = StaticRpcResolver::new().with_client("iota", rpc);
        Arc::new(GatewayContext::new(Arc::new(resolver)))
    }

    #[tokio::test]
    async fn every_closed_tool_is_registered_and_schema_checked() {
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, test_ctx());
        assert_eq!(dispatcher.tool_names().len(), 12);

        let result = dispatcher.invoke_tool("get_iota_network_info", json!({})).await;
        assert!(!result.is_error);

        let result = dispatcher.invoke_tool("get_iota_balance", json!({})).await;
        assert!(result.is_error);
    }

    #[tokio::test]
    async fn unparameterized_resource_alias_defaults_to_the_primary_sibling() {
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, test_ctx());
        let result = dispatcher.read_resource("iota://info").await;
        assert_eq!(result.contents.len(), 1);
        assert!(result.contents[0].text.contains("\"iota\""));
    }

    #[tokio::test]
    async fn templated_resource_binds_the_requested_network() {
        let mut dispatcher = Dispatcher::new();
        register_all(&mut dispatcher, test_ctx());
        let result = dispatcher.read_resource("iota://iota/status").await;
        assert_eq!(result.contents.len(), 1);
        assert!(result.contents[0].text.contains("\"status\""));
    }
}
