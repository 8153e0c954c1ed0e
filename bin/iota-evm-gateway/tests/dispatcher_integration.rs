//! Integration suite driving the registered tool/resource surface through
//! the same [`gateway_tools::Dispatcher`] the transports use, against an
//! in-memory RPC double — no network access (§6.6, §8).

use std::sync::Arc;

use gateway_primitives::BlockSample;
use gateway_rpc::mock::{MockEvmRpc, StaticRpcResolver};
use gateway_tools::{register_all, Dispatcher, GatewayContext};

fn dispatcher_with_iota_tip(number: u64, timestamp: u64) -> Arc<Dispatcher> {
    let rpc = Arc::new(MockEvmRpc::new().with_block(BlockSample {
        number,
        timestamp,
        gas_used: 12_000_000,
        gas_limit: 30_000_000,
        base_fee_per_gas: Some(1_000_000_000),
        tx_count: 0,
        txs: None,
    }));
    let resolver = StaticRpcResolver::new().with_client("iota", rpc);
    let ctx = Arc::new(GatewayContext::new(Arc::new(resolver)));
    let mut dispatcher = Dispatcher::new();
    register_all(&mut dispatcher, ctx);
    Arc::new(dispatcher)
}

#[tokio::test]
async fn registers_the_closed_twelve_tool_surface() {
    let dispatcher = dispatcher_with_iota_tip(100, 1_700_000_000);
    assert_eq!(dispatcher.tool_names().len(), 12);
}

#[tokio::test]
async fn network_info_round_trips_through_the_dispatcher() {
    let dispatcher = dispatcher_with_iota_tip(7_352_416, 1_700_000_000);
    let result = dispatcher.invoke_tool("get_iota_network_info", serde_json::json!({})).await;
    assert!(!result.is_error);
}

#[tokio::test]
async fn unknown_tool_name_is_reported_as_an_error_envelope() {
    let dispatcher = dispatcher_with_iota_tip(1, 1_700_000_000);
    let result = dispatcher.invoke_tool("no_such_tool", serde_json::json!({})).await;
    assert!(result.is_error);
}

#[tokio::test]
async fn unparameterized_resource_alias_defaults_to_the_primary_sibling() {
    let dispatcher = dispatcher_with_iota_tip(42, 1_700_000_000);
    let result = dispatcher.read_resource("iota://info").await;
    assert!(!result.is_error);
}

#[tokio::test]
async fn verify_network_status_reflects_recent_block_as_high_finality() {
    let now = chrono::Utc::now().timestamp();
    let dispatcher = dispatcher_with_iota_tip(7_352_416, (now - 12) as u64);
    let result = dispatcher.invoke_tool("verify_iota_network_status", serde_json::json!({})).await;
    assert!(!result.is_error);
}
