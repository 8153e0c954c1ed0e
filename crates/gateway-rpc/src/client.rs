//! Concrete [`EvmRpc`] implementation over `alloy-provider`'s HTTP
//! transport. One instance per network; the per-chain cache in
//! [`crate::cache`] is responsible for reuse.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, B256, U256};
use alloy_provider::{Provider, ProviderBuilder, RootProvider};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types_eth::{BlockNumberOrTag, BlockTransactionsKind, TransactionRequest};
use alloy_transport_http::Http;
use async_trait::async_trait;
use gateway_primitives::{
    BlockSample, GasPrice, GatewayError, GatewayResult, Receipt, TxRecord, TxRef, TxStatus,
};

use crate::facade::{CallRequest, EvmRpc};
use crate::tls::TlsOptions;

/// A read-only alloy-backed client for a single network.
pub struct AlloyEvmClient {
    provider: RootProvider,
    network_label: String,
}

impl AlloyEvmClient {
    /// Build a client for `rpc_url`. `tls` is threaded through to the
    /// underlying `reqwest` client when configured; plain HTTPS with the
    /// system trust store otherwise.
    pub fn connect(
        network_label: impl Into<String>,
        rpc_url: &str,
        tls: &TlsOptions,
        bearer_token: Option<&str>,
    ) -> GatewayResult<Self> {
        let url = reqwest::Url::parse(rpc_url)
            .map_err(|e| GatewayError::validation(format!("invalid RPC URL: {e}")))?;

        let http_client = build_reqwest_client(tls, bearer_token)?;
        let transport = Http::with_client(http_client, url);
        let rpc_client = RpcClient::new(transport, false);
        let provider = ProviderBuilder::new().connect_client(rpc_client);

        Ok(Self { provider, network_label: network_label.into() })
    }

    fn upstream_err(&self, step: &str, e: impl std::fmt::Display) -> GatewayError {
        GatewayError::upstream(format!("{} on {}: {e}", step, self.network_label))
    }
}

fn build_reqwest_client(tls: &TlsOptions, bearer_token: Option<&str>) -> GatewayResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().timeout(Duration::from_secs(30));
    if let Some(token) = bearer_token {
        let mut headers = reqwest::header::HeaderMap::new();
        let mut value = reqwest::header::HeaderValue::from_str(&format!("Bearer {token}"))
            .map_err(|e| GatewayError::validation(format!("invalid <SIBLING>_JWT_TOKEN: {e}")))?;
        value.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }
    if tls.is_configured() {
        if let Some(ca_path) = &tls.ca_path {
            let pem = std::fs::read(ca_path)
                .map_err(|e| GatewayError::validation(format!("reading SSL_CA_PATH: {e}")))?;
            let cert = reqwest::Certificate::from_pem(&pem)
                .map_err(|e| GatewayError::validation(format!("parsing SSL_CA_PATH: {e}")))?;
            builder = builder.add_root_certificate(cert);
        }
        if let (Some(cert_path), Some(key_path)) = (&tls.cert_path, &tls.key_path) {
            let mut pem = std::fs::read(cert_path)
                .map_err(|e| GatewayError::validation(format!("reading SSL_CERT_PATH: {e}")))?;
            let mut key = std::fs::read(key_path)
                .map_err(|e| GatewayError::validation(format!("reading SSL_KEY_PATH: {e}")))?;
            pem.append(&mut key);
            let identity = reqwest::Identity::from_pem(&pem)
                .map_err(|e| GatewayError::validation(format!("parsing client identity: {e}")))?;
            builder = builder.identity(identity);
        }
    }
    builder
        .build()
        .map_err(|e| GatewayError::upstream(format!("building HTTP client: {e}")))
}

fn gas_price_of(tx: &alloy_rpc_types_eth::Transaction) -> GasPrice {
    match tx.max_fee_per_gas() {
        Some(max_fee) => GasPrice::Eip1559 {
            max_fee_per_gas: max_fee,
            max_priority_fee_per_gas: tx.max_priority_fee_per_gas().unwrap_or(0),
        },
        None => GasPrice::Legacy { gas_price: tx.gas_price().unwrap_or(0) },
    }
}

fn to_tx_record(tx: alloy_rpc_types_eth::Transaction, block_timestamp: Option<u64>) -> TxRecord {
    use alloy_consensus::Transaction as _;
    let inner = tx.inner.inner.clone();
    TxRecord {
        hash: *tx.inner.tx_hash(),
        from: tx.from,
        to: inner.to(),
        value: inner.value(),
        gas: inner.gas_limit(),
        gas_price: gas_price_of(&tx),
        input: inner.input().clone(),
        nonce: inner.nonce(),
        block_number: tx.block_number,
        block_timestamp,
        status: None,
    }
}

fn to_block_sample(block: alloy_rpc_types_eth::Block, full_txs: bool) -> BlockSample {
    let header = &block.header;
    let txs = if full_txs {
        Some(
            block
                .transactions
                .txns()
                .cloned()
                .map(|tx| TxRef::Inline(Box::new(to_tx_record(tx, Some(header.timestamp)))))
                .collect(),
        )
    } else {
        let hashes = block.transactions.hashes().collect::<Vec<_>>();
        if hashes.is_empty() { None } else { Some(hashes.into_iter().map(TxRef::Hash).collect()) }
    };
    BlockSample {
        number: header.number,
        timestamp: header.timestamp,
        gas_used: header.gas_used,
        gas_limit: header.gas_limit,
        base_fee_per_gas: header.base_fee_per_gas,
        tx_count: block.transactions.len() as u64,
        txs,
    }
}

#[async_trait]
impl EvmRpc for AlloyEvmClient {
    async fn block_number(&self) -> GatewayResult<u64> {
        self.provider.get_block_number().await.map_err(|e| self.upstream_err("eth_blockNumber", e))
    }

    async fn latest_block(&self, full_txs: bool) -> GatewayResult<BlockSample> {
        let kind = if full_txs { BlockTransactionsKind::Full } else { BlockTransactionsKind::Hashes };
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest)
            .kind(kind)
            .await
            .map_err(|e| self.upstream_err("eth_getBlockByNumber(latest)", e))?
            .ok_or_else(|| GatewayError::upstream("no latest block returned"))?;
        Ok(to_block_sample(block, full_txs))
    }

    async fn block_by_number(&self, number: u64, full_txs: bool) -> GatewayResult<Option<BlockSample>> {
        let kind = if full_txs { BlockTransactionsKind::Full } else { BlockTransactionsKind::Hashes };
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Number(number))
            .kind(kind)
            .await
            .map_err(|e| self.upstream_err("eth_getBlockByNumber", e))?;
        Ok(block.map(|b| to_block_sample(b, full_txs)))
    }

    async fn get_tx(&self, hash: B256) -> GatewayResult<Option<TxRecord>> {
        let tx = self
            .provider
            .get_transaction_by_hash(hash)
            .await
            .map_err(|e| self.upstream_err("eth_getTransactionByHash", e))?;
        Ok(tx.map(|t| to_tx_record(t, None)))
    }

    async fn get_receipt(&self, hash: B256) -> GatewayResult<Option<Receipt>> {
        let receipt = self
            .provider
            .get_transaction_receipt(hash)
            .await
            .map_err(|e| self.upstream_err("eth_getTransactionReceipt", e))?;
        Ok(receipt.map(|r| Receipt {
            gas_used: r.gas_used as u128,
            block_number: r.block_number.unwrap_or_default(),
            status: if r.status() { TxStatus::Success } else { TxStatus::Reverted },
            logs: r
                .logs()
                .iter()
                .map(|l| gateway_primitives::LogEntry {
                    address: l.address(),
                    topics: l.topics().to_vec(),
                    data: l.data().data.clone(),
                })
                .collect(),
            contract_address: r.contract_address,
        }))
    }

    async fn get_balance(&self, address: Address) -> GatewayResult<U256> {
        self.provider.get_balance(address).await.map_err(|e| self.upstream_err("eth_getBalance", e))
    }

    async fn get_bytecode(&self, address: Address) -> GatewayResult<Bytes> {
        self.provider.get_code_at(address).await.map_err(|e| self.upstream_err("eth_getCode", e))
    }

    async fn get_gas_price(&self) -> GatewayResult<u128> {
        self.provider.get_gas_price().await.map_err(|e| self.upstream_err("eth_gasPrice", e))
    }

    async fn estimate_gas(&self, call: CallRequest) -> GatewayResult<u64> {
        let req = to_tx_request(call);
        self.provider.estimate_gas(req).await.map_err(|e| self.upstream_err("eth_estimateGas", e))
    }

    async fn call(&self, to: Address, data: Bytes) -> GatewayResult<Bytes> {
        let req = TransactionRequest::default().to(to).input(data.into());
        self.provider.call(req).await.map_err(|e| self.upstream_err("eth_call", e))
    }
}

fn to_tx_request(call: CallRequest) -> TransactionRequest {
    let mut req = TransactionRequest::default();
    if let Some(from) = call.from {
        req = req.from(from);
    }
    if let Some(to) = call.to {
        req = req.to(to);
    }
    if let Some(value) = call.value {
        req = req.value(value);
    }
    req.input(call.data.into())
}
