//! RPC-based deployment implementation.
//!
//! Submits creation transactions with `eth_sendTransaction` to a node
//! that manages its own keys, as development nodes do, then waits for the
//! configured number of confirmations. Signing never happens in-process.

use crate::artifacts::ArtifactStore;
use crate::{DeploymentError, DeploymentInterface};
use alloy_primitives::Bytes;
use alloy_provider::{DynProvider, PendingTransactionConfig, Provider, ProviderBuilder};
use alloy_rpc_client::RpcClient;
use alloy_rpc_types::{TransactionReceipt, TransactionRequest};
use alloy_transport::layers::RetryBackoffLayer;
use async_trait::async_trait;
use deployer_types::{
	to_alloy_address, Address, ConfigSchema, DeployRequest, Deployment, Field, FieldType,
	NetworkConfig, Schema, TransactionHash,
};
use std::time::Duration;

/// Deployment implementation backed by an EVM JSON-RPC node.
pub struct RpcDeployment {
	provider: DynProvider,
	artifacts: ArtifactStore,
	min_confirmations: u64,
	transaction_timeout: Duration,
}

impl RpcDeployment {
	/// Creates an RpcDeployment targeting the given network.
	pub fn new(
		network: &NetworkConfig,
		artifacts: ArtifactStore,
		min_confirmations: u64,
		transaction_timeout: Duration,
	) -> Result<Self, DeploymentError> {
		let http_url = network.get_http_url().ok_or_else(|| {
			DeploymentError::Network("No HTTP RPC URL configured for network".to_string())
		})?;

		let url = http_url
			.parse()
			.map_err(|e| DeploymentError::Network(format!("Invalid RPC URL: {}", e)))?;

		// Retry layer for transient network errors and rate limits
		let retry_layer = RetryBackoffLayer::new(
			5,    // max_retry: retry up to 5 times
			1000, // backoff: initial backoff in milliseconds
			10,   // cups: compute units per second
		);

		let client = RpcClient::builder().layer(retry_layer).http(url);

		// No wallet filler: transactions go out as eth_sendTransaction and
		// the node signs with its own held accounts.
		let provider = ProviderBuilder::new().on_client(client).erased();

		Ok(Self {
			provider,
			artifacts,
			min_confirmations,
			transaction_timeout,
		})
	}
}

/// Configuration schema for RpcDeployment.
pub struct RpcDeploymentSchema;

impl RpcDeploymentSchema {
	/// Static validation method for use before instance creation
	pub fn validate_config(config: &toml::Value) -> Result<(), deployer_types::ValidationError> {
		let instance = Self;
		instance.validate(config)
	}
}

impl ConfigSchema for RpcDeploymentSchema {
	fn validate(&self, config: &toml::Value) -> Result<(), deployer_types::ValidationError> {
		let schema = Schema::new(
			// Required fields
			vec![Field::new("artifacts_dir", FieldType::String)],
			// Optional fields
			vec![Field::new(
				"transaction_timeout_seconds",
				FieldType::Integer {
					min: Some(1),
					max: Some(3600),
				},
			)],
		);

		schema.validate(config)
	}
}

#[async_trait]
impl DeploymentInterface for RpcDeployment {
	fn config_schema(&self) -> Box<dyn ConfigSchema> {
		Box::new(RpcDeploymentSchema)
	}

	async fn deploy(&self, request: &DeployRequest) -> Result<Deployment, DeploymentError> {
		let artifact = self.artifacts.load(&request.contract)?;
		let data = Bytes::from(artifact.creation_code(&request.args)?);

		let from = to_alloy_address(&request.from)
			.map_err(|e| DeploymentError::Rejected(format!("Invalid sender address: {}", e)))?;

		if request.log {
			tracing::info!(from = %request.from, "deploying \"{}\"", request.contract);
		}

		// No `to` field: a creation transaction.
		let tx = TransactionRequest::default().from(from).input(data.into());

		let pending = self.provider.send_transaction(tx).await.map_err(|e| {
			DeploymentError::Network(format!(
				"Failed to send deployment transaction for '{}': {}",
				request.contract, e
			))
		})?;

		let tx_hash = *pending.tx_hash();
		tracing::debug!(
			tx_hash = %TransactionHash(tx_hash.0.to_vec()),
			confirmations = self.min_confirmations,
			"waiting for deployment confirmation"
		);

		let watch_config = PendingTransactionConfig::new(tx_hash)
			.with_required_confirmations(self.min_confirmations)
			.with_timeout(Some(self.transaction_timeout));

		let watcher = self
			.provider
			.watch_pending_transaction(watch_config)
			.await
			.map_err(|e| DeploymentError::Network(format!("Transaction watch failed: {}", e)))?;

		let confirmed_hash = watcher
			.await
			.map_err(|e| DeploymentError::Network(format!("Failed to confirm transaction: {}", e)))?;

		let receipt = self
			.provider
			.get_transaction_receipt(confirmed_hash)
			.await
			.map_err(|e| DeploymentError::Network(format!("Failed to get receipt: {}", e)))?
			.ok_or_else(|| {
				DeploymentError::Network(format!(
					"Receipt not found for transaction {}",
					TransactionHash(confirmed_hash.0.to_vec())
				))
			})?;

		let deployment = deployment_from_receipt(
			&request.contract,
			TransactionHash(confirmed_hash.0.to_vec()),
			&receipt,
		)?;

		if request.log {
			tracing::info!(
				tx_hash = %deployment.tx_hash,
				"deployed at {} with {} gas",
				deployment.address,
				deployment.gas_used
			);
		}

		Ok(deployment)
	}
}

/// Maps a confirmed receipt into deployment metadata.
fn deployment_from_receipt(
	contract: &str,
	tx_hash: TransactionHash,
	receipt: &TransactionReceipt,
) -> Result<Deployment, DeploymentError> {
	if !receipt.status() {
		return Err(DeploymentError::Rejected(format!(
			"Deployment of '{}' reverted in transaction {}",
			contract, tx_hash
		)));
	}

	let contract_address = receipt.contract_address.ok_or_else(|| {
		DeploymentError::Rejected(format!(
			"Receipt for '{}' carries no contract address",
			contract
		))
	})?;

	// A confirmed deployment must sit in a block; a receipt without one
	// is a node inconsistency, not a result to report.
	let block_number = receipt.block_number.ok_or_else(|| {
		DeploymentError::Network(format!(
			"Receipt for '{}' carries no block number",
			contract
		))
	})?;

	Ok(Deployment {
		contract: contract.to_string(),
		address: Address(contract_address.0.to_vec()),
		tx_hash,
		block_number,
		gas_used: receipt.gas_used,
	})
}

fn default_transaction_timeout_seconds() -> u64 {
	60
}

/// Factory function to create an RPC deployment backend from configuration.
///
/// # Parameters
/// - `config`: TOML table containing:
///   - `artifacts_dir` (required): directory of compiled artifact JSON files
///   - `transaction_timeout_seconds` (optional): confirmation wait cap
/// - `network`: the target network's RPC configuration
/// - `min_confirmations`: the runner's confirmation policy
pub fn create_rpc_deployment(
	config: &toml::Value,
	network: &NetworkConfig,
	min_confirmations: u64,
) -> Result<Box<dyn DeploymentInterface>, DeploymentError> {
	RpcDeploymentSchema::validate_config(config)
		.map_err(|e| DeploymentError::Network(format!("Invalid configuration: {}", e)))?;

	let artifacts_dir = config
		.get("artifacts_dir")
		.and_then(|v| v.as_str())
		.ok_or_else(|| DeploymentError::Network("artifacts_dir is required".to_string()))?;

	let timeout_seconds = config
		.get("transaction_timeout_seconds")
		.and_then(|v| v.as_integer())
		.map(|v| v as u64)
		.unwrap_or_else(default_transaction_timeout_seconds);

	let deployment = RpcDeployment::new(
		network,
		ArtifactStore::new(artifacts_dir),
		min_confirmations,
		Duration::from_secs(timeout_seconds),
	)?;

	Ok(Box::new(deployment))
}

/// Registry for the RPC deployment implementation.
pub struct Registry;

impl deployer_types::ImplementationRegistry for Registry {
	const NAME: &'static str = "rpc";
	type Factory = crate::DeploymentFactory;

	fn factory() -> Self::Factory {
		create_rpc_deployment
	}
}

impl crate::DeploymentRegistry for Registry {}
