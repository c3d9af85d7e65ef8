//! Deployment requests and their confirmed results.

use crate::account::Address;
use crate::utils::with_0x_prefix;
use alloy_primitives::U256;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A 32-byte transaction hash.
///
/// Serialized as a lowercase hex string with a `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TransactionHash(pub Vec<u8>);

impl Serialize for TransactionHash {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for TransactionHash {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let stripped = s.strip_prefix("0x").unwrap_or(&s);
		let bytes = hex::decode(stripped)
			.map_err(|e| serde::de::Error::custom(format!("Invalid hex transaction hash: {}", e)))?;
		if bytes.len() != 32 {
			return Err(serde::de::Error::custom(format!(
				"Invalid transaction hash length: expected 32 bytes, got {}",
				bytes.len()
			)));
		}
		Ok(TransactionHash(bytes))
	}
}

impl fmt::Display for TransactionHash {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// One constructor argument for a contract deployment.
///
/// Arguments are ABI-encoded against the artifact's constructor
/// signature by the deployment implementation, so the variant chosen
/// here must match the declared Solidity parameter type.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstructorArg {
	Address(Address),
	Uint(U256),
	Bool(bool),
	String(String),
	Bytes(Vec<u8>),
}

impl fmt::Display for ConstructorArg {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ConstructorArg::Address(addr) => write!(f, "{}", addr),
			ConstructorArg::Uint(value) => write!(f, "{}", value),
			ConstructorArg::Bool(value) => write!(f, "{}", value),
			ConstructorArg::String(value) => write!(f, "\"{}\"", value),
			ConstructorArg::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
		}
	}
}

impl From<Address> for ConstructorArg {
	fn from(addr: Address) -> Self {
		ConstructorArg::Address(addr)
	}
}

impl From<U256> for ConstructorArg {
	fn from(value: U256) -> Self {
		ConstructorArg::Uint(value)
	}
}

impl From<bool> for ConstructorArg {
	fn from(value: bool) -> Self {
		ConstructorArg::Bool(value)
	}
}

impl From<&str> for ConstructorArg {
	fn from(value: &str) -> Self {
		ConstructorArg::String(value.to_string())
	}
}

/// Instruction to deploy one contract.
///
/// `contract` names the compiled artifact to deploy. `from` is the
/// already-resolved sender address and `log` controls whether the
/// implementation announces the deployment on the info log.
#[derive(Debug, Clone, PartialEq)]
pub struct DeployRequest {
	pub contract: String,
	pub args: Vec<ConstructorArg>,
	pub from: Address,
	pub log: bool,
}

impl DeployRequest {
	pub fn new(contract: impl Into<String>, from: Address) -> Self {
		Self {
			contract: contract.into(),
			args: Vec::new(),
			from,
			log: false,
		}
	}

	pub fn with_arg(mut self, arg: impl Into<ConstructorArg>) -> Self {
		self.args.push(arg.into());
		self
	}

	pub fn with_args(mut self, args: Vec<ConstructorArg>) -> Self {
		self.args = args;
		self
	}

	pub fn with_log(mut self, log: bool) -> Self {
		self.log = log;
		self
	}
}

/// Record of a confirmed contract deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deployment {
	/// Artifact name the deployment was created from.
	pub contract: String,
	/// Address the contract now lives at.
	pub address: Address,
	/// Hash of the deployment transaction.
	pub tx_hash: TransactionHash,
	/// Block the transaction was included in.
	pub block_number: u64,
	/// Gas consumed by the deployment transaction.
	pub gas_used: u64,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::utils::parse_address;

	fn deployer() -> Address {
		parse_address("0x742d35Cc6634C0532925a3b844Bc9e7595f0bEb0").unwrap()
	}

	#[test]
	fn test_deploy_request_builder() {
		let request = DeployRequest::new("UniswapV2Factory", deployer())
			.with_arg(deployer())
			.with_log(true);

		assert_eq!(request.contract, "UniswapV2Factory");
		assert_eq!(request.from, deployer());
		assert_eq!(request.args, vec![ConstructorArg::Address(deployer())]);
		assert!(request.log);
	}

	#[test]
	fn test_with_args_replaces_argument_list() {
		let request = DeployRequest::new("Token", deployer())
			.with_arg(deployer())
			.with_args(vec![U256::from(1_000_000).into(), true.into()]);

		assert_eq!(
			request.args,
			vec![
				ConstructorArg::Uint(U256::from(1_000_000)),
				ConstructorArg::Bool(true)
			]
		);
	}

	#[test]
	fn test_deploy_request_defaults() {
		let request = DeployRequest::new("Token", deployer());
		assert!(request.args.is_empty());
		assert!(!request.log);
	}

	#[test]
	fn test_constructor_arg_display() {
		assert_eq!(
			ConstructorArg::from(deployer()).to_string(),
			"0x742d35cc6634c0532925a3b844bc9e7595f0beb0"
		);
		assert_eq!(ConstructorArg::Uint(U256::from(1000)).to_string(), "1000");
		assert_eq!(ConstructorArg::Bool(true).to_string(), "true");
		assert_eq!(ConstructorArg::from("fee setter").to_string(), "\"fee setter\"");
		assert_eq!(
			ConstructorArg::Bytes(vec![0xde, 0xad]).to_string(),
			"0xdead"
		);
	}

	#[test]
	fn test_transaction_hash_serialization() {
		let hash = TransactionHash(vec![0xab; 32]);
		let json = serde_json::to_string(&hash).unwrap();
		assert_eq!(json, format!("\"0x{}\"", "ab".repeat(32)));

		let deserialized: TransactionHash = serde_json::from_str(&json).unwrap();
		assert_eq!(hash, deserialized);
	}

	#[test]
	fn test_transaction_hash_rejects_wrong_length() {
		let result: Result<TransactionHash, _> = serde_json::from_str("\"0xabcd\"");
		assert!(result
			.unwrap_err()
			.to_string()
			.contains("expected 32 bytes, got 2"));
	}

	#[test]
	fn test_deployment_serialization_round_trip() {
		let deployment = Deployment {
			contract: "UniswapV2Factory".to_string(),
			address: deployer(),
			tx_hash: TransactionHash(vec![0x11; 32]),
			block_number: 42,
			gas_used: 2_512_920,
		};

		let json = serde_json::to_string(&deployment).unwrap();
		let back: Deployment = serde_json::from_str(&json).unwrap();
		assert_eq!(deployment, back);
	}
}
