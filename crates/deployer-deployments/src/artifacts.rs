//! Compiled contract artifacts and constructor-argument encoding.
//!
//! Artifacts follow the hardhat layout: one JSON file per contract with
//! `contractName`, `abi`, and `bytecode` fields. The bytecode is treated
//! as an opaque blob; the only inspection performed here is reading the
//! constructor signature from the ABI to encode arguments against it.

use crate::DeploymentError;
use alloy_dyn_abi::{DynSolType, DynSolValue};
use alloy_json_abi::JsonAbi;
use deployer_types::{to_alloy_address, without_0x_prefix, ConstructorArg};
use serde::Deserialize;
use std::path::PathBuf;

/// A compiled contract loaded from an artifact file.
#[derive(Debug, Clone, Deserialize)]
pub struct Artifact {
	/// Name of the contract the artifact was compiled from.
	#[serde(rename = "contractName")]
	pub contract_name: String,
	/// Contract ABI, used only for the constructor signature.
	pub abi: JsonAbi,
	/// Hex-encoded creation bytecode.
	pub bytecode: String,
}

impl Artifact {
	/// Produces the creation transaction payload: the compiled bytecode
	/// with ABI-encoded constructor arguments appended.
	pub fn creation_code(&self, args: &[ConstructorArg]) -> Result<Vec<u8>, DeploymentError> {
		let mut code = hex::decode(without_0x_prefix(&self.bytecode)).map_err(|e| {
			DeploymentError::Artifact(format!(
				"Invalid bytecode in artifact '{}': {}",
				self.contract_name, e
			))
		})?;

		code.extend(self.encode_constructor_args(args)?);
		Ok(code)
	}

	fn encode_constructor_args(&self, args: &[ConstructorArg]) -> Result<Vec<u8>, DeploymentError> {
		let inputs = self
			.abi
			.constructor
			.as_ref()
			.map(|c| c.inputs.as_slice())
			.unwrap_or_default();

		if inputs.len() != args.len() {
			return Err(DeploymentError::Artifact(format!(
				"Constructor of '{}' takes {} argument(s), got {}",
				self.contract_name,
				inputs.len(),
				args.len()
			)));
		}

		let mut values = Vec::with_capacity(args.len());
		for (input, arg) in inputs.iter().zip(args) {
			let ty: DynSolType = input.ty.parse().map_err(|e| {
				DeploymentError::Artifact(format!(
					"Unsupported constructor parameter type '{}' in '{}': {}",
					input.ty, self.contract_name, e
				))
			})?;

			let value = coerce_arg(&ty, arg).ok_or_else(|| {
				DeploymentError::Artifact(format!(
					"Constructor argument '{}' of '{}' expects {}, got {}",
					input.name, self.contract_name, input.ty, arg
				))
			})?;
			values.push(value);
		}

		if values.is_empty() {
			return Ok(Vec::new());
		}

		Ok(DynSolValue::Tuple(values).abi_encode_params())
	}
}

fn coerce_arg(ty: &DynSolType, arg: &ConstructorArg) -> Option<DynSolValue> {
	match (ty, arg) {
		(DynSolType::Address, ConstructorArg::Address(address)) => {
			to_alloy_address(address).ok().map(DynSolValue::Address)
		},
		(DynSolType::Uint(size), ConstructorArg::Uint(value)) => {
			Some(DynSolValue::Uint(*value, *size))
		},
		(DynSolType::Bool, ConstructorArg::Bool(value)) => Some(DynSolValue::Bool(*value)),
		(DynSolType::String, ConstructorArg::String(value)) => {
			Some(DynSolValue::String(value.clone()))
		},
		(DynSolType::Bytes, ConstructorArg::Bytes(bytes)) => {
			Some(DynSolValue::Bytes(bytes.clone()))
		},
		_ => None,
	}
}

/// Directory of compiled contract artifacts, loaded by contract name.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
	dir: PathBuf,
}

impl ArtifactStore {
	pub fn new(dir: impl Into<PathBuf>) -> Self {
		Self { dir: dir.into() }
	}

	/// Loads `<dir>/<contract>.json` and parses it as a hardhat artifact.
	pub fn load(&self, contract: &str) -> Result<Artifact, DeploymentError> {
		let path = self.dir.join(format!("{contract}.json"));
		let contents = std::fs::read_to_string(&path).map_err(|e| {
			DeploymentError::Artifact(format!(
				"Failed to read artifact '{}': {}",
				path.display(),
				e
			))
		})?;

		serde_json::from_str(&contents).map_err(|e| {
			DeploymentError::Artifact(format!(
				"Failed to parse artifact '{}': {}",
				path.display(),
				e
			))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use alloy_primitives::U256;
	use deployer_types::parse_address;
	use std::io::Write;

	const FACTORY_ARTIFACT: &str = r#"{
		"contractName": "UniswapV2Factory",
		"abi": [
			{
				"type": "constructor",
				"stateMutability": "nonpayable",
				"inputs": [{ "name": "_feeToSetter", "type": "address" }]
			}
		],
		"bytecode": "0x608060405234801561001057600080fd5b50"
	}"#;

	const NO_CONSTRUCTOR_ARTIFACT: &str = r#"{
		"contractName": "Multicall",
		"abi": [],
		"bytecode": "0x6080"
	}"#;

	fn write_artifact(dir: &std::path::Path, name: &str, contents: &str) {
		let mut file = std::fs::File::create(dir.join(format!("{name}.json"))).unwrap();
		file.write_all(contents.as_bytes()).unwrap();
	}

	fn factory_artifact() -> Artifact {
		serde_json::from_str(FACTORY_ARTIFACT).unwrap()
	}

	#[test]
	fn test_store_loads_artifact_by_name() {
		let dir = tempfile::tempdir().unwrap();
		write_artifact(dir.path(), "UniswapV2Factory", FACTORY_ARTIFACT);

		let store = ArtifactStore::new(dir.path());
		let artifact = store.load("UniswapV2Factory").unwrap();
		assert_eq!(artifact.contract_name, "UniswapV2Factory");
		assert!(artifact.abi.constructor.is_some());
	}

	#[test]
	fn test_store_missing_artifact() {
		let dir = tempfile::tempdir().unwrap();
		let store = ArtifactStore::new(dir.path());

		let err = store.load("UniswapV2Factory").unwrap_err();
		assert!(matches!(err, DeploymentError::Artifact(_)));
		assert!(err.to_string().contains("Failed to read artifact"));
	}

	#[test]
	fn test_store_invalid_json() {
		let dir = tempfile::tempdir().unwrap();
		write_artifact(dir.path(), "Broken", "not json");

		let store = ArtifactStore::new(dir.path());
		let err = store.load("Broken").unwrap_err();
		assert!(err.to_string().contains("Failed to parse artifact"));
	}

	#[test]
	fn test_creation_code_appends_encoded_address() {
		let artifact = factory_artifact();
		let fee_to_setter = parse_address("0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266").unwrap();

		let code = artifact
			.creation_code(&[ConstructorArg::Address(fee_to_setter)])
			.unwrap();

		// bytecode (18 bytes) + one abi-encoded address word
		assert_eq!(code.len(), 18 + 32);
		assert_eq!(&code[18..30], &[0u8; 12]);
		assert_eq!(
			hex::encode(&code[30..]),
			"f39fd6e51aad88f6f4ce6ab8827279cfffb92266"
		);
	}

	#[test]
	fn test_creation_code_without_constructor() {
		let artifact: Artifact = serde_json::from_str(NO_CONSTRUCTOR_ARTIFACT).unwrap();
		let code = artifact.creation_code(&[]).unwrap();
		assert_eq!(code, vec![0x60, 0x80]);
	}

	#[test]
	fn test_argument_count_mismatch() {
		let artifact = factory_artifact();
		let err = artifact.creation_code(&[]).unwrap_err();
		assert!(err
			.to_string()
			.contains("takes 1 argument(s), got 0"));
	}

	#[test]
	fn test_argument_type_mismatch() {
		let artifact = factory_artifact();
		let err = artifact
			.creation_code(&[ConstructorArg::Uint(U256::from(1))])
			.unwrap_err();
		assert!(err.to_string().contains("expects address"));
	}

	#[test]
	fn test_unexpected_argument_without_constructor() {
		let artifact: Artifact = serde_json::from_str(NO_CONSTRUCTOR_ARTIFACT).unwrap();
		let err = artifact
			.creation_code(&[ConstructorArg::Bool(true)])
			.unwrap_err();
		assert!(err
			.to_string()
			.contains("takes 0 argument(s), got 1"));
	}

	#[test]
	fn test_invalid_bytecode_hex() {
		let artifact: Artifact = serde_json::from_str(
			r#"{ "contractName": "Bad", "abi": [], "bytecode": "0xzz" }"#,
		)
		.unwrap();
		let err = artifact.creation_code(&[]).unwrap_err();
		assert!(err.to_string().contains("Invalid bytecode"));
	}
}
