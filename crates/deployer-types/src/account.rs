//! Account types used when resolving who signs and funds deployments.

use crate::utils::with_0x_prefix;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A 20-byte EVM address.
///
/// Serialized as a lowercase hex string with a `0x` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(pub Vec<u8>);

impl Serialize for Address {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&with_0x_prefix(&hex::encode(&self.0)))
	}
}

impl<'de> Deserialize<'de> for Address {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		let stripped = s.strip_prefix("0x").unwrap_or(&s);
		let bytes = hex::decode(stripped)
			.map_err(|e| serde::de::Error::custom(format!("Invalid hex address: {}", e)))?;
		if bytes.len() != 20 {
			return Err(serde::de::Error::custom(format!(
				"Invalid address length: expected 20 bytes, got {}",
				bytes.len()
			)));
		}
		Ok(Address(bytes))
	}
}

impl fmt::Display for Address {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "0x{}", hex::encode(&self.0))
	}
}

/// Mapping from role names (for example `deployer`) to addresses.
///
/// Roles are the indirection that lets tasks say *who* acts without
/// hardcoding *which key* acts on a given network.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedAccounts(pub HashMap<String, Address>);

impl NamedAccounts {
	/// Looks up the address bound to a role, if any.
	pub fn get(&self, role: &str) -> Option<&Address> {
		self.0.get(role)
	}

	/// Returns all configured role names in sorted order.
	pub fn roles(&self) -> Vec<&str> {
		let mut roles: Vec<&str> = self.0.keys().map(String::as_str).collect();
		roles.sort_unstable();
		roles
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl FromIterator<(String, Address)> for NamedAccounts {
	fn from_iter<I: IntoIterator<Item = (String, Address)>>(iter: I) -> Self {
		NamedAccounts(iter.into_iter().collect())
	}
}
