//! Small helpers for hex formatting and address parsing.

use crate::account::Address;

/// Ensures a hex string starts with `0x`.
pub fn with_0x_prefix(hex_str: &str) -> String {
	if hex_str.starts_with("0x") || hex_str.starts_with("0X") {
		hex_str.to_string()
	} else {
		format!("0x{}", hex_str)
	}
}

/// Strips a leading `0x` or `0X`, if present.
pub fn without_0x_prefix(hex_str: &str) -> &str {
	hex_str
		.strip_prefix("0x")
		.or_else(|| hex_str.strip_prefix("0X"))
		.unwrap_or(hex_str)
}

/// Parses a hex string (with or without `0x`) into a 20-byte [`Address`].
pub fn parse_address(hex_str: &str) -> Result<Address, String> {
	let bytes = hex::decode(without_0x_prefix(hex_str))
		.map_err(|e| format!("Invalid hex address: {}", e))?;
	if bytes.len() != 20 {
		return Err(format!(
			"Invalid address length: expected 20 bytes, got {}",
			bytes.len()
		));
	}
	Ok(Address(bytes))
}

/// Converts a domain [`Address`] into an alloy address.
pub fn to_alloy_address(address: &Address) -> Result<alloy_primitives::Address, String> {
	let bytes: [u8; 20] = address
		.0
		.as_slice()
		.try_into()
		.map_err(|_| format!("Invalid address length: expected 20 bytes, got {}", address.0.len()))?;
	Ok(alloy_primitives::Address::from(bytes))
}
