//! Network definitions shared by configuration and deployment backends.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single RPC endpoint which may expose HTTP and/or WebSocket transports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RpcEndpoint {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub http: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub ws: Option<String>,
}

impl RpcEndpoint {
	pub fn http_only(url: String) -> Self {
		Self {
			http: Some(url),
			ws: None,
		}
	}

	pub fn both(http_url: String, ws_url: String) -> Self {
		Self {
			http: Some(http_url),
			ws: Some(ws_url),
		}
	}
}

/// Settings for one EVM network a deployment can target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NetworkConfig {
	/// Chain ID transactions will be bound to.
	pub chain_id: u64,
	/// Endpoints in preference order.
	pub rpc_urls: Vec<RpcEndpoint>,
}

impl NetworkConfig {
	/// Returns the first configured HTTP URL, if any.
	pub fn get_http_url(&self) -> Option<&str> {
		self.rpc_urls.iter().find_map(|endpoint| endpoint.http.as_deref())
	}
}

/// All known networks, keyed by the name tasks and the CLI select them with.
pub type NetworksConfig = HashMap<String, NetworkConfig>;
