//! Deployment tasks shipped with the runner.

pub mod uniswap_v2_factory;

use deployer_core::{TaskError, TaskRegistry};

/// Registers every shipped task into a fresh registry.
pub fn register_builtin_tasks(registry: &mut TaskRegistry) -> Result<(), TaskError> {
	registry.register(Box::new(uniswap_v2_factory::UniswapV2Factory))?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builtin_tasks_register_cleanly() {
		let mut registry = TaskRegistry::new();
		register_builtin_tasks(&mut registry).unwrap();
		assert_eq!(registry.len(), 1);
		assert_eq!(registry.specs()[0].id, "UniswapV2Factory");
	}
}
