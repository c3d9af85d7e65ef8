//! Registry plumbing for pluggable implementations.
//!
//! Every backend (an accounts source, a deployment transport) exposes a
//! unit `Registry` struct implementing this trait. The service crate
//! collects them into factory maps keyed by [`NAME`](ImplementationRegistry::NAME),
//! which is the string configuration files use to select an implementation.

/// Compile-time metadata tying an implementation name to its factory.
pub trait ImplementationRegistry {
	/// Name used in configuration to select this implementation.
	const NAME: &'static str;

	/// Factory function type that constructs the implementation.
	type Factory;

	/// Returns the factory function for this implementation.
	fn factory() -> Self::Factory;
}

#[cfg(test)]
mod tests {
	use super::*;

	struct DummyRegistry;

	impl ImplementationRegistry for DummyRegistry {
		const NAME: &'static str = "dummy";
		type Factory = fn() -> u32;

		fn factory() -> Self::Factory {
			|| 7
		}
	}

	#[test]
	fn test_registry_exposes_name_and_factory() {
		assert_eq!(DummyRegistry::NAME, "dummy");
		let factory = DummyRegistry::factory();
		assert_eq!(factory(), 7);
	}
}
