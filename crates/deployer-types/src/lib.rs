//! Shared types for the deployment runner.
//!
//! This crate defines the domain vocabulary used across the workspace:
//! addresses and named account mappings, deployment requests and their
//! confirmed results, network definitions, and the configuration
//! validation framework that pluggable implementations describe their
//! settings with.

pub mod account;
pub mod deployment;
pub mod networks;
pub mod registry;
pub mod utils;
pub mod validation;

pub use account::*;
pub use deployment::*;
pub use networks::*;
pub use registry::*;
pub use utils::*;
pub use validation::*;
