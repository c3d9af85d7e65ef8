//! Main entry point for the deployment runner.
//!
//! Loads TOML configuration, registers the shipped deployment tasks,
//! and runs the tasks selected by tag against the chosen network.
//!
//! ```bash
//! # Run everything against the configured network
//! deployer --config deployer.toml
//!
//! # Run one task group against another network
//! deployer --tags UniswapV2Factory --network sepolia
//!
//! # Show what is registered without running
//! deployer --list
//! ```

use clap::Parser;
use deployer_config::Config;
use deployer_core::TaskRegistry;
use deployer_service::tasks::register_builtin_tasks;
use std::path::PathBuf;

/// Command-line arguments for the deployment runner.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
	/// Path to configuration file
	#[arg(short, long, default_value = "deployer.toml")]
	config: PathBuf,

	/// Network to deploy to (overrides [runner].network)
	#[arg(short, long)]
	network: Option<String>,

	/// Comma-separated tags selecting which tasks run (default: all)
	#[arg(short, long)]
	tags: Option<String>,

	/// List registered tasks and their tags without running
	#[arg(long, default_value = "false")]
	list: bool,

	/// Log level (trace, debug, info, warn, error)
	#[arg(short, long, default_value = "info")]
	log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	// Initialize tracing with env filter
	use tracing_subscriber::{fmt, EnvFilter};

	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

	fmt().with_env_filter(env_filter).with_target(true).init();

	if args.list {
		return list_tasks();
	}

	let config_path = args
		.config
		.to_str()
		.ok_or_else(|| format!("Invalid config path: {:?}", args.config))?;
	let config = Config::from_file(config_path)?;
	tracing::info!("Loaded configuration from {}", config_path);

	let tags = parse_tags(args.tags.as_deref());
	let summary = deployer_service::run(&config, args.network.as_deref(), &tags).await?;

	tracing::info!("Executed tasks: [{}]", summary.executed.join(", "));
	Ok(())
}

/// Prints the registered tasks without building an environment.
fn list_tasks() -> Result<(), Box<dyn std::error::Error>> {
	let mut registry = TaskRegistry::new();
	register_builtin_tasks(&mut registry)?;

	for spec in registry.specs() {
		let mut line = format!("{}  tags: [{}]", spec.id, spec.tags.join(", "));
		if !spec.depends_on.is_empty() {
			line.push_str(&format!("  depends on: [{}]", spec.depends_on.join(", ")));
		}
		println!("{}", line);
	}
	Ok(())
}

fn parse_tags(raw: Option<&str>) -> Vec<String> {
	raw.map(|value| {
		value
			.split(',')
			.map(str::trim)
			.filter(|tag| !tag.is_empty())
			.map(str::to_string)
			.collect()
	})
	.unwrap_or_default()
}
