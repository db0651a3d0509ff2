//! Item and Awakening Utility
//!
//! A command-line tool for inspecting packed random-option ids, container
//! columns and the item catalog.
//!
//! # Features
//!
//! - **decode**: Decode a packed random-option id
//! - **encode**: Pack options into an id
//! - **container**: Parse and assemble a container window
//! - **lookup**: Show an item definition
//! - **search**: Search items by id or name
//! - **attributes**: List the attribute registry
//!
//! # Usage
//!
//! ```bash
//! # Decode an id (decimal or 0x-prefixed hex)
//! cargo run --example item_utils -- decode 0x8BDF400
//!
//! # Encode two options, sealed
//! cargo run --example item_utils -- encode --option 34:500 --option 24:509 --safe
//!
//! # Assemble the first 42 slots of an inventory
//! cargo run --example item_utils -- container --items "0,21,,,,1/" --indexes "0/" --end 42
//!
//! # Catalog queries
//! cargo run --example item_utils -- lookup 21
//! cargo run --example item_utils -- search sword
//! ```
//!
//! Settings are read from `--config` (TOML) and `AWAKEN_*` environment variables.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use awaken_rs::prelude::*;
use clap::{Parser, Subcommand};
use log::{debug, info};

#[derive(Parser)]
#[command(name = "item_utils")]
#[command(author = "awaken-rs project")]
#[command(version = "1.0")]
#[command(about = "Item utility - decode awakenings, containers and catalog entries", long_about = None)]
struct Cli {
	/// Settings file (TOML)
	#[arg(short, long, global = true, value_name = "FILE", env = "AWAKEN_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Decode a packed random-option id
	Decode {
		/// Packed id, decimal or 0x-prefixed hex
		#[arg(value_name = "ID", value_parser = parse_id)]
		id: u64,
	},

	/// Pack options into a random-option id
	Encode {
		/// Option as DST:ADJ_RAW; only the first three are used
		#[arg(short, long = "option", value_name = "DST:ADJ_RAW", value_parser = parse_option)]
		options: Vec<RandomOption>,

		/// Set the safe flag
		#[arg(short, long)]
		safe: bool,
	},

	/// Parse and assemble a container window
	Container {
		/// Item column
		#[arg(long, default_value = "")]
		items: String,

		/// Index column
		#[arg(long, default_value = "")]
		indexes: String,

		/// Extension column
		#[arg(long, default_value = "")]
		extensions: String,

		/// First logical slot
		#[arg(long, default_value_t = 0)]
		start: usize,

		/// One past the last logical slot
		#[arg(long)]
		end: usize,

		/// Include empty slots
		#[arg(short, long)]
		all: bool,
	},

	/// Show an item definition
	Lookup {
		/// Item id
		#[arg(value_name = "ID")]
		id: u32,
	},

	/// Search items by id or display name
	Search {
		/// Substring to look for
		#[arg(value_name = "QUERY")]
		query: String,

		/// Maximum number of results
		#[arg(short, long, default_value_t = SEARCH_LIMIT)]
		limit: usize,
	},

	/// List the attribute registry
	Attributes,
}

/// Parses a decimal or 0x-prefixed hexadecimal id
fn parse_id(s: &str) -> Result<u64, String> {
	let s = s.trim();
	match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
		Some(hex) => u64::from_str_radix(hex, 16).map_err(|e| format!("invalid hex id {s}: {e}")),
		None => s.parse().map_err(|e| format!("invalid id {s}: {e}")),
	}
}

/// Parses a `DST:ADJ_RAW` pair
fn parse_option(s: &str) -> Result<RandomOption, String> {
	let (dst, adj_raw) = s.split_once(':').ok_or_else(|| format!("expected DST:ADJ_RAW, got {s}"))?;
	let dst = dst.trim().parse().map_err(|e| format!("invalid dst {dst}: {e}"))?;
	let adj_raw = adj_raw.trim().parse().map_err(|e| format!("invalid adj_raw {adj_raw}: {e}"))?;
	Ok(RandomOption::new(dst, adj_raw))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(value)?);
	Ok(())
}

fn print_id(id: u64) {
	println!("id:  {id}");
	println!("hex: 0x{}", hex::encode_upper(id.to_be_bytes()));
}

fn open_registry(settings: &Settings) -> Result<AttributeRegistry> {
	AttributeRegistry::open(&settings.attributes_path)
		.with_context(|| format!("loading attributes from {}", settings.attributes_path.display()))
}

fn open_catalog(settings: &Settings) -> Result<ItemCatalog> {
	ItemCatalog::open(&settings.catalog_dir)
		.with_context(|| format!("indexing catalog in {}", settings.catalog_dir.display()))
}

/// Handle decode command
fn handle_decode(settings: &Settings, id: u64) -> Result<()> {
	let registry = open_registry(settings)?;
	print_id(id);
	print_json(&random_option::decode(id, &registry))
}

/// Handle encode command
fn handle_encode(options: &[RandomOption], safe: bool) -> Result<()> {
	if options.len() > random_option::MAX_RANDOM_OPTION {
		info!("Only the first {} options are packed", random_option::MAX_RANDOM_OPTION);
	}
	let inputs: Vec<OptionInput> = options.iter().copied().map(OptionInput::from).collect();
	let id = random_option::encode(&inputs, safe);
	print_id(id);

	let packed = random_option::unpack(id);
	for (slot, option) in packed.options.iter().enumerate() {
		println!("slot {}: dst {} adj_raw {} (adj {})", slot + 1, option.dst, option.adj_raw, option.adj());
	}
	Ok(())
}

/// Handle container command
fn handle_container(settings: &Settings, source: ContainerSource<'_>, window: ContainerWindow, all: bool) -> Result<()> {
	if window.end < window.start {
		bail!("Window end {} is before start {}", window.end, window.start);
	}

	let catalog = open_catalog(settings)?;
	let registry = open_registry(settings)?;
	let assembler = Assembler::new(&catalog, &registry, settings);

	let records = if all {
		assembler.parse_container(source, window)
	} else {
		assembler.occupied(source, window)
	};
	debug!("Assembled {} records, {} partitions read", records.len(), catalog.partition_reads());
	print_json(&records)
}

/// Handle lookup command
fn handle_lookup(settings: &Settings, id: u32) -> Result<()> {
	let catalog = open_catalog(settings)?;
	let Some(item) = catalog.get(id) else {
		bail!("Item {id} not found");
	};
	print_json(item)
}

/// Handle search command
fn handle_search(settings: &Settings, query: &str, limit: usize) -> Result<()> {
	let catalog = open_catalog(settings)?;
	let items = catalog.search(query, limit);
	if items.is_empty() {
		info!("No items match {query:?}");
	}
	print_json(&items)
}

/// Handle attributes command
fn handle_attributes(settings: &Settings) -> Result<()> {
	let registry = open_registry(settings)?;
	for attribute in registry.iter() {
		println!("{attribute}");
	}
	Ok(())
}

fn main() -> Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	let settings = Settings::load(cli.config.as_deref()).context("loading settings")?;

	match cli.command {
		Commands::Decode { id } => handle_decode(&settings, id),
		Commands::Encode { options, safe } => handle_encode(&options, safe),
		Commands::Container {
			items,
			indexes,
			extensions,
			start,
			end,
			all,
		} => handle_container(
			&settings,
			ContainerSource::new(&items, &indexes, &extensions),
			ContainerWindow::new(start, end),
			all,
		),
		Commands::Lookup { id } => handle_lookup(&settings, id),
		Commands::Search { query, limit } => handle_search(&settings, &query, limit),
		Commands::Attributes => handle_attributes(&settings),
	}
}
