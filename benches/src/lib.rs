//! Benchmark helper utilities for awaken-rs
//!
//! This module provides generators for synthetic container columns and packed
//! random-option ids, and a scratch catalog on disk.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use awaken_types::random_option::{self, RandomOption};

/// Item ids used by the synthetic catalog, one shard per thousand
pub const CATALOG_ITEMS: u32 = 10_000;

/// Generates the three columns of a container with `slots` occupied entries
///
/// Storage order is reversed relative to the logical order so that every
/// lookup walks the item list. Every other entry carries a random option.
pub fn generate_container(slots: usize) -> (String, String, String) {
	let mut items = String::new();
	let mut indexes = String::new();
	let mut extensions = String::new();

	for slot in (0..slots).rev() {
		let item_id = (slot as u32 * 37) % CATALOG_ITEMS + 1;
		let _ = write!(items, "{slot},{item_id},,,,1,,,,,,1,{},,0/", slot % 10);
		let option = if slot % 2 == 0 { generate_option_id(slot as u64) } else { 0 };
		let _ = write!(extensions, "0,0,{option},0/");
	}
	for slot in 0..slots {
		let _ = write!(indexes, "{slot}/");
	}

	(items, indexes, extensions)
}

/// Generates a packed id with one to three options derived from `seed`
pub fn generate_option_id(seed: u64) -> u64 {
	let count = (seed % 3 + 1) as usize;
	let options: Vec<RandomOption> = (0..count)
		.map(|i| {
			let dst = ((seed + i as u64 * 7) % 60 + 1) as u32;
			let adj_raw = ((seed * 31 + i as u64) % 1023 + 1) as u16;
			RandomOption::new(dst, adj_raw)
		})
		.collect();
	random_option::pack(&options, false)
}

/// Attribute dataset covering every `dst` produced by [`generate_option_id`]
pub fn generate_attributes() -> String {
	let entries: Vec<String> = (1..=60)
		.map(|id| {
			format!(
				r#""DST_{id}": {{ "id": {id}, "key": "DST_{id}", "name": "Attribute {id}", "isPercentage": {} }}"#,
				id % 4 == 0
			)
		})
		.collect();
	format!("{{{}}}", entries.join(","))
}

/// Writes a catalog of [`CATALOG_ITEMS`] items split into shards of 1000 ids
pub fn write_catalog(dir: &Path) -> std::io::Result<PathBuf> {
	let chunks = dir.join("chunks");
	std::fs::create_dir_all(&chunks)?;

	for shard in 0..CATALOG_ITEMS / 1000 {
		let first = shard * 1000 + 1;
		let last = first + 999;
		let items: Vec<String> = (first..=last)
			.map(|id| {
				format!(
					r#"{{"id": {id}, "displayName": "Item {id}", "itemKind1": "IK1_WEAPON", "abilityMin": "{id}", "abilityMax": "{}", "image": "Item{id}.PNG", "stat1": {{"stat1Prop": "DST_{}", "stat1Val": "{}"}}}}"#,
					id + 5,
					id % 60 + 1,
					id % 100
				)
			})
			.collect();
		std::fs::write(chunks.join(format!("items{first}_{last}.json")), format!("[{}]", items.join(",")))?;
	}

	Ok(chunks)
}
