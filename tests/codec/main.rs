//! End-to-end codec tests for `awaken-rs` against the fixtures in `tests/data`

use std::path::{Path, PathBuf};

use awaken_rs::prelude::*;

mod catalog;
mod inventory;
mod random_option;

fn data_dir() -> PathBuf {
	Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("data")
}

fn registry() -> AttributeRegistry {
	AttributeRegistry::open(data_dir().join("attributes.json")).unwrap()
}

fn catalog() -> ItemCatalog {
	ItemCatalog::open(data_dir().join("chunks")).unwrap()
}

fn settings() -> Settings {
	Settings {
		image_base_url: "https://img.example.org/items/".to_string(),
		catalog_dir: data_dir().join("chunks"),
		attributes_path: data_dir().join("attributes.json"),
		..Settings::default()
	}
}
