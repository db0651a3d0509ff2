//! Runtime settings.
//!
//! Settings are layered with the `config` crate: built-in defaults, then an
//! optional TOML file, then `AWAKEN_*` environment variables.
//!
//! ```toml
//! image_base_url = "https://cdn.example.org/items/"
//! catalog_dir = "data/chunks"
//! attributes_path = "data/attributes.json"
//! inventory_size = 42
//! equipment_end = 80
//! pocket_sizes = [8, 24, 24]
//! extension_pairing = "filtered"
//! ```

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};

use crate::container::{ContainerWindow, ExtensionPairing, ParseOptions, layout};
use crate::error::SettingsError;

/// Prefix of environment variable overrides
pub const ENV_PREFIX: &str = "AWAKEN";

/// Settings read once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Prefix prepended to lower-cased image file names
	pub image_base_url: String,
	/// Directory holding the catalog partitions
	pub catalog_dir: PathBuf,
	/// Attribute dataset
	pub attributes_path: PathBuf,
	/// Inventory slots; the inventory is `[0, inventory_size)`
	pub inventory_size: usize,
	/// End of the equipment window `[inventory_size, equipment_end)`
	pub equipment_end: usize,
	/// Bank slots
	pub bank_size: usize,
	/// Guild bank slots
	pub guild_bank_size: usize,
	/// Slot count of each pocket
	pub pocket_sizes: Vec<usize>,
	/// Expected field count of an extension entry
	pub extension_fields: usize,
	/// Extension pairing strategy
	pub extension_pairing: ExtensionPairing,
	/// Read the original item id and use it for images
	pub model_override: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			image_base_url: "http://localhost:5173/".to_string(),
			catalog_dir: PathBuf::from("data/chunks"),
			attributes_path: PathBuf::from("data/attributes.json"),
			inventory_size: 42,
			equipment_end: 80,
			bank_size: 42,
			guild_bank_size: 120,
			pocket_sizes: vec![8, 24, 24],
			extension_fields: layout::EXT_FIELD_COUNT,
			extension_pairing: ExtensionPairing::Filtered,
			model_override: false,
		}
	}
}

impl Settings {
	/// Loads defaults, the optional file and environment overrides.
	pub fn load(file: Option<&Path>) -> Result<Self, SettingsError> {
		Self::layered(file, None)
	}

	/// Layers defaults, the optional file and `AWAKEN_*` variables, read
	/// from `env` when given instead of the process environment.
	fn layered(file: Option<&Path>, env: Option<Map<String, String>>) -> Result<Self, SettingsError> {
		let mut builder = Config::builder().add_source(Config::try_from(&Self::default())?);
		if let Some(path) = file {
			builder = builder.add_source(File::from(path).format(FileFormat::Toml).required(false));
		}
		let builder = builder.add_source(
			Environment::with_prefix(ENV_PREFIX)
				.try_parsing(true)
				.list_separator(",")
				.with_list_parse_key("pocket_sizes")
				.source(env),
		);

		let settings: Self = builder.build()?.try_deserialize()?;
		settings.validate()
	}

	/// Loads defaults overlaid with a TOML document.
	pub fn from_toml_str(toml: &str) -> Result<Self, SettingsError> {
		let settings: Self = Config::builder()
			.add_source(Config::try_from(&Self::default())?)
			.add_source(File::from_str(toml, FileFormat::Toml))
			.build()?
			.try_deserialize()?;
		settings.validate()
	}

	fn validate(self) -> Result<Self, SettingsError> {
		if self.equipment_end < self.inventory_size {
			return Err(SettingsError::InvalidWindow {
				name: "equipment",
				start: self.inventory_size,
				end: self.equipment_end,
			});
		}
		Ok(self)
	}

	/// Inventory window.
	pub fn inventory(&self) -> ContainerWindow {
		ContainerWindow::new(0, self.inventory_size)
	}

	/// Equipment window, directly after the inventory.
	pub fn equipment(&self) -> ContainerWindow {
		ContainerWindow::new(self.inventory_size, self.equipment_end)
	}

	/// Inventory and equipment together.
	pub fn carried(&self) -> ContainerWindow {
		ContainerWindow::new(0, self.equipment_end)
	}

	/// Bank window.
	pub fn bank(&self) -> ContainerWindow {
		ContainerWindow::new(0, self.bank_size)
	}

	/// Guild bank window.
	pub fn guild_bank(&self) -> ContainerWindow {
		ContainerWindow::new(0, self.guild_bank_size)
	}

	/// Window of pocket `index`, if configured.
	pub fn pocket(&self, index: usize) -> Option<ContainerWindow> {
		self.pocket_sizes.get(index).map(|&size| ContainerWindow::new(0, size))
	}

	/// Container parsing options.
	pub fn parse_options(&self) -> ParseOptions {
		ParseOptions {
			extension_fields: self.extension_fields,
			pairing: self.extension_pairing,
			model_override: self.model_override,
		}
	}
}
