//! Error types for the attribute registry, option codec, catalog and settings.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading or querying the attribute registry
#[derive(Debug, Error)]
pub enum AttributeError {
	/// The dataset could not be read
	#[error("Cannot read attribute dataset {path}: {source}")]
	Unreadable {
		/// Path of the dataset
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// The dataset is not valid JSON or has the wrong shape
	#[error("Malformed attribute dataset: {0}")]
	Malformed(#[from] serde_json::Error),

	/// An attribute id is not numeric
	#[error("Attribute {key} has a non-numeric id {raw:?}")]
	InvalidId {
		/// Attribute key
		key: String,
		/// Raw id as found in the dataset
		raw: String,
	},

	/// Two attributes share the same id
	#[error("Duplicate attribute id {id}: {first} and {second}")]
	DuplicateId {
		/// Shared id
		id: u32,
		/// Key registered first
		first: String,
		/// Key that collided
		second: String,
	},

	/// Two attributes share the same key
	#[error("Duplicate attribute key {key}: ids {first} and {second}")]
	DuplicateKey {
		/// Shared key
		key: String,
		/// Id registered first
		first: u32,
		/// Id that collided
		second: u32,
	},

	/// No attribute with this id
	#[error("Unknown attribute id {0}")]
	UnknownId(u32),
}

/// Errors that can occur while decoding a packed random option
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
	/// The slot references an attribute the registry does not know
	#[error("Option slot {slot} references unknown attribute {dst} (raw slot value 0x{value:05X})")]
	UnknownAttribute {
		/// Zero-based slot position
		slot: usize,
		/// Attribute id found in the slot
		dst: u32,
		/// Raw 18-bit slot value
		value: u32,
	},
}

/// Errors that can occur when indexing or loading the item catalog
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The partition directory could not be listed
	#[error("Cannot read catalog directory {path}: {source}")]
	DirectoryUnreadable {
		/// Catalog directory
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// A partition file could not be read
	#[error("Cannot read catalog partition {path}: {source}")]
	PartitionUnreadable {
		/// Partition file
		path: PathBuf,
		/// Underlying IO error
		#[source]
		source: std::io::Error,
	},

	/// A partition file is not a JSON array of items
	#[error("Malformed catalog partition {path}: {source}")]
	PartitionMalformed {
		/// Partition file
		path: PathBuf,
		/// Underlying JSON error
		#[source]
		source: serde_json::Error,
	},

	/// Two partitions claim overlapping id ranges
	#[error("Catalog partitions {first} [{first_min}, {first_max}] and {second} [{second_min}, {second_max}] overlap")]
	OverlappingShards {
		/// First partition file name
		first: String,
		/// Lowest id of the first partition
		first_min: u32,
		/// Highest id of the first partition
		first_max: u32,
		/// Second partition file name
		second: String,
		/// Lowest id of the second partition
		second_min: u32,
		/// Highest id of the second partition
		second_max: u32,
	},
}

/// Errors that can occur when loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Layering or deserialization failed
	#[error(transparent)]
	Config(#[from] config::ConfigError),

	/// A container window has its end before its start
	#[error("Invalid {name} window: end {end} is before start {start}")]
	InvalidWindow {
		/// Window name
		name: &'static str,
		/// First slot index
		start: usize,
		/// One past the last slot index
		end: usize,
	},
}
