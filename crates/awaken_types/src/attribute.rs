//! Attribute registry.
//!
//! Maps the numeric attribute id (`dst`) used by packed random options and
//! item stat slots to its key, display name and unit. The dataset is produced
//! offline from the game's attribute header and looks like:
//!
//! ```json
//! {
//!   "DST_STR": { "id": "1", "key": "DST_STR", "name": "STR", "isPercentage": false },
//!   "DST_ATTACKSPEED": { "id": 36, "key": "DST_ATTACKSPEED", "name": "Attack Speed", "isPercentage": true }
//! }
//! ```
//!
//! Ids may be numbers or numeric strings. `name` may be `null`, in which case
//! the key is used as the label.

use std::collections::{BTreeMap, HashMap, btree_map::Entry};
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::AttributeError;

/// How values of an attribute are rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ValueFormat {
	/// Plain signed value
	#[default]
	Standard,
	/// Stored in twentieths; rendered divided by 20
	AttackSpeed,
}

/// Attribute keys whose values do not follow the standard rendering.
const FORMAT_OVERRIDES: &[(&str, ValueFormat)] = &[("DST_ATTACKSPEED", ValueFormat::AttackSpeed)];

/// Baseline of the 10-bit adjustment field.
const AWAKE_BASELINE: i32 = 512;

impl ValueFormat {
	/// Returns the formatting strategy for an attribute key.
	pub fn for_key(key: &str) -> Self {
		FORMAT_OVERRIDES
			.iter()
			.find(|(k, _)| *k == key)
			.map_or(Self::Standard, |(_, format)| *format)
	}

	/// Renders a random-option adjustment from its raw 10-bit value.
	///
	/// With `adj = 512 - adj_raw`:
	/// - standard: `+adj` when `adj >= 1`, otherwise `adj_raw`
	/// - attack speed: `+floor(adj_raw / 20)` when `adj >= 1`, otherwise
	///   `-floor((adj_raw - 512) / 20)`
	pub fn render_adjustment(self, adj_raw: u16) -> String {
		let raw = i32::from(adj_raw);
		let adj = AWAKE_BASELINE - raw;
		match self {
			Self::Standard if adj >= 1 => format!("+{adj}"),
			Self::Standard => raw.to_string(),
			Self::AttackSpeed if adj >= 1 => format!("+{}", raw.div_euclid(20)),
			Self::AttackSpeed => (-(raw - AWAKE_BASELINE).div_euclid(20)).to_string(),
		}
	}

	/// Renders a static stat value from an item definition.
	pub fn render_stat(self, value: i64) -> String {
		match self {
			Self::Standard => value.to_string(),
			Self::AttackSpeed => value.div_euclid(20).to_string(),
		}
	}
}

/// A single attribute definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDefinition {
	/// Numeric id (`dst`)
	pub id: u32,
	/// Symbolic key, e.g. `DST_STR`
	pub key: String,
	/// Display name, if the dataset has one
	pub name: Option<String>,
	/// Whether values carry a `%` suffix
	pub is_percentage: bool,
	/// Rendering strategy derived from the key
	#[serde(skip)]
	pub format: ValueFormat,
}

impl AttributeDefinition {
	/// Creates a definition, deriving its formatting strategy from the key.
	pub fn new(id: u32, key: impl Into<String>, name: Option<String>, is_percentage: bool) -> Self {
		let key = key.into();
		let format = ValueFormat::for_key(&key);
		Self {
			id,
			key,
			name,
			is_percentage,
			format,
		}
	}

	/// Display name, falling back to the key.
	pub fn label(&self) -> &str {
		self.name.as_deref().unwrap_or(&self.key)
	}

	/// Appends the unit suffix to an already rendered value.
	pub fn with_unit(&self, value: String) -> String {
		if self.is_percentage {
			format!("{value}%")
		} else {
			value
		}
	}
}

impl std::fmt::Display for AttributeDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} ({}): {}", self.id, self.key, self.label())
	}
}

#[derive(Deserialize)]
struct RawAttribute {
	id: serde_json::Value,
	#[serde(default)]
	key: Option<String>,
	#[serde(default)]
	name: Option<String>,
	#[serde(default, rename = "isPercentage")]
	is_percentage: Option<bool>,
}

/// Read-only registry of attribute definitions, keyed by id and by key.
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
	by_id: BTreeMap<u32, AttributeDefinition>,
	by_key: HashMap<String, u32>,
}

impl AttributeRegistry {
	/// Loads the registry from a JSON dataset on disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self, AttributeError> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path).map_err(|source| AttributeError::Unreadable {
			path: path.to_path_buf(),
			source,
		})?;
		let registry = Self::from_json_str(&content)?;
		info!("Loaded {} attributes from {}", registry.len(), path.display());
		Ok(registry)
	}

	/// Parses the registry from a JSON dataset.
	pub fn from_json_str(json: &str) -> Result<Self, AttributeError> {
		let raw: BTreeMap<String, RawAttribute> = serde_json::from_str(json)?;

		let mut definitions = Vec::with_capacity(raw.len());
		for (map_key, attr) in raw {
			let key = attr.key.unwrap_or(map_key);
			let id = parse_id(&attr.id).ok_or_else(|| AttributeError::InvalidId {
				key: key.clone(),
				raw: attr.id.to_string(),
			})?;
			let name = attr.name.filter(|n| !n.is_empty());
			definitions.push(AttributeDefinition::new(id, key, name, attr.is_percentage.unwrap_or(false)));
		}

		Self::from_definitions(definitions)
	}

	/// Builds the registry from already constructed definitions.
	pub fn from_definitions(
		definitions: impl IntoIterator<Item = AttributeDefinition>,
	) -> Result<Self, AttributeError> {
		let mut registry = Self::default();
		for definition in definitions {
			match registry.by_id.entry(definition.id) {
				Entry::Occupied(existing) => {
					return Err(AttributeError::DuplicateId {
						id: definition.id,
						first: existing.get().key.clone(),
						second: definition.key,
					});
				}
				Entry::Vacant(slot) => {
					if let Some(&first) = registry.by_key.get(&definition.key) {
						return Err(AttributeError::DuplicateKey {
							key: definition.key,
							first,
							second: definition.id,
						});
					}
					registry.by_key.insert(definition.key.clone(), definition.id);
					slot.insert(definition);
				}
			}
		}
		Ok(registry)
	}

	/// Looks up an attribute by id.
	pub fn lookup(&self, dst: u32) -> Result<&AttributeDefinition, AttributeError> {
		self.by_id.get(&dst).ok_or(AttributeError::UnknownId(dst))
	}

	/// Looks up an attribute by key, e.g. `DST_STR`.
	pub fn lookup_key(&self, key: &str) -> Option<&AttributeDefinition> {
		self.by_key.get(key).and_then(|id| self.by_id.get(id))
	}

	/// Label for an id, if known.
	pub fn label(&self, dst: u32) -> Option<&str> {
		self.by_id.get(&dst).map(AttributeDefinition::label)
	}

	/// Iterates over all definitions in id order.
	pub fn iter(&self) -> impl Iterator<Item = &AttributeDefinition> {
		self.by_id.values()
	}

	/// Number of definitions.
	pub fn len(&self) -> usize {
		self.by_id.len()
	}

	/// Returns true if the registry holds no definitions.
	pub fn is_empty(&self) -> bool {
		self.by_id.is_empty()
	}
}

fn parse_id(value: &serde_json::Value) -> Option<u32> {
	match value {
		serde_json::Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
		serde_json::Value::String(s) => s.trim().parse().ok(),
		_ => None,
	}
}
