//! Range-sharded item catalog.
//!
//! The catalog is a directory of JSON partitions, each an array of item
//! definitions covering one contiguous id range (e.g. `items1_2999.json`).
//! Opening the catalog scans every partition once to record its id range;
//! a partition's items are loaded on the first lookup that falls into its
//! range and kept for the life of the catalog.
//!
//! # Examples
//!
//! ```no_run
//! use awaken_types::catalog::ItemCatalog;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = ItemCatalog::open("data/chunks")?;
//!
//! if let Some(item) = catalog.get(2801) {
//!     println!("{}", item.display_name());
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, error, info, warn};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::CatalogError;

/// Result limit of the item-search endpoint
pub const SEARCH_LIMIT: usize = 5;

/// Display name of the placeholder returned for unknown items
pub const PLACEHOLDER_NAME: &str = "Item not found!";

/// Accepts a string, a number or null.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::String(s) => Some(s),
		serde_json::Value::Number(n) => Some(n.to_string()),
		_ => None,
	})
}

/// Accepts an integer, a numeric string or null.
fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match serde_json::Value::deserialize(deserializer)? {
		serde_json::Value::Number(n) => n.as_i64(),
		serde_json::Value::String(s) => s.trim().parse().ok(),
		_ => None,
	})
}

/// Broad item class, from `itemKind1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
	/// `IK1_WEAPON`
	Weapon,
	/// `IK1_ARMOR`
	Armor,
	/// Anything else
	Other,
}

impl ItemKind {
	/// Classifies an `itemKind1` tag.
	pub fn from_tag(tag: Option<&str>) -> Self {
		match tag.map(str::trim) {
			Some("IK1_WEAPON") => Self::Weapon,
			Some("IK1_ARMOR") => Self::Armor,
			_ => Self::Other,
		}
	}
}

/// One static stat slot of an item definition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSlot {
	/// Attribute key, e.g. `DST_STR`
	#[serde(
		default,
		alias = "stat1Prop",
		alias = "stat2Prop",
		alias = "stat3Prop",
		deserialize_with = "lenient_string"
	)]
	pub prop: Option<String>,
	/// Raw value
	#[serde(
		default,
		alias = "stat1Val",
		alias = "stat2Val",
		alias = "stat3Val",
		deserialize_with = "lenient_string"
	)]
	pub value: Option<String>,
}

impl StatSlot {
	/// Attribute key, if the slot is used.
	pub fn prop(&self) -> Option<&str> {
		self.prop.as_deref().map(str::trim).filter(|p| !p.is_empty() && *p != "=")
	}
}

/// One attribute bonus of an accessory tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryBonus {
	/// Attribute key
	pub prop: String,
	/// Bonus value
	#[serde(default, deserialize_with = "lenient_i64")]
	pub value: Option<i64>,
}

/// Bonuses granted by an accessory at one enhancement level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessoryTier {
	/// Enhancement level
	pub level: u32,
	/// Bonuses at this level
	#[serde(default)]
	pub bonuses: Vec<AccessoryBonus>,
}

/// Static metadata of one item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDefinition {
	/// Numeric id
	pub id: u32,
	/// Symbolic id, e.g. `II_WEA_SWO_WOODEN`
	#[serde(default, rename = "dwID")]
	pub code: Option<String>,
	/// Display name
	#[serde(default)]
	pub display_name: Option<String>,
	/// Description
	#[serde(default)]
	pub description: Option<String>,
	/// Broad class tag, e.g. `IK1_WEAPON`
	#[serde(default)]
	pub item_kind1: Option<String>,
	/// Weapon type tag
	#[serde(default, deserialize_with = "lenient_string")]
	pub weapon_type: Option<String>,
	/// Lower bound of attack or defense
	#[serde(default, deserialize_with = "lenient_string")]
	pub ability_min: Option<String>,
	/// Upper bound of attack or defense
	#[serde(default, deserialize_with = "lenient_string")]
	pub ability_max: Option<String>,
	/// Image file name
	#[serde(default)]
	pub image: Option<String>,
	/// Fine-grained type tag, e.g. `IK3_SWD`
	#[serde(default, rename = "type")]
	pub item_type: Option<String>,
	/// Job restriction tag
	#[serde(default)]
	pub job: Option<String>,
	/// First stat slot
	#[serde(default)]
	pub stat1: StatSlot,
	/// Second stat slot
	#[serde(default)]
	pub stat2: StatSlot,
	/// Third stat slot
	#[serde(default)]
	pub stat3: StatSlot,
	/// Accessory bonus table, by enhancement level
	#[serde(default)]
	pub accessory_bonuses: Option<Vec<AccessoryTier>>,
}

impl ItemDefinition {
	/// Stand-in for an id the catalog does not know.
	pub fn placeholder(id: u32) -> Self {
		Self {
			id,
			display_name: Some(PLACEHOLDER_NAME.to_string()),
			image: Some(String::new()),
			..Self::default()
		}
	}

	/// Display name, or an empty string.
	pub fn display_name(&self) -> &str {
		self.display_name.as_deref().unwrap_or_default()
	}

	/// Broad item class.
	pub fn kind(&self) -> ItemKind {
		ItemKind::from_tag(self.item_kind1.as_deref())
	}

	/// The three stat slots in order.
	pub fn stats(&self) -> [&StatSlot; 3] {
		[&self.stat1, &self.stat2, &self.stat3]
	}

	/// Accessory tier for an enhancement level.
	pub fn accessory_tier(&self, level: u32) -> Option<&AccessoryTier> {
		self.accessory_bonuses.as_ref()?.iter().find(|tier| tier.level == level)
	}

	fn matches(&self, needle: &str) -> bool {
		self.id.to_string().contains(needle)
			|| self.display_name.as_deref().is_some_and(|name| name.to_lowercase().contains(needle))
	}
}

/// Id range of one partition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CatalogShard {
	/// Partition file name
	pub file: String,
	/// Partition path
	pub path: PathBuf,
	/// Lowest id in the partition
	pub min_id: u32,
	/// Highest id in the partition
	pub max_id: u32,
}

impl CatalogShard {
	/// Returns true if `id` lies in `[min_id, max_id]`.
	pub fn contains(&self, id: u32) -> bool {
		(self.min_id..=self.max_id).contains(&id)
	}
}

type ShardItems = BTreeMap<u32, ItemDefinition>;

#[derive(Debug)]
struct ShardCell {
	shard: CatalogShard,
	/// `None` once a load has failed
	items: OnceLock<Option<ShardItems>>,
}

#[derive(Deserialize)]
struct IdProbe {
	#[serde(default)]
	id: Option<u32>,
}

/// Read-only item catalog with lazily loaded partitions.
#[derive(Debug, Default)]
pub struct ItemCatalog {
	cells: Vec<ShardCell>,
	reads: AtomicUsize,
}

impl ItemCatalog {
	/// Indexes every `*.json` partition in `dir`.
	///
	/// Partitions that cannot be read or parsed are logged and left out of
	/// the index.
	///
	/// # Errors
	///
	/// Returns an error if the directory cannot be listed or two partitions
	/// claim overlapping id ranges.
	pub fn open(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
		let dir = dir.as_ref();
		let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::DirectoryUnreadable {
			path: dir.to_path_buf(),
			source,
		})?;

		let mut shards = Vec::new();
		for entry in entries {
			let path = match entry {
				Ok(entry) => entry.path(),
				Err(e) => {
					error!("Cannot list entry in {}: {e}", dir.display());
					continue;
				}
			};
			if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
				continue;
			}

			match Self::index_partition(&path) {
				Ok(Some(shard)) => shards.push(shard),
				Ok(None) => warn!("Catalog partition {} holds no item ids", path.display()),
				Err(e) => error!("Skipping catalog partition: {e}"),
			}
		}

		let catalog = Self::from_shards(shards)?;
		info!("Indexed {} catalog partitions in {}", catalog.cells.len(), dir.display());
		Ok(catalog)
	}

	/// Builds a catalog from known shard ranges.
	///
	/// # Errors
	///
	/// Returns an error if two shards overlap.
	pub fn from_shards(mut shards: Vec<CatalogShard>) -> Result<Self, CatalogError> {
		shards.sort_by_key(|shard| (shard.min_id, shard.max_id));

		for pair in shards.windows(2) {
			let (a, b) = (&pair[0], &pair[1]);
			if b.min_id <= a.max_id {
				return Err(CatalogError::OverlappingShards {
					first: a.file.clone(),
					first_min: a.min_id,
					first_max: a.max_id,
					second: b.file.clone(),
					second_min: b.min_id,
					second_max: b.max_id,
				});
			}
		}

		Ok(Self {
			cells: shards
				.into_iter()
				.map(|shard| ShardCell {
					shard,
					items: OnceLock::new(),
				})
				.collect(),
			reads: AtomicUsize::new(0),
		})
	}

	/// Reads one partition and computes its id range.
	fn index_partition(path: &Path) -> Result<Option<CatalogShard>, CatalogError> {
		let content = std::fs::read_to_string(path).map_err(|source| CatalogError::PartitionUnreadable {
			path: path.to_path_buf(),
			source,
		})?;
		let probes: Vec<IdProbe> =
			serde_json::from_str(&content).map_err(|source| CatalogError::PartitionMalformed {
				path: path.to_path_buf(),
				source,
			})?;

		let mut ids = probes.iter().filter_map(|probe| probe.id);
		let Some(first) = ids.next() else {
			return Ok(None);
		};
		let (min_id, max_id) = ids.fold((first, first), |(lo, hi), id| (lo.min(id), hi.max(id)));

		let file = path
			.file_name()
			.map(|name| name.to_string_lossy().into_owned())
			.unwrap_or_default();
		debug!("Partition {file}: ids {min_id}..={max_id}");

		Ok(Some(CatalogShard {
			file,
			path: path.to_path_buf(),
			min_id,
			max_id,
		}))
	}

	/// Reads and parses a partition's items.
	fn load_partition(&self, shard: &CatalogShard) -> Result<ShardItems, CatalogError> {
		self.reads.fetch_add(1, Ordering::Relaxed);

		let content =
			std::fs::read_to_string(&shard.path).map_err(|source| CatalogError::PartitionUnreadable {
				path: shard.path.clone(),
				source,
			})?;
		let records: Vec<serde_json::Value> =
			serde_json::from_str(&content).map_err(|source| CatalogError::PartitionMalformed {
				path: shard.path.clone(),
				source,
			})?;

		let mut map = ShardItems::new();
		for (position, record) in records.into_iter().enumerate() {
			match serde_json::from_value::<ItemDefinition>(record) {
				Ok(item) => {
					map.entry(item.id).or_insert(item);
				}
				Err(e) => warn!("Skipping record #{position} of {}: {e}", shard.file),
			}
		}
		debug!("Loaded {} items from {}", map.len(), shard.file);
		Ok(map)
	}

	fn cell_for(&self, id: u32) -> Option<&ShardCell> {
		let index = self.cells.partition_point(|cell| cell.shard.max_id < id);
		self.cells.get(index).filter(|cell| cell.shard.contains(id))
	}

	/// Items of a shard, loading them on first use.
	fn items<'c>(&self, cell: &'c ShardCell) -> Option<&'c ShardItems> {
		cell.items
			.get_or_init(|| match self.load_partition(&cell.shard) {
				Ok(items) => Some(items),
				Err(e) => {
					error!("Catalog partition unavailable: {e}");
					None
				}
			})
			.as_ref()
	}

	/// The shard whose range contains `id`.
	pub fn shard_for(&self, id: u32) -> Option<&CatalogShard> {
		self.cell_for(id).map(|cell| &cell.shard)
	}

	/// All shards, ordered by id range.
	pub fn shards(&self) -> impl Iterator<Item = &CatalogShard> {
		self.cells.iter().map(|cell| &cell.shard)
	}

	/// Looks up an item by id.
	pub fn get(&self, id: u32) -> Option<&ItemDefinition> {
		let cell = self.cell_for(id)?;
		self.items(cell)?.get(&id)
	}

	/// Looks up an item, substituting a placeholder when it is unknown.
	pub fn get_or_placeholder(&self, id: u32) -> std::borrow::Cow<'_, ItemDefinition> {
		match self.get(id) {
			Some(item) => std::borrow::Cow::Borrowed(item),
			None => {
				warn!("Item {id} not found in catalog");
				std::borrow::Cow::Owned(ItemDefinition::placeholder(id))
			}
		}
	}

	/// Items whose id or display name contains `query` (case-insensitive),
	/// in id order, at most `limit` of them.
	pub fn search(&self, query: &str, limit: usize) -> Vec<&ItemDefinition> {
		let needle = query.trim().to_lowercase();
		if needle.is_empty() || limit == 0 {
			return Vec::new();
		}

		let mut found = Vec::with_capacity(limit);
		for cell in &self.cells {
			let Some(items) = self.items(cell) else {
				continue;
			};
			for item in items.values().filter(|item| item.matches(&needle)) {
				found.push(item);
				if found.len() == limit {
					return found;
				}
			}
		}
		found
	}

	/// Number of shards whose items are in memory.
	pub fn loaded_shards(&self) -> usize {
		self.cells
			.iter()
			.filter(|cell| matches!(cell.items.get(), Some(Some(_))))
			.count()
	}

	/// Number of partition reads performed since the catalog was opened.
	pub fn partition_reads(&self) -> usize {
		self.reads.load(Ordering::Relaxed)
	}
}
