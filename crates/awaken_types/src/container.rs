//! Slot container codec.
//!
//! The game server stores every container (inventory, equipment, bank,
//! guild bank, pockets) as three parallel text columns:
//!
//! - **items**: `/`-separated entries, each a `,`-separated record whose
//!   field 0 is the storage slot index (see [`layout`])
//! - **indexes**: `/`-separated logical slot sequence; a container is a
//!   window `[start, end)` over it
//! - **extensions**: `/`-separated per-entry metadata; field 2 carries the
//!   packed random-option id
//!
//! Malformed entries never fail the whole container: they decode as empty
//! slots or are dropped.

use log::debug;
use serde::{Deserialize, Serialize};

/// Legacy field positions of the packed strings.
pub mod layout {
	/// Separator between entries
	pub const ENTRY_DELIMITER: char = '/';
	/// Separator between fields of one entry
	pub const FIELD_DELIMITER: char = ',';

	/// Item entry: storage slot index
	pub const ITEM_SLOT_INDEX: usize = 0;
	/// Item entry: item id (absent or zero for an empty slot)
	pub const ITEM_ID: usize = 1;
	/// Item entry: stack quantity
	pub const ITEM_QUANTITY: usize = 5;
	/// Item entry: serial number
	pub const ITEM_SERIAL_NUMBER: usize = 11;
	/// Item entry: enhancement level
	pub const ITEM_ENHANCEMENT: usize = 12;
	/// Item entry: element enhancement level
	pub const ITEM_ELEMENT_ENHANCEMENT: usize = 14;
	/// Item entry: original item id, used by the model override
	pub const ITEM_ORIGINAL_ID: usize = 17;

	/// Extension entry: packed random-option id
	pub const EXT_RANDOM_OPTION: usize = 2;
	/// Default number of fields in a well-formed extension entry
	pub const EXT_FIELD_COUNT: usize = 4;

	/// Serial number assumed when the field is missing
	pub const DEFAULT_SERIAL_NUMBER: u32 = 1;
}

/// How extension entries are paired with item entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionPairing {
	/// Drop extension entries with the wrong field count, then pair by
	/// position. A dropped entry shifts every later pairing; this matches
	/// what the game's web tools have always shown.
	#[default]
	Filtered,
	/// Pair by position in the unfiltered list, then discard the pairing if
	/// the extension entry has the wrong field count.
	Aligned,
}

/// Options controlling [`parse_container`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
	/// Expected field count of an extension entry
	pub extension_fields: usize,
	/// Pairing strategy
	pub pairing: ExtensionPairing,
	/// Whether to read the original item id field
	pub model_override: bool,
}

impl Default for ParseOptions {
	fn default() -> Self {
		Self {
			extension_fields: layout::EXT_FIELD_COUNT,
			pairing: ExtensionPairing::Filtered,
			model_override: false,
		}
	}
}

/// The three raw columns describing one container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContainerSource<'a> {
	/// Item entries
	pub items: &'a str,
	/// Logical slot sequence
	pub indexes: &'a str,
	/// Extension entries
	pub extensions: &'a str,
}

impl<'a> ContainerSource<'a> {
	/// Bundles the three columns.
	pub fn new(items: &'a str, indexes: &'a str, extensions: &'a str) -> Self {
		Self {
			items,
			indexes,
			extensions,
		}
	}
}

/// Half-open window `[start, end)` over the logical slot sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerWindow {
	/// First logical slot
	pub start: usize,
	/// One past the last logical slot
	pub end: usize,
}

impl ContainerWindow {
	/// Creates a window.
	pub const fn new(start: usize, end: usize) -> Self {
		Self { start, end }
	}

	/// Number of slots in the window.
	pub const fn len(&self) -> usize {
		self.end.saturating_sub(self.start)
	}

	/// Returns true if the window holds no slots.
	pub const fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// One parsed item entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotEntry<'a> {
	/// Storage slot index, kept as text for matching against the index list
	pub slot_index: &'a str,
	/// Item id; `None` for an empty slot
	pub item_id: Option<u32>,
	/// Stack quantity
	pub quantity: u32,
	/// Serial number
	pub serial_number: u32,
	/// Enhancement level
	pub enhancement: u32,
	/// Element enhancement level
	pub element_enhancement: u32,
	/// Original item id (model override only)
	pub original_item_id: Option<u32>,
	/// The entry as stored
	pub raw: &'a str,
}

impl<'a> SlotEntry<'a> {
	/// Parses one item entry. Non-numeric fields fall back to their defaults.
	pub fn parse(raw: &'a str, model_override: bool) -> Self {
		let fields: Vec<&str> = raw.split(layout::FIELD_DELIMITER).collect();
		let number = |index: usize| fields.get(index).and_then(|f| f.trim().parse::<u32>().ok());

		Self {
			slot_index: fields.get(layout::ITEM_SLOT_INDEX).map_or("", |f| f.trim()),
			item_id: number(layout::ITEM_ID).filter(|&id| id != 0),
			quantity: number(layout::ITEM_QUANTITY).unwrap_or(0),
			serial_number: number(layout::ITEM_SERIAL_NUMBER).unwrap_or(layout::DEFAULT_SERIAL_NUMBER),
			enhancement: number(layout::ITEM_ENHANCEMENT).unwrap_or(0),
			element_enhancement: number(layout::ITEM_ELEMENT_ENHANCEMENT).unwrap_or(0),
			original_item_id: if model_override {
				number(layout::ITEM_ORIGINAL_ID).filter(|&id| id != 0)
			} else {
				None
			},
			raw,
		}
	}
}

/// One parsed extension entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionEntry {
	/// Number of fields in the entry
	pub field_count: usize,
	/// Packed random-option id, if numeric
	pub random_option_id: Option<u64>,
}

impl ExtensionEntry {
	/// Parses one extension entry.
	pub fn parse(raw: &str) -> Self {
		let fields: Vec<&str> = raw.split(layout::FIELD_DELIMITER).collect();
		Self {
			field_count: fields.len(),
			random_option_id: fields
				.get(layout::EXT_RANDOM_OPTION)
				.and_then(|f| f.trim().parse::<u64>().ok()),
		}
	}
}

/// One logical slot of a container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlotRecord {
	/// Position within the requested window
	pub slot_index: u32,
	/// Item id; `None` for an empty slot
	pub item_id: Option<u32>,
	/// Stack quantity
	pub quantity: u32,
	/// Serial number
	pub serial_number: u32,
	/// Enhancement level
	pub enhancement: u32,
	/// Element enhancement level
	pub element_enhancement: u32,
	/// Original item id (model override only)
	pub original_item_id: Option<u32>,
	/// Packed random-option id
	pub random_option_id: Option<u64>,
	/// The item entry as stored
	pub raw: String,
}

impl SlotRecord {
	/// An empty slot at `slot_index`.
	pub fn empty(slot_index: u32) -> Self {
		Self {
			slot_index,
			..Self::default()
		}
	}

	/// Returns true if the slot holds no item.
	pub fn is_empty(&self) -> bool {
		self.item_id.is_none()
	}
}

/// Parses the extension column into one optional entry per position.
fn parse_extensions(extensions: &str, options: &ParseOptions) -> Vec<Option<ExtensionEntry>> {
	let entries = extensions.split(layout::ENTRY_DELIMITER).map(ExtensionEntry::parse);

	match options.pairing {
		ExtensionPairing::Filtered => entries
			.enumerate()
			.filter(|(position, entry)| {
				let keep = entry.field_count == options.extension_fields;
				if !keep {
					debug!(
						"Dropping extension entry #{position} with {} fields (expected {})",
						entry.field_count, options.extension_fields
					);
				}
				keep
			})
			.map(|(_, entry)| Some(entry))
			.collect(),
		ExtensionPairing::Aligned => entries
			.map(|entry| Some(entry).filter(|e| e.field_count == options.extension_fields))
			.collect(),
	}
}

/// Parses a container window into slot records, one per logical slot.
///
/// For every logical slot in `indexes[start..end)` the item entry with the
/// same slot index is looked up; its extension entry is the one at the item
/// entry's position (see [`ExtensionPairing`]). Slots without an item entry
/// are returned empty. Window bounds past the index list are clamped.
pub fn parse_container(
	source: ContainerSource<'_>,
	window: ContainerWindow,
	options: &ParseOptions,
) -> Vec<SlotRecord> {
	let extensions = parse_extensions(source.extensions, options);

	let items: Vec<Option<SlotEntry<'_>>> = source
		.items
		.split(layout::ENTRY_DELIMITER)
		.map(|raw| (!raw.is_empty()).then(|| SlotEntry::parse(raw, options.model_override)))
		.collect();

	source
		.indexes
		.split(layout::ENTRY_DELIMITER)
		.skip(window.start)
		.take(window.len())
		.enumerate()
		.map(|(position, logical)| {
			let slot_index = position as u32;
			let logical = logical.trim();

			let found = items
				.iter()
				.enumerate()
				.find_map(|(item_position, entry)| match entry {
					Some(entry) if entry.slot_index == logical => Some((item_position, entry)),
					_ => None,
				});

			let Some((item_position, entry)) = found else {
				return SlotRecord::empty(slot_index);
			};

			let random_option_id = extensions
				.get(item_position)
				.copied()
				.flatten()
				.and_then(|ext| ext.random_option_id);

			SlotRecord {
				slot_index,
				item_id: entry.item_id,
				quantity: entry.quantity,
				serial_number: entry.serial_number,
				enhancement: entry.enhancement,
				element_enhancement: entry.element_enhancement,
				original_item_id: entry.original_item_id,
				random_option_id,
				raw: entry.raw.to_string(),
			}
		})
		.collect()
}
