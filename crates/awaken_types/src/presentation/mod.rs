//! Item presentation.
//!
//! Turns parsed slot records into display-ready records by combining them
//! with the item catalog and the attribute registry. Nothing in here fails:
//! unknown items become placeholders, unknown attributes fall back to their
//! raw ids and malformed values are shown as stored.

use std::num::NonZeroUsize;
use std::thread::ScopedJoinHandle;

use serde::Serialize;

use crate::attribute::{AttributeRegistry, ValueFormat};
use crate::catalog::{ItemCatalog, ItemDefinition, ItemKind, StatSlot};
use crate::container::{self, ContainerSource, ContainerWindow, SlotRecord};
use crate::random_option::{self, DecodedOption};
use crate::settings::Settings;

mod inventory;

pub use self::inventory::{CharacterColumns, CharacterInventory};

/// Below this many slots a container is assembled on the calling thread.
const PARALLEL_THRESHOLD: usize = 32;

/// A rendered static stat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatLine {
	/// Attribute name or key
	pub label: String,
	/// Rendered value, e.g. `15` or `3%`
	pub value: String,
}

/// Display-ready view of one slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRecord {
	/// Position within the container window
	pub slot_index: u32,
	/// Item id; `None` for an empty slot
	pub item_id: Option<u32>,
	/// Stack quantity
	pub quantity: u32,
	/// Serial number
	#[serde(skip_serializing_if = "Option::is_none")]
	pub serial_number: Option<u32>,
	/// Enhancement level
	#[serde(skip_serializing_if = "Option::is_none")]
	pub enhancement: Option<u32>,
	/// Element enhancement level
	#[serde(skip_serializing_if = "Option::is_none")]
	pub element_enhancement: Option<u32>,
	/// Item display name
	#[serde(skip_serializing_if = "Option::is_none")]
	pub display_name: Option<String>,
	/// Item description
	#[serde(skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// Fine-grained type tag
	#[serde(rename = "type", skip_serializing_if = "Option::is_none")]
	pub item_type: Option<String>,
	/// Attack or defense range, e.g. `Attack: 10 ~ 20`
	#[serde(skip_serializing_if = "Option::is_none")]
	pub ability_display: Option<String>,
	/// Accessory bonuses at the slot's enhancement level
	#[serde(skip_serializing_if = "Option::is_none")]
	pub accessory_bonus: Option<Vec<String>>,
	/// Safe flag of the random options, when the slot has any
	#[serde(skip_serializing_if = "Option::is_none")]
	pub safe_flag: Option<bool>,
	/// Decoded random options
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub random_options: Vec<DecodedOption>,
	/// Static stats of the item definition
	#[serde(skip_serializing_if = "Vec::is_empty")]
	pub stats: Vec<StatLine>,
	/// Image URL, empty when the item has no image
	#[serde(skip_serializing_if = "Option::is_none")]
	pub image: Option<String>,
	/// The item entry as stored
	#[serde(skip_serializing_if = "Option::is_none")]
	pub raw: Option<String>,
}

impl PresentationRecord {
	/// Record for an empty slot.
	pub fn empty(slot_index: u32) -> Self {
		Self {
			slot_index,
			..Self::default()
		}
	}

	/// Returns true if the slot holds an item.
	pub fn is_occupied(&self) -> bool {
		self.item_id.is_some()
	}
}

/// Builds presentation records from slot records.
#[derive(Debug, Clone, Copy)]
pub struct Assembler<'a> {
	catalog: &'a ItemCatalog,
	registry: &'a AttributeRegistry,
	settings: &'a Settings,
}

impl<'a> Assembler<'a> {
	/// Creates an assembler over explicit catalog, registry and settings handles.
	pub fn new(catalog: &'a ItemCatalog, registry: &'a AttributeRegistry, settings: &'a Settings) -> Self {
		Self {
			catalog,
			registry,
			settings,
		}
	}

	/// Settings in use.
	pub fn settings(&self) -> &'a Settings {
		self.settings
	}

	/// Assembles one slot.
	pub fn assemble(&self, slot: &SlotRecord) -> PresentationRecord {
		let Some(item_id) = slot.item_id else {
			return PresentationRecord::empty(slot.slot_index);
		};

		let item = self.catalog.get_or_placeholder(item_id);

		let mut record = PresentationRecord {
			slot_index: slot.slot_index,
			item_id: Some(item_id),
			quantity: slot.quantity,
			serial_number: Some(slot.serial_number),
			enhancement: Some(slot.enhancement),
			element_enhancement: Some(slot.element_enhancement),
			display_name: item.display_name.clone(),
			description: item.description.clone(),
			item_type: item.item_type.clone(),
			ability_display: ability_display(&item),
			accessory_bonus: self.accessory_bonus(&item, slot.enhancement),
			stats: item.stats().into_iter().filter_map(|stat| self.stat_line(stat)).collect(),
			image: Some(self.image_url(&item, slot.original_item_id)),
			raw: Some(slot.raw.clone()),
			..PresentationRecord::default()
		};

		if let Some(id) = slot.random_option_id.filter(|&id| id != 0) {
			let decoded = random_option::decode(id, self.registry);
			record.safe_flag = Some(decoded.safe_flag);
			record.random_options = decoded.options;
		}

		record
	}

	/// Assembles a single stored item outside any container, e.g. a traded
	/// item or a guild bank history entry.
	pub fn assemble_item(
		&self,
		item_id: u32,
		random_option_id: Option<u64>,
		enhancement: u32,
	) -> PresentationRecord {
		let slot = SlotRecord {
			item_id: Some(item_id).filter(|&id| id != 0),
			quantity: 1,
			serial_number: container::layout::DEFAULT_SERIAL_NUMBER,
			enhancement,
			random_option_id,
			..SlotRecord::default()
		};
		self.assemble(&slot)
	}

	/// Assembles a container, preserving slot order.
	///
	/// Large containers are split across scoped threads.
	pub fn assemble_container(&self, slots: &[SlotRecord]) -> Vec<PresentationRecord> {
		if slots.len() < PARALLEL_THRESHOLD {
			return slots.iter().map(|slot| self.assemble(slot)).collect();
		}

		let workers = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
		let chunk_size = slots.len().div_ceil(workers);

		std::thread::scope(|scope| {
			let handles: Vec<_> = slots
				.chunks(chunk_size)
				.map(|chunk| scope.spawn(move || chunk.iter().map(|slot| self.assemble(slot)).collect::<Vec<_>>()))
				.collect();

			handles.into_iter().flat_map(join).collect()
		})
	}

	/// Parses and assembles a container window. Every logical slot is
	/// returned, empty ones included.
	pub fn parse_container(
		&self,
		source: ContainerSource<'_>,
		window: ContainerWindow,
	) -> Vec<PresentationRecord> {
		let slots = container::parse_container(source, window, &self.settings.parse_options());
		self.assemble_container(&slots)
	}

	/// Occupied slots of a container window.
	pub fn occupied(&self, source: ContainerSource<'_>, window: ContainerWindow) -> Vec<PresentationRecord> {
		let mut records = self.parse_container(source, window);
		records.retain(PresentationRecord::is_occupied);
		records
	}

	/// Occupied slots of a container window, assembled on the calling thread.
	fn occupied_sequential(&self, source: ContainerSource<'_>, window: ContainerWindow) -> Vec<PresentationRecord> {
		container::parse_container(source, window, &self.settings.parse_options())
			.iter()
			.filter(|slot| !slot.is_empty())
			.map(|slot| self.assemble(slot))
			.collect()
	}

	/// Occupied slots holding `item_id` in a container window.
	pub fn find_item(
		&self,
		source: ContainerSource<'_>,
		window: ContainerWindow,
		item_id: u32,
	) -> Vec<PresentationRecord> {
		let slots: Vec<SlotRecord> = container::parse_container(source, window, &self.settings.parse_options())
			.into_iter()
			.filter(|slot| slot.item_id == Some(item_id))
			.collect();
		self.assemble_container(&slots)
	}

	/// Occupied slots of a guild bank.
	pub fn guild_bank(&self, source: ContainerSource<'_>) -> Vec<PresentationRecord> {
		self.occupied(source, self.settings.guild_bank())
	}

	fn image_url(&self, item: &ItemDefinition, original_item_id: Option<u32>) -> String {
		let image = original_item_id
			.and_then(|id| self.catalog.get(id))
			.and_then(|original| original.image.as_deref())
			.filter(|image| !image.is_empty())
			.or(item.image.as_deref())
			.unwrap_or_default();

		if image.is_empty() {
			String::new()
		} else {
			format!("{}{}", self.settings.image_base_url, image.to_lowercase())
		}
	}

	fn accessory_bonus(&self, item: &ItemDefinition, enhancement: u32) -> Option<Vec<String>> {
		let tier = item.accessory_tier(enhancement)?;
		Some(
			tier.bonuses
				.iter()
				.filter_map(|bonus| {
					let value = bonus.value?;
					let label = self
						.registry
						.lookup_key(&bonus.prop)
						.map_or(bonus.prop.as_str(), |attr| attr.label());
					Some(format!("{label}: +{value}"))
				})
				.collect(),
		)
	}

	fn stat_line(&self, stat: &StatSlot) -> Option<StatLine> {
		let prop = stat.prop()?;
		let attribute = self.registry.lookup_key(prop);
		let format = attribute.map_or_else(|| ValueFormat::for_key(prop), |attr| attr.format);

		let raw = stat.value.as_deref().map(str::trim).unwrap_or_default();
		let value = match raw.parse::<i64>() {
			Ok(n) => format.render_stat(n),
			Err(_) => raw.to_string(),
		};

		Some(match attribute {
			Some(attr) => StatLine {
				label: attr.label().to_string(),
				value: attr.with_unit(value),
			},
			None => StatLine {
				label: prop.to_string(),
				value,
			},
		})
	}
}

/// Joins a scoped worker, re-raising its panic on the caller.
fn join<T>(handle: ScopedJoinHandle<'_, T>) -> T {
	match handle.join() {
		Ok(value) => value,
		Err(panic) => std::panic::resume_unwind(panic),
	}
}

fn ability_display(item: &ItemDefinition) -> Option<String> {
	let min = item.ability_min.as_deref().unwrap_or_default();
	let max = item.ability_max.as_deref().unwrap_or_default();
	match item.kind() {
		ItemKind::Weapon => Some(format!("Attack: {min} ~ {max}")),
		ItemKind::Armor => Some(format!("DEF: {min} ~ {max}")),
		ItemKind::Other => None,
	}
}
