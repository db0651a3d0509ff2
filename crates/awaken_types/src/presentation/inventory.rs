//! Whole-character inventory assembly.

use serde::Serialize;

use super::{Assembler, PresentationRecord, join};
use crate::container::{ContainerSource, ContainerWindow};

/// Raw columns of one character's containers.
#[derive(Debug, Clone, Default)]
pub struct CharacterColumns<'a> {
	/// Character name
	pub name: &'a str,
	/// Inventory columns; the equipment shares them
	pub inventory: ContainerSource<'a>,
	/// Bank columns, if requested
	pub bank: Option<ContainerSource<'a>>,
	/// Pocket columns by pocket number, if requested
	pub pockets: Vec<Option<ContainerSource<'a>>>,
}

/// Occupied slots of every container of a character.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterInventory {
	/// Character name
	pub name: String,
	/// Inventory items
	pub inventory: Vec<PresentationRecord>,
	/// Equipped items
	pub equipment: Vec<PresentationRecord>,
	/// Bank items
	pub bank: Vec<PresentationRecord>,
	/// Pocket items, one list per configured pocket
	pub pockets: Vec<Vec<PresentationRecord>>,
}

impl Assembler<'_> {
	/// Assembles every container of a character, each on its own thread.
	/// Slots within a container are assembled sequentially.
	pub fn character_inventory(&self, columns: &CharacterColumns<'_>) -> CharacterInventory {
		let settings = self.settings();
		let occupied = |source: Option<ContainerSource<'_>>, window: Option<ContainerWindow>| match (source, window) {
			(Some(source), Some(window)) => self.occupied_sequential(source, window),
			_ => Vec::new(),
		};
		let occupied = &occupied;

		std::thread::scope(|scope| {
			let inventory = scope.spawn(|| occupied(Some(columns.inventory), Some(settings.inventory())));
			let equipment = scope.spawn(|| occupied(Some(columns.inventory), Some(settings.equipment())));
			let bank = scope.spawn(|| occupied(columns.bank, Some(settings.bank())));
			let pockets: Vec<_> = (0..settings.pocket_sizes.len())
				.map(|index| {
					let source = columns.pockets.get(index).copied().flatten();
					scope.spawn(move || occupied(source, settings.pocket(index)))
				})
				.collect();

			CharacterInventory {
				name: columns.name.to_string(),
				inventory: join(inventory),
				equipment: join(equipment),
				bank: join(bank),
				pockets: pockets.into_iter().map(join).collect(),
			}
		})
	}
}
