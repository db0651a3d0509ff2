use awaken_rs::prelude::*;

use crate::{catalog, registry, settings};

#[test]
fn test_single_slot_container() {
	let source = ContainerSource::new("0,101,,,,5,,,,,,1,3,,0/", "0/", "");
	let slots = parse_container(source, ContainerWindow::new(0, 1), &ParseOptions::default());

	assert_eq!(slots.len(), 1);
	assert_eq!(slots[0].item_id, Some(101));
	assert_eq!(slots[0].quantity, 5);
	assert_eq!(slots[0].enhancement, 3);
}

#[test]
fn test_assembled_inventory_window() {
	let (catalog, registry, settings) = (catalog(), registry(), settings());
	let assembler = Assembler::new(&catalog, &registry, &settings);

	let option = random_option::encode(&[OptionInput::with_adj(1, 4), OptionInput::with_adj(36, 100)], false);
	let items = "0,21,,,,1,,,,,,1,0,,0/1,101,,,,1,,,,,,1,6,,0/2,1,,,,20/";
	let extensions = format!("0,0,{option},0/0,0,0,0/0,0,0,0/");
	let source = ContainerSource::new(items, "2/0/5/1/", &extensions);

	let records = assembler.parse_container(source, ContainerWindow::new(0, 4));
	assert_eq!(records.len(), 4);

	let hotdog = &records[0];
	assert_eq!(hotdog.item_id, Some(1));
	assert_eq!(hotdog.quantity, 20);
	assert_eq!(hotdog.ability_display, None);
	assert_eq!(hotdog.image.as_deref(), Some("https://img.example.org/items/genfoohotdog.dds.png"));

	let sword = &records[1];
	assert_eq!(sword.display_name.as_deref(), Some("Wooden Sword"));
	assert_eq!(sword.ability_display.as_deref(), Some("Attack: 10 ~ 20"));
	assert_eq!(sword.safe_flag, Some(false));
	let options: Vec<&str> = sword.random_options.iter().map(|o| o.value.as_str()).collect();
	assert_eq!(options, vec!["+4", "+20%"]);
	let stats: Vec<(&str, &str)> = sword.stats.iter().map(|s| (s.label.as_str(), s.value.as_str())).collect();
	assert_eq!(stats, vec![("STR", "5"), ("Attack Speed", "7%")]);

	// Logical slot 5 has no item entry
	assert!(!records[2].is_occupied());
	assert_eq!(records[2].slot_index, 2);

	let suit = &records[3];
	assert_eq!(suit.ability_display.as_deref(), Some("DEF: 7 ~ 9"));
	assert_eq!(suit.enhancement, Some(6));
	// A zero random-option id is not decoded
	assert_eq!(suit.safe_flag, None);
}

#[test]
fn test_unknown_item_is_placeholder() {
	let (catalog, registry, settings) = (catalog(), registry(), settings());
	let assembler = Assembler::new(&catalog, &registry, &settings);

	let record = assembler.assemble_item(9_999_999, None, 0);
	assert_eq!(record.item_id, Some(9_999_999));
	assert_eq!(record.display_name.as_deref(), Some("Item not found!"));
	assert_eq!(record.image.as_deref(), Some(""));
}

#[test]
fn test_accessory_bonus_by_enhancement() {
	let (catalog, registry, settings) = (catalog(), registry(), settings());
	let assembler = Assembler::new(&catalog, &registry, &settings);

	let record = assembler.assemble_item(2801, None, 1);
	assert_eq!(
		record.accessory_bonus,
		Some(vec!["STR: +2".to_string(), "Max HP: +30".to_string()])
	);
}

#[test]
fn test_character_inventory() {
	let (catalog, registry, settings) = (catalog(), registry(), settings());
	let assembler = Assembler::new(&catalog, &registry, &settings);

	// 42 inventory slots followed by equipment; the sword is equipped
	let indexes: String = (0..80).map(|i| format!("{i}/")).collect();
	let items = "0,1,,,,3/45,21,,,,1/";
	let columns = CharacterColumns {
		name: "Aria",
		inventory: ContainerSource::new(items, &indexes, ""),
		bank: Some(ContainerSource::new("7,25001,,,,2/", "7/", "")),
		pockets: vec![Some(ContainerSource::new("0,26456,,,,1/", "0/", ""))],
	};

	let inventory = assembler.character_inventory(&columns);
	assert_eq!(inventory.inventory.len(), 1);
	assert_eq!(inventory.inventory[0].item_id, Some(1));
	assert_eq!(inventory.equipment.len(), 1);
	assert_eq!(inventory.equipment[0].item_id, Some(21));
	assert_eq!(inventory.equipment[0].slot_index, 3);
	assert_eq!(inventory.bank.len(), 1);
	assert_eq!(inventory.bank[0].display_name.as_deref(), Some("Scroll of Blessedness"));
	assert_eq!(inventory.pockets.len(), 3);
	assert_eq!(inventory.pockets[0][0].display_name.as_deref(), Some("Flame Sword"));
	assert!(inventory.pockets[1].is_empty());
	assert!(inventory.pockets[2].is_empty());
}

#[test]
fn test_guild_bank_find_item() {
	let (catalog, registry, settings) = (catalog(), registry(), settings());
	let assembler = Assembler::new(&catalog, &registry, &settings);

	let indexes: String = (0..120).map(|i| format!("{i}/")).collect();
	let items: String = (0..120)
		.map(|i| format!("{i},{},,,,{}/", if i % 3 == 0 { 25001 } else { 1 }, i + 1))
		.collect();
	let source = ContainerSource::new(&items, &indexes, "");

	let bank = assembler.guild_bank(source);
	assert_eq!(bank.len(), 120);
	assert!(bank.iter().enumerate().all(|(i, record)| record.slot_index as usize == i));

	let scrolls = assembler.find_item(source, settings.guild_bank(), 25001);
	assert_eq!(scrolls.len(), 40);
	assert_eq!(scrolls[1].quantity, 4);
}
