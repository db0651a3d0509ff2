use crate::catalog;

#[test]
fn test_shards_cover_fixture_range() {
	let catalog = catalog();
	let ranges: Vec<(u32, u32)> = catalog.shards().map(|s| (s.min_id, s.max_id)).collect();
	assert_eq!(ranges, vec![(1, 2801), (25001, 50000)]);
}

#[test_log::test]
fn test_lookup_outside_every_shard() {
	let catalog = catalog();
	assert!(catalog.get(9_999_999).is_none());
	assert_eq!(catalog.partition_reads(), 0);
}

#[test]
fn test_lookup_loads_only_its_shard() {
	let catalog = catalog();

	let item = catalog.get(26456).unwrap();
	assert_eq!(item.display_name(), "Flame Sword");
	assert_eq!(item.ability_min.as_deref(), Some("210"));
	assert_eq!(catalog.loaded_shards(), 1);

	// Gap between the two shards
	assert!(catalog.get(10000).is_none());
	assert_eq!(catalog.loaded_shards(), 1);

	assert!(catalog.get(50000).is_some());
	assert_eq!(catalog.partition_reads(), 1);
}

#[test]
fn test_search_by_name_and_id() {
	let catalog = catalog();

	let names: Vec<&str> = catalog
		.search("SWORD", awaken_rs::catalog::SEARCH_LIMIT)
		.iter()
		.map(|item| item.display_name())
		.collect();
	assert_eq!(names, vec!["Wooden Sword", "Flame Sword"]);

	let ids: Vec<u32> = catalog.search("2801", 5).iter().map(|item| item.id).collect();
	assert_eq!(ids, vec![2801]);
}
