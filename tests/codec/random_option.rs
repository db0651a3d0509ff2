use awaken_rs::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::registry;

#[test_log::test]
fn test_encode_then_decode_single_option() {
	let registry = registry();
	let id = random_option::encode(&[OptionInput::with_adj(34, 12)], false);
	let decoded = random_option::decode(id, &registry);

	assert!(!decoded.safe_flag);
	assert_eq!(decoded.options.len(), 1);
	let option = &decoded.options[0];
	assert_eq!(option.dst, 34);
	assert_eq!(option.adj_raw, 500);
	assert_eq!(option.adj, 12);
	assert_eq!(option.label, "Max HP");
	assert_eq!(option.value, "+12");
}

#[test]
fn test_decode_json_shape() {
	let registry = registry();
	let id = random_option::encode(&[OptionInput::with_adj(36, 100), OptionInput::with_raw(24, 509)], false);
	let json = serde_json::to_value(random_option::decode(id, &registry)).unwrap();

	assert_eq!(json["safeFlag"], false);
	assert_eq!(json["options"][0]["key"], "DST_ATTACKSPEED");
	assert_eq!(json["options"][0]["adjRaw"], 412);
	assert_eq!(json["options"][0]["value"], "+20%");
	assert_eq!(json["options"][1]["label"], "Speed");
	assert_eq!(json["options"][1]["value"], "+3%");
}

#[test_log::test]
fn test_unknown_attribute_degrades_one_option() {
	let registry = registry();
	let id = random_option::encode(&[OptionInput::with_raw(1, 510), OptionInput::with_raw(99, 505)], false);
	let decoded = random_option::decode(id, &registry);

	assert_eq!(decoded.options.len(), 2);
	assert!(decoded.options[0].is_resolved());
	assert_eq!(decoded.options[0].value, "+2");
	assert!(!decoded.options[1].is_resolved());
	assert_eq!(decoded.options[1].label, "99");
	assert_eq!(decoded.options[1].value, "+7");
}

#[test]
fn test_safe_flag_hides_options() {
	let registry = registry();
	let id = random_option::encode(&[OptionInput::with_adj(1, 5)], true);
	assert!(random_option::is_safe(id));

	let decoded = random_option::decode(id, &registry);
	assert!(decoded.safe_flag);
	assert!(decoded.is_empty());
}

#[test]
fn test_sampled_round_trip_against_registry() {
	let registry = registry();
	let dsts: Vec<u32> = registry.iter().map(|a| a.id).collect();
	let mut rng = SmallRng::seed_from_u64(0xA3A4E);

	for _ in 0..200 {
		let count = rng.random_range(0..=3);
		let options: Vec<RandomOption> = (0..count)
			.map(|_| RandomOption::new(dsts[rng.random_range(0..dsts.len())], rng.random_range(1..1024)))
			.collect();
		let inputs: Vec<OptionInput> = options.iter().copied().map(OptionInput::from).collect();

		let decoded = random_option::decode(random_option::encode(&inputs, false), &registry);
		let pairs: Vec<(u32, u16)> = decoded.options.iter().map(|o| (o.dst, o.adj_raw)).collect();
		let expected: Vec<(u32, u16)> = options.iter().map(|o| (o.dst, o.adj_raw)).collect();
		assert_eq!(pairs, expected);
		assert!(decoded.options.iter().all(DecodedOption::is_resolved));
	}
}
