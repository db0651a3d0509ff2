//! Benchmark suite for the random-option and container codecs
//!
//! This benchmark measures packed id decoding, container parsing and full
//! presentation assembly over a synthetic catalog.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use std::hint::black_box;

use awaken_benches::{generate_attributes, generate_container, generate_option_id, write_catalog};
use awaken_types::prelude::*;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

/// Benchmark unpacking and decoding packed ids
fn bench_random_option(c: &mut Criterion) {
	let mut group = c.benchmark_group("random_option");
	let registry = AttributeRegistry::from_json_str(&generate_attributes()).expect("attribute dataset");
	let ids: Vec<u64> = (0..1024).map(generate_option_id).collect();

	group.throughput(Throughput::Elements(ids.len() as u64));
	group.bench_function("unpack", |b| {
		b.iter(|| {
			for &id in &ids {
				black_box(random_option::unpack(black_box(id)));
			}
		});
	});
	group.bench_function("decode", |b| {
		b.iter(|| {
			for &id in &ids {
				black_box(random_option::decode(black_box(id), &registry));
			}
		});
	});

	group.finish();
}

/// Benchmark container parsing at typical container sizes
fn bench_parse_container(c: &mut Criterion) {
	let mut group = c.benchmark_group("parse_container");

	for slots in [8usize, 42, 120] {
		let (items, indexes, extensions) = generate_container(slots);
		let source = ContainerSource::new(&items, &indexes, &extensions);

		group.throughput(Throughput::Elements(slots as u64));
		group.bench_with_input(BenchmarkId::from_parameter(slots), &source, |b, source| {
			b.iter(|| {
				black_box(parse_container(
					*source,
					ContainerWindow::new(0, slots),
					&ParseOptions::default(),
				))
			});
		});
	}

	group.finish();
}

/// Benchmark full assembly with a warm catalog
fn bench_assemble(c: &mut Criterion) {
	let mut group = c.benchmark_group("assemble");

	let dir = tempfile::tempdir().expect("scratch directory");
	let chunks = write_catalog(dir.path()).expect("synthetic catalog");
	let catalog = ItemCatalog::open(&chunks).expect("catalog index");
	let registry = AttributeRegistry::from_json_str(&generate_attributes()).expect("attribute dataset");
	let settings = Settings::default();
	let assembler = Assembler::new(&catalog, &registry, &settings);

	for slots in [42usize, 120] {
		let (items, indexes, extensions) = generate_container(slots);
		let source = ContainerSource::new(&items, &indexes, &extensions);
		// Warm every shard the container touches
		black_box(assembler.parse_container(source, ContainerWindow::new(0, slots)));

		group.throughput(Throughput::Elements(slots as u64));
		group.bench_with_input(BenchmarkId::from_parameter(slots), &source, |b, source| {
			b.iter(|| black_box(assembler.parse_container(*source, ContainerWindow::new(0, slots))));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_random_option, bench_parse_container, bench_assemble);
criterion_main!(benches);
