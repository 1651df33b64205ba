//! Benchmark suite for SPT decoding and encoding
//!
//! This benchmark measures the run-length coder, the palette builder and the
//! full file pipelines on synthetic sprites.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml
//!
//! For flamegraph profiling:
//! cargo bench --manifest-path benches/Cargo.toml -- --profile-time=5

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use spt_benches::{generate_frames, generate_indices, generate_test_spt_data, sizes};
use spt_types::file::spt::{
	EncodeOptions, File, Header, Palette, encode, encode::rank_colors, rle, sanitize::IndexSanitizer,
};
use std::hint::black_box;

/// Benchmark full decoding for each synthetic size
fn bench_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("spt_decode");

	for (name, (width, height)) in
		[("icon", sizes::ICON), ("sprite", sizes::SPRITE), ("screen", sizes::SCREEN)]
	{
		let data = generate_test_spt_data(width, height, 64, 4);
		group.throughput(Throughput::Elements(u64::from(width) * u64::from(height) * 4));
		group.bench_with_input(BenchmarkId::new("from_bytes", name), &data, |b, data| {
			b.iter(|| {
				let result = File::from_bytes(black_box(data));
				black_box(result)
			});
		});
	}

	group.finish();
}

/// Benchmark header parsing separately
fn bench_header_parsing(c: &mut Criterion) {
	let mut group = c.benchmark_group("spt_header");

	let data = generate_test_spt_data(sizes::SPRITE.0, sizes::SPRITE.1, 200, 2);

	group.bench_function("parse_header", |b| {
		b.iter(|| {
			let result = Header::from_bytes(black_box(&data));
			black_box(result)
		});
	});

	group.bench_function("parse_palette", |b| {
		b.iter(|| {
			let result = Palette::from_packed_bytes(black_box(&data[22..]), 200);
			black_box(result)
		});
	});

	group.finish();
}

/// Benchmark the run-length coder in both grammars
fn bench_rle(c: &mut Criterion) {
	let mut group = c.benchmark_group("spt_rle");
	let (width, height) = sizes::SCREEN;

	for (name, colors) in [("inline", 16usize), ("extended", 120)] {
		let indices = generate_indices(width, height, colors, 1);
		let mode = rle::RunMode::for_palette_len(colors);
		let encoded = rle::encode(&indices, mode);
		let limit = indices.len();

		group.throughput(Throughput::Elements(indices.len() as u64));
		group.bench_with_input(BenchmarkId::new("encode", name), &indices, |b, indices| {
			b.iter(|| black_box(rle::encode(black_box(indices), mode)));
		});
		group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
			b.iter(|| {
				let mut sanitizer = IndexSanitizer::new(colors);
				black_box(rle::decode(black_box(encoded), mode, &mut sanitizer, limit))
			});
		});
	}

	group.finish();
}

/// Benchmark palette construction
fn bench_rank_colors(c: &mut Criterion) {
	let mut group = c.benchmark_group("spt_palette_build");
	let frames = generate_frames(sizes::BANNER.0, sizes::BANNER.1, 256, 1);

	group.throughput(Throughput::Elements(u64::from(sizes::BANNER.0 * sizes::BANNER.1)));
	group.bench_function("rank_colors", |b| {
		b.iter(|| black_box(rank_colors(black_box(&frames))));
	});

	group.finish();
}

/// Full end-to-end encode, including nearest-color fallback
fn bench_encode(c: &mut Criterion) {
	let mut group = c.benchmark_group("spt_encode");
	let (width, height) = sizes::SPRITE;
	let frames = generate_frames(width, height, 200, 8);

	group.throughput(Throughput::Elements(u64::from(width * height) * 8));
	group.sample_size(50);

	for limit in [256usize, 64] {
		let options = EncodeOptions::default().with_palette_limit(limit);
		group.bench_with_input(BenchmarkId::new("encode", limit), &options, |b, options| {
			b.iter(|| black_box(encode(black_box(&frames), options)));
		});
	}

	group.finish();
}

criterion_group!(benches, bench_decode, bench_header_parsing, bench_rle, bench_rank_colors, bench_encode,);

criterion_main!(benches);
