//! Benchmark suite for VXX archive decoding
//!
//! This benchmark measures offset table resolution, the run-length frame
//! decoder and the parallel decode path.
//!
//! Run with: cargo bench --manifest-path benches/Cargo.toml

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::{fs, hint::black_box, io::Cursor};
use vxx_benches::{generate_frame, generate_test_archive, sizes};
use vxx_types::file::pal::Palette;
use vxx_types::file::vxx::{
	Anomaly, Canvas, DecodeOptions, File, Frame, FrameId, LogDiagnostics, OffsetTable,
};

/// Benchmark a single frame decode at several sizes
fn bench_frame_decode(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxx_frame");
	let palette = Palette::grayscale();
	let options = DecodeOptions::default();

	for (name, (w, h)) in [("small", sizes::SMALL), ("medium", sizes::MEDIUM), ("full", sizes::FULL)] {
		let data = generate_frame(w, h, 7);
		group.throughput(Throughput::Elements(u64::from(w) * u64::from(h)));
		group.bench_with_input(BenchmarkId::new("decode", name), &data, |b, data| {
			b.iter(|| {
				let mut cursor = Cursor::new(black_box(data.as_slice()));
				let mut anomalies: Vec<Anomaly> = Vec::new();
				let frame =
					Frame::decode(&mut cursor, FrameId::new(0, 0), &palette, &options, &mut anomalies);
				black_box(frame)
			});
		});
	}

	group.finish();
}

/// Benchmark resolving the two-level offset table
fn bench_table_resolution(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxx_table");

	for collections in [4usize, 32, 128] {
		let data = generate_test_archive(collections, 8, sizes::SMALL);
		group.bench_with_input(BenchmarkId::new("resolve", collections), &data, |b, data| {
			b.iter(|| {
				let mut anomalies: Vec<Anomaly> = Vec::new();
				let table = OffsetTable::from_reader(&mut Cursor::new(black_box(data)), &mut anomalies);
				black_box(table)
			});
		});
	}

	group.finish();
}

/// Compare sequential and parallel full-archive decoding
fn bench_sequential_vs_parallel(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxx_archive");
	let palette = Palette::grayscale();
	let data = generate_test_archive(16, 16, sizes::MEDIUM);
	let pixels = 16 * 16 * u64::from(sizes::MEDIUM.0) * u64::from(sizes::MEDIUM.1);
	group.throughput(Throughput::Elements(pixels));
	group.sample_size(30);

	group.bench_function("sequential", |b| {
		let mut archive = File::from_bytes(data.as_slice()).unwrap();
		b.iter(|| {
			let mut anomalies: Vec<Anomaly> = Vec::new();
			let frames: Vec<_> = archive.frames(&palette, &mut anomalies).collect();
			black_box(frames)
		});
	});

	group.bench_function("parallel", |b| {
		let archive = File::from_bytes(data.as_slice()).unwrap();
		b.iter(|| {
			let mut anomalies: Vec<Anomaly> = Vec::new();
			black_box(archive.decode_all_parallel(&palette, &mut anomalies))
		});
	});

	group.finish();
}

/// Full extraction of a real archive, if one is available
fn bench_real_archive(c: &mut Criterion) {
	let mut group = c.benchmark_group("vxx_real");

	let archive_path = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/ARROW.VGA");
	let palette_path = concat!(env!("CARGO_MANIFEST_DIR"), "/test_data/WC1.PAL");

	let data = match fs::read(archive_path) {
		Ok(d) => d,
		Err(_) => {
			eprintln!("Warning: Could not find test file: {}", archive_path);
			return;
		}
	};
	let palette = match Palette::open(palette_path) {
		Ok(p) => p,
		Err(_) => {
			eprintln!("Warning: Could not load palette: {}", palette_path);
			return;
		}
	};

	group.throughput(Throughput::Bytes(data.len() as u64));
	group.bench_function("extract", |b| {
		b.iter(|| {
			let mut archive = File::from_bytes(black_box(data.as_slice())).unwrap();
			let mut canvases: Vec<Canvas> = Vec::new();
			black_box(archive.extract(&palette, &mut canvases, &mut LogDiagnostics))
		});
	});

	group.finish();
}

criterion_group!(
	benches,
	bench_frame_decode,
	bench_table_resolution,
	bench_sequential_vs_parallel,
	bench_real_archive,
);

criterion_main!(benches);
