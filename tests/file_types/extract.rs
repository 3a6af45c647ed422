use pretty_assertions::assert_eq;
use vxx_rs::prelude::*;
use vxx_rs::vxx_types::file::vxx::SubRunSpec;

fn cockpit_archive() -> Vec<u8> {
	let needle = FrameBuilder::new(1, 1, 1, 1)
		.literal(-1, -1, &[1, 2, 3])
		.nested(
			-1,
			0,
			&[
				SubRunSpec::Literal(vec![4]),
				SubRunSpec::Fill {
					count: 2,
					index: 5,
				},
			],
		)
		.literal(-1, 1, &[6, 7, 8])
		.build();
	let blank = FrameBuilder::new(0, 0, 0, 0).build();

	ArchiveBuilder::new()
		.collection(vec![needle.clone(), blank])
		.out_of_range_collection()
		.collection(vec![needle])
		.build()
}

#[test_log::test]
fn extract_archive_from_disk() {
	let path = std::env::temp_dir().join(format!("vxx-rs-{}-cockpit.vga", std::process::id()));
	std::fs::write(&path, cockpit_archive()).unwrap();

	let mut archive = VxxFile::open(&path).unwrap();
	std::fs::remove_file(&path).unwrap();
	archive.set_options(DecodeOptions::default().with_name_prefix("cockpit"));

	let palette = Palette::grayscale();
	let mut canvases: Vec<Canvas> = Vec::new();
	let summary = archive.extract(&palette, &mut canvases, &mut LogDiagnostics).unwrap();

	assert_eq!(
		summary,
		ExtractSummary {
			collections: 3,
			skipped_collections: 1,
			frames: 3,
			pixels: 18,
		}
	);
	let names: Vec<_> = canvases.iter().map(|c| c.name().to_string()).collect();
	assert_eq!(names, vec!["cockpit0_0", "cockpit0_1", "cockpit2_0"]);

	// 3x3 block in the top-left corner, indices 1..=8 with 5 repeated
	let rgba = canvases[0].to_rgba();
	let index_at = |x: usize, y: usize| rgba[(y * 320 + x) * 4];
	let rows: Vec<Vec<u8>> = (0..3).map(|y| (0..3).map(|x| index_at(x, y)).collect()).collect();
	assert_eq!(rows, vec![vec![1, 2, 3], vec![4, 5, 5], vec![6, 7, 8]]);
	assert_eq!(rgba[(3 * 320) * 4 + 3], 0, "unplotted pixels are transparent");
	assert!(canvases[1].pixels().is_empty());
}

#[test]
fn parallel_and_sequential_agree() {
	let mut archive = VxxFile::from_bytes(cockpit_archive()).unwrap();
	let palette = Palette::grayscale();

	let mut seq: Vec<Anomaly> = Vec::new();
	let frames: Vec<Frame> = archive.frames(&palette, &mut seq).collect::<Result<_, _>>().unwrap();

	let mut par: Vec<Anomaly> = Vec::new();
	assert_eq!(archive.decode_all_parallel(&palette, &mut par).unwrap(), frames);
	assert_eq!(seq, par);
}
