use vxx_rs::prelude::*;

fn temp_path(name: &str) -> std::path::PathBuf {
	std::env::temp_dir().join(format!("vxx-rs-{}-{name}", std::process::id()))
}

#[test]
fn palette_survives_disk() {
	let colors = std::array::from_fn(|i| Color::new(i as u8, 255 - i as u8, (i * 7) as u8));
	let palette = Palette::from_colors(colors);

	let path = temp_path("roundtrip.pal");
	palette.save(&path).unwrap();
	assert_eq!(std::fs::metadata(&path).unwrap().len(), 768);

	let loaded = Palette::open(&path).unwrap();
	std::fs::remove_file(&path).unwrap();

	assert_eq!(loaded, palette);
	assert_eq!(loaded[3], Color::new(3, 252, 21));
}

#[test]
fn short_palette_is_rejected() {
	let path = temp_path("short.pal");
	std::fs::write(&path, [0u8; 700]).unwrap();
	let err = Palette::open(&path).unwrap_err();
	std::fs::remove_file(&path).unwrap();

	assert!(matches!(
		err,
		VxxError::PaletteSize {
			expected: 768,
			..
		}
	));
}
