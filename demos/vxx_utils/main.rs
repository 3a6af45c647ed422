//! VXX (`.VGA`) CLI Utility
//!
//! A command-line tool for inspecting and extracting sprite archives.
//!
//! # Features
//!
//! - **info**: Display the resolved offset table of an archive
//! - **extract**: Decode every frame to a PNG canvas with JSON metadata
//! - **frame**: Decode a single frame and optionally save it
//! - **palette**: Render a palette file as a 16x16 swatch image
//!
//! # Options File
//!
//! `extract` accepts a TOML options file; command-line flags win over it, and
//! `VXX_*` environment variables win over the file:
//!
//! ```toml
//! name_prefix = "cockpit"
//! canvas_width = 320
//! canvas_height = 200
//! max_frame_bytes = 65536
//! ```
//!
//! # Usage
//!
//! ```bash
//! # Show the offset table
//! cargo run --example vxx_utils -- info ARROW.VGA
//!
//! # Extract every frame
//! cargo run --example vxx_utils -- extract ARROW.VGA -p WC1.PAL -o arrow/
//!
//! # Decode collection 2, frame 5
//! cargo run --example vxx_utils -- frame ARROW.VGA 2 5 -p WC1.PAL -o frame.png
//!
//! # Render a palette
//! cargo run --example vxx_utils -- palette WC1.PAL
//! ```

use std::{
	fs,
	path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::{ImageBuffer, Rgb, RgbImage, RgbaImage};
use serde::Serialize;
use vxx_rs::prelude::*;

fn main() -> Result<()> {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();
	match cli.command {
		Command::Info(args) => run_info(args),
		Command::Extract(args) => run_extract(args),
		Command::Frame(args) => run_frame(args),
		Command::Palette(args) => run_palette(args),
	}
}

#[derive(Parser)]
#[command(name = "vxx_utils")]
#[command(author = "vxx-rs project")]
#[command(version)]
#[command(about = "Inspect and extract VXX (.VGA) sprite archives", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Display the offset table of an archive
	Info(InfoArgs),
	/// Decode every frame to PNG images
	Extract(ExtractArgs),
	/// Decode a single frame
	Frame(FrameArgs),
	/// Render a palette as a swatch image
	Palette(PaletteArgs),
}

#[derive(Args)]
struct InfoArgs {
	/// Input archive path
	#[arg(value_name = "ARCHIVE")]
	input: PathBuf,

	/// Print the table as JSON
	#[arg(long, default_value_t = false)]
	json: bool,
}

#[derive(Args)]
struct ExtractArgs {
	/// Input archive path
	#[arg(value_name = "ARCHIVE")]
	input: PathBuf,

	/// Palette file (768 bytes)
	#[arg(short, long, value_name = "PALETTE")]
	palette: PathBuf,

	/// Output directory (defaults to `<archive>_frames/`)
	#[arg(short, long, value_name = "OUTPUT_DIR")]
	output: Option<PathBuf>,

	/// Canvas name prefix
	#[arg(long, value_name = "PREFIX")]
	prefix: Option<String>,

	/// Per-frame read limit in bytes
	#[arg(long, value_name = "BYTES")]
	max_frame_bytes: Option<u64>,

	/// TOML options file
	#[arg(short, long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Decode frames on all cores
	#[arg(long, default_value_t = false)]
	parallel: bool,
}

#[derive(Args)]
struct FrameArgs {
	/// Input archive path
	#[arg(value_name = "ARCHIVE")]
	input: PathBuf,

	/// Collection index
	#[arg(value_name = "COLLECTION")]
	collection: usize,

	/// Frame index within the collection
	#[arg(value_name = "FRAME")]
	frame: usize,

	/// Palette file (768 bytes)
	#[arg(short, long, value_name = "PALETTE")]
	palette: PathBuf,

	/// Save the canvas to this PNG file
	#[arg(short, long, value_name = "OUTPUT")]
	output: Option<PathBuf>,

	/// Print every pixel
	#[arg(short, long, default_value_t = false)]
	verbose: bool,
}

#[derive(Args)]
struct PaletteArgs {
	/// Palette file (768 bytes)
	#[arg(value_name = "PALETTE")]
	input: PathBuf,

	/// Output PNG path (defaults to `<palette>_palette.png`)
	#[arg(short, long, value_name = "OUTPUT")]
	output: Option<PathBuf>,

	/// Swatch size in pixels
	#[arg(short, long, default_value_t = 16)]
	swatch: u32,
}

/// One collection entry of the `info --json` output
#[derive(Debug, Serialize)]
struct CollectionInfo {
	index: usize,
	base: u32,
	block_length: u32,
	frame_offsets: Vec<u32>,
}

/// `info --json` output
#[derive(Debug, Serialize)]
struct TableInfo {
	file_length: u32,
	collection_offsets: Vec<u32>,
	skipped: Vec<usize>,
	collections: Vec<CollectionInfo>,
}

impl From<&OffsetTable> for TableInfo {
	fn from(table: &OffsetTable) -> Self {
		Self {
			file_length: table.file_length(),
			collection_offsets: table.collection_offsets().to_vec(),
			skipped: table.skipped().to_vec(),
			collections: table
				.collections()
				.iter()
				.map(|c| CollectionInfo {
					index: c.index(),
					base: c.base(),
					block_length: c.block_length(),
					frame_offsets: c.frame_offsets().to_vec(),
				})
				.collect(),
		}
	}
}

/// Canvas entry of `metadata.json`
#[derive(Debug, Serialize)]
struct CanvasMetadata {
	name: String,
	filename: String,
	width: u32,
	height: u32,
	pixels: usize,
}

/// `metadata.json` written next to the extracted canvases
#[derive(Debug, Serialize)]
struct ExtractMetadata {
	archive: String,
	palette: String,
	options: DecodeOptions,
	collections: usize,
	skipped_collections: Vec<usize>,
	frames: usize,
	pixels: usize,
	anomalies: usize,
	canvases: Vec<CanvasMetadata>,
}

/// Writes every canvas as an RGBA PNG into a directory.
struct PngSink {
	output_dir: PathBuf,
	written: Vec<CanvasMetadata>,
}

impl PngSink {
	fn new(output_dir: PathBuf) -> Self {
		Self {
			output_dir,
			written: Vec::new(),
		}
	}
}

impl CanvasSink for PngSink {
	fn accept(&mut self, canvas: Canvas) -> Result<(), VxxError> {
		let filename = format!("{}.png", canvas.name());
		save_canvas(&canvas, &self.output_dir.join(&filename))
			.map_err(|e| VxxError::sink(format!("{}: {e:#}", canvas.name())))?;

		log::debug!("Wrote {filename}");
		self.written.push(CanvasMetadata {
			name: canvas.name().to_string(),
			filename,
			width: canvas.width(),
			height: canvas.height(),
			pixels: canvas.pixels().len(),
		});
		Ok(())
	}
}

/// Counts anomalies while forwarding them to the log.
#[derive(Default)]
struct Tally {
	count: usize,
}

impl Diagnostics for Tally {
	fn report(&mut self, anomaly: Anomaly) {
		self.count += 1;
		LogDiagnostics.report(anomaly);
	}
}

fn save_canvas(canvas: &Canvas, path: &Path) -> Result<()> {
	let img: RgbaImage = ImageBuffer::from_raw(canvas.width(), canvas.height(), canvas.to_rgba())
		.context("Canvas buffer does not match its size")?;
	img.save(path).with_context(|| format!("Failed to write {}", path.display()))?;
	Ok(())
}

fn load_options(args: &ExtractArgs) -> Result<DecodeOptions> {
	let mut builder = config::Config::builder();
	if let Some(path) = &args.config {
		builder = builder.add_source(config::File::from(path.as_path()));
	}
	let mut options: DecodeOptions = builder
		.add_source(config::Environment::with_prefix("VXX").try_parsing(true))
		.build()
		.context("Failed to load options")?
		.try_deserialize()
		.context("Invalid options")?;

	if let Some(prefix) = &args.prefix {
		options.name_prefix = prefix.clone();
	}
	if let Some(limit) = args.max_frame_bytes {
		options.max_frame_bytes = Some(limit);
	}
	Ok(options)
}

fn default_output(input: &Path, suffix: &str) -> PathBuf {
	let stem = input.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
	input.with_file_name(format!("{stem}{suffix}"))
}

fn run_info(args: InfoArgs) -> Result<()> {
	let archive = VxxFile::open(&args.input)
		.with_context(|| format!("Cannot open {}", args.input.display()))?;
	let table = archive.table();

	if args.json {
		println!("{}", serde_json::to_string_pretty(&TableInfo::from(table))?);
		return Ok(());
	}

	println!("{}", args.input.display());
	println!("{table}");
	for (index, base) in table.collection_offsets().iter().enumerate() {
		match table.collection(index) {
			Some(collection) => {
				println!("  {collection}");
				for location in collection.locations() {
					println!("    frame {:3} @ 0x{:06X}", location.frame, location.offset);
				}
			}
			None => println!("  Collection {index} @ 0x{base:06X}: skipped"),
		}
	}
	Ok(())
}

fn run_extract(args: ExtractArgs) -> Result<()> {
	let options = load_options(&args)?;
	let palette = Palette::open(&args.palette)
		.with_context(|| format!("Cannot load palette {}", args.palette.display()))?;

	let output_dir = args.output.clone().unwrap_or_else(|| default_output(&args.input, "_frames"));
	fs::create_dir_all(&output_dir)
		.with_context(|| format!("Cannot create {}", output_dir.display()))?;

	let mut sink = PngSink::new(output_dir.clone());
	let mut tally = Tally::default();

	let (summary, skipped) = if args.parallel {
		let data = fs::read(&args.input)
			.with_context(|| format!("Cannot read {}", args.input.display()))?;
		let archive =
			VxxFile::from_reader_with(std::io::Cursor::new(data), options.clone(), &mut tally)?;

		let frames = archive.decode_all_parallel(&palette, &mut tally)?;
		let mut summary = ExtractSummary {
			collections: archive.table().collection_count(),
			skipped_collections: archive.table().skipped().len(),
			..Default::default()
		};
		for frame in frames {
			summary.frames += 1;
			summary.pixels += frame.pixel_count();
			sink.accept(frame.into_canvas(&options))?;
		}
		(summary, archive.table().skipped().to_vec())
	} else {
		let file = fs::File::open(&args.input)
			.with_context(|| format!("Cannot open {}", args.input.display()))?;
		let mut archive =
			VxxFile::from_reader_with(std::io::BufReader::new(file), options.clone(), &mut tally)?;
		let summary = archive.extract(&palette, &mut sink, &mut tally)?;
		(summary, archive.table().skipped().to_vec())
	};

	let metadata = ExtractMetadata {
		archive: args.input.display().to_string(),
		palette: args.palette.display().to_string(),
		options,
		collections: summary.collections,
		skipped_collections: skipped,
		frames: summary.frames,
		pixels: summary.pixels,
		anomalies: tally.count,
		canvases: sink.written,
	};
	let metadata_path = output_dir.join("metadata.json");
	fs::write(&metadata_path, serde_json::to_string_pretty(&metadata)?)?;

	println!(
		"✓ Extracted {} -> {} ({summary}, {} anomalies)",
		args.input.display(),
		output_dir.display(),
		tally.count
	);
	Ok(())
}

fn run_frame(args: FrameArgs) -> Result<()> {
	let palette = Palette::open(&args.palette)
		.with_context(|| format!("Cannot load palette {}", args.palette.display()))?;
	let mut archive = VxxFile::open(&args.input)
		.with_context(|| format!("Cannot open {}", args.input.display()))?;

	let id = FrameId::new(args.collection, args.frame);
	let mut anomalies: Vec<Anomaly> = Vec::new();
	let Some(frame) = archive.decode_by_id(id, &palette, &mut anomalies) else {
		bail!("No frame {id} in {}", args.input.display());
	};
	let frame = frame?;

	println!("{frame}");
	for anomaly in &anomalies {
		println!("  ⚠ {anomaly}");
	}
	if args.verbose {
		for pixel in frame.pixels() {
			println!("  ({:3}, {:3}) index {:3} {}", pixel.x, pixel.y, pixel.index, pixel.color);
		}
	}

	if let Some(path) = args.output {
		let canvas = frame.into_canvas(archive.options());
		save_canvas(&canvas, &path)?;
		println!("✓ Saved {} -> {}", canvas.name(), path.display());
	}
	Ok(())
}

fn run_palette(args: PaletteArgs) -> Result<()> {
	let palette = Palette::open(&args.input)
		.with_context(|| format!("Cannot load palette {}", args.input.display()))?;
	if args.swatch == 0 {
		bail!("Swatch size must be at least 1");
	}

	let side = args.swatch * 16;
	let img: RgbImage = ImageBuffer::from_fn(side, side, |x, y| {
		let index = (y / args.swatch) * 16 + x / args.swatch;
		let color = palette.get(index as u8);
		Rgb([color.r, color.g, color.b])
	});

	let output = args.output.unwrap_or_else(|| default_output(&args.input, "_palette.png"));
	img.save(&output).with_context(|| format!("Failed to write {}", output.display()))?;
	println!("✓ Saved {} -> {}", args.input.display(), output.display());
	Ok(())
}
