//! Lodkit CLI - Command-line tool for DDS decoding and LOD atlas mapping.
//!
//! This is the main entry point for the lodkit command-line application.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use lodkit::prelude::*;
use lodkit::atlas::{PRESET_RATIOS, SPLIT_LABELS};
use lodkit::dds::{FourCC, SurfaceKind};

/// Lodkit - DDS texture decoding and LOD atlas mapping tool
#[derive(Parser)]
#[command(name = "lodkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the header of a DDS file
    DdsInfo {
        /// Input DDS file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Decode DDS files to PNG
    DdsDecode {
        /// Input DDS file or directory
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file or directory
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Seed a mapping table from a props XML file or a folder of YTYP XML files
    AtlasProps {
        /// Input props XML file, or a directory scanned for *.ytyp.xml archetypes
        #[arg(short, long)]
        input: PathBuf,

        /// Output mapping table (JSON)
        #[arg(short, long)]
        output: PathBuf,

        /// Fill anchors from the built-in presets where a prop is known
        #[arg(long)]
        presets: bool,
    },

    /// Generate LOD candidates from a mapping table
    AtlasGenerate {
        /// Input mapping table (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output candidates file (JSON)
        #[arg(short, long, env = "LODKIT_CANDIDATES_JSON")]
        output: PathBuf,

        /// Number of tile rows in the atlas
        #[arg(long, env = "LODKIT_ATLAS_ROWS", default_value_t = 1)]
        rows: u32,

        /// Number of tile columns in the atlas
        #[arg(long, env = "LODKIT_ATLAS_COLS", default_value_t = 1)]
        cols: u32,

        /// Split mode label, e.g. "25% front / 75% top"
        #[arg(long, env = "LODKIT_SPLIT_MODE")]
        split: Option<String>,
    },

    /// List the split mode labels
    AtlasSplits,
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::DdsInfo { input } => {
            cmd_dds_info(&input)?;
        }
        Commands::DdsDecode { input, output } => {
            cmd_dds_decode(&input, &output)?;
        }
        Commands::AtlasProps { input, output, presets } => {
            cmd_atlas_props(&input, &output, presets)?;
        }
        Commands::AtlasGenerate {
            input,
            output,
            rows,
            cols,
            split,
        } => {
            cmd_atlas_generate(&input, &output, rows, cols, split.as_deref())?;
        }
        Commands::AtlasSplits => {
            cmd_atlas_splits();
        }
    }

    Ok(())
}

/// Log to stderr, filtered by `RUST_LOG` (default `info`).
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cmd_dds_info(input: &Path) -> Result<()> {
    let data = fs::read(input).context("Failed to read input file")?;
    let dds = DdsFile::parse(&data).context("Failed to parse DDS header")?;

    // Copy out of the packed header before formatting.
    let header = *dds.header();
    let pf = header.pixel_format;
    let (width, height, mipmaps) = (header.width, header.height, header.mipmap_count);
    let (flags, bit_count) = (pf.flags, pf.rgb_bit_count);
    let masks = [pf.r_bit_mask, pf.g_bit_mask, pf.b_bit_mask, pf.a_bit_mask];

    println!("File:        {}", input.display());
    println!("Dimensions:  {}x{}", width, height);
    println!("Mipmaps:     {}", mipmaps);
    println!("FourCC:      {}", pf.four_cc);
    println!("Flags:       0x{:08X}", flags);
    println!("Bit count:   {}", bit_count);
    println!(
        "Masks:       R 0x{:08X}  G 0x{:08X}  B 0x{:08X}  A 0x{:08X}",
        masks[0], masks[1], masks[2], masks[3]
    );

    match header.surface_kind() {
        Some(kind) => {
            println!("Decoder:     {}", kind);
            if let SurfaceKind::Block(format) = kind {
                println!("Block size:  {} bytes", format.block_size());
            }
        }
        None if pf.four_cc == FourCC::DX10 => println!("Decoder:     unsupported (DX10 extended header)"),
        None => println!("Decoder:     unsupported"),
    }
    match header.surface_size() {
        Some(size) => println!("Surface:     {} bytes ({} available)", size, dds.payload().len()),
        None => println!("Surface:     unknown ({} bytes available)", dds.payload().len()),
    }

    Ok(())
}

fn cmd_dds_decode(input: &Path, output: &Path) -> Result<()> {
    if !input.is_dir() {
        let start = Instant::now();
        decode_to_png(input, output)?;
        info!(
            input = %input.display(),
            output = %output.display(),
            elapsed = ?start.elapsed(),
            "decoded texture"
        );
        return Ok(());
    }

    let files: Vec<PathBuf> = WalkDir::new(input)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_dds(entry.path()))
        .map(|entry| entry.into_path())
        .collect();

    println!("Decoding {} files to {}...", files.len(), output.display());

    fs::create_dir_all(output)?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let start = Instant::now();
    let mut decoded = 0;
    let mut errors = 0;

    for path in &files {
        let relative = path.strip_prefix(input).unwrap_or(path);
        let output_path = output.join(relative).with_extension("png");

        match decode_to_png(path, &output_path) {
            Ok(()) => decoded += 1,
            Err(e) => {
                pb.suspend(|| warn!(file = %path.display(), "{:#}", e));
                errors += 1;
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Done");
    println!(
        "Decoded {} textures in {:?} ({} errors)",
        decoded,
        start.elapsed(),
        errors
    );

    Ok(())
}

fn is_dds(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("dds"))
}

fn decode_to_png(input: &Path, output: &Path) -> Result<()> {
    let texture = decode_file(input).with_context(|| format!("Failed to decode {}", input.display()))?;
    let (width, height) = (texture.width(), texture.height());

    let image = image::RgbaImage::from_raw(width, height, texture.into_pixels())
        .context("Decoded pixel buffer does not match the texture size")?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    image
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    Ok(())
}

fn cmd_atlas_props(input: &Path, output: &Path, presets: bool) -> Result<()> {
    let names = if input.is_dir() {
        let names = load_archetype_names_dir(input).context("Failed to scan YTYP directory")?;
        if names.is_empty() {
            anyhow::bail!("No archetypes found under {}", input.display());
        }
        names
    } else {
        load_prop_names_file(input).context("Failed to read props XML")?
    };

    let mut matched = 0;
    let rows: Vec<MappingRow> = names
        .into_iter()
        .map(|name| {
            let mut row = MappingRow::seed(name);
            if presets && row.apply_preset() {
                matched += 1;
            }
            row
        })
        .collect();

    save_mapping(output, &rows).context("Failed to write mapping table")?;

    if presets {
        println!("Wrote {} rows to {} ({} from presets)", rows.len(), output.display(), matched);
    } else {
        println!("Wrote {} rows to {}", rows.len(), output.display());
    }

    Ok(())
}

fn cmd_atlas_generate(input: &Path, output: &Path, rows: u32, cols: u32, split: Option<&str>) -> Result<()> {
    let mapping = load_mapping(input).context("Failed to read mapping table")?;

    let grid = AtlasGrid::new(rows, cols);
    let split = split.map(SplitMode::from_label).unwrap_or_default();

    let candidates = generate_candidates(grid, split, &mapping);
    if candidates.is_empty() {
        anyhow::bail!("No valid rows in {}", input.display());
    }

    candidates.save(output).context("Failed to write candidates file")?;

    println!(
        "Saved {} candidates to {} ({}x{} grid, {})",
        candidates.len(),
        output.display(),
        grid.rows(),
        grid.cols(),
        split
    );

    Ok(())
}

fn cmd_atlas_splits() {
    for (i, label) in SPLIT_LABELS.iter().enumerate() {
        println!("{}: {}", i, label);
    }

    let ratios: Vec<String> = PRESET_RATIOS.iter().map(|r| r.to_string()).collect();
    println!("\nPreset front ratios: {}", ratios.join(", "));
}
