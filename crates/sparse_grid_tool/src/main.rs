//! Sparse grid inspector.
//!
//! Builds a grid hierarchy from a box mesh or a raw voxel file and prints
//! per-level counts.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use sparse_grid::{GridHierarchy, SparseGridBuilder};
use std::path::{Path, PathBuf};

use config::Config;

/// Sparse hexahedral grid inspector.
#[derive(Parser, Debug)]
#[command(name = "inspect_grid")]
#[command(about = "Builds a sparse grid hierarchy and prints a summary")]
struct Args {
	/// Path to configuration TOML file.
	#[arg(short, long)]
	config: PathBuf,

	/// Raw voxel file (one byte per voxel), overrides the config source.
	#[arg(short, long)]
	voxels: Option<PathBuf>,
}

fn main() -> Result<()> {
	let args = Args::parse();
	let config_dir = args
		.config
		.parent()
		.unwrap_or(Path::new("."))
		.to_path_buf();

	println!("Loading config from: {}", args.config.display());
	let config = Config::load(&args.config)?;
	let source = config.source(&config_dir, args.voxels.as_deref())?;

	let builder = SparseGridBuilder::new(config.grid.clone());
	let (hierarchy, stats) = builder
		.build_with_stats(&source)
		.context("Building sparse grid hierarchy")?;

	print_levels(&hierarchy);
	println!("\nDone! {}", stats);

	Ok(())
}

/// One line per level, finest first.
fn print_levels(hierarchy: &GridHierarchy) {
	println!("\n{} level(s):", hierarchy.level_count());
	for id in hierarchy.ids() {
		let level = hierarchy.level(id);
		let grid = level.grid();
		let resolution = grid
			.lattice()
			.map(|lattice| lattice.resolution().as_array())
			.unwrap_or_default();
		let [inside, boundary] = grid.type_counts();
		println!(
			"  [{}] {:?} {:?}: {} cells ({} inside, {} boundary), {} points, {} edges, {} quads",
			id.index(),
			level.kind(),
			resolution,
			grid.cell_count(),
			inside,
			boundary,
			grid.point_count(),
			grid.edges().len(),
			grid.quads().len()
		);
	}
}
