//! Configuration parsing for grid inspection runs.

use anyhow::{bail, Context, Result};
use glam::DVec3;
use serde::Deserialize;
use sparse_grid::{GridConfig, GridSource, Resolution, SurfaceMesh, VoxelMask};
use std::path::Path;

/// Root configuration for one inspection run.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	/// Build options passed to the library.
	#[serde(default)]
	pub grid: GridConfig,
	/// Procedural box mesh source.
	pub mesh: Option<BoxMesh>,
	/// Raw voxel file layout.
	pub voxels: Option<VoxelLayout>,
}

/// Closed axis-aligned box used as the surface mesh.
#[derive(Debug, Deserialize)]
pub struct BoxMesh {
	/// Minimum corner.
	pub min: [f64; 3],
	/// Maximum corner.
	pub max: [f64; 3],
}

/// Layout of a raw voxel byte file (one byte per voxel, X fastest).
#[derive(Debug, Deserialize)]
pub struct VoxelLayout {
	/// Voxels per axis.
	pub dims: [usize; 3],
	/// Physical size of one voxel.
	#[serde(default = "default_voxel_size")]
	pub voxel_size: [f64; 3],
	/// World position of the volume's min corner.
	#[serde(default)]
	pub origin: [f64; 3],
	/// Voxel file relative to the config file (overridden by `--voxels`).
	pub path: Option<String>,
}

fn default_voxel_size() -> [f64; 3] {
	[1.0, 1.0, 1.0]
}

impl Config {
	/// Load configuration from a TOML file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read config: {}", path.display()))?;
		toml::from_str(&content)
			.with_context(|| format!("Failed to parse config: {}", path.display()))
	}

	/// Resolve the build source.
	///
	/// A voxel file (from `--voxels` or `[voxels].path`) wins over `[mesh]`.
	pub fn source(&self, config_dir: &Path, voxels: Option<&Path>) -> Result<GridSource> {
		let voxel_path = voxels.map(Path::to_path_buf).or_else(|| {
			self.voxels
				.as_ref()
				.and_then(|layout| layout.path.as_ref())
				.map(|path| config_dir.join(path))
		});

		if let Some(path) = voxel_path {
			let Some(layout) = &self.voxels else {
				bail!("A voxel file needs a [voxels] section with its dims");
			};
			let data = std::fs::read(&path)
				.with_context(|| format!("Failed to read voxels: {}", path.display()))?;
			let mask = VoxelMask::new(Resolution::from(layout.dims), data)
				.with_voxel_size(DVec3::from_array(layout.voxel_size))
				.with_origin(DVec3::from_array(layout.origin));
			return Ok(mask.into());
		}

		match &self.mesh {
			Some(mesh) => Ok(SurfaceMesh::cuboid(
				DVec3::from_array(mesh.min),
				DVec3::from_array(mesh.max),
			)
			.into()),
			None => bail!("Config needs a [mesh] or [voxels] source"),
		}
	}
}
