//! Build pipeline benchmarks.
//!
//! Measures the stages of a sparse grid build on a box mesh and a voxel
//! ball:
//! - **classify**: triangle marking + outside flood fill
//! - **build**: full build including extraction and aggregation
//! - **virtual**: cost of internally refined levels

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use glam::DVec3;
use sparse_grid::{
  classify_mesh, BoundingBox, GridConfig, GridSource, RegularLattice, Resolution,
  SparseGridBuilder, SurfaceMesh, VoxelMask,
};

// =============================================================================
// Inputs
// =============================================================================

fn box_mesh() -> SurfaceMesh {
  SurfaceMesh::cuboid(DVec3::splat(0.13), DVec3::splat(0.87))
}

fn unit_bounds() -> BoundingBox {
  BoundingBox::new(DVec3::ZERO, DVec3::ONE)
}

fn ball_mask(n: usize) -> VoxelMask {
  let c = n as f64 * 0.5;
  VoxelMask::from_fn(Resolution::splat(n), |x, y, z| {
    let p = DVec3::new(x as f64 + 0.5, y as f64 + 0.5, z as f64 + 0.5);
    p.distance(DVec3::splat(c)) <= c * 0.8
  })
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_classify(c: &mut Criterion) {
  let mut group = c.benchmark_group("classify_mesh");
  let mesh = box_mesh();

  for n in [16usize, 32, 64] {
    let lattice = RegularLattice::new(unit_bounds(), Resolution::splat(n)).unwrap();
    group.throughput(Throughput::Elements(lattice.cell_count() as u64));
    group.bench_with_input(BenchmarkId::from_parameter(n), &lattice, |b, lattice| {
      b.iter(|| black_box(classify_mesh(lattice, &mesh).unwrap()))
    });
  }

  group.finish();
}

fn bench_build(c: &mut Criterion) {
  let mut group = c.benchmark_group("build");
  let sources: [(&str, GridSource); 2] = [
    ("mesh", box_mesh().into()),
    ("voxels", ball_mask(32).into()),
  ];

  for (name, source) in &sources {
    let config = GridConfig::new()
      .with_resolution(Resolution::splat(32))
      .with_bounding_box(unit_bounds());
    let builder = SparseGridBuilder::new(config);
    group.bench_function(*name, |b| {
      b.iter(|| black_box(builder.build(source).unwrap()))
    });
  }

  group.finish();
}

fn bench_virtual_levels(c: &mut Criterion) {
  let mut group = c.benchmark_group("virtual_levels");
  let source: GridSource = box_mesh().into();

  for levels in [0u32, 1, 2] {
    let config = GridConfig::new()
      .with_resolution(Resolution::splat(16))
      .with_bounding_box(unit_bounds())
      .with_virtual_finer_levels(levels);
    let builder = SparseGridBuilder::new(config);
    group.bench_with_input(BenchmarkId::from_parameter(levels), &levels, |b, _| {
      b.iter(|| black_box(builder.build(&source).unwrap()))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_classify, bench_build, bench_virtual_levels);
criterion_main!(benches);
