//! [![Crates.io](https://img.shields.io/crates/v/voxel-geo.svg)](https://crates.io/crates/voxel-geo)
//! [![Docs.rs](https://docs.rs/voxel-geo/badge.svg)](https://docs.rs/voxel-geo)
//!
//! The two geometric cores of a voxel rendering pipeline, with everything
//! that sits around them (OpenGL binding, shaders, camera, palettes, CLI)
//! left to the caller.
//!
//! - [`mesh`]: greedy meshing of a dense padded byte grid into merged
//!   [`Face`](mesh::Face) rectangles.
//! - [`tree`]: a split-KD-tree over axis-aligned [`Boundable`](tree::Boundable)
//!   primitives, with rope links between leaves for O(1) neighbor traversal.
//!
//! # Example: meshing a single solid cell
//!
//! ```
//! use voxel_geo::mesh::GreedyMesher;
//!
//! // A 1x1x1 volume padded to 3x3x3.
//! let mut grid = vec![0u8; 3 * 3 * 3];
//! grid[1 + 3 * (1 + 3 * 1)] = 7;
//!
//! let mut mesher = GreedyMesher::new([1, 1, 1]);
//! let mut faces = Vec::new();
//! mesher.mesh(&grid, false, &mut faces);
//! assert_eq!(faces.len(), 6);
//! ```
//!
//! # Example: building a tree and following a rope
//!
//! ```
//! use voxel_geo::tree::{KdTreeBuilder, Voxel};
//!
//! // Two voxels per side so a split is actually needed (a leaf holds at
//! // most 2 primitives), with a wide gap between the two clusters.
//! let voxels = vec![
//!     Voxel::new(0, 0, 0, 0, 0, 0, 1, 0b0011_1111),
//!     Voxel::new(1, 0, 0, 0, 0, 0, 1, 0b0011_1111),
//!     Voxel::new(10, 0, 0, 0, 0, 0, 2, 0b0011_1111),
//!     Voxel::new(11, 0, 0, 0, 0, 0, 2, 0b0011_1111),
//! ];
//! let tree = KdTreeBuilder::new().build(voxels, 16);
//! assert_eq!(tree.leaf_count(), 2);
//!
//! let leaf = tree.find_leaf([0.5, 0.0, 0.0]);
//! let neighbor = tree.ropes(leaf)[voxel_geo::RopeSide::PosX.index()];
//! assert!(neighbor.is_some());
//! ```

pub mod geometry;
pub mod mesh;
pub mod tree;

pub use geometry::{Axis, RopeSide};
pub use mesh::{Face, GreedyMesher};
pub use tree::{Boundable, KdTree, KdTreeBuilder, Voxel};

pub use ilattice;
