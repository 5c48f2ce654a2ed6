//! Greedy meshing of a padded byte grid into merged axis-aligned [`Face`]s.
//!
//! See the [0fps article on greedy meshing](https://0fps.net/2012/06/30/meshing-in-a-minecraft-game/)
//! for the algorithm this sweeps: for each of the 3 axes, slide a plane
//! across every slab, build a 2D mask of the faces that plane would need,
//! and greedily merge the mask into the fewest rectangles.

mod face;
mod grid;
mod mask;

pub use face::Face;
pub use grid::pad_grid;

use mask::{build_mask, scan_and_emit};

/// Runs greedy meshing over a dense, padded voxel grid and reuses its
/// scratch mask buffer between calls.
///
/// Construct once per grid size and call [`GreedyMesher::mesh`] repeatedly;
/// the scratch buffer is only reallocated if the size changes.
pub struct GreedyMesher {
    dims: [i32; 3],
    mask: Vec<i32>,
}

impl GreedyMesher {
    /// `dims` is the nominal, unpadded volume size; each axis must be in
    /// `1..=255`. `Face` coordinates (`p`, `u1`, `v1`) are `u8`, so a boundary
    /// slab or a full-width run at `dims[axis] == 256` would need to encode
    /// `256` and silently wrap to `0`; capping at 255 keeps every emitted
    /// coordinate representable.
    pub fn new(dims: [usize; 3]) -> Self {
        for &d in &dims {
            assert!(
                (1..=255).contains(&d),
                "grid axis extent {d} out of range [1,255] (256 would overflow a Face's u8 coordinate)"
            );
        }
        let [dx, dy, dz] = dims;
        let mask_len = (dy * dz).max(dz * dx).max(dx * dy);
        Self {
            dims: [dx as i32, dy as i32, dz as i32],
            mask: vec![0; mask_len],
        }
    }

    /// Meshes `grid` (a padded `(dx+2)(dy+2)(dz+2)` byte array, see the
    /// crate's grid layout) and appends merged [`Face`]s to `out`. `out` is
    /// not cleared first, so callers can accumulate faces from multiple
    /// grids into one buffer.
    ///
    /// When `single_opaque` is set, every nonzero cell is treated as the
    /// same material for merging purposes, so any two opaque cells merge
    /// regardless of their actual material id.
    pub fn mesh(&mut self, grid: &[u8], single_opaque: bool, out: &mut Vec<Face>) {
        let dims = self.dims;
        let expected = ((dims[0] + 2) * (dims[1] + 2) * (dims[2] + 2)) as usize;
        assert_eq!(
            grid.len(),
            expected,
            "grid buffer size {} does not match padded volume {expected} for dims {dims:?}",
            grid.len(),
        );

        let _span = tracing::debug_span!("greedy_mesh", dx = dims[0], dy = dims[1], dz = dims[2]).entered();
        for d in 0..3 {
            self.mesh_axis(grid, d, single_opaque, out);
        }
    }

    fn mesh_axis(&mut self, grid: &[u8], d: usize, single_opaque: bool, out: &mut Vec<Face>) {
        let u = (d + 1) % 3;
        let v = (d + 2) % 3;
        let dims = self.dims;
        let du = dims[u];
        let dv = dims[v];
        let mask = &mut self.mask[..(du * dv) as usize];

        for slab in -1..dims[d] {
            build_mask(grid, dims, d, u, v, slab, single_opaque, mask);
            let p = (slab + 1) as u8;
            tracing::trace!(axis = d, slab, "scanning mask slab");
            scan_and_emit(mask, du, dv, d, p, out);
        }
    }
}
