/// Index into a grid padded by one cell on every side, per the addressing
/// convention `grid[x+1 + (dx+2)*(y+1 + (dy+2)*(z+1))]`.
///
/// `coord` may range over `-1..=dims[axis]` on each axis; `-1` and
/// `dims[axis]` read into the pad.
#[inline]
pub(super) fn padded_index(dims: [i32; 3], coord: [i32; 3]) -> usize {
    let [dx, dy, dz] = dims;
    let x = coord[0] + 1;
    let y = coord[1] + 1;
    let z = coord[2] + 1;
    debug_assert!((0..dx + 2).contains(&x));
    debug_assert!((0..dy + 2).contains(&y));
    debug_assert!((0..dz + 2).contains(&z));
    (x + (dx + 2) * (y + (dy + 2) * z)) as usize
}

#[inline]
pub(super) fn cell(grid: &[u8], dims: [i32; 3], coord: [i32; 3]) -> u8 {
    grid[padded_index(dims, coord)]
}

/// Builds a padded grid (value `0` on the one-cell border) from a dense
/// `dx*dy*dz` interior slice in `x + dx*(y + dy*z)` order. Convenience for
/// callers and tests; the mesher itself only ever reads the padded form.
pub fn pad_grid(dims: [usize; 3], interior: &[u8]) -> Vec<u8> {
    let [dx, dy, dz] = dims;
    assert_eq!(interior.len(), dx * dy * dz, "interior slice does not match dims");
    let padded_dims = [dx as i32, dy as i32, dz as i32];
    let mut grid = vec![0u8; (dx + 2) * (dy + 2) * (dz + 2)];
    for z in 0..dz {
        for y in 0..dy {
            for x in 0..dx {
                let src = x + dx * (y + dy * z);
                let dst = padded_index(padded_dims, [x as i32, y as i32, z as i32]);
                grid[dst] = interior[src];
            }
        }
    }
    grid
}
