use super::grid::cell;
use super::Face;

/// Builds the 2D mask for the slab at `slab` along axis `d` (`u`/`v` are the
/// two in-plane axes, `(d+1)%3` and `(d+2)%3`). `mask` must have room for
/// `dims[u] * dims[v]` entries and is fully overwritten.
///
/// Entry `(i,j)` is `0` if both cells straddling the slab agree on
/// emptiness, the (possibly collapsed) material id of the negative cell if
/// only the positive cell is empty (negated, face points `-d`), or the
/// material id of the positive cell if only the negative cell is empty (face
/// points `+d`).
pub(super) fn build_mask(
    grid: &[u8],
    dims: [i32; 3],
    d: usize,
    u: usize,
    v: usize,
    slab: i32,
    single_opaque: bool,
    mask: &mut [i32],
) {
    let du = dims[u];
    let mut coord = [0i32; 3];
    for j in 0..dims[v] {
        for i in 0..du {
            coord[d] = slab;
            coord[u] = i;
            coord[v] = j;
            let a = cell(grid, dims, coord);
            coord[d] = slab + 1;
            let b = cell(grid, dims, coord);

            let idx = (j * du + i) as usize;
            mask[idx] = if (a == 0) == (b == 0) {
                0
            } else if a != 0 {
                if single_opaque {
                    1
                } else {
                    a as i32
                }
            } else {
                -(if single_opaque { 1 } else { b as i32 })
            };
        }
    }
}

/// Greedily merges runs of equal nonzero mask entries into rectangles,
/// zeroing each rectangle as it's consumed, and appends one [`Face`] per
/// rectangle to `out`. `du`/`dv` are the mask's dimensions; `p` is the
/// emitted plane coordinate (`slab + 1`).
pub(super) fn scan_and_emit(mask: &mut [i32], du: i32, dv: i32, d: usize, p: u8, out: &mut Vec<Face>) {
    let mut j = 0;
    while j < dv {
        let mut i = 0;
        while i < du {
            let idx = (j * du + i) as usize;
            let c = mask[idx];
            if c == 0 {
                i += 1;
                continue;
            }

            let mut w = 1;
            while i + w < du && mask[(j * du + i + w) as usize] == c {
                w += 1;
            }

            let mut h = 1;
            'grow_height: while j + h < dv {
                for k in 0..w {
                    if mask[((j + h) * du + i + k) as usize] != c {
                        break 'grow_height;
                    }
                }
                h += 1;
            }

            out.push(Face {
                u0: i as u8,
                v0: j as u8,
                u1: (i + w) as u8,
                v1: (j + h) as u8,
                p,
                s: (d as u8) * 2 + (c > 0) as u8,
            });

            for hh in 0..h {
                for ww in 0..w {
                    mask[((j + hh) * du + i + ww) as usize] = 0;
                }
            }
            i += w;
        }
        j += 1;
    }
}
