use crate::geometry::Axis;

/// One merged, axis-aligned quad produced by [`GreedyMesher::mesh`](crate::mesh::GreedyMesher::mesh).
///
/// `(u0,v0)-(u1,v1)` is the rectangle in the plane's two in-plane axes, using
/// the exclusive-upper-bound convention: the rectangle covers cells
/// `[u0,u1) x [v0,v1)`. `p` is the slice coordinate along the plane's normal
/// axis, and `s` packs the normal axis and its sign as `axis*2 + side` with
/// `side` `0` for the negative-facing side and `1` for the positive-facing
/// side.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub u0: u8,
    pub v0: u8,
    pub u1: u8,
    pub v1: u8,
    pub p: u8,
    pub s: u8,
}

impl Face {
    /// The axis this face's normal points along.
    #[inline]
    pub fn axis(&self) -> Axis {
        Axis::from_index((self.s / 2) as usize)
    }

    /// `true` if the normal points in the positive direction of [`Face::axis`].
    #[inline]
    pub fn positive_side(&self) -> bool {
        self.s % 2 == 1
    }

    /// Width of the rectangle along its `u` axis.
    #[inline]
    pub fn width(&self) -> u8 {
        self.u1 - self.u0
    }

    /// Height of the rectangle along its `v` axis.
    #[inline]
    pub fn height(&self) -> u8 {
        self.v1 - self.v0
    }

    /// Area of the rectangle, in cells.
    #[inline]
    pub fn area(&self) -> u32 {
        self.width() as u32 * self.height() as u32
    }
}
