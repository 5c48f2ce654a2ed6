/// Either the X, Y, or Z axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// The index for a point's component on this axis.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// The axis that comes `n` steps after this one, wrapping `Z -> X`.
    #[inline]
    pub fn rotate(self, n: usize) -> Self {
        Self::from_index((self.index() + n) % 3)
    }

    #[inline]
    pub fn from_index(i: usize) -> Self {
        match i {
            0 => Axis::X,
            1 => Axis::Y,
            2 => Axis::Z,
            _ => panic!("axis index {i} out of range [0,2]"),
        }
    }
}

/// One of the six oriented faces of a voxel: `{+X, -X, +Y, -Y, +Z, -Z}`.
///
/// This is the rope slot index from the split-KD-tree component: `s = axis*2
/// + side` in the mesher's [`Face`](crate::mesh::Face) encodes the same pair
/// but in `{axis, side}` order rather than this enum's `{+X=0, -X=1, ...}`
/// order, since the two components were specified independently.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum RopeSide {
    PosX = 0,
    NegX = 1,
    PosY = 2,
    NegY = 3,
    PosZ = 4,
    NegZ = 5,
}

impl RopeSide {
    pub const ALL: [RopeSide; 6] = [
        RopeSide::PosX,
        RopeSide::NegX,
        RopeSide::PosY,
        RopeSide::NegY,
        RopeSide::PosZ,
        RopeSide::NegZ,
    ];

    #[inline]
    pub fn new(axis: Axis, positive: bool) -> Self {
        match (axis, positive) {
            (Axis::X, true) => RopeSide::PosX,
            (Axis::X, false) => RopeSide::NegX,
            (Axis::Y, true) => RopeSide::PosY,
            (Axis::Y, false) => RopeSide::NegY,
            (Axis::Z, true) => RopeSide::PosZ,
            (Axis::Z, false) => RopeSide::NegZ,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn axis(self) -> Axis {
        match self {
            RopeSide::PosX | RopeSide::NegX => Axis::X,
            RopeSide::PosY | RopeSide::NegY => Axis::Y,
            RopeSide::PosZ | RopeSide::NegZ => Axis::Z,
        }
    }

    #[inline]
    pub fn is_positive(self) -> bool {
        matches!(self, RopeSide::PosX | RopeSide::PosY | RopeSide::PosZ)
    }

    /// The opposite side, e.g. `+X` <-> `-X`.
    #[inline]
    pub fn opposite(self) -> Self {
        Self::new(self.axis(), !self.is_positive())
    }

    /// `+1` if `split_axis`'s positive direction agrees with this side,
    /// `-1` if it agrees with the negated direction, `0` if the split plane
    /// is perpendicular to this side (a different axis).
    #[inline]
    pub fn parallel_sign(self, split_axis: Axis) -> i32 {
        if split_axis != self.axis() {
            0
        } else if self.is_positive() {
            1
        } else {
            -1
        }
    }
}
