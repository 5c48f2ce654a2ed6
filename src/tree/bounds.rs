use ilattice::glam::IVec3;

use crate::geometry::Axis;

use super::Boundable;

/// An axis-aligned integer bounding box: `min..max`, `max` exclusive per
/// axis, matching the [`Boundable`] convention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aabb {
    min: IVec3,
    max: IVec3,
}

impl Aabb {
    pub fn new(min: [i32; 3], max: [i32; 3]) -> Self {
        Self {
            min: IVec3::from(min),
            max: IVec3::from(max),
        }
    }

    #[inline]
    pub fn min(&self, axis: Axis) -> i32 {
        self.min.to_array()[axis.index()]
    }

    #[inline]
    pub fn max(&self, axis: Axis) -> i32 {
        self.max.to_array()[axis.index()]
    }

    pub fn set_min(&mut self, axis: Axis, v: i32) {
        let mut a = self.min.to_array();
        a[axis.index()] = v;
        self.min = IVec3::from(a);
    }

    pub fn set_max(&mut self, axis: Axis, v: i32) {
        let mut a = self.max.to_array();
        a[axis.index()] = v;
        self.max = IVec3::from(a);
    }

    /// Componentwise union of two boxes.
    pub fn union(&self, other: &Aabb) -> Aabb {
        Aabb {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// `true` iff `other` is fully contained within `self`, per axis.
    pub fn contains(&self, other: &Aabb) -> bool {
        [Axis::X, Axis::Y, Axis::Z]
            .into_iter()
            .all(|a| self.min(a) <= other.min(a) && self.max(a) >= other.max(a))
    }

    /// Narrows this box to `min(axis)..splitPos`, the shape left children
    /// are given after a split on `axis` at `pos`.
    pub fn narrowed_left(&self, axis: Axis, pos: i32) -> Aabb {
        let mut b = *self;
        b.set_max(axis, pos);
        b
    }

    /// Narrows this box to `splitPos..max(axis)`, the shape right children
    /// are given after a split on `axis` at `pos`.
    pub fn narrowed_right(&self, axis: Axis, pos: i32) -> Aabb {
        let mut b = *self;
        b.set_min(axis, pos);
        b
    }
}

impl Boundable for Aabb {
    fn min(&self, axis: Axis) -> i32 {
        Aabb::min(self, axis)
    }

    fn max(&self, axis: Axis) -> i32 {
        Aabb::max(self, axis)
    }

    fn split_left(&self, _axis: Axis, _pos: i32) -> Self {
        panic!("Box does not support splitLeft/splitRight; only primitives placed in tree leaves do")
    }

    fn split_right(&self, _axis: Axis, _pos: i32) -> Self {
        panic!("Box does not support splitLeft/splitRight; only primitives placed in tree leaves do")
    }
}
