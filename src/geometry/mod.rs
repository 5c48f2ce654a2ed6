//! Axis and direction primitives shared by the mesher and the tree.
//!
//! Both geometric cores index the same three axes, so the small vocabulary
//! for naming them and their signed directions lives here instead of being
//! duplicated in `mesh` and `tree`.

mod axis;

pub use axis::{Axis, RopeSide};
