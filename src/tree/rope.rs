use crate::geometry::RopeSide;

use super::{Boundable, Node, NodeKind};

pub(super) type Ropes = [Option<usize>; 6];

/// Top-down propagation: every child inherits its parent's ropes, with the
/// rope facing the split plane overridden to point at its sibling. Leaves
/// simply keep whatever array they're handed.
pub(super) fn propagate<B: Boundable>(nodes: &mut [Node<B>], root: usize, external: Ropes) {
    propagate_node(nodes, root, external);
}

fn propagate_node<B: Boundable>(nodes: &mut [Node<B>], idx: usize, ropes: Ropes) {
    match &mut nodes[idx].kind {
        NodeKind::Leaf { ropes: slot, .. } => {
            *slot = ropes;
        }
        NodeKind::Interior { axis, left, right, .. } => {
            let axis = *axis;
            let (left, right) = (*left, *right);

            let mut left_ropes = ropes;
            left_ropes[RopeSide::new(axis, true).index()] = Some(right);

            let mut right_ropes = ropes;
            right_ropes[RopeSide::new(axis, false).index()] = Some(left);

            propagate_node(nodes, left, left_ropes);
            propagate_node(nodes, right, right_ropes);
        }
    }
}

/// Shortens every leaf's ropes to the tightest enclosing node, per leaf.
pub(super) fn optimize<B: Boundable>(nodes: &mut [Node<B>]) {
    let leaf_indices: Vec<usize> = (0..nodes.len())
        .filter(|&i| matches!(nodes[i].kind, NodeKind::Leaf { .. }))
        .collect();

    for leaf_idx in leaf_indices {
        let leaf_bbox = nodes[leaf_idx].bbox;
        let ropes = match &nodes[leaf_idx].kind {
            NodeKind::Leaf { ropes, .. } => *ropes,
            NodeKind::Interior { .. } => unreachable!(),
        };

        let mut shortened = ropes;
        for side in RopeSide::ALL {
            if let Some(start) = ropes[side.index()] {
                shortened[side.index()] = Some(shorten(nodes, &leaf_bbox, side, start));
            }
        }

        if let NodeKind::Leaf { ropes, .. } = &mut nodes[leaf_idx].kind {
            *ropes = shortened;
        }
    }
}

fn shorten<B: Boundable>(nodes: &[Node<B>], leaf_bbox: &super::Aabb, side: RopeSide, mut r: usize) -> usize {
    loop {
        match &nodes[r].kind {
            NodeKind::Leaf { .. } => return r,
            NodeKind::Interior {
                axis, pos, left, right, ..
            } => {
                let parallel = side.parallel_sign(*axis);
                if parallel == 1 {
                    r = *left;
                } else if parallel == -1 {
                    r = *right;
                } else if *pos < leaf_bbox.min(*axis) {
                    r = *right;
                } else if *pos > leaf_bbox.max(*axis) {
                    r = *left;
                } else {
                    // The split plane crosses `leaf_bbox`'s face on this
                    // side: more than one neighbor abuts it, so `r` is the
                    // tightest node that covers all of them.
                    return r;
                }
            }
        }
    }
}
