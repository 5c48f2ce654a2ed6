use crate::geometry::Axis;

use super::{Boundable, Node, NodeKind};

/// Descends from `root` following split comparisons only, with no bounds
/// check against the tree's own root box: a point outside the tree entirely
/// still resolves to whichever leaf its coordinates would fall into.
pub(super) fn find_node<B: Boundable>(nodes: &[Node<B>], root: usize, p: [f64; 3]) -> usize {
    let mut idx = root;
    loop {
        match &nodes[idx].kind {
            NodeKind::Leaf { .. } => return idx,
            NodeKind::Interior { axis, pos, left, right, .. } => {
                let coord = p[axis.index()];
                idx = if coord < *pos as f64 { *left } else { *right };
            }
        }
    }
}

/// Collects every primitive in the subtree rooted at `idx` whose bounding box
/// overlaps the closed query box `min..=max`, pruning subtrees whose bbox
/// misses entirely.
pub(super) fn intersecting<'a, B: Boundable>(
    nodes: &'a [Node<B>],
    idx: usize,
    min: [f32; 3],
    max: [f32; 3],
    out: &mut Vec<&'a B>,
) {
    if !box_intersects(&nodes[idx].bbox, min, max) {
        return;
    }
    match &nodes[idx].kind {
        NodeKind::Leaf { primitives, .. } => {
            out.extend(primitives.iter().filter(|p| p.intersects(min, max)));
        }
        NodeKind::Interior { left, right, .. } => {
            intersecting(nodes, *left, min, max, out);
            intersecting(nodes, *right, min, max, out);
        }
    }
}

fn box_intersects(bbox: &super::Aabb, min: [f32; 3], max: [f32; 3]) -> bool {
    [Axis::X, Axis::Y, Axis::Z].into_iter().all(|a| {
        let i = a.index();
        bbox.max(a) as f32 >= min[i] && bbox.min(a) as f32 <= max[i]
    })
}
