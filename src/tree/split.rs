use crate::geometry::Axis;

use super::{Aabb, Boundable};

pub(super) const VOXEL_INTERSECT_COST: f64 = 1.0;
pub(super) const NODE_INTERSECT_COST: f64 = 1.0;
pub(super) const MAX_PRIMS: usize = 2;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum EventKind {
    Start,
    End,
}

struct Event {
    pos: i32,
    kind: EventKind,
}

/// Picks the axis with the widest extent, x>y>z on ties.
pub(super) fn widest_axis(bbox: &Aabb) -> Axis {
    let xw = bbox.max(Axis::X) - bbox.min(Axis::X);
    let yw = bbox.max(Axis::Y) - bbox.min(Axis::Y);
    let zw = bbox.max(Axis::Z) - bbox.min(Axis::Z);
    if xw >= yw && xw >= zw {
        Axis::X
    } else if yw >= zw {
        Axis::Y
    } else {
        Axis::Z
    }
}

/// Finds a cost-minimizing split plane for `prims` within `bbox`, or `None`
/// if no plane beats leaving the node unsplit (the sweep's minimum lands on
/// the box's own boundary, or the box is degenerate on the widest axis).
///
/// Subsamples to at most 100 primitives for the sweep on large nodes, per
/// the cost model in the split-plane selection algorithm.
pub(super) fn find_split_plane<B: Boundable>(bbox: &Aabb, prims: &[B]) -> Option<(Axis, i32)> {
    let axis = widest_axis(bbox);
    let box_width = bbox.max(axis) - bbox.min(axis);
    if box_width <= 0 {
        return None;
    }

    let n = prims.len();
    let divisor = ((n as f64) / 100.0).ceil().max(1.0) as usize;
    let n_prims = (n / divisor) as f64;

    let mut events = Vec::with_capacity(2 * (n / divisor + 1));
    for (i, p) in prims.iter().enumerate() {
        if i % divisor != 0 {
            continue;
        }
        let p_min = p.min(axis);
        let p_max = p.max(axis);
        assert!(
            bbox.min(axis) <= p_min && p_max <= bbox.max(axis),
            "no intersection: primitive [{p_min},{p_max}) on {axis:?} is not contained in node bbox [{},{})",
            bbox.min(axis),
            bbox.max(axis)
        );
        events.push(Event {
            pos: p_min,
            kind: EventKind::Start,
        });
        events.push(Event {
            pos: p_max,
            kind: EventKind::End,
        });
    }

    // Stable, deterministic tie-break: position ascending, End before Start
    // at identical positions, so a primitive that ends exactly where another
    // starts is counted as closed before the new one opens.
    events.sort_by(|a, b| {
        a.pos.cmp(&b.pos).then_with(|| match (&a.kind, &b.kind) {
            (EventKind::End, EventKind::Start) => std::cmp::Ordering::Less,
            (EventKind::Start, EventKind::End) => std::cmp::Ordering::Greater,
            _ => std::cmp::Ordering::Equal,
        })
    });

    let mut open = 0.0f64;
    let mut done = 0.0f64;
    let mut best_cost = f64::INFINITY;
    let mut best_pos = None;

    for ev in &events {
        if ev.kind == EventKind::End {
            open -= 1.0;
            done += 1.0;
        }

        let alpha = (ev.pos - bbox.min(axis)) as f64 / box_width as f64;
        let cost = VOXEL_INTERSECT_COST
            + NODE_INTERSECT_COST * ((done + open) * alpha + (n_prims - done) * (1.0 - alpha));
        if cost < best_cost {
            best_cost = cost;
            best_pos = Some(ev.pos);
        }

        if ev.kind == EventKind::Start {
            open += 1.0;
        }
    }

    match best_pos {
        Some(pos) if pos > bbox.min(axis) && pos < bbox.max(axis) => Some((axis, pos)),
        _ => None,
    }
}
