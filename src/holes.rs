//! Fusing hole rings into the outer ring through bridges.

use alloc::vec::Vec;
use core::cmp::Ordering;

use num_traits::float::Float;

use crate::builder::{build_ring, remove_collinear};
use crate::predicates::{locally_inside, point_in_triangle, sector_contains_sector};
use crate::ring::{Pool, VertexId};

/// Links every hole ring into the outer ring, left to right, producing one
/// ring without holes.
///
/// `hole_starts` are offsets into `coords`; each hole ends where the next one
/// starts. `queue` is scratch space. Returns `None` if the fused ring
/// collapsed entirely.
pub(crate) fn eliminate_holes<T: Float>(
    pool: &mut Pool<T>,
    coords: &[[T; 2]],
    ids: &[u32],
    hole_starts: &[usize],
    mut outer: VertexId,
    queue: &mut Vec<VertexId>,
) -> Option<VertexId> {
    queue.clear();
    for (i, &start) in hole_starts.iter().enumerate() {
        let end = hole_starts.get(i + 1).copied().unwrap_or(coords.len());
        let Some(ring) = build_ring(pool, coords, ids, start, end, false) else {
            continue;
        };
        if pool[ring].next == ring {
            // a point hole must survive until it is bridged
            pool[ring].steiner = true;
        }
        queue.push(leftmost(pool, ring));
    }

    queue.sort_by(|&a, &b| pool[a].x.partial_cmp(&pool[b].x).unwrap_or(Ordering::Equal));

    for &hole in queue.iter() {
        outer = eliminate_hole(pool, hole, outer)?;
    }
    Some(outer)
}

/// Bridges a single hole into the outer ring. A hole without any bridge is
/// left out and the outer ring is returned unchanged.
fn eliminate_hole<T: Float>(
    pool: &mut Pool<T>,
    hole: VertexId,
    outer: VertexId,
) -> Option<VertexId> {
    let Some(bridge) = find_hole_bridge(pool, hole, outer) else {
        log::debug!(
            "no bridge found for hole at vertex {}, dropping it",
            pool[hole].index
        );
        return Some(outer);
    };
    let bridge_back = pool.split(bridge, hole);

    // clean up around both ends of the cut
    let end = pool[bridge_back].next;
    remove_collinear(pool, bridge_back, Some(end));
    let end = pool[bridge].next;
    remove_collinear(pool, bridge, Some(end))
}

/// Lowest x, ties broken by lowest y.
pub(crate) fn leftmost<T: Float>(pool: &Pool<T>, start: VertexId) -> VertexId {
    let mut best = start;
    let mut p = pool[start].next;
    while p != start {
        let (v, b) = (&pool[p], &pool[best]);
        if v.x < b.x || (v.x == b.x && v.y < b.y) {
            best = p;
        }
        p = v.next;
    }
    best
}

/// Finds an outer ring vertex that the hole vertex `hole` can be connected to
/// without crossing any edge (David Eberly's ray-casting method).
pub(crate) fn find_hole_bridge<T: Float>(
    pool: &Pool<T>,
    hole: VertexId,
    outer: VertexId,
) -> Option<VertexId> {
    let h = &pool[hole];
    let (hx, hy) = (h.x, h.y);

    // cast a ray to the left and keep the closest edge it hits; the hit
    // edge's endpoint with the smaller x is the first candidate
    let mut qx = T::neg_infinity();
    let mut candidate = None;
    let mut p = outer;
    loop {
        let (v, n) = (&pool[p], &pool[pool[p].next]);
        if hy <= v.y && hy >= n.y && n.y != v.y {
            let x = v.x + (hy - v.y) * (n.x - v.x) / (n.y - v.y);
            if x <= hx && x > qx {
                qx = x;
                let m = if v.x < n.x { p } else { v.next };
                if x == hx {
                    // the hole touches this edge
                    return Some(m);
                }
                candidate = Some(m);
            }
        }
        p = v.next;
        if p == outer {
            break;
        }
    }
    let mut m = candidate?;

    // vertices inside the triangle (hole, hit point, candidate) would block
    // the bridge; among them pick the one closest in angle to the ray
    let stop = m;
    let [mx, my] = pool[m].xy();
    let (left, right) = if hy < my { (hx, qx) } else { (qx, hx) };
    let mut tan_min = T::infinity();
    let mut p = m;
    loop {
        let v = &pool[p];
        if hx >= v.x
            && v.x >= mx
            && hx != v.x
            && point_in_triangle([left, hy], [mx, my], [right, hy], v.xy())
        {
            let tan = (hy - v.y).abs() / (hx - v.x);
            let better = tan < tan_min
                || (tan == tan_min
                    && (v.x > pool[m].x
                        || (v.x == pool[m].x && sector_contains_sector(pool, m, p))));
            if better && locally_inside(pool, p, hole) {
                m = p;
                tan_min = tan;
            }
        }
        p = v.next;
        if p == stop {
            return Some(m);
        }
    }
}
