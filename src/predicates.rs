//! Orientation, containment and visibility tests shared by the hole merger
//! and the ear-clipping engine.

use num_traits::float::Float;

use crate::ring::{Pool, Vertex, VertexId};

/// Twice the signed area of the triangle `p, q, r`.
///
/// Negative when the ring turns convex at `q` in the winding used for the
/// outer ring.
#[inline]
pub(crate) fn area<T: Float>(p: &Vertex<T>, q: &Vertex<T>, r: &Vertex<T>) -> T {
    (q.y - p.y) * (r.x - q.x) - (q.x - p.x) * (r.y - q.y)
}

#[inline]
pub(crate) fn equals<T: Float>(a: &Vertex<T>, b: &Vertex<T>) -> bool {
    a.x == b.x && a.y == b.y
}

#[inline]
pub(crate) fn sign<T: Float>(v: T) -> i8 {
    (v > T::zero()) as i8 - (v < T::zero()) as i8
}

/// Whether `p` lies inside (or on the border of) the triangle `a, b, c`.
#[inline]
pub(crate) fn point_in_triangle<T: Float>(
    [ax, ay]: [T; 2],
    [bx, by]: [T; 2],
    [cx, cy]: [T; 2],
    [px, py]: [T; 2],
) -> bool {
    (cx - px) * (ay - py) >= (ax - px) * (cy - py)
        && (ax - px) * (by - py) >= (bx - px) * (ay - py)
        && (bx - px) * (cy - py) >= (cx - px) * (by - py)
}

/// Axis-aligned box, used as a cheap reject ahead of [`point_in_triangle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Bounds<T> {
    pub min_x: T,
    pub min_y: T,
    pub max_x: T,
    pub max_y: T,
}

impl<T: Float> Bounds<T> {
    pub fn of_triangle(a: &Vertex<T>, b: &Vertex<T>, c: &Vertex<T>) -> Self {
        Self {
            min_x: a.x.min(b.x).min(c.x),
            min_y: a.y.min(b.y).min(c.y),
            max_x: a.x.max(b.x).max(c.x),
            max_y: a.y.max(b.y).max(c.y),
        }
    }

    #[inline]
    pub fn contains(&self, v: &Vertex<T>) -> bool {
        v.x >= self.min_x && v.x <= self.max_x && v.y >= self.min_y && v.y <= self.max_y
    }
}

/// For collinear `p, q, r`: whether `q` lies on the segment `pr`.
fn on_segment<T: Float>(p: &Vertex<T>, q: &Vertex<T>, r: &Vertex<T>) -> bool {
    q.x <= p.x.max(r.x) && q.x >= p.x.min(r.x) && q.y <= p.y.max(r.y) && q.y >= p.y.min(r.y)
}

/// Whether the segments `p1 q1` and `p2 q2` intersect, touching included.
pub(crate) fn intersects<T: Float>(
    p1: &Vertex<T>,
    q1: &Vertex<T>,
    p2: &Vertex<T>,
    q2: &Vertex<T>,
) -> bool {
    let o1 = sign(area(p1, q1, p2));
    let o2 = sign(area(p1, q1, q2));
    let o3 = sign(area(p2, q2, p1));
    let o4 = sign(area(p2, q2, q1));

    if o1 != o2 && o3 != o4 {
        return true;
    }
    (o1 == 0 && on_segment(p1, p2, q1))
        || (o2 == 0 && on_segment(p1, q2, q1))
        || (o3 == 0 && on_segment(p2, p1, q2))
        || (o4 == 0 && on_segment(p2, q1, q2))
}

/// Whether the diagonal `a b` crosses any ring edge not incident to `a` or `b`.
pub(crate) fn intersects_ring<T: Float>(pool: &Pool<T>, a: VertexId, b: VertexId) -> bool {
    let (va, vb) = (&pool[a], &pool[b]);
    let mut p = a;
    loop {
        let (vp, vn) = (&pool[p], &pool[pool[p].next]);
        let touches = vp.index == va.index
            || vp.index == vb.index
            || vn.index == va.index
            || vn.index == vb.index;
        if !touches && intersects(vp, vn, va, vb) {
            return true;
        }
        p = vp.next;
        if p == a {
            return false;
        }
    }
}

/// Whether the diagonal from `a` towards `b` starts inside the polygon,
/// judged only from the corner at `a`.
pub(crate) fn locally_inside<T: Float>(pool: &Pool<T>, a: VertexId, b: VertexId) -> bool {
    let va = &pool[a];
    let (prev, next, vb) = (&pool[va.prev], &pool[va.next], &pool[b]);
    if area(prev, va, next) < T::zero() {
        area(va, vb, next) >= T::zero() && area(va, prev, vb) >= T::zero()
    } else {
        area(va, vb, prev) < T::zero() || area(va, next, vb) < T::zero()
    }
}

/// Even-odd test of the midpoint of `a b` against the ring through `a`.
pub(crate) fn middle_inside<T: Float>(pool: &Pool<T>, a: VertexId, b: VertexId) -> bool {
    let two = T::one() + T::one();
    let mx = (pool[a].x + pool[b].x) / two;
    let my = (pool[a].y + pool[b].y) / two;
    let mut inside = false;
    let mut p = a;
    loop {
        let vp = &pool[p];
        let vn = &pool[vp.next];
        if (vp.y > my) != (vn.y > my)
            && vn.y != vp.y
            && mx < (vn.x - vp.x) * (my - vp.y) / (vn.y - vp.y) + vp.x
        {
            inside = !inside;
        }
        p = vp.next;
        if p == a {
            return inside;
        }
    }
}

/// Whether the sector at `m` contains the sector at `p`, both at the same spot.
pub(crate) fn sector_contains_sector<T: Float>(pool: &Pool<T>, m: VertexId, p: VertexId) -> bool {
    let (vm, vp) = (&pool[m], &pool[p]);
    area(&pool[vm.prev], vm, &pool[vp.prev]) < T::zero()
        && area(&pool[vp.next], vm, &pool[vm.next]) < T::zero()
}

/// Whether `a b` is a diagonal that can split the ring into two valid rings.
pub(crate) fn is_valid_diagonal<T: Float>(pool: &Pool<T>, a: VertexId, b: VertexId) -> bool {
    let (va, vb) = (&pool[a], &pool[b]);
    let (a_prev, a_next) = (&pool[va.prev], &pool[va.next]);
    let (b_prev, b_next) = (&pool[vb.prev], &pool[vb.next]);

    if a_next.index == vb.index || a_prev.index == vb.index || intersects_ring(pool, a, b) {
        return false;
    }

    let visible = locally_inside(pool, a, b) && locally_inside(pool, b, a) && middle_inside(pool, a, b);
    let opposite_sectors = area(a_prev, va, b_prev) == T::zero() && area(va, b_prev, vb) == T::zero();
    if visible && !opposite_sectors {
        return true;
    }

    // zero-length diagonal between two convex corners at the same spot
    equals(va, vb) && area(a_prev, va, a_next) > T::zero() && area(b_prev, vb, b_next) > T::zero()
}
