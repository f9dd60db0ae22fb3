//! Turning flat point ranges into oriented rings, and cleaning rings up.

use num_traits::float::Float;

use crate::predicates::{area, equals};
use crate::ring::{Pool, VertexId};

/// Tolerance under which three vertices count as collinear, measured in the
/// z-order grid where the outer ring spans `0..=65535`.
const COLLINEAR_EPSILON: f64 = 1e-6;

/// The collinear tolerance for coordinates that map into the z-order grid
/// with `scale`, so that the filter removes the same vertices whether or not
/// the coordinates were rescaled.
pub(crate) fn collinear_tolerance<T: Float>(scale: T) -> T {
    let eps = T::from(COLLINEAR_EPSILON).unwrap_or_else(T::epsilon);
    let unit = scale.recip();
    let tolerance = eps * unit * unit;
    if tolerance.is_finite() {
        tolerance
    } else {
        eps
    }
}

/// Shoelace sum over the closed range `[start, end)`.
///
/// Positive for rings that the triangulator treats as "clockwise".
pub(crate) fn signed_area<T: Float>(coords: &[[T; 2]], start: usize, end: usize) -> T {
    if end <= start {
        return T::zero();
    }
    let mut prev = coords[end - 1];
    coords[start..end].iter().fold(T::zero(), |sum, &cur| {
        let term = (prev[0] - cur[0]) * (prev[1] + cur[1]);
        prev = cur;
        sum + term
    })
}

/// Builds a circular ring from `coords[start..end]` with the requested
/// winding, reversing the range when its natural orientation disagrees.
///
/// Each vertex records `ids[i]` as its output index. A closing point equal to
/// the first one is dropped. Returns the last inserted vertex, or `None` for
/// an empty range.
pub(crate) fn build_ring<T: Float>(
    pool: &mut Pool<T>,
    coords: &[[T; 2]],
    ids: &[u32],
    start: usize,
    end: usize,
    clockwise: bool,
) -> Option<VertexId> {
    let mut last = None;
    let range = coords[start..end].iter().zip(&ids[start..end]);
    if clockwise == (signed_area(coords, start, end) > T::zero()) {
        for (&[x, y], &id) in range {
            last = Some(pool.insert(id, x, y, last));
        }
    } else {
        for (&[x, y], &id) in range.rev() {
            last = Some(pool.insert(id, x, y, last));
        }
    }

    let last = last?;
    let next = pool[last].next;
    if next != last && equals(&pool[last], &pool[next]) {
        pool.remove(last);
        return Some(next);
    }
    Some(last)
}

/// Removes duplicate and collinear vertices from the ring through `start`,
/// stopping once a full lap up to `end` (default: `start`) changes nothing.
///
/// Steiner vertices are never removed. Returns the new anchor of the ring, or
/// `None` when it collapsed to a single vertex.
pub(crate) fn remove_collinear<T: Float>(
    pool: &mut Pool<T>,
    start: VertexId,
    end: Option<VertexId>,
) -> Option<VertexId> {
    let eps = pool.collinear_tolerance;
    let mut end = end.unwrap_or(start);
    let mut p = start;
    loop {
        let v = &pool[p];
        let (prev, next) = (&pool[v.prev], &pool[v.next]);
        if !v.steiner && (equals(v, next) || area(prev, v, next).abs() <= eps) {
            let (prev, next) = pool.remove(p);
            if prev == next {
                return None;
            }
            p = prev;
            end = prev;
            continue;
        }
        p = v.next;
        if p == end {
            return Some(end);
        }
    }
}
