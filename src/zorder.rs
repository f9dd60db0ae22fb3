//! Z-order (Morton curve) spatial index over the ring vertices.
//!
//! Coordinates are rescaled once into `0..=65535` per axis, which lets the
//! Morton key be computed directly from the working coordinates.

use num_traits::float::Float;

use crate::ring::{Pool, VertexId, NO_Z};

/// Upper end of the per-axis integer range fed to the Morton key.
const GRID_MAX: f64 = 65535.0;

/// Affine map from input coordinates into the Morton grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Frame<T> {
    pub min_x: T,
    pub min_y: T,
    pub scale: T,
}

impl<T: Float> Frame<T> {
    /// Fits the grid to the bounding box of `coords`.
    ///
    /// Returns `None` when the box has no extent, in which case the plain ear
    /// test must be used.
    pub fn fit(coords: &[[T; 2]]) -> Option<Self> {
        let (&first, rest) = coords.split_first()?;
        let [min_x, min_y, max_x, max_y] = rest.iter().fold(
            [first[0], first[1], first[0], first[1]],
            |[x0, y0, x1, y1], &[x, y]| [x0.min(x), y0.min(y), x1.max(x), y1.max(y)],
        );
        let extent = (max_x - min_x).max(max_y - min_y);
        if !(extent > T::zero()) || !extent.is_finite() {
            return None;
        }
        let scale = T::from(GRID_MAX)? / extent;
        Some(Self {
            min_x,
            min_y,
            scale,
        })
    }

    /// Maps every point into the grid, in place.
    pub fn apply(&self, coords: &mut [[T; 2]]) {
        for p in coords {
            *p = [(p[0] - self.min_x) * self.scale, (p[1] - self.min_y) * self.scale];
        }
    }
}

/// Interleaves the bits of a grid point, x in the even bits and y in the odd.
///
/// Coordinates outside the grid are clamped, which keeps the key monotone in
/// each axis.
pub(crate) fn morton<T: Float>(x: T, y: T) -> i64 {
    (spread(to_grid(x)) | (spread(to_grid(y)) << 1)) as i64
}

fn to_grid<T: Float>(v: T) -> u32 {
    v.to_f64()
        .filter(|v| *v > 0.0)
        .map_or(0, |v| v.min(GRID_MAX) as u32)
}

fn spread(v: u32) -> u32 {
    let mut v = v & 0xffff;
    v = (v | (v << 8)) & 0x00ff_00ff;
    v = (v | (v << 4)) & 0x0f0f_0f0f;
    v = (v | (v << 2)) & 0x3333_3333;
    (v | (v << 1)) & 0x5555_5555
}

/// Threads every vertex of the ring through `start` onto the z-order chain
/// and sorts the chain by Morton code.
pub(crate) fn index_curve<T: Float>(pool: &mut Pool<T>, start: VertexId) {
    let mut p = start;
    loop {
        let v = &mut pool[p];
        if v.z == NO_Z {
            v.z = morton(v.x, v.y);
        }
        v.prev_z = Some(v.prev);
        v.next_z = Some(v.next);
        p = v.next;
        if p == start {
            break;
        }
    }

    // open the cycle right before `start`
    if let Some(tail) = pool[start].prev_z.take() {
        pool[tail].next_z = None;
    }
    sort_linked(pool, start);
}

/// Bottom-up merge sort of the z-order chain starting at `list`, keyed by `z`
/// (Simon Tatham's linked list variant). Returns the new head.
pub(crate) fn sort_linked<T: Float>(pool: &mut Pool<T>, list: VertexId) -> VertexId {
    let mut head = Some(list);
    let mut run = 1usize;
    loop {
        let mut p = head;
        let mut tail: Option<VertexId> = None;
        head = None;
        let mut merges = 0;

        while let Some(left) = p {
            merges += 1;

            // second run starts `run` steps after the first
            let mut q = Some(left);
            let mut left_len = 0;
            while left_len < run {
                let Some(at) = q else { break };
                left_len += 1;
                q = pool[at].next_z;
            }
            let mut right_len = run;
            let mut p_cur = Some(left);

            loop {
                let take_left = match (p_cur, q) {
                    (Some(_), _) if left_len > 0 && (right_len == 0 || q.is_none()) => true,
                    (Some(l), Some(r)) if left_len > 0 => pool[l].z <= pool[r].z,
                    (_, Some(_)) if right_len > 0 => false,
                    _ => break,
                };
                let e = if take_left {
                    let Some(e) = p_cur else { break };
                    left_len -= 1;
                    p_cur = pool[e].next_z;
                    e
                } else {
                    let Some(e) = q else { break };
                    right_len -= 1;
                    q = pool[e].next_z;
                    e
                };

                match tail {
                    Some(t) => pool[t].next_z = Some(e),
                    None => head = Some(e),
                }
                pool[e].prev_z = tail;
                tail = Some(e);
            }
            p = q;
        }

        if let Some(t) = tail {
            pool[t].next_z = None;
        }
        if merges <= 1 {
            return head.unwrap_or(list);
        }
        run *= 2;
    }
}
