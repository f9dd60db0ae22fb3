//! The ear-clipping loop and its recovery passes.

use alloc::vec::Vec;

use num_traits::float::Float;

use crate::builder::remove_collinear;
use crate::predicates::{
    area, equals, intersects, is_valid_diagonal, locally_inside, point_in_triangle, Bounds,
};
use crate::ring::{Pool, VertexId};
use crate::zorder::{index_curve, morton};
use crate::Index;

/// Recovery stage reached on the current ring. Each stage is entered only
/// after a full lap of the previous one found no ear.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Pass {
    /// plain scan
    Initial,
    /// scan after dropping collinear and duplicate vertices
    Filtered,
    /// scan after curing small self-intersections
    Cured,
}

/// Clips ears off a single ring and appends them to `triangles`.
pub(crate) struct Clipper<'a, T: Float, N: Index> {
    pool: &'a mut Pool<T>,
    triangles: &'a mut Vec<[N; 3]>,
    /// consult the z-order index instead of scanning the whole ring
    hashed: bool,
}

impl<'a, T: Float, N: Index> Clipper<'a, T, N> {
    pub fn new(pool: &'a mut Pool<T>, triangles: &'a mut Vec<[N; 3]>, hashed: bool) -> Self {
        Self {
            pool,
            triangles,
            hashed,
        }
    }

    /// Triangulates the ring through `start`.
    pub fn run(&mut self, start: VertexId) {
        self.clip(start, Pass::Initial);
    }

    fn clip(&mut self, mut ear: VertexId, pass: Pass) {
        if pass == Pass::Initial && self.hashed {
            index_curve(self.pool, ear);
        }

        let mut stop = ear;
        loop {
            let (prev, next) = (self.pool[ear].prev, self.pool[ear].next);
            if prev == next {
                // two vertices or fewer left
                return;
            }

            if self.is_ear(ear) {
                self.emit(prev, ear, next);
                self.pool.remove(ear);
                // skipping the next vertex leads to fewer sliver triangles
                ear = self.pool[next].next;
                stop = ear;
                continue;
            }

            ear = next;
            if ear == stop {
                self.escalate(ear, pass);
                return;
            }
        }
    }

    /// Called after a full lap without any ear.
    fn escalate(&mut self, ear: VertexId, pass: Pass) {
        match pass {
            Pass::Initial => {
                log::debug!("no ear found, retrying without collinear vertices");
                if let Some(ear) = remove_collinear(self.pool, ear, None) {
                    self.clip(ear, Pass::Filtered);
                }
            }
            Pass::Filtered => {
                log::debug!("no ear found, curing local self-intersections");
                let cured = remove_collinear(self.pool, ear, None)
                    .and_then(|start| self.cure_local_intersections(start));
                if let Some(ear) = cured {
                    self.clip(ear, Pass::Cured);
                }
            }
            Pass::Cured => {
                log::debug!("no ear found, splitting the ring along a diagonal");
                self.split_and_clip(ear);
            }
        }
    }

    fn emit(&mut self, a: VertexId, b: VertexId, c: VertexId) {
        let pool = &*self.pool;
        self.triangles.push([
            N::from_usize(pool[a].index as usize),
            N::from_usize(pool[b].index as usize),
            N::from_usize(pool[c].index as usize),
        ]);
    }

    /// Whether `ear` and its two neighbours form a triangle that can be cut
    /// off: it must turn convex and contain no other non-reflex vertex.
    fn is_ear(&self, ear: VertexId) -> bool {
        let pool = &*self.pool;
        let b = &pool[ear];
        let (a, c) = (&pool[b.prev], &pool[b.next]);
        if area(a, b, c) >= T::zero() {
            // reflex or degenerate
            return false;
        }

        let bounds = Bounds::of_triangle(a, b, c);
        if self.hashed {
            return self.is_ear_hashed(ear, &bounds);
        }

        let mut p = c.next;
        while p != b.prev {
            if self.blocks(ear, p, &bounds) {
                return false;
            }
            p = pool[p].next;
        }
        true
    }

    /// Same test as the linear scan, restricted to vertices whose Morton code
    /// falls within the triangle's bounding box.
    fn is_ear_hashed(&self, ear: VertexId, bounds: &Bounds<T>) -> bool {
        let pool = &*self.pool;
        let min_z = morton(bounds.min_x, bounds.min_y);
        let max_z = morton(bounds.max_x, bounds.max_y);

        let mut down = pool[ear].prev_z;
        let mut up = pool[ear].next_z;

        // walk both directions while both stay in range
        while let (Some(p), Some(n)) = (down, up) {
            if pool[p].z < min_z || pool[n].z > max_z {
                break;
            }
            if self.blocks(ear, p, bounds) {
                return false;
            }
            down = pool[p].prev_z;
            if self.blocks(ear, n, bounds) {
                return false;
            }
            up = pool[n].next_z;
        }

        while let Some(p) = down.filter(|&p| pool[p].z >= min_z) {
            if self.blocks(ear, p, bounds) {
                return false;
            }
            down = pool[p].prev_z;
        }

        while let Some(n) = up.filter(|&n| pool[n].z <= max_z) {
            if self.blocks(ear, n, bounds) {
                return false;
            }
            up = pool[n].next_z;
        }
        true
    }

    /// Whether vertex `p` sits inside the candidate ear at `ear` and is not
    /// itself reflex.
    #[inline]
    fn blocks(&self, ear: VertexId, p: VertexId, bounds: &Bounds<T>) -> bool {
        let pool = &*self.pool;
        let b = &pool[ear];
        if p == b.prev || p == b.next {
            return false;
        }
        let v = &pool[p];
        let (a, c) = (&pool[b.prev], &pool[b.next]);
        bounds.contains(v)
            && point_in_triangle(a.xy(), b.xy(), c.xy(), v.xy())
            && area(&pool[v.prev], v, &pool[v.next]) >= T::zero()
    }

    /// Cuts off tiny twisted loops `a, p, p.next, b` where `a p` crosses
    /// `p.next b`, emitting the triangle `a p b` for each.
    fn cure_local_intersections(&mut self, start: VertexId) -> Option<VertexId> {
        let mut start = start;
        let mut p = start;
        loop {
            let pn = self.pool[p].next;
            let a = self.pool[p].prev;
            let b = self.pool[pn].next;

            let pool = &*self.pool;
            if !equals(&pool[a], &pool[b])
                && locally_inside(pool, a, b)
                && locally_inside(pool, b, a)
                && intersects(&pool[a], &pool[p], &pool[pn], &pool[b])
            {
                self.emit(a, p, b);
                self.pool.remove(p);
                self.pool.remove(pn);
                p = b;
                start = b;
            }

            p = self.pool[p].next;
            if p == start {
                return remove_collinear(self.pool, p, None);
            }
        }
    }

    /// Last resort: find any valid diagonal, split the ring along it and
    /// triangulate both halves from scratch.
    fn split_and_clip(&mut self, start: VertexId) {
        let mut a = start;
        loop {
            let mut b = self.pool[self.pool[a].next].next;
            while b != self.pool[a].prev {
                if self.pool[a].index != self.pool[b].index && is_valid_diagonal(self.pool, a, b) {
                    let c = self.pool.split(a, b);

                    let a_end = self.pool[a].next;
                    let first = remove_collinear(self.pool, a, Some(a_end));
                    let c_end = self.pool[c].next;
                    let second = remove_collinear(self.pool, c, Some(c_end));

                    if let Some(first) = first {
                        self.clip(first, Pass::Initial);
                    }
                    if let Some(second) = second {
                        self.clip(second, Pass::Initial);
                    }
                    return;
                }
                b = self.pool[b].next;
            }

            a = self.pool[a].next;
            if a == start {
                log::debug!("no valid diagonal, leaving the residual ring untriangulated");
                return;
            }
        }
    }
}
