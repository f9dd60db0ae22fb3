//! Vertex arena holding the polygon rings and the z-order chain.
//!
//! Every vertex takes part in two intrusive lists at once: the circular ring
//! (`prev`/`next`) and, once the spatial index is built, the acyclic chain
//! sorted by Morton code (`prev_z`/`next_z`). Links are arena ids rather than
//! references, so rings can be spliced and split without ownership cycles.

use alloc::vec::Vec;
use core::num::NonZeroU32;
use core::ops::{Index, IndexMut};

use num_traits::float::Float;

use crate::builder::collinear_tolerance;

/// Arena slot of a vertex. Slot 0 holds a dummy, so real ids are never zero.
pub(crate) type VertexId = NonZeroU32;

/// Morton code of a vertex that has not been indexed yet.
pub(crate) const NO_Z: i64 = -1;

pub(crate) struct Vertex<T: Float> {
    /// position reported in emitted triangles
    pub index: u32,
    /// working coordinates (rescaled when the spatial index is in use)
    pub x: T,
    pub y: T,
    /// Morton code, `NO_Z` until computed
    pub z: i64,
    pub prev: VertexId,
    pub next: VertexId,
    pub prev_z: Option<VertexId>,
    pub next_z: Option<VertexId>,
    /// exempt from collinear/duplicate elimination
    pub steiner: bool,
}

impl<T: Float> Vertex<T> {
    fn detached(index: u32, x: T, y: T, id: VertexId) -> Self {
        Self {
            index,
            x,
            y,
            z: NO_Z,
            prev: id,
            next: id,
            prev_z: None,
            next_z: None,
            steiner: false,
        }
    }

    #[inline]
    pub fn xy(&self) -> [T; 2] {
        [self.x, self.y]
    }
}

/// Growable storage for the vertices of one triangulation.
///
/// Removed vertices stay in place (unlinked) until the next [`Pool::reset`].
pub(crate) struct Pool<T: Float> {
    slots: Vec<Vertex<T>>,
    /// largest `|area|` at which three vertices count as collinear, in the
    /// units of the working coordinates
    pub collinear_tolerance: T,
}

impl<T: Float> Pool<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            collinear_tolerance: collinear_tolerance(T::one()),
        }
    }

    /// Drops every vertex and reserves room for `capacity` more.
    pub fn reset(&mut self, capacity: usize) {
        self.slots.clear();
        self.slots.reserve(capacity + 1);
        let dummy = Vertex::detached(0, T::infinity(), T::infinity(), self.upcoming_id());
        self.slots.push(dummy);
    }

    #[inline]
    fn upcoming_id(&self) -> VertexId {
        // slot 0 is never handed out, an empty pool yields the dummy's id
        NonZeroU32::new(self.slots.len() as u32).unwrap_or(NonZeroU32::MIN)
    }

    /// Creates a vertex and links it right after `last`, or starts a new
    /// singleton ring when `last` is `None`.
    pub fn insert(&mut self, index: u32, x: T, y: T, last: Option<VertexId>) -> VertexId {
        let id = self.upcoming_id();
        let mut v = Vertex::detached(index, x, y, id);
        if let Some(last) = last {
            let after = self[last].next;
            v.prev = last;
            v.next = after;
            self[last].next = id;
            self[after].prev = id;
        }
        self.slots.push(v);
        id
    }

    /// Unlinks a vertex from its ring and from the z-order chain.
    ///
    /// Returns the former ring neighbours `(prev, next)`.
    pub fn remove(&mut self, id: VertexId) -> (VertexId, VertexId) {
        let Vertex {
            prev,
            next,
            prev_z,
            next_z,
            ..
        } = self[id];
        self[next].prev = prev;
        self[prev].next = next;
        if let Some(pz) = prev_z {
            self[pz].next_z = next_z;
        }
        if let Some(nz) = next_z {
            self[nz].prev_z = prev_z;
        }
        (prev, next)
    }

    /// Connects `a` and `b` with a bridge made of two duplicated vertices.
    ///
    /// If both belong to the same ring, the ring is split in two: one keeps
    /// `a`, the other starts at the returned duplicate of `b`. If they belong
    /// to different rings, the rings are fused into one.
    pub fn split(&mut self, a: VertexId, b: VertexId) -> VertexId {
        let a2 = self.upcoming_id();
        let b2 = a2.saturating_add(1);
        let mut dup_a = Vertex::detached(self[a].index, self[a].x, self[a].y, a2);
        let mut dup_b = Vertex::detached(self[b].index, self[b].x, self[b].y, b2);
        let a_next = self[a].next;
        let b_prev = self[b].prev;

        self[a].next = b;
        self[b].prev = a;

        dup_a.next = a_next;
        self[a_next].prev = a2;
        dup_b.next = a2;
        dup_a.prev = b2;
        self[b_prev].next = b2;
        dup_b.prev = b_prev;

        self.slots.extend([dup_a, dup_b]);
        b2
    }

    /// Number of vertices in the ring containing `start`.
    #[cfg(test)]
    pub fn ring_len(&self, start: VertexId) -> usize {
        let mut n = 1;
        let mut p = self[start].next;
        while p != start {
            n += 1;
            p = self[p].next;
        }
        n
    }

    /// Output indices of the ring containing `start`, in ring order.
    #[cfg(test)]
    pub fn ring_indices(&self, start: VertexId) -> Vec<u32> {
        let mut out = Vec::new();
        let mut p = start;
        loop {
            out.push(self[p].index);
            p = self[p].next;
            if p == start {
                return out;
            }
        }
    }
}

impl<T: Float> Index<VertexId> for Pool<T> {
    type Output = Vertex<T>;

    #[inline]
    fn index(&self, id: VertexId) -> &Vertex<T> {
        debug_assert!((id.get() as usize) < self.slots.len());
        // SAFETY: ids are only minted by this pool and the pool never shrinks
        // between `reset` calls.
        unsafe { self.slots.get_unchecked(id.get() as usize) }
    }
}

impl<T: Float> IndexMut<VertexId> for Pool<T> {
    #[inline]
    fn index_mut(&mut self, id: VertexId) -> &mut Vertex<T> {
        debug_assert!((id.get() as usize) < self.slots.len());
        // SAFETY: see `Index`.
        unsafe { self.slots.get_unchecked_mut(id.get() as usize) }
    }
}
