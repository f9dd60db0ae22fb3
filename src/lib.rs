//! Ear-clipping triangulation of complex polygons.
//!
//! Handles an outer boundary with any number of holes, in any winding, and
//! recovers from duplicate points, collinear runs, touching rings and
//! self-intersections. Large inputs use a Z-order curve index to speed up the
//! ear test. Based on the [Earcut](https://github.com/mapbox/earcut) algorithm.
//!
//! ```
//! use earcut_complex::{prepare_rings, Earcut};
//!
//! let boundary = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]];
//! let hole = [[20.0, 20.0], [50.0, 80.0], [80.0, 20.0]];
//! let (points, holes) = prepare_rings(&boundary, [&hole[..]]);
//!
//! let mut triangles: Vec<[usize; 3]> = Vec::new();
//! Earcut::new().triangulate(points, &holes, &mut triangles);
//! assert_eq!(triangles.len(), 7);
//! ```

#![no_std]

extern crate alloc;

mod builder;
mod engine;
mod error;
mod holes;
mod predicates;
mod prepare;
mod ring;
mod zorder;

use alloc::vec::Vec;

use num_traits::float::Float;

use crate::builder::{build_ring, collinear_tolerance, remove_collinear, signed_area};
use crate::engine::Clipper;
use crate::error::check_holes;
use crate::holes::eliminate_holes;
use crate::ring::{Pool, VertexId};
use crate::zorder::Frame;

pub use crate::error::InputError;
pub use crate::prepare::prepare_rings;

/// Index type of emitted triangles.
pub trait Index: Copy {
    /// Largest position this type can address.
    const MAX: usize;
    fn into_usize(self) -> usize;
    fn from_usize(v: usize) -> Self;
}

macro_rules! impl_index {
    ($($t:ty),*) => {$(
        impl Index for $t {
            const MAX: usize = <$t>::MAX as usize;
            #[inline]
            fn into_usize(self) -> usize {
                self as usize
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }
    )*};
}

impl_index!(u16, u32, usize);

/// Tuning knobs of the triangulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// Inputs with at least this many points use the Z-order index.
    pub hash_threshold: usize,
}

impl Options {
    pub const DEFAULT_HASH_THRESHOLD: usize = 80;

    pub const fn new() -> Self {
        Self {
            hash_threshold: Self::DEFAULT_HASH_THRESHOLD,
        }
    }

    /// Sets the point count from which the Z-order index is used.
    /// `0` always uses it, `usize::MAX` never does.
    pub const fn hash_threshold(mut self, threshold: usize) -> Self {
        self.hash_threshold = threshold;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

/// Instance of the triangulator.
///
/// Reusing one instance for many polygons recycles its internal buffers.
pub struct Earcut<T: Float> {
    options: Options,
    /// working coordinates, rescaled when hashing
    coords: Vec<[T; 2]>,
    /// index reported for each working coordinate
    ids: Vec<u32>,
    hole_starts: Vec<usize>,
    pool: Pool<T>,
    queue: Vec<VertexId>,
}

impl<T: Float> Default for Earcut<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> Earcut<T> {
    pub fn new() -> Self {
        Self::with_options(Options::default())
    }

    pub fn with_options(options: Options) -> Self {
        Self {
            options,
            coords: Vec::new(),
            ids: Vec::new(),
            hole_starts: Vec::new(),
            pool: Pool::new(),
            queue: Vec::new(),
        }
    }

    pub fn options(&self) -> Options {
        self.options
    }

    /// Triangulates a polygon given as its outer ring followed by its holes.
    ///
    /// `hole_starts` holds the position of the first point of every hole.
    /// Triangles are appended to `triangles` as positions in `points`.
    ///
    /// Offsets must be non-decreasing and within the point sequence; see
    /// [`Earcut::try_triangulate`] for a checked version.
    pub fn triangulate<N: Index>(
        &mut self,
        points: impl IntoIterator<Item = [T; 2]>,
        hole_starts: &[N],
        triangles: &mut Vec<[N; 3]>,
    ) {
        self.coords.clear();
        self.coords.extend(points);
        self.ids.clear();
        self.ids.extend(0..self.coords.len() as u32);
        self.hole_starts.clear();
        self.hole_starts
            .extend(hole_starts.iter().map(|h| h.into_usize()));
        self.run(triangles);
    }

    /// Triangulates a polygon whose points are picked from a shared array.
    ///
    /// The polygon is `ids` (outer ring then holes, `hole_starts` being
    /// offsets into `ids`); triangles reference the ids themselves.
    pub fn triangulate_ids<N: Index>(
        &mut self,
        points: &[[T; 2]],
        ids: &[N],
        hole_starts: &[N],
        triangles: &mut Vec<[N; 3]>,
    ) {
        self.coords.clear();
        self.coords
            .extend(ids.iter().map(|id| points[id.into_usize()]));
        self.ids.clear();
        self.ids.extend(ids.iter().map(|id| id.into_usize() as u32));
        self.hole_starts.clear();
        self.hole_starts
            .extend(hole_starts.iter().map(|h| h.into_usize()));
        self.run(triangles);
    }

    /// Checked version of [`Earcut::triangulate`].
    ///
    /// Returns the number of triangles appended.
    pub fn try_triangulate<N: Index>(
        &mut self,
        points: impl IntoIterator<Item = [T; 2]>,
        hole_starts: &[N],
        triangles: &mut Vec<[N; 3]>,
    ) -> Result<usize, InputError> {
        self.coords.clear();
        self.coords.extend(points);
        let len = self.coords.len();
        if len > 0 && (len - 1 > N::MAX || len - 1 > u32::MAX as usize) {
            return Err(InputError::IndexOverflow { len });
        }
        self.hole_starts.clear();
        self.hole_starts
            .extend(hole_starts.iter().map(|h| h.into_usize()));
        check_holes(&self.hole_starts, len)?;

        self.ids.clear();
        self.ids.extend(0..len as u32);
        let before = triangles.len();
        self.run(triangles);
        Ok(triangles.len() - before)
    }

    /// Checked version of [`Earcut::triangulate_ids`].
    ///
    /// Returns the number of triangles appended.
    pub fn try_triangulate_ids<N: Index>(
        &mut self,
        points: &[[T; 2]],
        ids: &[N],
        hole_starts: &[N],
        triangles: &mut Vec<[N; 3]>,
    ) -> Result<usize, InputError> {
        if ids.len() > u32::MAX as usize {
            return Err(InputError::IndexOverflow { len: ids.len() });
        }
        for (position, id) in ids.iter().enumerate() {
            let id = id.into_usize();
            if id >= points.len() || id > u32::MAX as usize {
                return Err(InputError::IdOutOfRange {
                    position,
                    id,
                    len: points.len(),
                });
            }
        }
        let starts: Vec<usize> = hole_starts.iter().map(|h| h.into_usize()).collect();
        check_holes(&starts, ids.len())?;

        let before = triangles.len();
        self.triangulate_ids(points, ids, hole_starts, triangles);
        Ok(triangles.len() - before)
    }

    fn run<N: Index>(&mut self, triangles: &mut Vec<[N; 3]>) {
        let len = self.coords.len();
        if len < 3 {
            return;
        }
        let outer_len = self.hole_starts.first().copied().unwrap_or(len);

        // rescale once into the Morton grid so the ear test can hash directly;
        // the collinear tolerance is always expressed in grid units
        let frame = Frame::fit(&self.coords[..outer_len]);
        let hashed = len >= self.options.hash_threshold && frame.is_some();
        let grid_scale = match frame {
            Some(frame) if hashed => {
                log::trace!(
                    "rescaling {len} points into the z-order grid, scale {:?}",
                    frame.scale.to_f64()
                );
                frame.apply(&mut self.coords);
                T::one()
            }
            Some(frame) => frame.scale,
            None => T::one(),
        };

        self.pool.reset(len * 3 / 2);
        self.pool.collinear_tolerance = collinear_tolerance(grid_scale);
        let Some(outer) = build_ring(&mut self.pool, &self.coords, &self.ids, 0, outer_len, true)
        else {
            return;
        };
        if self.pool[outer].next == self.pool[outer].prev {
            return;
        }

        let ring = if self.hole_starts.is_empty() {
            remove_collinear(&mut self.pool, outer, None)
        } else {
            eliminate_holes(
                &mut self.pool,
                &self.coords,
                &self.ids,
                &self.hole_starts,
                outer,
                &mut self.queue,
            )
        };
        let Some(ring) = ring else {
            return;
        };

        Clipper::new(&mut self.pool, triangles, hashed).run(ring);
    }
}

/// Relative difference between the polygon's area (outer ring minus holes)
/// and the total area of `triangles`; zero for an exact cover.
pub fn deviation<T: Float, N: Index>(
    points: impl IntoIterator<Item = [T; 2]>,
    hole_starts: &[N],
    triangles: &[[N; 3]],
) -> T {
    let points: Vec<[T; 2]> = points.into_iter().collect();
    let outer_len = hole_starts.first().map_or(points.len(), |h| h.into_usize());

    let mut polygon_area = T::zero();
    if points.len() >= 3 {
        polygon_area = signed_area(&points, 0, outer_len).abs();
        for (i, start) in hole_starts.iter().enumerate() {
            let start = start.into_usize();
            let end = hole_starts
                .get(i + 1)
                .map_or(points.len(), |h| h.into_usize());
            if end >= start + 3 {
                polygon_area = polygon_area - signed_area(&points, start, end).abs();
            }
        }
    }

    let triangles_area = triangles.iter().fold(T::zero(), |sum, &[a, b, c]| {
        let [ax, ay] = points[a.into_usize()];
        let [bx, by] = points[b.into_usize()];
        let [cx, cy] = points[c.into_usize()];
        sum + ((ax - cx) * (by - ay) - (ax - bx) * (cy - ay)).abs()
    });

    if polygon_area == T::zero() && triangles_area == T::zero() {
        T::zero()
    } else {
        ((polygon_area - triangles_area) / polygon_area).abs()
    }
}
