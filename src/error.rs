use thiserror::Error;

/// Caller-side layout problems reported by the checked entry points.
///
/// Geometric trouble (self-intersections, unbridgeable holes, rings that
/// cannot be fully clipped) is never an error: it only yields fewer
/// triangles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A hole starts past the end of the point sequence.
    #[error("hole {hole} starts at {start}, past the end of the {len} points")]
    HoleOutOfRange { hole: usize, start: usize, len: usize },
    /// Hole offsets must not decrease.
    #[error("hole {hole} starts at {start}, before the previous hole at {previous}")]
    HoleOrder {
        hole: usize,
        start: usize,
        previous: usize,
    },
    /// A point id does not refer to any of the supplied points.
    #[error("point id {id} at position {position} is out of range for {len} points")]
    IdOutOfRange { position: usize, id: usize, len: usize },
    /// Too many points for the output index type (or for the vertex arena).
    #[error("{len} points cannot be addressed by the output index type")]
    IndexOverflow { len: usize },
}

/// Checks that `hole_starts` is a non-decreasing list of offsets into a
/// sequence of `len` points.
pub(crate) fn check_holes(hole_starts: &[usize], len: usize) -> Result<(), InputError> {
    let mut previous = 0;
    for (hole, &start) in hole_starts.iter().enumerate() {
        if start > len {
            return Err(InputError::HoleOutOfRange { hole, start, len });
        }
        if start < previous {
            return Err(InputError::HoleOrder {
                hole,
                start,
                previous,
            });
        }
        previous = start;
    }
    Ok(())
}
