use alloc::vec::Vec;

/// Concatenates a boundary and its hole rings into the flat layout expected
/// by [`Earcut::triangulate`](crate::Earcut::triangulate).
///
/// Returns the points followed by the offset at which each hole starts.
///
/// ```
/// use earcut_complex::prepare_rings;
///
/// let boundary = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]];
/// let hole = [[20.0, 20.0], [50.0, 80.0], [80.0, 20.0]];
/// let (points, holes) = prepare_rings(&boundary, [&hole[..]]);
/// assert_eq!(points.len(), 7);
/// assert_eq!(holes, vec![4]);
/// ```
pub fn prepare_rings<T, R>(
    boundary: &[[T; 2]],
    holes: impl IntoIterator<Item = R>,
) -> (Vec<[T; 2]>, Vec<usize>)
where
    T: Copy,
    R: AsRef<[[T; 2]]>,
{
    let mut points = boundary.to_vec();
    let mut starts = Vec::new();
    for hole in holes {
        starts.push(points.len());
        points.extend_from_slice(hole.as_ref());
    }
    (points, starts)
}
