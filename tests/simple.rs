use earcut_complex::{deviation, prepare_rings, Earcut, InputError, Options};

const SQUARE: [[f64; 2]; 4] = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [0.0, 100.0]];

fn cross(points: &[[f64; 2]], [a, b, c]: [u32; 3]) -> f64 {
    let [ax, ay] = points[a as usize];
    let [bx, by] = points[b as usize];
    let [cx, cy] = points[c as usize];
    (bx - ax) * (cy - ay) - (by - ay) * (cx - ax)
}

#[test]
fn test_empty() {
    let mut earcut = Earcut::new();
    let data: [[f64; 2]; 0] = [];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 0);
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_invalid_point() {
    let mut earcut = Earcut::new();
    let data = [[100.0, 200.0]];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 0);
}

#[test]
fn test_invalid_line() {
    let mut earcut = Earcut::new();
    let data = [[0.0, 0.0], [100.0, 200.0]];
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 0);
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_collinear_points() {
    let mut earcut = Earcut::new();
    let data = [[0.0, 0.0], [50.0, 50.0], [100.0, 100.0], [25.0, 25.0]];
    let mut triangles: Vec<[u32; 3]> = vec![];
    earcut.triangulate(data, &[], &mut triangles);
    assert!(triangles.is_empty());
}

#[test]
fn test_invalid_empty_hole() {
    let mut earcut = Earcut::new();
    let data = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0]];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 1);
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_steiner_point_hole() {
    let mut earcut = Earcut::new();
    let data = [[0.0, 0.0], [100.0, 0.0], [100.0, 100.0], [50.0, 30.0]];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 3);
    assert!(triangles.iter().flatten().any(|&i| i == 3));
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_steiner_line_hole() {
    let mut earcut = Earcut::new();
    let data = [[0., 0.], [100., 0.], [100., 100.], [50., 30.], [60., 30.]];
    let hole_indices: &[u32] = &[3];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 5);
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_square() {
    let mut earcut = Earcut::new();
    let hole_indices: &[u32] = &[];
    let mut triangles = vec![];
    earcut.triangulate(SQUARE, hole_indices, &mut triangles);
    assert_eq!(triangles, vec![[2, 3, 0], [0, 1, 2]]);
    assert_eq!(deviation(SQUARE, hole_indices, &triangles), 0.0);
}

#[test]
fn test_square_u16() {
    let mut earcut = Earcut::new();
    let hole_indices: &[u16] = &[];
    let mut triangles = vec![];
    earcut.triangulate(SQUARE, hole_indices, &mut triangles);
    assert_eq!(triangles, vec![[2, 3, 0], [0, 1, 2]]);
}

#[test]
fn test_square_usize_f32() {
    let mut earcut = Earcut::new();
    let data = SQUARE.map(|[x, y]| [x as f32, y as f32]);
    let hole_indices: &[usize] = &[];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles, vec![[2, 3, 0], [0, 1, 2]]);
}

#[test]
fn test_iterator_adapter_input() {
    let mut earcut = Earcut::new();
    let data = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];
    let hole_indices: &[usize] = &[];
    let mut triangles = vec![];
    earcut.triangulate(data.iter().map(|&(x, y)| [x, y]), hole_indices, &mut triangles);
    assert_eq!(triangles, vec![[2, 3, 0], [0, 1, 2]]);
}

#[test]
fn test_small_extent_under_both_thresholds() {
    let tiny = [[0.0, 0.0], [0.001, 0.0], [0.001, 0.001], [0.0, 0.001]];
    let mut linear: Vec<[u32; 3]> = vec![];
    let mut hashed: Vec<[u32; 3]> = vec![];
    Earcut::new().triangulate(tiny, &[], &mut linear);
    Earcut::with_options(Options::new().hash_threshold(0)).triangulate(tiny, &[], &mut hashed);
    assert_eq!(linear, vec![[2, 3, 0], [0, 1, 2]]);
    assert_eq!(linear, hashed);
}

#[test]
fn test_lon_lat_footprint() {
    // L-shaped building footprint in degrees
    let footprint = [
        [139.7000, 35.6000],
        [139.7003, 35.6000],
        [139.7003, 35.6001],
        [139.7001, 35.6001],
        [139.7001, 35.6002],
        [139.7000, 35.6002],
    ];
    for threshold in [usize::MAX, 0] {
        let mut triangles: Vec<[u32; 3]> = vec![];
        Earcut::with_options(Options::new().hash_threshold(threshold)).triangulate(
            footprint,
            &[],
            &mut triangles,
        );
        assert_eq!(triangles.len(), 4);
        // loose bound: the area sum cancels badly at these magnitudes
        assert!(deviation(footprint, &[] as &[u32], &triangles) < 1e-2);
    }
}

#[test]
fn test_square_with_square_hole() {
    let mut earcut = Earcut::new();
    let data = [
        [0.0, 0.0],
        [100.0, 0.0],
        [100.0, 100.0],
        [0.0, 100.0],
        [10.0, 10.0],
        [90.0, 10.0],
        [90.0, 90.0],
        [10.0, 90.0],
    ];
    let hole_indices: &[u32] = &[4];
    let mut triangles = vec![];
    earcut.triangulate(data, hole_indices, &mut triangles);
    assert_eq!(triangles.len(), 8);
    assert_eq!(deviation(data, hole_indices, &triangles), 0.0);
}

#[test]
fn test_square_with_triangle_hole() {
    let hole = [[20.0, 20.0], [50.0, 80.0], [80.0, 20.0]];
    let (points, holes) = prepare_rings(&SQUARE, [&hole[..]]);

    let mut earcut = Earcut::new();
    let mut triangles: Vec<[u32; 3]> = vec![];
    earcut.triangulate(points.iter().copied(), &[holes[0] as u32], &mut triangles);
    assert_eq!(
        triangles,
        vec![
            [0, 4, 5],
            [6, 4, 0],
            [3, 0, 5],
            [6, 0, 1],
            [2, 3, 5],
            [5, 6, 1],
            [1, 2, 5]
        ]
    );

    let covered: f64 = triangles.iter().map(|&t| cross(&points, t).abs() / 2.0).sum();
    assert_eq!(covered, 8200.0);
    assert_eq!(deviation(points, &[4u32], &triangles), 0.0);
}

#[test]
fn test_unbridgeable_hole_is_dropped() {
    // the hole lies left of the boundary, so no edge is hit by its ray
    let hole = [[-50.0, 40.0], [-30.0, 40.0], [-40.0, 60.0]];
    let (points, holes) = prepare_rings(&SQUARE, [&hole[..]]);
    let mut triangles: Vec<[u32; 3]> = vec![];
    Earcut::new().triangulate(points, &[holes[0] as u32], &mut triangles);
    assert_eq!(triangles, vec![[2, 3, 0], [0, 1, 2]]);
}

#[test]
fn test_index_validity() {
    let data = [
        [0.0, 0.0],
        [40.0, 10.0],
        [100.0, 0.0],
        [90.0, 50.0],
        [100.0, 100.0],
        [50.0, 60.0],
        [0.0, 100.0],
        [10.0, 50.0],
    ];
    let mut triangles: Vec<[u32; 3]> = vec![];
    Earcut::new().triangulate(data, &[], &mut triangles);
    assert_eq!(triangles.len(), data.len() - 2);
    for &[a, b, c] in &triangles {
        assert!(a != b && b != c && a != c);
        assert!([a, b, c].iter().all(|&i| (i as usize) < data.len()));
    }
    assert!(deviation(data, &[] as &[u32], &triangles) < 1e-12);
}

#[test]
fn test_winding_normalization() {
    let ccw = [
        [0.0, 0.0],
        [40.0, 10.0],
        [100.0, 0.0],
        [90.0, 50.0],
        [100.0, 100.0],
        [50.0, 60.0],
        [0.0, 100.0],
        [10.0, 50.0],
    ];
    let mut cw = ccw;
    cw.reverse();

    let mut earcut = Earcut::new();
    let mut from_ccw: Vec<[u32; 3]> = vec![];
    let mut from_cw: Vec<[u32; 3]> = vec![];
    earcut.triangulate(ccw, &[], &mut from_ccw);
    earcut.triangulate(cw, &[], &mut from_cw);

    assert_eq!(from_ccw.len(), from_cw.len());
    assert_eq!(deviation(ccw, &[] as &[u32], &from_ccw), 0.0);
    assert_eq!(deviation(cw, &[] as &[u32], &from_cw), 0.0);

    // both runs emit triangles of the same orientation
    let sign_ccw = cross(&ccw, from_ccw[0]).signum();
    assert!(from_ccw.iter().all(|&t| cross(&ccw, t).signum() == sign_ccw));
    assert!(from_cw.iter().all(|&t| cross(&cw, t).signum() == sign_ccw));
}

#[test]
fn test_adjacent_duplicate() {
    let mut earcut = Earcut::new();
    let mut plain: Vec<[u32; 3]> = vec![];
    earcut.triangulate(SQUARE, &[], &mut plain);

    let with_duplicate = [
        [0.0, 0.0],
        [100.0, 0.0],
        [100.0, 100.0],
        [0.0, 100.0],
        [0.0, 100.0],
    ];
    let mut deduped: Vec<[u32; 3]> = vec![];
    earcut.triangulate(with_duplicate, &[], &mut deduped);
    assert_eq!(plain, deduped);
}

#[test]
fn test_closed_ring() {
    let closed = [
        [0.0, 0.0],
        [100.0, 0.0],
        [100.0, 100.0],
        [0.0, 100.0],
        [0.0, 0.0],
    ];
    let mut triangles: Vec<[u32; 3]> = vec![];
    Earcut::new().triangulate(closed, &[], &mut triangles);
    assert_eq!(triangles.len(), 2);
    assert_eq!(deviation(closed, &[] as &[u32], &triangles), 0.0);
}

#[test]
fn test_threshold_equivalence() {
    // already spans 0..=65535, so rescaling leaves it untouched
    let mut comb = vec![[0.0, 0.0], [65535.0, 0.0], [65535.0, 65535.0]];
    for i in 0..40 {
        let x = 65535.0 - 1600.0 * (i as f64 + 1.0);
        comb.push([x + 800.0, 65535.0]);
        comb.push([x + 300.0, 12000.0 + 17.0 * ((i * i * 31) % 700) as f64]);
    }
    comb.push([0.0, 65535.0]);
    let hole = [[30000.0, 3000.0], [31000.0, 3000.0], [30500.0, 3900.0]];
    let (points, holes) = prepare_rings(&comb, [&hole[..]]);

    let mut linear: Vec<[u32; 3]> = vec![];
    let mut hashed: Vec<[u32; 3]> = vec![];
    Earcut::with_options(Options::new().hash_threshold(usize::MAX)).triangulate(
        points.iter().copied(),
        &[holes[0] as u32],
        &mut linear,
    );
    Earcut::with_options(Options::new().hash_threshold(0)).triangulate(
        points.iter().copied(),
        &[holes[0] as u32],
        &mut hashed,
    );
    assert!(!linear.is_empty());
    assert_eq!(linear, hashed);
}

#[test]
fn test_triangulate_ids() {
    let shared = [
        [999.0, 999.0],
        [100.0, 0.0],
        [0.0, 0.0],
        [0.0, 100.0],
        [100.0, 100.0],
    ];
    let ids: [u32; 4] = [2, 1, 4, 3];
    let mut triangles = vec![];
    Earcut::new().triangulate_ids(&shared, &ids, &[], &mut triangles);
    assert_eq!(triangles.len(), 2);
    assert!(triangles.iter().flatten().all(|i| ids.contains(i)));

    let mut direct: Vec<[u32; 3]> = vec![];
    Earcut::new().triangulate(SQUARE, &[], &mut direct);
    let remapped: Vec<[u32; 3]> = direct
        .iter()
        .map(|t| t.map(|i| ids[i as usize]))
        .collect();
    assert_eq!(triangles, remapped);
}

#[test]
fn test_reuse_instance() {
    let mut earcut = Earcut::new();
    let mut first: Vec<[u32; 3]> = vec![];
    let mut second: Vec<[u32; 3]> = vec![];
    earcut.triangulate([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &[], &mut first);
    earcut.triangulate([[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]], &[], &mut second);
    assert_eq!(first, second);
}

#[test]
fn test_try_triangulate() {
    let mut earcut = Earcut::new();
    let mut triangles: Vec<[u32; 3]> = vec![];
    assert_eq!(earcut.try_triangulate(SQUARE, &[], &mut triangles), Ok(2));

    let err = earcut.try_triangulate(SQUARE, &[5u32], &mut triangles);
    assert_eq!(
        err,
        Err(InputError::HoleOutOfRange {
            hole: 0,
            start: 5,
            len: 4
        })
    );
    let err = earcut.try_triangulate(SQUARE, &[3u32, 2], &mut triangles);
    assert!(matches!(err, Err(InputError::HoleOrder { hole: 1, .. })));
    assert_eq!(triangles.len(), 2);
}

#[test]
fn test_try_triangulate_index_overflow() {
    let points = (0..70_000).map(|i| {
        let t = i as f64 / 70_000.0 * core::f64::consts::TAU;
        [t.cos(), t.sin()]
    });
    let mut triangles: Vec<[u16; 3]> = vec![];
    let err = Earcut::new().try_triangulate(points, &[], &mut triangles);
    assert_eq!(err, Err(InputError::IndexOverflow { len: 70_000 }));
    assert!(triangles.is_empty());
}

#[test]
fn test_try_triangulate_ids() {
    let mut earcut = Earcut::new();
    let mut triangles: Vec<[u32; 3]> = vec![];
    let err = earcut.try_triangulate_ids(&SQUARE, &[0, 1, 7, 3], &[], &mut triangles);
    assert_eq!(
        err,
        Err(InputError::IdOutOfRange {
            position: 2,
            id: 7,
            len: 4
        })
    );
    assert_eq!(
        earcut.try_triangulate_ids(&SQUARE, &[0, 1, 2, 3], &[], &mut triangles),
        Ok(2)
    );
}
