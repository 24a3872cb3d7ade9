use top_challenges::{euclidean_distance, locality_key, normalise_between_range, Point};

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {}, got {}",
        expected,
        actual
    );
}

#[test]
fn test_euclidean_distance() {
    let p1 = Point::new(1, 10.5, 14.4, 0.0);
    let p2 = Point::new(2, 18.0, 15.9, 10.0);
    assert_close(euclidean_distance(&p1, &p2), 7.648529);
    assert_close(p1.distance_to(&p2), p2.distance_to(&p1));
    assert_eq!(euclidean_distance(&p1, &p1), 0.0);
}

#[test]
fn test_normalise_between_range() {
    assert_close(normalise_between_range(5.0, 0.0, 10.0, 0.0, 100.0), 50.0);
    assert_close(normalise_between_range(-1.0, -1.0, 1.0, 10.0, 20.0), 10.0);
    assert_close(normalise_between_range(1.0, -1.0, 1.0, 10.0, 20.0), 20.0);
}

#[test]
fn test_locality_key_is_monotone_per_axis() {
    let ys = [-50.0, 0.0, 13.4, 14.4, 90_000.0];
    let xs = [-99_000.0, -1.0, 0.0, 10.5, 11.5, 16.5, 5_000.0];
    for &y in &ys {
        for w in xs.windows(2) {
            assert!(locality_key(w[0], y) <= locality_key(w[1], y));
            assert!(locality_key(y, w[0]) <= locality_key(y, w[1]));
        }
    }
}

#[test]
fn test_locality_key_clamps_out_of_domain() {
    assert_eq!(locality_key(-1e9, -1e9), locality_key(-100_000.0, -100_000.0));
    assert_eq!(locality_key(1e9, 1e9), locality_key(100_000.0, 100_000.0));
}

#[test]
fn test_locality_sort_groups_nearby_points() {
    let p1 = Point::new(1, 10.5, 14.4, 0.0);
    let p2 = Point::new(2, 16.5, 14.5, 0.0);
    let p3 = Point::new(3, 11.5, 13.4, 0.0);
    let mut points = vec![p2, p1, p3];
    points.sort_by(Point::locality_cmp);
    assert_eq!(points[2], p2);
}

#[test]
fn test_score_desc_cmp_breaks_ties_by_id() {
    let mut points = vec![
        Point::new(3, 0.0, 0.0, 5.0),
        Point::new(1, 0.0, 0.0, 5.0),
        Point::new(2, 0.0, 0.0, 9.0),
    ];
    points.sort_by(Point::score_desc_cmp);
    let ids: Vec<usize> = points.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![2, 1, 3]);
}

#[test]
fn test_point_serde_recomputes_key() {
    let p = Point::new(7, 1.5, -2.5, 3.0);
    let json = serde_json::to_string(&p).unwrap();
    assert!(!json.contains("locality_key"));
    let back: Point = serde_json::from_str(&json).unwrap();
    assert_eq!(back, p);
}
