use top_algorithms::{add_maximum_points, rearrange, seeded_hasher, PointPool};
use top_challenges::{Point, Route};

fn anchors() -> (Point, Point) {
    (Point::new(1, 0.0, 0.0, 0.0), Point::new(99, 0.0, 0.0, 0.0))
}

#[test]
fn test_rearrange_moves_point_to_cheaper_route() {
    let (s, e) = anchors();
    let a = Point::new(2, 10.0, 0.0, 1.0);
    let b = Point::new(3, 0.0, 10.0, 2.0);
    let c = Point::new(4, 0.0, 11.0, 3.0);
    let mut routes = vec![Route::new(vec![s, a, b, e]), Route::new(vec![s, c, e])];
    let distance_before: f64 = routes.iter().map(|r| r.total_distance()).sum();
    let score_before: f64 = routes.iter().map(|r| r.total_score()).sum();

    rearrange(&mut routes, 40.0);

    let distance_after: f64 = routes.iter().map(|r| r.total_distance()).sum();
    let score_after: f64 = routes.iter().map(|r| r.total_score()).sum();
    assert!(distance_after < distance_before);
    assert!((distance_after - 42.0).abs() < 1e-9);
    assert_eq!(score_after, score_before);
    assert_eq!(routes[0].points(), &[s, c, b, e]);
    assert_eq!(routes[1].points(), &[s, a, e]);
    assert!(routes.iter().all(|r| r.total_distance() <= 40.0));
}

#[test]
fn test_rearrange_respects_budget() {
    let (s, e) = anchors();
    let a = Point::new(2, 10.0, 0.0, 1.0);
    let b = Point::new(3, 0.0, 10.0, 2.0);
    let c = Point::new(4, 0.0, 11.0, 3.0);
    let original = vec![Route::new(vec![s, a, b, e]), Route::new(vec![s, c, e])];
    let mut routes = original.clone();
    rearrange(&mut routes, 21.9);
    assert_eq!(routes, original);
}

#[test]
fn test_rearrange_single_route_is_untouched() {
    let (s, e) = anchors();
    let mut routes = vec![Route::new(vec![s, Point::new(2, 1.0, 1.0, 1.0), e])];
    let original = routes.clone();
    rearrange(&mut routes, 100.0);
    assert_eq!(routes, original);
}

#[test]
fn test_add_maximum_points_fills_routes() {
    let (s, e) = anchors();
    let assigned = Point::new(2, 3.0, 0.0, 1.0);
    let near = Point::new(3, 3.0, 1.0, 5.0);
    let nearer = Point::new(4, 2.0, 0.0, 7.0);
    let far = Point::new(5, 40.0, 0.0, 50.0);
    let mut pool = PointPool::new(vec![assigned, near, nearer, far]);
    let mut routes = vec![Route::new(vec![s, assigned, e]), Route::between(s, e)];
    let score_before: f64 = routes.iter().map(|r| r.total_score()).sum();

    let added = add_maximum_points(&mut routes, &mut pool, 30.0, &seeded_hasher(&[0u8; 32]));

    assert_eq!(added, 2);
    assert!(routes[0].contains(&near));
    assert!(routes[0].contains(&nearer));
    assert!(!routes.iter().any(|r| r.contains(&far)));
    let ids: Vec<usize> = pool.points().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![5]);
    let score_after: f64 = routes.iter().map(|r| r.total_score()).sum();
    assert!(score_after >= score_before);
    assert!(routes.iter().all(|r| r.total_distance() <= 30.0 && !r.has_duplicates()));
}

#[test]
fn test_add_maximum_points_on_empty_pool() {
    let (s, e) = anchors();
    let mut pool = PointPool::new(Vec::new());
    let mut routes = vec![Route::between(s, e)];
    let added = add_maximum_points(&mut routes, &mut pool, 30.0, &seeded_hasher(&[0u8; 32]));
    assert_eq!(added, 0);
    assert_eq!(routes, vec![Route::between(s, e)]);
}

#[test]
fn test_rebalancing_twice_never_loses_score() {
    let (s, e) = anchors();
    let a = Point::new(2, 10.0, 0.0, 1.0);
    let b = Point::new(3, 0.0, 10.0, 2.0);
    let c = Point::new(4, 0.0, 11.0, 3.0);
    let d = Point::new(5, 1.0, 10.0, 4.0);
    let hasher = seeded_hasher(&[7u8; 32]);
    let mut pool = PointPool::new(vec![a, b, c, d]);
    let mut routes = vec![Route::new(vec![s, a, b, e]), Route::new(vec![s, c, e])];

    rearrange(&mut routes, 40.0);
    add_maximum_points(&mut routes, &mut pool, 40.0, &hasher);
    let once: f64 = routes.iter().map(|r| r.total_score()).sum();

    rearrange(&mut routes, 40.0);
    add_maximum_points(&mut routes, &mut pool, 40.0, &hasher);
    let twice: f64 = routes.iter().map(|r| r.total_score()).sum();

    assert!(twice >= once);
    assert!(routes.iter().all(|r| r.total_distance() <= 40.0 && !r.has_duplicates()));
}
