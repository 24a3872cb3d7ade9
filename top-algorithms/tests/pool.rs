use rand::{rngs::SmallRng, SeedableRng};
use top_algorithms::{PointPool, BUCKET_COUNT};
use top_challenges::Point;

fn grid(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i + 2, (i % 5) as f64 * 3.0, (i / 5) as f64 * 3.0, (i % 7) as f64))
        .collect()
}

#[test]
fn test_buckets_partition_the_pool() {
    let pool = PointPool::new(grid(25));
    assert_eq!(pool.bucket_count(), BUCKET_COUNT);
    let mut covered = 0;
    for b in 0..pool.bucket_count() {
        let bucket = pool.bucket(b).unwrap();
        assert!(bucket.len() == 2 || bucket.len() == 3);
        assert_eq!(bucket, &pool.points()[covered..covered + bucket.len()]);
        covered += bucket.len();
    }
    assert_eq!(covered, 25);
    assert!(pool.bucket(BUCKET_COUNT).is_none());
}

#[test]
fn test_small_pool_has_one_bucket_per_point() {
    let pool = PointPool::new(grid(4));
    assert_eq!(pool.bucket_count(), 4);
    for b in 0..4 {
        assert_eq!(pool.bucket(b).unwrap().len(), 1);
    }
}

#[test]
fn test_points_are_in_locality_order() {
    let pool = PointPool::new(grid(25));
    for w in pool.points().windows(2) {
        assert!(w[0].locality_key() <= w[1].locality_key());
    }
    for (rank, p) in pool.points().iter().enumerate() {
        assert_eq!(pool.rank_of(p), Some(rank));
        assert_eq!(pool.get(rank), Some(p));
    }
    assert_eq!(pool.rank_of(&Point::new(99, 1.0, 1.0, 1.0)), None);
}

#[test]
fn test_sample_draws_pool_points() {
    let pool = PointPool::new(grid(25));
    let mut rng = SmallRng::from_seed([3u8; 32]);
    for _ in 0..200 {
        let p = pool.sample(&mut rng).unwrap();
        assert!(pool.points().contains(&p));
    }
    let empty = PointPool::new(Vec::new());
    assert!(empty.is_empty());
    assert_eq!(empty.bucket_count(), 0);
    assert!(empty.sample(&mut rng).is_none());
}

#[test]
fn test_top_scoring() {
    let pool = PointPool::new(grid(25));
    let top = pool.top_scoring(3);
    assert_eq!(top.len(), 3);
    assert!(top.iter().all(|p| p.score() == 6.0));
    assert!(top[0].id() < top[1].id() && top[1].id() < top[2].id());
    assert_eq!(pool.top_scoring(100).len(), 25);
}

#[test]
fn test_removal_keeps_buckets_consistent() {
    let points = grid(25);
    let mut pool = PointPool::new(points.clone());
    assert!(pool.remove(&points[0]));
    assert!(!pool.remove(&points[0]));
    assert_eq!(pool.len(), 24);
    assert_eq!(pool.remove_all(&points[0..6]), 5);
    assert_eq!(pool.len(), 19);
    let total: usize = (0..pool.bucket_count())
        .map(|b| pool.bucket(b).unwrap().len())
        .sum();
    assert_eq!(total, 19);
}

#[test]
fn test_radius_queries() {
    let origin = Point::new(1, 0.0, 0.0, 0.0);
    let mut pool = PointPool::new(grid(25));
    let near = pool.within_radius(&origin, 3.0);
    let ids: Vec<usize> = near.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec![2, 3, 7]);

    let dropped = pool.retain_within(&origin, 6.0);
    assert_eq!(pool.len() + dropped, 25);
    assert!(pool.points().iter().all(|p| origin.distance_to(p) <= 6.0));
}
