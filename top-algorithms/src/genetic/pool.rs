use super::config::BUCKET_COUNT;
use rand::Rng;
use std::ops::Range;
use top_challenges::Point;

/// Points not yet committed to a finished route, kept in locality order and split into
/// contiguous buckets of near-equal size.
#[derive(Debug, Clone)]
pub struct PointPool {
    points: Vec<Point>,
    buckets: Vec<Range<usize>>,
}

impl PointPool {
    pub fn new(points: impl IntoIterator<Item = Point>) -> Self {
        let mut points: Vec<Point> = points.into_iter().collect();
        points.sort_by(Point::locality_cmp);
        let mut pool = Self {
            points,
            buckets: Vec::new(),
        };
        pool.rebuild_buckets();
        pool
    }

    fn rebuild_buckets(&mut self) {
        let n = self.points.len();
        let count = BUCKET_COUNT.min(n);
        self.buckets = (0..count)
            .map(|b| b * n / count..(b + 1) * n / count)
            .collect();
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn bucket(&self, index: usize) -> Option<&[Point]> {
        self.buckets.get(index).map(|r| &self.points[r.clone()])
    }

    /// Position of `point` in locality order.
    pub fn rank_of(&self, point: &Point) -> Option<usize> {
        self.points
            .binary_search_by(|p| Point::locality_cmp(p, point))
            .ok()
            .filter(|&i| self.points[i] == *point)
    }

    pub fn get(&self, rank: usize) -> Option<&Point> {
        self.points.get(rank)
    }

    /// Uniform bucket, then a uniform point inside it. `None` once the pool is exhausted.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Point> {
        if self.buckets.is_empty() {
            return None;
        }
        let bucket = &self.buckets[rng.gen_range(0..self.buckets.len())];
        Some(self.points[rng.gen_range(bucket.clone())])
    }

    /// The `n` highest-scoring points, ties by ascending id.
    pub fn top_scoring(&self, n: usize) -> Vec<Point> {
        let mut sorted = self.points.clone();
        sorted.sort_by(Point::score_desc_cmp);
        sorted.truncate(n);
        sorted
    }

    /// Points within `radius` of `origin`, closest first.
    pub fn within_radius(&self, origin: &Point, radius: f64) -> Vec<Point> {
        let mut near: Vec<(f64, Point)> = self
            .points
            .iter()
            .map(|p| (origin.distance_to(p), *p))
            .filter(|(d, _)| *d <= radius)
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.id().cmp(&b.1.id())));
        near.into_iter().map(|(_, p)| p).collect()
    }

    /// Drops every point farther than `radius` from `origin`. Returns how many were dropped.
    pub fn retain_within(&mut self, origin: &Point, radius: f64) -> usize {
        let before = self.points.len();
        self.points.retain(|p| origin.distance_to(p) <= radius);
        self.rebuild_buckets();
        before - self.points.len()
    }

    pub fn remove(&mut self, point: &Point) -> bool {
        match self.rank_of(point) {
            Some(rank) => {
                self.points.remove(rank);
                self.rebuild_buckets();
                true
            }
            None => false,
        }
    }

    /// Removes every listed point present in the pool. Returns how many were removed.
    pub fn remove_all<'a>(&mut self, points: impl IntoIterator<Item = &'a Point>) -> usize {
        let mut targets: Vec<Point> = points.into_iter().copied().collect();
        targets.sort_by(Point::locality_cmp);
        let before = self.points.len();
        self.points.retain(|p| {
            targets
                .binary_search_by(|t| Point::locality_cmp(t, p))
                .map_or(true, |i| targets[i] != *p)
        });
        self.rebuild_buckets();
        before - self.points.len()
    }
}
