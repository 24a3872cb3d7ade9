use crate::{euclidean_distance, Point};
use serde::Serialize;
use std::cmp::Ordering;

/// An ordered walk from a start anchor to an end anchor.
///
/// Aggregates are computed once in [`Route::new`]; every edit builds a new route.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Route {
    points: Vec<Point>,
    total_distance: f64,
    total_score: f64,
    has_duplicates: bool,
    /// `step_distances[i]` is the leg ending at point `i`; index 0 is always 0.
    step_distances: Vec<f64>,
    step_scores: Vec<f64>,
}

impl Route {
    pub fn new(points: Vec<Point>) -> Self {
        let mut step_distances = Vec::new();
        let mut step_scores = Vec::new();
        let mut total_distance = 0.0;
        let mut total_score = 0.0;
        if points.len() >= 2 {
            step_distances.reserve(points.len());
            step_distances.push(0.0);
            for w in points.windows(2) {
                let d = euclidean_distance(&w[0], &w[1]);
                step_distances.push(d);
                total_distance += d;
            }
            step_scores = points.iter().map(|p| p.score()).collect();
            total_score = step_scores.iter().sum();
        }
        let has_duplicates = contains_duplicates(&points);
        Self {
            points,
            total_distance,
            total_score,
            has_duplicates,
            step_distances,
            step_scores,
        }
    }

    /// The empty tour: start anchor straight to end anchor.
    pub fn between(start: Point, end: Point) -> Self {
        Self::new(vec![start, end])
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Genes: every point except the two anchors.
    pub fn interior(&self) -> &[Point] {
        if self.points.len() < 2 {
            &[]
        } else {
            &self.points[1..self.points.len() - 1]
        }
    }

    pub fn contains(&self, point: &Point) -> bool {
        self.points.contains(point)
    }

    pub fn position(&self, point: &Point) -> Option<usize> {
        self.points.iter().position(|p| p == point)
    }

    pub fn total_distance(&self) -> f64 {
        self.total_distance
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn has_duplicates(&self) -> bool {
        self.has_duplicates
    }

    pub fn step_distances(&self) -> &[f64] {
        &self.step_distances
    }

    pub fn step_scores(&self) -> &[f64] {
        &self.step_scores
    }

    /// Travel distance from the start up to and including the leg into `index`.
    pub fn cumulative_distance(&self, index: usize) -> Option<f64> {
        (index < self.step_distances.len()).then(|| self.step_distances[..=index].iter().sum())
    }

    /// Score collected from the start up to and including `index`.
    pub fn cumulative_score(&self, index: usize) -> Option<f64> {
        (index < self.step_scores.len()).then(|| self.step_scores[..=index].iter().sum())
    }

    pub fn with_inserted(&self, index: usize, point: Point) -> Route {
        let mut points = Vec::with_capacity(self.points.len() + 1);
        points.extend_from_slice(&self.points[..index]);
        points.push(point);
        points.extend_from_slice(&self.points[index..]);
        Route::new(points)
    }

    pub fn with_removed(&self, index: usize) -> Route {
        let mut points = self.points.clone();
        points.remove(index);
        Route::new(points)
    }

    pub fn with_replaced(&self, index: usize, point: Point) -> Route {
        let mut points = self.points.clone();
        points[index] = point;
        Route::new(points)
    }

    /// Reverses the inclusive segment `[i, j]`.
    pub fn with_reversed(&self, i: usize, j: usize) -> Route {
        let mut points = self.points.clone();
        points[i..=j].reverse();
        Route::new(points)
    }

    /// Route-preference order: `Greater` means `self` is preferred. Higher score wins, equal
    /// scores fall back to the shorter distance.
    pub fn preference_cmp(&self, other: &Route) -> Ordering {
        self.total_score
            .total_cmp(&other.total_score)
            .then_with(|| other.total_distance.total_cmp(&self.total_distance))
    }

    pub fn is_better_than(&self, other: &Route) -> bool {
        self.preference_cmp(other) == Ordering::Greater
    }

    pub fn distance_cmp(a: &Route, b: &Route) -> Ordering {
        a.total_distance.total_cmp(&b.total_distance)
    }
}

fn contains_duplicates(points: &[Point]) -> bool {
    let mut order: Vec<usize> = (0..points.len()).collect();
    order.sort_by_key(|&i| points[i].id());
    // equal ids are only candidates, value equality decides
    let mut run_start = 0;
    for k in 1..=order.len() {
        if k == order.len() || points[order[k]].id() != points[order[run_start]].id() {
            let run = &order[run_start..k];
            let duplicated = run
                .iter()
                .enumerate()
                .any(|(a, &i)| run[a + 1..].iter().any(|&j| points[i] == points[j]));
            if duplicated {
                return true;
            }
            run_start = k;
        }
    }
    false
}

/// Returns the best route under the preference order; the first one wins ties.
pub fn best_route<'a, I>(routes: I) -> Option<&'a Route>
where
    I: IntoIterator<Item = &'a Route>,
{
    routes.into_iter().fold(None, |best: Option<&Route>, r| match best {
        Some(b) if !r.is_better_than(b) => Some(b),
        _ => Some(r),
    })
}
