use crate::geometry::{euclidean_distance, locality_key};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A scored waypoint. Immutable once built; the locality key is derived from the coordinates.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
#[serde(from = "PointRecord", into = "PointRecord")]
pub struct Point {
    id: usize,
    x: f64,
    y: f64,
    score: f64,
    locality_key: u64,
}

#[derive(Serialize, Deserialize)]
struct PointRecord {
    id: usize,
    x: f64,
    y: f64,
    score: f64,
}

impl From<PointRecord> for Point {
    fn from(r: PointRecord) -> Self {
        Point::new(r.id, r.x, r.y, r.score)
    }
}

impl From<Point> for PointRecord {
    fn from(p: Point) -> Self {
        PointRecord {
            id: p.id,
            x: p.x,
            y: p.y,
            score: p.score,
        }
    }
}

impl Point {
    pub fn new(id: usize, x: f64, y: f64, score: f64) -> Self {
        Self {
            id,
            x,
            y,
            score,
            locality_key: locality_key(x, y),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn locality_key(&self) -> u64 {
        self.locality_key
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        euclidean_distance(self, other)
    }

    /// Proximity order: by locality key, ties by id so the order is total.
    pub fn locality_cmp(a: &Point, b: &Point) -> Ordering {
        a.locality_key
            .cmp(&b.locality_key)
            .then_with(|| a.id.cmp(&b.id))
    }

    /// Highest score first, ties by ascending id.
    pub fn score_desc_cmp(a: &Point, b: &Point) -> Ordering {
        b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id))
    }
}
