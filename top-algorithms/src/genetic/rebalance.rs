use super::config::REBALANCE_RADIUS_DIVISOR;
use super::insertion::{best_insertion_index, insert_cheapest};
use super::pool::PointPool;
use crate::HashSet;
use ahash::RandomState;
use top_challenges::{Point, Route};

/// Tries to move each interior point of every route into every other route.
///
/// A move is kept when the receiving route stays within `t_max`, no point is lost, and the
/// pair's combined distance strictly drops below the pair's distance as of the last kept
/// move. Scores never change.
pub fn rearrange(routes: &mut [Route], t_max: f64) {
    for i in 0..routes.len() {
        for j in 0..routes.len() {
            if i == j {
                continue;
            }
            let point_count = routes[i].len() + routes[j].len();
            let mut baseline = routes[i].total_distance() + routes[j].total_distance();
            let mut k = 1;
            while k + 1 < routes[i].len() {
                let moved = routes[i].points()[k];
                let donor = routes[i].with_removed(k);
                let receiver = match best_insertion_index(&moved, routes[j].points()) {
                    Some(index) => routes[j].with_inserted(index, moved),
                    None => routes[j].clone(),
                };
                let combined = donor.total_distance() + receiver.total_distance();
                if receiver.total_distance() <= t_max
                    && donor.len() + receiver.len() == point_count
                    && combined < baseline
                {
                    routes[i] = donor;
                    routes[j] = receiver;
                    baseline = combined;
                }
                k += 1;
            }
        }
    }
}

/// Offers each route the unassigned pool points lying within `t_max / 3` of any of its
/// points, best score first, and keeps every cheapest insertion that fits. Inserted points
/// leave the pool. Returns how many points were added.
pub fn add_maximum_points(
    routes: &mut [Route],
    pool: &mut PointPool,
    t_max: f64,
    hasher: &RandomState,
) -> usize {
    pool.remove_all(routes.iter().flat_map(|r| r.points()));
    let radius = t_max / REBALANCE_RADIUS_DIVISOR;
    let mut added = 0;
    for route in routes.iter_mut() {
        let mut seen: HashSet<usize> = HashSet::with_hasher(hasher.clone());
        let mut candidates: Vec<Point> = Vec::new();
        for anchor in route.points() {
            for p in pool.within_radius(anchor, radius) {
                if seen.insert(p.id()) {
                    candidates.push(p);
                }
            }
        }
        candidates.sort_by(Point::score_desc_cmp);
        for candidate in candidates {
            let Some(extended) = insert_cheapest(route, candidate) else {
                continue;
            };
            if extended.total_distance() <= t_max {
                *route = extended;
                pool.remove(&candidate);
                added += 1;
            }
        }
    }
    added
}
