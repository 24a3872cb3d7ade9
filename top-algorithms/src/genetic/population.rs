use super::config::{Params, BUCKET_DRAW_PROBABILITY, TOP_SCORE_SAMPLE};
use super::insertion::insert_cheapest;
use super::pool::PointPool;
use rand::Rng;
use top_challenges::{Point, Route};

/// Builds `params.pop_size` random feasible routes from `start` to `end`.
pub fn initialise_population<R: Rng>(
    start: Point,
    end: Point,
    pool: &PointPool,
    params: &Params,
    t_max: f64,
    rng: &mut R,
) -> Vec<Route> {
    let top = pool.top_scoring(TOP_SCORE_SAMPLE);
    (0..params.pop_size)
        .map(|_| random_route(start, end, pool, &top, params.tour_tries_max, t_max, rng))
        .collect()
}

/// Grows a route by cheapest insertion of random draws until `tries_max` consecutive draws
/// fail to fit. A successful insertion resets the failure count.
fn random_route<R: Rng>(
    start: Point,
    end: Point,
    pool: &PointPool,
    top: &[Point],
    tries_max: usize,
    t_max: f64,
    rng: &mut R,
) -> Route {
    let mut route = Route::between(start, end);
    let mut failures = 0;
    while route.total_distance() < t_max && failures < tries_max {
        let drawn = if rng.gen::<f64>() < BUCKET_DRAW_PROBABILITY || top.is_empty() {
            pool.sample(rng)
        } else {
            Some(top[rng.gen_range(0..top.len())])
        };
        let Some(point) = drawn else {
            break;
        };
        match insert_cheapest(&route, point) {
            Some(candidate) if candidate.total_distance() <= t_max => {
                route = candidate;
                failures = 0;
            }
            _ => failures += 1,
        }
    }
    route
}
