use super::config::{ADD_OR_REPLACE_DRAWS, OPERATOR_PROBABILITY, WINDOW_RADIUS};
use super::insertion::insert_cheapest;
use super::pool::PointPool;
use rand::seq::SliceRandom;
use rand::Rng;
use top_challenges::{Route, TopError, TopResult};

/// Applies each operator independently with [`OPERATOR_PROBABILITY`], in a fixed order, to
/// children drawn for mutation with probability `p_mutate`.
pub fn mutate_route<R: Rng>(
    child: Route,
    pool: &PointPool,
    p_mutate: f64,
    t_max: f64,
    rng: &mut R,
) -> TopResult<Route> {
    if rng.gen::<f64>() > p_mutate {
        return Ok(child);
    }
    let mut route = child;
    if rng.gen::<f64>() < OPERATOR_PROBABILITY {
        route = complete_two_opt(route);
    }
    if rng.gen::<f64>() < OPERATOR_PROBABILITY {
        route = add_random_point(route, pool, t_max, rng);
    }
    if rng.gen::<f64>() < OPERATOR_PROBABILITY {
        route = window_local_search(route, pool, WINDOW_RADIUS, t_max, rng)?;
    }
    if rng.gen::<f64>() < OPERATOR_PROBABILITY {
        route = add_or_replace(route, pool, t_max, rng);
    }
    Ok(route)
}

/// One sweep over every interior segment, keeping a reversal whenever it shortens the route.
pub fn complete_two_opt(route: Route) -> Route {
    let n = route.len();
    if n < 4 {
        return route;
    }
    let mut best = route;
    for i in 1..=n - 3 {
        for j in i + 1..=n - 2 {
            let candidate = best.with_reversed(i, j);
            if candidate.total_distance() < best.total_distance() {
                best = candidate;
            }
        }
    }
    best
}

/// Cheapest insertion of one sampled pool point, kept only if it fits the budget.
pub fn add_random_point<R: Rng>(route: Route, pool: &PointPool, t_max: f64, rng: &mut R) -> Route {
    let Some(point) = pool.sample(rng) else {
        return route;
    };
    match insert_cheapest(&route, point) {
        Some(candidate) if candidate.total_distance() <= t_max && !candidate.has_duplicates() => {
            candidate
        }
        _ => route,
    }
}

/// Visits a random number of distinct interior positions and tries to swap each point for one
/// of its `radius` locality neighbours on either side. The best strictly improving feasible
/// swap is committed before moving on to the next position.
pub fn window_local_search<R: Rng>(
    route: Route,
    pool: &PointPool,
    radius: usize,
    t_max: f64,
    rng: &mut R,
) -> TopResult<Route> {
    if radius < 1 {
        return Err(TopError::InvalidWindowRadius(radius));
    }
    let n = route.len();
    if n <= 2 || pool.is_empty() {
        return Ok(route);
    }
    let mut positions: Vec<usize> = (1..n - 1).collect();
    positions.shuffle(rng);
    let k = rng.gen_range(1..=positions.len());

    let mut current = route;
    for &pos in &positions[..k] {
        let original = current.points()[pos];
        let Some(rank) = pool.rank_of(&original) else {
            continue;
        };
        let lo = rank.saturating_sub(radius);
        let hi = (rank + radius).min(pool.len() - 1);
        let mut best: Option<Route> = None;
        for r in (lo..=hi).filter(|&r| r != rank) {
            let candidate = current.with_replaced(pos, pool.points()[r]);
            if candidate.total_distance() > t_max
                || candidate.has_duplicates()
                || !candidate.is_better_than(&current)
            {
                continue;
            }
            if best.as_ref().map_or(true, |b| candidate.is_better_than(b)) {
                best = Some(candidate);
            }
        }
        if let Some(best) = best {
            current = best;
        }
    }
    Ok(current)
}

/// Tries to fit one new pool point. If it does not fit directly, low-yield points are dropped
/// to make room while the score can still match the original. The first point that fits or
/// yields a better route ends the search.
pub fn add_or_replace<R: Rng>(route: Route, pool: &PointPool, t_max: f64, rng: &mut R) -> Route {
    for _ in 0..ADD_OR_REPLACE_DRAWS {
        let Some(candidate) = pool.sample(rng) else {
            return route;
        };
        let Some(direct) = insert_cheapest(&route, candidate) else {
            continue;
        };
        if direct.total_distance() <= t_max {
            return direct;
        }

        let mut trial = route.clone();
        while trial.total_score() + candidate.score() >= route.total_score()
            && !trial.contains(&candidate)
            && trial.len() > 2
        {
            let len_before = trial.len();
            trial = drop_worst_ratio_point(trial);
            if trial.len() == len_before {
                break;
            }
            if let Some(extended) = insert_cheapest(&trial, candidate) {
                if extended.total_distance() <= t_max {
                    trial = extended;
                }
            }
        }
        return if trial.is_better_than(&route) {
            trial
        } else {
            route
        };
    }
    route
}

/// Removes the interior point with the lowest score per unit of incoming leg distance.
/// Routes with no finite ratio below `f64::MAX` come back unchanged.
pub fn drop_worst_ratio_point(route: Route) -> Route {
    if route.len() <= 2 {
        return route;
    }
    let mut worst_ratio = f64::MAX;
    let mut worst = None;
    for i in 1..route.len() - 1 {
        let ratio = route.step_scores()[i] / route.step_distances()[i];
        if ratio < worst_ratio {
            worst_ratio = ratio;
            worst = Some(i);
        }
    }
    match worst {
        Some(i) => route.with_removed(i),
        None => route,
    }
}
