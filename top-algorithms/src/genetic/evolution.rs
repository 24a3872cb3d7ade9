use super::config::Params;
use super::operators::mutate_route;
use super::pool::PointPool;
use super::population::initialise_population;
use super::rebalance::{add_maximum_points, rearrange};
use super::state::{Phase, RouteBuildState};
use crate::HashSet;
use ahash::RandomState;
use rand::seq::SliceRandom;
use rand::Rng;
use top_challenges::{best_route, Dataset, Point, Route, Solution, TopResult};
use tracing::{debug, info};

/// Builds routes one at a time with a generational GA, then rebalances the finished set.
pub struct Genetic {
    params: Params,
    t_max: f64,
    n_routes: usize,
    start: Point,
    end: Point,
    pool: PointPool,
    population: Vec<Route>,
    selected_parents: Vec<Route>,
    child_population: Vec<Route>,
    retained_children: Vec<Route>,
    final_routes: Vec<Route>,
    state: RouteBuildState,
    hasher: RandomState,
}

impl Genetic {
    /// Points that cannot be reached from the start within `t_max` never enter the pool.
    pub fn new(dataset: &Dataset, params: Params, hasher: RandomState) -> Self {
        let start = *dataset.start();
        let mut pool = PointPool::new(dataset.candidates().iter().copied());
        let pruned = pool.retain_within(&start, dataset.t_max());
        if pruned > 0 {
            debug!(pruned, "dropped points out of reach of the start");
        }
        Self {
            params,
            t_max: dataset.t_max(),
            n_routes: dataset.n_routes(),
            start,
            end: *dataset.end(),
            pool,
            population: Vec::new(),
            selected_parents: Vec::new(),
            child_population: Vec::new(),
            retained_children: Vec::new(),
            final_routes: Vec::new(),
            state: RouteBuildState::new(&params),
            hasher,
        }
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn pool(&self) -> &PointPool {
        &self.pool
    }

    pub fn population(&self) -> &[Route] {
        &self.population
    }

    pub fn selected_parents(&self) -> &[Route] {
        &self.selected_parents
    }

    pub fn child_population(&self) -> &[Route] {
        &self.child_population
    }

    pub fn retained_children(&self) -> &[Route] {
        &self.retained_children
    }

    pub fn final_routes(&self) -> &[Route] {
        &self.final_routes
    }

    pub fn state(&self) -> &RouteBuildState {
        &self.state
    }

    pub fn generation_counter(&self) -> usize {
        self.state.generation()
    }

    /// Builds every route, rebalances them and returns the solution.
    pub fn run<R: Rng>(&mut self, rng: &mut R) -> TopResult<Solution> {
        while self.final_routes.len() < self.n_routes {
            self.build_route(rng)?;
        }
        self.rebalance();
        Ok(Solution {
            routes: self.final_routes.clone(),
        })
    }

    /// Runs the generation loop for one route, commits its best route and removes the
    /// route's points from the pool.
    pub fn build_route<R: Rng>(&mut self, rng: &mut R) -> TopResult<Route> {
        self.initialise_population(rng);
        loop {
            self.tournament_selection(rng);
            self.single_point_crossover(rng);
            self.mutate_children(rng)?;
            self.elitist_replacement();
            let generation_best = best_route(&self.retained_children)
                .cloned()
                .unwrap_or_else(|| Route::between(self.start, self.end));
            debug!(
                route = self.final_routes.len(),
                generation = self.state.generation(),
                best_score = generation_best.total_score(),
                best_distance = generation_best.total_distance(),
                unique_genes = self.unique_gene_count(),
                "generation done"
            );
            if self.state.record_generation(&generation_best) == Phase::Done {
                break;
            }
            self.retained_children.shuffle(rng);
        }

        let best = self
            .state
            .best_route()
            .cloned()
            .unwrap_or_else(|| Route::between(self.start, self.end));
        self.pool.remove_all(best.interior());
        info!(
            route = self.final_routes.len(),
            generations = self.state.generation() + 1,
            score = best.total_score(),
            distance = best.total_distance(),
            remaining = self.pool.len(),
            "route finalized"
        );
        self.final_routes.push(best.clone());
        Ok(best)
    }

    /// Fresh random population for the next route; clears all per-route working state.
    pub fn initialise_population<R: Rng>(&mut self, rng: &mut R) {
        self.population =
            initialise_population(self.start, self.end, &self.pool, &self.params, self.t_max, rng);
        self.selected_parents.clear();
        self.child_population.clear();
        self.retained_children.clear();
        self.state = RouteBuildState::new(&self.params);
    }

    /// Binary tournaments with replacement, `pop_size` of them. The first contestant wins
    /// ties. The initial population feeds generation 0, later generations draw from the
    /// retained children, which are consumed.
    pub fn tournament_selection<R: Rng>(&mut self, rng: &mut R) {
        let source = if self.state.generation() == 0 {
            &self.population
        } else {
            &self.retained_children
        };
        self.selected_parents.clear();
        if !source.is_empty() {
            for _ in 0..self.params.pop_size {
                let a = &source[rng.gen_range(0..source.len())];
                let b = &source[rng.gen_range(0..source.len())];
                self.selected_parents
                    .push(if b.is_better_than(a) { b } else { a }.clone());
            }
        }
        self.retained_children.clear();
    }

    /// Pairs up parents picked with probability `p_crossover` and crosses them; the rest pass
    /// through. An unpaired leftover fills the population back up to `pop_size`.
    pub fn single_point_crossover<R: Rng>(&mut self, rng: &mut R) {
        let mut children = Vec::with_capacity(self.selected_parents.len());
        let mut waiting: Option<&Route> = None;
        for parent in &self.selected_parents {
            if rng.gen::<f64>() <= self.params.p_crossover {
                match waiting.take() {
                    Some(first) => {
                        let (c1, c2) = crossover_pair(first, parent, self.t_max);
                        children.push(c1);
                        children.push(c2);
                    }
                    None => waiting = Some(parent),
                }
            } else {
                children.push(parent.clone());
            }
        }
        if let Some(leftover) = waiting {
            if children.len() < self.params.pop_size {
                children.push(leftover.clone());
            }
        }
        self.child_population = children;
    }

    pub fn mutate_children<R: Rng>(&mut self, rng: &mut R) -> TopResult<()> {
        let children = std::mem::take(&mut self.child_population);
        self.child_population = children
            .into_iter()
            .map(|child| mutate_route(child, &self.pool, self.params.p_mutate, self.t_max, rng))
            .collect::<TopResult<Vec<_>>>()?;
        Ok(())
    }

    /// The best `elite_count` parents overwrite the worst children; the result becomes the
    /// retained children.
    pub fn elitist_replacement(&mut self) {
        self.selected_parents.sort_by(|a, b| b.preference_cmp(a));
        self.child_population.sort_by(|a, b| a.preference_cmp(b));
        let elites = self
            .params
            .elite_count()
            .min(self.selected_parents.len())
            .min(self.child_population.len());
        for k in 0..elites {
            self.child_population[k] = self.selected_parents[k].clone();
        }
        self.selected_parents.clear();
        self.retained_children = self.child_population.clone();
    }

    /// Moves interior points between finished routes, then tops each route up from the pool.
    pub fn rebalance(&mut self) {
        let before = self.final_routes.iter().map(Route::total_score).sum::<f64>();
        rearrange(&mut self.final_routes, self.t_max);
        let added = add_maximum_points(
            &mut self.final_routes,
            &mut self.pool,
            self.t_max,
            &self.hasher,
        );
        let after = self.final_routes.iter().map(Route::total_score).sum::<f64>();
        info!(added, score_before = before, score_after = after, "routes rebalanced");
    }

    fn unique_gene_count(&self) -> usize {
        let mut genes: HashSet<usize> = HashSet::with_hasher(self.hasher.clone());
        for route in &self.retained_children {
            genes.extend(route.interior().iter().map(Point::id));
        }
        genes.len()
    }
}

/// Crosses two parents at the first interior point of `parent1` that `parent2` also visits.
/// Children are repaired and replaced by their own parent when over budget; without a
/// common point the parents come back unchanged.
pub fn crossover_pair(parent1: &Route, parent2: &Route, t_max: f64) -> (Route, Route) {
    let common = (1..parent1.len().saturating_sub(1))
        .find_map(|i| parent2.position(&parent1.points()[i]).map(|j| (i, j)));
    let Some((i, j)) = common else {
        return (parent1.clone(), parent2.clone());
    };
    let mut points1 = parent1.points()[..i].to_vec();
    points1.extend_from_slice(&parent2.points()[j..]);
    let mut points2 = parent2.points()[..j].to_vec();
    points2.extend_from_slice(&parent1.points()[i..]);

    let child1 = remove_worst_duplicate_points(Route::new(points1));
    let child2 = remove_worst_duplicate_points(Route::new(points2));
    (
        if child1.total_distance() <= t_max {
            child1
        } else {
            parent1.clone()
        },
        if child2.total_distance() <= t_max {
            child2
        } else {
            parent2.clone()
        },
    )
}

/// Resolves repeated points, keeping for each value the occurrence whose removal leaves the
/// shorter route. Values are handled in order of first appearance.
pub fn remove_worst_duplicate_points(route: Route) -> Route {
    let duplicated = duplicated_points(route.points());
    let mut route = route;
    while route.has_duplicates() {
        let mut changed = false;
        for point in &duplicated {
            let first = route.position(point);
            let last = route.points().iter().rposition(|p| p == point);
            let (Some(first), Some(last)) = (first, last) else {
                continue;
            };
            if first == last {
                continue;
            }
            let without_first = route.with_removed(first);
            let without_last = route.with_removed(last);
            route = if without_last.total_distance() < without_first.total_distance() {
                without_last
            } else {
                without_first
            };
            changed = true;
        }
        if !changed {
            break;
        }
    }
    route
}

fn duplicated_points(points: &[Point]) -> Vec<Point> {
    let mut duplicated: Vec<Point> = Vec::new();
    for (i, p) in points.iter().enumerate() {
        if !duplicated.contains(p) && points[i + 1..].contains(p) {
            duplicated.push(*p);
        }
    }
    duplicated
}
