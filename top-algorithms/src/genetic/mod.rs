mod config;
mod evolution;
mod insertion;
mod operators;
mod pool;
mod population;
mod rebalance;
mod runner;
mod state;

pub use config::*;
pub use evolution::{crossover_pair, remove_worst_duplicate_points, Genetic};
pub use insertion::{best_insertion_index, insert_cheapest};
pub use operators::{
    add_or_replace, add_random_point, complete_two_opt, drop_worst_ratio_point, mutate_route,
    window_local_search,
};
pub use pool::PointPool;
pub use population::initialise_population;
pub use rebalance::{add_maximum_points, rearrange};
pub use runner::{RunResult, Solver};
pub use state::{Phase, RouteBuildState};

use serde_json::{Map, Value};
use top_challenges::{Dataset, TopResult};

pub fn solve_challenge(
    dataset: &Dataset,
    hyperparameters: &Option<Map<String, Value>>,
    seed: [u8; 32],
) -> TopResult<RunResult> {
    Solver::solve_challenge_instance(dataset, hyperparameters, seed)
}

pub fn help() {
    println!("Genetic algorithm for the Team Orienteering Problem");
    println!("");
    println!("HYPERPARAMETERS (JSON object, every key optional):");
    println!("  pop_size         routes per generation (default 300)");
    println!("  tour_tries_max   failed draws before a random route stops growing (default 30)");
    println!("  p_crossover      chance a parent takes part in crossover (default 0.75)");
    println!("  p_mutate         chance a child is mutated (default 0.25)");
    println!("  tpg_percent      share of parents kept by elitism (default 0.03)");
    println!("  max_generations  generation cap per route (default 200)");
    println!("");
    println!("A route stops evolving after max_generations or once its best score has not");
    println!("changed for a quarter of max_generations.");
}
