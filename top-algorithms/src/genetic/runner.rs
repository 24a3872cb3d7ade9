use super::config::Params;
use super::evolution::Genetic;
use crate::seeded_hasher;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::Serialize;
use serde_json::{Map, Value};
use top_challenges::{Dataset, Route, Solution, TopResult};
use tracing::info;

/// Outcome of one solver run on one dataset.
#[derive(Serialize, Debug, Clone)]
pub struct RunResult {
    pub file_name: String,
    pub params: Params,
    pub solution: Solution,
}

impl RunResult {
    pub fn routes(&self) -> &[Route] {
        &self.solution.routes
    }

    pub fn combined_score(&self) -> f64 {
        self.solution.combined_score()
    }

    /// One `<ids> | <score> | <distance>` line per route, anchors included, then the total.
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .solution
            .routes
            .iter()
            .map(|r| {
                let ids: Vec<String> = r.points().iter().map(|p| p.id().to_string()).collect();
                format!(
                    "{} | {} | {:.4}",
                    ids.join(" "),
                    r.total_score(),
                    r.total_distance()
                )
            })
            .collect();
        lines.push(format!("Total Score: {}", self.combined_score()));
        lines
    }
}

pub struct Solver;

impl Solver {
    pub fn solve<R: Rng>(dataset: &Dataset, params: Params, rng: &mut R) -> TopResult<RunResult> {
        params.validate()?;
        let hasher = seeded_hasher(&rng.gen::<[u8; 32]>());
        let mut ga = Genetic::new(dataset, params, hasher);
        let solution = ga.run(rng)?;
        info!(
            file_name = dataset.file_name(),
            routes = solution.routes.len(),
            score = solution.combined_score(),
            distance = solution.combined_distance(),
            "run complete"
        );
        Ok(RunResult {
            file_name: dataset.file_name().to_string(),
            params,
            solution,
        })
    }

    pub fn solve_with_seed(
        dataset: &Dataset,
        params: Params,
        seed: [u8; 32],
    ) -> TopResult<RunResult> {
        let mut rng = SmallRng::from_seed(seed);
        Self::solve(dataset, params, &mut rng)
    }

    pub fn solve_challenge_instance(
        dataset: &Dataset,
        hyperparameters: &Option<Map<String, Value>>,
        seed: [u8; 32],
    ) -> TopResult<RunResult> {
        let params = Params::initialize(hyperparameters)?;
        Self::solve_with_seed(dataset, params, seed)
    }
}
