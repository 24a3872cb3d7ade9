use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use top_challenges::{TopError, TopResult};

/// Number of locality buckets the point pool is split into (fewer when the pool is smaller).
pub const BUCKET_COUNT: usize = 10;
/// Size of the top-scoring sample used by the initializer.
pub const TOP_SCORE_SAMPLE: usize = 10;
/// Chance that the initializer draws from a locality bucket instead of the top-scoring sample.
pub const BUCKET_DRAW_PROBABILITY: f64 = 0.8;
/// Chance that each mutation operator fires on a mutating child.
pub const OPERATOR_PROBABILITY: f64 = 0.5;
/// Rank radius of the window local search.
pub const WINDOW_RADIUS: usize = 3;
/// Pool draws attempted by add-or-replace before giving up.
pub const ADD_OR_REPLACE_DRAWS: usize = 10;
/// Stagnation limit as a fraction of `max_generations`.
pub const STAGNATION_FRACTION: f64 = 0.25;
/// Post-processing only offers points within `t_max / REBALANCE_RADIUS_DIVISOR` of a route.
pub const REBALANCE_RADIUS_DIVISOR: f64 = 3.0;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Params {
    pub pop_size: usize,
    pub tour_tries_max: usize,
    pub p_crossover: f64,
    pub p_mutate: f64,
    pub tpg_percent: f64,
    pub max_generations: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            pop_size: 300,
            tour_tries_max: 30,
            p_crossover: 0.75,
            p_mutate: 0.25,
            tpg_percent: 0.03,
            max_generations: 200,
        }
    }
}

impl Params {
    /// Overlays `hyperparameters` on the defaults. Unknown keys are ignored, a known key with
    /// the wrong type or an out-of-range value is an error.
    pub fn initialize(hyperparameters: &Option<Map<String, Value>>) -> TopResult<Self> {
        let mut merged = serde_json::to_value(Self::default())
            .map_err(|e| TopError::InvalidParams(e.to_string()))?;
        if let (Value::Object(ref mut obj), Some(map)) = (&mut merged, hyperparameters) {
            for (k, v) in map {
                obj.insert(k.clone(), v.clone());
            }
        }
        let params: Self =
            serde_json::from_value(merged).map_err(|e| TopError::InvalidParams(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> TopResult<()> {
        if self.pop_size == 0 {
            return Err(TopError::InvalidParams(
                "pop_size must be at least 1".to_string(),
            ));
        }
        for (name, p) in [
            ("p_crossover", self.p_crossover),
            ("p_mutate", self.p_mutate),
            ("tpg_percent", self.tpg_percent),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TopError::InvalidParams(format!(
                    "{} must be within [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }

    /// Generations without a change of best score after which a route build stops.
    pub fn stagnation_limit(&self) -> usize {
        (self.max_generations as f64 * STAGNATION_FRACTION).round() as usize
    }

    /// Parents carried over unchanged by elitist replacement.
    pub fn elite_count(&self) -> usize {
        (self.pop_size as f64 * self.tpg_percent).floor() as usize
    }
}
