use super::config::Params;
use top_challenges::Route;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialized,
    Evolving,
    Done,
}

/// Progress of the generation loop for the route currently being built.
#[derive(Debug, Clone)]
pub struct RouteBuildState {
    phase: Phase,
    generation: usize,
    stagnation: usize,
    last_best_score: f64,
    best_route: Option<Route>,
    max_generations: usize,
    stagnation_limit: usize,
}

impl RouteBuildState {
    pub fn new(params: &Params) -> Self {
        Self {
            phase: Phase::Initialized,
            generation: 0,
            stagnation: 0,
            last_best_score: 0.0,
            best_route: None,
            max_generations: params.max_generations,
            stagnation_limit: params.stagnation_limit(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Index of the generation being run, or of the last one once `Done`.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    pub fn best_route(&self) -> Option<&Route> {
        self.best_route.as_ref()
    }

    pub fn into_best_route(self) -> Option<Route> {
        self.best_route
    }

    /// Folds in the best route of a finished generation and advances the phase.
    ///
    /// Stagnation counts consecutive generations whose best score equals the previous
    /// generation's. The build is done once the generation index reaches `max_generations`
    /// or stagnation reaches the limit.
    pub fn record_generation(&mut self, generation_best: &Route) -> Phase {
        if self.phase == Phase::Done {
            return self.phase;
        }
        if self
            .best_route
            .as_ref()
            .map_or(true, |best| generation_best.is_better_than(best))
        {
            self.best_route = Some(generation_best.clone());
        }
        if generation_best.total_score() == self.last_best_score {
            self.stagnation += 1;
        } else {
            self.last_best_score = generation_best.total_score();
            self.stagnation = 0;
        }
        if self.generation >= self.max_generations || self.stagnation >= self.stagnation_limit {
            self.phase = Phase::Done;
        } else {
            self.generation += 1;
            self.phase = Phase::Evolving;
        }
        self.phase
    }
}
