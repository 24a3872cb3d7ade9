use crate::Route;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Default)]
pub struct Solution {
    pub routes: Vec<Route>,
}

impl Solution {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    pub fn combined_score(&self) -> f64 {
        self.routes.iter().map(|r| r.total_score()).sum()
    }

    pub fn combined_distance(&self) -> f64 {
        self.routes.iter().map(|r| r.total_distance()).sum()
    }
}
