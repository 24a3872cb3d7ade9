use crate::{euclidean_distance, Point, Solution, TopError, TopResult};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

/// A Team Orienteering instance. The first point is the start anchor, the last the end anchor.
#[derive(Serialize, Debug, Clone)]
pub struct Dataset {
    file_name: String,
    n_points: usize,
    n_routes: usize,
    t_max: f64,
    points: Vec<Point>,
}

impl Dataset {
    pub fn new(
        file_name: impl Into<String>,
        n_points: usize,
        n_routes: usize,
        t_max: f64,
        points: Vec<Point>,
    ) -> TopResult<Self> {
        if points.len() < 2 {
            return Err(TopError::MalformedDataset(format!(
                "need at least a start and an end point, got {} point(s)",
                points.len()
            )));
        }
        if n_routes == 0 {
            return Err(TopError::MalformedDataset(
                "number of routes (m) cannot be 0".to_string(),
            ));
        }
        if !t_max.is_finite() || t_max < 0.0 {
            return Err(TopError::MalformedDataset(format!(
                "tmax must be a finite non-negative number, got {}",
                t_max
            )));
        }
        if let Some(p) = points.iter().find(|p| {
            !p.x().is_finite() || !p.y().is_finite() || !p.score().is_finite() || p.score() < 0.0
        }) {
            return Err(TopError::MalformedDataset(format!(
                "point {} has invalid coordinates or score",
                p.id()
            )));
        }
        let leg = euclidean_distance(&points[0], &points[points.len() - 1]);
        if leg > t_max {
            return Err(TopError::MalformedDataset(format!(
                "start to end distance {} exceeds tmax {}",
                leg, t_max
            )));
        }
        let file_name = file_name.into();
        if n_points != points.len() {
            warn!(
                file_name = %file_name,
                declared = n_points,
                read = points.len(),
                "declared point count does not match points read"
            );
        }
        Ok(Self {
            file_name,
            n_points,
            n_routes,
            t_max,
            points,
        })
    }

    /// Parses the TOP text format: `n <int>`, `m <int>`, `tmax <float>` followed by one
    /// `x y score` row per point. Point ids are assigned from 1 in row order.
    pub fn from_top_str(file_name: &str, text: &str) -> TopResult<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty());

        let n_points: usize = parse_header(lines.next(), "n")?;
        let n_routes: usize = parse_header(lines.next(), "m")?;
        let t_max: f64 = parse_header(lines.next(), "tmax")?;

        let mut points = Vec::new();
        for (line_no, line) in lines {
            let mut tokens = line.split_whitespace();
            let mut field = |name: &str| -> TopResult<f64> {
                let token = tokens.next().ok_or_else(|| {
                    TopError::MalformedDataset(format!("line {}: missing {}", line_no, name))
                })?;
                token.parse::<f64>().map_err(|_| {
                    TopError::MalformedDataset(format!(
                        "line {}: invalid {} '{}'",
                        line_no, name, token
                    ))
                })
            };
            let x = field("x")?;
            let y = field("y")?;
            let score = field("score")?;
            points.push(Point::new(points.len() + 1, x, y, score));
        }

        Self::new(file_name, n_points, n_routes, t_max, points)
    }

    pub fn from_top_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read TOP file: {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::from_top_str(&file_name, &text)
            .with_context(|| format!("Invalid TOP file: {}", path.display()))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn n_points(&self) -> usize {
        self.n_points
    }

    pub fn n_routes(&self) -> usize {
        self.n_routes
    }

    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn start(&self) -> &Point {
        &self.points[0]
    }

    pub fn end(&self) -> &Point {
        &self.points[self.points.len() - 1]
    }

    /// Every point that may be visited, i.e. all points minus the anchors.
    pub fn candidates(&self) -> &[Point] {
        &self.points[1..self.points.len() - 1]
    }

    /// Checks route count, anchors, budget and disjointness. Returns the combined score.
    pub fn verify_solution(&self, solution: &Solution) -> TopResult<f64> {
        if solution.routes.len() != self.n_routes {
            return Err(TopError::InvalidSolution(format!(
                "expected {} routes, got {}",
                self.n_routes,
                solution.routes.len()
            )));
        }
        let mut visited = HashSet::new();
        for (i, route) in solution.routes.iter().enumerate() {
            if route.len() < 2
                || route.points()[0] != *self.start()
                || route.points()[route.len() - 1] != *self.end()
            {
                return Err(TopError::InvalidSolution(format!(
                    "route {} must start and end at the dataset anchors",
                    i
                )));
            }
            if route.total_distance() > self.t_max {
                return Err(TopError::InvalidSolution(format!(
                    "route {} distance {} exceeds tmax {}",
                    i,
                    route.total_distance(),
                    self.t_max
                )));
            }
            for p in route.interior() {
                if !self.candidates().contains(p) {
                    return Err(TopError::InvalidSolution(format!(
                        "route {} visits point {} which is not a dataset point",
                        i,
                        p.id()
                    )));
                }
                if !visited.insert(p.id()) {
                    return Err(TopError::InvalidSolution(format!(
                        "point {} is visited more than once",
                        p.id()
                    )));
                }
            }
        }
        Ok(solution.combined_score())
    }
}

fn parse_header<T: FromStr>(line: Option<(usize, &str)>, keyword: &str) -> TopResult<T> {
    let (line_no, line) = line.ok_or_else(|| {
        TopError::MalformedDataset(format!("missing '{}' header line", keyword))
    })?;
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some(keyword) {
        return Err(TopError::MalformedDataset(format!(
            "line {}: expected '{}' header, file is not in TOP format",
            line_no, keyword
        )));
    }
    tokens
        .next()
        .and_then(|v| v.parse::<T>().ok())
        .ok_or_else(|| {
            TopError::MalformedDataset(format!(
                "line {}: missing or invalid value for '{}'",
                line_no, keyword
            ))
        })
}
