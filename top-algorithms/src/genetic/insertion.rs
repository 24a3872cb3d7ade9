use top_challenges::{euclidean_distance, Point, Route};

/// Index at which inserting `candidate` into `sequence` adds the least detour.
///
/// `None` when the sequence has no leg to split or already holds the candidate. A two-point
/// sequence always takes the candidate in the middle.
pub fn best_insertion_index(candidate: &Point, sequence: &[Point]) -> Option<usize> {
    if sequence.len() < 2 || sequence.contains(candidate) {
        return None;
    }
    if sequence.len() == 2 {
        return Some(1);
    }
    let mut best_index = 1;
    let mut smallest = f64::MAX;
    for (i, leg) in sequence.windows(2).enumerate() {
        let detour =
            euclidean_distance(&leg[0], candidate) + euclidean_distance(candidate, &leg[1]);
        if detour < smallest {
            smallest = detour;
            best_index = i + 1;
        }
    }
    Some(best_index)
}

/// `route` with `candidate` at its cheapest position, feasibility unchecked.
pub fn insert_cheapest(route: &Route, candidate: Point) -> Option<Route> {
    best_insertion_index(&candidate, route.points()).map(|i| route.with_inserted(i, candidate))
}
