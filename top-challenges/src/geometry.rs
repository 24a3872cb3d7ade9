use crate::Point;

/// Coordinate span mapped onto the locality grid. Anything outside is clamped to the edge cells.
pub const LOCALITY_DOMAIN: (f64, f64) = (-100_000.0, 100_000.0);
/// Bits per axis; keys interleave both axes so they use `2 * LOCALITY_AXIS_BITS` bits.
pub const LOCALITY_AXIS_BITS: u32 = 30;

pub fn euclidean_distance(p1: &Point, p2: &Point) -> f64 {
    let dx = p2.x() - p1.x();
    let dy = p2.y() - p1.y();
    (dx * dx + dy * dy).sqrt()
}

/// Linearly maps `val` from `[min_val, max_val]` onto `[new_min_val, new_max_val]`.
pub fn normalise_between_range(
    val: f64,
    min_val: f64,
    max_val: f64,
    new_min_val: f64,
    new_max_val: f64,
) -> f64 {
    new_min_val + (val - min_val) * (new_max_val - new_min_val) / (max_val - min_val)
}

/// Z-order (Morton) key of a planar coordinate. Points that are close in the plane tend to be
/// close in key order, and the key is monotone in each axis.
pub fn locality_key(x: f64, y: f64) -> u64 {
    let cx = axis_cell(x);
    let cy = axis_cell(y);
    let mut key = 0u64;
    for bit in (0..LOCALITY_AXIS_BITS).rev() {
        key = (key << 2) | (((cx >> bit) & 1) << 1) | ((cy >> bit) & 1);
    }
    key
}

fn axis_cell(v: f64) -> u64 {
    let max_cell = ((1u64 << LOCALITY_AXIS_BITS) - 1) as f64;
    let cell = normalise_between_range(v, LOCALITY_DOMAIN.0, LOCALITY_DOMAIN.1, 0.0, max_cell);
    // NaN saturates to 0 on the cast
    cell.clamp(0.0, max_cell) as u64
}
