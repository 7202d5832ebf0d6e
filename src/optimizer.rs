//! Nearest-neighbour visiting order.
//!
//! A fast greedy tour builder: from the start point, repeatedly hop to the
//! closest unvisited stop. O(n²) in the number of stops, which is fine for
//! the waypoint cap. No backtracking or 2-opt pass.

use crate::error::OptimizeError;
use crate::haversine::distance_km;
use crate::point::GeoPoint;
use crate::traits::Located;

/// Reorders `stops` greedily by nearest neighbour.
///
/// With `start` set, the walk begins there and every stop is a candidate.
/// Without it, the first stop is kept first and the walk begins from it.
///
/// Equidistant candidates resolve to the one appearing first in the
/// remaining input order.
///
/// Fails with [`OptimizeError::InsufficientPoints`] when fewer than two
/// points (start included) are available.
pub fn optimize<'a, T: Located>(
    start: Option<GeoPoint>,
    stops: &'a [T],
) -> Result<Vec<&'a T>, OptimizeError> {
    let available = stops.len() + usize::from(start.is_some());
    if available < 2 {
        return Err(OptimizeError::InsufficientPoints { available });
    }

    let mut unvisited: Vec<&T> = stops.iter().collect();
    let mut order = Vec::with_capacity(stops.len());

    let mut current = match start {
        Some(point) => point,
        None => {
            let first = unvisited.remove(0);
            order.push(first);
            first.position()
        }
    };

    while let Some(next) = nearest(current, &unvisited) {
        let stop = unvisited.remove(next);
        current = stop.position();
        order.push(stop);
    }

    Ok(order)
}

/// Index of the candidate closest to `from`; the first one wins ties.
fn nearest<T: Located>(from: GeoPoint, candidates: &[&T]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (index, candidate) in candidates.iter().enumerate() {
        let dist = distance_km(from, candidate.position());
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((index, dist)),
        }
    }

    best.map(|(index, _)| index)
}

/// Total great-circle length of visiting `stops` in order, in kilometers.
pub fn tour_length_km<T: Located>(start: Option<GeoPoint>, stops: &[T]) -> f64 {
    let points: Vec<GeoPoint> = start
        .into_iter()
        .chain(stops.iter().map(T::position))
        .collect();

    points
        .windows(2)
        .map(|leg| distance_km(leg[0], leg[1]))
        .sum()
}
