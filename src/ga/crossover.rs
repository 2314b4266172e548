//! Order-preserving two-parent crossover.
//!
//! A segment of parent1 is copied in place; every other slot is filled
//! left-to-right with the remaining cities in parent2's order.
//!
//! The segment rule depends on how the two cut points compare:
//!
//! | cuts            | copied from parent1                        |
//! |-----------------|--------------------------------------------|
//! | `start < end`   | `start < i < end` (both cuts excluded)     |
//! | `start > end`   | every `i` outside `(end, start)` (cuts included) |
//! | `start == end`  | nothing; the child equals parent2          |
//!
//! # References
//!
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

use rand::Rng;
use std::sync::Arc;

use super::tour::Tour;
use crate::error::{Result, TspError};

/// Produces one child from two parents using randomly drawn cut points.
///
/// Both cuts are drawn independently and uniformly from `[0, n)`.
///
/// # Errors
///
/// `InvalidConfiguration` if the parents differ in length or registry.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn order_crossover<R: Rng>(parent1: &Tour, parent2: &Tour, rng: &mut R) -> Result<Tour> {
    let n = parent1.len();
    if n == 0 || n != parent2.len() {
        return Err(TspError::invalid(format!(
            "parents must have equal, non-zero length (got {n} and {})",
            parent2.len()
        )));
    }
    let start = rng.random_range(0..n);
    let end = rng.random_range(0..n);
    crossover_with_cuts(parent1, parent2, start, end)
}

/// Produces one child from two parents with explicit cut points.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp_ga::ga::{crossover_with_cuts, Tour};
/// use u_tsp_ga::models::{City, CityRegistry};
///
/// let registry = Arc::new(CityRegistry::new(
///     (0..5).map(|i| City::new(i as f64, (i * i) as f64)).collect(),
/// ).unwrap());
/// let p1 = Tour::from_order(registry.clone(), vec![0, 1, 2, 3, 4]).unwrap();
/// let p2 = Tour::from_order(registry, vec![4, 3, 2, 1, 0]).unwrap();
///
/// // Only position 2 lies strictly between the cuts.
/// let child = crossover_with_cuts(&p1, &p2, 1, 3).unwrap();
/// assert_eq!(child.order(), &[4, 3, 2, 1, 0]);
/// ```
pub fn crossover_with_cuts(parent1: &Tour, parent2: &Tour, start: usize, end: usize) -> Result<Tour> {
    let n = parent1.len();
    if n != parent2.len() {
        return Err(TspError::invalid(format!(
            "parents must have equal length (got {n} and {})",
            parent2.len()
        )));
    }
    if !Arc::ptr_eq(parent1.registry(), parent2.registry())
        && parent1.registry() != parent2.registry()
    {
        return Err(TspError::invalid("parents belong to different city registries"));
    }
    if start >= n {
        return Err(TspError::out_of_range("crossover cut", start, n));
    }
    if end >= n {
        return Err(TspError::out_of_range("crossover cut", end, n));
    }

    let mut child: Vec<Option<usize>> = vec![None; n];
    let mut placed = vec![false; parent1.registry().len()];

    for (i, &city) in parent1.order().iter().enumerate() {
        if inherits_from_first(i, start, end) {
            child[i] = Some(city);
            placed[city] = true;
        }
    }

    let mut free_slots = child.iter_mut().filter(|slot| slot.is_none());
    for &city in parent2.order() {
        if placed[city] {
            continue;
        }
        let Some(slot) = free_slots.next() else {
            break;
        };
        *slot = Some(city);
        placed[city] = true;
    }

    let order = child
        .into_iter()
        .collect::<Option<Vec<usize>>>()
        .ok_or_else(|| TspError::invalid("parents are not permutations of the same cities"))?;
    Tour::from_order(Arc::clone(parent1.registry()), order)
}

/// Whether position `i` is copied from parent1.
fn inherits_from_first(i: usize, start: usize, end: usize) -> bool {
    if start < end {
        start < i && i < end
    } else if start > end {
        !(end < i && i < start)
    } else {
        false
    }
}
