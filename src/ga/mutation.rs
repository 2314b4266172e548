//! Validated swap mutation.
//!
//! Each position is mutated independently with probability `rate`. A
//! mutation swaps the position with a random partner and then checks the
//! result against the reference population (the generation being
//! replaced) and against a local crossing heuristic. A swap that produces a
//! duplicate route, or that triggers a crossing repair, is followed by
//! another swap of the same position. Swaps accumulate across retries.
//!
//! Retries are bounded by `max_attempts`; [`MutationFallback`] decides what
//! happens to the position once the budget is spent.

use rand::Rng;

use super::population::Population;
use super::tour::Tour;
use crate::error::{Result, TspError};
use crate::geometry::straddles_edge_line;

/// What to do with a position whose retry budget ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationFallback {
    /// Restore the tour to its order before this position was mutated.
    #[default]
    Revert,

    /// Keep the result of the last attempt.
    Accept,

    /// Abort with [`TspError::UnresolvedMutation`].
    Fail,
}

/// Counters gathered by one or more mutation passes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MutationReport {
    /// Positions that were selected for mutation.
    pub mutated_positions: usize,
    /// Swaps performed, including retries.
    pub attempts: usize,
    /// Crossing repairs applied.
    pub crossings_resolved: usize,
    /// Positions that ended in the fallback.
    pub fallbacks: usize,
}

impl MutationReport {
    /// Adds another report's counters to this one.
    pub fn absorb(&mut self, other: MutationReport) {
        self.mutated_positions += other.mutated_positions;
        self.attempts += other.attempts;
        self.crossings_resolved += other.crossings_resolved;
        self.fallbacks += other.fallbacks;
    }
}

/// Swap mutation with duplicate and crossing validation.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use rand::{rngs::StdRng, SeedableRng};
/// use u_tsp_ga::ga::{MutationFallback, Population, SwapMutation, Tour};
/// use u_tsp_ga::models::CityRegistry;
///
/// let registry = Arc::new(CityRegistry::classic_twenty());
/// let mut rng = StdRng::seed_from_u64(42);
/// let reference = Population::random(&registry, 10, &mut rng).unwrap();
///
/// let mutation = SwapMutation::new(0.1, 100, MutationFallback::Revert);
/// let mut tour = Tour::random(&registry, &mut rng);
/// mutation.apply(&mut tour, &reference, &mut rng).unwrap();
/// assert!(tour.is_permutation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapMutation {
    rate: f64,
    max_attempts: usize,
    fallback: MutationFallback,
}

impl SwapMutation {
    /// Creates a mutation operator.
    ///
    /// `rate` is clamped to `[0, 1]`; `max_attempts` is at least 1.
    pub fn new(rate: f64, max_attempts: usize, fallback: MutationFallback) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            max_attempts: max_attempts.max(1),
            fallback,
        }
    }

    /// Per-position mutation probability.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Mutates `tour` in place, validating against `reference`.
    ///
    /// The tour is a permutation again when this returns, whatever the
    /// outcome of validation.
    ///
    /// # Errors
    ///
    /// `UnresolvedMutation` when the budget runs out under
    /// [`MutationFallback::Fail`].
    pub fn apply<R: Rng>(
        &self,
        tour: &mut Tour,
        reference: &Population,
        rng: &mut R,
    ) -> Result<MutationReport> {
        let n = tour.len();
        let mut report = MutationReport::default();

        for position in 0..n {
            if rng.random::<f64>() >= self.rate {
                continue;
            }
            report.mutated_positions += 1;
            let snapshot = tour.order().to_vec();
            let mut attempts = 0;

            loop {
                if attempts == self.max_attempts {
                    report.fallbacks += 1;
                    tracing::debug!(
                        position,
                        attempts,
                        fallback = ?self.fallback,
                        "mutation retry budget exhausted"
                    );
                    match self.fallback {
                        MutationFallback::Revert => tour.restore(&snapshot),
                        MutationFallback::Accept => {}
                        MutationFallback::Fail => {
                            return Err(TspError::UnresolvedMutation { position, attempts });
                        }
                    }
                    break;
                }
                attempts += 1;

                let partner = rng.random_range(0..n);
                tour.swap_cities(position, partner)?;

                if is_exact_duplicate(tour, reference) || is_rotational_duplicate(tour, reference) {
                    continue;
                }
                if resolve_local_crossing(tour, position)? {
                    report.crossings_resolved += 1;
                    continue;
                }
                break;
            }
            report.attempts += attempts;
        }

        Ok(report)
    }
}

/// Returns `true` if some tour in `population` has the same ordered sequence.
pub fn is_exact_duplicate(tour: &Tour, population: &Population) -> bool {
    population.iter().any(|other| other == tour)
}

/// Returns `true` if some tour in `population` is the same cycle as `tour`
/// started from a different city.
pub fn is_rotational_duplicate(tour: &Tour, population: &Population) -> bool {
    population.iter().any(|other| tour.is_rotation_of(other))
}

/// Looks for a crossing around the path `position → position+1 → position+2`
/// and repairs the first one found.
///
/// For every `i` outside `position..=position + 2`, the city at
/// `position + 2` and the city at `i` are tested against the line through
/// the edge `(position, position + 1)` with [`straddles_edge_line`]. On the
/// first hit the cities at `position + 1` and `i` are swapped and `true` is
/// returned. Positions without two successors are never checked.
pub fn resolve_local_crossing(tour: &mut Tour, position: usize) -> Result<bool> {
    let n = tour.len();
    if position + 2 >= n {
        return Ok(false);
    }

    let from = *tour.city(position);
    let to = *tour.city(position + 1);
    let next = *tour.city(position + 2);

    let conflict = (0..n)
        .filter(|&i| i < position || i > position + 2)
        .find(|&i| straddles_edge_line(&from, &to, &next, tour.city(i)));

    match conflict {
        Some(i) => {
            tour.swap_cities(position + 1, i)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
