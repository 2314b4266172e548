//! Tournament selection over a contiguous window of the population.
//!
//! A tournament draws one random start index and takes the `k` tours that
//! follow it, rather than `k` independent positions. The window therefore
//! needs a policy for running past the end of the population; see
//! [`TournamentWindow`].
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"

use rand::Rng;

use super::population::{fittest_of, Population};
use super::tour::Tour;
use crate::error::{Result, TspError};

/// What a tournament window does when `start + k` exceeds the population.
///
/// # Examples
///
/// ```
/// use u_tsp_ga::ga::TournamentWindow;
///
/// assert_eq!(TournamentWindow::default(), TournamentWindow::Wrap);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TournamentWindow {
    /// Start anywhere in `[0, S)` and continue cyclically past the last slot.
    #[default]
    Wrap,

    /// Start only where the whole window fits, i.e. in `[0, S - k]`.
    ///
    /// Same distribution as rejecting and redrawing overflowing starts,
    /// without the loop.
    Redraw,
}

/// Picks the fittest tour of a contiguous window of `k` tours.
///
/// Ties inside the window go to the later tour, as in
/// [`Population::fittest`].
///
/// # Errors
///
/// - `InvalidConfiguration` if `k` is 0 or larger than the population.
/// - `DegenerateTour` if a tour in the window has zero distance.
///
/// # Complexity
/// O(k) per selection
pub fn tournament<'a, R: Rng>(
    population: &'a Population,
    k: usize,
    window: TournamentWindow,
    rng: &mut R,
) -> Result<&'a Tour> {
    let n = population.len();
    if k == 0 {
        return Err(TspError::invalid("tournament_size must be at least 1"));
    }
    if k > n {
        return Err(TspError::invalid(format!(
            "tournament_size {k} exceeds population_size {n}"
        )));
    }

    let start = match window {
        TournamentWindow::Wrap => rng.random_range(0..n),
        TournamentWindow::Redraw => rng.random_range(0..=n - k),
    };

    let tours = population.tours();
    fittest_of((0..k).map(|offset| &tours[(start + offset) % n]))
}
