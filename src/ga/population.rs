//! Fixed-size collection of tours.

use rand::Rng;
use std::sync::Arc;

use super::tour::Tour;
use crate::error::{Result, TspError};
use crate::models::CityRegistry;

/// A generation of candidate tours.
///
/// The size is fixed at construction. The engine replaces whole populations
/// between generations and never resizes one.
#[derive(Debug, Clone, PartialEq)]
pub struct Population {
    tours: Vec<Tour>,
}

impl Population {
    /// Wraps a non-empty list of tours.
    pub fn from_tours(tours: Vec<Tour>) -> Result<Self> {
        if tours.is_empty() {
            return Err(TspError::invalid("population_size must be at least 1"));
        }
        Ok(Self { tours })
    }

    /// Builds `size` random-permutation tours over `registry`.
    pub fn random<R: Rng>(registry: &Arc<CityRegistry>, size: usize, rng: &mut R) -> Result<Self> {
        Self::from_tours((0..size).map(|_| Tour::random(registry, rng)).collect())
    }

    /// Number of tours.
    pub fn len(&self) -> usize {
        self.tours.len()
    }

    /// Always `false`; an empty population cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    /// The tour in slot `index`, or `None` if out of range.
    pub fn tour(&self, index: usize) -> Option<&Tour> {
        self.tours.get(index)
    }

    /// All tours in slot order.
    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    /// Iterates over the tours in slot order.
    pub fn iter(&self) -> std::slice::Iter<'_, Tour> {
        self.tours.iter()
    }

    /// Replaces the tour in slot `index`.
    pub fn save_tour(&mut self, index: usize, tour: Tour) -> Result<()> {
        let len = self.tours.len();
        let slot = self
            .tours
            .get_mut(index)
            .ok_or(TspError::out_of_range("population slot", index, len))?;
        *slot = tour;
        Ok(())
    }

    /// The tour with the highest fitness.
    ///
    /// Ties go to the tour scanned last.
    ///
    /// # Errors
    ///
    /// `DegenerateTour` if any tour has zero distance.
    pub fn fittest(&self) -> Result<&Tour> {
        fittest_of(&self.tours)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Tour;
    type IntoIter = std::slice::Iter<'a, Tour>;

    fn into_iter(self) -> Self::IntoIter {
        self.tours.iter()
    }
}

/// Linear scan for the fittest tour; a later tour replaces the current best
/// when its fitness is greater than or equal.
pub(crate) fn fittest_of<'a, I>(tours: I) -> Result<&'a Tour>
where
    I: IntoIterator<Item = &'a Tour>,
{
    let mut iter = tours.into_iter();
    let mut best = iter
        .next()
        .ok_or_else(|| TspError::invalid("cannot pick the fittest of no tours"))?;
    let mut best_fitness = best.fitness()?;

    for tour in iter {
        let fitness = tour.fitness()?;
        if best_fitness <= fitness {
            best = tour;
            best_fitness = fitness;
        }
    }
    Ok(best)
}
