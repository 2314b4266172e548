//! Fixed, ordered set of cities.

use rand::Rng;

use super::City;
use crate::error::{Result, TspError};

/// The cities available to build tours from.
///
/// The registry is fixed once created. Every [`Tour`](crate::ga::Tour)
/// holds a shared handle to its registry and stores indices into it.
///
/// # Examples
///
/// ```
/// use u_tsp_ga::models::{City, CityRegistry};
///
/// let registry = CityRegistry::new(vec![
///     City::new(0.0, 0.0),
///     City::new(0.0, 10.0),
///     City::new(10.0, 10.0),
/// ]).unwrap();
/// assert_eq!(registry.len(), 3);
/// assert!((registry.distance(0, 2) - 200f64.sqrt()).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CityRegistry {
    cities: Vec<City>,
}

impl CityRegistry {
    /// Creates a registry from an ordered list of cities.
    ///
    /// Returns `InvalidConfiguration` if the list is empty.
    pub fn new(cities: Vec<City>) -> Result<Self> {
        if cities.is_empty() {
            return Err(TspError::invalid("city set must not be empty"));
        }
        Ok(Self { cities })
    }

    /// Creates a registry of `count` cities at random integer coordinates.
    pub fn random<R: Rng>(count: usize, rng: &mut R) -> Result<Self> {
        Self::new((0..count).map(|_| City::random(rng)).collect())
    }

    /// The 20-city benchmark instance on a 200×200 grid.
    pub fn classic_twenty() -> Self {
        const COORDS: [(f64, f64); 20] = [
            (60.0, 200.0),
            (180.0, 200.0),
            (80.0, 180.0),
            (140.0, 180.0),
            (20.0, 160.0),
            (100.0, 160.0),
            (200.0, 160.0),
            (140.0, 140.0),
            (40.0, 120.0),
            (100.0, 120.0),
            (180.0, 100.0),
            (60.0, 80.0),
            (120.0, 80.0),
            (180.0, 60.0),
            (20.0, 40.0),
            (100.0, 40.0),
            (200.0, 40.0),
            (20.0, 20.0),
            (60.0, 20.0),
            (160.0, 20.0),
        ];
        Self {
            cities: COORDS.iter().map(|&(x, y)| City::new(x, y)).collect(),
        }
    }

    /// Number of cities.
    pub fn len(&self) -> usize {
        self.cities.len()
    }

    /// Always `false`; an empty registry cannot be constructed.
    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }

    /// Returns the city at `index`, or `None` if out of range.
    pub fn get(&self, index: usize) -> Option<&City> {
        self.cities.get(index)
    }

    /// Returns the city at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn city(&self, index: usize) -> &City {
        &self.cities[index]
    }

    /// All cities in registry order.
    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    /// Euclidean distance between the cities at two indices.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.cities[from].distance_to(&self.cities[to])
    }
}
