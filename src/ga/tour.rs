//! Tour: a candidate solution.
//!
//! A tour is a permutation of registry indices. Total distance is computed
//! lazily and cached until the next write to the tour.

use rand::seq::SliceRandom;
use rand::Rng;
use std::cell::OnceCell;
use std::sync::Arc;

use crate::error::{Result, TspError};
use crate::models::{City, CityRegistry};

/// A closed tour visiting every city of its registry exactly once.
///
/// Equality compares the ordered city sequence. Two tours describing the
/// same cycle from different starting cities are not equal; use
/// [`is_rotation_of`](Tour::is_rotation_of) for that.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp_ga::ga::Tour;
/// use u_tsp_ga::models::{City, CityRegistry};
///
/// let registry = Arc::new(CityRegistry::new(vec![
///     City::new(0.0, 0.0),
///     City::new(0.0, 10.0),
///     City::new(10.0, 10.0),
///     City::new(10.0, 0.0),
/// ]).unwrap());
///
/// let tour = Tour::from_order(registry, vec![0, 1, 2, 3]).unwrap();
/// assert!((tour.distance() - 40.0).abs() < 1e-10);
/// assert!((tour.fitness().unwrap() - 1.0 / 40.0).abs() < 1e-15);
/// ```
#[derive(Clone)]
pub struct Tour {
    registry: Arc<CityRegistry>,
    order: Vec<usize>,
    distance: OnceCell<f64>,
}

impl Tour {
    /// Creates a uniformly random permutation of every registry city.
    pub fn random<R: Rng>(registry: &Arc<CityRegistry>, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..registry.len()).collect();
        order.shuffle(rng);
        Self {
            registry: Arc::clone(registry),
            order,
            distance: OnceCell::new(),
        }
    }

    /// Creates a tour from an explicit visiting order.
    ///
    /// Returns `IndexOutOfRange` for an index outside the registry and
    /// `InvalidConfiguration` if `order` is not a permutation of it.
    pub fn from_order(registry: Arc<CityRegistry>, order: Vec<usize>) -> Result<Self> {
        let n = registry.len();
        if order.len() != n {
            return Err(TspError::invalid(format!(
                "tour has {} cities, registry has {n}",
                order.len()
            )));
        }
        let mut seen = vec![false; n];
        for &city in &order {
            if city >= n {
                return Err(TspError::out_of_range("city", city, n));
            }
            if std::mem::replace(&mut seen[city], true) {
                return Err(TspError::invalid(format!("city {city} appears twice")));
            }
        }
        Ok(Self {
            registry,
            order,
            distance: OnceCell::new(),
        })
    }

    /// Number of positions in the tour.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if the tour has no positions.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// The registry this tour draws cities from.
    pub fn registry(&self) -> &Arc<CityRegistry> {
        &self.registry
    }

    /// Registry indices in visiting order.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Registry index of the city at `position`, or `None` if out of range.
    pub fn city_index(&self, position: usize) -> Option<usize> {
        self.order.get(position).copied()
    }

    /// The city at `position`.
    ///
    /// # Panics
    ///
    /// Panics if `position` is out of range.
    pub fn city(&self, position: usize) -> &City {
        self.registry.city(self.order[position])
    }

    /// Cities in visiting order, without the closing return to the start.
    pub fn ordered_cities(&self) -> impl Iterator<Item = &City> + '_ {
        self.order.iter().map(|&i| self.registry.city(i))
    }

    /// Overwrites the city at `position` with registry city `city`.
    ///
    /// A single write generally breaks the permutation invariant; callers
    /// restore it with a matching second write. Prefer
    /// [`swap_cities`](Tour::swap_cities).
    pub fn set_city(&mut self, position: usize, city: usize) -> Result<()> {
        if position >= self.order.len() {
            return Err(TspError::out_of_range("tour position", position, self.order.len()));
        }
        if city >= self.registry.len() {
            return Err(TspError::out_of_range("city", city, self.registry.len()));
        }
        self.order[position] = city;
        self.invalidate();
        Ok(())
    }

    /// Exchanges the cities at two positions.
    pub fn swap_cities(&mut self, a: usize, b: usize) -> Result<()> {
        let n = self.order.len();
        if a >= n {
            return Err(TspError::out_of_range("tour position", a, n));
        }
        if b >= n {
            return Err(TspError::out_of_range("tour position", b, n));
        }
        self.order.swap(a, b);
        self.invalidate();
        Ok(())
    }

    /// Replaces the whole order with a previously saved copy of it.
    pub(crate) fn restore(&mut self, order: &[usize]) {
        self.order.copy_from_slice(order);
        self.invalidate();
    }

    /// Returns `true` if registry city `city` is visited by this tour.
    pub fn contains_city(&self, city: usize) -> bool {
        self.order.contains(&city)
    }

    /// Returns `true` if every registry city appears exactly once.
    pub fn is_permutation(&self) -> bool {
        let n = self.registry.len();
        if self.order.len() != n {
            return false;
        }
        let mut seen = vec![false; n];
        self.order
            .iter()
            .all(|&c| c < n && !std::mem::replace(&mut seen[c], true))
    }

    /// Total length of the closed tour, including the edge from the last
    /// city back to the first.
    pub fn distance(&self) -> f64 {
        *self.distance.get_or_init(|| {
            let n = self.order.len();
            (0..n)
                .map(|i| self.registry.distance(self.order[i], self.order[(i + 1) % n]))
                .sum()
        })
    }

    /// `1 / distance`. Higher is better.
    ///
    /// Returns `DegenerateTour` when the distance is zero (a single city, or
    /// all cities at one point).
    pub fn fitness(&self) -> Result<f64> {
        let distance = self.distance();
        if distance > 0.0 {
            Ok(1.0 / distance)
        } else {
            Err(TspError::DegenerateTour {
                cities: self.order.len(),
                distance,
            })
        }
    }

    /// Returns `true` if `other` visits the same cycle in the same direction,
    /// possibly starting from a different city.
    ///
    /// Both tours are permutations, so aligning them on one shared city fixes
    /// the only candidate rotation.
    pub fn is_rotation_of(&self, other: &Tour) -> bool {
        let n = self.order.len();
        if n != other.order.len() {
            return false;
        }
        let Some(&anchor) = self.order.first() else {
            return true;
        };
        let Some(offset) = other.order.iter().position(|&c| c == anchor) else {
            return false;
        };
        (0..n).all(|k| self.order[k] == other.order[(offset + k) % n])
    }

    fn invalidate(&mut self) {
        self.distance = OnceCell::new();
    }
}

impl PartialEq for Tour {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for Tour {}

impl std::fmt::Debug for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tour")
            .field("order", &self.order)
            .field("distance", &self.distance.get())
            .finish()
    }
}

impl std::fmt::Display for Tour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "|")?;
        for city in self.ordered_cities() {
            write!(f, "{city}|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn square() -> Arc<CityRegistry> {
        Arc::new(
            CityRegistry::new(vec![
                City::new(0.0, 0.0),
                City::new(0.0, 10.0),
                City::new(10.0, 10.0),
                City::new(10.0, 0.0),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn test_square_distance() {
        let tour = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        assert!((tour.distance() - 40.0).abs() < 1e-10);

        // Crossing the diagonals is longer.
        let crossed = Tour::from_order(square(), vec![0, 2, 1, 3]).unwrap();
        assert!((crossed.distance() - (20.0 + 2.0 * 200f64.sqrt())).abs() < 1e-10);
    }

    #[test]
    fn test_random_is_permutation() {
        let registry = Arc::new(CityRegistry::classic_twenty());
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let tour = Tour::random(&registry, &mut rng);
            assert!(tour.is_permutation());
            assert_eq!(tour.len(), 20);
        }
    }

    #[test]
    fn test_from_order_rejects_invalid() {
        assert!(matches!(
            Tour::from_order(square(), vec![0, 1, 2]),
            Err(TspError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Tour::from_order(square(), vec![0, 1, 1, 3]),
            Err(TspError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Tour::from_order(square(), vec![0, 1, 2, 9]),
            Err(TspError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn test_set_city_invalidates_cache() {
        let mut tour = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        assert!((tour.distance() - 40.0).abs() < 1e-10);

        tour.set_city(1, 2).unwrap();
        tour.set_city(2, 1).unwrap();
        assert!(tour.is_permutation());
        assert!((tour.distance() - 40.0).abs() > 1.0);

        tour.swap_cities(1, 2).unwrap();
        assert!((tour.distance() - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_set_city_out_of_range() {
        let mut tour = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        assert!(matches!(
            tour.set_city(4, 0),
            Err(TspError::IndexOutOfRange { index: 4, .. })
        ));
        assert!(matches!(
            tour.set_city(0, 4),
            Err(TspError::IndexOutOfRange { index: 4, .. })
        ));
        assert!(tour.swap_cities(0, 7).is_err());
    }

    #[test]
    fn test_contains_city() {
        let mut tour = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        assert!(tour.contains_city(2));
        tour.set_city(2, 0).unwrap();
        assert!(!tour.contains_city(2));
        assert!(!tour.is_permutation());
    }

    #[test]
    fn test_single_city_is_degenerate() {
        let registry = Arc::new(CityRegistry::new(vec![City::new(5.0, 5.0)]).unwrap());
        let tour = Tour::from_order(registry, vec![0]).unwrap();
        assert_eq!(tour.distance(), 0.0);
        assert!(matches!(
            tour.fitness(),
            Err(TspError::DegenerateTour { cities: 1, .. })
        ));
    }

    #[test]
    fn test_rotation_equality() {
        let a = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        let b = Tour::from_order(square(), vec![2, 3, 0, 1]).unwrap();
        let reversed = Tour::from_order(square(), vec![3, 2, 1, 0]).unwrap();

        assert_ne!(a, b);
        assert!(a.is_rotation_of(&b));
        assert!(b.is_rotation_of(&a));
        assert!(a.is_rotation_of(&a));
        assert!(!a.is_rotation_of(&reversed));
    }

    #[test]
    fn test_display_gene_string() {
        let tour = Tour::from_order(square(), vec![0, 1, 2, 3]).unwrap();
        assert_eq!(tour.to_string(), "|0, 0|0, 10|10, 10|10, 0|");
    }

    #[test]
    fn test_city_index() {
        let tour = Tour::from_order(square(), vec![3, 0, 1, 2]).unwrap();
        assert_eq!(tour.city_index(0), Some(3));
        assert_eq!(tour.city_index(3), Some(2));
        assert_eq!(tour.city_index(4), None);
    }

    #[test]
    fn test_ordered_cities() {
        let tour = Tour::from_order(square(), vec![3, 0, 1, 2]).unwrap();
        let cities: Vec<City> = tour.ordered_cities().copied().collect();
        assert_eq!(cities[0], City::new(10.0, 0.0));
        assert_eq!(cities.len(), 4);
    }

    proptest! {
        #[test]
        fn prop_distance_matches_edge_sum(
            coords in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 2..30),
            seed in any::<u64>(),
        ) {
            let cities: Vec<City> = coords.iter().map(|&(x, y)| City::new(x, y)).collect();
            let registry = Arc::new(CityRegistry::new(cities).unwrap());
            let mut rng = StdRng::seed_from_u64(seed);
            let tour = Tour::random(&registry, &mut rng);

            let visited: Vec<City> = tour.ordered_cities().copied().collect();
            let mut expected = 0.0;
            for i in 0..visited.len() {
                expected += visited[i].distance_to(&visited[(i + 1) % visited.len()]);
            }
            prop_assert!(tour.distance() >= 0.0);
            prop_assert!((tour.distance() - expected).abs() < 1e-6);
        }
    }
}
