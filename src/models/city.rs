//! City type.

use rand::Rng;

/// Side length of the square that [`City::random`] draws coordinates from.
pub(crate) const RANDOM_COORD_LIMIT: u32 = 200;

/// An immutable point in the plane.
///
/// # Examples
///
/// ```
/// use u_tsp_ga::models::City;
///
/// let a = City::new(0.0, 0.0);
/// let b = City::new(3.0, 4.0);
/// assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct City {
    x: f64,
    y: f64,
}

impl City {
    /// Creates a city at the given coordinates.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a city with integer coordinates drawn uniformly from `[0, 200)`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let x = rng.random_range(0..RANDOM_COORD_LIMIT);
        let y = rng.random_range(0..RANDOM_COORD_LIMIT);
        Self::new(x as f64, y as f64)
    }

    /// X coordinate.
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Y coordinate.
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Euclidean distance to another city.
    pub fn distance_to(&self, other: &City) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl std::fmt::Display for City {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.x, self.y)
    }
}
