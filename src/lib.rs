//! Genetic algorithm heuristic for the Euclidean Traveling Salesman Problem.
//!
//! Given a fixed set of points in the plane, evolves a population of closed
//! tours toward a short one. Not an exact solver: the result carries no
//! optimality guarantee.
//!
//! - [`models`]: Cities and the fixed registry tours are built from
//! - [`ga`]: Tours, populations, selection, crossover, validated mutation,
//!   the generation step and the solver loop
//! - [`geometry`]: The slope-based crossing test used by mutation
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_tsp_ga::ga::{EvolutionConfig, EvolutionEngine};
//! use u_tsp_ga::models::{City, CityRegistry};
//!
//! let registry = Arc::new(CityRegistry::new(vec![
//!     City::new(0.0, 0.0),
//!     City::new(0.0, 10.0),
//!     City::new(10.0, 10.0),
//!     City::new(10.0, 0.0),
//! ])?);
//! let config = EvolutionConfig::default()
//!     .with_population_size(10)
//!     .with_tournament_size(3)
//!     .with_seed(42);
//!
//! let mut engine = EvolutionEngine::new(registry, config)?;
//! let mut population = engine.initialize_population()?;
//! for _ in 0..20 {
//!     population = engine.evolve(&population)?;
//! }
//! let best = population.fittest()?;
//! assert!(best.distance() >= 40.0 - 1e-9);
//! # Ok::<(), u_tsp_ga::TspError>(())
//! ```
//!
//! Runs are single-threaded and fully determined by the configured seed.

pub mod error;
pub mod ga;
pub mod geometry;
pub mod models;

pub use error::{Result, TspError};
