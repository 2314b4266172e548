//! Generation loop.
//!
//! [`Solver`] drives an [`EvolutionEngine`] for a whole run:
//! initialization → evolve → track best → repeat.

use std::sync::Arc;
use tracing::instrument;

use super::config::EvolutionConfig;
use super::engine::EvolutionEngine;
use super::population::Population;
use super::tour::Tour;
use crate::error::Result;
use crate::models::CityRegistry;

/// Result of a solver run.
#[derive(Debug, Clone)]
pub struct SolveResult {
    /// The shortest tour seen during the run.
    pub best: Tour,

    /// Distance of `best`.
    pub best_distance: f64,

    /// Distance of the fittest tour of the initial population.
    pub initial_distance: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped because of the stagnation limit.
    pub stagnated: bool,

    /// Fittest distance of each population, starting with the initial one.
    pub distance_history: Vec<f64>,

    /// The last population produced.
    pub final_population: Population,
}

/// Runs the evolutionary loop.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_tsp_ga::ga::{EvolutionConfig, Solver};
/// use u_tsp_ga::models::CityRegistry;
///
/// let registry = Arc::new(CityRegistry::classic_twenty());
/// let config = EvolutionConfig::default()
///     .with_max_generations(20)
///     .with_seed(42);
///
/// let result = Solver::run(registry, &config).unwrap();
/// assert!(result.best_distance <= result.initial_distance);
/// assert_eq!(result.distance_history.len(), 21);
/// ```
pub struct Solver;

impl Solver {
    /// Runs the solver for `config.max_generations` generations, or until
    /// stagnation.
    pub fn run(registry: Arc<CityRegistry>, config: &EvolutionConfig) -> Result<SolveResult> {
        Self::run_with_observer(registry, config, |_, _| {})
    }

    /// Runs the solver, calling `observer` with the generation number and
    /// population after each generation.
    ///
    /// Generation 0 is the initial population.
    #[instrument(level = "info", skip(registry, config, observer), fields(cities = registry.len(), population_size = config.population_size))]
    pub fn run_with_observer<F>(
        registry: Arc<CityRegistry>,
        config: &EvolutionConfig,
        mut observer: F,
    ) -> Result<SolveResult>
    where
        F: FnMut(usize, &Population),
    {
        let mut engine = EvolutionEngine::new(registry, config.clone())?;

        // 1. Initialize population
        let mut population = engine.initialize_population()?;
        observer(0, &population);

        // 2. Track best
        let mut best = population.fittest()?.clone();
        let initial_distance = best.distance();
        let mut distance_history = Vec::with_capacity(config.max_generations + 1);
        distance_history.push(initial_distance);
        tracing::info!(distance = initial_distance, "initial population");

        let mut stagnation_counter = 0usize;

        // 3. Evolutionary loop
        for gen in 0..config.max_generations {
            population = engine.evolve(&population)?;
            observer(gen + 1, &population);

            let gen_best = population.fittest()?;
            let gen_distance = gen_best.distance();
            distance_history.push(gen_distance);

            if gen_distance < best.distance() {
                best = gen_best.clone();
                stagnation_counter = 0;
            } else {
                stagnation_counter += 1;
            }
            tracing::info!(
                generation = gen + 1,
                distance = gen_distance,
                best = best.distance(),
                "generation complete"
            );

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                return Ok(SolveResult {
                    best_distance: best.distance(),
                    best,
                    initial_distance,
                    generations: gen + 1,
                    stagnated: true,
                    distance_history,
                    final_population: population,
                });
            }
        }

        Ok(SolveResult {
            best_distance: best.distance(),
            best,
            initial_distance,
            generations: config.max_generations,
            stagnated: false,
            distance_history,
            final_population: population,
        })
    }
}
