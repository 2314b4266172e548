//! One-generation evolution step.
//!
//! [`EvolutionEngine`] owns the run's registry, configuration and random
//! source. It turns one [`Population`] into the next:
//! elitism → tournament selection → order crossover → validated mutation.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::instrument;

use super::config::EvolutionConfig;
use super::crossover::order_crossover;
use super::mutation::MutationReport;
use super::population::Population;
use super::selection::tournament;
use crate::error::{Result, TspError};
use crate::models::CityRegistry;

/// Produces successive generations from a shared registry.
///
/// All randomness comes from one `StdRng` seeded at construction, so the
/// same seed and registry reproduce the same sequence of populations.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use u_tsp_ga::ga::{EvolutionConfig, EvolutionEngine};
/// use u_tsp_ga::models::CityRegistry;
///
/// let registry = Arc::new(CityRegistry::classic_twenty());
/// let config = EvolutionConfig::default().with_seed(42);
/// let mut engine = EvolutionEngine::new(registry, config).unwrap();
///
/// let initial = engine.initialize_population().unwrap();
/// let next = engine.evolve(&initial).unwrap();
/// assert_eq!(next.len(), initial.len());
/// assert!(next.fittest().unwrap().distance() <= initial.fittest().unwrap().distance());
/// ```
#[derive(Debug)]
pub struct EvolutionEngine {
    registry: Arc<CityRegistry>,
    config: EvolutionConfig,
    rng: StdRng,
}

impl EvolutionEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// - `InvalidConfiguration` if [`EvolutionConfig::validate`] fails.
    /// - `DegenerateTour` if the registry has fewer than 2 cities or all of
    ///   them share one point.
    pub fn new(registry: Arc<CityRegistry>, config: EvolutionConfig) -> Result<Self> {
        config.validate()?;
        if registry.len() < 2 {
            return Err(TspError::DegenerateTour {
                cities: registry.len(),
                distance: 0.0,
            });
        }
        let first = registry.city(0);
        if registry.cities().iter().all(|c| c == first) {
            return Err(TspError::DegenerateTour {
                cities: registry.len(),
                distance: 0.0,
            });
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Ok(Self {
            registry,
            config,
            rng,
        })
    }

    /// The registry shared by every tour this engine creates.
    pub fn registry(&self) -> &Arc<CityRegistry> {
        &self.registry
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Builds the initial population of `population_size` random tours.
    pub fn initialize_population(&mut self) -> Result<Population> {
        Population::random(&self.registry, self.config.population_size, &mut self.rng)
    }

    /// Runs one generation and returns the population that replaces
    /// `population`.
    ///
    /// With elitism the fittest tour of `population` is cloned into slot 0
    /// and left unmutated. Every other slot is a crossover child of two
    /// tournament winners, then mutated with `population` as the
    /// duplicate-check reference.
    ///
    /// # Errors
    ///
    /// Any error from selection, crossover or mutation aborts the step.
    #[instrument(level = "debug", skip(self, population), fields(population_size = population.len()))]
    pub fn evolve(&mut self, population: &Population) -> Result<Population> {
        let size = population.len();
        let k = self.config.tournament_size;
        if k > size {
            return Err(TspError::invalid(format!(
                "tournament_size {k} exceeds population_size {size}"
            )));
        }

        let mut tours = Vec::with_capacity(size);
        if self.config.elitism {
            tours.push(population.fittest()?.clone());
        }
        let elite_offset = tours.len();

        while tours.len() < size {
            let parent1 = tournament(population, k, self.config.tournament_window, &mut self.rng)?;
            let parent2 = tournament(population, k, self.config.tournament_window, &mut self.rng)?;
            tours.push(order_crossover(parent1, parent2, &mut self.rng)?);
        }

        let mutation = self.config.swap_mutation();
        let mut report = MutationReport::default();
        for tour in &mut tours[elite_offset..] {
            report.absorb(mutation.apply(tour, population, &mut self.rng)?);
        }
        tracing::debug!(
            mutated = report.mutated_positions,
            attempts = report.attempts,
            crossings = report.crossings_resolved,
            fallbacks = report.fallbacks,
            "generation mutated"
        );

        Population::from_tours(tours)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ga::Tour;
    use crate::models::City;

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
    fn test_rejects_degenerate_registry() {
        let registry = Arc::new(CityRegistry::new(vec![City::new(0.0, 0.0)]).unwrap());
        let err = EvolutionEngine::new(registry, EvolutionConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::DegenerateTour { cities: 1, .. }));
    }

    #[test]
    fn test_rejects_coincident_registry() {
        let registry = Arc::new(CityRegistry::new(vec![City::new(4.0, 4.0); 3]).unwrap());
        let err = EvolutionEngine::new(registry, EvolutionConfig::default()).unwrap_err();
        assert!(matches!(err, TspError::DegenerateTour { cities: 3, .. }));

        // One distinct city is enough for a positive tour length.
        let registry = Arc::new(
            CityRegistry::new(vec![City::new(4.0, 4.0), City::new(4.0, 4.0), City::new(5.0, 4.0)])
                .unwrap(),
        );
        let config = EvolutionConfig::default()
            .with_population_size(5)
            .with_tournament_size(2);
        assert!(EvolutionEngine::new(registry, config).is_ok());
    }

    #[test]
    fn test_keeps_config() {
        let config = EvolutionConfig::default()
            .with_population_size(8)
            .with_tournament_size(3)
            .with_seed(11);
        let engine = EvolutionEngine::new(square(), config.clone()).unwrap();
        assert_eq!(engine.config(), &config);
        assert_eq!(engine.registry().len(), 4);
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = EvolutionConfig::default()
            .with_population_size(3)
            .with_tournament_size(4);
        assert!(matches!(
            EvolutionEngine::new(square(), config),
            Err(TspError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_population_size_invariant() {
        let registry = Arc::new(CityRegistry::classic_twenty());
        for elitism in [true, false] {
            let config = EvolutionConfig::default()
                .with_population_size(20)
                .with_elitism(elitism)
                .with_seed(42);
            let mut engine = EvolutionEngine::new(Arc::clone(&registry), config).unwrap();
            let mut pop = engine.initialize_population().unwrap();
            for _ in 0..10 {
                pop = engine.evolve(&pop).unwrap();
                assert_eq!(pop.len(), 20);
                assert!(pop.iter().all(Tour::is_permutation));
            }
        }
    }

    #[test]
    fn test_elite_in_slot_zero() {
        let registry = Arc::new(CityRegistry::classic_twenty());
        let config = EvolutionConfig::default()
            .with_population_size(30)
            .with_mutation_rate(0.5)
            .with_seed(3);
        let mut engine = EvolutionEngine::new(registry, config).unwrap();
        let pop = engine.initialize_population().unwrap();
        let elite = pop.fittest().unwrap().clone();

        let next = engine.evolve(&pop).unwrap();
        assert_eq!(next.tour(0).unwrap(), &elite);
    }

    #[test]
    fn test_elitism_monotone_best_distance() {
        let registry = Arc::new(CityRegistry::classic_twenty());
        let config = EvolutionConfig::default().with_seed(42);
        let mut engine = EvolutionEngine::new(registry, config).unwrap();

        let mut pop = engine.initialize_population().unwrap();
        let mut best = pop.fittest().unwrap().distance();
        for _ in 0..30 {
            pop = engine.evolve(&pop).unwrap();
            let next_best = pop.fittest().unwrap().distance();
            assert!(next_best <= best, "{next_best} > {best}");
            best = next_best;
        }
    }

    #[test]
    fn test_same_seed_same_generations() {
        let registry = Arc::new(CityRegistry::classic_twenty());
        let config = EvolutionConfig::default()
            .with_population_size(25)
            .with_mutation_rate(0.1)
            .with_seed(1234);

        let mut a = EvolutionEngine::new(Arc::clone(&registry), config.clone()).unwrap();
        let mut b = EvolutionEngine::new(registry, config).unwrap();

        let mut pop_a = a.initialize_population().unwrap();
        let mut pop_b = b.initialize_population().unwrap();
        assert_eq!(pop_a, pop_b);
        for _ in 0..15 {
            pop_a = a.evolve(&pop_a).unwrap();
            pop_b = b.evolve(&pop_b).unwrap();
            assert_eq!(pop_a, pop_b);
        }
    }

    #[test]
    fn test_square_converges_to_perimeter() {
        let config = EvolutionConfig::default()
            .with_population_size(10)
            .with_tournament_size(3)
            .with_max_mutation_attempts(20)
            .with_seed(42);
        let mut engine = EvolutionEngine::new(square(), config).unwrap();

        let mut pop = engine.initialize_population().unwrap();
        for _ in 0..20 {
            pop = engine.evolve(&pop).unwrap();
        }
        assert!((pop.fittest().unwrap().distance() - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_evolve_rejects_small_population() {
        let config = EvolutionConfig::default()
            .with_population_size(5)
            .with_tournament_size(5)
            .with_seed(1);
        let mut engine = EvolutionEngine::new(square(), config).unwrap();
        let registry = Arc::clone(engine.registry());
        let tiny = Population::from_tours(vec![
            Tour::from_order(Arc::clone(&registry), vec![0, 1, 2, 3]).unwrap(),
            Tour::from_order(registry, vec![0, 2, 1, 3]).unwrap(),
        ])
        .unwrap();
        assert!(matches!(
            engine.evolve(&tiny),
            Err(TspError::InvalidConfiguration(_))
        ));
    }
}
