//! Genetic algorithm for the Euclidean TSP.
//!
//! Candidate solutions are [`Tour`]s over a shared
//! [`CityRegistry`](crate::models::CityRegistry). Each generation is built by
//! [`EvolutionEngine::evolve`]:
//!
//! 1. **Elitism**: the fittest tour is carried over unchanged (optional)
//! 2. **Selection**: [`tournament`] over a contiguous window of the population
//! 3. **Crossover**: [`order_crossover`] copies a parent1 segment in place and
//!    fills the rest in parent2's order
//! 4. **Mutation**: [`SwapMutation`] swaps positions, rejecting duplicate
//!    routes and repairing local crossings
//!
//! # Key Types
//!
//! - [`EvolutionConfig`]: Algorithm parameters (population size, rates, retry budget)
//! - [`EvolutionEngine`]: One generation step, owns the seeded random source
//! - [`Solver`]: Runs the generation loop and reports a [`SolveResult`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"

mod config;
mod crossover;
mod engine;
mod mutation;
mod population;
mod runner;
mod selection;
mod tour;

pub use config::EvolutionConfig;
pub use crossover::{crossover_with_cuts, order_crossover};
pub use engine::EvolutionEngine;
pub use mutation::{
    is_exact_duplicate, is_rotational_duplicate, resolve_local_crossing, MutationFallback,
    MutationReport, SwapMutation,
};
pub use population::Population;
pub use runner::{SolveResult, Solver};
pub use selection::{tournament, TournamentWindow};
pub use tour::Tour;
