use std::sync::Arc;
use tracing::Level;
use u_tsp_ga::ga::{EvolutionConfig, Solver};
use u_tsp_ga::models::CityRegistry;

// Evolves the 20-city benchmark instance for 100 generations.
// Usage: u-tsp-ga [seed]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let mut config = EvolutionConfig::default();
    if let Some(seed) = std::env::args().nth(1) {
        config = config.with_seed(seed.parse()?);
    }

    let registry = Arc::new(CityRegistry::classic_twenty());
    let result = Solver::run(registry, &config)?;

    tracing::info!(distance = result.initial_distance, "initial distance");
    tracing::info!(
        distance = result.best_distance,
        generations = result.generations,
        "finished"
    );
    println!("Solution: {}", result.best);
    Ok(())
}
