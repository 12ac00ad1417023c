//! # Birdbrain - Neuroevolution for a Side-Scrolling Obstacle Course
//!
//! A population of agents learns to fly through the gaps of scrolling obstacle
//! pairs. Each agent carries a tiny feed-forward network; when every agent has
//! died, the next generation is bred from mutated copies of the best ones.
//!
//! ## Features
//!
//! - Fixed-topology neural network brains (one hidden layer, sigmoid activation)
//! - Asexual reproduction with per-weight random mutation, no crossover
//! - Squared-age fitness and biased roulette-wheel parent selection
//! - Real-time and batch (headless) tick scheduling
//! - Read-only snapshots for rendering
//! - JSON run configuration
//!
//! ## Core Modules
//!
//! - [`simulation::network`] - Neural network implementation
//! - [`simulation::agent`] - Agent physics and decisions
//! - [`simulation::obstacle`] - Obstacle geometry and pair generation
//! - [`simulation::selection`] - Fitness scoring and parent selection
//! - [`simulation::controller`] - Generation lifecycle
//! - [`simulation::scheduler`] - Tick scheduling

/// Core simulation logic and data structures.
pub mod simulation {
    /// Agent physics, senses and jump decisions.
    pub mod agent;
    /// Generation controller owning the population and obstacles.
    pub mod controller;
    /// Mutation probability and noise distributions.
    pub mod mutation;
    /// Feed-forward neural network used as agent brain.
    pub mod network;
    /// Scrolling obstacles and pair generation.
    pub mod obstacle;
    /// Simulation parameters.
    pub mod params;
    /// Tick scheduling for real-time and batch modes.
    pub mod scheduler;
    /// Fitness scoring and parent selection.
    pub mod selection;
    /// Read-only views for renderers.
    pub mod snapshot;
}
