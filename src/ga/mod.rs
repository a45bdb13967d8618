//! Genetic Algorithm framework.
//!
//! A generic, domain-agnostic GA over fixed-length gene sequences. Users
//! define their problem by implementing [`GaProblem`], which specifies the
//! gene alphabet, the chromosome length and the fitness function; the engine
//! owns every evolutionary mechanic.
//!
//! # Core Types
//!
//! - [`Chromosome`]: A gene sequence with an invalidatable score
//! - [`GaProblem`]: Problem definition (alphabet, length, evaluation)
//! - [`Fitness`]: Score type (higher is better)
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population, rates, tournament, seed)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final archive and per-generation statistics
//! - [`Archive`]: Elitist top-N store of distinct genotypes
//!
//! # Submodules
//!
//! - [`operators`]: Two-point crossover and resample mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod archive;
mod config;
mod error;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use archive::Archive;
pub use config::GaConfig;
pub use error::GaError;
pub use runner::{GaResult, GaRunner, GenerationStats};
pub use types::{Chromosome, Fitness, GaProblem};
