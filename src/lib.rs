//! # stepkmeans
//!
//! An incremental k-means clustering engine in Rust, built for callers that
//! want to watch the algorithm evolve one iteration at a time (interactive
//! and visualization frontends) as well as the usual run-to-completion use.
//!
//! ## Features
//!
//! - **Pluggable initialization**: random, farthest-first, and kmeans++
//!   seeding, plus externally supplied (manual) centroids
//! - **Single-step execution**: a small state machine advances one
//!   assign/update iteration per call and reports a converged flag
//! - **Run to completion**: the classic Lloyd loop with a step budget and
//!   allclose-style convergence tolerances
//! - **ndarray compatible**: datasets and centroids are plain `Array2<f64>`
//! - **Session handles**: an explicit dataset + engine pair for transport
//!   layers, instead of process-wide state
//!
//! ## Example
//!
//! ```rust
//! use stepkmeans::{run_kmeans, KMeansConfig};
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//!
//! let config = KMeansConfig::new(2).with_seed(42);
//! let run = run_kmeans(&data.view(), &config).unwrap();
//!
//! assert!(run.converged);
//! assert_eq!(run.assignment.len(), 4);
//! ```
//!
//! ## Stepping interactively
//!
//! ```rust
//! use stepkmeans::{InitMethod, KMeans, KMeansConfig};
//! use ndarray::array;
//!
//! let data = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
//!
//! let config = KMeansConfig::new(2)
//!     .with_init_method(InitMethod::KMeansPlusPlus)
//!     .with_seed(42);
//! let mut engine = KMeans::with_config(config);
//!
//! // The first step initializes centroids and runs the first iteration;
//! // each later step advances exactly one iteration.
//! for _ in 0..20 {
//!     let outcome = engine.step(&data.view()).unwrap();
//!     if outcome.converged {
//!         break;
//!     }
//! }
//! assert!(engine.converged());
//! ```

mod algorithm;
mod config;
mod distance;
mod error;
mod init;
mod kmeans;
mod session;

pub use algorithm::{assign_clusters, has_converged, run_kmeans, run_lloyd, update_centroids, KMeansRun};
pub use config::KMeansConfig;
pub use error::KMeansError;
pub use init::{initialize_centroids, InitMethod};
pub use kmeans::{KMeans, Phase, StepOutcome};
pub use session::Session;
