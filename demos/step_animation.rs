//! Walkthrough of the single-step driver, the way an interactive frontend
//! would use it: load a dataset into a session, then step until converged,
//! printing the state after each iteration.
//!
//! Run with: cargo run --example step_animation --release

use ndarray::Array2;
use stepkmeans::{InitMethod, KMeansConfig, Session};

fn main() {
    println!("=== stepkmeans step-mode example ===\n");

    // Three clusters in 2D for easy visualization
    let n_samples = 300;
    let centers = [[-5.0f64, -5.0], [0.0, 5.0], [5.0, -5.0]];

    println!("Generating {} samples around 3 centers...", n_samples);

    let mut data = Array2::<f64>::zeros((n_samples, 2));
    for i in 0..n_samples {
        let center = centers[i % 3];
        // Deterministic low-discrepancy jitter keeps the demo reproducible
        let jitter = (i as f64 * 0.61803398875).fract() - 0.5;
        data[[i, 0]] = center[0] + jitter;
        data[[i, 1]] = center[1] - jitter;
    }

    let config = KMeansConfig::new(3)
        .with_init_method(InitMethod::KMeansPlusPlus)
        .with_seed(42);

    let mut session = Session::new(config);
    session.load_data(data).expect("loading dataset failed");

    println!("Stepping k-means with k=3 (kmeans++ seeding)...\n");

    let mut iteration = 0;
    loop {
        iteration += 1;
        let outcome = session.step().expect("step failed");

        println!("Step {}: converged = {}", iteration, outcome.converged);
        for (i, centroid) in outcome.centroids.outer_iter().enumerate() {
            println!("  Centroid {}: ({:.4}, {:.4})", i, centroid[0], centroid[1]);
        }

        if outcome.converged || iteration >= 100 {
            break;
        }
    }

    let engine = session.engine();
    let assignment = engine.assignment().expect("no assignment");

    let mut cluster_counts = vec![0usize; engine.k()];
    for &label in assignment.iter() {
        cluster_counts[label] += 1;
    }

    println!("\nCluster distribution:");
    for (i, count) in cluster_counts.iter().enumerate() {
        println!(
            "  Cluster {}: {} samples ({:.1}%)",
            i,
            count,
            (*count as f64 / n_samples as f64) * 100.0
        );
    }

    println!("\n=== Done! ===");
}
