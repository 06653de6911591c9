use thiserror::Error;

/// Error types for the clustering engine
#[derive(Error, Debug)]
pub enum KMeansError {
    /// The number of clusters k is invalid (must be > 0)
    #[error("Invalid k value: {0}")]
    InvalidK(String),

    /// Not enough data points for the requested number of clusters
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Initialization method tag was not recognized
    #[error("Unknown initialization method: {0:?}")]
    UnknownInitMethod(String),

    /// kmeans++ weights were all zero, so the sampling distribution is undefined.
    /// Happens when the dataset has fewer than k distinct points.
    #[error("Degenerate kmeans++ distribution: all candidate weights are zero")]
    DegenerateWeights,

    /// Centroids have not been initialized yet
    #[error("Centroids have not been initialized. Call step(), run(), or set_centroids() first.")]
    NotInitialized,

    /// Centroid sets being compared have different row counts.
    /// A cluster that received no points drops out of the updated set (see
    /// `update_centroids`), so this surfaces mid-run when a cluster empties.
    #[error("Centroid shape mismatch: expected {expected} rows, got {found}")]
    ShapeMismatch {
        /// Row count of the previous centroid set.
        expected: usize,
        /// Row count of the updated centroid set.
        found: usize,
    },

    /// Manual initialization invoked on the core directly.
    /// Manual centroids must be supplied via `set_centroids` instead.
    #[error("Manual initialization cannot be computed. Supply centroids via set_centroids().")]
    ManualInit,

    /// Dimension mismatch between data and centroids
    #[error("Dimension mismatch: {0}")]
    InvalidDimensions(String),

    /// Dataset is empty
    #[error("Dataset is empty")]
    EmptyData,

    /// Rows of a nested point array have inconsistent lengths
    #[error("Ragged data: row {row} has length {found}, expected {expected}")]
    RaggedData {
        /// Index of the offending row.
        row: usize,
        /// Expected row length (taken from the first row).
        expected: usize,
        /// Actual row length.
        found: usize,
    },

    /// No dataset has been loaded into the session
    #[error("No dataset loaded. Call load_data() first.")]
    NoData,
}
