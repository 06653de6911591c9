use crate::config::KMeansConfig;
use crate::error::KMeansError;
use crate::kmeans::{KMeans, StepOutcome};
use ndarray::{Array1, Array2};

/// One logical clustering session: a dataset paired with its engine.
///
/// The transport layer owns one `Session` per client instead of keeping the
/// current dataset and engine in process-wide state, and passes it explicitly
/// into every call. Like the engine itself it performs no internal locking.
pub struct Session {
    data: Option<Array2<f64>>,
    engine: KMeans,
}

impl Session {
    /// Create a session with no dataset loaded.
    ///
    /// # Panics
    ///
    /// Panics if `config.k` is 0.
    pub fn new(config: KMeansConfig) -> Self {
        Self {
            data: None,
            engine: KMeans::with_config(config),
        }
    }

    /// Load a dataset, replacing any previous one and resetting the engine.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::EmptyData`] for a dataset with no rows.
    pub fn load_data(&mut self, data: Array2<f64>) -> Result<(), KMeansError> {
        if data.nrows() == 0 {
            return Err(KMeansError::EmptyData);
        }

        self.data = Some(data);
        self.engine.reset();
        Ok(())
    }

    /// Load a dataset given as a nested point array, the shape transports
    /// deliver it in.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::EmptyData`] for an empty outer array and
    /// [`KMeansError::RaggedData`] when row lengths disagree.
    pub fn load_points(&mut self, points: &[Vec<f64>]) -> Result<(), KMeansError> {
        if points.is_empty() {
            return Err(KMeansError::EmptyData);
        }

        let n_features = points[0].len();
        let mut data = Array2::zeros((points.len(), n_features));
        for (row, point) in points.iter().enumerate() {
            if point.len() != n_features {
                return Err(KMeansError::RaggedData {
                    row,
                    expected: n_features,
                    found: point.len(),
                });
            }
            for (col, &value) in point.iter().enumerate() {
                data[[row, col]] = value;
            }
        }

        self.load_data(data)
    }

    /// Run the loaded dataset to completion on the owned engine.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NoData`] when no dataset is loaded, otherwise
    /// whatever the engine's run reports.
    pub fn run(&mut self) -> Result<Array1<usize>, KMeansError> {
        let data = self.data.as_ref().ok_or(KMeansError::NoData)?;
        self.engine.run(&data.view())
    }

    /// Advance the owned engine by one step against the loaded dataset.
    ///
    /// # Errors
    ///
    /// Returns [`KMeansError::NoData`] when no dataset is loaded, otherwise
    /// whatever the engine's step reports.
    pub fn step(&mut self) -> Result<StepOutcome, KMeansError> {
        let data = self.data.as_ref().ok_or(KMeansError::NoData)?;
        self.engine.step(&data.view())
    }

    /// Reset the engine state, keeping the dataset
    pub fn reset(&mut self) {
        self.engine.reset();
    }

    /// Drop the dataset and reset the engine
    pub fn clear(&mut self) {
        self.data = None;
        self.engine.reset();
    }

    /// Access the loaded dataset, if any
    pub fn data(&self) -> Option<&Array2<f64>> {
        self.data.as_ref()
    }

    /// Access the owned engine
    pub fn engine(&self) -> &KMeans {
        &self.engine
    }

    /// Mutable access to the owned engine, e.g. to supply manual centroids
    pub fn engine_mut(&mut self) -> &mut KMeans {
        &mut self.engine
    }
}
