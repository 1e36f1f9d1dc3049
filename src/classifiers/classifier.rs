use std::sync::Arc;

use thiserror::Error;

use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::utils::math::max_index;

/// A batch-trained base model.
///
/// Training happens once, before the classifier joins a pool; from then on
/// the model is only queried. Predictions and class labels are numeric:
/// for a nominal class they carry the label index.
pub trait Classifier: Send + Sync {
    /// Fits the model to `data`.
    fn train(&mut self, data: &Dataset) -> Result<(), ModelError>;

    /// Per-class scores for `instance`, one per label of a nominal class.
    fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError>;

    /// Predicted label for `instance`. By default the arg-max of
    /// [`distribution`](Classifier::distribution), ties to the lowest
    /// label index.
    fn classify(&self, instance: &dyn Instance) -> Result<f64, ModelError> {
        let scores = self.distribution(instance)?;
        match max_index(&scores) {
            Some(index) => Ok(index as f64),
            None => Err(ModelError::SchemaMismatch(
                "empty class distribution".into(),
            )),
        }
    }

    /// Short display name used by reports.
    fn name(&self) -> String;
}

pub type ClassifierRef = Arc<dyn Classifier + Send + Sync>;

/// Failures raised by base models.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("model was queried before training")]
    Untrained,

    #[error("training data is unusable: {0}")]
    InvalidTrainingData(String),

    #[error("instance does not match the trained schema: {0}")]
    SchemaMismatch(String),
}
