use crate::classifiers::ModelError;
use crate::multilabel::dataset::MultiLabelDataset;

/// Prediction for one query: the yes/no relevance call per label, plus
/// per-label confidence scores when the learner produces them.
#[derive(Debug)]
pub struct MultiLabelOutput {
    pub bipartition: Vec<bool>,
    pub confidences: Option<Vec<f64>>,
}

/// A trainable multi-label model. Implementations keep their trained state
/// internal and answer queries over plain feature vectors.
pub trait MultiLabelLearner {
    fn build(&mut self, dataset: &MultiLabelDataset) -> Result<(), ModelError>;

    fn predict(&self, features: &[f64]) -> Result<MultiLabelOutput, ModelError>;
}
