use crate::classifiers::ModelError;
use crate::core::neighbors::KdTree;
use crate::multilabel::dataset::MultiLabelDataset;
use crate::multilabel::learner::{MultiLabelLearner, MultiLabelOutput};

const DEFAULT_K_NEIGHBORS: usize = 10;
const DEFAULT_SMOOTHING: f64 = 1.0;

/// Multi-label k-nearest-neighbor learner (Zhang & Zhou's ML-kNN).
///
/// Each label gets a maximum-a-posteriori relevance call: the label's prior
/// is combined with the likelihood of observing the query's neighbor
/// membership count, estimated during training from each row's k nearest
/// other rows under Laplace smoothing.
pub struct MlKnn {
    k_neighbors: usize,
    smoothing: f64,
    model: Option<Model>,
}

struct Model {
    tree: KdTree,
    number_of_features: usize,
    labels: Vec<Vec<bool>>,
    priors: Vec<f64>,
    // [label][membership count] likelihoods, given the label present/absent
    with_label: Vec<Vec<f64>>,
    without_label: Vec<Vec<f64>>,
}

impl MlKnn {
    pub fn new(k_neighbors: usize, smoothing: f64) -> Self {
        MlKnn {
            k_neighbors,
            smoothing,
            model: None,
        }
    }

    /// The query row's k nearest training rows, excluding the row itself.
    fn leave_one_out(&self, tree: &KdTree, features: &[f64], row: usize) -> Vec<usize> {
        let mut neighbors: Vec<usize> = tree
            .nearest(features, self.k_neighbors + 1)
            .into_iter()
            .map(|(index, _)| index)
            .filter(|&index| index != row)
            .collect();
        neighbors.truncate(self.k_neighbors);
        neighbors
    }
}

impl Default for MlKnn {
    fn default() -> Self {
        MlKnn::new(DEFAULT_K_NEIGHBORS, DEFAULT_SMOOTHING)
    }
}

fn membership_count(labels: &[Vec<bool>], neighbors: &[usize], label: usize) -> usize {
    neighbors
        .iter()
        .filter(|&&neighbor| labels[neighbor][label])
        .count()
}

fn likelihoods(counts: &[Vec<usize>], smoothing: f64) -> Vec<Vec<f64>> {
    counts
        .iter()
        .map(|per_count| {
            let total: usize = per_count.iter().sum();
            let divisor = smoothing * per_count.len() as f64 + total as f64;
            per_count
                .iter()
                .map(|&count| (smoothing + count as f64) / divisor)
                .collect()
        })
        .collect()
}

impl MultiLabelLearner for MlKnn {
    fn build(&mut self, dataset: &MultiLabelDataset) -> Result<(), ModelError> {
        if self.k_neighbors == 0 {
            return Err(ModelError::InvalidTrainingData(
                "k must be at least 1".to_string(),
            ));
        }
        if dataset.is_empty() {
            return Err(ModelError::InvalidTrainingData(
                "multi-label training table is empty".to_string(),
            ));
        }

        let rows = dataset.len() as f64;
        let label_count = dataset.number_of_labels();
        let labels = dataset.labels().to_vec();
        let tree = KdTree::build(dataset.features().to_vec());

        let priors: Vec<f64> = (0..label_count)
            .map(|label| {
                let present = labels.iter().filter(|row| row[label]).count() as f64;
                (self.smoothing + present) / (2.0 * self.smoothing + rows)
            })
            .collect();

        let mut with_label = vec![vec![0usize; self.k_neighbors + 1]; label_count];
        let mut without_label = vec![vec![0usize; self.k_neighbors + 1]; label_count];
        for (row, features) in dataset.features().iter().enumerate() {
            let neighbors = self.leave_one_out(&tree, features, row);
            for label in 0..label_count {
                let count = membership_count(&labels, &neighbors, label);
                if labels[row][label] {
                    with_label[label][count] += 1;
                } else {
                    without_label[label][count] += 1;
                }
            }
        }

        self.model = Some(Model {
            tree,
            number_of_features: dataset.number_of_features(),
            labels,
            priors,
            with_label: likelihoods(&with_label, self.smoothing),
            without_label: likelihoods(&without_label, self.smoothing),
        });
        Ok(())
    }

    fn predict(&self, features: &[f64]) -> Result<MultiLabelOutput, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::Untrained)?;
        if features.len() != model.number_of_features {
            return Err(ModelError::SchemaMismatch(format!(
                "expected {} features, got {}",
                model.number_of_features,
                features.len()
            )));
        }

        let neighbors: Vec<usize> = model
            .tree
            .nearest(features, self.k_neighbors)
            .into_iter()
            .map(|(index, _)| index)
            .collect();

        let label_count = model.priors.len();
        let mut bipartition = Vec::with_capacity(label_count);
        let mut confidences = Vec::with_capacity(label_count);
        for label in 0..label_count {
            let count = membership_count(&model.labels, &neighbors, label);
            let present = model.priors[label] * model.with_label[label][count];
            let absent = (1.0 - model.priors[label]) * model.without_label[label][count];

            bipartition.push(present > absent);
            let evidence = present + absent;
            confidences.push(if evidence > 0.0 {
                present / evidence
            } else {
                model.priors[label]
            });
        }

        Ok(MultiLabelOutput {
            bipartition,
            confidences: Some(confidences),
        })
    }
}
