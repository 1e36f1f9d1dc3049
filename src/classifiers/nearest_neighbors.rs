use crate::classifiers::classifier::{Classifier, ModelError};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::core::neighbors::KdTree;

/// k-nearest-neighbor classifier over the training set.
///
/// Votes are either uniform or damped by distance with `1 / (1 + d)`, which
/// keeps exact matches finite.
pub struct KnnClassifier {
    k: usize,
    distance_weighted: bool,
    model: Option<Model>,
}

struct Model {
    tree: KdTree,
    labels: Vec<f64>,
    num_classes: usize,
}

impl KnnClassifier {
    pub fn new(k: usize, distance_weighted: bool) -> Self {
        KnnClassifier {
            k,
            distance_weighted,
            model: None,
        }
    }
}

impl Classifier for KnnClassifier {
    fn train(&mut self, data: &Dataset) -> Result<(), ModelError> {
        if self.k == 0 {
            return Err(ModelError::InvalidTrainingData("k must be at least 1".into()));
        }
        let num_classes = data.number_of_classes();
        if num_classes == 0 {
            return Err(ModelError::InvalidTrainingData(
                "class attribute must be nominal".into(),
            ));
        }
        if data.is_empty() {
            return Err(ModelError::InvalidTrainingData(
                "training set is empty".into(),
            ));
        }

        let mut points = Vec::with_capacity(data.len());
        let mut labels = Vec::with_capacity(data.len());
        for instance in data.iter() {
            let Some(label) = instance.class_value() else {
                continue;
            };
            if label.is_nan() {
                continue;
            }
            points.push(instance.feature_vector());
            labels.push(label);
        }
        if points.is_empty() {
            return Err(ModelError::InvalidTrainingData(
                "no labeled training instances".into(),
            ));
        }

        self.model = Some(Model {
            tree: KdTree::build(points),
            labels,
            num_classes,
        });
        Ok(())
    }

    fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::Untrained)?;
        let query = instance.feature_vector();
        let neighbors = model.tree.nearest(&query, self.k);

        let mut votes = vec![0.0; model.num_classes];
        for (index, distance) in neighbors {
            let label = model.labels[index].round() as usize;
            if label >= votes.len() {
                return Err(ModelError::SchemaMismatch(format!(
                    "stored label {label} outside the class range"
                )));
            }
            let weight = if self.distance_weighted {
                1.0 / (1.0 + distance)
            } else {
                1.0
            };
            votes[label] += weight;
        }

        let total: f64 = votes.iter().sum();
        if total > 0.0 {
            for vote in &mut votes {
                *vote /= total;
            }
        }
        Ok(votes)
    }

    fn name(&self) -> String {
        if self.distance_weighted {
            format!("knn-{}-dw", self.k)
        } else {
            format!("knn-{}", self.k)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};

    fn cluster_data() -> (std::sync::Arc<crate::core::instance_header::InstanceHeader>, Dataset) {
        let header = header_two_features(2);
        let mut rows = Vec::new();
        for i in 0..4 {
            rows.push(vec![f64::from(i) * 0.1, 0.0, 0.0]);
            rows.push(vec![5.0 + f64::from(i) * 0.1, 5.0, 1.0]);
        }
        let data = dataset_from_rows(&header, &rows);
        (header, data)
    }

    #[test]
    fn votes_with_the_local_majority() {
        let (header, data) = cluster_data();
        let mut model = KnnClassifier::new(3, false);
        model.train(&data).unwrap();

        let near_origin = instance_from_values(&header, &[0.1, 0.1, f64::NAN]);
        let near_far = instance_from_values(&header, &[5.1, 5.0, f64::NAN]);
        assert_eq!(model.classify(&*near_origin).unwrap(), 0.0);
        assert_eq!(model.classify(&*near_far).unwrap(), 1.0);
    }

    #[test]
    fn distance_weighting_favors_the_closer_cluster() {
        let (header, data) = cluster_data();
        let mut model = KnnClassifier::new(8, true);
        model.train(&data).unwrap();

        // with every training point in the vote, only the weighting decides
        let query = instance_from_values(&header, &[0.5, 0.5, f64::NAN]);
        assert_eq!(model.classify(&*query).unwrap(), 0.0);
    }

    #[test]
    fn rejects_k_of_zero() {
        let (_, data) = cluster_data();
        let mut model = KnnClassifier::new(0, false);
        assert!(matches!(
            model.train(&data),
            Err(ModelError::InvalidTrainingData(_))
        ));
    }

    #[test]
    fn names_distinguish_the_grid() {
        assert_eq!(KnnClassifier::new(3, false).name(), "knn-3");
        assert_eq!(KnnClassifier::new(5, true).name(), "knn-5-dw");
    }
}
