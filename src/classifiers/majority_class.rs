use crate::classifiers::classifier::{Classifier, ModelError};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;

/// Baseline model that always predicts the most frequent training label.
#[derive(Default)]
pub struct MajorityClass {
    class_counts: Vec<f64>,
}

impl MajorityClass {
    pub fn new() -> Self {
        MajorityClass::default()
    }
}

impl Classifier for MajorityClass {
    fn train(&mut self, data: &Dataset) -> Result<(), ModelError> {
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

        let mut counts = vec![0.0; num_classes];
        for instance in data.iter() {
            let Some(label) = instance.class_value() else {
                continue;
            };
            if label.is_nan() {
                continue;
            }
            let index = label.round() as usize;
            if index >= num_classes {
                return Err(ModelError::InvalidTrainingData(format!(
                    "class value {label} outside the declared labels"
                )));
            }
            counts[index] += 1.0;
        }
        self.class_counts = counts;
        Ok(())
    }

    fn distribution(&self, _instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        if self.class_counts.is_empty() {
            return Err(ModelError::Untrained);
        }
        let total: f64 = self.class_counts.iter().sum();
        if total > 0.0 {
            Ok(self.class_counts.iter().map(|c| c / total).collect())
        } else {
            Ok(self.class_counts.clone())
        }
    }

    fn name(&self) -> String {
        "majority-class".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};

    #[test]
    fn predicts_the_modal_training_label() {
        let header = header_two_features(3);
        let rows = vec![
            vec![0.0, 0.0, 1.0],
            vec![1.0, 0.0, 1.0],
            vec![2.0, 0.0, 2.0],
            vec![3.0, 0.0, 1.0],
        ];
        let data = dataset_from_rows(&header, &rows);

        let mut model = MajorityClass::new();
        model.train(&data).unwrap();

        let query = instance_from_values(&header, &[9.0, 9.0, f64::NAN]);
        assert_eq!(model.classify(&*query).unwrap(), 1.0);

        let scores = model.distribution(&*query).unwrap();
        assert!((scores[1] - 0.75).abs() < 1e-9);
        assert!((scores[2] - 0.25).abs() < 1e-9);
    }

    #[test]
    fn querying_before_training_fails() {
        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, 0.0]);

        let model = MajorityClass::new();
        assert!(matches!(
            model.classify(&*query),
            Err(ModelError::Untrained)
        ));
    }

    #[test]
    fn training_needs_a_nominal_class() {
        let header = header_two_features(0);
        let data = dataset_from_rows(&header, &[vec![0.0, 0.0, 3.5]]);

        let mut model = MajorityClass::new();
        assert!(matches!(
            model.train(&data),
            Err(ModelError::InvalidTrainingData(_))
        ));
    }
}
