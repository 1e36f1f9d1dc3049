use crate::classifiers::{Classifier, ModelError};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::utils::labels::label_equals;

/// Pool member with scripted answers, keyed on an instance's first
/// feature value.
pub struct FixedClassifier {
    mapping: Vec<(f64, f64)>,
    fallback: f64,
}

impl FixedClassifier {
    /// Predicts `label` for every instance.
    pub fn always(label: f64) -> Self {
        FixedClassifier {
            mapping: Vec::new(),
            fallback: label,
        }
    }

    /// Predicts by matching the first feature against the `(feature,
    /// label)` pairs, falling back to `fallback` when none match.
    pub fn mapping(mapping: Vec<(f64, f64)>, fallback: f64) -> Self {
        FixedClassifier { mapping, fallback }
    }

    fn answer(&self, instance: &dyn Instance) -> f64 {
        let key = instance.value_at_index(0).unwrap_or(f64::NAN);
        self.mapping
            .iter()
            .find(|(feature, _)| label_equals(*feature, key))
            .map_or(self.fallback, |(_, label)| *label)
    }
}

impl Classifier for FixedClassifier {
    fn train(&mut self, _data: &Dataset) -> Result<(), ModelError> {
        Ok(())
    }

    fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let mut scores = vec![0.0; instance.number_of_classes()];
        if let Some(score) = scores.get_mut(self.answer(instance) as usize) {
            *score = 1.0;
        }
        Ok(scores)
    }

    // direct, so numeric-class headers get the scripted label too
    fn classify(&self, instance: &dyn Instance) -> Result<f64, ModelError> {
        Ok(self.answer(instance))
    }

    fn name(&self) -> String {
        "fixed".into()
    }
}
