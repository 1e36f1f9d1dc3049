use crate::classifiers::ClassifierPool;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::dcs;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    DynamicClassifierSelection, DynamicSelection, SelectionError, DEFAULT_K_NEIGHBORS,
};
use crate::utils::labels::label_equals;
use crate::utils::math::max_index;

/// Local Class Accuracy (Woods et al.): scores each member only on the
/// neighbors whose true label matches the member's prediction for the
/// query, as the fraction it classifies correctly. A member with no such
/// neighbors scores 0.
pub struct LocalClassAccuracy {
    base: NearestNeighborsBase,
}

impl LocalClassAccuracy {
    pub fn new(k_neighbors: usize) -> Self {
        LocalClassAccuracy {
            base: NearestNeighborsBase::new(k_neighbors),
        }
    }
}

impl Default for LocalClassAccuracy {
    fn default() -> Self {
        LocalClassAccuracy::new(DEFAULT_K_NEIGHBORS)
    }
}

impl DynamicSelection for LocalClassAccuracy {
    fn set_classifiers(&mut self, pool: ClassifierPool) {
        self.base.set_classifiers(pool);
    }

    fn classifiers(&self) -> &ClassifierPool {
        self.base.classifiers()
    }

    fn build_selector(&mut self, validation: &Dataset) -> Result<(), SelectionError> {
        self.base.build(validation)
    }

    fn classify_instance(&self, instance: &dyn Instance) -> Result<f64, SelectionError> {
        dcs::classify_by_selection(&self.base, self, instance)
    }

    fn distribution_for_instance(
        &self,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError> {
        dcs::distribution_by_selection(&self.base, self, instance)
    }
}

impl DynamicClassifierSelection for LocalClassAccuracy {
    fn select_classifier(&self, instance: &dyn Instance) -> Result<usize, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let mut accuracies = vec![0.0; pool.len()];
        for (index, member) in pool.iter().enumerate() {
            let predicted = member.classify(instance)?;
            let mut relevant = 0.0;
            let mut correct = 0.0;
            for neighbor in &region {
                let truth = neighbor.instance.class_value().unwrap_or(f64::NAN);
                if !label_equals(truth, predicted) {
                    continue;
                }
                relevant += 1.0;
                if label_equals(member.classify(neighbor.instance.as_ref())?, truth) {
                    correct += 1.0;
                }
            }
            if relevant > 0.0 {
                accuracies[index] = correct / relevant;
            }
        }

        max_index(&accuracies)
            .ok_or_else(|| SelectionError::Configuration("classifier pool is empty".into()))
    }
}
