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

/// Overall Local Accuracy (Woods et al.): picks the pool member with the
/// most correct predictions among the query's k nearest validation
/// neighbors, ties going to the lowest pool index.
pub struct OverallLocalAccuracy {
    base: NearestNeighborsBase,
}

impl OverallLocalAccuracy {
    pub fn new(k_neighbors: usize) -> Self {
        OverallLocalAccuracy {
            base: NearestNeighborsBase::new(k_neighbors),
        }
    }
}

impl Default for OverallLocalAccuracy {
    fn default() -> Self {
        OverallLocalAccuracy::new(DEFAULT_K_NEIGHBORS)
    }
}

impl DynamicSelection for OverallLocalAccuracy {
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

impl DynamicClassifierSelection for OverallLocalAccuracy {
    fn select_classifier(&self, instance: &dyn Instance) -> Result<usize, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let mut correct = vec![0.0; pool.len()];
        for neighbor in &region {
            let truth = neighbor.instance.class_value().unwrap_or(f64::NAN);
            for (index, member) in pool.iter().enumerate() {
                if label_equals(member.classify(neighbor.instance.as_ref())?, truth) {
                    correct[index] += 1.0;
                }
            }
        }

        max_index(&correct)
            .ok_or_else(|| SelectionError::Configuration("classifier pool is empty".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;
    use std::sync::Arc;

    /// Validation points at x = 1, 2, 3 labeled 0, 0, 1; queries near the
    /// origin see the first k of them.
    fn validation() -> Dataset {
        let header = header_two_features(2);
        dataset_from_rows(
            &header,
            &[
                vec![1.0, 0.0, 0.0],
                vec![2.0, 0.0, 0.0],
                vec![3.0, 0.0, 1.0],
            ],
        )
    }

    #[test]
    fn picks_the_locally_most_accurate_member() {
        // member 0 is right on the two nearest neighbors, member 1 only on
        // the farthest
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let mut selector = OverallLocalAccuracy::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.select_classifier(&*query).unwrap(), 0);
        assert_eq!(selector.classify_instance(&*query).unwrap(), 0.0);
    }

    #[test]
    fn competence_ties_go_to_the_lowest_pool_index() {
        // all three members are wrong everywhere; scores tie at zero
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let mut selector = OverallLocalAccuracy::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.select_classifier(&*query).unwrap(), 0);
    }

    #[test]
    fn selection_requires_a_build() {
        let pool = ClassifierPool::new(vec![Arc::new(FixedClassifier::always(0.0))]);

        let mut selector = OverallLocalAccuracy::default();
        selector.set_classifiers(pool);

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert!(matches!(
            selector.select_classifier(&*query),
            Err(SelectionError::Configuration(_))
        ));
    }

    #[test]
    fn distribution_reports_the_chosen_member() {
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let mut selector = OverallLocalAccuracy::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let scores = selector.distribution_for_instance(&*query).unwrap();
        assert_eq!(scores, vec![1.0, 0.0]);
    }
}
