use std::sync::Arc;

use crate::classifiers::ClassifierPool;
use crate::combination::{CombinerRef, MajorityVote};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::des;
use crate::selection::{
    DynamicEnsembleSelection, DynamicSelection, EnsembleSelection, SelectionError,
};

/// No-selection baseline for the comparison runs: the whole pool votes on
/// every query. Building is a no-op because there is nothing to learn
/// from the validation set.
pub struct StaticMajorityVote {
    pool: ClassifierPool,
    combiner: CombinerRef,
}

impl StaticMajorityVote {
    pub fn new() -> Self {
        StaticMajorityVote {
            pool: ClassifierPool::default(),
            combiner: Arc::new(MajorityVote::new()),
        }
    }
}

impl Default for StaticMajorityVote {
    fn default() -> Self {
        StaticMajorityVote::new()
    }
}

impl DynamicSelection for StaticMajorityVote {
    fn set_classifiers(&mut self, pool: ClassifierPool) {
        self.pool = pool;
    }

    fn classifiers(&self) -> &ClassifierPool {
        &self.pool
    }

    fn build_selector(&mut self, _validation: &Dataset) -> Result<(), SelectionError> {
        if self.pool.is_empty() {
            return Err(SelectionError::Configuration(
                "pool must be set before building".into(),
            ));
        }
        Ok(())
    }

    fn classify_instance(&self, instance: &dyn Instance) -> Result<f64, SelectionError> {
        des::combine_label(self, instance)
    }

    fn distribution_for_instance(
        &self,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError> {
        des::combine_distribution(self, instance)
    }
}

impl DynamicEnsembleSelection for StaticMajorityVote {
    fn select_classifiers(
        &self,
        _instance: &dyn Instance,
    ) -> Result<EnsembleSelection, SelectionError> {
        Ok(EnsembleSelection::new((0..self.pool.len()).collect()))
    }

    fn set_combiner(&mut self, combiner: CombinerRef) {
        self.combiner = combiner;
    }

    fn combiner(&self) -> &CombinerRef {
        &self.combiner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;

    fn three_member_pool() -> ClassifierPool {
        ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ])
    }

    #[test]
    fn the_whole_pool_votes_on_every_query() {
        let header = header_two_features(2);
        let validation = dataset_from_rows(&header, &[vec![0.0, 0.0, 0.0]]);

        let mut baseline = StaticMajorityVote::new();
        baseline.set_classifiers(three_member_pool());
        baseline.build_selector(&validation).unwrap();

        let query = instance_from_values(&header, &[0.5, 0.5, f64::NAN]);
        assert_eq!(baseline.classify_instance(&*query).unwrap(), 0.0);

        let selection = baseline.select_classifiers(&*query).unwrap();
        assert_eq!(selection.indices(), &[0, 1, 2]);
        assert!(selection.weights().is_none());
    }

    #[test]
    fn building_without_a_pool_fails() {
        let header = header_two_features(2);
        let validation = dataset_from_rows(&header, &[vec![0.0, 0.0, 0.0]]);

        let mut baseline = StaticMajorityVote::new();
        assert!(matches!(
            baseline.build_selector(&validation),
            Err(SelectionError::Configuration(_))
        ));
    }
}
