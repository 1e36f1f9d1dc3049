use std::sync::Arc;

use crate::classifiers::ClassifierPool;
use crate::combination::{CombinerRef, WeightedVote};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::des;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    distance_weighted_errors, DynamicEnsembleSelection, DynamicSelection, EnsembleSelection,
    SelectionError, DEFAULT_K_NEIGHBORS,
};
use crate::utils::math::sort_indexes_ascending;

/// Dynamic Voting with Selection (Puuronen et al.): ranks the pool by
/// distance-weighted local error, discards the worse half, and lets the
/// surviving half vote with weights re-normalized among themselves. Like
/// [`DynamicVoting`](super::DynamicVoting), fusion is fixed to a weighted
/// vote.
pub struct DynamicVotingWithSelection {
    base: NearestNeighborsBase,
    combiner: CombinerRef,
}

impl DynamicVotingWithSelection {
    pub fn new(k_neighbors: usize) -> Self {
        DynamicVotingWithSelection {
            base: NearestNeighborsBase::new(k_neighbors),
            combiner: Arc::new(WeightedVote::new()),
        }
    }
}

impl Default for DynamicVotingWithSelection {
    fn default() -> Self {
        DynamicVotingWithSelection::new(DEFAULT_K_NEIGHBORS)
    }
}

impl DynamicSelection for DynamicVotingWithSelection {
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
        des::combine_label(self, instance)
    }

    fn distribution_for_instance(
        &self,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError> {
        des::combine_distribution(self, instance)
    }
}

impl DynamicEnsembleSelection for DynamicVotingWithSelection {
    fn select_classifiers(
        &self,
        instance: &dyn Instance,
    ) -> Result<EnsembleSelection, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let errors = distance_weighted_errors(pool, &region, self.base.k_neighbors())?;
        let ranked = sort_indexes_ascending(&errors);

        // a pool of one has an empty better half; the combiner reports the
        // empty ensemble downstream
        let kept = &ranked[..pool.len() / 2];
        let total: f64 = kept.iter().map(|&index| errors[index]).sum();
        let weights = kept
            .iter()
            .map(|&index| {
                if total > 0.0 {
                    1.0 - errors[index] / total
                } else {
                    1.0
                }
            })
            .collect();

        Ok(EnsembleSelection::weighted(kept.to_vec(), weights))
    }

    /// Fusion is fixed to the internal weighted vote; the supplied combiner
    /// is ignored.
    fn set_combiner(&mut self, _combiner: CombinerRef) {}

    fn combiner(&self) -> &CombinerRef {
        &self.combiner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn validation() -> Dataset {
        let header = header_two_features(2);
        dataset_from_rows(&header, &[vec![1.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0]])
    }

    #[test]
    fn keeps_the_better_half_with_renormalized_weights() {
        // local errors with k=2 are 0, 0.5, 1.0, 1.0; the better half is
        // members 0 and 1, whose error shares within the half are 0 and 1
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::mapping(vec![(1.0, 1.0)], 0.0)),
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let mut selector = DynamicVotingWithSelection::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let selection = selector.select_classifiers(&*query).unwrap();

        assert_eq!(selection.indices(), &[0, 1]);
        let weights = selection.weights().unwrap();
        assert!(approx_eq(weights[0], 1.0));
        assert!(approx_eq(weights[1], 0.0));
    }

    #[test]
    fn a_flawless_half_votes_with_unit_weights() {
        // members 0 and 1 are locally flawless and vote 1 on the query;
        // members 2 and 3 miss every neighbor and are discarded
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::mapping(vec![(0.0, 1.0)], 0.0)),
            Arc::new(FixedClassifier::mapping(vec![(0.0, 1.0)], 0.0)),
            Arc::new(FixedClassifier::mapping(vec![(0.0, 0.0)], 1.0)),
            Arc::new(FixedClassifier::mapping(vec![(0.0, 0.0)], 1.0)),
        ]);

        let mut selector = DynamicVotingWithSelection::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);

        let selection = selector.select_classifiers(&*query).unwrap();
        assert_eq!(selection.indices(), &[0, 1]);
        assert_eq!(selection.weights().unwrap(), &[1.0, 1.0]);

        assert_eq!(selector.classify_instance(&*query).unwrap(), 1.0);
    }

    #[test]
    fn a_single_member_pool_selects_nobody() {
        let pool = ClassifierPool::new(vec![Arc::new(FixedClassifier::always(0.0))]);

        let mut selector = DynamicVotingWithSelection::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);

        let selection = selector.select_classifiers(&*query).unwrap();
        assert!(selection.indices().is_empty());

        let error = selector.classify_instance(&*query).unwrap_err();
        assert!(matches!(error, SelectionError::EmptyEnsemble(_)));
    }
}
