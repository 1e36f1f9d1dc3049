use std::sync::Arc;

use crate::classifiers::ClassifierPool;
use crate::combination::{CombinerRef, WeightedVote};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::competence_index::Neighborhood;
use crate::selection::des;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    distance_weighted_errors, DynamicEnsembleSelection, DynamicSelection, EnsembleSelection,
    SelectionError, DEFAULT_K_NEIGHBORS,
};

/// Dynamic Voting (Puuronen et al.): the whole pool votes on every query,
/// weighted by one minus each member's normalized distance-weighted local
/// error. Fusion by weighted vote is part of the method, so the combiner
/// cannot be replaced.
pub struct DynamicVoting {
    base: NearestNeighborsBase,
    combiner: CombinerRef,
}

impl DynamicVoting {
    pub fn new(k_neighbors: usize) -> Self {
        DynamicVoting {
            base: NearestNeighborsBase::new(k_neighbors),
            combiner: Arc::new(WeightedVote::new()),
        }
    }
}

impl Default for DynamicVoting {
    fn default() -> Self {
        DynamicVoting::new(DEFAULT_K_NEIGHBORS)
    }
}

/// Per-member voting weight over `neighborhood`: errors are normalized to
/// sum to one (left alone when they sum to zero), and each weight is one
/// minus the member's share.
pub(crate) fn competence_weights(
    pool: &ClassifierPool,
    neighborhood: &Neighborhood,
    k_neighbors: usize,
) -> Result<Vec<f64>, SelectionError> {
    let mut errors = distance_weighted_errors(pool, neighborhood, k_neighbors)?;
    let total: f64 = errors.iter().sum();
    if total > 0.0 {
        for error in &mut errors {
            *error /= total;
        }
    }
    Ok(errors.iter().map(|error| 1.0 - error).collect())
}

impl DynamicSelection for DynamicVoting {
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

impl DynamicEnsembleSelection for DynamicVoting {
    fn select_classifiers(
        &self,
        instance: &dyn Instance,
    ) -> Result<EnsembleSelection, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let weights = competence_weights(pool, &region, self.base.k_neighbors())?;
        Ok(EnsembleSelection::weighted(
            (0..pool.len()).collect(),
            weights,
        ))
    }

    /// Dynamic Voting always fuses with its internal weighted vote; the
    /// supplied combiner is ignored.
    fn set_combiner(&mut self, _combiner: CombinerRef) {}

    fn combiner(&self) -> &CombinerRef {
        &self.combiner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combination::MajorityVote;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    /// Two validation points at distance 1 on either side of the origin,
    /// both labeled 0.
    fn validation() -> Dataset {
        let header = header_two_features(2);
        dataset_from_rows(&header, &[vec![1.0, 0.0, 0.0], vec![-1.0, 0.0, 0.0]])
    }

    #[test]
    fn weights_complement_the_normalized_errors() {
        // raw errors with k=2: member 0 none, member 1 one miss (0.5),
        // member 2 two misses (1.0); error shares are 0, 1/3, 2/3
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::mapping(vec![(1.0, 1.0)], 0.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let mut selector = DynamicVoting::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let selection = selector.select_classifiers(&*query).unwrap();

        assert_eq!(selection.indices(), &[0, 1, 2]);
        let weights = selection.weights().unwrap();
        assert!(approx_eq(weights[0], 1.0));
        assert!(approx_eq(weights[1], 2.0 / 3.0));
        assert!(approx_eq(weights[2], 1.0 / 3.0));
    }

    #[test]
    fn flawless_pools_keep_unit_weights() {
        let header = header_two_features(2);
        let validation = dataset_from_rows(&header, &[vec![1.0, 0.0, 0.0]]);

        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(0.0)),
        ]);

        let mut selector = DynamicVoting::new(1);
        selector.set_classifiers(pool);
        selector.build_selector(&validation).unwrap();

        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let selection = selector.select_classifiers(&*query).unwrap();
        assert_eq!(selection.weights().unwrap(), &[1.0, 1.0]);
    }

    #[test]
    fn local_competence_outvotes_an_equal_head_count() {
        // member 0 votes 0 on the query but misses both neighbors; member 1
        // votes 1 and is locally flawless. a plain majority would tie and
        // fall to member 0's label; the competence weights hand the round
        // to member 1.
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::mapping(vec![(0.0, 0.0)], 1.0)),
            Arc::new(FixedClassifier::mapping(vec![(0.0, 1.0)], 0.0)),
        ]);

        let mut selector = DynamicVoting::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.classify_instance(&*query).unwrap(), 1.0);
    }

    #[test]
    fn the_combiner_cannot_be_replaced() {
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::mapping(vec![(0.0, 0.0)], 1.0)),
            Arc::new(FixedClassifier::mapping(vec![(0.0, 1.0)], 0.0)),
        ]);

        let mut selector = DynamicVoting::new(2);
        // swapping in a majority vote must be a no-op; under majority the
        // tie below would resolve to label 0 instead
        selector.set_combiner(Arc::new(MajorityVote::new()));
        selector.set_classifiers(pool);
        selector.build_selector(&validation()).unwrap();

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.classify_instance(&*query).unwrap(), 1.0);
    }
}
