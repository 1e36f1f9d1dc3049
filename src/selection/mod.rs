pub mod dcs;
pub mod des;

mod competence_index;
mod error;
mod multi_label;
mod nearest_neighbors;

pub use competence_index::CompetenceIndex;
pub use competence_index::Neighbor;
pub use competence_index::Neighborhood;
pub use error::SelectionError;
pub use multi_label::derive_competence_dataset;
pub use multi_label::MultiLabelSelector;
pub use multi_label::MultiLabelSelectorConfig;
pub use nearest_neighbors::NearestNeighborsBase;

use crate::classifiers::{ClassifierPool, ClassifierRef};
use crate::combination::CombinerRef;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::utils::labels::label_equals;

/// Default neighborhood size for the nearest-neighbor strategies.
pub const DEFAULT_K_NEIGHBORS: usize = 10;

/// Per-instance selection over a frozen classifier pool.
///
/// The lifecycle is fixed: set a pool, build against a validation set,
/// then answer queries read-only. Queries on a selector that has not been
/// built against its current pool fail with a configuration error.
pub trait DynamicSelection: Send + Sync {
    /// Replaces the pool. Any built state is discarded, so the selector
    /// must be rebuilt before the next query.
    fn set_classifiers(&mut self, pool: ClassifierPool);

    fn classifiers(&self) -> &ClassifierPool;

    /// Prepares the selector against `validation`.
    fn build_selector(&mut self, validation: &Dataset) -> Result<(), SelectionError>;

    /// Final label for `instance`.
    fn classify_instance(&self, instance: &dyn Instance) -> Result<f64, SelectionError>;

    /// Final per-class scores for `instance`.
    fn distribution_for_instance(&self, instance: &dyn Instance)
        -> Result<Vec<f64>, SelectionError>;
}

/// Strategies that pick exactly one pool member per query.
pub trait DynamicClassifierSelection: DynamicSelection {
    /// Pool index of the member judged most competent around `instance`.
    fn select_classifier(&self, instance: &dyn Instance) -> Result<usize, SelectionError>;
}

/// Strategies that pick a subset of the pool per query, fused by a
/// combiner.
pub trait DynamicEnsembleSelection: DynamicSelection {
    /// The chosen pool subset for `instance`, with optional weights.
    fn select_classifiers(&self, instance: &dyn Instance)
        -> Result<EnsembleSelection, SelectionError>;

    /// Replaces the fusion rule. Strategies whose fusion is part of their
    /// definition ignore this.
    fn set_combiner(&mut self, combiner: CombinerRef);

    fn combiner(&self) -> &CombinerRef;
}

/// Outcome of one ensemble selection round: pool indexes plus optional
/// per-member weights aligned with them.
pub struct EnsembleSelection {
    indices: Vec<usize>,
    weights: Option<Vec<f64>>,
}

impl EnsembleSelection {
    pub fn new(indices: Vec<usize>) -> Self {
        EnsembleSelection {
            indices,
            weights: None,
        }
    }

    pub fn weighted(indices: Vec<usize>, weights: Vec<f64>) -> Self {
        debug_assert_eq!(indices.len(), weights.len());
        EnsembleSelection {
            indices,
            weights: Some(weights),
        }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn weights(&self) -> Option<&[f64]> {
        self.weights.as_deref()
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolves the indexes against `pool`, in selection order.
    pub fn gather(&self, pool: &ClassifierPool) -> Result<Vec<ClassifierRef>, SelectionError> {
        self.indices
            .iter()
            .map(|&index| {
                pool.get(index).cloned().ok_or_else(|| {
                    SelectionError::InvalidArgument(format!(
                        "selected index {index} outside a pool of {}",
                        pool.len()
                    ))
                })
            })
            .collect()
    }
}

/// Distance-weighted error of every pool member over `neighborhood`: the
/// sum of neighbor distances where the member is wrong, divided by
/// `k_neighbors` (or by 1 when `k_neighbors` is 0).
pub(crate) fn distance_weighted_errors(
    pool: &ClassifierPool,
    neighborhood: &Neighborhood,
    k_neighbors: usize,
) -> Result<Vec<f64>, SelectionError> {
    let mut errors = vec![0.0; pool.len()];
    for neighbor in neighborhood {
        let truth = neighbor.instance.class_value().unwrap_or(f64::NAN);
        for (index, member) in pool.iter().enumerate() {
            let predicted = member.classify(neighbor.instance.as_ref())?;
            if !label_equals(predicted, truth) {
                errors[index] += neighbor.distance;
            }
        }
    }
    let divisor = if k_neighbors > 0 {
        k_neighbors as f64
    } else {
        1.0
    };
    for error in &mut errors {
        *error /= divisor;
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;
    use std::sync::Arc;

    #[test]
    fn gather_resolves_indices_in_order() {
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(1.0)),
        ]);

        let selection = EnsembleSelection::new(vec![1, 0]);
        let members = selection.gather(&pool).unwrap();
        assert_eq!(members.len(), 2);

        let header = header_two_features(2);
        let instance = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(members[0].classify(&*instance).unwrap(), 1.0);
        assert_eq!(members[1].classify(&*instance).unwrap(), 0.0);
    }

    #[test]
    fn gather_rejects_out_of_range_indices() {
        let pool = ClassifierPool::new(vec![Arc::new(FixedClassifier::always(0.0))]);

        let selection = EnsembleSelection::new(vec![0, 3]);
        assert!(matches!(
            selection.gather(&pool),
            Err(SelectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn weighted_errors_accumulate_distances_of_misses() {
        // validation: one point at distance 1, one at distance 2 from the
        // query; truth is label 0 at both
        let header = header_two_features(2);
        let rows = vec![vec![1.0, 0.0, 0.0], vec![2.0, 0.0, 0.0]];
        let index = CompetenceIndex::build(&dataset_from_rows(&header, &rows)).unwrap();

        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let region = index.query(&*query, 2);

        // member 0 is always wrong, member 1 always right
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::always(0.0)),
        ]);

        let errors = distance_weighted_errors(&pool, &region, 2).unwrap();
        assert!((errors[0] - 1.5).abs() < 1e-9);
        assert!((errors[1] - 0.0).abs() < 1e-9);
    }

    #[test]
    fn zero_k_divides_by_one() {
        let header = header_two_features(2);
        let rows = vec![vec![1.0, 0.0, 0.0]];
        let index = CompetenceIndex::build(&dataset_from_rows(&header, &rows)).unwrap();

        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        let region = index.query(&*query, 1);

        let pool = ClassifierPool::new(vec![Arc::new(FixedClassifier::always(1.0))]);
        let errors = distance_weighted_errors(&pool, &region, 0).unwrap();
        assert!((errors[0] - 1.0).abs() < 1e-9);
    }

    /// One shared scenario, three strategies, three hand-checked verdicts.
    ///
    /// Validation points sit at x = 1..4 labeled 0, 1, 0, 1; a query at the
    /// origin with k = 2 sees x = 1 (label 0) and x = 2 (label 1). The pool:
    /// an always-0 member, an always-1 member, and one that is right on both
    /// neighbors and answers 1 at the query.
    #[test]
    fn the_selection_rules_diverge_on_a_shared_neighborhood() {
        let header = header_two_features(2);
        let validation = dataset_from_rows(
            &header,
            &[
                vec![1.0, 0.0, 0.0],
                vec![2.0, 0.0, 1.0],
                vec![3.0, 0.0, 0.0],
                vec![4.0, 0.0, 1.0],
            ],
        );
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)) as ClassifierRef,
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::mapping(vec![(1.0, 0.0)], 1.0)),
        ]);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);

        // overall accuracy counts 1, 1, 2 over the region
        let mut ola = dcs::OverallLocalAccuracy::new(2);
        ola.set_classifiers(pool.clone());
        ola.build_selector(&validation).unwrap();
        assert_eq!(ola.select_classifier(&*query).unwrap(), 2);
        assert_eq!(ola.classify_instance(&*query).unwrap(), 1.0);

        // each member is flawless on its own predicted class, so the
        // class-conditional accuracies tie at 1 and the lowest index wins
        let mut lca = dcs::LocalClassAccuracy::new(2);
        lca.set_classifiers(pool.clone());
        lca.build_selector(&validation).unwrap();
        assert_eq!(lca.select_classifier(&*query).unwrap(), 0);
        assert_eq!(lca.classify_instance(&*query).unwrap(), 0.0);

        // only the third member is correct on the whole region
        let mut knora = des::KnoraEliminate::new(2);
        knora.set_classifiers(pool);
        knora.build_selector(&validation).unwrap();
        let selection = knora.select_classifiers(&*query).unwrap();
        assert_eq!(selection.indices(), &[2]);
        assert_eq!(knora.classify_instance(&*query).unwrap(), 1.0);
    }
}
