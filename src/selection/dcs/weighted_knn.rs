use crate::classifiers::ClassifierPool;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::dcs;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    distance_weighted_errors, DynamicClassifierSelection, DynamicSelection, SelectionError,
    DEFAULT_K_NEIGHBORS,
};
use crate::utils::math::min_index;

/// Distance-weighted selection (Puuronen et al.): each member's local error
/// is the sum of neighbor distances where it predicts wrongly, and the
/// member with the lowest error wins, ties going to the lowest pool index.
///
/// Far-away mistakes therefore cost more than close ones, which rewards
/// members whose errors cluster right around the query.
pub struct WeightedKnnSelection {
    base: NearestNeighborsBase,
}

impl WeightedKnnSelection {
    pub fn new(k_neighbors: usize) -> Self {
        WeightedKnnSelection {
            base: NearestNeighborsBase::new(k_neighbors),
        }
    }
}

impl Default for WeightedKnnSelection {
    fn default() -> Self {
        WeightedKnnSelection::new(DEFAULT_K_NEIGHBORS)
    }
}

impl DynamicSelection for WeightedKnnSelection {
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

impl DynamicClassifierSelection for WeightedKnnSelection {
    fn select_classifier(&self, instance: &dyn Instance) -> Result<usize, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let errors = distance_weighted_errors(pool, &region, self.base.k_neighbors())?;
        min_index(&errors)
            .ok_or_else(|| SelectionError::Configuration("classifier pool is empty".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::FixedClassifier;
    use std::sync::Arc;

    #[test]
    fn mistakes_far_from_the_query_cost_more() {
        let header = header_two_features(2);
        // neighbor at distance 1 labeled 1, neighbor at distance 3 labeled 0
        let validation = dataset_from_rows(
            &header,
            &[vec![1.0, 0.0, 1.0], vec![3.0, 0.0, 0.0]],
        );

        // member 0 misses the far neighbor (error 3), member 1 misses the
        // near one (error 1)
        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(1.0)),
            Arc::new(FixedClassifier::always(0.0)),
        ]);

        let mut selector = WeightedKnnSelection::new(2);
        selector.set_classifiers(pool);
        selector.build_selector(&validation).unwrap();

        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.select_classifier(&*query).unwrap(), 1);
        assert_eq!(selector.classify_instance(&*query).unwrap(), 0.0);
    }

    #[test]
    fn error_ties_go_to_the_lowest_pool_index() {
        let header = header_two_features(2);
        let validation = dataset_from_rows(&header, &[vec![1.0, 0.0, 0.0]]);

        let pool = ClassifierPool::new(vec![
            Arc::new(FixedClassifier::always(0.0)),
            Arc::new(FixedClassifier::always(0.0)),
        ]);

        let mut selector = WeightedKnnSelection::new(1);
        selector.set_classifiers(pool);
        selector.build_selector(&validation).unwrap();

        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert_eq!(selector.select_classifier(&*query).unwrap(), 0);
    }
}
