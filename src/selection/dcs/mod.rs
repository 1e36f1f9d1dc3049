mod local_class_accuracy;
mod mcb_based;
mod overall_local_accuracy;
mod weighted_knn;

pub use local_class_accuracy::LocalClassAccuracy;
pub use mcb_based::behavior_similarity;
pub use mcb_based::McbBased;
pub use mcb_based::DEFAULT_SIMILARITY_THRESHOLD;
pub use overall_local_accuracy::OverallLocalAccuracy;
pub use weighted_knn::WeightedKnnSelection;

use crate::core::instances::Instance;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{DynamicClassifierSelection, SelectionError};
use crate::utils::labels::label_equals;

/// Shared classify flow for the one-classifier strategies: probe the whole
/// pool once, short-circuit when it is unanimous, and otherwise answer
/// with the selected member's already-computed prediction.
pub(crate) fn classify_by_selection<S>(
    base: &NearestNeighborsBase,
    selector: &S,
    instance: &dyn Instance,
) -> Result<f64, SelectionError>
where
    S: DynamicClassifierSelection + ?Sized,
{
    base.index()?;
    let pool = base.classifiers();
    if pool.is_empty() {
        return Err(SelectionError::Configuration(
            "classifier pool is empty".into(),
        ));
    }

    let labels = pool.predictions(instance)?;
    let first = labels[0];
    if labels.iter().all(|&label| label_equals(label, first)) {
        return Ok(first);
    }

    let chosen = selector.select_classifier(instance)?;
    labels.get(chosen).copied().ok_or_else(|| {
        SelectionError::InvalidArgument(format!("selected index {chosen} outside the pool"))
    })
}

/// Shared distribution flow: always selects, then reports the chosen
/// member's distribution.
pub(crate) fn distribution_by_selection<S>(
    base: &NearestNeighborsBase,
    selector: &S,
    instance: &dyn Instance,
) -> Result<Vec<f64>, SelectionError>
where
    S: DynamicClassifierSelection + ?Sized,
{
    base.index()?;
    if base.classifiers().is_empty() {
        return Err(SelectionError::Configuration(
            "classifier pool is empty".into(),
        ));
    }

    let chosen = selector.select_classifier(instance)?;
    let member = base.classifiers().get(chosen).ok_or_else(|| {
        SelectionError::InvalidArgument(format!("selected index {chosen} outside the pool"))
    })?;
    Ok(member.distribution(instance)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifiers::ClassifierPool;
    use crate::selection::DynamicSelection;
    use crate::testing::dummies::{dataset_from_rows, header_two_features, instance_from_values};
    use crate::testing::stubs::CountingClassifier;
    use std::sync::Arc;

    #[test]
    fn unanimous_pools_skip_the_neighborhood_machinery() {
        let (first, first_calls) = CountingClassifier::new(1.0);
        let (second, second_calls) = CountingClassifier::new(1.0);
        let pool = ClassifierPool::new(vec![Arc::new(first), Arc::new(second)]);

        let header = header_two_features(2);
        let validation = dataset_from_rows(&header, &[vec![0.0, 0.0, 1.0]]);

        let mut selector = OverallLocalAccuracy::new(3);
        selector.set_classifiers(pool);
        selector.build_selector(&validation).unwrap();

        let query = instance_from_values(&header, &[0.5, 0.5, f64::NAN]);
        assert_eq!(selector.classify_instance(&*query).unwrap(), 1.0);

        // one probe per member; competence scans would have added more
        assert_eq!(first_calls.count(), 1);
        assert_eq!(second_calls.count(), 1);
    }

    #[test]
    fn the_fast_path_still_requires_a_build() {
        let (only, _) = CountingClassifier::new(0.0);
        let pool = ClassifierPool::new(vec![Arc::new(only)]);

        let mut selector = OverallLocalAccuracy::new(3);
        selector.set_classifiers(pool);

        let header = header_two_features(2);
        let query = instance_from_values(&header, &[0.0, 0.0, f64::NAN]);
        assert!(matches!(
            selector.classify_instance(&*query),
            Err(SelectionError::Configuration(_))
        ));
    }
}
