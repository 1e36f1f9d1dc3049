use crate::classifiers::ClassifierPool;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::competence_index::Neighbor;
use crate::selection::dcs;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    DynamicClassifierSelection, DynamicSelection, SelectionError, DEFAULT_K_NEIGHBORS,
};
use crate::utils::labels::label_equals;
use crate::utils::math::max_index;

/// Default cut on behavior similarity; only strictly more similar
/// neighbors stay in the region.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.5;

/// Multiple Classifier Behavior (Giacinto & Roli): filters the competence
/// region down to neighbors whose pool behavior vector resembles the
/// query's, then picks the member with the most correct predictions over
/// what remains.
pub struct McbBased {
    base: NearestNeighborsBase,
    similarity_threshold: f64,
}

impl McbBased {
    pub fn new(k_neighbors: usize, similarity_threshold: f64) -> Self {
        McbBased {
            base: NearestNeighborsBase::new(k_neighbors),
            similarity_threshold,
        }
    }

    pub fn similarity_threshold(&self) -> f64 {
        self.similarity_threshold
    }
}

impl Default for McbBased {
    fn default() -> Self {
        McbBased::new(DEFAULT_K_NEIGHBORS, DEFAULT_SIMILARITY_THRESHOLD)
    }
}

/// Fraction of positions where two behavior vectors agree on the label.
/// Vectors of different lengths cannot be compared.
pub fn behavior_similarity(a: &[f64], b: &[f64]) -> Result<f64, SelectionError> {
    if a.len() != b.len() {
        return Err(SelectionError::InvalidArgument(format!(
            "behavior vectors differ in length: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    if a.is_empty() {
        return Ok(1.0);
    }
    let agreements = a
        .iter()
        .zip(b)
        .filter(|(x, y)| label_equals(**x, **y))
        .count();
    Ok(agreements as f64 / a.len() as f64)
}

impl DynamicSelection for McbBased {
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

impl DynamicClassifierSelection for McbBased {
    fn select_classifier(&self, instance: &dyn Instance) -> Result<usize, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        let query_behavior = pool.predictions(instance)?;
        let mut retained: Vec<&Neighbor> = Vec::new();
        for neighbor in &region {
            let behavior = pool.predictions(neighbor.instance.as_ref())?;
            if behavior_similarity(&query_behavior, &behavior)? > self.similarity_threshold {
                retained.push(neighbor);
            }
        }

        let mut correct = vec![0.0; pool.len()];
        for neighbor in retained {
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
