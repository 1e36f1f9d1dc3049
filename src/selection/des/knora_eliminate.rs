use std::sync::Arc;

use crate::classifiers::ClassifierPool;
use crate::combination::{CombinerRef, MajorityVote};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::des;
use crate::selection::nearest_neighbors::NearestNeighborsBase;
use crate::selection::{
    DynamicEnsembleSelection, DynamicSelection, EnsembleSelection, SelectionError,
    DEFAULT_K_NEIGHBORS,
};
use crate::utils::labels::label_equals;

/// KNORA-Eliminate (Ko, Sabourin & Britto): keeps the members that
/// correctly classify every one of the query's k nearest validation
/// neighbors. When nobody manages all k, the neighborhood shrinks one
/// instance at a time, nearest kept first, until somebody qualifies; if
/// nobody qualifies even on the single nearest neighbor, the selection is
/// empty and combining fails.
///
/// The default fusion is a plain majority vote over the survivors.
pub struct KnoraEliminate {
    base: NearestNeighborsBase,
    combiner: CombinerRef,
}

impl KnoraEliminate {
    pub fn new(k_neighbors: usize) -> Self {
        KnoraEliminate {
            base: NearestNeighborsBase::new(k_neighbors),
            combiner: Arc::new(MajorityVote::new()),
        }
    }
}

impl Default for KnoraEliminate {
    fn default() -> Self {
        KnoraEliminate::new(DEFAULT_K_NEIGHBORS)
    }
}

impl DynamicSelection for KnoraEliminate {
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

impl DynamicEnsembleSelection for KnoraEliminate {
    fn select_classifiers(
        &self,
        instance: &dyn Instance,
    ) -> Result<EnsembleSelection, SelectionError> {
        let region = self.base.competence_region(instance)?;
        let pool = self.base.classifiers();

        // per-member correctness over the region, nearest neighbor first;
        // shrinking the region is then a prefix check
        let mut correct: Vec<Vec<bool>> = Vec::with_capacity(pool.len());
        for member in pool.iter() {
            let mut outcomes = Vec::with_capacity(region.len());
            for neighbor in &region {
                let truth = neighbor.instance.class_value().unwrap_or(f64::NAN);
                outcomes.push(label_equals(
                    member.classify(neighbor.instance.as_ref())?,
                    truth,
                ));
            }
            correct.push(outcomes);
        }

        for used in (1..=region.len()).rev() {
            let qualified: Vec<usize> = (0..pool.len())
                .filter(|&member| correct[member][..used].iter().all(|&hit| hit))
                .collect();
            if !qualified.is_empty() {
                return Ok(EnsembleSelection::new(qualified));
            }
        }
        Ok(EnsembleSelection::new(Vec::new()))
    }

    fn set_combiner(&mut self, combiner: CombinerRef) {
        self.combiner = combiner;
    }

    fn combiner(&self) -> &CombinerRef {
        &self.combiner
    }
}
