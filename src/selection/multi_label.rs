use std::sync::Arc;

use crate::classifiers::ClassifierPool;
use crate::combination::{CombinerRef, MajorityVote};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::multilabel::{MultiLabelDataset, MultiLabelLearner};
use crate::selection::des;
use crate::selection::{
    DynamicEnsembleSelection, DynamicSelection, EnsembleSelection, SelectionError,
};
use crate::utils::labels::label_equals;

/// Settings for [`MultiLabelSelector`]. `threshold`, when set, overrides
/// the learner's own bipartition wherever the learner reports per-label
/// confidences.
pub struct MultiLabelSelectorConfig {
    pub threshold: Option<f64>,
    pub combiner: CombinerRef,
}

impl Default for MultiLabelSelectorConfig {
    fn default() -> Self {
        MultiLabelSelectorConfig {
            threshold: None,
            combiner: Arc::new(MajorityVote::new()),
        }
    }
}

/// Recasts competence estimation as multi-label prediction: each pool
/// member becomes one binary label ("was this member right here?"), a
/// multi-label learner is trained on the validation set so labeled, and at
/// query time the predicted bipartition picks the ensemble.
pub struct MultiLabelSelector {
    pool: ClassifierPool,
    learner: Box<dyn MultiLabelLearner + Send + Sync>,
    threshold: Option<f64>,
    combiner: CombinerRef,
    built: bool,
}

/// One row per validation instance: its non-class features, plus one
/// boolean per pool member recording whether that member's prediction
/// matches the true label under the label tolerance.
pub fn derive_competence_dataset(
    validation: &Dataset,
    pool: &ClassifierPool,
) -> Result<MultiLabelDataset, SelectionError> {
    let feature_width = validation.header().number_of_attributes().saturating_sub(1);
    let mut table = MultiLabelDataset::new(feature_width, pool.len());

    for instance in validation.iter() {
        let truth = instance.class_value().ok_or_else(|| {
            SelectionError::Configuration(
                "validation set contains instances without a class label".into(),
            )
        })?;

        let mut correctness = Vec::with_capacity(pool.len());
        for member in pool.iter() {
            let predicted = member.classify(instance.as_ref())?;
            correctness.push(label_equals(predicted, truth));
        }
        table.push_row(instance.feature_vector(), correctness)?;
    }
    Ok(table)
}

impl MultiLabelSelector {
    pub fn new(learner: Box<dyn MultiLabelLearner + Send + Sync>) -> Self {
        MultiLabelSelector::with_config(learner, MultiLabelSelectorConfig::default())
    }

    pub fn with_config(
        learner: Box<dyn MultiLabelLearner + Send + Sync>,
        config: MultiLabelSelectorConfig,
    ) -> Self {
        MultiLabelSelector {
            pool: ClassifierPool::default(),
            learner,
            threshold: config.threshold,
            combiner: config.combiner,
            built: false,
        }
    }

    /// The learner's competent/incompetent call per pool member. With a
    /// configured threshold and learner confidences, competence is
    /// `confidence > threshold`; otherwise the learner's own bipartition.
    pub fn bipartition(&self, instance: &dyn Instance) -> Result<Vec<bool>, SelectionError> {
        if !self.built {
            return Err(SelectionError::Configuration(
                "selector queried before build".into(),
            ));
        }

        let output = self.learner.predict(&instance.feature_vector())?;
        let bits = match (self.threshold, output.confidences) {
            (Some(threshold), Some(confidences)) => confidences
                .iter()
                .map(|&confidence| confidence > threshold)
                .collect(),
            _ => output.bipartition,
        };

        if bits.len() != self.pool.len() {
            return Err(SelectionError::InvalidArgument(format!(
                "competence prediction covers {} labels for a pool of {}",
                bits.len(),
                self.pool.len()
            )));
        }
        Ok(bits)
    }
}

impl DynamicSelection for MultiLabelSelector {
    fn set_classifiers(&mut self, pool: ClassifierPool) {
        self.pool = pool;
        self.built = false;
    }

    fn classifiers(&self) -> &ClassifierPool {
        &self.pool
    }

    fn build_selector(&mut self, validation: &Dataset) -> Result<(), SelectionError> {
        if self.pool.is_empty() {
            return Err(SelectionError::Configuration(
                "pool must be set before building".into(),
            ));
        }
        if validation.is_empty() {
            return Err(SelectionError::Configuration(
                "validation set is empty".into(),
            ));
        }
        if validation.number_of_classes() == 0 {
            return Err(SelectionError::Configuration(
                "competence labels need a nominal class attribute".into(),
            ));
        }

        let table = derive_competence_dataset(validation, &self.pool)?;
        self.learner.build(&table)?;
        self.built = true;
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

impl DynamicEnsembleSelection for MultiLabelSelector {
    fn select_classifiers(
        &self,
        instance: &dyn Instance,
    ) -> Result<EnsembleSelection, SelectionError> {
        let bits = self.bipartition(instance)?;
        let indices = bits
            .iter()
            .enumerate()
            .filter_map(|(index, &competent)| competent.then_some(index))
            .collect();
        Ok(EnsembleSelection::new(indices))
    }

    fn set_combiner(&mut self, combiner: CombinerRef) {
        self.combiner = combiner;
    }

    fn combiner(&self) -> &CombinerRef {
        &self.combiner
    }
}
