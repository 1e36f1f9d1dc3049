use std::sync::Arc;

use crate::classifiers::ClassifierRef;
use crate::core::instances::Instance;
use crate::selection::SelectionError;

/// Fuses the outputs of selected pool members into one decision.
///
/// Combiners are stateless per query: the members to fuse and their
/// optional weights arrive with every call. Weights align with `members`
/// by position; members beyond the weight vector count as weight-less.
pub trait Combiner: Send + Sync {
    /// Final label for `instance` from the members' outputs. Fails with an
    /// empty-ensemble error when `members` is empty.
    fn label(
        &self,
        members: &[ClassifierRef],
        weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<f64, SelectionError>;

    /// Aggregated per-class scores, normalized whenever they carry
    /// positive mass.
    fn distribution(
        &self,
        members: &[ClassifierRef],
        weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError>;
}

pub type CombinerRef = Arc<dyn Combiner + Send + Sync>;
