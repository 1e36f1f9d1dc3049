mod dynamic_voting;
mod dynamic_voting_selection;
mod knora_eliminate;

pub use dynamic_voting::DynamicVoting;
pub use dynamic_voting_selection::DynamicVotingWithSelection;
pub use knora_eliminate::KnoraEliminate;

use crate::core::instances::Instance;
use crate::selection::{DynamicEnsembleSelection, SelectionError};

/// Shared classify flow for the ensemble strategies: select, resolve the
/// members, and hand them to the strategy's combiner. An empty selection
/// surfaces as the combiner's empty-ensemble error.
pub(crate) fn combine_label<S>(
    selector: &S,
    instance: &dyn Instance,
) -> Result<f64, SelectionError>
where
    S: DynamicEnsembleSelection + ?Sized,
{
    if selector.classifiers().is_empty() {
        return Err(SelectionError::Configuration(
            "classifier pool is empty".into(),
        ));
    }
    let selection = selector.select_classifiers(instance)?;
    let members = selection.gather(selector.classifiers())?;
    selector.combiner().label(&members, selection.weights(), instance)
}

pub(crate) fn combine_distribution<S>(
    selector: &S,
    instance: &dyn Instance,
) -> Result<Vec<f64>, SelectionError>
where
    S: DynamicEnsembleSelection + ?Sized,
{
    if selector.classifiers().is_empty() {
        return Err(SelectionError::Configuration(
            "classifier pool is empty".into(),
        ));
    }
    let selection = selector.select_classifiers(instance)?;
    let members = selection.gather(selector.classifiers())?;
    selector
        .combiner()
        .distribution(&members, selection.weights(), instance)
}
