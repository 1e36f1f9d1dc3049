use crate::selection::DynamicSelection;
use crate::selection::dcs::{
    LocalClassAccuracy, McbBased, OverallLocalAccuracy, WeightedKnnSelection,
};
use crate::selection::des::{DynamicVoting, DynamicVotingWithSelection, KnoraEliminate};
use crate::selection::{MultiLabelSelector, MultiLabelSelectorConfig};
use crate::multilabel::MlKnn;
use crate::tasks::StaticMajorityVote;
use crate::ui::types::build::BuildError;
use crate::ui::types::choices::{McbParams, MultiLabelParams, SelectorChoice};

impl TryFrom<McbParams> for McbBased {
    type Error = BuildError;

    fn try_from(p: McbParams) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&p.similarity_threshold) {
            return Err(BuildError::InvalidParameter(
                "similarity_threshold must be within 0.0..=1.0".into(),
            ));
        }
        Ok(McbBased::new(check_k(p.k_neighbors)?, p.similarity_threshold))
    }
}

impl TryFrom<MultiLabelParams> for MultiLabelSelector {
    type Error = BuildError;

    fn try_from(p: MultiLabelParams) -> Result<Self, Self::Error> {
        if p.smoothing <= 0.0 {
            return Err(BuildError::InvalidParameter(
                "smoothing must be positive".into(),
            ));
        }
        Ok(MultiLabelSelector::with_config(
            Box::new(MlKnn::new(check_k(p.k_neighbors)?, p.smoothing)),
            MultiLabelSelectorConfig {
                threshold: p.threshold,
                ..MultiLabelSelectorConfig::default()
            },
        ))
    }
}

/// Maps a wizard choice to its selector, still unwired: the caller hands
/// it the pool and the validation set.
pub fn build_selector(choice: SelectorChoice) -> Result<Box<dyn DynamicSelection>, BuildError> {
    let selector: Box<dyn DynamicSelection> = match choice {
        SelectorChoice::MultiLabelKnn(p) => Box::new(MultiLabelSelector::try_from(p)?),
        SelectorChoice::OverallLocalAccuracy(p) => {
            Box::new(OverallLocalAccuracy::new(check_k(p.k_neighbors)?))
        }
        SelectorChoice::LocalClassAccuracy(p) => {
            Box::new(LocalClassAccuracy::new(check_k(p.k_neighbors)?))
        }
        SelectorChoice::DynamicVoting(p) => Box::new(DynamicVoting::new(check_k(p.k_neighbors)?)),
        SelectorChoice::WeightedKnn(p) => {
            Box::new(WeightedKnnSelection::new(check_k(p.k_neighbors)?))
        }
        SelectorChoice::DynamicVotingWithSelection(p) => {
            Box::new(DynamicVotingWithSelection::new(check_k(p.k_neighbors)?))
        }
        SelectorChoice::KnoraEliminate(p) => Box::new(KnoraEliminate::new(check_k(p.k_neighbors)?)),
        SelectorChoice::McbBased(p) => Box::new(McbBased::try_from(p)?),
        SelectorChoice::MajorityVote(_) => Box::new(StaticMajorityVote::new()),
    };
    Ok(selector)
}

fn check_k(k_neighbors: usize) -> Result<usize, BuildError> {
    if k_neighbors == 0 {
        return Err(BuildError::InvalidParameter(
            "k_neighbors must be at least 1".into(),
        ));
    }
    Ok(k_neighbors)
}
