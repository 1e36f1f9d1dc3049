use std::fmt;
use std::sync::Arc;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

use crate::classifiers::{
    Classifier, ClassifierPool, ClassifierRef, GaussianNaiveBayes, KnnClassifier, MajorityClass,
};
use crate::combination::MajorityVote;
use crate::core::dataset::Dataset;
use crate::multilabel::MlKnn;
use crate::selection::dcs::{
    LocalClassAccuracy, McbBased, OverallLocalAccuracy, WeightedKnnSelection,
    DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::selection::des::{DynamicVoting, DynamicVotingWithSelection, KnoraEliminate};
use crate::selection::{
    DynamicSelection, MultiLabelSelector, MultiLabelSelectorConfig, SelectionError,
};
use crate::tasks::StaticMajorityVote;

/// Every selector the tasks know how to assemble, in report column order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema, EnumIter)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionAlgorithm {
    MultiLabelKnn,
    OverallLocalAccuracy,
    LocalClassAccuracy,
    DynamicVoting,
    WeightedKnn,
    DynamicVotingWithSelection,
    KnoraEliminate,
    McbBased,
    MajorityVote,
}

impl SelectionAlgorithm {
    /// Short tag used in report columns and progress lines.
    pub fn label(self) -> &'static str {
        match self {
            SelectionAlgorithm::MultiLabelKnn => "MLKNN",
            SelectionAlgorithm::OverallLocalAccuracy => "OLA",
            SelectionAlgorithm::LocalClassAccuracy => "LCA",
            SelectionAlgorithm::DynamicVoting => "DV",
            SelectionAlgorithm::WeightedKnn => "DS",
            SelectionAlgorithm::DynamicVotingWithSelection => "DVS",
            SelectionAlgorithm::KnoraEliminate => "KNORAE",
            SelectionAlgorithm::McbBased => "MCB",
            SelectionAlgorithm::MajorityVote => "MV",
        }
    }

    /// One-line summary shown by the wizard menus.
    pub fn description(self) -> &'static str {
        match self {
            SelectionAlgorithm::MultiLabelKnn => {
                "Multi-label kNN over per-member correctness labels"
            }
            SelectionAlgorithm::OverallLocalAccuracy => {
                "Most correct classifier in the query's neighborhood"
            }
            SelectionAlgorithm::LocalClassAccuracy => {
                "Accuracy restricted to the predicted class's neighbors"
            }
            SelectionAlgorithm::DynamicVoting => {
                "Whole pool votes, weighted by local competence"
            }
            SelectionAlgorithm::WeightedKnn => {
                "Lowest distance-weighted neighborhood error wins"
            }
            SelectionAlgorithm::DynamicVotingWithSelection => {
                "Better half of the pool votes with renormalized weights"
            }
            SelectionAlgorithm::KnoraEliminate => {
                "Members flawless on the (shrinking) neighborhood vote"
            }
            SelectionAlgorithm::McbBased => {
                "Neighborhood filtered by behavior similarity, then most correct"
            }
            SelectionAlgorithm::MajorityVote => "Whole pool, plain majority vote",
        }
    }
}

impl fmt::Display for SelectionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Assembles one ready-to-query selector: constructs the strategy, hands
/// it the pool, and builds it against `validation`.
pub fn build_selector(
    algorithm: SelectionAlgorithm,
    pool: ClassifierPool,
    validation: &Dataset,
    k_neighbors: usize,
    multilabel_threshold: Option<f64>,
) -> Result<Box<dyn DynamicSelection>, SelectionError> {
    let mut selector: Box<dyn DynamicSelection> = match algorithm {
        SelectionAlgorithm::MultiLabelKnn => Box::new(MultiLabelSelector::with_config(
            Box::new(MlKnn::default()),
            MultiLabelSelectorConfig {
                threshold: multilabel_threshold,
                combiner: Arc::new(MajorityVote::new()),
            },
        )),
        SelectionAlgorithm::OverallLocalAccuracy => {
            Box::new(OverallLocalAccuracy::new(k_neighbors))
        }
        SelectionAlgorithm::LocalClassAccuracy => Box::new(LocalClassAccuracy::new(k_neighbors)),
        SelectionAlgorithm::DynamicVoting => Box::new(DynamicVoting::new(k_neighbors)),
        SelectionAlgorithm::WeightedKnn => Box::new(WeightedKnnSelection::new(k_neighbors)),
        SelectionAlgorithm::DynamicVotingWithSelection => {
            Box::new(DynamicVotingWithSelection::new(k_neighbors))
        }
        SelectionAlgorithm::KnoraEliminate => Box::new(KnoraEliminate::new(k_neighbors)),
        SelectionAlgorithm::McbBased => {
            Box::new(McbBased::new(k_neighbors, DEFAULT_SIMILARITY_THRESHOLD))
        }
        SelectionAlgorithm::MajorityVote => Box::new(StaticMajorityVote::new()),
    };
    selector.set_classifiers(pool);
    selector.build_selector(validation)?;
    Ok(selector)
}

/// Trains the reference pool: majority class, Gaussian naive Bayes, and a
/// kNN grid over k in {1, 3, 5, 7}, plain and distance-weighted.
pub fn build_initial_pool(train: &Dataset) -> Result<ClassifierPool, SelectionError> {
    let mut members: Vec<ClassifierRef> = Vec::new();

    let mut majority = MajorityClass::new();
    majority.train(train)?;
    members.push(Arc::new(majority));

    let mut bayes = GaussianNaiveBayes::new();
    bayes.train(train)?;
    members.push(Arc::new(bayes));

    for k in [1, 3, 5, 7] {
        for distance_weighted in [false, true] {
            let mut knn = KnnClassifier::new(k, distance_weighted);
            knn.train(train)?;
            members.push(Arc::new(knn));
        }
    }

    Ok(ClassifierPool::new(members))
}
