use crate::selection::DEFAULT_K_NEIGHBORS;
use crate::selection::dcs::DEFAULT_SIMILARITY_THRESHOLD;
use crate::tasks::SelectionAlgorithm;
use crate::ui::types::choices::UIChoice;
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_k_neighbors() -> usize {
    DEFAULT_K_NEIGHBORS
}

fn default_similarity_threshold() -> f64 {
    DEFAULT_SIMILARITY_THRESHOLD
}

fn default_smoothing() -> f64 {
    1.0
}

fn default_competence_threshold() -> Option<f64> {
    Some(0.7)
}

/// Params shared by every plain nearest-neighbor strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct NeighborhoodParams {
    #[serde(default = "default_k_neighbors")]
    #[schemars(
        title = "Neighborhood Size",
        description = "Validation neighbors consulted per query",
        range(min = 1),
        default = "default_k_neighbors"
    )]
    pub k_neighbors: usize,
}

impl Default for NeighborhoodParams {
    fn default() -> Self {
        NeighborhoodParams {
            k_neighbors: DEFAULT_K_NEIGHBORS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct McbParams {
    #[serde(default = "default_k_neighbors")]
    #[schemars(
        title = "Neighborhood Size",
        description = "Validation neighbors consulted per query",
        range(min = 1),
        default = "default_k_neighbors"
    )]
    pub k_neighbors: usize,

    #[serde(default = "default_similarity_threshold")]
    #[schemars(
        title = "Similarity Threshold",
        description = "Keep neighbors whose pool behavior agrees more than this",
        range(min = 0.0, max = 1.0),
        default = "default_similarity_threshold"
    )]
    pub similarity_threshold: f64,
}

impl Default for McbParams {
    fn default() -> Self {
        McbParams {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MultiLabelParams {
    #[serde(default = "default_k_neighbors")]
    #[schemars(
        title = "Neighborhood Size",
        description = "Competence-table neighbors consulted per query",
        range(min = 1),
        default = "default_k_neighbors"
    )]
    pub k_neighbors: usize,

    #[serde(default = "default_smoothing")]
    #[schemars(
        title = "Smoothing",
        description = "Laplace smoothing of the prior and likelihood counts",
        range(min = 0.0),
        default = "default_smoothing"
    )]
    pub smoothing: f64,

    #[serde(default = "default_competence_threshold")]
    #[schemars(
        title = "Competence Threshold",
        description = "Posterior cut-off for joining the ensemble; empty keeps the learner's own bipartition"
    )]
    pub threshold: Option<f64>,
}

impl Default for MultiLabelParams {
    fn default() -> Self {
        MultiLabelParams {
            k_neighbors: DEFAULT_K_NEIGHBORS,
            smoothing: 1.0,
            threshold: Some(0.7),
        }
    }
}

/// Empty params object so the wizard still finds a `params` branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct NoSelectorParams {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(SelectorKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum SelectorChoice {
    #[strum_discriminants(strum(
        message = "Multi-label kNN",
        detailed_message = "Learns per-member competence with a multi-label kNN model."
    ))]
    MultiLabelKnn(MultiLabelParams),

    #[strum_discriminants(strum(
        message = "Overall Local Accuracy",
        detailed_message = "Picks the most correct classifier in the query's neighborhood."
    ))]
    OverallLocalAccuracy(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "Local Class Accuracy",
        detailed_message = "Judges each member on the neighbors of the class it predicts."
    ))]
    LocalClassAccuracy(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "Dynamic Voting",
        detailed_message = "The whole pool votes, weighted by local competence."
    ))]
    DynamicVoting(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "Weighted kNN Selection",
        detailed_message = "Picks the member with the lowest distance-weighted error."
    ))]
    WeightedKnn(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "Dynamic Voting with Selection",
        detailed_message = "The better half of the pool votes with renormalized weights."
    ))]
    DynamicVotingWithSelection(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "KNORA-Eliminate",
        detailed_message = "Members flawless on the (shrinking) neighborhood vote."
    ))]
    KnoraEliminate(NeighborhoodParams),

    #[strum_discriminants(strum(
        message = "Multiple Classifier Behavior",
        detailed_message = "Filters the neighborhood by pool-behavior similarity first."
    ))]
    McbBased(McbParams),

    #[strum_discriminants(strum(
        message = "Majority Vote",
        detailed_message = "No selection; the whole pool votes every time."
    ))]
    MajorityVote(NoSelectorParams),
}

impl SelectorChoice {
    /// The comparison column this choice corresponds to.
    pub fn algorithm(&self) -> SelectionAlgorithm {
        match self {
            SelectorChoice::MultiLabelKnn(_) => SelectionAlgorithm::MultiLabelKnn,
            SelectorChoice::OverallLocalAccuracy(_) => SelectionAlgorithm::OverallLocalAccuracy,
            SelectorChoice::LocalClassAccuracy(_) => SelectionAlgorithm::LocalClassAccuracy,
            SelectorChoice::DynamicVoting(_) => SelectionAlgorithm::DynamicVoting,
            SelectorChoice::WeightedKnn(_) => SelectionAlgorithm::WeightedKnn,
            SelectorChoice::DynamicVotingWithSelection(_) => {
                SelectionAlgorithm::DynamicVotingWithSelection
            }
            SelectorChoice::KnoraEliminate(_) => SelectionAlgorithm::KnoraEliminate,
            SelectorChoice::McbBased(_) => SelectionAlgorithm::McbBased,
            SelectorChoice::MajorityVote(_) => SelectionAlgorithm::MajorityVote,
        }
    }
}

impl UIChoice for SelectorChoice {
    type Kind = SelectorKind;

    fn schema() -> Schema {
        schema_for!(SelectorChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a selector:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            SelectorKind::MultiLabelKnn => {
                serde_json::to_value(MultiLabelParams::default()).unwrap()
            }
            SelectorKind::McbBased => serde_json::to_value(McbParams::default()).unwrap(),
            SelectorKind::MajorityVote => {
                serde_json::to_value(NoSelectorParams::default()).unwrap()
            }
            SelectorKind::OverallLocalAccuracy
            | SelectorKind::LocalClassAccuracy
            | SelectorKind::DynamicVoting
            | SelectorKind::WeightedKnn
            | SelectorKind::DynamicVotingWithSelection
            | SelectorKind::KnoraEliminate => {
                serde_json::to_value(NeighborhoodParams::default()).unwrap()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use strum::{EnumMessage, IntoEnumIterator};

    #[test]
    fn tagged_serialization_uses_kebab_case() {
        let choice = SelectorChoice::KnoraEliminate(NeighborhoodParams { k_neighbors: 5 });
        let v = serde_json::to_value(choice).unwrap();
        assert_eq!(v.get("type").and_then(Value::as_str), Some("knora-eliminate"));
        assert_eq!(
            v.get("params").and_then(|p| p.get("k_neighbors")).and_then(Value::as_u64),
            Some(5)
        );
    }

    #[test]
    fn serde_missing_fields_apply_defaults() {
        let params: McbParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params, McbParams::default());
        assert_eq!(params.similarity_threshold, DEFAULT_SIMILARITY_THRESHOLD);

        let params: MultiLabelParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.threshold, Some(0.7));
    }

    #[test]
    fn default_params_round_trip_through_from_parts() {
        for kind in SelectorKind::iter() {
            let params = <SelectorChoice as UIChoice>::default_params(kind);
            let choice = <SelectorChoice as UIChoice>::from_parts(kind, params).unwrap();
            let key: &'static str = kind.into();
            let v = serde_json::to_value(choice).unwrap();
            assert_eq!(v.get("type").and_then(Value::as_str), Some(key));
        }
    }

    #[test]
    fn every_kind_carries_menu_messages() {
        for kind in SelectorKind::iter() {
            assert!(kind.get_message().is_some());
            assert!(kind.get_detailed_message().is_some());
        }
    }

    #[test]
    fn choices_map_onto_report_columns() {
        let choice = SelectorChoice::McbBased(McbParams::default());
        assert_eq!(choice.algorithm(), SelectionAlgorithm::McbBased);
        assert_eq!(choice.algorithm().label(), "MCB");
    }
}
