use crate::tasks::SelectionAlgorithm;
use crate::ui::cli::wizard::prompt_choice;
use crate::ui::types::choices::{SelectorChoice, UIChoice};
use schemars::{JsonSchema, Schema, schema_for};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumDiscriminants, EnumIter, EnumMessage, EnumString, IntoStaticStr};

fn default_folds() -> usize {
    10
}

fn default_outer_seed() -> u64 {
    100
}

fn default_inner_seed() -> u64 {
    400
}

fn default_k_neighbors() -> usize {
    crate::selection::DEFAULT_K_NEIGHBORS
}

fn default_multilabel_threshold() -> Option<f64> {
    Some(0.7)
}

fn default_algorithms() -> Vec<SelectionAlgorithm> {
    SelectionAlgorithm::iter().collect()
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CompareParams {
    #[schemars(
        title = "ARFF Path",
        description = "An .arff file, or a directory holding the files to compare on",
        extend("x-file" = true)
    )]
    pub path: String,

    #[serde(default)]
    #[schemars(
        title = "Class Index",
        description = "Zero-based class column; empty means the last attribute"
    )]
    pub class_index: Option<usize>,

    #[serde(default = "default_folds")]
    #[schemars(
        title = "Folds",
        description = "Outer cross-validation folds; also sets the train/validation split",
        range(min = 2),
        default = "default_folds"
    )]
    pub folds: usize,

    #[serde(default = "default_outer_seed")]
    #[schemars(
        title = "Outer Seed",
        description = "Shuffle seed of the outer split",
        default = "default_outer_seed"
    )]
    pub outer_seed: u64,

    #[serde(default = "default_inner_seed")]
    #[schemars(
        title = "Inner Seed",
        description = "Shuffle seed of the per-fold train/validation split",
        default = "default_inner_seed"
    )]
    pub inner_seed: u64,

    #[serde(default = "default_k_neighbors")]
    #[schemars(
        title = "Neighborhood Size",
        description = "Validation neighbors per query, for every strategy",
        range(min = 1),
        default = "default_k_neighbors"
    )]
    pub k_neighbors: usize,

    #[serde(default = "default_multilabel_threshold")]
    #[schemars(
        title = "Competence Threshold",
        description = "Multi-label posterior cut-off; empty keeps the learner's bipartition"
    )]
    pub multilabel_threshold: Option<f64>,

    #[serde(default)]
    #[schemars(
        title = "Report Path",
        description = "Where to write the CSV; empty picks a timestamped name"
    )]
    pub report_path: String,

    #[serde(default = "default_algorithms")]
    #[schemars(skip)]
    pub algorithms: Vec<SelectionAlgorithm>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EvaluateParams {
    #[schemars(skip)]
    pub selector: SelectorChoice,

    #[schemars(
        title = "ARFF Path",
        description = "The .arff file to evaluate on",
        extend("x-file" = true)
    )]
    pub path: String,

    #[serde(default)]
    #[schemars(
        title = "Class Index",
        description = "Zero-based class column; empty means the last attribute"
    )]
    pub class_index: Option<usize>,

    #[serde(default = "default_folds")]
    #[schemars(
        title = "Folds",
        description = "Split granularity; the first fold becomes the test set",
        range(min = 2),
        default = "default_folds"
    )]
    pub folds: usize,

    #[serde(default = "default_outer_seed")]
    #[schemars(
        title = "Outer Seed",
        description = "Shuffle seed of the test split",
        default = "default_outer_seed"
    )]
    pub outer_seed: u64,

    #[serde(default = "default_inner_seed")]
    #[schemars(
        title = "Inner Seed",
        description = "Shuffle seed of the train/validation split",
        default = "default_inner_seed"
    )]
    pub inner_seed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, EnumDiscriminants)]
#[serde(tag = "type", content = "params", rename_all = "kebab-case")]
#[strum_discriminants(name(TaskKind))]
#[strum_discriminants(derive(EnumIter, EnumString, Display, IntoStaticStr, EnumMessage))]
#[strum_discriminants(strum(serialize_all = "kebab-case"))]
pub enum TaskChoice {
    #[strum_discriminants(strum(
        message = "Compare Selectors",
        detailed_message = "Cross-validate the chosen algorithms over one or more ARFF files."
    ))]
    CompareSelectors(CompareParams),

    #[strum_discriminants(strum(
        message = "Evaluate Selector",
        detailed_message = "Score a single configured selector on one ARFF file."
    ))]
    EvaluateSelector(EvaluateParams),
}

impl UIChoice for TaskChoice {
    type Kind = TaskKind;

    fn schema() -> Schema {
        schema_for!(TaskChoice)
    }

    fn prompt_label() -> &'static str {
        "Choose a task:"
    }

    fn default_params(kind: Self::Kind) -> Value {
        match kind {
            TaskKind::CompareSelectors => json!({
                "path": "",
                "class_index": null,
                "folds": default_folds(),
                "outer_seed": default_outer_seed(),
                "inner_seed": default_inner_seed(),
                "k_neighbors": default_k_neighbors(),
                "multilabel_threshold": default_multilabel_threshold(),
                "report_path": "",
            }),
            TaskKind::EvaluateSelector => json!({
                "path": "",
                "class_index": null,
                "folds": default_folds(),
                "outer_seed": default_outer_seed(),
                "inner_seed": default_inner_seed(),
            }),
        }
    }

    fn subprompts<D: crate::ui::cli::drivers::PromptDriver>(
        driver: &D,
        kind: Self::Kind,
    ) -> anyhow::Result<Option<Map<String, Value>>> {
        match kind {
            TaskKind::CompareSelectors => {
                let options: Vec<String> = SelectionAlgorithm::iter()
                    .map(|a| format!("{}  {}", a.label(), a.description()))
                    .collect();
                let picked = driver.ask_multi_select(
                    "Algorithms to compare:",
                    "space to toggle, ↵ to confirm",
                    &options,
                )?;
                let algorithms: Vec<SelectionAlgorithm> = SelectionAlgorithm::iter()
                    .enumerate()
                    .filter(|(index, _)| picked.contains(index))
                    .map(|(_, algorithm)| algorithm)
                    .collect();

                let mut m = Map::new();
                m.insert("algorithms".into(), serde_json::to_value(algorithms)?);
                Ok(Some(m))
            }
            TaskKind::EvaluateSelector => {
                let selector = prompt_choice::<SelectorChoice, _>(driver)?;

                let mut m = Map::new();
                m.insert("selector".into(), serde_json::to_value(selector)?);
                Ok(Some(m))
            }
        }
    }
}
