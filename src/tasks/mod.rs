mod comparison;
mod report;
mod selection_algorithm;
mod single_run;
mod static_majority_vote;

pub use comparison::{
    AlgorithmSummary, ComparisonConfig, ComparisonExperiment, DatasetReport, FoldProgress,
};
pub use report::ComparisonReport;
pub use selection_algorithm::{build_initial_pool, build_selector, SelectionAlgorithm};
pub use single_run::{SingleRun, SingleRunReport};
pub use static_majority_vote::StaticMajorityVote;
