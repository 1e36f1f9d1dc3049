use std::fmt;
use std::sync::mpsc::Sender;
use std::time::Instant;

use crate::core::dataset::Dataset;
use crate::evaluation::evaluate_accuracy;
use crate::selection::SelectionError;
use crate::tasks::{build_initial_pool, build_selector, SelectionAlgorithm};
use crate::utils::statistics::{mean, two_sided_p_value, variance, welch_z};
use crate::utils::system::current_rss_gb;

/// Knobs shared by the comparison and single-run tasks.
#[derive(Clone, Copy, Debug)]
pub struct ComparisonConfig {
    /// Folds of the outer cross-validation; also splits train from
    /// validation inside each fold.
    pub folds: usize,
    /// Shuffle seed for the outer split.
    pub outer_seed: u64,
    /// Shuffle seed for the per-fold train/validation split.
    pub inner_seed: u64,
    /// Neighborhood size handed to every nearest-neighbor strategy.
    pub k_neighbors: usize,
    /// Competence cut-off for the multi-label selector; `None` keeps the
    /// learner's own bipartition.
    pub multilabel_threshold: Option<f64>,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        ComparisonConfig {
            folds: 10,
            outer_seed: 100,
            inner_seed: 400,
            k_neighbors: 10,
            multilabel_threshold: Some(0.7),
        }
    }
}

/// One finished (fold, algorithm) cell, streamed while the task runs.
#[derive(Clone, Debug)]
pub struct FoldProgress {
    pub dataset: String,
    pub algorithm: SelectionAlgorithm,
    pub fold: usize,
    pub folds: usize,
    pub accuracy: f64,
    pub seconds: f64,
}

impl fmt::Display for FoldProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} fold {}/{} {} accuracy {:.4} ({:.2}s)",
            self.dataset, self.fold, self.folds, self.algorithm, self.accuracy, self.seconds
        )
    }
}

/// Per-algorithm outcome over all folds of one dataset.
#[derive(Clone, Debug)]
pub struct AlgorithmSummary {
    pub algorithm: SelectionAlgorithm,
    pub fold_accuracies: Vec<f64>,
    pub mean: f64,
    pub std_dev: f64,
    /// Two-sided Welch z p-value against the static-majority-vote
    /// baseline; `None` for the baseline itself or when it did not run.
    pub p_value_vs_baseline: Option<f64>,
}

/// Everything the comparison produced for one dataset.
#[derive(Clone, Debug)]
pub struct DatasetReport {
    pub dataset: String,
    pub pool_size: usize,
    pub summaries: Vec<AlgorithmSummary>,
    pub ram_hours: f64,
    pub seconds: f64,
}

/// Cross-validated comparison of selection algorithms on one dataset.
///
/// The outer split is a seeded, stratified k-fold; inside each fold the
/// training part is split once more (same fold count, its own seed) into
/// the pool's training set and the selectors' validation set. Every
/// configured algorithm is then built on that validation set and scored
/// on the fold's untouched test part.
pub struct ComparisonExperiment {
    algorithms: Vec<SelectionAlgorithm>,
    config: ComparisonConfig,
    progress_tx: Option<Sender<FoldProgress>>,
}

impl ComparisonExperiment {
    pub fn new(
        algorithms: Vec<SelectionAlgorithm>,
        config: ComparisonConfig,
    ) -> Result<Self, SelectionError> {
        if algorithms.is_empty() {
            return Err(SelectionError::InvalidArgument(
                "no algorithms selected".into(),
            ));
        }
        if config.folds < 2 {
            return Err(SelectionError::InvalidArgument(
                "cross-validation needs at least 2 folds".into(),
            ));
        }
        if config.k_neighbors == 0 {
            return Err(SelectionError::InvalidArgument(
                "k_neighbors must be at least 1".into(),
            ));
        }
        Ok(ComparisonExperiment {
            algorithms,
            config,
            progress_tx: None,
        })
    }

    pub fn with_progress(mut self, tx: Sender<FoldProgress>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn algorithms(&self) -> &[SelectionAlgorithm] {
        &self.algorithms
    }

    pub fn run(&self, dataset: &Dataset, name: &str) -> Result<DatasetReport, SelectionError> {
        let start = Instant::now();
        let mut last_mem_sample = start;
        let mut ram_hours = 0.0;

        let folds = self.config.folds;
        let stratified = dataset
            .shuffled(self.config.outer_seed)
            .stratified(folds)
            .map_err(invalid)?;

        let mut fold_accuracies: Vec<Vec<f64>> =
            vec![Vec::with_capacity(folds); self.algorithms.len()];
        let mut pool_size = 0;

        for fold in 0..folds {
            let train_validation = stratified.cv_train(folds, fold).map_err(invalid)?;
            let test = stratified.cv_test(folds, fold).map_err(invalid)?;

            let inner = train_validation
                .shuffled(self.config.inner_seed)
                .stratified(folds)
                .map_err(invalid)?;
            let train = inner.cv_train(folds, 0).map_err(invalid)?;
            let validation = inner.cv_test(folds, 0).map_err(invalid)?;

            let pool = build_initial_pool(&train)?;
            pool_size = pool.len();

            for (slot, &algorithm) in self.algorithms.iter().enumerate() {
                let cell_start = Instant::now();
                let selector = build_selector(
                    algorithm,
                    pool.clone(),
                    &validation,
                    self.config.k_neighbors,
                    self.config.multilabel_threshold,
                )?;
                let accuracy = evaluate_accuracy(selector.as_ref(), &test)?;
                fold_accuracies[slot].push(accuracy);

                bump_ram_hours(&mut ram_hours, &mut last_mem_sample);
                if let Some(tx) = &self.progress_tx {
                    let _ = tx.send(FoldProgress {
                        dataset: name.to_string(),
                        algorithm,
                        fold: fold + 1,
                        folds,
                        accuracy,
                        seconds: cell_start.elapsed().as_secs_f64(),
                    });
                }
            }
        }

        let baseline = self
            .algorithms
            .iter()
            .position(|&a| a == SelectionAlgorithm::MajorityVote)
            .map(|slot| fold_accuracies[slot].clone());

        let summaries = self
            .algorithms
            .iter()
            .zip(fold_accuracies)
            .map(|(&algorithm, accuracies)| summarize(algorithm, accuracies, baseline.as_deref()))
            .collect();

        Ok(DatasetReport {
            dataset: name.to_string(),
            pool_size,
            summaries,
            ram_hours,
            seconds: start.elapsed().as_secs_f64(),
        })
    }
}

fn summarize(
    algorithm: SelectionAlgorithm,
    fold_accuracies: Vec<f64>,
    baseline: Option<&[f64]>,
) -> AlgorithmSummary {
    let mean_accuracy = mean(&fold_accuracies);
    let accuracy_variance = variance(&fold_accuracies);

    let p_value_vs_baseline = match baseline {
        Some(reference) if algorithm != SelectionAlgorithm::MajorityVote => {
            let z = welch_z(
                mean_accuracy,
                accuracy_variance,
                fold_accuracies.len(),
                mean(reference),
                variance(reference),
                reference.len(),
            );
            Some(two_sided_p_value(z))
        }
        _ => None,
    };

    AlgorithmSummary {
        algorithm,
        mean: mean_accuracy,
        std_dev: accuracy_variance.sqrt(),
        p_value_vs_baseline,
        fold_accuracies,
    }
}

pub(super) fn invalid(error: std::io::Error) -> SelectionError {
    SelectionError::InvalidArgument(error.to_string())
}

fn bump_ram_hours(ram_hours: &mut f64, last_sample: &mut Instant) {
    let now = Instant::now();
    let hours = (now - *last_sample).as_secs_f64() / 3600.0;
    *last_sample = now;
    *ram_hours += current_rss_gb().unwrap_or(0.0) * hours;
}
