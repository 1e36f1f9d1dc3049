use std::time::Instant;

use crate::core::dataset::Dataset;
use crate::evaluation::evaluate_accuracy;
use crate::selection::{DynamicSelection, SelectionError};
use crate::tasks::build_initial_pool;
use crate::tasks::comparison::invalid;

/// One configured selector on one dataset. The first outer fold supplies
/// the test set, the rest is split into pool training and selector
/// validation with the same proportions the comparison uses.
pub struct SingleRun {
    label: String,
    selector: Box<dyn DynamicSelection>,
    folds: usize,
    outer_seed: u64,
    inner_seed: u64,
}

#[derive(Clone, Debug)]
pub struct SingleRunReport {
    pub label: String,
    pub accuracy: f64,
    pub pool_size: usize,
    pub seconds: f64,
}

impl SingleRun {
    pub fn new(
        label: impl Into<String>,
        selector: Box<dyn DynamicSelection>,
        folds: usize,
        outer_seed: u64,
        inner_seed: u64,
    ) -> Result<Self, SelectionError> {
        if folds < 2 {
            return Err(SelectionError::InvalidArgument(
                "cross-validation needs at least 2 folds".into(),
            ));
        }
        Ok(SingleRun {
            label: label.into(),
            selector,
            folds,
            outer_seed,
            inner_seed,
        })
    }

    pub fn run(&mut self, dataset: &Dataset) -> Result<SingleRunReport, SelectionError> {
        let start = Instant::now();
        let folds = self.folds;

        let stratified = dataset
            .shuffled(self.outer_seed)
            .stratified(folds)
            .map_err(invalid)?;
        let train_validation = stratified.cv_train(folds, 0).map_err(invalid)?;
        let test = stratified.cv_test(folds, 0).map_err(invalid)?;

        let inner = train_validation
            .shuffled(self.inner_seed)
            .stratified(folds)
            .map_err(invalid)?;
        let train = inner.cv_train(folds, 0).map_err(invalid)?;
        let validation = inner.cv_test(folds, 0).map_err(invalid)?;

        let pool = build_initial_pool(&train)?;
        let pool_size = pool.len();
        self.selector.set_classifiers(pool);
        self.selector.build_selector(&validation)?;
        let accuracy = evaluate_accuracy(self.selector.as_ref(), &test)?;

        Ok(SingleRunReport {
            label: self.label.clone(),
            accuracy,
            pool_size,
            seconds: start.elapsed().as_secs_f64(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::des::KnoraEliminate;
    use crate::testing::dummies::{dataset_from_rows, header_two_features};

    fn two_cluster_dataset() -> Dataset {
        let header = header_two_features(2);
        let mut rows = Vec::new();
        for offset in 0..6 {
            let shift = offset as f64 * 0.1;
            rows.push(vec![shift, 0.1 + shift, 0.0]);
            rows.push(vec![5.0 + shift, 5.1 + shift, 1.0]);
        }
        dataset_from_rows(&header, &rows)
    }

    #[test]
    fn ctor_guards() {
        assert!(matches!(
            SingleRun::new("KNORAE", Box::new(KnoraEliminate::new(3)), 1, 100, 400),
            Err(SelectionError::InvalidArgument(_))
        ));
    }

    #[test]
    fn scores_the_held_out_fold() {
        let mut run =
            SingleRun::new("KNORAE", Box::new(KnoraEliminate::new(3)), 2, 100, 400).unwrap();
        let report = run.run(&two_cluster_dataset()).unwrap();

        assert_eq!(report.label, "KNORAE");
        assert_eq!(report.pool_size, 10);
        assert!((0.0..=1.0).contains(&report.accuracy));
    }
}
