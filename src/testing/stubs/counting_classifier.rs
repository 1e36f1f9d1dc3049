use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::classifiers::{Classifier, ModelError};
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;

/// Fixed-answer member that counts how often it is asked to classify, so
/// tests can see how many times a selector probed the pool.
pub struct CountingClassifier {
    label: f64,
    calls: Arc<AtomicUsize>,
}

/// Reader side of a [`CountingClassifier`]'s call counter.
pub struct CallCount(Arc<AtomicUsize>);

impl CallCount {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl CountingClassifier {
    pub fn new(label: f64) -> (CountingClassifier, CallCount) {
        let calls = Arc::new(AtomicUsize::new(0));
        let classifier = CountingClassifier {
            label,
            calls: Arc::clone(&calls),
        };
        (classifier, CallCount(calls))
    }
}

impl Classifier for CountingClassifier {
    fn train(&mut self, _data: &Dataset) -> Result<(), ModelError> {
        Ok(())
    }

    fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let mut scores = vec![0.0; instance.number_of_classes()];
        if let Some(score) = scores.get_mut(self.label as usize) {
            *score = 1.0;
        }
        Ok(scores)
    }

    fn classify(&self, _instance: &dyn Instance) -> Result<f64, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.label)
    }

    fn name(&self) -> String {
        "counting".into()
    }
}
