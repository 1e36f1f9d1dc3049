use crate::classifiers::classifier::{Classifier, ModelError};
use crate::core::attributes::NominalAttribute;
use crate::core::dataset::Dataset;
use crate::core::estimators::GaussianEstimator;
use crate::core::instances::Instance;

/// Naive Bayes with Gaussian likelihoods for numeric attributes and
/// Laplace-smoothed counts for nominal ones. Missing values are skipped on
/// both sides of training and prediction.
#[derive(Default)]
pub struct GaussianNaiveBayes {
    model: Option<Model>,
}

struct Model {
    class_counts: Vec<f64>,
    likelihoods: Vec<Option<Likelihood>>,
}

enum Likelihood {
    /// One estimator per class.
    Numeric(Vec<GaussianEstimator>),
    /// Counts indexed by `[class][value]`.
    Nominal(Vec<Vec<f64>>),
}

impl GaussianNaiveBayes {
    pub fn new() -> Self {
        GaussianNaiveBayes::default()
    }
}

impl Classifier for GaussianNaiveBayes {
    fn train(&mut self, data: &Dataset) -> Result<(), ModelError> {
        let num_classes = data.number_of_classes();
        if num_classes == 0 {
            return Err(ModelError::InvalidTrainingData(
                "class attribute must be nominal".into(),
            ));
        }
        if data.is_empty() {
            return Err(ModelError::InvalidTrainingData(
                "training set is empty".into(),
            ));
        }

        let header = data.header();
        let class_index = header.class_index();
        let mut likelihoods: Vec<Option<Likelihood>> = Vec::new();
        for index in 0..header.number_of_attributes() {
            if index == class_index {
                likelihoods.push(None);
                continue;
            }
            let attribute = header.attribute_at_index(index).ok_or_else(|| {
                ModelError::InvalidTrainingData("attribute index outside header".into())
            })?;
            match attribute.as_any().downcast_ref::<NominalAttribute>() {
                Some(nominal) => likelihoods.push(Some(Likelihood::Nominal(vec![
                    vec![0.0; nominal.number_of_values()];
                    num_classes
                ]))),
                None => likelihoods.push(Some(Likelihood::Numeric(vec![
                    GaussianEstimator::new();
                    num_classes
                ]))),
            }
        }

        let mut class_counts = vec![0.0; num_classes];
        for instance in data.iter() {
            let Some(label) = instance.class_value() else {
                continue;
            };
            if label.is_nan() {
                continue;
            }
            let class = label.round() as usize;
            if class >= num_classes {
                return Err(ModelError::InvalidTrainingData(format!(
                    "class value {label} outside the declared labels"
                )));
            }
            class_counts[class] += 1.0;

            for (index, slot) in likelihoods.iter_mut().enumerate() {
                let Some(likelihood) = slot else {
                    continue;
                };
                let Some(value) = instance.value_at_index(index) else {
                    continue;
                };
                if value.is_nan() {
                    continue;
                }
                match likelihood {
                    Likelihood::Numeric(estimators) => {
                        estimators[class].add_observation(value, 1.0)
                    }
                    Likelihood::Nominal(counts) => {
                        let value_index = value.round() as usize;
                        if value_index >= counts[class].len() {
                            return Err(ModelError::InvalidTrainingData(format!(
                                "value {value} outside nominal attribute {index}"
                            )));
                        }
                        counts[class][value_index] += 1.0;
                    }
                }
            }
        }

        self.model = Some(Model {
            class_counts,
            likelihoods,
        });
        Ok(())
    }

    fn distribution(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        let model = self.model.as_ref().ok_or(ModelError::Untrained)?;
        let total: f64 = model.class_counts.iter().sum();
        if total <= 0.0 {
            return Ok(vec![0.0; model.class_counts.len()]);
        }

        let mut scores = Vec::with_capacity(model.class_counts.len());
        for class in 0..model.class_counts.len() {
            let mut score = model.class_counts[class] / total;
            for (index, slot) in model.likelihoods.iter().enumerate() {
                let Some(likelihood) = slot else {
                    continue;
                };
                let Some(value) = instance.value_at_index(index) else {
                    return Err(ModelError::SchemaMismatch(format!(
                        "instance has no value at attribute {index}"
                    )));
                };
                if value.is_nan() {
                    continue;
                }
                score *= match likelihood {
                    Likelihood::Numeric(estimators) => {
                        let estimator = &estimators[class];
                        if estimator.total_weight() > 0.0 {
                            estimator.probability_density(value)
                        } else {
                            1.0
                        }
                    }
                    Likelihood::Nominal(counts) => {
                        let class_counts = &counts[class];
                        let value_index = value.round() as usize;
                        if value_index >= class_counts.len() {
                            return Err(ModelError::SchemaMismatch(format!(
                                "nominal value {value} outside attribute {index}"
                            )));
                        }
                        let seen: f64 = class_counts.iter().sum();
                        (class_counts[value_index] + 1.0) / (seen + class_counts.len() as f64)
                    }
                };
            }
            scores.push(score);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }
        Ok(scores)
    }

    fn name(&self) -> String {
        "gaussian-nb".into()
    }
}
