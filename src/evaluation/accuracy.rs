use crate::core::dataset::Dataset;
use crate::selection::{DynamicSelection, SelectionError};
use crate::utils::labels::label_equals;

/// Fraction of `test` instances the built selector labels correctly.
/// Instances without a class label are skipped; when none are labeled the
/// accuracy is undefined (NaN).
pub fn evaluate_accuracy(
    selector: &dyn DynamicSelection,
    test: &Dataset,
) -> Result<f64, SelectionError> {
    let mut labeled = 0usize;
    let mut agree = 0usize;

    for instance in test.iter() {
        if instance.is_class_missing() {
            continue;
        }
        let Some(actual) = instance.class_value() else {
            continue;
        };

        labeled += 1;
        let predicted = selector.classify_instance(instance.as_ref())?;
        if label_equals(predicted, actual) {
            agree += 1;
        }
    }

    if labeled == 0 {
        return Ok(f64::NAN);
    }
    Ok(agree as f64 / labeled as f64)
}
