use crate::classifiers::ClassifierRef;
use crate::combination::combiner::Combiner;
use crate::core::instances::Instance;
use crate::selection::SelectionError;
use crate::utils::math::max_index;

/// Weight-adjusted fusion of member distributions.
///
/// Supplied weights must be non-negative. Each is shifted by one before
/// use, so a zero weight still casts a unit vote, and members beyond the
/// weight vector count exactly 1.0. With a nominal class, member
/// distributions are summed under these weights and normalized; with a
/// numeric class the result is the weighted mean prediction.
#[derive(Default)]
pub struct WeightedVote;

impl WeightedVote {
    pub fn new() -> Self {
        WeightedVote
    }
}

fn effective_weights(
    member_count: usize,
    weights: Option<&[f64]>,
) -> Result<Vec<f64>, SelectionError> {
    let supplied = weights.unwrap_or(&[]);
    let mut effective = Vec::with_capacity(member_count);
    for index in 0..member_count {
        match supplied.get(index) {
            Some(&weight) if weight < 0.0 => {
                return Err(SelectionError::InvalidArgument(format!(
                    "negative combination weight {weight}"
                )));
            }
            Some(&weight) => effective.push(1.0 + weight),
            None => effective.push(1.0),
        }
    }
    Ok(effective)
}

impl Combiner for WeightedVote {
    fn label(
        &self,
        members: &[ClassifierRef],
        weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<f64, SelectionError> {
        let scores = self.distribution(members, weights, instance)?;
        if instance.number_of_classes() == 0 {
            return Ok(scores[0]);
        }
        match max_index(&scores) {
            Some(index) => Ok(index as f64),
            None => Err(SelectionError::InvalidArgument(
                "no usable votes".into(),
            )),
        }
    }

    fn distribution(
        &self,
        members: &[ClassifierRef],
        weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError> {
        if members.is_empty() {
            return Err(SelectionError::EmptyEnsemble(
                "no classifiers to combine".into(),
            ));
        }
        let effective = effective_weights(members.len(), weights)?;
        let num_classes = instance.number_of_classes();

        if num_classes == 0 {
            // numeric target: weighted mean of the member predictions
            let mut value_sum = 0.0;
            let mut weight_sum = 0.0;
            for (member, weight) in members.iter().zip(&effective) {
                value_sum += weight * member.classify(instance)?;
                weight_sum += weight;
            }
            let mean = if weight_sum > 0.0 {
                value_sum / weight_sum
            } else {
                f64::NAN
            };
            return Ok(vec![mean]);
        }

        let mut combined = vec![0.0; num_classes];
        for (member, weight) in members.iter().zip(&effective) {
            let scores = member.distribution(instance)?;
            for (class, score) in scores.iter().take(num_classes).enumerate() {
                combined[class] += weight * score;
            }
        }

        let total: f64 = combined.iter().sum();
        if total > 0.0 {
            for score in &mut combined {
                *score /= total;
            }
        }
        Ok(combined)
    }
}
