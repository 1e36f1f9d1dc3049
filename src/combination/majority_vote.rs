use crate::classifiers::ClassifierRef;
use crate::combination::combiner::Combiner;
use crate::core::instances::Instance;
use crate::selection::SelectionError;
use crate::utils::labels::label_equals;

/// Plain modal vote: the label predicted by the most members wins, ties
/// going to the label that was voted first in member order.
///
/// Weights are ignored; pair the pool with [`WeightedVote`] when they
/// should count.
///
/// [`WeightedVote`]: crate::combination::WeightedVote
#[derive(Default)]
pub struct MajorityVote;

impl MajorityVote {
    pub fn new() -> Self {
        MajorityVote
    }
}

impl Combiner for MajorityVote {
    fn label(
        &self,
        members: &[ClassifierRef],
        _weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<f64, SelectionError> {
        if members.is_empty() {
            return Err(SelectionError::EmptyEnsemble(
                "no classifiers to combine".into(),
            ));
        }

        // tallies keep first-encountered order, so ties resolve to the
        // earliest voted label
        let mut tallies: Vec<(f64, usize)> = Vec::new();
        for member in members {
            let label = member.classify(instance)?;
            match tallies
                .iter_mut()
                .find(|(seen, _)| label_equals(*seen, label))
            {
                Some((_, count)) => *count += 1,
                None => tallies.push((label, 1)),
            }
        }

        let mut best = 0;
        for (index, &(_, count)) in tallies.iter().enumerate() {
            if count > tallies[best].1 {
                best = index;
            }
        }
        Ok(tallies[best].0)
    }

    fn distribution(
        &self,
        members: &[ClassifierRef],
        _weights: Option<&[f64]>,
        instance: &dyn Instance,
    ) -> Result<Vec<f64>, SelectionError> {
        if members.is_empty() {
            return Err(SelectionError::EmptyEnsemble(
                "no classifiers to combine".into(),
            ));
        }
        let num_classes = instance.number_of_classes();
        if num_classes == 0 {
            return Err(SelectionError::InvalidArgument(
                "majority vote needs a nominal class".into(),
            ));
        }

        let mut votes = vec![0.0; num_classes];
        for member in members {
            let label = member.classify(instance)?;
            let index = label.round() as usize;
            if label < -0.5 || index >= num_classes {
                return Err(SelectionError::InvalidArgument(format!(
                    "vote {label} outside the class range"
                )));
            }
            votes[index] += 1.0;
        }

        let total: f64 = votes.iter().sum();
        if total > 0.0 {
            for vote in &mut votes {
                *vote /= total;
            }
        }
        Ok(votes)
    }
}
