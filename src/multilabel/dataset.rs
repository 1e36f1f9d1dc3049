use crate::classifiers::ModelError;

/// Fixed-width training table for multi-label learners: one feature row and
/// one boolean label row per example, with the schema declared up front.
#[derive(Debug)]
pub struct MultiLabelDataset {
    number_of_features: usize,
    number_of_labels: usize,
    features: Vec<Vec<f64>>,
    labels: Vec<Vec<bool>>,
}

impl MultiLabelDataset {
    pub fn new(number_of_features: usize, number_of_labels: usize) -> Self {
        MultiLabelDataset {
            number_of_features,
            number_of_labels,
            features: Vec::new(),
            labels: Vec::new(),
        }
    }

    /// Appends one example. Rows that do not match the declared widths are
    /// rejected.
    pub fn push_row(&mut self, features: Vec<f64>, labels: Vec<bool>) -> Result<(), ModelError> {
        if features.len() != self.number_of_features {
            return Err(ModelError::SchemaMismatch(format!(
                "expected {} features per row, got {}",
                self.number_of_features,
                features.len()
            )));
        }
        if labels.len() != self.number_of_labels {
            return Err(ModelError::SchemaMismatch(format!(
                "expected {} labels per row, got {}",
                self.number_of_labels,
                labels.len()
            )));
        }
        self.features.push(features);
        self.labels.push(labels);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn number_of_features(&self) -> usize {
        self.number_of_features
    }

    pub fn number_of_labels(&self) -> usize {
        self.number_of_labels
    }

    pub fn features(&self) -> &[Vec<f64>] {
        &self.features
    }

    pub fn labels(&self) -> &[Vec<bool>] {
        &self.labels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_rows_matching_the_schema() {
        let mut table = MultiLabelDataset::new(2, 3);
        table
            .push_row(vec![0.5, 1.5], vec![true, false, true])
            .unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.features()[0], vec![0.5, 1.5]);
        assert_eq!(table.labels()[0], vec![true, false, true]);
    }

    #[test]
    fn rejects_rows_with_the_wrong_width() {
        let mut table = MultiLabelDataset::new(2, 3);

        let narrow = table.push_row(vec![0.5], vec![true, false, true]);
        assert!(matches!(narrow, Err(ModelError::SchemaMismatch(_))));

        let wide = table.push_row(vec![0.5, 1.5], vec![true]);
        assert!(matches!(wide, Err(ModelError::SchemaMismatch(_))));

        assert!(table.is_empty());
    }
}
