use std::io::{Error, ErrorKind};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::core::instance_header::InstanceHeader;
use crate::core::instances::InstanceRef;

/// Ordered, in-memory collection of instances sharing one header.
///
/// Folding follows the usual cross-validation arithmetic: the first
/// `len % folds` folds get one extra instance, and `cv_train`/`cv_test`
/// of the same fold partition the dataset.
pub struct Dataset {
    header: Arc<InstanceHeader>,
    instances: Vec<InstanceRef>,
}

// Instances are trait objects without a `Debug` bound, so derive is not an
// option; report the shape of the dataset instead.
impl std::fmt::Debug for Dataset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dataset")
            .field("relation_name", &self.header.relation_name())
            .field("instances", &self.instances.len())
            .finish_non_exhaustive()
    }
}

impl Dataset {
    pub fn new(header: Arc<InstanceHeader>) -> Dataset {
        Dataset {
            header,
            instances: Vec::new(),
        }
    }

    pub fn with_instances(header: Arc<InstanceHeader>, instances: Vec<InstanceRef>) -> Dataset {
        Dataset { header, instances }
    }

    pub fn header(&self) -> &Arc<InstanceHeader> {
        &self.header
    }

    pub fn push(&mut self, instance: InstanceRef) {
        self.instances.push(instance);
    }

    pub fn get(&self, index: usize) -> Option<&InstanceRef> {
        self.instances.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InstanceRef> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn class_index(&self) -> usize {
        self.header.class_index()
    }

    pub fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    /// Copy of this dataset with its instances shuffled by a seeded
    /// generator. The same seed always yields the same order.
    pub fn shuffled(&self, seed: u64) -> Dataset {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut instances = self.instances.clone();
        instances.shuffle(&mut rng);
        Dataset {
            header: Arc::clone(&self.header),
            instances,
        }
    }

    /// Copy of this dataset reordered so every run of `num_folds`
    /// consecutive instances spans the class labels. Instances with a
    /// missing class go last.
    pub fn stratified(&self, num_folds: usize) -> Result<Dataset, Error> {
        if num_folds < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "stratification needs at least 2 folds",
            ));
        }
        let num_classes = self.header.number_of_classes();
        if num_classes == 0 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "stratification needs a nominal class attribute",
            ));
        }

        // group by class label, keeping the incoming order within each group
        let mut groups: Vec<Vec<InstanceRef>> = vec![Vec::new(); num_classes + 1];
        for instance in &self.instances {
            let group = match instance.class_value() {
                Some(value) if value >= 0.0 && (value.round() as usize) < num_classes => {
                    value.round() as usize
                }
                _ => num_classes,
            };
            groups[group].push(Arc::clone(instance));
        }
        let grouped: Vec<InstanceRef> = groups.into_iter().flatten().collect();

        // deal round-robin so each contiguous fold mixes the classes
        let mut instances = Vec::with_capacity(grouped.len());
        for start in 0..num_folds {
            let mut index = start;
            while index < grouped.len() {
                instances.push(Arc::clone(&grouped[index]));
                index += num_folds;
            }
        }
        Ok(Dataset {
            header: Arc::clone(&self.header),
            instances,
        })
    }

    /// Training split for one cross-validation fold: everything except the
    /// fold's test segment, in order.
    pub fn cv_train(&self, num_folds: usize, fold: usize) -> Result<Dataset, Error> {
        let (first, size) = self.fold_segment(num_folds, fold)?;
        let mut instances = Vec::with_capacity(self.instances.len() - size);
        instances.extend(self.instances[..first].iter().cloned());
        instances.extend(self.instances[first + size..].iter().cloned());
        Ok(Dataset {
            header: Arc::clone(&self.header),
            instances,
        })
    }

    /// Test split for one cross-validation fold.
    pub fn cv_test(&self, num_folds: usize, fold: usize) -> Result<Dataset, Error> {
        let (first, size) = self.fold_segment(num_folds, fold)?;
        Ok(Dataset {
            header: Arc::clone(&self.header),
            instances: self.instances[first..first + size].to_vec(),
        })
    }

    fn fold_segment(&self, num_folds: usize, fold: usize) -> Result<(usize, usize), Error> {
        if num_folds < 2 {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "cross-validation needs at least 2 folds",
            ));
        }
        if num_folds > self.instances.len() {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "cannot split into more folds than instances",
            ));
        }
        if fold >= num_folds {
            return Err(Error::new(ErrorKind::InvalidInput, "fold index out of range"));
        }

        let count = self.instances.len();
        let mut size = count / num_folds;
        let offset;
        if fold < count % num_folds {
            size += 1;
            offset = fold;
        } else {
            offset = count % num_folds;
        }
        Ok((fold * (count / num_folds) + offset, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::dummies::{dataset_from_rows, header_two_features};

    fn labeled_rows(count: usize, label: f64) -> Vec<Vec<f64>> {
        (0..count)
            .map(|i| vec![i as f64, label * 10.0, label])
            .collect()
    }

    fn class_counts(dataset: &Dataset) -> Vec<usize> {
        let mut counts = vec![0; dataset.number_of_classes()];
        for instance in dataset.iter() {
            counts[instance.class_value().unwrap() as usize] += 1;
        }
        counts
    }

    #[test]
    fn fold_segments_partition_the_dataset() {
        let header = header_two_features(2);
        let rows = labeled_rows(10, 0.0);
        let dataset = dataset_from_rows(&header, &rows);

        let mut test_sizes = Vec::new();
        for fold in 0..3 {
            let train = dataset.cv_train(3, fold).unwrap();
            let test = dataset.cv_test(3, fold).unwrap();
            assert_eq!(train.len() + test.len(), dataset.len());
            test_sizes.push(test.len());
        }
        assert_eq!(test_sizes, vec![4, 3, 3]);
    }

    #[test]
    fn fold_arguments_are_validated() {
        let header = header_two_features(2);
        let dataset = dataset_from_rows(&header, &labeled_rows(4, 0.0));

        assert!(dataset.cv_train(1, 0).is_err());
        assert!(dataset.cv_test(5, 0).is_err());
        assert!(dataset.cv_test(2, 2).is_err());
    }

    #[test]
    fn stratified_folds_balance_the_classes() {
        let header = header_two_features(2);
        let mut rows = labeled_rows(6, 0.0);
        rows.extend(labeled_rows(6, 1.0));
        let dataset = dataset_from_rows(&header, &rows);

        let stratified = dataset.stratified(3).unwrap();
        assert_eq!(stratified.len(), 12);
        for fold in 0..3 {
            let test = stratified.cv_test(3, fold).unwrap();
            assert_eq!(class_counts(&test), vec![2, 2]);
        }
    }

    #[test]
    fn stratification_requires_a_nominal_class() {
        let header = header_two_features(0);
        let dataset = dataset_from_rows(&header, &[vec![0.0, 0.0, 1.5]]);

        assert!(dataset.stratified(2).is_err());
    }

    #[test]
    fn shuffling_is_deterministic_per_seed() {
        let header = header_two_features(2);
        let dataset = dataset_from_rows(&header, &labeled_rows(20, 0.0));

        let first = dataset.shuffled(100);
        let second = dataset.shuffled(100);
        let other = dataset.shuffled(101);

        let order = |d: &Dataset| -> Vec<f64> {
            d.iter().map(|i| i.value_at_index(0).unwrap()).collect()
        };
        assert_eq!(order(&first), order(&second));
        assert_ne!(order(&first), order(&other));

        let mut sorted = order(&first);
        sorted.sort_by(f64::total_cmp);
        assert_eq!(sorted, order(&dataset));
    }
}
