use std::sync::Arc;

use crate::core::dataset::Dataset;
use crate::core::instances::{Instance, InstanceRef};
use crate::core::neighbors::KdTree;
use crate::selection::error::SelectionError;

/// One validation instance returned by a neighborhood query.
pub struct Neighbor {
    pub instance: InstanceRef,
    pub distance: f64,
}

/// Result of a neighborhood query: nearest first, distance ties broken by
/// the validation set's insertion order.
pub struct Neighborhood {
    neighbors: Vec<Neighbor>,
}

impl Neighborhood {
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Neighbor> {
        self.neighbors.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Neighbor> {
        self.neighbors.iter()
    }
}

impl<'a> IntoIterator for &'a Neighborhood {
    type Item = &'a Neighbor;
    type IntoIter = std::slice::Iter<'a, Neighbor>;

    fn into_iter(self) -> Self::IntoIter {
        self.neighbors.iter()
    }
}

/// Nearest-neighbor index over a validation set's feature vectors, built
/// once per validation set and queried read-only afterwards.
///
/// The class column is excluded from the indexed vectors; distances follow
/// the kd-tree's missing-value rule.
pub struct CompetenceIndex {
    instances: Vec<InstanceRef>,
    tree: KdTree,
}

impl CompetenceIndex {
    /// Indexes `validation`. Fails when it is empty or when any instance
    /// is missing its class label, since competence cannot be judged
    /// against an unlabeled reference point.
    pub fn build(validation: &Dataset) -> Result<CompetenceIndex, SelectionError> {
        if validation.is_empty() {
            return Err(SelectionError::Configuration(
                "validation set is empty".into(),
            ));
        }
        for instance in validation.iter() {
            if instance.is_class_missing() {
                return Err(SelectionError::Configuration(
                    "validation set contains instances without a class label".into(),
                ));
            }
        }

        let points = validation
            .iter()
            .map(|instance| instance.feature_vector())
            .collect();
        Ok(CompetenceIndex {
            instances: validation.iter().cloned().collect(),
            tree: KdTree::build(points),
        })
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// The up-to-`k` validation instances nearest to `instance`.
    pub fn query(&self, instance: &dyn Instance, k: usize) -> Neighborhood {
        let query = instance.feature_vector();
        let neighbors = self
            .tree
            .nearest(&query, k)
            .into_iter()
            .map(|(index, distance)| Neighbor {
                instance: Arc::clone(&self.instances[index]),
                distance,
            })
            .collect();
        Neighborhood { neighbors }
    }
}
