use crate::classifiers::ClassifierPool;
use crate::core::dataset::Dataset;
use crate::core::instances::Instance;
use crate::selection::competence_index::{CompetenceIndex, Neighborhood};
use crate::selection::error::SelectionError;

/// Pool and neighborhood plumbing shared by the nearest-neighbor
/// selection strategies.
///
/// Strategies embed one of these and delegate their lifecycle to it: set a
/// pool, build against a validation set, then query competence regions.
/// Replacing the pool drops any built index, so a rebuild is required
/// before the next query.
pub struct NearestNeighborsBase {
    pool: ClassifierPool,
    k_neighbors: usize,
    index: Option<CompetenceIndex>,
}

impl NearestNeighborsBase {
    pub fn new(k_neighbors: usize) -> Self {
        NearestNeighborsBase {
            pool: ClassifierPool::default(),
            k_neighbors,
            index: None,
        }
    }

    pub fn k_neighbors(&self) -> usize {
        self.k_neighbors
    }

    pub fn classifiers(&self) -> &ClassifierPool {
        &self.pool
    }

    pub fn set_classifiers(&mut self, pool: ClassifierPool) {
        self.pool = pool;
        self.index = None;
    }

    pub fn build(&mut self, validation: &Dataset) -> Result<(), SelectionError> {
        if self.pool.is_empty() {
            return Err(SelectionError::Configuration(
                "pool must be set before building".into(),
            ));
        }
        self.index = Some(CompetenceIndex::build(validation)?);
        Ok(())
    }

    /// The built index, or a configuration error when `build` has not run
    /// against the current pool.
    pub fn index(&self) -> Result<&CompetenceIndex, SelectionError> {
        self.index
            .as_ref()
            .ok_or_else(|| SelectionError::Configuration("selector queried before build".into()))
    }

    /// The k validation instances nearest to `instance`.
    pub fn competence_region(&self, instance: &dyn Instance) -> Result<Neighborhood, SelectionError> {
        Ok(self.index()?.query(instance, self.k_neighbors))
    }
}
