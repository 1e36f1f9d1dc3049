use crate::classifiers::classifier::{ClassifierRef, ModelError};
use crate::core::instances::Instance;

/// Ordered, frozen collection of trained classifiers.
///
/// A member's position is its identity: selection strategies hand indexes
/// into this pool around, so the order must not change once selectors are
/// built against it.
#[derive(Clone, Default)]
pub struct ClassifierPool {
    members: Vec<ClassifierRef>,
}

impl ClassifierPool {
    pub fn new(members: Vec<ClassifierRef>) -> ClassifierPool {
        ClassifierPool { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ClassifierRef> {
        self.members.get(index)
    }

    pub fn members(&self) -> &[ClassifierRef] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ClassifierRef> {
        self.members.iter()
    }

    /// Every member's predicted label for `instance`, in pool order. This
    /// is the pool's behavior vector for the instance.
    pub fn predictions(&self, instance: &dyn Instance) -> Result<Vec<f64>, ModelError> {
        self.members
            .iter()
            .map(|member| member.classify(instance))
            .collect()
    }
}
