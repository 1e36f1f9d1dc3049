pub mod counting_classifier;
pub mod fixed_classifier;

pub use counting_classifier::{CallCount, CountingClassifier};
pub use fixed_classifier::FixedClassifier;
