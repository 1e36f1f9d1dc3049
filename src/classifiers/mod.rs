mod classifier;
mod majority_class;
mod naive_bayes;
mod nearest_neighbors;
mod pool;

pub use classifier::Classifier;
pub use classifier::ClassifierRef;
pub use classifier::ModelError;
pub use majority_class::MajorityClass;
pub use naive_bayes::GaussianNaiveBayes;
pub use nearest_neighbors::KnnClassifier;
pub use pool::ClassifierPool;
