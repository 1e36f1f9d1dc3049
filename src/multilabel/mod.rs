mod dataset;
mod learner;
mod mlknn;

pub use dataset::MultiLabelDataset;
pub use learner::{MultiLabelLearner, MultiLabelOutput};
pub use mlknn::MlKnn;
