pub mod datasets;
pub mod headers;

pub use datasets::{dataset_from_rows, instance_from_values};
pub use headers::header_two_features;
