use std::sync::Arc;

use crate::core::dataset::Dataset;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::{DenseInstance, InstanceRef};

/// One instance over `header`, values in attribute order with the class
/// column included. `NaN` marks a missing value.
pub fn instance_from_values(header: &Arc<InstanceHeader>, values: &[f64]) -> InstanceRef {
    Arc::new(DenseInstance::new(Arc::clone(header), values.to_vec()))
}

/// Dataset assembled from literal rows, one instance per row.
pub fn dataset_from_rows(header: &Arc<InstanceHeader>, rows: &[Vec<f64>]) -> Dataset {
    let instances = rows
        .iter()
        .map(|row| instance_from_values(header, row))
        .collect();
    Dataset::with_instances(Arc::clone(header), instances)
}
