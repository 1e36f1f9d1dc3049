use std::io::Error;
use std::sync::Arc;

use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;

/// A single observation: numeric-encoded values for every attribute in its
/// header, with `NaN` standing for a missing value.
///
/// Nominal values hold the index of their label; the class column lives at
/// the header's class index.
pub trait Instance {
    /// Value of the attribute at `index`, or `None` when out of range.
    fn value_at_index(&self, index: usize) -> Option<f64>;

    /// Whether the value at `index` is missing. Fails on an out-of-range
    /// index.
    fn is_missing_at_index(&self, index: usize) -> Result<bool, Error>;

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute>;

    fn number_of_attributes(&self) -> usize;

    fn class_index(&self) -> usize;

    /// Value of the class column, or `None` when out of range.
    fn class_value(&self) -> Option<f64>;

    fn is_class_missing(&self) -> bool;

    fn number_of_classes(&self) -> usize;

    fn header(&self) -> &InstanceHeader;

    /// All values in attribute order, class column included.
    fn to_vec(&self) -> Vec<f64>;

    /// All values except the class column, in attribute order.
    fn feature_vector(&self) -> Vec<f64> {
        let count = self.number_of_attributes();
        let class_index = self.class_index();
        let mut features = Vec::with_capacity(count.saturating_sub(1));
        for index in 0..count {
            if index == class_index {
                continue;
            }
            if let Some(value) = self.value_at_index(index) {
                features.push(value);
            }
        }
        features
    }
}

pub type InstanceRef = Arc<dyn Instance + Send + Sync>;
