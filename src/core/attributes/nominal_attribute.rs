use std::any::Any;
use std::collections::HashMap;

use crate::core::attributes::Attribute;

/// Categorical attribute. Values are encoded as the index of their label,
/// so instances can store every column as `f64`.
#[derive(Debug, Clone, Default)]
pub struct NominalAttribute {
    pub name: String,
    pub values: Vec<String>,
    pub label_to_index: HashMap<String, usize>,
}

impl NominalAttribute {
    pub fn new(name: String) -> Self {
        NominalAttribute {
            name,
            values: Vec::new(),
            label_to_index: HashMap::new(),
        }
    }

    /// Builds the attribute from its label list, indexing labels in order.
    pub fn from_values(name: String, values: Vec<String>) -> Self {
        let label_to_index = values
            .iter()
            .enumerate()
            .map(|(index, label)| (label.clone(), index))
            .collect();
        NominalAttribute {
            name,
            values,
            label_to_index,
        }
    }

    pub fn index_of_value(&self, label: &str) -> Option<usize> {
        self.label_to_index.get(label).copied()
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.values.get(index).map(String::as_str)
    }

    pub fn number_of_values(&self) -> usize {
        self.values.len()
    }
}

impl Attribute for NominalAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_nominal(&self) -> bool {
        true
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
