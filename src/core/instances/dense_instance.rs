use std::io::{Error, ErrorKind};
use std::sync::Arc;

use crate::core::attributes::Attribute;
use crate::core::instance_header::InstanceHeader;
use crate::core::instances::instance::Instance;

/// Instance backed by one `f64` per attribute, in header order.
pub struct DenseInstance {
    pub header: Arc<InstanceHeader>,
    pub values: Vec<f64>,
}

impl DenseInstance {
    pub fn new(header: Arc<InstanceHeader>, values: Vec<f64>) -> DenseInstance {
        DenseInstance { header, values }
    }
}

impl Instance for DenseInstance {
    fn value_at_index(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    fn is_missing_at_index(&self, index: usize) -> Result<bool, Error> {
        match self.values.get(index) {
            Some(value) => Ok(value.is_nan()),
            None => Err(Error::new(ErrorKind::InvalidInput, "Index out of bounds")),
        }
    }

    fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.header.attribute_at_index(index)
    }

    fn number_of_attributes(&self) -> usize {
        self.header.number_of_attributes()
    }

    fn class_index(&self) -> usize {
        self.header.class_index()
    }

    fn class_value(&self) -> Option<f64> {
        self.values.get(self.header.class_index()).copied()
    }

    fn is_class_missing(&self) -> bool {
        self.class_value().is_none_or(f64::is_nan)
    }

    fn number_of_classes(&self) -> usize {
        self.header.number_of_classes()
    }

    fn header(&self) -> &InstanceHeader {
        &self.header
    }

    fn to_vec(&self) -> Vec<f64> {
        self.values.clone()
    }
}
