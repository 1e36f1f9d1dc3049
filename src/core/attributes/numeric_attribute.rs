use std::any::Any;

use crate::core::attributes::Attribute;

/// Real-valued attribute.
#[derive(Debug, Clone, Default)]
pub struct NumericAttribute {
    pub name: String,
}

impl NumericAttribute {
    pub fn new(name: String) -> Self {
        NumericAttribute { name }
    }
}

impl Attribute for NumericAttribute {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_nominal(&self) -> bool {
        false
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
