use crate::core::attributes::{Attribute, AttributeRef, NominalAttribute};

/// Schema shared by every instance of a dataset: attribute list plus the
/// index of the class column.
pub struct InstanceHeader {
    pub relation_name: String,
    pub attributes: Vec<AttributeRef>,
    pub class_index: usize,
}

impl InstanceHeader {
    pub fn new(relation_name: String, attributes: Vec<AttributeRef>, class_index: usize) -> Self {
        InstanceHeader {
            relation_name,
            attributes,
            class_index,
        }
    }

    pub fn relation_name(&self) -> &str {
        &self.relation_name
    }

    pub fn number_of_attributes(&self) -> usize {
        self.attributes.len()
    }

    pub fn attribute_at_index(&self, index: usize) -> Option<&dyn Attribute> {
        self.attributes
            .get(index)
            .map(|attribute| &**attribute as &dyn Attribute)
    }

    pub fn index_of_attribute(&self, name: &str) -> Option<usize> {
        self.attributes
            .iter()
            .position(|attribute| attribute.name() == name)
    }

    pub fn class_index(&self) -> usize {
        self.class_index
    }

    pub fn class_attribute(&self) -> Option<&dyn Attribute> {
        self.attribute_at_index(self.class_index)
    }

    /// Number of class labels, or 0 when the class attribute is numeric
    /// or absent.
    pub fn number_of_classes(&self) -> usize {
        match self.class_attribute() {
            Some(attribute) => attribute
                .as_any()
                .downcast_ref::<NominalAttribute>()
                .map_or(0, NominalAttribute::number_of_values),
            None => 0,
        }
    }
}
