use std::sync::Arc;

use crate::core::attributes::{AttributeRef, NominalAttribute, NumericAttribute};
use crate::core::instance_header::InstanceHeader;

/// Schema with two numeric features and a trailing class column: nominal
/// with `num_classes` labels, or numeric when `num_classes` is 0.
pub fn header_two_features(num_classes: usize) -> Arc<InstanceHeader> {
    let class_attribute: AttributeRef = if num_classes == 0 {
        Arc::new(NumericAttribute::new("target".into()))
    } else {
        let labels = (0..num_classes).map(|index| format!("c{index}")).collect();
        Arc::new(NominalAttribute::from_values("class".into(), labels))
    };

    let attributes: Vec<AttributeRef> = vec![
        Arc::new(NumericAttribute::new("x".into())),
        Arc::new(NumericAttribute::new("y".into())),
        class_attribute,
    ];
    Arc::new(InstanceHeader::new("two-features".into(), attributes, 2))
}
