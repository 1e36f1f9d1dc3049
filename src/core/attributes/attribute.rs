use std::any::Any;
use std::sync::Arc;

/// Column descriptor shared by every instance of a dataset.
///
/// Concrete attributes are either numeric or nominal; code that needs the
/// concrete type goes through [`as_any`](Attribute::as_any).
pub trait Attribute: Any {
    fn name(&self) -> &str;

    fn is_nominal(&self) -> bool;

    fn as_any(&self) -> &dyn Any;
}

pub type AttributeRef = Arc<dyn Attribute + Send + Sync>;
