mod error;
mod selectors;
mod tasks;

pub use error::BuildError;

pub use selectors::build_selector;
pub use tasks::{ConfiguredTask, build_task};
