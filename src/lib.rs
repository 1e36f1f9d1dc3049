pub mod classifiers;
pub mod combination;
pub mod core;
pub mod data;
pub mod evaluation;
pub mod multilabel;
pub mod selection;
pub mod tasks;
pub mod ui;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;
