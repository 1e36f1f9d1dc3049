pub mod attributes;
pub mod dataset;
pub mod estimators;
pub mod instance_header;
pub mod instances;
pub mod neighbors;
