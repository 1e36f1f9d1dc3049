pub mod file_parsing;
pub mod labels;
pub mod math;
pub mod statistics;
pub mod system;
