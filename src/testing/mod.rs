pub mod dummies;
pub mod stubs;
