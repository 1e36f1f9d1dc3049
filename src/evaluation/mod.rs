mod accuracy;

pub use accuracy::evaluate_accuracy;
