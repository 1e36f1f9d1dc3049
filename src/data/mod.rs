mod arff;

pub use arff::{collect_arff_files, load_arff, parse_arff};
