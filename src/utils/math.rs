/// Standard normal cumulative distribution function.
pub fn normal_probability(a: f64) -> f64 {
    0.5 * (1.0 + libm::erf(a / (2.0f64).sqrt()))
}

/// Index of the largest value, ties going to the lowest index. `NaN`
/// entries are skipped; `None` when nothing comparable remains.
pub fn max_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some(current) if values[current] >= value => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Index of the smallest value, ties going to the lowest index.
pub fn min_index(values: &[f64]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (index, &value) in values.iter().enumerate() {
        if value.is_nan() {
            continue;
        }
        match best {
            Some(current) if values[current] <= value => {}
            _ => best = Some(index),
        }
    }
    best
}

/// Indexes that order `values` ascending. Equal values keep their relative
/// order; `NaN` sorts last.
pub fn sort_indexes_ascending(values: &[f64]) -> Vec<usize> {
    let mut indexes: Vec<usize> = (0..values.len()).collect();
    indexes.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
    indexes
}
